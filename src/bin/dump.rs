//! structview dump - print a summary of the scene built for a document
//!
//! Usage: `structview-dump <document.json> [config.json]`

use anyhow::{bail, Context};

use structview::prelude::*;
use structview::scene::Primitive;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(document) = args.next() else {
        bail!("usage: structview-dump <document.json> [config.json]");
    };
    let config = match args.next() {
        Some(path) => ViewConfig::from_json_file(&path)
            .with_context(|| format!("failed to read config '{}'", path))?,
        None => ViewConfig::default(),
    };

    let structure = Structure::from_json_file(&document)
        .with_context(|| format!("failed to read document '{}'", document))?;
    if let Err(e) = structure.validate() {
        println!("Validation: {}", e);
    }

    let report = SceneBuilder::new(config).build(&structure);

    let mut entities = 0;
    report.scene.walk(&mut |node, _, _| {
        if node.entity.is_some() {
            entities += 1;
        }
    });
    let scene = &report.scene;
    let polylines = scene.count_primitives(|p| matches!(p, Primitive::Polyline(_)));
    let cones = scene.count_primitives(|p| matches!(p, Primitive::Cone(_)));
    let points = scene.count_primitives(|p| matches!(p, Primitive::Point(_)));
    let labels = scene.count_primitives(|p| matches!(p, Primitive::Text(_)));

    println!("=== structview: {} ===\n", document);
    println!("Document:");
    println!("  Nodes:    {}", structure.nodes.len());
    println!("  Bars:     {}", structure.bars.len());
    println!("  Supports: {}", structure.supports.len());
    println!("  Loads:    {}", structure.loads.len());
    println!("  Results:  {}", if structure.has_results() { "yes" } else { "no" });
    println!("\nScene:");
    println!("  Pickable entities: {}", entities);
    println!("  Polylines:         {}", polylines);
    println!("  Cones:             {}", cones);
    println!("  Points:            {}", points);
    println!("  Labels:            {}", labels);

    if report.warnings.is_empty() {
        println!("\nNo warnings");
    } else {
        println!("\nWarnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }
    Ok(())
}
