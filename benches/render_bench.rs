//! Benchmarks for scene building

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use structview::prelude::*;
use structview::render::LoadDiagram;

fn create_multi_story_frame(stories: usize, bays: usize) -> Structure {
    let mut s = Structure::new();

    let story_height = 3.5;
    let bay_width = 6.0;

    // Create nodes
    for story in 0..=stories {
        for bay in 0..=bays {
            let name = format!("N{}_{}", story, bay);
            let x = bay as f64 * bay_width;
            let z = story as f64 * story_height;
            s.add_node(Node::new(&name, x, 0.0, z)).unwrap();
        }
    }

    // Create columns
    for story in 0..stories {
        for bay in 0..=bays {
            let name = format!("Col{}_{}", story, bay);
            let i_node = format!("N{}_{}", story, bay);
            let j_node = format!("N{}_{}", story + 1, bay);
            s.add_bar(Bar::new(&name, &i_node, &j_node).with_section("Column", "Steel")).unwrap();
        }
    }

    // Create beams, each with a local line load
    let mut load = Load::new("L1");
    for story in 1..=stories {
        for bay in 0..bays {
            let name = format!("Beam{}_{}", story, bay);
            let i_node = format!("N{}_{}", story, bay);
            let j_node = format!("N{}_{}", story, bay + 1);
            s.add_bar(Bar::new(&name, &i_node, &j_node).with_section("Beam", "Steel")).unwrap();
            load = load.with_distributed(BarDistributedLoad::uniform(
                &format!("q{}", name),
                &name,
                [0.0, bay_width],
                LoadSystem::Local,
                ForceComponent::Fz,
                -10.0,
            ));
        }
    }

    // Add supports at base
    for bay in 0..=bays {
        s.add_support(Support::fixed(&format!("N0_{}", bay))).unwrap();
    }

    // Lateral loads at the floors
    for story in 1..=stories {
        let name = format!("N{}_0", story);
        load = load.with_nodal(NodalLoad::force(&format!("H{}", story), &name, 5.0, 0.0, 0.0));
    }
    s.add_load(load);

    s
}

fn benchmark_small_frame(c: &mut Criterion) {
    let s = create_multi_story_frame(3, 2);
    let builder = SceneBuilder::default();
    c.bench_function("scene_3story_2bay", |b| {
        b.iter(|| black_box(builder.build(black_box(&s))))
    });
}

fn benchmark_medium_frame(c: &mut Criterion) {
    let s = create_multi_story_frame(10, 5);
    let builder = SceneBuilder::default();
    c.bench_function("scene_10story_5bay", |b| {
        b.iter(|| black_box(builder.build(black_box(&s))))
    });
}

fn benchmark_skew_diagram(c: &mut Criterion) {
    let diagram = LoadDiagram::new(
        ForceComponent::Fz,
        LoadSystem::Global,
        [2.0, -3.0],
        [0.0, 11.0],
        [Vec3::zeros(), Vec3::new(6.0, 8.0, 6.0)],
    );
    c.bench_function("diagram_global_force_line", |b| {
        b.iter(|| black_box(diagram.build().unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_small_frame,
    benchmark_medium_frame,
    benchmark_skew_diagram,
);

criterion_main!(benches);
