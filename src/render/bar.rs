//! Bar glyphs: the bar line with its local axes, label, releases and loads

use crate::config::ViewConfig;
use crate::elements::Bar;
use crate::error::ViewResult;
use crate::frame::{build_frame, UpHint};
use crate::glyphs::{Axes, AxisLabel};
use crate::math::{Axis, Vec3};
use crate::model::Structure;
use crate::scene::{AnchorX, AnchorY, Color, EntityRef, Polyline, Primitive, SceneNode};

use super::distributed::bar_distributed_load;
use super::point_load::bar_point_load;
use super::release::bar_releases;
use super::Warnings;

const BAR_COLOR: Color = Color::ORANGE;
const BAR_WIDTH: f64 = 0.02;

/// Where the local axes and the label are attached: a third of the way
/// along the bar
pub fn local_axes_point(p0: &Vec3, p1: &Vec3) -> Vec3 {
    p0 + (p1 - p0) / 3.0
}

/// The pickable `bar-<name>` line
pub fn bar_line(bar: &Bar, p0: &Vec3, p1: &Vec3) -> SceneNode {
    SceneNode::named(format!("bar-{}", bar.name))
        .with_entity(EntityRef::bar(&bar.name))
        .with_primitive(Primitive::Polyline(Polyline::new(
            vec![*p0, *p1],
            BAR_COLOR,
            BAR_WIDTH,
        )))
}

/// Render a bar and everything attached to it.
///
/// Only the line is named, so picking a load or label of the bar does not
/// select it. A failing load is reported through `warnings` and left out;
/// the bar itself fails only when its geometry is degenerate.
pub fn render_bar(
    bar: &Bar,
    structure: &Structure,
    config: &ViewConfig,
    warnings: &mut Warnings,
) -> ViewResult<SceneNode> {
    let flags = &config.flags;
    let (p0, p1) = structure.bar_points(bar)?;
    let frame = build_frame(&(p1 - p0), bar.twist(), UpHint::ZUp)?;
    let anchor = local_axes_point(&p0, &p1);

    let mut node = SceneNode::group().with_child(bar_line(bar, &p0, &p1));

    if flags.bar_local_axes {
        node.push_child(
            Axes {
                position: anchor,
                rotation: frame.rotation(),
                scale: config.local_axes_scale,
                label: true,
                ..Default::default()
            }
            .build(),
        );
    }

    if flags.bar_releases && !bar.releases.is_empty() {
        node.push_child(bar_releases(bar, &p0, &p1, config.release_radius)?);
    }

    if flags.bar_point_loads {
        for load in structure.loads.iter().flat_map(|l| &l.bars.point) {
            if load.bar != bar.name {
                continue;
            }
            let entity = format!("{}/{}", bar.name, load.name);
            if let Some(glyph) = warnings.isolate(&entity, bar_point_load(load, bar, &p0, &p1)) {
                node.push_child(glyph);
            }
        }
    }

    if flags.bar_distributed_loads {
        for load in structure.loads.iter().flat_map(|l| &l.bars.distributed) {
            if load.bar != bar.name {
                continue;
            }
            let entity = format!("{}/{}", bar.name, load.name);
            let result = bar_distributed_load(load, bar, &p0, &p1, config.load_size);
            if let Some(glyph) = warnings.isolate(&entity, result) {
                node.push_child(glyph);
            }
        }
    }

    if flags.bar_label {
        node.push_child(
            SceneNode::group()
                .with_position(anchor)
                .with_rotation(frame.rotation())
                .with_child(
                    AxisLabel::new(&bar.name, Axis::X, config.label_size, BAR_COLOR)
                        .with_anchor(AnchorX::Left, AnchorY::Bottom)
                        .build(),
                ),
        );
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Node, Release};
    use crate::loads::{BarDistributedLoad, BarPointLoad, ForceComponent, Load, LoadSystem, LoadVector};
    use approx::assert_relative_eq;

    fn beam(bar: Bar) -> Structure {
        let mut s = Structure::new();
        s.add_node(Node::new("1", 0.0, 0.0, 0.0)).unwrap();
        s.add_node(Node::new("2", 6.0, 0.0, 0.0)).unwrap();
        s.add_bar(bar).unwrap();
        s
    }

    #[test]
    fn test_bar_parts() {
        let s = beam(Bar::new("B1", "1", "2").with_releases(&[Release::Rzj]));
        let mut warnings = Warnings::default();
        let node = render_bar(&s.bars[0], &s, &ViewConfig::default(), &mut warnings).unwrap();

        // line, axes, releases, label
        assert_eq!(node.children.len(), 4);
        let line = node.find_by_name("bar-B1").unwrap();
        assert_eq!(line.entity, Some(EntityRef::bar("B1")));

        let texts: Vec<_> = node.labels().iter().map(|l| l.text.clone()).collect();
        assert_eq!(texts, vec!["X", "Y", "Z", "B1"]);
        assert_eq!(node.labels()[3].color, Color::ORANGE);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_flags_hide_parts() {
        let s = beam(Bar::new("B1", "1", "2"));
        let mut config = ViewConfig::default();
        config.flags.bar_local_axes = false;
        config.flags.bar_label = false;
        let mut warnings = Warnings::default();
        let node = render_bar(&s.bars[0], &s, &config, &mut warnings).unwrap();
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_loads_attached_to_matching_bar() {
        let mut s = beam(Bar::new("B1", "1", "2"));
        s.add_load(
            Load::new("L1")
                .with_point(BarPointLoad::new(
                    "P",
                    "B1",
                    2.0,
                    LoadSystem::Global,
                    LoadVector::new(0.0, 0.0, -5.0, 0.0, 0.0, 0.0),
                ))
                .with_distributed(BarDistributedLoad::uniform(
                    "q",
                    "B1",
                    [0.0, 6.0],
                    LoadSystem::Global,
                    ForceComponent::Fz,
                    -2.0,
                )),
        );
        let mut config = ViewConfig::default();
        config.flags.bar_local_axes = false;
        config.flags.bar_label = false;
        let mut warnings = Warnings::default();
        let node = render_bar(&s.bars[0], &s, &config, &mut warnings).unwrap();
        assert_eq!(node.children.len(), 3);
        assert!(node.labels().iter().any(|l| l.text == "-5"));
        assert!(node.labels().iter().any(|l| l.text == "-2"));
    }

    #[test]
    fn test_local_axes_point() {
        let p = local_axes_point(&Vec3::new(0.0, 0.0, 0.0), &Vec3::new(3.0, 6.0, 9.0));
        assert_relative_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }
}
