//! Curved arrows along the bar for distributed moments

use crate::glyphs::AxisDirection;
use crate::math::Sign;
use crate::render::point_load::MomentGlyph;
use crate::scene::SceneNode;

use super::{LoadDiagram, Sampling};

/// Radius of the small arcs drawn where the moment vanishes
const FLAG_RADIUS: f64 = 0.1 * 0.3;

pub(super) fn build(diagram: &LoadDiagram, sampling: &Sampling) -> Vec<SceneNode> {
    let axis = diagram.component.axis();
    let palette = &diagram.palette;
    let [l0, l1] = diagram.loads;
    let last = sampling.last();

    let mut nodes = Vec::new();
    for (i, &s) in sampling.samples.iter().enumerate() {
        let y = sampling.value_at(s);

        if !Sign::of(y).is_zero() {
            let negative = y < 0.0;
            let size = (y.abs() + 0.1) * 0.3;
            let value = if i == 0 { l0 } else { l1 };
            nodes.push(
                MomentGlyph::new(AxisDirection::along(axis, negative), value)
                    .with_size(size, size)
                    .with_colors(palette.arrow(negative), palette.label(negative))
                    .with_label(i == 0 || i == last)
                    .build()
                    .with_position(sampling.point_at(s)),
            );
        } else if diagram.crosses_zero() {
            let negative_start = l0 < 0.0;
            for (offset, negative) in [(-0.03, negative_start), (0.03, !negative_start)] {
                nodes.push(
                    MomentGlyph::new(AxisDirection::along(axis, negative), 0.0)
                        .with_size(FLAG_RADIUS, FLAG_RADIUS)
                        .with_colors(palette.arrow(negative), palette.label(negative))
                        .build()
                        .with_position(sampling.point_at(s + offset)),
                );
            }
        } else {
            let negative = diagram.zero_is_negative();
            nodes.push(
                MomentGlyph::new(AxisDirection::along(axis, negative), 0.0)
                    .with_size(FLAG_RADIUS, FLAG_RADIUS)
                    .with_colors(palette.arrow(negative), palette.label(negative))
                    .with_label(true)
                    .build()
                    .with_position(sampling.point_at(s)),
            );
        }
    }
    nodes
}
