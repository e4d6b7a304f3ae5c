//! Arrow heads sitting on the bar

use crate::glyphs::{Arrow, AxisDirection, AxisLabel};
use crate::math::Sign;
use crate::render::{number_text, LABEL_FONT_SIZE};
use crate::scene::{AnchorX, AnchorY, SceneNode};

use super::{LoadDiagram, Sampling};

/// Distance of the sign-change flags from the zero sample
fn flag_shift(negative_start: bool) -> f64 {
    0.01 + if negative_start { 0.05 } else { 0.0 }
}

fn head(direction: AxisDirection, height: f64) -> Arrow {
    Arrow::new(direction)
        .with_length(height)
        .with_scale((height + 0.2) * 0.5)
        .head_only()
        .end_base()
}

pub(super) fn build(diagram: &LoadDiagram, sampling: &Sampling) -> Vec<SceneNode> {
    let axis = diagram.component.axis();
    let palette = &diagram.palette;
    let [l0, l1] = diagram.loads;
    let crossing = diagram.crosses_zero();

    let mut nodes = Vec::new();
    for (i, &s) in sampling.samples.iter().enumerate() {
        let y = sampling.value_at(s);

        if !Sign::of(y).is_zero() {
            let negative = y < 0.0;
            nodes.push(
                head(AxisDirection::along(axis, negative), y.abs())
                    .with_color(palette.arrow(negative))
                    .at(sampling.point_at(s))
                    .build(),
            );
        } else if crossing {
            // Two small heads pointing away from each other mark the flip
            let negative_start = l0 < 0.0;
            let shift = flag_shift(negative_start);
            for (offset, negative) in [(-shift, negative_start), (shift, !negative_start)] {
                nodes.push(
                    head(AxisDirection::along(axis, negative), 0.0)
                        .with_color(palette.arrow(negative))
                        .at(sampling.point_at(s + offset))
                        .build(),
                );
            }
        } else {
            let negative = diagram.zero_is_negative();
            nodes.push(
                head(AxisDirection::along(axis, negative), 0.0)
                    .with_color(palette.arrow(negative))
                    .at(sampling.point_at(s))
                    .build(),
            );
        }

        let end = if i == 0 {
            0
        } else if i == sampling.last() {
            1
        } else {
            continue;
        };
        let value = diagram.loads[end];

        let (anchor_x, color) = if crossing {
            let anchor = if value < 0.0 { AnchorX::Left } else { AnchorX::Right };
            (anchor, palette.label(value < 0.0))
        } else if l0 >= 0.0 && l1 >= 0.0 {
            (AnchorX::Right, palette.label(false))
        } else {
            (AnchorX::Left, palette.label(true))
        };

        nodes.push(
            AxisLabel::new(number_text(value), axis, LABEL_FONT_SIZE, color)
                .at(sampling.point_at(sampling.x[end]))
                .with_anchor(anchor_x, AnchorY::Bottom)
                .with_offset(0.0, (y.abs() + 0.2) * 0.1)
                .build(),
        );
    }
    nodes
}
