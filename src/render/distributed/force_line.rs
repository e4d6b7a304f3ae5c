//! Arrows hanging from an envelope line offset from the bar

use crate::error::ViewResult;
use crate::glyphs::{Arrow, AxisDirection, AxisLabel};
use crate::math::{root_linear, Axis, Vec3};
use crate::render::{number_text, LABEL_FONT_SIZE};
use crate::scene::{AnchorX, AnchorY, Polyline, Primitive, SceneNode};

use super::{LoadDiagram, Sampling};

/// Envelope width, in world units
const ENVELOPE_WIDTH: f64 = 0.02;

/// Arrows shorter than this are left out on X-primary bars
const MIN_ARROW_HEIGHT: f64 = 0.1;

pub(super) fn build(diagram: &LoadDiagram, sampling: &Sampling) -> ViewResult<Vec<SceneNode>> {
    let axis = diagram.component.axis();
    let unit = axis.unit();
    let palette = &diagram.palette;
    let [l0, l1] = diagram.loads;
    let crossing = diagram.crosses_zero();

    let envelope = |s: f64, y: f64| -> Vec3 { sampling.point_at(s) - unit * y };
    let start = envelope(sampling.x[0], sampling.y[0]);
    let end = envelope(sampling.x[1], sampling.y[1]);

    let mut lines = SceneNode::group();
    if crossing {
        let root = root_linear((sampling.x[0], sampling.y[0]), (sampling.x[1], sampling.y[1]))?;
        let middle = sampling.point_at(root);
        lines.push_primitive(Primitive::Polyline(Polyline::new(
            vec![start, middle],
            palette.arrow(l0 < 0.0),
            ENVELOPE_WIDTH,
        )));
        lines.push_primitive(Primitive::Polyline(Polyline::new(
            vec![middle, end],
            palette.arrow(l1 < 0.0),
            ENVELOPE_WIDTH,
        )));
    } else {
        let positive = l0 >= 0.0 && l1 >= 0.0;
        lines.push_primitive(Primitive::Polyline(Polyline::new(
            vec![start, end],
            palette.arrow(!positive),
            ENVELOPE_WIDTH,
        )));
    }

    // Vertical and Y-primary bars draw every sample
    let drops_short = sampling.plane.primary == Axis::X;

    let mut nodes = Vec::new();
    for (i, &s) in sampling.samples.iter().enumerate() {
        let y = sampling.value_at(s);
        if !drops_short || y.abs() > MIN_ARROW_HEIGHT {
            let negative = y < 0.0;
            nodes.push(
                Arrow::new(AxisDirection::along(axis, negative))
                    .at(envelope(s, y))
                    .with_length(y.abs())
                    .with_scale(0.3)
                    .with_color(palette.arrow(negative))
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
        let anchor_y = if end == 0 { AnchorY::Bottom } else { AnchorY::Top };

        let (anchor_x, color) = if crossing {
            let toward_end = match (end, l1 < 0.0) {
                (0, true) | (1, false) => AnchorX::Left,
                _ => AnchorX::Right,
            };
            (toward_end, palette.label(value < 0.0))
        } else if l0 >= 0.0 && l1 >= 0.0 {
            (AnchorX::Left, palette.label(false))
        } else {
            (AnchorX::Right, palette.label(true))
        };

        nodes.push(
            AxisLabel::new(number_text(value), axis, LABEL_FONT_SIZE, color)
                .at(envelope(sampling.x[end], sampling.y[end]))
                .with_anchor(anchor_x, anchor_y)
                .build(),
        );
    }

    nodes.push(lines);
    Ok(nodes)
}
