//! Distributed-load diagrams along bars
//!
//! A distributed load is linear between two positions on a bar. It is drawn
//! as a train of sampled glyphs whose size follows the load, with the two
//! end values labelled. The samples are taken along the bar's primary global
//! axis (see [`ProjectionPlane`]) so a single construction covers every bar
//! orientation.
//!
//! Three styles exist:
//!
//! - [`DiagramStyle::Force`]: arrow heads sitting on the bar, for forces
//!   acting along a direction in which the bar does not extend
//! - [`DiagramStyle::ForceLine`]: arrows hanging from an envelope line, for
//!   global forces on bars that are not aligned with the force axis
//! - [`DiagramStyle::Moment`]: curved arrows about the moment axis

mod force;
mod force_line;
mod moment;

use log::debug;

use crate::elements::Bar;
use crate::error::ViewResult;
use crate::frame::{build_frame, UpHint};
use crate::loads::{check_bar_position, BarDistributedLoad, ForceComponent, LoadSystem};
use crate::math::{
    lin_space, opposite_signs, projection_plane_for, root_linear, rotation_matrix, Axis,
    LinearFunction, ProjectionPlane, Vec3,
};
use crate::scene::SceneNode;

use super::{component_colors, Palette};

/// Sample spacing of force diagrams, in bar units
const ARROW_SPACING: f64 = 0.3;

/// Glyph family used for a diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramStyle {
    Force,
    ForceLine,
    Moment,
}

/// Bump an even count down to odd, never below three
fn odd_at_least_three(n: i64) -> usize {
    let n = if n % 2 == 0 { n - 1 } else { n };
    n.max(3) as usize
}

/// Number of force samples over a span
pub fn arrow_count(span: f64) -> usize {
    odd_at_least_three((span.abs() / ARROW_SPACING).ceil() as i64)
}

/// Number of moment samples over a span; moments are spaced twice as far
pub fn moment_count(span: f64) -> usize {
    odd_at_least_three((span.abs() / ARROW_SPACING / 2.0).ceil() as i64)
}

/// Whether the bar keeps constant coordinates on both axes other than `axis`
fn is_aligned(axis: Axis, p0: &Vec3, p1: &Vec3) -> bool {
    match axis {
        Axis::X => p0.y == p1.y && p0.z == p1.z,
        Axis::Y => p0.x == p1.x && p0.z == p1.z,
        Axis::Z => p0.x == p1.x && p0.y == p1.y,
    }
}

/// Pick the glyph family for a component.
///
/// Moments always use curved arrows. Local forces are drawn in the bar
/// frame where the bar runs along x, so they sit directly on the bar.
/// Global forces sit on the bar only when the bar is aligned with the
/// force axis; otherwise an envelope line is drawn.
pub fn diagram_style(component: ForceComponent, system: LoadSystem, p0: &Vec3, p1: &Vec3) -> DiagramStyle {
    if component.is_moment() {
        return DiagramStyle::Moment;
    }
    match system {
        LoadSystem::Local => DiagramStyle::Force,
        LoadSystem::Global if is_aligned(component.axis(), p0, p1) => DiagramStyle::Force,
        LoadSystem::Global => DiagramStyle::ForceLine,
    }
}

// ========================
// Sampling
// ========================

/// Load values fitted against the primary coordinate of the bar
#[derive(Debug, Clone)]
pub(crate) struct Sampling {
    pub plane: ProjectionPlane,
    /// Primary coordinate of the load start and end, relative to the bar start
    pub x: [f64; 2],
    /// Scaled load heights at start and end
    pub y: [f64; 2],
    pub load: LinearFunction,
    pub samples: Vec<f64>,
}

impl Sampling {
    fn new(diagram: &LoadDiagram, points: &[Vec3; 2], count: usize) -> ViewResult<Self> {
        let plane = projection_plane_for(&points[0], &points[1])?;
        let rotation = rotation_matrix(&points[0], &points[1])?;
        let [l0, l1] = diagram.loads;

        let x = [
            plane.global_position(&rotation, diagram.positions[0]),
            plane.global_position(&rotation, diagram.positions[1]),
        ];
        let scale = diagram.size / l0.abs().max(l1.abs());
        let y = [l0 * scale, l1 * scale];
        let load = LinearFunction::through((x[0], y[0]), (x[1], y[1]))?;

        Ok(Self {
            plane,
            x,
            y,
            load,
            samples: lin_space(x[0], x[1], count),
        })
    }

    pub fn point_at(&self, s: f64) -> Vec3 {
        self.plane.point_at(s)
    }

    pub fn value_at(&self, s: f64) -> f64 {
        self.load.eval(s)
    }

    /// Index of the last sample
    pub fn last(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }
}

// ========================
// Diagram
// ========================

/// A linear load of one component between two positions on a bar
#[derive(Debug, Clone)]
pub struct LoadDiagram {
    pub component: ForceComponent,
    pub system: LoadSystem,
    /// Magnitudes at start and end
    pub loads: [f64; 2],
    /// Start and end distance from the bar start
    pub positions: [f64; 2],
    /// Bar start and end in world coordinates
    pub bar_points: [Vec3; 2],
    /// Height of the tallest glyph
    pub size: f64,
    pub palette: Palette,
}

impl LoadDiagram {
    pub fn new(
        component: ForceComponent,
        system: LoadSystem,
        loads: [f64; 2],
        positions: [f64; 2],
        bar_points: [Vec3; 2],
    ) -> Self {
        Self {
            component,
            system,
            loads,
            positions,
            bar_points,
            size: 1.0,
            palette: Palette::default(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn style(&self) -> DiagramStyle {
        diagram_style(self.component, self.system, &self.bar_points[0], &self.bar_points[1])
    }

    /// The bar the diagram is constructed on. Local diagrams are built in
    /// the bar frame, where the bar is the unit segment on x.
    pub fn geometry(&self) -> [Vec3; 2] {
        match self.system {
            LoadSystem::Local => [Vec3::zeros(), Vec3::x()],
            LoadSystem::Global => self.bar_points,
        }
    }

    /// Whether the end magnitudes have strictly opposite signs
    pub fn crosses_zero(&self) -> bool {
        opposite_signs(self.loads[0], self.loads[1])
    }

    /// Primary coordinate, relative to the bar start, where the load
    /// changes sign
    pub fn sign_crossing(&self) -> ViewResult<Option<f64>> {
        if !self.crosses_zero() {
            return Ok(None);
        }
        let s = Sampling::new(self, &self.geometry(), 2)?;
        Ok(Some(root_linear((s.x[0], s.y[0]), (s.x[1], s.y[1]))?))
    }

    /// Whether a zero-height sample points the negative way; the larger end
    /// decides
    pub(crate) fn zero_is_negative(&self) -> bool {
        let [l0, l1] = self.loads;
        if l0.abs() >= l1.abs() {
            l0 < 0.0
        } else {
            l1 < 0.0
        }
    }

    /// Build the diagram; an empty group when both magnitudes are zero.
    ///
    /// Positions off the bar are rejected before sampling.
    pub fn build(&self) -> ViewResult<SceneNode> {
        if self.loads[0] == 0.0 && self.loads[1] == 0.0 {
            return Ok(SceneNode::group());
        }
        let length = (self.bar_points[1] - self.bar_points[0]).norm();
        for position in self.positions {
            check_bar_position(self.component.label(), position, length)?;
        }

        let style = self.style();
        debug!(
            "{:?} {:?} load {:?} over {:?} drawn as {:?}",
            self.system, self.component, self.loads, self.positions, style
        );

        let points = self.geometry();
        let span = self.positions[1] - self.positions[0];
        let count = match style {
            DiagramStyle::Moment => moment_count(span),
            _ => arrow_count(span),
        };
        let sampling = Sampling::new(self, &points, count)?;

        let children = match style {
            DiagramStyle::Force => force::build(self, &sampling),
            DiagramStyle::ForceLine => force_line::build(self, &sampling)?,
            DiagramStyle::Moment => moment::build(self, &sampling),
        };

        let mut node = SceneNode::group().with_position(points[0]);
        for child in children {
            node.push_child(child);
        }
        Ok(node)
    }
}

/// All active components of a distributed load on a bar.
///
/// Local loads are wrapped in the bar frame with the bar twist applied.
pub fn bar_distributed_load(
    load: &BarDistributedLoad,
    bar: &Bar,
    p0: &Vec3,
    p1: &Vec3,
    size: f64,
) -> ViewResult<SceneNode> {
    load.check_on((p1 - p0).norm())?;
    let mut node = match load.system {
        LoadSystem::Local => {
            let frame = build_frame(&(p1 - p0), bar.twist(), UpHint::ZUp)?;
            SceneNode::group()
                .with_position(*p0)
                .with_rotation(frame.rotation())
        }
        LoadSystem::Global => SceneNode::group(),
    };

    for (component, loads) in load.active_components() {
        let diagram = LoadDiagram::new(component, load.system, loads, load.position, [*p0, *p1])
            .with_size(size)
            .with_palette(component_colors(component));
        node.push_child(diagram.build()?);
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AnchorX, Primitive};
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_counts_are_odd() {
        assert_eq!(arrow_count(0.1), 3);
        assert_eq!(arrow_count(0.9), 3);
        assert_eq!(arrow_count(1.0), 3);
        assert_eq!(arrow_count(1.25), 5);
        assert_eq!(arrow_count(5.0), 17);
        assert_eq!(moment_count(5.0), 9);

        let mut previous = 3;
        for i in 1..200 {
            let n = arrow_count(i as f64 * 0.05);
            assert_eq!(n % 2, 1);
            assert!(n >= previous);
            assert!(n - previous == 0 || n - previous == 2);
            previous = n;
        }
    }

    #[test]
    fn test_routing() {
        let o = Vec3::zeros();
        let along_x = Vec3::new(5.0, 0.0, 0.0);
        let vertical = Vec3::new(0.0, 0.0, 3.0);
        let skew = Vec3::new(3.0, 4.0, 0.0);

        assert_eq!(diagram_style(ForceComponent::Fz, LoadSystem::Local, &o, &along_x), DiagramStyle::Force);
        assert_eq!(diagram_style(ForceComponent::Fz, LoadSystem::Global, &o, &vertical), DiagramStyle::Force);
        assert_eq!(diagram_style(ForceComponent::Fx, LoadSystem::Global, &o, &along_x), DiagramStyle::Force);
        assert_eq!(diagram_style(ForceComponent::Fz, LoadSystem::Global, &o, &along_x), DiagramStyle::ForceLine);
        assert_eq!(diagram_style(ForceComponent::Fy, LoadSystem::Global, &o, &skew), DiagramStyle::ForceLine);
        assert_eq!(diagram_style(ForceComponent::My, LoadSystem::Global, &o, &along_x), DiagramStyle::Moment);
    }

    #[test]
    fn test_zero_load_is_empty() {
        let d = LoadDiagram::new(
            ForceComponent::Fz,
            LoadSystem::Global,
            [0.0, 0.0],
            [0.0, 1.0],
            [Vec3::zeros(), Vec3::x()],
        );
        assert!(d.build().unwrap().is_empty());
    }

    #[test]
    fn test_span_off_the_bar_is_an_error() {
        for positions in [[0.0, 1e300], [0.0, f64::INFINITY], [-3.0, 5.0]] {
            let d = LoadDiagram::new(
                ForceComponent::Fz,
                LoadSystem::Global,
                [-2.0, -2.0],
                positions,
                [Vec3::zeros(), Vec3::new(5.0, 0.0, 0.0)],
            );
            assert!(matches!(d.build(), Err(crate::error::ViewError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_sign_crossing_on_skew_bar() {
        // Bar of length 5 whose X projection is 3
        let d = LoadDiagram::new(
            ForceComponent::Fz,
            LoadSystem::Global,
            [2.0, -3.0],
            [0.0, 5.0],
            [Vec3::zeros(), Vec3::new(3.0, 4.0, 0.0)],
        );
        assert_relative_eq!(d.sign_crossing().unwrap().unwrap(), 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_local_fz_scenario() {
        let d = LoadDiagram::new(
            ForceComponent::Fz,
            LoadSystem::Local,
            [2.0, -3.0],
            [0.0, 5.0],
            [Vec3::zeros(), Vec3::new(5.0, 0.0, 0.0)],
        );
        assert_eq!(d.style(), DiagramStyle::Force);
        assert_relative_eq!(d.sign_crossing().unwrap().unwrap(), 2.0, epsilon = 1e-12);

        let node = d.build().unwrap();
        let labels = node.labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text, "2");
        assert_eq!(labels[1].text, "-3");
        assert_ne!(labels[0].anchor_x, labels[1].anchor_x);
        assert_eq!(labels[0].anchor_x, AnchorX::Right);

        // One head per sample, none of them flags
        assert_eq!(node.count_primitives(|p| matches!(p, Primitive::Cone(_))), 17);
    }

    #[test]
    fn test_local_load_wrapped_in_bar_frame() {
        let bar = Bar::new("B1", "1", "2");
        let load = BarDistributedLoad::uniform("q", "B1", [0.0, 2.0], LoadSystem::Local, ForceComponent::Fz, -1.0);
        let p0 = Vec3::new(1.0, 0.0, 0.0);
        let p1 = Vec3::new(1.0, 4.0, 0.0);
        let node = bar_distributed_load(&load, &bar, &p0, &p1, 1.0).unwrap();

        // Heads land on the bar between its start and 2 units along it
        for tip in node.cone_tips() {
            assert_relative_eq!(tip.x, 1.0, epsilon = 1e-12);
            assert_relative_eq!(tip.z, 0.0, epsilon = 1e-12);
            assert!(tip.y >= -1e-12 && tip.y <= 2.0 + 1e-12);
        }
        assert_eq!(node.labels()[0].color, crate::scene::Color::LIGHT_BLUE);
    }
}
