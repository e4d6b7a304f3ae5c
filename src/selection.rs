//! Click selection by ray picking against the scene graph
//!
//! A primary-button press casts a ray from the camera through the pointer.
//! Points and polylines are hit within a distance threshold, cones by their
//! bounding sphere; labels are not pickable. The nearest hit whose nearest
//! named ancestor carries an entity becomes the single selection. A press
//! that resolves to no entity is a click in the void and clears the
//! selection.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::billboard::Camera;
use crate::config::ViewConfig;
use crate::math::{Pt3, Vec2, Vec3};
use crate::model::Structure;
use crate::scene::{EntityRef, Primitive, SceneNode};

/// Alert raised when an entity is clicked on an uncalculated document
pub const NO_RESULTS_ALERT: &str = "No results available. Please open a calculated structure.";

const EPSILON: f64 = 1e-12;

// ========================
// Rays
// ========================

/// Half line from `origin` along the unit `direction`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray parameter of the closest approach to `point` and the distance
    /// there; `None` when the point is behind the origin
    pub fn distance_to_point(&self, point: &Vec3) -> Option<(f64, f64)> {
        let t = (point - self.origin).dot(&self.direction);
        if t < 0.0 {
            return None;
        }
        Some((t, (self.at(t) - point).norm()))
    }

    /// Ray parameter and distance of the closest approach to the segment
    /// `a`-`b`
    pub fn distance_to_segment(&self, a: &Vec3, b: &Vec3) -> (f64, f64) {
        let d2 = b - a;
        let r = self.origin - a;
        let e = d2.dot(&d2);
        let c = self.direction.dot(&r);

        let (s, t) = if e <= EPSILON {
            ((-c).max(0.0), 0.0)
        } else {
            let bb = self.direction.dot(&d2);
            let f = d2.dot(&r);
            let denom = e - bb * bb;
            let s = if denom > EPSILON {
                ((bb * f - c * e) / denom).max(0.0)
            } else {
                0.0
            };
            let t = (bb * s + f) / e;
            if t < 0.0 {
                ((-c).max(0.0), 0.0)
            } else if t > 1.0 {
                ((bb - c).max(0.0), 1.0)
            } else {
                (s, t)
            }
        };

        (s, (self.at(s) - (a + d2 * t)).norm())
    }
}

/// Normalized device coordinates of a pointer position in a viewport of
/// `width` by `height` pixels, origin at the top left
pub fn pointer_to_ndc(x: f64, y: f64, width: f64, height: f64) -> Vec2 {
    Vec2::new(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// Ray from a perspective camera through a point in normalized device
/// coordinates
pub fn ray_from_ndc(camera: &Camera, ndc: &Vec2) -> Ray {
    let half = (camera.fov_y.to_radians() / 2.0).tan();
    let local = Vec3::new(ndc.x * half * camera.aspect, ndc.y * half, -1.0);
    Ray::new(camera.position, camera.rotation * local)
}

// ========================
// Picking
// ========================

/// Maximum pick distance per primitive kind, in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickThresholds {
    pub line: f64,
    pub points: f64,
    pub mesh: f64,
}

impl Default for PickThresholds {
    fn default() -> Self {
        Self::from(&ViewConfig::default())
    }
}

impl From<&ViewConfig> for PickThresholds {
    fn from(config: &ViewConfig) -> Self {
        Self {
            line: config.line_threshold,
            points: config.points_threshold,
            mesh: config.mesh_threshold,
        }
    }
}

/// A primitive hit by a ray
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Distance along the ray
    pub distance: f64,
    pub point: Vec3,
    /// Path of the node owning the primitive
    pub path: Vec<usize>,
}

/// All primitives of `root` hit by `ray`, nearest first
pub fn raycast(root: &SceneNode, ray: &Ray, thresholds: &PickThresholds) -> Vec<Hit> {
    let mut hits = Vec::new();
    root.walk(&mut |node, world, path| {
        for primitive in &node.primitives {
            let hit = match primitive {
                Primitive::Point(mark) => {
                    let p = world.transform_point(&Pt3::from(mark.position)).coords;
                    ray.distance_to_point(&p)
                        .filter(|&(_, d)| d <= thresholds.points)
                        .map(|(t, _)| t)
                }
                Primitive::Polyline(line) => line
                    .points
                    .windows(2)
                    .filter_map(|w| {
                        let a = world.transform_point(&Pt3::from(w[0])).coords;
                        let b = world.transform_point(&Pt3::from(w[1])).coords;
                        let (t, d) = ray.distance_to_segment(&a, &b);
                        (d <= thresholds.line).then_some(t)
                    })
                    .min_by(f64::total_cmp),
                Primitive::Cone(cone) => {
                    let center = world.transform_point(&Pt3::from(cone.position)).coords;
                    let radius = cone.bounding_radius() * world.scaling() + thresholds.mesh;
                    ray.distance_to_point(&center)
                        .filter(|&(_, d)| d <= radius)
                        .map(|(t, d)| (t - (radius * radius - d * d).sqrt()).max(0.0))
                }
                Primitive::Text(_) => None,
            };
            if let Some(distance) = hit {
                hits.push(Hit {
                    distance,
                    point: ray.at(distance),
                    path: path.to_vec(),
                });
            }
        }
    });
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest ancestor of the node at `path` (itself included) with a name
pub fn get_named_parent<'a>(root: &'a SceneNode, path: &[usize]) -> Option<&'a SceneNode> {
    root.chain(path)?
        .into_iter()
        .rev()
        .find(|n| !n.name.is_empty())
}

/// Entity of the nearest hit that resolves to one
pub fn pick_entity(root: &SceneNode, ray: &Ray, thresholds: &PickThresholds) -> Option<EntityRef> {
    raycast(root, ray, thresholds)
        .iter()
        .find_map(|hit| get_named_parent(root, &hit.path)?.entity.clone())
}

// ========================
// Notifications
// ========================

/// Receiver of user-facing selection side effects
pub trait Notifier {
    /// Show a non-fatal message to the user
    fn alert(&mut self, message: &str);

    fn selection_changed(&mut self, _selection: Option<&EntityRef>) {}
}

/// Sends alerts to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&mut self, message: &str) {
        warn!("{}", message);
    }

    fn selection_changed(&mut self, selection: Option<&EntityRef>) {
        debug!("Selection changed: {:?}", selection);
    }
}

/// Keeps every notification, for tests and headless front ends
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub alerts: Vec<String>,
    pub changes: Vec<Option<EntityRef>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn selection_changed(&mut self, selection: Option<&EntityRef>) {
        self.changes.push(selection.cloned());
    }
}

// ========================
// Selection state
// ========================

/// Mouse button of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Current selection: one entity, or a click in the void
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selection: Option<EntityRef>,
    pub click_void: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selection: None,
            click_void: true,
        }
    }
}

impl SelectionState {
    /// Select `entity`, replacing any previous selection. Clicking before
    /// the document is calculated raises an alert but still selects.
    pub fn click(&mut self, entity: EntityRef, structure: &Structure, notifier: &mut dyn Notifier) {
        self.selection = Some(entity);
        self.click_void = false;
        notifier.selection_changed(self.selection.as_ref());
        if !structure.has_results() {
            notifier.alert(NO_RESULTS_ALERT);
        }
    }

    /// Clear the selection after a click that hit no entity
    pub fn click_in_void(&mut self, notifier: &mut dyn Notifier) {
        let had_selection = self.selection.take().is_some();
        self.click_void = true;
        if had_selection {
            notifier.selection_changed(None);
        }
    }

    /// Handle a pointer press on the canvas. Only the primary button
    /// selects; other buttons leave the state untouched.
    pub fn handle_pointer_down(
        &mut self,
        button: PointerButton,
        ray: &Ray,
        scene: &SceneNode,
        structure: &Structure,
        thresholds: &PickThresholds,
        notifier: &mut dyn Notifier,
    ) -> Option<&EntityRef> {
        if button != PointerButton::Primary {
            return self.selection.as_ref();
        }
        match pick_entity(scene, ray, thresholds) {
            Some(entity) => self.click(entity, structure, notifier),
            None => self.click_in_void(notifier),
        }
        self.selection.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Bar, Node};
    use crate::math::Quat;
    use crate::render::SceneBuilder;
    use crate::results::ResultSet;
    use crate::scene::Cone;
    use approx::assert_relative_eq;

    fn portal() -> Structure {
        let mut s = Structure::new();
        s.add_node(Node::new("1", 0.0, 0.0, 0.0)).unwrap();
        s.add_node(Node::new("2", 4.0, 0.0, 0.0)).unwrap();
        s.add_bar(Bar::new("B1", "1", "2")).unwrap();
        s
    }

    fn down_at(x: f64, y: f64) -> Ray {
        Ray::new(Vec3::new(x, y, 10.0), -Vec3::z())
    }

    #[test]
    fn test_ray_segment_distance() {
        let ray = down_at(1.0, 0.05);
        let (t, d) = ray.distance_to_segment(&Vec3::zeros(), &Vec3::new(4.0, 0.0, 0.0));
        assert_relative_eq!(t, 10.0, epsilon = 1e-12);
        assert_relative_eq!(d, 0.05, epsilon = 1e-12);

        // Beyond the segment end the distance is to the endpoint
        let ray = down_at(5.0, 0.0);
        let (_, d) = ray.distance_to_segment(&Vec3::zeros(), &Vec3::new(4.0, 0.0, 0.0));
        assert_relative_eq!(d, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ray_from_camera_center() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::zeros(), Vec3::y());
        let ray = ray_from_ndc(&camera, &pointer_to_ndc(400.0, 300.0, 800.0, 600.0));
        assert_relative_eq!(ray.direction, -Vec3::z(), epsilon = 1e-12);
        assert_relative_eq!(pointer_to_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_named_parent_resolution() {
        let scene = SceneNode::group().with_child(
            SceneNode::named("bar-B1").with_child(SceneNode::group().with_child(SceneNode::group())),
        );
        assert_eq!(get_named_parent(&scene, &[0, 0, 0]).unwrap().name, "bar-B1");
        assert!(get_named_parent(&scene, &[]).is_none());
    }

    #[test]
    fn test_cone_hit_from_inside_its_bounds() {
        let cone = Cone {
            position: Vec3::new(0.2, 0.0, 0.0),
            rotation: Quat::identity(),
            scale: 1.0,
            radius: 0.5,
            height: 1.0,
            color: crate::scene::Color::BLUE,
        };
        let mut scene = SceneNode::group();
        scene.push_primitive(Primitive::Cone(cone));

        let hits = raycast(&scene, &Ray::new(Vec3::zeros(), Vec3::x()), &PickThresholds::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].distance, 0.0);
        assert_relative_eq!(hits[0].point, Vec3::zeros());
    }

    #[test]
    fn test_pick_bar_and_node() {
        let s = portal();
        let scene = SceneBuilder::default().build(&s).scene;
        let t = PickThresholds::default();

        assert_eq!(pick_entity(&scene, &down_at(2.0, 0.05), &t), Some(EntityRef::bar("B1")));
        // Nodes are drawn before bars and win a tie at the bar end
        let at_node = pick_entity(&scene, &down_at(4.0, 0.0), &t);
        assert_eq!(at_node, Some(EntityRef::node("2")));
        assert_eq!(pick_entity(&scene, &down_at(2.0, 3.0), &t), None);
    }

    #[test]
    fn test_click_alerts_without_results() {
        let s = portal();
        let mut state = SelectionState::default();
        let mut notifier = RecordingNotifier::default();
        state.click(EntityRef::node("1"), &s, &mut notifier);
        assert_eq!(notifier.alerts, vec![NO_RESULTS_ALERT.to_string()]);
        assert!(!state.click_void);

        let calculated = portal().with_results(vec![ResultSet::default()]);
        let mut notifier = RecordingNotifier::default();
        state.click(EntityRef::bar("B1"), &calculated, &mut notifier);
        assert!(notifier.alerts.is_empty());
        assert_eq!(state.selection, Some(EntityRef::bar("B1")));
    }

    #[test]
    fn test_void_click_clears_selection() {
        let s = portal();
        let scene = SceneBuilder::default().build(&s).scene;
        let t = PickThresholds::default();
        let mut state = SelectionState::default();
        let mut notifier = RecordingNotifier::default();

        state.handle_pointer_down(PointerButton::Primary, &down_at(2.0, 0.0), &scene, &s, &t, &mut notifier);
        assert_eq!(state.selection, Some(EntityRef::bar("B1")));

        // Secondary button is ignored
        state.handle_pointer_down(PointerButton::Secondary, &down_at(2.0, 5.0), &scene, &s, &t, &mut notifier);
        assert!(state.selection.is_some());

        state.handle_pointer_down(PointerButton::Primary, &down_at(2.0, 5.0), &scene, &s, &t, &mut notifier);
        assert!(state.selection.is_none());
        assert!(state.click_void);
        assert_eq!(notifier.changes, vec![Some(EntityRef::bar("B1")), None]);
    }
}
