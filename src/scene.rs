//! Retained scene graph produced by the renderers
//!
//! Every glyph is a tree of [`SceneNode`]s. A node carries a local
//! transform, drawable primitives, optional billboard behavior and,
//! for selectable entities, a reference back to the document.

use std::fmt;

use nalgebra::{Similarity3, Translation3};
use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};
use crate::math::{Axis, Pt3, Quat, Vec2, Vec3};

// ========================
// Colors
// ========================

/// 24-bit RGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const LIGHT_RED: Color = Color::rgb(0xff, 0x66, 0x66);
    pub const LIGHT_GREEN: Color = Color::rgb(0x00, 0xe6, 0x00);
    pub const LIGHT_BLUE: Color = Color::rgb(0x66, 0x66, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> ViewResult<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ViewError::InvalidInput(format!("bad color '{}'", hex)));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ViewError::InvalidInput(format!("bad color '{}'", hex)))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = ViewError;

    fn try_from(s: String) -> ViewResult<Self> {
        Color::from_hex(&s)
    }
}

// ========================
// Transforms
// ========================

/// Local position, rotation and uniform scale of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn to_similarity(&self) -> Similarity3<f64> {
        Similarity3::from_parts(Translation3::from(self.position), self.rotation, self.scale)
    }
}

// ========================
// Primitives
// ========================

/// Connected line segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Vec3>,
    pub color: Color,
    pub width: f64,
    /// Width is in world units rather than pixels
    pub world_units: bool,
}

impl Polyline {
    pub fn new(points: Vec<Vec3>, color: Color, width: f64) -> Self {
        Self {
            points,
            color,
            width,
            world_units: true,
        }
    }
}

/// Solid cone whose axis is local +Y, centered on `position`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f64,
    pub radius: f64,
    pub height: f64,
    pub color: Color,
}

impl Cone {
    /// Apex, in the owning node's coordinates
    pub fn tip(&self) -> Vec3 {
        self.position + self.rotation * Vec3::new(0.0, self.height * self.scale / 2.0, 0.0)
    }

    /// Center of the base disc, in the owning node's coordinates
    pub fn base(&self) -> Vec3 {
        self.position - self.rotation * Vec3::new(0.0, self.height * self.scale / 2.0, 0.0)
    }

    /// Radius of a sphere enclosing the cone
    pub fn bounding_radius(&self) -> f64 {
        self.scale * self.radius.max(self.height / 2.0)
    }
}

/// Screen-sized dot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMark {
    pub position: Vec3,
    pub size: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorX {
    Left,
    #[default]
    Center,
    Right,
}

impl AnchorX {
    /// Fraction of the box width the text is shifted by
    pub fn factor(self) -> f64 {
        match self {
            AnchorX::Left => 0.5,
            AnchorX::Center => 0.0,
            AnchorX::Right => -0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorY {
    Bottom,
    #[default]
    Middle,
    Top,
}

impl AnchorY {
    pub fn factor(self) -> f64 {
        match self {
            AnchorY::Bottom => 0.5,
            AnchorY::Middle => 0.0,
            AnchorY::Top => -0.5,
        }
    }
}

/// Measured extent of laid-out text
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBox {
    pub width: f64,
    pub height: f64,
}

/// Text extent used for anchoring.
///
/// Measurements arrive after a layout pass and only take effect on the
/// following frame, so a label whose content changed is anchored with the
/// previous extent for exactly one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextLayout {
    pub size: TextBox,
    #[serde(skip)]
    pending: Option<TextBox>,
}

impl TextLayout {
    /// Record a new measurement
    pub fn sync(&mut self, measured: TextBox) {
        if measured != self.size {
            self.pending = Some(measured);
        }
    }

    /// Apply the pending measurement, if any. Returns whether it changed.
    pub fn advance(&mut self) -> bool {
        match self.pending.take() {
            Some(size) => {
                self.size = size;
                true
            }
            None => false,
        }
    }
}

/// Text drawn centered on its node, shifted to honor its anchors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub font_size: f64,
    pub color: Color,
    pub anchor_x: AnchorX,
    pub anchor_y: AnchorY,
    pub offset_x: f64,
    pub offset_y: f64,
    pub layout: TextLayout,
}

impl Label {
    pub fn new(text: impl Into<String>, font_size: f64, color: Color) -> Self {
        Self {
            text: text.into(),
            font_size,
            color,
            anchor_x: AnchorX::Center,
            anchor_y: AnchorY::Middle,
            offset_x: 0.0,
            offset_y: 0.0,
            layout: TextLayout::default(),
        }
    }

    pub fn with_anchor(mut self, x: AnchorX, y: AnchorY) -> Self {
        self.anchor_x = x;
        self.anchor_y = y;
        self
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Position of the text center relative to the anchor point
    pub fn anchor_position(&self) -> Vec2 {
        Vec2::new(
            (self.layout.size.width + self.offset_x) * self.anchor_x.factor(),
            (self.layout.size.height + self.offset_y) * self.anchor_y.factor(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Polyline(Polyline),
    Cone(Cone),
    Point(PointMark),
    Text(Label),
}

// ========================
// Billboards and entities
// ========================

/// Camera-facing behavior, resolved each frame by
/// [`update_billboards`](crate::billboard::update_billboards)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Billboard {
    /// Spin about a fixed axis (parent coordinates) toward the camera
    Axis { axis: Vec3 },
    /// Adopt the camera orientation
    Full,
    /// Face the camera by rotating about one coordinate axis only
    SingleAxis { axis: Axis },
    /// Flip text so it never reads upside down or mirrored; the node
    /// also receives its label's anchor offset
    TextFace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Node,
    Bar,
    Support,
}

/// Reference from a scene subtree back to a document entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub name: String,
}

impl EntityRef {
    pub fn node(name: impl Into<String>) -> Self {
        Self { kind: EntityKind::Node, name: name.into() }
    }

    pub fn bar(name: impl Into<String>) -> Self {
        Self { kind: EntityKind::Bar, name: name.into() }
    }

    pub fn support(name: impl Into<String>) -> Self {
        Self { kind: EntityKind::Support, name: name.into() }
    }
}

// ========================
// Nodes
// ========================

/// A node of the scene graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Empty for anonymous groups
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primitives: Vec<Primitive>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billboard: Option<Billboard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityRef>,
}

impl SceneNode {
    /// Anonymous group
    pub fn group() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_billboard(mut self, billboard: Billboard) -> Self {
        self.billboard = Some(billboard);
        self
    }

    pub fn with_entity(mut self, entity: EntityRef) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn push_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn push_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.children.iter().all(SceneNode::is_empty)
    }

    /// Descendant at `path` (child indices from this node)
    pub fn get(&self, path: &[usize]) -> Option<&SceneNode> {
        path.iter()
            .try_fold(self, |node, &i| node.children.get(i))
    }

    /// Nodes from this one down to the node at `path`, inclusive
    pub fn chain(&self, path: &[usize]) -> Option<Vec<&SceneNode>> {
        let mut chain = vec![self];
        let mut node = self;
        for &i in path {
            node = node.children.get(i)?;
            chain.push(node);
        }
        Some(chain)
    }

    /// World transform of the node at `path`, with this node as the root
    pub fn world_transform(&self, path: &[usize]) -> Option<Similarity3<f64>> {
        let chain = self.chain(path)?;
        Some(
            chain
                .iter()
                .fold(Similarity3::identity(), |acc, n| acc * n.transform.to_similarity()),
        )
    }

    /// Visit every node depth-first with its world transform and path
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&SceneNode, &Similarity3<f64>, &[usize]),
    {
        let mut path = Vec::new();
        self.walk_inner(&Similarity3::identity(), &mut path, f);
    }

    fn walk_inner<F>(&self, parent: &Similarity3<f64>, path: &mut Vec<usize>, f: &mut F)
    where
        F: FnMut(&SceneNode, &Similarity3<f64>, &[usize]),
    {
        let world = parent * self.transform.to_similarity();
        f(self, &world, path);
        for (i, child) in self.children.iter().enumerate() {
            path.push(i);
            child.walk_inner(&world, path, f);
            path.pop();
        }
    }

    /// First node (depth-first) with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_name(name))
    }

    /// Number of primitives in this subtree matching `pred`
    pub fn count_primitives<P>(&self, pred: P) -> usize
    where
        P: Fn(&Primitive) -> bool + Copy,
    {
        self.primitives.iter().filter(|p| pred(p)).count()
            + self
                .children
                .iter()
                .map(|c| c.count_primitives(pred))
                .sum::<usize>()
    }

    /// All labels in this subtree, depth-first
    pub fn labels(&self) -> Vec<&Label> {
        let mut out = Vec::new();
        self.collect_labels(&mut out);
        out
    }

    fn collect_labels<'a>(&'a self, out: &mut Vec<&'a Label>) {
        for p in &self.primitives {
            if let Primitive::Text(label) = p {
                out.push(label);
            }
        }
        for c in &self.children {
            c.collect_labels(out);
        }
    }

    /// World positions of every cone apex in this subtree
    pub fn cone_tips(&self) -> Vec<Vec3> {
        let mut tips = Vec::new();
        self.walk(&mut |node, world, _| {
            for p in &node.primitives {
                if let Primitive::Cone(cone) = p {
                    tips.push(world.transform_point(&Pt3::from(cone.tip())).coords);
                }
            }
        });
        tips
    }
}
