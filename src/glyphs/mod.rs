//! Parametric glyph primitives
//!
//! Glyphs are small scene subtrees built in their own coordinates. The
//! caller positions the returned node and attaches it to a parent.

pub mod arc;
pub mod arrow;
pub mod axes;
pub mod curved_arrow;
pub mod label;
pub mod line_arrow;

use serde::{Deserialize, Serialize};

use crate::math::{Axis, Vec3};

pub use arc::Arc;
pub use arrow::Arrow;
pub use axes::Axes;
pub use curved_arrow::CurvedArrow;
pub use label::{AxisLabel, ScreenLabel};
pub use line_arrow::{LineArrow, LineCurvedArrow};

/// Signed coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    #[serde(rename = "x")]
    PosX,
    #[serde(rename = "y")]
    PosY,
    #[serde(rename = "z")]
    PosZ,
    #[serde(rename = "-x")]
    NegX,
    #[serde(rename = "-y")]
    NegY,
    #[serde(rename = "-z")]
    NegZ,
}

impl AxisDirection {
    /// Direction along `axis`, negative when `negative` is set
    pub fn along(axis: Axis, negative: bool) -> Self {
        match (axis, negative) {
            (Axis::X, false) => AxisDirection::PosX,
            (Axis::Y, false) => AxisDirection::PosY,
            (Axis::Z, false) => AxisDirection::PosZ,
            (Axis::X, true) => AxisDirection::NegX,
            (Axis::Y, true) => AxisDirection::NegY,
            (Axis::Z, true) => AxisDirection::NegZ,
        }
    }

    /// Direction along `axis` following the sign of `value` (zero is positive)
    pub fn from_sign(axis: Axis, value: f64) -> Self {
        Self::along(axis, value < 0.0)
    }

    pub fn axis(self) -> Axis {
        match self {
            AxisDirection::PosX | AxisDirection::NegX => Axis::X,
            AxisDirection::PosY | AxisDirection::NegY => Axis::Y,
            AxisDirection::PosZ | AxisDirection::NegZ => Axis::Z,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(
            self,
            AxisDirection::NegX | AxisDirection::NegY | AxisDirection::NegZ
        )
    }

    pub fn opposite(self) -> Self {
        Self::along(self.axis(), !self.is_negative())
    }

    pub fn vector(self) -> Vec3 {
        let v = self.axis().unit();
        if self.is_negative() {
            -v
        } else {
            v
        }
    }
}
