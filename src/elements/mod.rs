//! Structural elements of the viewed document

mod bar;
mod material;
mod node;
mod section;
mod support;

pub use bar::{Bar, BarEnd, Release, ReleaseKind};
pub use material::{Material, MaterialProperties};
pub use node::{Node, NodeType};
pub use section::{Inertias, Section};
pub use support::{Dof, Support, SupportDof, SupportDofs};
