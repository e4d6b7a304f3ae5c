//! structview - geometric annotation engine for 3D structural model viewers
//!
//! This library turns a structural document (nodes, bars, supports, loads and
//! optional calculation results) into a scene graph of annotation glyphs:
//! - Bars with local axes triads, labels and end releases
//! - Nodal and bar point loads as arrows and curved arrows
//! - Distributed-load diagrams in local and global systems
//! - Support and spring glyphs, reaction arrows from results
//! - Camera-facing billboards for labels and symbols
//! - Ray picking of entities and a results panel for the selection
//!
//! ## Example
//! ```rust
//! use structview::prelude::*;
//!
//! let mut structure = Structure::new();
//! structure.add_node(Node::new("1", 0.0, 0.0, 0.0)).unwrap();
//! structure.add_node(Node::new("2", 4.0, 0.0, 0.0)).unwrap();
//! structure.add_bar(Bar::new("B1", "1", "2")).unwrap();
//! structure.add_support(Support::fixed("1")).unwrap();
//!
//! let report = SceneBuilder::default().build(&structure);
//! assert!(report.warnings.is_empty());
//! assert!(report.scene.find_by_name("bar-B1").is_some());
//! ```

pub mod billboard;
pub mod config;
pub mod elements;
pub mod error;
pub mod frame;
pub mod glyphs;
pub mod loads;
pub mod math;
pub mod model;
pub mod render;
pub mod results;
pub mod results_panel;
pub mod scene;
pub mod selection;
pub mod view;

#[cfg(feature = "client")]
pub mod client;

// Re-export common types
pub mod prelude {
    pub use crate::billboard::{update_billboards, Camera, MonospaceMetrics, TextMetrics};
    pub use crate::config::ViewConfig;
    pub use crate::elements::{Bar, Dof, Node, Release, Support, SupportDof};
    pub use crate::error::{ViewError, ViewResult};
    pub use crate::frame::{build_frame, compute_orientation, LocalFrame, UpHint};
    pub use crate::loads::{
        BarDistributedLoad, BarPointLoad, ForceComponent, Load, LoadSystem, LoadVector, NodalLoad,
    };
    pub use crate::math::{Axis, Quat, Vec3};
    pub use crate::model::{DocumentState, Structure};
    pub use crate::render::{build_scene, SceneBuilder, SceneReport};
    pub use crate::results::ResultSet;
    pub use crate::results_panel::{PanelReport, ResultsPanel};
    pub use crate::scene::{EntityKind, EntityRef, SceneNode};
    pub use crate::selection::{PointerButton, Ray, SelectionState};
    pub use crate::view::{ViewCategory, ViewFlags};
}

#[cfg(feature = "wasm")]
pub mod wasm;
