//! Error types for the annotation engine

use thiserror::Error;

/// Main error type for document handling and glyph generation
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Node '{0}' not found in structure")]
    NodeNotFound(String),

    #[error("Bar '{0}' not found in structure")]
    BarNotFound(String),

    #[error("Support node '{0}' does not exist")]
    SupportNodeNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Vertical line: y is not defined for every x")]
    VerticalLine,

    #[error("Vertical line. No finite root")]
    NoFiniteRoot,

    #[error("The line lies on the x-axis. Infinite roots")]
    InfiniteRoots,

    #[error("Horizontal line. No root")]
    NoRoot,

    #[error("Matrix dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Render of '{entity}' failed: {source}")]
    EntityRender {
        entity: String,
        #[source]
        source: Box<ViewError>,
    },

    #[cfg(feature = "client")]
    #[error("Analysis backend error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analysis backend returned status {0}")]
    BackendStatus(u16),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ViewError {
    /// Wrap an error with the name of the entity whose glyphs failed
    pub fn in_entity(self, entity: impl Into<String>) -> Self {
        ViewError::EntityRender {
            entity: entity.into(),
            source: Box::new(self),
        }
    }
}

/// Result type for annotation operations
pub type ViewResult<T> = Result<T, ViewError>;
