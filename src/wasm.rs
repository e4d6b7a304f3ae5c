//! WASM bindings for structview
//!
//! Scene building and the results panel run directly in the browser; all
//! inputs and outputs cross the boundary as JSON strings.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::ViewConfig;
use crate::model::Structure;
use crate::render::{SceneBuilder, SceneReport};
use crate::results_panel::ResultsPanel;
use crate::selection::SelectionState;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[derive(Debug, Deserialize)]
pub struct SceneRequest {
    pub structure: Structure,
    #[serde(default)]
    pub config: Option<ViewConfig>,
}

#[derive(Debug, Serialize)]
pub struct SceneResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SceneReport>,
}

fn run_scene(request_json: &str) -> SceneResponse {
    match serde_json::from_str::<SceneRequest>(request_json) {
        Ok(request) => {
            let config = request.config.unwrap_or_default();
            SceneResponse {
                success: true,
                error: None,
                report: Some(SceneBuilder::new(config).build(&request.structure)),
            }
        }
        Err(e) => SceneResponse {
            success: false,
            error: Some(format!("Failed to parse request: {}", e)),
            report: None,
        },
    }
}

/// Build the annotation scene of a document.
///
/// Takes `{"structure": ..., "config": ...}` and returns the scene graph with
/// the entities that failed to render.
#[wasm_bindgen]
pub fn render_scene(request_json: &str) -> String {
    serde_json::to_string(&run_scene(request_json)).unwrap_or_else(|e| {
        format!(r#"{{"success":false,"error":"Serialization failed: {}"}}"#, e)
    })
}

/// Results panel text for a document and a selection state
#[wasm_bindgen]
pub fn results_report(structure_json: &str, selection_json: &str) -> String {
    let structure = match Structure::from_json_str(structure_json) {
        Ok(s) => s,
        Err(e) => return format!("Failed to parse structure: {}", e),
    };
    let selection: SelectionState = match serde_json::from_str(selection_json) {
        Ok(s) => s,
        Err(e) => return format!("Failed to parse selection: {}", e),
    };
    ResultsPanel::default().report(&structure, &selection).to_string()
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
