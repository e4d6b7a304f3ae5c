//! Client for the external analysis backend
//!
//! The backend reads spreadsheet models and calculates them; the viewer only
//! receives finished documents.

use log::{debug, info};
use serde::Serialize;

use crate::error::{ViewError, ViewResult};
use crate::model::Structure;

#[derive(Debug, Serialize)]
struct OpenExcelRequest<'a> {
    path: &'a str,
}

/// HTTP client of the analysis backend
pub struct AnalysisClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the backend to read a spreadsheet model and return it as a document
    pub async fn open_excel(&self, path: &str) -> ViewResult<Structure> {
        let url = format!("{}/open_excel", self.base_url);
        debug!("POST {} ({})", url, path);
        let response = self
            .client
            .post(&url)
            .json(&OpenExcelRequest { path })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ViewError::BackendStatus(response.status().as_u16()));
        }

        let structure: Structure = response.json().await?;
        info!(
            "Opened '{}': {} nodes, {} bars",
            path,
            structure.nodes.len(),
            structure.bars.len()
        );
        Ok(structure)
    }

    /// Trigger a calculation of the backend's current structure
    pub async fn calculate_structure(&self) -> ViewResult<()> {
        let url = format!("{}/calculate-structure", self.base_url);
        debug!("POST {}", url);
        let response = self.client.post(&url).send().await?;
        if !response.status().is_success() {
            return Err(ViewError::BackendStatus(response.status().as_u16()));
        }
        Ok(())
    }
}
