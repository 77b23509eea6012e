use log::{debug, info};
use std::path::Path;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::llm::client::OllamaClient;
use crate::llm::prompts::build_extraction_prompt;
use crate::parser::parse_model_output;
use crate::renderer::render_document;
use crate::resolver::resolve;
use crate::variables::FinancialVariables;

/// Pipeline orchestrator: renders a document, prompts the model and
/// normalizes its response into a [`FinancialVariables`] collection.
pub struct BilanExtractor {
    client: OllamaClient,
    model: Option<String>,
    catalog: Catalog,
}

impl BilanExtractor {
    pub fn new(client: OllamaClient) -> Self {
        Self {
            client,
            model: None,
            catalog: Catalog::builtin(),
        }
    }

    /// Overrides the model for this extractor; the client's fallback chain
    /// still applies if the name cannot be resolved.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Supplies a specific variable catalog (e.g. loaded from a deployment
    /// configuration file).
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn extract_from_file(&self, path: &Path) -> Result<FinancialVariables> {
        let text = render_document(path)?;
        self.extract_from_text(&text).await
    }

    /// Runs the extraction over pre-rendered document text. Malformed model
    /// output degrades to a partial or empty collection, never an error.
    pub async fn extract_from_text(&self, document_text: &str) -> Result<FinancialVariables> {
        let prompt = build_extraction_prompt(document_text, &self.catalog);
        debug!("Extraction prompt is {} characters", prompt.len());

        info!("Extracting financial variables...");
        let raw = self.client.chat(&prompt, self.model.as_deref()).await?;
        debug!("Raw model output: {}", raw);

        let parsed = parse_model_output(&raw);
        let variables = resolve(&parsed, &self.catalog);
        info!(
            "Resolved {} variables from {} top-level entries",
            variables.len(),
            parsed.len()
        );

        Ok(variables)
    }
}
