//! # Bilan Extractor
//!
//! Extracts named financial quantities (total assets, total liabilities,
//! equity, net income, revenue, debts, and configurable extras) from
//! unstructured financial-statement documents via a local LLM.
//!
//! ## Core Concepts
//!
//! - **Variable Catalog**: configuration-driven registry mapping canonical
//!   variable names to aliases, accounting codes and descriptions
//! - **Response Parser**: total function recovering a JSON object from
//!   arbitrary model output (prose-wrapped JSON, code fences, garbage)
//! - **Resolver**: reconciles the legacy flat response shape and the
//!   structured per-year shape into one typed collection, coercing values
//!   and pruning empty variables without ever failing
//! - **Graceful degradation**: malformed model output yields a partial or
//!   empty result, never an error; only missing inputs and an unresolvable
//!   model name are fatal
//!
//! ## Example
//!
//! ```rust,ignore
//! use bilan_extractor::{BilanExtractor, OllamaClient};
//!
//! let client = OllamaClient::from_env();
//! let extractor = BilanExtractor::new(client).with_model("mistral");
//! let variables = extractor.extract_from_file("bilan_2023.pdf".as_ref()).await?;
//! println!("{}", variables.to_json_string_pretty()?);
//! ```

pub mod catalog;
pub mod error;
pub mod extractor;
pub mod llm;
pub mod parser;
pub mod renderer;
pub mod resolver;
pub mod variables;

pub use catalog::{Catalog, CatalogConfig, CatalogEntry};
pub use error::{ExtractorError, Result};
pub use extractor::BilanExtractor;
pub use llm::client::OllamaClient;
pub use parser::parse_model_output;
pub use renderer::render_document;
pub use resolver::resolve;
pub use variables::{FinancialValue, FinancialVariable, FinancialVariables, ValueType};
