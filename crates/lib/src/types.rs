use crate::errors::ExtractError;
use crate::providers::SchemaExtractor;
use crate::schema::ObjectSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A client that submits raw text plus a schema to an extraction provider
/// and conforms the structured output to the shape the schema declares.
///
/// The provider is injected through [`ExtractionClientBuilder`]; there is no
/// process-wide default client, so two callers can run different providers
/// side by side against the same (read-only) schemas.
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    pub(crate) extractor: Box<dyn SchemaExtractor>,
}

/// A builder for creating `ExtractionClient` instances.
#[derive(Debug, Default)]
pub struct ExtractionClientBuilder {
    extractor: Option<Box<dyn SchemaExtractor>>,
}

impl ExtractionClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the extraction provider.
    pub fn extractor(mut self, extractor: Box<dyn SchemaExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Builds the `ExtractionClient`, failing if no provider was injected.
    pub fn build(self) -> Result<ExtractionClient, ExtractError> {
        let extractor = self.extractor.ok_or(ExtractError::MissingProvider)?;
        Ok(ExtractionClient { extractor })
    }
}

/// How the provider should serialize model output before parsing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputEncoding {
    #[default]
    Json,
    Csv,
}

/// Options for a single extraction call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// The raw text to extract from.
    pub text: String,
    /// The encoding hint handed to the provider.
    #[serde(default)]
    pub encoding: OutputEncoding,
}

/// The request handed to a [`SchemaExtractor`]: the schema tree, the raw
/// text, and the encoding hint, borrowed for the duration of the call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExtractionRequest<'a> {
    pub schema: &'a ObjectSchema,
    pub text: &'a str,
    pub encoding: OutputEncoding,
}

/// Extraction output conformed to a root schema.
///
/// The root schema is `many`, so the result is a sequence of records, each
/// mapping attribute ids to extracted values (strings, numbers, or nested
/// mappings/sequences per the attribute's declared kind).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedData {
    pub root_id: String,
    pub records: Vec<Map<String, Value>>,
}

impl ExtractedData {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
