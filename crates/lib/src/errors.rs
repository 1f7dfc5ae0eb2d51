use thiserror::Error;

/// Errors raised while constructing a schema.
///
/// These are reported at build time, so a malformed schema fails fast
/// instead of surfacing later as a misparse of the extractor's output.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("field id must not be empty (description: {0:?})")]
    EmptyId(String),

    #[error("duplicate attribute id {attribute:?} in object {object:?}")]
    DuplicateAttributeId { object: String, attribute: String },

    #[error("object {0:?} must declare at least one attribute")]
    NoAttributes(String),

    #[error("object {object:?} is declared single, but example #{index} expects a sequence of mappings")]
    ExampleExpectsOne { object: String, index: usize },

    #[error("object {object:?} is declared many, but example #{index} expects a single mapping")]
    ExampleExpectsMany { object: String, index: usize },

    #[error("an example output must be a mapping or a sequence of mappings, got: {0}")]
    InvalidExampleValue(String),
}

/// Errors raised on the boundary with the extraction provider.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no extraction provider was configured")]
    MissingProvider,

    #[error("extraction provider failed: {0}")]
    Provider(String),

    #[error("no data extracted for schema {0:?}")]
    NoData(String),

    #[error("malformed structured output: {0}")]
    MalformedOutput(String),

    #[error("failed to serialize the extraction request: {0}")]
    Serialization(#[from] serde_json::Error),
}
