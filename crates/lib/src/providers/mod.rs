use crate::errors::ExtractError;
use crate::types::ExtractionRequest;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::Value;
use std::fmt::Debug;

/// A trait for the external extraction provider.
///
/// This trait defines the one seam to the mechanism that actually reads the
/// text: it receives a schema tree, the raw text, and an encoding hint, and
/// returns structured output as a raw JSON value. How the provider prompts a
/// model, parses its reply, or talks to the network is its own business;
/// this library only validates that what comes back matches the shape the
/// schema declares.
#[async_trait]
pub trait SchemaExtractor: Send + Sync + Debug + DynClone {
    /// Extracts structured data for `request.schema` from `request.text`.
    ///
    /// The returned value is expected to map the root schema id to the
    /// extracted records; shape conformance is checked by the caller.
    async fn extract(&self, request: ExtractionRequest<'_>) -> Result<Value, ExtractError>;
}

dyn_clone::clone_trait_object!(SchemaExtractor);
