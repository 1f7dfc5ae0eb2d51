//! # Shared Test Utilities
//!
//! Mock extraction providers, so tests can exercise the client and schema
//! conformance logic without talking to a real model.

use anyextract::providers::SchemaExtractor;
use anyextract::{ExtractError, ExtractionRequest, OutputEncoding};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// One recorded call to a [`MockExtractor`].
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub schema_id: String,
    pub text: String,
    pub encoding: OutputEncoding,
}

/// A scripted extraction provider.
///
/// Responses are returned in the order given, falling back to `Null` once
/// the script runs out. Every call is recorded for later assertion.
#[derive(Clone, Debug)]
pub struct MockExtractor {
    pub call_history: Arc<RwLock<Vec<RecordedCall>>>,
    pub responses: Arc<RwLock<Vec<Value>>>,
}

impl MockExtractor {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }
}

#[async_trait]
impl SchemaExtractor for MockExtractor {
    async fn extract(&self, request: ExtractionRequest<'_>) -> Result<Value, ExtractError> {
        self.call_history.write().unwrap().push(RecordedCall {
            schema_id: request.schema.id().to_string(),
            text: request.text.to_string(),
            encoding: request.encoding,
        });

        if let Some(response) = self.responses.write().unwrap().pop() {
            Ok(response)
        } else {
            Ok(Value::Null)
        }
    }
}

/// A provider that always reports failure, for exercising the error path.
#[derive(Clone, Debug)]
pub struct FailingExtractor {
    pub message: String,
}

#[async_trait]
impl SchemaExtractor for FailingExtractor {
    async fn extract(&self, _request: ExtractionRequest<'_>) -> Result<Value, ExtractError> {
        Err(ExtractError::Provider(self.message.clone()))
    }
}
