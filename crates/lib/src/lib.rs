//! # Declarative Text Extraction Schemas
//!
//! This crate declares *what* to extract from unstructured text: scalar
//! fields, composite objects, and repeated objects, each with a description
//! and steering examples. The declaration is handed to a pluggable
//! extraction provider (typically LLM-backed) that does the actual reading,
//! and the provider's structured output is conformed to the declared shape
//! before it reaches the caller.
//!
//! The [`invoice`] module ships the ready-made schema set for invoice
//! parsing: invoice number, date, billing address, line items, and totals.

pub mod errors;
pub mod invoice;
pub mod providers;
pub mod schema;
pub mod types;

pub use errors::{ExtractError, SchemaError};
pub use schema::{Attribute, ExampleOutput, Field, FieldKind, ObjectSchema};
pub use types::{
    ExtractOptions, ExtractedData, ExtractionClient, ExtractionClientBuilder, ExtractionRequest,
    OutputEncoding,
};

use serde_json::{Map, Value};
use tracing::{debug, info};

impl ExtractionClient {
    /// Extracts structured data for `schema` from `text` with default
    /// options (JSON encoding hint).
    pub async fn extract(
        &self,
        schema: &ObjectSchema,
        text: &str,
    ) -> Result<ExtractedData, ExtractError> {
        let options = ExtractOptions {
            text: text.to_string(),
            ..Default::default()
        };
        self.extract_with_options(schema, options).await
    }

    /// Extracts structured data for `schema` with detailed options.
    ///
    /// The provider receives the schema tree, the raw text, and the encoding
    /// hint. Its raw output is then checked against the schema: a missing or
    /// empty result is reported as [`ExtractError::NoData`], while output
    /// that contradicts the declared shape (wrong nesting, unknown attribute
    /// ids, value kinds that disagree with the declaration) is reported as
    /// [`ExtractError::MalformedOutput`]. Attributes absent from a record
    /// are permitted; whether an absent field means anything (e.g. a missing
    /// discount being zero) is a domain convention carried by the schema
    /// descriptions, not something this client fills in.
    pub async fn extract_with_options(
        &self,
        schema: &ObjectSchema,
        options: ExtractOptions,
    ) -> Result<ExtractedData, ExtractError> {
        info!(
            "[extract] schema: {}, text length: {}",
            schema.id(),
            options.text.len()
        );

        let request = ExtractionRequest {
            schema,
            text: &options.text,
            encoding: options.encoding,
        };
        let raw = self.extractor.extract(request).await?;

        debug!("<-- raw structured output: {raw}");
        conform(schema, raw)
    }
}

/// Conforms a provider's raw output to the root schema's shape.
fn conform(schema: &ObjectSchema, raw: Value) -> Result<ExtractedData, ExtractError> {
    let mut top = match raw {
        Value::Null => return Err(ExtractError::NoData(schema.id().to_string())),
        Value::Object(mapping) => mapping,
        other => {
            return Err(ExtractError::MalformedOutput(format!(
                "expected a mapping keyed by {:?} at the top level, got: {other}",
                schema.id()
            )));
        }
    };

    let payload = match top.remove(schema.id()) {
        None | Some(Value::Null) => return Err(ExtractError::NoData(schema.id().to_string())),
        Some(value) => value,
    };

    let records = if schema.many() {
        match payload {
            Value::Array(items) => {
                if items.is_empty() {
                    return Err(ExtractError::NoData(schema.id().to_string()));
                }
                let mut records = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    match item {
                        Value::Object(record) => records.push(record),
                        other => {
                            return Err(ExtractError::MalformedOutput(format!(
                                "{}[{index}]: expected a record mapping, got: {other}",
                                schema.id()
                            )));
                        }
                    }
                }
                records
            }
            other => {
                return Err(ExtractError::MalformedOutput(format!(
                    "expected a sequence of records under {:?}, got: {other}",
                    schema.id()
                )));
            }
        }
    } else {
        match payload {
            Value::Object(record) => vec![record],
            other => {
                return Err(ExtractError::MalformedOutput(format!(
                    "expected a single record mapping under {:?}, got: {other}",
                    schema.id()
                )));
            }
        }
    };

    for (index, record) in records.iter().enumerate() {
        let path = format!("{}[{index}]", schema.id());
        check_record(schema, record, &path)?;
    }

    Ok(ExtractedData {
        root_id: schema.id().to_string(),
        records,
    })
}

/// Checks one extracted record against an object schema's attribute list.
fn check_record(
    schema: &ObjectSchema,
    record: &Map<String, Value>,
    path: &str,
) -> Result<(), ExtractError> {
    for (key, value) in record {
        let Some(attribute) = schema.attribute(key) else {
            return Err(ExtractError::MalformedOutput(format!(
                "{path}.{key}: not an attribute of {:?}",
                schema.id()
            )));
        };
        check_value(attribute, value, &format!("{path}.{key}"))?;
    }
    Ok(())
}

fn check_value(attribute: &Attribute, value: &Value, path: &str) -> Result<(), ExtractError> {
    // Null stands for an absent attribute, which is always acceptable.
    if value.is_null() {
        return Ok(());
    }

    match attribute {
        Attribute::Scalar(field) => match (field.kind(), value) {
            (FieldKind::Text, Value::String(_)) => Ok(()),
            (FieldKind::Number, Value::Number(_)) => Ok(()),
            (kind, other) => {
                let expected = match kind {
                    FieldKind::Text => "text",
                    FieldKind::Number => "number",
                };
                Err(ExtractError::MalformedOutput(format!(
                    "{path}: expected a {expected} value, got: {other}"
                )))
            }
        },
        Attribute::Object(object) if object.many() => match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    match item {
                        Value::Object(record) => {
                            check_record(object, record, &format!("{path}[{index}]"))?;
                        }
                        other => {
                            return Err(ExtractError::MalformedOutput(format!(
                                "{path}[{index}]: expected a record mapping, got: {other}"
                            )));
                        }
                    }
                }
                Ok(())
            }
            other => Err(ExtractError::MalformedOutput(format!(
                "{path}: expected a sequence of records, got: {other}"
            ))),
        },
        Attribute::Object(object) => match value {
            Value::Object(record) => check_record(object, record, path),
            other => Err(ExtractError::MalformedOutput(format!(
                "{path}: expected a record mapping, got: {other}"
            ))),
        },
    }
}
