//! # Extraction Schemas
//!
//! This module defines the declarative schema tree that describes *what* to
//! pull out of unstructured text: scalar fields (text or number), composite
//! objects, and repeated objects, each carrying a human-readable description
//! and optional steering examples for the extraction provider.
//!
//! Schemas are plain values. They are validated once at construction, are
//! immutable afterwards, and new schemas are produced from existing ones via
//! [`ObjectSchema::derive`] rather than in-place mutation, so a schema can be
//! shared read-only across any number of extraction calls.

use crate::errors::SchemaError;
use serde::Serialize;
use serde_json::{Map, Value};

/// The declared value kind of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
}

/// A (source snippet, expected value) pair used to steer extraction of a
/// single scalar field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarExample {
    pub snippet: String,
    pub expected: String,
}

/// A leaf field to be located in the input text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    id: String,
    description: String,
    kind: FieldKind,
    examples: Vec<ScalarExample>,
}

impl Field {
    /// Declares a text field. Fails if `id` is empty.
    pub fn text(id: &str, description: &str) -> Result<Self, SchemaError> {
        Self::new(id, description, FieldKind::Text)
    }

    /// Declares a number field. Fails if `id` is empty.
    pub fn number(id: &str, description: &str) -> Result<Self, SchemaError> {
        Self::new(id, description, FieldKind::Number)
    }

    fn new(id: &str, description: &str, kind: FieldKind) -> Result<Self, SchemaError> {
        if id.trim().is_empty() {
            return Err(SchemaError::EmptyId(description.to_string()));
        }
        Ok(Self {
            id: id.to_string(),
            description: description.to_string(),
            kind,
            examples: Vec::new(),
        })
    }

    /// Attaches (snippet, expected) steering examples to this field.
    pub fn with_examples<I, S, E>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, E)>,
        S: Into<String>,
        E: Into<String>,
    {
        self.examples = pairs
            .into_iter()
            .map(|(snippet, expected)| ScalarExample {
                snippet: snippet.into(),
                expected: expected.into(),
            })
            .collect();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn examples(&self) -> &[ScalarExample] {
        &self.examples
    }
}

/// A named child of an [`ObjectSchema`]: either a leaf field or a nested
/// object. Attributes own their children outright, so a schema tree cannot
/// contain cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Attribute {
    Scalar(Field),
    Object(ObjectSchema),
}

impl Attribute {
    pub fn id(&self) -> &str {
        match self {
            Attribute::Scalar(field) => field.id(),
            Attribute::Object(object) => object.id(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Attribute::Scalar(field) => field.description(),
            Attribute::Object(object) => object.description(),
        }
    }
}

impl From<Field> for Attribute {
    fn from(field: Field) -> Self {
        Attribute::Scalar(field)
    }
}

impl From<ObjectSchema> for Attribute {
    fn from(object: ObjectSchema) -> Self {
        Attribute::Object(object)
    }
}

/// The expected output of a whole-object example.
///
/// An object declared `many == false` documents a single attribute-id to
/// value mapping; an object declared `many == true` documents a sequence of
/// such mappings. The builder rejects examples whose shape disagrees with
/// the `many` flag, so a mismatch is caught here and not when the provider's
/// output is misparsed downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExampleOutput {
    One(Map<String, Value>),
    Many(Vec<Map<String, Value>>),
}

impl TryFrom<Value> for ExampleOutput {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(mapping) => Ok(ExampleOutput::One(mapping)),
            Value::Array(items) => {
                let mut mappings = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(mapping) => mappings.push(mapping),
                        other => return Err(SchemaError::InvalidExampleValue(other.to_string())),
                    }
                }
                Ok(ExampleOutput::Many(mappings))
            }
            other => Err(SchemaError::InvalidExampleValue(other.to_string())),
        }
    }
}

impl From<ExampleOutput> for Value {
    fn from(output: ExampleOutput) -> Self {
        match output {
            ExampleOutput::One(mapping) => Value::Object(mapping),
            ExampleOutput::Many(mappings) => {
                Value::Array(mappings.into_iter().map(Value::Object).collect())
            }
        }
    }
}

/// A whole-object steering example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectExample {
    pub snippet: String,
    pub expected: ExampleOutput,
}

/// A composite schema: an ordered list of attributes, a flag indicating
/// whether zero-or-more instances may be extracted, and optional
/// whole-object examples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSchema {
    id: String,
    description: String,
    attributes: Vec<Attribute>,
    many: bool,
    examples: Vec<ObjectExample>,
}

impl ObjectSchema {
    /// Starts building an object schema with the given id and description.
    pub fn builder(id: &str, description: &str) -> ObjectSchemaBuilder {
        ObjectSchemaBuilder {
            id: id.to_string(),
            description: description.to_string(),
            attributes: Vec::new(),
            many: false,
            examples: Vec::new(),
        }
    }

    /// Starts a builder seeded with a copy of this schema.
    ///
    /// This is how one schema is reused as another (e.g. a generic address
    /// schema re-labelled as a billing address): override what differs and
    /// build. The source schema is never modified.
    pub fn derive(&self) -> ObjectSchemaBuilder {
        ObjectSchemaBuilder {
            id: self.id.clone(),
            description: self.description.clone(),
            attributes: self.attributes.clone(),
            many: self.many,
            examples: self
                .examples
                .iter()
                .map(|example| (example.snippet.clone(), Value::from(example.expected.clone())))
                .collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Looks up a direct attribute by id.
    pub fn attribute(&self, id: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.id() == id)
    }

    pub fn many(&self) -> bool {
        self.many
    }

    pub fn examples(&self) -> &[ObjectExample] {
        &self.examples
    }
}

/// Builder for [`ObjectSchema`]. All structural validation happens in
/// [`build`](ObjectSchemaBuilder::build).
#[derive(Debug, Clone)]
pub struct ObjectSchemaBuilder {
    id: String,
    description: String,
    attributes: Vec<Attribute>,
    many: bool,
    examples: Vec<(String, Value)>,
}

impl ObjectSchemaBuilder {
    /// Overrides the schema id.
    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Overrides the schema description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Appends an attribute (a [`Field`] or a nested [`ObjectSchema`]).
    pub fn attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Declares whether zero-or-more instances may be extracted.
    pub fn many(mut self, many: bool) -> Self {
        self.many = many;
        self
    }

    /// Appends a whole-object example. `expected` must be a JSON mapping
    /// when the schema is single, or a sequence of mappings when it is
    /// `many`; the shape is checked in `build`.
    pub fn example(mut self, snippet: &str, expected: Value) -> Self {
        self.examples.push((snippet.to_string(), expected));
        self
    }

    /// Validates and freezes the schema.
    ///
    /// Failure conditions: empty id, empty attribute list, duplicate
    /// sibling attribute ids, or an example whose shape disagrees with the
    /// `many` flag.
    pub fn build(self) -> Result<ObjectSchema, SchemaError> {
        if self.id.trim().is_empty() {
            return Err(SchemaError::EmptyId(self.description));
        }
        if self.attributes.is_empty() {
            return Err(SchemaError::NoAttributes(self.id));
        }

        let mut seen = Vec::with_capacity(self.attributes.len());
        for attribute in &self.attributes {
            if seen.contains(&attribute.id()) {
                return Err(SchemaError::DuplicateAttributeId {
                    object: self.id,
                    attribute: attribute.id().to_string(),
                });
            }
            seen.push(attribute.id());
        }

        let mut examples = Vec::with_capacity(self.examples.len());
        for (index, (snippet, expected)) in self.examples.into_iter().enumerate() {
            let expected = ExampleOutput::try_from(expected)?;
            match (&expected, self.many) {
                (ExampleOutput::One(_), true) => {
                    return Err(SchemaError::ExampleExpectsMany {
                        object: self.id,
                        index,
                    });
                }
                (ExampleOutput::Many(_), false) => {
                    return Err(SchemaError::ExampleExpectsOne {
                        object: self.id,
                        index,
                    });
                }
                _ => {}
            }
            examples.push(ObjectExample { snippet, expected });
        }

        Ok(ObjectSchema {
            id: self.id,
            description: self.description,
            attributes: self.attributes,
            many: self.many,
            examples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_with_empty_id_is_rejected() {
        let result = Field::text("", "some description");
        assert!(matches!(result, Err(SchemaError::EmptyId(_))));
    }

    #[test]
    fn builder_rejects_duplicate_sibling_ids() {
        let result = ObjectSchema::builder("pair", "two of the same")
            .attribute(Field::text("value", "first").unwrap())
            .attribute(Field::number("value", "second").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateAttributeId { .. })
        ));
    }

    #[test]
    fn builder_rejects_example_shape_disagreeing_with_many() {
        let single = ObjectSchema::builder("item", "a single item")
            .attribute(Field::text("label", "the label").unwrap())
            .example("label a", json!([{"label": "a"}]))
            .build();
        assert!(matches!(single, Err(SchemaError::ExampleExpectsOne { .. })));

        let repeated = ObjectSchema::builder("items", "repeated items")
            .attribute(Field::text("label", "the label").unwrap())
            .many(true)
            .example("label a", json!({"label": "a"}))
            .build();
        assert!(matches!(
            repeated,
            Err(SchemaError::ExampleExpectsMany { .. })
        ));
    }
}
