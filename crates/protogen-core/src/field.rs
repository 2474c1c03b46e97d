//! Field descriptors

use crate::{DescriptorError, MessageDescriptor};
use serde::{Deserialize, Serialize};

/// Well-known type used for free-form structured values
pub const STRUCT_TYPE: &str = "google.protobuf.Struct";

/// How many values a field carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    #[default]
    Singular,
    Optional,
    Repeated,
}

impl Cardinality {
    /// Label written before the field type in proto3 syntax
    pub fn proto_label(&self) -> Option<&'static str> {
        match self {
            Cardinality::Singular => None,
            Cardinality::Optional => Some("optional"),
            Cardinality::Repeated => Some("repeated"),
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cardinality::Singular => write!(f, "singular"),
            Cardinality::Optional => write!(f, "optional"),
            Cardinality::Repeated => write!(f, "repeated"),
        }
    }
}

/// Type of a field: a scalar or well-known type name, or a generated message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Scalar (`int32`, `string`, ...) or fully-qualified well-known type
    Named(String),

    /// Nested message, emitted alongside the message that references it
    Message(Box<MessageDescriptor>),
}

impl FieldType {
    /// Name used for this type in generated schema text
    pub fn type_name(&self) -> &str {
        match self {
            FieldType::Named(name) => name,
            FieldType::Message(message) => message.name(),
        }
    }

    /// Nested message, if this type is one
    pub fn as_message(&self) -> Option<&MessageDescriptor> {
        match self {
            FieldType::Named(_) => None,
            FieldType::Message(message) => Some(message),
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        FieldType::Named(name.to_string())
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::Named(name)
    }
}

impl From<MessageDescriptor> for FieldType {
    fn from(message: MessageDescriptor) -> Self {
        FieldType::Message(Box::new(message))
    }
}

/// Plain key/value form of a field, as found in manifests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default)]
    pub cardinality: Cardinality,
}

/// One field of a message
///
/// Immutable once built; messages own their fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    cardinality: Cardinality,
}

impl FieldDescriptor {
    /// Create a field, rejecting empty names
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<FieldType>,
        cardinality: Cardinality,
    ) -> Result<Self, DescriptorError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DescriptorError::EmptyFieldName);
        }

        Ok(Self {
            name,
            field_type: field_type.into(),
            cardinality,
        })
    }

    /// Build a field from its name/type/cardinality record
    pub fn from_record(record: FieldRecord) -> Result<Self, DescriptorError> {
        Self::new(record.name, record.field_type, record.cardinality)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
}
