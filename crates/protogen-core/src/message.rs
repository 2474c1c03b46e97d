//! Message descriptors and the data shapes they may originate from

use crate::{DescriptorError, FieldDescriptor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Data-shape definition a message was derived from
///
/// Messages without one were synthesized by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataShape {
    /// Shape name (e.g. `BookProtoSerializer`)
    pub name: String,

    /// Owning application
    #[serde(default)]
    pub app_name: String,

    /// Name of the repeated field when this shape is wrapped in a list
    #[serde(default)]
    pub message_list_attr: Option<String>,
}

impl DataShape {
    /// Create a data shape with no custom list attribute
    pub fn new(name: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            app_name: app_name.into(),
            message_list_attr: None,
        }
    }

    /// Set the list attribute name
    pub fn with_message_list_attr(mut self, attr: impl Into<String>) -> Self {
        self.message_list_attr = Some(attr.into());
        self
    }
}

/// A named, ordered collection of fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
    comments: Option<String>,
    data_shape: Option<Arc<DataShape>>,
}

impl MessageDescriptor {
    /// Create an empty, synthesized message
    pub fn new(name: impl Into<String>) -> Result<Self, DescriptorError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DescriptorError::EmptyMessageName);
        }

        Ok(Self {
            name,
            fields: Vec::new(),
            comments: None,
            data_shape: None,
        })
    }

    /// Create a message from a list of fields, rejecting duplicate names
    pub fn with_fields(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldDescriptor>,
    ) -> Result<Self, DescriptorError> {
        let mut message = Self::new(name)?;
        for field in fields {
            message.push_field(field)?;
        }
        Ok(message)
    }

    /// Attach documentation
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Attach the originating data shape
    pub fn with_data_shape(mut self, shape: Arc<DataShape>) -> Self {
        self.data_shape = Some(shape);
        self
    }

    /// Append a field after the existing ones
    pub fn push_field(&mut self, field: FieldDescriptor) -> Result<(), DescriptorError> {
        if self.field(field.name()).is_some() {
            return Err(DescriptorError::DuplicateField {
                message: self.name.clone(),
                field: field.name().to_string(),
            });
        }
        self.fields.push(field);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    pub fn set_comments(&mut self, comments: Option<String>) {
        self.comments = comments;
    }

    /// Remove and return the comments
    pub fn take_comments(&mut self) -> Option<String> {
        self.comments.take()
    }

    pub fn data_shape(&self) -> Option<&DataShape> {
        self.data_shape.as_deref()
    }

    /// True when no data shape backs this message
    pub fn is_synthesized(&self) -> bool {
        self.data_shape.is_none()
    }

    /// Name reported in generation errors
    pub fn model_name(&self) -> &str {
        self.data_shape
            .as_deref()
            .map(|shape| shape.name.as_str())
            .unwrap_or(&self.name)
    }
}
