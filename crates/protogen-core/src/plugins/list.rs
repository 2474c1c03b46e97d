//! Plugins that wrap a message into a list message

use crate::config::GenerationSettings;
use crate::naming::{REQUEST_SUFFIX, RESPONSE_SUFFIX, list_message_name};
use crate::{
    Cardinality, DescriptorError, FieldDescriptor, GenerationError, GenerationPlugin,
    GenerationResult, MessageDescriptor, NameConstructor, ServiceDescriptor,
};
use tracing::trace;

/// Repeated field name used when the data shape declares none
pub const DEFAULT_LIST_FIELD_NAME: &str = "results";

/// Total-item field added to list messages of paginated services
pub const COUNT_FIELD_NAME: &str = "count";

/// Shared list-wrapping transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWrapping {
    list_field_name: String,
    separate_read_write_model: bool,
}

impl ListWrapping {
    pub fn new(settings: &GenerationSettings) -> Self {
        Self {
            list_field_name: DEFAULT_LIST_FIELD_NAME.to_string(),
            separate_read_write_model: settings.separate_read_write_model,
        }
    }

    /// Override the fallback repeated field name
    pub fn with_list_field_name(mut self, name: impl Into<String>) -> Self {
        self.list_field_name = name.into();
        self
    }

    pub fn list_field_name(&self) -> &str {
        &self.list_field_name
    }

    /// Wrap `message` as a repeated field of a new message named `list_name`.
    ///
    /// The repeated field is named after the data shape's list attribute, or
    /// the configured fallback. Services declaring pagination also get a
    /// singular `count` field. Comments of a synthesized message move to the
    /// wrapper; a shape-backed message keeps its own. A `list_name` equal to
    /// the wrapped message's name is rejected.
    pub fn transform_message_to_list(
        &self,
        service: &ServiceDescriptor,
        mut message: MessageDescriptor,
        list_name: &str,
    ) -> GenerationResult<MessageDescriptor> {
        if message.name() == list_name {
            return Err(GenerationError::new(
                &service.app_name,
                message.model_name(),
                format!("list message {list_name} would shadow the message it wraps"),
            ));
        }

        let list_field_name = message
            .data_shape()
            .and_then(|shape| shape.message_list_attr.clone())
            .unwrap_or_else(|| self.list_field_name.clone());

        let app_name = service.app_name.clone();
        let model_name = message.model_name().to_string();
        let to_error =
            |err: DescriptorError| GenerationError::new(&app_name, &model_name, err.to_string());

        let comments = if message.is_synthesized() {
            message.take_comments()
        } else {
            None
        };

        let mut fields = vec![
            FieldDescriptor::new(list_field_name, message, Cardinality::Repeated)
                .map_err(to_error)?,
        ];

        if service.pagination_class.is_declared() {
            fields.push(
                FieldDescriptor::new(COUNT_FIELD_NAME, "int32", Cardinality::Singular)
                    .map_err(to_error)?,
            );
        }

        if self.separate_read_write_model {
            // Read/write split has no list-specific fields yet.
            trace!(list = list_name, "separate read/write model: list message unchanged");
        }

        let mut list_message = MessageDescriptor::with_fields(list_name, fields).map_err(to_error)?;
        list_message.set_comments(comments);

        trace!(list = list_name, model = %model_name, "wrapped message into list");
        Ok(list_message)
    }
}

/// Wraps the request message into `<Name>ListRequest`
#[derive(Debug, Clone)]
pub struct RequestAsListGenerationPlugin {
    wrapping: ListWrapping,
}

impl RequestAsListGenerationPlugin {
    pub const NAME: &'static str = "RequestAsListGenerationPlugin";

    pub fn new(settings: &GenerationSettings) -> Self {
        Self {
            wrapping: ListWrapping::new(settings),
        }
    }

    pub fn with_list_field_name(mut self, name: impl Into<String>) -> Self {
        self.wrapping = self.wrapping.with_list_field_name(name);
        self
    }

    pub fn wrapping(&self) -> &ListWrapping {
        &self.wrapping
    }

    /// Name of the list request for the current operation
    pub fn list_name(&self, names: &dyn NameConstructor) -> String {
        list_message_name(names.request_constructed_name(), REQUEST_SUFFIX)
    }
}

impl GenerationPlugin for RequestAsListGenerationPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn transform_request_message(
        &self,
        service: &ServiceDescriptor,
        message: MessageDescriptor,
        names: &dyn NameConstructor,
    ) -> GenerationResult<MessageDescriptor> {
        let list_name = self.list_name(names);
        self.wrapping.transform_message_to_list(service, message, &list_name)
    }
}

/// Wraps the response message into `<Name>ListResponse`
#[derive(Debug, Clone)]
pub struct ResponseAsListGenerationPlugin {
    wrapping: ListWrapping,
}

impl ResponseAsListGenerationPlugin {
    pub const NAME: &'static str = "ResponseAsListGenerationPlugin";

    pub fn new(settings: &GenerationSettings) -> Self {
        Self {
            wrapping: ListWrapping::new(settings),
        }
    }

    pub fn with_list_field_name(mut self, name: impl Into<String>) -> Self {
        self.wrapping = self.wrapping.with_list_field_name(name);
        self
    }

    pub fn wrapping(&self) -> &ListWrapping {
        &self.wrapping
    }

    /// Name of the list response for the current operation
    pub fn list_name(&self, names: &dyn NameConstructor) -> String {
        list_message_name(names.response_constructed_name(), RESPONSE_SUFFIX)
    }
}

impl GenerationPlugin for ResponseAsListGenerationPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn transform_response_message(
        &self,
        service: &ServiceDescriptor,
        message: MessageDescriptor,
        names: &dyn NameConstructor,
    ) -> GenerationResult<MessageDescriptor> {
        let list_name = self.list_name(names);
        self.wrapping.transform_message_to_list(service, message, &list_name)
    }
}

/// Wraps both sides, delegating to the request and response plugins
#[derive(Debug, Clone)]
pub struct RequestAndResponseAsListGenerationPlugin {
    request: RequestAsListGenerationPlugin,
    response: ResponseAsListGenerationPlugin,
}

impl RequestAndResponseAsListGenerationPlugin {
    pub const NAME: &'static str = "RequestAndResponseAsListGenerationPlugin";

    pub fn new(settings: &GenerationSettings) -> Self {
        Self {
            request: RequestAsListGenerationPlugin::new(settings),
            response: ResponseAsListGenerationPlugin::new(settings),
        }
    }

    pub fn with_list_field_name(self, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            request: self.request.with_list_field_name(name.clone()),
            response: self.response.with_list_field_name(name),
        }
    }

    pub fn request_plugin(&self) -> &RequestAsListGenerationPlugin {
        &self.request
    }

    pub fn response_plugin(&self) -> &ResponseAsListGenerationPlugin {
        &self.response
    }
}

impl GenerationPlugin for RequestAndResponseAsListGenerationPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn transform_request_message(
        &self,
        service: &ServiceDescriptor,
        message: MessageDescriptor,
        names: &dyn NameConstructor,
    ) -> GenerationResult<MessageDescriptor> {
        self.request.transform_request_message(service, message, names)
    }

    fn transform_response_message(
        &self,
        service: &ServiceDescriptor,
        message: MessageDescriptor,
        names: &dyn NameConstructor,
    ) -> GenerationResult<MessageDescriptor> {
        self.response.transform_response_message(service, message, names)
    }
}

#[cfg(test)]
#[path = "list/list_tests.rs"]
mod list_tests;
