//! Per-operation generation driver

use crate::{
    DataShape, FieldDescriptor, GenerationError, GenerationResult, MessageDescriptor,
    MessageNameConstructor, NameConstructor, PluginChain, ServiceDescriptor,
};
use std::sync::Arc;
use tracing::debug;

/// Base description of one side of an operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationMessage {
    /// Explicit message name, bypassing name derivation
    pub name: Option<String>,

    /// Data shape the message is derived from
    pub shape: Option<Arc<DataShape>>,

    pub fields: Vec<FieldDescriptor>,

    pub comments: Option<String>,
}

impl OperationMessage {
    /// A message with no fields and no shape
    pub fn empty() -> Self {
        Self::default()
    }

    /// A message derived from `shape`
    pub fn from_shape(shape: Arc<DataShape>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            shape: Some(shape),
            fields,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    fn shape_name(&self) -> Option<&str> {
        self.shape.as_deref().map(|shape| shape.name.as_str())
    }

    /// Build a fresh descriptor named `name`
    fn build(&self, service: &ServiceDescriptor, name: &str) -> GenerationResult<MessageDescriptor> {
        let model_name = self.shape_name().unwrap_or(name);
        let mut message = MessageDescriptor::with_fields(name, self.fields.iter().cloned())
            .map_err(|e| GenerationError::new(&service.app_name, model_name, e.to_string()))?;

        message.set_comments(self.comments.clone());
        if let Some(shape) = &self.shape {
            message = message.with_data_shape(Arc::clone(shape));
        }
        Ok(message)
    }
}

/// One RPC of a service together with the plugins that shape its messages
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    pub name: String,
    pub request: OperationMessage,
    pub response: OperationMessage,
    pub chain: PluginChain,
}

impl OperationDescriptor {
    pub fn new(
        name: impl Into<String>,
        request: OperationMessage,
        response: OperationMessage,
        chain: PluginChain,
    ) -> Self {
        Self {
            name: name.into(),
            request,
            response,
            chain,
        }
    }

    /// Names of the base request/response messages
    pub fn name_constructor(&self, service: &ServiceDescriptor) -> MessageNameConstructor {
        let derived = MessageNameConstructor::for_operation(
            &service.name,
            &self.name,
            self.request.shape_name(),
            self.response.shape_name(),
        );

        MessageNameConstructor::with_names(
            self.request
                .name
                .clone()
                .unwrap_or_else(|| derived.request_constructed_name().to_string()),
            self.response
                .name
                .clone()
                .unwrap_or_else(|| derived.response_constructed_name().to_string()),
        )
    }

    /// Build the base pair and run it through the chain
    pub fn generate(&self, service: &ServiceDescriptor) -> GenerationResult<GeneratedOperation> {
        let names = self.name_constructor(service);
        let request = self
            .request
            .build(service, names.request_constructed_name())?;
        let response = self
            .response
            .build(service, names.response_constructed_name())?;

        let (request, response) = self.chain.run(service, request, response, &names)?;

        debug!(
            service = %service.name,
            operation = %self.name,
            request = request.name(),
            response = response.name(),
            "generated operation messages"
        );

        Ok(GeneratedOperation {
            name: self.name.clone(),
            request,
            response,
        })
    }
}

/// Final messages of one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOperation {
    pub name: String,
    pub request: MessageDescriptor,
    pub response: MessageDescriptor,
}

/// Final messages of every operation of a service, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedService {
    pub name: String,
    pub operations: Vec<GeneratedOperation>,
}

/// Generate every operation of `service`
///
/// Stops at the first failing operation.
pub fn generate_service(
    service: &ServiceDescriptor,
    operations: &[OperationDescriptor],
) -> GenerationResult<GeneratedService> {
    let operations = operations
        .iter()
        .map(|operation| operation.generate(service))
        .collect::<GenerationResult<Vec<_>>>()?;

    Ok(GeneratedService {
        name: service.name.clone(),
        operations,
    })
}
