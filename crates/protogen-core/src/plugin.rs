//! Generation plugin trait

use crate::{GenerationResult, MessageDescriptor, NameConstructor, ServiceDescriptor};
use tracing::trace;

/// A conditional transformation over the request/response messages of one operation
///
/// Every method has a no-op default so implementations only override what
/// they change. Implementations hold immutable configuration only and may be
/// shared across threads.
///
/// # Example
///
/// ```
/// use protogen_core::prelude::*;
///
/// /// Renames nothing, but refuses to run on services without an app
/// struct RequiresApp;
///
/// impl GenerationPlugin for RequiresApp {
///     fn name(&self) -> &'static str {
///         "RequiresApp"
///     }
///
///     fn check_condition(
///         &self,
///         service: &ServiceDescriptor,
///         _request: &MessageDescriptor,
///         _response: &MessageDescriptor,
///         _names: &dyn NameConstructor,
///     ) -> bool {
///         !service.app_name.is_empty()
///     }
/// }
/// ```
pub trait GenerationPlugin: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &'static str;

    /// Whether this plugin applies to the given pair
    ///
    /// When `false`, neither transform runs and both messages pass through.
    fn check_condition(
        &self,
        _service: &ServiceDescriptor,
        _request: &MessageDescriptor,
        _response: &MessageDescriptor,
        _names: &dyn NameConstructor,
    ) -> bool {
        true
    }

    /// Transform the request message
    fn transform_request_message(
        &self,
        _service: &ServiceDescriptor,
        message: MessageDescriptor,
        _names: &dyn NameConstructor,
    ) -> GenerationResult<MessageDescriptor> {
        Ok(message)
    }

    /// Transform the response message
    fn transform_response_message(
        &self,
        _service: &ServiceDescriptor,
        message: MessageDescriptor,
        _names: &dyn NameConstructor,
    ) -> GenerationResult<MessageDescriptor> {
        Ok(message)
    }

    /// Check the condition, then transform each side independently
    fn run(
        &self,
        service: &ServiceDescriptor,
        request: MessageDescriptor,
        response: MessageDescriptor,
        names: &dyn NameConstructor,
    ) -> GenerationResult<(MessageDescriptor, MessageDescriptor)> {
        if !self.check_condition(service, &request, &response, names) {
            trace!(plugin = self.name(), "condition not met, plugin skipped");
            return Ok((request, response));
        }

        let request = self.transform_request_message(service, request, names)?;
        let response = self.transform_response_message(service, response, names)?;
        Ok((request, response))
    }
}
