//! Plugins that append one field to the request message

use crate::config::{FilterAndPaginationBehavior, GenerationSettings};
use crate::field::STRUCT_TYPE;
use crate::service::Capability;
use crate::{
    Cardinality, ConfigurationError, FieldDescriptor, GenerationError, GenerationPlugin,
    GenerationResult, MessageDescriptor, NameConstructor, ServiceDescriptor,
};
use tracing::{debug, trace};

/// The field a field-injection plugin appends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInjection {
    field_name: String,
    field_type: String,
    cardinality: Cardinality,
}

impl FieldInjection {
    /// Configure an injected field, failing if any property is unset
    ///
    /// `plugin` names the owning plugin in the error.
    pub fn try_new(
        plugin: &str,
        field_name: Option<String>,
        field_type: Option<String>,
        cardinality: Option<Cardinality>,
    ) -> Result<Self, ConfigurationError> {
        let missing = |property| ConfigurationError::MissingProperty {
            plugin: plugin.to_string(),
            property,
        };

        let field_name = field_name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| missing("field_name"))?;
        let cardinality = cardinality.ok_or_else(|| missing("field_cardinality"))?;
        let field_type = field_type
            .filter(|ty| !ty.is_empty())
            .ok_or_else(|| missing("field_type"))?;

        Ok(Self {
            field_name,
            field_type,
            cardinality,
        })
    }

    /// Configure an injected field with every property set
    pub fn new(
        plugin: &str,
        field_name: impl Into<String>,
        field_type: impl Into<String>,
        cardinality: Cardinality,
    ) -> Result<Self, ConfigurationError> {
        Self::try_new(
            plugin,
            Some(field_name.into()),
            Some(field_type.into()),
            Some(cardinality),
        )
    }

    // Built-in plugins declare non-empty constants.
    fn declared(field_name: &str, field_type: &str, cardinality: Cardinality) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type: field_type.to_string(),
            cardinality,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Append the configured field at the end of `message`
    pub fn inject(
        &self,
        service: &ServiceDescriptor,
        mut message: MessageDescriptor,
    ) -> GenerationResult<MessageDescriptor> {
        let appended = FieldDescriptor::new(
            self.field_name.as_str(),
            self.field_type.as_str(),
            self.cardinality,
        )
        .and_then(|field| message.push_field(field));

        if let Err(err) = appended {
            return Err(GenerationError::new(
                &service.app_name,
                message.model_name(),
                err.to_string(),
            ));
        }

        trace!(
            message = message.name(),
            field = %self.field_name,
            "injected request field"
        );
        Ok(message)
    }
}

/// Appends a user-configured field to every request message
#[derive(Debug, Clone)]
pub struct AddFieldRequestGenerationPlugin {
    injection: FieldInjection,
}

impl AddFieldRequestGenerationPlugin {
    pub const NAME: &'static str = "AddFieldRequestGenerationPlugin";

    pub fn new(injection: FieldInjection) -> Self {
        Self { injection }
    }

    pub fn injection(&self) -> &FieldInjection {
        &self.injection
    }
}

impl GenerationPlugin for AddFieldRequestGenerationPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn transform_request_message(
        &self,
        service: &ServiceDescriptor,
        message: MessageDescriptor,
        _names: &dyn NameConstructor,
    ) -> GenerationResult<MessageDescriptor> {
        self.injection.inject(service, message)
    }
}

/// Service-level declaration wins; an empty declaration falls back to the global default
fn capability_enabled<T>(capability: &Capability<T>, has_global_default: bool) -> bool {
    match capability {
        Capability::Absent => false,
        Capability::Empty => has_global_default,
        Capability::Configured(_) => true,
    }
}

/// Adds the optional `_filters` structured field to request messages
#[derive(Debug, Clone)]
pub struct FilterGenerationPlugin {
    injection: FieldInjection,
    has_default_backends: bool,
    behavior: FilterAndPaginationBehavior,
}

impl FilterGenerationPlugin {
    pub const NAME: &'static str = "FilterGenerationPlugin";
    pub const FIELD_NAME: &'static str = "_filters";

    pub fn new(settings: &GenerationSettings) -> Self {
        Self {
            injection: FieldInjection::declared(
                Self::FIELD_NAME,
                STRUCT_TYPE,
                Cardinality::Optional,
            ),
            has_default_backends: settings.has_default_filter_backends(),
            behavior: settings.filter_behavior,
        }
    }

    pub fn injection(&self) -> &FieldInjection {
        &self.injection
    }
}

impl GenerationPlugin for FilterGenerationPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check_condition(
        &self,
        service: &ServiceDescriptor,
        _request: &MessageDescriptor,
        _response: &MessageDescriptor,
        _names: &dyn NameConstructor,
    ) -> bool {
        if !capability_enabled(&service.filter_backends, self.has_default_backends) {
            debug!(
                plugin = Self::NAME,
                service = %service.name,
                "no filter_backends found on the service, field not generated; set filter_backends on the service or DEFAULT_FILTER_BACKENDS globally"
            );
            return false;
        }

        if self.behavior.is_metadata_strict() {
            debug!(
                plugin = Self::NAME,
                service = %service.name,
                "FILTER_BEHAVIOR is METADATA_STRICT, field not generated; filters travel in metadata"
            );
            return false;
        }

        true
    }

    fn transform_request_message(
        &self,
        service: &ServiceDescriptor,
        message: MessageDescriptor,
        _names: &dyn NameConstructor,
    ) -> GenerationResult<MessageDescriptor> {
        self.injection.inject(service, message)
    }
}

/// Adds the optional `_pagination` structured field to request messages
#[derive(Debug, Clone)]
pub struct PaginationGenerationPlugin {
    injection: FieldInjection,
    has_default_class: bool,
    behavior: FilterAndPaginationBehavior,
}

impl PaginationGenerationPlugin {
    pub const NAME: &'static str = "PaginationGenerationPlugin";
    pub const FIELD_NAME: &'static str = "_pagination";

    pub fn new(settings: &GenerationSettings) -> Self {
        Self {
            injection: FieldInjection::declared(
                Self::FIELD_NAME,
                STRUCT_TYPE,
                Cardinality::Optional,
            ),
            has_default_class: settings.has_default_pagination_class(),
            behavior: settings.pagination_behavior,
        }
    }

    pub fn injection(&self) -> &FieldInjection {
        &self.injection
    }
}

impl GenerationPlugin for PaginationGenerationPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check_condition(
        &self,
        service: &ServiceDescriptor,
        _request: &MessageDescriptor,
        _response: &MessageDescriptor,
        _names: &dyn NameConstructor,
    ) -> bool {
        if !capability_enabled(&service.pagination_class, self.has_default_class) {
            debug!(
                plugin = Self::NAME,
                service = %service.name,
                "no pagination_class found on the service, field not generated; set pagination_class on the service or DEFAULT_PAGINATION_CLASS globally"
            );
            return false;
        }

        if self.behavior.is_metadata_strict() {
            debug!(
                plugin = Self::NAME,
                service = %service.name,
                "PAGINATION_BEHAVIOR is METADATA_STRICT, field not generated; pagination travels in metadata"
            );
            return false;
        }

        true
    }

    fn transform_request_message(
        &self,
        service: &ServiceDescriptor,
        message: MessageDescriptor,
        _names: &dyn NameConstructor,
    ) -> GenerationResult<MessageDescriptor> {
        self.injection.inject(service, message)
    }
}

#[cfg(test)]
#[path = "field_injection/field_injection_tests.rs"]
mod field_injection_tests;
