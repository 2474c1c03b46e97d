//! Generation settings and declarative plugin configuration

use crate::plugins::{
    AddFieldRequestGenerationPlugin, FieldInjection, FilterGenerationPlugin,
    PaginationGenerationPlugin, RequestAndResponseAsListGenerationPlugin,
    RequestAsListGenerationPlugin, ResponseAsListGenerationPlugin,
};
use crate::{Cardinality, ConfigurationError, GenerationPlugin};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where filter and pagination parameters travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterAndPaginationBehavior {
    /// Transport metadata only; no message field is generated
    #[default]
    MetadataStrict,
    /// Request message field only
    RequestStructStrict,
    /// Both metadata and request message field
    MetadataAndRequestStruct,
}

impl FilterAndPaginationBehavior {
    pub fn is_metadata_strict(&self) -> bool {
        matches!(self, FilterAndPaginationBehavior::MetadataStrict)
    }
}

impl std::fmt::Display for FilterAndPaginationBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterAndPaginationBehavior::MetadataStrict => write!(f, "METADATA_STRICT"),
            FilterAndPaginationBehavior::RequestStructStrict => write!(f, "REQUEST_STRUCT_STRICT"),
            FilterAndPaginationBehavior::MetadataAndRequestStruct => {
                write!(f, "METADATA_AND_REQUEST_STRUCT")
            }
        }
    }
}

/// Global settings consulted by the built-in plugins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Filter backends applied to services that declare none of their own
    pub default_filter_backends: Vec<String>,

    /// Pagination class applied to services that declare none of their own
    pub default_pagination_class: Option<String>,

    pub filter_behavior: FilterAndPaginationBehavior,

    pub pagination_behavior: FilterAndPaginationBehavior,

    /// Read and write shapes are generated separately
    ///
    /// List wrapping currently leaves messages untouched under this mode.
    pub separate_read_write_model: bool,
}

impl GenerationSettings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from JSON bytes; empty input yields defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigurationError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes).map_err(|e| ConfigurationError::InvalidSettings(e.to_string()))
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(content).map_err(|e| ConfigurationError::InvalidSettings(e.to_string()))
    }

    pub fn has_default_filter_backends(&self) -> bool {
        !self.default_filter_backends.is_empty()
    }

    pub fn has_default_pagination_class(&self) -> bool {
        self.default_pagination_class
            .as_deref()
            .is_some_and(|class| !class.is_empty())
    }
}

/// Declarative description of one plugin in a chain
///
/// Options a kind does not know are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum PluginSpec {
    Filter,
    Pagination,
    RequestAsList {
        #[serde(default)]
        list_field_name: Option<String>,
    },
    ResponseAsList {
        #[serde(default)]
        list_field_name: Option<String>,
    },
    RequestAndResponseAsList {
        #[serde(default)]
        list_field_name: Option<String>,
    },
    AddField {
        #[serde(default)]
        field_name: Option<String>,
        #[serde(default)]
        field_type: Option<String>,
        #[serde(default)]
        field_cardinality: Option<Cardinality>,
    },
}

impl PluginSpec {
    /// Resolve a plugin kind with no options
    pub fn from_kind(kind: &str) -> Result<Self, ConfigurationError> {
        match kind {
            "filter" => Ok(PluginSpec::Filter),
            "pagination" => Ok(PluginSpec::Pagination),
            "request_as_list" => Ok(PluginSpec::RequestAsList {
                list_field_name: None,
            }),
            "response_as_list" => Ok(PluginSpec::ResponseAsList {
                list_field_name: None,
            }),
            "request_and_response_as_list" => Ok(PluginSpec::RequestAndResponseAsList {
                list_field_name: None,
            }),
            "add_field" => Ok(PluginSpec::AddField {
                field_name: None,
                field_type: None,
                field_cardinality: None,
            }),
            other => Err(ConfigurationError::UnknownPlugin(other.to_string())),
        }
    }

    /// Instantiate the plugin, validating its configuration
    pub fn build(
        &self,
        settings: &GenerationSettings,
    ) -> Result<Arc<dyn GenerationPlugin>, ConfigurationError> {
        let plugin: Arc<dyn GenerationPlugin> = match self {
            PluginSpec::Filter => Arc::new(FilterGenerationPlugin::new(settings)),
            PluginSpec::Pagination => Arc::new(PaginationGenerationPlugin::new(settings)),
            PluginSpec::RequestAsList { list_field_name } => {
                let plugin = RequestAsListGenerationPlugin::new(settings);
                match list_field_name {
                    Some(name) => Arc::new(plugin.with_list_field_name(name.as_str())),
                    None => Arc::new(plugin),
                }
            }
            PluginSpec::ResponseAsList { list_field_name } => {
                let plugin = ResponseAsListGenerationPlugin::new(settings);
                match list_field_name {
                    Some(name) => Arc::new(plugin.with_list_field_name(name.as_str())),
                    None => Arc::new(plugin),
                }
            }
            PluginSpec::RequestAndResponseAsList { list_field_name } => {
                let plugin = RequestAndResponseAsListGenerationPlugin::new(settings);
                match list_field_name {
                    Some(name) => Arc::new(plugin.with_list_field_name(name.as_str())),
                    None => Arc::new(plugin),
                }
            }
            PluginSpec::AddField {
                field_name,
                field_type,
                field_cardinality,
            } => {
                let injection = FieldInjection::try_new(
                    AddFieldRequestGenerationPlugin::NAME,
                    field_name.clone(),
                    field_type.clone(),
                    *field_cardinality,
                )?;
                Arc::new(AddFieldRequestGenerationPlugin::new(injection))
            }
        };
        Ok(plugin)
    }
}
