//! Ordered plugin chain

use crate::config::{GenerationSettings, PluginSpec};
use crate::{
    ConfigurationError, GenerationPlugin, GenerationResult, MessageDescriptor, NameConstructor,
    ServiceDescriptor,
};
use std::sync::Arc;
use tracing::trace;

/// Runs plugins in caller-supplied order over one request/response pair
///
/// Each plugin sees only the pair returned by its predecessor. Chains are
/// cheap to clone and may be shared across threads.
#[derive(Clone, Default)]
pub struct PluginChain {
    plugins: Vec<Arc<dyn GenerationPlugin>>,
}

impl PluginChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain from plugin instances
    pub fn from_plugins(plugins: impl IntoIterator<Item = Arc<dyn GenerationPlugin>>) -> Self {
        Self {
            plugins: plugins.into_iter().collect(),
        }
    }

    /// Build every plugin of `specs`, failing on the first invalid configuration
    pub fn from_specs<'a>(
        specs: impl IntoIterator<Item = &'a PluginSpec>,
        settings: &GenerationSettings,
    ) -> Result<Self, ConfigurationError> {
        let plugins = specs
            .into_iter()
            .map(|spec| spec.build(settings))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { plugins })
    }

    /// Append a plugin at the end of the chain
    pub fn push(&mut self, plugin: Arc<dyn GenerationPlugin>) {
        self.plugins.push(plugin);
    }

    /// Builder-style [`PluginChain::push`]
    pub fn with_plugin(mut self, plugin: impl GenerationPlugin + 'static) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Plugin names in execution order
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    /// Thread the pair through every plugin and return the final pair
    pub fn run(
        &self,
        service: &ServiceDescriptor,
        request: MessageDescriptor,
        response: MessageDescriptor,
        names: &dyn NameConstructor,
    ) -> GenerationResult<(MessageDescriptor, MessageDescriptor)> {
        self.plugins
            .iter()
            .try_fold((request, response), |(request, response), plugin| {
                trace!(
                    plugin = plugin.name(),
                    request = request.name(),
                    response = response.name(),
                    "running generation plugin"
                );
                plugin.run(service, request, response, names)
            })
    }
}

impl std::fmt::Debug for PluginChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginChain")
            .field("plugins", &self.plugin_names())
            .finish()
    }
}
