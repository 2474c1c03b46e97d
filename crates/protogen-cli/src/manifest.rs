//! Service manifest parsing and validation

use anyhow::{Context, Result};
use protogen_core::{
    DataShape, FieldDescriptor, FieldRecord, GenerationSettings, OperationDescriptor,
    OperationMessage, PluginChain, PluginSpec, ServiceDescriptor,
};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Service manifest structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Proto package; omitted from the output when empty
    #[serde(default)]
    pub package: String,

    pub service: ServiceDescriptor,

    #[serde(default)]
    pub shapes: Vec<ShapeDefinition>,

    #[serde(default)]
    pub operations: Vec<OperationDefinition>,
}

/// A data shape together with the fields of its base message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeDefinition {
    pub name: String,

    /// Owning application; defaults to the service's
    #[serde(default)]
    pub app_name: Option<String>,

    #[serde(default)]
    pub message_list_attr: Option<String>,

    #[serde(default)]
    pub comments: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldRecord>,
}

/// One side of an operation
///
/// With a `shape`, the shape's fields come first and `fields` are appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageDefinition {
    #[serde(default)]
    pub shape: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub comments: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationDefinition {
    pub name: String,

    #[serde(default)]
    pub request: MessageDefinition,

    #[serde(default)]
    pub response: MessageDefinition,

    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

/// Plugin reference: a bare kind, or a kind with options
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PluginEntry {
    Kind(String),
    Spec(PluginSpec),
}

// A table is parsed as a `PluginSpec` directly so its own error surfaces.
impl<'de> Deserialize<'de> for PluginEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PluginEntryVisitor;

        impl<'de> Visitor<'de> for PluginEntryVisitor {
            type Value = PluginEntry;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a plugin kind or a table with a `kind` key")
            }

            fn visit_str<E: de::Error>(self, kind: &str) -> std::result::Result<Self::Value, E> {
                Ok(PluginEntry::Kind(kind.to_string()))
            }

            fn visit_map<A>(self, map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                PluginSpec::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(PluginEntry::Spec)
            }
        }

        deserializer.deserialize_any(PluginEntryVisitor)
    }
}

impl PluginEntry {
    pub fn to_spec(&self) -> Result<PluginSpec> {
        match self {
            PluginEntry::Kind(kind) => Ok(PluginSpec::from_kind(kind)?),
            PluginEntry::Spec(spec) => Ok(spec.clone()),
        }
    }
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {path:?}"))?;

        if is_json(path) {
            Self::from_json(&content)
        } else {
            Self::from_str(&content)
        }
    }

    /// Parse manifest from TOML text
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Parse manifest from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse manifest")
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        if !self.package.is_empty() && self.package.split('.').any(str::is_empty) {
            anyhow::bail!("Invalid package name: '{}'", self.package);
        }

        if self.service.name.is_empty() {
            anyhow::bail!("Service name cannot be empty");
        }

        let mut shape_names = HashSet::new();
        for shape in &self.shapes {
            if shape.name.is_empty() {
                anyhow::bail!("Shape name cannot be empty");
            }
            if !shape_names.insert(shape.name.as_str()) {
                anyhow::bail!("Shape '{}' is declared more than once", shape.name);
            }
        }

        let mut operation_names = HashSet::new();
        for operation in &self.operations {
            if operation.name.is_empty() {
                anyhow::bail!("Operation name cannot be empty");
            }
            if !operation_names.insert(operation.name.as_str()) {
                anyhow::bail!("Operation '{}' is declared more than once", operation.name);
            }

            for side in [&operation.request, &operation.response] {
                if let Some(shape) = &side.shape
                    && !shape_names.contains(shape.as_str())
                {
                    anyhow::bail!(
                        "Operation '{}' references unknown shape '{}'",
                        operation.name,
                        shape
                    );
                }
            }
        }

        Ok(())
    }

    /// Build the operation descriptors, instantiating every plugin chain
    pub fn operations(&self, settings: &GenerationSettings) -> Result<Vec<OperationDescriptor>> {
        let shapes = self.shapes();

        self.operations
            .iter()
            .map(|operation| {
                let specs = operation
                    .plugins
                    .iter()
                    .map(PluginEntry::to_spec)
                    .collect::<Result<Vec<_>>>()?;
                let chain = PluginChain::from_specs(&specs, settings).with_context(|| {
                    format!("Invalid plugin configuration for operation '{}'", operation.name)
                })?;

                let request = self.message(&operation.request, &shapes)?;
                let response = self.message(&operation.response, &shapes)?;

                Ok(OperationDescriptor::new(
                    operation.name.clone(),
                    request,
                    response,
                    chain,
                ))
            })
            .collect()
    }

    fn shapes(&self) -> HashMap<&str, (Arc<DataShape>, &ShapeDefinition)> {
        self.shapes
            .iter()
            .map(|definition| {
                let app_name = definition
                    .app_name
                    .clone()
                    .unwrap_or_else(|| self.service.app_name.clone());
                let shape = DataShape {
                    name: definition.name.clone(),
                    app_name,
                    message_list_attr: definition.message_list_attr.clone(),
                };
                (definition.name.as_str(), (Arc::new(shape), definition))
            })
            .collect()
    }

    fn message(
        &self,
        definition: &MessageDefinition,
        shapes: &HashMap<&str, (Arc<DataShape>, &ShapeDefinition)>,
    ) -> Result<OperationMessage> {
        let mut message = match &definition.shape {
            Some(name) => {
                let (shape, shape_definition) = shapes
                    .get(name.as_str())
                    .with_context(|| format!("Unknown shape '{name}'"))?;
                let mut message =
                    OperationMessage::from_shape(Arc::clone(shape), to_fields(&shape_definition.fields)?);
                message.comments = shape_definition.comments.clone();
                message
            }
            None => OperationMessage::empty(),
        };

        message.fields.extend(to_fields(&definition.fields)?);
        if let Some(name) = &definition.name {
            message = message.with_name(name.as_str());
        }
        if let Some(comments) = &definition.comments {
            message = message.with_comments(comments.as_str());
        }

        Ok(message)
    }
}

fn to_fields(records: &[FieldRecord]) -> Result<Vec<FieldDescriptor>> {
    records
        .iter()
        .map(|record| {
            FieldDescriptor::from_record(record.clone())
                .with_context(|| format!("Invalid field '{}'", record.name))
        })
        .collect()
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}

/// Load generation settings, falling back to defaults when no path is given
pub fn load_settings(path: Option<&str>) -> Result<GenerationSettings> {
    let Some(path) = path else {
        return Ok(GenerationSettings::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {path:?}"))?;

    let settings = if is_json(Path::new(path)) {
        GenerationSettings::from_json(content.as_bytes())?
    } else {
        GenerationSettings::from_toml(&content)?
    };
    Ok(settings)
}

/// Check command implementation
pub fn check(manifest_path: &str, settings_path: Option<&str>) -> Result<()> {
    println!("Checking manifest: {}", manifest_path);

    let manifest = Manifest::from_file(manifest_path)?;
    manifest.validate()?;

    let settings = load_settings(settings_path)?;
    let operations = manifest.operations(&settings)?;

    println!("✓ Service: {}", manifest.service.name);
    println!("✓ Shapes: {}", manifest.shapes.len());
    for operation in &operations {
        println!(
            "✓ Operation {}: [{}]",
            operation.name,
            operation.chain.plugin_names().join(", ")
        );
    }
    println!("\nManifest is valid!");

    Ok(())
}
