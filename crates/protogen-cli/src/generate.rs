//! Proto generation from a service manifest

use crate::manifest::{Manifest, load_settings};
use anyhow::{Context, Result};
use protogen_core::{GenerationSettings, generate_service, render_proto_file};
use tracing::info;

/// Generate command implementation
pub fn run(manifest_path: &str, settings_path: Option<&str>) -> Result<()> {
    let manifest = Manifest::from_file(manifest_path)?;
    let settings = load_settings(settings_path)?;

    let proto = generate(&manifest, &settings)?;
    print!("{proto}");

    Ok(())
}

/// Render the `.proto` text of a manifest
pub fn generate(manifest: &Manifest, settings: &GenerationSettings) -> Result<String> {
    manifest.validate()?;

    let operations = manifest.operations(settings)?;
    let generated = generate_service(&manifest.service, &operations)?;

    info!(
        service = %manifest.service.name,
        operations = generated.operations.len(),
        "generated service messages"
    );

    render_proto_file(&manifest.package, &manifest.service.app_name, &generated)
        .with_context(|| format!("Failed to render service {}", manifest.service.name))
}
