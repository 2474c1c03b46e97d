//! proto3 text rendering of generated messages

use crate::field::STRUCT_TYPE;
use crate::{FieldType, GeneratedService, GenerationError, GenerationResult, MessageDescriptor};
use std::collections::BTreeMap;

const INDENT: &str = "    ";
const STRUCT_IMPORT: &str = "google/protobuf/struct.proto";

/// Render a complete `.proto` file for a generated service.
///
/// Every message reachable from the operations is emitted once, sorted by
/// name, nested message types included. Two different messages sharing a
/// name fail the generation.
pub fn render_proto_file(
    package: &str,
    app_name: &str,
    service: &GeneratedService,
) -> GenerationResult<String> {
    let mut messages = BTreeMap::new();
    for operation in &service.operations {
        collect_messages(app_name, &operation.request, &mut messages)?;
        collect_messages(app_name, &operation.response, &mut messages)?;
    }

    let mut out = vec!["syntax = \"proto3\";".to_string(), String::new()];

    if !package.is_empty() {
        out.push(format!("package {package};"));
        out.push(String::new());
    }

    if messages.values().any(|message| uses_struct(message)) {
        out.push(format!("import \"{STRUCT_IMPORT}\";"));
        out.push(String::new());
    }

    out.push(format!("service {} {{", service.name));
    for operation in &service.operations {
        out.push(format!(
            "{INDENT}rpc {}({}) returns ({}) {{}}",
            operation.name,
            operation.request.name(),
            operation.response.name()
        ));
    }
    out.push("}".to_string());

    for message in messages.values() {
        out.push(String::new());
        out.extend(render_message(message));
    }

    out.push(String::new());
    Ok(out.join("\n"))
}

/// Render one message definition, one line per entry
pub fn render_message(message: &MessageDescriptor) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(comments) = message.comments() {
        lines.extend(comments.lines().map(|line| format!("// {line}").trim_end().to_string()));
    }

    lines.push(format!("message {} {{", message.name()));
    for (index, field) in message.fields().iter().enumerate() {
        let label = field
            .cardinality()
            .proto_label()
            .map(|label| format!("{label} "))
            .unwrap_or_default();
        lines.push(format!(
            "{INDENT}{label}{} {} = {};",
            field.field_type().type_name(),
            field.name(),
            index + 1
        ));
    }
    lines.push("}".to_string());

    lines
}

fn collect_messages<'a>(
    app_name: &str,
    message: &'a MessageDescriptor,
    messages: &mut BTreeMap<String, &'a MessageDescriptor>,
) -> GenerationResult<()> {
    if let Some(existing) = messages.get(message.name()) {
        if *existing != message {
            return Err(GenerationError::new(
                app_name,
                message.model_name(),
                format!("conflicting definitions for message {}", message.name()),
            ));
        }
        return Ok(());
    }

    messages.insert(message.name().to_string(), message);

    for field in message.fields() {
        if let FieldType::Message(nested) = field.field_type() {
            collect_messages(app_name, nested, messages)?;
        }
    }
    Ok(())
}

fn uses_struct(message: &MessageDescriptor) -> bool {
    message
        .fields()
        .iter()
        .any(|field| field.field_type().type_name() == STRUCT_TYPE)
}
