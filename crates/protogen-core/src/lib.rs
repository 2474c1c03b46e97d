//! protogen-core - Plugin-driven protobuf message generation
//!
//! This crate decides the final shape of the request/response messages of an
//! RPC service:
//! - [`FieldDescriptor`] and [`MessageDescriptor`] describe generated messages
//! - [`GenerationPlugin`] is a conditional transformation over a message pair
//! - [`plugins`] holds the built-in field-injection and list-wrapping plugins
//! - [`PluginChain`] threads a pair through plugins in order
//! - [`OperationDescriptor`] and [`generate_service`] drive a whole service
//! - [`render_proto_file`] emits the result as proto3 text
//!
//! # Example
//!
//! ```
//! use protogen_core::prelude::*;
//! use protogen_core::plugins::{FilterGenerationPlugin, ResponseAsListGenerationPlugin};
//!
//! let settings = GenerationSettings {
//!     filter_behavior: FilterAndPaginationBehavior::RequestStructStrict,
//!     ..GenerationSettings::default()
//! };
//! let service = ServiceDescriptor::new("BookService", "library")
//!     .with_filter_backends(["DjangoFilterBackend"]);
//!
//! let chain = PluginChain::new()
//!     .with_plugin(FilterGenerationPlugin::new(&settings))
//!     .with_plugin(ResponseAsListGenerationPlugin::new(&settings));
//!
//! let names = MessageNameConstructor::with_names("BookListRequest", "BookResponse");
//! let request = MessageDescriptor::new("BookListRequest")?;
//! let response = MessageDescriptor::new("BookResponse")?;
//!
//! let (request, response) = chain.run(&service, request, response, &names)?;
//! assert_eq!(request.fields()[0].name(), "_filters");
//! assert_eq!(response.name(), "BookListResponse");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chain;
mod config;
mod error;
mod field;
mod generator;
mod message;
pub mod naming;
mod plugin;
pub mod plugins;
mod render;
mod service;

pub use chain::PluginChain;
pub use config::{FilterAndPaginationBehavior, GenerationSettings, PluginSpec};
pub use error::{
    ConfigurationError, DescriptorError, Error, GenerationError, GenerationResult, Result,
};
pub use field::{Cardinality, FieldDescriptor, FieldRecord, FieldType, STRUCT_TYPE};
pub use generator::{
    GeneratedOperation, GeneratedService, OperationDescriptor, OperationMessage, generate_service,
};
pub use message::{DataShape, MessageDescriptor};
pub use naming::{MessageNameConstructor, NameConstructor};
pub use plugin::GenerationPlugin;
pub use render::{render_message, render_proto_file};
pub use service::{Capability, CapabilityValue, ServiceDescriptor};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Cardinality, FieldDescriptor, FieldType, FilterAndPaginationBehavior, GenerationError,
        GenerationPlugin, GenerationResult, GenerationSettings, MessageDescriptor,
        MessageNameConstructor, NameConstructor, PluginChain, ServiceDescriptor,
    };
}
