//! Built-in generation plugins.
//!
//! Two families are provided:
//!
//! - **Field injection** ([`FieldInjection`]): append one configured field to the
//!   request message. [`FilterGenerationPlugin`] and [`PaginationGenerationPlugin`]
//!   are gated on the service's capabilities and the global behavior settings;
//!   [`AddFieldRequestGenerationPlugin`] always applies.
//! - **List wrapping** ([`ListWrapping`]): replace a message with an enclosing
//!   list message holding it as a repeated field, on the request side
//!   ([`RequestAsListGenerationPlugin`]), the response side
//!   ([`ResponseAsListGenerationPlugin`]) or both
//!   ([`RequestAndResponseAsListGenerationPlugin`]).

mod field_injection;
mod list;

pub use field_injection::{
    AddFieldRequestGenerationPlugin, FieldInjection, FilterGenerationPlugin,
    PaginationGenerationPlugin,
};
pub use list::{
    COUNT_FIELD_NAME, DEFAULT_LIST_FIELD_NAME, ListWrapping,
    RequestAndResponseAsListGenerationPlugin, RequestAsListGenerationPlugin,
    ResponseAsListGenerationPlugin,
};
