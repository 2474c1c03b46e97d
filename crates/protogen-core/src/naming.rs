//! Message naming conventions.
//!
//! Request and response messages of an operation follow a fixed suffix
//! convention:
//!
//! | Side | Suffix | Example |
//! |------|--------|---------|
//! | request | [`REQUEST_SUFFIX`] | `BookRequest` |
//! | response | [`RESPONSE_SUFFIX`] | `BookResponse` |
//! | list request | [`LIST_SUFFIX`] + [`REQUEST_SUFFIX`] | `BookListRequest` |

/// Suffix of every request message name
pub const REQUEST_SUFFIX: &str = "Request";

/// Suffix of every response message name
pub const RESPONSE_SUFFIX: &str = "Response";

/// Marker inserted before the side suffix for list messages
pub const LIST_SUFFIX: &str = "List";

const SHAPE_SUFFIXES: [&str; 2] = ["ProtoSerializer", "Serializer"];
const SERVICE_SUFFIX: &str = "Service";

/// Canonical names for the messages of the current operation
pub trait NameConstructor {
    fn request_constructed_name(&self) -> &str;

    fn response_constructed_name(&self) -> &str;
}

/// Default [`NameConstructor`] holding precomputed names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageNameConstructor {
    request_name: String,
    response_name: String,
}

impl MessageNameConstructor {
    /// Use explicit names
    pub fn with_names(request_name: impl Into<String>, response_name: impl Into<String>) -> Self {
        Self {
            request_name: request_name.into(),
            response_name: response_name.into(),
        }
    }

    /// Derive names for an operation of a service
    ///
    /// Each side is named after its data shape when it has one, otherwise after
    /// the service and the action.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::{MessageNameConstructor, NameConstructor};
    ///
    /// let names = MessageNameConstructor::for_operation(
    ///     "BookService",
    ///     "Retrieve",
    ///     None,
    ///     Some("BookProtoSerializer"),
    /// );
    /// assert_eq!(names.request_constructed_name(), "BookRetrieveRequest");
    /// assert_eq!(names.response_constructed_name(), "BookResponse");
    /// ```
    pub fn for_operation(
        service_name: &str,
        action: &str,
        request_shape: Option<&str>,
        response_shape: Option<&str>,
    ) -> Self {
        let base = |shape: Option<&str>| match shape {
            Some(shape) => shape_stem(shape).to_string(),
            None => format!("{}{}", strip_suffix(service_name, SERVICE_SUFFIX), action),
        };

        Self {
            request_name: format!("{}{}", base(request_shape), REQUEST_SUFFIX),
            response_name: format!("{}{}", base(response_shape), RESPONSE_SUFFIX),
        }
    }
}

impl NameConstructor for MessageNameConstructor {
    fn request_constructed_name(&self) -> &str {
        &self.request_name
    }

    fn response_constructed_name(&self) -> &str {
        &self.response_name
    }
}

/// Derive the list variant of a constructed message name.
///
/// A trailing `suffix` is stripped, `List` is appended unless already
/// present, then `suffix` is reattached. Applying it twice changes nothing.
///
/// # Examples
///
/// ```
/// use protogen_core::naming::{REQUEST_SUFFIX, list_message_name};
///
/// assert_eq!(list_message_name("Order", REQUEST_SUFFIX), "OrderListRequest");
/// assert_eq!(list_message_name("OrderRequest", REQUEST_SUFFIX), "OrderListRequest");
/// assert_eq!(list_message_name("OrderList", REQUEST_SUFFIX), "OrderListRequest");
/// ```
pub fn list_message_name(constructed_name: &str, suffix: &str) -> String {
    let stem = strip_suffix(constructed_name, suffix);
    if stem.ends_with(LIST_SUFFIX) {
        format!("{stem}{suffix}")
    } else {
        format!("{stem}{LIST_SUFFIX}{suffix}")
    }
}

// A shape named only `Serializer` keeps its full name.
fn shape_stem(shape: &str) -> &str {
    SHAPE_SUFFIXES
        .iter()
        .find_map(|suffix| shape.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(shape)
}

fn strip_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    name.strip_suffix(suffix).unwrap_or(name)
}
