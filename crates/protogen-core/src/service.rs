//! Service capabilities read by generation plugins

use serde::{Deserialize, Deserializer, Serialize};

/// Values that can be declared but empty
pub trait CapabilityValue {
    fn is_empty_value(&self) -> bool;
}

impl<T> CapabilityValue for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl CapabilityValue for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// Three-state capability declared by a service
///
/// `Absent` means the service never opted in; `Empty` means it opted in
/// without configuring anything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum Capability<T> {
    #[default]
    Absent,
    Empty,
    Configured(T),
}

impl<T: CapabilityValue> Capability<T> {
    /// Declare a capability, collapsing empty values to [`Capability::Empty`]
    pub fn from_value(value: T) -> Self {
        if value.is_empty_value() {
            Capability::Empty
        } else {
            Capability::Configured(value)
        }
    }
}

impl<T> Capability<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Capability::Absent)
    }

    /// Declared at all, empty or not
    pub fn is_declared(&self) -> bool {
        !self.is_absent()
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Capability::Configured(_))
    }

    pub fn configured(&self) -> Option<&T> {
        match self {
            Capability::Configured(value) => Some(value),
            _ => None,
        }
    }
}

// A missing key is handled by `#[serde(default)]` on the owning field;
// anything that reaches here was declared.
impl<'de, T> Deserialize<'de> for Capability<T>
where
    T: Deserialize<'de> + CapabilityValue,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Capability::from_value(value),
            None => Capability::Empty,
        })
    }
}

/// Read-only view of a service for generation purposes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Service name (e.g. `BookService`)
    pub name: String,

    /// Owning application
    #[serde(default)]
    pub app_name: String,

    #[serde(default)]
    pub filter_backends: Capability<Vec<String>>,

    #[serde(default)]
    pub pagination_class: Capability<String>,
}

impl ServiceDescriptor {
    /// Create a service with no declared capabilities
    pub fn new(name: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            app_name: app_name.into(),
            filter_backends: Capability::Absent,
            pagination_class: Capability::Absent,
        }
    }

    /// Declare the filter backends; an empty list declares the capability without backends
    pub fn with_filter_backends<I, S>(mut self, backends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_backends =
            Capability::from_value(backends.into_iter().map(Into::into).collect());
        self
    }

    /// Declare the pagination class; an empty name declares the capability without a class
    pub fn with_pagination_class(mut self, class: impl Into<String>) -> Self {
        self.pagination_class = Capability::from_value(class.into());
        self
    }
}
