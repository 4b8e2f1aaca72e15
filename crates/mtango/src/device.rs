use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

/// Device description as exported by the Tango database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[cfg_attr(feature = "deserialize", serde(default))]
pub struct DeviceInfo {
    /// Device name, in the `domain/family/member` form.
    pub name: String,
    /// CORBA object reference.
    pub ior: String,
    /// IDL version implemented by the device.
    pub version: String,
    /// Whether the device is exported.
    pub exported: bool,
    /// Process identifier of the device server.
    pub pid: i64,
    /// Device server name.
    pub server: String,
    /// Host running the device server.
    pub hostname: String,
    /// Device class name.
    pub classname: String,
    /// Whether the device is a `TACO` device.
    pub is_taco: bool,
    /// Last export date.
    pub last_exported: String,
    /// Last unexport date.
    pub last_unexported: String,
}

/// A named device property and its values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct DbDatum {
    /// Property name.
    pub name: String,
    /// Property values.
    #[cfg_attr(feature = "deserialize", serde(default))]
    pub values: Vec<String>,
}

impl DbDatum {
    /// Creates a [`DbDatum`] without values.
    #[must_use]
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Adds values to a [`DbDatum`].
    #[must_use]
    #[inline]
    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }
}

impl AsRef<str> for DbDatum {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
