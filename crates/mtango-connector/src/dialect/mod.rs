mod rc2;
mod rc4;

pub use rc2::Rc2;
pub use rc4::Rc4;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::request::{Operation, RequestDescriptor};

/// The policy applied when the attribute list of a device cannot be
/// retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFailurePolicy {
    /// The failure is returned to the caller.
    Propagate,
    /// The failure is logged and an empty list is returned.
    Empty,
}

/// An attribute value as described by a dialect, before its conversion into
/// a [`mtango::attribute::DeviceAttribute`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAttributeValue {
    /// Attribute name.
    pub name: String,
    /// Attribute value.
    #[serde(default)]
    pub value: Value,
    /// Quality name.
    #[serde(default)]
    pub quality: Option<String>,
    /// Millisecond timestamp since the Unix epoch.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// A REST dialect of the remote server.
///
/// A dialect never performs I/O: it only shapes requests and parses
/// already-fetched JSON payloads.
pub trait Dialect: std::fmt::Debug + Send + Sync {
    /// Dialect version, as it appears in the REST API path.
    fn version(&self) -> &'static str;

    /// Folds the dialect addressing into the base endpoint.
    fn endpoint(&self, base: &str) -> String {
        base.to_string()
    }

    /// Whether requests must include ambient credentials.
    fn include_credentials(&self) -> bool {
        false
    }

    /// Translates an [`Operation`] into one or more
    /// [`RequestDescriptor`]s.
    ///
    /// # Errors
    ///
    /// An [`crate::error::ErrorKind::NotImplemented`] error is returned when
    /// the dialect has no equivalent for the operation.
    fn requests(&self, operation: &Operation<'_>) -> Result<Vec<RequestDescriptor>>;

    /// Decodes an attribute value payload.
    ///
    /// # Errors
    ///
    /// An error is returned when the payload does not describe attribute
    /// values.
    fn decode_values(&self, payload: Value) -> Result<Vec<RawAttributeValue>>;

    /// Decodes an attribute configuration payload into raw records.
    ///
    /// # Errors
    ///
    /// An error is returned when the payload does not describe attribute
    /// configurations.
    fn decode_infos(&self, payload: Value) -> Result<Vec<Value>> {
        Ok(batch(payload))
    }

    /// Returns the [`ListFailurePolicy`] adopted by the dialect for
    /// attribute lists.
    fn attribute_list_policy(&self) -> ListFailurePolicy {
        ListFailurePolicy::Propagate
    }
}

/// Splits a payload answering either for a single resource or for a batch of
/// resources.
#[must_use]
pub fn batch(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        item => vec![item],
    }
}

pub(crate) fn decode_raw_values(payload: Value) -> Result<Vec<RawAttributeValue>> {
    batch(payload)
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(Into::into))
        .collect()
}

pub(crate) fn device_path(device: &str) -> String {
    format!("devices/{device}")
}
