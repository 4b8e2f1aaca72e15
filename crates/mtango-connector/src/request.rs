use mtango::attribute::DeviceAttribute;

use reqwest::{Method, Url};

use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};

/// A logical operation performed on a device.
///
/// A [`crate::dialect::Dialect`] translates an operation into the HTTP
/// requests understood by the remote server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation<'a> {
    /// Retrieves the state and the status of a device.
    DeviceState {
        /// Device name.
        device: &'a str,
    },
    /// Retrieves the description of a device.
    DeviceInfo {
        /// Device name.
        device: &'a str,
    },
    /// Retrieves all devices.
    DeviceList,
    /// Retrieves the properties of a device.
    PropertyList {
        /// Device name.
        device: &'a str,
    },
    /// Deletes a device property.
    DeleteProperty {
        /// Device name.
        device: &'a str,
        /// Property name.
        property: &'a str,
    },
    /// Retrieves the attributes of a device.
    AttributeList {
        /// Device name.
        device: &'a str,
    },
    /// Retrieves the configuration of some device attributes.
    AttributeInfo {
        /// Device name.
        device: &'a str,
        /// Attribute names.
        attributes: &'a [&'a str],
    },
    /// Reads some device attributes.
    ReadAttributes {
        /// Device name.
        device: &'a str,
        /// Attribute names.
        attributes: &'a [&'a str],
    },
    /// Writes some device attributes.
    WriteAttributes {
        /// Device name.
        device: &'a str,
        /// Attributes to write.
        attributes: &'a [DeviceAttribute],
    },
    /// Writes some device attributes and reads back their new values.
    WriteReadAttributes {
        /// Device name.
        device: &'a str,
        /// Attributes to write.
        attributes: &'a [DeviceAttribute],
    },
    /// Executes a device command.
    CommandInOut {
        /// Device name.
        device: &'a str,
        /// Command name.
        command: &'a str,
        /// Command input.
        input: Option<&'a Value>,
    },
    /// Retrieves the description of a device command.
    CommandInfo {
        /// Device name.
        device: &'a str,
        /// Command name.
        command: &'a str,
    },
    /// Retrieves the descriptions of all device commands.
    CommandList {
        /// Device name.
        device: &'a str,
    },
}

impl Operation<'_> {
    /// Returns the name of the connector operation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DeviceState { .. } => "get_device_state",
            Self::DeviceInfo { .. } => "get_device_info",
            Self::DeviceList => "get_device_list",
            Self::PropertyList { .. } => "get_device_property_list",
            Self::DeleteProperty { .. } => "delete_device_property",
            Self::AttributeList { .. } => "get_device_attribute_list",
            Self::AttributeInfo { .. } => "get_device_attribute_info",
            Self::ReadAttributes { .. } => "read_device_attribute",
            Self::WriteAttributes { .. } => "write_device_attribute",
            Self::WriteReadAttributes { .. } => "write_read_device_attribute",
            Self::CommandInOut { .. } => "device_command_inout",
            Self::CommandInfo { .. } => "device_command_query",
            Self::CommandList { .. } => "device_command_list_query",
        }
    }
}

/// An HTTP request descriptor.
///
/// The query pairs are serialized in insertion order and joined by `&`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Resource path, relative to the connector endpoint.
    pub path: String,
    /// Query pairs.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Creates a `GET` [`RequestDescriptor`].
    #[must_use]
    #[inline]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a `PUT` [`RequestDescriptor`].
    #[must_use]
    #[inline]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a `DELETE` [`RequestDescriptor`].
    #[must_use]
    #[inline]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends a query pair.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the request [`Url`] as `{endpoint}/{path}[?query]`.
    ///
    /// # Errors
    ///
    /// An error is returned when the endpoint and the path do not form a
    /// valid URL.
    pub fn url(&self, endpoint: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{endpoint}/{}", self.path)).map_err(|e| {
            Error::new(
                ErrorKind::Configuration,
                format!("Invalid request URL for `{}`: {e}", self.path),
            )
        })?;

        if !self.query.is_empty() {
            let _ = url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }
}

/// Converts a JSON value into its query string representation.
///
/// Strings are sent verbatim, without quotes. Arrays are flattened into
/// their elements separated by `,`, where `null` elements are empty.
#[must_use]
pub fn query_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => query_value(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        value => value.to_string(),
    }
}
