use mtango::attribute::DeviceAttribute;

use serde_json::Value;

use crate::error::Result;
use crate::request::{Operation, RequestDescriptor, query_value};

use super::{Dialect, ListFailurePolicy, RawAttributeValue, decode_raw_values, device_path};

// Query key used to select attributes on batched endpoints.
const ATTRIBUTE_KEY: &str = "attr";

/// The multi-host `rc4` dialect.
///
/// Requests address a specific control-system instance through its database
/// host and port. Attribute values and configurations of several attributes
/// are fetched through a single collection endpoint filtered by repeated
/// `attr` query parameters, and attribute values carry a millisecond
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rc4 {
    host: String,
    port: u16,
}

impl Rc4 {
    /// Creates a [`Rc4`] dialect addressing the control system whose
    /// database runs at the given host and port.
    #[must_use]
    #[inline]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the database host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the database port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    fn join_attributes(request: RequestDescriptor, attributes: &[&str]) -> RequestDescriptor {
        attributes.iter().fold(request, |request, attribute| {
            request.query(ATTRIBUTE_KEY, *attribute)
        })
    }

    // All written values travel as `name=value` pairs of a single request.
    fn write_request(device: &str, attributes: &[DeviceAttribute]) -> RequestDescriptor {
        attributes.iter().fold(
            RequestDescriptor::put(format!("{}/attributes/value", device_path(device))),
            |request, attribute| {
                request.query(attribute.name.as_str(), query_value(&attribute.value))
            },
        )
    }
}

impl Dialect for Rc4 {
    fn version(&self) -> &'static str {
        "rc4"
    }

    fn endpoint(&self, base: &str) -> String {
        format!("{base}/hosts/{}/{}", self.host, self.port)
    }

    fn include_credentials(&self) -> bool {
        true
    }

    fn requests(&self, operation: &Operation<'_>) -> Result<Vec<RequestDescriptor>> {
        let request = match *operation {
            Operation::DeviceState { device } => {
                RequestDescriptor::get(format!("{}/state", device_path(device)))
            }
            Operation::DeviceInfo { device } => RequestDescriptor::get(device_path(device)),
            Operation::DeviceList => RequestDescriptor::get("devices"),
            Operation::PropertyList { device } => {
                RequestDescriptor::get(format!("{}/properties", device_path(device)))
            }
            Operation::DeleteProperty { device, property } => RequestDescriptor::delete(format!(
                "{}/properties/{property}",
                device_path(device)
            )),
            Operation::AttributeList { device } => {
                RequestDescriptor::get(format!("{}/attributes", device_path(device)))
            }
            Operation::AttributeInfo { device, attributes } => Self::join_attributes(
                RequestDescriptor::get(format!("{}/attributes/info", device_path(device))),
                attributes,
            ),
            Operation::ReadAttributes { device, attributes } => Self::join_attributes(
                RequestDescriptor::get(format!("{}/attributes/value", device_path(device))),
                attributes,
            ),
            Operation::WriteAttributes { device, attributes }
            | Operation::WriteReadAttributes { device, attributes } => {
                if attributes.is_empty() {
                    return Ok(Vec::new());
                }
                Self::write_request(device, attributes)
            }
            Operation::CommandInOut {
                device,
                command,
                input,
            } => {
                let request =
                    RequestDescriptor::put(format!("{}/commands/{command}", device_path(device)));
                match input {
                    Some(input) => request.body(input.clone()),
                    None => request,
                }
            }
            Operation::CommandInfo { device, command } => {
                RequestDescriptor::get(format!("{}/commands/{command}", device_path(device)))
            }
            Operation::CommandList { device } => {
                RequestDescriptor::get(format!("{}/commands", device_path(device)))
            }
        };

        Ok(vec![request])
    }

    fn decode_values(&self, payload: Value) -> Result<Vec<RawAttributeValue>> {
        decode_raw_values(payload)
    }

    fn attribute_list_policy(&self) -> ListFailurePolicy {
        ListFailurePolicy::Empty
    }
}
