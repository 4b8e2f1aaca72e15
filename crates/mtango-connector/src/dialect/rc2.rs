use serde_json::Value;

use crate::error::{Error, Result};
use crate::request::{Operation, RequestDescriptor, query_value};

use super::{Dialect, RawAttributeValue, decode_raw_values, device_path};

/// The single-host `rc2` dialect.
///
/// Every attribute is addressed by its own path segment, hence batched
/// operations produce one request per attribute. Attribute values carry no
/// timestamp, and the dialect exposes neither a properties collection nor a
/// write endpoint echoing the written values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rc2;

impl Rc2 {
    /// Creates a [`Rc2`] dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn attribute_path(device: &str, attribute: &str) -> String {
    format!("{}/attributes/{attribute}", device_path(device))
}

impl Dialect for Rc2 {
    fn version(&self) -> &'static str {
        "rc2"
    }

    fn requests(&self, operation: &Operation<'_>) -> Result<Vec<RequestDescriptor>> {
        let requests = match *operation {
            Operation::DeviceState { device } => {
                vec![RequestDescriptor::get(format!("{}/state", device_path(device)))]
            }
            Operation::DeviceInfo { device } => vec![RequestDescriptor::get(device_path(device))],
            Operation::DeviceList => vec![RequestDescriptor::get("devices")],
            Operation::PropertyList { .. }
            | Operation::DeleteProperty { .. }
            | Operation::WriteReadAttributes { .. } => {
                return Err(Error::not_implemented(operation.name()));
            }
            Operation::AttributeList { device } => vec![RequestDescriptor::get(format!(
                "{}/attributes",
                device_path(device)
            ))],
            Operation::AttributeInfo { device, attributes } => attributes
                .iter()
                .map(|attribute| {
                    RequestDescriptor::get(format!("{}/info", attribute_path(device, attribute)))
                })
                .collect(),
            Operation::ReadAttributes { device, attributes } => attributes
                .iter()
                .map(|attribute| {
                    RequestDescriptor::get(format!("{}/value", attribute_path(device, attribute)))
                })
                .collect(),
            Operation::WriteAttributes { device, attributes } => attributes
                .iter()
                .map(|attribute| {
                    RequestDescriptor::put(attribute_path(device, &attribute.name))
                        .query("value", query_value(&attribute.value))
                })
                .collect(),
            Operation::CommandInOut {
                device,
                command,
                input,
            } => {
                let request =
                    RequestDescriptor::put(format!("{}/commands/{command}", device_path(device)));
                vec![match input {
                    Some(input) => request.query("input", query_value(input)),
                    None => request,
                }]
            }
            Operation::CommandInfo { device, command } => vec![RequestDescriptor::get(format!(
                "{}/commands/{command}",
                device_path(device)
            ))],
            Operation::CommandList { device } => vec![RequestDescriptor::get(format!(
                "{}/commands",
                device_path(device)
            ))],
        };

        Ok(requests)
    }

    fn decode_values(&self, payload: Value) -> Result<Vec<RawAttributeValue>> {
        let mut values = decode_raw_values(payload)?;
        // Timestamps are not part of this dialect.
        for value in &mut values {
            value.timestamp = None;
        }
        Ok(values)
    }
}
