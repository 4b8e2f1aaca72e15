use alloc::string::String;

use serde::Serialize;
use serde_json::Value;

use crate::tango::DispLevel;

/// Command description.
///
/// Argument types are kept exactly as the server describes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[cfg_attr(feature = "deserialize", serde(default))]
pub struct CommandInfo {
    /// Command name.
    pub cmd_name: String,
    /// Command tag.
    pub cmd_tag: i64,
    /// Display level, if known.
    pub level: Option<DispLevel>,
    /// Input argument type.
    pub in_type: Value,
    /// Output argument type.
    pub out_type: Value,
    /// Input argument description.
    pub in_type_desc: String,
    /// Output argument description.
    pub out_type_desc: String,
}
