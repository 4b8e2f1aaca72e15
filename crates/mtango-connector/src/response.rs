use mtango::attribute::{AttributeAlarm, AttributeInfo, DeviceAttribute, EventProperties, TimeVal};
use mtango::command::CommandInfo;
use mtango::device::DeviceInfo;
use mtango::tango::{
    AttrDataFormat, AttrQuality, AttrWriteType, AttributeDataType, DevState, DispLevel, TangoEnum,
};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::dialect::{RawAttributeValue, batch};
use crate::error::{Error, Result};

// Device names reserved to device servers administration.
pub(crate) const ADMINISTRATIVE_PREFIX: &str = "dserver";

// Server data type names and the attribute data types they denote.
const DATA_TYPES: &[(&str, AttributeDataType)] = &[
    ("DevBoolean", AttributeDataType::Bool),
    ("DevShort", AttributeDataType::Short),
    ("DevLong", AttributeDataType::Long),
    ("DevLong64", AttributeDataType::Long64),
    ("DevFloat", AttributeDataType::Float),
    ("DevDouble", AttributeDataType::Double),
    ("DevUChar", AttributeDataType::UChar),
    ("DevUShort", AttributeDataType::UShort),
    ("DevULong", AttributeDataType::ULong),
    ("DevULong64", AttributeDataType::ULong64),
    ("DevString", AttributeDataType::String),
    ("DevState", AttributeDataType::State),
    ("DevEncoded", AttributeDataType::Encoded),
];

fn object(payload: Value, what: &str) -> Result<Map<String, Value>> {
    match payload {
        Value::Object(record) => Ok(record),
        other => Err(Error::decode(format!(
            "Expected {what} to be an object, found `{other}`"
        ))),
    }
}

fn record<T: DeserializeOwned>(payload: Value, what: &str) -> Result<T> {
    serde_json::from_value(payload)
        .map_err(|e| Error::decode(format!("Invalid {what}: {e}")))
}

/// Resolves an enumeration member from a name or a code.
///
/// Absent and `null` values resolve to [`None`], unknown members are
/// decoding errors.
pub(crate) fn resolve<E: TangoEnum>(value: Option<&Value>) -> Result<Option<E>> {
    let resolved = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(name)) => E::from_name(name),
        Some(Value::Number(code)) => code.as_i64().and_then(E::from_code),
        Some(_) => None,
    };

    resolved.map(Some).ok_or_else(|| {
        Error::decode(format!(
            "Unknown `{}` member `{}`",
            E::ENUMERATION,
            value.unwrap_or(&Value::Null)
        ))
    })
}

/// Maps a server data type onto an [`AttributeDataType`].
///
/// Unrecognised data types map onto [`AttributeDataType::NoData`].
pub(crate) fn data_type(value: &Value) -> AttributeDataType {
    let data_type = match value {
        Value::String(name) => DATA_TYPES
            .iter()
            .find(|(type_name, _)| type_name == name)
            .map(|(_, data_type)| *data_type)
            .or_else(|| AttributeDataType::from_name(name)),
        Value::Number(code) => code.as_i64().and_then(AttributeDataType::from_code),
        _ => None,
    };

    data_type.unwrap_or(AttributeDataType::NoData)
}

// Takes the first non-null sub-record stored under one of the given keys.
fn sub_record<T: DeserializeOwned + Default>(
    fields: &mut Map<String, Value>,
    keys: &[&str],
) -> Result<T> {
    let mut found = None;
    for key in keys {
        match fields.remove(*key) {
            Some(Value::Null) | None => {}
            Some(value) => {
                if found.is_none() {
                    found = Some((*key, value));
                }
            }
        }
    }

    match found {
        Some((key, value)) => record(value, key),
        None => Ok(T::default()),
    }
}

/// Extracts the status of a device from its state resource.
pub(crate) fn device_status(payload: Value) -> Result<String> {
    let mut state = object(payload, "device state")?;
    match state.remove("status") {
        Some(Value::String(status)) => Ok(status),
        _ => Err(Error::decode("Missing device status")),
    }
}

/// Extracts the [`DevState`] of a device from its state resource.
pub(crate) fn device_state(payload: Value) -> Result<DevState> {
    let state = object(payload, "device state")?;
    resolve::<DevState>(state.get("state"))?.ok_or_else(|| Error::decode("Missing device state"))
}

/// Extracts the [`DeviceInfo`] from a device resource.
pub(crate) fn device_info(payload: Value) -> Result<DeviceInfo> {
    let mut device = object(payload, "device")?;
    match device.remove("info") {
        Some(info @ Value::Object(_)) => record(info, "device info"),
        _ => Err(Error::decode("Missing device info")),
    }
}

/// Extracts the `name` field of every element of a collection.
pub(crate) fn names(payload: Value) -> Result<Vec<String>> {
    let Value::Array(items) = payload else {
        return Err(Error::decode("Expected a collection"));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(mut item) => match item.remove("name") {
                Some(Value::String(name)) => Ok(name),
                _ => Err(Error::decode("Missing collection element name")),
            },
            _ => Err(Error::decode("Expected a collection of objects")),
        })
        .collect()
}

/// Extracts the device names from the device collection, excluding
/// the administrative devices.
pub(crate) fn public_names(payload: Value) -> Result<Vec<String>> {
    Ok(names(payload)?
        .into_iter()
        .filter(|name| !name.starts_with(ADMINISTRATIVE_PREFIX))
        .collect())
}

/// Converts a [`RawAttributeValue`] into a [`DeviceAttribute`].
///
/// A missing quality resolves to [`AttrQuality::Invalid`], a missing
/// timestamp to [`TimeVal::zero`].
pub(crate) fn attribute_value(raw: RawAttributeValue) -> Result<DeviceAttribute> {
    let quality = match raw.quality {
        Some(quality) => AttrQuality::from_name(&quality).ok_or_else(|| {
            Error::decode(format!(
                "Unknown `{}` member `{quality}`",
                AttrQuality::ENUMERATION
            ))
        })?,
        None => AttrQuality::Invalid,
    };

    let time = raw.timestamp.map_or(TimeVal::zero(), TimeVal::from_millis);

    Ok(DeviceAttribute {
        name: raw.name,
        value: raw.value,
        quality,
        time,
    })
}

/// Converts a raw attribute configuration into an [`AttributeInfo`].
pub(crate) fn attribute_info(payload: Value) -> Result<AttributeInfo> {
    let mut info = object(payload, "attribute info")?;

    let writable = resolve::<AttrWriteType>(info.get("writable"))?;
    let data_format = resolve::<AttrDataFormat>(info.get("data_format"))?;
    let level = resolve::<DispLevel>(info.get("level"))?;
    let data_type = info.get("data_type").map_or(AttributeDataType::NoData, data_type);
    let alarms = sub_record::<AttributeAlarm>(&mut info, &["att_alarm", "alarms"])?;
    let events = sub_record::<EventProperties>(&mut info, &["event_prop", "events"])?;

    for key in ["writable", "data_format", "level", "data_type"] {
        let _ = info.remove(key);
    }

    Ok(AttributeInfo {
        writable,
        data_format,
        level,
        data_type,
        alarms,
        events,
        ..record(Value::Object(info), "attribute info")?
    })
}

/// Converts a command resource into a [`CommandInfo`].
pub(crate) fn command_info(payload: Value) -> Result<CommandInfo> {
    let mut command = object(payload, "command")?;
    let mut info = match command.remove("info") {
        Some(Value::Object(info)) => info,
        _ => return Err(Error::decode("Missing command info")),
    };

    let level = resolve::<DispLevel>(info.get("level"))?;
    let _ = info.remove("level");

    Ok(CommandInfo {
        level,
        ..record(Value::Object(info), "command info")?
    })
}

/// Converts a command collection into a list of [`CommandInfo`].
pub(crate) fn command_infos(payload: Value) -> Result<Vec<CommandInfo>> {
    if !payload.is_array() {
        return Err(Error::decode("Expected a collection of commands"));
    }

    batch(payload).into_iter().map(command_info).collect()
}
