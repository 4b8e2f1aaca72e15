use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;
use serde_json::Value;

use crate::tango::{AttrDataFormat, AttrQuality, AttrWriteType, AttributeDataType, DispLevel};

/// A point in time, expressed as the time elapsed since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[cfg_attr(feature = "deserialize", serde(default))]
pub struct TimeVal {
    /// Seconds.
    pub tv_sec: i64,
    /// Microseconds within the current second.
    pub tv_usec: i64,
    /// Nanoseconds within the current microsecond.
    pub tv_nsec: i64,
}

impl TimeVal {
    /// Creates a [`TimeVal`] located at the Unix epoch.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            tv_sec: 0,
            tv_usec: 0,
            tv_nsec: 0,
        }
    }

    /// Creates a [`TimeVal`] from a millisecond timestamp.
    ///
    /// The nanoseconds are always zero since a millisecond timestamp
    /// cannot represent them.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            tv_sec: millis.div_euclid(1000),
            tv_usec: millis.rem_euclid(1000) * 1000,
            tv_nsec: 0,
        }
    }
}

/// An attribute reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct DeviceAttribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value.
    #[cfg_attr(feature = "deserialize", serde(default))]
    pub value: Value,
    /// Reading quality.
    #[cfg_attr(feature = "deserialize", serde(default))]
    pub quality: AttrQuality,
    /// Reading time.
    #[cfg_attr(feature = "deserialize", serde(default))]
    pub time: TimeVal,
}

impl DeviceAttribute {
    /// Creates a valid [`DeviceAttribute`] with the given name and value.
    ///
    /// This is the usual way to describe an attribute to write.
    #[must_use]
    #[inline]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            quality: AttrQuality::Valid,
            time: TimeVal::zero(),
        }
    }

    /// Sets the [`AttrQuality`].
    #[must_use]
    pub fn quality(mut self, quality: AttrQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Sets the [`TimeVal`].
    #[must_use]
    pub fn time(mut self, time: TimeVal) -> Self {
        self.time = time;
        self
    }
}

/// Alarm and warning thresholds of an attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[cfg_attr(feature = "deserialize", serde(default))]
pub struct AttributeAlarm {
    /// Lower alarm threshold.
    pub min_alarm: String,
    /// Upper alarm threshold.
    pub max_alarm: String,
    /// Lower warning threshold.
    pub min_warning: String,
    /// Upper warning threshold.
    pub max_warning: String,
    /// Time window of the read-different-than-set alarm.
    pub delta_t: String,
    /// Value delta of the read-different-than-set alarm.
    pub delta_val: String,
    /// Extensions.
    pub extensions: Vec<String>,
}

/// Change event configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[cfg_attr(feature = "deserialize", serde(default))]
pub struct ChangeEventInfo {
    /// Relative change triggering an event.
    pub rel_change: String,
    /// Absolute change triggering an event.
    pub abs_change: String,
    /// Extensions.
    pub extensions: Vec<String>,
}

/// Periodic event configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[cfg_attr(feature = "deserialize", serde(default))]
pub struct PeriodicEventInfo {
    /// Event period.
    pub period: String,
    /// Extensions.
    pub extensions: Vec<String>,
}

/// Archive event configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[cfg_attr(feature = "deserialize", serde(default))]
pub struct ArchiveEventInfo {
    /// Relative change triggering an event.
    pub rel_change: String,
    /// Absolute change triggering an event.
    pub abs_change: String,
    /// Event period.
    pub period: String,
    /// Extensions.
    pub extensions: Vec<String>,
}

/// Event configuration of an attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[cfg_attr(feature = "deserialize", serde(default))]
pub struct EventProperties {
    /// Change events.
    pub ch_event: ChangeEventInfo,
    /// Periodic events.
    pub per_event: PeriodicEventInfo,
    /// Archive events.
    pub arch_event: ArchiveEventInfo,
}

/// Attribute configuration.
///
/// The enumerated fields are [`None`] when the server does not provide them.
/// An unrecognised data type is represented by [`AttributeDataType::NoData`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[cfg_attr(feature = "deserialize", serde(default))]
pub struct AttributeInfo {
    /// Attribute name.
    pub name: String,
    /// Access kind.
    pub writable: Option<AttrWriteType>,
    /// Value shape.
    pub data_format: Option<AttrDataFormat>,
    /// Data type.
    pub data_type: AttributeDataType,
    /// Maximum length of the first dimension.
    pub max_dim_x: i64,
    /// Maximum length of the second dimension.
    pub max_dim_y: i64,
    /// Description.
    pub description: String,
    /// Label.
    pub label: String,
    /// Unit.
    pub unit: String,
    /// Standard unit.
    pub standard_unit: String,
    /// Display unit.
    pub display_unit: String,
    /// Display format.
    pub format: String,
    /// Minimum value.
    pub min_value: String,
    /// Maximum value.
    pub max_value: String,
    /// Lower alarm threshold.
    pub min_alarm: String,
    /// Upper alarm threshold.
    pub max_alarm: String,
    /// Name of the associated write attribute.
    pub writable_attr_name: String,
    /// Display level.
    pub level: Option<DispLevel>,
    /// Extensions.
    pub extensions: Vec<String>,
    /// Alarm thresholds.
    pub alarms: AttributeAlarm,
    /// Event configuration.
    pub events: EventProperties,
    /// System extensions.
    pub sys_extensions: Vec<String>,
    /// Name of the root attribute for forwarded attributes.
    pub root_attr_name: String,
    /// Labels of an enumerated attribute.
    pub enum_label: Vec<String>,
}
