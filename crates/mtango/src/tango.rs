use crate::macros::tango_enum;

/// A closed Tango enumeration: a set of named integer codes.
///
/// Remote servers identify enumeration members by name, while the Tango
/// protocol identifies them by code. Both lookups return [`None`] for keys
/// which do not belong to the enumeration.
pub trait TangoEnum: Sized + Copy {
    /// Enumeration name.
    const ENUMERATION: &'static str;

    /// Looks up a member by its wire name.
    fn from_name(name: &str) -> Option<Self>;

    /// Looks up a member by its integer code.
    fn from_code(code: i64) -> Option<Self>;
}

#[cfg(feature = "deserialize")]
pub(crate) struct EnumVisitor<T>(core::marker::PhantomData<T>);

#[cfg(feature = "deserialize")]
impl<T> EnumVisitor<T> {
    pub(crate) const fn new() -> Self {
        Self(core::marker::PhantomData)
    }
}

#[cfg(feature = "deserialize")]
impl<T: TangoEnum> serde::de::Visitor<'_> for EnumVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "a `{}` name or code", T::ENUMERATION)
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<T, E> {
        T::from_name(v).ok_or_else(|| {
            E::custom(format_args!("unknown `{}` member `{v}`", T::ENUMERATION))
        })
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<T, E> {
        T::from_code(v)
            .ok_or_else(|| E::custom(format_args!("unknown `{}` code {v}", T::ENUMERATION)))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<T, E> {
        i64::try_from(v)
            .ok()
            .and_then(T::from_code)
            .ok_or_else(|| E::custom(format_args!("unknown `{}` code {v}", T::ENUMERATION)))
    }
}

tango_enum! {
    /// Device state.
    pub enum DevState {
        /// The device is switched on.
        On => ("ON", 0),
        /// The device is switched off.
        Off => ("OFF", 1),
        /// The device is closed.
        Close => ("CLOSE", 2),
        /// The device is open.
        Open => ("OPEN", 3),
        /// The device is inserted.
        Insert => ("INSERT", 4),
        /// The device is extracted.
        Extract => ("EXTRACT", 5),
        /// The device is moving.
        Moving => ("MOVING", 6),
        /// The device is in standby.
        Standby => ("STANDBY", 7),
        /// The device is faulty.
        Fault => ("FAULT", 8),
        /// The device is initialising.
        Init => ("INIT", 9),
        /// The device is running.
        Running => ("RUNNING", 10),
        /// The device is in alarm.
        Alarm => ("ALARM", 11),
        /// The device is disabled.
        Disable => ("DISABLE", 12),
        /// The device state is unknown.
        Unknown => ("UNKNOWN", 13),
    }
}

tango_enum! {
    /// Validity marker attached to an attribute reading.
    pub enum AttrQuality {
        /// The value is valid.
        Valid => ("ATTR_VALID", 0),
        /// The value is invalid.
        Invalid => ("ATTR_INVALID", 1),
        /// The value crossed an alarm threshold.
        Alarm => ("ATTR_ALARM", 2),
        /// The value is changing.
        Changing => ("ATTR_CHANGING", 3),
        /// The value crossed a warning threshold.
        Warning => ("ATTR_WARNING", 4),
    }
}

impl Default for AttrQuality {
    // A reading without quality cannot be trusted.
    fn default() -> Self {
        Self::Invalid
    }
}

tango_enum! {
    /// Attribute access kind.
    pub enum AttrWriteType {
        /// Read-only attribute.
        Read => ("READ", 0),
        /// Read attribute associated with a write attribute.
        ReadWithWrite => ("READ_WITH_WRITE", 1),
        /// Write-only attribute.
        Write => ("WRITE", 2),
        /// Read-write attribute.
        ReadWrite => ("READ_WRITE", 3),
        /// Unknown access kind.
        Unknown => ("WT_UNKNOWN", 4),
    }
}

tango_enum! {
    /// Attribute value shape.
    pub enum AttrDataFormat {
        /// A single value.
        Scalar => ("SCALAR", 0),
        /// A one-dimensional array.
        Spectrum => ("SPECTRUM", 1),
        /// A two-dimensional array.
        Image => ("IMAGE", 2),
        /// Unknown shape.
        Unknown => ("FMT_UNKNOWN", 3),
    }
}

tango_enum! {
    /// Display level of attributes and commands.
    pub enum DispLevel {
        /// Visible to operators.
        Operator => ("OPERATOR", 0),
        /// Visible to experts only.
        Expert => ("EXPERT", 1),
        /// Unknown level.
        Unknown => ("DL_UNKNOWN", 2),
    }
}

tango_enum! {
    /// Attribute data type.
    pub enum AttributeDataType {
        /// Boolean.
        Bool => ("ATT_BOOL", 0),
        /// 16-bit signed integer.
        Short => ("ATT_SHORT", 1),
        /// 32-bit signed integer.
        Long => ("ATT_LONG", 2),
        /// 64-bit signed integer.
        Long64 => ("ATT_LONG64", 3),
        /// Single-precision float.
        Float => ("ATT_FLOAT", 4),
        /// Double-precision float.
        Double => ("ATT_DOUBLE", 5),
        /// 8-bit unsigned integer.
        UChar => ("ATT_UCHAR", 6),
        /// 16-bit unsigned integer.
        UShort => ("ATT_USHORT", 7),
        /// 32-bit unsigned integer.
        ULong => ("ATT_ULONG", 8),
        /// 64-bit unsigned integer.
        ULong64 => ("ATT_ULONG64", 9),
        /// String.
        String => ("ATT_STRING", 10),
        /// Device state.
        State => ("ATT_STATE", 11),
        /// Device state of the device itself.
        DeviceState => ("DEVICE_STATE", 12),
        /// Encoded bytes.
        Encoded => ("ATT_ENCODED", 13),
        /// No data.
        NoData => ("ATT_NO_DATA", 14),
        /// Unknown data type.
        Unknown => ("DATA_TYPE_UNKNOWN", 15),
    }
}

impl Default for AttributeDataType {
    fn default() -> Self {
        Self::NoData
    }
}
