//! The data types exchanged between a Tango device-control connector and its
//! callers.
//!
//! This crate provides:
//!
//! - The closed Tango enumerations, such as device states, attribute
//!   qualities and display levels. Each one is a set of named integer codes
//!   which can be looked up either by the name sent over the wire or by its
//!   numeric code.
//! - The value objects describing a device, its attributes and its commands.
//!   Every value object can be built from a loosely shaped JSON record: keys
//!   missing from the record take their default values.
//!
//! All value objects are created fresh for each call and owned by the caller.
//! A caller can avoid importing deserialization functions by disabling the
//! `deserialize` feature at compile time.
//!
//! This crate can be compiled for both `std` and `no_std` environments.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![no_std]

extern crate alloc;

mod macros;

/// Attribute descriptions and values.
pub mod attribute;
/// Command descriptions.
pub mod command;
/// Device descriptions and properties.
pub mod device;
/// Tango enumerations.
pub mod tango;

#[cfg(test)]
#[cfg(feature = "deserialize")]
pub(crate) fn serialize<T: serde::Serialize>(value: T) -> serde_json::Value {
    serde_json::to_value(value).unwrap()
}

#[cfg(test)]
#[cfg(feature = "deserialize")]
pub(crate) fn deserialize<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}
