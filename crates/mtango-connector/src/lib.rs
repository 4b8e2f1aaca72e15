//! The `mtango-connector` library crate drives the devices of a Tango
//! control system through the mTango REST API.
//!
//! The remote server speaks one of several REST dialects, which differ in
//! how resources are addressed and in how several attributes are batched
//! into a request. The connector hides these differences behind a single
//! call surface:
//!
//! - A [`dialect::Dialect`] translates a logical operation into HTTP request
//!   descriptors and decodes the returned JSON payloads
//! - A [`transport::Transport`] performs the HTTP exchanges
//! - A [`connector::Connector`] issues the requests, concurrently when an
//!   operation fans out, classifies the failures and returns `mtango`
//!   domain objects
//!
//! Two dialects are supported: the single-host [`dialect::Rc2`] and the
//! multi-host [`dialect::Rc4`].
//!
//! The crate performs no logging configuration: diagnostics are emitted
//! through `tracing` and collected by the subscriber installed by the
//! application.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// A connector for interacting with Tango devices.
pub mod connector;
/// REST dialects of the remote server.
pub mod dialect;
/// Error management.
pub mod error;
/// Logical operations and HTTP request descriptors.
pub mod request;
/// Transports performing the HTTP exchanges.
pub mod transport;

mod response;

#[cfg(test)]
mod tests;
