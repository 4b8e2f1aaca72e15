use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use futures_util::future::{join_all, try_join_all};

use mtango::attribute::{AttributeInfo, DeviceAttribute};
use mtango::command::CommandInfo;
use mtango::device::{DbDatum, DeviceInfo};
use mtango::tango::DevState;

use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use serde_json::Value;

use tracing::{debug, error, warn};

use crate::dialect::{Dialect, ListFailurePolicy, Rc2, Rc4};
use crate::error::{Error, ErrorKind, Result};
use crate::request::{Operation, RequestDescriptor};
use crate::response;
use crate::transport::{HttpCall, HttpTransport, Transport};

fn configuration_error(info: String) -> Error {
    Error::new(ErrorKind::Configuration, info)
}

fn basic_authorization(username: &str, password: &str) -> Result<HeaderValue> {
    let credentials = STANDARD.encode(format!("{username}:{password}"));
    let mut value = HeaderValue::from_str(&format!("Basic {credentials}"))
        .map_err(|e| configuration_error(format!("Invalid credentials header: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

/// The policy applied when writing several attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Every write is awaited, failed writes are logged and the write call
    /// succeeds.
    #[default]
    Dispatch,
    /// The first failed write fails the write call.
    Strict,
}

/// A connector driving the devices of a Tango control system through one of
/// the mTango REST dialects.
///
/// The dialect is chosen once, at construction time. Every operation
/// translates a call into the requests of that dialect, exchanges them with
/// the server and converts the responses into `mtango` domain objects.
///
/// The connector holds no mutable state, so a single instance can serve
/// concurrent calls.
#[derive(Debug)]
pub struct Connector<T: Transport = HttpTransport> {
    endpoint: String,
    headers: HeaderMap,
    dialect: Box<dyn Dialect>,
    transport: T,
    write_policy: WritePolicy,
    attribute_list_policy: ListFailurePolicy,
}

impl Connector<HttpTransport> {
    /// Creates a [`Connector`] speaking the single-host [`Rc2`] dialect.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::Configuration`] error is returned when the endpoint is
    /// not a valid URL.
    pub fn new(endpoint: &str, username: &str, password: &str) -> Result<Self> {
        Self::with_dialect(endpoint, username, password, Rc2::new(), HttpTransport::new())
    }

    /// Creates a [`Connector`] speaking the multi-host [`Rc4`] dialect.
    ///
    /// Requests are addressed to the control system whose database runs at
    /// `host:port`, so the endpoint becomes `{endpoint}/hosts/{host}/{port}`.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::Configuration`] error is returned when the endpoint is
    /// not a valid URL.
    pub fn with_host(
        endpoint: &str,
        host: &str,
        port: u16,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        Self::with_dialect(
            endpoint,
            username,
            password,
            Rc4::new(host, port),
            HttpTransport::new(),
        )
    }
}

impl<T: Transport> Connector<T> {
    /// Creates a [`Connector`] from any [`Dialect`] and [`Transport`].
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::Configuration`] error is returned when the endpoint is
    /// not a valid URL or the credentials do not form a valid header.
    pub fn with_dialect(
        endpoint: &str,
        username: &str,
        password: &str,
        dialect: impl Dialect + 'static,
        transport: T,
    ) -> Result<Self> {
        let base = endpoint.trim_end_matches('/');
        let _ = Url::parse(base)
            .map_err(|e| configuration_error(format!("Invalid endpoint `{endpoint}`: {e}")))?;

        let mut headers = HeaderMap::new();
        let _ = headers.insert(AUTHORIZATION, basic_authorization(username, password)?);

        Ok(Self {
            endpoint: dialect.endpoint(base),
            headers,
            attribute_list_policy: dialect.attribute_list_policy(),
            dialect: Box::new(dialect),
            transport,
            write_policy: WritePolicy::default(),
        })
    }

    /// Sets the [`WritePolicy`].
    #[must_use]
    pub fn write_policy(mut self, write_policy: WritePolicy) -> Self {
        self.write_policy = write_policy;
        self
    }

    /// Overrides the [`ListFailurePolicy`] of the dialect for attribute
    /// lists.
    #[must_use]
    pub fn attribute_list_policy(mut self, policy: ListFailurePolicy) -> Self {
        self.attribute_list_policy = policy;
        self
    }

    /// Returns the endpoint every request path is joined to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the [`Dialect`].
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Returns the [`Transport`].
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Retrieves the status of a device.
    ///
    /// # Errors
    ///
    /// An error is returned when the exchange fails or the response does not
    /// contain a status.
    pub async fn get_device_status(&self, name: &str) -> Result<String> {
        let payload = self
            .exchange_one(Operation::DeviceState { device: name })
            .await?;
        response::device_status(payload)
    }

    /// Retrieves the [`DevState`] of a device.
    ///
    /// # Errors
    ///
    /// An error is returned when the exchange fails or the state is missing
    /// or unknown.
    pub async fn get_device_state(&self, name: &str) -> Result<DevState> {
        let payload = self
            .exchange_one(Operation::DeviceState { device: name })
            .await?;
        response::device_state(payload)
    }

    /// Retrieves the [`DeviceInfo`] of a device.
    ///
    /// # Errors
    ///
    /// An error is returned when the exchange fails or the response does not
    /// describe a device.
    pub async fn get_device_info(&self, name: &str) -> Result<DeviceInfo> {
        let payload = self
            .exchange_one(Operation::DeviceInfo { device: name })
            .await?;
        response::device_info(payload)
    }

    /// Retrieves the names of all devices, excluding the administrative
    /// ones.
    ///
    /// The pattern is accepted but not applied: the whole device collection
    /// is returned.
    ///
    /// # Errors
    ///
    /// An error is returned when the exchange fails or the response is not
    /// a collection of named elements.
    pub async fn get_device_list(&self, pattern: &str) -> Result<Vec<String>> {
        debug!("Device pattern `{pattern}` ignored, listing all devices");
        let payload = self.exchange_one(Operation::DeviceList).await?;
        response::public_names(payload)
    }

    /// Retrieves the device domains matching a pattern.
    ///
    /// # Errors
    ///
    /// Always fails with [`ErrorKind::NotImplemented`].
    pub async fn get_device_domain(&self, _pattern: &str) -> Result<Vec<String>> {
        Err(Error::not_implemented("get_device_domain"))
    }

    /// Retrieves the device families matching a pattern.
    ///
    /// # Errors
    ///
    /// Always fails with [`ErrorKind::NotImplemented`].
    pub async fn get_device_family(&self, _pattern: &str) -> Result<Vec<String>> {
        Err(Error::not_implemented("get_device_family"))
    }

    /// Retrieves the device members matching a pattern.
    ///
    /// # Errors
    ///
    /// Always fails with [`ErrorKind::NotImplemented`].
    pub async fn get_device_member(&self, _pattern: &str) -> Result<Vec<String>> {
        Err(Error::not_implemented("get_device_member"))
    }

    /// Retrieves the property names of a device.
    ///
    /// As for [`Self::get_device_list`], the pattern is not applied.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::NotImplemented`] error is returned when the dialect
    /// exposes no properties collection, otherwise an error is returned when
    /// the exchange fails.
    pub async fn get_device_property_list(&self, name: &str, pattern: &str) -> Result<Vec<String>> {
        debug!("Property pattern `{pattern}` ignored, listing all properties of `{name}`");
        let payload = self
            .exchange_one(Operation::PropertyList { device: name })
            .await?;
        response::names(payload)
    }

    /// Retrieves device properties.
    ///
    /// # Errors
    ///
    /// Always fails with [`ErrorKind::NotImplemented`].
    pub async fn get_device_property<P: AsRef<str>>(
        &self,
        _name: &str,
        _propnames: &[P],
    ) -> Result<Vec<DbDatum>> {
        Err(Error::not_implemented("get_device_property"))
    }

    /// Stores device properties.
    ///
    /// # Errors
    ///
    /// Always fails with [`ErrorKind::NotImplemented`].
    pub async fn put_device_property(&self, _name: &str, _properties: &[DbDatum]) -> Result<()> {
        Err(Error::not_implemented("put_device_property"))
    }

    /// Deletes device properties.
    ///
    /// Property names can be plain strings or [`DbDatum`]s. Empty names are
    /// skipped, yet the call fails on dialects without a delete endpoint
    /// even when no name is left.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::NotImplemented`] error is returned when the dialect
    /// has no delete endpoint, otherwise an error is returned when any of the
    /// deletions fails.
    pub async fn delete_device_property<P: AsRef<str>>(
        &self,
        name: &str,
        propnames: &[P],
    ) -> Result<()> {
        let _ = self.dialect.requests(&Operation::DeleteProperty {
            device: name,
            property: "",
        })?;

        let mut requests = Vec::new();
        for property in propnames
            .iter()
            .map(|property| property.as_ref())
            .filter(|property| !property.is_empty())
        {
            requests.extend(self.dialect.requests(&Operation::DeleteProperty {
                device: name,
                property,
            })?);
        }

        let _ = self.fetch_all(requests).await?;
        Ok(())
    }

    /// Retrieves the attribute names of a device.
    ///
    /// # Errors
    ///
    /// With [`ListFailurePolicy::Propagate`], an error is returned when the
    /// exchange fails. With [`ListFailurePolicy::Empty`], failures are logged
    /// and an empty list is returned.
    pub async fn get_device_attribute_list(&self, name: &str) -> Result<Vec<String>> {
        let names = self
            .exchange_one(Operation::AttributeList { device: name })
            .await
            .and_then(response::public_names);

        match (names, self.attribute_list_policy) {
            (Ok(names), _) => Ok(names),
            (Err(e), ListFailurePolicy::Propagate) => Err(e),
            (Err(e), ListFailurePolicy::Empty) => {
                warn!("Attribute list of `{name}` unavailable, returning an empty list: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Retrieves the [`AttributeInfo`] of some device attributes.
    ///
    /// When no attribute names are given, the configuration of every
    /// attribute of the device is retrieved.
    ///
    /// # Errors
    ///
    /// An error is returned when any exchange fails or any configuration
    /// cannot be decoded.
    pub async fn get_device_attribute_info(
        &self,
        name: &str,
        attnames: &[&str],
    ) -> Result<Vec<AttributeInfo>> {
        let all;
        let attnames = if attnames.is_empty() {
            all = self.get_device_attribute_list(name).await?;
            all.iter().map(String::as_str).collect::<Vec<_>>()
        } else {
            attnames.to_vec()
        };

        if attnames.is_empty() {
            return Ok(Vec::new());
        }

        let payloads = self
            .exchange(Operation::AttributeInfo {
                device: name,
                attributes: &attnames,
            })
            .await?;

        let mut infos = Vec::with_capacity(attnames.len());
        for payload in payloads {
            for info in self.dialect.decode_infos(payload)? {
                infos.push(response::attribute_info(info)?);
            }
        }
        Ok(infos)
    }

    /// Reads some device attributes.
    ///
    /// # Errors
    ///
    /// An error is returned when any exchange fails or any value cannot be
    /// decoded.
    pub async fn read_device_attribute(
        &self,
        name: &str,
        attnames: &[&str],
    ) -> Result<Vec<DeviceAttribute>> {
        if attnames.is_empty() {
            return Ok(Vec::new());
        }

        let payloads = self
            .exchange(Operation::ReadAttributes {
                device: name,
                attributes: attnames,
            })
            .await?;
        self.attribute_values(payloads)
    }

    /// Writes some device attributes.
    ///
    /// Failed writes are handled according to the [`WritePolicy`].
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::NotImplemented`] error is returned when the dialect
    /// cannot write attributes. With [`WritePolicy::Strict`], an error is
    /// also returned when any write fails.
    pub async fn write_device_attribute(&self, name: &str, attrs: &[DeviceAttribute]) -> Result<()> {
        let requests = self.dialect.requests(&Operation::WriteAttributes {
            device: name,
            attributes: attrs,
        })?;

        match self.write_policy {
            WritePolicy::Strict => {
                let _ = self.fetch_all(requests).await?;
            }
            WritePolicy::Dispatch => {
                let results = join_all(requests.into_iter().map(|request| self.fetch(request))).await;
                for e in results.into_iter().filter_map(Result::err) {
                    warn!("Write on `{name}` failed: {e}");
                }
            }
        }

        Ok(())
    }

    /// Writes some device attributes and reads back their new values.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::NotImplemented`] error is returned when the dialect
    /// does not echo written values, otherwise an error is returned when the
    /// exchange fails or the values cannot be decoded.
    pub async fn write_read_device_attribute(
        &self,
        name: &str,
        attrs: &[DeviceAttribute],
    ) -> Result<Vec<DeviceAttribute>> {
        let payloads = self
            .exchange(Operation::WriteReadAttributes {
                device: name,
                attributes: attrs,
            })
            .await?;
        self.attribute_values(payloads)
    }

    /// Executes a device command and returns its raw output.
    ///
    /// An empty response body is returned as [`Value::Null`].
    ///
    /// # Errors
    ///
    /// An error is returned when the exchange fails.
    pub async fn device_command_inout(
        &self,
        name: &str,
        cmdname: &str,
        argin: Option<&Value>,
    ) -> Result<Value> {
        self.exchange_one(Operation::CommandInOut {
            device: name,
            command: cmdname,
            input: argin,
        })
        .await
    }

    /// Retrieves the [`CommandInfo`] of a device command.
    ///
    /// # Errors
    ///
    /// An error is returned when the exchange fails or the description
    /// cannot be decoded.
    pub async fn device_command_query(&self, name: &str, cmdname: &str) -> Result<CommandInfo> {
        let payload = self
            .exchange_one(Operation::CommandInfo {
                device: name,
                command: cmdname,
            })
            .await?;
        response::command_info(payload)
    }

    /// Retrieves the [`CommandInfo`] of every device command.
    ///
    /// # Errors
    ///
    /// An error is returned when the exchange fails or any description
    /// cannot be decoded.
    pub async fn device_command_list_query(&self, name: &str) -> Result<Vec<CommandInfo>> {
        let payload = self
            .exchange_one(Operation::CommandList { device: name })
            .await?;
        response::command_infos(payload)
    }

    fn attribute_values(&self, payloads: Vec<Value>) -> Result<Vec<DeviceAttribute>> {
        let mut values = Vec::with_capacity(payloads.len());
        for payload in payloads {
            for raw in self.dialect.decode_values(payload)? {
                values.push(response::attribute_value(raw)?);
            }
        }
        Ok(values)
    }

    async fn exchange(&self, operation: Operation<'_>) -> Result<Vec<Value>> {
        let requests = self.dialect.requests(&operation)?;
        self.fetch_all(requests).await
    }

    async fn exchange_one(&self, operation: Operation<'_>) -> Result<Value> {
        self.exchange(operation).await?.pop().ok_or_else(|| {
            Error::decode(format!("No response for `{}`", operation.name()))
        })
    }

    async fn fetch_all(&self, requests: Vec<RequestDescriptor>) -> Result<Vec<Value>> {
        try_join_all(requests.into_iter().map(|request| self.fetch(request))).await
    }

    async fn fetch(&self, request: RequestDescriptor) -> Result<Value> {
        let url = request.url(&self.endpoint)?;
        debug!("{} {url}", request.method);

        let call = HttpCall {
            method: request.method,
            url: url.clone(),
            headers: self.headers.clone(),
            body: request.body,
            include_credentials: self.dialect.include_credentials(),
        };

        let reply = self.transport.fetch(call).await.inspect_err(|e| {
            error!("Request to {url} could not be completed: {e}");
        })?;

        if !reply.ok() {
            let e = Error::remote(reply.status(), reply.status_text());
            error!("Request to {url} failed: {e}");
            return Err(e);
        }

        reply.json()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;

    use crate::dialect::{ListFailurePolicy, Rc2, Rc4};
    use crate::error::ErrorKind;
    use crate::tests::MockTransport;

    use super::{Connector, WritePolicy};

    #[test]
    fn rc2_construction() {
        let connector = Connector::new("http://host/api/", "user", "pass").unwrap();

        assert_eq!(connector.endpoint(), "http://host/api");
        assert_eq!(connector.dialect().version(), "rc2");
        assert_eq!(connector.write_policy, WritePolicy::Dispatch);
        assert_eq!(connector.attribute_list_policy, ListFailurePolicy::Propagate);

        let authorization = connector.headers.get(AUTHORIZATION).unwrap();
        assert_eq!(authorization, "Basic dXNlcjpwYXNz");
        assert!(authorization.is_sensitive());
    }

    #[test]
    fn rc4_construction() {
        let connector = Connector::with_host(
            "http://host/tango/rest/rc4",
            "localhost",
            10000,
            "user",
            "pass",
        )
        .unwrap();

        assert_eq!(
            connector.endpoint(),
            "http://host/tango/rest/rc4/hosts/localhost/10000"
        );
        assert_eq!(connector.dialect().version(), "rc4");
        assert_eq!(connector.attribute_list_policy, ListFailurePolicy::Empty);
    }

    #[test]
    fn policies_override() {
        let connector = Connector::with_dialect(
            "http://host/api",
            "user",
            "pass",
            Rc4::new("localhost", 10000),
            MockTransport::new(),
        )
        .unwrap()
        .write_policy(WritePolicy::Strict)
        .attribute_list_policy(ListFailurePolicy::Propagate);

        assert_eq!(connector.write_policy, WritePolicy::Strict);
        assert_eq!(connector.attribute_list_policy, ListFailurePolicy::Propagate);
        assert!(connector.transport().calls().is_empty());
    }

    #[test]
    fn invalid_endpoint() {
        for endpoint in ["", "host/api", "http://"] {
            let error = Connector::with_dialect(endpoint, "user", "pass", Rc2, MockTransport::new())
                .unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Configuration);
        }
    }
}
