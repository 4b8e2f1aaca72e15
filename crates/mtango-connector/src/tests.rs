use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;

use mtango::attribute::{DeviceAttribute, TimeVal};
use mtango::device::DbDatum;
use mtango::tango::{AttrQuality, AttributeDataType, DevState, DispLevel};

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};

use serde_json::{Value, json};

use crate::connector::{Connector, WritePolicy};
use crate::dialect::{ListFailurePolicy, Rc2, Rc4};
use crate::error::{Error, ErrorKind, Result};
use crate::transport::{FetchResponse, HttpCall, Transport};

const ENDPOINT: &str = "http://host/api";
const RC4_ROOT: &str = "http://host/api/hosts/localhost/10000";
const DEVICE: &str = "sys/tg_test/1";
const BASIC: &str = "Basic dXNlcjpwYXNz";

pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Clone)]
enum Reply {
    Body(StatusCode, Bytes),
    NetworkFailure,
}

/// A transport answering from a fixed routing table and recording every
/// call it receives.
///
/// Unknown routes are answered with `404 Not Found`.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockTransport {
    routes: HashMap<(Method, String), Reply>,
    calls: Arc<Mutex<Vec<HttpCall>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        init_logging();
        Self::default()
    }

    pub(crate) fn json(self, method: Method, url: impl Into<String>, body: Value) -> Self {
        let body = Bytes::from(serde_json::to_vec(&body).unwrap());
        self.reply(method, url, Reply::Body(StatusCode::OK, body))
    }

    pub(crate) fn raw(self, method: Method, url: impl Into<String>, body: &'static [u8]) -> Self {
        self.reply(method, url, Reply::Body(StatusCode::OK, Bytes::from_static(body)))
    }

    pub(crate) fn status(self, method: Method, url: impl Into<String>, status: StatusCode) -> Self {
        self.reply(method, url, Reply::Body(status, Bytes::new()))
    }

    pub(crate) fn network_failure(self, method: Method, url: impl Into<String>) -> Self {
        self.reply(method, url, Reply::NetworkFailure)
    }

    pub(crate) fn calls(&self) -> Vec<HttpCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.url.to_string())
            .collect()
    }

    fn reply(mut self, method: Method, url: impl Into<String>, reply: Reply) -> Self {
        let _ = self.routes.insert((method, url.into()), reply);
        self
    }
}

impl Transport for MockTransport {
    async fn fetch(&self, call: HttpCall) -> Result<FetchResponse> {
        let key = (call.method.clone(), call.url.to_string());
        self.calls.lock().unwrap().push(call);

        match self.routes.get(&key) {
            Some(Reply::Body(status, body)) => Ok(FetchResponse::new(*status, body.clone())),
            Some(Reply::NetworkFailure) => Err(Error::new(
                ErrorKind::Network,
                format!("Connection refused for {}", key.1),
            )),
            None => Ok(FetchResponse::new(StatusCode::NOT_FOUND, Bytes::new())),
        }
    }
}

fn rc2(transport: MockTransport) -> Connector<MockTransport> {
    Connector::with_dialect(ENDPOINT, "user", "pass", Rc2::new(), transport).unwrap()
}

fn rc4(transport: MockTransport) -> Connector<MockTransport> {
    Connector::with_dialect(
        ENDPOINT,
        "user",
        "pass",
        Rc4::new("localhost", 10000),
        transport,
    )
    .unwrap()
}

// A dialect under test along with the URLs it is expected to produce for a
// single attribute.
struct Case {
    root: &'static str,
    connector: fn(MockTransport) -> Connector<MockTransport>,
    value_url: fn(&str, &str) -> String,
    info_url: fn(&str, &str) -> String,
}

const CASES: &[Case] = &[
    Case {
        root: ENDPOINT,
        connector: rc2,
        value_url: |root, attribute| {
            format!("{root}/devices/{DEVICE}/attributes/{attribute}/value")
        },
        info_url: |root, attribute| format!("{root}/devices/{DEVICE}/attributes/{attribute}/info"),
    },
    Case {
        root: RC4_ROOT,
        connector: rc4,
        value_url: |root, attribute| {
            format!("{root}/devices/{DEVICE}/attributes/value?attr={attribute}")
        },
        info_url: |root, attribute| format!("{root}/devices/{DEVICE}/attributes/info?attr={attribute}"),
    },
];

fn state_payload() -> Value {
    json!({
        "state": "RUNNING",
        "status": "The device is in RUNNING state.",
    })
}

fn device_list_payload() -> Value {
    json!([
        { "name": "dserver/TangoTest/test", "href": "" },
        { "name": DEVICE, "href": "" },
        { "name": "sys/database/2", "href": "" },
    ])
}

fn command_payload(level: Option<&str>) -> Value {
    let mut info = json!({
        "cmd_name": "DevLong",
        "cmd_tag": 0,
        "in_type": "DevLong",
        "out_type": "DevLong",
        "in_type_desc": "Any DevLong value",
        "out_type_desc": "Echo of the argin value",
    });
    if let Some(level) = level {
        info["level"] = json!(level);
    }
    json!({ "name": "DevLong", "info": info })
}

#[tokio::test]
async fn status_request_shape() {
    let transport = MockTransport::new().json(
        Method::GET,
        format!("{ENDPOINT}/devices/{DEVICE}/state"),
        state_payload(),
    );
    let connector = rc2(transport);

    assert_eq!(
        connector.get_device_status(DEVICE).await.unwrap(),
        "The device is in RUNNING state."
    );

    let calls = connector.transport().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::GET);
    assert_eq!(
        calls[0].url.as_str(),
        "http://host/api/devices/sys/tg_test/1/state"
    );
    assert_eq!(calls[0].headers.get(AUTHORIZATION).unwrap(), BASIC);
    assert_eq!(calls[0].body, None);
    assert!(!calls[0].include_credentials);
}

#[tokio::test]
async fn conformance() {
    for case in CASES {
        let root = case.root;
        let transport = MockTransport::new()
            .json(
                Method::GET,
                format!("{root}/devices/{DEVICE}/state"),
                state_payload(),
            )
            .json(
                Method::GET,
                format!("{root}/devices/{DEVICE}"),
                json!({
                    "name": DEVICE,
                    "info": { "name": DEVICE, "exported": true, "classname": "TangoTest" },
                }),
            )
            .json(Method::GET, format!("{root}/devices"), device_list_payload())
            .json(
                Method::GET,
                format!("{root}/devices/{DEVICE}/attributes"),
                json!([
                    { "name": "long_scalar" },
                    { "name": "dserver_link" },
                    { "name": "double_scalar" },
                ]),
            )
            .json(
                Method::GET,
                (case.value_url)(root, "long_scalar"),
                json!({ "name": "long_scalar", "value": 5 }),
            )
            .json(
                Method::GET,
                (case.info_url)(root, "double_scalar"),
                json!({
                    "name": "double_scalar",
                    "writable": "READ_WRITE",
                    "data_type": "DevDouble",
                    "data_format": "SCALAR",
                }),
            )
            .json(
                Method::GET,
                format!("{root}/devices/{DEVICE}/commands/DevLong"),
                command_payload(None),
            )
            .json(
                Method::GET,
                format!("{root}/devices/{DEVICE}/commands"),
                json!([command_payload(Some("OPERATOR")), command_payload(None)]),
            )
            .json(
                Method::PUT,
                format!("{root}/devices/{DEVICE}/commands/State"),
                json!({ "name": "State", "output": "RUNNING" }),
            );
        let connector = (case.connector)(transport);
        let version = connector.dialect().version();

        assert_eq!(
            connector.get_device_state(DEVICE).await.unwrap(),
            DevState::Running,
            "{version}"
        );
        assert_eq!(
            connector.get_device_status(DEVICE).await.unwrap(),
            "The device is in RUNNING state.",
            "{version}"
        );

        let info = connector.get_device_info(DEVICE).await.unwrap();
        assert_eq!(info.name, DEVICE, "{version}");
        assert!(info.exported, "{version}");

        assert_eq!(
            connector.get_device_list("*").await.unwrap(),
            vec![DEVICE, "sys/database/2"],
            "{version}"
        );
        assert_eq!(
            connector.get_device_attribute_list(DEVICE).await.unwrap(),
            vec!["long_scalar", "double_scalar"],
            "{version}"
        );

        let values = connector
            .read_device_attribute(DEVICE, &["long_scalar"])
            .await
            .unwrap();
        assert_eq!(values.len(), 1, "{version}");
        assert_eq!(values[0].name, "long_scalar", "{version}");
        assert_eq!(values[0].value, json!(5), "{version}");
        assert_eq!(values[0].quality, AttrQuality::Invalid, "{version}");
        assert_eq!(values[0].time, TimeVal::zero(), "{version}");

        let infos = connector
            .get_device_attribute_info(DEVICE, &["double_scalar"])
            .await
            .unwrap();
        assert_eq!(infos.len(), 1, "{version}");
        assert_eq!(infos[0].data_type, AttributeDataType::Double, "{version}");
        assert_eq!(infos[0].level, None, "{version}");

        let command = connector
            .device_command_query(DEVICE, "DevLong")
            .await
            .unwrap();
        assert_eq!(command.cmd_name, "DevLong", "{version}");
        assert_eq!(command.level, None, "{version}");

        let commands = connector.device_command_list_query(DEVICE).await.unwrap();
        assert_eq!(commands.len(), 2, "{version}");
        assert_eq!(commands[0].level, Some(DispLevel::Operator), "{version}");

        assert_eq!(
            connector
                .device_command_inout(DEVICE, "State", None)
                .await
                .unwrap(),
            json!({ "name": "State", "output": "RUNNING" }),
            "{version}"
        );

        // Every request is rooted at the dialect endpoint.
        for url in connector.transport().urls() {
            assert!(url.starts_with(&format!("{root}/")), "{version}: {url}");
        }

        let error = connector.get_device_state("sys/tg_test/2").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Remote, "{version}");
        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND), "{version}");
        assert_eq!(error.info(), "Failed request: 404 Not Found", "{version}");
    }
}

#[tokio::test]
async fn unsupported_operations_without_io() {
    for case in CASES {
        let connector = (case.connector)(MockTransport::new());

        for result in [
            connector.get_device_domain("sys/*").await,
            connector.get_device_family("sys/*").await,
            connector.get_device_member("sys/tg_test/*").await,
        ] {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::NotImplemented);
        }

        assert_eq!(
            connector
                .get_device_property(DEVICE, &["polled_attr"])
                .await
                .unwrap_err()
                .kind(),
            ErrorKind::NotImplemented
        );
        assert_eq!(
            connector
                .put_device_property(DEVICE, &[DbDatum::new("polled_attr")])
                .await
                .unwrap_err()
                .kind(),
            ErrorKind::NotImplemented
        );

        assert!(connector.transport().calls().is_empty());
    }

    let connector = rc2(MockTransport::new());
    let attributes = [DeviceAttribute::new("long_scalar", 5)];

    assert_eq!(
        connector
            .get_device_property_list(DEVICE, "*")
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::NotImplemented
    );
    assert_eq!(
        connector
            .delete_device_property(DEVICE, &["polled_attr"])
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::NotImplemented
    );
    for propnames in [&[][..], &[""][..]] {
        assert_eq!(
            connector
                .delete_device_property(DEVICE, propnames)
                .await
                .unwrap_err()
                .kind(),
            ErrorKind::NotImplemented
        );
    }
    assert_eq!(
        connector
            .write_read_device_attribute(DEVICE, &attributes)
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::NotImplemented
    );
    assert!(connector.transport().calls().is_empty());
}

#[tokio::test]
async fn empty_reads_without_io() {
    for case in CASES {
        let connector = (case.connector)(MockTransport::new());

        assert!(
            connector
                .read_device_attribute(DEVICE, &[])
                .await
                .unwrap()
                .is_empty()
        );
        assert!(connector.transport().calls().is_empty());
    }
}

#[tokio::test]
async fn rc2_fans_out_reads() {
    let transport = MockTransport::new()
        .json(
            Method::GET,
            format!("{ENDPOINT}/devices/{DEVICE}/attributes/long_scalar/value"),
            json!({ "name": "long_scalar", "value": 5, "quality": "ATTR_VALID", "timestamp": 1_500_000_000_000_i64 }),
        )
        .json(
            Method::GET,
            format!("{ENDPOINT}/devices/{DEVICE}/attributes/double_scalar/value"),
            json!({ "name": "double_scalar", "value": 1.5, "quality": "ATTR_WARNING" }),
        );
    let connector = rc2(transport);

    let values = connector
        .read_device_attribute(DEVICE, &["long_scalar", "double_scalar"])
        .await
        .unwrap();

    assert_eq!(connector.transport().calls().len(), 2);
    assert_eq!(
        values,
        vec![
            DeviceAttribute::new("long_scalar", 5),
            DeviceAttribute::new("double_scalar", 1.5).quality(AttrQuality::Warning),
        ]
    );

    // A single failing request fails the whole read.
    let error = connector
        .read_device_attribute(DEVICE, &["long_scalar", "float_scalar"])
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Remote);
}

#[tokio::test]
async fn rc4_batches_reads() {
    let transport = MockTransport::new().json(
        Method::GET,
        format!("{RC4_ROOT}/devices/{DEVICE}/attributes/value?attr=long_scalar&attr=double_scalar"),
        json!([
            { "name": "long_scalar", "value": 5, "quality": "ATTR_VALID", "timestamp": 1_500_000_000_250_i64 },
            { "name": "double_scalar", "value": 1.5, "quality": "ATTR_VALID", "timestamp": 1_500_000_000_000_i64 },
        ]),
    );
    let connector = rc4(transport);

    let values = connector
        .read_device_attribute(DEVICE, &["long_scalar", "double_scalar"])
        .await
        .unwrap();

    let calls = connector.transport().calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].include_credentials);
    assert_eq!(calls[0].headers.get(AUTHORIZATION).unwrap(), BASIC);

    assert_eq!(values.len(), 2);
    assert_eq!(values[0].quality, AttrQuality::Valid);
    assert_eq!(values[0].time, TimeVal::from_millis(1_500_000_000_250));
    assert_eq!(values[0].time.tv_usec, 250_000);
    assert_eq!(values[1].name, "double_scalar");
}

#[tokio::test]
async fn attribute_info_of_every_attribute() {
    let transport = MockTransport::new()
        .json(
            Method::GET,
            format!("{RC4_ROOT}/devices/{DEVICE}/attributes"),
            json!([{ "name": "long_scalar" }, { "name": "string_scalar" }]),
        )
        .json(
            Method::GET,
            format!("{RC4_ROOT}/devices/{DEVICE}/attributes/info?attr=long_scalar&attr=string_scalar"),
            json!([
                { "name": "long_scalar", "data_type": "DevLong", "level": "OPERATOR" },
                { "name": "string_scalar", "data_type": "DevString", "level": "EXPERT" },
            ]),
        );
    let connector = rc4(transport);

    let infos = connector
        .get_device_attribute_info(DEVICE, &[])
        .await
        .unwrap();

    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].data_type, AttributeDataType::Long);
    assert_eq!(infos[1].level, Some(DispLevel::Expert));
    assert_eq!(connector.transport().calls().len(), 2);

    // No attributes, no configuration request.
    let connector = rc4(MockTransport::new().json(
        Method::GET,
        format!("{RC4_ROOT}/devices/{DEVICE}/attributes"),
        json!([]),
    ));
    assert!(
        connector
            .get_device_attribute_info(DEVICE, &[])
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(connector.transport().calls().len(), 1);
}

#[tokio::test]
async fn attribute_list_failure_policies() {
    let url = format!("{RC4_ROOT}/devices/{DEVICE}/attributes");
    let transport = MockTransport::new().network_failure(Method::GET, url.clone());

    let connector = rc4(transport.clone());
    assert!(
        connector
            .get_device_attribute_list(DEVICE)
            .await
            .unwrap()
            .is_empty()
    );

    let connector = rc4(transport).attribute_list_policy(ListFailurePolicy::Propagate);
    assert_eq!(
        connector
            .get_device_attribute_list(DEVICE)
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::Network
    );

    let connector = rc2(MockTransport::new().network_failure(
        Method::GET,
        format!("{ENDPOINT}/devices/{DEVICE}/attributes"),
    ));
    assert_eq!(
        connector
            .get_device_attribute_list(DEVICE)
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::Network
    );

    let connector = rc2(MockTransport::new())
        .attribute_list_policy(ListFailurePolicy::Empty);
    assert!(
        connector
            .get_device_attribute_list(DEVICE)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn rc2_write_policies() {
    let attributes = [
        DeviceAttribute::new("long_scalar", 5),
        DeviceAttribute::new("string_scalar", "a&b c"),
    ];
    let transport = MockTransport::new().raw(
        Method::PUT,
        format!("{ENDPOINT}/devices/{DEVICE}/attributes/long_scalar?value=5"),
        b"",
    );

    // The second write is rejected by the server.
    let connector = rc2(transport.clone());
    connector
        .write_device_attribute(DEVICE, &attributes)
        .await
        .unwrap();
    assert_eq!(
        connector.transport().urls(),
        vec![
            format!("{ENDPOINT}/devices/{DEVICE}/attributes/long_scalar?value=5"),
            format!("{ENDPOINT}/devices/{DEVICE}/attributes/string_scalar?value=a%26b+c"),
        ]
    );

    let connector = rc2(transport).write_policy(WritePolicy::Strict);
    let error = connector
        .write_device_attribute(DEVICE, &attributes)
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Remote);
    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn rc4_write_read_round_trip() {
    let transport = MockTransport::new().json(
        Method::PUT,
        format!("{RC4_ROOT}/devices/{DEVICE}/attributes/value?x=5"),
        json!([{ "name": "x", "value": 5, "quality": "ATTR_VALID", "timestamp": 1_500_000_000_000_i64 }]),
    );
    let connector = rc4(transport);
    let attributes = [DeviceAttribute::new("x", 5)];

    let values = connector
        .write_read_device_attribute(DEVICE, &attributes)
        .await
        .unwrap();

    assert_eq!(values.len(), 1);
    assert_eq!(values[0].name, "x");
    assert_eq!(values[0].value, json!(5));
    assert_eq!(values[0].quality, AttrQuality::Valid);

    connector
        .write_device_attribute(DEVICE, &attributes)
        .await
        .unwrap();

    let calls = connector.transport().calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|call| call.method == Method::PUT));
}

#[tokio::test]
async fn rc4_properties() {
    let transport = MockTransport::new()
        .json(
            Method::GET,
            format!("{RC4_ROOT}/devices/{DEVICE}/properties"),
            json!([
                { "name": "polled_attr", "values": ["long_scalar", "1000"] },
                { "name": "mythical_prop", "values": ["1"] },
            ]),
        )
        .raw(
            Method::DELETE,
            format!("{RC4_ROOT}/devices/{DEVICE}/properties/polled_attr"),
            b"",
        )
        .raw(
            Method::DELETE,
            format!("{RC4_ROOT}/devices/{DEVICE}/properties/mythical_prop"),
            b"",
        );
    let connector = rc4(transport);

    assert_eq!(
        connector
            .get_device_property_list(DEVICE, "*")
            .await
            .unwrap(),
        vec!["polled_attr", "mythical_prop"]
    );

    connector
        .delete_device_property(DEVICE, &["polled_attr", ""])
        .await
        .unwrap();
    connector
        .delete_device_property(DEVICE, &[DbDatum::new("mythical_prop")])
        .await
        .unwrap();

    let deletions = connector
        .transport()
        .calls()
        .into_iter()
        .filter(|call| call.method == Method::DELETE)
        .count();
    assert_eq!(deletions, 2);

    let error = connector
        .delete_device_property(DEVICE, &["unknown_prop"])
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Remote);
}

#[tokio::test]
async fn command_inputs() {
    let input = json!(42);

    let connector = rc2(MockTransport::new().json(
        Method::PUT,
        format!("{ENDPOINT}/devices/{DEVICE}/commands/DevLong?input=42"),
        json!({ "name": "DevLong", "output": 42 }),
    ));
    assert_eq!(
        connector
            .device_command_inout(DEVICE, "DevLong", Some(&input))
            .await
            .unwrap(),
        json!({ "name": "DevLong", "output": 42 })
    );
    assert_eq!(connector.transport().calls()[0].body, None);

    let connector = rc4(MockTransport::new().raw(
        Method::PUT,
        format!("{RC4_ROOT}/devices/{DEVICE}/commands/DevLong"),
        b"",
    ));
    assert_eq!(
        connector
            .device_command_inout(DEVICE, "DevLong", Some(&input))
            .await
            .unwrap(),
        Value::Null
    );
    assert_eq!(connector.transport().calls()[0].body, Some(json!(42)));
}

#[tokio::test]
async fn command_levels() {
    let url = format!("{ENDPOINT}/devices/{DEVICE}/commands/DevLong");

    let connector = rc2(MockTransport::new().json(
        Method::GET,
        url.clone(),
        command_payload(Some("EXPERT")),
    ));
    assert_eq!(
        connector
            .device_command_query(DEVICE, "DevLong")
            .await
            .unwrap()
            .level,
        Some(DispLevel::Expert)
    );

    let connector = rc2(MockTransport::new().json(
        Method::GET,
        url,
        command_payload(Some("GURU")),
    ));
    assert_eq!(
        connector
            .device_command_query(DEVICE, "DevLong")
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::Decode
    );
}

#[tokio::test]
async fn malformed_and_unreachable() {
    let connector = rc2(
        MockTransport::new()
            .raw(
                Method::GET,
                format!("{ENDPOINT}/devices/{DEVICE}/state"),
                b"{\"state\":",
            )
            .network_failure(Method::GET, format!("{ENDPOINT}/devices")),
    );

    assert_eq!(
        connector.get_device_state(DEVICE).await.unwrap_err().kind(),
        ErrorKind::Network
    );
    assert_eq!(
        connector.get_device_list("*").await.unwrap_err().kind(),
        ErrorKind::Network
    );

    let connector = rc2(MockTransport::new().status(
        Method::GET,
        format!("{ENDPOINT}/devices/{DEVICE}/state"),
        StatusCode::UNAUTHORIZED,
    ));
    let error = connector.get_device_status(DEVICE).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Remote);
    assert_eq!(error.info(), "Failed request: 401 Unauthorized");
}

#[tokio::test]
async fn rc2_array_parameters() {
    let input = json!([1, 2]);
    let transport = MockTransport::new()
        .raw(
            Method::PUT,
            format!("{ENDPOINT}/devices/{DEVICE}/attributes/long_spectrum?value=1%2C2%2C3"),
            b"",
        )
        .json(
            Method::PUT,
            format!("{ENDPOINT}/devices/{DEVICE}/commands/DevVarLongArray?input=1%2C2"),
            json!({ "name": "DevVarLongArray", "output": [1, 2] }),
        );
    let connector = rc2(transport).write_policy(WritePolicy::Strict);

    connector
        .write_device_attribute(DEVICE, &[DeviceAttribute::new("long_spectrum", json!([1, 2, 3]))])
        .await
        .unwrap();
    assert_eq!(
        connector
            .device_command_inout(DEVICE, "DevVarLongArray", Some(&input))
            .await
            .unwrap(),
        json!({ "name": "DevVarLongArray", "output": [1, 2] })
    );
}
