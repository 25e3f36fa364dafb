use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kvtree_codec::wire;
use kvtree_core::{Config, Error, KvTransport, PutOptions, Value};
use kvtree_http::{HttpTransport, TOKEN_HEADER};
use kvtree_projector::KvTreeClient;

fn config(uri: &str) -> Config {
    Config {
        address: uri.to_string(),
        ..Default::default()
    }
}

fn pair(key: &str, payload: Option<&str>, index: u64) -> serde_json::Value {
    json!({
        "Key": key,
        "Value": payload.map(|p| wire::to_wire(p.as_bytes())),
        "ModifyIndex": index,
        "CreateIndex": index,
        "LockIndex": 0,
        "Flags": 0,
    })
}

#[tokio::test]
async fn get_decodes_single_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/app/db/port"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([pair("app/db/port", Some("5432"), 7)])),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let (value, entry) = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&config(&uri)).unwrap();
        let mut client = KvTreeClient::new(transport, config(&uri));
        let value = client.get_value("app/db/port").unwrap();
        let entry = client.transport_mut().get("app/db/port").unwrap();
        (value, entry)
    })
    .await
    .unwrap();

    assert_eq!(value, Some(Value::Integer(5432)));
    assert_eq!(entry.unwrap().modify_index, 7);
}

#[tokio::test]
async fn get_returns_none_on_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let mut transport = HttpTransport::new(&config(&uri)).unwrap();
        transport.get("missing").unwrap()
    })
    .await
    .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn read_nested_folds_recursive_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/app"))
        .and(query_param("recurse", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            pair("app/", None, 1),
            pair("app/cache/", None, 2),
            pair("app/db/host", Some("db.internal"), 3),
            pair("app/db/port", Some("5432"), 4),
            pair("app/tags", Some(r#"["a","b"]"#), 5),
            pair("apple/core", Some("1"), 6),
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&config(&uri)).unwrap();
        let mut client = KvTreeClient::new(transport, config(&uri));
        client.read_nested("app").unwrap()
    })
    .await
    .unwrap();

    let expected = Value::from_iter([
        ("cache", Value::Null),
        (
            "db",
            Value::from_iter([
                ("host", Value::from("db.internal")),
                ("port", Value::from(5432)),
            ]),
        ),
        ("tags", Value::from(vec!["a", "b"])),
    ]);
    assert_eq!(result, Some(expected));
}

#[tokio::test]
async fn read_nested_of_unknown_namespace_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/nothing"))
        .and(query_param("recurse", ""))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&config(&uri)).unwrap();
        KvTreeClient::new(transport, config(&uri))
            .read_nested("nothing")
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn shallow_listing_uses_keys_and_separator() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/app/"))
        .and(query_param("keys", ""))
        .and(query_param("separator", "/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "app/cache/",
            "app/db/",
            "app/name"
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let entries = tokio::task::spawn_blocking(move || {
        let mut transport = HttpTransport::new(&config(&uri)).unwrap();
        transport.list("app/", false).unwrap()
    })
    .await
    .unwrap();

    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["app/cache/", "app/db/", "app/name"]);
    assert!(entries.iter().all(|e| e.value.is_none()));
}

#[tokio::test]
async fn list_keys_skips_marker_children() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/app"))
        .and(query_param("recurse", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            pair("app/cache/", None, 1),
            pair("app/db/host", Some("x"), 2),
            pair("app/name", Some("demo"), 3),
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let keys = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&config(&uri)).unwrap();
        KvTreeClient::new(transport, config(&uri))
            .list_keys("app")
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(keys, ["db", "name"]);
}

#[tokio::test]
async fn put_sends_raw_payload_with_token_and_cas() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/kv/app/db/port"))
        .and(query_param("cas", "12"))
        .and(header(TOKEN_HEADER, "s3cret"))
        .and(body_string("5432"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v1/kv/app/db/port"))
        .and(query_param("cas", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_string("false"))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let (accepted, refused) = tokio::task::spawn_blocking(move || {
        let config = Config {
            token: Some("s3cret".to_string()),
            ..config(&uri)
        };
        let transport = HttpTransport::new(&config).unwrap();
        let mut client = KvTreeClient::new(transport, config);
        let port = Value::from(5432);
        (
            client
                .put_value("app/db/port", &port, &PutOptions::cas(12))
                .unwrap(),
            client
                .put_value("app/db/port", &port, &PutOptions::cas(11))
                .unwrap(),
        )
    })
    .await
    .unwrap();

    assert!(accepted);
    assert!(!refused);
}

#[tokio::test]
async fn write_nested_puts_each_leaf() {
    let server = MockServer::start().await;

    for (key, body) in [
        ("/v1/kv/app/cache/", ""),
        ("/v1/kv/app/db/host", "x"),
        ("/v1/kv/app/tags", r#"["a","b"]"#),
    ] {
        Mock::given(method("PUT"))
            .and(path(key))
            .and(body_string(body))
            .respond_with(ResponseTemplate::new(200).set_body_string("true"))
            .expect(1)
            .mount(&server)
            .await;
    }

    let uri = server.uri();
    let written = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&config(&uri)).unwrap();
        let mut client = KvTreeClient::new(transport, config(&uri));
        let value = Value::from_iter([
            ("cache", Value::Null),
            ("db", Value::from_iter([("host", "x")])),
            ("tags", Value::from(vec!["a", "b"])),
        ]);
        client.write_nested("app", &value).unwrap()
    })
    .await
    .unwrap();

    assert_eq!(written, 3);
}

#[tokio::test]
async fn refused_put_aborts_write_nested() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/kv/app/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v1/kv/app/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string("false"))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v1/kv/app/c"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&config(&uri)).unwrap();
        let mut client = KvTreeClient::new(transport, config(&uri));
        client.write_nested("app", &Value::from_iter([("a", 1), ("b", 2), ("c", 3)]))
    })
    .await
    .unwrap();

    assert!(matches!(
        result,
        Err(Error::WriteRejected { ref key, written: 1 }) if key == "app/b"
    ));
}

#[tokio::test]
async fn recursive_delete_spares_siblings() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/kv/app/"))
        .and(query_param("recurse", ""))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/kv/app"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let deleted = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&config(&uri)).unwrap();
        KvTreeClient::new(transport, config(&uri))
            .delete("app", true)
            .unwrap()
    })
    .await
    .unwrap();

    assert!(deleted);
}

#[tokio::test]
async fn server_errors_surface_as_transport_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/app"))
        .respond_with(ResponseTemplate::new(500).set_body_string("leader election"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&config(&uri)).unwrap();
        KvTreeClient::new(transport, config(&uri)).read_nested("app")
    })
    .await
    .unwrap();

    match result {
        Err(Error::Transport(source)) => {
            let http_error = source.downcast_ref::<kvtree_http::Error>().unwrap();
            assert!(matches!(
                http_error,
                kvtree_http::Error::Status { status: 500, .. }
            ));
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Db {
    host: String,
    port: u16,
}

#[tokio::test]
async fn typed_read_through_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/app/db"))
        .and(query_param("recurse", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            pair("app/db/host", Some("x"), 1),
            pair("app/db/port", Some("5432"), 2),
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let db = tokio::task::spawn_blocking(move || {
        let transport = HttpTransport::new(&config(&uri)).unwrap();
        KvTreeClient::new(transport, config(&uri))
            .read_as::<Db>("app/db")
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(
        db,
        Some(Db {
            host: "x".to_string(),
            port: 5432
        })
    );
}
