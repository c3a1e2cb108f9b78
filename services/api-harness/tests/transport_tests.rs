//! HTTP transport tests against a local mock server.

use api_harness::{HarnessError, HttpTransport};
use auth_contract::{ApiRequest, CookieJar, Method, TokenCookie, TokenKind, Transport};
use rust_common::HttpConfig;
use serde_json::json;
use std::net::TcpListener;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> HttpTransport {
    let base = Url::parse(&server.uri()).unwrap();
    HttpTransport::new(base, &HttpConfig::default()).unwrap()
}

#[tokio::test]
async fn test_sends_exactly_the_attached_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/get_access_token"))
        .and(header("cookie", "RefreshToken=rt.1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let jar = CookieJar::with(TokenCookie::new(TokenKind::Refresh, "rt.1"));
    let request = ApiRequest::new(Method::Get, "/token/get_access_token").with_cookies(jar);
    let response = transport_for(&server).execute(&request).await.unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_no_cookie_header_for_empty_jar() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/create"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    transport
        .execute(&ApiRequest::new(Method::Post, "/user/create"))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("cookie"));
}

#[tokio::test]
async fn test_bodiless_request_sends_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_intezmenys"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let response = transport_for(&server)
        .execute(&ApiRequest::new(Method::Get, "/get_intezmenys"))
        .await
        .unwrap();

    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn test_json_body_is_forwarded() {
    let server = MockServer::start().await;
    let body = json!({"email": "tester@test.com", "pass": "tester_pass+"});
    Mock::given(method("POST"))
        .and(path("/token/get_refresh_token"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::new(Method::Post, "/token/get_refresh_token").with_body(body);
    let response = transport_for(&server).execute(&request).await.unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_captures_set_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/get_refresh_token"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "RefreshToken=rt.abc; Path=/token/; HttpOnly"),
        )
        .mount(&server)
        .await;

    let request = ApiRequest::new(Method::Post, "/token/get_refresh_token");
    let response = transport_for(&server).execute(&request).await.unwrap();

    assert_eq!(response.cookies.len(), 1);
    assert_eq!(response.cookies[0].name, "RefreshToken");
    assert_eq!(response.cookies[0].value, "rt.abc");
    assert_eq!(response.cookies[0].path.as_deref(), Some("/token/"));

    let jar = response.token_jar();
    assert_eq!(jar.get(TokenKind::Refresh).map(|c| c.value.as_str()), Some("rt.abc"));
}

#[tokio::test]
async fn test_body_is_kept_byte_for_byte() {
    let server = MockServer::start().await;
    let page = auth_contract::expectation::PAYLOAD_TOO_LARGE_PAGE;
    Mock::given(method("POST"))
        .and(path("/intezmeny/create/attachment"))
        .respond_with(ResponseTemplate::new(413).set_body_string(page))
        .mount(&server)
        .await;

    let request = ApiRequest::new(Method::Post, "/intezmeny/create/attachment");
    let response = transport_for(&server).execute(&request).await.unwrap();

    assert_eq!(response.status, 413);
    assert_eq!(response.body, page);
    assert!(response.body.contains("\r\n"));
}

#[tokio::test]
async fn test_error_statuses_are_responses() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let request = ApiRequest::new(Method::Patch, "/user/create");
    let response = transport_for(&server).execute(&request).await.unwrap();

    assert_eq!(response.status, 405);
    assert_eq!(response.body, "");
}

#[tokio::test]
async fn test_invalid_utf8_body_is_decoded_lossily() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/intezmeny/get/attachment"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, b'o', b'k']))
        .mount(&server)
        .await;

    let request = ApiRequest::new(Method::Get, "/intezmeny/get/attachment");
    let response = transport_for(&server).execute(&request).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "\u{fffd}ok");
}

#[tokio::test]
async fn test_unreachable_server_is_connectivity_error() {
    // Nothing listens on a port whose listener was just dropped.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();
    let transport = HttpTransport::new(base, &HttpConfig::default()).unwrap();

    let err = transport
        .execute(&ApiRequest::new(Method::Get, "/get_intezmenys"))
        .await
        .unwrap_err();

    assert!(err.is_connectivity(), "{err}");
    let err = HarnessError::from(err);
    assert!(err.is_fatal());
    assert!(err.is_connectivity());
}
