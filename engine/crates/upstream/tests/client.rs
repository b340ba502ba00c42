#![allow(unused_crate_dependencies)]

use std::time::Duration;

use hmac::{Hmac, Mac};
use letterboxd_upstream::{
    AuthContext, CacheSettings, ClientConfig, ConfigError, Credentials, QueryParams, Target, UpstreamClient,
    UpstreamError,
};
use secrecy::SecretString;
use serde_json::json;
use sha2::Sha256;
use url::Url;
use wiremock::{
    matchers::{body_string, header, header_exists, method, path, query_param},
    Mock, MockServer, Request, ResponseTemplate,
};

const SECRET: &str = "test-secret";

fn credentials() -> Credentials {
    Credentials::new(
        SecretString::new("test-key".to_string()),
        SecretString::new(SECRET.to_string()),
    )
    .unwrap()
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        target: Target::Development {
            base_url: Url::parse(&format!("{}/api/v0", server.uri())).unwrap(),
            accept_invalid_certs: false,
        },
        ..ClientConfig::default()
    }
}

fn client(server: &MockServer) -> UpstreamClient {
    UpstreamClient::new(config(server), credentials()).unwrap()
}

/// Recomputes the signature the way the production API does: against its own URL.
struct ValidSignature;

impl wiremock::Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let Some((signed_query, signature)) = request.url.query().and_then(|query| query.rsplit_once("&signature="))
        else {
            return false;
        };

        let url = format!("https://api.letterboxd.com{}?{signed_query}", request.url.path());

        let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(request.method.as_str().as_bytes());
        mac.update(b"\0");
        mac.update(url.as_bytes());
        mac.update(b"\0");
        mac.update(&request.body);

        hex::encode(mac.finalize().into_bytes()) == signature
    }
}

#[tokio::test]
async fn get_requests_are_signed_for_the_production_api() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/film/42"))
        .and(query_param("apikey", "test-key"))
        .and(header("accept", "application/json"))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42", "name": "Heat"})))
        .expect(1)
        .mount(&server)
        .await;

    let film = client(&server).film("42").await.unwrap();

    assert_eq!(json!({"id": "42", "name": "Heat"}), film);
}

#[tokio::test]
async fn list_endpoints_return_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/films"))
        .and(query_param("perPage", "2"))
        .and(query_param("genre", "8Q"))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": "start=2",
            "items": [{"id": "1"}, {"id": "2"}],
        })))
        .mount(&server)
        .await;

    let params = QueryParams::new().with("perPage", "2").with("genre", "8Q");
    let films = client(&server).films(params).await.unwrap();

    assert_eq!(vec![json!({"id": "1"}), json!({"id": "2"})], films);
}

#[tokio::test]
async fn list_endpoints_without_items_fail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/films/genres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"next": null})))
        .mount(&server)
        .await;

    let error = client(&server).genres().await.unwrap_err();

    assert_eq!(UpstreamError::MissingField("items"), error);
}

#[tokio::test]
async fn bearer_tokens_are_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/film/42/me"))
        .and(header("authorization", "Bearer member-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"watched": true})))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthContext::new("member-token");
    let relationship = client(&server).film_relationship("42", Some(&auth)).await.unwrap();

    assert_eq!(json!({"watched": true}), relationship);
}

#[tokio::test]
async fn token_requests_sign_the_form_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/auth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("grant_type=password&password=hunter+2&username=dave"))
        .and(ValidSignature)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc",
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server).token("dave", "hunter 2").await.unwrap();

    assert_eq!(json!("abc"), token["access_token"]);
}

#[tokio::test]
async fn username_check_returns_the_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/auth/username-check"))
        .and(query_param("username", "dave"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "NotAvailable"})))
        .mount(&server)
        .await;

    let result = client(&server).username_check("dave").await.unwrap();

    assert_eq!(json!("NotAvailable"), result);
}

#[tokio::test]
async fn non_success_statuses_are_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/member/nobody"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such member"))
        .mount(&server)
        .await;

    let error = client(&server).member("nobody").await.unwrap_err();

    assert_eq!(
        UpstreamError::Status {
            status: 404,
            body: "no such member".to_string()
        },
        error
    );
}

#[tokio::test]
async fn malformed_bodies_are_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/list/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let error = client(&server).list("1").await.unwrap_err();

    assert!(matches!(error, UpstreamError::MalformedJson(_)), "{error:?}");
}

#[tokio::test]
async fn identical_gets_are_sent_once_per_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/contributor/7"))
        .and(header_exists("accept"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "7"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);

    let request = client.for_request();
    let (left, right) = futures::join!(request.contributor("7"), request.contributor("7"));
    assert_eq!(left.unwrap(), right.unwrap());
    request.contributor("7").await.unwrap();

    // a new inbound request starts from an empty memo
    client.for_request().contributor("7").await.unwrap();
}

#[tokio::test]
async fn failures_are_retried_by_the_next_caller() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/film/1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v0/film/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .mount(&server)
        .await;

    let client = client(&server);

    assert_eq!(Some(503), client.film("1").await.unwrap_err().status());
    assert_eq!(json!({"id": "1"}), client.film("1").await.unwrap());
}

#[tokio::test]
async fn response_cache_spans_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/films/film-services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": "netflix"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        cache: Some(CacheSettings {
            max_entries: 10,
            ttl: Duration::from_secs(60),
        }),
        ..config(&server)
    };

    let client = UpstreamClient::new(config, credentials()).unwrap();

    for _ in 0..3 {
        let services = client.for_request().services().await.unwrap();
        assert_eq!(vec![json!({"id": "netflix"})], services);
    }
}

#[tokio::test]
async fn authenticated_responses_are_never_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"member": {"id": "m"}})))
        .expect(2)
        .mount(&server)
        .await;

    let config = ClientConfig {
        cache: Some(CacheSettings {
            max_entries: 10,
            ttl: Duration::from_secs(60),
        }),
        ..config(&server)
    };

    let client = UpstreamClient::new(config, credentials()).unwrap();
    let auth = AuthContext::new("member-token");

    client.for_request().me(Some(&auth)).await.unwrap();
    client.for_request().me(Some(&auth)).await.unwrap();
}

#[test]
fn base_urls_must_hold_a_path() {
    let config = ClientConfig {
        target: Target::Development {
            base_url: Url::parse("mailto:dev@example.com").unwrap(),
            accept_invalid_certs: true,
        },
        ..ClientConfig::default()
    };

    let error = UpstreamClient::new(config, credentials()).err().unwrap();

    assert!(matches!(error, ConfigError::InvalidBaseUrl(_)), "{error:?}");
}
