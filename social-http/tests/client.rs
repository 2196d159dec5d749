use reqwest::StatusCode;
use serde_json::{Value, json};
use social_http::{Auth, HttpClient, HttpError, OAuth1Credentials, RequestOpts};
use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn credentials() -> OAuth1Credentials {
    OAuth1Credentials::new("consumer", "consumer-secret", "token", "token-secret")
}

#[tokio::test]
async fn oauth2_token_is_sent_with_oauth_scheme() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "OAuth someAccessToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let got: Value = client
        .get_json(
            "me",
            RequestOpts {
                auth: Some(Auth::OAuth2("someAccessToken")),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(got["id"], "1");
}

#[tokio::test]
async fn oauth1_signs_form_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/statuses/update.json"))
        .and(header_exists("Authorization"))
        .and(body_string("status=Test+Message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12345})))
        .mount(&server)
        .await;

    let client = HttpClient::new(&format!("{}/1", server.uri())).unwrap();
    let creds = credentials();
    let got: Value = client
        .post_form_json(
            "statuses/update.json",
            RequestOpts {
                auth: Some(Auth::OAuth1(&creds)),
                form: Some(vec![("status", "Test Message".into())]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(got["id"], 12345);

    let requests: Vec<Request> = server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap().to_str().unwrap();
    assert!(auth.starts_with("OAuth oauth_consumer_key=\"consumer\""));
    assert!(auth.contains("oauth_token=\"token\""));
    assert!(auth.contains("oauth_signature="));
    assert!(auth.contains("oauth_signature_method=\"HMAC-SHA1\""));
}

#[tokio::test]
async fn error_responses_keep_status_message_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boguspath"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"type": "OAuthException", "message": "Unknown path components: /boguspath"}
        })))
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .get_json::<Value>("boguspath", RequestOpts::default())
        .await
        .unwrap_err();
    match err {
        HttpError::Api {
            status,
            message,
            body,
            ..
        } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Unknown path components: /boguspath");
            assert!(body.contains("OAuthException"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn no_retries_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .get_json::<Value>("flaky", RequestOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Api { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn retry_budget_recovers_from_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap().with_retries(1);
    let got: Value = client
        .get_json("flaky", RequestOpts::default())
        .await
        .unwrap();
    assert_eq!(got["ok"], true);
}

#[tokio::test]
async fn query_auth_is_appended_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust"))
        .and(query_param("access_token", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let got: Value = client
        .get_json(
            "search",
            RequestOpts {
                query: Some(vec![("q", "rust".into())]),
                auth: Some(Auth::Query {
                    name: "access_token",
                    value: "abc".into(),
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(got["data"], json!([]));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("q=rust&access_token=abc"));
}

#[tokio::test]
async fn bytes_are_returned_untouched() {
    let server = MockServer::start().await;
    let png = vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3];
    Mock::given(method("GET"))
        .and(path("/193482154020832/picture"))
        .and(query_param("type", "large"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png.clone()))
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let got = client
        .get_bytes(
            "193482154020832/picture",
            RequestOpts {
                query: Some(vec![("type", "large".into())]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(got, png);
}

#[tokio::test]
async fn undecodable_bodies_are_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .get_json::<Value>("html", RequestOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Decode(_, snippet) if snippet == "<html></html>"));
}

#[tokio::test]
async fn tokens_never_leave_the_base_host() {
    let elsewhere = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&elsewhere)
        .await;

    let client = HttpClient::new("http://127.0.0.1:9/").unwrap();
    let authority = elsewhere.address().to_string();
    for target in [format!("{}/steal", elsewhere.uri()), format!("//{authority}/steal")] {
        let err = client
            .get_json::<Value>(
                &target,
                RequestOpts {
                    auth: Some(Auth::OAuth2("secretToken")),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::Url(_)), "{target}: {err}");
    }
}
