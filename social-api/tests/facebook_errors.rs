mod common;

use common::{fixture, init_test_tracing};
use serde_json::Value;
use social_api::facebook::{FacebookError, FacebookProfile, FacebookTemplate};
use social_common::SocialError;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn facebook(server: &MockServer) -> FacebookTemplate {
    init_test_tracing();
    FacebookTemplate::builder()
        .access_token("someAccessToken")
        .graph_url(server.uri())
        .build()
        .unwrap()
}

fn error_fixture(status: u16, name: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .set_body_raw(fixture(&format!("facebook/{name}")), "application/json")
}

#[tokio::test]
async fn insufficient_privileges() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/193482154020832/declined"))
        .and(header("Authorization", "OAuth someAccessToken"))
        .respond_with(error_fixture(403, "error-insufficient-privilege.json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = facebook(&server)
        .event_operations()
        .decline_invitation("193482154020832")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "(#299) Requires extended permission: rsvp_event");
    match err {
        FacebookError::InsufficientPermission {
            required_permission,
            ..
        } => assert_eq!(required_permission, "rsvp_event"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn not_a_friend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/119297590579/members/100001387295207"))
        .and(header("Authorization", "OAuth someAccessToken"))
        .respond_with(error_fixture(500, "error-not-a-friend.json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = facebook(&server)
        .friend_operations()
        .add_to_friend_list("119297590579", "100001387295207")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FacebookError::NotAFriend("The member must be a friend of the current user.".into())
    );
}

#[tokio::test]
async fn unknown_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/boguspath"))
        .and(header("Authorization", "OAuth someAccessToken"))
        .respond_with(error_fixture(400, "error-unknown-path.json"))
        .mount(&server)
        .await;

    let err = facebook(&server)
        .fetch_connections::<Value>("me", "boguspath")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FacebookError::GraphApi("Unknown path components: /boguspath".into())
    );
}

#[tokio::test]
async fn not_the_owner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1234567890"))
        .and(header("Authorization", "OAuth someAccessToken"))
        .and(body_string("method=delete"))
        .respond_with(error_fixture(500, "error-not-the-owner.json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = facebook(&server)
        .friend_operations()
        .delete_friend_list("1234567890")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FacebookError::Ownership("User must be an owner of the friendlist".into())
    );
}

#[tokio::test]
async fn unknown_alias_with_http_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dummyalias"))
        .respond_with(error_fixture(200, "error-unknown-alias.json"))
        .mount(&server)
        .await;

    let err = facebook(&server)
        .fetch_object::<FacebookProfile>("dummyalias")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "(#803) Some of the aliases you requested do not exist: dummyalias"
    );
    assert!(matches!(err, FacebookError::GraphApi(_)));
}

#[tokio::test]
async fn current_user_without_token() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(error_fixture(400, "error-current-user-no-token.json"))
        .expect(1)
        .mount(&server)
        .await;

    let facebook = FacebookTemplate::builder()
        .graph_url(server.uri())
        .build()
        .unwrap();
    let err = facebook
        .user_operations()
        .get_user_profile()
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FacebookError::Social(SocialError::BadCredentials(
            "An active access token must be used to query information about the current user."
                .into()
        ))
    );

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}
