mod common;

use common::{fixture, init_test_tracing};
use social_api::twitter::{SearchResults, TwitterTemplate};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn search_server() -> MockServer {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(fixture("twitter/search.json"), "application/json"),
        )
        .mount(&server)
        .await;
    server
}

fn anonymous(server: &MockServer) -> TwitterTemplate {
    TwitterTemplate::builder()
        .search_url(server.uri())
        .build()
        .unwrap()
}

async fn sent_query(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    requests[0].url.query().unwrap_or_default().to_string()
}

fn assert_search_results(results: &SearchResults) {
    assert_eq!(results.since_id, 10);
    assert_eq!(results.max_id, 999);
    assert!(results.last_page);
    let tweets = &results.tweets;
    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0].id, 12345);
    assert_eq!(tweets[0].from_user, "habuma");
    assert_eq!(tweets[0].from_user_id, 112233);
    assert_eq!(tweets[0].language_code.as_deref(), Some("en"));
    assert_eq!(tweets[0].created_at.unwrap().timestamp_millis(), 1279042701000);
    assert_eq!(tweets[1].id, 54321);
    assert_eq!(tweets[1].from_user, "rclarkson");
    assert_eq!(tweets[1].to_user_id, Some(112233));
    assert_eq!(tweets[1].language_code.as_deref(), Some("de"));
    assert_eq!(tweets[1].created_at.unwrap().timestamp_millis(), 1279654701000);
}

#[tokio::test]
async fn query_only_uses_default_paging() {
    let server = search_server().await;
    let results = anonymous(&server)
        .search_operations()
        .search("#spring")
        .await
        .unwrap();
    assert_search_results(&results);
    assert_eq!(sent_query(&server).await, "q=%23spring&rpp=50&page=1");
}

#[tokio::test]
async fn page_and_results_per_page() {
    let server = search_server().await;
    let results = anonymous(&server)
        .search_operations()
        .search_page("#spring", 2, 10)
        .await
        .unwrap();
    assert_search_results(&results);
    assert_eq!(sent_query(&server).await, "q=%23spring&rpp=10&page=2");
}

#[tokio::test]
async fn since_and_max_id() {
    let server = search_server().await;
    let results = anonymous(&server)
        .search_operations()
        .search_range("#spring", 2, 10, 123, 54321)
        .await
        .unwrap();
    assert_search_results(&results);
    assert_eq!(
        sent_query(&server).await,
        "q=%23spring&rpp=10&page=2&since_id=123&max_id=54321"
    );
}
