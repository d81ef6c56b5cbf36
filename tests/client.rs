use chrono::{Duration, Local};
use reading_stats::cache::refresh;
use reading_stats::client::ReadingApiClient;
use reading_stats::errors::ClientError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reading_body() -> serde_json::Value {
    json!({
        "data": {
            "2024": {
                "5": {
                    "book_count": 1,
                    "chapter_count": 4,
                    "word_count": 12000,
                    "daily_data": {
                        "3": { "daily_book_count": 1, "daily_chapter_count": 4, "daily_word_count": 12000 }
                    }
                }
            }
        },
        "fetched_at": "2024-06-01T00:00:00Z",
        "cache_info": { "cached": "hit" }
    })
}

#[tokio::test]
async fn login_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/token"))
        .and(body_json(json!({
            "credentials": { "user_id": "reader", "password": "secret" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc123",
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReadingApiClient::new(server.uri()).unwrap();
    let token = client.login("reader", "secret").await.unwrap();

    assert_eq!(token.access_token, "abc123");
    assert_eq!(token.expires_in, 3600);
}

#[tokio::test]
async fn reading_data_sends_range_and_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/reading-data"))
        .and(query_param("year_from", "2024"))
        .and(query_param("use_cache", "true"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reading_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReadingApiClient::new(server.uri()).unwrap();
    let response = client.reading_data("abc123", 2024, None).await.unwrap();

    let may = &response.data["2024"]["5"];
    assert_eq!(may.word_count, 12000);
    assert_eq!(may.daily_data["3"].daily_chapter_count, 4);
    assert_eq!(response.cache_info.map(|info| info.cached), Some("hit".to_string()));
}

#[tokio::test]
async fn month_fetch_uses_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/month-reading-data/basic"))
        .and(query_param("year", "2024"))
        .and(query_param("month", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reading_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReadingApiClient::new(server.uri()).unwrap();
    let response = client.month_reading_data("abc123", 2024, 5).await.unwrap();

    assert!(response.data.contains_key("2024"));
}

#[tokio::test]
async fn unauthorized_maps_to_its_own_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/reading-data"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 401, "message": "token expired" }
        })))
        .mount(&server)
        .await;

    let client = ReadingApiClient::new(server.uri()).unwrap();
    let err = client.reading_data("stale", 2024, None).await.unwrap_err();

    match err {
        ClientError::Unauthorized(message) => assert_eq!(message, "token expired"),
        other => panic!("expected unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn api_error_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/month-reading-data/basic"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "upstream unavailable" }
        })))
        .mount(&server)
        .await;

    let client = ReadingApiClient::new(server.uri()).unwrap();
    let err = client.month_reading_data("abc123", 2024, 5).await.unwrap_err();

    assert_eq!(err.to_string(), "API Error (500): upstream unavailable");
}

#[tokio::test]
async fn bare_status_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/reading-data"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = ReadingApiClient::new(server.uri()).unwrap();
    let err = client.reading_data("abc123", 2024, None).await.unwrap_err();

    assert!(matches!(err, ClientError::Status(503)));
}

#[tokio::test]
async fn session_refresh_without_cache_downloads_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/reading-data"))
        .and(query_param("year_from", "2023"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reading_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReadingApiClient::new(server.uri()).unwrap();
    let session = client.session("abc123", 2023);
    let updated = refresh(&session, None, Local::now(), Duration::days(3))
        .await
        .unwrap()
        .expect("full download");

    assert_eq!(updated.response.data["2024"]["5"].word_count, 12000);
}
