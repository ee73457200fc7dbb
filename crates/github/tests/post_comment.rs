use github::{GithubClient, GithubConfig};
use planner::{CommentId, CommentPublisher, IssueNumber, Repository};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> GithubClient {
    let config = GithubConfig::new("test-token").with_api_url(server.uri());
    GithubClient::with_config(config).unwrap()
}

fn repo() -> Repository {
    Repository::parse("octo/widgets").unwrap()
}

#[tokio::test]
async fn post_comment_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/issues/42/comments"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/vnd.github+json"))
        .and(body_json(serde_json::json!({"body": "## Plan"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 1001,
            "html_url": "https://github.com/octo/widgets/issues/42#issuecomment-1001",
            "created_at": "2026-10-17T12:00:00Z",
            "body": "## Plan"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let comment = test_client(&server)
        .post_comment(&repo(), IssueNumber::new(42), "## Plan")
        .await
        .unwrap();

    assert_eq!(comment.id, CommentId::new(1001));
    assert_eq!(
        comment.html_url,
        "https://github.com/octo/widgets/issues/42#issuecomment-1001"
    );
    assert_eq!(
        comment.created_at.unwrap().to_string(),
        "2026-10-17T12:00:00+00:00"
    );
}

#[tokio::test]
async fn post_comment_forbidden_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/issues/42/comments"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_string(r#"{"message":"Resource not accessible by integration"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .post_comment(&repo(), IssueNumber::new(42), "## Plan")
        .await
        .unwrap_err();

    assert_eq!(err.upstream_status_code(), Some(403));
    assert!(err
        .to_string()
        .contains("Resource not accessible by integration"));
}

#[tokio::test]
async fn post_comment_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .post_comment(&repo(), IssueNumber::new(1), "text")
        .await
        .unwrap_err();

    assert_eq!(err.upstream_status_code(), Some(502));
}

#[tokio::test]
async fn blank_token_fails_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        GithubClient::with_config(GithubConfig::new("").with_api_url(server.uri())).unwrap();
    let err = client
        .post_comment(&repo(), IssueNumber::new(1), "text")
        .await
        .unwrap_err();

    assert!(err.is_configuration());
}
