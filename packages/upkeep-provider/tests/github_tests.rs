use mockito::Server;
use std::fs;
use upkeep_provider::{GitHubProvider, ProviderError, ReleaseSource, RepoId};

const LATEST_PATH: &str = "/repos/RockinChaos/Shiru/releases/latest";

fn shiru() -> RepoId {
    RepoId::new("RockinChaos", "Shiru")
}

#[tokio::test]
async fn test_get_latest_release() {
    let body = fs::read_to_string("tests/web/github_api_latest_release.json").unwrap();
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", LATEST_PATH)
        .match_header("accept", "application/vnd.github+json")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let provider = GitHubProvider::new().with_api_url(server.url());
    let release = provider.get_latest_release(&shiru()).await.unwrap();

    assert_eq!(release.tag(), "v6.4.2");
    assert_eq!(release.author(), "RockinChaos");
    assert_eq!(
        release.url(),
        "https://github.com/RockinChaos/Shiru/releases/tag/v6.4.2"
    );
    assert!(release.body().contains("Torrent client"));
    assert_eq!(release.assets().len(), 3);
    assert_eq!(release.assets()[2].name(), "linux-Shiru-v6.4.2-arm64.deb");
}

#[tokio::test]
async fn test_get_latest_release_token() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", LATEST_PATH)
        .match_header("authorization", "Bearer test_token")
        .with_status(200)
        .with_body(r#"{"tag_name": "v1.0.0"}"#)
        .create_async()
        .await;

    let provider = GitHubProvider::new()
        .with_api_url(server.url())
        .with_token(Some("test_token".to_string()));
    let release = provider.get_latest_release(&shiru()).await.unwrap();

    assert_eq!(release.tag(), "v1.0.0");
}

#[tokio::test]
async fn test_get_latest_release_http_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", LATEST_PATH)
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let provider = GitHubProvider::new().with_api_url(server.url());
    let err = provider.get_latest_release(&shiru()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_get_latest_release_garbage_body() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_body("<html>rate limited</html>")
        .create_async()
        .await;

    let provider = GitHubProvider::new().with_api_url(server.url());
    let err = provider.get_latest_release(&shiru()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Decode { .. }));
}

#[tokio::test]
async fn test_get_latest_release_unreachable_host() {
    // Port 9 (discard) is not expected to have an HTTP server listening.
    let provider = GitHubProvider::new().with_api_url("http://127.0.0.1:9");
    let err = provider.get_latest_release(&shiru()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Http { .. }));
}
