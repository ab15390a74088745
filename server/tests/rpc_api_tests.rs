use assetpub_publish::{AssetPublisher, AssetResponse, FsAssetStore};
use assetpub_server::config::Args;
use assetpub_server::{build_router, ErrorBody};
use assetpub_storage::{MemorySink, StorageSink};
use clap::Parser;
use std::sync::Arc;
use tempfile::TempDir;

const EXAMPLE_PRETTY: &str = "{\n    \"example_data\": \"My data\",\n    \"number\": 1234567890\n}\n";
const EXAMPLE_CANONICAL: &str = r#"{"example_data":"My data","number":1234567890}"#;
const EXAMPLE_DIGEST: &str = "18a88709a7318abec3a84dd99eca5cb4a69f0e77b27a59547c821dd05e94fa99";

struct TestServer {
    base: String,
    sink: Arc<MemorySink>,
    _assets: TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Spin up the HTTP server on an OS-assigned port with the example asset
/// at `core/1.0.0.json`.
async fn spawn_test_server() -> TestServer {
    let assets = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(assets.path().join("core")).unwrap();
    std::fs::write(assets.path().join("core").join("1.0.0.json"), EXAMPLE_PRETTY).unwrap();

    let sink = Arc::new(MemorySink::new());
    let publisher = AssetPublisher::new(
        Arc::new(FsAssetStore::new(assets.path())),
        Arc::clone(&sink) as Arc<dyn StorageSink>,
    );

    let app = build_router(publisher);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        sink,
        _assets: assets,
    }
}

async fn post_file_handler(server: &TestServer, body: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(server.url("/v1/rpc/fileHandler"))
        .body(body.to_string())
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn matching_digest_publishes_and_returns_content() {
    let server = spawn_test_server().await;
    let resp = post_file_handler(&server, &format!(r#"{{"hash":"{EXAMPLE_DIGEST}"}}"#)).await;

    assert_eq!(resp.status(), 200);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));

    let body = resp.text().await.unwrap();
    assert_eq!(
        body,
        format!(
            r#"{{"type":"core","version":"1.0.0","hash":"{EXAMPLE_DIGEST}","content":{EXAMPLE_CANONICAL}}}"#
        )
    );
    assert_eq!(server.sink.write_count().unwrap(), 1);
}

#[tokio::test]
async fn missing_claim_returns_digest_only() {
    let server = spawn_test_server().await;
    let resp = post_file_handler(&server, r#"{"type":"core","version":"1.0.0"}"#).await;

    assert_eq!(resp.status(), 200);
    let body: AssetResponse = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
    assert_eq!(body.hash, EXAMPLE_DIGEST);
    assert!(body.content.is_none());
    assert_eq!(server.sink.write_count().unwrap(), 0);
}

#[tokio::test]
async fn missing_asset_returns_404() {
    let server = spawn_test_server().await;
    let resp =
        post_file_handler(&server, r#"{"type":"core","version":"2.0.0","hash":"wronghash"}"#).await;

    assert_eq!(resp.status(), 404);
    let body: ErrorBody = resp.json().await.unwrap();
    assert_eq!(
        body,
        ErrorBody {
            code: 5,
            message: "file not found".to_string(),
        }
    );
    assert_eq!(server.sink.write_count().unwrap(), 0);
}

#[tokio::test]
async fn empty_payload_returns_400() {
    let server = spawn_test_server().await;
    let resp = post_file_handler(&server, "").await;

    assert_eq!(resp.status(), 400);
    let body: ErrorBody = resp.json().await.unwrap();
    assert_eq!(body.code, 3);
    assert_eq!(body.message, "input contained invalid data");
}

#[tokio::test]
async fn malformed_payload_returns_400() {
    let server = spawn_test_server().await;
    let resp = post_file_handler(&server, "{not json").await;
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn corrupt_asset_returns_500_without_details() {
    let server = spawn_test_server().await;
    std::fs::write(server._assets.path().join("core").join("bad.json"), "{,}").unwrap();

    let resp = post_file_handler(&server, r#"{"version":"bad"}"#).await;
    assert_eq!(resp.status(), 500);
    let body: ErrorBody = resp.json().await.unwrap();
    assert_eq!(body.code, 13);
    assert_eq!(body.message, "internal server error");
}

#[tokio::test]
async fn health_check_get_and_post() {
    let server = spawn_test_server().await;

    let resp = reqwest::get(server.url("/v1/rpc/healthCheck")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), r#"{"health":"OK"}"#);

    let resp = reqwest::Client::new()
        .post(server.url("/v1/rpc/healthCheck"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), r#"{"health":"OK"}"#);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let server = spawn_test_server().await;
    let resp = reqwest::get(server.url("/v1/rpc/nonexistent")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn file_handler_rejects_get() {
    let server = spawn_test_server().await;
    let resp = reqwest::get(server.url("/v1/rpc/fileHandler")).await.unwrap();
    assert_eq!(resp.status(), 405);
}

// ── Configuration ───────────────────────────────────────────────

#[test]
fn args_defaults() {
    let args = Args::parse_from(["assetpub-server"]);
    assert_eq!(args.port, 7350);
    assert_eq!(args.asset_root, std::path::PathBuf::from("data/json_files"));
    assert_eq!(args.storage, "assetpub.db");
    assert!(!args.permissive_paths);
    assert!(!args.verbose);
}

#[test]
fn args_build_publisher_with_in_memory_storage() {
    let assets = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(assets.path().join("core")).unwrap();
    std::fs::write(assets.path().join("core").join("1.0.0.json"), EXAMPLE_PRETTY).unwrap();

    let root = assets.path().to_str().unwrap();
    let args = Args::parse_from([
        "assetpub-server",
        "--asset-root",
        root,
        "--storage",
        ":memory:",
    ]);
    let publisher = args.build_publisher().unwrap();

    let body = publisher
        .handle(&format!(r#"{{"hash":"{EXAMPLE_DIGEST}"}}"#))
        .unwrap();
    assert!(body.contains(EXAMPLE_CANONICAL));
}

#[test]
fn args_open_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("store.db");
    let args = Args::parse_from(["assetpub-server", "--storage", db.to_str().unwrap()]);

    let sink = args.open_sink().unwrap();
    assert_eq!(sink.count().unwrap(), 0);
    assert!(db.exists());
}

#[test]
fn args_permissive_flag_selects_policy() {
    use assetpub_publish::SegmentPolicy;

    let args = Args::parse_from(["assetpub-server", "--permissive-paths"]);
    assert_eq!(args.segment_policy(), SegmentPolicy::Permissive);

    let args = Args::parse_from(["assetpub-server"]);
    assert_eq!(args.segment_policy(), SegmentPolicy::Strict);
}
