//! Failure classification: transport and status errors are `Fetch`, bad bodies are `DataShape`.

use modmirror::settings::FetchStrategy;
use modmirror::sources::{GeodeIndex, Upstream};

use crate::common::{Mode, mod_json, spawn_fake_index, upstream_settings};

#[tokio::test]
async fn server_error_is_a_fetch_error() {
    let (base, index) = spawn_fake_index(vec![mod_json("a.b", "AB", 1)]).await;
    index.set_mode(Mode::Status(500));
    let client = GeodeIndex::new(upstream_settings(&base, FetchStrategy::Bulk, 100)).expect("client");
    let err = client.fetch_catalog().await.expect_err("must fail");
    assert_eq!(err.kind(), "fetch");
    assert!(err.to_string().contains("500"));
    assert_eq!(index.requests().len(), 1);
}

#[tokio::test]
async fn missing_data_array_is_a_shape_error() {
    let (base, index) = spawn_fake_index(vec![mod_json("a.b", "AB", 1)]).await;
    index.set_mode(Mode::Malformed);
    for strategy in [FetchStrategy::Bulk, FetchStrategy::Paginated] {
        let client = GeodeIndex::new(upstream_settings(&base, strategy, 100)).expect("client");
        let err = client.fetch_catalog().await.expect_err("must fail");
        assert_eq!(err.kind(), "data_shape");
    }
}

/// What: A failing later page aborts the whole paginated fetch.
#[tokio::test]
async fn paginated_failure_midway_returns_error() {
    let mods: Vec<_> = (1..=4)
        .map(|i| mod_json(&format!("dev.mod{i}"), "M", i))
        .collect();
    let (base, index) = spawn_fake_index(mods).await;
    let client =
        GeodeIndex::new(upstream_settings(&base, FetchStrategy::Paginated, 2)).expect("client");
    let first = client.get_page(1, 2).await.expect("page 1");
    assert_eq!(first.count, 4);
    index.set_mode(Mode::Status(503));
    let err = client.fetch_catalog().await.expect_err("must fail");
    assert_eq!(err.kind(), "fetch");
}

#[tokio::test]
async fn missing_logo_is_a_fetch_error() {
    let (base, index) = spawn_fake_index(Vec::new()).await;
    index
        .failing_logos
        .lock()
        .expect("lock")
        .push("gone.mod".to_string());
    let client = GeodeIndex::new(upstream_settings(&base, FetchStrategy::Bulk, 100)).expect("client");
    let err = client.fetch_logo("gone.mod").await.expect_err("404");
    assert_eq!(err.kind(), "fetch");
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn unreachable_index_is_a_fetch_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let base = format!("http://{addr}");
    let client = GeodeIndex::new(upstream_settings(&base, FetchStrategy::Bulk, 100)).expect("client");
    let err = client.fetch_catalog().await.expect_err("refused");
    assert_eq!(err.kind(), "fetch");
}
