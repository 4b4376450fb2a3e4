//! Bulk and paginated catalog retrieval.

use modmirror::settings::FetchStrategy;
use modmirror::sources::{GeodeIndex, Upstream};

use crate::common::{mod_json, spawn_fake_index, upstream_settings};

fn ids(mods: &[modmirror::model::ModRecord]) -> Vec<&str> {
    mods.iter().map(|m| m.id.as_str()).collect()
}

/// What: Bulk strategy asks for the count, then requests everything at once.
///
/// Inputs:
/// - Fake index with three mods.
///
/// Output:
/// - Two requests (`per_page=1`, then `per_page=3`) carrying the fixed filters.
#[tokio::test]
async fn bulk_counts_then_fetches_all() {
    let mods = vec![
        mod_json("geode.loader", "Geode", 900),
        mod_json("hjfod.betteredit", "BetterEdit", 500),
        mod_json("alphalaneous.edit_mirror", "Edit Mirror", 100),
    ];
    let (base, index) = spawn_fake_index(mods).await;
    let client = GeodeIndex::new(upstream_settings(&base, FetchStrategy::Bulk, 100)).expect("client");

    let fetched = client.fetch_catalog().await.expect("catalog");
    assert_eq!(
        ids(&fetched),
        ["geode.loader", "hjfod.betteredit", "alphalaneous.edit_mirror"]
    );
    assert_eq!(fetched[1].download_count, 500);
    assert_eq!(fetched[1].name(), Some("BetterEdit"));
    assert_eq!(fetched[0].extra.get("featured"), Some(&serde_json::json!(false)));

    let requests = index.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["per_page"], "1");
    assert_eq!(requests[1]["per_page"], "3");
    for q in &requests {
        assert_eq!(q["page"], "1");
        assert_eq!(q["gd"], "2.206");
        assert_eq!(q["geode"], "3.4.0");
        assert_eq!(q["platforms"], "android64");
        assert_eq!(q["sort"], "downloads");
    }
}

#[tokio::test]
async fn bulk_with_zero_count_makes_a_single_request() {
    let (base, index) = spawn_fake_index(Vec::new()).await;
    let client = GeodeIndex::new(upstream_settings(&base, FetchStrategy::Bulk, 100)).expect("client");
    let fetched = client.fetch_catalog().await.expect("catalog");
    assert!(fetched.is_empty());
    assert_eq!(index.requests().len(), 1);
}

/// What: Paginated strategy walks pages until the reported total is reached.
///
/// Inputs:
/// - Five mods, page size 2.
///
/// Output:
/// - Pages 1, 2, 3 requested; all five mods in upstream order.
#[tokio::test]
async fn paginated_walks_every_page() {
    let mods: Vec<_> = (1..=5)
        .map(|i| mod_json(&format!("dev.mod{i}"), &format!("Mod {i}"), 10 * i))
        .collect();
    let (base, index) = spawn_fake_index(mods).await;
    let client =
        GeodeIndex::new(upstream_settings(&base, FetchStrategy::Paginated, 2)).expect("client");

    let fetched = client.fetch_catalog().await.expect("catalog");
    assert_eq!(
        ids(&fetched),
        ["dev.mod1", "dev.mod2", "dev.mod3", "dev.mod4", "dev.mod5"]
    );
    let pages: Vec<_> = index
        .requests()
        .iter()
        .map(|q| (q["page"].clone(), q["per_page"].clone()))
        .collect();
    assert_eq!(
        pages,
        [
            ("1".to_string(), "2".to_string()),
            ("2".to_string(), "2".to_string()),
            ("3".to_string(), "2".to_string()),
        ]
    );
}

/// What: An overstated count stops at the first empty page instead of looping.
#[tokio::test]
async fn paginated_stops_on_empty_page() {
    let mods: Vec<_> = (1..=3)
        .map(|i| mod_json(&format!("dev.mod{i}"), "M", i))
        .collect();
    let (base, index) = spawn_fake_index(mods).await;
    *index.reported_count.lock().expect("lock") = Some(10);
    let client =
        GeodeIndex::new(upstream_settings(&base, FetchStrategy::Paginated, 2)).expect("client");

    let fetched = client.fetch_catalog().await.expect("catalog");
    assert_eq!(fetched.len(), 3);
    assert_eq!(index.requests().len(), 3);
}

#[tokio::test]
async fn logo_is_fetched_as_raw_bytes() {
    let (base, _index) = spawn_fake_index(Vec::new()).await;
    let client = GeodeIndex::new(upstream_settings(&base, FetchStrategy::Bulk, 100)).expect("client");
    let bytes = client.fetch_logo("geode.loader").await.expect("logo");
    assert_eq!(bytes, crate::common::logo_bytes("geode.loader"));
}
