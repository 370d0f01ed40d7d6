//! Search page and results fragment.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use mealfinder_integration_tests::{TestContext, api_path, meal, meals, no_meals};
use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_search(ctx: &TestContext, endpoint: &str, param: &str, query: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(api_path(endpoint)))
        .and(query_param(param, query))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&ctx.mealdb)
        .await;
}

#[tokio::test]
async fn test_search_merges_name_and_ingredient_results() {
    let ctx = TestContext::new().await;
    mount_search(
        &ctx,
        "search.php",
        "s",
        "beef",
        meals(vec![meal("1", "Beef stew"), meal("2", "Beef pie")]),
    )
    .await;
    mount_search(
        &ctx,
        "filter.php",
        "i",
        "beef",
        meals(vec![meal("2", "Beef pie"), meal("3", "Pho")]),
    )
    .await;

    let body = ctx.get("/search?q=beef").await.text().await.unwrap();

    assert!(body.contains("3 result(s) for"));
    assert_eq!(body.matches("/recipe?id=2").count(), 1);
    let stew = body.find("/recipe?id=1").unwrap();
    let pho = body.find("/recipe?id=3").unwrap();
    assert!(stew < pho);
}

#[tokio::test]
async fn test_search_without_query_prompts() {
    let ctx = TestContext::new().await;

    let body = ctx.get("/search").await.text().await.unwrap();

    assert!(body.contains("Type ingredient or recipe name above to search."));
    assert!(body.contains("data-controller-id"));
    assert_eq!(ctx.mealdb_requests().await, 0);
}

#[tokio::test]
async fn test_search_no_matches_is_empty() {
    let ctx = TestContext::new().await;
    mount_search(&ctx, "search.php", "s", "zzz", no_meals()).await;
    mount_search(&ctx, "filter.php", "i", "zzz", no_meals()).await;

    let body = ctx
        .get("/search/results?q=zzz")
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("No results for"));
    assert!(!body.contains("Failed to load results."));
}

#[tokio::test]
async fn test_search_upstream_down_is_error() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&ctx.mealdb)
        .await;

    let body = ctx
        .get("/search/results?q=beef")
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("Failed to load results."));
}

#[tokio::test]
async fn test_superseded_response_is_dropped() {
    let ctx = TestContext::new().await;
    let slow = ResponseTemplate::new(200)
        .set_body_json(meals(vec![meal("1", "Slow stew")]))
        .set_delay(Duration::from_millis(800));
    Mock::given(method("GET"))
        .and(query_param("s", "slow"))
        .respond_with(slow.clone())
        .mount(&ctx.mealdb)
        .await;
    Mock::given(method("GET"))
        .and(query_param("i", "slow"))
        .respond_with(slow)
        .mount(&ctx.mealdb)
        .await;
    mount_search(&ctx, "search.php", "s", "fast", meals(vec![meal("2", "Fast fry")])).await;
    mount_search(&ctx, "filter.php", "i", "fast", no_meals()).await;

    let cid = Uuid::new_v4();
    let slow_url = format!("/search/results?q=slow&cid={cid}&seq=1");
    let fast_url = format!("/search/results?q=fast&cid={cid}&seq=2");

    let first = ctx.get(&slow_url);
    let second = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        ctx.get(&fast_url).await
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(second.status(), StatusCode::OK);
    assert!(second.text().await.unwrap().contains("Fast fry"));
}

#[tokio::test]
async fn test_older_submit_arriving_late_is_dropped_without_fetching() {
    let ctx = TestContext::new().await;
    mount_search(&ctx, "search.php", "s", "newer", meals(vec![meal("2", "Fast fry")])).await;
    mount_search(&ctx, "filter.php", "i", "newer", no_meals()).await;

    let cid = Uuid::new_v4();
    let newer_url = format!("/search/results?q=newer&cid={cid}&seq=2");
    let older_url = format!("/search/results?q=older&cid={cid}&seq=1");

    let newer = ctx.get(&newer_url).await;
    assert_eq!(newer.status(), StatusCode::OK);
    assert_eq!(ctx.mealdb_requests().await, 2);

    let older = ctx.get(&older_url).await;
    assert_eq!(older.status(), StatusCode::NO_CONTENT);
    assert_eq!(ctx.mealdb_requests().await, 2);
}

#[tokio::test]
async fn test_requests_from_different_pages_are_independent() {
    let ctx = TestContext::new().await;
    mount_search(&ctx, "search.php", "s", "fast", meals(vec![meal("2", "Fast fry")])).await;
    mount_search(&ctx, "filter.php", "i", "fast", no_meals()).await;

    let url_a = format!("/search/results?q=fast&cid={}&seq=1", Uuid::new_v4());
    let url_b = format!("/search/results?q=fast&cid={}&seq=1", Uuid::new_v4());
    let (a, b) = tokio::join!(ctx.get(&url_a), ctx.get(&url_b));

    assert_eq!(a.status(), StatusCode::OK);
    assert_eq!(b.status(), StatusCode::OK);
}
