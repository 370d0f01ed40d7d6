//! Home, detail and infrastructure pages.

#![allow(clippy::unwrap_used)]

use mealfinder_integration_tests::{TestContext, api_path, meal, meals, no_meals};
use reqwest::StatusCode;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_featured(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path(api_path("search.php")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(meals(vec![meal("52771", "Arrabiata"), meal("52772", "Teriyaki")])),
        )
        .mount(&ctx.mealdb)
        .await;
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/health").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert!(
        resp.headers()
            .get("content-security-policy")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("https://www.themealdb.com")
    );
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_home_renders_partial_trending_with_notice() {
    let ctx = TestContext::new().await;
    mount_featured(&ctx).await;

    // Five picks succeed, the sixth upstream call fails
    Mock::given(method("GET"))
        .and(path(api_path("random.php")))
        .respond_with(ResponseTemplate::new(200).set_body_json(meals(vec![meal("1", "Laksa")])))
        .up_to_n_times(5)
        .mount(&ctx.mealdb)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("random.php")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.mealdb)
        .await;

    let resp = ctx.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();

    assert!(body.contains("Laksa"));
    assert!(body.contains("Some recipes could not be loaded"));
    assert!(!body.contains("Unable to load trending."));
    assert!(body.contains("Arrabiata"));
    assert!(body.contains("/search?q=chicken"));
}

#[tokio::test]
async fn test_home_trending_error_when_every_pick_fails() {
    let ctx = TestContext::new().await;
    mount_featured(&ctx).await;
    Mock::given(method("GET"))
        .and(path(api_path("random.php")))
        .respond_with(ResponseTemplate::new(503))
        .expect(6)
        .mount(&ctx.mealdb)
        .await;

    let body = ctx.get("/").await.text().await.unwrap();

    assert!(body.contains("Unable to load trending."));
    // Featured still renders on its own
    assert!(body.contains("Teriyaki"));
}

#[tokio::test]
async fn test_recipe_detail() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path(api_path("lookup.php")))
        .and(query_param("i", "52771"))
        .respond_with(ResponseTemplate::new(200).set_body_json(meals(vec![meal("52771", "Laksa")])))
        .mount(&ctx.mealdb)
        .await;

    let resp = ctx.get("/recipe?id=52771").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();

    assert!(body.contains("<h1>Laksa</h1>"));
    assert!(body.contains("200g Rice noodles"));
    assert!(body.contains("1 can Coconut milk"));
    assert!(body.contains("Add noodles."));
    assert!(body.contains("No video"));
}

#[tokio::test]
async fn test_recipe_not_found() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path(api_path("lookup.php")))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_meals()))
        .mount(&ctx.mealdb)
        .await;

    let resp = ctx.get("/recipe?id=1").await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.text().await.unwrap().contains("Recipe not found."));
}

#[tokio::test]
async fn test_recipe_upstream_failure() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path(api_path("lookup.php")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.mealdb)
        .await;

    let resp = ctx.get("/recipe?id=1").await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert!(resp.text().await.unwrap().contains("Failed to load recipe."));
}

#[tokio::test]
async fn test_recipe_without_id_makes_no_request() {
    let ctx = TestContext::new().await;

    let resp = ctx.get("/recipe").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("No recipe selected"));
    assert_eq!(ctx.mealdb_requests().await, 0);
}
