//! End-to-end storefront flows driven through the full router.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};

use flashdeal_integration_tests::{TEST_CONFIRMATION_DELAY_MS, TestApp, body_string};

async fn login(app: &mut TestApp) {
    let response = app
        .post_form("/auth/login", "email=shopper%40example.com&password=pw")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn test_health() {
    let mut app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_home_shows_live_deals() {
    let mut app = TestApp::new();
    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Live now"));
    assert!(body.contains("Wireless Noise-Cancelling Headphones"));
    // Upcoming and ended deals stay off the home page
    assert!(!body.contains("Smartwatch Pro Series 7"));
    assert!(!body.contains("Wireless Gaming Mouse"));
}

#[tokio::test]
async fn test_deal_listing_and_category_filter() {
    let mut app = TestApp::new();

    let body = body_string(app.get("/deals").await).await;
    assert!(body.contains("Wireless Noise-Cancelling Headphones"));
    assert!(body.contains("Professional Drone with 4K Camera"));

    let body = body_string(app.get("/deals?category=Gaming").await).await;
    assert!(body.contains("Mechanical Gaming Keyboard"));
    assert!(body.contains("Wireless Gaming Mouse"));
    assert!(!body.contains("Wireless Noise-Cancelling Headphones"));
}

#[tokio::test]
async fn test_unknown_deal_renders_fallback() {
    let mut app = TestApp::new();
    let response = app.get("/deals/999").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("does not exist"));
}

#[tokio::test]
async fn test_countdown_fragment_heading_tracks_status() {
    let mut app = TestApp::new();

    // Active deal counts down to its end
    let body = body_string(app.get("/deals/1/countdown").await).await;
    assert!(body.contains("Ends in"));

    // Upcoming deal counts down to its start
    let body = body_string(app.get("/deals/4/countdown").await).await;
    assert!(body.contains("Starts in"));

    let response = app.get("/deals/999/countdown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_guest_add_to_cart_redirects_to_login() {
    let mut app = TestApp::new();
    let response = app.post_form("/cart/add", "deal_id=1").await;

    let redirect = response.headers().get("HX-Redirect").unwrap();
    assert_eq!(redirect, "/auth/login?return_to=%2Fdeals%2F1");
}

#[tokio::test]
async fn test_login_rejects_invalid_input() {
    let mut app = TestApp::new();

    let response = app
        .post_form("/auth/login", "email=not-an-email&password=pw")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers().get(header::LOCATION).unwrap();
    assert!(location.to_str().unwrap().contains("error=email"));

    let response = app
        .post_form("/auth/login", "email=a%40b.c&password=")
        .await;
    let location = response.headers().get(header::LOCATION).unwrap();
    assert!(location.to_str().unwrap().contains("error=credentials"));
}

#[tokio::test]
async fn test_login_honors_return_to() {
    let mut app = TestApp::new();
    let response = app
        .post_form(
            "/auth/login",
            "email=shopper%40example.com&password=pw&return_to=%2Fdeals%2F3",
        )
        .await;
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/deals/3"
    );
}

#[tokio::test]
async fn test_checkout_requires_login_and_items() {
    let mut app = TestApp::new();

    // Guest is sent to login
    let response = app.get("/checkout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers().get(header::LOCATION).unwrap();
    assert!(location.to_str().unwrap().starts_with("/auth/login"));

    // Logged in with an empty cart gets the empty-cart page
    login(&mut app).await;
    let response = app.get("/checkout").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_empty_cart_submission_surfaces_error() {
    let mut app = TestApp::new();
    login(&mut app).await;

    let response = app.post_form("/checkout", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers().get(header::LOCATION).unwrap();
    assert_eq!(location, "/checkout?error=empty");

    // The empty-cart page carries the error message after the redirect
    let body = body_string(app.get("/checkout?error=empty").await).await;
    assert!(body.contains("Your cart is empty"));
    assert!(body.contains("Your order was not placed"));
}

#[tokio::test]
async fn test_guest_browsing_allocates_no_store() {
    let mut app = TestApp::new();

    app.get("/").await;
    app.get("/deals").await;
    app.get("/deals/1").await;
    app.get("/cart/count").await;
    assert!(app.state().stores().is_empty());

    // A store appears at login and later browsing reuses it
    login(&mut app).await;
    assert_eq!(app.state().stores().len(), 1);
    app.get("/deals").await;
    app.get("/cart/count").await;
    assert_eq!(app.state().stores().len(), 1);
}

#[tokio::test]
async fn test_full_purchase_flow() {
    let mut app = TestApp::new();
    login(&mut app).await;

    // One headphones, two TVs: 89 + 449 x 2
    app.post_form("/cart/add", "deal_id=1").await;
    app.post_form("/cart/add", "deal_id=2").await;
    app.post_form("/cart/add", "deal_id=2").await;

    let body = body_string(app.get("/cart/count").await).await;
    assert!(body.contains('3'));

    let body = body_string(app.get("/checkout").await).await;
    assert!(body.contains("$987.00"));
    assert!(body.contains("Free"));

    // Place the order
    let response = app.post_form("/checkout", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/orders/order-"));

    // The order starts processing and the cart is cleared
    let body = body_string(app.get(&location).await).await;
    assert!(body.contains("Processing"));
    assert!(body.contains("$987.00"));

    let body = body_string(app.get("/cart/count").await).await;
    assert!(!body.contains("cart-badge"));

    // The deferred confirmation settles the order
    tokio::time::sleep(std::time::Duration::from_millis(
        TEST_CONFIRMATION_DELAY_MS * 4,
    ))
    .await;
    let body = body_string(app.get(&format!("{location}/status")).await).await;
    assert!(body.contains("Confirmed"));

    // And it shows up in the history
    let body = body_string(app.get("/orders").await).await;
    assert!(body.contains("order-"));
}

#[tokio::test]
async fn test_remove_and_clear_cart() {
    let mut app = TestApp::new();
    login(&mut app).await;

    app.post_form("/cart/add", "deal_id=1").await;
    app.post_form("/cart/add", "deal_id=3").await;

    let body = body_string(app.post_form("/cart/remove", "deal_id=1").await).await;
    assert!(!body.contains("Wireless Noise-Cancelling Headphones"));
    assert!(body.contains("Mechanical Gaming Keyboard"));

    let body = body_string(app.post_form("/cart/clear", "").await).await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_unpurchasable_deal_rejected() {
    let mut app = TestApp::new();
    login(&mut app).await;

    // Deal 5 is sold out, deal 6 has ended
    let response = app.post_form("/cart/add", "deal_id=5").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.post_form("/cart/add", "deal_id=6").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_clears_cart_but_keeps_orders() {
    let mut app = TestApp::new();
    login(&mut app).await;

    app.post_form("/cart/add", "deal_id=1").await;
    let response = app.post_form("/checkout", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.post_form("/auth/logout", "").await;
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    // Guest again: empty cart, orders gated behind login
    let body = body_string(app.get("/cart/count").await).await;
    assert!(!body.contains("cart-badge"));
    let response = app.get("/orders").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Logging back in on the same session finds the order history
    login(&mut app).await;
    let body = body_string(app.get("/orders").await).await;
    assert!(body.contains("order-"));
}
