//! Integration tests for the cafe catalogue.
//!
//! These tests require:
//! - A migrated database (cargo run -p coffee-wifi-cli -- migrate)
//! - The web server running (cargo run -p coffee-wifi-web)
//!
//! Run with: cargo test -p coffee-wifi-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use uuid::Uuid;

/// Base URL for the web app (configurable via environment).
fn base_url() -> String {
    std::env::var("COFFEE_WIFI_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// A client that keeps the session cookie between requests.
fn cookie_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a fresh throwaway account and leave the client logged in.
async fn register_fresh_user(client: &Client) -> String {
    let base_url = base_url();
    let suffix = Uuid::new_v4().simple().to_string();
    let name = format!("tester-{suffix}");
    let email = format!("tester-{suffix}@example.com");

    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[
            ("name", name.as_str()),
            ("email", email.as_str()),
            ("password", "pw123456"),
        ])
        .send()
        .await
        .expect("Failed to register test user");

    // The register handler redirects to the listing on success
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.url().path().ends_with("/cafes"));

    name
}

// ============================================================================
// End-to-end flow
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running web server"]
async fn test_register_add_and_list_flow() {
    let client = cookie_client();
    let base_url = base_url();

    let contributor = register_fresh_user(&client).await;

    // Add a cafe with wifi checked and toilet unchecked
    let cafe_name = format!("Test Cafe {}", Uuid::new_v4().simple());
    let resp = client
        .post(format!("{base_url}/add"))
        .form(&[
            ("name", cafe_name.as_str()),
            ("location", "Test Town"),
            ("map_url", "https://maps.example.com/test"),
            ("seats", "10-20"),
            ("has_wifi", "on"),
        ])
        .send()
        .await
        .expect("Failed to add cafe");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.url().path().ends_with("/cafes"));

    // The listing shows the cafe and its contributor
    let body = client
        .get(format!("{base_url}/cafes"))
        .send()
        .await
        .expect("Failed to fetch listing")
        .text()
        .await
        .expect("Failed to read listing");
    assert!(body.contains(&cafe_name));
    assert!(body.contains(&contributor));
}

#[tokio::test]
#[ignore = "Requires a running web server"]
async fn test_add_requires_login() {
    // No cookie store: anonymous submission
    let client = Client::new();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/add"))
        .form(&[
            ("name", format!("Anon Cafe {}", Uuid::new_v4().simple()).as_str()),
            ("location", "Nowhere"),
            ("map_url", "https://maps.example.com/anon"),
            ("seats", "5"),
        ])
        .send()
        .await
        .expect("Failed to post cafe");

    // Redirected to the login page with a flash message
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.url().path().ends_with("/login"));
}

#[tokio::test]
#[ignore = "Requires a running web server"]
async fn test_delete_is_admin_only() {
    let client = cookie_client();
    let base_url = base_url();

    // Registering twice leaves the client logged in as the second account,
    // which can never hold the admin identifier (id 1)
    register_fresh_user(&client).await;
    register_fresh_user(&client).await;

    let resp = client
        .get(format!("{base_url}/delete/999999"))
        .send()
        .await
        .expect("Failed to call delete");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires a running web server"]
async fn test_search_unknown_name_is_empty_not_error() {
    let client = Client::new();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/search"))
        .form(&[("name", format!("No Such Cafe {}", Uuid::new_v4().simple()))])
        .send()
        .await
        .expect("Failed to search");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read results");
    assert!(body.contains("No cafes found."));
}
