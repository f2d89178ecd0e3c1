mod common;

use axum::{Router, http::StatusCode, routing::post};
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;

use domain_purchase::api::handlers::check_domain_handler;
use domain_purchase::domain::action::AjaxAction;
use domain_purchase::domain::reseller::Reseller;
use domain_purchase::state::AppState;

use common::{FakeReseller, USER_ID, as_manager, as_reader, nonce};

const SITE_ID: i64 = 7;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/ajax/check-domain", post(check_domain_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn form(sld: &str, tld: &str) -> Value {
    json!({
        "nonce": nonce(AjaxAction::CheckDomain, USER_ID),
        "sld": sld,
        "tld": tld,
    })
}

fn extract_nonce(html: &str) -> String {
    let start = html.find("nonce=").unwrap() + "nonce=".len();
    html[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect()
}

#[sqlx::test]
async fn test_check_available_domain(pool: PgPool) {
    let reseller: Arc<dyn Reseller> = Arc::new(FakeReseller::new(12.5));
    let (state, _rx) = common::create_test_state(pool, Some(reseller));
    let server = server(state);

    let response = as_manager(server.post("/ajax/check-domain"), USER_ID, SITE_ID)
        .form(&form("example", "com"))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["available"], true);

    let html = json["data"]["html"].as_str().unwrap();
    assert!(html.contains("domainmapping-info-success"));
    assert!(html.contains("EXAMPLE.COM"));
    assert!(html.contains("$12.50"));
    assert!(html.contains("https://sites.example.org/ajax/purchase-form?"));
    assert!(html.contains("action=domainmapping_get_purchase_form"));
    assert!(html.contains("tld=com"));

    let link_nonce = extract_nonce(html);
    assert_eq!(link_nonce.len(), 20);
    assert!(common::nonce_service().verify(AjaxAction::GetPurchaseForm, USER_ID, &link_nonce));
}

#[sqlx::test]
async fn test_check_normalizes_input(pool: PgPool) {
    let reseller: Arc<dyn Reseller> = Arc::new(FakeReseller::new(1234.0));
    let (state, _rx) = common::create_test_state(pool, Some(reseller));
    let server = server(state);

    let response = as_manager(server.post("/ajax/check-domain"), USER_ID, SITE_ID)
        .form(&form("  Example ", " NET"))
        .await;

    let json = response.json::<Value>();
    let html = json["data"]["html"].as_str().unwrap();
    assert!(html.contains("EXAMPLE.NET"));
    assert!(html.contains("$1,234.00"));
}

#[sqlx::test]
async fn test_check_unavailable_domain(pool: PgPool) {
    let reseller: Arc<dyn Reseller> =
        Arc::new(FakeReseller::new(12.5).with_taken("taken.com"));
    let (state, _rx) = common::create_test_state(pool, Some(reseller));
    let server = server(state);

    let response = as_manager(server.post("/ajax/check-domain"), USER_ID, SITE_ID)
        .form(&form("taken", "com"))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["available"], false);

    let html = json["data"]["html"].as_str().unwrap();
    assert!(html.contains("domainmapping-info-error"));
    assert!(html.contains("taken.com"));
    assert!(html.contains("is not available to purchase"));
    assert!(!html.contains("domainmapping-purchase-link"));
}

#[sqlx::test]
async fn test_check_invalid_domain(pool: PgPool) {
    let reseller: Arc<dyn Reseller> = Arc::new(FakeReseller::new(12.5));
    let (state, _rx) = common::create_test_state(pool, Some(reseller));
    let server = server(state);

    for (sld, tld) in [("", "com"), ("example", ""), ("-bad-", "com"), ("ex ample", "com")] {
        let response = as_manager(server.post("/ajax/check-domain"), USER_ID, SITE_ID)
            .form(&form(sld, tld))
            .await;

        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["message"], "Domain name is invalid.");
    }
}

#[sqlx::test]
async fn test_check_missing_fields_is_invalid(pool: PgPool) {
    let reseller: Arc<dyn Reseller> = Arc::new(FakeReseller::new(12.5));
    let (state, _rx) = common::create_test_state(pool, Some(reseller));
    let server = server(state);

    let response = as_manager(server.post("/ajax/check-domain"), USER_ID, SITE_ID)
        .form(&json!({ "nonce": nonce(AjaxAction::CheckDomain, USER_ID) }))
        .await;

    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["data"]["message"], "Domain name is invalid.");
}

#[sqlx::test]
async fn test_check_without_reseller(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool, None);
    let server = server(state);

    let response = as_manager(server.post("/ajax/check-domain"), USER_ID, SITE_ID)
        .form(&form("example", "com"))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "success": false }));
}

#[sqlx::test]
async fn test_check_requires_capability(pool: PgPool) {
    let reseller: Arc<dyn Reseller> = Arc::new(FakeReseller::new(12.5));
    let (state, _rx) = common::create_test_state(pool, Some(reseller));
    let server = server(state);

    let response = as_reader(server.post("/ajax/check-domain"), USER_ID, SITE_ID)
        .form(&form("example", "com"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>(), json!({ "success": false }));
}

#[sqlx::test]
async fn test_check_rejects_foreign_nonce(pool: PgPool) {
    let reseller: Arc<dyn Reseller> = Arc::new(FakeReseller::new(12.5));
    let (state, _rx) = common::create_test_state(pool, Some(reseller));
    let server = server(state);

    let cases = [
        // Another user's token
        nonce(AjaxAction::CheckDomain, USER_ID + 1),
        // Another action's token
        nonce(AjaxAction::PurchaseDomain, USER_ID),
        "0123456789abcdef0123".to_string(),
        String::new(),
    ];

    for token in cases {
        let response = as_manager(server.post("/ajax/check-domain"), USER_ID, SITE_ID)
            .form(&json!({ "nonce": token, "sld": "example", "tld": "com" }))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }
}

#[sqlx::test]
async fn test_check_requires_identity_headers(pool: PgPool) {
    let reseller: Arc<dyn Reseller> = Arc::new(FakeReseller::new(12.5));
    let (state, _rx) = common::create_test_state(pool, Some(reseller));
    let server = server(state);

    let response = server
        .post("/ajax/check-domain")
        .form(&form("example", "com"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[sqlx::test]
async fn test_check_json_body_from_reader_is_forbidden(pool: PgPool) {
    let reseller: Arc<dyn Reseller> = Arc::new(FakeReseller::new(12.5));
    let (state, _rx) = common::create_test_state(pool, Some(reseller));
    let server = server(state);

    let response = as_reader(server.post("/ajax/check-domain"), USER_ID, SITE_ID)
        .json(&form("example", "com"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>(), json!({ "success": false }));
}

#[sqlx::test]
async fn test_check_unreadable_body_is_envelope(pool: PgPool) {
    let reseller: Arc<dyn Reseller> = Arc::new(FakeReseller::new(12.5));
    let (state, _rx) = common::create_test_state(pool, Some(reseller));
    let server = server(state);

    // The token cannot be read out of a JSON body, so the gate refuses it
    let response = as_manager(server.post("/ajax/check-domain"), USER_ID, SITE_ID)
        .json(&form("example", "com"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>(), json!({ "success": false }));
}
