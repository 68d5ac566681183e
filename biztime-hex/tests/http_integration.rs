//! HTTP-level tests for the BizTime router.
//!
//! Each test builds a fresh router over an in-memory SQLite database and
//! drives it with `oneshot`, asserting on status codes and JSON bodies.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use biztime_hex::{BizTimeService, inbound::HttpServer};
use biztime_repo::SqliteRepo;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Helper to create a router over a fresh in-memory database.
async fn create_app() -> Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    HttpServer::new(BizTimeService::new(repo)).router()
}

/// Sends a request and returns status plus parsed JSON body.
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_company(app: &Router, code: &str, name: &str) {
    let (status, _) = send(
        app,
        Method::POST,
        "/companies",
        Some(json!({"code": code, "name": name, "description": "seeded"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn create_invoice(app: &Router, comp_code: &str, amt: f64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/invoices",
        Some(json!({"comp_code": comp_code, "amt": amt})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["invoice"]["id"].as_i64().unwrap()
}

fn assert_error(body: &Value, status: StatusCode, message: &str) {
    assert_eq!(body["error"]["status"], status.as_u16());
    assert_eq!(body["error"]["message"], message);
}

#[tokio::test]
async fn test_health() {
    let app = create_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_create_company_echoes_body() {
    let app = create_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/companies",
        Some(json!({"code": "google", "name": "Google", "description": "Search engine"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"company": {"code": "google", "name": "Google", "description": "Search engine"}})
    );
}

#[tokio::test]
async fn test_create_company_derives_code() {
    let app = create_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/companies",
        Some(json!({"name": "Apple Computer!"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["company"]["code"], "applecomputer");
    assert_eq!(body["company"]["description"], Value::Null);
}

#[tokio::test]
async fn test_company_codes_are_url_safe() {
    let app = create_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/companies",
        Some(json!({"name": "A/B Testing #1?"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["company"]["code"], "abtesting1");

    let (status, _) = send(&app, Method::GET, "/companies/abtesting1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/companies",
        Some(json!({"code": "a/b", "name": "Slashed"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(
        &body,
        StatusCode::BAD_REQUEST,
        "code may only contain letters, digits, '-' and '_'",
    );

    let (status, _) = send(
        &app,
        Method::POST,
        "/industries",
        Some(json!({"code": "r&d", "industry": "Research"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_company_validation_errors() {
    let app = create_app().await;

    let (status, body) = send(&app, Method::POST, "/companies", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, StatusCode::BAD_REQUEST, "name is required");

    let (status, body) = send(&app, Method::POST, "/companies", Some(json!({"name": "!!!"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(
        &body,
        StatusCode::BAD_REQUEST,
        "code could not be derived from name",
    );
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = create_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/companies")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["status"], 400);
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_duplicate_company_conflicts() {
    let app = create_app().await;
    create_company(&app, "apple", "Apple").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/companies",
        Some(json!({"code": "apple", "name": "Apple again"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(
        &body,
        StatusCode::CONFLICT,
        "Company with code of apple already exists.",
    );
}

#[tokio::test]
async fn test_get_company_with_invoices_and_industries() {
    let app = create_app().await;
    create_company(&app, "apple", "Apple").await;
    let first = create_invoice(&app, "apple", 100.0).await;
    let second = create_invoice(&app, "apple", 200.0).await;

    send(
        &app,
        Method::POST,
        "/industries",
        Some(json!({"code": "tech", "industry": "Technology"})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/industries/tech/companies",
        Some(json!({"comp_code": "apple"})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/companies/apple", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company"]["code"], "apple");
    assert_eq!(body["company"]["invoices"], json!([first, second]));
    assert_eq!(
        body["company"]["industries"],
        json!([{"code": "tech", "industry": "Technology"}])
    );
}

#[tokio::test]
async fn test_get_missing_company() {
    let app = create_app().await;
    let (status, body) = send(&app, Method::GET, "/companies/netflix", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(
        &body,
        StatusCode::NOT_FOUND,
        "Company with code of netflix does not exist.",
    );
}

#[tokio::test]
async fn test_update_company() {
    let app = create_app().await;
    create_company(&app, "apple", "Apple").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/companies/apple",
        Some(json!({"name": "Apple Inc.", "description": "Phones"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"company": {"code": "apple", "name": "Apple Inc.", "description": "Phones"}})
    );

    let (status, body) = send(
        &app,
        Method::PUT,
        "/companies/apple",
        Some(json!({"name": "Apple Inc.", "description": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, StatusCode::BAD_REQUEST, "description is required");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/companies/netflix",
        Some(json!({"name": "Netflix", "description": "Streaming"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(
        &body,
        StatusCode::NOT_FOUND,
        "Company with code of netflix does not exist.",
    );
}

#[tokio::test]
async fn test_delete_company_is_idempotent_and_cascades() {
    let app = create_app().await;
    create_company(&app, "apple", "Apple").await;
    let id = create_invoice(&app, "apple", 100.0).await;

    for _ in 0..2 {
        let (status, body) = send(&app, Method::DELETE, "/companies/apple", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "deleted"}));
    }

    let (status, _) = send(&app, Method::GET, &format!("/invoices/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_invoice_defaults() {
    let app = create_app().await;
    create_company(&app, "spotify", "Spotify").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/invoices",
        Some(json!({"comp_code": "spotify", "amt": 500})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let invoice = &body["invoice"];
    assert_eq!(invoice["comp_code"], "spotify");
    assert_eq!(invoice["amt"], 500.0);
    assert_eq!(invoice["paid"], false);
    assert_eq!(invoice["paid_date"], Value::Null);
    assert!(invoice["add_date"].is_string());
}

#[tokio::test]
async fn test_create_invoice_errors() {
    let app = create_app().await;
    create_company(&app, "apple", "Apple").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/invoices",
        Some(json!({"comp_code": "ghost", "amt": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(
        &body,
        StatusCode::NOT_FOUND,
        "Company with code of ghost does not exist.",
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/invoices",
        Some(json!({"comp_code": "apple", "amt": -5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(
        &body,
        StatusCode::BAD_REQUEST,
        "amt must be a positive number",
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/invoices",
        Some(json!({"comp_code": "apple"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, StatusCode::BAD_REQUEST, "amt is required");
}

#[tokio::test]
async fn test_list_invoices() {
    let app = create_app().await;
    create_company(&app, "apple", "Apple").await;
    let id = create_invoice(&app, "apple", 100.0).await;

    let (status, body) = send(&app, Method::GET, "/invoices", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"invoices": [{"id": id, "comp_code": "apple"}]}));
}

#[tokio::test]
async fn test_get_invoice_embeds_company() {
    let app = create_app().await;
    create_company(&app, "apple", "Apple").await;
    let id = create_invoice(&app, "apple", 100.0).await;

    let (status, body) = send(&app, Method::GET, &format!("/invoices/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    let invoice = &body["invoice"];
    assert_eq!(invoice["id"], id);
    assert!(invoice.get("comp_code").is_some());
    assert_eq!(
        invoice["company"],
        json!({"code": "apple", "name": "Apple", "description": "seeded"})
    );
}

#[tokio::test]
async fn test_missing_and_malformed_invoice_ids() {
    let app = create_app().await;

    let (status, body) = send(&app, Method::GET, "/invoices/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(
        &body,
        StatusCode::NOT_FOUND,
        "Invoice with id of 0 does not exist.",
    );

    let (status, body) = send(&app, Method::GET, "/invoices/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(
        &body,
        StatusCode::NOT_FOUND,
        "Invoice with id of abc does not exist.",
    );
}

#[tokio::test]
async fn test_update_invoice_paid_date_lifecycle() {
    let app = create_app().await;
    create_company(&app, "apple", "Apple").await;
    let id = create_invoice(&app, "apple", 100.0).await;
    let uri = format!("/invoices/{id}");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"amt": 150, "paid": true}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invoice"]["paid"], true);
    assert_eq!(body["invoice"]["amt"], 150.0);
    let stamped = body["invoice"]["paid_date"].clone();
    assert!(stamped.is_string());

    let (_, body) = send(&app, Method::PUT, &uri, Some(json!({"amt": 175, "paid": true}))).await;
    assert_eq!(body["invoice"]["paid_date"], stamped);

    // paid omitted means unpaid
    let (_, body) = send(&app, Method::PUT, &uri, Some(json!({"amt": 175}))).await;
    assert_eq!(body["invoice"]["paid"], false);
    assert_eq!(body["invoice"]["paid_date"], Value::Null);
}

#[tokio::test]
async fn test_update_missing_invoice() {
    let app = create_app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/invoices/42",
        Some(json!({"amt": 10, "paid": true})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(
        &body,
        StatusCode::NOT_FOUND,
        "Invoice with id of 42 does not exist.",
    );
}

#[tokio::test]
async fn test_delete_invoice_is_idempotent() {
    let app = create_app().await;
    create_company(&app, "apple", "Apple").await;
    let id = create_invoice(&app, "apple", 100.0).await;
    let uri = format!("/invoices/{id}");

    for _ in 0..2 {
        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "deleted"}));
    }
}

#[tokio::test]
async fn test_industries_flow() {
    let app = create_app().await;
    create_company(&app, "apple", "Apple").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/industries",
        Some(json!({"code": "tech", "industry": "Technology"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"industry": {"code": "tech", "industry": "Technology"}}));

    let (status, body) = send(
        &app,
        Method::POST,
        "/industries/tech/companies",
        Some(json!({"comp_code": "apple"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"association": {"comp_code": "apple", "ind_code": "tech"}})
    );

    let (status, _) = send(
        &app,
        Method::POST,
        "/industries/tech/companies",
        Some(json!({"comp_code": "apple"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::POST,
        "/industries/mining/companies",
        Some(json!({"comp_code": "apple"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(
        &body,
        StatusCode::NOT_FOUND,
        "Industry with code of mining does not exist.",
    );

    let (status, body) = send(&app, Method::GET, "/industries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"industries": [{"code": "tech", "industry": "Technology", "companies": ["apple"]}]})
    );
}

#[tokio::test]
async fn test_unknown_route_and_method() {
    let app = create_app().await;

    let (status, body) = send(&app, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, StatusCode::NOT_FOUND, "Not Found");

    let (status, body) = send(&app, Method::PATCH, "/companies", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = create_app().await;
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "BizTime API");
    assert!(body["paths"]["/invoices/{id}"].is_object());
}
