//! Integration tests against a scripted mock backend.
//!
//! A local axum server on an ephemeral port plays the role of the deployment
//! under test, recording what the harness actually sends.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use shopsmoke::client::ApiClient;
use shopsmoke::config::Config;
use shopsmoke::runner::{run_case, run_suite, suites, CaseSpec, SessionState};

#[derive(Default)]
struct Recorded {
    register_email: Option<String>,
    me_auth_header: Option<String>,
    favorite_body: Option<Value>,
    me_hits: usize,
    order_count: usize,
}

type Shared = Arc<Mutex<Recorded>>;

async fn register(State(s): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    s.lock().unwrap().register_email = Some(email.clone());
    Json(json!({
        "success": true,
        "token": "t1",
        "user": { "id": "u1", "email": email }
    }))
}

async fn login(State(s): State<Shared>, Json(_body): Json<Value>) -> Json<Value> {
    let email = s.lock().unwrap().register_email.clone().unwrap_or_default();
    Json(json!({
        "success": true,
        "token": "t1",
        "user": { "id": "u1", "email": email }
    }))
}

async fn me(State(s): State<Shared>, headers: HeaderMap) -> Json<Value> {
    let mut rec = s.lock().unwrap();
    rec.me_hits += 1;
    rec.me_auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let email = rec.register_email.clone().unwrap_or_default();
    Json(json!({ "id": "u1", "email": email, "fullName": "Test Shopper" }))
}

async fn create_product(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "id": "p1", "name": body["name"] }))
}

async fn list_products() -> Json<Value> {
    Json(json!([{ "id": "p1", "name": "Atlas Desk Lamp" }]))
}

async fn add_favorite(State(s): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    s.lock().unwrap().favorite_body = Some(body);
    Json(json!({ "success": true }))
}

async fn list_favorites() -> Json<Value> {
    Json(json!([{ "id": "p1" }]))
}

async fn create_order(State(s): State<Shared>, Json(_body): Json<Value>) -> Json<Value> {
    let mut rec = s.lock().unwrap();
    rec.order_count += 1;
    Json(json!({ "id": format!("o{}", rec.order_count), "status": "pending" }))
}

async fn my_orders() -> Json<Value> {
    Json(json!([{ "id": "o1" }]))
}

async fn admin_orders() -> Json<Value> {
    Json(json!([{ "id": "o1", "emailSent": true }]))
}

async fn bank_payment_ok(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({ "success": true, "transactionId": "tx1", "message": "charged" }))
}

async fn transfer_payment_ok(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({ "success": true, "iban": "CY17002001280000001200527600", "message": "awaiting transfer" }))
}

async fn ok_success() -> Json<Value> {
    Json(json!({ "success": true }))
}

fn mock_app(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/profile", put(ok_success))
        .route("/api/products", post(create_product).get(list_products))
        .route("/api/products/:id", put(ok_success).delete(ok_success))
        .route("/api/favorites/add", post(add_favorite))
        .route("/api/favorites", get(list_favorites))
        .route("/api/favorites/remove", delete(ok_success))
        .route("/api/orders", post(create_order))
        .route("/api/orders/my", get(my_orders))
        .route("/api/admin/login", post(ok_success))
        .route("/api/admin/orders", get(admin_orders))
        .route("/api/admin/orders/:id", put(ok_success))
        .route("/api/payment/bank", post(bank_payment_ok))
        .route("/api/payment/transfer", post(transfer_payment_ok))
        .with_state(state)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

fn config_for(base_url: String) -> Config {
    Config {
        base_url,
        timeout_secs: 5,
        ..Config::default()
    }
}

fn case<'a>(suite: &'a [CaseSpec], name: &str) -> &'a CaseSpec {
    suite.iter().find(|c| c.name == name).expect(name)
}

#[tokio::test]
async fn full_suite_passes_against_scripted_backend() {
    let recorded: Shared = Shared::default();
    let base_url = serve(mock_app(recorded.clone())).await;
    let config = config_for(base_url);

    let cases = suites::full_suite();
    let results = run_suite(&config, &cases).await.expect("run");

    let summary = &results.summary;
    assert_eq!(summary.failed, 0, "failures: {:#?}", results.results);
    assert_eq!(summary.passed, cases.len());
    assert_eq!(summary.passed + summary.failed, summary.total);
    assert_eq!(summary.total, results.results.len());
    assert_eq!(summary.success_rate, 100.0);

    let rec = recorded.lock().unwrap();
    assert_eq!(rec.me_auth_header.as_deref(), Some("Bearer t1"));
    assert_eq!(
        rec.favorite_body.as_ref().expect("favorite body"),
        &json!({ "productId": "p1" })
    );
    // the transfer flow created its own order
    assert_eq!(rec.order_count, 2);
}

#[tokio::test]
async fn registration_token_reaches_the_profile_request() {
    let recorded: Shared = Shared::default();
    let base_url = serve(mock_app(recorded.clone())).await;
    let config = config_for(base_url);

    let client = ApiClient::new(&config).expect("client");
    let mut state = SessionState::new(&config);
    let suite = suites::full_suite();

    let result = run_case(&client, case(&suite, "User Registration"), &mut state).await;
    assert!(result.passed, "{}", result.message);
    assert_eq!(state.token.as_deref(), Some("t1"));
    assert_eq!(state.user_id.as_deref(), Some("u1"));

    let result = run_case(&client, case(&suite, "Get User Profile"), &mut state).await;
    assert!(result.passed, "{}", result.message);
    assert_eq!(
        recorded.lock().unwrap().me_auth_header.as_deref(),
        Some("Bearer t1")
    );
}

#[tokio::test]
async fn unmet_precondition_issues_no_request() {
    let recorded: Shared = Shared::default();
    let base_url = serve(mock_app(recorded.clone())).await;
    let config = config_for(base_url);

    let client = ApiClient::new(&config).expect("client");
    let mut state = SessionState::new(&config);
    let suite = suites::full_suite();

    let result = run_case(&client, case(&suite, "Get User Profile"), &mut state).await;
    assert!(!result.passed);
    assert_eq!(result.message, "Missing precondition: token");
    assert_eq!(recorded.lock().unwrap().me_hits, 0);
}

#[tokio::test]
async fn declined_payment_counts_as_pass() {
    async fn declined(Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
        (StatusCode::BAD_REQUEST, Json(json!({ "message": "declined" })))
    }

    let app = Router::new().route("/api/payment/bank", post(declined));
    let base_url = serve(app).await;
    let config = config_for(base_url);

    let client = ApiClient::new(&config).expect("client");
    let mut state = SessionState::new(&config);
    state.order_id = Some("o1".to_string());

    let suite = suites::full_suite();
    let result = run_case(&client, case(&suite, "Bank Payment"), &mut state).await;
    assert!(result.passed, "{}", result.message);
}

#[tokio::test]
async fn payment_server_error_counts_as_failure() {
    async fn broken(Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "gateway down" })),
        )
    }

    let app = Router::new().route("/api/payment/bank", post(broken));
    let base_url = serve(app).await;
    let config = config_for(base_url);

    let client = ApiClient::new(&config).expect("client");
    let mut state = SessionState::new(&config);
    state.order_id = Some("o1".to_string());

    let suite = suites::full_suite();
    let result = run_case(&client, case(&suite, "Bank Payment"), &mut state).await;
    assert!(!result.passed);
    assert!(result.message.starts_with("HTTP 500"));
}

#[tokio::test]
async fn smoke_suite_runs_three_probes() {
    let recorded: Shared = Shared::default();
    let base_url = serve(mock_app(recorded)).await;
    let config = config_for(base_url);

    let results = run_suite(&config, &suites::smoke_suite()).await.expect("run");
    assert_eq!(results.results.len(), 3);
    assert_eq!(results.summary.failed, 0, "failures: {:#?}", results.results);
}
