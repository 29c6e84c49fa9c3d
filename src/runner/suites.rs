//! Suite catalogs
//!
//! The two deployment variants are two lists of descriptors over the same
//! engine: `full_suite` walks the whole auth/product/favorite/order/payment
//! surface, `smoke_suite` is the three-probe connectivity check.
//!
//! Ordering inside `full_suite` is a fixed contract: registration creates
//! the session before anything needing a bearer; the product exists before
//! favorites and orders reference it; payments run after their order; and
//! update/delete cases come last so they cannot invalidate identifiers the
//! earlier cases still need.

use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::client::HttpReply;
use crate::runner::case::{CaseSpec, Verdict};
use crate::runner::session::{SessionState, StateKey};

pub fn full_suite() -> Vec<CaseSpec> {
    vec![
        CaseSpec {
            name: "User Registration",
            method: Method::POST,
            endpoint: |_| "/auth/register".to_string(),
            body: Some(register_body),
            requires: &[],
            auth: false,
            check: check_register,
            extract: Some(extract_auth),
            settle_ms: None,
        },
        CaseSpec {
            name: "User Login",
            method: Method::POST,
            endpoint: |_| "/auth/login".to_string(),
            body: Some(login_body),
            requires: &[],
            auth: false,
            check: check_login,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Get User Profile",
            method: Method::GET,
            endpoint: |_| "/auth/me".to_string(),
            body: None,
            requires: &[StateKey::Token],
            auth: true,
            check: check_profile,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Update User Profile",
            method: Method::PUT,
            endpoint: |_| "/auth/profile".to_string(),
            body: Some(profile_update_body),
            requires: &[StateKey::Token],
            auth: true,
            check: check_success_flag,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Create Product",
            method: Method::POST,
            endpoint: |_| "/products".to_string(),
            body: Some(product_body),
            requires: &[],
            auth: false,
            check: check_product_created,
            extract: Some(extract_product_id),
            settle_ms: None,
        },
        CaseSpec {
            name: "Get Products",
            method: Method::GET,
            endpoint: |_| "/products".to_string(),
            body: None,
            requires: &[],
            auth: false,
            check: check_array,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Add to Favorites",
            method: Method::POST,
            endpoint: |_| "/favorites/add".to_string(),
            body: Some(favorite_body),
            requires: &[StateKey::Token, StateKey::ProductId],
            auth: true,
            check: check_success_flag,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Get Favorites",
            method: Method::GET,
            endpoint: |_| "/favorites".to_string(),
            body: None,
            requires: &[StateKey::Token],
            auth: true,
            check: check_favorites_list,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Create Order",
            method: Method::POST,
            endpoint: |_| "/orders".to_string(),
            body: Some(order_body),
            requires: &[StateKey::ProductId],
            auth: true,
            check: check_order_created,
            extract: Some(extract_order_id),
            settle_ms: None,
        },
        CaseSpec {
            name: "Get User Orders",
            method: Method::GET,
            endpoint: |_| "/orders/my".to_string(),
            body: None,
            requires: &[StateKey::Token],
            auth: true,
            check: check_my_orders,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Admin Login",
            method: Method::POST,
            endpoint: |_| "/admin/login".to_string(),
            body: Some(admin_login_body),
            requires: &[],
            auth: false,
            check: check_admin_login,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Admin Get Orders",
            method: Method::GET,
            endpoint: |_| "/admin/orders".to_string(),
            body: None,
            requires: &[],
            auth: false,
            check: check_array,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Bank Payment",
            method: Method::POST,
            endpoint: |_| "/payment/bank".to_string(),
            body: Some(bank_payment_body),
            requires: &[StateKey::OrderId],
            auth: false,
            check: check_bank_payment,
            extract: Some(extract_transaction_id),
            // The backend dispatches the invoice email asynchronously; give
            // it a moment before the verification case reads the order back.
            settle_ms: Some(2000),
        },
        CaseSpec {
            name: "Email Invoice Verification",
            method: Method::GET,
            endpoint: |_| "/admin/orders".to_string(),
            body: None,
            // a declined charge produces no invoice to verify
            requires: &[StateKey::OrderId, StateKey::TransactionId],
            auth: false,
            check: check_email_sent,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Create Transfer Order",
            method: Method::POST,
            endpoint: |_| "/orders".to_string(),
            body: Some(transfer_order_body),
            requires: &[StateKey::ProductId],
            auth: true,
            check: check_order_created,
            extract: Some(extract_transfer_order_id),
            settle_ms: None,
        },
        CaseSpec {
            name: "Transfer Payment",
            method: Method::POST,
            endpoint: |_| "/payment/transfer".to_string(),
            body: Some(transfer_payment_body),
            requires: &[StateKey::TransferOrderId],
            auth: false,
            check: check_transfer_payment,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Admin Update Order",
            method: Method::PUT,
            endpoint: |s| format!("/admin/orders/{}", s.order_id.as_deref().unwrap_or_default()),
            body: Some(|_| json!({ "status": "shipped" })),
            requires: &[StateKey::OrderId],
            auth: false,
            check: check_success_flag,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Update Product",
            method: Method::PUT,
            endpoint: |s| format!("/products/{}", s.product_id.as_deref().unwrap_or_default()),
            body: Some(product_update_body),
            requires: &[StateKey::ProductId],
            auth: false,
            check: check_success_flag,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Remove from Favorites",
            method: Method::DELETE,
            endpoint: |_| "/favorites/remove".to_string(),
            body: Some(favorite_body),
            requires: &[StateKey::Token, StateKey::ProductId],
            auth: true,
            check: check_success_flag,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "Delete Product",
            method: Method::DELETE,
            endpoint: |s| format!("/products/{}", s.product_id.as_deref().unwrap_or_default()),
            body: None,
            requires: &[StateKey::ProductId],
            auth: false,
            check: check_success_flag,
            extract: None,
            settle_ms: None,
        },
    ]
}

/// Minimal connectivity probe: one public read, one write, one admin read.
pub fn smoke_suite() -> Vec<CaseSpec> {
    vec![
        CaseSpec {
            name: "Get Products",
            method: Method::GET,
            endpoint: |_| "/products".to_string(),
            body: None,
            requires: &[],
            auth: false,
            check: check_array,
            extract: None,
            settle_ms: None,
        },
        CaseSpec {
            name: "User Registration",
            method: Method::POST,
            endpoint: |_| "/auth/register".to_string(),
            body: Some(register_body),
            requires: &[],
            auth: false,
            check: check_register,
            extract: Some(extract_auth),
            settle_ms: None,
        },
        CaseSpec {
            name: "Admin Get Orders",
            method: Method::GET,
            endpoint: |_| "/admin/orders".to_string(),
            body: None,
            requires: &[],
            auth: false,
            check: check_array,
            extract: None,
            settle_ms: None,
        },
    ]
}

// --- request bodies ---

fn register_body(s: &SessionState) -> Value {
    json!({
        "email": s.user_email,
        "password": s.user_password,
        "fullName": "Test Shopper",
        "phone": "+1 555 0100",
        "address": "12 Harbor Lane, Springfield"
    })
}

fn login_body(s: &SessionState) -> Value {
    json!({
        "email": s.user_email,
        "password": s.user_password
    })
}

fn profile_update_body(_: &SessionState) -> Value {
    json!({
        "fullName": "Test Shopper Updated",
        "phone": "+1 555 0199",
        "address": "98 Harbor Lane, Springfield"
    })
}

fn product_body(_: &SessionState) -> Value {
    json!({
        "name": "Atlas Desk Lamp",
        "description": "Walnut desk lamp with brass fittings",
        "price": 1450,
        "image": "https://via.placeholder.com/400x300?text=Atlas+Desk+Lamp",
        "stock": 5,
        "category": "Lighting",
        "productType": "lamp"
    })
}

fn product_update_body(_: &SessionState) -> Value {
    json!({
        "name": "Atlas Desk Lamp II",
        "description": "Walnut desk lamp, revised brass fittings",
        "price": 1650,
        "image": "https://via.placeholder.com/400x300?text=Atlas+Desk+Lamp+II",
        "stock": 3,
        "category": "Lighting",
        "productType": "lamp"
    })
}

fn favorite_body(s: &SessionState) -> Value {
    json!({ "productId": s.product_id })
}

fn order_body(s: &SessionState) -> Value {
    json!({
        "items": [{
            "id": s.product_id,
            "name": "Atlas Desk Lamp",
            "price": 1450,
            "quantity": 1
        }],
        "totalAmount": 1450,
        "customerInfo": {
            "fullName": "Test Shopper",
            "email": s.user_email,
            "phone": "+1 555 0100",
            "address": "12 Harbor Lane, Springfield"
        },
        "paymentMethod": "bank"
    })
}

fn transfer_order_body(s: &SessionState) -> Value {
    // Separate disposable customer, as the transfer flow invoices its own
    // email address.
    let suffix = Uuid::new_v4().simple().to_string();
    json!({
        "items": [{
            "id": s.product_id,
            "name": "Atlas Desk Lamp",
            "price": 1450,
            "quantity": 1
        }],
        "totalAmount": 1450,
        "customerInfo": {
            "fullName": "Transfer Shopper",
            "email": format!("transfer_{}@example.com", &suffix[..8]),
            "phone": "+1 555 0177",
            "address": "44 Pier Road, Springfield"
        },
        "paymentMethod": "transfer"
    })
}

fn bank_payment_body(s: &SessionState) -> Value {
    json!({
        "orderId": s.order_id,
        "amount": 1450,
        "cardInfo": {
            "cardNumber": "4111111111111111",
            "expiryMonth": "12",
            "expiryYear": "2030",
            "cvv": "123",
            "cardholderName": "TEST SHOPPER"
        }
    })
}

fn transfer_payment_body(s: &SessionState) -> Value {
    json!({ "orderId": s.transfer_order_id })
}

fn admin_login_body(s: &SessionState) -> Value {
    json!({
        "username": s.admin_username,
        "password": s.admin_password
    })
}

// --- checks ---

fn unexpected_status(reply: &HttpReply) -> Verdict {
    Verdict::fail(format!("HTTP {}: {}", reply.status.as_u16(), reply.text))
}

fn not_json(reply: &HttpReply) -> Verdict {
    Verdict::fail(format!(
        "HTTP {} but body is not valid JSON",
        reply.status.as_u16()
    ))
}

/// Identifiers come back as strings or numbers depending on the backend.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn check_register(reply: &HttpReply, _state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    let Some(data) = reply.json() else {
        return not_json(reply);
    };
    if data["success"] == json!(true)
        && data["token"].is_string()
        && id_string(&data["user"]["id"]).is_some()
    {
        Verdict::pass_with(
            "User registered and token issued",
            json!({ "userId": data["user"]["id"] }),
        )
    } else {
        Verdict::fail_with("Missing required response fields", data)
    }
}

fn check_login(reply: &HttpReply, state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    let Some(data) = reply.json() else {
        return not_json(reply);
    };
    if data["success"] == json!(true) && data["token"].is_string() && data["user"].is_object() {
        let token_matches = data["token"].as_str() == state.token.as_deref();
        Verdict::pass_with(
            "Login succeeded",
            json!({ "tokenMatchesRegistration": token_matches }),
        )
    } else {
        Verdict::fail_with("Missing required response fields", data)
    }
}

fn check_profile(reply: &HttpReply, state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    let Some(data) = reply.json() else {
        return not_json(reply);
    };
    let id_matches = id_string(&data["id"]).as_deref() == state.user_id.as_deref();
    let email_matches = data["email"].as_str() == Some(state.user_email.as_str());
    if id_matches && email_matches {
        Verdict::pass_with("Profile matches registered user", json!({ "email": data["email"] }))
    } else {
        Verdict::fail_with("Profile data mismatch", data)
    }
}

/// Shared check for the `{success: true}` acknowledgement shape.
fn check_success_flag(reply: &HttpReply, _state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    let Some(data) = reply.json() else {
        return not_json(reply);
    };
    if data["success"] == json!(true) {
        Verdict::pass("Server acknowledged the operation")
    } else {
        Verdict::fail_with("Server did not acknowledge the operation", data)
    }
}

fn check_array(reply: &HttpReply, _state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    match reply.json() {
        Some(Value::Array(items)) => Verdict::pass(format!("Retrieved {} items", items.len())),
        Some(data) => Verdict::fail_with("Response is not a list", data),
        None => not_json(reply),
    }
}

fn check_product_created(reply: &HttpReply, _state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    let Some(data) = reply.json() else {
        return not_json(reply);
    };
    match (id_string(&data["id"]), data["name"].as_str()) {
        (Some(id), Some(name)) => Verdict::pass_with(
            "Product created",
            json!({ "productId": id, "name": name }),
        ),
        _ => Verdict::fail_with("Missing product data", data),
    }
}

fn check_order_created(reply: &HttpReply, _state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    let Some(data) = reply.json() else {
        return not_json(reply);
    };
    match (id_string(&data["id"]), data["status"].as_str()) {
        (Some(id), Some("pending")) => {
            Verdict::pass_with("Order created", json!({ "orderId": id, "status": "pending" }))
        }
        _ => Verdict::fail_with("Invalid order response", data),
    }
}

fn check_favorites_list(reply: &HttpReply, state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    match reply.json() {
        Some(Value::Array(items)) => {
            let contains = items
                .iter()
                .any(|p| id_string(&p["id"]).as_deref() == state.product_id.as_deref());
            Verdict::pass(format!(
                "Retrieved {} favorites, contains test product: {}",
                items.len(),
                contains
            ))
        }
        Some(data) => Verdict::fail_with("Response is not a list", data),
        None => not_json(reply),
    }
}

fn check_my_orders(reply: &HttpReply, state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    match reply.json() {
        Some(Value::Array(items)) => {
            let contains = items
                .iter()
                .any(|o| id_string(&o["id"]).as_deref() == state.order_id.as_deref());
            Verdict::pass(format!(
                "Retrieved {} orders, contains test order: {}",
                items.len(),
                contains
            ))
        }
        Some(data) => Verdict::fail_with("Response is not a list", data),
        None => not_json(reply),
    }
}

fn check_admin_login(reply: &HttpReply, _state: &SessionState) -> Verdict {
    match reply.status {
        StatusCode::OK => match reply.json() {
            Some(data) if data["success"] == json!(true) => {
                Verdict::pass("Admin session established")
            }
            Some(data) => Verdict::fail_with("Admin login not acknowledged", data),
            None => not_json(reply),
        },
        StatusCode::UNAUTHORIZED => Verdict::fail("Admin credentials rejected (HTTP 401)"),
        _ => unexpected_status(reply),
    }
}

/// The demo gateway randomly declines card payments with HTTP 400 and a
/// `message` body; that rejection path is behavior under test, so it counts
/// as a pass here and only here.
fn check_bank_payment(reply: &HttpReply, _state: &SessionState) -> Verdict {
    match reply.status {
        StatusCode::OK => {
            let Some(data) = reply.json() else {
                return not_json(reply);
            };
            match (data["success"] == json!(true), id_string(&data["transactionId"])) {
                (true, Some(tx)) => Verdict::pass_with(
                    "Payment processed and invoice queued",
                    json!({ "transactionId": tx, "message": data["message"] }),
                ),
                _ => Verdict::fail_with("Payment response incomplete", data),
            }
        }
        StatusCode::BAD_REQUEST => match reply.json() {
            Some(data) if data["message"].is_string() => Verdict::pass_with(
                "Payment rejection path exercised",
                json!({ "message": data["message"] }),
            ),
            Some(data) => Verdict::fail_with("Rejection body missing message", data),
            None => not_json(reply),
        },
        _ => unexpected_status(reply),
    }
}

fn check_transfer_payment(reply: &HttpReply, _state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    let Some(data) = reply.json() else {
        return not_json(reply);
    };
    if data["success"] == json!(true) && data["iban"].is_string() {
        Verdict::pass_with(
            "Transfer instructions returned",
            json!({ "iban": data["iban"], "message": data["message"] }),
        )
    } else {
        Verdict::fail_with("Transfer payment response incomplete", data)
    }
}

fn check_email_sent(reply: &HttpReply, state: &SessionState) -> Verdict {
    if reply.status != StatusCode::OK {
        return unexpected_status(reply);
    }
    let Some(Value::Array(orders)) = reply.json() else {
        return Verdict::fail("Admin order list unavailable");
    };
    let order = orders
        .iter()
        .find(|o| id_string(&o["id"]).as_deref() == state.order_id.as_deref());
    match order {
        Some(o) if o["emailSent"] == json!(true) => {
            Verdict::pass("Invoice email confirmed on the order")
        }
        Some(o) => Verdict::fail_with("Invoice email not confirmed", o.clone()),
        None => Verdict::fail("Test order not present in admin order list"),
    }
}

// --- state extraction ---

fn extract_auth(data: &Value, state: &mut SessionState) {
    if let Some(token) = data["token"].as_str() {
        state.token = Some(token.to_string());
    }
    if let Some(id) = id_string(&data["user"]["id"]) {
        state.user_id = Some(id);
    }
}

fn extract_product_id(data: &Value, state: &mut SessionState) {
    if let Some(id) = id_string(&data["id"]) {
        state.product_id = Some(id);
    }
}

fn extract_order_id(data: &Value, state: &mut SessionState) {
    if let Some(id) = id_string(&data["id"]) {
        state.order_id = Some(id);
    }
}

fn extract_transfer_order_id(data: &Value, state: &mut SessionState) {
    if let Some(id) = id_string(&data["id"]) {
        state.transfer_order_id = Some(id);
    }
}

/// Only present on a completed charge; a passed rejection leaves it unset.
fn extract_transaction_id(data: &Value, state: &mut SessionState) {
    if let Some(tx) = id_string(&data["transactionId"]) {
        state.transaction_id = Some(tx);
    }
}
