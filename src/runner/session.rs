use uuid::Uuid;

use crate::config::Config;

/// Fields of the session bag a case can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey {
    Token,
    UserId,
    ProductId,
    OrderId,
    TransferOrderId,
    TransactionId,
}

impl StateKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKey::Token => "token",
            StateKey::UserId => "user id",
            StateKey::ProductId => "product id",
            StateKey::OrderId => "order id",
            StateKey::TransferOrderId => "transfer order id",
            StateKey::TransactionId => "transaction id",
        }
    }
}

/// Mutable state threaded through one run. Identifiers are set by the case
/// that creates the resource and read by later cases; nothing survives the
/// run.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub product_id: Option<String>,
    pub order_id: Option<String>,
    pub transfer_order_id: Option<String>,

    /// Set only when the bank charge actually went through; the invoice
    /// verification case is meaningless without it.
    pub transaction_id: Option<String>,

    /// Disposable registration email, randomized per run
    pub user_email: String,
    pub user_password: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl SessionState {
    pub fn new(config: &Config) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self {
            token: None,
            user_id: None,
            product_id: None,
            order_id: None,
            transfer_order_id: None,
            transaction_id: None,
            user_email: format!("testuser_{}@example.com", &suffix[..8]),
            user_password: "SecurePass123!".to_string(),
            admin_username: config.admin_username.clone(),
            admin_password: config.admin_password.clone(),
        }
    }

    pub fn has(&self, key: StateKey) -> bool {
        match key {
            StateKey::Token => self.token.is_some(),
            StateKey::UserId => self.user_id.is_some(),
            StateKey::ProductId => self.product_id.is_some(),
            StateKey::OrderId => self.order_id.is_some(),
            StateKey::TransferOrderId => self.transfer_order_id.is_some(),
            StateKey::TransactionId => self.transaction_id.is_some(),
        }
    }
}
