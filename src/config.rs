/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment under test, e.g. "https://staging.example.com"
    pub base_url: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Demo admin credentials for the admin login case
    pub admin_username: String,

    /// Demo admin password
    pub admin_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}
