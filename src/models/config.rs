use serde::Deserialize;

/// Platform-level moderation flags passed explicitly into offer creation.
///
/// Kept as injected configuration rather than ambient global state so that
/// the offer path is testable with either policy.
#[derive(Debug, Clone, Copy)]
pub struct OfferPolicy {
    /// When true, newly submitted offers go live immediately; otherwise they
    /// wait for moderation.
    pub auto_approve: bool,
}

/// Configuration options for the marketplace server.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_server_address")]
    pub server_address: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    #[serde(default = "default_auto_approve_offers")]
    pub auto_approve_offers: bool,
}

fn default_database_url() -> String {
    "agora.db".to_string()
}

fn default_server_address() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_auto_approve_offers() -> bool {
    true
}
