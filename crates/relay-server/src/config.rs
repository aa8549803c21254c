//! Relay server configuration.
//!
//! Settings are read from command-line flags with environment fallbacks, then
//! validated into a [`RelayConfig`].

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use relay_contacts::RecipientId;
use relay_line::DEFAULT_API_BASE_URL;
use tracing::warn;

use crate::error::{RelayError, RelayResult};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// LINE alert relay - forwards fall alerts to LINE users.
#[derive(Parser, Clone)]
#[command(name = "line-alert-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Channel secret used to verify webhook signatures.
    #[arg(long, env = "CHANNEL_SECRET", hide_env_values = true)]
    pub channel_secret: String,

    /// Channel access token for the Messaging API.
    #[arg(long, env = "CHANNEL_ACCESS_TOKEN", hide_env_values = true)]
    pub channel_access_token: String,

    /// LINE user ID of the administrator.
    #[arg(long, env = "ADMIN_USER_ID")]
    pub admin_user_id: String,

    /// Alert recipient when running with `--recipients single`.
    #[arg(long, env = "USER_ID")]
    pub user_id: Option<String>,

    /// Where alert recipients come from.
    #[arg(long = "recipients", env = "RECIPIENT_MODE", value_enum, default_value_t = RecipientMode::Registry)]
    pub recipient_mode: RecipientMode,

    /// Address to bind to.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Messaging API base URL.
    #[arg(long, env = "LINE_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Timeout in seconds for each push or reply call.
    #[arg(long, env = "LINE_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,
}

/// Source of alert recipients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RecipientMode {
    /// Administrator-managed contact list.
    #[default]
    Registry,
    /// One fixed recipient from `USER_ID`.
    Single,
}

/// Validated recipient configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientConfig {
    /// Contact registry seeded with the administrator.
    Registry,
    /// A single fixed recipient.
    Single(RecipientId),
}

/// Configuration for the relay server.
#[derive(Clone)]
pub struct RelayConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Webhook signing secret.
    pub channel_secret: String,
    /// Messaging API bearer token.
    pub access_token: String,
    /// Administrator identifier.
    pub admin: RecipientId,
    /// Where alert recipients come from.
    pub recipients: RecipientConfig,
    /// Messaging API base URL.
    pub api_base_url: String,
    /// Timeout for each outbound call.
    pub request_timeout: Duration,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("bind_addr", &self.bind_addr)
            .field("channel_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("admin", &self.admin)
            .field("recipients", &self.recipients)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl RelayConfig {
    /// Creates a registry-mode configuration with default network settings.
    #[must_use]
    pub fn new(
        channel_secret: impl Into<String>,
        access_token: impl Into<String>,
        admin: RecipientId,
    ) -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            channel_secret: channel_secret.into(),
            access_token: access_token.into(),
            admin,
            recipients: RecipientConfig::Registry,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Set the bind address.
    #[must_use]
    pub const fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Send alerts to a single fixed recipient.
    #[must_use]
    pub fn with_single_recipient(mut self, recipient: RecipientId) -> Self {
        self.recipients = RecipientConfig::Single(recipient);
        self
    }

    /// Set the Messaging API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the per-call timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl TryFrom<Cli> for RelayConfig {
    type Error = RelayError;

    fn try_from(cli: Cli) -> RelayResult<Self> {
        let channel_secret = require("CHANNEL_SECRET", cli.channel_secret)?;
        let access_token = require("CHANNEL_ACCESS_TOKEN", cli.channel_access_token)?;
        let admin = require("ADMIN_USER_ID", cli.admin_user_id)?.trim().to_string();

        if !RecipientId::is_well_formed(&admin) {
            warn!(admin = %admin, "administrator ID does not look like a LINE user ID");
        }

        let mut config = Self::new(channel_secret, access_token, RecipientId::new(admin))
            .with_bind_addr(SocketAddr::new(cli.host, cli.port))
            .with_api_base_url(cli.api_base_url)
            .with_request_timeout(Duration::from_secs(cli.request_timeout_secs));

        if cli.recipient_mode == RecipientMode::Single {
            let user_id = cli
                .user_id
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| {
                    RelayError::Config("USER_ID is required with --recipients single".to_string())
                })?;
            config = config.with_single_recipient(RecipientId::new(user_id.trim()));
        }

        if cli.request_timeout_secs == 0 {
            return Err(RelayError::Config(
                "LINE_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

/// Rejects blank values; the value itself is returned untouched.
fn require(name: &str, value: String) -> RelayResult<String> {
    if value.trim().is_empty() {
        return Err(RelayError::Config(format!("{name} must not be empty")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_ARGS: [&str; 7] = [
        "line-alert-relay",
        "--channel-secret",
        "secret",
        "--channel-access-token",
        "token",
        "--admin-user-id",
        "U_admin",
    ];

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(BASE_ARGS.iter().chain(extra.iter()))
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.port, DEFAULT_PORT);
        assert_eq!(cli.recipient_mode, RecipientMode::Registry);
        assert_eq!(cli.api_base_url, DEFAULT_API_BASE_URL);

        let config = RelayConfig::try_from(cli).unwrap();
        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.admin, "U_admin");
        assert_eq!(config.recipients, RecipientConfig::Registry);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--api-base-url",
            "http://localhost:9000",
            "--request-timeout-secs",
            "3",
        ])
        .unwrap();

        let config = RelayConfig::try_from(cli).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_single_mode_requires_user_id() {
        let cli = parse(&["--recipients", "single"]).unwrap();
        let err = RelayConfig::try_from(cli).unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[test]
    fn test_single_mode_with_user_id() {
        let cli = parse(&["--recipients", "single", "--user-id", "U_family"]).unwrap();
        let config = RelayConfig::try_from(cli).unwrap();
        assert_eq!(
            config.recipients,
            RecipientConfig::Single(RecipientId::new("U_family"))
        );
    }

    #[test]
    fn test_empty_secret_rejected() {
        let cli = Cli::try_parse_from([
            "line-alert-relay",
            "--channel-secret",
            " ",
            "--channel-access-token",
            "token",
            "--admin-user-id",
            "U_admin",
        ])
        .unwrap();
        assert!(RelayConfig::try_from(cli).is_err());
    }

    #[test]
    fn test_secrets_keep_surrounding_whitespace() {
        let cli = Cli::try_parse_from([
            "line-alert-relay",
            "--channel-secret",
            " secret ",
            "--channel-access-token",
            "token\t",
            "--admin-user-id",
            " U_admin ",
        ])
        .unwrap();

        let config = RelayConfig::try_from(cli).unwrap();
        assert_eq!(config.channel_secret, " secret ");
        assert_eq!(config.access_token, "token\t");
        assert_eq!(config.admin, "U_admin");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let cli = parse(&["--request-timeout-secs", "0"]).unwrap();
        assert!(RelayConfig::try_from(cli).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = RelayConfig::new("the-secret", "the-token", RecipientId::new("U_admin"));
        let debug = format!("{config:?}");
        assert!(!debug.contains("the-secret"));
        assert!(!debug.contains("the-token"));
        assert!(debug.contains("U_admin"));
    }
}
