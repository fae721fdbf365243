// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and never
//! mutated afterwards. Missing trust material (secrets, backend address) is
//! a startup error: the process refuses to serve requests rather than sign
//! with an empty key.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | Session token verification secret | Required |
//! | `TENANT_HMAC_SECRET` | Shared tenant signing secret | Required |
//! | `BACKEND_BASE_URL` | Platform API base URL, including any path prefix | Required |
//! | `BACKEND_TIMEOUT_SECS` | Outbound request timeout in seconds | `15` |
//! | `TENANT_STRATEGY` | Tenant resolution: `fixed`, `host` or `override` | `fixed` |
//! | `TENANT_DOMAIN` | Tenant domain, required for the `fixed` strategy | — |
//! | `ADMIN_ROUTE_PREFIXES` | Comma-separated admin-only path prefixes | `/admin` |
//! | `PROTECTED_ROUTE_PREFIXES` | Comma-separated session-required prefixes | `/account,/api/todo_lists,/api/todo_items` |
//! | `APP_ENV` | `production` enables `Secure` session cookies | `development` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

use url::Url;

use crate::tenant::TenantStrategy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 15;
const DEFAULT_ADMIN_PREFIXES: &str = "/admin";
const DEFAULT_PROTECTED_PREFIXES: &str = "/account,/api/todo_lists,/api/todo_items";

/// Path prefixes that bypass every session check: the login page, the auth
/// handoff surface, API docs, internal assets and probes. Compiled in, the
/// backend keeps an equivalent list for its own gate.
pub const EXEMPT_PREFIXES: &[&str] = &[
    "/login",
    "/auth/receive",
    "/api/auth",
    "/docs",
    "/api-doc",
    "/_assets",
    "/favicon.ico",
    "/health",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} is invalid: {reason}")]
    Invalid {
        name: &'static str,
        reason: String,
    },
}

/// Immutable process-wide configuration, built once in `main` and passed
/// explicitly to every component.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Secret the session tokens are verified against.
    pub session_secret: String,
    /// Shared secret for the tenant signature, known to the backend too.
    pub tenant_secret: String,
    pub backend_base_url: Url,
    pub backend_timeout: Duration,
    pub tenant_strategy: TenantStrategy,
    pub routes: RoutePolicy,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", DEFAULT_HOST);
        let port = match env_optional("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("{raw:?} is not a port number"),
            })?,
            None => DEFAULT_PORT,
        };

        let session_secret = env_required("JWT_SECRET")?;
        let tenant_secret = env_required("TENANT_HMAC_SECRET")?;

        let backend_raw = env_required("BACKEND_BASE_URL")?;
        let backend_base_url = Url::parse(&backend_raw).map_err(|e| ConfigError::Invalid {
            name: "BACKEND_BASE_URL",
            reason: e.to_string(),
        })?;

        let backend_timeout = match env_optional("BACKEND_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    name: "BACKEND_TIMEOUT_SECS",
                    reason: format!("{raw:?} is not a number of seconds"),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
        };

        let tenant_strategy = parse_strategy(
            &env_or_default("TENANT_STRATEGY", "fixed"),
            env_optional("TENANT_DOMAIN"),
        )?;

        let routes = RoutePolicy::new(
            split_prefixes(&env_or_default("ADMIN_ROUTE_PREFIXES", DEFAULT_ADMIN_PREFIXES)),
            split_prefixes(&env_or_default(
                "PROTECTED_ROUTE_PREFIXES",
                DEFAULT_PROTECTED_PREFIXES,
            )),
        );

        let secure_cookies = env_or_default("APP_ENV", "development") == "production";

        Ok(Self {
            host,
            port,
            session_secret,
            tenant_secret,
            backend_base_url,
            backend_timeout,
            tenant_strategy,
            routes,
            secure_cookies,
        })
    }
}

/// Select the tenant resolution strategy. Exactly one is active per
/// deployment; the `fixed` strategy requires the domain up front.
fn parse_strategy(
    value: &str,
    fixed_domain: Option<String>,
) -> Result<TenantStrategy, ConfigError> {
    match value {
        "fixed" => {
            let domain = fixed_domain.ok_or(ConfigError::Missing("TENANT_DOMAIN"))?;
            Ok(TenantStrategy::FixedDomain(domain))
        }
        "host" => Ok(TenantStrategy::HostHeader),
        "override" => Ok(TenantStrategy::Override),
        other => Err(ConfigError::Invalid {
            name: "TENANT_STRATEGY",
            reason: format!("unknown strategy {other:?} (expected fixed, host or override)"),
        }),
    }
}

/// Route classification sets, loaded once at startup.
///
/// Admin matching is evaluated strictly before protected matching, so a
/// path present in both sets is governed by the admin rule.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    admin_prefixes: Vec<String>,
    protected_prefixes: Vec<String>,
}

impl RoutePolicy {
    pub fn new(admin_prefixes: Vec<String>, protected_prefixes: Vec<String>) -> Self {
        Self {
            admin_prefixes,
            protected_prefixes,
        }
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        EXEMPT_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
    }

    pub fn requires_admin(&self, path: &str) -> bool {
        self.admin_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }

    pub fn requires_session(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }
}

fn split_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty())
        .map(str::to_owned)
        .collect()
}

fn env_required(name: &'static str) -> Result<String, ConfigError> {
    env_optional(name).ok_or(ConfigError::Missing(name))
}

fn env_optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}
