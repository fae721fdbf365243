// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed request forwarding to the platform API.
//!
//! Every outbound request carries the tenant domain and its HMAC signature
//! so the backend can attribute and trust the call. The forwarder makes
//! exactly one attempt per invocation; retry and backoff policy belongs to
//! the caller.

use axum::http::{
    header::{CONTENT_TYPE, COOKIE},
    HeaderMap, HeaderName, HeaderValue, Method,
};
use serde_json::Value;

use crate::{
    config::AppConfig,
    tenant::{TenantError, TenantSigner, TenantStrategy},
};

/// Header naming the tenant a proxied request belongs to.
pub const TENANT_DOMAIN_HEADER: &str = "x-tenant-domain";

/// Header carrying the hex HMAC over the tenant domain.
pub const TENANT_SIGNATURE_HEADER: &str = "x-tenant-signature";

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The tenant for this request could not be determined; detected before
    /// any network I/O and mapped to a 400-class response.
    #[error(transparent)]
    Tenant(#[from] TenantError),

    #[error("backend client could not be built: {0}")]
    Client(String),

    #[error("backend request failed: {0}")]
    Request(String),
}

/// Per-call options for [`BackendClient::forward`].
#[derive(Debug, Default)]
pub struct ForwardOptions {
    /// Tenant domain supplied by the caller; only honored when the
    /// `Override` strategy is active.
    pub tenant_override: Option<String>,

    /// Caller-supplied headers. Mandatory headers win on conflict.
    pub headers: HeaderMap,
}

/// HTTP client toward the platform API with tenant headers attached.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    signer: TenantSigner,
    strategy: TenantStrategy,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;

        Ok(Self {
            base_url: config
                .backend_base_url
                .as_str()
                .trim_end_matches('/')
                .to_string(),
            signer: TenantSigner::new(config.tenant_secret.clone()),
            strategy: config.tenant_strategy.clone(),
            http,
        })
    }

    /// Forward one request to the platform API.
    ///
    /// Resolves the tenant domain (failing fast, before any network call,
    /// when it cannot be determined), signs it, and issues a single attempt
    /// against `<base-url><path>`. The raw response is returned unmodified
    /// for the caller to interpret.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        inbound: &HeaderMap,
        body: Option<&Value>,
        options: ForwardOptions,
    ) -> Result<reqwest::Response, BackendError> {
        let domain = self
            .strategy
            .resolve(inbound, options.tenant_override.as_deref())?;
        let headers = self.outbound_headers(&domain, inbound, options.headers)?;
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(%method, %url, tenant = %domain, "forwarding request to backend");

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|err| {
            tracing::error!(%method, path, error = %err, "backend request failed");
            BackendError::Request(err.to_string())
        })
    }

    /// Caller headers first, the forwarded session cookie next, mandatory
    /// headers last so they take precedence on conflict.
    fn outbound_headers(
        &self,
        domain: &str,
        inbound: &HeaderMap,
        caller: HeaderMap,
    ) -> Result<HeaderMap, BackendError> {
        let domain_value = HeaderValue::from_str(domain).map_err(|_| {
            BackendError::Tenant(TenantError::Unresolved(
                "tenant domain is not a valid header value",
            ))
        })?;
        let signature = self.signer.sign(domain);

        let mut headers = caller;
        if let Some(session) = inbound.get(COOKIE) {
            headers.insert(COOKIE, session.clone());
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(TENANT_DOMAIN_HEADER), domain_value);
        headers.insert(
            HeaderName::from_static(TENANT_SIGNATURE_HEADER),
            HeaderValue::from_str(&signature).expect("hex digest is a valid header value"),
        );

        Ok(headers)
    }
}
