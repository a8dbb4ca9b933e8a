//! Security interceptors wrapped around the router when enabled.
//!
//! Request order: trusted host (production only) → rate limit → API key
//! (protected paths only) → handler. Every response, including rejections,
//! then receives the fixed security headers and is gzip-compressed when
//! large enough.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{
        header::{
            CONTENT_SECURITY_POLICY, HOST, SERVER, STRICT_TRANSPORT_SECURITY,
            X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
        },
        HeaderName, HeaderValue,
    },
    middleware::{self, Next},
    response::Response,
    Router,
};
use greeter_core::{verify_api_key, ApiKey, API_KEY_HEADER};
use tower_http::{
    compression::{predicate::SizeAbove, CompressionLayer},
    set_header::SetResponseHeaderLayer,
};
use tracing::{debug, warn};

use crate::{
    config::Settings,
    error::GatewayError,
    rate_limit::RateLimiter,
};

/// Responses smaller than this many bytes are sent uncompressed.
pub const COMPRESSION_MIN_SIZE: u16 = 1000;

/// Value that replaces any `Server` header set further down the stack.
pub const SERVER_HEADER: &str = "greeter";

/// Paths guarded by the API key check unless configured otherwise.
pub const DEFAULT_PROTECTED_PATHS: [&str; 1] = ["/metrics"];

/// Headers added to every response.
const SECURITY_HEADERS: [(HeaderName, &str); 5] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "DENY"),
    (X_XSS_PROTECTION, "1; mode=block"),
    (STRICT_TRANSPORT_SECURITY, "max-age=31536000; includeSubDomains"),
    (CONTENT_SECURITY_POLICY, "default-src 'self'"),
];

/// Accepted `Host` header patterns.
///
/// `*` accepts anything, `*.example.com` accepts any subdomain of
/// `example.com` but not the apex, and other entries must match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAllowList {
    patterns: Vec<String>,
}

impl HostAllowList {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { patterns: patterns.into_iter().map(|p| p.into().to_ascii_lowercase()).collect() }
    }

    /// Returns `true` if `host` (optionally carrying a port) is accepted.
    #[must_use]
    pub fn allows(&self, host: &str) -> bool {
        let host = strip_port(host).to_ascii_lowercase();
        self.patterns.iter().any(|pattern| {
            if pattern == "*" {
                true
            } else if let Some(suffix) = pattern.strip_prefix('*') {
                host.len() > suffix.len() && host.ends_with(suffix)
            } else {
                *pattern == host
            }
        })
    }
}

fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    host.split(':').next().unwrap_or(host)
}

/// Shared state of the security interceptors.
#[derive(Debug)]
pub struct SecurityState {
    /// Configured API key; `None` rejects every key on protected paths.
    pub api_key: Option<ApiKey>,
    /// Exact request paths that require an API key.
    pub protected_paths: Vec<String>,
    /// `Some` only in production mode.
    pub trusted_hosts: Option<HostAllowList>,
    pub limiter: RateLimiter,
}

impl SecurityState {
    /// Build interceptor state from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            api_key: settings.secrets.api_key.as_deref().map(ApiKey::new),
            protected_paths: DEFAULT_PROTECTED_PATHS.iter().map(|p| (*p).to_owned()).collect(),
            trusted_hosts: settings
                .environment
                .is_production()
                .then(|| HostAllowList::new(settings.allowed_hosts.iter().cloned())),
            limiter: RateLimiter::new(settings.rate_limit),
        }
    }

    fn is_protected(&self, path: &str) -> bool {
        self.protected_paths.iter().any(|p| p == path)
    }
}

/// Wrap `router` in the security interceptor chain.
pub fn apply(router: Router, state: Arc<SecurityState>) -> Router {
    let router = router
        .layer(middleware::from_fn_with_state(Arc::clone(&state), require_api_key))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), enforce_rate_limit))
        .layer(middleware::from_fn_with_state(state, trusted_host));

    let router = SECURITY_HEADERS.into_iter().fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value)))
    });

    router
        .layer(SetResponseHeaderLayer::overriding(SERVER, HeaderValue::from_static(SERVER_HEADER)))
        .layer(CompressionLayer::new().compress_when(SizeAbove::new(COMPRESSION_MIN_SIZE)))
}

async fn trusted_host(
    State(state): State<Arc<SecurityState>>,
    req: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    if let Some(allow) = &state.trusted_hosts {
        let host = req
            .headers()
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| req.uri().host());
        match host {
            Some(h) if allow.allows(h) => {}
            other => {
                warn!(host = ?other, "rejected untrusted host");
                return Err(GatewayError::InvalidHost);
            }
        }
    }
    Ok(next.run(req).await)
}

async fn enforce_rate_limit(
    State(state): State<Arc<SecurityState>>,
    req: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let client = client_key(&req);
    match state.limiter.check(&client) {
        Ok(remaining) => {
            debug!(client = %client, remaining, "request admitted");
            Ok(next.run(req).await)
        }
        Err(retry_after) => {
            warn!(client = %client, retry_after_secs = retry_after.as_secs(), "rate limit exceeded");
            Err(GatewayError::RateLimited { retry_after })
        }
    }
}

async fn require_api_key(
    State(state): State<Arc<SecurityState>>,
    req: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    if state.is_protected(req.uri().path()) {
        let presented = req.headers().get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
        if let Err(e) = verify_api_key(state.api_key.as_ref(), presented) {
            warn!(path = %req.uri().path(), error = %e, "API key check failed");
            return Err(e.into());
        }
    }
    Ok(next.run(req).await)
}

/// Rate limit key: the peer IP when the transport provides one.
fn client_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_owned(), |ConnectInfo(addr)| addr.ip().to_string())
}
