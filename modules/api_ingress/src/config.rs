use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use runtime::AppConfig;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// API ingress configuration, derived from the application config.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    pub app_name: String,
    /// Comma-separated origins, or "*" for any origin.
    pub allowed_origins: String,
    /// 0 disables the timeout layer.
    pub request_timeout_sec: u64,
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

impl ApiIngressConfig {
    pub fn from_app_config(app: &AppConfig) -> Self {
        Self {
            bind_addr: app.bind_addr(),
            app_name: app.server.app_name.clone(),
            allowed_origins: app.http.allowed_origins.clone(),
            request_timeout_sec: app.http.request_timeout_sec,
            body_limit_bytes: app.http.body_limit_bytes,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_sec > 0).then(|| Duration::from_secs(self.request_timeout_sec))
    }

    /// CORS policy for the configured origins.
    pub fn cors_layer(&self) -> Result<CorsLayer> {
        let origins = parse_origins(&self.allowed_origins)?;

        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::ORIGIN,
                header::CONTENT_TYPE,
                header::ACCEPT,
                header::AUTHORIZATION,
            ]))
    }
}

fn parse_origins(raw: &str) -> Result<AllowOrigin> {
    let items: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() || items.contains(&"*") {
        return Ok(AllowOrigin::any());
    }

    let values = items
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AllowOrigin::list(values))
}
