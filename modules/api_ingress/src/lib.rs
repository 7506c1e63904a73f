use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{middleware::from_fn, routing::get, Extension, Router};
use modkit::RestfulModule;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::openapi::{InfoBuilder, OpenApi, OpenApiBuilder};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

/// HTTP host: collects REST modules, wraps them in the shared middleware stack,
/// publishes a merged OpenAPI document and runs the server.
pub struct ApiIngress {
    config: ApiIngressConfig,
    modules: Vec<Arc<dyn RestfulModule>>,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config,
            modules: Vec::new(),
        }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Add a module whose routes and OpenAPI paths are served by this host.
    pub fn register_module(&mut self, module: Arc<dyn RestfulModule>) -> &mut Self {
        self.modules.push(module);
        self
    }

    /// Merge the OpenAPI documents of all registered modules.
    pub fn build_openapi(&self) -> OpenApi {
        let mut doc = OpenApiBuilder::new()
            .info(
                InfoBuilder::new()
                    .title(self.config.app_name.clone())
                    .version(env!("CARGO_PKG_VERSION"))
                    .build(),
            )
            .build();

        for module in &self.modules {
            doc.merge(module.openapi());
        }

        let op_count: usize = doc
            .paths
            .paths
            .values()
            .map(|item| {
                [
                    item.get.is_some(),
                    item.post.is_some(),
                    item.put.is_some(),
                    item.delete.is_some(),
                    item.patch.is_some(),
                ]
                .into_iter()
                .filter(|present| *present)
                .count()
            })
            .sum();
        tracing::info!("Building OpenAPI: found {op_count} registered operations");
        doc
    }

    /// Build the HTTP router from registered modules.
    pub fn build_router(&self) -> Result<Router> {
        tracing::debug!("Building new router");

        let mut router = Router::new();
        for module in &self.modules {
            router = module.register_rest(router)?;
        }

        let openapi =
            serde_json::to_value(self.build_openapi()).context("Failed to render OpenAPI")?;
        let info = web::ServiceInfo {
            app_name: self.config.app_name.clone(),
            openapi: Arc::new(openapi),
        };

        router = router
            .route("/health", get(web::health_check))
            .route("/openapi.json", get(web::openapi_json))
            .fallback(web::route_not_found)
            .layer(Extension(info));

        // Layers are added innermost first. Resulting order, outermost to innermost:
        // SetRequestId -> PropagateRequestId -> push_req_id_to_extensions -> Trace
        // -> Timeout -> CORS -> CatchPanic -> BodyLimit
        let x_request_id = request_id::header();

        // 8. Body limit
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        // 7. Panics in handlers become 500 responses
        router = router.layer(CatchPanicLayer::custom(web::panic_response));

        // 6. CORS
        router = router.layer(self.config.cors_layer()?);

        // 5. Timeout
        if let Some(timeout) = self.config.request_timeout() {
            router = router.layer(TimeoutLayer::new(timeout));
        }

        // 4. Trace with request_id/status/latency
        router = router.layer(request_id::create_trace_layer());

        // 3. Put request_id into extensions and span
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));

        // 2. Echo x-request-id on the response
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

        // 1. Generate x-request-id when missing
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        Ok(router)
    }

    /// Bind `bind_addr` and serve until `cancel` fires.
    pub async fn serve(&self, cancel: CancellationToken) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.config.bind_addr))?;
        self.serve_on(listener, cancel).await
    }

    /// Serve on an already bound listener until `cancel` fires.
    pub async fn serve_on(&self, listener: TcpListener, cancel: CancellationToken) -> Result<()> {
        let router = self.build_router()?;
        let addr = listener.local_addr()?;
        tracing::info!(%addr, app = %self.config.app_name, "HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move { cancel.cancelled().await })
            .await
            .context("HTTP server failed")?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
