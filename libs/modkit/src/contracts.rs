use axum::Router;

/// Pure wiring; must be sync. Called once while the HTTP host assembles its router.
pub trait RestfulModule: Send + Sync {
    /// Attach this module's routes (and any per-module layers) to `router`.
    fn register_rest(&self, router: Router) -> anyhow::Result<Router>;

    /// OpenAPI fragment describing the routes added by `register_rest`.
    fn openapi(&self) -> utoipa::openapi::OpenApi;
}
