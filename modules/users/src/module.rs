use std::sync::Arc;

use axum::Router;
use modkit::RestfulModule;
use tracing::info;
use utoipa::OpenApi;

use crate::api::rest::{openapi::UsersApiDoc, routes};
use crate::contract::client::UsersApi;
use crate::domain::{repo::UsersRepository, service::Service};
use crate::gateways::local::UsersLocalClient;
use crate::infra::storage::InMemoryUsersRepository;

/// The users module: owns the store and service, and exposes them over REST
/// and as an in-process client.
#[derive(Clone)]
pub struct UsersModule {
    service: Arc<Service>,
}

impl Default for UsersModule {
    fn default() -> Self {
        Self::new()
    }
}

impl UsersModule {
    /// Build the module on top of a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_repository(Arc::new(InMemoryUsersRepository::new()))
    }

    pub fn with_repository(repo: Arc<dyn UsersRepository>) -> Self {
        info!("Initializing users module");
        Self {
            service: Arc::new(Service::new(repo)),
        }
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn UsersApi> {
        Arc::new(UsersLocalClient::new(self.service.clone()))
    }
}

impl RestfulModule for UsersModule {
    fn register_rest(&self, router: Router) -> anyhow::Result<Router> {
        info!("Registering users REST routes");
        routes::register_routes(router, self.service.clone())
    }

    fn openapi(&self) -> utoipa::openapi::OpenApi {
        UsersApiDoc::openapi()
    }
}
