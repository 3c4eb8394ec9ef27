//! Shared application state
//!
//! Estado compartido que se pasa a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::{RouteService, Stores};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub routes: Arc<RouteService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, stores: Stores) -> Self {
        let routes = Arc::new(RouteService::new(stores, config.engine()));
        Self { config, routes }
    }

    pub fn stores(&self) -> &Stores {
        self.routes.stores()
    }
}
