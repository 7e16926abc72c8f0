use shopdir_config::ShopdirConfig;
use shopdir_core::{QueryEngine, Renderer, ShopLoader};
use std::sync::Arc;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<ShopLoader>,
    pub engine: Arc<QueryEngine>,
    pub renderer: Arc<Renderer>,
    pub highlight_count: usize,
    pub cors_origins: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(loader: ShopLoader, engine: QueryEngine, renderer: Renderer) -> Self {
        Self {
            loader: Arc::new(loader),
            engine: Arc::new(engine),
            renderer: Arc::new(renderer),
            highlight_count: 4,
            cors_origins: Arc::new(vec!["*".to_string()]),
        }
    }

    pub fn from_config(config: &ShopdirConfig, loader: ShopLoader) -> Self {
        Self {
            highlight_count: config.catalog.highlight_count,
            ..Self::new(
                loader,
                QueryEngine::from_config(&config.catalog),
                Renderer::new(config.assets.clone()),
            )
            .with_cors_origins(config.server.cors_origins.clone())
        }
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Arc::new(origins);
        self
    }

    /// Origin value to echo back, if the request origin is allowed.
    pub(crate) fn allowed_origin(&self, origin: &str) -> Option<String> {
        if self.cors_origins.iter().any(|allowed| allowed == "*") {
            Some("*".to_string())
        } else if self.cors_origins.iter().any(|allowed| allowed == origin) {
            Some(origin.to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use pretty_assertions::assert_eq;
    use shopdir_config::ShopdirConfig;
    use shopdir_core::{ShopCache, ShopLoader};
    use std::sync::Arc;

    #[test]
    fn config_origins_limit_cors() {
        let mut config = ShopdirConfig::default();
        config.server.cors_origins = vec!["https://shops.example".to_string()];
        config.catalog.highlight_count = 2;
        let state = AppState::from_config(&config, ShopLoader::new(Arc::new(ShopCache::new())));

        assert_eq!(state.highlight_count, 2);
        assert_eq!(
            state.allowed_origin("https://shops.example").as_deref(),
            Some("https://shops.example")
        );
        assert_eq!(state.allowed_origin("https://other.example"), None);
    }
}
