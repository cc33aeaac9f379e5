//! Shared application state.

use std::sync::Arc;

use catwalk_core::{
    BreedOrchestrator, CatApi, Config, FavoritesStore, SanitizedConfig, VotingOrchestrator,
};

/// Application state shared across all request handlers.
pub struct AppState {
    config: Config,
    voting: VotingOrchestrator,
    breeds: BreedOrchestrator,
    favorites: Arc<FavoritesStore>,
}

impl AppState {
    pub fn new(config: Config, api: Arc<dyn CatApi>) -> Self {
        let favorites = Arc::new(FavoritesStore::new());
        let voting = VotingOrchestrator::new(
            Arc::clone(&api),
            Arc::clone(&favorites),
            config.upstream.sub_id.clone(),
            config.voting.strict_actions,
        );
        let breeds = BreedOrchestrator::new(api, config.upstream.breed_image_limit);

        Self {
            config,
            voting,
            breeds,
            favorites,
        }
    }

    pub fn voting(&self) -> &VotingOrchestrator {
        &self.voting
    }

    pub fn breeds(&self) -> &BreedOrchestrator {
        &self.breeds
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Config with secrets redacted, safe for API responses.
    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }
}
