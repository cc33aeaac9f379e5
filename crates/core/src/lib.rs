pub mod config;
pub mod error;
pub mod fanout;
pub mod favorites;
pub mod metrics;
pub mod orchestrator;
pub mod testing;
pub mod upstream;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use error::ApiError;
pub use favorites::{FavoriteEntry, FavoritesStore};
pub use orchestrator::{BreedOrchestrator, BreedProfile, ImagePayload, VotingOrchestrator};
pub use upstream::{Breed, BreedImage, CatApi, CatApiClient, CatImage, FavoriteRecord};
