//! Client for the upstream cat API.
//!
//! The trait keeps orchestrators decoupled from the wire so tests can swap
//! in [`crate::testing::MockCatApi`]. The real client lives in
//! [`client::CatApiClient`] and issues exactly one HTTP call per operation,
//! no retries.

mod client;
mod types;

pub use client::CatApiClient;
pub use types::{Breed, BreedImage, CatImage, FavoriteRecord, VoteRequest};

use async_trait::async_trait;

use crate::error::ApiError;

/// Typed operations against the upstream cat API.
#[async_trait]
pub trait CatApi: Send + Sync {
    /// Fetch up to `limit` random images.
    async fn random_images(&self, limit: u32) -> Result<Vec<CatImage>, ApiError>;

    /// Fetch up to `limit` images for one breed. An empty result is a
    /// valid outcome, not an error.
    async fn breed_images(&self, breed_id: &str, limit: u32) -> Result<Vec<BreedImage>, ApiError>;

    /// Fetch the full breed list.
    async fn list_breeds(&self) -> Result<Vec<Breed>, ApiError>;

    /// Mark an image as a favourite for the given sub id.
    async fn create_favourite(&self, image_id: &str, sub_id: &str) -> Result<(), ApiError>;

    /// Record an up/down vote.
    async fn submit_vote(&self, vote: &VoteRequest) -> Result<(), ApiError>;

    /// List favourites recorded upstream for the given sub id.
    async fn list_favourites(&self, sub_id: &str) -> Result<Vec<FavoriteRecord>, ApiError>;
}
