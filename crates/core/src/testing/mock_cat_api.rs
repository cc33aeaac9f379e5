//! Mock cat API for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::upstream::{Breed, BreedImage, CatApi, CatImage, FavoriteRecord, VoteRequest};

/// Mock implementation of the [`CatApi`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable images, breeds and favourites
/// - Track every upstream call for assertions
/// - Simulate failures and delays per operation
///
/// # Example
///
/// ```rust,ignore
/// use catwalk_core::testing::MockCatApi;
///
/// let api = MockCatApi::new();
/// api.set_random_images(vec![CatImage {
///     id: "abc".into(),
///     url: "https://cdn.example/abc.jpg".into(),
/// }])
/// .await;
///
/// let images = api.random_images(1).await?;
/// assert_eq!(api.call_count("random_images").await, 1);
/// ```
pub struct MockCatApi {
    /// Images returned by `random_images`.
    random_images: Arc<RwLock<Vec<CatImage>>>,
    /// Breeds returned by `list_breeds`.
    breeds: Arc<RwLock<Vec<Breed>>>,
    /// Images returned by `breed_images`, keyed by breed id.
    breed_images: Arc<RwLock<HashMap<String, Vec<BreedImage>>>>,
    /// Favourites returned by `list_favourites`.
    favourites: Arc<RwLock<Vec<FavoriteRecord>>>,
    /// Recorded votes, in submission order.
    votes: Arc<RwLock<Vec<VoteRequest>>>,
    /// Recorded `create_favourite` calls as (image_id, sub_id).
    favourite_calls: Arc<RwLock<Vec<(String, String)>>>,
    /// Every operation invoked, in call order.
    calls: Arc<RwLock<Vec<&'static str>>>,
    /// One-shot errors, consumed on the next call to the named operation.
    next_errors: Arc<RwLock<HashMap<&'static str, ApiError>>>,
    /// Artificial latency per operation.
    delays: Arc<RwLock<HashMap<&'static str, Duration>>>,
}

impl std::fmt::Debug for MockCatApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCatApi").finish_non_exhaustive()
    }
}

impl Default for MockCatApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatApi {
    pub fn new() -> Self {
        Self {
            random_images: Arc::new(RwLock::new(Vec::new())),
            breeds: Arc::new(RwLock::new(Vec::new())),
            breed_images: Arc::new(RwLock::new(HashMap::new())),
            favourites: Arc::new(RwLock::new(Vec::new())),
            votes: Arc::new(RwLock::new(Vec::new())),
            favourite_calls: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_errors: Arc::new(RwLock::new(HashMap::new())),
            delays: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Set the images returned by `random_images`.
    pub async fn set_random_images(&self, images: Vec<CatImage>) {
        *self.random_images.write().await = images;
    }

    /// Set the breed catalog returned by `list_breeds`.
    pub async fn set_breeds(&self, breeds: Vec<Breed>) {
        *self.breeds.write().await = breeds;
    }

    /// Set the images returned by `breed_images` for one breed.
    pub async fn set_breed_images(&self, breed_id: &str, images: Vec<BreedImage>) {
        self.breed_images
            .write()
            .await
            .insert(breed_id.to_string(), images);
    }

    /// Set the favourites returned by `list_favourites`.
    pub async fn set_favourites(&self, favourites: Vec<FavoriteRecord>) {
        *self.favourites.write().await = favourites;
    }

    /// Configure the next call to `operation` to fail with `error`.
    pub async fn fail_next(&self, operation: &'static str, error: ApiError) {
        self.next_errors.write().await.insert(operation, error);
    }

    /// Add artificial latency to every call to `operation`.
    pub async fn set_delay(&self, operation: &'static str, delay: Duration) {
        self.delays.write().await.insert(operation, delay);
    }

    /// Votes recorded so far.
    pub async fn recorded_votes(&self) -> Vec<VoteRequest> {
        self.votes.read().await.clone()
    }

    /// `create_favourite` calls recorded so far, as (image_id, sub_id).
    pub async fn recorded_favourite_calls(&self) -> Vec<(String, String)> {
        self.favourite_calls.read().await.clone()
    }

    /// How many times `operation` was invoked.
    pub async fn call_count(&self, operation: &str) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|&&op| op == operation)
            .count()
    }

    /// Total number of upstream calls across all operations.
    pub async fn total_calls(&self) -> usize {
        self.calls.read().await.len()
    }

    async fn enter(&self, operation: &'static str) -> Result<(), ApiError> {
        self.calls.write().await.push(operation);
        if let Some(delay) = self.delays.read().await.get(operation).copied() {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.next_errors.write().await.remove(operation) {
            return Err(err);
        }
        Ok(())
    }
}

#[async_trait]
impl CatApi for MockCatApi {
    async fn random_images(&self, limit: u32) -> Result<Vec<CatImage>, ApiError> {
        self.enter("random_images").await?;
        let images = self.random_images.read().await;
        Ok(images.iter().take(limit as usize).cloned().collect())
    }

    async fn breed_images(&self, breed_id: &str, limit: u32) -> Result<Vec<BreedImage>, ApiError> {
        self.enter("breed_images").await?;
        let by_breed = self.breed_images.read().await;
        let images = by_breed.get(breed_id).cloned().unwrap_or_default();
        Ok(images.into_iter().take(limit as usize).collect())
    }

    async fn list_breeds(&self) -> Result<Vec<Breed>, ApiError> {
        self.enter("list_breeds").await?;
        Ok(self.breeds.read().await.clone())
    }

    async fn create_favourite(&self, image_id: &str, sub_id: &str) -> Result<(), ApiError> {
        self.enter("create_favourite").await?;
        self.favourite_calls
            .write()
            .await
            .push((image_id.to_string(), sub_id.to_string()));
        Ok(())
    }

    async fn submit_vote(&self, vote: &VoteRequest) -> Result<(), ApiError> {
        self.enter("submit_vote").await?;
        self.votes.write().await.push(vote.clone());
        Ok(())
    }

    async fn list_favourites(&self, _sub_id: &str) -> Result<Vec<FavoriteRecord>, ApiError> {
        self.enter("list_favourites").await?;
        Ok(self.favourites.read().await.clone())
    }
}
