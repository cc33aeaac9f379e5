//! Voting flow: random images, votes and favourites.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::fanout::{self, task};
use crate::favorites::{FavoriteEntry, FavoritesStore};
use crate::upstream::{CatApi, CatImage, FavoriteRecord, VoteRequest};

/// A single image as shown on the voting page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePayload {
    pub image_url: String,
    pub image_id: String,
}

impl From<CatImage> for ImagePayload {
    fn from(image: CatImage) -> Self {
        Self {
            image_url: image.url,
            image_id: image.id,
        }
    }
}

/// Action submitted from the voting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Favorite,
    Like,
    Dislike,
    /// Anything else; handled permissively unless strict mode is on.
    Other,
}

impl VoteAction {
    pub fn parse(action: &str) -> Self {
        match action {
            "favorite" => Self::Favorite,
            "like" => Self::Like,
            "dislike" => Self::Dislike,
            _ => Self::Other,
        }
    }

    fn vote_value(self) -> Option<i32> {
        match self {
            Self::Like => Some(1),
            Self::Dislike => Some(-1),
            _ => None,
        }
    }
}

/// Parts produced by the concurrent vote-and-refresh pair.
enum VoteStep {
    Recorded,
    Fresh(Vec<CatImage>),
}

/// Coordinates the voting page: serves a random image, records votes and
/// favourites upstream, and always hands back a fresh image afterwards.
pub struct VotingOrchestrator {
    api: Arc<dyn CatApi>,
    favorites: Arc<FavoritesStore>,
    sub_id: String,
    strict_actions: bool,
}

impl VotingOrchestrator {
    pub fn new(
        api: Arc<dyn CatApi>,
        favorites: Arc<FavoritesStore>,
        sub_id: impl Into<String>,
        strict_actions: bool,
    ) -> Self {
        Self {
            api,
            favorites,
            sub_id: sub_id.into(),
            strict_actions,
        }
    }

    /// Fetch one random image for the voting page.
    pub async fn random_image(&self) -> Result<ImagePayload, ApiError> {
        let api = Arc::clone(&self.api);
        let images =
            fanout::all_or_fail(vec![task(async move { api.random_images(1).await })]).await?;
        first_image(images.into_iter().flatten())
    }

    /// Handle a submitted action and return the next image to show.
    ///
    /// `favorite` writes the favourite upstream, then appends it to the
    /// local store; only a confirmed upstream write mutates local state.
    /// `like`/`dislike` record the vote concurrently with fetching the
    /// next image. Unrecognized actions fall through to a plain fetch
    /// unless strict mode is enabled.
    pub async fn submit_action(
        &self,
        action: &str,
        image_id: &str,
    ) -> Result<ImagePayload, ApiError> {
        let parsed = VoteAction::parse(action);
        debug!(action, image_id, "voting action");

        match parsed {
            VoteAction::Favorite => {
                require_image_id(image_id)?;
                self.api.create_favourite(image_id, &self.sub_id).await?;
                self.favorites.add(FavoriteEntry::new(image_id));
                self.random_image().await
            }
            VoteAction::Like | VoteAction::Dislike => {
                require_image_id(image_id)?;
                let value = parsed.vote_value().unwrap_or(0);
                self.vote_and_refresh(image_id, value).await
            }
            VoteAction::Other => {
                if self.strict_actions {
                    return Err(ApiError::InvalidInput(format!(
                        "unknown action: {action}"
                    )));
                }
                warn!(action, "unknown voting action, serving next image");
                self.random_image().await
            }
        }
    }

    /// Record a vote and fetch the next image at the same time.
    async fn vote_and_refresh(&self, image_id: &str, value: i32) -> Result<ImagePayload, ApiError> {
        let vote = VoteRequest::new(image_id, self.sub_id.clone(), value);
        let vote_api = Arc::clone(&self.api);
        let fetch_api = Arc::clone(&self.api);

        let steps = fanout::all_or_fail(vec![
            task(async move {
                vote_api.submit_vote(&vote).await?;
                Ok(VoteStep::Recorded)
            }),
            task(async move { fetch_api.random_images(1).await.map(VoteStep::Fresh) }),
        ])
        .await?;

        let images = steps.into_iter().find_map(|step| match step {
            VoteStep::Fresh(images) => Some(images),
            VoteStep::Recorded => None,
        });
        first_image(images.into_iter().flatten())
    }

    /// Favourites recorded upstream for the configured sub id.
    pub async fn upstream_favourites(&self) -> Result<Vec<FavoriteRecord>, ApiError> {
        self.api.list_favourites(&self.sub_id).await
    }

    /// Favourites recorded locally during this process lifetime.
    pub fn favorites_snapshot(&self) -> Vec<FavoriteEntry> {
        self.favorites.snapshot()
    }
}

fn require_image_id(image_id: &str) -> Result<(), ApiError> {
    if image_id.is_empty() {
        return Err(ApiError::InvalidInput("image_id is required".to_string()));
    }
    Ok(())
}

fn first_image(images: impl IntoIterator<Item = CatImage>) -> Result<ImagePayload, ApiError> {
    images
        .into_iter()
        .next()
        .map(ImagePayload::from)
        .ok_or_else(|| ApiError::NotFound("upstream returned no images".to_string()))
}
