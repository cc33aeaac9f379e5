use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One image as returned by the image-search endpoint. Identity is `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatImage {
    pub id: String,
    pub url: String,
}

/// One image as returned by a breed-scoped image search.
///
/// The upstream payload carries more fields, but only the URL is part of
/// the breed profile response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedImage {
    pub url: String,
}

/// Breed metadata from the breeds-list endpoint.
///
/// There is no single-breed upstream endpoint; lookups fetch the full list
/// and filter by `id` client-side. Fields the upstream omits default to
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breed {
    pub id: String,
    pub name: String,
    pub description: String,
    pub origin: String,
    pub wikipedia_url: String,
}

/// A favourite as stored upstream, read-only from this system's side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: i64,
    pub image_id: String,
    #[serde(default)]
    pub sub_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub image: CatImage,
}

/// An up/down vote on an image, constructed locally and sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub image_id: String,
    pub sub_id: String,
    /// +1 for like, -1 for dislike.
    pub value: i32,
}

impl VoteRequest {
    pub fn new(image_id: impl Into<String>, sub_id: impl Into<String>, value: i32) -> Self {
        Self {
            image_id: image_id.into(),
            sub_id: sub_id.into(),
            value,
        }
    }
}
