//! Breed search: breed details joined with sample images.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::fanout::{self, task};
use crate::upstream::{Breed, BreedImage, CatApi};

/// Breed details plus sample images, as rendered by the breed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreedProfile {
    pub breed: Breed,
    pub images: Vec<BreedImage>,
}

/// Parts produced by the concurrent details-and-images pair.
enum BreedPart {
    Details(Breed),
    Images(Vec<BreedImage>),
}

/// Builds a breed profile by fetching breed details and sample images
/// concurrently. A breed id that is not in the upstream catalog fails
/// the whole profile with `NotFound`.
pub struct BreedOrchestrator {
    api: Arc<dyn CatApi>,
    image_limit: u32,
}

impl BreedOrchestrator {
    pub fn new(api: Arc<dyn CatApi>, image_limit: u32) -> Self {
        Self { api, image_limit }
    }

    /// The full upstream breed catalog.
    pub async fn list_breeds(&self) -> Result<Vec<Breed>, ApiError> {
        self.api.list_breeds().await
    }

    /// Fetch details and images for one breed.
    ///
    /// Both fetches run concurrently; the details task resolves the id
    /// against the full catalog, so an unknown id surfaces as `NotFound`
    /// even when the image search quietly returns an empty list.
    pub async fn breed_profile(&self, breed_id: &str) -> Result<BreedProfile, ApiError> {
        if breed_id.is_empty() {
            return Err(ApiError::InvalidInput("breed_id is required".to_string()));
        }
        debug!(breed_id, "building breed profile");

        let details_api = Arc::clone(&self.api);
        let details_id = breed_id.to_string();
        let images_api = Arc::clone(&self.api);
        let images_id = breed_id.to_string();
        let limit = self.image_limit;

        let parts = fanout::all_or_fail(vec![
            task(async move {
                let breeds = details_api.list_breeds().await?;
                breeds
                    .into_iter()
                    .find(|breed| breed.id == details_id)
                    .map(BreedPart::Details)
                    .ok_or_else(|| ApiError::NotFound(format!("unknown breed: {details_id}")))
            }),
            task(async move {
                images_api
                    .breed_images(&images_id, limit)
                    .await
                    .map(BreedPart::Images)
            }),
        ])
        .await?;

        let mut breed = None;
        let mut images = Vec::new();
        for part in parts {
            match part {
                BreedPart::Details(details) => breed = Some(details),
                BreedPart::Images(list) => images = list,
            }
        }

        let breed = breed.ok_or(ApiError::TaskAborted)?;
        Ok(BreedProfile { breed, images })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCatApi;

    fn breed(id: &str, name: &str) -> Breed {
        Breed {
            id: id.to_string(),
            name: name.to_string(),
            ..Breed::default()
        }
    }

    fn breed_image(url: &str) -> BreedImage {
        BreedImage {
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_profile_joins_details_and_images() {
        let api = Arc::new(MockCatApi::new());
        api.set_breeds(vec![breed("abys", "Abyssinian"), breed("beng", "Bengal")])
            .await;
        api.set_breed_images(
            "abys",
            vec![
                breed_image("https://cdn.example/a1.jpg"),
                breed_image("https://cdn.example/a2.jpg"),
            ],
        )
        .await;

        let profile = BreedOrchestrator::new(Arc::clone(&api) as Arc<dyn CatApi>, 8)
            .breed_profile("abys")
            .await
            .unwrap();

        assert_eq!(profile.breed.name, "Abyssinian");
        assert_eq!(profile.images.len(), 2);
        // Both upstream fetches happen for one profile request.
        assert_eq!(api.call_count("list_breeds").await, 1);
        assert_eq!(api.call_count("breed_images").await, 1);
    }

    #[tokio::test]
    async fn test_unknown_breed_is_not_found() {
        let api = Arc::new(MockCatApi::new());
        api.set_breeds(vec![breed("abys", "Abyssinian")]).await;

        let err = BreedOrchestrator::new(api, 8)
            .breed_profile("nope")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_breed_id_rejected_before_upstream() {
        let api = Arc::new(MockCatApi::new());

        let err = BreedOrchestrator::new(Arc::clone(&api) as Arc<dyn CatApi>, 8)
            .breed_profile("")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(api.total_calls().await, 0);
    }

    #[tokio::test]
    async fn test_profile_tolerates_missing_images() {
        let api = Arc::new(MockCatApi::new());
        api.set_breeds(vec![breed("abys", "Abyssinian")]).await;

        let profile = BreedOrchestrator::new(api, 8)
            .breed_profile("abys")
            .await
            .unwrap();
        assert!(profile.images.is_empty());
    }

    #[tokio::test]
    async fn test_image_fetch_failure_fails_profile() {
        let api = Arc::new(MockCatApi::new());
        api.set_breeds(vec![breed("abys", "Abyssinian")]).await;
        api.fail_next("breed_images", ApiError::Unreachable("down".into()))
            .await;

        let err = BreedOrchestrator::new(api, 8)
            .breed_profile("abys")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_profile_respects_image_limit() {
        let api = Arc::new(MockCatApi::new());
        api.set_breeds(vec![breed("abys", "Abyssinian")]).await;
        api.set_breed_images(
            "abys",
            (0..10)
                .map(|i| breed_image(&format!("https://cdn.example/a{i}.jpg")))
                .collect(),
        )
        .await;

        let profile = BreedOrchestrator::new(api, 3)
            .breed_profile("abys")
            .await
            .unwrap();
        assert_eq!(profile.images.len(), 3);
    }
}
