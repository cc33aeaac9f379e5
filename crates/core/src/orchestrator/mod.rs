//! Request orchestrators.
//!
//! Each orchestrator composes several upstream calls into one response,
//! running independent calls concurrently through [`crate::fanout`] and
//! surfacing the first failure as a single [`crate::error::ApiError`].

mod breeds;
mod voting;

pub use breeds::{BreedOrchestrator, BreedProfile};
pub use voting::{ImagePayload, VotingOrchestrator};
