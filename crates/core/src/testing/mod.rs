//! Test doubles shared by unit and integration tests.

mod mock_cat_api;

pub use mock_cat_api::MockCatApi;
