pub mod client;
pub mod retry;
pub mod sync;

pub use client::{RecommendationService, RemoteClient};
pub use retry::{Attempt, RetryPolicy};
pub use sync::{sync_recommendations, RemoteAlternatives};
