pub mod app;
pub mod clarity;
pub mod config;
pub mod repository;
pub mod service;
pub mod translate;

pub use app::build_service;

// Re-export commonly used types for tests
pub use service::{ServiceError, SwapReceipt, SwapService, SwapSettings, TokenSelection};
pub use translate::{TranslationError, normalize_post_conditions, translate_arguments};
