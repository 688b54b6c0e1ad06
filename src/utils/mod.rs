pub mod error_handling;
pub mod formatting;
pub mod media;
pub mod token_helper;
pub mod token_store;

// Re-export commonly used types
pub use media::{MediaElement, MediaError, MediaEvent};
pub use token_helper::{get_user_id, is_token_valid, Claims, TokenError};
pub use token_store::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};
