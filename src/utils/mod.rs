pub mod fallback;
pub mod input;

pub use fallback::{first_success, Attempt};
pub use input::normalize_repo_input;
