// handlers/public - unauthenticated status endpoints
pub mod fallback;
pub mod root;
pub mod status;

pub use fallback::{method_not_allowed, not_found};
pub use root::root;
pub use status::api_status;
