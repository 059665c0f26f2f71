pub mod constants;
pub mod error;
pub mod error_code;
pub mod session;
pub mod types;

pub use error::{Error, Result};
pub use error_code::ErrorCode;
pub use session::{Session, SessionStore};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
