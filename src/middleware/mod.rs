pub mod context;
pub mod cors;
pub mod entry_point;
pub mod filter;

pub use context::{AuthUser, SecurityContext};
