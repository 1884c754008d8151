pub mod errors;
pub mod game;
pub mod messages;
pub mod puzzle;
pub mod user;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use puzzle::*;
pub use user::*;

/// Host-platform user id, e.g. `t2_abc123`.
pub type UserId = String;
