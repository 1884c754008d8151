pub mod autocomplete;
pub mod calendar;
pub mod clues;
pub mod game_state;
pub mod post_format;
pub mod presentation;
pub mod scoring;
pub mod stats;

// Re-export main components
pub use autocomplete::*;
pub use calendar::*;
pub use clues::*;
pub use game_state::*;
pub use presentation::*;
pub use scoring::*;
pub use stats::*;
