pub mod messages;
pub mod room;

// Re-export all types
pub use messages::*;
pub use room::*;
