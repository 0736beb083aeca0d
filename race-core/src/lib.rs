pub mod registry;
pub mod room_code;

// Re-export main components
pub use registry::*;
pub use room_code::*;
