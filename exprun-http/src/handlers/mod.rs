pub mod health;
pub mod stream;

// Re-export all handlers for easier imports
pub use health::*;
pub use stream::*;
