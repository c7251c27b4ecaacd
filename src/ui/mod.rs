pub mod draw;
pub mod events;

pub use events::{log_debug, EventHandler};
