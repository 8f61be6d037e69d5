pub mod core;
pub mod loader;

pub use self::core::EventSender;
pub use loader::{ComponentLoader, ComponentUpdate, Job};
