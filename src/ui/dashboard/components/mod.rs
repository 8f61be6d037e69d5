//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod best;
pub mod footer;
pub mod header;
pub mod history;
pub mod logs;
pub mod worst;
