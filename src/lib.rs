pub mod api;
pub mod assets;
pub mod content;
pub mod core;
pub mod error;
