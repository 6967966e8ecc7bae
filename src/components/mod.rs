//! UI chrome: presentation widgets feeding selections into the core.

pub mod colors;
pub mod toolbar;
