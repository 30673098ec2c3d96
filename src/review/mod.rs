// src/review/mod.rs

pub mod definitions;
pub mod events;
pub mod export;
pub mod plugin;
pub mod resources;
pub mod seed;

pub(crate) mod systems;

pub use plugin::ReviewPlugin;
pub use resources::ReviewRegistry;
