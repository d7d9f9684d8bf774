//! Level content for Crakers.
//!
//! Two ways to obtain a [`crakers_core::Level`]:
//! - [`generate_level`] builds the classic arena from a seed.
//! - [`LevelLoader`] reads a hand-authored RON level (behind the `loaders` feature).
//!
//! [`ConfigLoader`] reads tunables from TOML.

pub mod procedural;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use procedural::{GeneratorConfig, generate_level};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LevelLoader, LoadResult};
