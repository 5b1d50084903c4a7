//! Renderer-agnostic scene data for lux.
//!
//! This crate holds the types exchanged between the rendering core and
//! its collaborators (scene/mesh loaders, configuration): materials,
//! loaded triangle meshes, render settings, and the configuration error
//! type. It knows nothing about acceleration structures or shading.

mod error;
mod material;
mod mesh;
mod settings;

pub use error::ConfigError;
pub use material::{Color, Material};
pub use mesh::Mesh;
pub use settings::{RenderSettings, SplitPolicy};
