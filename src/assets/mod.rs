//! Asset Module
//!
//! - [`AssetServer`]: background model loading with non-blocking polling
//! - [`Prefab`]: thread-safe node hierarchy parsed from a model file
//! - [`GltfLoader`]: glTF / GLB hierarchy parser (feature `gltf`)

pub mod loaders;
pub mod prefab;
pub mod server;

pub use prefab::{Prefab, PrefabNode, SharedPrefab};
pub use server::{AssetServer, ModelRequest, ModelState};

#[cfg(feature = "gltf")]
pub use loaders::GltfLoader;
