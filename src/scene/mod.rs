//! Scene Graph Module
//!
//! Manages the node hierarchy and its components:
//! - [`Node`]: hierarchy, name and transform
//! - [`Transform`]: local TRS with cached matrices
//! - [`Scene`]: node storage plus camera/light component maps
//! - [`Camera`], [`Light`]: components attached to nodes
//! - `transform_system`: world-matrix propagation decoupled from `Scene`

pub mod camera;
pub mod light;
pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use camera::Camera;
pub use light::{Light, LightKind};
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
