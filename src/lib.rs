#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Idle-motion avatar viewer.
//!
//! A glTF avatar is loaded into a lightweight scene graph; once a second its
//! hands and arms receive a fresh random offset and rotation.
//!
//! - [`motion`]: sampler, pose snapshot, mount-scoped idle driver, binder
//! - [`viewer`]: [`AvatarViewer`], one mounted viewer instance
//! - [`scene`]: nodes, transforms, cameras, lights
//! - [`assets`]: glTF hierarchy loading on a background runtime
//! - [`app`]: input and the winit window shell

pub mod app;
pub mod assets;
pub mod config;
pub mod engine;
pub mod errors;
pub mod motion;
pub mod scene;
pub mod utils;
pub mod viewer;

pub use app::input::Input;
#[cfg(feature = "winit")]
pub use app::winit::{App, AppHandler};
pub use assets::{AssetServer, ModelRequest, ModelState, Prefab};
pub use config::ViewerConfig;
pub use engine::{Engine, FrameState};
pub use errors::{Error, Result};
pub use motion::{AvatarPose, IdleMotion, Limb, LimbSample};
pub use scene::{Camera, Light, Node, NodeHandle, Scene, Transform};
pub use utils::{Interval, OrbitControls, Timer};
pub use viewer::AvatarViewer;
