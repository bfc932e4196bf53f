//! Application Layer
//!
//! - [`input`]: platform-agnostic keyboard/mouse state
//! - [`winit`]: window shell driving [`Engine`](crate::engine::Engine) frames
//!   (feature `winit`)

pub mod input;

#[cfg(feature = "winit")]
pub mod winit;

pub use input::{ButtonState, Input, Key, MouseButton};
