//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to logical actions)
//! - HUD markup
//! - Storage (LocalStorage on web)

pub mod hud;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use hud::{StatusLine, inventory_html};
pub use input::{Action, Command, InputState, PointerButton};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
