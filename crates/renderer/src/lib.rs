//! Renderer crate for EasyOverlay.
//!
//! Shows a single image in a transparent, undecorated, always-on-top window
//! and flips its visibility when the configured hotkey is pressed. The overall
//! flow is:
//!
//! ```text
//!   CLI / easyoverlay
//!          │ OverlayConfig + HotkeyHandler
//!          ▼
//!   run_overlay ──▶ load_image ──▶ GpuState (texture, quad, pipeline)
//!          │
//!          └─▶ winit event loop ──▶ key event ──▶ HotkeyHandler::handle_key
//!                        │
//!                        └─▶ redraw ──▶ clear transparent ──▶ draw quad if visible
//! ```
//!
//! `capture_key` is the companion used when rebinding: it opens a small window
//! and reports the first key pressed, by the same name the hotkey handler
//! matches against.

mod asset;
mod capture;
mod compile;
mod error;
mod geometry;
mod gpu;
mod hotkey;
mod keys;
mod types;
mod window;

pub use asset::load_image;
pub use capture::capture_key;
pub use error::OverlayError;
pub use geometry::{build_quad, Quad, Vertex};
pub use hotkey::{HotkeyHandler, KeyOutcome};
pub use types::{OverlayConfig, Placement, TextureOptions};
pub use window::run_overlay;
