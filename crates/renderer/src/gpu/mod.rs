//! GPU side of the overlay.
//!
//! - `context` owns the wgpu instance/device/surface and picks a surface
//!   format and alpha mode that let the desktop show through.
//! - `texture` uploads the decoded image.
//! - `pipeline` holds the textured-quad pipeline, its bind group and buffers.
//! - `state` glues them together behind the `GpuState` API used by `window`.

mod context;
mod pipeline;
mod state;
mod texture;

pub(crate) use context::GpuContext;
pub(crate) use state::GpuState;
