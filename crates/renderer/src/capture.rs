use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{WindowBuilder, WindowLevel};

use crate::error::OverlayError;
use crate::gpu::GpuContext;
use crate::keys::key_name;

const CAPTURE_TITLE: &str = "Press a Key";
const CAPTURE_SIZE: PhysicalSize<u32> = PhysicalSize::new(200, 200);
const CAPTURE_BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.08,
    b: 0.1,
    a: 1.0,
};

/// Opens a small always-on-top window and returns the name of the first key
/// pressed in it. Returns `Ok(None)` if the window is closed first.
pub fn capture_key() -> Result<Option<String>, OverlayError> {
    let event_loop = EventLoop::new().map_err(|err| {
        OverlayError::Initialization(format!("failed to create event loop: {err}"))
    })?;
    let window = WindowBuilder::new()
        .with_title(CAPTURE_TITLE)
        .with_inner_size(CAPTURE_SIZE)
        .with_resizable(false)
        .with_window_level(WindowLevel::AlwaysOnTop)
        .build(&event_loop)
        .map_err(|err| {
            OverlayError::Initialization(format!("failed to create capture window: {err}"))
        })?;

    // Some compositors only map a window once it has presented a buffer.
    let mut gpu = GpuContext::new(&window, window.inner_size())?;

    let mut captured = None;
    event_loop
        .run(|event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);
            match event {
                Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        tracing::info!("key capture cancelled");
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state != ElementState::Pressed || event.repeat {
                            return;
                        }
                        if let Some(name) = key_name(event.physical_key) {
                            tracing::info!(key = %name, "captured key");
                            captured = Some(name);
                            elwt.exit();
                        }
                    }
                    WindowEvent::Resized(new_size) => {
                        gpu.resize(new_size);
                        window.request_redraw();
                    }
                    WindowEvent::RedrawRequested => match gpu.clear(CAPTURE_BACKGROUND) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu.resize(gpu.size);
                            window.request_redraw();
                        }
                        Err(err) => {
                            tracing::warn!(error = ?err, "failed to draw capture window");
                        }
                    },
                    _ => {}
                },
                _ => {}
            }
        })
        .map_err(|err| {
            OverlayError::Initialization(format!("key capture event loop error: {err}"))
        })?;

    drop(gpu);
    Ok(captured)
}
