use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder, WindowLevel};

use tracing::{info, warn};

use crate::asset::load_image;
use crate::error::OverlayError;
use crate::gpu::GpuState;
use crate::hotkey::{HotkeyHandler, KeyOutcome};
use crate::keys::key_name;
use crate::types::OverlayConfig;

/// Per-process overlay state owned by the event loop.
///
/// `gpu` is declared before `window` so the surface is released while the
/// window it was created from still exists.
struct OverlayState {
    gpu: GpuState,
    window: Window,
    hotkeys: HotkeyHandler,
}

impl OverlayState {
    fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let Some(name) = key_name(event.physical_key) else {
            return KeyOutcome::Ignored;
        };
        let outcome = self.hotkeys.handle_key(
            &name,
            event.state == ElementState::Pressed,
            event.repeat,
        );
        if matches!(outcome, KeyOutcome::Toggled(_)) {
            self.window.request_redraw();
        }
        outcome
    }
}

/// Opens the overlay window and runs the render loop until the window is
/// closed or the exit key is pressed.
///
/// The image is decoded before any window is created so a bad path fails
/// without flashing an empty overlay.
pub fn run_overlay(config: OverlayConfig, hotkeys: HotkeyHandler) -> Result<(), OverlayError> {
    let image = load_image(&config.image_path, &config.texture)?;

    let event_loop = EventLoop::new().map_err(|err| {
        OverlayError::Initialization(format!("failed to create event loop: {err}"))
    })?;

    let (width, height) = config.surface_size;
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(PhysicalSize::new(width.max(1), height.max(1)))
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(false)
        .with_window_level(WindowLevel::AlwaysOnTop)
        .build(&event_loop)
        .map_err(|err| {
            OverlayError::Initialization(format!("failed to create overlay window: {err}"))
        })?;

    if config.click_through {
        if let Err(err) = window.set_cursor_hittest(false) {
            warn!(error = %err, "click-through is not supported on this platform");
        }
    }

    let gpu = GpuState::new(
        &window,
        window.inner_size(),
        &image,
        config.placement,
        config.texture.flip_vertical,
    )?;
    drop(image);

    info!(
        image = %config.image_path.display(),
        keybind = %hotkeys.keybind(),
        exit_key = %hotkeys.exit_key(),
        "overlay running"
    );

    let mut state = OverlayState {
        gpu,
        window,
        hotkeys,
    };
    let mut failure = None;

    event_loop
        .run(|event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == state.window.id() => {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if state.handle_key(&event) == KeyOutcome::Exit {
                            elwt.exit();
                        }
                    }
                    WindowEvent::Resized(new_size) => {
                        state.gpu.resize(new_size);
                    }
                    WindowEvent::RedrawRequested => {
                        match state.gpu.render(state.hotkeys.is_visible()) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                state.gpu.resize(state.gpu.size());
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                failure = Some(OverlayError::Surface(
                                    wgpu::SurfaceError::OutOfMemory,
                                ));
                                elwt.exit();
                            }
                            Err(wgpu::SurfaceError::Timeout) => {
                                warn!("surface timeout; retrying next frame");
                            }
                            Err(other) => {
                                warn!(error = ?other, "surface error; retrying next frame");
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                state.window.request_redraw();
                elwt.set_control_flow(ControlFlow::Poll);
            }
            _ => {}
        })
        .map_err(|err| {
            OverlayError::Initialization(format!("overlay event loop error: {err}"))
        })?;

    info!("overlay closed");
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
