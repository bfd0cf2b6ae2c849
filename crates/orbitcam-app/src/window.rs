//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it feeds keyboard,
//! mouse, and raw device motion into the input trackers, ticks the
//! [`GameLoop`] on every redraw, and applies the cursor mode the game asks
//! for.

use orbitcam_config::Config;
use orbitcam_input::{CursorMode, KeyboardState, MouseState};
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use winit::application::ApplicationHandler;
use winit::error::{EventLoopError, OsError};
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::game_loop::{FramePhases, GameLoop};

/// Failures of the windowed host.
#[derive(Debug, Error)]
pub enum AppError {
    /// The event loop could not be created or failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),
    /// The OS refused to create the window.
    #[error("window creation failed: {0}")]
    Window(#[from] OsError),
}

/// A game the windowed host can drive.
pub trait WindowedGame: FramePhases {
    /// Called once per frame, before the loop ticks, with this frame's
    /// device state.
    fn sample_input(&mut self, keyboard: &KeyboardState, mouse: &MouseState);

    /// Cursor mode the game wants after the last tick.
    fn cursor_mode(&self) -> CursorMode;
}

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Host state: the window, the input trackers, the loop, and the game.
pub struct AppState<G> {
    window: Option<Window>,
    attributes: WindowAttributes,
    game_loop: GameLoop,
    keyboard_state: KeyboardState,
    mouse_state: MouseState,
    game: G,
    startup_error: Option<OsError>,
}

impl<G: WindowedGame> AppState<G> {
    /// Creates the host; the window is opened on the first `resumed`.
    pub fn new(config: &Config, game: G) -> Self {
        Self {
            window: None,
            attributes: window_attributes_from_config(config),
            game_loop: GameLoop::new(),
            keyboard_state: KeyboardState::new(),
            mouse_state: MouseState::new(),
            game,
            startup_error: None,
        }
    }

    /// The hosted game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.game_loop.frame_count()
    }

    fn run_frame(&mut self) {
        self.game
            .sample_input(&self.keyboard_state, &self.mouse_state);
        self.game_loop.tick(&mut self.game);

        let wanted = self.game.cursor_mode();
        if wanted != self.mouse_state.cursor_mode() {
            debug!("cursor mode -> {wanted:?}");
            match &self.window {
                Some(window) => self.mouse_state.set_cursor_mode(window, wanted),
                None => self.mouse_state.set_cursor_mode_flag(wanted),
            }
        }

        // Clear per-frame transient input state after all phases have run.
        self.keyboard_state.clear_transients();
        self.mouse_state.clear_transients();
    }

    fn into_game(self) -> G {
        self.game
    }
}

impl<G: WindowedGame> ApplicationHandler for AppState<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    "Window created: {}x{} (scale: {:.2})",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!("Window creation failed: {e}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard_state.process_event(&event);
                if self.keyboard_state.just_pressed(KeyCode::Escape) {
                    info!("Escape pressed, shutting down");
                    event_loop.exit();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_state.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_state.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse_state.on_scroll(delta);
            }
            WindowEvent::Focused(false) => {
                self.keyboard_state.release_all();
            }
            WindowEvent::RedrawRequested => {
                self.run_frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_state.on_raw_motion(delta.0, delta.1);
        }
    }
}

/// Opens a window and drives `game` until the window is closed or Escape
/// is pressed. Returns the game so the caller can inspect its final state.
///
/// # Errors
///
/// Returns [`AppError`] if the event loop or the window cannot be created.
#[instrument(skip_all)]
pub fn run_windowed<G: WindowedGame>(config: &Config, game: G) -> Result<G, AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, game);
    event_loop.run_app(&mut app)?;
    info!("Event loop finished after {} frames", app.frame_count());
    if let Some(e) = app.startup_error.take() {
        return Err(e.into());
    }
    Ok(app.into_game())
}
