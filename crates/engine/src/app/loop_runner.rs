use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::clock::SimulationClock;
use super::frame::FrameDriver;
use super::input;
use super::metrics::MetricsAccumulator;
use super::rendering::{AssetError, RenderError, Renderer, TileSheet};
use super::session::{Actor, MapError, Session, SessionError, StartPose, WorldMap};

pub const DEFAULT_TICK_LENGTH: Duration = Duration::from_millis(20);

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub tick_length: Duration,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Treads".to_string(),
            window_width: 1280,
            window_height: 720,
            tick_length: DEFAULT_TICK_LENGTH,
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to load tile asset: {0}")]
    Asset(#[from] AssetError),
    #[error("failed to read map {path:?}: {source}")]
    MapRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Game-supplied construction hooks consumed by the fixed session-start
/// sequence. The loop owns the ordering; the game owns the content.
pub trait Bootstrap {
    /// Loads the tile sheet asset. `None` selects flat terrain colors.
    fn load_tiles(&mut self) -> Result<Option<TileSheet>, BootstrapError>;
    fn world_map(&mut self) -> Box<dyn WorldMap>;
    fn map_text(&mut self) -> Result<String, BootstrapError>;
    /// Picks one pose from the map's declared start list (never empty here).
    fn pick_start(&mut self, starts: &[StartPose]) -> StartPose;
    fn build_actor(&mut self, start: StartPose) -> Box<dyn Actor>;
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] RenderError),
    #[error("failed to render the initial frame: {0}")]
    InitialRender(#[source] RenderError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Runs the session-start sequence, then enters the host event loop. The
/// loop drives two event sources on one thread: redraw requests standing in
/// for the periodic tick timer, and input/resize events arriving between
/// frames. Input handlers always complete before the next frame ticks.
pub fn run_app(config: LoopConfig, mut bootstrap: Box<dyn Bootstrap>) -> Result<(), AppError> {
    let tick_length = normalize_non_zero_duration(config.tick_length, DEFAULT_TICK_LENGTH);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));

    // Fixed start order: tile asset, drawing surface, map init + load,
    // start pose, actor, one immediate frame, then the running loop.
    let tile_sheet = bootstrap.load_tiles()?;

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer =
        Renderer::new(Arc::clone(&window), tile_sheet).map_err(AppError::CreateRenderer)?;

    let mut session = Session::new(bootstrap.world_map(), renderer.viewport());
    session.assets_ready()?;

    let map_text = bootstrap.map_text()?;
    session.load_map(&map_text)?;

    let start = {
        let starts = session.map().starts();
        if starts.is_empty() {
            return Err(SessionError::from(MapError::NoStarts).into());
        }
        bootstrap.pick_start(starts)
    };
    session.spawn_actor(bootstrap.build_actor(start))?;

    let mut frame_driver = FrameDriver::new(SimulationClock::new(tick_length, Instant::now()));
    frame_driver
        .render(&session, &mut renderer)
        .map_err(AppError::InitialRender)?;
    session.start()?;

    info!(
        tick_length_ms = tick_length.as_millis() as u64,
        start_x = start.position.x,
        start_y = start.position.y,
        start_heading = start.heading.raw(),
        "session_running"
    );

    event_loop.set_control_flow(ControlFlow::Poll);

    let window_for_loop = Arc::clone(&window);
    let mut metrics = MetricsAccumulator::new(metrics_log_interval);
    let mut last_frame_instant = Instant::now();

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window_for_loop.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        info!(reason = "window_close", "shutdown_requested");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                            return;
                        }
                        session.set_viewport(renderer.viewport());
                    }
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = window_for_loop.inner_size();
                        if let Err(error) = renderer.resize(size.width, size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                            return;
                        }
                        session.set_viewport(renderer.viewport());
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        let pressed = event.state == ElementState::Pressed;
                        match event.physical_key {
                            PhysicalKey::Code(KeyCode::Escape) if pressed => {
                                info!(reason = "escape_key", "shutdown_requested");
                                window_target.exit();
                            }
                            PhysicalKey::Code(KeyCode::KeyP) if pressed && !event.repeat => {
                                let paused = !session.is_paused();
                                session.set_paused(paused);
                                if !paused {
                                    // The suspended interval is not replayed.
                                    frame_driver.resume(Instant::now());
                                }
                                info!(paused, "pause_toggled");
                            }
                            PhysicalKey::Code(code) => {
                                input::handle_key(&mut session, code, pressed);
                            }
                            PhysicalKey::Unidentified(_) => {}
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let frame_dt = now.saturating_duration_since(last_frame_instant);
                        last_frame_instant = now;

                        match frame_driver.on_frame(now, &mut session, &mut renderer) {
                            Ok(report) => {
                                metrics.record_ticks(report.ticks_applied);
                                if report.rendered {
                                    metrics.record_frame(frame_dt);
                                }
                            }
                            Err(error) => {
                                warn!(error = %error, "renderer_draw_failed");
                                window_target.exit();
                                return;
                            }
                        }

                        if let Some(snapshot) = metrics.maybe_snapshot(now) {
                            info!(
                                fps = snapshot.fps,
                                tps = snapshot.tps,
                                frame_time_ms = snapshot.frame_time_ms,
                                "loop_metrics"
                            );
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                window_for_loop.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}
