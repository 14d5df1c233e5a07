mod camera;
mod clock;
mod frame;
mod hud;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod session;

pub use camera::{
    camera_window, CameraWindow, Viewport, TILE_SIZE_PX, TILE_SIZE_WORLD, WORLD_UNITS_PER_PIXEL,
};
pub use clock::SimulationClock;
pub use frame::{FrameDriver, FramePresenter, FrameReport};
pub use hud::{reticle_target, FIRING_DISTANCE_PX};
pub use input::{handle_key, IntentKey};
pub use loop_runner::{
    run_app, AppError, Bootstrap, BootstrapError, LoopConfig, DEFAULT_TICK_LENGTH,
};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{AssetError, Canvas, RenderError, Renderer, TileSheet};
pub use session::{
    Actor, Heading, Intents, MapError, Session, SessionError, SessionPhase, StartPose, Vec2,
    WorldMap,
};
