pub mod app;

pub use app::{
    camera_window, handle_key, reticle_target, run_app, Actor, AppError, AssetError, Bootstrap,
    BootstrapError, CameraWindow, Canvas, FrameDriver, FramePresenter, FrameReport, Heading,
    IntentKey, Intents, LoopConfig, LoopMetricsSnapshot, MapError, RenderError, Renderer, Session,
    SessionError, SessionPhase, SimulationClock, StartPose, TileSheet, Vec2, Viewport, WorldMap,
    DEFAULT_TICK_LENGTH, FIRING_DISTANCE_PX, TILE_SIZE_PX, TILE_SIZE_WORLD, WORLD_UNITS_PER_PIXEL,
};
