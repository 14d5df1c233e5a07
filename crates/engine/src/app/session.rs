use thiserror::Error;

use super::camera::{CameraWindow, Viewport};
use super::rendering::Canvas;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Actor orientation on the fixed circular 0..=255 scale, measured clockwise.
/// All arithmetic wraps at the full circle; a heading never goes negative or
/// out of range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heading(u8);

impl Heading {
    pub const FULL_CIRCLE: u16 = 256;

    pub fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn rotated(self, steps: i16) -> Self {
        Self((self.0 as i16 + steps).rem_euclid(Self::FULL_CIRCLE as i16) as u8)
    }

    /// Converts the clockwise integer scale to standard counter-clockwise
    /// radians for trigonometry.
    pub fn to_radians(self) -> f32 {
        (Self::FULL_CIRCLE - self.0 as u16) as f32 * std::f32::consts::TAU
            / Self::FULL_CIRCLE as f32
    }
}

/// Live control input as held right now, independent of simulation timing.
/// The flags are mutually independent; both turn flags may be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub accelerating: bool,
    pub braking: bool,
    pub turning_counter_clockwise: bool,
    pub turning_clockwise: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartPose {
    pub position: Vec2,
    pub heading: Heading,
}

/// The controlled actor as the loop core sees it: consumes the current
/// intents and advances position/heading by one tick's worth of motion per
/// `update` call. The motion model itself lives in the game crate.
pub trait Actor {
    fn update(&mut self);
    fn position(&self) -> Vec2;
    fn heading(&self) -> Heading;
    fn intents_mut(&mut self) -> &mut Intents;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map text malformed at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("map declares no start positions")]
    NoStarts,
}

/// World storage and windowed tile rendering. `draw` must tolerate windows
/// partially or fully outside the defined map bounds.
pub trait WorldMap {
    fn init(&mut self);
    fn load(&mut self, raw: &str) -> Result<(), MapError>;
    fn draw(&self, window: &CameraWindow, canvas: &mut Canvas<'_>);
    fn starts(&self) -> &[StartPose];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AssetLoading,
    MapLoading,
    Ready,
    Running,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{operation} is not valid in the {phase:?} phase")]
    PhaseOrder {
        operation: &'static str,
        phase: SessionPhase,
    },
    #[error("actor spawned before the map finished loading")]
    MapNotLoaded,
    #[error(transparent)]
    MapLoad(#[from] MapError),
}

/// Explicit session context replacing the source's ambient globals: owns the
/// map, the optional actor, and the viewport, and enforces the bootstrap
/// ordering AssetLoading -> MapLoading -> Ready -> Running so nothing can
/// tick before the world and starting pose exist.
pub struct Session {
    phase: SessionPhase,
    map: Box<dyn WorldMap>,
    map_loaded: bool,
    actor: Option<Box<dyn Actor>>,
    viewport: Viewport,
    paused: bool,
}

impl Session {
    pub fn new(map: Box<dyn WorldMap>, viewport: Viewport) -> Self {
        Self {
            phase: SessionPhase::AssetLoading,
            map,
            map_loaded: false,
            actor: None,
            viewport,
            paused: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn assets_ready(&mut self) -> Result<(), SessionError> {
        self.require_phase(SessionPhase::AssetLoading, "assets_ready")?;
        self.phase = SessionPhase::MapLoading;
        Ok(())
    }

    pub fn load_map(&mut self, raw: &str) -> Result<(), SessionError> {
        self.require_phase(SessionPhase::MapLoading, "load_map")?;
        self.map.init();
        self.map.load(raw)?;
        self.map_loaded = true;
        Ok(())
    }

    pub fn spawn_actor(&mut self, actor: Box<dyn Actor>) -> Result<(), SessionError> {
        self.require_phase(SessionPhase::MapLoading, "spawn_actor")?;
        if !self.map_loaded {
            return Err(SessionError::MapNotLoaded);
        }
        self.actor = Some(actor);
        self.phase = SessionPhase::Ready;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.require_phase(SessionPhase::Ready, "start")?;
        self.phase = SessionPhase::Running;
        Ok(())
    }

    /// Soft pause: suspends future ticks and rendering, leaves all session
    /// state intact.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True when frames should tick and render.
    pub fn is_ticking(&self) -> bool {
        self.phase == SessionPhase::Running && !self.paused
    }

    pub fn map(&self) -> &dyn WorldMap {
        self.map.as_ref()
    }

    pub fn actor(&self) -> Option<&dyn Actor> {
        self.actor.as_deref()
    }

    pub fn actor_mut(&mut self) -> Option<&mut (dyn Actor + 'static)> {
        self.actor.as_deref_mut()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn require_phase(
        &self,
        expected: SessionPhase,
        operation: &'static str,
    ) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::PhaseOrder {
                operation,
                phase: self.phase,
            })
        }
    }
}
