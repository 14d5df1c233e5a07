use super::session::Vec2;

/// World units per screen pixel. Actor positions are kept at this finer
/// resolution; everything drawn converts down to pixel space.
pub const WORLD_UNITS_PER_PIXEL: f32 = 16.0;

/// Edge of one square map tile, in screen pixels.
pub const TILE_SIZE_PX: i32 = 32;

/// Edge of one square map tile, in world units.
pub const TILE_SIZE_WORLD: f32 = TILE_SIZE_PX as f32 * WORLD_UNITS_PER_PIXEL;

/// Mirror of the drawing surface size, updated on resize events and read
/// each frame to size the camera window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// The world-space pixel rectangle currently visible, centered on the
/// controlled actor. Derived fresh every frame; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraWindow {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl CameraWindow {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }
}

/// Top-left corner is the actor position in pixel space minus half the
/// viewport, rounded (not truncated) so odd viewport dimensions do not
/// produce one-pixel seams.
pub fn camera_window(position: Vec2, viewport: Viewport) -> CameraWindow {
    let min_x = (position.x / WORLD_UNITS_PER_PIXEL - viewport.width as f32 * 0.5).round() as i32;
    let min_y = (position.y / WORLD_UNITS_PER_PIXEL - viewport.height as f32 * 0.5).round() as i32;
    CameraWindow {
        min_x,
        min_y,
        max_x: min_x + viewport.width as i32,
        max_y: min_y + viewport.height as i32,
    }
}
