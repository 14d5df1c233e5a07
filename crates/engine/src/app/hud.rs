use super::camera::{TILE_SIZE_PX, WORLD_UNITS_PER_PIXEL};
use super::session::{Heading, Vec2};

// TODO: derive firing distance from the equipped weapon's range instead of a
// fixed seven tiles.
pub const FIRING_DISTANCE_PX: f32 = (7 * TILE_SIZE_PX) as f32;

/// Computes the reticle target in world-pixel space: a point a fixed firing
/// distance ahead of the actor along its heading. Drawing the point is the
/// renderer's job. The reticle is currently shown regardless of actor state;
/// whether it should hide for a non-interactive actor is an open product
/// decision.
pub fn reticle_target(position: Vec2, heading: Heading) -> (i32, i32) {
    let radians = heading.to_radians();
    let x = position.x / WORLD_UNITS_PER_PIXEL + radians.cos() * FIRING_DISTANCE_PX;
    let y = position.y / WORLD_UNITS_PER_PIXEL + radians.sin() * FIRING_DISTANCE_PX;
    (x.round() as i32, y.round() as i32)
}
