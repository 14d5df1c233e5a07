use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::window::Window;

use crate::app::camera::{CameraWindow, Viewport, WORLD_UNITS_PER_PIXEL};
use crate::app::frame::FramePresenter;
use crate::app::hud::reticle_target;
use crate::app::session::{Heading, Session};

use super::canvas::Canvas;
use super::sheet::TileSheet;

const CLEAR_COLOR: [u8; 4] = [12, 24, 48, 255];
const TANK_BODY_COLOR: [u8; 4] = [60, 72, 56, 255];
const TANK_BARREL_COLOR: [u8; 4] = [210, 214, 200, 255];
const RETICLE_COLOR: [u8; 4] = [255, 255, 255, 255];
const TANK_HALF_SIZE_PX: i32 = 6;
const TANK_BARREL_LENGTH_PX: i32 = 11;
const RETICLE_ARM_PX: i32 = 4;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Surface(#[from] pixels::Error),
}

/// Owns the window framebuffer and the optional tile sheet, and performs the
/// actual per-frame drawing: windowed map draw, actor marker, HUD reticle.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
    tile_sheet: Option<TileSheet>,
}

impl Renderer {
    pub fn new(window: Arc<Window>, tile_sheet: Option<TileSheet>) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
            tile_sheet,
        })
    }

    /// Resizes the framebuffer to the full surface, no aspect preservation.
    /// Zero-sized surfaces (minimized window) are skipped.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, pixels::Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }
}

impl FramePresenter for Renderer {
    fn present(&mut self, session: &Session, window: CameraWindow) -> Result<(), RenderError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }

        let mut canvas = Canvas::new(
            self.pixels.frame_mut(),
            self.viewport.width,
            self.viewport.height,
            self.tile_sheet.as_ref(),
        );
        canvas.clear(CLEAR_COLOR);
        session.map().draw(&window, &mut canvas);

        if let Some(actor) = session.actor() {
            let position = actor.position();
            let screen_x = (position.x / WORLD_UNITS_PER_PIXEL).round() as i32 - window.min_x;
            let screen_y = (position.y / WORLD_UNITS_PER_PIXEL).round() as i32 - window.min_y;
            draw_tank_marker(&mut canvas, screen_x, screen_y, actor.heading());

            let (target_x, target_y) = reticle_target(position, actor.heading());
            draw_reticle(&mut canvas, target_x - window.min_x, target_y - window.min_y);
        }

        self.pixels.render()?;
        Ok(())
    }
}

fn draw_tank_marker(canvas: &mut Canvas<'_>, x: i32, y: i32, heading: Heading) {
    canvas.fill_rect(
        x - TANK_HALF_SIZE_PX,
        y - TANK_HALF_SIZE_PX,
        TANK_HALF_SIZE_PX * 2,
        TANK_HALF_SIZE_PX * 2,
        TANK_BODY_COLOR,
    );

    let radians = heading.to_radians();
    let (dx, dy) = (radians.cos(), radians.sin());
    for step in 0..TANK_BARREL_LENGTH_PX {
        canvas.put_pixel(
            x + (dx * step as f32).round() as i32,
            y + (dy * step as f32).round() as i32,
            TANK_BARREL_COLOR,
        );
    }
}

fn draw_reticle(canvas: &mut Canvas<'_>, x: i32, y: i32) {
    for offset in -RETICLE_ARM_PX..=RETICLE_ARM_PX {
        canvas.put_pixel(x + offset, y, RETICLE_COLOR);
        canvas.put_pixel(x, y + offset, RETICLE_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; width as usize * height as usize * 4]
    }

    #[test]
    fn tank_marker_draws_body_and_barrel_toward_heading() {
        let mut buffer = canvas_buffer(32, 32);
        let mut canvas = Canvas::new(&mut buffer, 32, 32, None);

        // Heading 0 points east.
        draw_tank_marker(&mut canvas, 16, 16, Heading::new(0));

        assert_eq!(canvas.pixel(16, 16), Some(TANK_BARREL_COLOR));
        assert_eq!(canvas.pixel(16 + TANK_BARREL_LENGTH_PX - 1, 16),
            Some(TANK_BARREL_COLOR));
        assert_eq!(canvas.pixel(16 - TANK_HALF_SIZE_PX, 16), Some(TANK_BODY_COLOR));
        assert_eq!(canvas.pixel(16, 16 + TANK_HALF_SIZE_PX - 1), Some(TANK_BODY_COLOR));
    }

    #[test]
    fn reticle_is_a_cross_and_clips_off_screen() {
        let mut buffer = canvas_buffer(16, 16);
        let mut canvas = Canvas::new(&mut buffer, 16, 16, None);

        draw_reticle(&mut canvas, 8, 8);
        assert_eq!(canvas.pixel(8, 8), Some(RETICLE_COLOR));
        assert_eq!(canvas.pixel(8 + RETICLE_ARM_PX, 8), Some(RETICLE_COLOR));
        assert_eq!(canvas.pixel(8, 8 - RETICLE_ARM_PX), Some(RETICLE_COLOR));
        assert_eq!(canvas.pixel(7, 7), Some([0, 0, 0, 0]));

        // Partially off-screen reticle must not panic.
        draw_reticle(&mut canvas, 0, 0);
        assert_eq!(canvas.pixel(0, 0), Some(RETICLE_COLOR));
    }
}
