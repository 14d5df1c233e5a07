use super::sheet::TileSheet;

/// Clipped pixel operations over the current RGBA frame. This is the drawing
/// surface handed to `WorldMap::draw`; coordinates may land partially or
/// fully outside the surface without failing.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    tile_sheet: Option<&'a TileSheet>,
}

impl<'a> Canvas<'a> {
    pub fn new(
        frame: &'a mut [u8],
        width: u32,
        height: u32,
        tile_sheet: Option<&'a TileSheet>,
    ) -> Self {
        debug_assert_eq!(frame.len(), width as usize * height as usize * 4);
        Self {
            frame,
            width,
            height,
            tile_sheet,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub fn put_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.frame[offset..offset + 4].copy_from_slice(&color);
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut color = [0u8; 4];
        color.copy_from_slice(&self.frame[offset..offset + 4]);
        Some(color)
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: [u8; 4]) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(width).min(self.width as i32);
        let y1 = y.saturating_add(height).min(self.height as i32);

        for row in y0..y1 {
            let row_start = (row as usize * self.width as usize + x0 as usize) * 4;
            let row_end = (row as usize * self.width as usize + x1 as usize) * 4;
            for chunk in self.frame[row_start..row_end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&color);
            }
        }
    }

    /// Draws one map tile at `(x, y)`: blits from the tile sheet when one is
    /// configured, otherwise fills a flat `fallback`-colored square.
    pub fn draw_tile(&mut self, tile_index: u32, x: i32, y: i32, size: i32, fallback: [u8; 4]) {
        match self.tile_sheet {
            Some(sheet) => self.blit_tile(sheet, tile_index, x, y),
            None => self.fill_rect(x, y, size, size, fallback),
        }
    }

    /// Copies one tile out of the sheet to `(x, y)`, clipping at the surface
    /// edges. Fully transparent sheet pixels are skipped. An out-of-range
    /// tile index draws nothing.
    fn blit_tile(&mut self, sheet: &TileSheet, tile_index: u32, x: i32, y: i32) {
        let Some((src_x, src_y)) = sheet.tile_origin(tile_index) else {
            return;
        };
        let size = sheet.tile_size() as i32;

        for row in 0..size {
            let dest_y = y + row;
            if dest_y < 0 || dest_y >= self.height as i32 {
                continue;
            }
            for col in 0..size {
                let dest_x = x + col;
                if dest_x < 0 || dest_x >= self.width as i32 {
                    continue;
                }
                let color = sheet.pixel(src_x + col as u32, src_y + row as u32);
                if color[3] == 0 {
                    continue;
                }
                let offset = (dest_y as usize * self.width as usize + dest_x as usize) * 4;
                self.frame[offset..offset + 4].copy_from_slice(&color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn frame(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; width as usize * height as usize * 4]
    }

    #[test]
    fn fill_rect_clips_at_all_surface_edges() {
        let mut buffer = frame(4, 4);
        let mut canvas = Canvas::new(&mut buffer, 4, 4, None);

        canvas.fill_rect(-2, -2, 4, 4, RED);
        canvas.fill_rect(3, 3, 10, 10, RED);

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(3, 3), Some(RED));
    }

    #[test]
    fn fill_rect_fully_outside_is_a_no_op() {
        let mut buffer = frame(4, 4);
        let mut canvas = Canvas::new(&mut buffer, 4, 4, None);

        canvas.fill_rect(100, 100, 8, 8, RED);
        canvas.fill_rect(-50, -50, 8, 8, RED);
        drop(canvas);

        assert!(buffer.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn put_pixel_outside_bounds_is_ignored() {
        let mut buffer = frame(2, 2);
        let mut canvas = Canvas::new(&mut buffer, 2, 2, None);

        canvas.put_pixel(-1, 0, RED);
        canvas.put_pixel(0, 2, RED);
        canvas.put_pixel(1, 1, RED);

        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn clear_paints_every_pixel() {
        let mut buffer = frame(3, 2);
        let mut canvas = Canvas::new(&mut buffer, 3, 2, None);
        canvas.clear(BLACK);

        for x in 0..3 {
            for y in 0..2 {
                assert_eq!(canvas.pixel(x, y), Some(BLACK));
            }
        }
    }

    #[test]
    fn draw_tile_without_sheet_fills_fallback_color() {
        let mut buffer = frame(4, 4);
        let mut canvas = Canvas::new(&mut buffer, 4, 4, None);

        canvas.draw_tile(3, 1, 1, 2, RED);

        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(3, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn draw_tile_with_sheet_blits_and_clips() {
        let sheet = TileSheet::from_rgba(vec![255u8; 2 * 2 * 4], 2, 2, 2).expect("sheet");
        let mut buffer = frame(3, 3);
        let mut canvas = Canvas::new(&mut buffer, 3, 3, Some(&sheet));

        canvas.draw_tile(0, 2, 2, 2, RED);
        assert_eq!(canvas.pixel(2, 2), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([0, 0, 0, 0]));

        // Out-of-range tile index draws nothing.
        canvas.draw_tile(99, 0, 0, 2, RED);
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    }
}
