use engine::{
    CameraWindow, Canvas, Heading, MapError, StartPose, Vec2, WorldMap, TILE_SIZE_PX,
    TILE_SIZE_WORLD,
};

/// Terrain classes a map cell can hold. Anything outside the defined grid
/// reads as deep water, so the playfield is an island by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terrain {
    DeepWater,
    Grass,
    Swamp,
    Road,
    Forest,
    Building,
}

impl Terrain {
    fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            '~' => Some(Self::DeepWater),
            '.' => Some(Self::Grass),
            ':' => Some(Self::Swamp),
            '=' => Some(Self::Road),
            '%' => Some(Self::Forest),
            '#' => Some(Self::Building),
            _ => None,
        }
    }

    /// Column index into the terrain tile sheet.
    fn tile_index(self) -> u32 {
        match self {
            Self::DeepWater => 0,
            Self::Grass => 1,
            Self::Swamp => 2,
            Self::Road => 3,
            Self::Forest => 4,
            Self::Building => 5,
        }
    }

    /// Flat color used when no tile sheet is loaded.
    fn fallback_color(self) -> [u8; 4] {
        match self {
            Self::DeepWater => [24, 48, 96, 255],
            Self::Grass => [64, 128, 48, 255],
            Self::Swamp => [88, 104, 56, 255],
            Self::Road => [120, 120, 120, 255],
            Self::Forest => [32, 80, 32, 255],
            Self::Building => [96, 80, 64, 255],
        }
    }
}

/// Map loaded from the plain-text format: `;` comment lines, `start` lines
/// declaring spawn poses in tile coordinates, and a rectangular character
/// grid of terrain rows.
#[derive(Debug, Default)]
pub(crate) struct TextMap {
    width: usize,
    height: usize,
    cells: Vec<Terrain>,
    starts: Vec<StartPose>,
}

impl TextMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn terrain_at(&self, tile_x: i64, tile_y: i64) -> Terrain {
        if tile_x < 0 || tile_y < 0 || tile_x >= self.width as i64 || tile_y >= self.height as i64 {
            return Terrain::DeepWater;
        }
        self.cells[tile_y as usize * self.width + tile_x as usize]
    }

    fn parse_start(&mut self, line_number: usize, rest: &str) -> Result<(), MapError> {
        let mut fields = rest.split_whitespace();
        let tile_x: i64 = parse_field(line_number, fields.next(), "start tile x")?;
        let tile_y: i64 = parse_field(line_number, fields.next(), "start tile y")?;
        let heading: u32 = parse_field(line_number, fields.next(), "start heading")?;

        if fields.next().is_some() {
            return Err(MapError::Malformed {
                line: line_number,
                reason: "start takes exactly three fields".to_string(),
            });
        }
        if heading > u8::MAX as u32 {
            return Err(MapError::Malformed {
                line: line_number,
                reason: format!("start heading {heading} is outside 0..=255"),
            });
        }

        // Spawn at the center of the named tile, in world units.
        self.starts.push(StartPose {
            position: Vec2 {
                x: (tile_x as f32 + 0.5) * TILE_SIZE_WORLD,
                y: (tile_y as f32 + 0.5) * TILE_SIZE_WORLD,
            },
            heading: Heading::new(heading as u8),
        });
        Ok(())
    }

    fn parse_terrain_row(&mut self, line_number: usize, row: &str) -> Result<(), MapError> {
        let width = row.chars().count();
        if self.height == 0 {
            self.width = width;
        } else if width != self.width {
            return Err(MapError::Malformed {
                line: line_number,
                reason: format!(
                    "terrain row is {width} cells wide, expected {}",
                    self.width
                ),
            });
        }

        for symbol in row.chars() {
            let terrain = Terrain::from_char(symbol).ok_or_else(|| MapError::Malformed {
                line: line_number,
                reason: format!("unknown terrain symbol {symbol:?}"),
            })?;
            self.cells.push(terrain);
        }
        self.height += 1;
        Ok(())
    }
}

fn parse_field<T: std::str::FromStr>(
    line_number: usize,
    field: Option<&str>,
    name: &str,
) -> Result<T, MapError> {
    let raw = field.ok_or_else(|| MapError::Malformed {
        line: line_number,
        reason: format!("missing {name}"),
    })?;
    raw.parse().map_err(|_| MapError::Malformed {
        line: line_number,
        reason: format!("invalid {name} {raw:?}"),
    })
}

impl WorldMap for TextMap {
    fn init(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.starts.clear();
    }

    fn load(&mut self, raw: &str) -> Result<(), MapError> {
        for (index, line) in raw.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = line.trim_end();
            if trimmed.is_empty() || trimmed.starts_with(';') {
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix("start ") {
                self.parse_start(line_number, rest)?;
            } else {
                self.parse_terrain_row(line_number, trimmed)?;
            }
        }
        Ok(())
    }

    fn draw(&self, window: &CameraWindow, canvas: &mut Canvas<'_>) {
        // Tile range covering the window, inclusive of partially visible
        // edge tiles. div_euclid keeps negative coordinates on the grid.
        let first_tile_x = (window.min_x).div_euclid(TILE_SIZE_PX) as i64;
        let first_tile_y = (window.min_y).div_euclid(TILE_SIZE_PX) as i64;
        let last_tile_x = (window.max_x - 1).div_euclid(TILE_SIZE_PX) as i64;
        let last_tile_y = (window.max_y - 1).div_euclid(TILE_SIZE_PX) as i64;

        for tile_y in first_tile_y..=last_tile_y {
            for tile_x in first_tile_x..=last_tile_x {
                let terrain = self.terrain_at(tile_x, tile_y);
                let screen_x = tile_x as i32 * TILE_SIZE_PX - window.min_x;
                let screen_y = tile_y as i32 * TILE_SIZE_PX - window.min_y;
                canvas.draw_tile(
                    terrain.tile_index(),
                    screen_x,
                    screen_y,
                    TILE_SIZE_PX,
                    terrain.fallback_color(),
                );
            }
        }
    }

    fn starts(&self) -> &[StartPose] {
        &self.starts
    }
}
