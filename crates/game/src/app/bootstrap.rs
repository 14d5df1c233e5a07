use std::fs;
use std::path::{Path, PathBuf};

use engine::{Actor, Bootstrap, BootstrapError, StartPose, TileSheet, WorldMap, TILE_SIZE_PX};
use rand::Rng;
use tracing::info;

use super::map::TextMap;
use super::tank::Tank;

const DEFAULT_MAP_PATH: &str = "assets/maps/island.txt";
const DEFAULT_TILES_PATH: &str = "assets/tiles/terrain.png";

/// Filesystem-backed content sources for the session-start sequence. Paths
/// come from `TREADS_MAP` / `TREADS_TILES` when set, with shipped defaults
/// otherwise. A missing tile sheet is not an error; the map falls back to
/// flat terrain colors.
pub(crate) struct GameBootstrap {
    map_path: PathBuf,
    tiles_path: PathBuf,
}

impl GameBootstrap {
    pub(crate) fn from_env() -> Self {
        Self {
            map_path: env_path("TREADS_MAP", DEFAULT_MAP_PATH),
            tiles_path: env_path("TREADS_TILES", DEFAULT_TILES_PATH),
        }
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    match std::env::var_os(var) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(default),
    }
}

impl Bootstrap for GameBootstrap {
    fn load_tiles(&mut self) -> Result<Option<TileSheet>, BootstrapError> {
        if !self.tiles_path.exists() {
            info!(path = %self.tiles_path.display(), "tile_sheet_absent_using_flat_colors");
            return Ok(None);
        }
        let sheet = TileSheet::load(&self.tiles_path, TILE_SIZE_PX as u32)?;
        info!(
            path = %self.tiles_path.display(),
            tiles = sheet.tile_count(),
            "tile_sheet_loaded"
        );
        Ok(Some(sheet))
    }

    fn world_map(&mut self) -> Box<dyn WorldMap> {
        Box::new(TextMap::new())
    }

    fn map_text(&mut self) -> Result<String, BootstrapError> {
        read_map_text(&self.map_path)
    }

    fn pick_start(&mut self, starts: &[StartPose]) -> StartPose {
        let index = rand::rng().random_range(0..starts.len());
        starts[index]
    }

    fn build_actor(&mut self, start: StartPose) -> Box<dyn Actor> {
        Box::new(Tank::new(start))
    }
}

fn read_map_text(path: &Path) -> Result<String, BootstrapError> {
    fs::read_to_string(path).map_err(|source| BootstrapError::MapRead {
        path: path.to_path_buf(),
        source,
    })
}
