mod canvas;
mod renderer;
mod sheet;

pub use canvas::Canvas;
pub use renderer::{RenderError, Renderer};
pub use sheet::{AssetError, TileSheet};
