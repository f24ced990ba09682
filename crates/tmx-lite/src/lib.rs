//! Loads Tiled TMX maps (CSV layer data, a single tileset) into plain owned
//! records.
//!
//! ```no_run
//! let map = tmx_lite::load_map("game/assets/maps/hello.tmx")?;
//! println!("{}x{} with {} layers", map.width, map.height, map.layer_count());
//! # Ok::<(), tmx_lite::MapParseError>(())
//! ```

use std::path::Path;

use tracy_full::zone;

pub mod data;
pub mod error;
pub mod gid;
pub mod map;
mod parse;

pub use error::MapParseError;
pub use gid::{FlipFlags, Gid, GID_MASK};
pub use map::{MapData, TileLayer};

/// Where the game keeps its starting map, relative to the project root.
pub const DEFAULT_MAP_PATH: &str = "game/assets/maps/hello.tmx";

/// Reads and validates the TMX file at `path`.
///
/// Fails with [`MapParseError::MissingFile`] before reading anything if
/// `path` is not a regular file.
pub fn load_map(path: impl AsRef<Path>) -> Result<MapData, MapParseError> {
    zone!("load_map");
    let path = path.as_ref();
    if !path.is_file() {
        return Err(MapParseError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|source| MapParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse::parse_document(&path.display().to_string(), &text)
}

/// [`load_map`] on [`DEFAULT_MAP_PATH`].
pub fn load_default_map() -> Result<MapData, MapParseError> {
    load_map(DEFAULT_MAP_PATH)
}

/// Parses an in-memory TMX document. Diagnostics are reported against `<input>`.
pub fn parse_map(text: &str) -> Result<MapData, MapParseError> {
    zone!("parse_map");
    parse::parse_document("<input>", text)
}
