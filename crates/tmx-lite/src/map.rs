use std::collections::HashMap;

use crate::gid::Gid;

/// One grid of raw global tile ids, row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileLayer {
    pub name: String,
    pub ids: Vec<u32>,
}

impl TileLayer {
    pub fn gids(&self) -> impl Iterator<Item = Gid> + '_ {
        self.ids.iter().copied().map(Gid::from_raw)
    }
}

/// A parsed TMX map. Built only once the whole document has been validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapData {
    /// Size in tiles.
    pub width: u32,
    pub height: u32,
    /// Size of one tile in pixels.
    pub tile_width: u32,
    pub tile_height: u32,
    /// Document order.
    pub layers: Vec<TileLayer>,
    pub properties: HashMap<String, String>,
}

impl MapData {
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// First layer called `name`.
    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// The cell at `(x, y)` of layer `layer`, or `None` when any of them is
    /// out of range or the layer holds fewer ids than the map has cells.
    pub fn tile(&self, layer: usize, x: u32, y: u32) -> Option<Gid> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.layers
            .get(layer)?
            .ids
            .get(index)
            .copied()
            .map(Gid::from_raw)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Map size in pixels.
    pub fn pixel_size(&self) -> (u64, u64) {
        (
            u64::from(self.width) * u64::from(self.tile_width),
            u64::from(self.height) * u64::from(self.tile_height),
        )
    }
}
