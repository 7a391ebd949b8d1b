//! Level data module - the three tile layers of one level
//!
//! Every layer is a flat row-major array (`y * width + x`) of raw tile ids:
//!
//! | Layer | Contents | Mutated at runtime |
//! |-------|----------|--------------------|
//! | `platforms` | one-way platform tiles | never |
//! | `extras` | ladders, coins, gems | coins and gems are blanked when collected |
//! | `entity_spawns` | player / enemy spawn markers | never |
//!
//! Lookups outside the grid read as blank instead of failing, so physics code
//! can probe around the edges freely.

use std::fmt;

use crate::geometry::Rect;
use crate::tiles::{Extra, Spawn, TileSet};
use crate::types::GameConfig;

/// Raw layers as stored in a level file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayers {
    pub width: usize,
    pub height: usize,
    pub platforms: Vec<u8>,
    pub extras: Vec<u8>,
    pub entity_spawns: Vec<u8>,
}

/// Construction errors for level data and levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelDataError {
    /// A layer does not hold `width * height` cells.
    LayerLength {
        layer: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Width or height is zero.
    EmptyGrid,
    /// No cell in `entity_spawns` marks the player.
    MissingPlayerSpawn,
}

impl fmt::Display for LevelDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelDataError::LayerLength {
                layer,
                expected,
                actual,
            } => write!(
                f,
                "layer '{}' has {} cells, expected {}",
                layer, actual, expected
            ),
            LevelDataError::EmptyGrid => write!(f, "level grid has zero width or height"),
            LevelDataError::MissingPlayerSpawn => write!(f, "level has no player spawn"),
        }
    }
}

impl std::error::Error for LevelDataError {}

/// Tile layers of one level plus the tile classification and tile size.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    width: usize,
    height: usize,
    tile_size: f32,
    platforms: Vec<u8>,
    extras: Vec<u8>,
    entity_spawns: Vec<u8>,
    tiles: TileSet,
}

impl LevelData {
    /// Validate raw layers and build level data.
    pub fn from_layers(layers: LevelLayers, config: &GameConfig) -> Result<Self, LevelDataError> {
        if layers.width == 0 || layers.height == 0 {
            return Err(LevelDataError::EmptyGrid);
        }
        let expected = layers.width * layers.height;
        for (layer, actual) in [
            ("platforms", layers.platforms.len()),
            ("extras", layers.extras.len()),
            ("entity_spawns", layers.entity_spawns.len()),
        ] {
            if actual != expected {
                return Err(LevelDataError::LayerLength {
                    layer,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self {
            width: layers.width,
            height: layers.height,
            tile_size: config.geometry.tile_size,
            platforms: layers.platforms,
            extras: layers.extras,
            entity_spawns: layers.entity_spawns,
            tiles: TileSet::from_config(&config.tiles),
        })
    }

    /// All-blank grid. Dimensions are raised to at least one tile.
    pub fn blank(width: usize, height: usize, config: &GameConfig) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let blank = config.tiles.blank;
        Self {
            width,
            height,
            tile_size: config.geometry.tile_size,
            platforms: vec![blank; width * height],
            extras: vec![blank; width * height],
            entity_spawns: vec![blank; width * height],
            tiles: TileSet::from_config(&config.tiles),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn width_px(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    pub fn height_px(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Raw platform id, blank outside the grid.
    pub fn platform(&self, x: i32, y: i32) -> u8 {
        self.index(x, y)
            .map_or(self.tiles.blank(), |idx| self.platforms[idx])
    }

    /// Raw extras id, blank outside the grid.
    pub fn extra(&self, x: i32, y: i32) -> u8 {
        self.index(x, y)
            .map_or(self.tiles.blank(), |idx| self.extras[idx])
    }

    /// Raw spawn id, blank outside the grid.
    pub fn spawn(&self, x: i32, y: i32) -> u8 {
        self.index(x, y)
            .map_or(self.tiles.blank(), |idx| self.entity_spawns[idx])
    }

    #[inline]
    pub fn is_platform(&self, x: i32, y: i32) -> bool {
        self.tiles.is_platform(self.platform(x, y))
    }

    #[inline]
    pub fn extra_kind(&self, x: i32, y: i32) -> Extra {
        self.tiles.extra(self.extra(x, y))
    }

    #[inline]
    pub fn is_ladder(&self, x: i32, y: i32) -> bool {
        self.extra_kind(x, y) == Extra::Ladder
    }

    /// Set a platform id. Returns false if out of bounds.
    pub fn set_platform(&mut self, x: i32, y: i32, id: u8) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.platforms[idx] = id;
                true
            }
            None => false,
        }
    }

    /// Set an extras id. Returns false if out of bounds.
    pub fn set_extra(&mut self, x: i32, y: i32, id: u8) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.extras[idx] = id;
                true
            }
            None => false,
        }
    }

    /// Set a spawn id. Returns false if out of bounds.
    pub fn set_spawn(&mut self, x: i32, y: i32, id: u8) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.entity_spawns[idx] = id;
                true
            }
            None => false,
        }
    }

    /// Blank an extras cell. Returns false if it was already empty or out of bounds.
    pub fn clear_extra(&mut self, x: i32, y: i32) -> bool {
        let blank = self.tiles.blank();
        match self.index(x, y) {
            Some(idx) if self.extras[idx] != blank => {
                self.extras[idx] = blank;
                true
            }
            _ => false,
        }
    }

    /// Coins still in the level. Gems are optional and not counted.
    pub fn coins_left(&self) -> usize {
        self.extras
            .iter()
            .filter(|&&id| self.tiles.extra(id) == Extra::Coin)
            .count()
    }

    /// Every spawn marker in row-major order.
    pub fn spawns(&self) -> impl Iterator<Item = (usize, usize, Spawn)> + '_ {
        self.entity_spawns
            .iter()
            .enumerate()
            .filter_map(move |(idx, &id)| {
                self.tiles
                    .spawn(id)
                    .map(|spawn| (idx % self.width, idx / self.width, spawn))
            })
    }

    pub fn platforms_layer(&self) -> &[u8] {
        &self.platforms
    }

    pub fn extras_layer(&self) -> &[u8] {
        &self.extras
    }

    pub fn entity_spawns_layer(&self) -> &[u8] {
        &self.entity_spawns
    }

    /// Pixel position of a tile's top-left corner.
    pub fn tile_origin(&self, x: i32, y: i32) -> (f32, f32) {
        (x as f32 * self.tile_size, y as f32 * self.tile_size)
    }

    /// Tile containing a pixel position. May lie outside the grid.
    pub fn tile_at(&self, px: f32, py: f32) -> (i32, i32) {
        (
            (px / self.tile_size).floor() as i32,
            (py / self.tile_size).floor() as i32,
        )
    }

    /// Tiles touched by a pixel rectangle, clamped to the grid.
    ///
    /// A rectangle entirely outside the grid yields an empty span.
    pub fn span(&self, rect: &Rect) -> TileSpan {
        if rect.right < 0.0
            || rect.bottom < 0.0
            || rect.left >= self.width_px()
            || rect.top >= self.height_px()
        {
            return TileSpan::EMPTY;
        }
        let (x0, y0) = self.tile_at(rect.left, rect.top);
        let (x1, y1) = self.tile_at(rect.right, rect.bottom);
        let max_x = self.width as i32 - 1;
        let max_y = self.height as i32 - 1;
        TileSpan {
            x0: x0.clamp(0, max_x),
            x1: x1.clamp(0, max_x),
            y0: y0.clamp(0, max_y),
            y1: y1.clamp(0, max_y),
        }
    }
}

/// Inclusive range of tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    pub x0: i32,
    pub x1: i32,
    pub y0: i32,
    pub y1: i32,
}

impl TileSpan {
    pub const EMPTY: TileSpan = TileSpan {
        x0: 0,
        x1: -1,
        y0: 0,
        y1: -1,
    };

    pub fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }

    /// Cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..=self.y1).flat_map(move |y| (x0..=x1).map(move |x| (x, y)))
    }
}
