//! Tile grid storage and neighbour lookups.

use std::collections::HashMap;

use crate::body::Body;
use crate::slope::TileSlope;

/// Veto callback run before a body is separated from a tile.
///
/// Returning false skips the separation, which is how one-way platforms and
/// similar conditional surfaces are built.
pub type CollisionCallback = Box<dyn Fn(&Body, &Tile) -> bool>;

/// The eight neighbour directions of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction8 {
    Above,
    Below,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Grid coordinates of a tile's eight neighbours, where they exist.
///
/// Stored as coordinates rather than references so that tiles stay plain
/// data; lookups go through the owning [`TileLayer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbours {
    pub above: Option<(usize, usize)>,
    pub below: Option<(usize, usize)>,
    pub left: Option<(usize, usize)>,
    pub right: Option<(usize, usize)>,
    pub top_left: Option<(usize, usize)>,
    pub top_right: Option<(usize, usize)>,
    pub bottom_left: Option<(usize, usize)>,
    pub bottom_right: Option<(usize, usize)>,
}

impl Neighbours {
    pub fn get(&self, direction: Direction8) -> Option<(usize, usize)> {
        match direction {
            Direction8::Above => self.above,
            Direction8::Below => self.below,
            Direction8::Left => self.left,
            Direction8::Right => self.right,
            Direction8::TopLeft => self.top_left,
            Direction8::TopRight => self.top_right,
            Direction8::BottomLeft => self.bottom_left,
            Direction8::BottomRight => self.bottom_right,
        }
    }
}

/// One cell of a tile layer.
pub struct Tile {
    pub grid_x: usize,
    pub grid_y: usize,
    pub world_x: f32,
    pub world_y: f32,
    pub width: f32,
    pub height: f32,
    /// Tileset index; negative means empty.
    pub index: i32,
    pub slope: Option<TileSlope>,
    pub neighbours: Neighbours,
    /// Per-tile veto, taking priority over the layer-level callback.
    pub collision_callback: Option<CollisionCallback>,
}

impl Tile {
    pub fn left(&self) -> f32 {
        self.world_x
    }

    pub fn right(&self) -> f32 {
        self.world_x + self.width
    }

    pub fn top(&self) -> f32 {
        self.world_y
    }

    pub fn bottom(&self) -> f32 {
        self.world_y + self.height
    }
}

/// A rectangular grid of tiles with uniform dimensions.
pub struct TileLayer {
    width: usize,
    height: usize,
    tile_width: f32,
    tile_height: f32,
    tiles: Vec<Tile>,
    callbacks: HashMap<i32, CollisionCallback>,
}

impl TileLayer {
    /// Create an empty layer; every tile starts with index -1.
    pub fn new(width: usize, height: usize, tile_width: f32, tile_height: f32) -> Self {
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile {
                    grid_x: x,
                    grid_y: y,
                    world_x: x as f32 * tile_width,
                    world_y: y as f32 * tile_height,
                    width: tile_width,
                    height: tile_height,
                    index: -1,
                    slope: None,
                    neighbours: Neighbours::default(),
                    collision_callback: None,
                });
            }
        }
        Self {
            width,
            height,
            tile_width,
            tile_height,
            tiles,
            callbacks: HashMap::new(),
        }
    }

    /// Create a layer from row-major tileset indices.
    pub fn from_indices(
        width: usize,
        height: usize,
        tile_width: f32,
        tile_height: f32,
        indices: &[i32],
    ) -> Self {
        let mut layer = Self::new(width, height, tile_width, tile_height);
        for (tile, index) in layer.tiles.iter_mut().zip(indices) {
            tile.index = *index;
        }
        layer
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        if x < self.width && y < self.height {
            self.tiles.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        if x < self.width && y < self.height {
            self.tiles.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    pub fn set_index(&mut self, x: usize, y: usize, index: i32) {
        if let Some(tile) = self.tile_mut(x, y) {
            tile.index = index;
        }
    }

    /// Coordinates of the neighbour of (x, y) in the given direction, when
    /// it lies within the layer.
    pub fn neighbour_coords(
        &self,
        x: usize,
        y: usize,
        direction: Direction8,
    ) -> Option<(usize, usize)> {
        let (dx, dy) = match direction {
            Direction8::Above => (0, -1),
            Direction8::Below => (0, 1),
            Direction8::Left => (-1, 0),
            Direction8::Right => (1, 0),
            Direction8::TopLeft => (-1, -1),
            Direction8::TopRight => (1, -1),
            Direction8::BottomLeft => (-1, 1),
            Direction8::BottomRight => (1, 1),
        };
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        if nx < self.width && ny < self.height {
            Some((nx, ny))
        } else {
            None
        }
    }

    /// Register a layer-level collision veto for a tileset index.
    pub fn set_collision_callback(&mut self, index: i32, callback: CollisionCallback) {
        self.callbacks.insert(index, callback);
    }

    pub fn callback_for(&self, index: i32) -> Option<&CollisionCallback> {
        self.callbacks.get(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_lookup_bounds() {
        let layer = TileLayer::new(3, 2, 16.0, 16.0);

        assert!(layer.tile(2, 1).is_some());
        assert!(layer.tile(3, 0).is_none());
        assert!(layer.tile(0, 2).is_none());
    }

    #[test]
    fn test_tile_world_rect() {
        let layer = TileLayer::new(3, 3, 16.0, 16.0);
        let tile = layer.tile(2, 1).unwrap();

        assert_eq!(tile.left(), 32.0);
        assert_eq!(tile.right(), 48.0);
        assert_eq!(tile.top(), 16.0);
        assert_eq!(tile.bottom(), 32.0);
    }

    #[test]
    fn test_neighbour_coords_at_edges() {
        let layer = TileLayer::new(3, 3, 16.0, 16.0);

        assert_eq!(layer.neighbour_coords(0, 0, Direction8::Above), None);
        assert_eq!(layer.neighbour_coords(0, 0, Direction8::Left), None);
        assert_eq!(layer.neighbour_coords(0, 0, Direction8::BottomRight), Some((1, 1)));
        assert_eq!(layer.neighbour_coords(2, 2, Direction8::Right), None);
        assert_eq!(layer.neighbour_coords(1, 1, Direction8::TopLeft), Some((0, 0)));
    }

    #[test]
    fn test_from_indices() {
        let layer = TileLayer::from_indices(2, 2, 16.0, 16.0, &[1, -1, 2, 3]);

        assert_eq!(layer.tile(0, 0).unwrap().index, 1);
        assert_eq!(layer.tile(1, 0).unwrap().index, -1);
        assert_eq!(layer.tile(0, 1).unwrap().index, 2);
        assert_eq!(layer.tile(1, 1).unwrap().index, 3);
    }
}
