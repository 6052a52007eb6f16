//! Converts tile layers into collidable sloped tiles.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use crate::catalog::{self, SlopeBuilder};
use crate::slope::{EdgeKind, SlopeType};
use crate::tilemap::{Direction8, Neighbours, TileLayer};

/// Error raised when slope configuration cannot be resolved.
#[derive(Debug, Error)]
pub enum SlopeError {
    #[error("unknown slope type name `{name}`")]
    UnknownSlopeType { name: String },
}

/// Maps tileset indices to slope types.
#[derive(Debug, Clone, Default)]
pub struct SlopeMap {
    mapping: HashMap<i32, SlopeType>,
}

impl SlopeMap {
    pub fn from_types(entries: impl IntoIterator<Item = (i32, SlopeType)>) -> Self {
        Self {
            mapping: entries.into_iter().collect(),
        }
    }

    /// Build a map from type names, rejecting any name that does not
    /// resolve so that typos surface at configuration time.
    pub fn from_names<'a>(
        entries: impl IntoIterator<Item = (i32, &'a str)>,
    ) -> Result<Self, SlopeError> {
        let mut mapping = HashMap::new();
        for (index, name) in entries {
            let kind = SlopeType::from_name(name).ok_or_else(|| SlopeError::UnknownSlopeType {
                name: name.to_owned(),
            })?;
            mapping.insert(index, kind);
        }
        Ok(Self { mapping })
    }

    pub fn get(&self, index: i32) -> Option<SlopeType> {
        self.mapping.get(&index).copied()
    }
}

/// Attaches slopes and edge flags to the tiles of a layer.
pub struct TileSlopeFactory {
    definitions: HashMap<SlopeType, SlopeBuilder>,
}

impl TileSlopeFactory {
    pub fn new() -> Self {
        Self {
            definitions: catalog::definitions(),
        }
    }

    /// Override the builder used for a slope type.
    pub fn define(&mut self, kind: SlopeType, builder: SlopeBuilder) {
        self.definitions.insert(kind, builder);
    }

    /// Attach slopes to every mapped tile, wire up neighbour records, and
    /// flag away edges hidden between adjacent tiles.
    ///
    /// This is a one-shot batch conversion; editing tiles afterwards
    /// requires converting again.
    pub fn convert_layer(&self, layer: &mut TileLayer, map: &SlopeMap) {
        for y in 0..layer.height() {
            for x in 0..layer.width() {
                let (index, world_x, world_y, width, height) = match layer.tile(x, y) {
                    Some(tile) => (tile.index, tile.world_x, tile.world_y, tile.width, tile.height),
                    None => continue,
                };

                let kind = match map.get(index) {
                    Some(kind) => kind,
                    None => continue,
                };

                let slope = match self.definitions.get(&kind) {
                    Some(builder) => builder(kind, world_x, world_y, width, height),
                    None => {
                        warn!(index, kind = kind.name(), "no slope definition for tile");
                        continue;
                    }
                };

                if let Some(tile) = layer.tile_mut(x, y) {
                    tile.slope = Some(slope);
                }
            }
        }

        for y in 0..layer.height() {
            for x in 0..layer.width() {
                let neighbours = Neighbours {
                    above: layer.neighbour_coords(x, y, Direction8::Above),
                    below: layer.neighbour_coords(x, y, Direction8::Below),
                    left: layer.neighbour_coords(x, y, Direction8::Left),
                    right: layer.neighbour_coords(x, y, Direction8::Right),
                    top_left: layer.neighbour_coords(x, y, Direction8::TopLeft),
                    top_right: layer.neighbour_coords(x, y, Direction8::TopRight),
                    bottom_left: layer.neighbour_coords(x, y, Direction8::BottomLeft),
                    bottom_right: layer.neighbour_coords(x, y, Direction8::BottomRight),
                };
                if let Some(tile) = layer.tile_mut(x, y) {
                    tile.neighbours = neighbours;
                }
            }
        }

        self.calculate_edges(layer);
    }

    /// Compare each sloped tile's orthogonal edges against the opposing
    /// edges of its neighbours, flagging away the ones with no gap between
    /// them. Runs in place, row-major, so earlier updates feed later
    /// comparisons.
    pub fn calculate_edges(&self, layer: &mut TileLayer) {
        for y in 0..layer.height() {
            for x in 0..layer.width() {
                if layer.tile(x, y).and_then(|tile| tile.slope.as_ref()).is_none() {
                    continue;
                }

                let above = y
                    .checked_sub(1)
                    .and_then(|ny| layer.tile(x, ny))
                    .and_then(|tile| tile.slope.as_ref())
                    .map(|slope| slope.edges.bottom);
                let below = layer
                    .tile(x, y + 1)
                    .and_then(|tile| tile.slope.as_ref())
                    .map(|slope| slope.edges.top);
                let left = x
                    .checked_sub(1)
                    .and_then(|nx| layer.tile(nx, y))
                    .and_then(|tile| tile.slope.as_ref())
                    .map(|slope| slope.edges.right);
                let right = layer
                    .tile(x + 1, y)
                    .and_then(|tile| tile.slope.as_ref())
                    .map(|slope| slope.edges.left);

                let slope = match layer.tile_mut(x, y).and_then(|tile| tile.slope.as_mut()) {
                    Some(slope) => slope,
                    None => continue,
                };

                if let Some(edge) = above {
                    slope.edges.top = compare_edges(slope.edges.top, edge);
                }
                if let Some(edge) = below {
                    slope.edges.bottom = compare_edges(slope.edges.bottom, edge);
                }
                if let Some(edge) = left {
                    slope.edges.left = compare_edges(slope.edges.left, edge);
                }
                if let Some(edge) = right {
                    slope.edges.right = compare_edges(slope.edges.right, edge);
                }
            }
        }
    }
}

impl Default for TileSlopeFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve an edge against the opposing edge of a neighbouring tile.
///
/// Two solid edges facing each other have no gap between them and collapse
/// to empty, as does a solid edge against an empty one. Interesting edges
/// always survive.
pub fn compare_edges(first: EdgeKind, second: EdgeKind) -> EdgeKind {
    if first == EdgeKind::Solid && second == EdgeKind::Solid {
        return EdgeKind::Empty;
    }
    if first == EdgeKind::Solid && second == EdgeKind::Empty {
        return EdgeKind::Empty;
    }
    first
}
