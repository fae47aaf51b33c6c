//! Character-grid level layouts
//!
//! Symbols:
//! - `=` ground, `P` floating platform (both solid)
//! - `S` spike, bottom-aligned to its tile
//! - `O` double-jump pickup
//! - `F` goal region, extending downward from its tile
//!
//! Anything else is empty space. Tile (col, row) sits at
//! `(col * tile_size, row * tile_size)`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Goal, Hazard, Pickup, Solid};
use super::rect::Rect;
use crate::consts::{DEFAULT_START_X, DEFAULT_START_Y, DEFAULT_TILE_SIZE};
use crate::tuning::Tuning;

/// Immutable level description, kept across resets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub rows: Vec<String>,
    pub tile_size: f64,
    /// Player hitbox top-left at spawn
    #[serde(default)]
    pub player_start: Option<DVec2>,
}

impl LevelLayout {
    pub fn new<S: Into<String>>(rows: impl IntoIterator<Item = S>, tile_size: f64) -> Self {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            tile_size,
            player_start: None,
        }
    }

    pub fn with_player_start(mut self, start: DVec2) -> Self {
        self.player_start = Some(start);
        self
    }

    /// Tile size actually used to build the world
    pub fn effective_tile_size(&self) -> f64 {
        if self.tile_size.is_finite() && self.tile_size > 0.0 {
            self.tile_size
        } else {
            DEFAULT_TILE_SIZE
        }
    }

    /// Widest row, in tiles
    pub fn columns(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    /// World-space width of the grid
    pub fn width(&self) -> f64 {
        self.columns() as f64 * self.effective_tile_size()
    }

    /// World-space height of the grid
    pub fn height(&self) -> f64 {
        self.rows.len() as f64 * self.effective_tile_size()
    }

    pub fn is_empty(&self) -> bool {
        self.columns() == 0
    }

    pub fn start(&self) -> DVec2 {
        self.player_start
            .unwrap_or(DVec2::new(DEFAULT_START_X, DEFAULT_START_Y))
    }
}

fn tile_rect(col: usize, row: usize, tile: f64) -> Rect {
    Rect::new(col as f64 * tile, row as f64 * tile, tile, tile)
}

fn spike(col: usize, row: usize, tile: f64, tuning: &Tuning) -> Hazard {
    let cell = tile_rect(col, row, tile);
    let anchor = DVec2::new(cell.center().x, cell.bottom());
    let side = tile * tuning.spike_scale;
    let rect = Rect::from_bottom_center(anchor, DVec2::splat(side));
    let hitbox = Rect::from_bottom_center(anchor, DVec2::new(side * tuning.spike_hitbox_ratio, side));
    Hazard { rect, hitbox }
}

fn pickup(col: usize, row: usize, tile: f64, tuning: &Tuning) -> Pickup {
    let rect = tile_rect(col, row, tile).scaled_about_center(tuning.pickup_scale);
    Pickup {
        rect,
        hitbox: rect,
        collected: false,
    }
}

fn goal(col: usize, row: usize, tile: f64, tuning: &Tuning) -> Goal {
    let height = tile * tuning.goal_height_tiles.max(1.0);
    Goal {
        rect: Rect::new(col as f64 * tile, row as f64 * tile, tile, height),
    }
}

/// Build every entity the grid describes, in row-major order
pub fn build_entities(layout: &LevelLayout, tuning: &Tuning) -> Vec<Entity> {
    let tile = layout.effective_tile_size();
    if tile != layout.tile_size {
        log::warn!(
            "Layout tile_size {} is invalid, using {}",
            layout.tile_size,
            tile
        );
    }
    if layout.is_empty() {
        log::warn!("Layout has no tiles; level will be empty");
    }

    let mut entities = Vec::new();
    for (row, line) in layout.rows.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let entity = match ch {
                '=' | 'P' => Entity::Solid(Solid {
                    rect: tile_rect(col, row, tile),
                }),
                'S' => Entity::Hazard(spike(col, row, tile, tuning)),
                'O' => Entity::Pickup(pickup(col, row, tile, tuning)),
                'F' => Entity::Goal(goal(col, row, tile, tuning)),
                _ => continue,
            };
            entities.push(entity);
        }
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;

    fn kinds(entities: &[Entity]) -> Vec<EntityKind> {
        entities.iter().map(Entity::kind).collect()
    }

    #[test]
    fn test_symbols() {
        let layout = LevelLayout::new(["=P S?O F"], 10.0);
        let entities = build_entities(&layout, &Tuning::default());
        assert_eq!(
            kinds(&entities),
            vec![
                EntityKind::Solid,
                EntityKind::Solid,
                EntityKind::Hazard,
                EntityKind::Pickup,
                EntityKind::Goal,
            ]
        );
    }

    #[test]
    fn test_tile_coordinates() {
        let layout = LevelLayout::new(["", "  ="], 75.0);
        let entities = build_entities(&layout, &Tuning::default());
        let Entity::Solid(s) = entities[0] else {
            panic!("expected solid");
        };
        assert_eq!(s.rect, Rect::new(150.0, 75.0, 75.0, 75.0));
    }

    #[test]
    fn test_spike_geometry() {
        let layout = LevelLayout::new(["S"], 100.0);
        let entities = build_entities(&layout, &Tuning::default());
        let Entity::Hazard(h) = entities[0] else {
            panic!("expected hazard");
        };
        // 70% visual, centered, bottom-aligned
        assert!((h.rect.width() - 70.0).abs() < 1e-9);
        assert!((h.rect.center().x - 50.0).abs() < 1e-9);
        assert!((h.rect.bottom() - 100.0).abs() < 1e-9);
        // Half-width hitbox, same height and bottom
        assert!((h.hitbox.width() - 35.0).abs() < 1e-9);
        assert!((h.hitbox.height() - h.rect.height()).abs() < 1e-9);
        assert!((h.hitbox.bottom() - h.rect.bottom()).abs() < 1e-9);
        assert!((h.hitbox.center().x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_goal_spans_downward() {
        let layout = LevelLayout::new(["F"], 10.0);
        let entities = build_entities(&layout, &Tuning::default());
        let Entity::Goal(g) = entities[0] else {
            panic!("expected goal");
        };
        assert_eq!(g.rect.top(), 0.0);
        assert_eq!(g.rect.height(), 40.0);
    }

    #[test]
    fn test_empty_and_invalid_layouts() {
        let empty = LevelLayout::new(Vec::<String>::new(), 10.0);
        assert!(empty.is_empty());
        assert!(build_entities(&empty, &Tuning::default()).is_empty());
        assert_eq!(empty.width(), 0.0);

        let bad_tile = LevelLayout::new(["="], -3.0);
        let entities = build_entities(&bad_tile, &Tuning::default());
        assert_eq!(
            crate::sim::entity::visual_rect(&entities[0]).width(),
            DEFAULT_TILE_SIZE
        );
    }

    #[test]
    fn test_ragged_rows() {
        let layout = LevelLayout::new(["==", "====="], 10.0);
        assert_eq!(layout.columns(), 5);
        assert_eq!(layout.width(), 50.0);
        assert_eq!(layout.height(), 20.0);
        assert_eq!(build_entities(&layout, &Tuning::default()).len(), 7);
    }
}
