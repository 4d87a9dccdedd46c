//! Uniform grid spatial hash
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.2:
//! "Spatial partitioning schemes... allow us to quickly cull out pairs of
//! objects that cannot possibly be colliding."
//!
//! The plane is cut into square cells of a fixed size. Every body is listed in
//! the bucket of each cell its world bounding box overlaps, and remembers that
//! range of cells (its footprint) so it can be unlisted later even after its
//! geometry has moved on.

use crate::foundation::collections::{BodyKey, BodyMap};
use crate::physics::body::{Category, CollisionBody};
use crate::physics::collision::Aabb2;
use crate::physics::error::CollisionError;
use std::collections::{HashMap, HashSet};

/// Integer grid cell coordinate
pub type Cell = (i32, i32);

/// Inclusive rectangle of grid cells. Empty when `min` exceeds `max` on
/// either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Lowest cell (inclusive)
    pub min: Cell,
    /// Highest cell (inclusive)
    pub max: Cell,
}

impl Default for CellRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl CellRange {
    /// The range covering no cells
    pub const EMPTY: CellRange = CellRange {
        min: (0, 0),
        max: (-1, -1),
    };

    /// True if the range covers no cells
    pub fn is_empty(&self) -> bool {
        self.min.0 > self.max.0 || self.min.1 > self.max.1
    }

    /// True if `cell` lies inside the range
    pub fn contains(&self, cell: Cell) -> bool {
        self.min.0 <= cell.0 && cell.0 <= self.max.0 && self.min.1 <= cell.1 && cell.1 <= self.max.1
    }

    /// Number of cells covered
    pub fn cell_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            let width = (i64::from(self.max.0) - i64::from(self.min.0) + 1) as usize;
            let height = (i64::from(self.max.1) - i64::from(self.min.1) + 1) as usize;
            width * height
        }
    }

    /// Cells in x-major order (x outer, y inner)
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let range = if self.is_empty() { Self::EMPTY } else { *self };
        (range.min.0..=range.max.0)
            .flat_map(move |x| (range.min.1..=range.max.1).map(move |y| (x, y)))
    }
}

/// Uniform spatial hash mapping cells to the bodies overlapping them
#[derive(Debug, Clone)]
pub struct CollisionGrid {
    cell_size: f32,
    cells: HashMap<Cell, Vec<BodyKey>>,
}

impl CollisionGrid {
    /// Create a grid with square cells of `cell_size` world units
    pub fn new(cell_size: f32) -> Result<Self, CollisionError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(CollisionError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            cells: HashMap::new(),
        })
    }

    /// Edge length of a cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of non-empty buckets
    pub fn occupied_cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell containing a coordinate pair. Uses floor division so that
    /// negative coordinates land in negative cells.
    pub fn cell_of(&self, x: f32, y: f32) -> Cell {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// Cells overlapped by a bounding box
    pub fn cell_range(&self, bounds: &Aabb2) -> CellRange {
        if bounds.is_empty() {
            return CellRange::EMPTY;
        }
        CellRange {
            min: self.cell_of(bounds.min.x, bounds.min.y),
            max: self.cell_of(bounds.max.x, bounds.max.y),
        }
    }

    /// Index `body` under every cell its world bounds overlap and record
    /// the footprint on the body.
    pub fn insert<C: Category>(&mut self, key: BodyKey, body: &mut CollisionBody<C>) {
        let footprint = self.cell_range(body.world_bounds());
        for cell in footprint.cells() {
            self.cells.entry(cell).or_default().push(key);
        }
        body.set_footprint(footprint);
    }

    /// Unindex `body` using its recorded footprint, not its current geometry.
    pub fn remove<C: Category>(&mut self, key: BodyKey, body: &mut CollisionBody<C>) {
        for cell in body.footprint().cells() {
            if let Some(bucket) = self.cells.get_mut(&cell) {
                bucket.retain(|&k| k != key);
                if bucket.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
        body.set_footprint(CellRange::EMPTY);
    }

    /// Move `body` to the cells matching its current world bounds.
    ///
    /// Returns `false` without touching any bucket when the footprint is
    /// unchanged.
    pub fn update<C: Category>(&mut self, key: BodyKey, body: &mut CollisionBody<C>) -> bool {
        let desired = self.cell_range(body.world_bounds());
        if desired == body.footprint() {
            return false;
        }
        self.remove(key, body);
        self.insert(key, body);
        true
    }

    /// Distinct bodies sharing a cell with `body` whose world bounds actually
    /// intersect its own.
    ///
    /// Results follow cell order (x-major), then bucket insertion order.
    pub fn candidates<C: Category>(
        &self,
        key: BodyKey,
        body: &CollisionBody<C>,
        bodies: &BodyMap<CollisionBody<C>>,
    ) -> Vec<BodyKey> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for cell in body.footprint().cells() {
            let Some(bucket) = self.cells.get(&cell) else {
                continue;
            };
            for &other_key in bucket {
                if other_key == key || !seen.insert(other_key) {
                    continue;
                }
                if let Some(other) = bodies.get(other_key) {
                    if body.world_bounds().intersects(other.world_bounds()) {
                        candidates.push(other_key);
                    }
                }
            }
        }

        candidates
    }

    /// Full scan for every cell listing `key`, sorted. Intended for
    /// consistency checks and debugging.
    pub fn cells_containing(&self, key: BodyKey) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .cells
            .iter()
            .filter(|(_, bucket)| bucket.contains(&key))
            .map(|(&cell, _)| cell)
            .collect();
        cells.sort_unstable();
        cells
    }
}
