//! Pickup field: one collectible per open interior cell

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Arena;

/// Collectible points in world coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickupField {
    points: Vec<Vec2>,
}

impl PickupField {
    /// One pickup centred in every open cell inside the border, row-major
    pub fn populate(arena: &Arena) -> Self {
        let points = arena
            .grid()
            .open_interior_cells()
            .map(|(row, col)| arena.cell_center(row, col))
            .collect();
        Self { points }
    }

    /// Replace the contents with a fresh population
    pub fn repopulate(&mut self, arena: &Arena) {
        self.points.clear();
        self.points.extend(
            arena
                .grid()
                .open_interior_cells()
                .map(|(row, col)| arena.cell_center(row, col)),
        );
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First pickup (scan order) strictly closer than `player_radius + pickup_radius`
    pub fn find_collision(&self, point: Vec2, player_radius: f32, pickup_radius: f32) -> Option<usize> {
        let reach = player_radius + pickup_radius;
        self.points.iter().position(|p| p.distance(point) < reach)
    }

    /// True if any pickup lies strictly within `range` of `point`
    pub fn any_within(&self, point: Vec2, range: f32) -> bool {
        self.points.iter().any(|p| p.distance(point) < range)
    }

    /// Remove by index in O(1); the last pickup fills the hole.
    ///
    /// Returns the removed point, `None` for a stale index.
    pub fn remove_at(&mut self, index: usize) -> Option<Vec2> {
        if index < self.points.len() {
            Some(self.points.swap_remove(index))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze::{Grid, generate_maze};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena_from(rows: &[&str]) -> Arena {
        let grid = Grid::from_rows(rows).unwrap();
        let extent = grid.size() as f32 * 20.0;
        Arena::new(grid, Vec2::splat(extent))
    }

    #[test]
    fn test_populate_interior_open_cells_only() {
        // Open border cell at (0, 2) must not get a pickup
        let arena = arena_from(&["##.##", "#.#.#", "#...#", "##..#", "#####"]);
        let field = PickupField::populate(&arena);
        assert_eq!(field.len(), 7);
        assert_eq!(field.points()[0], Vec2::new(30.0, 30.0));
        assert!(!field.points().contains(&Vec2::new(50.0, 10.0)));
    }

    #[test]
    fn test_collision_at_center() {
        let arena = arena_from(&["#####", "#...#", "#...#", "#...#", "#####"]);
        let mut field = PickupField::populate(&arena);
        let before = field.points().to_vec();
        let target = before[4];

        let hit = field.find_collision(target, 10.0, 5.0);
        assert_eq!(hit, Some(4));

        let removed = field.remove_at(4);
        assert_eq!(removed, Some(target));
        assert_eq!(field.len(), before.len() - 1);
        for p in before.iter().filter(|p| **p != target) {
            assert!(field.points().contains(p));
        }
    }

    #[test]
    fn test_collision_is_strict() {
        let arena = arena_from(&["###", "#.#", "###"]);
        let field = PickupField::populate(&arena);
        let center = field.points()[0];
        // Exactly at the radius sum: no hit
        assert_eq!(field.find_collision(center + Vec2::new(15.0, 0.0), 10.0, 5.0), None);
        assert_eq!(field.find_collision(center + Vec2::new(14.9, 0.0), 10.0, 5.0), Some(0));
    }

    #[test]
    fn test_lowest_index_wins() {
        let arena = arena_from(&["####", "#..#", "####", "####"]);
        let field = PickupField::populate(&arena);
        // Between two pickups 20 apart, both within reach
        let midpoint = (field.points()[0] + field.points()[1]) / 2.0;
        assert_eq!(field.find_collision(midpoint, 10.0, 5.0), Some(0));
    }

    #[test]
    fn test_remove_stale_index() {
        let mut field = PickupField::default();
        assert_eq!(field.remove_at(0), None);
        assert!(field.is_empty());
    }

    proptest! {
        #[test]
        fn prop_one_pickup_per_open_interior_cell(seed in any::<u64>(), size in 3usize..24) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let grid = generate_maze(size, 0.15, &mut rng);
            let arena = Arena::new(grid, Vec2::splat(400.0));
            let field = PickupField::populate(&arena);
            prop_assert_eq!(field.len(), arena.grid().open_interior_cells().count());
            for p in field.points() {
                let (row, col) = arena.cell_at(*p);
                prop_assert!(!arena.grid().is_border(row as usize, col as usize));
                prop_assert!(!arena.is_wall(*p));
            }
        }
    }
}
