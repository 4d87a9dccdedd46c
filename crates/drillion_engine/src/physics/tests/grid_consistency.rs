//! Grid bookkeeping under sustained movement
//!
//! After every update each clean body must be listed in exactly the cells its
//! bounding box covers, no matter how it got there.

use crate::core::config::CollisionConfig;
use crate::foundation::collections::BodyKey;
use crate::foundation::math::{utils::generate_circle_vertices, Transform2, Vec2};
use crate::physics::{CollisionBody, CollisionDetector, Polygon2, UserData};
use crate::spatial::Cell;

fn assert_grid_consistent(detector: &CollisionDetector<u8>) {
    for (key, body) in detector.bodies() {
        if body.is_dirty() {
            continue;
        }
        let mut expected: Vec<Cell> = detector.grid().cell_range(body.world_bounds()).cells().collect();
        expected.sort_unstable();

        assert_eq!(detector.grid().cells_containing(key), expected, "body {key:?}");
        assert_eq!(body.footprint(), detector.grid().cell_range(body.world_bounds()));
    }
}

fn spinner(owner: u64, radius: f32) -> CollisionBody<u8> {
    let polygon = Polygon2::new(generate_circle_vertices(5, Vec2::zeros(), radius, 0.3));
    CollisionBody::new(polygon, Transform2::identity(), UserData::new(0, owner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_matches_bounds_while_bodies_move() {
        let mut detector = CollisionDetector::new(&CollisionConfig::new().with_cell_size(1.25)).unwrap();
        let keys: Vec<BodyKey> = (0..12)
            .map(|i| detector.add_body(spinner(i, 0.3 + i as f32 * 0.15)))
            .collect();

        for tick in 0..60 {
            let t = tick as f32 * 0.1;
            for (i, &key) in keys.iter().enumerate() {
                // Every third body sits still on odd ticks
                if i % 3 == 0 && tick % 2 == 1 {
                    continue;
                }
                let phase = i as f32 * 0.7;
                let position = Vec2::new((t + phase).cos() * 6.0 - 3.0, (t * 1.3 + phase).sin() * 4.0);
                detector.set_transform(key, Transform2::from_position_angle(position, t * 2.0 + phase));
            }
            detector.update(0.1);
            assert_grid_consistent(&detector);
        }
    }

    #[test]
    fn test_grid_consistent_after_removals_and_readds() {
        let mut detector = CollisionDetector::new(&CollisionConfig::new().with_cell_size(0.75)).unwrap();
        let mut keys: Vec<BodyKey> = (0..8).map(|i| detector.add_body(spinner(i, 0.5))).collect();
        detector.update(0.1);

        for round in 0..5 {
            let key = keys.remove(0);
            let mut body = detector.remove_body(key);
            assert!(detector.grid().cells_containing(key).is_empty());

            *body.transform_mut() = Transform2::from_translation(round as f32 * 1.7, -(round as f32));
            keys.push(detector.add_body(body));

            for &key in &keys[..3] {
                detector.set_transform(key, Transform2::from_translation(-(round as f32), round as f32 * 0.9));
            }
            detector.update(0.1);
            assert_grid_consistent(&detector);
        }
        assert_eq!(detector.len(), 8);
    }
}
