//! Gameplay-shaped collision scenarios
//!
//! Blocks, bullets and ships moving through a detector with a dispatcher
//! attached, checked against brute-force expectations.

use crate::core::config::CollisionConfig;
use crate::foundation::collections::BodyKey;
use crate::foundation::math::{utils::generate_circle_vertices, Transform2, Vec2};
use crate::physics::{
    Collision, CollisionBody, CollisionDetector, CollisionDispatcher, Polygon2, UserData,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Kind {
    Block,
    Bullet,
    Ship,
}

fn detector(cell_size: f32) -> CollisionDetector<Kind> {
    CollisionDetector::new(&CollisionConfig::new().with_cell_size(cell_size)).unwrap()
}

fn hexagon(kind: Kind, owner: u64, x: f32, y: f32) -> CollisionBody<Kind> {
    let polygon = Polygon2::new(generate_circle_vertices(6, Vec2::zeros(), 1.0, 0.0));
    CollisionBody::new(polygon, Transform2::from_translation(x, y), UserData::new(kind, owner))
}

fn block(owner: u64, x: f32, y: f32) -> CollisionBody<Kind> {
    let polygon = Polygon2::rectangle(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
    CollisionBody::new(polygon, Transform2::from_translation(x, y), UserData::new(Kind::Block, owner))
        .with_seed(false)
}

fn bullet(owner: u64, x: f32, y: f32) -> CollisionBody<Kind> {
    let polygon = Polygon2::new(vec![Vec2::zeros()]);
    CollisionBody::new(polygon, Transform2::from_translation(x, y), UserData::new(Kind::Bullet, owner))
}

fn unordered(collision: &Collision<Kind>) -> (BodyKey, BodyKey) {
    if collision.body_a < collision.body_b {
        (collision.body_a, collision.body_b)
    } else {
        (collision.body_b, collision.body_a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagons_overlap_then_separate() {
        let mut detector = detector(2.0);
        detector.add_body(hexagon(Kind::Ship, 0, 0.0, 0.0));
        let second = detector.add_body(hexagon(Kind::Ship, 1, 1.5, 0.0));

        assert_eq!(detector.update(0.1).len(), 1);

        detector.set_transform(second, Transform2::from_translation(3.0, 0.0));
        assert!(detector.update(0.1).is_empty());
    }

    #[test]
    fn test_bullet_inside_block_then_moves_away() {
        let mut detector = detector(2.0);
        let bullet_key = detector.add_body(bullet(0, 0.0, 0.0));
        let block_key = detector.add_body(block(1, 0.0, 0.0));

        let collisions = detector.update(0.1);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].body_a, block_key);
        assert_eq!(collisions[0].body_b, bullet_key);

        detector.set_transform(bullet_key, Transform2::from_translation(5.0, 5.0));
        assert!(detector.update(0.1).is_empty());
    }

    #[test]
    fn test_block_always_reported_first() {
        let mut detector = detector(2.0);
        let block_key = detector.add_body(block(10, 0.0, 0.0));
        // Bullet with a lower owner id still sorts after the block
        let bullet_key = detector.add_body(bullet(1, -4.0, 0.0));

        let mut hits = 0;
        for tick in 0..40 {
            let x = -4.0 + tick as f32 * 0.2;
            detector.set_transform(bullet_key, Transform2::from_translation(x, 0.3));
            for collision in detector.update(0.1) {
                assert_eq!(collision.body_a, block_key);
                assert_eq!(collision.body_b, bullet_key);
                assert_eq!(collision.categories(), (Kind::Block, Kind::Bullet));
                hits += 1;
            }
        }
        // Strictly inside for x in (-1, 1)
        assert!(hits >= 9);
    }

    #[test]
    fn test_double_touch_recomputes_once() {
        let mut detector = detector(2.0);
        detector.add_body(block(0, 0.0, 0.0));
        let ship = detector.add_body(hexagon(Kind::Ship, 1, 0.5, 0.0));
        detector.update(0.1);

        detector.touch(ship);
        detector.touch(ship);
        assert_eq!(detector.dirty_count(), 1);

        let collisions = detector.update(0.1);
        assert_eq!(collisions.len(), 1);
        assert_eq!(detector.last_stats().bodies_processed, 1);
        assert_eq!(detector.last_stats().narrow_phase_tests, 1);
    }

    #[test]
    fn test_no_missed_overlaps_and_no_duplicates() {
        let mut detector = detector(1.5);
        let mut keys = Vec::new();
        for i in 0..6 {
            for j in 0..6 {
                let x = i as f32 * 1.3 + (j % 2) as f32 * 0.4;
                let y = j as f32 * 1.1;
                keys.push(detector.add_body(hexagon(Kind::Ship, (i * 6 + j) as u64, x, y)));
            }
        }

        let collisions = detector.update(0.1);

        let reported: HashSet<_> = collisions.iter().map(unordered).collect();
        assert_eq!(reported.len(), collisions.len());

        let mut expected = HashSet::new();
        for (n, &a) in keys.iter().enumerate() {
            for &b in &keys[n + 1..] {
                let body_a = detector.body(a).unwrap();
                let body_b = detector.body(b).unwrap();
                if body_a.world_polygon().intersects(body_b.world_polygon()) {
                    expected.insert(if a < b { (a, b) } else { (b, a) });
                }
            }
        }
        assert!(!expected.is_empty());
        assert_eq!(reported, expected);
    }

    #[test]
    fn test_listener_removal_keeps_detector_consistent() {
        let removed = Rc::new(RefCell::new(Vec::new()));
        let record = Rc::clone(&removed);

        let dispatcher = CollisionDispatcher::new().with_handler(
            Kind::Block,
            Kind::Bullet,
            move |collision: &Collision<Kind>, detector: &mut CollisionDetector<Kind>| {
                detector.remove_body(collision.body_a);
                detector.remove_body(collision.body_b);
                record.borrow_mut().push((collision.body_a, collision.body_b));
            },
        );

        let mut detector = detector(1.0).with_listener(dispatcher);
        let left = detector.add_body(block(0, -1.5, 0.0));
        let right = detector.add_body(block(1, 1.5, 0.0));
        let far = detector.add_body(block(2, 20.0, 0.0));
        // A wide shot reaching into both blocks
        let shot = detector.add_body(CollisionBody::new(
            Polygon2::rectangle(Vec2::new(-1.0, -0.1), Vec2::new(1.0, 0.1)),
            Transform2::from_translation(0.0, 0.5),
            UserData::new(Kind::Bullet, 3),
        ));
        let bystander = detector.add_body(bullet(4, 1.5, 0.5));

        let collisions = detector.update(0.1);
        assert_eq!(collisions.len(), 3);

        // The (right, shot) event is dropped: the shot died in the first event
        assert_eq!(*removed.borrow(), vec![(left, shot), (right, bystander)]);
        for key in [left, right, shot, bystander] {
            assert!(!detector.contains(key));
            assert!(detector.grid().cells_containing(key).is_empty());
        }
        assert_eq!(detector.len(), 1);
        assert!(detector.contains(far));

        // The detector keeps working after the burst
        let late = detector.add_body(bullet(5, 20.0, 0.0));
        let collisions = detector.update(0.1);
        assert_eq!(collisions.len(), 1);
        assert!(collisions[0].involves(late));
    }

    #[test]
    fn test_empty_body_never_collides() {
        let mut detector = detector(1.0);
        let empty = detector.add_body(CollisionBody::new(
            Polygon2::new(Vec::new()),
            Transform2::identity(),
            UserData::new(Kind::Ship, 0),
        ));
        detector.add_body(block(1, 0.0, 0.0));

        assert!(detector.update(0.1).is_empty());
        assert!(detector.grid().cells_containing(empty).is_empty());
        assert!(detector.body(empty).unwrap().footprint().is_empty());

        detector.touch(empty);
        assert!(detector.update(0.1).is_empty());
        assert!(detector.grid().cells_containing(empty).is_empty());
    }

    #[test]
    fn test_mirrored_triangle_overlaps_square() {
        let mut detector = detector(1.0);
        // Flip across x = 0.25; determinant is -1
        let mirror = Transform2::new(-1.0, 0.0, 0.5, 0.0, 1.0, 0.0);
        let triangle = detector.add_body(CollisionBody::new(
            Polygon2::from_points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]),
            mirror,
            UserData::new(Kind::Bullet, 0),
        ));
        let square = detector.add_body(block(1, 0.0, 0.0));

        let collisions = detector.update(0.1);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].body_a, square);
        assert_eq!(collisions[0].body_b, triangle);
        assert!(detector.body(triangle).unwrap().world_polygon().is_counter_clockwise());
    }
}
