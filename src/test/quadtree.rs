use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::physics::Vec2;
use crate::spatial::{QuadTree, Rect};

fn random_points(n: usize, seed: u64) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Vec2::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)))
        .collect()
}

#[test]
fn full_query_returns_every_inserted_item() {
    let pts = random_points(500, 1);
    let mut qt = QuadTree::new(Rect::new(0.0, 0.0, 50.0, 50.0), 4);
    for (i, p) in pts.iter().enumerate() {
        assert!(qt.insert(*p, i), "point {i} rejected");
    }
    assert_eq!(qt.len(), 500);
    assert!(qt.is_divided());

    let mut found = qt.query(qt.boundary());
    found.sort_unstable();
    assert_eq!(found, (0..500).collect::<Vec<_>>());
}

#[test]
fn insert_outside_boundary_is_rejected() {
    let mut qt = QuadTree::new(Rect::new(0.0, 0.0, 10.0, 10.0), 4);
    assert!(!qt.insert(Vec2::new(10.5, 0.0), 0u32));
    assert!(qt.insert(Vec2::new(10.0, -10.0), 1u32));
    assert!(!qt.is_empty());
    assert_eq!(qt.len(), 1);
}

#[test]
fn range_query_matches_brute_force() {
    let pts = random_points(500, 2);
    let mut qt = QuadTree::new(Rect::new(0.0, 0.0, 50.0, 50.0), 4);
    for (i, p) in pts.iter().enumerate() {
        qt.insert(*p, i);
    }
    for range in [
        Rect::new(10.0, -5.0, 15.0, 20.0),
        Rect::new(-40.0, 40.0, 5.0, 5.0),
        Rect::new(0.0, 0.0, 0.5, 0.5),
        Rect::new(60.0, 60.0, 5.0, 5.0),
    ] {
        let mut got = qt.query(&range);
        got.sort_unstable();
        let want: Vec<usize> = pts
            .iter()
            .enumerate()
            .filter(|(_, p)| range.contains(**p))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(got, want, "range {range:?}");
    }
}

#[test]
fn coincident_points_stop_subdividing_at_max_depth() {
    let mut qt = QuadTree::new(Rect::new(0.0, 0.0, 50.0, 50.0), 4);
    for i in 0..100u32 {
        assert!(qt.insert(Vec2::new(1.0, 1.0), i));
    }
    assert_eq!(qt.len(), 100);
    assert_eq!(qt.query(&Rect::square(Vec2::new(1.0, 1.0), 0.1)).len(), 100);
}
