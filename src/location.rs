use rand::Rng;

use crate::geometry::{Point, Region};

/// Center point of a region
pub fn center_of(region: &Region) -> Point {
    Point::new(
        region.left + region.width / 2.0,
        region.top + region.height / 2.0,
    )
}

/// Uniformly random point inside a region (edges included)
pub fn random_point_in(region: &Region) -> Point {
    let mut rng = rand::thread_rng();
    let x = region.left + rng.gen_range(0.0..=region.width);
    let y = region.top + rng.gen_range(0.0..=region.height);
    Point::new(x, y)
}
