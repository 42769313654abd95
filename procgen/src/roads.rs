use coord_2d::Coord;
use line_2d::{Config as LineConfig, LineSegment};

// Polar samplers take one sample every 5 degrees
const ANGLE_STEP_DEGREES: usize = 5;

// Returns the cells of a straight road between two points, including both
// endpoints
pub fn straight(start: Coord, end: Coord) -> Vec<Coord> {
    LineSegment::new(start, end)
        .config_node_iter(LineConfig {
            exclude_start: false,
            exclude_end: false,
        })
        .map(|node| node.coord)
        .collect()
}

// Returns the cells of a circular road of the given radius around centre,
// sampled at angles in [0, 360) in 5 degree steps. Coordinates truncate the
// same way every run, so a given centre and radius always yields the same
// ring.
pub fn ring(centre: Coord, radius: f64) -> Vec<Coord> {
    let mut cells = Vec::new();
    for angle in (0..360).step_by(ANGLE_STEP_DEGREES) {
        let rad = (angle as f64).to_radians();
        let x = (centre.x as f64 + radius * rad.cos()) as i32;
        let y = (centre.y as f64 + radius * rad.sin()) as i32;
        cells.push(Coord::new(x, y));
    }
    cells
}

// Returns the cells of `count` straight spokes radiating from centre at equal
// angles, walked outward one unit of distance at a time
pub fn spokes(centre: Coord, count: u32, length: u32) -> Vec<Coord> {
    let mut cells = Vec::new();
    for i in 0..count {
        let angle = i as f64 * (2.0 * std::f64::consts::PI / count as f64);
        for dist in 1..=length {
            let x = (centre.x as f64 + dist as f64 * angle.cos()) as i32;
            let y = (centre.y as f64 + dist as f64 * angle.sin()) as i32;
            cells.push(Coord::new(x, y));
        }
    }
    cells
}

// Returns the cells of a quadratic Bezier road from start to end, bending
// towards the control point. Consecutive samples are joined with straight
// segments so the road never has gaps.
pub fn bezier(start: Coord, control: Coord, end: Coord, steps: u32) -> Vec<Coord> {
    let mut cells = Vec::new();
    let mut prev = start;
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        let u = 1.0 - t;
        let x = u * u * start.x as f64 + 2.0 * u * t * control.x as f64 + t * t * end.x as f64;
        let y = u * u * start.y as f64 + 2.0 * u * t * control.y as f64 + t * t * end.y as f64;
        let sample = Coord::new(x as i32, y as i32);
        if sample != prev {
            cells.extend(straight(prev, sample));
            prev = sample;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contiguous(cells: &[Coord]) -> bool {
        cells
            .windows(2)
            .all(|w| (w[1] - w[0]).x.abs() <= 1 && (w[1] - w[0]).y.abs() <= 1)
    }

    #[test]
    fn straight_road_joins_its_endpoints() {
        let cells = straight(Coord::new(2, 2), Coord::new(10, 5));
        assert_eq!(cells.first(), Some(&Coord::new(2, 2)));
        assert_eq!(cells.last(), Some(&Coord::new(10, 5)));
        assert!(contiguous(&cells), "straight road has a gap");
    }

    #[test]
    fn ring_samples_every_five_degrees() {
        let cells = ring(Coord::new(15, 15), 10.0);
        assert_eq!(cells.len(), 72);
        // Truncation can push a cell more than a unit off the circle, most
        // of all in the quadrant where both coordinates round away from the
        // centre.
        for &cell in &cells {
            let delta = cell - Coord::new(15, 15);
            let dist2 = delta.x * delta.x + delta.y * delta.y;
            assert!(
                dist2 <= 12 * 12 && dist2 >= 8 * 8,
                "ring cell {:?} strayed from the radius",
                cell
            );
        }
    }

    #[test]
    fn spokes_walk_outward_from_the_centre() {
        let centre = Coord::new(15, 15);
        let cells = spokes(centre, 8, 13);
        assert_eq!(cells.len(), 8 * 13);
        // the first spoke is due east, the fifth due west
        assert_eq!(cells[0], Coord::new(16, 15));
        assert_eq!(cells[12], Coord::new(28, 15));
        assert_eq!(cells[4 * 13], Coord::new(14, 15));
        assert_eq!(cells[4 * 13 + 12], Coord::new(2, 15));
    }

    #[test]
    fn bezier_road_reaches_both_endpoints_without_gaps() {
        let start = Coord::new(3, 20);
        let end = Coord::new(20, 3);
        let cells = bezier(start, Coord::new(15, 15), end, 20);
        assert_eq!(cells.first(), Some(&start));
        assert_eq!(cells.last(), Some(&end));
        assert!(contiguous(&cells), "bezier road has a gap");
    }
}
