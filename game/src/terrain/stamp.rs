use crate::map::TileKind;
use coord_2d::{Coord, Size};
use direction::CardinalDirection;
use grid_2d::Grid;
use rand::Rng;

// Generation-time outline of a building.
#[derive(Debug, Clone, Copy)]
pub struct Footprint {
    pub top_left: Coord,
    pub size: Size,
}

impl Footprint {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            top_left: Coord::new(x, y),
            size: Size::new(width, height),
        }
    }

    fn coords(&self) -> impl '_ + Iterator<Item = Coord> {
        self.size
            .coord_iter_row_major()
            .map(|coord| coord + self.top_left)
    }

    fn is_edge(&self, coord: Coord) -> bool {
        let rel = coord - self.top_left;
        rel.x == 0
            || rel.y == 0
            || rel.x == self.size.width() as i32 - 1
            || rel.y == self.size.height() as i32 - 1
    }

    fn fits_interior(&self, map_size: Size) -> bool {
        self.top_left.x >= 1
            && self.top_left.y >= 1
            && self.top_left.x + self.size.width() as i32 <= map_size.width() as i32 - 1
            && self.top_left.y + self.size.height() as i32 <= map_size.height() as i32 - 1
    }

    fn padded(&self) -> Self {
        Self {
            top_left: self.top_left - Coord::new(1, 1),
            size: self.size + Size::new(2, 2),
        }
    }

    pub fn centre(&self) -> Coord {
        self.top_left + (self.size / 2)
    }

    // The single entrance, centred on the bottom edge.
    pub fn door(&self) -> Coord {
        self.top_left + Coord::new(self.size.width() as i32 / 2, self.size.height() as i32 - 1)
    }

    // A secondary entrance centred on the right edge. Warehouses use it.
    pub fn side_door(&self) -> Coord {
        self.top_left + Coord::new(self.size.width() as i32 - 1, self.size.height() as i32 / 2)
    }
}

pub fn is_interior(size: Size, coord: Coord) -> bool {
    coord.x >= 1
        && coord.y >= 1
        && coord.x < size.width() as i32 - 1
        && coord.y < size.height() as i32 - 1
}

// Stamps a walled building with floor inside and a door on the bottom
// edge. A footprint that would touch the map's boundary ring is skipped
// and nothing is stamped.
pub fn place_building(grid: &mut Grid<TileKind>, footprint: Footprint) -> bool {
    if !footprint.fits_interior(grid.size()) {
        log::warn!(
            "building at {:?} with size {:?} does not fit, skipping",
            footprint.top_left,
            footprint.size
        );
        return false;
    }
    for coord in footprint.coords() {
        *grid.get_checked_mut(coord) = if footprint.is_edge(coord) {
            TileKind::Wall
        } else {
            TileKind::Floor
        };
    }
    *grid.get_checked_mut(footprint.door()) = TileKind::Door;
    true
}

// Pre-check for scattered houses: the footprint padded by one cell must
// avoid roads and existing structures. Padding cells outside the grid
// don't disqualify a site.
pub fn site_is_clear(grid: &Grid<TileKind>, footprint: Footprint) -> bool {
    footprint.padded().coords().all(|coord| match grid.get(coord) {
        None => true,
        Some(kind) => !matches!(
            kind,
            TileKind::Road | TileKind::Wall | TileKind::Door | TileKind::Shop | TileKind::Inn
        ),
    })
}

// Closes the map's outer boundary.
pub fn wall_ring(grid: &mut Grid<TileKind>) {
    let size = grid.size();
    for coord in size.edge_iter() {
        *grid.get_checked_mut(coord) = TileKind::Wall;
    }
}

// Road cells stop one short of the boundary ring, whatever the caller
// sampled.
pub fn stamp_road(grid: &mut Grid<TileKind>, cells: &[Coord]) {
    for &coord in cells {
        if is_interior(grid.size(), coord) {
            *grid.get_checked_mut(coord) = TileKind::Road;
        }
    }
}

// Decorations only ever replace open ground.
pub fn decorate(grid: &mut Grid<TileKind>, coord: Coord, kind: TileKind) -> bool {
    match grid.get_mut(coord) {
        Some(cell) if matches!(*cell, TileKind::Road | TileKind::Floor) => {
            *cell = kind;
            true
        }
        _ => false,
    }
}

// Street furniture dropped on random cells, kept only where it lands on a
// road. Lost attempts are fine.
pub fn scatter_on_roads<R: Rng>(
    grid: &mut Grid<TileKind>,
    kind: TileKind,
    attempts: u32,
    rng: &mut R,
) {
    let size = grid.size();
    for _ in 0..attempts {
        let coord = Coord::new(
            rng.gen_range(1..size.width() as i32 - 1),
            rng.gen_range(1..size.height() as i32 - 1),
        );
        if *grid.get_checked(coord) == TileKind::Road {
            *grid.get_checked_mut(coord) = kind;
        }
    }
}

// The shared town dressing pass. Runs after buildings, shops and portals
// are in place: a fountain on the central square with benches around it,
// lamps where the periodic grid meets a road, a sign on the first open
// floor cell beside each shop, and flowerbeds on open floor.
pub fn add_town_decorations(grid: &mut Grid<TileKind>) {
    let size = grid.size();
    let centre = Coord::new(size.width() as i32 / 2, size.height() as i32 / 2);
    decorate(grid, centre, TileKind::Fountain);
    for offset in [
        Coord::new(0, -2),
        Coord::new(0, 2),
        Coord::new(-2, 0),
        Coord::new(2, 0),
    ] {
        decorate(grid, centre + offset, TileKind::Bench);
    }
    for x in (5..size.width() as i32 - 5).step_by(5) {
        for y in (5..size.height() as i32 - 5).step_by(5) {
            let coord = Coord::new(x, y);
            if (x % 10 == 0 || y % 10 == 0) && *grid.get_checked(coord) == TileKind::Road {
                *grid.get_checked_mut(coord) = TileKind::Lamp;
            }
        }
    }
    let shop_cells = grid
        .enumerate()
        .filter_map(|(coord, &kind)| (kind == TileKind::Shop).then_some(coord))
        .collect::<Vec<_>>();
    for coord in shop_cells {
        for direction in CardinalDirection::all() {
            let neighbour = coord + direction.coord();
            if grid.get(neighbour) == Some(&TileKind::Floor) {
                *grid.get_checked_mut(neighbour) = TileKind::Sign;
                break;
            }
        }
    }
    for x in (3..size.width() as i32 - 3).step_by(7) {
        for y in (3..size.height() as i32 - 3).step_by(7) {
            let coord = Coord::new(x, y);
            if *grid.get_checked(coord) == TileKind::Floor {
                *grid.get_checked_mut(coord) = TileKind::Flowerbed;
            }
        }
    }
}
