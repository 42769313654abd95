use coord_2d::{Axis, Coord, Size};
use grid_2d::Grid;
use rand::Rng;
use std::fmt;

const NUM_ROOM_ATTEMPTS: usize = 10;
const MIN_ROOM_SIDE: u32 = 4;
const MAX_ROOM_SIDE: u32 = 8;
const NUM_ENEMY_ATTEMPTS: usize = 20;

// Will be used as cells in grids representing simple maps of levels during
// terrain generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DungeonCell {
    Floor,
    Wall,
}

// Strength tag attached to a seeded enemy. The consumer decides what each
// tier means in battle terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyTier {
    Weak,
    Normal,
    Strong,
}

const ENEMY_TIERS: [EnemyTier; 3] = [EnemyTier::Weak, EnemyTier::Normal, EnemyTier::Strong];

// An enemy location chosen during generation, not a cell of the layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySeed {
    pub coord: Coord,
    pub tier: EnemyTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DungeonError {
    // The requested size cannot fit a single minimum-sized room
    MapTooSmall,
    // Generation finished without accepting any room
    NoRooms,
}

impl fmt::Display for DungeonError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MapTooSmall => write!(f, "map too small to fit a room"),
            Self::NoRooms => write!(f, "no rooms were accepted"),
        }
    }
}

impl std::error::Error for DungeonError {}

// An axis-aligned rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Rect {
    top_left: Coord,
    size: Size,
}

impl Rect {
    // Randomly generate a rectangle that stays off the outer wall ring
    fn choose<R: Rng>(bounds: Size, rng: &mut R) -> Self {
        let width = rng.gen_range(MIN_ROOM_SIDE..=MAX_ROOM_SIDE.min(bounds.width() - 2));
        let height = rng.gen_range(MIN_ROOM_SIDE..=MAX_ROOM_SIDE.min(bounds.height() - 2));
        let size = Size::new(width, height);
        let left = rng.gen_range(1..(bounds.width() - width)) as i32;
        let top = rng.gen_range(1..(bounds.height() - height)) as i32;
        let top_left = Coord::new(left, top);
        Self { top_left, size }
    }

    // Returns an iterator over all the coordinates in the rectangle
    fn coords(&self) -> impl '_ + Iterator<Item = Coord> {
        self.size.coord_iter_row_major().map(|c| c + self.top_left)
    }

    // Returns the coordinate of the centre of the rectangle
    fn centre(&self) -> Coord {
        self.top_left + (self.size / 2)
    }

    // One-past-the-end corner
    fn bottom_right(&self) -> Coord {
        self.top_left + self.size
    }

    // The rectangle grown by one cell on every side. Candidate rooms are
    // tested in padded form so accepted rooms always keep a wall between them.
    fn padded(&self) -> Self {
        Self {
            top_left: self.top_left - Coord::new(1, 1),
            size: self.size + Size::new(2, 2),
        }
    }

    // Returns true iff the two rectangles share at least one cell
    fn intersects(&self, other: &Self) -> bool {
        self.top_left.x < other.bottom_right().x
            && other.top_left.x < self.bottom_right().x
            && self.top_left.y < other.bottom_right().y
            && other.top_left.y < self.bottom_right().y
    }

    // Updates the given map, setting each cell of this rectangle to floor
    fn carve(&self, map: &mut Grid<DungeonCell>) {
        for coord in self.coords() {
            *map.get_checked_mut(coord) = DungeonCell::Floor;
        }
    }
}

// Returns a vec of coordinates that define an L-shaped corridor from start to
// end (in order, excluding start). The first axis that is traversed is the
// given axis.
fn l_shaped_corridor(start: Coord, end: Coord, first_axis: Axis) -> Vec<Coord> {
    let mut ret = Vec::new();
    let delta = end - start;
    let step = Coord::new_axis(delta.get(first_axis).signum(), 0, first_axis);
    let mut current = start;
    while current.get(first_axis) != end.get(first_axis) {
        current += step;
        ret.push(current);
    }
    let step = Coord::new_axis(0, delta.get(first_axis.other()).signum(), first_axis);
    while current != end {
        current += step;
        ret.push(current);
    }
    ret
}

// Generation runs through these phases in order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Init,
    RoomPlacement,
    CorridorConnection,
    ExitPlacement,
    EnemySeeding,
    Done,
}

// Working state of the generator, advanced one phase per step
struct Generator {
    phase: Phase,
    map: Grid<DungeonCell>,
    rooms: Vec<Rect>,
    exit: Option<Coord>,
    enemies: Vec<EnemySeed>,
}

impl Generator {
    fn new(size: Size) -> Result<Self, DungeonError> {
        if size.width() < MIN_ROOM_SIDE + 2 || size.height() < MIN_ROOM_SIDE + 2 {
            return Err(DungeonError::MapTooSmall);
        }
        Ok(Self {
            phase: Phase::Init,
            map: Grid::new_copy(size, DungeonCell::Wall),
            rooms: Vec::new(),
            exit: None,
            enemies: Vec::new(),
        })
    }

    // Adds a new room unless its padded bounding box intersects an accepted
    // room. The very first room skips the test so the layout is never empty.
    fn try_add_room(&mut self, candidate: Rect) {
        if !self.rooms.is_empty() {
            let padded = candidate.padded();
            if self.rooms.iter().any(|room| padded.intersects(room)) {
                return;
            }
        }
        candidate.carve(&mut self.map);
        self.rooms.push(candidate);
    }

    fn step<R: Rng>(&mut self, rng: &mut R) {
        match self.phase {
            Phase::Init => {
                // The canvas is already solid wall; nothing to carve yet
                self.phase = Phase::RoomPlacement;
            }
            Phase::RoomPlacement => {
                for _ in 0..NUM_ROOM_ATTEMPTS {
                    let candidate = Rect::choose(self.map.size(), rng);
                    self.try_add_room(candidate);
                }
                self.phase = Phase::CorridorConnection;
            }
            Phase::CorridorConnection => {
                // Join consecutive rooms in acceptance order, centre to centre
                for i in 1..self.rooms.len() {
                    let start = self.rooms[i - 1].centre();
                    let end = self.rooms[i].centre();
                    let first_axis = if rng.gen() { Axis::X } else { Axis::Y };
                    for coord in l_shaped_corridor(start, end, first_axis) {
                        *self.map.get_checked_mut(coord) = DungeonCell::Floor;
                    }
                }
                self.phase = Phase::ExitPlacement;
            }
            Phase::ExitPlacement => {
                self.exit = self.rooms.last().map(Rect::centre);
                self.phase = Phase::EnemySeeding;
            }
            Phase::EnemySeeding => {
                // Bounded sampling. Attempts that land on wall or on the exit
                // cell are discarded, so the roster may hold fewer than
                // NUM_ENEMY_ATTEMPTS entries.
                let size = self.map.size();
                for _ in 0..NUM_ENEMY_ATTEMPTS {
                    let coord = Coord::new(
                        rng.gen_range(1..size.width() as i32 - 1),
                        rng.gen_range(1..size.height() as i32 - 1),
                    );
                    if *self.map.get_checked(coord) == DungeonCell::Floor && Some(coord) != self.exit
                    {
                        let tier = ENEMY_TIERS[rng.gen_range(0..ENEMY_TIERS.len())];
                        self.enemies.push(EnemySeed { coord, tier });
                    }
                }
                self.phase = Phase::Done;
            }
            Phase::Done => (),
        }
    }
}

// A finished layout of rooms and corridors
#[derive(Clone, Debug, PartialEq)]
pub struct DungeonLayout {
    // Whether each cell is a floor or wall
    pub map: Grid<DungeonCell>,
    // Centre of the first room, a sensible place to drop the player
    pub entry: Coord,
    // Centre of the last room, where the way out belongs
    pub exit: Coord,
    // Seeded enemy locations, not part of the cell grid
    pub enemies: Vec<EnemySeed>,
}

impl DungeonLayout {
    // Randomly generates a layout of rooms connected by corridors
    pub fn generate<R: Rng>(size: Size, rng: &mut R) -> Result<Self, DungeonError> {
        let mut generator = Generator::new(size)?;
        while generator.phase != Phase::Done {
            generator.step(rng);
        }
        let entry = generator
            .rooms
            .first()
            .map(Rect::centre)
            .ok_or(DungeonError::NoRooms)?;
        let exit = generator.exit.ok_or(DungeonError::NoRooms)?;
        Ok(Self {
            map: generator.map,
            entry,
            exit,
            enemies: generator.enemies,
        })
    }
}
