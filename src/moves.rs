// Per-turn move selection
//
// The decision is a chain of filters over the four directions, evaluated
// against a single pre-turn snapshot:
// 1. safety: stay on the board and off every snake segment
// 2. food: step toward the nearest food on either axis
// 3. head adjacency: drop food moves that end next to another head
// followed by a strict three-tier uniform choice.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, OccupancyGrid};
use crate::types::{Coord, Direction};

/// Fixed four-entry set of directions, indexed by `Direction::index`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveSet {
    flags: [bool; 4],
}

impl MoveSet {
    pub fn empty() -> Self {
        MoveSet::default()
    }

    pub fn all() -> Self {
        MoveSet { flags: [true; 4] }
    }

    pub fn insert(&mut self, direction: Direction) {
        self.flags[direction.index()] = true;
    }

    pub fn remove(&mut self, direction: Direction) {
        self.flags[direction.index()] = false;
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.flags[direction.index()]
    }

    pub fn len(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Directions in the set, in `Direction::all()` order
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::all().into_iter().filter(|d| self.contains(*d))
    }

    pub fn intersection(&self, other: &MoveSet) -> MoveSet {
        let mut out = MoveSet::empty();
        for dir in self.iter().filter(|d| other.contains(*d)) {
            out.insert(dir);
        }
        out
    }

    pub fn to_vec(&self) -> Vec<Direction> {
        self.iter().collect()
    }
}

impl FromIterator<Direction> for MoveSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = MoveSet::empty();
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

/// Directions whose target cell is on the board and free of snakes
///
/// Every direction is checked against the same grid; the walls come out of
/// the grid's out-of-bounds sentinel.
pub fn safe_moves(head: &Coord, grid: &OccupancyGrid) -> MoveSet {
    Direction::all()
        .into_iter()
        .filter(|&dir| match grid.neighbor(head, dir) {
            Cell::Empty | Cell::Food => true,
            Cell::Head | Cell::Body | Cell::OutOfBounds => false,
        })
        .collect()
}

/// Closest food by euclidean distance, first one wins ties
pub fn nearest_food(head: &Coord, food: &[Coord]) -> Option<Coord> {
    let mut best: Option<(Coord, i64)> = None;
    for item in food {
        let distance = head.distance_squared(item);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((*item, distance)),
        }
    }
    best.map(|(coord, _)| coord)
}

/// Directions that close the gap to `target`, one per axis at most
pub fn directions_toward(head: &Coord, target: &Coord) -> MoveSet {
    let mut preferred = MoveSet::empty();
    if target.x > head.x {
        preferred.insert(Direction::Right);
    }
    if target.x < head.x {
        preferred.insert(Direction::Left);
    }
    if target.y > head.y {
        preferred.insert(Direction::Up);
    }
    if target.y < head.y {
        preferred.insert(Direction::Down);
    }
    preferred
}

/// Directional preference toward the nearest food; empty when there is none
pub fn food_preference(head: &Coord, food: &[Coord]) -> MoveSet {
    nearest_food(head, food)
        .map(|target| directions_toward(head, &target))
        .unwrap_or_default()
}

/// Whether stepping in `direction` lands next to a snake head
///
/// Looks at the three neighbours of the stepped-to cell other than the one
/// we came from.
pub fn lands_next_to_head(head: &Coord, direction: Direction, grid: &OccupancyGrid) -> bool {
    let stepped = direction.apply(head);
    [direction, direction.rotate_left(), direction.rotate_right()]
        .into_iter()
        .any(|look| grid.neighbor(&stepped, look) == Cell::Head)
}

/// Removes candidates that would put our head next to another head
pub fn avoid_head_adjacency(head: &Coord, candidates: MoveSet, grid: &OccupancyGrid) -> MoveSet {
    candidates
        .iter()
        .filter(|&dir| !lands_next_to_head(head, dir, grid))
        .collect()
}

/// Which fallback tier produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Safe, food-seeking, away from other heads
    Preferred,
    /// Any safe move
    Safe,
    /// No safe move at all
    Cornered,
}

/// Outcome of a single move selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub tier: Tier,
    /// The set the direction was drawn from (empty when cornered)
    pub candidates: MoveSet,
}

/// Uniform choice over a non-empty set
fn choose_uniform<R: Rng>(set: &MoveSet, rng: &mut R) -> Option<Direction> {
    if set.is_empty() {
        return None;
    }
    set.iter().nth(rng.random_range(0..set.len()))
}

/// Strict three-tier selection: preferred, then safe, then `default`
pub fn select_move<R: Rng>(
    preferred: MoveSet,
    safe: MoveSet,
    default: Direction,
    rng: &mut R,
) -> Decision {
    if let Some(direction) = choose_uniform(&preferred, rng) {
        return Decision {
            direction,
            tier: Tier::Preferred,
            candidates: preferred,
        };
    }

    if let Some(direction) = choose_uniform(&safe, rng) {
        return Decision {
            direction,
            tier: Tier::Safe,
            candidates: safe,
        };
    }

    Decision {
        direction: default,
        tier: Tier::Cornered,
        candidates: MoveSet::empty(),
    }
}

/// Toggles for the optional filters
#[derive(Debug, Clone, Copy)]
pub struct Heuristics {
    pub seek_food: bool,
    pub avoid_head_adjacency: bool,
    pub default_move: Direction,
}

impl Default for Heuristics {
    fn default() -> Self {
        Heuristics {
            seek_food: true,
            avoid_head_adjacency: true,
            default_move: Direction::Down,
        }
    }
}

/// Runs every filter for the snake whose head is at `head` and picks a move
pub fn decide<R: Rng>(
    head: &Coord,
    food: &[Coord],
    grid: &OccupancyGrid,
    heuristics: &Heuristics,
    rng: &mut R,
) -> Decision {
    let safe = safe_moves(head, grid);

    let preferred = if heuristics.seek_food {
        let desired = food_preference(head, food).intersection(&safe);
        if heuristics.avoid_head_adjacency {
            avoid_head_adjacency(head, desired, grid)
        } else {
            desired
        }
    } else {
        MoveSet::empty()
    };

    select_move(preferred, safe, heuristics.default_move, rng)
}
