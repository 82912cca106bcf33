pub mod monster;

use bracket_geometry::prelude::Point;

use crate::{
    data::{DamageNotation, Dice, Roller},
    game::combat,
};

pub use monster::{Monster, Roster};

/// Anything that occupies a map cell and draws as a single glyph.
pub trait Entity {
    fn position(&self) -> Point;
    fn set_position(&mut self, point: Point);
    fn glyph(&self) -> char;
}

pub const PLAYER_GLYPH: char = '@';
pub const STARTING_HIT_POINTS: i32 = 12;

#[derive(Clone, Debug)]
pub struct Player {
    pub point: Point,
    pub moves: u32,
    pub depth: i32,
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub level: i32,
    pub weapon: DamageNotation,
    pub weapon_bonus: i32,
    pub gold: i32,
    pub xp: i32,
}

impl Player {
    pub fn new(point: Point, depth: i32, weapon: DamageNotation) -> Self {
        Self {
            point,
            moves: 0,
            depth,
            hit_points: STARTING_HIT_POINTS,
            max_hit_points: STARTING_HIT_POINTS,
            level: 1,
            weapon,
            weapon_bonus: 1,
            gold: 0,
            xp: 0,
        }
    }

    /// Fresh adventurer wielding a mace.
    pub fn with_mace(point: Point, depth: i32) -> Self {
        Self::new(point, depth, DamageNotation::single(Dice::new(2, 4)))
    }

    pub fn attack<R: Roller + ?Sized>(&self, monster: &mut Monster, rng: &mut R) -> String {
        combat::attack(self, monster, rng)
    }

    pub fn info_string(&self) -> String {
        format!(
            "Level: {}  Gold: {}  Hp: {}({})  Exp: {}/{}  Moves: {}",
            self.depth,
            self.gold,
            self.hit_points,
            self.max_hit_points,
            self.level,
            self.xp,
            self.moves
        )
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::with_mace(Point::new(0, 0), 1)
    }
}

impl Entity for Player {
    fn position(&self) -> Point {
        self.point
    }

    fn set_position(&mut self, point: Point) {
        self.point = point;
    }

    fn glyph(&self) -> char {
        PLAYER_GLYPH
    }
}

/// Cell `entity` would reach by stepping `(dx, dy)`.
pub fn destination<E: Entity + ?Sized>(entity: &E, dx: i32, dy: i32) -> Point {
    let from = entity.position();
    Point::new(from.x + dx, from.y + dy)
}
