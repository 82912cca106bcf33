use bracket_geometry::prelude::Point;

use super::Entity;
use crate::data::{Dice, MonsterCatalog, Roller};

/// Hit dice are eight-sided, one per template level.
pub const HIT_DIE_SIDES: u32 = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    pub point: Point,
    pub symbol: char,
    pub name: String,
    pub hit_points: i32,
    pub level: i32,
    pub armor_class: i32,
    pub xp: i32,
    pub carry_gold: i32,
}

impl Monster {
    /// Scripted monster with no template behind it. Always spawns alive.
    pub fn new(name: impl Into<String>, symbol: char, hit_points: i32) -> Self {
        Self {
            point: Point::new(0, 0),
            symbol,
            name: name.into(),
            hit_points: hit_points.max(1),
            level: 1,
            armor_class: 10,
            xp: 0,
            carry_gold: 0,
        }
    }

    /// Instance of catalog entry `index` at `point`, or `None` past the end.
    pub fn spawn<R: Roller + ?Sized>(
        catalog: &MonsterCatalog,
        index: usize,
        point: Point,
        rng: &mut R,
    ) -> Option<Self> {
        let template = catalog.get(index)?;
        let hit_dice = Dice::new(template.level.max(0) as u32, HIT_DIE_SIDES);
        Some(Self {
            point,
            symbol: template.symbol,
            name: template.name.to_string(),
            hit_points: hit_dice.roll(rng).max(1),
            level: template.level,
            armor_class: template.armor_class,
            xp: template.xp,
            carry_gold: template.carry_gold,
        })
    }

    pub fn is_defeated(&self) -> bool {
        self.hit_points <= 0
    }

    pub fn debug_string(&self) -> String {
        format!(
            "{} x={} y={} hp={}",
            self.name, self.point.x, self.point.y, self.hit_points
        )
    }
}

impl Entity for Monster {
    fn position(&self) -> Point {
        self.point
    }

    fn set_position(&mut self, point: Point) {
        self.point = point;
    }

    fn glyph(&self) -> char {
        self.symbol
    }
}

/// Live monsters on the current level, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    monsters: Vec<Monster>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mut monster: Monster, point: Point) {
        monster.set_position(point);
        self.monsters.push(monster);
    }

    /// Removes and returns the monster at `index`, keeping the others in order.
    pub fn remove(&mut self, index: usize) -> Option<Monster> {
        if index < self.monsters.len() {
            Some(self.monsters.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.monsters.clear();
    }

    pub fn at(&self, point: Point) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.point == point)
    }

    pub(crate) fn at_mut(&mut self, point: Point) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.point == point)
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter()
    }
}
