use tracing::trace;

use crate::{
    actors::{Monster, Player},
    data::Roller,
};

/// Classic to-hit check: a d20 plus `bonus` must reach
/// `20 - attacker_level - defender_armor_class`. Low armor class is harder to hit.
pub fn swing<R: Roller + ?Sized>(
    attacker_level: i32,
    defender_armor_class: i32,
    bonus: i32,
    rng: &mut R,
) -> bool {
    let roll = rng.die(20);
    let need = 20 - attacker_level - defender_armor_class;
    roll + bonus >= need
}

/// Player swings every component of their weapon at `monster`, applying
/// damage on each hit. Returns the line for the message log.
pub fn attack<R: Roller + ?Sized>(player: &Player, monster: &mut Monster, rng: &mut R) -> String {
    let attacks = player.weapon.attacks();
    let mut hits = 0;
    let mut total = 0;

    for dice in player.weapon.components() {
        if !swing(player.level, monster.armor_class, player.weapon_bonus, rng) {
            continue;
        }
        let damage = dice.roll(rng);
        monster.hit_points -= damage;
        hits += 1;
        total += damage;
    }

    trace!(
        monster = %monster.name,
        hits,
        attacks,
        damage = total,
        hp = monster.hit_points,
        "player attack"
    );

    match (hits, attacks) {
        (0, _) => format!("You miss the {}.", monster.name),
        (_, 1) => format!("You hit the {} for {} damage.", monster.name, total),
        _ => format!(
            "You hit the {} {} of {} times for {} damage.",
            monster.name, hits, attacks, total
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DamageNotation, dice::tests::Scripted};
    use bracket_geometry::prelude::Point;

    fn kobold() -> Monster {
        let mut monster = Monster::new("kobold", 'K', 5);
        monster.armor_class = 7;
        monster
    }

    #[test]
    fn swing_respects_armor_class() {
        // need = 20 - 1 - 7 = 12
        assert!(swing(1, 7, 0, &mut Scripted::new(&[11])));
        assert!(!swing(1, 7, 0, &mut Scripted::new(&[10])));
        assert!(swing(1, 7, 1, &mut Scripted::new(&[10])));
        // a dragon's armor class of -1 needs 20 from a first-level player
        assert!(!swing(1, -1, 0, &mut Scripted::new(&[18])));
    }

    #[test]
    fn hit_applies_damage_and_reports_it() {
        let player = Player::with_mace(Point::new(0, 0), 1);
        let mut monster = kobold();
        // d20 = 20, then 2d4 = 4 + 4
        let line = attack(&player, &mut monster, &mut Scripted::new(&[19, 3, 3]));
        assert_eq!(line, "You hit the kobold for 8 damage.");
        assert_eq!(monster.hit_points, -3);
        assert!(monster.is_defeated());
    }

    #[test]
    fn miss_leaves_monster_untouched() {
        let player = Player::with_mace(Point::new(0, 0), 1);
        let mut monster = kobold();
        let line = attack(&player, &mut monster, &mut Scripted::new(&[0]));
        assert_eq!(line, "You miss the kobold.");
        assert_eq!(monster.hit_points, 5);
    }

    #[test]
    fn each_component_rolls_to_hit_separately() {
        let weapon = DamageNotation::parse("1d6/0d0/1d4").unwrap();
        let player = Player::new(Point::new(0, 0), 1, weapon);
        let mut monster = Monster::new("yeti", 'Y', 30);
        monster.armor_class = 6;
        // hit 1d6 (rolls 6), hit 0d0 (no dice drawn), miss 1d4
        let line = attack(&player, &mut monster, &mut Scripted::new(&[19, 5, 19, 0]));
        assert_eq!(line, "You hit the yeti 2 of 3 times for 6 damage.");
        assert_eq!(monster.hit_points, 24);
    }
}
