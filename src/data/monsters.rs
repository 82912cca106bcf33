use thiserror::Error;
use tracing::debug;

use super::dice::{DamageNotation, DiceError, Roller};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub symbol: char,
    pub carry_gold: i32,
    pub xp: i32,
    pub level: i32,
    pub armor_class: i32,
    pub damage: &'static str,
    pub name: &'static str,
}

impl MonsterTemplate {
    pub const fn new(
        symbol: char,
        carry_gold: i32,
        xp: i32,
        level: i32,
        armor_class: i32,
        damage: &'static str,
        name: &'static str,
    ) -> Self {
        Self {
            symbol,
            carry_gold,
            xp,
            level,
            armor_class,
            damage,
            name,
        }
    }
}

/// Ordered by intended difficulty ("vorpalness"); the index is the rank.
pub const BUILTIN_MONSTERS: [MonsterTemplate; 26] = [
    MonsterTemplate::new('K', 0, 2, 1, 7, "1d4", "kobold"),
    MonsterTemplate::new('J', 0, 2, 1, 7, "1d2", "jackal"),
    MonsterTemplate::new('B', 0, 1, 1, 3, "1d2", "bat"),
    MonsterTemplate::new('S', 0, 3, 1, 5, "1d3", "snake"),
    MonsterTemplate::new('H', 0, 3, 1, 5, "1d8", "hobgoblin"),
    MonsterTemplate::new('E', 0, 5, 1, 9, "0d0", "floating eye"),
    MonsterTemplate::new('A', 0, 10, 2, 3, "1d6", "giant ant"),
    MonsterTemplate::new('O', 15, 5, 1, 6, "1d7", "orc"),
    MonsterTemplate::new('Z', 0, 7, 2, 8, "1d8", "zombie"),
    MonsterTemplate::new('G', 10, 8, 1, 5, "1d6", "gnome"),
    MonsterTemplate::new('L', 0, 10, 3, 8, "1d1", "leprechaun"),
    MonsterTemplate::new('C', 15, 15, 4, 4, "1d6/1d6", "centaur"),
    MonsterTemplate::new('R', 0, 25, 5, 2, "0d0/0d0", "rust monster"),
    MonsterTemplate::new('Q', 30, 35, 3, 2, "1d2/1d2/1d4", "quasit"),
    MonsterTemplate::new('N', 100, 40, 3, 9, "0d0", "nymph"),
    MonsterTemplate::new('Y', 30, 50, 4, 6, "1d6/1d6", "yeti"),
    MonsterTemplate::new('T', 50, 55, 6, 4, "1d8/1d8/2d6", "troll"),
    MonsterTemplate::new('W', 0, 55, 5, 4, "1d6", "wraith"),
    MonsterTemplate::new('F', 0, 85, 8, 3, "0d0", "violet fungi"),
    MonsterTemplate::new('I', 0, 120, 8, 3, "4d4", "invisible stalker"),
    MonsterTemplate::new('X', 0, 120, 7, -2, "1d3/1d3/1d3/4d6", "xorn"),
    MonsterTemplate::new('U', 40, 130, 8, 2, "3d4/3d4/2d5", "umber hulk"),
    MonsterTemplate::new('M', 30, 140, 7, 7, "3d4", "mimic"),
    MonsterTemplate::new('V', 30, 380, 8, 1, "1d10", "vampire"),
    MonsterTemplate::new('D', 100, 9000, 10, -1, "1d8/1d8/3d10", "dragon"),
    MonsterTemplate::new('P', 70, 7000, 15, 6, "2d12/2d4", "purple worm"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("monster catalog is empty")]
    Empty,
    #[error("monster `{name}` has unprintable symbol {symbol:?}")]
    Symbol { name: &'static str, symbol: char },
    #[error("monster `{name}` has bad damage notation")]
    Damage {
        name: &'static str,
        #[source]
        source: DiceError,
    },
}

/// Template indices a given depth may draw from: `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncounterWindow {
    pub min: usize,
    pub max: usize,
}

impl EncounterWindow {
    pub const BELOW_DEPTH: i32 = 6;
    pub const ABOVE_DEPTH: i32 = 3;

    /// `None` when the window is empty and the hardest monster must stand in.
    pub fn for_depth(depth: i32, len: usize) -> Option<Self> {
        let len_rank = i32::try_from(len).unwrap_or(i32::MAX);
        let min = depth.saturating_sub(Self::BELOW_DEPTH).max(0) as usize;
        let max = depth.saturating_add(Self::ABOVE_DEPTH).clamp(0, len_rank) as usize;
        if min >= len || max <= min {
            return None;
        }
        Some(Self { min, max })
    }

    pub fn width(&self) -> usize {
        self.max - self.min
    }
}

/// Validated, read-only monster table.
#[derive(Clone, Debug)]
pub struct MonsterCatalog {
    templates: Vec<MonsterTemplate>,
    damage: Vec<DamageNotation>,
}

impl MonsterCatalog {
    pub fn new(templates: Vec<MonsterTemplate>) -> Result<Self, CatalogError> {
        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut damage = Vec::with_capacity(templates.len());
        for template in &templates {
            let symbol = template.symbol;
            if symbol.is_control() || symbol.is_whitespace() {
                return Err(CatalogError::Symbol {
                    name: template.name,
                    symbol,
                });
            }
            let notation =
                DamageNotation::parse(template.damage).map_err(|source| CatalogError::Damage {
                    name: template.name,
                    source,
                })?;
            damage.push(notation);
        }
        Ok(Self { templates, damage })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(BUILTIN_MONSTERS.to_vec())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MonsterTemplate> {
        self.templates.get(index)
    }

    pub fn damage(&self, index: usize) -> Option<&DamageNotation> {
        self.damage.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonsterTemplate> {
        self.templates.iter()
    }

    pub fn hardest(&self) -> usize {
        self.templates.len() - 1
    }

    /// Picks a template index for `depth`, sliding a window of at most nine
    /// ranks around it (six below, three above).
    pub fn select_template<R: Roller + ?Sized>(&self, depth: i32, rng: &mut R) -> usize {
        let Some(window) = EncounterWindow::for_depth(depth, self.len()) else {
            debug!(depth, len = self.len(), "encounter window empty, using hardest");
            return self.hardest();
        };
        let idx = rng.range(window.min as i32, window.max as i32) as usize;
        debug!(
            depth,
            len = self.len(),
            min = window.min,
            max = window.max,
            idx,
            "selected monster"
        );
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dice::tests::Scripted;
    use bracket_random::prelude::RandomNumberGenerator;
    use proptest::prelude::*;

    #[test]
    fn builtin_catalog_validates() {
        let catalog = MonsterCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 26);
        assert_eq!(catalog.get(0).map(|t| t.name), Some("kobold"));
        assert_eq!(catalog.get(25).map(|t| t.name), Some("purple worm"));
        assert_eq!(catalog.damage(24).unwrap().attacks(), 3);
    }

    #[test]
    fn rejects_bad_damage_and_symbols() {
        let bad_damage = MonsterTemplate::new('K', 0, 1, 1, 7, "1d", "broken");
        assert!(matches!(
            MonsterCatalog::new(vec![bad_damage]),
            Err(CatalogError::Damage { name: "broken", .. })
        ));

        let bad_symbol = MonsterTemplate::new('\n', 0, 1, 1, 7, "1d4", "newline");
        assert!(matches!(
            MonsterCatalog::new(vec![bad_symbol]),
            Err(CatalogError::Symbol { .. })
        ));

        assert_eq!(MonsterCatalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn shallow_window_is_clamped() {
        assert_eq!(
            EncounterWindow::for_depth(1, 26),
            Some(EncounterWindow { min: 0, max: 4 })
        );
        let catalog = MonsterCatalog::builtin().unwrap();
        let mut rng = RandomNumberGenerator::seeded(11);
        for _ in 0..500 {
            assert!(catalog.select_template(1, &mut rng) < 4);
        }
    }

    #[test]
    fn window_bounds_are_reachable() {
        let catalog = MonsterCatalog::builtin().unwrap();
        assert_eq!(catalog.select_template(10, &mut Scripted::new(&[0])), 4);
        assert_eq!(catalog.select_template(10, &mut Scripted::new(&[99])), 12);
    }

    #[test]
    fn deep_levels_get_the_hardest_monster() {
        let catalog = MonsterCatalog::builtin().unwrap();
        let mut rng = Scripted::new(&[]);
        assert_eq!(catalog.select_template(50, &mut rng), 25);
        assert_eq!(catalog.select_template(32, &mut rng), 25);
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn negative_depth_degrades_gracefully() {
        let catalog = MonsterCatalog::builtin().unwrap();
        assert_eq!(EncounterWindow::for_depth(-5, 26), None);
        assert_eq!(catalog.select_template(-5, &mut Scripted::new(&[])), 25);
    }

    #[test]
    fn extreme_depths_do_not_overflow() {
        let catalog = MonsterCatalog::builtin().unwrap();
        let mut rng = Scripted::new(&[]);
        assert_eq!(EncounterWindow::for_depth(i32::MAX, 26), None);
        assert_eq!(EncounterWindow::for_depth(i32::MIN, 26), None);
        assert_eq!(catalog.select_template(i32::MAX, &mut rng), 25);
        assert_eq!(catalog.select_template(i32::MIN, &mut rng), 25);
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn cached_damage_matches_template_text() {
        let catalog = MonsterCatalog::builtin().unwrap();
        for (idx, template) in catalog.iter().enumerate() {
            let notation = catalog.damage(idx).unwrap();
            assert_eq!(notation.to_string(), template.damage, "{}", template.name);
        }
        assert!(catalog.damage(catalog.len()).is_none());
    }

    proptest! {
        #[test]
        fn selection_stays_in_catalog(depth in any::<i32>(), seed in any::<u64>()) {
            let catalog = MonsterCatalog::builtin().unwrap();
            let mut rng = RandomNumberGenerator::seeded(seed);
            let idx = catalog.select_template(depth, &mut rng);
            prop_assert!(idx < catalog.len());
            match EncounterWindow::for_depth(depth, catalog.len()) {
                Some(window) => {
                    prop_assert!(window.width() <= 9);
                    prop_assert!((window.min..window.max).contains(&idx));
                }
                None => prop_assert_eq!(idx, catalog.hardest()),
            }
            if (0..=6).contains(&depth) {
                prop_assert!((idx as i32) < depth + 3);
            }
        }
    }
}
