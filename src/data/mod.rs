pub mod dice;
pub mod monsters;

pub use dice::{DamageNotation, Dice, DiceError, Roller};
pub use monsters::{BUILTIN_MONSTERS, CatalogError, EncounterWindow, MonsterCatalog, MonsterTemplate};
