//! Turn resolution for a small terminal roguelike: the monster table and
//! encounter selection, damage dice, and what happens when the player steps
//! into a wall, a door or a monster.
pub mod actors;
pub mod config;
pub mod data;
pub mod game;
pub mod input;
pub mod map;
pub mod render;

pub use actors::{Entity, Monster, Player, Roster};
pub use data::{DamageNotation, Dice, MonsterCatalog, MonsterTemplate, Roller};
pub use game::{Game, GameCommand, MessageLog, MoveOutcome, end_of_turn, resolve_move};
pub use map::{DungeonMap, TileKind};
