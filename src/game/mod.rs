pub mod combat;
pub mod log;
pub mod movement;

use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    actors::{Player, Roster},
    config::{ConfigError, GameConfig},
    data::{CatalogError, MonsterCatalog},
    map::{DungeonMap, generate_level},
};

pub use log::MessageLog;
pub use movement::{MoveOutcome, resolve_move};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("monster catalog failed validation")]
    Catalog(#[from] CatalogError),
    #[error("configuration rejected")]
    Config(#[from] ConfigError),
}

/// Everything the core understands from the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum GameCommand {
    #[default]
    Nop,
    Debug,
    Quit,
    Up,
    Down,
    Left,
    Right,
}

impl GameCommand {
    pub fn delta(self) -> Option<Point> {
        match self {
            GameCommand::Up => Some(Point::new(0, -1)),
            GameCommand::Down => Some(Point::new(0, 1)),
            GameCommand::Left => Some(Point::new(-1, 0)),
            GameCommand::Right => Some(Point::new(1, 0)),
            GameCommand::Nop | GameCommand::Debug | GameCommand::Quit => None,
        }
    }
}

/// Removes every defeated monster, announcing each and handing its loot and
/// experience to the player. Returns how many were removed.
pub fn end_of_turn(roster: &mut Roster, player: &mut Player, log: &mut MessageLog) -> usize {
    let defeated: Vec<usize> = roster
        .iter()
        .enumerate()
        .filter(|(_, monster)| monster.is_defeated())
        .map(|(idx, _)| idx)
        .collect();

    let mut removed = Vec::with_capacity(defeated.len());
    for &idx in defeated.iter().rev() {
        if let Some(monster) = roster.remove(idx) {
            removed.push(monster);
        }
    }

    for monster in removed.iter().rev() {
        player.xp += monster.xp;
        player.gold += monster.carry_gold;
        log.push(format!("You defeated the {}!", monster.name));
        debug!(name = %monster.name, xp = monster.xp, gold = monster.carry_gold, "monster defeated");
    }
    removed.len()
}

/// One dungeon level and the state the turn loop mutates.
pub struct Game {
    pub map: DungeonMap,
    pub player: Player,
    pub roster: Roster,
    pub catalog: MonsterCatalog,
    log: MessageLog,
    rng: RandomNumberGenerator,
    pub debug: bool,
    pub done: bool,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let config = config.clone().validate()?;
        let catalog = MonsterCatalog::builtin()?;
        let seed = config.resolved_seed();
        info!(seed, depth = config.depth, "starting game");

        let mut game = Self {
            map: DungeonMap::new(config.map_width, config.map_height),
            player: Player::with_mace(Point::new(0, 0), config.depth),
            roster: Roster::new(),
            catalog,
            log: MessageLog::new(),
            rng: RandomNumberGenerator::seeded(seed),
            debug: config.debug,
            done: false,
        };
        generate_level(
            &mut game.map,
            config.depth,
            &mut game.player,
            &mut game.roster,
            &game.catalog,
            &mut game.rng,
        );
        Ok(game)
    }

    /// Session over an existing layout, for scripted setups.
    pub fn from_parts(
        map: DungeonMap,
        player: Player,
        roster: Roster,
        seed: u64,
    ) -> Result<Self, GameError> {
        Ok(Self {
            map,
            player,
            roster,
            catalog: MonsterCatalog::builtin()?,
            log: MessageLog::new(),
            rng: RandomNumberGenerator::seeded(seed),
            debug: false,
            done: false,
        })
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    /// Runs one turn: dispatches `command`, then clears away the dead.
    pub fn handle_command(&mut self, command: GameCommand) -> Option<MoveOutcome> {
        let mut outcome = None;
        match command {
            GameCommand::Nop => {}
            GameCommand::Quit => self.done = true,
            GameCommand::Debug => self.debug = !self.debug,
            GameCommand::Up | GameCommand::Down | GameCommand::Left | GameCommand::Right => {
                if let Some(delta) = command.delta() {
                    outcome = Some(resolve_move(
                        delta.x,
                        delta.y,
                        &mut self.map,
                        &mut self.player,
                        &mut self.roster,
                        &mut self.log,
                        &mut self.rng,
                    ));
                }
            }
        }
        end_of_turn(&mut self.roster, &mut self.player, &mut self.log);
        outcome
    }
}
