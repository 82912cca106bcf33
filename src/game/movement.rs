use tracing::debug;

use super::MessageLog;
use crate::{
    actors::{Entity, Player, Roster, destination},
    data::Roller,
    map::{DungeonMap, TileKind},
};

pub const BLOCKED: &str = "That way is blocked.";
pub const DOOR_OPENED: &str = "You open the door.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Attacked,
    OpenedDoor,
    Blocked,
}

/// Resolves one step of the player by `(dx, dy)`.
///
/// In order: map edge, monster in the way (attack instead of moving), then the
/// destination tile. Every branch counts as a move, and exactly one line is
/// written to `log` except when walking onto open ground.
pub fn resolve_move<R: Roller + ?Sized>(
    dx: i32,
    dy: i32,
    map: &mut DungeonMap,
    player: &mut Player,
    roster: &mut Roster,
    log: &mut MessageLog,
    rng: &mut R,
) -> MoveOutcome {
    let outcome = step(dx, dy, map, player, roster, log, rng);
    player.moves += 1;
    debug!(dx, dy, ?outcome, moves = player.moves, "resolved move");
    outcome
}

fn step<R: Roller + ?Sized>(
    dx: i32,
    dy: i32,
    map: &mut DungeonMap,
    player: &mut Player,
    roster: &mut Roster,
    log: &mut MessageLog,
    rng: &mut R,
) -> MoveOutcome {
    let dest = destination(player, dx, dy);

    if !map.in_bounds(dest) {
        log.push(BLOCKED);
        return MoveOutcome::Blocked;
    }

    if let Some(monster) = roster.at_mut(dest) {
        log.push(player.attack(monster, rng));
        return MoveOutcome::Attacked;
    }

    match map.tile_at(dest) {
        Some(tile) if tile.is_walkable() => {
            player.set_position(dest);
            MoveOutcome::Moved
        }
        Some(tile) if tile.is_type(TileKind::DoorClosed) => {
            map.set_tile(dest, TileKind::DoorOpen);
            log.push(DOOR_OPENED);
            MoveOutcome::OpenedDoor
        }
        _ => {
            log.push(BLOCKED);
            MoveOutcome::Blocked
        }
    }
}
