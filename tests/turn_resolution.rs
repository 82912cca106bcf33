use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use rogueline::{
    DungeonMap, Entity, Game, GameCommand, MessageLog, Monster, MonsterCatalog, MoveOutcome,
    Player, Roller, Roster, TileKind, end_of_turn, resolve_move,
};

/// Always rolls the top of the requested range.
struct Maximal;

impl Roller for Maximal {
    fn range(&mut self, _min: i32, max: i32) -> i32 {
        max - 1
    }
}

#[test]
fn blocked_at_the_corner_still_costs_a_move() {
    let mut map = DungeonMap::from_rows(&["."]);
    let mut player = Player::with_mace(Point::new(0, 0), 1);
    let mut roster = Roster::new();
    let mut log = MessageLog::new();

    let outcome = resolve_move(-1, 0, &mut map, &mut player, &mut roster, &mut log, &mut Maximal);

    assert_eq!(outcome, MoveOutcome::Blocked);
    assert_eq!(player.position(), Point::new(0, 0));
    assert_eq!(player.moves, 1);
    assert_eq!(log.entries(), ["That way is blocked."]);
}

#[test]
fn killing_blow_leaves_monster_until_cleanup() {
    let mut map = DungeonMap::from_rows(&["..."]);
    let mut player = Player::with_mace(Point::new(0, 0), 1);
    let mut roster = Roster::new();
    let mut log = MessageLog::new();
    roster.add(Monster::new("jackal", 'J', 2), Point::new(1, 0));

    let outcome = resolve_move(1, 0, &mut map, &mut player, &mut roster, &mut log, &mut Maximal);
    assert_eq!(outcome, MoveOutcome::Attacked);
    assert_eq!(log.entries(), ["You hit the jackal for 8 damage."]);
    assert!(roster.at(Point::new(1, 0)).is_some_and(Monster::is_defeated));

    assert_eq!(end_of_turn(&mut roster, &mut player, &mut log), 1);
    assert!(roster.at(Point::new(1, 0)).is_none());
    assert_eq!(log.last(), Some("You defeated the jackal!"));
    assert_eq!(
        log.entries()
            .iter()
            .filter(|line| line.starts_with("You defeated"))
            .count(),
        1
    );
}

#[test]
fn game_loop_opens_door_then_walks_through() {
    let map = DungeonMap::from_rows(&[".+."]);
    let player = Player::with_mace(Point::new(0, 0), 1);
    let mut game = Game::from_parts(map, player, Roster::new(), 3).unwrap();

    assert_eq!(game.handle_command(GameCommand::Right), Some(MoveOutcome::OpenedDoor));
    assert_eq!(game.map.tile_at(Point::new(1, 0)), Some(TileKind::DoorOpen));
    assert_eq!(game.player.position(), Point::new(0, 0));

    game.log_mut().clear();
    assert_eq!(game.handle_command(GameCommand::Right), Some(MoveOutcome::Moved));
    assert_eq!(game.player.position(), Point::new(1, 0));
    assert!(game.log().is_empty());
    assert_eq!(game.player.moves, 2);
}

#[test]
fn fighting_through_the_loop_eventually_clears_the_monster() {
    let map = DungeonMap::from_rows(&[".."]);
    let player = Player::with_mace(Point::new(0, 0), 1);
    let mut roster = Roster::new();
    roster.add(Monster::new("kobold", 'K', 3), Point::new(1, 0));
    let mut game = Game::from_parts(map, player, roster, 17).unwrap();

    for _ in 0..200 {
        if game.roster.is_empty() {
            break;
        }
        assert_eq!(game.handle_command(GameCommand::Right), Some(MoveOutcome::Attacked));
        assert_eq!(game.player.position(), Point::new(0, 0));
    }
    assert!(game.roster.is_empty());
    assert_eq!(game.log().last(), Some("You defeated the kobold!"));
}

#[test]
fn encounter_scenarios() {
    let catalog = MonsterCatalog::builtin().unwrap();
    let mut rng = RandomNumberGenerator::seeded(5);
    for _ in 0..1000 {
        assert!(catalog.select_template(1, &mut rng) <= 3);
    }
    assert_eq!(catalog.len(), 26);
    assert_eq!(catalog.select_template(50, &mut rng), 25);
}
