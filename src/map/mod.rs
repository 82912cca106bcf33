use bracket_geometry::prelude::{Point, Rect};
use bracket_terminal::prelude::{BLACK, RGB};
use tracing::{debug, trace};

use crate::{
    actors::{Entity, Monster, Player, Roster},
    data::{MonsterCatalog, Roller},
};

pub const DEFAULT_MAP_WIDTH: i32 = 80;
pub const DEFAULT_MAP_HEIGHT: i32 = 21;
/// Smallest map that still fits a walled room with a floor to stand on.
pub const MIN_MAP_WIDTH: i32 = 10;
pub const MIN_MAP_HEIGHT: i32 = 7;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TileKind {
    #[default]
    Wall,
    Floor,
    Corridor,
    DoorClosed,
    DoorOpen,
    StairsDown,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            TileKind::Floor | TileKind::Corridor | TileKind::DoorOpen | TileKind::StairsDown
        )
    }

    pub fn is_type(self, kind: TileKind) -> bool {
        self == kind
    }

    pub fn glyph(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::Corridor => ',',
            TileKind::DoorClosed => '+',
            TileKind::DoorOpen => '\'',
            TileKind::StairsDown => '>',
        }
    }

    pub fn color(self) -> RGB {
        match self {
            TileKind::Wall => RGB::from_u8(90, 90, 90),
            TileKind::Floor => RGB::from_u8(170, 170, 170),
            TileKind::Corridor => RGB::from_u8(120, 120, 120),
            TileKind::DoorClosed | TileKind::DoorOpen => RGB::from_u8(180, 120, 60),
            TileKind::StairsDown => RGB::from_u8(241, 241, 87),
        }
    }

    pub fn background(self) -> RGB {
        RGB::named(BLACK)
    }
}

/// Fixed-size grid of tiles, row-major.
#[derive(Clone, Debug)]
pub struct DungeonMap {
    pub width: i32,
    pub height: i32,
    tiles: Vec<TileKind>,
}

impl DungeonMap {
    pub fn new(width: i32, height: i32) -> Self {
        let size = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            tiles: vec![TileKind::Wall; size],
        }
    }

    /// Builds a map from rows of glyphs; unknown glyphs become walls.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as i32;
        let mut map = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let kind = match glyph {
                    '.' => TileKind::Floor,
                    ',' => TileKind::Corridor,
                    '+' => TileKind::DoorClosed,
                    '\'' => TileKind::DoorOpen,
                    '>' => TileKind::StairsDown,
                    _ => TileKind::Wall,
                };
                map.set_tile(Point::new(x as i32, y as i32), kind);
            }
        }
        map
    }

    fn idx(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some(point.y as usize * self.width as usize + point.x as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    pub fn tile_at(&self, point: Point) -> Option<TileKind> {
        self.idx(point).map(|idx| self.tiles[idx])
    }

    pub fn set_tile(&mut self, point: Point, kind: TileKind) {
        if let Some(idx) = self.idx(point) {
            self.tiles[idx] = kind;
        }
    }

    pub fn is_walkable(&self, point: Point) -> bool {
        self.tile_at(point).is_some_and(TileKind::is_walkable)
    }

    pub fn fill(&mut self, kind: TileKind) {
        self.tiles.iter_mut().for_each(|tile| *tile = kind);
    }

    pub fn walkable_points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let point = Point::new(x, y);
                if self.is_walkable(point) {
                    points.push(point);
                }
            }
        }
        points
    }
}

fn corridor_path(start: Point, end: Point) -> Vec<Point> {
    let mut path = Vec::new();
    let mut cursor = start;
    path.push(cursor);

    while cursor.x != end.x {
        cursor.x += if end.x > cursor.x { 1 } else { -1 };
        path.push(cursor);
    }

    while cursor.y != end.y {
        cursor.y += if end.y > cursor.y { 1 } else { -1 };
        path.push(cursor);
    }

    path
}

/// Room and corridor layout, before it is painted onto a map.
#[derive(Clone, Debug)]
pub struct Substrate {
    pub width: i32,
    pub height: i32,
    pub rooms: Vec<Rect>,
    pub corridors: Vec<Vec<Point>>,
    pub stairs_down: Option<Point>,
    pub spawn: Point,
}

impl Substrate {
    pub const MAX_ROOMS: usize = 12;
    const MIN_ROOM_W: i32 = 4;
    const MAX_ROOM_W: i32 = 14;
    const MIN_ROOM_H: i32 = 3;
    const MAX_ROOM_H: i32 = 7;

    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            rooms: Vec::new(),
            corridors: Vec::new(),
            stairs_down: None,
            spawn: Point::new(width / 2, height / 2),
        }
    }

    pub fn procedural<R: Roller + ?Sized>(width: i32, height: i32, rng: &mut R) -> Self {
        let mut substrate = Self::new(width, height);

        for _ in 0..Self::MAX_ROOMS * 4 {
            if substrate.rooms.len() >= Self::MAX_ROOMS {
                break;
            }
            let room_w = rng.range(Self::MIN_ROOM_W, Self::MAX_ROOM_W);
            let room_h = rng.range(Self::MIN_ROOM_H, Self::MAX_ROOM_H);
            let x_max = width - room_w - 1;
            let y_max = height - room_h - 1;
            if x_max <= 1 || y_max <= 1 {
                continue;
            }

            let candidate = Rect::with_size(rng.range(1, x_max), rng.range(1, y_max), room_w, room_h);
            // keep a wall ring between rooms so doors have somewhere to go
            let padded = Rect::with_size(
                candidate.x1 - 1,
                candidate.y1 - 1,
                room_w + 2,
                room_h + 2,
            );
            if substrate.rooms.iter().any(|room| room.intersect(&padded)) {
                continue;
            }

            let candidate_center = candidate.center();
            if let Some(prev_center) = substrate.rooms.last().map(|room| room.center()) {
                substrate
                    .corridors
                    .push(corridor_path(prev_center, candidate_center));
            } else {
                substrate.spawn = candidate_center;
            }

            substrate.rooms.push(candidate);
        }

        if substrate.rooms.is_empty() {
            return Self::single_room(width, height);
        }
        if substrate.rooms.len() > 1 {
            substrate.stairs_down = substrate.rooms.last().map(|room| room.center());
        }
        substrate
    }

    pub fn single_room(width: i32, height: i32) -> Self {
        let mut substrate = Self::new(width, height);
        let room = Rect::with_size(1, 1, (width - 2).max(1), (height - 2).max(1));
        substrate.spawn = room.center();
        substrate.rooms.push(room);
        substrate
    }

    fn in_room(&self, point: Point) -> bool {
        self.rooms.iter().any(|room| room.point_in_rect(point))
    }

    /// Paints rooms, corridors, doors and stairs onto `map`.
    pub fn paint(&self, map: &mut DungeonMap) {
        map.fill(TileKind::Wall);

        for room in &self.rooms {
            room.for_each(|pt| map.set_tile(pt, TileKind::Floor));
        }

        for corridor in &self.corridors {
            for &pt in corridor {
                if map.tile_at(pt) == Some(TileKind::Wall) {
                    map.set_tile(pt, TileKind::Corridor);
                }
            }
        }

        for corridor in &self.corridors {
            for &pt in corridor {
                if self.is_doorway(map, pt) {
                    map.set_tile(pt, TileKind::DoorClosed);
                }
            }
        }

        if let Some(stairs) = self.stairs_down {
            map.set_tile(stairs, TileKind::StairsDown);
        }
    }

    /// A corridor cell with room floor on one side and passage on the other.
    fn is_doorway(&self, map: &DungeonMap, pt: Point) -> bool {
        if map.tile_at(pt) != Some(TileKind::Corridor) {
            return false;
        }
        let axes = [
            (Point::new(pt.x - 1, pt.y), Point::new(pt.x + 1, pt.y)),
            (Point::new(pt.x, pt.y - 1), Point::new(pt.x, pt.y + 1)),
        ];
        axes.iter().any(|&(a, b)| {
            let outside = |p: Point| !self.in_room(p) && map.is_walkable(p);
            (self.in_room(a) && outside(b)) || (self.in_room(b) && outside(a))
        })
    }
}

/// Monsters placed on a fresh level.
pub fn monster_count(depth: i32) -> usize {
    (3 + depth.max(0) / 2).min(10) as usize
}

/// Lays out a new level, places the player in the first room and populates
/// the roster from the encounter table.
pub fn generate_level<R: Roller + ?Sized>(
    map: &mut DungeonMap,
    depth: i32,
    player: &mut Player,
    roster: &mut Roster,
    catalog: &MonsterCatalog,
    rng: &mut R,
) {
    let substrate = Substrate::procedural(map.width, map.height, rng);
    substrate.paint(map);
    roster.clear();
    player.depth = depth;
    player.set_position(substrate.spawn);

    let mut free: Vec<Point> = map
        .walkable_points()
        .into_iter()
        .filter(|&pt| pt != substrate.spawn && map.tile_at(pt) == Some(TileKind::Floor))
        .collect();

    for _ in 0..monster_count(depth) {
        if free.is_empty() {
            break;
        }
        let point = free.swap_remove(rng.range(0, free.len() as i32) as usize);
        let index = catalog.select_template(depth, rng);
        if let Some(monster) = Monster::spawn(catalog, index, point, rng) {
            trace!(name = %monster.name, x = point.x, y = point.y, "spawned monster");
            roster.add(monster, point);
        }
    }

    debug!(
        depth,
        rooms = substrate.rooms.len(),
        monsters = roster.len(),
        "generated level"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_random::prelude::RandomNumberGenerator;

    #[test]
    fn tile_predicates() {
        assert!(TileKind::Floor.is_walkable());
        assert!(TileKind::DoorOpen.is_walkable());
        assert!(!TileKind::DoorClosed.is_walkable());
        assert!(!TileKind::Wall.is_walkable());
        assert!(TileKind::DoorClosed.is_type(TileKind::DoorClosed));
        assert!(!TileKind::DoorOpen.is_type(TileKind::DoorClosed));
    }

    #[test]
    fn from_rows_and_bounds() {
        let map = DungeonMap::from_rows(&["#+#", "#.>"]);
        assert_eq!(map.width, 3);
        assert_eq!(map.height, 2);
        assert_eq!(map.tile_at(Point::new(1, 0)), Some(TileKind::DoorClosed));
        assert_eq!(map.tile_at(Point::new(2, 1)), Some(TileKind::StairsDown));
        assert_eq!(map.tile_at(Point::new(3, 0)), None);
        assert_eq!(map.tile_at(Point::new(0, -1)), None);
        assert!(map.is_walkable(Point::new(1, 1)));
    }

    #[test]
    fn degenerate_sizes_hold_no_tiles() {
        let map = DungeonMap::new(0, 7);
        assert!(map.walkable_points().is_empty());
        assert_eq!(map.tile_at(Point::new(0, 0)), None);
        assert_eq!(DungeonMap::new(-3, 5).tile_at(Point::new(0, 0)), None);
    }

    #[test]
    fn smallest_allowed_map_still_hosts_the_player() {
        let catalog = MonsterCatalog::builtin().unwrap();
        for seed in 0..20 {
            let mut rng = RandomNumberGenerator::seeded(seed);
            let mut map = DungeonMap::new(MIN_MAP_WIDTH, MIN_MAP_HEIGHT);
            let mut player = Player::default();
            let mut roster = Roster::new();
            generate_level(&mut map, 1, &mut player, &mut roster, &catalog, &mut rng);
            assert!(map.is_walkable(player.position()));
        }
    }

    #[test]
    fn generated_level_is_populated() {
        let catalog = MonsterCatalog::builtin().unwrap();
        for seed in 0..20 {
            let mut rng = RandomNumberGenerator::seeded(seed);
            let mut map = DungeonMap::new(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT);
            let mut player = Player::default();
            let mut roster = Roster::new();
            generate_level(&mut map, 3, &mut player, &mut roster, &catalog, &mut rng);

            assert_eq!(player.depth, 3);
            assert!(map.is_walkable(player.position()));
            assert!(!roster.is_empty());
            for monster in roster.iter() {
                assert_ne!(monster.position(), player.position());
                assert!(map.is_walkable(monster.position()));
            }
        }
    }

    #[test]
    fn doors_sit_between_rooms_and_corridors() {
        let mut substrate = Substrate::new(20, 7);
        substrate.rooms = vec![Rect::with_size(1, 1, 4, 3), Rect::with_size(12, 1, 4, 3)];
        substrate.corridors = vec![corridor_path(Point::new(3, 2), Point::new(14, 2))];
        let mut map = DungeonMap::new(20, 7);
        substrate.paint(&mut map);

        assert_eq!(map.tile_at(Point::new(5, 2)), Some(TileKind::DoorClosed));
        assert_eq!(map.tile_at(Point::new(11, 2)), Some(TileKind::DoorClosed));
        assert_eq!(map.tile_at(Point::new(8, 2)), Some(TileKind::Corridor));
    }
}
