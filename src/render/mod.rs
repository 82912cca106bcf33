use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use crate::{
    actors::{Entity, Player, Roster},
    map::DungeonMap,
};

pub const LOG_ROWS: usize = 3;
pub const MAP_TOP: i32 = LOG_ROWS as i32;
pub const STATUS_ROW: i32 = 24;

pub fn draw_log(ctx: &mut BTerm, log: &[String]) {
    let start = log.len().saturating_sub(LOG_ROWS);
    for (row, entry) in log[start..].iter().enumerate() {
        ctx.print_color(0, row as i32, RGB::named(WHITE), RGB::named(BLACK), entry);
    }
}

pub fn draw_map(ctx: &mut BTerm, map: &DungeonMap, origin: Point) {
    for y in 0..map.height {
        for x in 0..map.width {
            if let Some(tile) = map.tile_at(Point::new(x, y)) {
                ctx.set(
                    origin.x + x,
                    origin.y + y,
                    tile.color(),
                    tile.background(),
                    to_cp437(tile.glyph()),
                );
            }
        }
    }
}

pub fn draw_entity<E: Entity + ?Sized>(ctx: &mut BTerm, entity: &E, origin: Point, color: RGB) {
    let point = entity.position();
    ctx.set(
        origin.x + point.x,
        origin.y + point.y,
        color,
        RGB::named(BLACK),
        to_cp437(entity.glyph()),
    );
}

pub fn draw_entities(ctx: &mut BTerm, roster: &Roster, player: &Player, origin: Point) {
    for monster in roster.iter() {
        draw_entity(ctx, monster, origin, RGB::named(RED));
    }
    draw_entity(ctx, player, origin, RGB::named(YELLOW));
}

pub fn draw_status(ctx: &mut BTerm, player: &Player) {
    ctx.print_color(
        0,
        STATUS_ROW,
        RGB::named(LIGHT_GREEN),
        RGB::named(BLACK),
        player.info_string(),
    );
}

/// Overlay listing the player and every live monster on the right edge.
pub fn draw_debug(ctx: &mut BTerm, player: &Player, roster: &Roster) {
    let (width, _) = ctx.get_char_size();
    let x = width as i32 - 28;
    let point = player.position();
    ctx.print_color(
        x,
        MAP_TOP,
        RGB::named(LIGHT_CYAN),
        RGB::named(BLACK),
        format!("player x={} y={}", point.x, point.y),
    );
    for (row, monster) in roster.iter().enumerate() {
        ctx.print_color(
            x,
            MAP_TOP + 1 + row as i32,
            RGB::named(GRAY),
            RGB::named(BLACK),
            monster.debug_string(),
        );
    }
}
