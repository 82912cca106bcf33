use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;
use rogueline::{
    Game, GameCommand,
    config::GameConfig,
    input::{ScriptedInput, command_for_key},
    render::{MAP_TOP, draw_debug, draw_entities, draw_log, draw_map, draw_status},
};
use tracing::{error, info};

struct RoguelineState {
    game: Game,
    script: Option<ScriptedInput>,
}

impl GameState for RoguelineState {
    fn tick(&mut self, ctx: &mut BTerm) {
        let command = self.next_command(ctx);
        if command != GameCommand::Nop {
            // messages stay on screen until the next real command
            self.game.log_mut().clear();
            self.game.handle_command(command);
        }
        if self.game.done {
            info!(moves = self.game.player.moves, "quitting");
            ctx.quit();
            return;
        }

        ctx.cls();
        self.draw_scene(ctx);
    }
}

impl RoguelineState {
    fn next_command(&mut self, ctx: &BTerm) -> GameCommand {
        if let Some(script) = self.script.as_mut() {
            return script.next_command().unwrap_or(GameCommand::Quit);
        }
        ctx.key.map(command_for_key).unwrap_or_default()
    }

    fn draw_scene(&self, ctx: &mut BTerm) {
        let origin = Point::new(0, MAP_TOP);
        draw_map(ctx, &self.game.map, origin);
        draw_log(ctx, self.game.log().entries());
        draw_status(ctx, &self.game.player);
        draw_entities(ctx, &self.game.roster, &self.game.player, origin);
        if self.game.debug {
            draw_debug(ctx, &self.game.player, &self.game.roster);
        }
    }
}

fn main() -> BError {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match GameConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "configuration rejected");
            return Err(err.into());
        }
    };

    let script = match config.script.as_ref().map(ScriptedInput::from_file).transpose() {
        Ok(script) => script,
        Err(err) => {
            error!(error = %err, "cannot read command script");
            return Err(err.into());
        }
    };

    let game = match Game::new(&config) {
        Ok(game) => game,
        Err(err) => {
            error!(error = %err, "startup aborted");
            return Err(err.into());
        }
    };

    let context = BTermBuilder::simple80x50()
        .with_title("Rogueline")
        .build()?;
    main_loop(context, RoguelineState { game, script })
}
