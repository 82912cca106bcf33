use bracket_terminal::prelude::VirtualKeyCode;
use std::{fs, io, path::Path};
use tracing::warn;

use crate::game::GameCommand;

pub fn command_for_key(key: VirtualKeyCode) -> GameCommand {
    match key {
        VirtualKeyCode::Left | VirtualKeyCode::A | VirtualKeyCode::H => GameCommand::Left,
        VirtualKeyCode::Right | VirtualKeyCode::D | VirtualKeyCode::L => GameCommand::Right,
        VirtualKeyCode::Up | VirtualKeyCode::W | VirtualKeyCode::K => GameCommand::Up,
        VirtualKeyCode::Down | VirtualKeyCode::S | VirtualKeyCode::J => GameCommand::Down,
        VirtualKeyCode::Tab | VirtualKeyCode::Grave | VirtualKeyCode::F1 => GameCommand::Debug,
        VirtualKeyCode::Q | VirtualKeyCode::Escape => GameCommand::Quit,
        _ => GameCommand::Nop,
    }
}

pub fn command_for_char(c: char) -> Option<GameCommand> {
    match c {
        'h' | 'H' | 'a' | 'A' => Some(GameCommand::Left),
        'l' | 'L' | 'd' | 'D' => Some(GameCommand::Right),
        'k' | 'K' | 'w' | 'W' => Some(GameCommand::Up),
        'j' | 'J' | 's' | 'S' => Some(GameCommand::Down),
        '~' | '`' | '\t' => Some(GameCommand::Debug),
        'q' | 'Q' | '\x1B' => Some(GameCommand::Quit),
        '.' => Some(GameCommand::Nop), // wait
        _ => None,
    }
}

/// Commands replayed from a text script, one character per command.
pub struct ScriptedInput {
    script_commands: Vec<GameCommand>,
    current_command_index: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    pub fn parse(script: &str) -> Self {
        let mut script_commands = Vec::new();

        for line in script.lines() {
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            for char_code in trimmed_line.chars().filter(|c| !c.is_whitespace()) {
                match command_for_char(char_code) {
                    Some(command) => script_commands.push(command),
                    None => warn!(key = ?char_code, "unknown key in script"),
                }
            }
        }

        Self {
            script_commands,
            current_command_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.script_commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script_commands.is_empty()
    }

    pub fn next_command(&mut self) -> Option<GameCommand> {
        let command = self.script_commands.get(self.current_command_index).copied()?;
        self.current_command_index += 1;
        Some(command)
    }
}
