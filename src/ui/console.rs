//! Line-oriented terminal front-end.

use crate::combat::BattleEvent;
use crate::core::events::{GameEvent, GameOutcome};
use crate::dungeon::DungeonEvent;
use crate::input::{InputProvider, Menu};
use crate::shop::ShopEvent;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, BufRead, Stdout, Write};

/// Colour used to narrate an event.
pub fn event_color(event: &GameEvent) -> Color {
    match event {
        GameEvent::Battle(event) => match event {
            BattleEvent::Started { .. } => Color::Magenta,
            BattleEvent::EnemyAttacked { .. }
            | BattleEvent::AbilityTriggered { .. }
            | BattleEvent::StatusDamage { .. }
            | BattleEvent::PetFell { .. } => Color::Red,
            BattleEvent::EnemyDefeated { gold: Some(_), .. } => Color::Yellow,
            BattleEvent::ItemUsed { .. } | BattleEvent::EffectWornOff { .. } => Color::Cyan,
            BattleEvent::Ended(_) => Color::Magenta,
            _ => Color::White,
        },
        GameEvent::Dungeon(event) => match event {
            DungeonEvent::EnteredRoom { .. } => Color::Blue,
            DungeonEvent::GoldFound { .. }
            | DungeonEvent::TreasureGold { .. }
            | DungeonEvent::PuzzleSolved { .. } => Color::Yellow,
            DungeonEvent::TrapSpotted { .. }
            | DungeonEvent::TrapSprung { .. }
            | DungeonEvent::TreasureDeath => Color::Red,
            DungeonEvent::ItemFound { .. }
            | DungeonEvent::TreasureItem { .. }
            | DungeonEvent::BuffGained { .. } => Color::Cyan,
            DungeonEvent::ExitReached => Color::Green,
            _ => Color::White,
        },
        GameEvent::Shop(ShopEvent::NotEnoughGold { .. }) => Color::DarkYellow,
        GameEvent::Shop(_) => Color::Magenta,
        GameEvent::InvalidChoice { .. } | GameEvent::SaveFailed { .. } => Color::DarkRed,
        GameEvent::PetBuried { .. } => Color::DarkGrey,
        GameEvent::Panel { .. } => Color::White,
        GameEvent::Saved => Color::DarkGrey,
        GameEvent::RunEnded(GameOutcome::Escaped) => Color::Green,
        GameEvent::RunEnded(GameOutcome::Died) => Color::Red,
    }
}

/// Reads answers line by line and prints coloured narration.
///
/// At end of input every menu gets its default key and every question an
/// empty answer, so a closed stdin always runs the game to an end.
pub struct Console<R, W> {
    reader: R,
    out: W,
    closed: bool,
}

impl Console<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self {
            reader,
            out,
            closed: false,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn say(&mut self, color: Color, text: &str) {
        if let Err(e) = self.write_colored(color, text) {
            log::debug!("console write failed: {}", e);
        }
    }

    fn write_colored(&mut self, color: Color, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(color),
            Print(text),
            ResetColor,
            Print("\n")
        )?;
        self.out.flush()
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if self.closed {
            return None;
        }
        let _ = write!(self.out, "{}", prompt).and_then(|_| self.out.flush());
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.closed = true;
                let _ = writeln!(self.out);
                None
            }
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead, W: Write> InputProvider for Console<R, W> {
    fn choose(&mut self, menu: &Menu) -> String {
        self.say(Color::Green, &format!("\n{}", menu.title));
        for option in &menu.options {
            self.say(Color::White, &format!("[{}] {}", option.key, option.label));
        }
        self.read_line("> ")
            .unwrap_or_else(|| menu.default_key.clone())
    }

    fn answer(&mut self, question: &str) -> String {
        self.say(Color::Green, &format!("\n{}", question));
        self.read_line("Your answer: ").unwrap_or_default()
    }

    fn notify(&mut self, event: &GameEvent) {
        self.say(event_color(event), &event.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn menu() -> Menu {
        Menu::new("Pick one")
            .option("1", "First")
            .option("2", "Second")
            .with_default("1")
    }

    #[test]
    fn test_choose_reads_trimmed_line() {
        let mut console = console("  2 \n");
        assert_eq!(console.choose(&menu()), "2");
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Pick one"));
        assert!(out.contains("[2] Second"));
    }

    #[test]
    fn test_end_of_input_uses_defaults() {
        let mut console = console("");
        assert_eq!(console.choose(&menu()), "1");
        assert_eq!(console.answer("Riddle?"), "");
        assert_eq!(console.choose(&menu()), "1");
    }

    #[test]
    fn test_notify_prints_event_text() {
        let mut console = console("");
        console.notify(&GameEvent::Saved);
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Game saved."));
    }

    #[test]
    fn test_event_colors() {
        assert_eq!(
            event_color(&GameEvent::RunEnded(GameOutcome::Died)),
            Color::Red
        );
        assert_eq!(
            event_color(&GameEvent::Dungeon(DungeonEvent::GoldFound { amount: 5 })),
            Color::Yellow
        );
    }
}
