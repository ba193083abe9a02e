//! Player decisions.
//!
//! Every suspension point in the game is a call on an [`InputProvider`]: the
//! console asks a human, [`ScriptedInput`] replays a fixed list of answers.

use crate::core::events::GameEvent;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub key: String,
    pub label: String,
}

/// A prompt with its valid keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: String,
    pub options: Vec<MenuOption>,
    /// Answer used when no more input is available.
    pub default_key: String,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            options: Vec::new(),
            default_key: String::new(),
        }
    }

    pub fn option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(MenuOption {
            key: key.into(),
            label: label.into(),
        });
        self
    }

    pub fn with_default(mut self, key: impl Into<String>) -> Self {
        self.default_key = key.into();
        self
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.options.iter().any(|o| o.key == key)
    }

    /// Yes/no confirmation, defaulting to no.
    pub fn confirm(title: impl Into<String>) -> Self {
        Self::new(title)
            .option("y", "Yes")
            .option("n", "No")
            .with_default("n")
    }
}

pub trait InputProvider {
    /// Returns the raw key picked from `menu`. It may be invalid.
    fn choose(&mut self, menu: &Menu) -> String;

    /// Returns a free-text answer to `question`.
    fn answer(&mut self, question: &str) -> String;

    /// Presents narration. Silent by default.
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Asks until the answer is one of the menu's keys, then returns that key.
///
/// The menu's default key must be one of its options.
pub fn choose_valid(input: &mut impl InputProvider, menu: &Menu) -> String {
    debug_assert!(menu.has_key(&menu.default_key), "menu default must be valid");
    loop {
        let raw = input.choose(menu);
        let key = raw.trim();
        if menu.has_key(key) {
            return key.to_string();
        }
        input.notify(&GameEvent::InvalidChoice {
            input: key.to_string(),
        });
    }
}

/// Parses a 1-based menu number into a 0-based index below `len`.
pub fn parse_index(raw: &str, len: usize) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

/// Replays queued answers, falling back to each menu's default when empty.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    choices: VecDeque<String>,
    answers: VecDeque<String>,
    /// Every event the game emitted, in order.
    pub events: Vec<GameEvent>,
    /// Titles of the menus presented, in order.
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers = answers.into_iter().map(Into::into).collect();
        self
    }

    /// Queued menu choices not yet consumed.
    pub fn remaining(&self) -> usize {
        self.choices.len()
    }
}

impl InputProvider for ScriptedInput {
    fn choose(&mut self, menu: &Menu) -> String {
        self.prompts.push(menu.title.clone());
        self.choices
            .pop_front()
            .unwrap_or_else(|| menu.default_key.clone())
    }

    fn answer(&mut self, question: &str) -> String {
        self.prompts.push(question.to_string());
        self.answers.pop_front().unwrap_or_default()
    }

    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
