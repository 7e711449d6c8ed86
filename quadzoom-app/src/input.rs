//! Key bindings and the blocking command source.
//!
//! Keys arrive as text lines: a line holding a key name (`up`, `down`,
//! `esc`, ...) is that key, anything else is read one character per key, so
//! `wsso` zooms three times and backs out once.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tracing::debug;

use quadzoom_core::{parse_iteration_cap, Command, Quadrant};

use crate::error::AppError;

/// A physical key, as far as the bindings care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Key {
    Char(char),
    Up,
    Down,
    Escape,
}

/// What a key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Binding {
    Command(Command),
    /// Ask for a new iteration cap.
    PromptCap,
    Unbound,
}

/// Default bindings, laid out on the AZERTY letter block.
pub(crate) fn binding(key: Key) -> Binding {
    match key {
        Key::Up => Binding::Command(Command::IncrementCap),
        Key::Down => Binding::Command(Command::DecrementCap),
        Key::Escape => Binding::Command(Command::Quit),
        Key::Char(c) => match c.to_ascii_lowercase() {
            'a' => Binding::Command(Command::Zoom(Quadrant::BottomLeft)),
            'z' => Binding::Command(Command::Zoom(Quadrant::BottomCenter)),
            'e' => Binding::Command(Command::Zoom(Quadrant::BottomRight)),
            'q' => Binding::Command(Command::Zoom(Quadrant::MidLeft)),
            's' => Binding::Command(Command::Zoom(Quadrant::Center)),
            'd' => Binding::Command(Command::Zoom(Quadrant::MidRight)),
            'w' => Binding::Command(Command::Zoom(Quadrant::TopLeft)),
            'x' => Binding::Command(Command::Zoom(Quadrant::TopCenter)),
            'c' => Binding::Command(Command::Zoom(Quadrant::TopRight)),
            'o' => Binding::Command(Command::ZoomOut),
            'i' => Binding::PromptCap,
            '+' => Binding::Command(Command::IncrementCap),
            '-' => Binding::Command(Command::DecrementCap),
            'm' => Binding::Command(Command::SaveFrame),
            _ => Binding::Unbound,
        },
    }
}

fn named_key(token: &str) -> Option<Key> {
    match token.to_ascii_lowercase().as_str() {
        "up" => Some(Key::Up),
        "down" => Some(Key::Down),
        "esc" | "escape" | "quit" | "exit" => Some(Key::Escape),
        _ => None,
    }
}

/// Anything that can block until the next navigation command.
pub(crate) trait CommandSource {
    fn next_command(&mut self) -> Result<Command, AppError>;
}

/// Reads keys from line-oriented text input, typically stdin.
///
/// End of input is treated like closing the window: a quit.
pub(crate) struct KeyboardSource<R, W> {
    reader: R,
    prompt: W,
    pending: VecDeque<char>,
}

impl<R: BufRead, W: Write> KeyboardSource<R, W> {
    pub(crate) fn new(reader: R, prompt: W) -> Self {
        Self {
            reader,
            prompt,
            pending: VecDeque::new(),
        }
    }

    /// Next key, reading more input when the current line is used up.
    fn next_key(&mut self) -> Result<Option<Key>, AppError> {
        loop {
            if let Some(c) = self.pending.pop_front() {
                return Ok(Some(Key::Char(c)));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let token = line.trim();
            if let Some(key) = named_key(token) {
                return Ok(Some(key));
            }
            self.pending
                .extend(token.chars().filter(|c| !c.is_whitespace()));
        }
    }

    /// Text of a typed iteration cap: the rest of the current line, or the
    /// next line after a prompt.
    fn read_cap_text(&mut self) -> Result<String, AppError> {
        if !self.pending.is_empty() {
            return Ok(self.pending.drain(..).collect());
        }
        write!(self.prompt, "Iterations ? ")?;
        self.prompt.flush()?;
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line)
    }
}

impl<R: BufRead, W: Write> CommandSource for KeyboardSource<R, W> {
    fn next_command(&mut self) -> Result<Command, AppError> {
        loop {
            let Some(key) = self.next_key()? else {
                debug!("End of input");
                return Ok(Command::Quit);
            };
            match binding(key) {
                Binding::Command(command) => return Ok(command),
                Binding::PromptCap => {
                    let text = self.read_cap_text()?;
                    return Ok(Command::SetIterationCap(parse_iteration_cap(&text)));
                }
                Binding::Unbound => debug!(?key, "Ignoring unbound key"),
            }
        }
    }
}
