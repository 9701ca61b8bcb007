//! Cross-platform mouse and keyboard input using enigo
//!
//! enigo handles are not shareable across threads on every platform, so the
//! handle lives on a dedicated worker thread and requests are sent to it.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use std::str::FromStr;
use std::sync::mpsc;
use std::thread;
use tokio::sync::oneshot;

use super::{KeyboardActionProvider, MouseActionProvider};
use crate::geometry::Point;

enum Command {
    MoveTo(i32, i32),
    Location,
    Button(MouseButton, Direction),
    Scroll(i32, i32),
    Text(String),
    Key(KeyCode, Direction),
}

enum Outcome {
    Done,
    Position(i32, i32),
}

type Request = (Command, oneshot::Sender<Result<Outcome>>);

/// Owns the enigo handle on the worker thread
struct InputController {
    enigo: Enigo,
}

impl InputController {
    fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow!("Failed to create input controller: {:?}", e))?;
        Ok(Self { enigo })
    }

    fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::MoveTo(x, y) => self
                .enigo
                .move_mouse(x, y, Coordinate::Abs)
                .map_err(|e| anyhow!("Failed to move mouse: {:?}", e))?,
            Command::Location => {
                let (x, y) = self
                    .enigo
                    .location()
                    .map_err(|e| anyhow!("Failed to query mouse position: {:?}", e))?;
                return Ok(Outcome::Position(x, y));
            }
            Command::Button(button, direction) => self
                .enigo
                .button(button.to_enigo(), direction)
                .map_err(|e| anyhow!("Failed to use mouse button {:?}: {:?}", button, e))?,
            Command::Scroll(dx, dy) => {
                if dx != 0 {
                    self.enigo
                        .scroll(dx, Axis::Horizontal)
                        .map_err(|e| anyhow!("Failed to scroll horizontal: {:?}", e))?;
                }
                if dy != 0 {
                    self.enigo
                        .scroll(dy, Axis::Vertical)
                        .map_err(|e| anyhow!("Failed to scroll vertical: {:?}", e))?;
                }
            }
            Command::Text(text) => self
                .enigo
                .text(&text)
                .map_err(|e| anyhow!("Failed to type text: {:?}", e))?,
            Command::Key(key, direction) => self
                .enigo
                .key(key.to_enigo(), direction)
                .map_err(|e| anyhow!("Failed to use key {:?}: {:?}", key, e))?,
        }
        Ok(Outcome::Done)
    }
}

/// Native input backed by enigo
pub struct EnigoInput {
    requests: mpsc::Sender<Request>,
}

impl EnigoInput {
    /// Start the input worker thread
    pub fn spawn() -> Result<Self> {
        let (tx, rx) = mpsc::channel::<Request>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();

        thread::Builder::new()
            .name("deskpilot-input".to_string())
            .spawn(move || {
                let mut controller = match InputController::new() {
                    Ok(controller) => {
                        let _ = ready_tx.send(Ok(()));
                        controller
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                // Ends once every sender is dropped
                for (command, reply) in rx {
                    let _ = reply.send(controller.apply(command));
                }
                tracing::debug!("Input worker stopped");
            })?;

        ready_rx
            .recv()
            .map_err(|_| anyhow!("Input worker exited during startup"))??;
        tracing::info!("Input worker started");

        Ok(Self { requests: tx })
    }

    async fn send(&self, command: Command) -> Result<Outcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.requests
            .send((command, reply_tx))
            .map_err(|_| anyhow!("Input worker has stopped"))?;
        reply_rx
            .await
            .map_err(|_| anyhow!("Input worker dropped the request"))?
    }

    async fn run(&self, command: Command) -> Result<()> {
        self.send(command).await.map(|_| ())
    }
}

#[async_trait]
impl MouseActionProvider for EnigoInput {
    async fn set_mouse_position(&self, position: Point) -> Result<()> {
        self.run(Command::MoveTo(
            position.x.round() as i32,
            position.y.round() as i32,
        ))
        .await
    }

    async fn current_mouse_position(&self) -> Result<Point> {
        match self.send(Command::Location).await? {
            Outcome::Position(x, y) => Ok(Point::new(x as f64, y as f64)),
            Outcome::Done => Err(anyhow!("Input worker returned no position")),
        }
    }

    async fn press_button(&self, button: MouseButton) -> Result<()> {
        self.run(Command::Button(button, Direction::Press)).await
    }

    async fn release_button(&self, button: MouseButton) -> Result<()> {
        self.run(Command::Button(button, Direction::Release)).await
    }

    async fn click(&self, button: MouseButton) -> Result<()> {
        self.run(Command::Button(button, Direction::Click)).await
    }

    async fn scroll(&self, dx: i32, dy: i32) -> Result<()> {
        self.run(Command::Scroll(dx, dy)).await
    }
}

#[async_trait]
impl KeyboardActionProvider for EnigoInput {
    async fn type_text(&self, text: &str) -> Result<()> {
        self.run(Command::Text(text.to_string())).await
    }

    async fn press_key(&self, key: KeyCode) -> Result<()> {
        self.run(Command::Key(key, Direction::Press)).await
    }

    async fn release_key(&self, key: KeyCode) -> Result<()> {
        self.run(Command::Key(key, Direction::Release)).await
    }
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn to_enigo(self) -> Button {
        match self {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
            MouseButton::Middle => Button::Middle,
        }
    }
}

/// Keys that can be pressed and released individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// Any printable character, e.g. `Char('a')` or `Char('7')`
    Char(char),

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    Control, Alt, Shift, Meta,

    Up, Down, Left, Right,
    Home, End, PageUp, PageDown,

    Backspace, Delete, Enter, Tab, Escape, Space,
}

impl KeyCode {
    fn to_enigo(self) -> Key {
        match self {
            KeyCode::Char(c) => Key::Unicode(c),
            KeyCode::F1 => Key::F1,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4,
            KeyCode::F5 => Key::F5,
            KeyCode::F6 => Key::F6,
            KeyCode::F7 => Key::F7,
            KeyCode::F8 => Key::F8,
            KeyCode::F9 => Key::F9,
            KeyCode::F10 => Key::F10,
            KeyCode::F11 => Key::F11,
            KeyCode::F12 => Key::F12,
            KeyCode::Control => Key::Control,
            KeyCode::Alt => Key::Alt,
            KeyCode::Shift => Key::Shift,
            KeyCode::Meta => Key::Meta,
            KeyCode::Up => Key::UpArrow,
            KeyCode::Down => Key::DownArrow,
            KeyCode::Left => Key::LeftArrow,
            KeyCode::Right => Key::RightArrow,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Enter => Key::Return,
            KeyCode::Tab => Key::Tab,
            KeyCode::Escape => Key::Escape,
            KeyCode::Space => Key::Space,
        }
    }
}

impl FromStr for KeyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeyCode::Char(c));
        }

        let key = match lower.as_str() {
            "f1" => KeyCode::F1,
            "f2" => KeyCode::F2,
            "f3" => KeyCode::F3,
            "f4" => KeyCode::F4,
            "f5" => KeyCode::F5,
            "f6" => KeyCode::F6,
            "f7" => KeyCode::F7,
            "f8" => KeyCode::F8,
            "f9" => KeyCode::F9,
            "f10" => KeyCode::F10,
            "f11" => KeyCode::F11,
            "f12" => KeyCode::F12,
            "ctrl" | "control" => KeyCode::Control,
            "alt" | "option" => KeyCode::Alt,
            "shift" => KeyCode::Shift,
            "meta" | "win" | "cmd" | "command" => KeyCode::Meta,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "backspace" | "bs" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "escape" | "esc" => KeyCode::Escape,
            "space" => KeyCode::Space,
            _ => return Err(anyhow!("Unknown key: {}", s)),
        };
        Ok(key)
    }
}
