//! Window-control relay from the shell to the host windowing layer.
//!
//! Only the allowlisted actions cross the boundary. The relay is a side
//! channel: it must never touch note state.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Allowlisted window actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowControl {
    Close,
    Minimize,
    /// Toggles between maximized and restored.
    Maximize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowControlError {
    UnknownAction(String),
}

impl Display for WindowControlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAction(action) => write!(
                f,
                "unknown window action `{action}`; expected close|minimize|maximize"
            ),
        }
    }
}

impl Error for WindowControlError {}

impl WindowControl {
    pub fn parse(action: &str) -> Result<Self, WindowControlError> {
        match action.trim().to_ascii_lowercase().as_str() {
            "close" => Ok(Self::Close),
            "minimize" => Ok(Self::Minimize),
            "maximize" => Ok(Self::Maximize),
            other => Err(WindowControlError::UnknownAction(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
        }
    }
}

/// Host windowing capability driven by the relay.
pub trait WindowHost {
    fn close(&mut self);
    fn minimize(&mut self);
    fn maximize(&mut self);
    fn unmaximize(&mut self);
    fn is_maximized(&self) -> bool;
}

/// Parses `action` and applies it to `host`.
pub fn relay(host: &mut dyn WindowHost, action: &str) -> Result<WindowControl, WindowControlError> {
    let control = WindowControl::parse(action)?;
    match control {
        WindowControl::Close => host.close(),
        WindowControl::Minimize => host.minimize(),
        WindowControl::Maximize if host.is_maximized() => host.unmaximize(),
        WindowControl::Maximize => host.maximize(),
    }
    Ok(control)
}
