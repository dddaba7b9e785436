//! Session scripts: a whitespace- or comma-separated list of actions.
//!
//! ```text
//! record start:1 run:2 record run:4 wander
//! ```

use std::str::FromStr;

use lp_engine::{Assist, Degree, Duration};

/// One step of a scripted session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Record,
    Wander,
    Revoke,
    /// Start a layer on this degree
    Start(Degree),
    /// Stop the n-th live handle, oldest first
    Stop(usize),
    /// Advance musical time
    Run(Duration),
    Bpm(u16),
    Assist(Assist),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("action '{0}' needs an argument")]
    MissingArgument(String),
    #[error("bad argument '{arg}' for '{action}'")]
    BadArgument { action: String, arg: String },
}

impl FromStr for Action {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        let bad = || ScriptError::BadArgument {
            action: name.to_string(),
            arg: arg.unwrap_or_default().to_string(),
        };
        let need = || arg.ok_or_else(|| ScriptError::MissingArgument(name.to_string()));

        match name {
            "record" => Ok(Action::Record),
            "wander" => Ok(Action::Wander),
            "revoke" => Ok(Action::Revoke),
            "start" => need()?.parse().map(|d| Action::Start(Degree(d))).map_err(|_| bad()),
            "stop" => need()?.parse().map(Action::Stop).map_err(|_| bad()),
            "run" => parse_duration(need()?).map(Action::Run).ok_or_else(bad),
            "bpm" => need()?.parse().map(Action::Bpm).map_err(|_| bad()),
            "assist" => need()?.parse().map(Action::Assist).map_err(|_| bad()),
            _ => Err(ScriptError::UnknownAction(s.to_string())),
        }
    }
}

/// `<bars>` or `<bars>.<subdivisions>`.
fn parse_duration(s: &str) -> Option<Duration> {
    let (bars, subdivisions) = match s.split_once('.') {
        Some((bars, subs)) => (bars.parse().ok()?, subs.parse().ok()?),
        None => (s.parse().ok()?, 0),
    };
    Some(Duration { bars, subdivisions })
}

/// Parse a whole script.
pub fn parse_script(script: &str) -> Result<Vec<Action>, ScriptError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}
