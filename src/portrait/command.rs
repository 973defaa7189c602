//! `AnimFace` script commands.
//!
//! ```text
//! AnimFace Delay <min> <max>     pause bounds in ticks
//! AnimFace Set <idle> <speak>    frame counts per phase
//! ```
//!
//! Keywords are case-insensitive. `Set` arguments that are not positive
//! integers leave that phase unchanged.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimFaceCommand {
    Delay { min: u32, max: u32 },
    SetFrames { idle: Option<i64>, speak: Option<i64> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("missing AnimFace subcommand")]
    MissingSubcommand,

    #[error("unknown AnimFace subcommand: {0}")]
    UnknownSubcommand(String),

    #[error("invalid argument for AnimFace {subcommand}: {value:?}")]
    InvalidArgument {
        subcommand: &'static str,
        value: String,
    },
}

impl AnimFaceCommand {
    /// Parse one command line. Lines addressed to other plugins yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some(word) if word.eq_ignore_ascii_case("animface") => {}
            _ => return Ok(None),
        }
        let sub = parts.next().ok_or(CommandError::MissingSubcommand)?;
        let args: Vec<&str> = parts.collect();

        if sub.eq_ignore_ascii_case("delay") {
            let min = parse_ticks(args.first().copied())?;
            let max = parse_ticks(args.get(1).copied())?;
            Ok(Some(Self::Delay { min, max }))
        } else if sub.eq_ignore_ascii_case("set") {
            let idle = args.first().and_then(|a| a.parse::<i64>().ok());
            let speak = args.get(1).and_then(|a| a.parse::<i64>().ok());
            Ok(Some(Self::SetFrames { idle, speak }))
        } else {
            Err(CommandError::UnknownSubcommand(sub.to_string()))
        }
    }
}

fn parse_ticks(arg: Option<&str>) -> Result<u32, CommandError> {
    let value = arg.unwrap_or_default();
    value.parse::<u32>().map_err(|_| CommandError::InvalidArgument {
        subcommand: "Delay",
        value: value.to_string(),
    })
}
