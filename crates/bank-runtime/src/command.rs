//! Operator commands
//!
//! One command per line, slash-prefixed:
//! `/add <name>`, `/deposit <name> <amount>`, `/withdraw <name> <amount>`,
//! `/start [MM:SS] [rate]`, `/stop`, `/end`, `/save`, `/show`, `/timer`,
//! `/help`, `/quit`. Group names may contain spaces; the amount is always
//! the last word.

use bank_core::{Amount, BankError, InflationRate};
use thiserror::Error;

/// A parsed operator command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperatorCommand {
    AddGroup(String),
    Deposit { group: String, amount: Amount },
    Withdraw { group: String, amount: Amount },
    /// Duration is kept as text; the controller validates it
    StartTimer {
        duration: Option<String>,
        rate: Option<InflationRate>,
    },
    StopTimer,
    EndTimer,
    Save,
    Show,
    Timer,
    Help,
    Quit,
}

/// Why a line did not parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type /help for available commands)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Invalid(#[from] BankError),
}

impl OperatorCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match cmd {
            "/add" | "/a" => {
                if arg.is_empty() {
                    return Err(CommandError::Usage("/add <group name>"));
                }
                Ok(OperatorCommand::AddGroup(arg.to_string()))
            }
            "/deposit" | "/d" => {
                let (group, amount) = group_and_amount(arg, "/deposit <group name> <amount>")?;
                Ok(OperatorCommand::Deposit { group, amount })
            }
            "/withdraw" | "/w" => {
                let (group, amount) = group_and_amount(arg, "/withdraw <group name> <amount>")?;
                Ok(OperatorCommand::Withdraw { group, amount })
            }
            "/start" => {
                let mut duration = None;
                let mut rate = None;
                for word in arg.split_whitespace() {
                    if word.contains(':') && duration.is_none() {
                        duration = Some(word.to_string());
                    } else if rate.is_none() {
                        rate = Some(word.parse::<InflationRate>()?);
                    } else {
                        return Err(CommandError::Usage("/start [MM:SS] [rate]"));
                    }
                }
                Ok(OperatorCommand::StartTimer { duration, rate })
            }
            "/stop" => Ok(OperatorCommand::StopTimer),
            "/end" => Ok(OperatorCommand::EndTimer),
            "/save" => Ok(OperatorCommand::Save),
            "/show" | "/s" => Ok(OperatorCommand::Show),
            "/timer" | "/t" => Ok(OperatorCommand::Timer),
            "/help" | "/h" => Ok(OperatorCommand::Help),
            "/quit" | "/exit" | "/q" => Ok(OperatorCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn group_and_amount(arg: &str, usage: &'static str) -> Result<(String, Amount), CommandError> {
    let (group, amount) = arg
        .rsplit_once(char::is_whitespace)
        .ok_or(CommandError::Usage(usage))?;
    let group = group.trim();
    if group.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok((group.to_string(), amount.parse::<Amount>()?))
}
