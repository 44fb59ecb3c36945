//! Console command parsing

use std::str::FromStr;

use crate::state::settings::parse_lenient;

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start,
    Pause,
    Reset,
    Work(u32),
    Break(u32),
    Intervals(u32),
    Status,
    Json,
    Settings,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("empty command".to_string());
        };
        let argument = words.next();

        let numeric = |name: &str| -> Result<u32, String> {
            argument
                .map(parse_lenient)
                .ok_or_else(|| format!("usage: {} <number>", name))
        };

        match verb.to_lowercase().as_str() {
            "start" | "resume" | "s" => Ok(ConsoleCommand::Start),
            "pause" | "p" => Ok(ConsoleCommand::Pause),
            "reset" | "r" => Ok(ConsoleCommand::Reset),
            "work" => numeric("work").map(ConsoleCommand::Work),
            "break" => numeric("break").map(ConsoleCommand::Break),
            "intervals" => numeric("intervals").map(ConsoleCommand::Intervals),
            "status" => Ok(ConsoleCommand::Status),
            "json" => Ok(ConsoleCommand::Json),
            "settings" => Ok(ConsoleCommand::Settings),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "q" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(format!("unknown command '{}', type 'help' for a list", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!("start".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Start));
        assert_eq!("Resume".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Start));
        assert_eq!(" p ".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Pause));
        assert_eq!("r".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Reset));
        assert_eq!("exit".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Quit));
        assert_eq!("?".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Help));
    }

    #[test]
    fn numeric_arguments_are_lenient() {
        assert_eq!("work 25".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Work(25)));
        assert_eq!("break 10m".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Break(10)));
        assert_eq!("intervals lots".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Intervals(1)));
        assert_eq!("work 0".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Work(1)));
    }

    #[test]
    fn missing_argument_is_an_error() {
        let err = "work".parse::<ConsoleCommand>().unwrap_err();
        assert_eq!(err, "usage: work <number>");
    }

    #[test]
    fn unknown_and_empty_lines_are_errors() {
        assert!("dance".parse::<ConsoleCommand>().is_err());
        assert!("   ".parse::<ConsoleCommand>().is_err());
    }
}
