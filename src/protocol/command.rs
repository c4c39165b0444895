use std::fmt;

/// Valid command names mapped to the number of arguments they require.
const VALID_COMMANDS: [(&str, usize); 10] = [
    ("help", 0),         // help
    ("login", 2),        // login {username} {password}
    ("register", 2),     // register {username} {password}
    ("list-topics", 0),  // list-topics
    ("create-topic", 1), // create-topic {topicName}
    ("join", 1),         // join {topicName}
    ("leave", 1),        // leave {topicName}
    ("say", 2),          // say {topicName} {messageContent}
    ("mp", 2),           // mp {username} {messageContent}
    ("logout", 0),       // logout
];

/// Number of arguments required by `name`, or `None` for unknown commands.
pub fn required_args(name: &str) -> Option<usize> {
    VALID_COMMANDS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, count)| *count)
}

/// One line of client input in structured form: a command name plus the
/// exact number of arguments that command requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub arguments: Vec<String>,
}

/// Why a line of input could not be turned into a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    CommandNotFound,
    NotEnoughArguments,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::CommandNotFound => write!(f, "command not found"),
            ParseError::NotEnoughArguments => write!(f, "not enough arguments"),
        }
    }
}

/// Turn one raw input line into a [`Command`].
///
/// Returns `None` for empty input: there is nothing to execute and nothing
/// to report. Tokens are split on single spaces; the first token is the
/// command name. All argument slots take one token each except the last
/// one, which absorbs every remaining token rejoined with spaces, so the
/// final argument of `say` and `mp` can carry a whole sentence.
pub fn prepare(input: &str) -> Option<Result<Command, ParseError>> {
    if input.is_empty() {
        return None;
    }

    let parts: Vec<&str> = input.split(' ').collect();

    let required = match required_args(parts[0]) {
        Some(count) => count,
        None => return Some(Err(ParseError::CommandNotFound)),
    };

    if parts.len() - 1 < required {
        return Some(Err(ParseError::NotEnoughArguments));
    }

    let mut arguments = Vec::with_capacity(required);
    if required > 0 {
        for part in &parts[1..required] {
            arguments.push((*part).to_string());
        }
        arguments.push(parts[required..].join(" "));
    }

    Some(Ok(Command {
        name: parts[0].to_string(),
        arguments,
    }))
}
