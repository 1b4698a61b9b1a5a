//! Command line of the `todo` binary.

use clap::{Parser, Subcommand};
use todo_core::TodoId;

const ENVIRONMENT_HELP: &str = "ENVIRONMENT:
  TODO_API_URL          Service base URL (default http://localhost:8080)
  TODO_RESPONSE_WAIT    Seconds to wait for a result (default 30)";

/// Manage todo items on a todo service
#[derive(Debug, Parser)]
#[command(name = "todo", version, after_help = ENVIRONMENT_HELP)]
pub struct Cli {
    /// What to do; lists the todos when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested command, [`Command::List`] when none was given.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::List)
    }
}

/// Subcommands of `todo`.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show all todos
    #[command(visible_alias = "ls")]
    List,

    /// Create a todo
    Add {
        /// Name of the new todo
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Mark a todo complete
    Done {
        /// Todo to complete
        id: TodoId,
    },

    /// Mark a todo incomplete
    Undo {
        /// Todo to reopen
        id: TodoId,
    },

    /// Rename a todo
    Rename {
        /// Todo to rename
        id: TodoId,
        /// New name
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Delete a todo
    #[command(visible_alias = "delete")]
    Rm {
        /// Todo to delete
        id: TodoId,
    },
}

/// Words of a name argument joined with single spaces.
#[must_use]
pub fn joined(words: &[String]) -> String {
    words.join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("todo").chain(args.iter().copied()))
            .map(Cli::into_command)
    }

    #[test]
    fn no_arguments_lists() {
        assert_eq!(parse(&[]).unwrap(), Command::List);
        assert_eq!(parse(&["list"]).unwrap(), Command::List);
        assert_eq!(parse(&["ls"]).unwrap(), Command::List);
    }

    #[test]
    fn add_collects_words() {
        let Command::Add { name } = parse(&["add", "Buy", "oat", "milk"]).unwrap() else {
            unreachable!("add parses to Command::Add");
        };
        assert_eq!(joined(&name), "Buy oat milk");

        let error = parse(&["add"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn done_and_undo_take_an_id() {
        assert_eq!(
            parse(&["done", "3"]).unwrap(),
            Command::Done { id: TodoId::new(3) }
        );
        assert_eq!(
            parse(&["undo", "3"]).unwrap(),
            Command::Undo { id: TodoId::new(3) }
        );
    }

    #[test]
    fn rename_takes_id_then_name() {
        assert_eq!(
            parse(&["rename", "2", "Call", "dad"]).unwrap(),
            Command::Rename {
                id: TodoId::new(2),
                name: vec!["Call".to_string(), "dad".to_string()],
            }
        );

        let error = parse(&["rename", "2"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            parse(&["rm", "seven"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["rm"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            parse(&["frobnicate"]).unwrap_err().kind(),
            ErrorKind::InvalidSubcommand
        );
        assert_eq!(
            parse(&["delete", "4"]).unwrap(),
            Command::Rm { id: TodoId::new(4) }
        );
    }

    #[test]
    fn help_is_rendered_by_clap() {
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
