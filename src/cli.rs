use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::panels::CollectionKind;
use crate::record::RecordId;

/// Look up, mix, and keep a persistent book of colors.
#[derive(Parser, Debug)]
#[command(name = "colorbook", version, about)]
pub struct Args {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding saved collections (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the color information service (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a color name (e.g. rojo, sky-blue) to hex
    Name {
        /// Color name; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Save the result to the names collection
        #[arg(short, long)]
        save: bool,
    },

    /// Mix two hex colors by averaging their RGB channels
    Mix {
        /// First color, e.g. #ff0000
        first: String,

        /// Second color, e.g. 0000ff
        second: String,

        /// Save the result to the mixes collection
        #[arg(short, long)]
        save: bool,
    },

    /// Look a hex color up on the remote color service
    Lookup {
        /// Hex color, with or without '#'
        token: String,

        /// Save the result to the API collection
        #[arg(short, long)]
        save: bool,
    },

    /// Show a saved collection
    List {
        #[arg(value_enum)]
        collection: CollectionArg,
    },

    /// Remove a record from a saved collection by id
    Delete {
        #[arg(value_enum)]
        collection: CollectionArg,

        id: RecordId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollectionArg {
    Names,
    Mixes,
    Api,
}

impl From<CollectionArg> for CollectionKind {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Names => CollectionKind::Names,
            CollectionArg::Mixes => CollectionKind::Mixes,
            CollectionArg::Api => CollectionKind::Api,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_mix_with_save() {
        let args = Args::parse_from(["colorbook", "mix", "#ff0000", "0000ff", "--save"]);
        match args.command {
            Command::Mix {
                first,
                second,
                save,
            } => {
                assert_eq!(first, "#ff0000");
                assert_eq!(second, "0000ff");
                assert!(save);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn multi_word_names_are_collected() {
        let args = Args::parse_from(["colorbook", "name", "sky", "blue"]);
        assert!(matches!(args.command, Command::Name { ref name, save: false } if name.len() == 2));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::parse_from(["colorbook", "list", "api", "--data-dir", "/tmp/x", "-vv"]);
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/x")));
        assert_eq!(args.verbose, 2);
        assert!(matches!(
            args.command,
            Command::List {
                collection: CollectionArg::Api
            }
        ));
    }

    #[test]
    fn delete_requires_numeric_id() {
        assert!(Args::try_parse_from(["colorbook", "delete", "names", "abc"]).is_err());
        let args = Args::try_parse_from(["colorbook", "delete", "mixes", "42"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Delete {
                collection: CollectionArg::Mixes,
                id: 42
            }
        ));
    }

    #[test]
    fn collection_arg_maps_to_kind() {
        assert_eq!(CollectionKind::from(CollectionArg::Api), CollectionKind::Api);
        assert_eq!(CollectionKind::from(CollectionArg::Names), CollectionKind::Names);
    }
}
