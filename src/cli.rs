use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a grammar to Chomsky normal form and print it
    Cnf {
        /// File containing the grammar (default: standard input)
        file: Option<PathBuf>,

        /// Print every intermediate grammar to standard error
        #[arg(long)]
        trace: bool
    },

    /// Decide whether a word belongs to a grammar's language
    Cyk {
        /// File containing the grammar, followed by the word (default: standard input)
        file: Option<PathBuf>,

        /// Convert the grammar to CNF first instead of requiring it
        #[arg(short, long)]
        convert: bool,

        /// Word to test (default: the first word after the grammar)
        #[arg(short, long, value_name = "WORD")]
        input: Option<String>,

        /// Print every intermediate grammar to standard error
        #[arg(long)]
        trace: bool
    },

    /// Generate random words of a grammar's language
    Generate {
        /// File containing the grammar (default: standard input)
        file: Option<PathBuf>,

        /// Amount to generate (default: 1)
        #[arg(short = 'n', long, value_name = "AMOUNT")]
        amount: Option<u32>,

        /// Deepest derivation to attempt
        #[arg(long, value_name = "DEPTH", default_value_t = 64)]
        max_depth: usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_cyk_arguments() {
        let cli = Cli::parse_from(["chomsky", "cyk", "grammar.txt", "--convert", "-i", "12"]);

        match cli.command {
            Command::Cyk { file, convert, input, trace } => {
                assert_eq!(file, Some(PathBuf::from("grammar.txt")));
                assert!(convert);
                assert_eq!(input, Some("12".to_string()));
                assert!(!trace);
            }
            _ => panic!("expected the cyk command")
        }
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::parse_from(["chomsky", "generate"]);

        match cli.command {
            Command::Generate { file, amount, max_depth } => {
                assert_eq!(file, None);
                assert_eq!(amount, None);
                assert_eq!(max_depth, 64);
            }
            _ => panic!("expected the generate command")
        }
    }
}
