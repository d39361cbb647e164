//! CLI argument definitions using clap
//!
//! Commands:
//! - pastedb init --config <path>
//! - pastedb query --config <path> [--query ..] [--fields ..] [--sortby ..] [--order ..] [--limit ..] [--offset ..]
//! - pastedb get --config <path> --id <id>
//! - pastedb add --config <path>            (paste JSON on stdin)
//! - pastedb update --config <path> --id <id> (paste JSON on stdin)
//! - pastedb delete --config <path> --id <id>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::query::QueryParams;

/// pastedb - A strict, deterministic query engine for pastebin records
#[derive(Parser, Debug)]
#[command(name = "pastedb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty data file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./pastedb.json")]
        config: PathBuf,
    },

    /// List pastes
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./pastedb.json")]
        config: PathBuf,

        #[command(flatten)]
        params: QueryArgs,
    },

    /// Fetch one paste
    Get {
        /// Path to configuration file
        #[arg(long, default_value = "./pastedb.json")]
        config: PathBuf,

        #[arg(long)]
        id: i64,
    },

    /// Create a paste from a JSON object on stdin
    Add {
        /// Path to configuration file
        #[arg(long, default_value = "./pastedb.json")]
        config: PathBuf,
    },

    /// Replace a paste with a JSON object on stdin
    Update {
        /// Path to configuration file
        #[arg(long, default_value = "./pastedb.json")]
        config: PathBuf,

        #[arg(long)]
        id: i64,
    },

    /// Remove a paste
    Delete {
        /// Path to configuration file
        #[arg(long, default_value = "./pastedb.json")]
        config: PathBuf,

        #[arg(long)]
        id: i64,
    },
}

/// Raw list parameters, passed through unvalidated
#[derive(Args, Debug, Default, Clone)]
pub struct QueryArgs {
    /// Filter conditions, e.g. `syntax:go,poster.isnull:false`
    #[arg(long, default_value = "")]
    pub query: String,

    /// Fields to return, e.g. `id,poster`
    #[arg(long, default_value = "")]
    pub fields: String,

    /// Sort fields, e.g. `syntax,id`
    #[arg(long, default_value = "")]
    pub sortby: String,

    /// Sort directions (`asc` / `desc`) matching `--sortby`
    #[arg(long, default_value = "")]
    pub order: String,

    /// Page size; negative means unbounded
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub limit: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub offset: String,
}

impl From<QueryArgs> for QueryParams {
    fn from(args: QueryArgs) -> Self {
        QueryParams {
            query: args.query,
            fields: args.fields,
            sortby: args.sortby,
            order: args.order,
            limit: args.limit,
            offset: args.offset,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let cli = Cli::try_parse_from([
            "pastedb", "query", "--config", "c.json", "--query", "syntax:go", "--sortby", "id",
            "--order", "desc", "--limit", "5",
        ])
        .unwrap();

        match cli.command {
            Command::Query { config, params } => {
                assert_eq!(config, PathBuf::from("c.json"));
                let params = QueryParams::from(params);
                assert_eq!(params.query, "syntax:go");
                assert_eq!(params.sortby, "id");
                assert_eq!(params.order, "desc");
                assert_eq!(params.limit, "5");
                assert_eq!(params.offset, "");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_negative_limit_accepted() {
        let cli = Cli::try_parse_from(["pastedb", "query", "--limit", "-1"]).unwrap();
        match cli.command {
            Command::Query { params, .. } => assert_eq!(params.limit, "-1"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["pastedb", "get", "--id", "3"]).unwrap();
        match cli.command {
            Command::Get { config, id } => {
                assert_eq!(config, PathBuf::from("./pastedb.json"));
                assert_eq!(id, 3);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_id_required() {
        assert!(Cli::try_parse_from(["pastedb", "delete"]).is_err());
    }
}
