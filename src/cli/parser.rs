use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for sqlinteraction
/// CLI application to call stored procedures through the connection helper
#[derive(Parser)]
#[command(
    name = "sqlinteraction",
    version = env!("CARGO_PKG_VERSION"),
    about = "Call stored procedures on a known catalog: scalar, non-query and tabular fetch",
    long_about = None
)]
pub struct Cli {
    /// Catalog to work on (defaults to `default_catalog` from the config file)
    #[arg(global = true, long = "catalog", short = 'c')]
    pub catalog: Option<String>,

    /// Override the data source directory (useful for tests)
    #[arg(global = true, long = "data-source")]
    pub data_source: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and provision every catalog
    Init,

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,
    },

    /// Check that the catalog can be opened
    Ping,

    /// Run a procedure and print its single result value
    Scalar {
        /// Stored procedure name
        procedure: String,

        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },

    /// Run a procedure for its side effects
    Exec {
        /// Stored procedure name
        procedure: String,

        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },

    /// Run a procedure and print or export its rows
    Fetch {
        /// Stored procedure name
        procedure: String,

        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Write to FILE instead of stdout")]
        out: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite FILE if it exists")]
        force: bool,
    },

    /// Manage the stored procedures of the catalog
    Proc {
        #[command(subcommand)]
        action: ProcAction,
    },

    /// Print the internal log of the catalog
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum ProcAction {
    /// Store a procedure (one SQL statement with @named parameters)
    Define {
        name: String,
        sql: String,

        #[arg(long, help = "Overwrite an existing procedure")]
        replace: bool,
    },

    /// Remove a procedure
    Drop { name: String },

    /// List the procedures of the catalog
    List,

    /// Show the parameters a procedure declares
    Params { name: String },
}
