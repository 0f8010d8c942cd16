//! Command implementations for the disease dashboard CLI.
//!
//! Every command loads the disease table and the county topology (local
//! paths or URLs), builds a `Dashboard` from the configuration, and drives it
//! through the same transitions the browser dashboard uses.

use clap::Subcommand;

pub mod inputs;
pub mod query;
pub mod report;

pub use inputs::{Inputs, SelectionArgs, SourceArg};

#[derive(Subcommand)]
pub enum Command {
    /// List the diseases in the table, optionally filtered by prefix
    Diseases {
        #[command(flatten)]
        inputs: Inputs,

        /// Case-insensitive prefix to match
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Per-year male, female and county totals for one selection
    Aggregate {
        #[command(flatten)]
        inputs: Inputs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Rows feeding the male/female series
        #[arg(long, value_enum)]
        sex_source: Option<SourceArg>,

        /// Rows feeding the county series
        #[arg(long, value_enum)]
        total_source: Option<SourceArg>,
    },

    /// Map fill color of every county for one selection
    Colors {
        #[command(flatten)]
        inputs: Inputs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Color by relative case count between two #rrggbb colors instead of CI buckets
        #[arg(long, num_args = 2, value_names = ["START", "END"])]
        gradient: Option<Vec<cid_data::color::Rgb>>,
    },

    /// Row, disease, county and year counts of the loaded table
    Summary {
        #[command(flatten)]
        inputs: Inputs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Diseases { inputs, search } => {
            query::run_diseases(&inputs, search.as_deref()).await
        }
        Command::Aggregate {
            inputs,
            selection,
            sex_source,
            total_source,
        } => query::run_aggregate(&inputs, &selection, sex_source, total_source).await,
        Command::Colors {
            inputs,
            selection,
            gradient,
        } => query::run_colors(&inputs, &selection, gradient.as_deref()).await,
        Command::Summary { inputs } => query::run_summary(&inputs).await,
    }
}
