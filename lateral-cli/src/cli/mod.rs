pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lateral",
    version,
    about = "Benchmark driver for horizontal gene transfer detection tools",
    long_about = "Lateral runs a batch of gene trees through external HGT-detection \
                  tools (T-REX, RANGER-DTL, RIATA-HGT, Jane 4, CONSEL's AU test), \
                  converting inputs into each tool's format, timing every invocation, \
                  and scraping outputs into one normalized report per tool."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one tool's driver over a gene-tree batch
    Run(commands::run::RunArgs),

    /// Build one job per tool and execute locally or submit to the queue
    Launch(commands::launch::LaunchArgs),

    /// Inspect the external HGT-detection tools
    Tools(commands::tools::ToolsArgs),

    /// Select representative prototypes from a distance matrix
    Select(commands::select::SelectArgs),
}
