use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for webprefs
#[derive(Parser, Debug)]
#[command(name = "webprefs")]
#[command(about = "Resolve web contents preferences from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved preferences bag as JSON
    Resolve {
        #[command(flatten)]
        bag: BagArgs,

        /// Glob pattern to filter keys (repeatable, OR logic)
        #[arg(short, long = "query", value_name = "GLOB")]
        queries: Vec<String>,

        /// Print a single preference value without JSON wrapping
        #[arg(long, value_name = "KEY", conflicts_with = "queries")]
        get: Option<String>,

        /// Print the bag as of construction instead of the live bag
        #[arg(long)]
        snapshot: bool,
    },

    /// Print the renderer command line, one argument per line
    Args {
        #[command(flatten)]
        bag: BagArgs,

        /// User agent passed to the renderer
        #[arg(long)]
        user_agent: Option<String>,

        /// Honor the scrollBounce preference regardless of platform
        #[arg(long)]
        scroll_bounce: bool,

        /// Program name placed first on the command line
        #[arg(long, default_value = "renderer")]
        program: String,
    },

    /// Print the render-engine preferences as JSON
    WebPrefs {
        #[command(flatten)]
        bag: BagArgs,
    },
}

/// Where the preferences bag comes from
#[derive(Args, Debug)]
pub struct BagArgs {
    /// JSON file holding the initial preferences object
    pub file: PathBuf,

    /// JSON file merged into the preferences after construction (repeatable)
    #[arg(short, long = "merge", value_name = "FILE")]
    pub merges: Vec<PathBuf>,
}
