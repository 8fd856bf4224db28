use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "timeline")]
#[command(about = "Drive the timeline pagination engine from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "FILE", env = "TIMELINE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay navigation steps against a fixture and print the final view
    Replay(ReplayArgs),
    /// Print the cursor tokens for a newest-first list of ids
    Tokens {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },
    /// Manage saved lists and searches
    Views(ViewsCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON file mapping view specs to newest-first posts
    #[arg(long, value_name = "FILE")]
    pub fixture: PathBuf,
    /// Initial view: home, mentions, list:<id> or search:<query>
    #[arg(long, default_value = "home")]
    pub view: String,
    /// Window size override
    #[arg(long, value_name = "N")]
    pub window: Option<usize>,
    /// Page size override
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,
    /// next, prev, page-down, page-up, top, bottom, grow, shrink, reselect, view:<spec>
    #[arg(value_name = "STEP")]
    pub steps: Vec<String>,
}

#[derive(Args)]
pub struct ViewsCommand {
    /// Catalog file (defaults to catalog.json next to the config file)
    #[arg(long, value_name = "FILE", env = "TIMELINE_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub action: ViewsAction,
}

#[derive(Subcommand)]
pub enum ViewsAction {
    /// List every switchable view
    List,
    /// Remember a list
    AddList {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Forget a list
    RemoveList {
        #[arg(long)]
        id: String,
    },
    /// Save a search query
    AddSearch {
        #[arg(long)]
        query: String,
    },
    /// Forget a saved search
    RemoveSearch {
        #[arg(long)]
        query: String,
    },
    /// Record the view to open on next start
    SetLast {
        #[arg(long)]
        view: String,
    },
}
