use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use task_list_core::DeleteRoute;

/// Terminal client for a `/todos` task list API.
#[derive(Debug, Default, Parser)]
#[command(name = "tasks", version, about)]
pub struct Cli {
    /// API root; requests go to `<base-url>/todos`.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Where delete requests are sent.
    #[arg(long, value_enum)]
    pub delete_route: Option<DeleteRouteArg>,

    /// How long success messages stay visible, in milliseconds.
    #[arg(long)]
    pub status_ttl_ms: Option<u64>,

    /// Config file to read instead of the per-user default.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeleteRouteArg {
    /// /todos/todos/{id}
    Nested,
    /// /todos/{id}
    Item,
}

impl From<DeleteRouteArg> for DeleteRoute {
    fn from(arg: DeleteRouteArg) -> Self {
        match arg {
            DeleteRouteArg::Nested => DeleteRoute::Nested,
            DeleteRouteArg::Item => DeleteRoute::Item,
        }
    }
}
