//! Terminal host for the task list client.
//!
//! Executes the commands `task_list_core::TaskListClient` emits: requests go
//! out through reqwest, status timers run on tokio, delete confirmations are
//! asked on the terminal. Configuration is layered with figment.

pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use cli::Cli;
pub use config::Config;
pub use error::CliError;
pub use session::{Confirm, Event, Flow, Input, Session, TerminalConfirm};
pub use transport::Transport;
