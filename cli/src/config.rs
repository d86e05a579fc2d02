//! Layered configuration: built-in defaults, then the TOML file, then
//! `TASKS_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use task_list_core::{DeleteRoute, TaskApi, TaskListClient, DEFAULT_STATUS_TTL};

use crate::cli::Cli;
use crate::error::CliError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    pub base_url: String,
    pub delete_route: DeleteRoute,
    pub status_ttl_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delete_route: DeleteRoute::default(),
            status_ttl_ms: u64::try_from(DEFAULT_STATUS_TTL.as_millis()).unwrap_or(3000),
        }
    }
}

impl Config {
    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }

    pub fn build_client(&self) -> TaskListClient {
        let api = TaskApi::new(&self.base_url).with_delete_route(self.delete_route);
        TaskListClient::new(api).with_status_ttl(self.status_ttl())
    }
}

/// Flag values that were actually given; absent ones leave lower layers alone.
#[derive(Debug, Serialize)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delete_route: Option<DeleteRoute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_ttl_ms: Option<u64>,
}

/// Per-user config file, e.g. `~/.config/tasks/config.toml` on Linux.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "tasks")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("tasks.toml"))
}

pub fn load(cli: &Cli) -> Result<Config, CliError> {
    let path = cli.config.clone().unwrap_or_else(config_path);
    let config = figment(&path, cli).extract()?;
    tracing::debug!(path = %path.display(), ?config, "configuration loaded");
    Ok(config)
}

fn figment(path: &Path, cli: &Cli) -> Figment {
    let overrides = Overrides {
        base_url: cli.base_url.clone(),
        delete_route: cli.delete_route.map(DeleteRoute::from),
        status_ttl_ms: cli.status_ttl_ms,
    };
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TASKS_"))
        .merge(Serialized::defaults(overrides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::DeleteRouteArg;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn cli_with_config(path: &Path) -> Cli {
        Cli {
            config: Some(path.to_path_buf()),
            ..Cli::default()
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli_with_config(&dir.path().join("absent.toml"));
        let config: Config = figment(cli.config.as_deref().unwrap(), &cli)
            .extract()
            .unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.status_ttl(), Duration::from_millis(3000));
        assert_eq!(config.delete_route, DeleteRoute::Nested);
    }

    #[test]
    fn file_values_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"http://file:1\"\ndelete_route = \"item\"\nstatus_ttl_ms = 500"
        )
        .unwrap();

        let mut cli = cli_with_config(file.path());
        let config: Config = figment(file.path(), &cli).extract().unwrap();
        assert_eq!(config.base_url, "http://file:1");
        assert_eq!(config.delete_route, DeleteRoute::Item);
        assert_eq!(config.status_ttl_ms, 500);

        cli.base_url = Some("http://flag:2".to_string());
        cli.delete_route = Some(DeleteRouteArg::Nested);
        let config: Config = figment(file.path(), &cli).extract().unwrap();
        assert_eq!(config.base_url, "http://flag:2");
        assert_eq!(config.delete_route, DeleteRoute::Nested);
        assert_eq!(config.status_ttl_ms, 500);
    }

    #[test]
    fn bad_route_in_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "delete_route = \"sideways\"").unwrap();
        let cli = cli_with_config(file.path());
        assert!(matches!(load(&cli), Err(CliError::Config(_))));
    }

    #[test]
    fn built_client_uses_configured_route() {
        let config = Config {
            delete_route: DeleteRoute::Item,
            ..Config::default()
        };
        let client = config.build_client();
        assert_eq!(client.api().delete_route(), DeleteRoute::Item);
        assert_eq!(client.api().base_url(), DEFAULT_BASE_URL);
    }
}
