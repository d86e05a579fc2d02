use miette::Diagnostic;
use thiserror::Error;

/// Errors that stop the terminal client before or outside the session.
///
/// Request failures never show up here: the core turns them into banner
/// messages.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("invalid configuration")]
    #[diagnostic(
        code(tasks::config),
        help("check the config file and any TASKS_* environment variables")
    )]
    Config(#[source] Box<figment::Error>),

    #[error("could not build the HTTP client")]
    #[diagnostic(code(tasks::http_client))]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(tasks::io))]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        CliError::Config(Box::new(err))
    }
}
