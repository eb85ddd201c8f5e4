use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
    #[error("client error: {0}")]
    Client(#[from] engine::ClientError),
    #[error("log error: {0}")]
    Log(String),
    #[error("terminal error: {0}")]
    Terminal(String),
}
