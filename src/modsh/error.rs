use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid module manifest: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("Module error: {0}")]
    Module(String),

    #[error("Unknown module kind: {0}")]
    UnknownModuleKind(String),

    #[error("Service not registered: {0}")]
    MissingService(&'static str),
}

pub type Result<T> = std::result::Result<T, ShellError>;
