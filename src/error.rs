use crate::{app, config, record_store};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("record store error: {0}")]
    RecordStore(#[from] record_store::Error),
    #[error("serving error: {0}")]
    Serve(#[from] app::serve::ServeError),

    #[error("templating error: {0}")]
    Tera(#[from] tera::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
