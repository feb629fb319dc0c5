use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnwatchError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("fetching page {page} of watched repos: {source}")]
    FetchPage {
        page: u32,
        #[source]
        source: Box<UnwatchError>,
    },

    #[error("unwatching {organization}/{repository}: {source}")]
    Delete {
        organization: String,
        repository: String,
        #[source]
        source: Box<UnwatchError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, UnwatchError>;
