use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("search request failed: {0}")]
    Upstream(String),

    #[error("search returned an empty page, cannot advance the max_id cursor")]
    EmptyPage,

    #[error("unparseable created_at timestamp {value:?}")]
    TimestampParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("csv export failed: {0}")]
    Export(#[from] csv::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream(err.to_string())
    }
}
