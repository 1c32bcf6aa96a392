use crate::model::IllustId;
use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("reqwest error")]
    Request(#[from] reqwest::Error),
    #[error("{status} from {url}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("Failed to parse the page of artwork {id}\n[URL]:{url}\n[CONTENT]:{content}\n")]
    Extract {
        id: IllustId,
        url: String,
        content: String,
    },
    #[error("json deserialization failed")]
    Json(#[from] serde_json::Error),
    #[error("url parse failed")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// HTTP status of the failed response, if the failure carried one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
