//! Error type shared by the panel controller, the transport and the page bootstrap.

use crate::model::ThreadId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    /// A response that must carry JSON did not.
    #[error("malformed response body (status {status}): {source}")]
    MalformedBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("request failed before a response arrived: {0}")]
    Transport(String),

    #[error("no thread is selected")]
    NoSelection,

    #[error("thread {0} already exists")]
    DuplicateThread(ThreadId),

    #[error("page state unavailable: {0}")]
    Bootstrap(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<gloo_net::Error> for PanelError {
    fn from(error: gloo_net::Error) -> Self {
        PanelError::Transport(error.to_string())
    }
}
