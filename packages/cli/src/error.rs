/// Errors reported by the command-line front end.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] kvtree_core::Error),

    #[error(transparent)]
    Http(#[from] kvtree_http::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("nothing stored under {namespace:?}")]
    NotFound { namespace: String },

    #[error("store refused to delete {namespace:?}")]
    DeleteRefused { namespace: String },
}
