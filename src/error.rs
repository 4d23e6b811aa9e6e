use std::sync::Arc;

use tokio::sync::mpsc::error::{SendError, TrySendError};

use crate::{Delivery, FunctionId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Function with name '{0}' already exists.")]
    FunctionAlreadyExists(FunctionId),

    #[error("Dispatcher has already started.")]
    DispatcherAlreadyStarted,

    #[error("Couldn't deliver the event: {0}")]
    SendError(String),

    #[error("The delivery channel has reached its capacity.")]
    ChannelIsFull,

    #[error("Function task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Malformed event envelope: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("Error external to the runtime occured: {0}")]
    External(Arc<str>),
}

impl From<SendError<Arc<Delivery>>> for Error {
    fn from(e: SendError<Arc<Delivery>>) -> Self {
        Error::SendError(e.to_string())
    }
}

impl From<TrySendError<Arc<Delivery>>> for Error {
    fn from(e: TrySendError<Arc<Delivery>>) -> Self {
        match e {
            TrySendError::Full(_) => Error::ChannelIsFull,
            TrySendError::Closed(_) => Error::SendError(e.to_string()),
        }
    }
}
