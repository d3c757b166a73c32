use thiserror::Error;

use crate::uidl::paint_error::PaintError;
use crate::uidl::pid::Pid;

/*
Failures of a client side pass. Errors are also sent to the session's error channel, which is
why they are Clone and carry wire errors as text.
 */
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    #[error("descriptor <{tag}> has no id")]
    MissingIdentity { tag: String },
    #[error("no paintable implementation for tag <{0}>")]
    UnknownTag(String),
    #[error("paintable {0} is referenced while it is being updated")]
    CyclicUpdate(Pid),
    #[error("paintable {0} is not registered")]
    UnresolvedPaintable(Pid),
    #[error("attribute {name} of {pid} has unexpected value {value}")]
    MalformedAttribute { pid: Pid, name: String, value: String },
    #[error("wire: {0}")]
    Wire(String),
}

impl From<PaintError> for ClientError {
    fn from(e: PaintError) -> Self {
        ClientError::Wire(e.to_string())
    }
}
