use thiserror::Error;

use crate::client::client_error::ClientError;
use crate::server::layout_error::LayoutError;
use crate::uidl::paint_error::PaintError;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("server: {0}")]
    Layout(#[from] LayoutError),
    #[error("paint: {0}")]
    Paint(#[from] PaintError),
    #[error("client: {0}")]
    Client(#[from] ClientError),
    #[error("{0} is not rendered")]
    NotRendered(String),
    #[error("output: {0}")]
    Output(#[from] std::io::Error),
}
