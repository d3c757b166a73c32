use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaintError {
    #[error("end_tag(\"{found}\") closes \"{expected}\"")]
    UnbalancedTag { expected: String, found: String },
    #[error("end_tag(\"{0}\") without a matching start_tag")]
    NoOpenTag(String),
    #[error("attribute \"{0}\" added outside of any tag")]
    AttributeOutsideTag(String),
    #[error("child \"{0}\" added outside of any tag")]
    ChildOutsideTag(String),
    #[error("paint target finished with {0} unclosed tag(s)")]
    Unclosed(usize),
    #[error("nothing was painted")]
    Empty,
    #[error("more than one root tag was painted")]
    MultipleRoots,
    #[error("wire codec error: {0}")]
    Codec(#[from] serde_json::Error),
}
