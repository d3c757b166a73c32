use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::widget::widget::WID;

const PID_PREFIX: &str = "PID";

/*
Identity token of a paintable on the wire. The server derives it from the component's WID,
the client uses it as the key of its paintable index.
 */
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(String);

impl Pid {
    pub fn new(s: impl Into<String>) -> Self {
        Pid(s.into())
    }

    pub fn for_widget(wid: WID) -> Self {
        Pid(format!("{}{}", PID_PREFIX, wid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The WID this token was made from, None if it was not made by `for_widget`.
    pub fn widget_id(&self) -> Option<WID> {
        self.0.strip_prefix(PID_PREFIX)?.parse().ok()
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Pid {
    fn from(s: &str) -> Self {
        Pid::new(s)
    }
}
