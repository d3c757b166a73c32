use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::uidl::pid::Pid;

pub const LAYOUT_CLICK_EVENT: &str = "layout_click";

/*
Client to server message: "variable `name` of paintable `pid` is now `value`". Immediate
changes are meant to be flushed to the server right away.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableChange {
    pub pid: Pid,
    pub name: String,
    pub value: Value,
    pub immediate: bool,
}

impl VariableChange {
    pub fn new(pid: Pid, name: impl Into<String>, value: Value, immediate: bool) -> Self {
        VariableChange {
            pid,
            name: name.into(),
            value,
            immediate,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MouseDetails {
    pub button: MouseButton,
    pub client_x: i32,
    pub client_y: i32,
    #[serde(default)]
    pub double_click: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
}

impl MouseDetails {
    pub fn left_at(client_x: i32, client_y: i32) -> Self {
        MouseDetails {
            client_x,
            client_y,
            ..Default::default()
        }
    }
}

/*
Payload of the layout click variable. `child` is the pid of the child that was hit, None when
the click landed on the layout itself.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutClickPayload {
    pub child: Option<Pid>,
    #[serde(flatten)]
    pub details: MouseDetails,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn click_payload_is_flat() {
        let payload = LayoutClickPayload {
            child: Some(Pid::new("PID7")),
            details: MouseDetails::left_at(3, 4),
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["child"], json!("PID7"));
        assert_eq!(v["button"], json!("left"));
        assert_eq!(v["client_x"], json!(3));

        let back: LayoutClickPayload = serde_json::from_value(v).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn click_on_layout_itself_has_null_child() {
        let v = json!({"child": null, "button": "right", "client_x": 0, "client_y": 0});
        let payload: LayoutClickPayload = serde_json::from_value(v).unwrap();
        assert_eq!(payload.child, None);
        assert_eq!(payload.details.button, MouseButton::Right);
        assert!(!payload.details.shift);
    }
}
