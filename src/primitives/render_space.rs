/*
Space a container gives to one of its children. None on an axis means "undetermined": the
child has to size itself on that axis.
 */
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RenderSpace {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl RenderSpace {
    pub const UNDETERMINED: RenderSpace = RenderSpace {
        width: None,
        height: None,
    };

    pub fn new(width: Option<i32>, height: Option<i32>) -> Self {
        RenderSpace { width, height }
    }

    pub fn is_undetermined(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

/*
Percent sizes a component declared on the server. Kept by the client session, because only the
parent container knows what 100% is.
 */
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RelativeSize {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl RelativeSize {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    pub fn resolve(percent: f32, space: i32) -> i32 {
        (space as f32 * percent / 100.0).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rounds_to_pixels() {
        assert_eq!(RelativeSize::resolve(50.0, 171), 86);
        assert_eq!(RelativeSize::resolve(100.0, 170), 170);
        assert_eq!(RelativeSize::resolve(33.3, 300), 100);
    }
}
