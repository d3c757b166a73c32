/*
Whether a container is in the middle of applying a descriptor. Size changes that arrive while
Rendering skip remeasuring and relative size propagation, the pass does both on its own.
 */
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RenderState {
    #[default]
    Idle,
    Rendering,
}

impl RenderState {
    pub fn is_rendering(&self) -> bool {
        *self == RenderState::Rendering
    }
}
