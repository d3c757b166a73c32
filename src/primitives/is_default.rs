// used by serde's skip_serializing_if, so default sections stay out of written config files.
pub trait IsDefault {
    fn is_default(&self) -> bool;
}

impl<D: Default + PartialEq> IsDefault for D {
    fn is_default(&self) -> bool {
        self == &D::default()
    }
}
