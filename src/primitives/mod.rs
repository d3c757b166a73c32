pub mod box_model;
pub mod dimension;
pub mod is_default;
pub mod render_space;
