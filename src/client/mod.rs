/*
The rendering side: paintables built from descriptors, the session that owns them and the
document they render into.
 */

pub mod client_error;
pub mod dom;
pub mod memory_dom;
pub mod paintable;
pub mod render_state;
pub mod session;
pub mod sizing;
pub mod v_button;
pub mod v_label;
pub mod v_simple_layout;

#[cfg(test)]
mod tests;
