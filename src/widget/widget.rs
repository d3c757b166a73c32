use std::sync::atomic::{AtomicUsize, Ordering};

// Identity of a server side component. Compared by value, never reused within a process.
pub type WID = usize;

pub const WIDGET_NONE: WID = 0;

pub fn get_new_widget_id() -> WID {
    static COUNTER: AtomicUsize = AtomicUsize::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}
