/*
Everything that travels between server and client: descriptors going down, variable changes
going up. The encoding is plain JSON.
 */

pub mod paint_error;
pub mod paint_target;
pub mod pid;
pub mod uidl;
pub mod variable_change;
