/*
The authoritative side: components, their ordering inside layouts and painting them into
descriptors for the client.
 */

pub mod button;
pub mod click_event;
pub mod component;
pub mod label;
pub mod layout;
pub mod layout_error;
pub mod listeners;
pub mod simple_layout;
