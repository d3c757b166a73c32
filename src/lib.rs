pub mod client;
pub mod config;
pub mod demo;
pub mod primitives;
pub mod server;
pub mod uidl;
pub mod widget;

#[cfg(test)]
pub mod mocks;
