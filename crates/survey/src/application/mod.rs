//! Survey Application Layer

pub mod config;
pub mod session;
pub mod timer;
