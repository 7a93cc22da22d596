//! Presentation Layer

pub mod dto;
pub mod view;
