//! Account Domain Layer

pub mod context;
pub mod entity;
pub mod value_object;
