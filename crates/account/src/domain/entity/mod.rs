//! Account Entities

pub mod application;
pub mod user;
pub mod withdrawal;

pub use application::{Application, ApplicationAnswers};
pub use user::UserProfile;
pub use withdrawal::Withdrawal;
