//! Account Value Objects

pub mod application_status;
pub mod user_status;
pub mod withdrawal_status;

pub use application_status::ApplicationStatus;
pub use user_status::UserStatus;
pub use withdrawal_status::WithdrawalStatus;
