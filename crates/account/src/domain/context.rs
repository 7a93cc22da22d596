//! User Context Interface
//!
//! The survey core depends on this trait rather than on any concrete
//! session/profile store. Reward credits reported here are
//! server-confirmed amounts; implementations must not invent balances.

use crate::domain::entity::UserProfile;
use crate::error::AccountResult;

/// Access to the currently signed-in participant
#[trait_variant::make(UserContext: Send)]
pub trait LocalUserContext {
    /// Fetch the current user's profile
    ///
    /// Returns `AccountError::NoCurrentUser` when nobody is signed in.
    async fn current_user(&self) -> AccountResult<UserProfile>;

    /// Reflect a server-confirmed reward credit in the local profile view
    async fn credit_reward(&self, amount: f64) -> AccountResult<()>;
}
