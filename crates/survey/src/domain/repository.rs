//! Catalog Trait
//!
//! Interface to the survey backend. Implementation is in the infrastructure
//! layer; tests substitute an in-memory double.

use crate::domain::entities::{CompletionReceipt, Survey};
use crate::error::SessionResult;
use kernel::id::SurveyId;

/// Survey catalog trait - the backend surface the session depends on
#[trait_variant::make(SurveyCatalog: Send)]
pub trait LocalSurveyCatalog {
    /// List surveys visible to the current participant
    async fn list_public(&self) -> SessionResult<Vec<Survey>>;

    /// Fetch one survey by ID
    ///
    /// Returns `None` when the survey is not listed.
    async fn fetch(&self, survey_id: SurveyId) -> SessionResult<Option<Survey>>;

    /// Reserve a slot and start a session
    ///
    /// The server decrements the slot count atomically; a full survey yields
    /// `SessionError::SlotUnavailable`.
    async fn start(&self, survey_id: SurveyId) -> SessionResult<()>;

    /// Submit completion for server verification
    async fn complete(&self, survey_id: SurveyId) -> SessionResult<CompletionReceipt>;
}
