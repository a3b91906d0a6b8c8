use crate::inquiry::InquiryField;
use crate::pin::RegionId;
use thiserror::Error;

/// Failures surfaced by the choreography core.
///
/// None of these are fatal to the page; callers log and skip the affected
/// animation or request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoreoError {
    #[error("missing animation handle: {0}")]
    MissingHandle(&'static str),
    #[error("unknown pinned region {0:?}")]
    UnknownRegion(RegionId),
    #[error("layout has no measurable viewport")]
    EmptyLayout,
    #[error("inquiry field is invalid: {0}")]
    InvalidInquiry(InquiryField),
    #[error("an inquiry is already being sent")]
    SubmissionInFlight,
}
