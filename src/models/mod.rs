// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ContactReveal, ContentKind, ContentSections, Inquiry, InquiryStatus, LocationContent, PreferredType, Profile,
    ProfileQuery, Review, RevealType, SubscriptionTier,
};
pub use requests::{ContactRevealRequest, InquirySubmission};
pub use responses::{ContactRevealResponse, ErrorResponse, HealthResponse};
