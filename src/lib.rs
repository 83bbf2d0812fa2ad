//! Counselor Directory - location-aware directory and lead routing for
//! premarital counseling professionals
//!
//! Resolves directory paths to state, city, specialty and profile pages,
//! decorates them with SEO metadata and structured data, and distributes
//! couples' inquiries to a bounded set of matching professionals.

pub mod config;
pub mod core;
pub mod models;
pub mod registry;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{assemble, classify_segments, LeadDistributor, LeadPolicy, Route, RouteResolver};
pub use models::{InquirySubmission, PreferredType, Profile, SubscriptionTier};
pub use registry::Registries;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let registries = Registries::builtin();
        let segments = vec!["texas".to_string()];

        assert_eq!(
            classify_segments(&segments, &registries),
            core::Classification::Resolved(Route::State {
                state: "texas".to_string()
            })
        );
    }
}
