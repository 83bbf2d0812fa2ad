// Core directory logic exports
pub mod distributor;
pub mod filters;
pub mod indexing;
pub mod ranking;
pub mod router;
pub mod seo;
pub mod sitemap;
pub mod slug;

pub use distributor::{DistributionReport, LeadDistributor, LeadError, LeadLocation, LeadPolicy};
pub use filters::{filter_by_preferred_type, filter_by_specialty, matches_preferred_type};
pub use ranking::{sort_by_tier, sort_for_directory};
pub use router::{classify_segments, legacy_redirect, split_segments, Classification, FallbackReason, Route, RouteResolver};
pub use seo::{assemble, canonical_url, Breadcrumb, PageSeo, SeoDocument, SiteInfo};
pub use slug::{canonical_path, slugify, title_case};
