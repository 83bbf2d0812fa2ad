use std::cmp::Ordering;

use crate::models::Profile;

/// Stable sort by subscription tier rank
///
/// Profiles with the same rank keep their relative order, so the pool order
/// chosen by the caller acts as the tie-breaker.
pub fn sort_by_tier(profiles: &mut [Profile]) {
    profiles.sort_by_key(|p| p.tier.rank());
}

/// Directory listing order
///
/// Tier rank first, then sponsorship (higher `sponsored_rank`, then sponsored
/// before unsponsored), then newest `created_at`. Missing timestamps sort last.
#[inline]
pub fn directory_order(a: &Profile, b: &Profile) -> Ordering {
    a.tier
        .rank()
        .cmp(&b.tier.rank())
        .then_with(|| b.sponsored_rank.cmp(&a.sponsored_rank))
        .then_with(|| b.is_sponsored.cmp(&a.is_sponsored))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

pub fn sort_for_directory(profiles: &mut [Profile]) {
    profiles.sort_by(directory_order);
}
