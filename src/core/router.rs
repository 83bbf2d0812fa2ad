use crate::core::slug::canonical_path;
use crate::models::Profile;
use crate::registry::Registries;
use crate::services::traits::ProfileSource;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Why a two-segment path fell back to the city page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// Lookup succeeded but no profile has that slug
    NotAProfile,
    /// Lookup returned an error
    LookupFailed,
    /// Lookup did not finish within the configured bound
    LookupTimedOut,
}

/// Page a directory path resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    Specialty {
        specialty: String,
    },
    SpecialtyState {
        specialty: String,
        state: String,
    },
    SpecialtyCity {
        specialty: String,
        state: String,
        city: String,
    },
    State {
        state: String,
    },
    City {
        state: String,
        city: String,
        /// Set when the city page was reached by failing open on a lookup
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<FallbackReason>,
    },
    Profile {
        state: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        city: Option<String>,
        slug: String,
    },
    NotFound,
}

/// Outcome of the pure classification step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Resolved(Route),
    /// Second segment is not a known city; ask the datastore whether it is a profile
    NeedsProfileLookup { state: String, segment: String },
}

/// Split a path tail into segments
///
/// Leading and trailing slashes are ignored; an empty segment in the middle
/// is kept so classification can reject it.
pub fn split_segments(tail: &str) -> Vec<String> {
    let trimmed = tail.trim_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').map(str::to_string).collect()
}

/// Classify 1-3 path segments under `/premarital-counseling`
///
/// Never touches the network. Specialty slugs are matched exactly and win
/// over state slugs. A state page needs a registered state; deeper paths
/// under an unregistered first segment keep it as given.
pub fn classify_segments(segments: &[String], registries: &Registries) -> Classification {
    use Classification::Resolved;

    if segments.is_empty() || segments.len() > 3 || segments.iter().any(|s| s.trim().is_empty()) {
        return Resolved(Route::NotFound);
    }

    let first = segments[0].as_str();

    if registries.specialties.is_specialty(first) {
        let specialty = first.to_string();
        return Resolved(match &segments[1..] {
            [] => Route::Specialty { specialty },
            [state] => match registries.locations.state(&state.to_lowercase()) {
                Some(s) => Route::SpecialtyState {
                    specialty,
                    state: s.slug.clone(),
                },
                None => Route::NotFound,
            },
            [state, city] => match registries.locations.state(&state.to_lowercase()) {
                Some(s) => Route::SpecialtyCity {
                    specialty,
                    state: s.slug.clone(),
                    city: city.to_lowercase(),
                },
                None => Route::NotFound,
            },
            _ => Route::NotFound,
        });
    }

    let state = registries.locations.state(&first.to_lowercase());
    let state_slug = state.map(|s| s.slug.clone()).unwrap_or_else(|| first.to_lowercase());

    match &segments[1..] {
        [] => match state {
            Some(_) => Resolved(Route::State { state: state_slug }),
            None => Resolved(Route::NotFound),
        },
        // Unknown states skip the city check but still get the profile lookup
        [segment] => match state.and_then(|s| s.find_city(segment)) {
            Some(_) => Resolved(Route::City {
                state: state_slug,
                city: segment.to_lowercase(),
                fallback: None,
            }),
            None => Classification::NeedsProfileLookup {
                state: state_slug,
                segment: segment.clone(),
            },
        },
        [city, slug] => Resolved(Route::Profile {
            state: state_slug,
            city: Some(city.to_lowercase()),
            slug: slug.clone(),
        }),
        _ => Resolved(Route::NotFound),
    }
}

/// Resolved route plus the profile fetched while resolving it, if any
#[derive(Debug, Clone)]
pub struct Resolution {
    pub route: Route,
    pub profile: Option<Profile>,
}

impl Resolution {
    fn direct(route: Route) -> Self {
        Self {
            route,
            profile: None,
        }
    }
}

/// Resolves directory paths, performing the bounded profile lookup when needed
pub struct RouteResolver {
    registries: Arc<Registries>,
    profiles: Arc<dyn ProfileSource>,
    lookup_timeout: Duration,
}

impl RouteResolver {
    pub fn new(
        registries: Arc<Registries>,
        profiles: Arc<dyn ProfileSource>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            registries,
            profiles,
            lookup_timeout,
        }
    }

    pub async fn resolve(&self, segments: &[String]) -> Resolution {
        match classify_segments(segments, &self.registries) {
            Classification::Resolved(route) => Resolution::direct(route),
            Classification::NeedsProfileLookup { state, segment } => {
                self.resolve_city_or_profile(state, segment).await
            }
        }
    }

    /// Profile page when the segment is a profile slug, otherwise the city page
    async fn resolve_city_or_profile(&self, state: String, segment: String) -> Resolution {
        let lookup = tokio::time::timeout(self.lookup_timeout, self.profiles.find_by_slug(&segment));

        let reason = match lookup.await {
            Ok(Ok(Some(profile))) => {
                return Resolution {
                    route: Route::Profile {
                        state,
                        city: None,
                        slug: segment,
                    },
                    profile: Some(profile),
                };
            }
            Ok(Ok(None)) => FallbackReason::NotAProfile,
            Ok(Err(e)) => {
                tracing::warn!(
                    "Profile lookup for /{}/{} failed, serving city page: {}",
                    state,
                    segment,
                    e
                );
                FallbackReason::LookupFailed
            }
            Err(_) => {
                tracing::warn!(
                    "Profile lookup for /{}/{} timed out after {:?}, serving city page",
                    state,
                    segment,
                    self.lookup_timeout
                );
                FallbackReason::LookupTimedOut
            }
        };

        Resolution::direct(Route::City {
            state,
            city: segment.to_lowercase(),
            fallback: Some(reason),
        })
    }
}

/// Permanent redirect target for a legacy `/professionals/...` path
///
/// Returns `None` when the path is not under `/professionals`.
pub fn legacy_redirect(path: &str) -> Option<String> {
    let path = canonical_path(path);
    let tail = path.strip_prefix("/professionals")?;

    if tail.is_empty() {
        return Some("/states".to_string());
    }
    tail.strip_prefix('/').map(|rest| format!("/states/{}", rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &str) -> Vec<String> {
        split_segments(path)
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(segs("/texas/austin/"), vec!["texas", "austin"]);
        assert!(segs("").is_empty());
        assert!(segs("///").is_empty());
        assert_eq!(segs("texas//austin"), vec!["texas", "", "austin"]);
    }

    #[test]
    fn test_specialty_branch() {
        let registries = Registries::builtin();

        assert_eq!(
            classify_segments(&segs("christian"), &registries),
            Classification::Resolved(Route::Specialty {
                specialty: "christian".into()
            })
        );
        assert_eq!(
            classify_segments(&segs("gottman/texas"), &registries),
            Classification::Resolved(Route::SpecialtyState {
                specialty: "gottman".into(),
                state: "texas".into()
            })
        );
        assert_eq!(
            classify_segments(&segs("online/texas/round-rock"), &registries),
            Classification::Resolved(Route::SpecialtyCity {
                specialty: "online".into(),
                state: "texas".into(),
                city: "round-rock".into()
            })
        );
        assert_eq!(
            classify_segments(&segs("online/atlantis"), &registries),
            Classification::Resolved(Route::NotFound)
        );
    }

    #[test]
    fn test_state_and_known_city() {
        let registries = Registries::builtin();

        assert_eq!(
            classify_segments(&segs("texas"), &registries),
            Classification::Resolved(Route::State {
                state: "texas".into()
            })
        );
        assert_eq!(
            classify_segments(&segs("new-york/New-York"), &registries),
            Classification::Resolved(Route::City {
                state: "new-york".into(),
                city: "new-york".into(),
                fallback: None
            })
        );
    }

    #[test]
    fn test_unknown_second_segment_needs_lookup() {
        let registries = Registries::builtin();

        assert_eq!(
            classify_segments(&segs("texas/jane-doe-lmft"), &registries),
            Classification::NeedsProfileLookup {
                state: "texas".into(),
                segment: "jane-doe-lmft".into()
            }
        );
    }

    #[test]
    fn test_three_segments_is_profile() {
        let registries = Registries::builtin();

        assert_eq!(
            classify_segments(&segs("texas/austin/jane-doe"), &registries),
            Classification::Resolved(Route::Profile {
                state: "texas".into(),
                city: Some("austin".into()),
                slug: "jane-doe".into()
            })
        );
    }

    #[test]
    fn test_unregistered_state_keeps_profile_paths() {
        let registries = Registries::builtin();

        assert_eq!(
            classify_segments(&segs("tx/jane-doe-lmft"), &registries),
            Classification::NeedsProfileLookup {
                state: "tx".into(),
                segment: "jane-doe-lmft".into()
            }
        );
        assert_eq!(
            classify_segments(&segs("TX/Austin/jane-doe"), &registries),
            Classification::Resolved(Route::Profile {
                state: "tx".into(),
                city: Some("austin".into()),
                slug: "jane-doe".into()
            })
        );
    }

    #[test]
    fn test_not_found_shapes() {
        let registries = Registries::builtin();

        for path in ["", "texas/austin/jane/extra", "atlantis", "texas//austin"] {
            assert_eq!(
                classify_segments(&segs(path), &registries),
                Classification::Resolved(Route::NotFound),
                "path {:?}",
                path
            );
        }
    }

    #[test]
    fn test_legacy_redirect() {
        assert_eq!(legacy_redirect("/professionals/texas"), Some("/states/texas".into()));
        assert_eq!(
            legacy_redirect("/professionals/texas/austin/"),
            Some("/states/texas/austin".into())
        );
        assert_eq!(legacy_redirect("/professionals"), Some("/states".into()));
        assert_eq!(legacy_redirect("/professionalsx/texas"), None);
        assert_eq!(legacy_redirect("/states/texas"), None);
    }
}
