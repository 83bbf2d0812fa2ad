use crate::models::LocationContent;
use crate::registry::{LocationRegistry, StateInfo};

/// Profile count at which a non-anchor listing page becomes indexable
pub const MIN_INDEXABLE_PROFILES: usize = 3;

/// Major cities a state needs before its page is indexable
pub const MIN_STATE_CITIES: usize = 5;

/// City page: anchor cities always, others once they list enough profiles
#[inline]
pub fn city_indexable(
    registry: &LocationRegistry,
    state_slug: &str,
    city_slug: &str,
    profile_count: usize,
) -> bool {
    registry.is_anchor_city(state_slug, city_slug) || profile_count >= MIN_INDEXABLE_PROFILES
}

/// State page: enough major cities and no placeholder copy
#[inline]
pub fn state_indexable(state: &StateInfo, content: Option<&LocationContent>) -> bool {
    state.major_cities.len() >= MIN_STATE_CITIES
        && !content.map(LocationContent::looks_like_placeholder).unwrap_or(false)
}

/// Specialty page narrowed to a state or city
#[inline]
pub fn specialty_location_indexable(profile_count: usize) -> bool {
    profile_count >= MIN_INDEXABLE_PROFILES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentKind;

    #[test]
    fn test_city_rules() {
        let registry = LocationRegistry::builtin();

        assert!(city_indexable(&registry, "texas", "austin", 0));
        assert!(!city_indexable(&registry, "texas", "el-paso", 2));
        assert!(city_indexable(&registry, "texas", "el-paso", 3));
    }

    #[test]
    fn test_state_rules() {
        let registry = LocationRegistry::builtin();
        let texas = registry.state("texas").unwrap();
        let alaska = registry.state("alaska").unwrap();

        assert!(state_indexable(texas, None));
        assert!(!state_indexable(alaska, None));

        let mut content = LocationContent::new(ContentKind::State, "texas", None);
        content.description = Some("Placeholder text".into());
        assert!(!state_indexable(texas, Some(&content)));
    }

    #[test]
    fn test_specialty_location_rule() {
        assert!(!specialty_location_indexable(2));
        assert!(specialty_location_indexable(3));
    }
}
