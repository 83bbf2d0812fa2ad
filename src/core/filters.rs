use crate::models::{PreferredType, Profile};
use crate::registry::Specialty;

/// Profession keywords that mark a licensed therapist
pub const THERAPIST_KEYWORDS: &[&str] = &["therapist", "lmft", "lpc", "lcsw"];

/// Profession keywords that mark clergy
pub const CLERGY_KEYWORDS: &[&str] = &["pastor", "priest", "clergy", "minister"];

/// Check if a profile fits the couple's preferred counselor type
///
/// Case-insensitive substring match on the profession text. `Either` keeps
/// every profile; a profile without a profession only passes `Either`.
#[inline]
pub fn matches_preferred_type(profile: &Profile, preferred: PreferredType) -> bool {
    let keywords = match preferred {
        PreferredType::Either => return true,
        PreferredType::Therapist => THERAPIST_KEYWORDS,
        PreferredType::Clergy => CLERGY_KEYWORDS,
    };

    let Some(profession) = profile.profession.as_deref() else {
        return false;
    };
    let profession = profession.to_lowercase();

    keywords.iter().any(|k| profession.contains(k))
}

/// Listing visibility check applied to every pool
#[inline]
pub fn is_listable(profile: &Profile) -> bool {
    !profile.is_hidden
}

/// Filter a pool by preferred type, keeping pool order
pub fn filter_by_preferred_type(pool: Vec<Profile>, preferred: PreferredType) -> Vec<Profile> {
    pool.into_iter()
        .filter(is_listable)
        .filter(|p| matches_preferred_type(p, preferred))
        .collect()
}

/// Filter a pool down to profiles qualifying for a specialty
pub fn filter_by_specialty(pool: Vec<Profile>, specialty: &Specialty) -> Vec<Profile> {
    pool.into_iter()
        .filter(|p| specialty.matches_profile(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(id: &str, profession: Option<&str>) -> Profile {
        let mut profile: Profile =
            serde_json::from_value(serde_json::json!({ "id": id, "full_name": "Test" })).unwrap();
        profile.profession = profession.map(str::to_string);
        profile
    }

    #[test]
    fn test_therapist_keywords() {
        let lmft = create_test_profile("1", Some("Licensed LMFT"));
        let counselor = create_test_profile("2", Some("Marriage and Family Therapist"));
        let pastor = create_test_profile("3", Some("Senior Pastor"));

        assert!(matches_preferred_type(&lmft, PreferredType::Therapist));
        assert!(matches_preferred_type(&counselor, PreferredType::Therapist));
        assert!(!matches_preferred_type(&pastor, PreferredType::Therapist));
    }

    #[test]
    fn test_clergy_keywords() {
        let priest = create_test_profile("1", Some("PRIEST"));
        let minister = create_test_profile("2", Some("Ordained minister"));
        let lpc = create_test_profile("3", Some("LPC"));

        assert!(matches_preferred_type(&priest, PreferredType::Clergy));
        assert!(matches_preferred_type(&minister, PreferredType::Clergy));
        assert!(!matches_preferred_type(&lpc, PreferredType::Clergy));
    }

    #[test]
    fn test_either_keeps_all_and_missing_profession() {
        let bare = create_test_profile("1", None);
        assert!(matches_preferred_type(&bare, PreferredType::Either));
        assert!(!matches_preferred_type(&bare, PreferredType::Therapist));
        assert!(!matches_preferred_type(&bare, PreferredType::Clergy));
    }

    #[test]
    fn test_filter_drops_hidden_and_keeps_order() {
        let mut hidden = create_test_profile("h", Some("Therapist"));
        hidden.is_hidden = true;
        let pool = vec![
            create_test_profile("b", Some("LCSW")),
            hidden,
            create_test_profile("p", Some("Pastor")),
            create_test_profile("a", Some("therapist")),
        ];

        let filtered = filter_by_preferred_type(pool, PreferredType::Therapist);
        let ids: Vec<_> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
