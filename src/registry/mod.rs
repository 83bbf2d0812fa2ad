pub mod locations;
pub mod specialties;

pub use locations::{CityInfo, CityRoute, LocationRegistry, StateInfo};
pub use specialties::{Faq, Specialty, SpecialtyRegistry};

/// Static registries shared by every request
#[derive(Debug, Clone)]
pub struct Registries {
    pub locations: LocationRegistry,
    pub specialties: SpecialtyRegistry,
}

impl Registries {
    pub fn new(locations: LocationRegistry, specialties: SpecialtyRegistry) -> Self {
        Self {
            locations,
            specialties,
        }
    }

    pub fn builtin() -> Self {
        Self::new(LocationRegistry::builtin(), SpecialtyRegistry::builtin())
    }
}
