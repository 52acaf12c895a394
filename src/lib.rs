pub mod asteroid;
pub mod constants;
pub mod export;
pub mod impact;
pub mod impactor_errors;
pub mod kepler;
pub mod maneuver;
pub mod neo_record;
pub mod orb_elem;
pub mod orbit_type;
pub mod orbital_change;
pub mod propagator;
pub mod ref_system;
pub mod time;
pub mod trajectory;

pub use impact::{calculate_impact, CalculationSettings, ImpactParameters, ImpactResult};
pub use impactor_errors::ImpactorError;
