//! # Orbit representations
//!
//! The two equivalent descriptions of a heliocentric two-body orbit used by the
//! deflection pipeline:
//!
//! - [`keplerian_element`](crate::orbit_type::keplerian_element): classical elements
//!   `(a, e, i, Ω, ω, M)` at a reference epoch, restricted to bound ellipses.
//! - [`state_vector`](crate::orbit_type::state_vector): Cartesian position and velocity
//!   in the heliocentric ecliptic frame, tagged with their epoch.
//!
//! Conversions between both live in [`crate::orb_elem`].
//!
//! ```rust, no_run
//! use impactor::time::epoch_from_jd_tdb;
//! use impactor::constants::{AU, GM_SUN};
//! use impactor::orb_elem::{elements_to_state, state_to_elements};
//! use impactor::orbit_type::keplerian_element::KeplerianElements;
//!
//! let kep = KeplerianElements::new(epoch_from_jd_tdb(2460600.5).unwrap(), 1.5 * AU, 0.2, 0.17, 0.87, 1.05, 0.52)
//!     .unwrap();
//! let nu = kep.true_anomaly().unwrap();
//! let state = elements_to_state(&kep, nu, GM_SUN).unwrap();
//! let (back, nu_back) = state_to_elements(&state, GM_SUN).unwrap();
//! ```

/// Classical Keplerian elements structure and utilities.
pub mod keplerian_element;

/// Heliocentric Cartesian state vectors.
pub mod state_vector;
