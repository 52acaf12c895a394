//! # Near-Earth object records
//!
//! Deserialization of the NASA NeoWs `neo/{id}` document and its conversion into the
//! SI types used by the rest of the crate.
//!
//! Only the fields the deflection pipeline needs are modeled. Everything else in the
//! document is ignored. NeoWs publishes most numbers as JSON strings (`"1.4587"`),
//! so every numeric field accepts either a string or a number. Any other JSON value
//! (`true`, an array, an object) still parses and is reported as an input validation
//! error on the field once it is read.
//!
//! Units at this boundary
//! -----------------
//! * `semi_major_axis`: AU
//! * angles: degrees
//! * `epoch_osculation`: Julian Date (TDB)
//! * diameters: meters
//!
//! Fetching a record over the network is not part of this crate. The [`NeoSource`]
//! trait is the seam where a fetcher plugs in; [`NeoCatalog`] is an in-memory source
//! filled from NeoWs documents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    asteroid::Asteroid,
    constants::{AU, RADEG},
    impactor_errors::ImpactorError,
    orbit_type::keplerian_element::KeplerianElements,
    time::epoch_from_jd_tdb,
};

/// Name echoed when a record carries none.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A NeoWs numeric value, published either as a string or as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NeoNumber {
    Number(f64),
    Text(String),
    /// Any other JSON value, rejected by [`NeoNumber::to_f64`].
    Other(serde_json::Value),
}

impl NeoNumber {
    /// Parse the value as a finite `f64`, naming `field` in the error.
    pub fn to_f64(&self, field: &str) -> Result<f64, ImpactorError> {
        let value = match self {
            NeoNumber::Number(v) => *v,
            NeoNumber::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                ImpactorError::invalid(field, format!("expected a number, got {s:?}"))
            })?,
            NeoNumber::Other(v) => {
                return Err(ImpactorError::invalid(
                    field,
                    format!("expected a number, got {v}"),
                ))
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ImpactorError::invalid(
                field,
                format!("expected a finite number, got {value}"),
            ))
        }
    }
}

impl From<f64> for NeoNumber {
    fn from(value: f64) -> Self {
        NeoNumber::Number(value)
    }
}

/// Osculating elements as published by NeoWs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitalData {
    pub semi_major_axis: Option<NeoNumber>,
    pub eccentricity: Option<NeoNumber>,
    pub inclination: Option<NeoNumber>,
    pub ascending_node_longitude: Option<NeoNumber>,
    pub perihelion_argument: Option<NeoNumber>,
    pub mean_anomaly: Option<NeoNumber>,
    pub epoch_osculation: Option<NeoNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: Option<NeoNumber>,
    pub estimated_diameter_max: Option<NeoNumber>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: Option<DiameterRange>,
}

/// The subset of a NeoWs object used by the deflection pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeoRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub orbital_data: Option<OrbitalData>,
    #[serde(default)]
    pub estimated_diameter: Option<EstimatedDiameter>,
}

/// Read a required numeric field, reporting its full path when absent or malformed.
pub(crate) fn required(value: Option<&NeoNumber>, path: &str) -> Result<f64, ImpactorError> {
    value
        .ok_or_else(|| ImpactorError::invalid(path, "missing field"))?
        .to_f64(path)
}

impl NeoRecord {
    /// Parse a NeoWs JSON document.
    ///
    /// Errors
    /// ------
    /// * [`ImpactorError::JsonError`] if the document is not valid JSON or an object has
    ///   the wrong shape. Missing or non-numeric values are only reported when they are used.
    pub fn from_json(json: &str) -> Result<Self, ImpactorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Name to echo in reports, `"Unknown"` when the record has none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_NAME)
    }

    /// Osculating elements in SI units (meters, radians, [`hifitime::Epoch`] in TDB).
    ///
    /// Errors
    /// ------
    /// * [`ImpactorError::InputValidation`] naming the field path
    ///   (e.g. `orbital_data.eccentricity`) if a field is missing or not a number.
    /// * Any validation error from [`KeplerianElements::new`] (e.g. `e ≥ 1`).
    pub fn keplerian_elements(&self) -> Result<KeplerianElements, ImpactorError> {
        let data = self
            .orbital_data
            .as_ref()
            .ok_or_else(|| ImpactorError::invalid("orbital_data", "missing field"))?;

        let a_au = required(data.semi_major_axis.as_ref(), "orbital_data.semi_major_axis")?;
        let ecc = required(data.eccentricity.as_ref(), "orbital_data.eccentricity")?;
        let incl = required(data.inclination.as_ref(), "orbital_data.inclination")?;
        let node = required(
            data.ascending_node_longitude.as_ref(),
            "orbital_data.ascending_node_longitude",
        )?;
        let peri = required(
            data.perihelion_argument.as_ref(),
            "orbital_data.perihelion_argument",
        )?;
        let mean = required(data.mean_anomaly.as_ref(), "orbital_data.mean_anomaly")?;
        let jd = required(data.epoch_osculation.as_ref(), "orbital_data.epoch_osculation")?;

        debug!(
            name = self.display_name(),
            a_au, ecc, incl, node, peri, mean, jd, "parsed NeoWs orbital data"
        );

        KeplerianElements::new(
            epoch_from_jd_tdb(jd)?,
            a_au * AU,
            ecc,
            incl * RADEG,
            node * RADEG,
            peri * RADEG,
            mean * RADEG,
        )
    }

    /// Estimated diameter range `(min, max)` in meters.
    pub fn diameter_range(&self) -> Result<(f64, f64), ImpactorError> {
        let meters = self
            .estimated_diameter
            .as_ref()
            .and_then(|d| d.meters.as_ref())
            .ok_or_else(|| ImpactorError::invalid("estimated_diameter.meters", "missing field"))?;

        Ok((
            required(
                meters.estimated_diameter_min.as_ref(),
                "estimated_diameter.meters.estimated_diameter_min",
            )?,
            required(
                meters.estimated_diameter_max.as_ref(),
                "estimated_diameter.meters.estimated_diameter_max",
            )?,
        ))
    }

    /// Build the [`Asteroid`] from the mean estimated diameter and a bulk density (kg/m³).
    pub fn asteroid(&self, density: f64) -> Result<Asteroid, ImpactorError> {
        let (diameter_min, diameter_max) = self.diameter_range()?;
        Asteroid::from_diameter_range(diameter_min, diameter_max, density)
    }
}

/// Provider of NeoWs records by object id.
pub trait NeoSource {
    /// Errors
    /// ------
    /// * [`ImpactorError::ExternalDataUnavailable`] if the record cannot be obtained.
    fn fetch(&self, id: &str) -> Result<NeoRecord, ImpactorError>;
}

/// In-memory [`NeoSource`] keyed by NeoWs id.
#[derive(Debug, Clone, Default)]
pub struct NeoCatalog {
    records: HashMap<String, NeoRecord>,
}

impl NeoCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record; it must carry an `id`. Returns the record it replaced, if any.
    pub fn insert(&mut self, record: NeoRecord) -> Result<Option<NeoRecord>, ImpactorError> {
        let id = record
            .id
            .clone()
            .ok_or_else(|| ImpactorError::invalid("id", "a catalog record needs an id"))?;
        Ok(self.records.insert(id, record))
    }

    /// Parse a NeoWs document and add it to the catalog.
    pub fn insert_json(&mut self, json: &str) -> Result<Option<NeoRecord>, ImpactorError> {
        self.insert(NeoRecord::from_json(json)?)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<NeoRecord> for NeoCatalog {
    /// Records without an id are skipped.
    fn from_iter<T: IntoIterator<Item = NeoRecord>>(iter: T) -> Self {
        let records = iter
            .into_iter()
            .filter_map(|record| record.id.clone().map(|id| (id, record)))
            .collect();
        NeoCatalog { records }
    }
}

impl NeoSource for NeoCatalog {
    fn fetch(&self, id: &str) -> Result<NeoRecord, ImpactorError> {
        self.records.get(id).cloned().ok_or_else(|| {
            ImpactorError::ExternalDataUnavailable(format!("no NeoWs record for id {id}"))
        })
    }
}
