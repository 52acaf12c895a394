//! CSV export of sampled trajectories for external plotting tools.
//!
//! One row per sample:
//!
//! ```text
//! orbit,index,x_km,y_km,z_km
//! original,0,1.2e8,...
//! final,0,1.2e8,...
//! ```

use std::{fs::File, io::Write, path::Path};

use serde::{Deserialize, Serialize};

use crate::{impact::ImpactResult, impactor_errors::ImpactorError};

/// Which orbit a trajectory sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitLabel {
    Original,
    Final,
}

/// One CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRow {
    pub orbit: OrbitLabel,
    pub index: usize,
    pub x_km: f64,
    pub y_km: f64,
    pub z_km: f64,
}

fn rows(label: OrbitLabel, samples: &[[f64; 3]]) -> impl Iterator<Item = TrajectoryRow> + '_ {
    samples
        .iter()
        .enumerate()
        .map(move |(index, [x_km, y_km, z_km])| TrajectoryRow {
            orbit: label,
            index,
            x_km: *x_km,
            y_km: *y_km,
            z_km: *z_km,
        })
}

/// Write both trajectories of `result` as CSV, original orbit first.
pub fn write_trajectories_csv<W: Write>(
    result: &ImpactResult,
    writer: W,
) -> Result<(), ImpactorError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for row in rows(OrbitLabel::Original, &result.trajectory_original_km)
        .chain(rows(OrbitLabel::Final, &result.trajectory_final_km))
    {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Same as [`write_trajectories_csv`], creating (or truncating) the file at `path`.
pub fn write_trajectories_csv_file(
    result: &ImpactResult,
    path: impl AsRef<Path>,
) -> Result<(), ImpactorError> {
    let file = File::create(path)?;
    write_trajectories_csv(result, file)
}
