//! Output JSON formatting for streaming simulations

use crate::config::StreamingConfig;
use crate::error::{Result, StreamingError};
use crate::grid::Grid;
use crate::soln::{Soln, to_cartesian};
use crate::solvers::{Order, StreamingSolution};
use ndarray::{Array2, Axis, Ix2, Ix3};
use serde::{Deserialize, Serialize};

/// Physical fields on a 2D grid at one instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSnapshot {
    /// Time of the snapshot
    pub t: f64,
    /// X coordinates
    pub x: Array2<f64>,
    /// Y coordinates
    pub y: Array2<f64>,
    /// Streamfunction
    pub psi: Array2<f64>,
    /// Vorticity
    pub omega: Array2<f64>,
    /// Radial velocity
    pub ur: Array2<f64>,
    /// Azimuthal velocity
    pub utheta: Array2<f64>,
    /// Cartesian x velocity (if requested)
    pub ux: Option<Array2<f64>>,
    /// Cartesian y velocity (if requested)
    pub uy: Option<Array2<f64>>,
}

/// Split a history solution into per-time snapshots
pub fn snapshots_from_history(
    history: &Soln<Ix3>,
    grid: &Grid<Ix2>,
    cartesian_velocity: bool,
) -> Result<Vec<SolutionSnapshot>> {
    let times = history.t().times();
    let axis = Axis(2);
    if history.shape()[2] != times.len() {
        return Err(StreamingError::LengthMismatch {
            left: history.shape()[2],
            right: times.len(),
        });
    }

    let velocity = if cartesian_velocity {
        Some(to_cartesian(history, grid)?)
    } else {
        None
    };

    Ok(times
        .iter()
        .enumerate()
        .map(|(k, &t)| SolutionSnapshot {
            t,
            x: grid.x().clone(),
            y: grid.y().clone(),
            psi: history.psi().index_axis(axis, k).to_owned(),
            omega: history.omega().index_axis(axis, k).to_owned(),
            ur: history.ur().index_axis(axis, k).to_owned(),
            utheta: history.utheta().index_axis(axis, k).to_owned(),
            ux: velocity.as_ref().map(|v| v.ux.index_axis(axis, k).to_owned()),
            uy: velocity.as_ref().map(|v| v.uy.index_axis(axis, k).to_owned()),
        })
        .collect())
}

/// Create output JSON for a finished sweep
pub fn create_output_json(
    config: &StreamingConfig,
    solution: &StreamingSolution,
    snapshots: &[SolutionSnapshot],
) -> Result<serde_json::Value> {
    let params = solution.params();
    let r = solution.first().r();

    Ok(serde_json::json!({
        "parameters": {
            "epsilon": params.epsilon(),
            "reynolds": params.reynolds(),
            "gamma": [params.gamma().re, params.gamma().im],
            "c": [params.c().re, params.c().im],
            "stokes_layer_thickness": params.stokes_layer_thickness(),
        },
        "radial": {
            "samples": r.len(),
            "r_min": r[0],
            "r_max": r[r.len() - 1],
            "spacing": config.radial.spacing,
        },
        "orders": Order::ALL.iter().map(|&order| {
            serde_json::json!({
                "order": order,
                "harmonic": order.harmonic(),
                "epsilon_power": order.power(),
                "max_abs_psi": solution.max_abs_psi(order),
            })
        }).collect::<Vec<_>>(),
        "grid": config.grid,
        "snapshots": serde_json::to_value(snapshots)?,
        "metadata": {
            "description": config.metadata.description,
            "date": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        },
    }))
}
