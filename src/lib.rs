//! Multi-objective water wave optimization for medical supply scheduling.
//!
//! Schedules supplies and patients between civilian and military medical
//! facilities during a public-health emergency, trading off supply
//! satisfaction against scheduling cost:
//!
//! - **Problem model** ([`problem`]): validated instance data, the integer
//!   decision variables of a plan, both objectives and constraints
//!   (18)–(30), with pluggable repair and feasibility strategies.
//! - **Ranking** ([`pareto`]): feasibility-aware Pareto dominance and
//!   layered non-dominated sorting.
//! - **Search** ([`wwo`]): the MOWWO loop, with rank-driven wave
//!   propagation, elitist per-slot replacement, front-triggered local search
//!   and stagnation recovery.
//!
//! # Features
//!
//! - `parallel`: evaluate each generation with rayon (enable per run with
//!   [`MowwoConfig::parallel`](wwo::MowwoConfig::parallel))
//! - `serde`: (de)serialize instance data, plans, objectives and configs
//!
//! # Logging
//!
//! Progress is reported through the [`log`] facade: run summaries at
//! `info`, one line per generation at `debug`, individual replacements and
//! reinitializations at `trace`. No logger is installed by the crate.

pub mod error;
pub mod pareto;
pub mod problem;
pub mod wwo;

pub use error::{ConfigError, InstanceError};
pub use problem::{MedicalSupplyProblem, ProblemInstance, Solution};
pub use wwo::{MowwoConfig, MowwoResult, MowwoRunner};
