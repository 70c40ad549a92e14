//! Orrery application: a headless render-loop driver, the overlay state and
//! the run loop tying them to a configured scene.

pub mod driver;
pub mod overlay;
mod run;

pub use run::{AppError, RunReport, run};
