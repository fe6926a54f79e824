//! pv-core: stable foundation for the PV simulator.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + guarded trig helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PvError, PvResult};
pub use numeric::*;
pub use units::*;
