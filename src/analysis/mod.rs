//! Pure time-series routines behind the analysis queries.
//!
//! Nothing in here touches the store: each function takes plain values and
//! returns derived values, so they can be used on any series.

pub mod decomposition;
pub mod extremes;
pub mod policy;

pub use decomposition::{decompose, decompose_series, Components};
pub use extremes::extremes;
pub use policy::RangePolicy;
