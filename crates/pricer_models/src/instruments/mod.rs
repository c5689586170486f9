//! Structured product definitions.
//!
//! # Instrument Types
//!
//! - [`AutocallableWorstOf`]: Worst-of autocallable note with a capital
//!   protection barrier, evaluated on normalised basket levels
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::AutocallableWorstOf;
//!
//! let note = AutocallableWorstOf::new(1.0, vec![0.25, 0.5, 0.75, 1.0], 0.08, 1.0, 0.6, 100.0).unwrap();
//! let later = note.remaining(0.5).unwrap();
//!
//! assert_eq!(later.obs_times().len(), 2);
//! assert!((later.maturity() - 0.5).abs() < 1e-15);
//! ```

mod autocallable;
mod error;

pub use autocallable::{AutocallableWorstOf, Redemption};
pub use error::{PayoffError, ProductError};
