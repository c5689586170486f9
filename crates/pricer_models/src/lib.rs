//! # Pricer Models (L2: Business Logic)
//!
//! Product definitions and payoff evaluation.
//!
//! This crate provides:
//! - The worst-of autocallable note ([`instruments::AutocallableWorstOf`])
//! - Its payoff evaluator: redemption amount and time for one trajectory
//! - Remaining-horizon derivation for pricing from an intermediate date
//!
//! ## Design Principles
//!
//! - **Validated value objects**: private fields, checked constructors
//! - **Pure payoff evaluation**: no side effects, deterministic
//! - **New instances over mutation**: a product seen from a later date is a
//!   fresh value

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;

pub use instruments::{AutocallableWorstOf, PayoffError, ProductError, Redemption};
