//! # Analysis Module
//!
//! Checks a quiz against a taxonomy.
//!
//! - `coverage`: category set equality and option distribution
//! - `balance`: per-question structure
//! - `simulation`: dominant profiles of random respondents
//! - `targeted`: whether each profile can win when aimed for
//!
//! Every analysis is a pure function of `(quiz, taxonomy, config)`.

mod balance;
mod coverage;
mod simulation;
mod targeted;

pub use balance::*;
pub use coverage::*;
pub use simulation::*;
pub use targeted::*;
