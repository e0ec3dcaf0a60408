//! SRPSO Rust Library
//!
//! This library provides a self-regulating particle swarm optimizer for
//! mixed continuous/integer search spaces, including:
//! - Decoding variable tables of real, integer and fixed parameters
//! - Maximizing arbitrary objectives over a bundle of train/test data
//! - Per-particle asymmetric inertia adaptation and a gated social term
//! - Sequential and parallel swarm evaluation with reproducible seeding
//! - Progress observers, convergence histories and JSON/CSV export

#![warn(unused_imports)]

/// Commonly used types and functionality re-exported for convenience
pub mod prelude {
    pub use crate::benchmarks;
    pub use crate::io::*;
    pub use crate::objective::{data::*, error::*, objfun::*};
    pub use crate::optim::{
        error::*, evaluator::*, history::*, observer::*, optimizers::SRPSO, params::*, problem::*,
        report::*, variables::*,
    };
}

/// Objective functions and the data they are evaluated on
pub mod objective {
    pub use crate::objective::data::*;
    pub use crate::objective::error::*;
    pub use crate::objective::objfun::*;

    /// Train/test data handed to every evaluation
    pub mod data;
    /// Error types for failing objectives
    pub mod error;
    /// The objective trait
    pub mod objfun;
}

/// Particle swarm optimization
pub mod optim {
    pub use crate::optim::error::*;
    pub use crate::optim::evaluator::*;
    pub use crate::optim::history::*;
    pub use crate::optim::observer::*;
    pub use crate::optim::optimizers::SRPSO;
    pub use crate::optim::params::*;
    pub use crate::optim::problem::*;
    pub use crate::optim::report::*;
    pub use crate::optim::variables::*;

    pub mod error;
    pub mod evaluator;
    pub mod history;
    pub mod inertia;
    pub mod observer;
    pub mod params;
    pub mod problem;
    pub mod report;
    pub mod rng;
    pub mod swarm;
    pub mod tracker;
    pub mod update;
    pub mod variables;

    pub mod optimizers {
        pub use crate::optim::optimizers::srpso::SRPSO;
        pub mod srpso;
    }
}

/// Reference objectives for testing and benchmarking
pub mod benchmarks;

/// Table rendering of variables and reports
pub mod info;

/// IO functionality
pub mod io;
