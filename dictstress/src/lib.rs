//! Differential stress testing for open-addressing hash tables.
//!
//! A reference table and a candidate table receive the same randomized
//! sequence of inserts, updates, single removals and mass removals. After
//! every mutation both tables are dumped into a [`Snapshot`] of their physical
//! layout and the two snapshots must be identical, slot by slot.
//!
//! ```
//! use dictstress::{OpChances, RunConfig};
//!
//! let config = RunConfig {
//!     n_inserts: 1000,
//!     extra_checks: true,
//!     chances: OpChances::default(),
//! };
//! assert_eq!(config.chances.single_remove, 0.3);
//! ```

use rand::Rng;
use std::fmt::Debug;
use std::hash::Hash;

mod error;
pub use error::{Error, Result};

mod model;
pub use model::{FastContains, Implementation, KeyValueFactory, Model, NotFound};

mod snapshot;
pub use snapshot::{Cell, Snapshot};

pub mod checker;
pub use checker::{verify_same, Mismatch};

mod generator;
pub use generator::{OpChances, OpGenerator, MASS_REMOVE_MIN_LEN};

mod runner;
pub use runner::{run, RunConfig, RunStats, Session};
