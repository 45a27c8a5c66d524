//! Feature rollout to whole clusters of connected entities.
//!
//! A population is split into connected groups by an adjacency function;
//! either the group around an anchor entity is selected, or a set of whole
//! groups whose combined size comes as close as possible to a target.
use ahash::RandomState;

pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, RandomState>;

mod error;
pub use error::{Result, SelectionError};
pub mod control;
pub use control::{InfectionControl, Infector, Tagger};
pub mod orchestrator;
pub use orchestrator::{select_all, select_bounded, select_group_of};
pub mod partition;
pub use partition::{partition, Group};
pub mod population;
pub use population::Population;
pub mod selector;
pub use selector::select_groups;
pub mod timing;
pub use timing::timing_report;

pub use infection_structs::config::SelectionConfig;
pub use infection_subset_sum::Algorithm;
