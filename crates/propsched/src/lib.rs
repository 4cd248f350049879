//! Time-ordered update scheduling for propagator networks.
//!
//! A propagator network recomputes cells in rounds; each round fires the
//! update groups scheduled for one logical time. This crate owns the
//! ordering of that work and nothing else: it does not know what a cell
//! computes or when the network has converged.
//!
//! # Architecture
//!
//! ```text
//! Scheduler (façade)
//! ├── BucketStore: slab of buckets + IndexMap<time, slot> + min-heap of times
//! │   └── Bucket { time, Vec<UpdateGroup> }  (append-only, insertion order)
//! ├── ActiveIndex: IndexMap<NodeId, refcount> over each group's last step
//! └── SchedulerMetrics: cumulative counters
//! SharedScheduler: Arc<Mutex<Scheduler>> for several threads
//! ```
//!
//! Inserts at equal times merge into one bucket, so the number of live
//! buckets tracks the number of distinct pending times rather than the
//! number of inserts.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod active;
pub mod config;
pub mod error;
pub mod group;
pub mod metrics;
pub mod scheduler;
pub mod shared;
pub mod store;
pub mod time;

pub use config::{EmptyGroupPolicy, SchedulerConfig};
pub use error::{ScheduleError, TimeError};
pub use group::{NodeId, UpdateGroup};
pub use metrics::SchedulerMetrics;
pub use scheduler::{Drain, Scheduler};
pub use shared::{SharedScheduler, TryUnwrapError};
pub use store::Bucket;
pub use time::{LogicalTime, Time};
