//! Test utilities for propsched development.
//!
//! Provides seeded, reproducible workloads ([`RepeatingWorkload`]) and
//! small fixture helpers for building times, groups and expectations.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod workload;

pub use fixtures::{bucket_times, drain_raw, group, time};
pub use workload::{RepeatingWorkload, TimeOrder, WorkloadIter};
