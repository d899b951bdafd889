//! Debug tooling for sbt behaviour trees.
//!
//! Kept out of `sbt-core` so the engine stays free of presentation concerns.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod dump;

pub use dump::{dump, DumpOptions};
