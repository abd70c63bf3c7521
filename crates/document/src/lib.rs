//! Configuration documents for gridwire.
//!
//! The topology compiler only needs a small read-only view of a document: tag names,
//! attributes, text content and ordered children. [`Element`] is that view, and the
//! [`kdl`](crate::kdl) module builds it from KDL (v2) source:
//!
//! ```kdl
//! coherence-config default-lazy-init=#false {
//!     distributed-service-scheme id="dist" {
//!         service-name "DistributedCache"
//!         thread-count 4
//!         task-timeout "30s"
//!     }
//! }
//! ```
//!
//! Node names become tags, `key=value` entries become attributes, the first positional
//! argument becomes the element text and a children block becomes child elements.

pub mod element;
pub mod error;
pub mod kdl;

pub use element::Element;
pub use error::{DocumentError, Result};
pub use crate::kdl::Document;
