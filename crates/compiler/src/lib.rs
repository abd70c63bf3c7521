//! Schema-driven topology compiler.
//!
//! Turns a cache-cluster configuration document into a graph of component
//! [descriptors](descriptor::Descriptor): services with their linked configuration
//! components, cache schemes, backing maps and listener sets. The consuming runtime
//! instantiates the graph; this crate only describes it.
//!
//! # Pipeline
//!
//! * [`path`] addresses nested elements and attributes (`a/b/c@attr`).
//! * [`value`] parses what a path selects: text, durations, sizes, enumerations, nested
//!   components, listener sets and collections.
//! * [`template`] binds paths to properties for one tag and fills defaults;
//!   [`CompositeTemplate`](template::CompositeTemplate) pairs a service with its
//!   configuration component.
//! * [`schema`] maps every tag to its handler.
//! * [`registry`] owns the addressable descriptors of one pass.
//! * [`compile`] drives a pass and produces a [`Topology`].
//! * [`deferred`] provides the blocking one-shot gate for caches whose configuration
//!   completes after they are handed out.
//!
//! ```
//! use gridwire_compiler::{CompileOptions, compile_str};
//!
//! let topology = compile_str(
//!     r#"
//!     coherence-config {
//!         invocation-service-scheme id="invoker" {
//!             service-name "InvocationService"
//!             thread-count 4
//!         }
//!     }
//!     "#,
//!     CompileOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(topology.len(), 2);
//! assert!(topology.get("invoker#CONFIG").is_some());
//! ```

pub mod compile;
pub mod context;
pub mod deferred;
pub mod descriptor;
pub mod error;
pub mod path;
pub mod registry;
pub mod schema;
pub mod template;
pub mod topology;
pub mod value;

pub use compile::{Compiler, compile_str};
pub use context::{CompileContext, CompileOptions};
pub use deferred::{DeferredAccessError, DeferredCache, ReadyCell};
pub use descriptor::{Descriptor, Holder, Value};
pub use error::{CompileError, CompileWarning, Result};
pub use schema::Schema;
pub use topology::Topology;
