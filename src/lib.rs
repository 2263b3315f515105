//! # Filament
//!
//! Runtime substrate for typed event circuits: entities emit values through
//! named channels, interested parties subscribe to be notified when new
//! channels appear, and observers passively accumulate emissions for later
//! retrieval.
//!
//! ## Core Concepts
//!
//! - **Identity**: process-unique [`Identifier`]s, interned hierarchical
//!   [`Name`]s, and lazily materialized [`Subject`]s forming an identity tree
//! - **Lookup**: memoizes one percept instance per name, with a
//!   single-surviving-factory-call guarantee under races
//! - **Reservoir**: buffers every emission observed under a source and
//!   drains each capture exactly once
//! - **Subscriber/Subscription**: the channel-discovery callback and its
//!   idempotent unsubscribe handle
//!
//! The routing engine that moves emissions from emitters to pipes is an
//! external collaborator, reached through the [`Source`] and [`Registrar`]
//! traits.
//!
//! ## Example
//!
//! ```ignore
//! use filament::{Name, Reservoir, Substrate};
//!
//! let reservoir = Reservoir::new(&source);
//! // ... the engine routes emissions ...
//! for capture in reservoir.drain() {
//!     println!("{} emitted {:?}", capture.subject().name(), capture.emission());
//! }
//! reservoir.close();
//! ```

pub mod error;
pub mod flow;
pub mod identity;
pub mod lookup;
pub mod reservoir;
pub mod subscribe;

// Re-exports
pub use error::{Result, SubstrateError};
pub use flow::{Pipe, Registrar, Source, Substrate};
pub use identity::{Capability, Identifier, Name, Slots, State, StateValue, Subject};
pub use lookup::Lookup;
pub use reservoir::{Capture, Reservoir};
pub use subscribe::{Subscriber, Subscription};
