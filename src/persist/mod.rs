//! Persistence of values and applied calls through serde.
//!
//! Callables cannot be serialized, so a [`Snapshot`] records functions by
//! name and a [`Registry`] maps the names back to callables on restore.
//! Applied calls travel as the state exported by
//! [`Applied::reduce`](crate::Applied::reduce) and are rebuilt with
//! [`Applied::restore_state`](crate::Applied::restore_state).
//!
//! Slot sharing is not preserved: every slot reference restores as its own
//! slot. Cyclic values cannot be captured.

mod registry;
mod snapshot;

pub use registry::Registry;
pub use snapshot::Snapshot;
