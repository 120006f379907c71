//! Rig table: operator-forced outcomes for upcoming rounds.
//!
//! ## Lifecycle
//!
//! - Created by operator action via [`RigTable::set`]
//! - Consumed when its round is resolved
//! - Purged when its target candidate leaves the wheel
//! - Dropped wholesale when an elimination cycle completes
//!
//! A candidate reserved for a later round is *protected*: random selection
//! avoids it until its round comes up.

mod table;

pub use table::RigTable;
