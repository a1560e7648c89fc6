//! `ca-fleet` — the shared-car fleet households book against.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`pool`]   | `SharedFleetPool`, `BookingOutcome`, `BookingPool` trait |
//!
//! # Contention model
//!
//! Capacity is shared by every household within a step and consumed in
//! activation order, so households activated early have first claim on
//! scarce cars.  The pool is reset to full capacity at the start of every
//! step by the engine.

pub mod pool;


pub use pool::{BookingOutcome, BookingPool, SharedFleetPool};
