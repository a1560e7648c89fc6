//! `ca-core` — foundational types for the `carshare_abm` simulation.
//!
//! This crate is a dependency of every other `ca-*` crate.  It has no `ca-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `AgentId`                                             |
//! | [`step`]    | `Step` counter                                        |
//! | [`rng`]     | `SimRng` (the single engine-owned random source)      |
//! | [`config`]  | `ModelConfig` and its validation gate                 |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                         |
//! |---------|----------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `ModelConfig`, `AgentId`, `Step`  |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ModelConfig;
pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use rng::SimRng;
pub use step::Step;
