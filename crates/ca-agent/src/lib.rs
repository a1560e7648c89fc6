//! `ca-agent` — households and how they decide.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`profile`]     | `Archetype`, `HouseholdProfile`, `ProfileSampler`             |
//! | [`household`]   | `HouseholdAgent`, `DecisionParams`, `ActivationReport`        |
//! | [`population`]  | `Population`: all households plus a running adoption count   |
//!
//! # Decision step
//!
//! Each activation runs a fixed sequence: utility → logistic adoption
//! probability → adoption trial → ownership-drop trial (only in the step
//! adoption succeeds) → one booking attempt per trip if the household has
//! adopted and no longer owns a car.  See [`HouseholdAgent::activate`].

pub mod household;
pub mod population;
pub mod profile;


pub use household::{ActivationReport, DecisionParams, HouseholdAgent, logistic};
pub use population::Population;
pub use profile::{Archetype, HouseholdProfile, ProfileSampler};
