//! Household heterogeneity: archetypes and their fixed profile vectors.

use std::sync::Arc;

use ca_core::SimRng;

/// The closed set of household groups.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Archetype {
    /// Daily work trips; the car is a habit, not a necessity.
    Commuter,
    /// Heavy care duties; penalized most by unreliable bookings.
    Caregiver,
    /// Price-sensitive, most socially influenced.
    Budget,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Archetype::Commuter, Archetype::Caregiver, Archetype::Budget];

    /// Population share drawn at initialization.  Sums to 1.
    pub fn weight(self) -> f64 {
        match self {
            Archetype::Commuter  => 0.4,
            Archetype::Caregiver => 0.3,
            Archetype::Budget    => 0.3,
        }
    }

    /// Position in [`Archetype::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Archetype::Commuter  => 0,
            Archetype::Caregiver => 1,
            Archetype::Budget    => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Commuter  => "commuter",
            Archetype::Caregiver => "caregiver",
            Archetype::Budget    => "budget",
        }
    }

    /// The fixed profile vector for this archetype.
    pub fn profile(self) -> HouseholdProfile {
        let (income, commute_need, caregiving_need, price_sensitivity, social_susceptibility) =
            match self {
                Archetype::Commuter  => (1.2, 0.8, 0.2, 0.5, 0.4),
                Archetype::Caregiver => (1.0, 0.4, 0.9, 0.6, 0.5),
                Archetype::Budget    => (0.8, 0.3, 0.3, 0.9, 0.6),
            };
        HouseholdProfile {
            archetype: self,
            income,
            commute_need,
            caregiving_need,
            price_sensitivity,
            social_susceptibility,
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized, immutable household characteristics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HouseholdProfile {
    pub archetype:             Archetype,
    /// Income proxy.  Carried for analysis; the decision rule does not read it.
    pub income:                f64,
    pub commute_need:          f64,
    pub caregiving_need:       f64,
    pub price_sensitivity:     f64,
    pub social_susceptibility: f64,
}

impl HouseholdProfile {
    /// Trips needed per step: one baseline, plus one each for high commute
    /// and high caregiving need.  Always in `1..=3`.
    pub fn trips_per_step(&self) -> u32 {
        1 + u32::from(self.commute_need > 0.6) + u32::from(self.caregiving_need > 0.6)
    }
}

/// Draws archetype profiles from the fixed categorical distribution.
///
/// Holds one shared `Arc<HouseholdProfile>` per archetype, so every household
/// of the same group points at the same immutable profile.
pub struct ProfileSampler {
    profiles: [Arc<HouseholdProfile>; 3],
}

impl ProfileSampler {
    pub fn new() -> Self {
        Self { profiles: Archetype::ALL.map(|a| Arc::new(a.profile())) }
    }

    /// Pick an archetype with one uniform draw against cumulative weights
    /// (commuter, caregiver, budget in that order).
    pub fn draw_archetype(&self, rng: &mut SimRng) -> Archetype {
        let u = rng.uniform();
        let mut cumulative = 0.0;
        for archetype in Archetype::ALL {
            cumulative += archetype.weight();
            if u < cumulative {
                return archetype;
            }
        }
        // Only reachable through float rounding at u ≈ 1.
        Archetype::Budget
    }

    /// Draw one household profile.  Consumes exactly one uniform draw.
    pub fn sample(&self, rng: &mut SimRng) -> Arc<HouseholdProfile> {
        let archetype = self.draw_archetype(rng);
        Arc::clone(&self.profiles[archetype.index()])
    }
}

impl Default for ProfileSampler {
    fn default() -> Self {
        Self::new()
    }
}
