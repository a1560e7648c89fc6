//! One household's mutable state and its per-step decision.

use std::sync::Arc;

use ca_core::{ModelConfig, SimRng};
use ca_fleet::{BookingOutcome, BookingPool};

use crate::HouseholdProfile;

/// Adoption rate at which the social term is neutral.
const SOCIAL_REFERENCE_RATE: f64 = 0.2;

/// The engine parameters the decision rule reads, precomputed once per run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DecisionParams {
    /// `fleet_capacity / max(1, population_size)`.
    pub supply_factor:       f64,
    pub access_price:        f64,
    pub booking_fail_prob:   f64,
    pub booking_friction:    f64,
    pub drop_ownership_prob: f64,
}

impl From<&ModelConfig> for DecisionParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            supply_factor:       config.supply_factor(),
            access_price:        config.access_price,
            booking_fail_prob:   config.booking_fail_prob,
            booking_friction:    config.booking_friction,
            drop_ownership_prob: config.drop_ownership_prob,
        }
    }
}

/// `1 / (1 + e^-x)`.
#[inline]
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// What happened during one activation.  Returned to the engine so it can
/// update running counts and notify observers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivationReport {
    /// Adoption happened in this activation.
    pub adopted_now:          bool,
    /// The private car was given up in this activation.
    pub dropped_vehicle_now:  bool,
    /// Trips needed this step, whether or not they were booked.
    pub trips:                u32,
    pub granted:              u32,
    pub capacity_failures:    u32,
    pub reliability_failures: u32,
}

impl ActivationReport {
    /// Number of booking attempts issued (0 if the household was not eligible).
    pub fn attempts(&self) -> u32 {
        self.granted + self.failures()
    }

    pub fn failures(&self) -> u32 {
        self.capacity_failures + self.reliability_failures
    }

    fn record(&mut self, outcome: BookingOutcome) {
        match outcome {
            BookingOutcome::Granted            => self.granted += 1,
            BookingOutcome::CapacityExhausted  => self.capacity_failures += 1,
            BookingOutcome::ReliabilityFailure => self.reliability_failures += 1,
        }
    }
}

/// A household in the population.
///
/// State transitions are one-way: `adopted` false→true, `owns_vehicle`
/// true→false, booking counters only grow.  All mutation goes through
/// [`activate`][Self::activate].
#[derive(Clone, Debug)]
pub struct HouseholdAgent {
    profile:             Arc<HouseholdProfile>,
    adopted:             bool,
    owns_vehicle:        bool,
    failed_bookings:     u64,
    successful_bookings: u64,
}

impl HouseholdAgent {
    /// A car-owning household that has never used shared access.
    pub fn new(profile: Arc<HouseholdProfile>) -> Self {
        Self {
            profile,
            adopted:             false,
            owns_vehicle:        true,
            failed_bookings:     0,
            successful_bookings: 0,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn profile(&self) -> &HouseholdProfile {
        &self.profile
    }

    #[inline]
    pub fn adopted(&self) -> bool {
        self.adopted
    }

    #[inline]
    pub fn owns_vehicle(&self) -> bool {
        self.owns_vehicle
    }

    #[inline]
    pub fn failed_bookings(&self) -> u64 {
        self.failed_bookings
    }

    #[inline]
    pub fn successful_bookings(&self) -> u64 {
        self.successful_bookings
    }

    /// Adopted and car-free: the household books shared cars for its trips.
    #[inline]
    pub fn books_shared_cars(&self) -> bool {
        self.adopted && !self.owns_vehicle
    }

    // ── Decision rule ─────────────────────────────────────────────────────

    /// Net perceived value of shared access given the current adoption rate.
    ///
    /// ```text
    /// benefit       = 1.5 + 2.0·supply + social_susceptibility·(rate − 0.2)
    /// need_penalty  = 0.8·caregiving_need·fail_prob + 0.5·friction
    /// price_penalty = price_sensitivity·price
    /// utility       = benefit − price_penalty − need_penalty
    /// ```
    pub fn access_utility(&self, adoption_rate: f64, params: &DecisionParams) -> f64 {
        let p = &*self.profile;
        let social = p.social_susceptibility * (adoption_rate - SOCIAL_REFERENCE_RATE);
        let benefit = 1.5 + 2.0 * params.supply_factor + social;
        let need_penalty =
            0.8 * p.caregiving_need * params.booking_fail_prob + 0.5 * params.booking_friction;
        let price_penalty = p.price_sensitivity * params.access_price;
        benefit - price_penalty - need_penalty
    }

    /// Probability of adopting this step.
    #[inline]
    pub fn adoption_probability(&self, adoption_rate: f64, params: &DecisionParams) -> f64 {
        logistic(self.access_utility(adoption_rate, params))
    }

    /// Run one activation.
    ///
    /// Random draws, in order: the adoption trial (only if not yet adopted),
    /// the ownership-drop trial (only if adoption just succeeded), then one
    /// pool draw per booking attempt.  The adoption trial and the drop trial
    /// are independent; a household that adopts but keeps its car never gets
    /// another chance to drop it.
    pub fn activate<P: BookingPool>(
        &mut self,
        adoption_rate: f64,
        params:        &DecisionParams,
        pool:          &mut P,
        rng:           &mut SimRng,
    ) -> ActivationReport {
        let mut report = ActivationReport::default();

        let p_adopt = self.adoption_probability(adoption_rate, params);
        if !self.adopted && rng.chance(p_adopt) {
            self.adopted = true;
            report.adopted_now = true;
            if rng.chance(params.drop_ownership_prob) {
                self.owns_vehicle = false;
                report.dropped_vehicle_now = true;
            }
        }

        report.trips = self.profile.trips_per_step();
        if self.books_shared_cars() {
            for _ in 0..report.trips {
                let outcome = pool.try_book(rng);
                if outcome.is_success() {
                    self.successful_bookings += 1;
                } else {
                    self.failed_bookings += 1;
                }
                report.record(outcome);
            }
        }

        report
    }
}
