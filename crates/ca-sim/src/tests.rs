//! Integration tests for ca-sim.

use ca_agent::{ActivationReport, Archetype, HouseholdProfile, Population};
use ca_core::{AgentId, CoreError, ModelConfig, SimRng, Step};

use crate::{
    LogObserver, MetricsRecord, NoopObserver, Scheduler, SimBuilder, SimError, SimObserver,
    StepSummary, snapshot,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(population_size: usize, fleet_capacity: usize) -> ModelConfig {
    ModelConfig {
        seed: 42,
        population_size,
        fleet_capacity,
        step_count: 10,
        ..ModelConfig::default()
    }
}

/// Three trips per step and no social pull either way.
fn heavy_user() -> HouseholdProfile {
    HouseholdProfile {
        archetype:             Archetype::Caregiver,
        income:                1.0,
        commute_need:          0.8,
        caregiving_need:       0.9,
        price_sensitivity:     0.5,
        social_susceptibility: 0.0,
    }
}

/// Records every callback for later inspection.
#[derive(Default)]
struct Recorder {
    starts:      Vec<Step>,
    resets:      Vec<(Step, usize)>,
    activations: Vec<(Step, AgentId, ActivationReport)>,
    summaries:   Vec<StepSummary>,
    records:     Vec<MetricsRecord>,
    ended:       Vec<Step>,
}

impl SimObserver for Recorder {
    fn on_step_start(&mut self, step: Step) {
        self.starts.push(step);
    }
    fn on_fleet_reset(&mut self, step: Step, available: usize) {
        self.resets.push((step, available));
    }
    fn on_activation(&mut self, step: Step, agent: AgentId, report: &ActivationReport) {
        self.activations.push((step, agent, *report));
    }
    fn on_step_end(&mut self, _step: Step, summary: &StepSummary) {
        self.summaries.push(*summary);
    }
    fn on_record(&mut self, record: &MetricsRecord) {
        self.records.push(record.clone());
    }
    fn on_sim_end(&mut self, final_step: Step) {
        self.ended.push(final_step);
    }
}

impl Recorder {
    fn activations_in(&self, step: Step) -> Vec<(AgentId, ActivationReport)> {
        self.activations
            .iter()
            .filter(|(s, _, _)| *s == step)
            .map(|(_, a, r)| (*a, *r))
            .collect()
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(ModelConfig::default()).build().unwrap();
        assert_eq!(sim.population().len(), 500);
        assert_eq!(sim.fleet().capacity(), 25);
        assert_eq!(sim.current_step(), Step(0));
        assert_eq!(sim.metrics().len(), 1);
    }

    #[test]
    fn invalid_probability_rejected() {
        let cfg = ModelConfig { booking_fail_prob: 1.01, ..ModelConfig::default() };
        let err = SimBuilder::new(cfg).build().err().expect("must fail");
        assert!(matches!(err, SimError::Core(CoreError::Config(_))));

        let cfg = ModelConfig { drop_ownership_prob: -0.5, ..ModelConfig::default() };
        assert!(SimBuilder::new(cfg).build().is_err());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_population_rejected_before_sampling() {
        let cfg = ModelConfig { population_size: u32::MAX as usize + 1, ..ModelConfig::default() };
        let err = SimBuilder::new(cfg).build().err().expect("must fail");
        assert!(matches!(err, SimError::Core(CoreError::Config(_))));
    }

    #[test]
    fn negative_price_rejected() {
        let cfg = ModelConfig { access_price: -1.0, ..ModelConfig::default() };
        assert!(SimBuilder::new(cfg).build().is_err());
    }

    #[test]
    fn profile_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(3, 1))
            .profiles(vec![heavy_user(); 2])
            .build();
        assert!(matches!(
            result.err(),
            Some(SimError::AgentCountMismatch { expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn sampled_population_matches_seeded_sampler() {
        let sim = SimBuilder::new(test_config(64, 5)).build().unwrap();
        let mut rng = SimRng::new(42);
        let expected = Population::sample(64, &mut rng);
        let got: Vec<Archetype> =
            sim.population().agents().iter().map(|a| a.profile().archetype).collect();
        let want: Vec<Archetype> =
            expected.agents().iter().map(|a| a.profile().archetype).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn initial_snapshot_is_pre_adoption_state() {
        let sim = SimBuilder::new(test_config(20, 2)).build().unwrap();
        let r = &sim.metrics()[0];
        assert_eq!(r.step, 0);
        assert_eq!(r.adoption_rate, 0.0);
        assert_eq!(r.ownership_rate, 1.0);
        assert_eq!(r.failed_booking_rate, 0.0);
        assert_eq!(r.fleet_capacity, 2);
        assert_eq!(r.access_price, 0.6);
        assert_eq!(r.booking_fail_prob, 0.10);
        assert_eq!(r.booking_friction, 0.30);
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler_tests {
    use super::*;

    #[test]
    fn every_agent_exactly_once() {
        let mut scheduler = Scheduler::new(100);
        let mut rng = SimRng::new(5);
        for _ in 0..10 {
            let mut order: Vec<u32> = scheduler.shuffled(&mut rng).iter().map(|a| a.0).collect();
            order.sort_unstable();
            assert_eq!(order, (0..100).collect::<Vec<_>>());
        }
    }

    #[test]
    fn order_changes_between_steps() {
        let mut scheduler = Scheduler::new(50);
        let mut rng = SimRng::new(5);
        let first = scheduler.shuffled(&mut rng).to_vec();
        let second = scheduler.shuffled(&mut rng).to_vec();
        assert_ne!(first, second);
    }

    #[test]
    fn permutation_depends_only_on_rng_state() {
        // Same RNG state, different previous orders → same permutation.
        let mut a = Scheduler::new(30);
        let mut b = Scheduler::new(30);
        let mut warm = SimRng::new(1);
        a.shuffled(&mut warm);

        let mut r1 = SimRng::new(9);
        let mut r2 = SimRng::new(9);
        assert_eq!(a.shuffled(&mut r1), b.shuffled(&mut r2));
    }

    #[test]
    fn empty_scheduler() {
        let mut scheduler = Scheduler::new(0);
        let mut rng = SimRng::new(0);
        assert!(scheduler.is_empty());
        assert!(scheduler.shuffled(&mut rng).is_empty());
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics_tests {
    use super::*;

    #[test]
    fn empty_population_yields_zero_rates() {
        let r = snapshot(Step(3), &[], &test_config(0, 4));
        assert_eq!(r.step, 3);
        assert_eq!(r.adoption_rate, 0.0);
        assert_eq!(r.ownership_rate, 0.0);
        assert_eq!(r.failed_booking_rate, 0.0);
    }

    #[test]
    fn failed_rate_is_cumulative() {
        // Capacity 0: every attempt fails, so once anyone has attempted the
        // cumulative rate is exactly 1.
        let cfg = ModelConfig { drop_ownership_prob: 1.0, ..test_config(30, 0) };
        let series = SimBuilder::new(cfg).build().unwrap().run(5, &mut NoopObserver);
        for r in series.iter().skip(1) {
            if r.adoption_rate > 0.0 {
                assert_eq!(r.failed_booking_rate, 1.0);
            }
        }
    }
}

// ── Run API ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_returns_initial_plus_one_per_step() {
        let series = SimBuilder::new(test_config(50, 5)).build().unwrap().run(7, &mut NoopObserver);
        assert_eq!(series.len(), 8);
        for (i, r) in series.iter().enumerate() {
            assert_eq!(r.step, i as u64);
        }
    }

    #[test]
    fn run_to_end_uses_configured_steps() {
        let series = SimBuilder::new(test_config(10, 1)).build().unwrap().run_to_end(&mut NoopObserver);
        assert_eq!(series.len(), 11);
    }

    #[test]
    fn zero_steps_returns_initial_only() {
        let series = SimBuilder::new(test_config(10, 1)).build().unwrap().run(0, &mut NoopObserver);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn run_steps_is_incremental() {
        let mut sim = SimBuilder::new(test_config(10, 1)).build().unwrap();
        sim.run_steps(3, &mut NoopObserver);
        assert_eq!(sim.current_step(), Step(3));
        sim.run_steps(2, &mut NoopObserver);
        assert_eq!(sim.current_step(), Step(5));
        assert_eq!(sim.metrics().len(), 6);
    }

    #[test]
    fn incremental_equals_single_run() {
        let cfg = test_config(80, 6);
        let mut stepped = SimBuilder::new(cfg.clone()).build().unwrap();
        stepped.run_steps(4, &mut NoopObserver);
        stepped.run_steps(6, &mut NoopObserver);
        let whole = SimBuilder::new(cfg).build().unwrap().run(10, &mut NoopObserver);
        assert_eq!(stepped.metrics(), whole.as_slice());
    }

    #[test]
    fn observer_called_correct_number_of_times() {
        let mut obs = Recorder::default();
        let mut sim = SimBuilder::new(test_config(12, 3)).build().unwrap();
        sim.run_steps(2, &mut obs);
        sim.run_steps(3, &mut obs);
        assert_eq!(obs.starts, (1..=5).map(Step).collect::<Vec<_>>());
        assert_eq!(obs.summaries.len(), 5);
        assert_eq!(obs.activations.len(), 5 * 12);
        // Initial record delivered once, then one per step.
        assert_eq!(obs.records.len(), 6);
        assert_eq!(obs.records[0].step, 0);
        assert!(obs.ended.is_empty());

        let mut obs = Recorder::default();
        SimBuilder::new(test_config(12, 3)).build().unwrap().run(4, &mut obs);
        assert_eq!(obs.ended, vec![Step(4)]);
    }

    #[test]
    fn summary_matches_activation_reports() {
        let mut obs = Recorder::default();
        let cfg = ModelConfig { drop_ownership_prob: 0.9, ..test_config(40, 4) };
        SimBuilder::new(cfg).build().unwrap().run(6, &mut obs);
        for summary in &obs.summaries {
            let reports = obs.activations_in(summary.step);
            assert_eq!(summary.activated, reports.len());
            let granted: u32 = reports.iter().map(|(_, r)| r.granted).sum();
            let adoptions = reports.iter().filter(|(_, r)| r.adopted_now).count() as u32;
            assert_eq!(summary.bookings_granted, granted);
            assert_eq!(summary.adoptions, adoptions);
        }
    }

    #[test]
    fn zero_population_runs() {
        let series = SimBuilder::new(test_config(0, 3)).build().unwrap().run(5, &mut NoopObserver);
        assert_eq!(series.len(), 6);
        assert!(series.iter().all(|r| r.adoption_rate == 0.0 && r.failed_booking_rate == 0.0));
    }

    #[test]
    fn log_observer_does_not_disturb_results() {
        let cfg = test_config(30, 3);
        let quiet = SimBuilder::new(cfg.clone()).build().unwrap().run(5, &mut NoopObserver);
        let logged = SimBuilder::new(cfg).build().unwrap().run(5, &mut LogObserver::new(2));
        assert_eq!(quiet, logged);
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod invariant_tests {
    use super::*;

    #[test]
    fn determinism_same_seed() {
        for seed in [1, 7, 123] {
            let cfg = ModelConfig { seed, ..test_config(200, 10) };
            let a = SimBuilder::new(cfg.clone()).build().unwrap().run(30, &mut NoopObserver);
            let b = SimBuilder::new(cfg).build().unwrap().run(30, &mut NoopObserver);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a = SimBuilder::new(ModelConfig { seed: 1, ..test_config(200, 10) })
            .build().unwrap().run(30, &mut NoopObserver);
        let b = SimBuilder::new(ModelConfig { seed: 2, ..test_config(200, 10) })
            .build().unwrap().run(30, &mut NoopObserver);
        assert_ne!(a, b);
    }

    #[test]
    fn fleet_reset_and_grant_bounds() {
        for capacity in [0, 1, 5, 40] {
            let mut obs = Recorder::default();
            let cfg = ModelConfig { drop_ownership_prob: 0.8, ..test_config(60, capacity) };
            SimBuilder::new(cfg).build().unwrap().run(15, &mut obs);
            assert_eq!(obs.resets.len(), 15);
            assert!(obs.resets.iter().all(|&(_, available)| available == capacity));
            assert!(obs.summaries.iter().all(|s| s.bookings_granted as usize <= capacity));
        }
    }

    #[test]
    fn rates_stay_in_unit_interval() {
        for seed in 0..5 {
            let cfg = ModelConfig { seed, drop_ownership_prob: 0.7, ..test_config(100, 8) };
            let series = SimBuilder::new(cfg).build().unwrap().run(25, &mut NoopObserver);
            for r in &series {
                for v in [r.adoption_rate, r.ownership_rate, r.failed_booking_rate] {
                    assert!((0.0..=1.0).contains(&v), "step {}: {v}", r.step);
                }
            }
        }
    }

    #[test]
    fn adoption_and_ownership_are_one_way() {
        let cfg = ModelConfig { drop_ownership_prob: 0.5, ..test_config(100, 10) };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let mut prev: Vec<(bool, bool, u64, u64)> = Vec::new();
        for _ in 0..20 {
            sim.run_steps(1, &mut NoopObserver);
            let now: Vec<_> = sim
                .population()
                .agents()
                .iter()
                .map(|a| (a.adopted(), a.owns_vehicle(), a.failed_bookings(), a.successful_bookings()))
                .collect();
            for (before, after) in prev.iter().zip(&now) {
                assert!(!before.0 || after.0, "adoption reverted");
                assert!(before.1 || !after.1, "car re-acquired");
                assert!(after.2 >= before.2 && after.3 >= before.3, "counter decreased");
            }
            prev = now;
        }
    }

    #[test]
    fn adoption_rate_series_non_decreasing() {
        let series = SimBuilder::new(test_config(150, 10)).build().unwrap().run(30, &mut NoopObserver);
        for pair in series.windows(2) {
            assert!(pair[1].adoption_rate >= pair[0].adoption_rate);
            assert!(pair[1].ownership_rate <= pair[0].ownership_rate);
        }
    }
}

// ── Contention scenarios ──────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    /// Three heavy users, one car, perfectly reliable, free, frictionless.
    fn scarce_config(seed: u64) -> ModelConfig {
        ModelConfig {
            seed,
            population_size:     3,
            fleet_capacity:      1,
            access_price:        0.0,
            booking_fail_prob:   0.0,
            booking_friction:    0.0,
            drop_ownership_prob: 1.0,
            step_count:          1,
        }
    }

    #[test]
    fn single_car_goes_to_first_booker() {
        let mut all_three_booked = 0;
        for seed in 0..30 {
            let mut obs = Recorder::default();
            SimBuilder::new(scarce_config(seed))
                .profiles(vec![heavy_user(); 3])
                .build()
                .unwrap()
                .run_to_end(&mut obs);

            let reports = obs.activations_in(Step(1));
            assert_eq!(reports.len(), 3);
            let bookers: Vec<&ActivationReport> =
                reports.iter().map(|(_, r)| r).filter(|r| r.attempts() > 0).collect();

            if let Some((first, rest)) = bookers.split_first() {
                assert_eq!(first.attempts(), 3);
                assert_eq!(first.granted, 1, "seed {seed}: first booker gets the car");
                assert_eq!(first.capacity_failures, 2);
                for later in rest {
                    assert_eq!(later.granted, 0);
                    assert_eq!(later.capacity_failures, later.attempts());
                }
            }
            assert!(reports.iter().all(|(_, r)| r.reliability_failures == 0));
            assert!(obs.summaries[0].bookings_granted <= 1);
            if bookers.len() == 3 {
                all_three_booked += 1;
            }
        }
        assert!(all_three_booked > 0, "no seed produced full adoption");
    }

    #[test]
    fn zero_capacity_never_grants() {
        let cfg = ModelConfig { drop_ownership_prob: 1.0, ..test_config(60, 0) };
        let mut obs = Recorder::default();
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        sim.run_steps(15, &mut obs);

        let mut attempts_per_agent = vec![0u64; 60];
        for (_, agent, report) in &obs.activations {
            assert_eq!(report.granted, 0);
            if report.attempts() > 0 {
                assert_eq!(report.attempts(), report.trips);
                assert_eq!(report.capacity_failures, report.trips);
            }
            attempts_per_agent[agent.index()] += u64::from(report.attempts());
        }
        for (i, agent) in sim.population().agents().iter().enumerate() {
            assert_eq!(agent.successful_bookings(), 0);
            assert_eq!(agent.failed_bookings(), attempts_per_agent[i]);
        }
        assert!(attempts_per_agent.iter().any(|&n| n > 0), "nobody ever booked");
    }

    #[test]
    fn certain_unreliability_never_grants() {
        let cfg = ModelConfig {
            booking_fail_prob:   1.0,
            drop_ownership_prob: 1.0,
            ..test_config(60, 100)
        };
        let mut obs = Recorder::default();
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        sim.run_steps(10, &mut obs);

        for (_, _, report) in &obs.activations {
            assert_eq!(report.granted, 0);
            assert_eq!(report.capacity_failures, 0);
            assert_eq!(report.reliability_failures, report.attempts());
        }
        assert_eq!(sim.fleet().available(), 100);
        assert!(sim.population().agents().iter().all(|a| a.successful_bookings() == 0));
        let last = sim.metrics().last().unwrap();
        if last.ownership_rate < 1.0 {
            assert_eq!(last.failed_booking_rate, 1.0);
        }
    }
}
