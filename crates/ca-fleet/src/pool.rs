//! `SharedFleetPool` — arbitrates booking attempts against a fixed fleet.

use ca_core::SimRng;

/// Result of one booking attempt.
///
/// Both failure kinds count as a failed booking for the household; they are
/// kept apart so observers can tell scarcity from unreliability.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BookingOutcome {
    /// A car was reserved; availability dropped by one.
    Granted,
    /// No car left this step.  No random draw was consumed.
    CapacityExhausted,
    /// A car was free but the booking failed anyway.
    ReliabilityFailure,
}

impl BookingOutcome {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, BookingOutcome::Granted)
    }

    /// The `Display` label.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingOutcome::Granted            => "granted",
            BookingOutcome::CapacityExhausted  => "capacity_exhausted",
            BookingOutcome::ReliabilityFailure => "reliability_failure",
        }
    }
}

impl std::fmt::Display for BookingOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only capability a household needs from the fleet.
///
/// `SharedFleetPool` is the production implementation; tests substitute
/// scripted pools to drive the household decision logic in isolation.
pub trait BookingPool {
    /// Attempt to reserve one car for one trip.
    fn try_book(&mut self, rng: &mut SimRng) -> BookingOutcome;
}

/// A fixed-size fleet whose availability is replenished every step.
///
/// # Invariants
///
/// - `available <= capacity` at all times.
/// - `available` only decreases between two calls to [`reset`][Self::reset].
#[derive(Clone, Debug)]
pub struct SharedFleetPool {
    capacity:          usize,
    available:         usize,
    booking_fail_prob: f64,
}

impl SharedFleetPool {
    /// A full pool of `capacity` cars.  `booking_fail_prob` must already be
    /// validated to lie in `[0, 1]`.
    pub fn new(capacity: usize, booking_fail_prob: f64) -> Self {
        Self { capacity, available: capacity, booking_fail_prob }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.available
    }

    /// Cars booked since the last reset.
    #[inline]
    pub fn granted_this_step(&self) -> usize {
        self.capacity - self.available
    }

    /// Restore availability to full capacity.
    pub fn reset(&mut self) {
        self.available = self.capacity;
    }
}

impl BookingPool for SharedFleetPool {
    /// Capacity is checked first and never consumes randomness; then one
    /// reliability trial; only a passing trial takes a car.
    fn try_book(&mut self, rng: &mut SimRng) -> BookingOutcome {
        if self.available == 0 {
            return BookingOutcome::CapacityExhausted;
        }
        if rng.chance(self.booking_fail_prob) {
            return BookingOutcome::ReliabilityFailure;
        }
        self.available -= 1;
        BookingOutcome::Granted
    }
}
