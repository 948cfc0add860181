use std::time::{Duration, Instant};

/// Cancellable trailing-edge debounce.
///
/// Each [`schedule`](Self::schedule) pushes the deadline out to `now + delay`,
/// so a burst of calls fires once, `delay` after the last call. The owner polls
/// with [`fire_if_due`](Self::fire_if_due) from its event loop.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
	delay: Duration,
	deadline: Option<Instant>,
}

impl DebounceTimer {
	pub fn new(delay: Duration) -> Self {
		Self { delay, deadline: None }
	}

	/// Arms the timer, replacing any pending deadline. Returns the new deadline.
	pub fn schedule(&mut self, now: Instant) -> Instant {
		let deadline = now + self.delay;
		self.deadline = Some(deadline);
		deadline
	}

	/// Disarms the timer. Returns whether a deadline was pending.
	pub fn cancel(&mut self) -> bool {
		self.deadline.take().is_some()
	}

	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	/// Disarms and returns `true` once the deadline has been reached.
	pub fn fire_if_due(&mut self, now: Instant) -> bool {
		match self.deadline {
			Some(deadline) if now >= deadline => {
				self.deadline = None;
				true
			}
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DELAY: Duration = Duration::from_millis(1000);

	#[test]
	fn fires_once_after_delay() {
		let t0 = Instant::now();
		let mut timer = DebounceTimer::new(DELAY);
		timer.schedule(t0);

		assert!(!timer.fire_if_due(t0 + Duration::from_millis(999)));
		assert!(timer.fire_if_due(t0 + DELAY));
		assert!(!timer.fire_if_due(t0 + DELAY * 2));
		assert_eq!(timer.deadline(), None);
	}

	#[test]
	fn reschedule_resets_deadline() {
		let t0 = Instant::now();
		let mut timer = DebounceTimer::new(DELAY);
		timer.schedule(t0);
		let deadline = timer.schedule(t0 + Duration::from_millis(600));

		assert_eq!(deadline, t0 + Duration::from_millis(1600));
		assert!(!timer.fire_if_due(t0 + Duration::from_millis(1200)));
		assert!(timer.fire_if_due(t0 + Duration::from_millis(1600)));
	}

	#[test]
	fn cancel_disarms() {
		let t0 = Instant::now();
		let mut timer = DebounceTimer::new(DELAY);
		assert!(!timer.cancel());

		timer.schedule(t0);
		assert!(timer.cancel());
		assert_eq!(timer.deadline(), None);
		assert!(!timer.fire_if_due(t0 + DELAY));
	}
}
