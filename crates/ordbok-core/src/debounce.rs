//! Debounce/coalescing state machine for query input. Owns no timer: a
//! driver arms a sleep on the returned deadline and calls back in. Each
//! keystroke could otherwise cost a full tree traversal; coalescing bounds
//! the work to one traversal per quiet period.

use std::time::{Duration, Instant};

use ordbok_types::DisplayMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub mode: DisplayMode,
    pub direction: String,
}

#[derive(Debug)]
enum State {
    Idle,
    Pending { query: Query, deadline: Instant },
    Running,
}

/// What the driver should do after a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Sleep until the deadline, then call `fire`
    Armed(Instant),
    /// Input went empty: drop any armed timer and clear rendered results
    Cleared,
}

pub struct Debouncer {
    quiet_period: Duration,
    state: State,
    generation: u64,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            state: State::Idle,
            generation: 0,
        }
    }

    /// A new input event. Supersedes any pending deadline and invalidates
    /// any in-flight run; duplicates of the current text reschedule like
    /// any other event.
    pub fn submit(&mut self, query: Query, now: Instant) -> Submission {
        self.generation += 1;
        if query.text.is_empty() {
            self.state = State::Idle;
            return Submission::Cleared;
        }
        let deadline = now + self.quiet_period;
        self.state = State::Pending { query, deadline };
        Submission::Armed(deadline)
    }

    /// Deadline to sleep on, when one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            State::Pending { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    /// The armed deadline elapsed. Returns the query to run and its
    /// generation token. Firing with nothing pending, or before the
    /// deadline, is a no-op; cancel-after-fire needs no special handling.
    pub fn fire(&mut self, now: Instant) -> Option<(Query, u64)> {
        let elapsed = matches!(&self.state, State::Pending { deadline, .. } if now >= *deadline);
        if !elapsed {
            return None;
        }
        match std::mem::replace(&mut self.state, State::Running) {
            State::Pending { query, .. } => Some((query, self.generation)),
            _ => None,
        }
    }

    /// A run finished. True when its result may be surfaced; false when a
    /// newer submit superseded it, in which case the result must be
    /// discarded to avoid out-of-order display.
    pub fn finish(&mut self, generation: u64) -> bool {
        let current = generation == self.generation;
        if current && matches!(self.state, State::Running) {
            self.state = State::Idle;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    fn query(text: &str) -> Query {
        Query {
            text: text.to_string(),
            mode: DisplayMode::Detailed,
            direction: "me-sv-lr".to_string(),
        }
    }

    #[test]
    fn burst_coalesces_to_last_value() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        // "c", "ca", "cat" delivered 50ms apart
        debouncer.submit(query("c"), start);
        debouncer.submit(query("ca"), start + Duration::from_millis(50));
        let Submission::Armed(deadline) =
            debouncer.submit(query("cat"), start + Duration::from_millis(100))
        else {
            panic!("expected an armed deadline");
        };
        assert_eq!(deadline, start + Duration::from_millis(100) + QUIET);

        // Nothing fires before the quiet period is over
        assert!(debouncer.fire(start + Duration::from_millis(300)).is_none());

        let (fired, generation) = debouncer.fire(deadline).expect("deadline elapsed");
        assert_eq!(fired.text, "cat");
        assert!(debouncer.fire(deadline).is_none(), "single fire per arm");
        assert!(debouncer.finish(generation));
    }

    #[test]
    fn stale_result_is_suppressed() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.submit(query("ka"), start);
        let (_, first_generation) = debouncer.fire(start + QUIET).unwrap();

        // A newer query arrives while the first run is in flight
        debouncer.submit(query("katt"), start + QUIET);

        assert!(!debouncer.finish(first_generation));
        let deadline = debouncer.deadline().expect("new query still pending");
        let (fired, generation) = debouncer.fire(deadline).unwrap();
        assert_eq!(fired.text, "katt");
        assert!(debouncer.finish(generation));
    }

    #[test]
    fn empty_input_goes_idle_and_clears() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.submit(query("ka"), start);
        assert_eq!(debouncer.submit(query(""), start), Submission::Cleared);
        assert!(debouncer.deadline().is_none());
        assert!(debouncer.fire(start + QUIET).is_none());
    }

    #[test]
    fn empty_input_invalidates_running_query() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.submit(query("ka"), start);
        let (_, generation) = debouncer.fire(start + QUIET).unwrap();
        debouncer.submit(query(""), start + QUIET);
        assert!(!debouncer.finish(generation));
    }

    #[test]
    fn duplicate_text_reschedules() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.submit(query("katt"), start);
        let late = start + Duration::from_millis(400);
        let Submission::Armed(deadline) = debouncer.submit(query("katt"), late) else {
            panic!("expected an armed deadline");
        };
        assert_eq!(deadline, late + QUIET);
        assert!(debouncer.fire(start + QUIET).is_none());
    }

    #[test]
    fn fire_when_idle_is_a_noop() {
        let mut debouncer = Debouncer::new(QUIET);
        assert!(debouncer.fire(Instant::now()).is_none());
    }
}
