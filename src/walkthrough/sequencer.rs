//! Scripted walkthrough sequencer.
//!
//! The sequencer owns the [`PresentationSnapshot`] and a cooperative [`ScriptRun`]. A run is
//! a program counter plus the deadline of its next suspension point; [`Sequencer::poll`]
//! resumes it for every deadline the clock has passed. Cancellation is the run being
//! dropped: `deactivate()` takes it, so every later resume point finds nothing to do and the
//! snapshot stays exactly as the last applied entry left it.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::core::clock::Clock;
use crate::walkthrough::script::{cooking_walkthrough, Script};
use crate::walkthrough::snapshot::PresentationSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// The entry's mutations are applied at the deadline.
    Start,
    /// `revealed` characters are showing; the deadline reveals one more (or, once the text
    /// is complete, ends the reveal and starts the entry's hold).
    Reveal { revealed: usize },
}

#[derive(Debug, Clone)]
struct ScriptRun {
    id: u64,
    entry: usize,
    phase: Phase,
    deadline: Instant,
    iteration: u64,
}

/// Result of resuming the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollOutcome {
    /// Number of atomic mutation units applied by this poll.
    pub applied: usize,
    /// Time until the next suspension point, or `None` when inactive.
    pub wait: Option<Duration>,
}

pub struct Sequencer {
    script: Script,
    clock: Arc<dyn Clock>,
    snapshot: PresentationSnapshot,
    run: Option<ScriptRun>,
    next_run_id: u64,
    revision: u64,
}

impl Sequencer {
    pub fn new(script: Script, clock: Arc<dyn Clock>) -> Self {
        Self {
            script,
            clock,
            snapshot: PresentationSnapshot::initial(),
            run: None,
            next_run_id: 1,
            revision: 0,
        }
    }

    /// Sequencer over the built-in cooking walkthrough.
    pub fn cooking(clock: Arc<dyn Clock>) -> Self {
        Self::new(cooking_walkthrough().clone(), clock)
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn snapshot(&self) -> &PresentationSnapshot {
        &self.snapshot
    }

    /// Count of mutation units applied over the sequencer's lifetime.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    pub fn run_id(&self) -> Option<u64> {
        self.run.as_ref().map(|run| run.id)
    }

    /// Completed loops of the current run.
    pub fn iteration(&self) -> Option<u64> {
        self.run.as_ref().map(|run| run.iteration)
    }

    /// Starts the script from its first step. Returns `false` (and changes nothing) when a
    /// run is already active.
    pub fn activate(&mut self) -> bool {
        if let Some(run) = self.run.as_ref() {
            debug!(run_id = run.id, "walkthrough already active");
            return false;
        }

        let id = self.next_run_id;
        self.next_run_id += 1;
        self.snapshot = PresentationSnapshot::initial();
        self.revision += 1;
        self.run = Some(ScriptRun {
            id,
            entry: 0,
            phase: Phase::Start,
            deadline: self.clock.now(),
            iteration: 0,
        });
        debug!(run_id = id, steps = self.script.len(), "walkthrough activated");

        self.poll();
        true
    }

    /// Cancels the active run. Returns whether a run was cancelled.
    pub fn deactivate(&mut self) -> bool {
        match self.run.take() {
            Some(run) => {
                debug!(
                    run_id = run.id,
                    entry = run.entry,
                    iteration = run.iteration,
                    "walkthrough deactivated"
                );
                true
            }
            None => false,
        }
    }

    /// Edge-triggered host signal. Returns whether the state changed.
    pub fn set_active(&mut self, active: bool) -> bool {
        if active {
            self.activate()
        } else {
            self.deactivate()
        }
    }

    /// Resumes the run for every suspension point the clock has passed.
    pub fn poll(&mut self) -> PollOutcome {
        let now = self.clock.now();
        let loop_duration = self.script.loop_duration();
        let Self {
            script,
            snapshot,
            run,
            revision,
            ..
        } = self;
        let Some(run) = run.as_mut() else {
            return PollOutcome::default();
        };

        if now.saturating_duration_since(run.deadline) > loop_duration {
            warn!(
                run_id = run.id,
                behind_ms = now.saturating_duration_since(run.deadline).as_millis() as u64,
                "walkthrough fell more than a loop behind; rebasing"
            );
            run.deadline = now;
        }

        let mut applied = 0;
        while run.deadline <= now {
            if resume(run, script, snapshot) {
                applied += 1;
                *revision += 1;
            }
        }

        PollOutcome {
            applied,
            wait: Some(run.deadline.saturating_duration_since(now)),
        }
    }
}

/// Runs one suspension point. Returns whether the snapshot was mutated.
fn resume(run: &mut ScriptRun, script: &Script, snapshot: &mut PresentationSnapshot) -> bool {
    let step = &script.steps()[run.entry];

    match run.phase {
        Phase::Start => {
            for mutation in &step.mutations {
                mutation.apply(snapshot);
            }
            trace!(
                run_id = run.id,
                entry = run.entry,
                label = step.label().unwrap_or_default(),
                "applied walkthrough step"
            );
            match step.reveal {
                Some(reveal) => {
                    snapshot.typed_text.clear();
                    run.phase = Phase::Reveal { revealed: 0 };
                    run.deadline += reveal.per_char;
                }
                None => finish_entry(run, script, step.hold),
            }
            true
        }
        Phase::Reveal { revealed } => {
            let Some(reveal) = step.reveal else {
                finish_entry(run, script, step.hold);
                return false;
            };
            if revealed >= reveal.char_count() {
                finish_entry(run, script, step.hold);
                return false;
            }
            let revealed = revealed + 1;
            snapshot.typed_text.clear();
            snapshot.typed_text.push_str(reveal.prefix(revealed));
            run.phase = Phase::Reveal { revealed };
            run.deadline += reveal.per_char;
            true
        }
    }
}

fn finish_entry(run: &mut ScriptRun, script: &Script, hold: Duration) {
    run.deadline += hold;
    run.phase = Phase::Start;
    run.entry += 1;
    if run.entry == script.len() {
        run.entry = 0;
        run.iteration += 1;
        trace!(run_id = run.id, iteration = run.iteration, "walkthrough loop completed");
    }
}

/// Cloneable, thread-safe handle to a [`Sequencer`].
///
/// Every method takes the lock once, so the mutations of one poll are observed together and
/// `deactivate()` returning means no later poll can write.
#[derive(Clone)]
pub struct SequencerHandle {
    inner: Arc<Mutex<Sequencer>>,
}

impl SequencerHandle {
    pub fn new(sequencer: Sequencer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sequencer)),
        }
    }

    pub fn activate(&self) -> bool {
        self.lock().activate()
    }

    pub fn deactivate(&self) -> bool {
        self.lock().deactivate()
    }

    pub fn set_active(&self, active: bool) -> bool {
        self.lock().set_active(active)
    }

    pub fn poll(&self) -> PollOutcome {
        self.lock().poll()
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_active()
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision()
    }

    pub fn snapshot(&self) -> PresentationSnapshot {
        self.lock().snapshot().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&Sequencer) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Sequencer> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PollOutcome, Sequencer};
    use crate::core::clock::ManualClock;
    use crate::walkthrough::script::{Mutation, Script, WalkthroughStep};
    use crate::walkthrough::snapshot::{CursorPosition, View};
    use std::sync::Arc;
    use std::time::Duration;

    fn tiny_script() -> Script {
        Script::new(vec![
            WalkthroughStep::hold_ms(100)
                .with(Mutation::Reset)
                .with(Mutation::Label("start")),
            WalkthroughStep::reveal("abc", 10, 50),
            WalkthroughStep::hold_ms(100).with(Mutation::MoveCursor(CursorPosition::new(90, 10))),
        ])
        .expect("valid tiny script")
    }

    fn tiny() -> (Sequencer, ManualClock) {
        let clock = ManualClock::new();
        let sequencer = Sequencer::new(tiny_script(), Arc::new(clock.clone()));
        (sequencer, clock)
    }

    #[test]
    fn inactive_poll_is_a_no_op() {
        let (mut sequencer, clock) = tiny();
        clock.advance_ms(500);
        assert_eq!(sequencer.poll(), PollOutcome::default());
        assert_eq!(sequencer.revision(), 0);
    }

    #[test]
    fn activation_applies_first_step_immediately() {
        let (mut sequencer, _clock) = tiny();
        assert!(sequencer.activate());
        assert_eq!(sequencer.snapshot().step_label, "start");
        assert_eq!(sequencer.run_id(), Some(1));
        assert_eq!(sequencer.iteration(), Some(0));
    }

    #[test]
    fn reveal_writes_one_prefix_per_suspension() {
        let (mut sequencer, clock) = tiny();
        sequencer.activate();

        clock.advance_ms(100);
        sequencer.poll();
        assert_eq!(sequencer.snapshot().typed_text, "");

        let mut seen = Vec::new();
        for _ in 0..3 {
            clock.advance_ms(10);
            sequencer.poll();
            seen.push(sequencer.snapshot().typed_text.clone());
        }
        assert_eq!(seen, vec!["a", "ab", "abc"]);
    }

    #[test]
    fn poll_reports_wait_until_next_suspension() {
        let (mut sequencer, clock) = tiny();
        sequencer.activate();
        clock.advance_ms(40);
        let outcome = sequencer.poll();
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.wait, Some(Duration::from_millis(60)));
    }

    #[test]
    fn loops_back_to_first_step() {
        let (mut sequencer, clock) = tiny();
        sequencer.activate();
        // 100 + 4 * 10 + 50 + 100 = one loop.
        clock.advance_ms(290);
        sequencer.poll();
        assert_eq!(sequencer.iteration(), Some(1));
        assert_eq!(sequencer.snapshot().typed_text, "");
        assert_eq!(sequencer.snapshot().view, View::Input);
    }

    #[test]
    fn late_poll_catches_up_in_order_within_one_loop() {
        let (mut sequencer, clock) = tiny();
        sequencer.activate();
        clock.advance_ms(200);
        let outcome = sequencer.poll();
        // start reveal, three characters, cursor move.
        assert_eq!(outcome.applied, 5);
        assert_eq!(sequencer.snapshot().typed_text, "abc");
        assert_eq!(sequencer.snapshot().cursor, CursorPosition::new(90, 10));
    }

    #[test]
    fn very_late_poll_rebases_instead_of_replaying_loops() {
        let (mut sequencer, clock) = tiny();
        sequencer.activate();
        let before = sequencer.revision();
        clock.advance(Duration::from_secs(3600));
        let outcome = sequencer.poll();
        assert_eq!(outcome.applied, 1);
        assert_eq!(sequencer.revision(), before + 1);
        assert_eq!(sequencer.iteration(), Some(0));
    }

    #[test]
    fn deactivate_is_idempotent() {
        let (mut sequencer, _clock) = tiny();
        assert!(!sequencer.deactivate());
        sequencer.activate();
        assert!(sequencer.deactivate());
        assert!(!sequencer.deactivate());
        assert!(!sequencer.is_active());
    }

    #[test]
    fn reactivation_gets_a_new_run_id() {
        let (mut sequencer, _clock) = tiny();
        sequencer.activate();
        sequencer.deactivate();
        sequencer.activate();
        assert_eq!(sequencer.run_id(), Some(2));
    }
}
