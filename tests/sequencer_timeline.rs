use std::sync::Arc;
use std::time::Duration;

use mise_walkthrough::walkthrough::{DESCRIBE_TEXT, VIDEO_LINK_TEXT};
use mise_walkthrough::{
    cooking_walkthrough, CursorPosition, InputTab, ManualClock, PresentationSnapshot, ResultTab,
    Sequencer, View, CURSOR_MAX,
};
use pretty_assertions::assert_eq;

const LOOP_MS: u64 = 20_670;

struct Harness {
    sequencer: Sequencer,
    clock: ManualClock,
}

impl Harness {
    fn new() -> Self {
        let clock = ManualClock::new();
        let sequencer = Sequencer::cooking(Arc::new(clock.clone()));
        Self { sequencer, clock }
    }

    fn started() -> Self {
        let mut harness = Self::new();
        assert!(harness.sequencer.activate());
        harness
    }

    /// Moves the clock to `ms` after creation and polls once.
    fn at(&mut self, ms: u64) -> &PresentationSnapshot {
        let target = Duration::from_millis(ms);
        let elapsed = self.clock.elapsed();
        assert!(target >= elapsed, "harness time only moves forward");
        self.clock.advance(target - elapsed);
        self.sequencer.poll();
        self.sequencer.snapshot()
    }

    /// Polls every `step_ms` up to `until_ms`, collecting each snapshot.
    fn trace(&mut self, until_ms: u64, step_ms: u64) -> Vec<PresentationSnapshot> {
        let start = self.clock.elapsed().as_millis() as u64;
        (start..=until_ms)
            .step_by(step_ms as usize)
            .map(|ms| self.at(ms).clone())
            .collect()
    }
}

#[test]
fn built_in_loop_lasts_twenty_point_six_seven_seconds() {
    assert_eq!(
        cooking_walkthrough().loop_duration(),
        Duration::from_millis(LOOP_MS)
    );
}

#[test]
fn activation_starts_at_describe_step() {
    let mut harness = Harness::started();
    let snapshot = harness.at(0);
    assert_eq!(snapshot.view, View::Input);
    assert_eq!(snapshot.input_tab, InputTab::Describe);
    assert_eq!(snapshot.typed_text, "");
    assert_eq!(snapshot.step_label, "1. Describe what you want");
    assert_eq!(snapshot.cursor, CursorPosition::new(20, 15));
}

#[test]
fn describe_reveal_completes_by_2950_ms() {
    let mut harness = Harness::started();
    let snapshot = harness.at(2_950);
    assert_eq!(snapshot.view, View::Input);
    assert_eq!(snapshot.typed_text, DESCRIBE_TEXT);
}

#[test]
fn reveal_text_is_always_a_growing_prefix() {
    let mut harness = Harness::started();
    let trace = harness.trace(2_950, 5);
    let mut last_len = 0;
    for snapshot in &trace {
        assert!(DESCRIBE_TEXT.starts_with(&snapshot.typed_text));
        assert!(snapshot.typed_text.len() >= last_len);
        last_len = snapshot.typed_text.len();
    }
    assert_eq!(last_len, DESCRIBE_TEXT.len());
}

#[test]
fn video_link_tab_clears_text_then_reveals_link() {
    let mut harness = Harness::started();
    harness.at(3_000);

    let snapshot = harness.at(4_560);
    assert_eq!(snapshot.input_tab, InputTab::VideoLink);
    assert_eq!(snapshot.typed_text, "");
    assert!(snapshot.is_clicking);

    let snapshot = harness.at(4_760);
    assert!(!snapshot.is_clicking);

    let snapshot = harness.at(6_770);
    assert_eq!(snapshot.typed_text, VIDEO_LINK_TEXT);
    assert_eq!(snapshot.step_label, "2. Or use a YouTube link");
}

#[test]
fn generate_click_leads_to_loading() {
    let mut harness = Harness::started();

    let snapshot = harness.at(8_100);
    assert_eq!(snapshot.view, View::Input);
    assert!(snapshot.is_clicking);
    assert_eq!(snapshot.cursor, CursorPosition::new(50, 85));

    let snapshot = harness.at(8_270);
    assert_eq!(snapshot.view, View::Loading);
    assert!(!snapshot.is_clicking);
    assert_eq!(snapshot.step_label, "Creating your recipe...");
}

#[test]
fn result_tabs_follow_overview_ingredients_directions() {
    let mut harness = Harness::started();

    let snapshot = harness.at(10_270);
    assert_eq!(snapshot.view, View::Result);
    assert_eq!(snapshot.result_tab, ResultTab::Overview);
    assert_eq!(snapshot.cursor, CursorPosition::new(50, 50));

    let snapshot = harness.at(12_770);
    assert_eq!(snapshot.result_tab, ResultTab::Ingredients);
    assert_eq!(snapshot.step_label, "5. Check Ingredients");

    let snapshot = harness.at(15_470);
    assert_eq!(snapshot.result_tab, ResultTab::Directions);
    assert_eq!(snapshot.step_label, "6. Follow Directions");

    let snapshot = harness.at(17_670);
    assert_eq!(snapshot.view, View::Finished);
    assert_eq!(snapshot.step_label, "7. You are ready!");
}

#[test]
fn views_cycle_input_loading_result_finished() {
    let mut harness = Harness::started();
    let trace = harness.trace(3 * LOOP_MS, 10);

    let mut views = vec![trace[0].view];
    for snapshot in &trace {
        if views.last() != Some(&snapshot.view) {
            views.push(snapshot.view);
        }
    }

    let one_loop = [View::Input, View::Loading, View::Result, View::Finished];
    let expected: Vec<View> = one_loop.iter().copied().cycle().take(13).collect();
    assert_eq!(views, expected);
    assert_eq!(harness.sequencer.iteration(), Some(3));
}

#[test]
fn each_loop_restarts_clean() {
    let mut harness = Harness::started();
    harness.at(LOOP_MS - 10);
    let snapshot = harness.at(LOOP_MS);
    assert_eq!(snapshot.view, View::Input);
    assert_eq!(snapshot.input_tab, InputTab::Describe);
    assert_eq!(snapshot.result_tab, ResultTab::Overview);
    assert_eq!(snapshot.typed_text, "");
}

#[test]
fn cursor_and_click_stay_in_bounds() {
    let mut harness = Harness::started();
    let trace = harness.trace(2 * LOOP_MS, 10);
    let mut clicking_run = 0;
    for snapshot in &trace {
        assert!(snapshot.cursor.x <= CURSOR_MAX && snapshot.cursor.y <= CURSOR_MAX);
        assert_eq!(snapshot.validate(), Ok(()));
        if snapshot.is_clicking {
            clicking_run += 1;
            assert!(clicking_run <= 20, "click held longer than 200 ms");
        } else {
            clicking_run = 0;
        }
    }
}

#[test]
fn deactivate_freezes_snapshot_regardless_of_pending_holds() {
    let mut harness = Harness::started();
    harness.at(2_000);
    assert!(harness.sequencer.deactivate());

    let frozen = harness.sequencer.snapshot().clone();
    let revision = harness.sequencer.revision();
    assert!(!frozen.typed_text.is_empty());
    assert!(frozen.typed_text.len() < DESCRIBE_TEXT.len());

    for ms in [2_050, 5_000, 30_000, 100_000] {
        assert_eq!(harness.at(ms), &frozen);
    }
    assert_eq!(harness.sequencer.revision(), revision);
}

#[test]
fn reactivation_restarts_from_step_one() {
    let mut harness = Harness::started();
    harness.at(13_000);
    assert_eq!(harness.sequencer.snapshot().view, View::Result);

    assert!(harness.sequencer.set_active(false));
    assert!(harness.sequencer.set_active(true));
    let snapshot = harness.sequencer.snapshot();
    assert_eq!(snapshot.view, View::Input);
    assert_eq!(snapshot.input_tab, InputTab::Describe);
    assert_eq!(snapshot.typed_text, "");
    assert_eq!(snapshot.step_label, "1. Describe what you want");

    let snapshot = harness.at(13_000 + 2_950);
    assert_eq!(snapshot.typed_text, DESCRIBE_TEXT);
}

#[test]
fn double_activate_matches_single_activate() {
    let mut single = Harness::started();
    let mut double = Harness::started();
    double.at(500);
    assert!(!double.sequencer.activate());
    assert!(!double.sequencer.set_active(true));

    let expected = single.trace(LOOP_MS + 500, 10);
    let actual = double.trace(LOOP_MS + 500, 10);
    assert_eq!(actual.as_slice(), &expected[50..]);
    assert_eq!(double.sequencer.run_id(), Some(1));
}
