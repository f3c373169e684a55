//! Countdown controller

use std::time::Duration;

use chrono::TimeDelta;
use tracing::{debug, info, warn};

use super::{Clock, StartError, TickHandle, TickScheduler, UiPort};
use crate::state::{
    format_datetime_local, MessageCategory, RemainingDuration, RunState, TargetInstant,
};

pub const START_LABEL: &str = "Start Countdown";
pub const RESTART_LABEL: &str = "Restart";
pub const IDLE_MESSAGE: &str = "Set a target date and time to start countdown";
pub const RUNNING_MESSAGE: &str = "Countdown is running...";
pub const STOPPED_MESSAGE: &str = "Countdown stopped";
pub const COMPLETE_MESSAGE: &str = "🎉 Time's up! Countdown finished!";

/// A running countdown. The tick handle only exists in here, so there is a
/// live registration exactly when the controller is running.
#[derive(Debug)]
struct ActiveCountdown {
    target: TargetInstant,
    handle: TickHandle,
}

#[derive(Debug)]
enum Lifecycle {
    Idle,
    Running(ActiveCountdown),
    Stopped,
    Expired,
}

/// Drives one countdown widget through its ports
pub struct CountdownController<U, S, C> {
    ui: U,
    scheduler: S,
    clock: C,
    tick_interval: Duration,
    lifecycle: Lifecycle,
}

impl<U, S, C> CountdownController<U, S, C>
where
    U: UiPort,
    S: TickScheduler,
    C: Clock,
{
    pub fn new(ui: U, scheduler: S, clock: C, tick_interval: Duration) -> Self {
        Self {
            ui,
            scheduler,
            clock,
            tick_interval,
            lifecycle: Lifecycle::Idle,
        }
    }

    /// Pre-fill the target with now + 1 hour and show the idle widget
    pub fn initialize(&mut self) {
        let default_target = self.clock.now() + TimeDelta::hours(1);
        self.ui.set_target_input(&format_datetime_local(&default_target));
        self.ui.set_start_label(START_LABEL);
        self.render(0, 0, 0, 0);
        self.show_message(IDLE_MESSAGE, MessageCategory::Active);
        debug!("Countdown initialized with default target {}", default_target);
    }

    /// Handle the start/restart trigger
    pub fn start(&mut self) -> Result<(), StartError> {
        let target = match self.validated_target() {
            Ok(target) => target,
            Err(e) => {
                warn!("Rejected countdown start: {}", e);
                self.show_message(&e.to_string(), MessageCategory::Expired);
                return Err(e);
            }
        };

        if self.is_running() {
            debug!("Restarting running countdown");
            self.stop();
        }

        let handle = self.scheduler.schedule(self.tick_interval);
        self.lifecycle = Lifecycle::Running(ActiveCountdown { target, handle });
        info!("Countdown started towards {}", target.instant());

        self.ui.set_start_label(RESTART_LABEL);
        self.show_message(RUNNING_MESSAGE, MessageCategory::Active);
        self.refresh();
        Ok(())
    }

    /// Handle the stop trigger. Only a running countdown changes state; the
    /// label and message are reset either way.
    pub fn stop(&mut self) {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Idle) {
            Lifecycle::Running(active) => {
                self.scheduler.cancel(active.handle);
                self.lifecycle = Lifecycle::Stopped;
                info!("Countdown stopped");
            }
            other => self.lifecycle = other,
        }

        self.ui.set_start_label(START_LABEL);
        self.show_message(STOPPED_MESSAGE, MessageCategory::Active);
    }

    /// Handle a periodic tick. Ticks from cancelled registrations are
    /// dropped.
    pub fn on_tick(&mut self, handle: TickHandle) {
        let current = matches!(
            &self.lifecycle,
            Lifecycle::Running(active) if active.handle == handle
        );
        if current {
            self.refresh();
        } else {
            debug!("Ignoring stale tick {}", handle.id());
        }
    }

    pub fn run_state(&self) -> RunState {
        match self.lifecycle {
            Lifecycle::Idle => RunState::Idle,
            Lifecycle::Running(_) => RunState::Running,
            Lifecycle::Stopped => RunState::Stopped,
            Lifecycle::Expired => RunState::Expired,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running(_))
    }

    /// Sample the time left, if running
    pub fn remaining(&self) -> Option<RemainingDuration> {
        match &self.lifecycle {
            Lifecycle::Running(active) => {
                RemainingDuration::between(&self.clock.now(), active.target.instant())
            }
            _ => None,
        }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Write zero-padded values to the four display fields
    pub fn render(&mut self, days: u64, hours: u32, minutes: u32, seconds: u32) {
        let remaining = RemainingDuration {
            days,
            hours,
            minutes,
            seconds,
        };
        self.ui.set_display(&remaining.display_fields());
    }

    pub fn show_message(&mut self, text: &str, category: MessageCategory) {
        self.ui.set_message(text, category);
    }

    fn validated_target(&self) -> Result<TargetInstant, StartError> {
        let target = TargetInstant::parse(&self.ui.target_input())?;
        if *target.instant() <= self.clock.now() {
            return Err(StartError::TargetInPast);
        }
        Ok(target)
    }

    fn refresh(&mut self) {
        let Lifecycle::Running(active) = &self.lifecycle else {
            return;
        };

        let remaining = RemainingDuration::between(&self.clock.now(), active.target.instant());
        match remaining {
            Some(remaining) => self.render(
                remaining.days,
                remaining.hours,
                remaining.minutes,
                remaining.seconds,
            ),
            None => self.expire(),
        }
    }

    fn expire(&mut self) {
        self.stop();
        self.render(0, 0, 0, 0);
        self.lifecycle = Lifecycle::Expired;
        self.show_message(COMPLETE_MESSAGE, MessageCategory::Expired);
        info!("Countdown finished");
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use chrono::{DateTime, Local, TimeZone};

    use super::*;
    use crate::state::DisplayFields;

    #[derive(Default)]
    struct FakeUi {
        target_input: String,
        display: Option<DisplayFields>,
        message: String,
        category: MessageCategory,
        start_label: String,
        messages_shown: Vec<String>,
    }

    impl UiPort for FakeUi {
        fn target_input(&self) -> String {
            self.target_input.clone()
        }

        fn set_target_input(&mut self, value: &str) {
            self.target_input = value.to_string();
        }

        fn set_display(&mut self, fields: &DisplayFields) {
            self.display = Some(fields.clone());
        }

        fn set_message(&mut self, text: &str, category: MessageCategory) {
            self.message = text.to_string();
            self.category = category;
            self.messages_shown.push(text.to_string());
        }

        fn set_start_label(&mut self, label: &str) {
            self.start_label = label.to_string();
        }
    }

    #[derive(Default)]
    struct ManualScheduler {
        next_id: u64,
        live: Vec<TickHandle>,
        scheduled: Vec<(TickHandle, Duration)>,
        cancelled: Vec<TickHandle>,
    }

    impl TickScheduler for ManualScheduler {
        fn schedule(&mut self, every: Duration) -> TickHandle {
            self.next_id += 1;
            let handle = TickHandle::new(self.next_id);
            self.live.push(handle);
            self.scheduled.push((handle, every));
            handle
        }

        fn cancel(&mut self, handle: TickHandle) {
            self.live.retain(|h| *h != handle);
            self.cancelled.push(handle);
        }
    }

    #[derive(Clone)]
    struct ManualClock(Rc<Cell<DateTime<Local>>>);

    impl ManualClock {
        fn advance_millis(&self, millis: i64) {
            self.0.set(self.0.get() + TimeDelta::milliseconds(millis));
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Local> {
            self.0.get()
        }
    }

    type TestController = CountdownController<FakeUi, ManualScheduler, ManualClock>;

    fn base_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap()
    }

    fn setup() -> (TestController, ManualClock) {
        let clock = ManualClock(Rc::new(Cell::new(base_time())));
        let mut controller = CountdownController::new(
            FakeUi::default(),
            ManualScheduler::default(),
            clock.clone(),
            Duration::from_secs(1),
        );
        controller.initialize();
        (controller, clock)
    }

    fn set_target(controller: &mut TestController, input: &str) {
        controller.ui.set_target_input(input);
    }

    fn display(controller: &TestController) -> String {
        controller.ui().display.as_ref().unwrap().to_string()
    }

    fn live_handle(controller: &TestController) -> TickHandle {
        *controller.scheduler().live.last().unwrap()
    }

    #[test]
    fn initialize_prefills_one_hour_ahead() {
        let (controller, _) = setup();
        let ui = controller.ui();
        assert_eq!(ui.target_input, "2025-01-15T11:00");
        assert_eq!(ui.start_label, START_LABEL);
        assert_eq!(display(&controller), "00 00 00 00");
        assert_eq!(ui.message, IDLE_MESSAGE);
        assert_eq!(ui.category, MessageCategory::Active);
        assert_eq!(controller.run_state(), RunState::Idle);
        assert!(controller.scheduler().scheduled.is_empty());
    }

    #[test]
    fn start_renders_immediately_before_first_tick() {
        let (mut controller, _) = setup();
        set_target(&mut controller, "2025-01-15T11:01:01");

        controller.start().unwrap();

        assert_eq!(display(&controller), "00 01 01 01");
        assert_eq!(controller.run_state(), RunState::Running);
        assert_eq!(controller.ui().start_label, RESTART_LABEL);
        assert_eq!(controller.ui().message, RUNNING_MESSAGE);
        assert_eq!(controller.ui().category, MessageCategory::Active);
        assert_eq!(
            controller.scheduler().scheduled,
            vec![(TickHandle::new(1), Duration::from_secs(1))]
        );
    }

    #[test]
    fn start_with_default_input_counts_down_one_hour() {
        let (mut controller, _) = setup();
        controller.start().unwrap();
        assert_eq!(
            controller.remaining(),
            Some(RemainingDuration { days: 0, hours: 1, minutes: 0, seconds: 0 })
        );
    }

    #[test]
    fn empty_target_is_rejected_without_state_change() {
        let (mut controller, _) = setup();
        set_target(&mut controller, "");

        assert_eq!(controller.start(), Err(StartError::MissingTarget));
        assert_eq!(controller.ui().message, "Please select a target date and time");
        assert_eq!(controller.ui().category, MessageCategory::Expired);
        assert_eq!(controller.run_state(), RunState::Idle);
        assert!(controller.scheduler().scheduled.is_empty());
    }

    #[test]
    fn unparseable_target_is_treated_as_missing() {
        let (mut controller, _) = setup();
        set_target(&mut controller, "next tuesday");

        assert_eq!(controller.start(), Err(StartError::MissingTarget));
        assert_eq!(controller.run_state(), RunState::Idle);
    }

    #[test]
    fn past_target_is_rejected_and_display_kept() {
        let (mut controller, _) = setup();
        set_target(&mut controller, "2025-01-15T10:00:10");
        controller.start().unwrap();
        let before = display(&controller);

        set_target(&mut controller, "2025-01-15T09:59:59");
        assert_eq!(controller.start(), Err(StartError::TargetInPast));
        assert_eq!(controller.ui().message, "Target date must be in the future");
        assert_eq!(controller.ui().category, MessageCategory::Expired);
        assert_eq!(display(&controller), before);
        // The earlier countdown keeps running.
        assert_eq!(controller.run_state(), RunState::Running);
        assert!(controller.scheduler().cancelled.is_empty());
    }

    #[test]
    fn target_equal_to_now_is_in_the_past() {
        let (mut controller, _) = setup();
        set_target(&mut controller, "2025-01-15T10:00");
        assert_eq!(controller.start(), Err(StartError::TargetInPast));
        assert_eq!(controller.run_state(), RunState::Idle);
    }

    #[test]
    fn ticks_decrement_the_display() {
        let (mut controller, clock) = setup();
        set_target(&mut controller, "2025-01-16T10:00:05");
        controller.start().unwrap();
        assert_eq!(display(&controller), "01 00 00 05");

        let handle = live_handle(&controller);
        for expected in ["01 00 00 04", "01 00 00 03", "01 00 00 02"] {
            clock.advance_millis(1_000);
            controller.on_tick(handle);
            assert_eq!(display(&controller), expected);
        }
    }

    #[test]
    fn restart_replaces_the_tick_registration() {
        let (mut controller, clock) = setup();
        set_target(&mut controller, "2025-01-15T10:00:30");
        controller.start().unwrap();
        let first = live_handle(&controller);

        clock.advance_millis(2_000);
        controller.on_tick(first);

        set_target(&mut controller, "2025-01-15T10:01:00");
        controller.start().unwrap();
        let second = live_handle(&controller);

        let scheduler = controller.scheduler();
        assert_eq!(scheduler.cancelled, vec![first]);
        assert_eq!(scheduler.scheduled.len(), 2);
        assert_eq!(scheduler.live, vec![second]);
        assert_eq!(display(&controller), "00 00 00 58");

        // A tick from the replaced registration must not drive the display.
        clock.advance_millis(3_000);
        controller.on_tick(first);
        assert_eq!(display(&controller), "00 00 00 58");

        controller.on_tick(second);
        assert_eq!(display(&controller), "00 00 00 55");
    }

    #[test]
    fn expiry_zeroes_display_and_cancels_once() {
        let (mut controller, clock) = setup();
        set_target(&mut controller, "2025-01-15T10:00:02");
        controller.start().unwrap();
        let handle = live_handle(&controller);

        clock.advance_millis(1_000);
        controller.on_tick(handle);
        assert_eq!(display(&controller), "00 00 00 01");

        clock.advance_millis(1_000);
        controller.on_tick(handle);

        assert_eq!(controller.run_state(), RunState::Expired);
        assert_eq!(display(&controller), "00 00 00 00");
        assert_eq!(controller.ui().message, COMPLETE_MESSAGE);
        assert_eq!(controller.ui().category, MessageCategory::Expired);
        assert_eq!(controller.ui().start_label, START_LABEL);
        assert_eq!(controller.scheduler().cancelled, vec![handle]);
        assert!(controller.scheduler().live.is_empty());
        assert_eq!(controller.remaining(), None);

        // Late ticks do nothing.
        let shown = controller.ui().messages_shown.len();
        clock.advance_millis(1_000);
        controller.on_tick(handle);
        assert_eq!(controller.ui().messages_shown.len(), shown);
        assert_eq!(controller.scheduler().cancelled.len(), 1);
    }

    #[test]
    fn stop_cancels_and_resets_label() {
        let (mut controller, _) = setup();
        set_target(&mut controller, "2025-01-15T12:00");
        controller.start().unwrap();
        let handle = live_handle(&controller);

        controller.stop();

        assert_eq!(controller.run_state(), RunState::Stopped);
        assert_eq!(controller.ui().start_label, START_LABEL);
        assert_eq!(controller.ui().message, STOPPED_MESSAGE);
        assert_eq!(controller.ui().category, MessageCategory::Active);
        assert_eq!(controller.scheduler().cancelled, vec![handle]);
        assert_eq!(display(&controller), "00 02 00 00");
    }

    #[test]
    fn stop_when_not_running_only_resets_ui() {
        let (mut controller, _) = setup();
        controller.ui.start_label = RESTART_LABEL.to_string();

        controller.stop();

        assert_eq!(controller.run_state(), RunState::Idle);
        assert_eq!(controller.ui().start_label, START_LABEL);
        assert_eq!(controller.ui().message, STOPPED_MESSAGE);
        assert!(controller.scheduler().cancelled.is_empty());
    }

    #[test]
    fn stop_after_expiry_keeps_expired_state() {
        let (mut controller, clock) = setup();
        set_target(&mut controller, "2025-01-15T10:00:01");
        controller.start().unwrap();
        clock.advance_millis(1_000);
        controller.on_tick(live_handle(&controller));
        assert_eq!(controller.run_state(), RunState::Expired);

        controller.stop();
        assert_eq!(controller.run_state(), RunState::Expired);
        assert_eq!(controller.ui().message, STOPPED_MESSAGE);
    }

    #[test]
    fn start_after_stop_runs_again() {
        let (mut controller, clock) = setup();
        set_target(&mut controller, "2025-01-15T10:10");
        controller.start().unwrap();
        controller.stop();

        clock.advance_millis(60_000);
        controller.start().unwrap();

        assert_eq!(controller.run_state(), RunState::Running);
        assert_eq!(display(&controller), "00 00 09 00");
        assert_eq!(controller.scheduler().live.len(), 1);
    }
}
