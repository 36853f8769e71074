//! The control loop's single owner of all mutable panel state.
//!
//! One [`PanelController::tick`] is one loop iteration:
//!
//! 1. Fire due periodic tasks. Their actions always run; their redraws are only
//!    requested while Active.
//! 2. Poll the touch controller once. A recognized touch is applied and the call
//!    blocks until release.
//! 3. Flush pending redraws.
//!
//! Nothing here is shared or locked: the loop owns the controller and everything is
//! reached through `&mut self`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::Vec;

use crate::event_log::EventLog;
use crate::power::{Backlight, ClockControl, PanelCommands, PowerController, PowerMode};
use crate::refresh::{PanelDisplay, PanelView, RefreshState, StatusSlot};
use crate::relay::RelayBank;
use crate::scheduler::{Scheduler, TaskId, TASK_COUNT};
use crate::sensors::{self, Readings, TemperatureSensor, NO_READINGS, SENSOR_COUNT};
use crate::touch::dispatch::resolve;
use crate::touch::{wait_for_release, ButtonAction, ButtonId, CalibrationError, ToggleId, TouchInput};

/// Hardware handed to the controller at startup.
pub struct PanelHardware<C, BL, DL, P, T, S, RA, RB> {
    pub clock: C,
    pub backlight: Backlight<BL>,
    pub delay: DL,
    /// Drawing target that also accepts the sleep/wake commands.
    pub panel: P,
    pub touch: T,
    pub sensors: S,
    pub relay_a: RA,
    pub relay_b: RB,
}

/// What one loop iteration did.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TickReport {
    /// Periodic tasks that fired, in firing order.
    pub fired: Vec<TaskId, TASK_COUNT>,
    /// Recognized touch, if any.
    pub touch: Option<(ButtonId, ButtonAction)>,
}

/// Panel state machine plus the hardware it drives.
pub struct PanelController<C, BL, DL, P, T, S, RA, RB> {
    power: PowerController<C, BL, DL>,
    panel: P,
    touch: T,
    sensors: S,
    relays: RelayBank<RA, RB>,
    scheduler: Scheduler,
    refresh: RefreshState,
    system_enabled: bool,
    readings: Readings,
    events: EventLog,
}

impl<C, BL, DL, P, T, S, RA, RB> PanelController<C, BL, DL, P, T, S, RA, RB>
where
    C: ClockControl,
    BL: OutputPin,
    DL: DelayNs,
    P: PanelDisplay + PanelCommands,
    T: TouchInput,
    S: TemperatureSensor,
    RA: OutputPin,
    RB: OutputPin,
{
    /// Boot into Active with the system disabled and a full redraw pending.
    ///
    /// Task intervals are counted from `now_ms`.
    pub fn new(
        hw: PanelHardware<C, BL, DL, P, T, S, RA, RB>,
        now_ms: u64,
    ) -> Self {
        let mut events = EventLog::new();
        events.push(now_ms, "boot: ACTIVE, system off");
        info!("Panel: boot at {} ms", now_ms);

        Self {
            power: PowerController::new(hw.clock, hw.backlight, hw.delay),
            panel: hw.panel,
            touch: hw.touch,
            sensors: hw.sensors,
            relays: RelayBank::new(hw.relay_a, hw.relay_b),
            scheduler: Scheduler::new(now_ms),
            refresh: RefreshState::new(),
            system_enabled: false,
            readings: NO_READINGS,
            events,
        }
    }

    /// Record that the touch panel runs on the default calibration.
    pub fn record_calibration_fallback(
        &mut self,
        now_ms: u64,
        reason: CalibrationError,
    ) {
        self.events
            .record(now_ms, format_args!("calibration {}: default used", reason.label()));
    }

    /// Run one loop iteration at monotonic time `now_ms`.
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> TickReport {
        let fired = self.scheduler.due(now_ms);
        for &task in &fired {
            self.run_task(task);
        }

        let touch = self.poll_touch(now_ms);

        let view = self.view();
        self.refresh.flush(&mut self.panel, &view);

        TickReport { fired, touch }
    }

    fn run_task(
        &mut self,
        task: TaskId,
    ) {
        let visible = self.power.mode().is_active();
        match task {
            TaskId::Sampling => {
                self.readings = sensors::sample_all(&mut self.sensors);
                debug!("Sampling: {} / {}", self.readings[0], self.readings[1]);
                if visible {
                    for index in 0..SENSOR_COUNT {
                        self.refresh.request_status(StatusSlot::sensor(index));
                    }
                }
            }
            TaskId::RelayCycle => {
                self.relays.cycle();
                debug!("Relays: phase {}", self.relays.phase());
                if visible {
                    self.refresh.request_status(StatusSlot::Relays);
                }
            }
        }
    }

    /// Poll once; apply a recognized touch and block until it is released.
    fn poll_touch(
        &mut self,
        now_ms: u64,
    ) -> Option<(ButtonId, ButtonAction)> {
        let sample = self.touch.poll()?;
        let Some((button, action)) = resolve(&sample, self.power.mode()) else {
            debug!("Touch: ignored ({}, {})", sample.x, sample.y);
            return None;
        };

        info!("Touch: ({}, {}) -> {}", sample.x, sample.y, action);
        self.apply(now_ms, action);
        wait_for_release(&mut self.touch);
        Some((button, action))
    }

    fn apply(
        &mut self,
        now_ms: u64,
        action: ButtonAction,
    ) {
        match action {
            ButtonAction::Toggle(ToggleId::System) => {
                self.system_enabled = !self.system_enabled;
                self.relays.set_enabled(self.system_enabled);
                self.refresh.request_button(ButtonId::System);
                self.refresh.request_status(StatusSlot::System);
                self.refresh.request_status(StatusSlot::Relays);
                let state = if self.system_enabled { "on" } else { "off" };
                self.events.record(now_ms, format_args!("touch SYSTEM: system {state}"));
            }
            ButtonAction::Sleep => {
                if self.power.request_sleep(&mut self.panel, &mut self.refresh) {
                    self.events.push(now_ms, "touch SLEEP: suspended");
                }
            }
            ButtonAction::Wake => {
                if self.power.request_wake(&mut self.panel, &mut self.refresh) {
                    self.events.push(now_ms, "touch WAKE: active");
                }
            }
        }
    }

    /// Snapshot for drawing.
    pub fn view(&self) -> PanelView {
        PanelView {
            mode: self.power.mode(),
            system_enabled: self.system_enabled,
            relays: self.relays.outputs(),
            readings: self.readings,
        }
    }

    #[inline]
    pub const fn mode(&self) -> PowerMode { self.power.mode() }

    #[inline]
    pub const fn system_enabled(&self) -> bool { self.system_enabled }

    #[inline]
    pub const fn readings(&self) -> &Readings { &self.readings }

    #[inline]
    pub const fn relay_outputs(&self) -> [bool; 2] { self.relays.outputs() }

    #[inline]
    pub const fn backlight_on(&self) -> bool { self.power.backlight_on() }

    #[inline]
    pub const fn events(&self) -> &EventLog { &self.events }

    #[inline]
    pub const fn refresh(&self) -> &RefreshState { &self.refresh }

    #[inline]
    pub const fn panel(&self) -> &P { &self.panel }

    #[inline]
    pub fn panel_mut(&mut self) -> &mut P { &mut self.panel }

    #[inline]
    pub const fn touch(&self) -> &T { &self.touch }

    #[inline]
    pub fn touch_mut(&mut self) -> &mut T { &mut self.touch }
}
