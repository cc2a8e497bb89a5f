//! Top-level scene controller.
//!
//! Owns the channel bank, scene sequencer, tick scheduler, trigger
//! debouncer, command receiver and output driver, and wires them together:
//! commands and scene changes set desired levels and arm the scheduler;
//! `service` runs due convergence ticks and disarms once nothing moves.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DutyOutput;
use crate::channel::ChannelBank;
use crate::command::{Command, CommandReceiver};
use crate::debounce::{DEFAULT_SETTLE, TriggerDebouncer};
use crate::fade;
use crate::scene::{ConfigError, Scene, SceneSequencer, validate};
use crate::scheduler::{DEFAULT_TICK_DURATION, TickScheduler};

/// Timing configuration for the controller.
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Convergence tick period.
    pub tick_duration: Duration,
    /// Trigger settle window.
    pub settle: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_duration: DEFAULT_TICK_DURATION,
            settle: DEFAULT_SETTLE,
        }
    }
}

/// Scene controller - the main orchestrator.
///
/// `CHANNELS` is the bank capacity, `COMMANDS` the command queue capacity.
/// One execution context calls [`Self::service`] and [`Self::poll_trigger`];
/// other contexts reach the controller through the command queue only.
pub struct SceneController<'a, O: DutyOutput, const CHANNELS: usize, const COMMANDS: usize> {
    bank: ChannelBank<CHANNELS>,
    sequencer: SceneSequencer<'a>,
    scheduler: TickScheduler,
    debouncer: TriggerDebouncer,
    commands: CommandReceiver<'a, COMMANDS>,
    output: O,
}

impl<'a, O: DutyOutput, const CHANNELS: usize, const COMMANDS: usize>
    SceneController<'a, O, CHANNELS, COMMANDS>
{
    /// Create a controller and enter the first scene.
    ///
    /// Fails fast on a malformed scene table. On success every channel's
    /// starting duty is written to the output once, then scene 0 is applied
    /// and the scheduler armed if that created fade work.
    pub fn new(
        bank: ChannelBank<CHANNELS>,
        scenes: &'a [Scene],
        commands: CommandReceiver<'a, COMMANDS>,
        output: O,
        config: &ControllerConfig,
    ) -> Result<Self, ConfigError> {
        validate(scenes, &bank)?;

        let mut controller = Self {
            bank,
            sequencer: SceneSequencer::new(scenes),
            scheduler: TickScheduler::with_tick_duration(config.tick_duration),
            debouncer: TriggerDebouncer::with_settle(config.settle),
            commands,
            output,
        };

        // Sync the hardware with the channels' starting levels.
        for (index, channel) in controller.bank.iter().enumerate() {
            controller.output.set_duty(index, channel.duty());
        }

        let first = controller.sequencer.current();
        controller.enter_scene(first);

        Ok(controller)
    }

    /// Run one bounded slice of controller work.
    ///
    /// Drains pending commands, then runs a convergence tick if one is due,
    /// disarming the scheduler after a tick that stepped zero channels.
    /// Returns the next tick deadline, or `None` while idle (the caller may
    /// sleep until the next external event). Never blocks.
    pub fn service(&mut self, now: Instant) -> Option<Instant> {
        self.drain_commands();

        if self.scheduler.poll(now) {
            let changed = fade::converge(&mut self.bank, &mut self.output);
            if changed == 0 {
                self.scheduler.disarm();
            }
        }

        self.scheduler.next_deadline()
    }

    /// Feed one sample of the trigger line.
    ///
    /// A debounced press advances the scene. Returns whether it fired.
    pub fn poll_trigger(&mut self, pressed: bool, now: Instant) -> bool {
        if !self.debouncer.poll(pressed, now) {
            return false;
        }
        self.advance_scene();
        true
    }

    /// Advance to the next scene and apply its levels.
    pub fn advance_scene(&mut self) {
        let scene = self.sequencer.advance();
        self.enter_scene(scene);
    }

    /// Fade `name` toward `level`. Returns `false` for an unknown channel.
    pub fn set_level(&mut self, name: &str, level: i16) -> bool {
        let Some((_, channel)) = self.bank.find_mut(name) else {
            return false;
        };
        channel.set_desired(level);
        self.arm_if_pending();
        true
    }

    /// Fade `name` up to full brightness. Returns `false` if unknown.
    pub fn turn_on(&mut self, name: &str) -> bool {
        self.set_level(name, i16::from(crate::level::LEVEL_MAX))
    }

    /// Fade `name` down to dark. Returns `false` if unknown.
    pub fn turn_off(&mut self, name: &str) -> bool {
        self.set_level(name, 0)
    }

    /// Force `name` fully on, skipping the fade. Returns `false` if unknown.
    ///
    /// Instant override: the new duty is written immediately.
    pub fn snap_on(&mut self, name: &str) -> bool {
        let Some((index, channel)) = self.bank.find_mut(name) else {
            return false;
        };
        channel.snap_on();
        let duty = channel.duty();
        self.output.set_duty(index, duty);
        true
    }

    /// Force `name` dark, skipping the fade. Returns `false` if unknown.
    pub fn snap_off(&mut self, name: &str) -> bool {
        let Some((index, channel)) = self.bank.find_mut(name) else {
            return false;
        };
        channel.snap_off();
        let duty = channel.duty();
        self.output.set_duty(index, duty);
        true
    }

    /// Read access to the channel bank.
    pub fn bank(&self) -> &ChannelBank<CHANNELS> {
        &self.bank
    }

    /// The scene the controller is currently in.
    pub fn current_scene(&self) -> &'a Scene {
        self.sequencer.current()
    }

    /// Whether any fade work is scheduled.
    pub fn is_fading(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// Apply a scene's partial assignment and arm on mismatch.
    fn enter_scene(&mut self, scene: &Scene) {
        #[cfg(feature = "esp32-log")]
        println!("scene: {}", scene.name);

        for (name, level) in scene.levels {
            // Validated at construction; an unknown name cannot occur here.
            if let Some((_, channel)) = self.bank.find_mut(name) {
                channel.set_desired(i16::from(*level));
            }
        }

        self.arm_if_pending();
    }

    /// Drain and apply all queued commands (non-blocking).
    fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.try_receive() {
            self.apply_command(command);
        }
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::SetLevel { channel, level } => {
                self.set_level(channel, i16::from(level));
            }
            Command::TurnOn(channel) => {
                self.turn_on(channel);
            }
            Command::TurnOff(channel) => {
                self.turn_off(channel);
            }
            Command::SnapOn(channel) => {
                self.snap_on(channel);
            }
            Command::SnapOff(channel) => {
                self.snap_off(channel);
            }
            Command::Advance => self.advance_scene(),
        }
    }

    fn arm_if_pending(&mut self) {
        if self.bank.any_pending() {
            self.scheduler.arm();
        }
    }
}
