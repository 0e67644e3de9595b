/////////////////////
/// The clock store: every piece of mutable timer state lives here.
///
/// Views read it, the root container mutates it through the operations below.
/// Invalid requests (out of bounds, adjusting while running) are silent no-ops.
///
use std::fmt;

pub const DEFAULT_SESSION_LENGTH: u32 = 25;   // Minutes
pub const DEFAULT_BREAK_LENGTH: u32 = 5;      // Minutes
pub const MIN_LENGTH: u32 = 1;
pub const MAX_LENGTH: u32 = 60;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  #[default]
  Session,
  Break,
}

impl Phase {
  pub fn flipped(self) -> Self {
    match self {
      Phase::Session => Phase::Break,
      Phase::Break => Phase::Session,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Phase::Session => "Session",
      Phase::Break => "Break time",
    }
  }
}

/// Which of the two adjustable durations an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthKind {
  Break,
  Session,
}

/// Live mm:ss remaining. `seconds` stays within 0..=59.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
  pub minutes: u32,
  pub seconds: u32,
}

impl Countdown {
  pub fn new(minutes: u32, seconds: u32) -> Self {
    debug_assert!(seconds < 60);
    Self { minutes, seconds }
  }

  pub fn from_minutes(minutes: u32) -> Self {
    Self { minutes, seconds: 0 }
  }

  pub fn is_zero(&self) -> bool {
    self.minutes == 0 && self.seconds == 0
  }

  /// Zero-padded "MM:SS"
  pub fn format(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for Countdown {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:02}:{:02}", self.minutes, self.seconds)
  }
}

/// What a single countdown tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
  /// Not running, nothing changed
  Idle,
  Counted,
  /// The countdown was at 00:00; the phase flipped and the countdown reloaded
  PhaseFlipped(Phase),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
  session_length: u32,
  break_length: u32,
  phase: Phase,
  countdown: Countdown,
  running: bool,
}

impl Default for ClockState {
  fn default() -> Self {
    Self::new()
  }
}

impl ClockState {
  pub fn new() -> Self {
    Self {
      session_length: DEFAULT_SESSION_LENGTH,
      break_length: DEFAULT_BREAK_LENGTH,
      phase: Phase::Session,
      countdown: Countdown::from_minutes(DEFAULT_SESSION_LENGTH),
      running: false,
    }
  }

  pub fn length(&self, kind: LengthKind) -> u32 {
    match kind {
      LengthKind::Break => self.break_length,
      LengthKind::Session => self.session_length,
    }
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn countdown(&self) -> Countdown {
    self.countdown
  }

  pub fn is_running(&self) -> bool {
    self.running
  }

  /// Duration of the phase currently feeding the countdown.
  pub fn active_length(&self) -> u32 {
    match self.phase {
      Phase::Session => self.session_length,
      Phase::Break => self.break_length,
    }
  }

  /// Returns true when the length actually changed.
  pub fn increment(&mut self, kind: LengthKind) -> bool {
    let current = self.length(kind);
    if self.running || !(MIN_LENGTH..MAX_LENGTH).contains(&current) {
      debug!("Ignoring {:?} increment at {} (running: {})", kind, current, self.running);
      return false;
    }
    self.set_length(kind, current + 1);
    true
  }

  /// Returns true when the length actually changed.
  pub fn decrement(&mut self, kind: LengthKind) -> bool {
    let current = self.length(kind);
    if self.running || current <= MIN_LENGTH || current > MAX_LENGTH {
      debug!("Ignoring {:?} decrement at {} (running: {})", kind, current, self.running);
      return false;
    }
    self.set_length(kind, current - 1);
    true
  }

  fn set_length(&mut self, kind: LengthKind, minutes: u32) {
    match kind {
      LengthKind::Break => self.break_length = minutes,
      LengthKind::Session => self.session_length = minutes,
    }
    self.resync();
    info!("{:?} length set to {} min", kind, minutes);
  }

  pub fn toggle_running(&mut self) {
    self.running = !self.running;
    info!("Timer {}", if self.running { "started" } else { "stopped" });
  }

  /// Phase change from outside the countdown. Reloads, never alerts.
  pub fn set_phase(&mut self, phase: Phase) {
    self.phase = phase;
    self.resync();
  }

  /// One second of wall-clock time. Only counts while running.
  pub fn tick(&mut self) -> TickOutcome {
    if !self.running {
      return TickOutcome::Idle;
    }
    let Countdown { minutes, seconds } = self.countdown;
    if self.countdown.is_zero() {
      self.phase = self.phase.flipped();
      self.resync();
      info!("Countdown finished, switching to {:?}", self.phase);
      return TickOutcome::PhaseFlipped(self.phase);
    }
    self.countdown = if seconds == 0 {
      Countdown::new(minutes - 1, 59)
    } else {
      Countdown::new(minutes, seconds - 1)
    };
    TickOutcome::Counted
  }

  pub fn reset(&mut self) {
    *self = Self::new();
    info!("Clock reset to defaults");
  }

  fn resync(&mut self) {
    self.countdown = Countdown::from_minutes(self.active_length());
  }

  #[cfg(test)]
  pub(crate) fn with_countdown(mut self, minutes: u32, seconds: u32) -> Self {
    self.countdown = Countdown::new(minutes, seconds);
    self
  }
}
