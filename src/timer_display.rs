/////////////////////
/// The countdown itself: phase label, big mm:ss, and the per-second tick.
///
use ratatui::{prelude::*, widgets::*};
use tui_big_text::BigText;

use crate::alarm::Alarm;
use crate::clock::{ClockState, Phase, TickOutcome};

const COLOR_RED_THRESHOLD: u32 = 10;          // Seconds left before the digits go red

pub struct TimerDisplay<'a> {
  clock: &'a ClockState,
}

impl<'a> TimerDisplay<'a> {
  pub fn new(clock: &'a ClockState) -> Self {
    Self { clock }
  }

  pub fn label(&self) -> &'static str {
    self.clock.phase().label()
  }

  pub fn time_left(&self) -> String {
    self.clock.countdown().format()
  }

  /// Advance one second. The alarm goes off when the tick lands on 00:00,
  /// right as the phase flips.
  pub fn tick(clock: &mut ClockState, alarm: &mut dyn Alarm) -> TickOutcome {
    let outcome = clock.tick();
    if let TickOutcome::PhaseFlipped(phase) = outcome {
      debug!("Phase over, beeping before {:?}", phase);
      alarm.rewind();
      alarm.play();
    }
    outcome
  }

  fn style(&self) -> Style {
    if !self.clock.is_running() {
      return Style::new().gray();
    }
    let countdown = self.clock.countdown();
    if countdown.minutes == 0 && countdown.seconds <= COLOR_RED_THRESHOLD {
      return Style::new().red();
    }
    match self.clock.phase() {
      Phase::Session => Style::new().green(),
      Phase::Break => Style::new().cyan(),
    }
  }

  fn label_paragraph(&self) -> Paragraph<'_> {
    Paragraph::new(Line::from(self.label().bold())).alignment(Alignment::Center)
  }

  fn time_left_text(&self) -> BigText<'_> {
    let lines = vec![self.time_left().into()];
    tui_big_text::BigTextBuilder::default()
      .lines(lines)
      .style(self.style())
      .build()
      .expect("lines is always set")
  }

  pub fn render(&self, f: &mut Frame, label_area: Rect, time_area: Rect) {
    f.render_widget(self.label_paragraph(), label_area);
    f.render_widget(self.time_left_text(), centered(time_area, BIG_TEXT_WIDTH));
  }
}

/// Five 8x8 glyphs, "MM:SS"
const BIG_TEXT_WIDTH: u16 = 40;

fn centered(area: Rect, width: u16) -> Rect {
  let width = width.min(area.width);
  Rect { x: area.x + (area.width - width) / 2, width, ..area }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::alarm::tests::{Call, RecordingAlarm};

  #[test]
  fn test_label_and_time() {
    let mut clock = ClockState::new();
    assert_eq!(TimerDisplay::new(&clock).label(), "Session");
    assert_eq!(TimerDisplay::new(&clock).time_left(), "25:00");
    clock.set_phase(Phase::Break);
    assert_eq!(TimerDisplay::new(&clock).label(), "Break time");
    assert_eq!(TimerDisplay::new(&clock).time_left(), "05:00");
  }

  #[test]
  fn test_tick_beeps_only_on_phase_change() {
    let mut alarm = RecordingAlarm::default();
    let mut clock = ClockState::new().with_countdown(0, 1);
    clock.toggle_running();

    assert_eq!(TimerDisplay::tick(&mut clock, &mut alarm), TickOutcome::Counted);
    assert_eq!(TimerDisplay::new(&clock).time_left(), "00:00");
    assert!(alarm.calls().is_empty());

    assert_eq!(TimerDisplay::tick(&mut clock, &mut alarm), TickOutcome::PhaseFlipped(Phase::Break));
    assert_eq!(alarm.calls(), vec![Call::Rewind, Call::Play]);
    assert_eq!(TimerDisplay::new(&clock).time_left(), "05:00");
  }

  #[test]
  fn test_external_phase_change_is_silent() {
    let alarm = RecordingAlarm::default();
    let mut clock = ClockState::new();
    clock.set_phase(Phase::Break);
    clock.set_phase(Phase::Session);
    assert!(alarm.calls().is_empty());
    assert_eq!(clock.countdown().format(), "25:00");
  }

  #[test]
  fn test_idle_tick_is_silent() {
    let mut alarm = RecordingAlarm::default();
    let mut clock = ClockState::new().with_countdown(0, 0);
    assert_eq!(TimerDisplay::tick(&mut clock, &mut alarm), TickOutcome::Idle);
    assert!(alarm.calls().is_empty());
  }

  #[test]
  fn test_centered() {
    let area = Rect::new(0, 0, 100, 9);
    assert_eq!(centered(area, 40), Rect::new(30, 0, 40, 9));
    assert_eq!(centered(Rect::new(2, 1, 20, 9), 40), Rect::new(2, 1, 20, 9));
  }
}
