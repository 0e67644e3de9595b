/////////////////////
/// Stable identifiers for everything on screen.
///
/// External test harnesses address the page by these names, so the strings
/// below must never change.
///
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::clock::{ClockState, LengthKind};
use crate::length_control::LengthControl;
use crate::timer_controls::TimerControls;
use crate::timer_display::TimerDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
pub enum ElementId {
  #[strum(serialize = "break-label")]
  BreakLabel,
  #[strum(serialize = "break-length")]
  BreakLength,
  #[strum(serialize = "break-decrement")]
  BreakDecrement,
  #[strum(serialize = "break-increment")]
  BreakIncrement,
  #[strum(serialize = "session-label")]
  SessionLabel,
  #[strum(serialize = "session-length")]
  SessionLength,
  #[strum(serialize = "session-decrement")]
  SessionDecrement,
  #[strum(serialize = "session-increment")]
  SessionIncrement,
  #[strum(serialize = "timer-label")]
  TimerLabel,
  #[strum(serialize = "time-left")]
  TimeLeft,
  #[strum(serialize = "start_stop")]
  StartStop,
  #[strum(serialize = "reset")]
  Reset,
  #[strum(serialize = "beep")]
  Beep,
}

impl ElementId {
  pub fn as_str(self) -> &'static str {
    self.into()
  }

  pub fn is_button(self) -> bool {
    matches!(
      self,
      ElementId::BreakDecrement
        | ElementId::BreakIncrement
        | ElementId::SessionDecrement
        | ElementId::SessionIncrement
        | ElementId::StartStop
        | ElementId::Reset
    )
  }
}

/// Text content of every element for a given clock state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
  elements: Vec<(ElementId, String)>,
}

impl Surface {
  pub fn capture(clock: &ClockState) -> Self {
    let break_control = LengthControl::new(LengthKind::Break, clock);
    let session_control = LengthControl::new(LengthKind::Session, clock);
    let display = TimerDisplay::new(clock);
    let controls = TimerControls::new(clock);
    let elements = ElementId::iter()
      .map(|id| {
        let text = match id {
          ElementId::BreakLabel => break_control.title().to_string(),
          ElementId::BreakLength => break_control.value(),
          ElementId::BreakDecrement | ElementId::SessionDecrement => "-".to_string(),
          ElementId::BreakIncrement | ElementId::SessionIncrement => "+".to_string(),
          ElementId::SessionLabel => session_control.title().to_string(),
          ElementId::SessionLength => session_control.value(),
          ElementId::TimerLabel => display.label().to_string(),
          ElementId::TimeLeft => display.time_left(),
          ElementId::StartStop => controls.start_stop_label().to_string(),
          ElementId::Reset => TimerControls::RESET_LABEL.to_string(),
          ElementId::Beep => String::new(),
        };
        (id, text)
      })
      .collect();
    Self { elements }
  }

  pub fn text(&self, id: ElementId) -> &str {
    self.elements
      .iter()
      .find(|(element, _)| *element == id)
      .map(|(_, text)| text.as_str())
      .unwrap_or_default()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
    self.elements.iter().map(|(id, text)| (id.as_str(), text.as_str()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_identifiers_are_stable() {
    let ids: Vec<&str> = ElementId::iter().map(ElementId::as_str).collect();
    assert_eq!(ids, vec![
      "break-label", "break-length", "break-decrement", "break-increment",
      "session-label", "session-length", "session-decrement", "session-increment",
      "timer-label", "time-left", "start_stop", "reset", "beep",
    ]);
  }

  #[test]
  fn test_default_surface() {
    let surface = Surface::capture(&ClockState::new());
    assert_eq!(surface.text(ElementId::BreakLabel), "Break Length");
    assert_eq!(surface.text(ElementId::BreakLength), "5");
    assert_eq!(surface.text(ElementId::SessionLabel), "Session Length");
    assert_eq!(surface.text(ElementId::SessionLength), "25");
    assert_eq!(surface.text(ElementId::TimerLabel), "Session");
    assert_eq!(surface.text(ElementId::TimeLeft), "25:00");
    assert_eq!(surface.text(ElementId::StartStop), "Start");
    assert_eq!(surface.text(ElementId::Reset), "Reset");
    assert_eq!(surface.iter().count(), 13);
  }

  #[test]
  fn test_running_surface() {
    let mut clock = ClockState::new();
    clock.toggle_running();
    clock.tick();
    let surface = Surface::capture(&clock);
    assert_eq!(surface.text(ElementId::TimeLeft), "24:59");
    assert_eq!(surface.text(ElementId::StartStop), "Stop");
  }

  #[test]
  fn test_buttons() {
    let buttons: Vec<ElementId> = ElementId::iter().filter(|id| id.is_button()).collect();
    assert_eq!(buttons.len(), 6);
    assert!(!ElementId::TimeLeft.is_button());
  }
}
