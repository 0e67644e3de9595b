/////////////////////
/// One adjustable duration (break or session): label, value and -/+ buttons.
///
use ratatui::{prelude::*, widgets::*};

use crate::clock::{ClockState, LengthKind};
use crate::surface::ElementId;

pub struct LengthControl<'a> {
  kind: LengthKind,
  clock: &'a ClockState,
}

impl<'a> LengthControl<'a> {
  pub fn new(kind: LengthKind, clock: &'a ClockState) -> Self {
    Self { kind, clock }
  }

  pub fn title(&self) -> &'static str {
    match self.kind {
      LengthKind::Break => "Break Length",
      LengthKind::Session => "Session Length",
    }
  }

  pub fn value(&self) -> String {
    self.clock.length(self.kind).to_string()
  }

  /// Keys shown next to the -/+ buttons
  fn keys(&self) -> (&'static str, &'static str) {
    match self.kind {
      LengthKind::Break => ("[", "]"),
      LengthKind::Session => ("-", "+"),
    }
  }

  /// Which control, and which direction, a button belongs to.
  pub fn target(id: ElementId) -> Option<(LengthKind, bool)> {
    match id {
      ElementId::BreakDecrement => Some((LengthKind::Break, false)),
      ElementId::BreakIncrement => Some((LengthKind::Break, true)),
      ElementId::SessionDecrement => Some((LengthKind::Session, false)),
      ElementId::SessionIncrement => Some((LengthKind::Session, true)),
      _ => None,
    }
  }

  /// Apply a -/+ press. Returns whether the store changed.
  pub fn press(clock: &mut ClockState, id: ElementId) -> bool {
    match Self::target(id) {
      Some((kind, true)) => clock.increment(kind),
      Some((kind, false)) => clock.decrement(kind),
      None => false,
    }
  }

  pub fn render(&self, f: &mut Frame, area: Rect) {
    let (dec_key, inc_key) = self.keys();
    let style = if self.clock.is_running() { Style::new().dark_gray() } else { Style::new().gray() };
    let line = Line::from(vec![
      dec_key.dim(),
      " [-] ".into(),
      Span::styled(self.value(), Style::new().bold().white()),
      " [+] ".into(),
      inc_key.dim(),
    ]);
    let block = Block::default().borders(Borders::ALL).title(self.title());
    f.render_widget(Paragraph::new(line).style(style).alignment(Alignment::Center).block(block), area);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_titles_and_values() {
    let clock = ClockState::new();
    let brk = LengthControl::new(LengthKind::Break, &clock);
    let session = LengthControl::new(LengthKind::Session, &clock);
    assert_eq!(brk.title(), "Break Length");
    assert_eq!(brk.value(), "5");
    assert_eq!(session.title(), "Session Length");
    assert_eq!(session.value(), "25");
  }

  #[test]
  fn test_press_routes_to_the_right_length() {
    let mut clock = ClockState::new();
    assert!(LengthControl::press(&mut clock, ElementId::BreakIncrement));
    assert!(LengthControl::press(&mut clock, ElementId::SessionDecrement));
    assert_eq!(clock.length(LengthKind::Break), 6);
    assert_eq!(clock.length(LengthKind::Session), 24);
    assert_eq!(clock.countdown().format(), "24:00");
  }

  #[test]
  fn test_press_ignores_other_elements() {
    let mut clock = ClockState::new();
    assert!(!LengthControl::press(&mut clock, ElementId::StartStop));
    assert_eq!(clock, ClockState::new());
  }

  #[test]
  fn test_press_while_running_is_ignored() {
    let mut clock = ClockState::new();
    clock.toggle_running();
    assert!(!LengthControl::press(&mut clock, ElementId::SessionIncrement));
    assert_eq!(clock.length(LengthKind::Session), 25);
  }
}
