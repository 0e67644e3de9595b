/////////////////////
/// Start/stop toggle and the full reset.
///
use ratatui::{prelude::*, widgets::*};

use crate::alarm::Alarm;
use crate::clock::ClockState;
use crate::surface::ElementId;

pub struct TimerControls<'a> {
  clock: &'a ClockState,
}

impl<'a> TimerControls<'a> {
  pub const START_LABEL: &'static str = "Start";
  pub const STOP_LABEL: &'static str = "Stop";
  pub const RESET_LABEL: &'static str = "Reset";

  pub fn new(clock: &'a ClockState) -> Self {
    Self { clock }
  }

  pub fn start_stop_label(&self) -> &'static str {
    if self.clock.is_running() { Self::STOP_LABEL } else { Self::START_LABEL }
  }

  pub fn start_stop(clock: &mut ClockState) {
    clock.toggle_running();
  }

  /// Silence and rewind the beep, then put every value back to its default.
  pub fn reset(clock: &mut ClockState, alarm: &mut dyn Alarm) {
    alarm.pause();
    alarm.rewind();
    clock.reset();
  }

  /// Returns false for elements that aren't ours.
  pub fn press(clock: &mut ClockState, alarm: &mut dyn Alarm, id: ElementId) -> bool {
    match id {
      ElementId::StartStop => Self::start_stop(clock),
      ElementId::Reset => Self::reset(clock, alarm),
      _ => return false,
    }
    true
  }

  pub fn render(&self, f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
      "space ".dim(),
      Span::styled(format!("[ {} ]", self.start_stop_label()), Style::new().bold()),
      "   ".into(),
      "r ".dim(),
      Span::styled(format!("[ {} ]", Self::RESET_LABEL), Style::new().bold()),
    ]);
    f.render_widget(Paragraph::new(line).gray().alignment(Alignment::Center).block(Block::default().borders(Borders::TOP)), area);
  }
}
