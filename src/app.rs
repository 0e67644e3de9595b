/////////////////////
/// Root container: owns the clock store, the beep and the countdown ticker,
/// turns terminal events into button presses and draws the page.
///
/// Keys:
/// - 'space'/'enter' start or stop
/// - 'r' resets everything
/// - '[' / ']' break length -/+
/// - '-' / '+' session length -/+
/// - 'q' quits
///
use color_eyre::eyre::{eyre, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};
use strum::EnumIs;
use tokio::sync::mpsc::UnboundedSender;

use crate::alarm::Alarm;
use crate::clock::{ClockState, Countdown, LengthKind, Phase};
use crate::length_control::LengthControl;
use crate::surface::{ElementId, Surface};
use crate::ticker::Ticker;
use crate::timer_controls::TimerControls;
use crate::timer_display::TimerDisplay;
use crate::tui::{Event, Tui};
use crate::APP_TITLE;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumIs)]
enum AppState {
  #[default]
  Active,
  Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
  Press(ElementId),
  Tick(u64),
  Redraw,
  Quit,
}

/// What the countdown schedule depends on. Any change re-arms the ticker.
type TickDeps = (bool, Countdown, Phase);

pub struct ClockApp {
  state: AppState,
  clock: ClockState,
  alarm: Box<dyn Alarm>,
  ticker: Ticker,
}

impl ClockApp {
  pub fn new(alarm: Box<dyn Alarm>, event_tx: UnboundedSender<Event>) -> Self {
    Self {
      state: Default::default(),
      clock: ClockState::new(),
      alarm,
      ticker: Ticker::new(event_tx),
    }
  }

  pub fn clock(&self) -> &ClockState {
    &self.clock
  }

  pub fn surface(&self) -> Surface {
    Surface::capture(&self.clock)
  }

  pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
    info!("Clock ready: {}", self.clock().countdown());
    while !self.state.is_quitting() {
      tui.draw(|f| self.ui(f))?;
      let event = tui.next().await.ok_or(eyre!("Unable to get event"))?; // blocks until next event
      let message = self.handle_event(event);
      self.update(message);
    }
    self.ticker.disarm();
    Ok(())
  }

  // Event handler (keyboard, countdown tick)
  pub fn handle_event(&self, event: Event) -> Message {
    match event {
      Event::Key(key) => Self::key_message(key),
      Event::Tick(generation) => Message::Tick(generation),
      Event::Resize | Event::Error => Message::Redraw,
    }
  }

  fn key_message(key: KeyEvent) -> Message {
    match key.code {
      KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Message::Quit,
      KeyCode::Char(' ') | KeyCode::Enter => Message::Press(ElementId::StartStop),
      KeyCode::Char('r') | KeyCode::Char('R') => Message::Press(ElementId::Reset),
      KeyCode::Char('[') => Message::Press(ElementId::BreakDecrement),
      KeyCode::Char(']') => Message::Press(ElementId::BreakIncrement),
      KeyCode::Char('-') | KeyCode::Char('_') => Message::Press(ElementId::SessionDecrement),
      KeyCode::Char('=') | KeyCode::Char('+') => Message::Press(ElementId::SessionIncrement),
      _ => Message::Redraw,
    }
  }

  pub fn update(&mut self, message: Message) {
    let before = self.tick_deps();
    match message {
      Message::Press(id) => self.press(id),
      Message::Tick(generation) => {
        if self.ticker.accept(generation) {
          TimerDisplay::tick(&mut self.clock, self.alarm.as_mut());
        }
      }
      Message::Redraw => {}
      Message::Quit => self.quit(),
    }
    self.sync_ticker(before);
  }

  /// Same as clicking the element with this id.
  pub fn press(&mut self, id: ElementId) {
    if !id.is_button() {
      return;
    }
    debug!("Pressed {}", id.as_str());
    if !LengthControl::press(&mut self.clock, id) {
      TimerControls::press(&mut self.clock, self.alarm.as_mut(), id);
    }
    debug!("{}", self.describe());
  }

  /// One line "id=text" dump of the page, for the log.
  fn describe(&self) -> String {
    self.surface()
      .iter()
      .map(|(id, text)| format!("{}={}", id, text))
      .collect::<Vec<_>>()
      .join(" ")
  }

  fn quit(&mut self) {
    self.ticker.disarm();
    self.state = AppState::Quitting;
  }

  fn tick_deps(&self) -> TickDeps {
    (self.clock.is_running(), self.clock.countdown(), self.clock.phase())
  }

  /// Keep exactly one pending tick while running and none while idle.
  fn sync_ticker(&mut self, before: TickDeps) {
    if !self.clock.is_running() || self.state.is_quitting() {
      self.ticker.disarm();
    } else if before != self.tick_deps() || !self.ticker.is_armed() {
      self.ticker.arm();
      trace!("Armed tick {}", self.ticker.generation());
    }
  }

  fn ui(&self, f: &mut Frame) {
    let layout = self.layout(f.size());
    f.render_widget(self.title_paragraph(), layout[0]);

    let lengths = Layout::default()
      .direction(Direction::Horizontal)
      .constraints(vec![Constraint::Percentage(50), Constraint::Percentage(50)])
      .split(layout[1]);
    LengthControl::new(LengthKind::Break, &self.clock).render(f, lengths[0]);
    LengthControl::new(LengthKind::Session, &self.clock).render(f, lengths[1]);

    TimerDisplay::new(&self.clock).render(f, layout[2], layout[3]);
    TimerControls::new(&self.clock).render(f, layout[4]);
    f.render_widget(self.help_paragraph(), layout[5]);
  }

  fn layout(&self, area: Rect) -> Vec<Rect> {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .constraints(vec![
        Constraint::Length(2), // header
        Constraint::Length(3), // break / session lengths
        Constraint::Length(1), // timer label
        Constraint::Length(9), // time left
        Constraint::Length(2), // start/stop, reset
        Constraint::Length(2), // help
      ])
      .split(area);

    layout.to_vec()
  }

  fn title_paragraph(&self) -> Paragraph<'_> {
    Paragraph::new(Line::from(APP_TITLE.bold())).alignment(Alignment::Center)
  }

  fn help_paragraph(&self) -> Paragraph<'_> {
    let help_text =
      Line::from(vec!["[ ] ".into(), "break -/+".dim(), " : - + ".into(), "session -/+".dim(),
        " : space ".into(), Span::styled(TimerControls::new(&self.clock).start_stop_label().to_lowercase(), Style::new().dim()),
        " : r ".into(), "reset".dim(), " : q ".into(), "quit".dim()]);
    Paragraph::new(help_text).gray()
  }
}
