/////////////////////
/// One-second countdown scheduling.
///
/// At most one tick is ever pending: arming cancels whatever was scheduled
/// before. Every armed tick carries the generation it was armed with, so a
/// tick that was already queued when it got superseded can be recognised and
/// dropped by the receiver.
///
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::tui::Event;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub struct Ticker {
  interval: Duration,
  generation: u64,
  cancellation_token: Option<CancellationToken>,
  event_tx: UnboundedSender<Event>,
}

impl Ticker {
  pub fn new(event_tx: UnboundedSender<Event>) -> Self {
    Self { interval: TICK_INTERVAL, generation: 0, cancellation_token: None, event_tx }
  }

  /// Generation of the currently armed tick; ticks carrying anything else are stale.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn is_armed(&self) -> bool {
    self.cancellation_token.is_some()
  }

  /// Is this tick the one we're waiting for?
  pub fn accept(&mut self, generation: u64) -> bool {
    if self.is_armed() && generation == self.generation {
      // It has fired, nothing is pending any more
      self.cancellation_token = None;
      true
    } else {
      debug!("Dropping stale tick {} (current {})", generation, self.generation);
      false
    }
  }

  /// Schedule a single tick one interval from now, replacing any pending one.
  pub fn arm(&mut self) {
    self.disarm();
    self.generation += 1;
    let generation = self.generation;
    let token = CancellationToken::new();
    let _token = token.clone();
    let _event_tx = self.event_tx.clone();
    let interval = self.interval;
    tokio::spawn(async move {
      tokio::select! {
        _ = _token.cancelled() => {}
        _ = tokio::time::sleep(interval) => {
          if let Err(e) = _event_tx.send(Event::Tick(generation)) {
            log::error!("Failed to send tick event: {}", e);
          }
        }
      }
    });
    self.cancellation_token = Some(token);
  }

  pub fn disarm(&mut self) {
    if let Some(token) = self.cancellation_token.take() {
      token.cancel();
    }
  }
}

impl Drop for Ticker {
  fn drop(&mut self) {
    self.disarm();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

  fn ticker() -> (Ticker, UnboundedReceiver<Event>) {
    let (tx, rx) = unbounded_channel();
    (Ticker::new(tx), rx)
  }

  async fn settle() {
    for _ in 0..10 {
      tokio::task::yield_now().await;
    }
  }

  #[tokio::test(start_paused = true)]
  async fn test_armed_tick_fires_after_a_second() {
    let (mut ticker, mut rx) = ticker();
    ticker.arm();
    settle().await;
    tokio::time::advance(Duration::from_millis(999)).await;
    settle().await;
    assert!(rx.try_recv().is_err());

    tokio::time::advance(Duration::from_millis(2)).await;
    settle().await;
    match rx.try_recv() {
      Ok(Event::Tick(generation)) => assert!(ticker.accept(generation)),
      other => panic!("expected a tick, got {:?}", other),
    }
    assert!(!ticker.is_armed());
  }

  #[tokio::test(start_paused = true)]
  async fn test_disarm_leaves_nothing_behind() {
    let (mut ticker, mut rx) = ticker();
    ticker.arm();
    ticker.disarm();
    tokio::time::advance(Duration::from_secs(5)).await;
    settle().await;
    assert!(rx.try_recv().is_err());
  }

  #[tokio::test(start_paused = true)]
  async fn test_rearm_keeps_a_single_pending_tick() {
    let (mut ticker, mut rx) = ticker();
    ticker.arm();
    ticker.arm();
    ticker.arm();
    settle().await;
    tokio::time::advance(Duration::from_millis(1001)).await;
    settle().await;
    let mut ticks = Vec::new();
    while let Ok(Event::Tick(generation)) = rx.try_recv() {
      ticks.push(generation);
    }
    assert_eq!(ticks, vec![3]);
  }

  #[tokio::test(start_paused = true)]
  async fn test_stale_generation_is_rejected() {
    let (mut ticker, _rx) = ticker();
    ticker.arm();
    let stale = ticker.generation();
    ticker.arm();
    assert!(!ticker.accept(stale));
    assert!(ticker.accept(ticker.generation()));
  }

  #[tokio::test(start_paused = true)]
  async fn test_drop_cancels_pending_tick() {
    let (mut ticker, mut rx) = ticker();
    ticker.arm();
    drop(ticker);
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;
    assert!(rx.try_recv().is_err());
  }
}
