/////////////////////
/// 25 + 5 Clock
///
/// A work/break countdown for the terminal. The session counts down, the break
/// counts down, and a beep marks every switch between the two.
/// - 'space' starts & stops
/// - 'r' resets everything to 25 + 5
/// - '[' / ']' shortens / lengthens the break
/// - '-' / '+' shortens / lengthens the session
/// - 'q' quits
///
pub const APP_VERSION: &str = "CLOCK25 V0.1.0";
pub const APP_TITLE: &str = "25 + 5 Clock";

#[macro_use] extern crate log;
#[macro_use]
extern crate ini;

use build_time::build_time_local;
use color_eyre::eyre::Result;

mod alarm;
mod app;
mod clock;
mod config;
mod length_control;
mod logging;
mod surface;
mod ticker;
mod timer_controls;
mod timer_display;
mod tui;

use crate::alarm::Beeper;
use crate::app::ClockApp;
use crate::config::{Config, CONF_FILE_NAME};
use crate::tui::Tui;

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  logging::init();
  info!("Logging for {} initialized", APP_VERSION);
  let config = Config::load(CONF_FILE_NAME);
  logging::set_level(config.log_level);
  info!("Using {:?}", config);

  let beeper = Beeper::new(config.sound, config.volume);
  if !beeper.is_available() {
    info!("Running without sound");
  }

  let mut tui = Tui::new()?;
  tui.enter()?;
  let mut app = ClockApp::new(Box::new(beeper), tui.event_tx());
  let result = app.run(&mut tui).await;
  tui.exit()?;
  result?;
  println!("Thanks for using {} (built: {})\n", APP_VERSION, build_time_local!("%Y-%b-%d at %H:%M:%S"));
  Ok(())
}
