use simplelog::*;
use std::fs::File;

pub const LOG_FILE_NAME: &str = "clock25.log";

/// Warnings go to the terminal, everything else to the log file.
///
/// Nothing here is fatal: if the file or the logger can't be set up we say so
/// on stderr and carry on.
pub fn init() {
  let mut loggers: Vec<Box<dyn SharedLogger>> =
    vec![TermLogger::new(LevelFilter::Warn, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)];

  match File::create(LOG_FILE_NAME) {
    Ok(log_file) => loggers.push(WriteLogger::new(LevelFilter::Trace, Config::default(), log_file)),
    Err(e) => {
      eprintln!("Warning: Could not create log file: {}", e);
      eprintln!("Continuing with terminal logging only.");
    }
  }

  if let Err(e) = CombinedLogger::init(loggers) {
    eprintln!("Warning: Could not initialize logger: {}", e);
    return;
  }
  set_level(LevelFilter::Info);
}

/// The file logger accepts everything, this is the real cap. Warnings always get through.
pub fn set_level(level: LevelFilter) {
  log::set_max_level(level.max(LevelFilter::Warn));
}
