/////////////////////
/// The beep played at each phase change.
///
/// Audio is best effort: when there is no output device (or the `sound` feature
/// is off) every call is skipped with a log line, never an error.
///
#[cfg(feature = "sound")]
use std::time::Duration;

#[cfg(feature = "sound")]
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};

pub const BEEP_SAMPLE_RATE: u32 = 44100;
pub const BEEP_FREQUENCY: f32 = 880.0;        // Hz
pub const BEEP_LENGTH_MS: u32 = 600;
pub const DEFAULT_VOLUME: f32 = 0.5;

/// The three transport operations the timer needs from an audio resource.
pub trait Alarm {
  fn play(&mut self);
  fn pause(&mut self);
  /// Seek back to the start without changing play/pause state
  fn rewind(&mut self);
}

/// Sine beep with a short linear fade so it doesn't click.
pub fn beep_samples(volume: f32) -> Vec<f32> {
  let total = (BEEP_SAMPLE_RATE * BEEP_LENGTH_MS / 1000) as usize;
  let fade = total / 10;
  let volume = volume.clamp(0.0, 1.0);
  (0..total)
    .map(|i| {
      let t = i as f32 / BEEP_SAMPLE_RATE as f32;
      let envelope = if i < fade {
        i as f32 / fade as f32
      } else if i >= total - fade {
        (total - i) as f32 / fade as f32
      } else {
        1.0
      };
      (t * BEEP_FREQUENCY * 2.0 * std::f32::consts::PI).sin() * envelope * volume
    })
    .collect()
}

#[cfg(feature = "sound")]
struct Output {
  _stream: OutputStream,
  stream_handle: OutputStreamHandle,
  sink: Option<Sink>,
}

pub struct Beeper {
  #[cfg(feature = "sound")]
  output: Option<Output>,
  volume: f32,
}

impl Beeper {
  /// A beeper with no audio handle. Every call is a no-op.
  pub fn silent() -> Self {
    Self {
      #[cfg(feature = "sound")]
      output: None,
      volume: DEFAULT_VOLUME,
    }
  }

  #[cfg(feature = "sound")]
  pub fn new(enabled: bool, volume: f32) -> Self {
    if !enabled {
      info!("Sound disabled by config");
      return Self::silent();
    }
    let output = match OutputStream::try_default() {
      Ok((stream, stream_handle)) => Some(Output { _stream: stream, stream_handle, sink: None }),
      Err(e) => {
        warn!("No audio output available, beeps disabled: {}", e);
        None
      }
    };
    Self { output, volume: volume.clamp(0.0, 1.0) }
  }

  #[cfg(not(feature = "sound"))]
  pub fn new(enabled: bool, volume: f32) -> Self {
    if enabled {
      info!("Built without the 'sound' feature, beeps disabled");
    }
    Self { volume: volume.clamp(0.0, 1.0) }
  }

  pub fn is_available(&self) -> bool {
    #[cfg(feature = "sound")]
    {
      self.output.is_some()
    }
    #[cfg(not(feature = "sound"))]
    {
      false
    }
  }
}

#[cfg(feature = "sound")]
impl Alarm for Beeper {
  fn play(&mut self) {
    let volume = self.volume;
    let Some(output) = self.output.as_mut() else {
      debug!("Skipping beep, no audio output");
      return;
    };
    if output.sink.as_ref().map_or(true, |sink| sink.empty()) {
      match Sink::try_new(&output.stream_handle) {
        Ok(sink) => {
          sink.append(SamplesBuffer::new(1, BEEP_SAMPLE_RATE, beep_samples(volume)));
          output.sink = Some(sink);
        }
        Err(e) => {
          warn!("Failed to create audio sink: {}", e);
          return;
        }
      }
    }
    if let Some(sink) = &output.sink {
      sink.play();
      debug!("Beep");
    }
  }

  fn pause(&mut self) {
    if let Some(sink) = self.output.as_ref().and_then(|o| o.sink.as_ref()) {
      sink.pause();
    }
  }

  fn rewind(&mut self) {
    if let Some(sink) = self.output.as_ref().and_then(|o| o.sink.as_ref()) {
      if let Err(e) = sink.try_seek(Duration::ZERO) {
        warn!("Failed to rewind beep: {}", e);
      }
    }
  }
}

#[cfg(not(feature = "sound"))]
impl Alarm for Beeper {
  fn play(&mut self) {
    debug!("Skipping beep, built without sound");
  }

  fn pause(&mut self) {}

  fn rewind(&mut self) {}
}
