//! Rest-complete signal: a sound asset, falling back to a synthesized tone

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Result, bail};
use tracing::{debug, warn};

use crate::config::Config;

pub trait Chime {
    fn play(&mut self) -> Result<()>;
}

/// Sound asset played through an external player
pub struct SoundFile {
    pub path: PathBuf,
    pub player: String,
}

impl Chime for SoundFile {
    fn play(&mut self) -> Result<()> {
        if !self.path.is_file() {
            bail!("sound asset {} not found", self.path.display());
        }
        // Playback runs detached; the countdown does not wait for it
        Command::new(&self.player)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

/// Short beep. A terminal has no oscillator, so it rings the bell.
#[derive(Debug, Clone, Copy)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u64,
    pub gain: f32,
}

impl Default for Tone {
    fn default() -> Self {
        Self { frequency_hz: 800, duration_ms: 500, gain: 0.3 }
    }
}

impl Chime for Tone {
    fn play(&mut self) -> Result<()> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        debug!("Tone {}Hz {}ms", self.frequency_hz, self.duration_ms);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    Primary,
    Fallback,
    Silent,
}

/// Completion signal with fallback; never fails the caller
pub struct CompletionSignal {
    primary: Option<Box<dyn Chime + Send>>,
    fallback: Box<dyn Chime + Send>,
}

impl CompletionSignal {
    pub fn new(primary: Option<Box<dyn Chime + Send>>, fallback: Box<dyn Chime + Send>) -> Self {
        Self { primary, fallback }
    }

    pub fn from_config(config: &Config) -> Self {
        let primary = config.sound_file.clone().map(|path| {
            Box::new(SoundFile { path, player: config.sound_player.clone() }) as Box<dyn Chime + Send>
        });
        Self::new(primary, Box::new(Tone::default()))
    }

    pub fn fire(&mut self) -> SignalSource {
        if let Some(primary) = self.primary.as_mut() {
            match primary.play() {
                Ok(()) => return SignalSource::Primary,
                Err(e) => warn!("Sound playback failed, using tone: {}", e),
            }
        }

        match self.fallback.play() {
            Ok(()) => SignalSource::Fallback,
            Err(e) => {
                warn!("Tone playback failed: {}", e);
                SignalSource::Silent
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts plays; fails when `fail` is set
    pub(crate) struct CountingChime {
        pub plays: Arc<AtomicUsize>,
        pub fail: bool,
    }

    impl Chime for CountingChime {
        fn play(&mut self) -> Result<()> {
            if self.fail {
                bail!("no audio device");
            }
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    pub(crate) fn counting(fail: bool) -> (Box<dyn Chime + Send>, Arc<AtomicUsize>) {
        let plays = Arc::new(AtomicUsize::new(0));
        (Box::new(CountingChime { plays: plays.clone(), fail }), plays)
    }

    #[test]
    fn test_primary_used_when_available() {
        let (primary, primary_plays) = counting(false);
        let (fallback, fallback_plays) = counting(false);
        let mut signal = CompletionSignal::new(Some(primary), fallback);

        assert_eq!(signal.fire(), SignalSource::Primary);
        assert_eq!(primary_plays.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_plays.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fallback_on_failure() {
        let (primary, _) = counting(true);
        let (fallback, fallback_plays) = counting(false);
        let mut signal = CompletionSignal::new(Some(primary), fallback);

        assert_eq!(signal.fire(), SignalSource::Fallback);
        assert_eq!(fallback_plays.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_silent_when_everything_fails() {
        let (fallback, _) = counting(true);
        let mut signal = CompletionSignal::new(None, fallback);
        assert_eq!(signal.fire(), SignalSource::Silent);
    }

    #[test]
    fn test_missing_sound_file_errors() {
        let mut sound = SoundFile {
            path: PathBuf::from("/nonexistent/beep.mp3"),
            player: "paplay".into(),
        };
        assert!(sound.play().is_err());
    }
}
