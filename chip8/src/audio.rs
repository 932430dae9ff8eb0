use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

/// A 440 Hz square wave, the classic CHIP-8 beep.
struct SquareWave {
    phase: f32,
    phase_step: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_step) % 1.0;
        }
    }
}

/// # Beeper
/// Owns the playback device for the beep tone. The device idles paused; the
/// frame loop resumes it while the machine's sound timer is running.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| SquareWave {
            phase: 0.0,
            phase_step: 440.0 / spec.freq as f32,
            volume: 0.15,
        })?;
        Ok(Beeper { device })
    }

    pub fn set_playing(&self, playing: bool) {
        if playing {
            self.device.resume();
        } else {
            self.device.pause();
        }
    }
}
