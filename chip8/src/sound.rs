use anyhow::{anyhow, Result};
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const TONE_PITCH_HZ: f32 = 440.0; // A4
const TONE_VOLUME: f32 = 0.1;

/// Starts and stops the tone on the timer unit's say-so
pub trait Sound {
    fn set_tone(&mut self, on: bool) -> Result<()>;
}

struct SquareWave {
    phase_inc: f32,
    phase: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                TONE_VOLUME
            } else {
                -TONE_VOLUME
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// Square wave played through the default SDL playback device
pub struct SquareBeep {
    device: AudioDevice<SquareWave>,
    is_beeping: bool,
}

impl SquareBeep {
    pub fn open(sdl: &sdl2::Sdl) -> Result<Self> {
        let audio = sdl.audio().map_err(|e| anyhow!(e))?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio
            .open_playback(None, &desired, |spec| SquareWave {
                phase_inc: TONE_PITCH_HZ / spec.freq as f32,
                phase: 0.0,
            })
            .map_err(|e| anyhow!(e))?;
        Ok(SquareBeep {
            device,
            is_beeping: false,
        })
    }
}

impl Sound for SquareBeep {
    fn set_tone(&mut self, on: bool) -> Result<()> {
        if on != self.is_beeping {
            if on {
                self.device.resume();
            } else {
                self.device.pause();
            }
            self.is_beeping = on;
        }
        Ok(())
    }
}

pub struct Mute;

impl Sound for Mute {
    fn set_tone(&mut self, _on: bool) -> Result<()> {
        Ok(())
    }
}
