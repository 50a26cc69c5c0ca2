use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use tracing::{error, info, warn};

use c8_core::{Interpreter, RunState, Scheduler, TIMER_HZ};
use c8_display::{Display, Palette};

use crate::keymap::keymap;
use crate::sound::{Mute, Sound, SquareBeep};
use crate::Args;

/// Display refreshes per second; one scheduler frame each
const FRAME_HZ: u32 = 60;

fn open_sound(sdl: &sdl2::Sdl, mute: bool) -> Box<dyn Sound> {
    if mute {
        return Box::new(Mute);
    }
    match SquareBeep::open(sdl) {
        Ok(beep) => Box::new(beep),
        Err(e) => {
            warn!("no audio, continuing muted: {:#}", e);
            Box::new(Mute)
        }
    }
}

pub fn run(args: &Args) -> Result<()> {
    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("reading ROM {}", args.rom.display()))?;

    let interpreter = match args.seed {
        Some(seed) => Interpreter::with_seed(seed),
        None => Interpreter::new(),
    };
    let mut scheduler = Scheduler::new(interpreter);
    scheduler.load_rom(&rom)?;
    scheduler.set_turbo_speed(args.turbo_speed);
    scheduler.set_turbo(args.turbo);
    info!("running {}", args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, args.scale, Palette::default())?;
    let mut sound = open_sound(&sdl, args.mute);
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // The two clocks are independent: one frame per refresh, timers at 60Hz
    let frame_time = Duration::from_secs(1) / FRAME_HZ;
    let timer_period = Duration::from_secs(1) / TIMER_HZ;
    let mut last_timer_tick = Instant::now();

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match (key, keymap(key)) {
                    (_, Some(hex)) => scheduler.interpreter_mut().key_press(hex),
                    (Keycode::Escape, _) => break 'event,
                    (Keycode::P, _) => {
                        if scheduler.interpreter().state() == RunState::Halted {
                            scheduler.resume();
                        } else {
                            scheduler.pause();
                        }
                    }
                    (Keycode::Tab, _) => scheduler.toggle_turbo(),
                    (Keycode::Backspace, _) => {
                        if let Err(fault) = scheduler.load_rom(&rom) {
                            error!("reloading ROM: {}", fault);
                        }
                    }
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(hex) = keymap(key) {
                        scheduler.interpreter_mut().key_release(hex);
                    }
                }
                _ => continue,
            };
        }

        // Update state; a fault halts the machine but keeps the window up
        match scheduler.frame() {
            Ok(report) if report.dirty => {
                if let Some(frame) = scheduler.interpreter_mut().take_frame() {
                    if let Err(e) = display.render(&frame) {
                        warn!("skipping frame: {:#}", e);
                    }
                }
            }
            Ok(_) => {}
            Err(fault) => error!("machine halted: {}", fault),
        }

        while last_timer_tick.elapsed() >= timer_period {
            last_timer_tick += timer_period;
            let tone = scheduler.tick_timers();
            if let Err(e) = sound.set_tone(tone) {
                warn!("tone: {:#}", e);
            }
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    sound.set_tone(false)?;
    Ok(())
}
