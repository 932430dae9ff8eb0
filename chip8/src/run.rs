use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::{KeyboardState, Scancode};

use display::Display;
use machine::constants::{KEY_COUNT, TIMER_HZ};
use machine::{Keypad, Machine};

use crate::audio::Beeper;
use crate::inspector;
use crate::keymap::keymap;

/// Driver-side lifecycle around the machine. The machine itself has no
/// notion of these states; it is only ever ticked or left idle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Menu,
    Running,
    Paused,
    Quit,
}

/// The 60 Hz frame loop: poll events, snapshot the keypad, tick the
/// machine, and render/beep from its outputs. All pacing lives here; the
/// machine never sleeps.
pub fn run(rom: Option<PathBuf>, ips: u32, scale: u32) -> anyhow::Result<()> {
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, "CHIP-8", scale).map_err(anyhow::Error::msg)?;
    let beeper = Beeper::new(&sdl).map_err(anyhow::Error::msg)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    // The driver owns the one machine instance; nothing reaches it except
    // through this loop.
    let mut machine = Machine::new();
    let mut show_inspector = false;

    display.blank();
    let mut mode = match rom {
        // a broken ROM on the command line is fatal; there is no menu
        // interaction to recover through yet
        Some(path) => load_rom(&mut machine, &path)?,
        None => {
            info!("no ROM given; drop a .ch8 file onto the window to start");
            Mode::Menu
        }
    };

    let frame_time = Duration::from_secs(1) / TIMER_HZ;
    let mut last_frame = Instant::now();

    while mode != Mode::Quit {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => mode = Mode::Quit,
                Event::KeyDown {
                    scancode: Some(Scancode::Space),
                    repeat: false,
                    ..
                } => mode = toggle_pause(mode),
                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => {
                    if mode == Mode::Running || mode == Mode::Paused {
                        info!("stopped; back to menu");
                        mode = Mode::Menu;
                        display.blank();
                    }
                }
                Event::KeyDown {
                    scancode: Some(Scancode::Grave),
                    repeat: false,
                    ..
                } => show_inspector = !show_inspector,
                Event::DropFile { filename, .. } => {
                    // load_rom resets the machine first, so a ROM dropped
                    // while paused can't leak state from the previous run
                    match load_rom(&mut machine, Path::new(&filename)) {
                        Ok(next) => mode = next,
                        Err(e) => error!("{e:#}"),
                    }
                }
                _ => {}
            }
        }

        if mode == Mode::Running {
            let keys = keypad_snapshot(&events.keyboard_state());
            match machine.tick(&keys, ips) {
                Ok(tick) => {
                    if tick.redraw {
                        display
                            .render(machine.frame_buffer())
                            .map_err(anyhow::Error::msg)?;
                    }
                    beeper.set_playing(tick.beep || machine.state().sound_timer > 0);
                }
                Err(e) => {
                    error!("machine fault: {e}; back to menu");
                    mode = Mode::Menu;
                    display.blank();
                }
            }
        } else {
            beeper.set_playing(false);
        }

        if show_inspector {
            inspector::dump(&machine);
        }

        let elapsed = last_frame.elapsed();
        if frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
        last_frame = Instant::now();
    }

    Ok(())
}

fn toggle_pause(mode: Mode) -> Mode {
    match mode {
        Mode::Running => {
            info!("paused");
            Mode::Paused
        }
        Mode::Paused => {
            info!("resumed");
            Mode::Running
        }
        other => other,
    }
}

/// Reads and loads a ROM, returning the mode to continue in.
fn load_rom(machine: &mut Machine, path: &Path) -> anyhow::Result<Mode> {
    let bytes =
        fs::read(path).with_context(|| format!("reading ROM {}", path.display()))?;
    machine
        .load_program(&bytes)
        .with_context(|| format!("loading ROM {}", path.display()))?;
    info!("running {}", path.display());
    Ok(Mode::Running)
}

/// Snapshots the 16 keypad states once per frame; the machine never polls
/// input itself.
fn keypad_snapshot(keyboard: &KeyboardState) -> Keypad {
    let mut keys = [false; KEY_COUNT];
    for scancode in keyboard.pressed_scancodes() {
        if let Some(key) = keymap(scancode) {
            keys[key as usize] = true;
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_pause_flips_between_running_and_paused() {
        assert_eq!(toggle_pause(Mode::Running), Mode::Paused);
        assert_eq!(toggle_pause(Mode::Paused), Mode::Running);
    }

    #[test]
    fn test_toggle_pause_ignores_other_modes() {
        assert_eq!(toggle_pause(Mode::Menu), Mode::Menu);
        assert_eq!(toggle_pause(Mode::Quit), Mode::Quit);
    }

    #[test]
    fn test_load_rom_rejects_missing_file() {
        let mut machine = Machine::new();
        assert!(load_rom(&mut machine, Path::new("/no/such/rom.ch8")).is_err());
    }
}
