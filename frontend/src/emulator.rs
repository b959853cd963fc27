//! The run loop: input polling, frame stepping, presentation, and
//! wall-clock pacing.

use std::path::Path;
use std::time::{Duration, Instant};

use dotmatrix_core::core::machine::{Machine, MachineError};
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use crate::input::KeyMap;
use crate::screenshot;
use crate::video::Video;

pub fn run(
    machine: &mut dyn Machine,
    key_map: &KeyMap,
    scale: u32,
    rom_path: &Path,
) -> Result<(), MachineError> {
    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let sdl_video = sdl_context.video().expect("Failed to init SDL video");

    let (width, height) = machine.display_size();
    let mut video = Video::new(&sdl_video, "dotmatrix", width, height, scale);
    let mut event_pump = sdl_context.event_pump().expect("Failed to get event pump");

    let buffer_size = (width * height * 3) as usize;
    let mut framebuffer = vec![0u8; buffer_size];

    let frame_duration = Duration::from_secs_f64(1.0 / machine.frame_rate_hz());
    let mut next_frame = Instant::now();

    'main: loop {
        // Poll all pending SDL events, translate to machine input.
        // Input only mutates machine state between frames.
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main,

                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'main,

                Event::KeyDown {
                    scancode: Some(Scancode::F12),
                    repeat: false,
                    ..
                } => {
                    machine.render_frame(&mut framebuffer);
                    match screenshot::save(rom_path, &framebuffer, width, height) {
                        Ok(path) => eprintln!("Saved {}", path.display()),
                        Err(e) => eprintln!("Warning: failed to save screenshot: {e}"),
                    }
                }

                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => {
                    if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, true);
                    }
                }

                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, false);
                    }
                }

                _ => {}
            }
        }

        // Run one frame of emulation; fatal CPU errors surface here.
        machine.run_frame()?;

        // The framebuffer is copied at the frame boundary only.
        machine.render_frame(&mut framebuffer);
        video.present(&framebuffer);

        // Pace to the machine's frame rate. Pacing happens at frame
        // granularity; the emulation core never sees the wall clock.
        next_frame += frame_duration;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else {
            // Fell behind: resynchronize instead of bursting frames.
            next_frame = now;
        }
    }

    Ok(())
}
