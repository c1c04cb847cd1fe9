//! SDL2 window that presents the software-rendered frame.
//!
//! The frame is uploaded into a streaming ARGB8888 texture and stretched over
//! the canvas. Keyboard and mouse events are translated into [`InputState`].

use std::time::Duration;

use sdl2::event::{Event, WindowEvent as SdlWindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseWheelDirection;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::error::{Error, Result};
use crate::input::{InputState, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// Sleeps off the rest of each frame to hold a target frame rate.
pub struct FrameLimiter {
    previous_frame_time: u64,
    frame_target_ms: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, target_fps: u32) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            frame_target_ms: 1000 / u64::from(target_fps.max(1)),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    /// Delta time represents the time elapsed since the last call to this method.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < self.frame_target_ms {
            std::thread::sleep(Duration::from_millis(self.frame_target_ms - delta_time));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

/// Counts frames and reports the rate once per second.
#[derive(Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed_ms: u64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame; returns the frame rate when a full second has passed.
    pub fn tick(&mut self, delta_ms: u64) -> Option<f32> {
        self.frames += 1;
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms < 1000 {
            return None;
        }
        let fps = self.frames as f32 * 1000.0 / self.elapsed_ms as f32;
        self.frames = 0;
        self.elapsed_ms = 0;
        Some(fps)
    }
}

fn map_key(keycode: Keycode) -> Option<Key> {
    Some(match keycode {
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::W => Key::W,
        Keycode::A => Key::A,
        Keycode::S => Key::S,
        Keycode::D => Key::D,
        Keycode::C => Key::C,
        Keycode::F => Key::F,
        Keycode::L => Key::L,
        Keycode::B => Key::B,
        Keycode::M => Key::M,
        Keycode::Escape => Key::Escape,
        _ => return None,
    })
}

/// Wheel offset with positive meaning "away from the user", whatever the
/// platform's natural-scrolling setting.
fn wheel_offset(y: i32, direction: MouseWheelDirection) -> f32 {
    match direction {
        MouseWheelDirection::Flipped => -(y as f32),
        _ => y as f32,
    }
}

pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    // Declared before `texture_creator` so it is dropped first.
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    /// Opens a resizable window with the mouse captured for mouse look.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| Error::Window(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| Error::Window(e.to_string()))?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        sdl_context.mouse().set_relative_mouse_mode(true);

        let texture = Self::create_texture(&texture_creator, width, height)?;

        log::info!("Opened {width}x{height} window");
        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    fn create_texture(
        texture_creator: &TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Texture<'static>> {
        // SAFETY: the creator is boxed, so its address is stable, and it lives
        // in the same `Window` as the texture, which is dropped before it.
        let texture_creator: &'static TextureCreator<WindowContext> =
            unsafe { &*(texture_creator as *const _) };
        texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| Error::Window(e.to_string()))
    }

    /// Drains pending events into `input`, returning the last window event.
    pub fn poll_events(&mut self, input: &mut InputState) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => {
                    input.request_quit();
                    result = WindowEvent::Quit;
                }
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = map_key(keycode) {
                        input.key_down(key);
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = map_key(keycode) {
                        input.key_up(key);
                    }
                }
                // Screen y grows downward; mouse look wants up positive.
                Event::MouseMotion { xrel, yrel, .. } => {
                    input.mouse_motion(xrel as f32, -(yrel as f32));
                }
                Event::MouseWheel { y, direction, .. } => {
                    input.scroll(wheel_offset(y, direction));
                }
                Event::Window {
                    win_event: SdlWindowEvent::Resized(w, h),
                    ..
                } if result != WindowEvent::Quit => {
                    result = WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32);
                }
                Event::Window {
                    win_event: SdlWindowEvent::FocusLost,
                    ..
                } => input.release_all(),
                _ => {}
            }
        }
        if input.quit_requested() {
            result = WindowEvent::Quit;
        }
        result
    }

    /// Uploads an ARGB8888 frame of the current window size and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<()> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| Error::Window(e.to_string()))?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| Error::Window(e.to_string()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
