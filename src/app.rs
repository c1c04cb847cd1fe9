//! The interactive main loop.

use crate::camera::CameraRig;
use crate::config::Config;
use crate::error::Result;
use crate::input::InputState;
use crate::render::Renderer;
use crate::scene::Scene;
use crate::window::{FpsCounter, FrameLimiter, Window, WindowEvent};

/// Opens the window, loads the scene and runs until the user quits.
pub fn run(config: &Config) -> Result<()> {
    let mut window = Window::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    )?;
    let mut renderer = Renderer::new(window.width(), window.height());
    let mut scene = Scene::from_config(config)?;
    let mut rig = CameraRig::from_config(&config.cameras);
    let mut input = InputState::new();

    let mut frame_limiter = FrameLimiter::new(&window, config.window.target_fps);
    let mut fps_counter = FpsCounter::new();

    loop {
        match window.poll_events(&mut input) {
            WindowEvent::Quit => break,
            WindowEvent::Resize(width, height) => {
                window.resize(width, height)?;
                renderer.resize(width, height);
                log::debug!("Resized to {width}x{height}");
            }
            WindowEvent::None => {}
        }

        let delta_ms = frame_limiter.wait_and_get_delta(&window);
        let delta_time = delta_ms as f32 / 1000.0;

        scene.update(&input, delta_time, &mut rig);
        input.end_frame();

        let aspect = renderer.aspect_ratio();
        let stats = scene.render(&mut renderer, rig.active(), aspect);
        window.present(renderer.as_bytes())?;

        if let Some(fps) = fps_counter.tick(delta_ms) {
            log::debug!(
                "{fps:.1} fps, {} triangles drawn, {} culled, {} rejected",
                stats.drawn,
                stats.culled,
                stats.rejected
            );
            window.set_title(&format!(
                "{} | {} camera | {fps:.0} fps",
                config.window.title,
                rig.active_kind()
            ))?;
        }
    }

    log::info!("Shutting down");
    Ok(())
}
