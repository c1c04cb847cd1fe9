//! The car, the track and the lights, advanced and drawn once per frame.

use crate::camera::{Camera, CameraRig};
use crate::car::Car;
use crate::colors;
use crate::config::Config;
use crate::error::Result;
use crate::input::{Action, InputState};
use crate::light::{DirectionalLight, Fog, Lighting, SpotLight};
use crate::math::{Mat4, Vec3};
use crate::model::Model;
use crate::render::{DrawStats, RenderOptions, Renderer};

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

pub struct Scene {
    car: Car,
    car_model: Model,
    track: Model,
    sun: DirectionalLight,
    spot: SpotLight,
    spot_enabled: bool,
    fog: Fog,
    fog_enabled: bool,
    clear_color: u32,
    options: RenderOptions,
}

impl Scene {
    /// Loads the car and track models named in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let car_model = Model::from_obj("car", &config.car.model)?;
        let track = Model::from_obj("track", &config.track.model)?;
        Ok(Self::with_models(config, car_model, track))
    }

    /// Builds the scene around already-loaded models.
    pub fn with_models(config: &Config, mut car_model: Model, mut track: Model) -> Self {
        let car = Car::new(
            config.car.position,
            config.car.heading,
            config.car.speed,
            config.car.turn_rate,
        );
        car_model.set_local_matrix(config.car.fit.to_matrix());

        track.set_local_matrix(config.track.fit.to_matrix());
        track.transform_mut().set_position(config.track.position);
        track.set_ambient_override(config.track.ambient);

        let mut scene = Self {
            car,
            car_model,
            track,
            sun: config.lighting.sun,
            spot: config.lighting.spot.to_light(),
            spot_enabled: config.lighting.spot.enabled,
            fog: config.fog.to_fog(config.render.clear_color),
            fog_enabled: config.fog.enabled,
            clear_color: colors::from_vec3(config.render.clear_color),
            options: RenderOptions {
                mode: config.render.mode,
                backface_culling: config.render.backface_culling,
                ..Default::default()
            },
        };
        scene.sync_car_model();
        scene
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn car_model(&self) -> &Model {
        &self.car_model
    }

    pub fn track(&self) -> &Model {
        &self.track
    }

    pub fn spot_light(&self) -> &SpotLight {
        &self.spot
    }

    pub fn spot_enabled(&self) -> bool {
        self.spot_enabled
    }

    pub fn fog_enabled(&self) -> bool {
        self.fog_enabled
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Advances one frame: applies toggles, moves the cameras and the car,
    /// then attaches the spot light to the active camera.
    pub fn update(&mut self, input: &InputState, delta_time: f32, rig: &mut CameraRig) {
        for &action in input.actions() {
            self.apply(action, rig);
        }

        for movement in input.camera_movements() {
            rig.process_keyboard(movement, delta_time);
        }
        let (dx, dy) = input.mouse_delta();
        if dx != 0.0 || dy != 0.0 {
            rig.process_mouse_movement(dx, dy);
        }
        if input.scroll_delta() != 0.0 {
            rig.process_mouse_scroll(input.scroll_delta());
        }

        self.car.drive(input.drive(), delta_time);
        self.sync_car_model();
        rig.track_car(self.car.position(), &self.car.model_matrix());

        let camera = rig.active();
        self.spot.aim(camera.position(), camera.front());
    }

    fn apply(&mut self, action: Action, rig: &mut CameraRig) {
        match action {
            Action::CycleCamera => {
                rig.cycle();
            }
            Action::ToggleFog => {
                self.fog_enabled = !self.fog_enabled;
                log::info!("Fog {}", on_off(self.fog_enabled));
            }
            Action::ToggleSpotLight => {
                self.spot_enabled = !self.spot_enabled;
                log::info!("Spot light {}", on_off(self.spot_enabled));
            }
            Action::ToggleBackfaceCulling => {
                self.options.backface_culling = !self.options.backface_culling;
                log::info!("Backface culling {}", on_off(self.options.backface_culling));
            }
            Action::CycleRenderMode => {
                self.options.mode = self.options.mode.next();
                log::info!("Render mode: {}", self.options.mode);
            }
        }
    }

    fn sync_car_model(&mut self) {
        *self.car_model.transform_mut() = *self.car.transform();
    }

    /// Lights as seen from `eye` with the current toggles applied.
    pub fn lighting(&self, eye: Vec3) -> Lighting {
        Lighting {
            sun: self.sun,
            spot: self.spot_enabled.then_some(self.spot),
            fog: self.fog_enabled.then_some(self.fog),
            eye,
        }
    }

    /// Clears the frame and draws the car then the track through `camera`.
    pub fn render(&self, renderer: &mut Renderer, camera: &dyn Camera, aspect: f32) -> DrawStats {
        renderer.clear(self.clear_color);

        let projection =
            Mat4::perspective_rh(camera.zoom().to_radians(), aspect, NEAR_PLANE, FAR_PLANE);
        let view_projection = projection * camera.view_matrix();
        let lighting = self.lighting(camera.position());

        let mut stats =
            renderer.draw_model(&self.car_model, &view_projection, &lighting, &self.options);
        stats += renderer.draw_model(&self.track, &view_projection, &lighting, &self.options);
        stats
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraKind;
    use crate::input::Key;
    use crate::math::Vec2;
    use crate::mesh::{Mesh, Vertex};
    use crate::render::RenderMode;
    use approx::assert_relative_eq;

    /// A flat square in the XY plane; the Z-up fit lays it on the ground.
    fn square(half: f32) -> Model {
        let v = |x: f32, y: f32| Vertex {
            position: Vec3::new(x, y, 0.0),
            normal: Vec3::Z,
            uv: Vec2::ZERO,
        };
        let mut model = Model::new("square");
        model.add_mesh(Mesh::new(
            "square",
            vec![v(-half, -half), v(half, -half), v(half, half), v(-half, half)],
            vec![0, 1, 2, 0, 2, 3],
            None,
        ));
        model
    }

    fn setup() -> (Scene, CameraRig) {
        let config = Config::default();
        let scene = Scene::with_models(&config, square(100.0), square(1000.0));
        let rig = CameraRig::from_config(&config.cameras);
        (scene, rig)
    }

    #[test]
    fn models_are_placed_from_config() {
        let (scene, _) = setup();
        let car = scene.car_model().model_matrix().transform_point(Vec3::ZERO);
        assert_relative_eq!(car.x, 8.8, epsilon = 1e-5);
        assert_relative_eq!(car.y, -1.77, epsilon = 1e-5);

        // Z-up asset corner (0, 0, 1) rises by the mesh scale.
        let track = scene.track().model_matrix();
        let up = track.transform_point(Vec3::Z) - track.transform_point(Vec3::ZERO);
        assert_relative_eq!(up.y, 0.02, epsilon = 1e-6);
        assert_eq!(scene.track().ambient_override(), Some(Vec3::splat(0.5)));
    }

    #[test]
    fn update_drives_car_and_tracks_cameras() {
        let (mut scene, mut rig) = setup();
        let mut input = InputState::new();
        input.key_down(Key::Up);

        let start = scene.car().position();
        scene.update(&input, 1.0, &mut rig);
        let moved = scene.car().position() - start;
        assert_relative_eq!(moved.magnitude(), 2.5, epsilon = 1e-4);

        assert_relative_eq!(
            scene.car_model().model_matrix().transform_point(Vec3::ZERO).x,
            scene.car().position().x,
            epsilon = 1e-5
        );
        assert_eq!(rig.car.car_position(), scene.car().position());
    }

    #[test]
    fn spot_light_follows_active_camera() {
        let (mut scene, mut rig) = setup();
        scene.update(&InputState::new(), 0.016, &mut rig);

        let eye = rig.active().position();
        assert_eq!(scene.spot_light().position, eye);
        let expected = rig.active().front();
        assert_relative_eq!(scene.spot_light().direction.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(scene.spot_light().direction.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn actions_toggle_state() {
        let (mut scene, mut rig) = setup();
        let fog = scene.fog_enabled();
        let spot = scene.spot_enabled();

        let mut input = InputState::new();
        for key in [Key::C, Key::F, Key::L, Key::B, Key::M] {
            input.key_down(key);
        }
        scene.update(&input, 0.0, &mut rig);

        assert_eq!(rig.active_kind(), CameraKind::Static);
        assert_eq!(scene.fog_enabled(), !fog);
        assert_eq!(scene.spot_enabled(), !spot);
        assert!(scene.options().backface_culling);
        assert_eq!(scene.options().mode, RenderMode::Wireframe);
    }

    #[test]
    fn mouse_only_turns_free_camera() {
        let (mut scene, mut rig) = setup();
        let mut input = InputState::new();
        input.mouse_motion(50.0, 0.0);

        scene.update(&input, 0.016, &mut rig);
        assert_relative_eq!(rig.fps.yaw(), -90.0);

        rig.set_active(CameraKind::Fps);
        scene.update(&input, 0.016, &mut rig);
        assert_relative_eq!(rig.fps.yaw(), -85.0, epsilon = 1e-4);
    }

    #[test]
    fn lighting_respects_toggles() {
        let (mut scene, mut rig) = setup();
        assert!(scene.lighting(Vec3::ZERO).spot.is_some());
        assert!(scene.lighting(Vec3::ZERO).fog.is_none());

        let mut input = InputState::new();
        input.key_down(Key::L);
        input.key_down(Key::F);
        scene.update(&input, 0.0, &mut rig);

        let lighting = scene.lighting(Vec3::ZERO);
        assert!(lighting.spot.is_none());
        assert!(lighting.fog.is_some());
    }

    #[test]
    fn fog_fades_to_the_clear_colour_unless_set() {
        let mut config = Config::default();
        config.render.clear_color = Vec3::new(0.7, 0.7, 0.9);
        let scene = Scene::with_models(&config, square(1.0), square(1.0));
        assert_eq!(scene.fog.color, Vec3::new(0.7, 0.7, 0.9));

        config.fog.color = Some(Vec3::splat(0.3));
        let scene = Scene::with_models(&config, square(1.0), square(1.0));
        assert_eq!(scene.fog.color, Vec3::splat(0.3));
    }

    #[test]
    fn render_draws_the_ground_under_the_chase_camera() {
        let (mut scene, mut rig) = setup();
        scene.update(&InputState::new(), 0.016, &mut rig);

        let mut renderer = Renderer::new(80, 60);
        let aspect = renderer.aspect_ratio();
        let stats = scene.render(&mut renderer, rig.active(), aspect);
        assert!(stats.drawn > 0);

        // The chase camera looks down at the car; the bottom row is ground.
        let background = colors::from_vec3(Config::default().render.clear_color);
        assert_ne!(renderer.get_pixel(40, 59), Some(background));
    }
}
