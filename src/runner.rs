//! The scroll-driven scene: one-time construction, scroll handling and the
//! per-frame loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use glam::{Vec2, Vec3};
use log::{debug, info};
use rand::Rng;

use crate::controls::OrbitControls;
use crate::core::geometry::{box_geometry, grid_lines, light_helper_lines, sphere, torus};
use crate::core::{
    Background, Camera, Color, Light, Material, ObjectId, Scene, SceneObject, TextureLoader,
};
use crate::pipeline::{FrameStats, Renderer};
use crate::scroll::ScrollState;
use crate::surface::{Surface, SurfaceError, SurfaceEvent};
use crate::util::{format_mat4, rand_spread_vec3};
use crate::Metrics;

pub const STAR_COUNT: usize = 200;
pub const STAR_SPREAD: f32 = 200.0;

const TORUS_SPIN: Vec3 = Vec3::new(0.01, 0.005, 0.01);
const MOON_SCROLL_SPIN: Vec3 = Vec3::new(0.05, 0.075, 0.05);
const MOON_FRAME_SPIN: f32 = 0.005;
const AVATAR_SCROLL_SPIN: f32 = 0.01;

/// Shared flag that ends [`SceneRunner::run`] before the next frame.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct SceneRunner {
    pub scene: Scene,
    pub camera: Camera,
    pub renderer: Renderer,
    pub controls: OrbitControls,
    pub scroll: ScrollState,
    pub torus: ObjectId,
    pub moon: ObjectId,
    pub avatar: ObjectId,
    pub point_light: ObjectId,
    metrics: Metrics,
}

impl SceneRunner {
    /// Build the scene for a `width`x`height` viewport.
    ///
    /// Textures are requested from `loader` and may still be loading when
    /// this returns; frames drawn before then use placeholders.
    pub fn bootstrap<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        pixel_ratio: f32,
        scroll: ScrollState,
        rng: &mut R,
        loader: &mut TextureLoader,
    ) -> Self {
        let mut scene = Scene::new();
        let mut camera = Camera::new(
            75.0,
            width.max(1) as f32 / height.max(1) as f32,
            0.1,
            1000.0,
        );

        let mut renderer = Renderer::new(width, height);
        renderer.set_pixel_ratio(pixel_ratio);
        camera.transform.position.z = 30.0;

        renderer.render(&scene, &camera);

        let torus = scene.add(SceneObject::mesh(
            "torus",
            Arc::new(torus(10.0, 3.0, 16, 100)),
            Material::standard(Color::TOMATO),
        ));

        let point_light = scene.add(
            SceneObject::light("point light", Light::point(Color::WHITE))
                .with_position(Vec3::new(5.0, 5.0, 5.0)),
        );
        scene.add(SceneObject::light("ambient light", Light::ambient(Color::WHITE)));

        scene.add(
            SceneObject::helper("light helper", light_helper_lines(1.0, Color::WHITE))
                .with_position(Vec3::new(5.0, 5.0, 5.0)),
        );
        scene.add(SceneObject::helper(
            "grid helper",
            grid_lines(200.0, 50, Color::GRID_CENTER, Color::GRID_LINE),
        ));
        let controls = OrbitControls::new(height);

        let star = Arc::new(sphere(0.25, 24, 24));
        for _ in 0..STAR_COUNT {
            let position = rand_spread_vec3(rng, STAR_SPREAD);
            scene.add(
                SceneObject::mesh("star", star.clone(), Material::standard(Color::WHITE))
                    .with_position(position),
            );
        }

        scene.background = Background::Texture(loader.load("space.jpg"));

        let avatar = scene.add(
            SceneObject::mesh(
                "avatar",
                Arc::new(box_geometry(3.0, 3.0, 3.0)),
                Material::basic_mapped(loader.load("larry.jpg")),
            )
            .with_position(Vec3::new(2.0, 0.0, -5.0)),
        );

        let moon = scene.add(
            SceneObject::mesh(
                "moon",
                Arc::new(sphere(3.0, 32, 32)),
                Material::standard_mapped(
                    loader.load("moon.jpg"),
                    Some(loader.load("moonground.jpg")),
                ),
            )
            .with_position(Vec3::new(-10.0, 0.0, 30.0)),
        );

        info!(
            "Scene ready: {} objects, {}x{} viewport at pixel ratio {}",
            scene.len(),
            width,
            height,
            renderer.pixel_ratio()
        );

        let mut runner = Self {
            scene,
            camera,
            renderer,
            controls,
            scroll,
            torus,
            moon,
            avatar,
            point_light,
            metrics: Metrics::new(),
        };
        runner.move_camera(runner.scroll.top());
        debug!("{}", format_mat4("view", &runner.camera.view_matrix()));
        runner
    }

    /// Pose update for page top offset `t` (zero or negative).
    ///
    /// Moon and avatar spins accumulate per call; the camera pose is set
    /// absolutely from `t`.
    pub fn move_camera(&mut self, t: f32) {
        self.scene
            .transform_mut(self.moon)
            .rotate_euler(MOON_SCROLL_SPIN);

        let avatar = self.scene.transform_mut(self.avatar);
        avatar.rotation.x += AVATAR_SCROLL_SPIN;
        avatar.rotation.z += AVATAR_SCROLL_SPIN;

        let cam = &mut self.camera.transform;
        cam.position.z = t * -0.01;
        cam.position.x = t * -0.0002;
        cam.rotation.y = t * -0.0002;
    }

    /// Everything a frame does except drawing
    pub fn advance_frame(&mut self) {
        self.scene.transform_mut(self.torus).rotate_euler(TORUS_SPIN);
        self.scene.transform_mut(self.moon).rotation.x += MOON_FRAME_SPIN;
        self.controls.update(&mut self.camera);
    }

    pub fn animate(&mut self) -> FrameStats {
        self.advance_frame();
        self.renderer.render(&self.scene, &self.camera)
    }

    /// Apply one input event. Returns `false` when the user asked to quit.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> bool {
        match event {
            SurfaceEvent::Wheel(pixels) => {
                if self.scroll.scroll_by(pixels) {
                    self.move_camera(self.scroll.top());
                }
            }
            SurfaceEvent::PointerDown(pos) => self.controls.pointer_down(pos),
            SurfaceEvent::PointerMove(pos) => self.controls.pointer_move(pos),
            SurfaceEvent::PointerUp => self.controls.pointer_up(),
            SurfaceEvent::Close => return false,
        }
        true
    }

    /// Scroll to `distance` pixels below the page top
    pub fn scroll_to(&mut self, distance: f32) {
        if self.scroll.scroll_to(distance) {
            self.move_camera(self.scroll.top());
        }
    }

    /// Render and present frames until the surface closes, `stop` fires or
    /// `frame_limit` frames have been shown. Returns the number of frames.
    pub fn run<S: Surface>(
        &mut self,
        surface: &mut S,
        stop: &StopHandle,
        frame_limit: Option<u64>,
    ) -> Result<u64, SurfaceError> {
        let mut frames = 0u64;

        'frames: while surface.is_open() && !stop.is_stopped() {
            if frame_limit.is_some_and(|limit| frames >= limit) {
                break;
            }

            for event in surface.poll_events() {
                if !self.handle_event(event) {
                    break 'frames;
                }
            }

            let start = Instant::now();
            let stats = self.animate();
            surface.present(self.renderer.frame())?;
            frames += 1;

            if self.metrics.update(start.elapsed()) {
                info!("{} | {} tris | {} fragments", self.metrics, stats.triangles, stats.fragments);
            }
        }

        info!("Stopped after {} frames", frames);
        Ok(frames)
    }

    pub fn drag(&mut self, from: Vec2, to: Vec2) {
        self.controls.pointer_down(from);
        self.controls.pointer_move(to);
        self.controls.pointer_up();
    }
}
