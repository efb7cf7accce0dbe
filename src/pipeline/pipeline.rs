use crate::core::geometry::Mesh;
use crate::core::{Background, Camera, Color, ObjectKind, Scene, SceneObject};
use crate::debug_print;
use crate::pipeline::clipper::{ClipTriangle, ClipVertex, Clipper};
use crate::pipeline::rasterizer::{Fragment, ProcessedGeometry, ProcessedLine, Rasterizer};
use crate::pipeline::shading::SurfaceShader;
use crate::pipeline::FrameBuffer;
use glam::Mat4;
use rayon::prelude::*;

/// Toggles for the geometry stage
#[derive(Debug, Clone, Copy)]
pub struct States {
    pub backface_culling: bool,
    pub draw_helpers: bool,
}

impl Default for States {
    fn default() -> Self {
        Self {
            backface_culling: true,
            draw_helpers: true,
        }
    }
}

/// What one call to [`Pipeline::render_frame`] pushed through each stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub lines: usize,
    pub fragments: usize,
}

pub struct Pipeline {
    pub width: usize,
    pub height: usize,
    front_buffer: FrameBuffer,
    back_buffer: FrameBuffer,
    clipper: Clipper,
    rasterizer: Rasterizer,
    geometry: Vec<ProcessedGeometry>,
    lines: Vec<ProcessedLine>,
    fragments: Vec<Fragment>,
    pub states: States,
}

impl Pipeline {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            front_buffer: FrameBuffer::new(width, height),
            back_buffer: FrameBuffer::new(width, height),
            clipper: Clipper::new(),
            rasterizer: Rasterizer::new(width, height),
            geometry: Vec::with_capacity(1024),
            lines: Vec::with_capacity(256),
            fragments: Vec::with_capacity(1024),
            states: States::default(),
        }
    }

    /// Render one frame of `scene` as seen from `camera`
    ///
    /// Steps:
    /// 1. Clear back buffer to the scene background
    /// 2. Transform vertices to clip space, clip and cull triangles
    /// 3. Rasterize and shade visible triangles and helper lines to fragments
    /// 4. Depth test fragments into the back buffer
    /// 5. Swap front and back buffers
    pub fn render_frame(&mut self, scene: &Scene, camera: &Camera) -> FrameStats {
        self.clear_background(&scene.background);

        let shaders = self.process_geometry(scene, camera);

        let lights = scene.lights();
        self.rasterizer
            .rasterize(&self.geometry, &shaders, &lights, &mut self.fragments);
        self.rasterizer
            .rasterize_lines(&self.lines, &mut self.fragments);

        self.process_fragments();
        self.swap_buffers();

        FrameStats {
            triangles: self.geometry.len(),
            lines: self.lines.len(),
            fragments: self.fragments.len(),
        }
    }

    fn clear_background(&mut self, background: &Background) {
        match background {
            Background::Color(color) => self.back_buffer.clear(*color),
            Background::Texture(handle) => match handle.texture() {
                Some(texture) => self.back_buffer.clear_with_texture(&texture),
                None => self.back_buffer.clear(Color::BLACK),
            },
        }
    }

    /// Fill the triangle and line queues. Returns one shader slot per scene object.
    fn process_geometry(&mut self, scene: &Scene, camera: &Camera) -> Vec<Option<SurfaceShader>> {
        let view_proj = camera.view_proj();
        let objects = scene.objects();

        let shaders: Vec<Option<SurfaceShader>> = objects
            .iter()
            .map(|o| match &o.kind {
                ObjectKind::Mesh { material, .. } => SurfaceShader::from_material(material),
                _ => None,
            })
            .collect();

        debug_print!("Processing geometry for {} objects", objects.len());

        self.clipper.set_backface_culling(self.states.backface_culling);
        let clipper = &self.clipper;

        self.geometry.clear();
        self.geometry.par_extend(
            objects
                .par_iter()
                .enumerate()
                .flat_map_iter(|(id, obj)| match &obj.kind {
                    ObjectKind::Mesh { geometry, .. } => {
                        process_mesh(id, obj, geometry, view_proj, clipper)
                    }
                    _ => Vec::new(),
                }),
        );

        self.lines.clear();
        if self.states.draw_helpers {
            for obj in objects {
                if let ObjectKind::Helper(lines) = &obj.kind {
                    let mvp = view_proj * obj.transform.model_mat();
                    for seg in &lines.segments {
                        let start = mvp * seg.start.extend(1.0);
                        let end = mvp * seg.end.extend(1.0);
                        if let Some((start, end)) = clipper.clip_line(start, end) {
                            self.lines.push(ProcessedLine {
                                start,
                                end,
                                color: seg.color,
                            });
                        }
                    }
                }
            }
        }

        shaders
    }

    fn process_fragments(&mut self) {
        let buffer = &mut self.back_buffer;
        for fragment in &self.fragments {
            buffer.set_pixel((fragment.x, fragment.y), fragment.depth, fragment.color);
        }
    }

    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.front_buffer, &mut self.back_buffer);
    }

    /// The most recently completed frame
    pub fn front_buffer(&self) -> &FrameBuffer {
        &self.front_buffer
    }
}

fn process_mesh(
    id: usize,
    obj: &SceneObject,
    mesh: &Mesh,
    view_proj: Mat4,
    clipper: &Clipper,
) -> Vec<ProcessedGeometry> {
    let model = obj.transform.model_mat();
    let normal_mat = obj.transform.normal_mat();
    let mvp = view_proj * model;

    let verts: Vec<ClipVertex> = mesh
        .vertices
        .iter()
        .map(|v| ClipVertex {
            position: mvp * v.pos.extend(1.0),
            world: model.transform_point3(v.pos),
            normal: (normal_mat * v.normal).normalize_or_zero(),
            uv: v.uv,
        })
        .collect();

    mesh.tris
        .iter()
        .flat_map(|tri| {
            let triangle = ClipTriangle {
                vertices: tri.vertices.map(|i| verts[i]),
            };
            clipper.clip_triangle(&triangle)
        })
        .map(|t| ProcessedGeometry {
            object: id,
            vertices: t.vertices,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{box_geometry, grid_lines};
    use crate::core::{Light, Material};
    use glam::Vec3;
    use std::sync::Arc;

    fn camera_at_z(z: f32) -> Camera {
        let mut cam = Camera::new(75.0, 1.0, 0.1, 1000.0);
        cam.transform.position = Vec3::new(0.0, 0.0, z);
        cam
    }

    #[test]
    fn empty_scene_renders_background_only() {
        let mut pipeline = Pipeline::new(16, 16);
        let scene = Scene::new();
        let stats = pipeline.render_frame(&scene, &camera_at_z(30.0));
        assert_eq!(stats, FrameStats::default());
        assert!(pipeline
            .front_buffer()
            .data
            .iter()
            .all(|&p| p == Color::BLACK.to_u32()));
    }

    #[test]
    fn unlit_box_in_front_of_camera_covers_center() {
        let mut pipeline = Pipeline::new(32, 32);
        let mut scene = Scene::new();
        scene.add(SceneObject::mesh(
            "box",
            Arc::new(box_geometry(3.0, 3.0, 3.0)),
            Material::Basic {
                color: Color::TOMATO,
                map: None,
            },
        ));
        let stats = pipeline.render_frame(&scene, &camera_at_z(5.0));
        // Only the face toward the camera survives culling
        assert_eq!(stats.triangles, 2);
        assert_eq!(
            pipeline.front_buffer().get_pixel((16, 16)),
            Some(Color::TOMATO.to_u32())
        );
        assert_eq!(pipeline.front_buffer().get_pixel((0, 0)), Some(0));
    }

    #[test]
    fn lit_material_is_black_without_lights() {
        let mut pipeline = Pipeline::new(16, 16);
        let mut scene = Scene::new();
        scene.background = Background::Color(Color::WHITE);
        scene.add(SceneObject::mesh(
            "box",
            Arc::new(box_geometry(3.0, 3.0, 3.0)),
            Material::standard(Color::WHITE),
        ));
        pipeline.render_frame(&scene, &camera_at_z(5.0));
        assert_eq!(pipeline.front_buffer().get_pixel((8, 8)), Some(0));

        scene.add(SceneObject::light("ambient", Light::ambient(Color::WHITE)));
        pipeline.render_frame(&scene, &camera_at_z(5.0));
        assert_eq!(
            pipeline.front_buffer().get_pixel((8, 8)),
            Some(Color::WHITE.to_u32())
        );
    }

    #[test]
    fn helpers_can_be_switched_off() {
        let mut pipeline = Pipeline::new(32, 32);
        let mut scene = Scene::new();
        scene.add(
            SceneObject::helper(
                "grid",
                grid_lines(200.0, 50, Color::GRID_CENTER, Color::GRID_LINE),
            )
            .with_position(Vec3::new(0.0, -2.0, 0.0)),
        );
        let stats = pipeline.render_frame(&scene, &camera_at_z(30.0));
        assert!(stats.lines > 0);

        pipeline.states.draw_helpers = false;
        let stats = pipeline.render_frame(&scene, &camera_at_z(30.0));
        assert_eq!(stats.lines, 0);
    }

    #[test]
    fn object_behind_camera_is_not_drawn() {
        let mut pipeline = Pipeline::new(16, 16);
        let mut scene = Scene::new();
        scene.add(
            SceneObject::mesh(
                "box",
                Arc::new(box_geometry(3.0, 3.0, 3.0)),
                Material::default(),
            )
            .with_position(Vec3::new(0.0, 0.0, 40.0)),
        );
        let stats = pipeline.render_frame(&scene, &camera_at_z(30.0));
        assert_eq!(stats.triangles, 0);
    }
}
