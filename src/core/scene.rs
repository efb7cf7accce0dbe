use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use glam::Vec3;

use crate::core::geometry::{LineSegments, Mesh};
use crate::core::{Color, Light, LightSample, Material, TextureHandle, Transform};

/// Index of an object inside its [`Scene`]. Objects are never removed, so ids stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub enum ObjectKind {
    Mesh {
        geometry: Arc<Mesh>,
        material: Material,
    },
    Light(Light),
    /// Debug line geometry (grid, light markers)
    Helper(LineSegments),
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    pub kind: ObjectKind,
}

impl SceneObject {
    pub fn mesh(name: &str, geometry: Arc<Mesh>, material: Material) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::new(),
            kind: ObjectKind::Mesh { geometry, material },
        }
    }

    pub fn light(name: &str, light: Light) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::new(),
            kind: ObjectKind::Light(light),
        }
    }

    pub fn helper(name: &str, lines: LineSegments) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::new(),
            kind: ObjectKind::Helper(lines),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, ObjectKind::Mesh { .. })
    }

    pub fn is_helper(&self) -> bool {
        matches!(self.kind, ObjectKind::Helper(_))
    }

    pub fn light_ref(&self) -> Option<&Light> {
        match &self.kind {
            ObjectKind::Light(light) => Some(light),
            _ => None,
        }
    }
}

impl Display for SceneObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ObjectKind::Mesh { geometry, material } => write!(
                f,
                "{} (mesh, {} tris, {})",
                self.name,
                geometry.tris.len(),
                material
            ),
            ObjectKind::Light(light) => write!(f, "{} ({:?})", self.name, light),
            ObjectKind::Helper(lines) => write!(f, "{} (helper, {} lines)", self.name, lines.len()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Background {
    Color(Color),
    /// Stretched over the whole viewport; the clear color shows until it loads
    Texture(TextureHandle),
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(Color::BLACK)
    }
}

/// Root container of everything drawn in a frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub background: Background,
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> &SceneObject {
        &self.objects[id.0]
    }

    pub fn get_mut(&mut self, id: ObjectId) -> &mut SceneObject {
        &mut self.objects[id.0]
    }

    pub fn transform(&self, id: ObjectId) -> &Transform {
        &self.objects[id.0].transform
    }

    pub fn transform_mut(&mut self, id: ObjectId) -> &mut Transform {
        &mut self.objects[id.0].transform
    }

    pub fn count<F>(&self, pred: F) -> usize
    where
        F: Fn(&SceneObject) -> bool,
    {
        self.objects.iter().filter(|o| pred(o)).count()
    }

    /// Lights resolved to world positions for this frame
    pub fn lights(&self) -> Vec<LightSample> {
        self.objects
            .iter()
            .filter_map(|o| {
                o.light_ref().map(|light| LightSample {
                    light: light.clone(),
                    position: o.transform.position,
                })
            })
            .collect()
    }
}
