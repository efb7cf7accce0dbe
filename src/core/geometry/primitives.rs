//! Procedural meshes: torus, UV sphere and box.
//!
//! Vertex layout and winding follow the usual grid construction: rows of
//! `segments + 1` vertices (the seam is duplicated so uvs can wrap) and two
//! counter-clockwise triangles per quad.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::{Mesh, Vertex};

/// Torus in the XY plane around the Z axis.
///
/// `radius` is the distance from the centre to the middle of the tube,
/// `tube` the tube radius.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let mut mesh = Mesh::new();

    for j in 0..=radial_segments {
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let v = j as f32 / radial_segments as f32 * TAU;

            let pos = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let uv = Vec2::new(
                i as f32 / tubular_segments as f32,
                j as f32 / radial_segments as f32,
            );
            mesh.push_vertex(Vertex::new(pos, (pos - center).normalize(), uv));
        }
    }

    let row = tubular_segments as usize + 1;
    for j in 1..=radial_segments as usize {
        for i in 1..=tubular_segments as usize {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.push_tri(a, b, d);
            mesh.push_tri(b, c, d);
        }
    }

    mesh
}

/// UV sphere centred on the origin, poles on the Y axis.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut mesh = Mesh::new();
    let mut grid: Vec<Vec<usize>> = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;

        // Pole vertices get their u nudged so the cap triangles sample the middle of the texel
        let u_offset = if iy == 0 {
            0.5 / width_segments as f32
        } else if iy == height_segments {
            -0.5 / width_segments as f32
        } else {
            0.0
        };

        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let pos = Vec3::new(
                -radius * (u * TAU).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * TAU).sin() * (v * PI).sin(),
            );
            let normal = pos.normalize_or_zero();
            row.push(mesh.push_vertex(Vertex::new(pos, normal, Vec2::new(u + u_offset, 1.0 - v))));
        }
        grid.push(row);
    }

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            // The pole rows collapse to a point, skip the degenerate half of each quad
            if iy != 0 {
                mesh.push_tri(a, b, d);
            }
            if iy != height_segments as usize - 1 {
                mesh.push_tri(b, c, d);
            }
        }
    }

    mesh
}

/// Axis aligned box centred on the origin, each face mapped to the full texture.
pub fn box_geometry(width: f32, height: f32, depth: f32) -> Mesh {
    let half = Vec3::new(width, height, depth) * 0.5;
    // (normal, u axis, v axis) with u x v == normal so the quads wind outward
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut mesh = Mesh::new();
    for (normal, u_axis, v_axis) in faces {
        let center = normal * half;
        let u = u_axis * half;
        let v = v_axis * half;

        let corners = [
            (center - u - v, Vec2::new(0.0, 0.0)),
            (center + u - v, Vec2::new(1.0, 0.0)),
            (center + u + v, Vec2::new(1.0, 1.0)),
            (center - u + v, Vec2::new(0.0, 1.0)),
        ];
        let base = mesh.vertices.len();
        for (pos, uv) in corners {
            mesh.push_vertex(Vertex::new(pos, normal, uv));
        }
        mesh.push_tri(base, base + 1, base + 2);
        mesh.push_tri(base, base + 2, base + 3);
    }
    mesh
}
