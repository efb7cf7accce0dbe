use glam::{Mat4, Vec3};
use rand::Rng;

/// Uniform sample in `[-range / 2, range / 2]`.
pub fn rand_float_spread<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    range * (0.5 - rng.gen::<f32>())
}

/// A point with each coordinate drawn from [`rand_float_spread`]
pub fn rand_spread_vec3<R: Rng + ?Sized>(rng: &mut R, range: f32) -> Vec3 {
    Vec3::new(
        rand_float_spread(rng, range),
        rand_float_spread(rng, range),
        rand_float_spread(rng, range),
    )
}

pub fn format_mat4(name: &str, mat: &Mat4) -> String {
    let mut output = format!("{}:\n", name);
    for (axis, col) in ["x_axis", "y_axis", "z_axis", "w_axis"]
        .iter()
        .zip(mat.to_cols_array_2d())
    {
        output.push_str(&format!(
            "{}: [{:8.3},{:8.3},{:8.3},{:8.3}]\n",
            axis, col[0], col[1], col[2], col[3]
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spread_stays_within_half_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rand_float_spread(&mut rng, 200.0);
            assert!((-100.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn spread_vec3_covers_both_signs() {
        let mut rng = StdRng::seed_from_u64(1);
        let points: Vec<Vec3> = (0..200).map(|_| rand_spread_vec3(&mut rng, 200.0)).collect();
        assert!(points.iter().any(|p| p.x < 0.0));
        assert!(points.iter().any(|p| p.x > 0.0));
    }

    #[test]
    fn formats_identity_columns() {
        let out = format_mat4("model", &Mat4::IDENTITY);
        assert!(out.starts_with("model:\n"));
        assert!(out.contains("w_axis: [   0.000,   0.000,   0.000,   1.000]"));
    }
}
