use glam::{Mat4, Vec3, Vec4};

/// wgpu clips depth to [0, 1] while `perspective_matrix` targets the GL-style
/// [-1, 1] convention; multiply projections by this before uploading them.
pub const OPENGL_TO_WGPU_MATRIX: Mat4 = Mat4::from_cols(
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 1.0),
);

/// Classical look-at construction from an eye position, a target point and a
/// world-up hint. The up vector is recomputed as `cross(side, forward)` so the
/// basis stays orthonormal even when the hint is not exactly perpendicular to
/// the view direction. `eye == target` is a caller bug.
pub fn look_at_matrix(eye: Vec3, target: Vec3, world_up: Vec3) -> Mat4 {
    let to_target = target - eye;
    debug_assert!(
        to_target.length_squared() > 0.0,
        "look_at_matrix requires eye != target"
    );

    let forward = to_target.normalize();
    let side = forward.cross(world_up).normalize();
    let up = side.cross(forward);

    // Rows are (side, up, -forward); the translation by -eye applies after
    // the rotation, taking world-space points into camera space.
    let rotation = Mat4::from_cols(
        Vec4::new(side.x, up.x, -forward.x, 0.0),
        Vec4::new(side.y, up.y, -forward.y, 0.0),
        Vec4::new(side.z, up.z, -forward.z, 0.0),
        Vec4::W,
    );
    rotation * Mat4::from_translation(-eye)
}

/// Perspective projection over the GL depth convention, with -1 in the w-row
/// performing the perspective divide. Parameters are validated at startup by
/// `Camera::validate`.
pub fn perspective_matrix(fov_y_degrees: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
    let y_scale = 1.0 / f32::tan(fov_y_degrees.to_radians() * 0.5);
    let x_scale = y_scale / aspect;
    Mat4::from_cols(
        Vec4::new(x_scale, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y_scale, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -(z_far + z_near) / (z_far - z_near), -1.0),
        Vec4::new(0.0, 0.0, -(2.0 * z_far * z_near) / (z_far - z_near), 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_near(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn look_at_basis_is_orthonormal() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(4.0, 0.0, -2.0);
        // Deliberately skewed up hint; re-orthogonalization must absorb it.
        let world_up = Vec3::new(0.2, 1.0, 0.1).normalize();

        let matrix = look_at_matrix(eye, target, world_up);
        let side = matrix.row(0).truncate();
        let up = matrix.row(1).truncate();
        let back = matrix.row(2).truncate();

        assert_near(side.length(), 1.0);
        assert_near(up.length(), 1.0);
        assert_near(back.length(), 1.0);
        assert_near(side.dot(up), 0.0);
        assert_near(side.dot(back), 0.0);
        assert_near(up.dot(back), 0.0);
    }

    #[test]
    fn look_at_translation_applies_after_rotation() {
        let eye = Vec3::new(-3.0, 1.6, 8.0);
        let matrix = look_at_matrix(eye, Vec3::ZERO, Vec3::Y);
        assert!(matrix.transform_point3(eye).length() < EPSILON);
    }

    #[test]
    fn look_at_agrees_with_glam() {
        let eye = Vec3::new(0.5, 1.6, 5.0);
        let target = Vec3::new(2.0, 1.0, -4.0);
        let ours = look_at_matrix(eye, target, Vec3::Y).to_cols_array();
        let reference = Mat4::look_at_rh(eye, target, Vec3::Y).to_cols_array();
        for (actual, expected) in ours.iter().zip(reference.iter()) {
            assert_near(*actual, *expected);
        }
    }

    #[test]
    fn perspective_matrix_entries() {
        let matrix = perspective_matrix(60.0, 4.0 / 3.0, 0.1, 100.0);
        let y_scale = 1.0 / 30.0f32.to_radians().tan();

        assert_near(matrix.y_axis.y, y_scale);
        assert_near(matrix.x_axis.x, y_scale / (4.0 / 3.0));
        assert_near(matrix.z_axis.z, -(100.0 + 0.1) / (100.0 - 0.1));
        assert_near(matrix.w_axis.z, -(2.0 * 100.0 * 0.1) / (100.0 - 0.1));
        assert_eq!(matrix.z_axis.w, -1.0);
        assert_eq!(matrix.w_axis.w, 0.0);
    }

    #[test]
    fn depth_remap_halves_clip_range() {
        let near = OPENGL_TO_WGPU_MATRIX * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = OPENGL_TO_WGPU_MATRIX * Vec4::new(0.0, 0.0, 1.0, 1.0);
        assert_near(near.z, 0.0);
        assert_near(far.z, 1.0);
    }
}
