use crate::{render_client::camera_controller::MovementIntent, utils::math_util};
use anyhow::Result;

/// Margin from the poles; keeps the ground basis well-defined.
pub(crate) const PITCH_LIMIT_DEGREES: f32 = 89.0;

const WORLD_UP: glam::Vec3 = glam::Vec3::Y;

pub struct Camera {
    pub(crate) position: glam::Vec3,
    pub(crate) yaw: f32,
    pub(crate) pitch: f32,
    pub(crate) aspect: f32,
    pub(crate) fov: f32,
    pub(crate) z_near: f32,
    pub(crate) z_far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: (0.0, 1.6, 5.0).into(),
            yaw: -90.0,
            pitch: 0.0,
            aspect: 1.0,
            fov: 60.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl Camera {
    /// Rejects projection parameters that would produce a degenerate matrix.
    pub fn validate(&self) -> Result<()> {
        if self.z_far <= self.z_near {
            return Err(anyhow::Error::msg(format!(
                "z_far ({}) must be greater than z_near ({})",
                self.z_far, self.z_near
            )));
        }
        if self.aspect <= 0.0 {
            return Err(anyhow::Error::msg(format!(
                "Aspect ratio must be positive, got {}",
                self.aspect
            )));
        }
        if self.fov <= 0.0 || self.fov >= 180.0 {
            return Err(anyhow::Error::msg(format!(
                "Field of view must be inside (0, 180) degrees, got {}",
                self.fov
            )));
        }
        Ok(())
    }

    /// Applies a look delta in degrees. Yaw is left unbounded; pitch is
    /// clamped short of the poles.
    pub fn apply_look(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    pub fn look_dir(&self) -> glam::Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        glam::Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch)
    }

    /// Ground-plane forward/right pair used for movement. The pitch clamp
    /// keeps the horizontal projection of the look direction away from zero
    /// length, so the normalizations cannot divide by zero.
    pub fn ground_basis(&self) -> (glam::Vec3, glam::Vec3) {
        let dir = self.look_dir();
        let forward = glam::Vec3::new(dir.x, 0.0, dir.z).normalize();
        let right = glam::Vec3::new(-dir.z, 0.0, dir.x).normalize();
        (forward, right)
    }

    /// Moves the position by one step along the ground basis per pressed
    /// flag. The vertical component never changes.
    pub fn advance(&mut self, intent: MovementIntent, step: f32) {
        if !intent.any() {
            return;
        }

        let (forward, right) = self.ground_basis();
        if intent.forward {
            self.position += forward * step;
        }
        if intent.backward {
            self.position -= forward * step;
        }
        if intent.left {
            self.position -= right * step;
        }
        if intent.right {
            self.position += right * step;
        }
    }

    pub fn build_view_matrix(&self) -> glam::Mat4 {
        math_util::look_at_matrix(self.position, self.position + self.look_dir(), WORLD_UP)
    }

    pub fn build_proj_matrix(&self) -> glam::Mat4 {
        math_util::perspective_matrix(self.fov, self.aspect, self.z_near, self.z_far)
    }
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
    fn ground_basis_is_orthonormal_across_look_range() {
        let mut yaw = -180.0;
        while yaw <= 180.0 {
            let mut pitch = -PITCH_LIMIT_DEGREES;
            while pitch <= PITCH_LIMIT_DEGREES {
                let camera = Camera {
                    yaw,
                    pitch,
                    ..Default::default()
                };
                let (forward, right) = camera.ground_basis();

                assert_near(forward.length(), 1.0);
                assert_near(right.length(), 1.0);
                assert_near(forward.dot(right), 0.0);
                assert_near(forward.dot(glam::Vec3::Y), 0.0);
                assert_near(right.dot(glam::Vec3::Y), 0.0);

                pitch += 8.9;
            }
            yaw += 15.0;
        }
    }

    #[test]
    fn pitch_clamp_holds_under_repeated_over_application() {
        let mut camera = Camera::default();
        for _ in 0..10 {
            camera.apply_look(0.0, 30.0);
        }
        assert_eq!(camera.pitch, PITCH_LIMIT_DEGREES);

        for _ in 0..20 {
            camera.apply_look(0.0, -30.0);
        }
        assert_eq!(camera.pitch, -PITCH_LIMIT_DEGREES);
    }

    #[test]
    fn no_input_leaves_pose_unchanged() {
        let mut camera = Camera::default();
        let position = camera.position;
        let (yaw, pitch) = (camera.yaw, camera.pitch);

        camera.apply_look(0.0, 0.0);
        camera.advance(MovementIntent::default(), 0.1);

        assert_eq!(camera.position, position);
        assert_eq!(camera.yaw, yaw);
        assert_eq!(camera.pitch, pitch);
    }

    #[test]
    fn forward_then_backward_returns_to_start() {
        let mut camera = Camera {
            yaw: 37.0,
            pitch: -12.0,
            ..Default::default()
        };
        let start = camera.position;

        let forward = MovementIntent {
            forward: true,
            ..Default::default()
        };
        let backward = MovementIntent {
            backward: true,
            ..Default::default()
        };
        for _ in 0..5 {
            camera.advance(forward, 0.1);
        }
        for _ in 0..5 {
            camera.advance(backward, 0.1);
        }

        assert!((camera.position - start).length() < EPSILON);
    }

    #[test]
    fn look_then_step_matches_reference_path() {
        // Starts at the initial pose facing -z; a 50-pixel pointer delta at
        // 0.1 sensitivity swings yaw to -85 degrees, then one forward step at
        // speed 0.1 moves along the new heading.
        let mut camera = Camera::default();
        camera.apply_look(50.0 * 0.1, 0.0);
        assert_near(camera.yaw, -85.0);

        camera.advance(
            MovementIntent {
                forward: true,
                ..Default::default()
            },
            0.1,
        );

        let heading = (-85.0f32).to_radians();
        assert_near(camera.position.x, 0.1 * heading.cos());
        assert_near(camera.position.z, 5.0 + 0.1 * heading.sin());
        assert_near(camera.position.y, 1.6);
        assert!(camera.position.z < 5.0);
    }

    #[test]
    fn projection_scales_and_divide_row() {
        let camera = Camera {
            aspect: 4.0 / 3.0,
            ..Default::default()
        };
        let proj = camera.build_proj_matrix();
        let y_scale = 1.0 / 30.0f32.to_radians().tan();

        assert_near(proj.y_axis.y, y_scale);
        assert_near(proj.x_axis.x, y_scale / (4.0 / 3.0));
        assert_eq!(proj.z_axis.w, -1.0);
    }

    #[test]
    fn view_matrix_sends_eye_to_origin() {
        let camera = Camera {
            yaw: 23.0,
            pitch: 41.0,
            ..Default::default()
        };
        let mapped = camera.build_view_matrix().transform_point3(camera.position);
        assert!(mapped.length() < EPSILON);
    }

    #[test]
    fn validate_rejects_degenerate_projection() {
        let far_not_beyond_near = Camera {
            z_near: 0.1,
            z_far: 0.1,
            ..Default::default()
        };
        assert!(far_not_beyond_near.validate().is_err());

        let flat_aspect = Camera {
            aspect: 0.0,
            ..Default::default()
        };
        assert!(flat_aspect.validate().is_err());

        let wide_fov = Camera {
            fov: 180.0,
            ..Default::default()
        };
        assert!(wide_fov.validate().is_err());

        assert!(Camera::default().validate().is_ok());
    }
}
