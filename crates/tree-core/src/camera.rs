//! Viewpoint description shared with the renderer.
//!
//! The renderer reads this every frame to place its camera, and the core uses
//! it to project photo cards for hover picking and to anchor the focused card
//! in front of the view.

use crate::constants::{CAMERA_FOVY, CAMERA_Y, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Quat, Vec2, Vec3};

/// Right-handed perspective camera. `orientation` rotates camera-local axes
/// into world space; the camera looks down its local -Z.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub orientation: Quat,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, CAMERA_Y, CAMERA_Z), Vec3::ZERO, 16.0 / 9.0)
    }
}

impl Camera {
    pub fn look_at(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let (_, orientation, _) = view.inverse().to_scale_rotation_translation();
        Self {
            eye,
            orientation,
            aspect,
            fovy_radians: CAMERA_FOVY,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.eye).inverse()
    }

    /// Project a world-space point to normalized device coordinates
    /// (x right, y up, both in \[-1, 1\] when on screen). Points behind the
    /// camera have no projection.
    pub fn project_ndc(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.projection_matrix() * self.view_matrix() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}
