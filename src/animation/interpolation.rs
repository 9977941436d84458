// Rotation algebra: Euler XYZ, axis-angle and quaternion conversions,
// Lerp/Slerp, and the normal matrix.

use nalgebra_glm as glm;

use super::types::{AxisAngle, default_axis};

/// Below this `sin(theta)` Slerp returns its first input unchanged.
pub const SLERP_EPSILON: f32 = 1e-5;

/// Below this `|cos(y)|` the XYZ extraction is in gimbal lock.
const GIMBAL_EPSILON: f32 = 1e-6;

/// Convert quaternion to rotation matrix
pub fn quaternion_to_matrix(q: &glm::Quat) -> glm::Mat3 {
    let q = glm::quat_normalize(q);

    let x2 = q.i + q.i;
    let y2 = q.j + q.j;
    let z2 = q.k + q.k;

    let xx = q.i * x2;
    let xy = q.i * y2;
    let xz = q.i * z2;
    let yy = q.j * y2;
    let yz = q.j * z2;
    let zz = q.k * z2;
    let wx = q.w * x2;
    let wy = q.w * y2;
    let wz = q.w * z2;

    // glm::mat3 takes its arguments row by row
    glm::mat3(
        1.0 - (yy + zz),
        xy - wz,
        xz + wy,
        xy + wz,
        1.0 - (xx + zz),
        yz - wx,
        xz - wy,
        yz + wx,
        1.0 - (xx + yy),
    )
}

pub fn quaternion_to_mat4(q: &glm::Quat) -> glm::Mat4 {
    glm::mat3_to_mat4(&quaternion_to_matrix(q))
}

/// Rotation matrix for intrinsic XYZ Euler angles: `Rx(x) * Ry(y) * Rz(z)`.
pub fn euler_to_matrix(x: f32, y: f32, z: f32) -> glm::Mat4 {
    glm::rotation(x, &glm::vec3(1.0, 0.0, 0.0))
        * glm::rotation(y, &glm::vec3(0.0, 1.0, 0.0))
        * glm::rotation(z, &glm::vec3(0.0, 0.0, 1.0))
}

/// Rodrigues rotation about `axis`. A zero axis rotates about +Z.
pub fn axis_angle_to_matrix(axis: &glm::Vec3, angle: f32) -> glm::Mat4 {
    AxisAngle::new(*axis, angle).to_matrix()
}

/// Same composition order as [`euler_to_matrix`].
pub fn euler_to_quaternion(angles: &glm::Vec3) -> glm::Quat {
    let qx = glm::quat_angle_axis(angles.x, &glm::vec3(1.0, 0.0, 0.0));
    let qy = glm::quat_angle_axis(angles.y, &glm::vec3(0.0, 1.0, 0.0));
    let qz = glm::quat_angle_axis(angles.z, &glm::vec3(0.0, 0.0, 1.0));
    qx * qy * qz
}

/// Angle in `[0, 2π]`; the identity maps to +Z with angle 0.
///
/// The angle is taken from `atan2(|v|, w)` rather than `acos(w)`, which
/// loses small rotations once `w` rounds to 1.
pub fn quaternion_to_axis_angle(q: &glm::Quat) -> AxisAngle {
    let q = glm::quat_normalize(q);
    let v = q.imag();
    let s = glm::length(&v);
    let angle = 2.0 * s.atan2(q.w);
    if s < f32::MIN_POSITIVE {
        return AxisAngle::new(default_axis(), angle);
    }
    AxisAngle::new(v / s, angle)
}

/// Inverse of [`euler_to_matrix`] for the rotation part of `m`.
///
/// Euler triples are not unique; the result reproduces the matrix, not
/// necessarily the angles that built it. In gimbal lock `z` is set to 0.
pub fn matrix_to_euler(m: &glm::Mat3) -> glm::Vec3 {
    let y = m[(0, 2)].clamp(-1.0, 1.0).asin();
    if y.cos().abs() > GIMBAL_EPSILON {
        let x = (-m[(1, 2)]).atan2(m[(2, 2)]);
        let z = (-m[(0, 1)]).atan2(m[(0, 0)]);
        glm::vec3(x, y, z)
    } else {
        let x = m[(2, 1)].atan2(m[(1, 1)]);
        glm::vec3(x, y, 0.0)
    }
}

pub fn euler_to_axis_angle(x: f32, y: f32, z: f32) -> AxisAngle {
    quaternion_to_axis_angle(&euler_to_quaternion(&glm::vec3(x, y, z)))
}

pub fn axis_angle_to_euler(axis: &glm::Vec3, angle: f32) -> glm::Vec3 {
    let q = AxisAngle::new(*axis, angle).to_quaternion();
    matrix_to_euler(&quaternion_to_matrix(&q))
}

/// Componentwise `a * (1 - t) + b * t`.
///
/// This blends the angles, not the rotations: motion is uneven and takes the
/// long way round when a component crosses ±180°. It is kept as the naive
/// reference the quaternion modes are compared against.
pub fn lerp_euler(a: &glm::Vec3, b: &glm::Vec3, t: f32) -> glm::Vec3 {
    a * (1.0 - t) + b * t
}

/// `normalize(q1 * (1 - t) + q2 * t)`. Not constant velocity.
///
/// Returns `q1` when the blend cancels out (opposite quaternions at t = 0.5).
pub fn lerp_quaternion(q1: &glm::Quat, q2: &glm::Quat, t: f32) -> glm::Quat {
    let blended = *q1 * (1.0 - t) + *q2 * t;
    if glm::quat_length(&blended) < SLERP_EPSILON {
        return *q1;
    }
    glm::quat_normalize(&blended)
}

/// Spherical linear interpolation without shortest-path correction.
///
/// Coincident or antipodal inputs (`sin(theta) < SLERP_EPSILON`) return `q1`.
pub fn slerp_quaternion(q1: &glm::Quat, q2: &glm::Quat, t: f32) -> glm::Quat {
    let theta = glm::quat_dot(q1, q2).clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    if sin_theta < SLERP_EPSILON {
        return *q1;
    }
    (*q1 * ((1.0 - t) * theta).sin() + *q2 * (t * theta).sin()) / sin_theta
}

/// Inverse-transpose of the upper 3x3 of `m`; identity when singular.
pub fn normal_matrix(m: &glm::Mat4) -> glm::Mat3 {
    glm::mat4_to_mat3(m)
        .try_inverse()
        .map(|inv| inv.transpose())
        .unwrap_or_else(glm::Mat3::identity)
}
