use std::fmt::{Display, Formatter};
use std::ops::{Mul, MulAssign};
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use bitcode::{Decode, Encode};
use glam::{Affine3A, Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use crate::{LinearMap3, Vector3};

// A 3x3 linear map plus a translation, mapping p -> linear * p + translation
// Nothing about linear is enforced, it may be singular, scaled, or sheared.
// The *_rigid ops are only correct when linear is a pure rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct AffineTransform
{
    pub linear: Mat3,
    pub translation: Vec3,
}
impl Default for AffineTransform
{
    fn default() -> Self { Self::IDENTITY }
}
impl AffineTransform
{
    pub const IDENTITY: Self = Self { linear: Mat3::IDENTITY, translation: Vec3::ZERO };
    pub const ZERO: Self = Self { linear: Mat3::ZERO, translation: Vec3::ZERO };

    #[inline] #[must_use]
    pub const fn new(linear: Mat3, translation: Vec3) -> Self { Self { linear, translation } }

    // Scratch instance meant to be overwritten (e.g. by compose_into/inverse_into).
    // Zeroed when not initialized, identity otherwise
    #[inline] #[must_use]
    pub const fn raw(initialize: bool) -> Self
    {
        match initialize
        {
            true => Self::IDENTITY,
            false => Self::ZERO,
        }
    }

    #[inline] #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self { Self::new(Mat3::IDENTITY, translation) }
    #[inline] #[must_use]
    pub const fn from_linear(linear: Mat3) -> Self { Self::new(linear, Vec3::ZERO) }

    #[inline] #[must_use]
    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self
    {
        Self::new(Mat3::from_quat(rotation), translation)
    }

    // scale is applied first, then rotation, then translation
    #[inline] #[must_use]
    pub fn from_scale_rotation_translation(scale: Vec3, rotation: Quat, translation: Vec3) -> Self
    {
        Self::new(Mat3::from_quat(rotation) * Mat3::from_diagonal(scale), translation)
    }

    #[inline] pub fn set_zero(&mut self) { *self = Self::ZERO; }
    #[inline] pub fn set_identity(&mut self) { *self = Self::IDENTITY; }

    // exact comparison
    #[inline] #[must_use]
    pub fn is_identity(&self) -> bool
    {
        self.linear.is_identity() && self.translation.is_zero()
    }

    #[inline] #[must_use]
    pub fn is_finite(&self) -> bool
    {
        self.linear.is_finite() && self.translation.is_finite()
    }

    #[inline] #[must_use]
    pub fn transform_point3(&self, point: Vec3) -> Vec3
    {
        self.linear * point + self.translation
    }

    // directions/normals; ignores translation
    #[inline] #[must_use]
    pub fn transform_vector3(&self, vector: Vec3) -> Vec3
    {
        self.linear * vector
    }

    // transpose(linear) stands in for the inverse; only valid if linear is orthogonal
    #[inline] #[must_use]
    pub fn inverse_transform_point3_rigid(&self, point: Vec3) -> Vec3
    {
        warn_if_not_rigid(&self.linear);
        self.linear.transpose_mul_vec3(point - self.translation)
    }

    // dest = left * right (right is applied first)
    // both results are computed before dest is touched
    pub fn compose_into(dest: &mut Self, left: &Self, right: &Self)
    {
        let translation = left.linear * right.translation + left.translation;
        let linear = left.linear * right.linear;
        dest.translation = translation;
        dest.linear = linear;
    }

    // self * rhs; rhs is applied first
    #[inline] #[must_use]
    pub fn compose(&self, rhs: &Self) -> Self
    {
        let mut dest = Self::raw(false);
        Self::compose_into(&mut dest, self, rhs);
        dest
    }

    // returns false and leaves dest untouched if linear is singular
    pub fn inverse_into(&self, dest: &mut Self) -> bool
    {
        let Some(inverse_linear) = self.linear.inverse_checked() else
        {
            log::debug!("Cannot invert {self:?}, linear map is singular");
            return false;
        };

        dest.linear = inverse_linear;
        dest.translation = inverse_linear * -self.translation;
        true
    }

    // correct for any invertible linear, scale and shear included
    #[inline] #[must_use]
    pub fn try_inverse(&self) -> Option<Self>
    {
        let mut dest = Self::raw(false);
        self.inverse_into(&mut dest).then_some(dest)
    }

    // always 'succeeds', but only correct for rotations
    pub fn inverse_rigid_into(&self, dest: &mut Self) -> bool
    {
        warn_if_not_rigid(&self.linear);
        dest.linear = self.linear.transpose();
        dest.translation = dest.linear * -self.translation;
        true
    }

    #[inline] #[must_use]
    pub fn inverse_rigid(&self) -> Self
    {
        let mut dest = Self::raw(false);
        self.inverse_rigid_into(&mut dest);
        dest
    }
}

#[cfg(any(debug_assertions, feature = "rigid_checks"))]
fn warn_if_not_rigid(linear: &Mat3)
{
    if !linear.is_orthogonal(crate::ORTHOGONAL_EPSILON)
    {
        log::warn!("Rigid inverse used with a non-orthogonal linear map, result will be wrong: {linear:?}");
    }
}
#[cfg(not(any(debug_assertions, feature = "rigid_checks")))]
#[inline(always)]
fn warn_if_not_rigid(_linear: &Mat3) { }

impl Mul<AffineTransform> for AffineTransform
{
    type Output = AffineTransform;

    #[inline]
    fn mul(self, rhs: AffineTransform) -> Self::Output { self.compose(&rhs) }
}
impl MulAssign<AffineTransform> for AffineTransform
{
    #[inline]
    fn mul_assign(&mut self, rhs: AffineTransform) { *self = self.compose(&rhs); }
}
impl Mul<Vec3> for AffineTransform
{
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output { self.transform_point3(rhs) }
}

// column major (OpenGL like)
impl Display for AffineTransform
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        let Self { linear, translation: t } = self;
        for col in [linear.x_axis, linear.y_axis, linear.z_axis]
        {
            writeln!(f, "{},{},{},0.0", col.x, col.y, col.z)?;
        }
        write!(f, "{},{},{},1.0", t.x, t.y, t.z)
    }
}

impl From<AffineTransform> for Mat4
{
    fn from(t: AffineTransform) -> Self { Mat4::from_cols_array(&t.to_col_major_16()) }
}
// drops the projective row
impl From<&Mat4> for AffineTransform
{
    fn from(m: &Mat4) -> Self { Self::new(Mat3::from_mat4(*m), m.w_axis.truncate()) }
}
impl From<Affine3A> for AffineTransform
{
    fn from(a: Affine3A) -> Self { Self::new(Mat3::from(a.matrix3), Vec3::from(a.translation)) }
}
impl From<AffineTransform> for Affine3A
{
    fn from(t: AffineTransform) -> Self { Affine3A::from_mat3_translation(t.linear, t.translation) }
}

impl AbsDiffEq for AffineTransform
{
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon { f32::default_epsilon() }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool
    {
        AbsDiffEq::abs_diff_eq(&self.linear, &other.linear, epsilon) &&
        AbsDiffEq::abs_diff_eq(&self.translation, &other.translation, epsilon)
    }
}
impl RelativeEq for AffineTransform
{
    fn default_max_relative() -> Self::Epsilon { f32::default_max_relative() }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool
    {
        RelativeEq::relative_eq(&self.linear, &other.linear, epsilon, max_relative) &&
        RelativeEq::relative_eq(&self.translation, &other.translation, epsilon, max_relative)
    }
}
impl UlpsEq for AffineTransform
{
    fn default_max_ulps() -> u32 { f32::default_max_ulps() }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool
    {
        UlpsEq::ulps_eq(&self.linear, &other.linear, epsilon, max_ulps) &&
        UlpsEq::ulps_eq(&self.translation, &other.translation, epsilon, max_ulps)
    }
}
