use glam::{Mat3, Vec3};

// |det| relative to its Hadamard bound (product of the column lengths); at or below this is singular
pub const SINGULAR_RELATIVE_EPSILON: f32 = 16.0 * f32::EPSILON;
// max abs deviation of M * M^T from identity to still count as a rotation
pub const ORTHOGONAL_EPSILON: f32 = 1e-4;

// The 3x3 linear map operations needed on top of what glam provides
pub trait LinearMap3: Sized
{
    fn is_identity(&self) -> bool;

    // General inverse, None if the map is singular (or has a non-finite determinant).
    // Singularity is judged relative to the size of the columns, so uniformly tiny maps still invert
    #[must_use]
    fn inverse_checked(&self) -> Option<Self>;

    // transpose(self) * vec, without building the transpose
    #[must_use]
    fn transpose_mul_vec3(&self, vec: Vec3) -> Vec3;

    fn is_orthogonal(&self, epsilon: f32) -> bool;

    // Each column (or row) fills the first three floats of a 4-wide block, the fourth is zeroed.
    // dest must have room for at least 12 floats
    fn write_col_major_stride4(&self, dest: &mut [f32]);
    fn write_row_major_stride4(&self, dest: &mut [f32]);
}

impl LinearMap3 for Mat3
{
    #[inline]
    fn is_identity(&self) -> bool { *self == Mat3::IDENTITY }

    fn inverse_checked(&self) -> Option<Self>
    {
        let det = self.determinant();
        let bound = self.x_axis.length() * self.y_axis.length() * self.z_axis.length();
        if !det.is_finite() || det.abs() <= SINGULAR_RELATIVE_EPSILON * bound
        {
            return None;
        }
        Some(self.inverse())
    }

    #[inline]
    fn transpose_mul_vec3(&self, vec: Vec3) -> Vec3
    {
        Vec3::new(self.x_axis.dot(vec), self.y_axis.dot(vec), self.z_axis.dot(vec))
    }

    fn is_orthogonal(&self, epsilon: f32) -> bool
    {
        (*self * self.transpose()).abs_diff_eq(Mat3::IDENTITY, epsilon)
    }

    fn write_col_major_stride4(&self, dest: &mut [f32])
    {
        assert!(dest.len() >= 12, "Stride-4 3x3 needs 12 floats, got {}", dest.len());
        for (i, col) in [self.x_axis, self.y_axis, self.z_axis].into_iter().enumerate()
        {
            col.write_to_slice(&mut dest[i * 4..]);
            dest[i * 4 + 3] = 0.0;
        }
    }

    fn write_row_major_stride4(&self, dest: &mut [f32])
    {
        assert!(dest.len() >= 12, "Stride-4 3x3 needs 12 floats, got {}", dest.len());
        for i in 0..3
        {
            self.row(i).write_to_slice(&mut dest[i * 4..]);
            dest[i * 4 + 3] = 0.0;
        }
    }
}

pub trait Vector3
{
    fn is_zero(&self) -> bool;
}
impl Vector3 for Vec3
{
    #[inline] fn is_zero(&self) -> bool { *self == Vec3::ZERO }
}
