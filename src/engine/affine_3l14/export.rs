use std::error::Error;
use std::fmt::{Display, Formatter};
use crate::{AffineTransform, LinearMap3};

// number of floats in an exported homogeneous 4x4
pub const MATRIX_44_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportError
{
    LengthMismatch { expected: usize, actual: usize },
}
impl Display for ExportError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::LengthMismatch { expected, actual } =>
                write!(f, "Incompatible matrix buffer: expected {expected} floats, got {actual}"),
        }
    }
}
impl Error for ExportError { }

#[inline]
fn check_len(dest: &[f32]) -> Result<(), ExportError>
{
    match dest.len()
    {
        MATRIX_44_LEN => Ok(()),
        actual => Err(ExportError::LengthMismatch { expected: MATRIX_44_LEN, actual }),
    }
}

// Both layouts always end in a fixed (0, 0, 0, 1) row/column; there is no projective part
impl AffineTransform
{
    pub fn try_write_col_major_16(&self, dest: &mut [f32]) -> Result<(), ExportError>
    {
        check_len(dest)?;

        self.linear.write_col_major_stride4(dest);
        dest[12] = self.translation.x;
        dest[13] = self.translation.y;
        dest[14] = self.translation.z;
        dest[3] = 0.0;
        dest[7] = 0.0;
        dest[11] = 0.0;
        dest[15] = 1.0;
        Ok(())
    }

    pub fn try_write_row_major_16(&self, dest: &mut [f32]) -> Result<(), ExportError>
    {
        check_len(dest)?;

        self.linear.write_row_major_stride4(dest);
        dest[3] = self.translation.x;
        dest[7] = self.translation.y;
        dest[11] = self.translation.z;
        dest[12] = 0.0;
        dest[13] = 0.0;
        dest[14] = 0.0;
        dest[15] = 1.0;
        Ok(())
    }

    // column vectors, translation in 12..15; panics if dest isn't exactly 16 floats
    pub fn write_col_major_16(&self, dest: &mut [f32])
    {
        if let Err(err) = self.try_write_col_major_16(dest)
        {
            panic!("{err}");
        }
    }

    // translation in 3, 7, 11; panics if dest isn't exactly 16 floats
    pub fn write_row_major_16(&self, dest: &mut [f32])
    {
        if let Err(err) = self.try_write_row_major_16(dest)
        {
            panic!("{err}");
        }
    }

    #[inline] #[must_use]
    pub fn to_col_major_16(&self) -> [f32; MATRIX_44_LEN]
    {
        let mut out = [0.0; MATRIX_44_LEN];
        self.write_col_major_16(&mut out);
        out
    }

    #[inline] #[must_use]
    pub fn to_row_major_16(&self) -> [f32; MATRIX_44_LEN]
    {
        let mut out = [0.0; MATRIX_44_LEN];
        self.write_row_major_16(&mut out);
        out
    }
}

// Uploadable as-is to a uniform/storage buffer expecting a column-major mat4x4<f32>
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(16))]
pub struct AffineUniform
{
    pub world: [f32; MATRIX_44_LEN],
}
impl Default for AffineUniform
{
    fn default() -> Self { Self::from(&AffineTransform::IDENTITY) }
}
impl From<&AffineTransform> for AffineUniform
{
    fn from(transform: &AffineTransform) -> Self
    {
        Self
        {
            world: transform.to_col_major_16(),
        }
    }
}
