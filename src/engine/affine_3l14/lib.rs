mod linear_map;
pub use linear_map::*;

mod affine_transform;
pub use affine_transform::*;

mod export;
pub use export::*;
