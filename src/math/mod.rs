/// Linear interpolation of scalars and colors
pub mod interpolation;
