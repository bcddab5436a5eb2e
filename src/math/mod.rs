//! Dense matrix engine: storage, arithmetic, LU, triangular solves, inversion.

pub mod inverse;
pub mod lu;
pub mod matrix;
pub mod triangular;

pub use lu::LuDecomposition;
pub use matrix::Matrix;
