//! Distance matrix over customer locations.

mod matrix;

pub use matrix::DistanceMatrix;
