//! Primitive blocks.

pub mod bytes;
pub mod primitives;
pub mod string;
