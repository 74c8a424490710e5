//! Helpers shared by the decoding layers

pub mod datetime;
pub mod endian;
pub mod sector;
pub mod string;
