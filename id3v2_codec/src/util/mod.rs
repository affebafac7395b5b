//! Encoding and integer utilities shared by every layer of the codec

pub(crate) mod alloc;
pub mod synchsafe;
pub mod text;
