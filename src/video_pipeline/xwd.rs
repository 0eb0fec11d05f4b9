//! XWD capture decoding.

pub mod decoder;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use decoder::XwdImage;
pub use source::CaptureSource;
pub use types::{ByteOrder, XwdHeader};
