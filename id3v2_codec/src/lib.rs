//! Read, edit, and write ID3v2.2, ID3v2.3, and ID3v2.4 tags.
//!
//! A tag is an ordered list of [`Frame`]s, each a typed [`FrameBody`] under an identifier.
//! Frames are decoded into structured values on read, and re-encoded from those values
//! on write, so edits never touch raw bytes.
//!
//! # Examples
//!
//! ## Reading a tag
//!
//! ```rust
//! # fn main() -> id3v2_codec::error::Result<()> {
//! use id3v2_codec::config::ParseOptions;
//! use id3v2_codec::{FrameId, Id3v2Tag};
//!
//! let bytes = b"ID3\x03\x00\x00\x00\x00\x00\x10TIT2\x00\x00\x00\x06\x00\x00\x00Test\x00";
//! let tag = Id3v2Tag::read_from(bytes, ParseOptions::new())?;
//!
//! let frame = tag.get(FrameId::TIT2).unwrap();
//! assert_eq!(frame.size(), 6);
//! assert_eq!(frame.body().text(), Some("Test"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Editing and writing
//!
//! Frame setters keep the declared frame size in step with the body.
//!
//! ```rust
//! # fn main() -> id3v2_codec::error::Result<()> {
//! use id3v2_codec::config::{ParseOptions, WriteOptions};
//! use id3v2_codec::{FrameId, Id3v2Tag, TextEncoding};
//!
//! # let bytes = b"ID3\x03\x00\x00\x00\x00\x00\x10TIT2\x00\x00\x00\x06\x00\x00\x00Test\x00";
//! let mut tag = Id3v2Tag::read_from(bytes, ParseOptions::new())?;
//!
//! let title = tag.get_mut(FrameId::TIT2).unwrap();
//! title.set_encoding(TextEncoding::UTF16)?;
//! title.set_text("Café")?;
//! assert_eq!(title.size(), 13);
//!
//! let written = tag.to_bytes(WriteOptions::new().preferred_padding(0))?;
//! let reread = Id3v2Tag::read_from(&written, ParseOptions::new())?;
//! assert_eq!(reread.title(), Some("Café"));
//! # Ok(())
//! # }
//! ```
//!
//! # Malformed input
//!
//! By default, malformed frames are skipped and extraction stops at the first frame header
//! that can't be trusted, keeping everything read up to that point. See
//! [`ParsingMode`](config::ParsingMode) for the alternatives.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod frame;
pub mod header;
pub mod items;
pub(crate) mod macros;
pub mod picture;
mod read;
pub mod restrictions;
pub mod tag;
pub mod util;
mod write;

pub use frame::{Frame, FrameBody, FrameId};
pub use tag::Id3v2Tag;
pub use util::text::TextEncoding;
