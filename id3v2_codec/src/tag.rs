//! The ID3v2 tag, an ordered collection of [`Frame`]s

mod attribute;
mod cursor;
mod legacy;
mod record;

#[cfg(test)]
mod tests;

pub use attribute::Attribute;
pub use cursor::FrameCursor;
pub use legacy::{GENRES, LegacyFields, TagStandard};
pub use record::{ContentValue, FrameRecord, TagRecord};

use crate::config::{ParseOptions, WriteOptions};
use crate::error::Result;
use crate::frame::{Frame, FrameId};
use crate::header::{Id3v2Header, Id3v2Version};
use crate::read::parse_id3v2;
use crate::write::create_tag;

use std::io::{Read, Write};

/// An ID3v2 tag
///
/// Frames are kept in the order they were read or inserted, and written back in that same
/// order. Identifiers are not unique, a tag may hold any number of frames sharing one.
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::config::{ParseOptions, WriteOptions};
/// use id3v2_codec::frame::{Frame, FrameBody, FrameId};
/// use id3v2_codec::header::Id3v2Version;
/// use id3v2_codec::items::TextInformationFrame;
/// use id3v2_codec::{Id3v2Tag, TextEncoding};
///
/// # fn main() -> id3v2_codec::error::Result<()> {
/// let mut tag = Id3v2Tag::new(Id3v2Version::V3);
/// tag.insert(Frame::new(
/// 	FrameId::TIT2,
/// 	FrameBody::Text(TextInformationFrame::new(TextEncoding::Latin1, "Foo")),
/// )?);
///
/// let bytes = tag.to_bytes(WriteOptions::default())?;
/// let read = Id3v2Tag::read_from(&bytes, ParseOptions::default())?;
///
/// assert_eq!(read.title(), Some("Foo"));
/// # Ok(()) }
/// ```
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Id3v2Tag {
	header: Id3v2Header,
	pub(crate) frames: Vec<Frame>,
}

impl IntoIterator for Id3v2Tag {
	type Item = Frame;
	type IntoIter = std::vec::IntoIter<Self::Item>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.into_iter()
	}
}

impl<'a> IntoIterator for &'a Id3v2Tag {
	type Item = &'a Frame;
	type IntoIter = std::slice::Iter<'a, Frame>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.iter()
	}
}

impl Default for Id3v2Tag {
	fn default() -> Self {
		Self::new(Id3v2Version::V4)
	}
}

impl Id3v2Tag {
	/// Create a new empty tag
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::Id3v2Tag;
	/// use id3v2_codec::header::Id3v2Version;
	///
	/// let tag = Id3v2Tag::new(Id3v2Version::V4);
	/// assert!(tag.is_empty());
	/// ```
	pub fn new(version: Id3v2Version) -> Self {
		Self::from_header(Id3v2Header::new(version))
	}

	pub(crate) fn from_header(header: Id3v2Header) -> Self {
		Self {
			header,
			frames: Vec::new(),
		}
	}

	/// Read a tag from a buffer starting with the tag header
	///
	/// Anything after the declared size is ignored.
	///
	/// # Errors
	///
	/// * The tag header or extended header is invalid, see [`Id3v2Header::parse`]
	/// * [`ParsingMode::Strict`](crate::config::ParsingMode::Strict) is used, and a frame is invalid
	/// * The frame region is larger than the allocation limit
	pub fn read_from(bytes: &[u8], parse_options: ParseOptions) -> Result<Self> {
		let mut reader = bytes;
		Self::read_from_reader(&mut reader, parse_options)
	}

	/// Read a tag from a reader positioned at the tag header
	///
	/// The reader will be left directly after the declared frame region.
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::read_from`]
	pub fn read_from_reader<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read,
	{
		let header = Id3v2Header::parse(reader)?;
		parse_id3v2(reader, header, parse_options)
	}

	/// Serialize the tag
	///
	/// The declared tag size is recomputed from the frames, extended header and padding.
	/// Each frame is written with the length of its encoded body.
	///
	/// The sizes recorded on frames (see [`Frame::size`](crate::frame::Frame::size)) are
	/// advisory, the written sizes always come from the encoded bodies.
	///
	/// # Errors
	///
	/// * A frame's identifier doesn't fit the tag's version (3 characters in ID3v2.2, 4 otherwise)
	/// * A body can't be expressed in the tag's version
	/// * [`WriteOptions::lossy_text_encoding`] is disabled and a string can't be encoded
	/// * The tag is too large for its size field
	pub fn to_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		create_tag(self, write_options)
	}

	/// Serialize the tag into `writer`
	///
	/// # Errors
	///
	/// * See [`Id3v2Tag::to_bytes`]
	/// * `writer` fails
	pub fn dump_to<W>(&self, writer: &mut W, write_options: WriteOptions) -> Result<()>
	where
		W: Write,
	{
		let bytes = self.to_bytes(write_options)?;
		writer.write_all(&bytes)?;

		Ok(())
	}

	/// The tag header
	///
	/// When read, [`Id3v2Header::size`] is the declared size. It is only recomputed on write.
	pub fn header(&self) -> &Id3v2Header {
		&self.header
	}

	/// Mutable access to the tag header
	///
	/// Changing [`Id3v2Header::version`] does not change the identifiers of existing frames.
	pub fn header_mut(&mut self) -> &mut Id3v2Header {
		&mut self.header
	}

	/// The tag's version
	pub fn version(&self) -> Id3v2Version {
		self.header.version
	}
}

impl Id3v2Tag {
	/// Gets the first [`Frame`] with an id
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::frame::{Frame, FrameBody, FrameId};
	/// use id3v2_codec::items::TextInformationFrame;
	/// use id3v2_codec::{Id3v2Tag, TextEncoding};
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// let mut tag = Id3v2Tag::default();
	/// tag.insert(Frame::new(
	/// 	FrameId::TPE1,
	/// 	FrameBody::Text(TextInformationFrame::new(TextEncoding::UTF8, "Foo")),
	/// )?);
	///
	/// let frame = tag.get(FrameId::TPE1).unwrap();
	/// assert_eq!(frame.body().text(), Some("Foo"));
	/// # Ok(()) }
	/// ```
	pub fn get(&self, id: FrameId) -> Option<&Frame> {
		self.frames.iter().find(|f| f.id() == id)
	}

	/// Gets every [`Frame`] with an id, in order
	pub fn get_all(&self, id: FrameId) -> impl Iterator<Item = &Frame> + Clone {
		self.frames.iter().filter(move |f| f.id() == id)
	}

	/// Gets the first [`Frame`] with an id, mutably
	///
	/// Edits should go through the [`Frame`] setters, which keep the declared size current.
	pub fn get_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
		self.frames.iter_mut().find(|f| f.id() == id)
	}

	/// Gets the first [`Frame`] with an identifier as it appears on disk
	///
	/// This is the only way to look up frames that resolved to [`FrameId::Unknown`].
	pub fn get_raw(&self, raw_id: &str) -> Option<&Frame> {
		self.frames.iter().find(|f| f.raw_id() == raw_id)
	}

	/// Append a [`Frame`]
	///
	/// Existing frames with the same identifier are kept.
	pub fn insert(&mut self, frame: Frame) {
		self.frames.push(frame);
	}

	/// Removes every [`Frame`] with an id, returning them in order
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::frame::{Frame, FrameBody, FrameId};
	/// use id3v2_codec::items::{CommentFrame, TextInformationFrame};
	/// use id3v2_codec::{Id3v2Tag, TextEncoding};
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// let mut tag = Id3v2Tag::default();
	/// for language in [*b"eng", *b"deu"] {
	/// 	let comment = CommentFrame::new(TextEncoding::UTF8, language, "", "Comment");
	/// 	tag.insert(Frame::new(FrameId::COMM, FrameBody::Comment(comment))?);
	/// }
	///
	/// assert_eq!(tag.remove(FrameId::COMM).len(), 2);
	/// assert!(tag.is_empty());
	/// # Ok(()) }
	/// ```
	pub fn remove(&mut self, id: FrameId) -> Vec<Frame> {
		let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.frames)
			.into_iter()
			.partition(|f| f.id() == id);

		self.frames = kept;
		removed
	}

	/// Retains [`Frame`]s by evaluating the predicate
	pub fn retain<P>(&mut self, predicate: P)
	where
		P: FnMut(&Frame) -> bool,
	{
		self.frames.retain(predicate)
	}

	/// All frames, in order
	pub fn frames(&self) -> impl ExactSizeIterator<Item = &Frame> + Clone {
		self.frames.iter()
	}

	/// The number of frames
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// Create a [`FrameCursor`] at the first frame
	///
	/// The cursor borrows the tag, so frames can't be added or removed while it's alive.
	pub fn cursor(&self) -> FrameCursor<'_> {
		FrameCursor::new(&self.frames)
	}
}
