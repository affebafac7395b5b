use crate::error::Result;
use crate::macros::err;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

const MAX_BUFFER_SIZE: u32 = 0x00FF_FFFF;

/// An ID3v2 recommended buffer size frame (`RBUF`, `BUF` in ID3v2.2)
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RecommendedBufferSizeFrame {
	/// The recommended buffer size, at most 24 bits
	pub buffer_size: u32,
	/// Whether tags may be embedded in the audio stream
	pub embedded_info: bool,
	/// The offset from the end of this tag to the next one
	pub next_tag_offset: Option<u32>,
}

impl RecommendedBufferSizeFrame {
	/// Create a new [`RecommendedBufferSizeFrame`]
	pub fn new(buffer_size: u32, embedded_info: bool, next_tag_offset: Option<u32>) -> Self {
		Self {
			buffer_size,
			embedded_info,
			next_tag_offset,
		}
	}

	/// Read a [`RecommendedBufferSizeFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The buffer size or flag byte are missing
	/// * The offset is cut short
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let buffer_size = reader.read_u24::<BigEndian>()?;
		let flags = reader.read_u8()?;

		let mut rest = Vec::new();
		reader.read_to_end(&mut rest)?;

		let next_tag_offset = if rest.is_empty() {
			None
		} else {
			Some((&mut &rest[..]).read_u32::<BigEndian>()?)
		};

		if rest.len() > 4 {
			log::debug!("Ignoring {} bytes after the buffer size offset", rest.len() - 4);
		}

		Ok(Some(Self {
			buffer_size,
			embedded_info: flags & 0x01 == 0x01,
			next_tag_offset,
		}))
	}

	/// Convert a [`RecommendedBufferSizeFrame`] to a byte vec
	///
	/// # Errors
	///
	/// The buffer size doesn't fit in 24 bits
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		if self.buffer_size > MAX_BUFFER_SIZE {
			err!(TooMuchData);
		}

		let mut bytes = Vec::with_capacity(self.encoded_len());
		bytes.write_u24::<BigEndian>(self.buffer_size)?;
		bytes.write_u8(u8::from(self.embedded_info))?;

		if let Some(offset) = self.next_tag_offset {
			bytes.write_u32::<BigEndian>(offset)?;
		}

		Ok(bytes)
	}

	/// The length of [`RecommendedBufferSizeFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		if self.next_tag_offset.is_some() { 8 } else { 4 }
	}
}

#[cfg(test)]
mod tests {
	use crate::items::RecommendedBufferSizeFrame;

	#[test_log::test]
	fn rbuf_layout() {
		let bytes = [0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x10, 0x00];

		let frame = RecommendedBufferSizeFrame::parse(&mut &bytes[..])
			.unwrap()
			.unwrap();
		assert_eq!(
			frame,
			RecommendedBufferSizeFrame::new(0x01_0000, true, Some(4096))
		);
		assert_eq!(frame.as_bytes().unwrap(), bytes);
		assert_eq!(frame.encoded_len(), bytes.len());
	}

	#[test_log::test]
	fn offset_is_optional() {
		let frame = RecommendedBufferSizeFrame::parse(&mut &[0x00, 0x08, 0x00, 0x00][..])
			.unwrap()
			.unwrap();
		assert_eq!(frame.buffer_size, 2048);
		assert!(!frame.embedded_info);
		assert_eq!(frame.next_tag_offset, None);
		assert_eq!(frame.as_bytes().unwrap().len(), 4);
	}

	#[test_log::test]
	fn cut_short() {
		assert!(RecommendedBufferSizeFrame::parse(&mut &[0x00, 0x08, 0x00][..]).is_err());
		let bytes = [0x00, 0x08, 0x00, 0x01, 0x10];
		assert!(RecommendedBufferSizeFrame::parse(&mut &bytes[..]).is_err());
	}

	#[test_log::test]
	fn buffer_size_too_large() {
		let frame = RecommendedBufferSizeFrame::new(0x0100_0000, false, None);
		assert!(frame.as_bytes().is_err());
	}
}
