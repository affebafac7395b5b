use crate::error::Result;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

/// An ID3v2.4 seek frame (`SEEK`)
///
/// Points to the next tag in the file, relative to the end of this one.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SeekFrame {
	/// The minimum offset to the next tag
	pub offset: u32,
}

impl SeekFrame {
	/// Create a new [`SeekFrame`]
	pub fn new(offset: u32) -> Self {
		Self { offset }
	}

	/// Read a [`SeekFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * There are fewer than 4 bytes
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let offset = reader.read_u32::<BigEndian>()?;
		Ok(Some(Self { offset }))
	}

	/// Convert a [`SeekFrame`] to a byte vec
	pub fn as_bytes(&self) -> Vec<u8> {
		self.offset.to_be_bytes().to_vec()
	}

	/// The length of [`SeekFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		4
	}
}

#[cfg(test)]
mod tests {
	use crate::items::SeekFrame;

	#[test_log::test]
	fn seek() {
		let frame = SeekFrame::parse(&mut &[0x00, 0x00, 0x04, 0x00][..])
			.unwrap()
			.unwrap();
		assert_eq!(frame.offset, 1024);
		assert_eq!(frame.as_bytes(), [0x00, 0x00, 0x04, 0x00]);

		assert!(SeekFrame::parse(&mut &[0x00, 0x01][..]).is_err());
	}
}
