use crate::error::Result;

use std::io::Read;

/// A binary fallback for frames whose content isn't interpreted
///
/// This is used for the subjective frames (volume adjustment, equalisation, reverb), frames
/// with no modelled structure, and any frame whose content is compressed, encrypted, or
/// unsynchronised at the frame level.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BinaryFrame {
	/// The binary data
	#[cfg_attr(feature = "serde", serde(skip))]
	pub data: Vec<u8>,
}

impl BinaryFrame {
	/// Create a new [`BinaryFrame`]
	pub fn new(data: Vec<u8>) -> Self {
		Self { data }
	}

	/// Read a [`BinaryFrame`]
	///
	/// # Errors
	///
	/// * Failure to read from `reader`
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		if data.is_empty() {
			return Ok(None);
		}

		Ok(Some(Self { data }))
	}

	/// Get the binary data
	pub fn as_bytes(&self) -> Vec<u8> {
		self.data.clone()
	}

	/// The length of [`BinaryFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		self.data.len()
	}
}
