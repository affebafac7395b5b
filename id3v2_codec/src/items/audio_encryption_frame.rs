use super::{decode_latin1_terminated, encode_terminated};
use crate::error::Result;
use crate::macros::id3v2_err;
use crate::util::text::TextEncoding;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

/// An ID3v2 audio encryption frame (`AENC`, `CRA` in ID3v2.2)
///
/// Describes how the audio stream is encrypted. The audio itself is not touched.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct AudioEncryptionFrame {
	/// Who to contact about the encryption
	pub owner: String,
	/// The first unencrypted frame of the preview
	pub preview_start: u16,
	/// The number of unencrypted frames in the preview
	pub preview_length: u16,
	/// Data required to decrypt the audio
	pub encryption_info: Vec<u8>,
}

impl AudioEncryptionFrame {
	/// Read an [`AudioEncryptionFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The preview fields are cut short
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let owner = decode_latin1_terminated(reader)?;
		let Ok(preview_start) = reader.read_u16::<BigEndian>() else {
			if owner.is_empty() {
				return Ok(None);
			}

			id3v2_err!(BadFrameLength);
		};
		let preview_length = reader.read_u16::<BigEndian>()?;

		let mut encryption_info = Vec::new();
		reader.read_to_end(&mut encryption_info)?;

		Ok(Some(Self {
			owner,
			preview_start,
			preview_length,
			encryption_info,
		}))
	}

	/// Convert an [`AudioEncryptionFrame`] to a byte vec
	///
	/// # Errors
	///
	/// `lossy` is not set, and the owner is not ISO-8859-1
	pub fn as_bytes(&self, lossy: bool) -> Result<Vec<u8>> {
		let mut bytes = Vec::with_capacity(self.encoded_len());
		bytes.extend(encode_terminated(&self.owner, TextEncoding::Latin1, lossy)?);
		bytes.extend(self.preview_start.to_be_bytes());
		bytes.extend(self.preview_length.to_be_bytes());
		bytes.extend_from_slice(&self.encryption_info);

		Ok(bytes)
	}

	/// The length of [`AudioEncryptionFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		TextEncoding::Latin1.encoded_len(&self.owner, true) + 4 + self.encryption_info.len()
	}
}
