use super::{decode_latin1_terminated, encode_terminated};
use crate::error::Result;
use crate::util::text::TextEncoding;

use std::io::Read;

/// An ID3v2.2 encrypted meta frame (`CRM`)
///
/// Holds one or more frames that were encrypted together. The encrypted block is kept
/// as-is.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EncryptedMetaFrame {
	/// Who to contact about the encryption
	pub owner: String,
	/// A description of the encrypted content
	pub description: String,
	/// The encrypted frames
	#[cfg_attr(feature = "serde", serde(skip))]
	pub data: Vec<u8>,
}

impl EncryptedMetaFrame {
	/// Read an [`EncryptedMetaFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Failure to read from `reader`
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let owner = decode_latin1_terminated(reader)?;
		let description = decode_latin1_terminated(reader)?;

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		if owner.is_empty() && description.is_empty() && data.is_empty() {
			return Ok(None);
		}

		Ok(Some(Self {
			owner,
			description,
			data,
		}))
	}

	/// Convert an [`EncryptedMetaFrame`] to a byte vec
	///
	/// # Errors
	///
	/// `lossy` is not set, and the text is not ISO-8859-1
	pub fn as_bytes(&self, lossy: bool) -> Result<Vec<u8>> {
		let mut bytes = Vec::with_capacity(self.encoded_len());
		bytes.extend(encode_terminated(&self.owner, TextEncoding::Latin1, lossy)?);
		bytes.extend(encode_terminated(&self.description, TextEncoding::Latin1, lossy)?);
		bytes.extend_from_slice(&self.data);

		Ok(bytes)
	}

	/// The length of [`EncryptedMetaFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		TextEncoding::Latin1.encoded_len(&self.owner, true)
			+ TextEncoding::Latin1.encoded_len(&self.description, true)
			+ self.data.len()
	}
}
