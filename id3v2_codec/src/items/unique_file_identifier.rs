use super::{decode_latin1_terminated, encode_terminated};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::{id3v2_err, parse_mode_choice};
use crate::util::text::TextEncoding;

use std::io::Read;

/// An ID3v2 unique file identifier frame (`UFID`, `UFI` in ID3v2.2)
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct UniqueFileIdentifierFrame {
	/// The non-empty owner of the identifier.
	pub owner: String,
	/// The binary payload with up to 64 bytes of data.
	pub identifier: Vec<u8>,
}

impl UniqueFileIdentifierFrame {
	/// Create a new [`UniqueFileIdentifierFrame`]
	pub fn new(owner: impl Into<String>, identifier: Vec<u8>) -> Self {
		Self {
			owner: owner.into(),
			identifier,
		}
	}

	/// Decode the frame contents from bytes
	///
	/// # Errors
	///
	/// * Owner is improperly encoded
	/// * Owner is missing, and `parse_mode` is [`ParsingMode::Strict`]
	pub fn parse<R>(reader: &mut R, parse_mode: ParsingMode) -> Result<Option<Self>>
	where
		R: Read,
	{
		let owner = decode_latin1_terminated(reader)?;
		if owner.is_empty() {
			parse_mode_choice!(
				parse_mode,
				STRICT: id3v2_err!(MissingOwner),
				DEFAULT: log::warn!("UFID frame is missing an owner")
			);
		}

		let mut identifier = Vec::new();
		reader.read_to_end(&mut identifier)?;

		if owner.is_empty() && identifier.is_empty() {
			return Ok(None);
		}

		Ok(Some(Self { owner, identifier }))
	}

	/// Encode the frame contents as bytes
	///
	/// # Errors
	///
	/// `lossy` is not set, and the owner is not ISO-8859-1
	pub fn as_bytes(&self, lossy: bool) -> Result<Vec<u8>> {
		let mut content = Vec::with_capacity(self.encoded_len());
		content.extend(encode_terminated(&self.owner, TextEncoding::Latin1, lossy)?);
		content.extend_from_slice(&self.identifier);

		Ok(content)
	}

	/// The length of [`UniqueFileIdentifierFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		TextEncoding::Latin1.encoded_len(&self.owner, true) + self.identifier.len()
	}
}
