use super::{decode_remainder, encode_terminated, read_encoding};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::util::text::TextEncoding;

use std::io::Read;

/// An ID3v2 terms of use frame (`USER`)
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TermsOfUseFrame {
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// The terms of use
	pub text: String,
}

impl TermsOfUseFrame {
	/// Create a new [`TermsOfUseFrame`]
	pub fn new(encoding: TextEncoding, language: [u8; 3], text: impl Into<String>) -> Self {
		Self {
			encoding,
			language,
			text: text.into(),
		}
	}

	/// Read a [`TermsOfUseFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Invalid text encoding
	/// * The language is cut short
	pub fn parse<R>(
		reader: &mut R,
		version: Id3v2Version,
		parse_mode: ParsingMode,
	) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Some(encoding) = read_encoding(reader, version, parse_mode)? else {
			return Ok(None);
		};

		let mut language = [0; 3];
		reader.read_exact(&mut language)?;

		let text = decode_remainder(reader, encoding, [0; 2])?;

		Ok(Some(Self {
			encoding,
			language,
			text,
		}))
	}

	/// Convert a [`TermsOfUseFrame`] to a byte vec
	///
	/// # Errors
	///
	/// `lossy` is not set, and the text can't be represented in its encoding
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);

		let mut bytes = Vec::with_capacity(self.encoded_len(version));
		bytes.push(encoding as u8);
		bytes.extend(self.language);
		bytes.extend(encode_terminated(&self.text, encoding, lossy)?);

		Ok(bytes)
	}

	/// The length of [`TermsOfUseFrame::as_bytes`]
	pub fn encoded_len(&self, version: Id3v2Version) -> usize {
		4 + self.encoding.for_version(version).encoded_len(&self.text, true)
	}
}
