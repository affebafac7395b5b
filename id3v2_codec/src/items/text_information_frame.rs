use super::{decode_remainder, decode_terminated, encode_terminated, read_encoding};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::util::text::TextEncoding;

use std::io::Read;

/// An ID3v2 text frame
///
/// This is used by every `T***` frame. User defined text frames (`TXXX`, and `TXX` in
/// ID3v2.2) also carry a description, which is used to tell them apart.
///
/// In ID3v2.4, a frame can hold multiple values separated by a null terminator. They are
/// kept together in [`TextInformationFrame::value`].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextInformationFrame {
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The description of a user defined text frame
	pub description: Option<String>,
	/// The text itself
	pub value: String,
}

impl TextInformationFrame {
	/// Create a new [`TextInformationFrame`]
	pub fn new(encoding: TextEncoding, value: impl Into<String>) -> Self {
		Self {
			encoding,
			description: None,
			value: value.into(),
		}
	}

	/// Create a new user defined [`TextInformationFrame`]
	pub fn new_user_defined(
		encoding: TextEncoding,
		description: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		Self {
			encoding,
			description: Some(description.into()),
			value: value.into(),
		}
	}

	/// Read a [`TextInformationFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Unable to decode the text
	/// * The encoding byte is unknown (and `parse_mode` isn't [`ParsingMode::Relaxed`])
	pub fn parse<R>(
		reader: &mut R,
		user_defined: bool,
		version: Id3v2Version,
		parse_mode: ParsingMode,
	) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Some(encoding) = read_encoding(reader, version, parse_mode)? else {
			return Ok(None);
		};

		let mut bom = [0; 2];
		let mut description = None;
		if user_defined {
			let decoded = decode_terminated(reader, encoding)?;
			bom = decoded.bom;
			description = Some(decoded.content);
		}

		let value = decode_remainder(reader, encoding, bom)?;

		Ok(Some(Self {
			encoding,
			description,
			value,
		}))
	}

	/// Convert a [`TextInformationFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// `lossy` is not set, and the text can't be represented in the encoding
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);

		let mut content = Vec::with_capacity(self.encoded_len(version));
		content.push(encoding as u8);

		if let Some(description) = &self.description {
			content.extend(encode_terminated(description, encoding, lossy)?);
		}

		content.extend(encode_terminated(&self.value, encoding, lossy)?);
		Ok(content)
	}

	/// The length of [`TextInformationFrame::as_bytes`]
	pub fn encoded_len(&self, version: Id3v2Version) -> usize {
		let encoding = self.encoding.for_version(version);

		let description = self
			.description
			.as_deref()
			.map_or(0, |d| encoding.encoded_len(d, true));

		1 + description + encoding.encoded_len(&self.value, true)
	}
}
