use super::{decode_latin1_terminated, decode_terminated, encode_terminated, read_encoding};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// Allows for encapsulation of any file type inside an ID3v2 tag (`GEOB`, `GEO` in ID3v2.2)
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(PartialEq, Clone, Debug, Eq, Hash)]
pub struct GeneralEncapsulatedObject {
	/// The text encoding of `file_name` and `description`
	pub encoding: TextEncoding,
	/// The file's mimetype
	pub mime_type: String,
	/// The file's name
	pub file_name: String,
	/// A unique content descriptor
	pub description: String,
	/// The file's content
	#[cfg_attr(feature = "serde", serde(skip))]
	pub data: Vec<u8>,
}

impl GeneralEncapsulatedObject {
	/// Read a [`GeneralEncapsulatedObject`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// Unable to decode any of the text
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

		let mime_type = decode_latin1_terminated(reader)?;
		let file_name = decode_terminated(reader, encoding)?;

		// It's possible for the file name to be the only string with a BOM
		let description = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(encoding)
				.terminated(true)
				.bom(file_name.bom),
		)?;

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		Ok(Some(Self {
			encoding,
			mime_type,
			file_name: file_name.content,
			description: description.content,
			data,
		}))
	}

	/// Convert a [`GeneralEncapsulatedObject`] into an ID3v2 GEOB frame byte Vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// `lossy` is not set, and the text can't be represented in the encoding
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);

		let mut bytes = Vec::with_capacity(self.encoded_len(version));
		bytes.push(encoding as u8);
		bytes.extend(encode_terminated(&self.mime_type, TextEncoding::Latin1, lossy)?);
		bytes.extend(encode_terminated(&self.file_name, encoding, lossy)?);
		bytes.extend(encode_terminated(&self.description, encoding, lossy)?);
		bytes.extend(&self.data);

		Ok(bytes)
	}

	/// The length of [`GeneralEncapsulatedObject::as_bytes`]
	pub fn encoded_len(&self, version: Id3v2Version) -> usize {
		let encoding = self.encoding.for_version(version);

		1 + TextEncoding::Latin1.encoded_len(&self.mime_type, true)
			+ encoding.encoded_len(&self.file_name, true)
			+ encoding.encoded_len(&self.description, true)
			+ self.data.len()
	}
}
