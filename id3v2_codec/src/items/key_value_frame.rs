use super::{encode_terminated, read_encoding};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// An ID3v2 key-value frame
///
/// This is used by the involved people lists (`IPLS`, `IPL` in ID3v2.2, and `TIPL` in ID3v2.4),
/// and the musician credits list (`TMCL`).
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct KeyValueFrame {
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The key value pairs. Keys can be specified multiple times
	pub key_value_pairs: Vec<(String, String)>,
}

impl KeyValueFrame {
	/// Create a new [`KeyValueFrame`]
	pub fn new(encoding: TextEncoding, key_value_pairs: Vec<(String, String)>) -> Self {
		Self {
			encoding,
			key_value_pairs,
		}
	}

	/// Read an [`KeyValueFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Unable to decode the text
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

		let mut values = Vec::new();

		let mut text_decode_options = TextDecodeOptions::new().encoding(encoding).terminated(true);

		// We have to read the first key/value pair separately because it may be the only string with a BOM

		let first_key = decode_text(reader, text_decode_options)?;

		if first_key.bytes_read == 0 {
			return Ok(None);
		}

		if encoding == TextEncoding::UTF16 {
			text_decode_options = text_decode_options.bom(first_key.bom);
		}

		values.push((
			first_key.content,
			decode_text(reader, text_decode_options)?.content,
		));

		loop {
			let key = decode_text(reader, text_decode_options)?;
			let value = decode_text(reader, text_decode_options)?;
			if key.bytes_read == 0 || value.bytes_read == 0 {
				break;
			}

			values.push((key.content, value.content));
		}

		Ok(Some(Self {
			encoding,
			key_value_pairs: values,
		}))
	}

	/// Convert a [`KeyValueFrame`] to a byte vec
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

		for (key, value) in &self.key_value_pairs {
			content.append(&mut encode_terminated(key, encoding, lossy)?);
			content.append(&mut encode_terminated(value, encoding, lossy)?);
		}

		Ok(content)
	}

	/// The length of [`KeyValueFrame::as_bytes`]
	pub fn encoded_len(&self, version: Id3v2Version) -> usize {
		let encoding = self.encoding.for_version(version);

		1 + self
			.key_value_pairs
			.iter()
			.map(|(key, value)| encoding.encoded_len(key, true) + encoding.encoded_len(value, true))
			.sum::<usize>()
	}
}

#[cfg(test)]
mod tests {
	use crate::config::ParsingMode;
	use crate::header::Id3v2Version;
	use crate::items::KeyValueFrame;
	use crate::util::text::TextEncoding;

	#[test_log::test]
	fn involved_people() {
		let bytes = b"\x00producer\x00Alice\x00mixer\x00Bob\x00";
		let frame = KeyValueFrame::parse(&mut &bytes[..], Id3v2Version::V3, ParsingMode::Strict)
			.unwrap()
			.unwrap();

		assert_eq!(
			frame.key_value_pairs,
			vec![
				(String::from("producer"), String::from("Alice")),
				(String::from("mixer"), String::from("Bob")),
			]
		);
		assert_eq!(frame.as_bytes(Id3v2Version::V3, true).unwrap(), bytes);
		assert_eq!(frame.encoded_len(Id3v2Version::V3), bytes.len());
	}

	#[test_log::test]
	fn dangling_key_is_dropped() {
		let bytes = b"\x00a\x00b\x00c";
		let frame = KeyValueFrame::parse(&mut &bytes[..], Id3v2Version::V4, ParsingMode::Strict)
			.unwrap()
			.unwrap();

		assert_eq!(frame.key_value_pairs.len(), 1);
	}

	#[test_log::test]
	fn utf16_pairs() {
		let frame = KeyValueFrame::new(
			TextEncoding::UTF16,
			vec![(String::from("guitar"), String::from("\u{00c9}mile"))],
		);

		let bytes = frame.as_bytes(Id3v2Version::V4, true).unwrap();
		let parsed = KeyValueFrame::parse(&mut &bytes[..], Id3v2Version::V4, ParsingMode::Strict)
			.unwrap()
			.unwrap();

		assert_eq!(parsed, frame);
	}
}
