use super::{encode_terminated, read_encoding};
use crate::config::ParsingMode;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::header::Id3v2Version;
use crate::macros::id3v2_err;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

/// The unit used for timestamps
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, PartialEq, Debug, Eq, Hash)]
pub enum TimestampFormat {
	/// The unit is MPEG frames
	MPEG,
	/// The unit is milliseconds
	MS,
	/// A unit outside of the ID3v2 standard, kept as-is
	Undefined(u8),
}

impl TimestampFormat {
	/// Get a `TimestampFormat` from a u8
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::items::TimestampFormat;
	///
	/// assert_eq!(TimestampFormat::from_u8(2), TimestampFormat::MS);
	/// assert_eq!(TimestampFormat::from_u8(0), TimestampFormat::Undefined(0));
	/// ```
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			1 => Self::MPEG,
			2 => Self::MS,
			_ => Self::Undefined(byte),
		}
	}

	/// Get the u8 value of a `TimestampFormat`
	pub fn as_u8(self) -> u8 {
		match self {
			Self::MPEG => 1,
			Self::MS => 2,
			Self::Undefined(byte) => byte,
		}
	}

	pub(crate) fn read<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let byte = reader.read_u8()?;

		let format = Self::from_u8(byte);
		if let Self::Undefined(byte) = format {
			log::debug!("Encountered an unknown timestamp format: {byte}");
		}

		Ok(format)
	}
}

/// The type of text stored in a [`SynchronizedTextFrame`]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, PartialEq, Debug, Eq, Hash)]
#[allow(missing_docs)]
pub enum SyncTextContentType {
	Other,
	Lyrics,
	TextTranscription,
	PartName,
	Events,
	Chord,
	Trivia,
	WebpageURL,
	ImageURL,
	Undefined(u8),
}

impl SyncTextContentType {
	/// Get a `SyncTextContentType` from a u8
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Lyrics,
			2 => Self::TextTranscription,
			3 => Self::PartName,
			4 => Self::Events,
			5 => Self::Chord,
			6 => Self::Trivia,
			7 => Self::WebpageURL,
			8 => Self::ImageURL,
			i => Self::Undefined(i),
		}
	}

	/// Get the `u8` representation of a `SyncTextContentType`
	pub fn as_u8(self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Lyrics => 1,
			Self::TextTranscription => 2,
			Self::PartName => 3,
			Self::Events => 4,
			Self::Chord => 5,
			Self::Trivia => 6,
			Self::WebpageURL => 7,
			Self::ImageURL => 8,
			Self::Undefined(i) => i,
		}
	}
}

/// Represents an ID3v2 synchronized text frame (`SYLT`, `SLT` in ID3v2.2)
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SynchronizedTextFrame {
	/// The text encoding (description/text)
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// The format of the timestamps
	pub timestamp_format: TimestampFormat,
	/// The type of content stored
	pub content_type: SyncTextContentType,
	/// Unique content description
	pub description: String,
	/// Collection of timestamps and text
	pub content: Vec<(u32, String)>,
}

impl SynchronizedTextFrame {
	/// Read a [`SynchronizedTextFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The body is too short for its fixed fields
	/// * This function will return [`BadSyncText`][Id3v2ErrorKind::BadSyncText] if at any
	///   point it's unable to parse the data
	pub fn parse(
		data: &[u8],
		version: Id3v2Version,
		parse_mode: ParsingMode,
	) -> Result<Option<Self>> {
		let reader = &mut &data[..];

		let Some(encoding) = read_encoding(reader, version, parse_mode)? else {
			return Ok(None);
		};

		if reader.len() < 5 {
			id3v2_err!(BadFrameLength);
		}

		let mut language = [0; 3];
		reader.read_exact(&mut language)?;

		let timestamp_format = TimestampFormat::read(reader)?;
		let content_type = SyncTextContentType::from_u8(reader.read_u8()?);

		let mut text_decode_options = TextDecodeOptions::new().encoding(encoding).terminated(true);

		let description = decode_text(reader, text_decode_options)
			.map_err(|_| Id3v2Error::new(Id3v2ErrorKind::BadSyncText))?;

		// It's possible for the description to be the only string with a BOM
		if encoding == TextEncoding::UTF16 {
			text_decode_options = text_decode_options.bom(description.bom);
		}

		let mut content = Vec::new();
		while !reader.is_empty() {
			let text = decode_text(reader, text_decode_options)
				.map_err(|_| Id3v2Error::new(Id3v2ErrorKind::BadSyncText))?;
			let time = reader
				.read_u32::<BigEndian>()
				.map_err(|_| Id3v2Error::new(Id3v2ErrorKind::BadSyncText))?;

			content.push((time, text.content));
		}

		Ok(Some(Self {
			encoding,
			language,
			timestamp_format,
			content_type,
			description: description.content,
			content,
		}))
	}

	/// Convert a [`SynchronizedTextFrame`] to an ID3v2 SYLT frame byte Vec
	///
	/// NOTE: This does not include the frame header
	///
	/// # Errors
	///
	/// * `lossy` is not set, and the content cannot be encoded in the specified [`TextEncoding`]
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);

		let mut data = Vec::with_capacity(self.encoded_len(version));
		data.push(encoding as u8);
		data.extend(self.language);
		data.write_u8(self.timestamp_format.as_u8())?;
		data.write_u8(self.content_type.as_u8())?;
		data.extend(encode_terminated(&self.description, encoding, lossy)?);

		for (time, text) in &self.content {
			data.extend(encode_terminated(text, encoding, lossy)?);
			data.write_u32::<BigEndian>(*time)?;
		}

		Ok(data)
	}

	/// The length of [`SynchronizedTextFrame::as_bytes`]
	pub fn encoded_len(&self, version: Id3v2Version) -> usize {
		let encoding = self.encoding.for_version(version);

		let content = self
			.content
			.iter()
			.map(|(_, text)| encoding.encoded_len(text, true) + 4)
			.sum::<usize>();

		6 + encoding.encoded_len(&self.description, true) + content
	}
}

#[cfg(test)]
mod tests {
	use crate::config::ParsingMode;
	use crate::header::Id3v2Version;
	use crate::items::{SyncTextContentType, SynchronizedTextFrame, TimestampFormat};
	use crate::util::text::TextEncoding;

	fn expected(encoding: TextEncoding) -> SynchronizedTextFrame {
		SynchronizedTextFrame {
			encoding,
			language: *b"eng",
			timestamp_format: TimestampFormat::MS,
			content_type: SyncTextContentType::Lyrics,
			description: String::from("Test Sync Text"),
			content: vec![
				(0, String::from("\nLofi")),
				(10000, String::from("\nIs")),
				(15000, String::from("\nReading")),
				(1_938_000, String::from("\nCorrectly")),
			],
		}
	}

	#[test_log::test]
	fn sylt_round_trip() {
		for encoding in [TextEncoding::Latin1, TextEncoding::UTF16, TextEncoding::UTF8] {
			let frame = expected(encoding);
			let bytes = frame.as_bytes(Id3v2Version::V4, false).unwrap();
			assert_eq!(frame.encoded_len(Id3v2Version::V4), bytes.len());

			let parsed = SynchronizedTextFrame::parse(&bytes, Id3v2Version::V4, ParsingMode::Strict)
				.unwrap()
				.unwrap();
			assert_eq!(parsed, frame);
		}
	}

	#[test_log::test]
	fn sylt_layout() {
		let frame = SynchronizedTextFrame {
			content: vec![(5, String::from("a"))],
			description: String::new(),
			..expected(TextEncoding::Latin1)
		};

		assert_eq!(
			frame.as_bytes(Id3v2Version::V3, true).unwrap(),
			[0x00, b'e', b'n', b'g', 0x02, 0x01, 0x00, b'a', 0x00, 0x00, 0x00, 0x00, 0x05]
		);
	}

	#[test_log::test]
	fn undefined_timestamp_format_is_kept() {
		let bytes = [0x00, b'e', b'n', b'g', 0x07, 0x01, 0x00];
		let frame = SynchronizedTextFrame::parse(&bytes, Id3v2Version::V4, ParsingMode::Strict)
			.unwrap()
			.unwrap();

		assert_eq!(frame.timestamp_format, TimestampFormat::Undefined(7));
		assert_eq!(
			frame.as_bytes(Id3v2Version::V4, false).unwrap(),
			[0x00, b'e', b'n', b'g', 0x07, 0x01, 0x00]
		);
	}

	#[test_log::test]
	fn truncated_timestamp() {
		let bytes = [0x00, b'e', b'n', b'g', 0x02, 0x01, 0x00, b'a', 0x00, 0x00, 0x01];
		let parsed =
			SynchronizedTextFrame::parse(&bytes, Id3v2Version::V4, ParsingMode::BestAttempt);
		assert!(parsed.is_err());
	}

	#[test_log::test]
	fn undefined_content_type_is_kept() {
		let bytes = [0x00, b'e', b'n', b'g', 0x02, 0x42, 0x00];
		let frame = SynchronizedTextFrame::parse(&bytes, Id3v2Version::V4, ParsingMode::Strict)
			.unwrap()
			.unwrap();

		assert_eq!(frame.content_type, SyncTextContentType::Undefined(0x42));
		assert!(frame.content.is_empty());
	}
}
