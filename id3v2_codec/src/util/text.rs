//! The text encoding engine
//!
//! ID3v2 strings come in four encodings, selected by a single byte at the start of most
//! frame bodies. Everything in the crate stores decoded text as [`String`], this module
//! handles getting in and out of the wire representations, as well as the byte level
//! operations ([`detect_encoding`], [`convert`], [`encoded_str_len`]) that work without
//! going through a frame.

use crate::error::{CodecError, ErrorKind, Result};
use crate::header::Id3v2Version;
use crate::macros::err;

use std::io::Read;

use byteorder::ReadBytesExt;

const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Errors that can occur while encoding text
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TextEncodingError {
	encoding: TextEncoding,
	valid_up_to: usize,
}

impl TextEncodingError {
	/// The target text encoding
	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// The byte index in the provided string up to which the encoding was valid
	pub fn valid_up_to(&self) -> usize {
		self.valid_up_to
	}
}

impl core::fmt::Display for TextEncodingError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(
			f,
			"invalid {} sequence from index {}",
			self.encoding.name(),
			self.valid_up_to
		)
	}
}

impl core::error::Error for TextEncodingError {}

/// The text encoding for use in ID3v2 frames
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash, Default)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	#[default]
	Latin1 = 0,
	/// UTF-16 with a byte order mark, written little endian
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::TextEncoding;
	///
	/// assert_eq!(TextEncoding::from_u8(1), Some(TextEncoding::UTF16));
	/// assert_eq!(TextEncoding::from_u8(4), None);
	/// ```
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// A human readable name for the encoding
	pub fn name(self) -> &'static str {
		match self {
			TextEncoding::Latin1 => "Latin-1",
			TextEncoding::UTF16 => "UTF-16",
			TextEncoding::UTF8 => "UTF-8",
			TextEncoding::UTF16BE => "UTF-16 BE",
		}
	}

	/// The width of a null terminator in this encoding
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::TextEncoding;
	///
	/// assert_eq!(TextEncoding::Latin1.terminator_len(), 1);
	/// assert_eq!(TextEncoding::UTF16BE.terminator_len(), 2);
	/// ```
	pub fn terminator_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}

	/// Whether every character of `text` can be represented in this encoding
	pub fn verify(self, text: &str) -> bool {
		match self {
			Self::Latin1 => Self::verify_latin1(text),
			_ => true,
		}
	}

	pub(crate) fn verify_latin1(text: &str) -> bool {
		text.chars().all(|c| c as u32 <= 255)
	}

	/// The number of bytes `text` occupies once encoded
	///
	/// This includes the byte order mark for [`TextEncoding::UTF16`], and the terminator
	/// if `terminated` is set. Characters that aren't representable in ISO-8859-1 are
	/// counted as their single byte replacement.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::TextEncoding;
	///
	/// // BOM + 4 code units + terminator
	/// assert_eq!(TextEncoding::UTF16.encoded_len("Café", true), 12);
	/// assert_eq!(TextEncoding::UTF8.encoded_len("Café", false), 5);
	/// ```
	pub fn encoded_len(self, text: &str, terminated: bool) -> usize {
		let terminator = if terminated {
			self.terminator_len()
		} else {
			0
		};

		let content = match self {
			Self::Latin1 => text.chars().count(),
			Self::UTF8 => text.len(),
			Self::UTF16 => 2 + text.encode_utf16().count() * 2,
			Self::UTF16BE => text.encode_utf16().count() * 2,
		};

		content + terminator
	}

	/// The encoding actually used when writing to `version`
	///
	/// ID3v2.4 introduced two new text encodings. When writing ID3v2.2 and ID3v2.3, we just
	/// substitute with UTF-16.
	pub fn for_version(self, version: Id3v2Version) -> Self {
		match (self, version) {
			(Self::UTF8 | Self::UTF16BE, Id3v2Version::V2 | Id3v2Version::V3) => Self::UTF16,
			_ => self,
		}
	}

	/// Encode `text`
	///
	/// # Errors
	///
	/// `lossy` is not set, and `text` can't be represented in this encoding
	pub fn encode(
		self,
		text: &str,
		terminated: bool,
		lossy: bool,
	) -> std::result::Result<Vec<u8>, TextEncodingError> {
		match self {
			TextEncoding::Latin1 => {
				let mut out = Vec::with_capacity(self.encoded_len(text, terminated));
				for byte in latin1_encode(text, lossy) {
					out.push(byte?);
				}

				if terminated {
					out.push(0)
				}

				Ok(out)
			},
			TextEncoding::UTF16 => Ok(utf16_encode(text, u16::to_le_bytes, true, terminated)),
			TextEncoding::UTF16BE => Ok(utf16_encode(text, u16::to_be_bytes, false, terminated)),
			TextEncoding::UTF8 => {
				let mut out = Vec::with_capacity(self.encoded_len(text, terminated));
				out.extend_from_slice(text.as_bytes());

				if terminated {
					out.push(0);
				}

				Ok(out)
			},
		}
	}
}

/// Guess the encoding of an untagged buffer
///
/// The checks are made in a fixed order:
///
/// 1. ISO-8859-1, if no byte is `0xFF`
/// 2. UTF-16, if the buffer starts with a byte order mark
/// 3. UTF-16 BE, if every 2-byte unit is valid (surrogate pairs included)
/// 4. UTF-8, if every multi-byte sequence is valid
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::TextEncoding;
/// use id3v2_codec::util::text::detect_encoding;
///
/// assert_eq!(detect_encoding(b"Test"), Some(TextEncoding::Latin1));
/// assert_eq!(detect_encoding(&[0xFF, 0xFE, b'T', 0]), Some(TextEncoding::UTF16));
/// assert_eq!(detect_encoding(&[0xFF]), None);
/// ```
pub fn detect_encoding(bytes: &[u8]) -> Option<TextEncoding> {
	if bytes.iter().all(|b| *b < 0xFF) {
		return Some(TextEncoding::Latin1);
	}

	if bytes.starts_with(&UTF16_LE_BOM) || bytes.starts_with(&UTF16_BE_BOM) {
		return Some(TextEncoding::UTF16);
	}

	if is_valid_utf16(bytes, u16::from_be_bytes) {
		return Some(TextEncoding::UTF16BE);
	}

	if std::str::from_utf8(bytes).is_ok() {
		return Some(TextEncoding::UTF8);
	}

	None
}

/// The length of the string at the start of `bytes`, excluding its terminator
///
/// ISO-8859-1 and UTF-8 strings end at the first zero byte, UTF-16 strings end at the first
/// zero 2-byte unit, read in 2-byte strides. Without a terminator, the whole buffer (rounded
/// down to whole units) is the string.
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::TextEncoding;
/// use id3v2_codec::util::text::encoded_str_len;
///
/// assert_eq!(encoded_str_len(b"abc\0def", TextEncoding::Latin1), 3);
/// // The zero byte at index 1 isn't on a unit boundary pair
/// assert_eq!(encoded_str_len(&[0x00, b'a', 0x00, 0x00], TextEncoding::UTF16BE), 2);
/// ```
pub fn encoded_str_len(bytes: &[u8], encoding: TextEncoding) -> usize {
	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => {
			bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len())
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE => bytes
			.chunks_exact(2)
			.position(|unit| unit == [0, 0])
			.map_or(bytes.len() & !1, |units| units * 2),
	}
}

/// Convert an encoded string from one encoding to another
///
/// Only the string up to the first terminator of `from` is converted, and the output is
/// unterminated (though room for `to`'s terminator is always reserved). Converting between
/// the two UTF-16 flavors goes through UTF-8, rather than flipping bytes in place, so
/// surrogate pairs are validated along the way.
///
/// This returns `None` if `bytes` isn't valid `from` text, or if the text can't be represented
/// in `to`.
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::TextEncoding;
/// use id3v2_codec::util::text::convert;
///
/// let utf16 = convert(b"Caf\xE9", TextEncoding::Latin1, TextEncoding::UTF16).unwrap();
/// assert_eq!(utf16, [0xFF, 0xFE, b'C', 0, b'a', 0, b'f', 0, 0xE9, 0]);
///
/// let latin1 = convert(&utf16, TextEncoding::UTF16, TextEncoding::Latin1).unwrap();
/// assert_eq!(latin1, b"Caf\xE9");
/// ```
pub fn convert(bytes: &[u8], from: TextEncoding, to: TextEncoding) -> Option<Vec<u8>> {
	let content = &bytes[..encoded_str_len(bytes, from)];
	let text = decode_strict(content, from)?;

	let mut out = Vec::with_capacity(to.encoded_len(&text, true));
	let encoded = to.encode(&text, false, false).ok()?;
	out.extend_from_slice(&encoded);

	Some(out)
}

/// [`convert`], with the source encoding found through [`detect_encoding`]
pub fn convert_detected(bytes: &[u8], to: TextEncoding) -> Option<Vec<u8>> {
	let from = detect_encoding(bytes)?;
	convert(bytes, from, to)
}

// Unlike `decode_text`, this doesn't tolerate missing byte order marks or stray BOMs
fn decode_strict(bytes: &[u8], encoding: TextEncoding) -> Option<String> {
	match encoding {
		TextEncoding::Latin1 => Some(bytes.iter().map(|c| char::from(*c)).collect()),
		TextEncoding::UTF8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
		TextEncoding::UTF16BE => utf16_from_bytes(bytes, u16::from_be_bytes),
		TextEncoding::UTF16 => match bytes {
			[0xFF, 0xFE, rest @ ..] => utf16_from_bytes(rest, u16::from_le_bytes),
			[0xFE, 0xFF, rest @ ..] => utf16_from_bytes(rest, u16::from_be_bytes),
			_ => None,
		},
	}
}

fn utf16_from_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Option<String> {
	if bytes.len() % 2 != 0 {
		return None;
	}

	let units = bytes
		.chunks_exact(2)
		.map(|unit| endianness([unit[0], unit[1]]));

	char::decode_utf16(units).collect::<std::result::Result<String, _>>().ok()
}

fn is_valid_utf16(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> bool {
	utf16_from_bytes(bytes, endianness).is_some()
}

#[derive(Eq, PartialEq, Debug, Default)]
pub(crate) struct DecodeTextResult {
	pub(crate) content: String,
	pub(crate) bytes_read: usize,
	pub(crate) bom: [u8; 2],
}

impl DecodeTextResult {
	pub(crate) fn text_or_none(self) -> Option<String> {
		if self.content.is_empty() {
			return None;
		}

		Some(self.content)
	}
}

/// Specify how to decode the provided text
///
/// By default, this will:
///
/// * Use [`TextEncoding::UTF8`] as the encoding
/// * Not expect the text to be null terminated
/// * Have no byte order mark
#[derive(Copy, Clone, Debug)]
pub(crate) struct TextDecodeOptions {
	pub encoding: TextEncoding,
	pub terminated: bool,
	pub bom: [u8; 2],
}

impl TextDecodeOptions {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn encoding(mut self, encoding: TextEncoding) -> Self {
		self.encoding = encoding;
		self
	}

	pub(crate) fn terminated(mut self, terminated: bool) -> Self {
		self.terminated = terminated;
		self
	}

	pub(crate) fn bom(mut self, bom: [u8; 2]) -> Self {
		self.bom = bom;
		self
	}
}

impl Default for TextDecodeOptions {
	fn default() -> Self {
		Self {
			encoding: TextEncoding::UTF8,
			terminated: false,
			bom: [0, 0],
		}
	}
}

pub(crate) fn decode_text<R>(reader: &mut R, options: TextDecodeOptions) -> Result<DecodeTextResult>
where
	R: Read,
{
	let raw_bytes;
	let bytes_read;

	if options.terminated {
		let (bytes, terminator_len) = read_to_terminator(reader, options.encoding);

		if bytes.is_empty() {
			return Ok(DecodeTextResult {
				bytes_read: terminator_len,
				..DecodeTextResult::default()
			});
		}

		bytes_read = bytes.len() + terminator_len;
		raw_bytes = bytes;
	} else {
		let mut bytes = Vec::new();
		reader.read_to_end(&mut bytes)?;

		if bytes.is_empty() {
			return Ok(DecodeTextResult::default());
		}

		bytes_read = bytes.len();
		raw_bytes = bytes;
	}

	let mut bom = [0, 0];
	let read_string = match options.encoding {
		TextEncoding::Latin1 => latin1_decode(&raw_bytes),
		TextEncoding::UTF16 => {
			// A lone BOM-less string may still follow one with a BOM (see `bom`)
			if raw_bytes.len() < 2 {
				err!(TextDecode("UTF-16 string has an invalid length (< 2)"));
			}

			if raw_bytes.len() % 2 != 0 {
				err!(TextDecode("UTF-16 string has an odd length"));
			}

			match [raw_bytes[0], raw_bytes[1]] {
				UTF16_BE_BOM => {
					bom = UTF16_BE_BOM;
					utf16_decode_bytes(&raw_bytes[2..], u16::from_be_bytes)?
				},
				UTF16_LE_BOM => {
					bom = UTF16_LE_BOM;
					utf16_decode_bytes(&raw_bytes[2..], u16::from_le_bytes)?
				},
				_ => match options.bom {
					UTF16_BE_BOM => utf16_decode_bytes(&raw_bytes, u16::from_be_bytes)?,
					UTF16_LE_BOM => utf16_decode_bytes(&raw_bytes, u16::from_le_bytes)?,
					_ => err!(TextDecode("UTF-16 string has an invalid byte order mark")),
				},
			}
		},
		TextEncoding::UTF16BE => utf16_decode_bytes(raw_bytes.as_slice(), u16::from_be_bytes)?,
		TextEncoding::UTF8 => utf8_decode(raw_bytes)
			.map_err(|_| CodecError::new(ErrorKind::TextDecode("Expected a UTF-8 string")))?,
	};

	Ok(DecodeTextResult {
		content: read_string,
		bytes_read,
		bom,
	})
}

pub(crate) fn read_to_terminator<R>(reader: &mut R, encoding: TextEncoding) -> (Vec<u8>, usize)
where
	R: Read,
{
	let mut text_bytes = Vec::new();
	let mut terminator_len = 0;

	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => {
			while let Ok(byte) = reader.read_u8() {
				if byte == 0 {
					terminator_len = 1;
					break;
				}

				text_bytes.push(byte)
			}
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE => {
			while let (Ok(b1), Ok(b2)) = (reader.read_u8(), reader.read_u8()) {
				if b1 == 0 && b2 == 0 {
					terminator_len = 2;
					break;
				}

				text_bytes.push(b1);
				text_bytes.push(b2)
			}
		},
	}

	(text_bytes, terminator_len)
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let mut text = bytes.iter().map(|c| char::from(*c)).collect::<String>();
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn latin1_encode(
	s: &str,
	lossy: bool,
) -> impl Iterator<Item = std::result::Result<u8, TextEncodingError>> {
	s.chars().enumerate().map(move |(index, c)| {
		if (c as u32) <= 255 {
			Ok(c as u8)
		} else if lossy {
			Ok(b'?')
		} else {
			Err(TextEncodingError {
				encoding: TextEncoding::Latin1,
				valid_up_to: index, // All characters up to this point are single-byte
			})
		}
	})
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	String::from_utf8(bytes)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(Into::into)
}

pub(crate) fn utf16_decode(words: &[u16]) -> Result<String> {
	String::from_utf16(words)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(|_| CodecError::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))
}

pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	let unverified: Vec<u16> = bytes
		.chunks_exact(2)
		// In ID3v2, it is possible to have multiple UTF-16 strings separated by null.
		// This also makes it possible for us to encounter multiple BOMs in a single string.
		// We must filter them out.
		.filter_map(|c| match c {
			[0xFF, 0xFE] | [0xFE, 0xFF] => None,
			_ => Some(endianness([c[0], c[1]])),
		})
		.collect();

	utf16_decode(&unverified)
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}

fn utf16_encode(
	text: &str,
	endianness: fn(u16) -> [u8; 2],
	bom: bool,
	terminated: bool,
) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		encoded.extend_from_slice(&endianness(0xFEFF_u16));
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	if terminated {
		encoded.extend_from_slice(&[0, 0]);
	}

	encoded
}

#[cfg(test)]
mod tests {
	use crate::util::text::{
		TextDecodeOptions, TextEncoding, convert, convert_detected, detect_encoding,
		encoded_str_len,
	};
	use std::io::Cursor;

	const TEST_STRING: &str = "l\u{00f8}ft\u{00a5}";

	const ALL_ENCODINGS: [TextEncoding; 4] = [
		TextEncoding::Latin1,
		TextEncoding::UTF16,
		TextEncoding::UTF16BE,
		TextEncoding::UTF8,
	];

	#[test_log::test]
	fn text_decode() {
		// No BOM
		let utf16_decode = super::utf16_decode_bytes(
			&[
				0x00, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00,
			],
			u16::from_be_bytes,
		)
		.unwrap();

		assert_eq!(utf16_decode, TEST_STRING.to_string());

		// BOM test
		let be_utf16_decode = super::decode_text(
			&mut Cursor::new(&[
				0xFE, 0xFF, 0x00, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00,
			]),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		)
		.unwrap();
		let le_utf16_decode = super::decode_text(
			&mut Cursor::new(&[
				0xFF, 0xFE, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00, 0x00,
			]),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		)
		.unwrap();

		assert_eq!(be_utf16_decode.content, le_utf16_decode.content);
		assert_eq!(be_utf16_decode.bytes_read, le_utf16_decode.bytes_read);
		assert_eq!(be_utf16_decode.content, TEST_STRING.to_string());
		assert_eq!(le_utf16_decode.bom, [0xFF, 0xFE]);

		let utf8_decode = super::decode_text(
			&mut TEST_STRING.as_bytes(),
			TextDecodeOptions::new().encoding(TextEncoding::UTF8),
		)
		.unwrap();

		let empty_text_fragment = super::decode_text(
			&mut Cursor::new(&[
				0x00, 0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
				0x00, 0x02,
			]),
			TextDecodeOptions::new()
				.encoding(TextEncoding::UTF8)
				.terminated(true),
		)
		.unwrap();
		assert_eq!(empty_text_fragment.content, "");
		assert_eq!(empty_text_fragment.bytes_read, 1);

		assert_eq!(utf8_decode.content, TEST_STRING.to_string());
	}

	#[test_log::test]
	fn bomless_utf16_uses_provided_bom() {
		let decoded = super::decode_text(
			&mut Cursor::new(&[b'h', 0x00, b'i', 0x00, 0x00, 0x00]),
			TextDecodeOptions::new()
				.encoding(TextEncoding::UTF16)
				.terminated(true)
				.bom([0xFF, 0xFE]),
		)
		.unwrap();

		assert_eq!(decoded.content, "hi");
		assert_eq!(decoded.bytes_read, 6);

		let no_bom = super::decode_text(
			&mut Cursor::new(&[b'h', 0x00]),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		);
		assert!(no_bom.is_err());
	}

	#[test_log::test]
	fn text_encode() {
		let be_utf16_encode = TextEncoding::UTF16BE
			.encode(TEST_STRING, false, false)
			.unwrap();
		let le_utf16_encode = TextEncoding::UTF16.encode(TEST_STRING, false, false).unwrap();

		assert_ne!(be_utf16_encode.as_slice(), le_utf16_encode.as_slice());
		// TextEncoding::UTF16BE has no BOM
		assert_eq!(
			be_utf16_encode.as_slice(),
			&[0x00, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5]
		);
		assert_eq!(
			le_utf16_encode.as_slice(),
			&[
				0xFF, 0xFE, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00
			]
		);

		let utf8_encode = TextEncoding::UTF8
			.encode(TEST_STRING, false, false)
			.unwrap();

		assert_eq!(utf8_encode.as_slice(), TEST_STRING.as_bytes());

		let latin1_terminated = TextEncoding::Latin1.encode("abc", true, false).unwrap();
		assert_eq!(latin1_terminated.as_slice(), b"abc\0");
	}

	#[test_log::test]
	fn latin1_unrepresentable() {
		let err = TextEncoding::Latin1.encode("ab\u{3042}", false, false).unwrap_err();
		assert_eq!(err.valid_up_to(), 2);
		assert_eq!(err.encoding(), TextEncoding::Latin1);

		let lossy = TextEncoding::Latin1.encode("ab\u{3042}", false, true).unwrap();
		assert_eq!(lossy.as_slice(), b"ab?");
	}

	#[test_log::test]
	fn encoded_len_matches_encode() {
		for encoding in ALL_ENCODINGS {
			for text in ["", "Test", "Caf\u{e9}", TEST_STRING] {
				for terminated in [true, false] {
					let encoded = encoding.encode(text, terminated, false).unwrap();
					assert_eq!(
						encoding.encoded_len(text, terminated),
						encoded.len(),
						"{encoding:?} {text:?} {terminated}"
					);
				}
			}
		}

		// Surrogate pair
		assert_eq!(TextEncoding::UTF16BE.encoded_len("\u{1F600}", false), 4);
	}

	#[test_log::test]
	fn detection_order() {
		assert_eq!(detect_encoding(b""), Some(TextEncoding::Latin1));
		assert_eq!(detect_encoding(b"Caf\xE9"), Some(TextEncoding::Latin1));
		assert_eq!(
			detect_encoding(&[0xFE, 0xFF, 0x00, 0x41]),
			Some(TextEncoding::UTF16)
		);
		// U+00FF, no BOM
		assert_eq!(detect_encoding(&[0x00, 0xFF]), Some(TextEncoding::UTF16BE));
		// Lone high surrogate
		assert_eq!(detect_encoding(&[0xD8, 0xFF]), None);
		assert_eq!(detect_encoding(&[0xFF]), None);
	}

	#[test_log::test]
	fn terminated_lengths() {
		assert_eq!(encoded_str_len(b"abc", TextEncoding::UTF8), 3);
		assert_eq!(encoded_str_len(b"\0abc", TextEncoding::UTF8), 0);
		assert_eq!(
			encoded_str_len(&[0x41, 0x00, 0x00, 0x42, 0x00, 0x00], TextEncoding::UTF16),
			4
		);
		assert_eq!(encoded_str_len(&[0x41, 0x00, 0x42], TextEncoding::UTF16), 2);
	}

	#[test_log::test]
	fn conversion_round_trip() {
		// Representable in every encoding
		for text in ["Test", "Caf\u{e9}", TEST_STRING] {
			for from in ALL_ENCODINGS {
				let original = from.encode(text, false, false).unwrap();
				for to in ALL_ENCODINGS {
					let there = convert(&original, from, to).unwrap();
					let back = convert(&there, to, from).unwrap();
					assert_eq!(back, original, "{from:?} -> {to:?} -> {from:?}");
				}
			}
		}
	}

	#[test_log::test]
	fn conversion_failures() {
		// Not representable in ISO-8859-1
		let utf8 = TextEncoding::UTF8.encode("\u{3042}", false, false).unwrap();
		assert!(convert(&utf8, TextEncoding::UTF8, TextEncoding::Latin1).is_none());

		// Missing BOM
		assert!(convert(&[0x41, 0x00], TextEncoding::UTF16, TextEncoding::UTF8).is_none());

		// Not valid UTF-8
		assert!(convert(&[0xC3], TextEncoding::UTF8, TextEncoding::Latin1).is_none());

		// Matches nothing
		assert!(convert_detected(&[0xFF], TextEncoding::UTF8).is_none());
	}

	#[test_log::test]
	fn conversion_stops_at_terminator() {
		let converted = convert(b"ab\0cd", TextEncoding::Latin1, TextEncoding::UTF16BE).unwrap();
		assert_eq!(converted, [0x00, b'a', 0x00, b'b']);
		assert!(converted.capacity() >= 6);
	}
}
