use super::{decode_remainder, decode_terminated, encode_terminated, read_encoding};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::util::text::TextEncoding;

use std::io::Read;

// Generic struct for a text frame that has a language
//
// This exists to deduplicate some code between `CommentFrame` and `UnsynchronizedTextFrame`
struct LanguageFrame {
	pub encoding: TextEncoding,
	pub language: [u8; 3],
	pub description: String,
	pub content: String,
}

impl LanguageFrame {
	fn parse<R>(
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

		let description = decode_terminated(reader, encoding)?;
		let content = decode_remainder(reader, encoding, description.bom)?;

		Ok(Some(Self {
			encoding,
			language,
			description: description.content,
			content,
		}))
	}

	fn create_bytes(
		encoding: TextEncoding,
		language: [u8; 3],
		description: &str,
		content: &str,
		version: Id3v2Version,
		lossy: bool,
	) -> Result<Vec<u8>> {
		let encoding = encoding.for_version(version);

		let mut bytes = vec![encoding as u8];
		bytes.extend(language);
		bytes.extend(encode_terminated(description, encoding, lossy)?);
		bytes.extend(encode_terminated(content, encoding, lossy)?);

		Ok(bytes)
	}

	fn encoded_len(
		encoding: TextEncoding,
		description: &str,
		content: &str,
		version: Id3v2Version,
	) -> usize {
		let encoding = encoding.for_version(version);
		4 + encoding.encoded_len(description, true) + encoding.encoded_len(content, true)
	}
}

macro_rules! language_frame {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[cfg_attr(feature = "serde", derive(serde::Serialize))]
		#[derive(Clone, Debug, PartialEq, Eq, Hash)]
		pub struct $name {
			/// The encoding of the description and content
			pub encoding: TextEncoding,
			/// ISO-639-2 language code (3 bytes)
			pub language: [u8; 3],
			/// Unique content description
			pub description: String,
			/// The actual frame content
			pub content: String,
		}

		impl From<LanguageFrame> for $name {
			fn from(value: LanguageFrame) -> Self {
				Self {
					encoding: value.encoding,
					language: value.language,
					description: value.description,
					content: value.content,
				}
			}
		}

		impl $name {
			#[doc = concat!("Create a new [`", stringify!($name), "`]")]
			pub fn new(
				encoding: TextEncoding,
				language: [u8; 3],
				description: impl Into<String>,
				content: impl Into<String>,
			) -> Self {
				Self {
					encoding,
					language,
					description: description.into(),
					content: content.into(),
				}
			}

			#[doc = concat!("Read a [`", stringify!($name), "`] from a slice")]
			///
			/// NOTE: This expects the frame header to have already been skipped
			///
			/// # Errors
			///
			/// * Unable to decode the text
			/// * The body ends before the language
			pub fn parse<R>(
				reader: &mut R,
				version: Id3v2Version,
				parse_mode: ParsingMode,
			) -> Result<Option<Self>>
			where
				R: Read,
			{
				Ok(LanguageFrame::parse(reader, version, parse_mode)?.map(Into::into))
			}

			#[doc = concat!("Convert a [`", stringify!($name), "`] to a byte vec")]
			///
			/// NOTE: This does not include a frame header
			///
			/// # Errors
			///
			/// `lossy` is not set, and the text can't be represented in the encoding
			pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
				LanguageFrame::create_bytes(
					self.encoding,
					self.language,
					&self.description,
					&self.content,
					version,
					lossy,
				)
			}

			#[doc = concat!("The length of [`", stringify!($name), "::as_bytes`]")]
			pub fn encoded_len(&self, version: Id3v2Version) -> usize {
				LanguageFrame::encoded_len(self.encoding, &self.description, &self.content, version)
			}
		}
	};
}

language_frame! {
	/// An ID3v2 comment frame
	///
	/// Similar to `TXXX` and `WXXX` frames, comments are told apart by their descriptions.
	CommentFrame
}

language_frame! {
	/// An ID3v2 unsynchronized lyrics/text frame
	///
	/// Similar to `TXXX` and `WXXX` frames, USLT frames are told apart by their descriptions.
	UnsynchronizedTextFrame
}
