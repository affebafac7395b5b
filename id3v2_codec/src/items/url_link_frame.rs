use super::{decode_remainder, decode_terminated, encode_terminated, read_encoding};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::util::text::TextEncoding;

use std::io::Read;

/// An ID3v2 URL frame
///
/// This is used by every `W***` frame. The URL itself is always ISO-8859-1, the
/// [`encoding`](UrlLinkFrame::encoding) only applies to the description of user defined URL
/// frames (`WXXX`, and `WXX` in ID3v2.2), and isn't written otherwise.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UrlLinkFrame {
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The description of a user defined URL frame
	pub description: Option<String>,
	/// The URL
	pub url: String,
}

impl UrlLinkFrame {
	/// Create a new [`UrlLinkFrame`]
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			encoding: TextEncoding::Latin1,
			description: None,
			url: url.into(),
		}
	}

	/// Create a new user defined [`UrlLinkFrame`]
	pub fn new_user_defined(
		encoding: TextEncoding,
		description: impl Into<String>,
		url: impl Into<String>,
	) -> Self {
		Self {
			encoding,
			description: Some(description.into()),
			url: url.into(),
		}
	}

	/// Read a [`UrlLinkFrame`] from a slice
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
		let mut encoding = TextEncoding::Latin1;
		let mut description = None;

		if user_defined {
			let Some(e) = read_encoding(reader, version, parse_mode)? else {
				return Ok(None);
			};

			encoding = e;
			description = Some(decode_terminated(reader, encoding)?.content);
		}

		let url = decode_remainder(reader, TextEncoding::Latin1, [0; 2])?;
		if description.is_none() && url.is_empty() {
			return Ok(None);
		}

		Ok(Some(Self {
			encoding,
			description,
			url,
		}))
	}

	/// Convert a [`UrlLinkFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// `lossy` is not set, and the text can't be represented in its encoding
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let mut content = Vec::with_capacity(self.encoded_len(version));

		if let Some(description) = &self.description {
			let encoding = self.encoding.for_version(version);

			content.push(encoding as u8);
			content.extend(encode_terminated(description, encoding, lossy)?);
		}

		content.extend(encode_terminated(&self.url, TextEncoding::Latin1, lossy)?);
		Ok(content)
	}

	/// The length of [`UrlLinkFrame::as_bytes`]
	pub fn encoded_len(&self, version: Id3v2Version) -> usize {
		let description = self.description.as_deref().map_or(0, |d| {
			1 + self.encoding.for_version(version).encoded_len(d, true)
		});

		description + TextEncoding::Latin1.encoded_len(&self.url, true)
	}
}

#[cfg(test)]
mod tests {
	use crate::config::ParsingMode;
	use crate::header::Id3v2Version;
	use crate::items::UrlLinkFrame;
	use crate::util::text::TextEncoding;

	#[test_log::test]
	fn plain_url() {
		let bytes = b"https://example.com";
		let frame =
			UrlLinkFrame::parse(&mut &bytes[..], false, Id3v2Version::V3, ParsingMode::Strict)
				.unwrap()
				.unwrap();

		assert_eq!(frame.url, "https://example.com");
		assert_eq!(frame.description, None);

		let written = frame.as_bytes(Id3v2Version::V3, true).unwrap();
		assert_eq!(&written[..bytes.len()], bytes);
		assert_eq!(written.last(), Some(&0));
		assert_eq!(frame.encoded_len(Id3v2Version::V3), written.len());
	}

	#[test_log::test]
	fn user_defined_url() {
		let bytes = [
			0x01, 0xFF, 0xFE, b'd', 0x00, 0x00, 0x00, b'h', b't', b't', b'p', 0x00,
		];
		let frame =
			UrlLinkFrame::parse(&mut &bytes[..], true, Id3v2Version::V4, ParsingMode::Strict)
				.unwrap()
				.unwrap();

		assert_eq!(
			frame,
			UrlLinkFrame::new_user_defined(TextEncoding::UTF16, "d", "http")
		);
		assert_eq!(frame.as_bytes(Id3v2Version::V4, true).unwrap(), bytes);
		assert_eq!(frame.encoded_len(Id3v2Version::V4), bytes.len());
	}

	#[test_log::test]
	fn empty() {
		assert!(
			UrlLinkFrame::parse(&mut &[][..], false, Id3v2Version::V4, ParsingMode::Strict)
				.unwrap()
				.is_none()
		);
	}
}
