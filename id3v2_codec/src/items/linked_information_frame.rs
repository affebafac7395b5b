use super::{decode_latin1_terminated, encode_terminated};
use crate::error::Result;
use crate::util::text::TextEncoding;

use std::io::Read;

/// An ID3v2 linked information frame (`LINK`, `LNK` in ID3v2.2)
///
/// Points to a frame stored in another file. On disk, the URL is preceded by the identifier
/// of the linked frame, which is kept as the start of `url`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LinkedInformationFrame {
	/// The linked frame's identifier, followed by the URL of the file holding it
	pub url: String,
	/// Additional data identifying the linked frame
	pub data: Vec<u8>,
}

impl LinkedInformationFrame {
	/// Create a new [`LinkedInformationFrame`]
	pub fn new(url: impl Into<String>, data: Vec<u8>) -> Self {
		Self {
			url: url.into(),
			data,
		}
	}

	/// Read a [`LinkedInformationFrame`]
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
		let url = decode_latin1_terminated(reader)?;

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		if url.is_empty() && data.is_empty() {
			return Ok(None);
		}

		Ok(Some(Self { url, data }))
	}

	/// Convert a [`LinkedInformationFrame`] to a byte vec
	///
	/// # Errors
	///
	/// `lossy` is not set, and the URL is not ISO-8859-1
	pub fn as_bytes(&self, lossy: bool) -> Result<Vec<u8>> {
		let mut bytes = Vec::with_capacity(self.encoded_len());
		bytes.extend(encode_terminated(&self.url, TextEncoding::Latin1, lossy)?);
		bytes.extend_from_slice(&self.data);

		Ok(bytes)
	}

	/// The length of [`LinkedInformationFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		TextEncoding::Latin1.encoded_len(&self.url, true) + self.data.len()
	}
}

#[cfg(test)]
mod tests {
	use crate::items::LinkedInformationFrame;

	#[test_log::test]
	fn link_layout() {
		let bytes = b"TIT2http://example.com/a.mp3\0track 1";

		let frame = LinkedInformationFrame::parse(&mut &bytes[..])
			.unwrap()
			.unwrap();
		assert_eq!(frame.url, "TIT2http://example.com/a.mp3");
		assert_eq!(frame.data, b"track 1");

		assert_eq!(frame.as_bytes(false).unwrap(), bytes);
		assert_eq!(frame.encoded_len(), bytes.len());
	}

	#[test_log::test]
	fn unterminated_url() {
		let frame = LinkedInformationFrame::parse(&mut &b"LNKhttp://example.com"[..])
			.unwrap()
			.unwrap();
		assert_eq!(frame.url, "LNKhttp://example.com");
		assert!(frame.data.is_empty());

		assert!(
			LinkedInformationFrame::parse(&mut &[][..])
				.unwrap()
				.is_none()
		);
	}

	#[test_log::test]
	fn non_latin1_url() {
		let frame = LinkedInformationFrame::new("TIT2http://example.com/曲", Vec::new());
		assert!(frame.as_bytes(false).is_err());
		assert!(frame.as_bytes(true).is_ok());
	}
}
