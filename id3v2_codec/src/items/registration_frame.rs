use super::{decode_latin1_terminated, encode_terminated};
use crate::error::Result;
use crate::macros::id3v2_err;
use crate::util::text::TextEncoding;

use std::io::Read;

use byteorder::ReadBytesExt;

/// An ID3v2 registration frame
///
/// This is shared by the encryption method registration (`ENCR`) and group identification
/// registration (`GRID`) frames. The `symbol` is the byte other frames carry in their
/// [`FrameFlags`](crate::frame::FrameFlags) to refer back to this registration.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RegistrationFrame {
	/// A URL containing an email address, or a link to a location where an email can be found,
	/// that belongs to the organisation responsible for the method or group
	pub owner: String,
	/// The method or group symbol
	pub symbol: u8,
	/// Method or group specific data
	pub data: Vec<u8>,
}

impl RegistrationFrame {
	/// Create a new [`RegistrationFrame`]
	pub fn new(owner: impl Into<String>, symbol: u8, data: Vec<u8>) -> Self {
		Self {
			owner: owner.into(),
			symbol,
			data,
		}
	}

	/// Read a [`RegistrationFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The symbol byte is missing
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let owner = decode_latin1_terminated(reader)?;
		let Ok(symbol) = reader.read_u8() else {
			if owner.is_empty() {
				return Ok(None);
			}

			id3v2_err!(BadFrameLength);
		};

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		Ok(Some(Self {
			owner,
			symbol,
			data,
		}))
	}

	/// Convert a [`RegistrationFrame`] to a byte vec
	///
	/// # Errors
	///
	/// `lossy` is not set, and the owner is not ISO-8859-1
	pub fn as_bytes(&self, lossy: bool) -> Result<Vec<u8>> {
		let mut content = Vec::with_capacity(self.encoded_len());
		content.extend(encode_terminated(&self.owner, TextEncoding::Latin1, lossy)?);
		content.push(self.symbol);
		content.extend_from_slice(&self.data);

		Ok(content)
	}

	/// The length of [`RegistrationFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		TextEncoding::Latin1.encoded_len(&self.owner, true) + 1 + self.data.len()
	}
}

#[cfg(test)]
mod tests {
	use crate::items::RegistrationFrame;

	#[test_log::test]
	fn grid_layout() {
		let bytes = b"http://example.com\0\x80\x01\x02";
		let frame = RegistrationFrame::parse(&mut &bytes[..]).unwrap().unwrap();

		assert_eq!(frame, RegistrationFrame::new("http://example.com", 0x80, vec![1, 2]));
		assert_eq!(frame.as_bytes(true).unwrap(), bytes);
		assert_eq!(frame.encoded_len(), bytes.len());
	}

	#[test_log::test]
	fn missing_symbol() {
		assert!(RegistrationFrame::parse(&mut &b"owner\0"[..]).is_err());
		assert!(RegistrationFrame::parse(&mut &b""[..]).unwrap().is_none());
	}
}
