use super::{decode_latin1_terminated, encode_terminated};
use crate::error::Result;
use crate::util::text::TextEncoding;

use std::io::Read;

/// An ID3v2 private frame (`PRIV`)
///
/// This frame is used to contain information from a software producer that
/// its program uses and does not fit into the other frames.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PrivateFrame {
	/// A URL containing an email address, or a link to a location where an email can be found,
	/// that belongs to the organisation responsible for the frame
	pub owner: String,
	/// Binary data
	#[cfg_attr(feature = "serde", serde(skip))]
	pub private_data: Vec<u8>,
}

impl PrivateFrame {
	/// Create a new [`PrivateFrame`]
	pub fn new(owner: impl Into<String>, private_data: Vec<u8>) -> Self {
		Self {
			owner: owner.into(),
			private_data,
		}
	}

	/// Read an [`PrivateFrame`]
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
		let owner = decode_latin1_terminated(reader)?;

		let mut private_data = Vec::new();
		reader.read_to_end(&mut private_data)?;

		if owner.is_empty() && private_data.is_empty() {
			return Ok(None);
		}

		Ok(Some(Self {
			owner,
			private_data,
		}))
	}

	/// Convert an [`PrivateFrame`] to a byte vec
	///
	/// # Errors
	///
	/// `lossy` is not set, and the owner is not ISO-8859-1
	pub fn as_bytes(&self, lossy: bool) -> Result<Vec<u8>> {
		let mut bytes = Vec::with_capacity(self.encoded_len());
		bytes.extend(encode_terminated(&self.owner, TextEncoding::Latin1, lossy)?);
		bytes.extend_from_slice(&self.private_data);

		Ok(bytes)
	}

	/// The length of [`PrivateFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		TextEncoding::Latin1.encoded_len(&self.owner, true) + self.private_data.len()
	}
}

#[cfg(test)]
mod tests {
	use crate::items::PrivateFrame;

	fn expected() -> PrivateFrame {
		PrivateFrame::new("foo@bar.com", String::from("some data").into_bytes())
	}

	#[test_log::test]
	fn priv_decode() {
		let cont = b"foo@bar.com\0some data";

		let parsed_priv = PrivateFrame::parse(&mut &cont[..]).unwrap().unwrap();

		assert_eq!(parsed_priv, expected());
	}

	#[test_log::test]
	fn priv_encode() {
		let encoded = expected().as_bytes(false).unwrap();

		assert_eq!(encoded, b"foo@bar.com\0some data");
		assert_eq!(expected().encoded_len(), encoded.len());
	}
}
