use crate::error::Result;

use std::io::Read;

use byteorder::ReadBytesExt;

/// An ID3v2.4 signature frame (`SIGN`)
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SignatureFrame {
	/// The group symbol the signature applies to, see [`RegistrationFrame`](crate::items::RegistrationFrame)
	pub group_symbol: u8,
	/// The signature
	pub signature: Vec<u8>,
}

impl SignatureFrame {
	/// Create a new [`SignatureFrame`]
	pub fn new(group_symbol: u8, signature: Vec<u8>) -> Self {
		Self {
			group_symbol,
			signature,
		}
	}

	/// Read a [`SignatureFrame`]
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
		let Ok(group_symbol) = reader.read_u8() else {
			return Ok(None);
		};

		let mut signature = Vec::new();
		reader.read_to_end(&mut signature)?;

		Ok(Some(Self {
			group_symbol,
			signature,
		}))
	}

	/// Convert a [`SignatureFrame`] to a byte vec
	pub fn as_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(self.encoded_len());
		bytes.push(self.group_symbol);
		bytes.extend_from_slice(&self.signature);
		bytes
	}

	/// The length of [`SignatureFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		1 + self.signature.len()
	}
}

#[cfg(test)]
mod tests {
	use crate::items::SignatureFrame;

	#[test_log::test]
	fn sign_layout() {
		let bytes = [0x81, 0xDE, 0xAD, 0xBE, 0xEF];
		let frame = SignatureFrame::parse(&mut &bytes[..]).unwrap().unwrap();

		assert_eq!(frame, SignatureFrame::new(0x81, vec![0xDE, 0xAD, 0xBE, 0xEF]));
		assert_eq!(frame.as_bytes(), bytes);
	}
}
