use super::{counter_len, decode_counter, encode_counter};
use crate::error::Result;

use std::io::Read;

/// An ID3v2 play counter frame (`PCNT`, `CNT` in ID3v2.2)
///
/// The counter is at least 32 bits wide on disk and grows a byte at a time as needed.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct PlayCounterFrame {
	/// The number of times the file has been played
	pub counter: u64,
}

impl PlayCounterFrame {
	/// Create a new [`PlayCounterFrame`]
	pub fn new(counter: u64) -> Self {
		Self { counter }
	}

	/// Read a [`PlayCounterFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// Counters wider than 64 bits are clamped to `u64::MAX`.
	///
	/// # Errors
	///
	/// * Failure to read from `reader`
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let mut content = Vec::new();
		reader.read_to_end(&mut content)?;

		if content.is_empty() {
			return Ok(None);
		}

		Ok(Some(Self {
			counter: decode_counter(&content),
		}))
	}

	/// Convert a [`PlayCounterFrame`] to a byte vec
	pub fn as_bytes(&self) -> Vec<u8> {
		encode_counter(self.counter)
	}

	/// The length of [`PlayCounterFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		counter_len(self.counter)
	}
}

#[cfg(test)]
mod tests {
	use crate::items::PlayCounterFrame;

	#[test_log::test]
	fn short_counter_is_widened() {
		let frame = PlayCounterFrame::parse(&mut &[0x01, 0x00][..]).unwrap().unwrap();
		assert_eq!(frame.counter, 256);
		assert_eq!(frame.as_bytes(), [0x00, 0x00, 0x01, 0x00]);
	}

	#[test_log::test]
	fn wide_counter() {
		let bytes = [0x01, 0x00, 0x00, 0x00, 0x00];
		let frame = PlayCounterFrame::parse(&mut &bytes[..]).unwrap().unwrap();
		assert_eq!(frame.counter, 1 << 32);
		assert_eq!(frame.as_bytes(), bytes);
		assert_eq!(frame.encoded_len(), 5);
	}

	#[test_log::test]
	fn empty() {
		assert!(PlayCounterFrame::parse(&mut &[][..]).unwrap().is_none());
	}
}
