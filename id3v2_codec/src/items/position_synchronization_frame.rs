use super::{TimestampFormat, counter_len, decode_counter, encode_counter};
use crate::error::Result;

use std::io::Read;

/// An ID3v2 position synchronisation frame (`POSS`)
///
/// Marks the position in the audio where the tag begins, useful for streamed audio.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PositionSynchronizationFrame {
	/// The unit of `position`
	pub timestamp_format: TimestampFormat,
	/// The position
	pub position: u64,
}

impl PositionSynchronizationFrame {
	/// Create a new [`PositionSynchronizationFrame`]
	pub fn new(timestamp_format: TimestampFormat, position: u64) -> Self {
		Self {
			timestamp_format,
			position,
		}
	}

	/// Read a [`PositionSynchronizationFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// The reader fails
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Ok(timestamp_format) = TimestampFormat::read(reader) else {
			return Ok(None);
		};

		let mut position = Vec::new();
		reader.read_to_end(&mut position)?;

		Ok(Some(Self {
			timestamp_format,
			position: decode_counter(&position),
		}))
	}

	/// Convert a [`PositionSynchronizationFrame`] to a byte vec
	pub fn as_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(self.encoded_len());
		bytes.push(self.timestamp_format.as_u8());
		bytes.extend(encode_counter(self.position));
		bytes
	}

	/// The length of [`PositionSynchronizationFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		1 + counter_len(self.position)
	}
}

#[cfg(test)]
mod tests {
	use crate::items::{PositionSynchronizationFrame, TimestampFormat};

	#[test_log::test]
	fn poss_layout() {
		let bytes = [0x01, 0x00, 0x00, 0x10, 0x00];
		let frame = PositionSynchronizationFrame::parse(&mut &bytes[..])
			.unwrap()
			.unwrap();

		assert_eq!(
			frame,
			PositionSynchronizationFrame::new(TimestampFormat::MPEG, 4096)
		);
		assert_eq!(frame.as_bytes(), bytes);
	}

	#[test_log::test]
	fn undefined_format_is_kept() {
		let bytes = [0x00, 0x00, 0x00, 0x00, 0x01];
		let frame = PositionSynchronizationFrame::parse(&mut &bytes[..])
			.unwrap()
			.unwrap();

		assert_eq!(frame.timestamp_format, TimestampFormat::Undefined(0));
		assert_eq!(frame.position, 1);
		assert_eq!(frame.as_bytes(), bytes);

		assert!(
			PositionSynchronizationFrame::parse(&mut &[][..])
				.unwrap()
				.is_none()
		);
	}
}
