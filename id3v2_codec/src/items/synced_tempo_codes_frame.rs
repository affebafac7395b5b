use super::TimestampFormat;
use crate::error::Result;
use crate::macros::err;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

/// A single tempo change in a [`SyncedTempoCodesFrame`]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TempoCode {
	/// Beats per minute, `0..=510`
	///
	/// 0 is beat-free time, and 1 is a single beat stroke followed by beat-free time.
	pub bpm: u16,
	/// The timestamp according to the [`TimestampFormat`]
	pub timestamp: u32,
}

/// An ID3v2 synchronised tempo codes frame (`SYTC`, `STC` in ID3v2.2)
///
/// The tempo codes are kept as written. Use [`SyncedTempoCodesFrame::tempos`] to decode them.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SyncedTempoCodesFrame {
	/// The format of the timestamps
	pub timestamp_format: TimestampFormat,
	/// The encoded tempo codes
	pub tempo_data: Vec<u8>,
}

// Tempos of 255 and above are stored as 0xFF followed by the rest of the value
const TEMPO_EXTENDED: u8 = 0xFF;
const MAX_TEMPO: u16 = TEMPO_EXTENDED as u16 * 2;

impl SyncedTempoCodesFrame {
	/// Create a new [`SyncedTempoCodesFrame`] from already encoded tempo codes
	pub fn new(timestamp_format: TimestampFormat, tempo_data: Vec<u8>) -> Self {
		Self {
			timestamp_format,
			tempo_data,
		}
	}

	/// Create a new [`SyncedTempoCodesFrame`] by encoding `tempos`
	///
	/// # Errors
	///
	/// A tempo is greater than 510 BPM
	pub fn from_tempos(timestamp_format: TimestampFormat, tempos: &[TempoCode]) -> Result<Self> {
		let mut tempo_data = Vec::with_capacity(tempos.len() * 6);

		for tempo in tempos {
			if tempo.bpm > MAX_TEMPO {
				err!(TooMuchData);
			}

			if tempo.bpm >= u16::from(TEMPO_EXTENDED) {
				tempo_data.push(TEMPO_EXTENDED);
				tempo_data.push((tempo.bpm - u16::from(TEMPO_EXTENDED)) as u8);
			} else {
				tempo_data.push(tempo.bpm as u8);
			}

			tempo_data.extend(tempo.timestamp.to_be_bytes());
		}

		Ok(Self::new(timestamp_format, tempo_data))
	}

	/// Read a [`SyncedTempoCodesFrame`]
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

		let mut tempo_data = Vec::new();
		reader.read_to_end(&mut tempo_data)?;

		Ok(Some(Self {
			timestamp_format,
			tempo_data,
		}))
	}

	/// Decode the tempo codes
	///
	/// # Errors
	///
	/// A tempo code is cut short
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::items::{SyncedTempoCodesFrame, TimestampFormat};
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// // 120 BPM from the start
	/// let frame = SyncedTempoCodesFrame::new(TimestampFormat::MS, vec![0x78, 0, 0, 0, 0]);
	///
	/// let tempos = frame.tempos()?;
	/// assert_eq!(tempos.len(), 1);
	/// assert_eq!(tempos[0].bpm, 120);
	/// # Ok(()) }
	/// ```
	pub fn tempos(&self) -> Result<Vec<TempoCode>> {
		let reader = &mut &self.tempo_data[..];

		let mut tempos = Vec::new();
		while let Ok(tempo_byte) = reader.read_u8() {
			let mut bpm = u16::from(tempo_byte);
			if tempo_byte == TEMPO_EXTENDED {
				bpm += u16::from(reader.read_u8()?);
			}

			let timestamp = reader.read_u32::<BigEndian>()?;
			tempos.push(TempoCode { bpm, timestamp });
		}

		Ok(tempos)
	}

	/// Convert a [`SyncedTempoCodesFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	pub fn as_bytes(&self) -> Vec<u8> {
		let mut content = Vec::with_capacity(self.encoded_len());
		content.push(self.timestamp_format.as_u8());
		content.extend_from_slice(&self.tempo_data);
		content
	}

	/// The length of [`SyncedTempoCodesFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		1 + self.tempo_data.len()
	}
}

#[cfg(test)]
mod tests {
	use crate::items::{SyncedTempoCodesFrame, TempoCode, TimestampFormat};

	#[test_log::test]
	fn sytc_layout() {
		let bytes = [
			0x02, // milliseconds
			0x78, 0x00, 0x00, 0x00, 0x00, // 120 BPM at 0
			0xFF, 0x2D, 0x00, 0x00, 0x27, 0x10, // 300 BPM at 10000
		];
		let tempos = [
			TempoCode {
				bpm: 120,
				timestamp: 0,
			},
			TempoCode {
				bpm: 300,
				timestamp: 10000,
			},
		];

		let frame = SyncedTempoCodesFrame::parse(&mut &bytes[..]).unwrap().unwrap();
		assert_eq!(frame.timestamp_format, TimestampFormat::MS);
		assert_eq!(frame.tempo_data, &bytes[1..]);
		assert_eq!(frame.tempos().unwrap(), tempos);

		assert_eq!(frame.as_bytes(), bytes);
		assert_eq!(frame.encoded_len(), bytes.len());
		assert_eq!(
			SyncedTempoCodesFrame::from_tempos(TimestampFormat::MS, &tempos).unwrap(),
			frame
		);
	}

	#[test_log::test]
	fn tempo_out_of_range() {
		let tempo = TempoCode {
			bpm: 511,
			timestamp: 0,
		};

		assert!(SyncedTempoCodesFrame::from_tempos(TimestampFormat::MPEG, &[tempo]).is_err());
	}

	#[test_log::test]
	fn truncated_tempo_is_kept() {
		// A tempo with no timestamp, and a timestamp format of 0
		let bytes = [0x00, 0x78, 0x00];

		let frame = SyncedTempoCodesFrame::parse(&mut &bytes[..]).unwrap().unwrap();
		assert_eq!(frame.timestamp_format, TimestampFormat::Undefined(0));
		assert_eq!(frame.tempo_data, [0x78, 0x00]);
		assert_eq!(frame.as_bytes(), bytes);
		assert!(frame.tempos().is_err());

		let frame = SyncedTempoCodesFrame::parse(&mut &[0x01, 0xFF][..]).unwrap().unwrap();
		assert!(frame.tempos().is_err());

		assert!(SyncedTempoCodesFrame::parse(&mut &[][..]).unwrap().is_none());
	}
}
