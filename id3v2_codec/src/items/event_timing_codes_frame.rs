use super::TimestampFormat;
use crate::error::Result;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

macro_rules! event_types {
	($($(#[$meta:meta])* $variant:ident = $byte:literal),+ $(,)?) => {
		/// The type of events that can occur in an [`EventTimingCodesFrame`]
		///
		/// This is used in [`Event`].
		///
		/// Details on these types can be found [here](https://id3.org/id3v2.4.0-frames#sec4.5).
		#[cfg_attr(feature = "serde", derive(serde::Serialize))]
		#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
		#[allow(missing_docs)]
		pub enum EventType {
			$($(#[$meta])* $variant,)+
			/// A reserved or otherwise unknown event type
			Undefined(u8),
		}

		impl EventType {
			/// Get an [`EventType`] from a `u8`
			///
			/// NOTE: 0x17..=0xDF and 0xF0..=0xFC map to [`EventType::Undefined`]
			///
			/// # Examples
			///
			/// ```rust
			/// use id3v2_codec::items::EventType;
			///
			/// let valid_byte = 1;
			/// assert_eq!(EventType::from_u8(valid_byte), EventType::EndOfInitialSilence);
			///
			/// // This is in the undefined range
			/// let invalid_byte = 0x17;
			/// assert_eq!(EventType::from_u8(invalid_byte), EventType::Undefined(0x17));
			/// ```
			pub fn from_u8(byte: u8) -> Self {
				match byte {
					$($byte => Self::$variant,)+
					i => Self::Undefined(i),
				}
			}

			/// Get the `u8` representation of an [`EventType`]
			pub fn as_u8(self) -> u8 {
				match self {
					$(Self::$variant => $byte,)+
					Self::Undefined(i) => i,
				}
			}
		}
	};
}

event_types! {
	Padding = 0x00,
	EndOfInitialSilence = 0x01,
	IntroStart = 0x02,
	MainPartStart = 0x03,
	OutroStart = 0x04,
	OutroEnd = 0x05,
	VerseStart = 0x06,
	RefrainStart = 0x07,
	InterludeStart = 0x08,
	ThemeStart = 0x09,
	VariationStart = 0x0A,
	KeyChange = 0x0B,
	TimeChange = 0x0C,
	MomentaryUnwantedNoise = 0x0D,
	SustainedNoise = 0x0E,
	SustainedNoiseEnd = 0x0F,
	IntroEnd = 0x10,
	MainPartEnd = 0x11,
	VerseEnd = 0x12,
	RefrainEnd = 0x13,
	ThemeEnd = 0x14,
	Profanity = 0x15,
	ProfanityEnd = 0x16,

	// User-defined events
	NotPredefinedSynch0 = 0xE0,
	NotPredefinedSynch1 = 0xE1,
	NotPredefinedSynch2 = 0xE2,
	NotPredefinedSynch3 = 0xE3,
	NotPredefinedSynch4 = 0xE4,
	NotPredefinedSynch5 = 0xE5,
	NotPredefinedSynch6 = 0xE6,
	NotPredefinedSynch7 = 0xE7,
	NotPredefinedSynch8 = 0xE8,
	NotPredefinedSynch9 = 0xE9,
	NotPredefinedSynchA = 0xEA,
	NotPredefinedSynchB = 0xEB,
	NotPredefinedSynchC = 0xEC,
	NotPredefinedSynchD = 0xED,
	NotPredefinedSynchE = 0xEE,
	NotPredefinedSynchF = 0xEF,

	AudioEnd = 0xFD,
	AudioFileEnds = 0xFE,
}

/// An event for an [`EventTimingCodesFrame`]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Event {
	/// The event type
	pub event_type: EventType,
	/// The timestamp according to the [`TimestampFormat`]
	pub timestamp: u32,
}

/// An ID3v2 event timing codes frame (`ETCO`, `ETC` in ID3v2.2)
///
/// Events are kept in the order they were read.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EventTimingCodesFrame {
	/// The format of the timestamps
	pub timestamp_format: TimestampFormat,
	/// The events
	pub events: Vec<Event>,
}

impl EventTimingCodesFrame {
	/// Create a new [`EventTimingCodesFrame`]
	pub fn new(timestamp_format: TimestampFormat, events: Vec<Event>) -> Self {
		Self {
			timestamp_format,
			events,
		}
	}

	/// Read an [`EventTimingCodesFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// An event is cut short
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Ok(timestamp_format) = TimestampFormat::read(reader) else {
			return Ok(None);
		};

		let mut events = Vec::new();
		while let Ok(event_type_byte) = reader.read_u8() {
			let event_type = EventType::from_u8(event_type_byte);
			let timestamp = reader.read_u32::<BigEndian>()?;

			events.push(Event {
				event_type,
				timestamp,
			})
		}

		Ok(Some(EventTimingCodesFrame {
			timestamp_format,
			events,
		}))
	}

	/// Convert an [`EventTimingCodesFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	pub fn as_bytes(&self) -> Vec<u8> {
		let mut content = Vec::with_capacity(self.encoded_len());
		content.push(self.timestamp_format.as_u8());

		for event in &self.events {
			content.push(event.event_type.as_u8());
			content.extend(event.timestamp.to_be_bytes());
		}

		content
	}

	/// The length of [`EventTimingCodesFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		1 + self.events.len() * 5
	}
}

#[cfg(test)]
mod tests {
	use crate::items::{Event, EventTimingCodesFrame, EventType, TimestampFormat};

	fn expected() -> EventTimingCodesFrame {
		EventTimingCodesFrame {
			timestamp_format: TimestampFormat::MS,
			events: vec![
				Event {
					event_type: EventType::IntroStart,
					timestamp: 1500,
				},
				Event {
					event_type: EventType::IntroEnd,
					timestamp: 5000,
				},
				Event {
					event_type: EventType::Undefined(0x17),
					timestamp: 5100,
				},
				Event {
					event_type: EventType::AudioFileEnds,
					timestamp: 80000,
				},
			],
		}
	}

	#[test_log::test]
	fn etco_round_trip() {
		let bytes = expected().as_bytes();
		assert_eq!(bytes.len(), expected().encoded_len());
		assert_eq!(&bytes[..6], &[0x02, 0x02, 0x00, 0x00, 0x05, 0xDC]);

		let parsed = EventTimingCodesFrame::parse(&mut &bytes[..])
			.unwrap()
			.unwrap();
		assert_eq!(parsed, expected());
	}

	#[test_log::test]
	fn event_type_bytes() {
		for byte in 0..=u8::MAX {
			assert_eq!(EventType::from_u8(byte).as_u8(), byte);
		}
	}

	#[test_log::test]
	fn cut_short() {
		assert!(EventTimingCodesFrame::parse(&mut &[0x02, 0x01, 0x00][..]).is_err());
		assert!(
			EventTimingCodesFrame::parse(&mut &[][..])
				.unwrap()
				.is_none()
		);
	}

	#[test_log::test]
	fn undefined_timestamp_format_is_kept() {
		let bytes = [0x00, 0x03, 0x00, 0x00, 0x01, 0x00];
		let frame = EventTimingCodesFrame::parse(&mut &bytes[..])
			.unwrap()
			.unwrap();

		assert_eq!(frame.timestamp_format, TimestampFormat::Undefined(0));
		assert_eq!(frame.events.len(), 1);
		assert_eq!(frame.events[0].event_type, EventType::MainPartStart);
		assert_eq!(frame.events[0].timestamp, 256);
		assert_eq!(frame.as_bytes(), bytes);

		let frame = EventTimingCodesFrame::parse(&mut &[0x03][..])
			.unwrap()
			.unwrap();
		assert_eq!(frame.timestamp_format, TimestampFormat::Undefined(3));
		assert!(frame.events.is_empty());
	}
}
