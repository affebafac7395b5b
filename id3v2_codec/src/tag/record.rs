use super::Id3v2Tag;
use crate::frame::{Frame, FrameBody, FrameFlags};
use crate::header::{ExtendedHeader, Id3v2TagFlags, Id3v2Version};
use crate::util::text::TextEncoding;

/// A single typed value of a frame body
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContentValue {
	/// A decoded string
	Text(String),
	/// A number, including single byte fields such as symbols and type bytes
	Number(u64),
	/// Binary data, only its length is recorded
	Binary(usize),
	/// The body's text encoding
	Encoding(TextEncoding),
	/// A 3 character language code
	Language(String),
}

/// A flattened view of a [`Frame`]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRecord {
	/// The identifier as it appeared on disk
	pub id: String,
	/// The declared body size
	pub size: u32,
	/// The frame's flags
	pub flags: FrameFlags,
	/// The body's values, in wire order
	pub values: Vec<ContentValue>,
}

/// A flattened view of an [`Id3v2Tag`], for rendering
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagRecord {
	/// The major version
	pub version: Id3v2Version,
	/// The revision number
	pub revision: u8,
	/// Tag wide flags
	pub flags: Id3v2TagFlags,
	/// The declared tag size
	pub size: u32,
	/// The extended header, if any
	pub extended_header: Option<ExtendedHeader>,
	/// Every frame, in order
	pub frames: Vec<FrameRecord>,
}

fn language(language: [u8; 3]) -> ContentValue {
	ContentValue::Language(String::from_utf8_lossy(&language).into_owned())
}

fn text(value: &str) -> ContentValue {
	ContentValue::Text(value.to_owned())
}

fn content_values(body: &FrameBody) -> Vec<ContentValue> {
	use ContentValue::{Binary, Encoding, Number};

	match body {
		FrameBody::Text(f) => {
			let mut values = vec![Encoding(f.encoding)];
			values.extend(f.description.as_deref().map(text));
			values.push(text(&f.value));
			values
		},
		FrameBody::Url(f) => {
			let mut values = Vec::new();
			if let Some(description) = &f.description {
				values.extend([Encoding(f.encoding), text(description)]);
			}
			values.push(text(&f.url));
			values
		},
		FrameBody::Comment(f) => vec![
			Encoding(f.encoding),
			language(f.language),
			text(&f.description),
			text(&f.content),
		],
		FrameBody::UnsynchronizedText(f) => vec![
			Encoding(f.encoding),
			language(f.language),
			text(&f.description),
			text(&f.content),
		],
		FrameBody::SynchronizedText(f) => {
			let mut values = vec![
				Encoding(f.encoding),
				language(f.language),
				Number(u64::from(f.timestamp_format.as_u8())),
				Number(u64::from(f.content_type.as_u8())),
				text(&f.description),
			];
			for (timestamp, line) in &f.content {
				values.extend([text(line), Number(u64::from(*timestamp))]);
			}
			values
		},
		FrameBody::Picture(f) => vec![
			Encoding(f.encoding),
			text(f.mime_type.as_ref().map_or("", |mime| mime.as_str())),
			Number(u64::from(f.picture_type.as_u8())),
			text(&f.description),
			Binary(f.data.len()),
		],
		FrameBody::EncapsulatedObject(f) => vec![
			Encoding(f.encoding),
			text(&f.mime_type),
			text(&f.file_name),
			text(&f.description),
			Binary(f.data.len()),
		],
		FrameBody::KeyValue(f) => [Encoding(f.encoding)]
			.into_iter()
			.chain(
				f.key_value_pairs
					.iter()
					.flat_map(|(key, value)| [text(key), text(value)]),
			)
			.collect(),
		FrameBody::EventTimingCodes(f) => [Number(u64::from(f.timestamp_format.as_u8()))]
			.into_iter()
			.chain(f.events.iter().flat_map(|event| {
				[
					Number(u64::from(event.event_type.as_u8())),
					Number(u64::from(event.timestamp)),
				]
			}))
			.collect(),
		FrameBody::SyncedTempoCodes(f) => vec![
			Number(u64::from(f.timestamp_format.as_u8())),
			Binary(f.tempo_data.len()),
		],
		FrameBody::PlayCounter(f) => vec![Number(f.counter)],
		FrameBody::Popularimeter(f) => vec![
			text(&f.email),
			Number(u64::from(f.rating)),
			Number(f.counter),
		],
		FrameBody::UniqueFileIdentifier(f) => vec![text(&f.owner), Binary(f.identifier.len())],
		FrameBody::Ownership(f) => vec![
			Encoding(f.encoding),
			text(&f.price_paid),
			text(&f.date_of_purchase),
			text(&f.seller),
		],
		FrameBody::Commercial(f) => {
			let mut values = vec![
				Encoding(f.encoding),
				text(&f.price),
				text(&f.valid_until),
				text(&f.contact_url),
				Number(u64::from(f.received_as.as_u8())),
				text(&f.seller),
				text(&f.description),
			];
			if let Some((mime_type, logo)) = &f.seller_logo {
				values.extend([text(mime_type), Binary(logo.len())]);
			}
			values
		},
		FrameBody::TermsOfUse(f) => vec![
			Encoding(f.encoding),
			language(f.language),
			text(&f.text),
		],
		FrameBody::Private(f) => vec![text(&f.owner), Binary(f.private_data.len())],
		FrameBody::EncryptionRegistration(f) | FrameBody::GroupRegistration(f) => vec![
			text(&f.owner),
			Number(u64::from(f.symbol)),
			Binary(f.data.len()),
		],
		FrameBody::PositionSynchronization(f) => vec![
			Number(u64::from(f.timestamp_format.as_u8())),
			Number(f.position),
		],
		FrameBody::Signature(f) => vec![
			Number(u64::from(f.group_symbol)),
			Binary(f.signature.len()),
		],
		FrameBody::Seek(f) => vec![Number(u64::from(f.offset))],
		FrameBody::AudioEncryption(f) => vec![
			text(&f.owner),
			Number(u64::from(f.preview_start)),
			Number(u64::from(f.preview_length)),
			Binary(f.encryption_info.len()),
		],
		FrameBody::EncryptedMeta(f) => vec![
			text(&f.owner),
			text(&f.description),
			Binary(f.data.len()),
		],
		FrameBody::LinkedInformation(f) => vec![text(&f.url), Binary(f.data.len())],
		FrameBody::RecommendedBufferSize(f) => [
			Number(u64::from(f.buffer_size)),
			Number(u64::from(f.embedded_info)),
		]
		.into_iter()
		.chain(f.next_tag_offset.map(|offset| Number(u64::from(offset))))
		.collect(),
		FrameBody::Binary(f) => vec![Binary(f.data.len())],
	}
}

impl From<&Frame> for FrameRecord {
	fn from(frame: &Frame) -> Self {
		Self {
			id: frame.raw_id().to_owned(),
			size: frame.size(),
			flags: frame.flags(),
			values: content_values(frame.body()),
		}
	}
}

impl Id3v2Tag {
	/// Project the tag into a [`TagRecord`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::Id3v2Tag;
	/// use id3v2_codec::tag::ContentValue;
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// let mut tag = Id3v2Tag::default();
	/// tag.set_title("Foo")?;
	///
	/// let record = tag.to_record();
	/// assert_eq!(record.frames[0].id, "TIT2");
	/// assert_eq!(record.frames[0].values[1], ContentValue::Text(String::from("Foo")));
	/// # Ok(()) }
	/// ```
	pub fn to_record(&self) -> TagRecord {
		let header = self.header();

		TagRecord {
			version: header.version,
			revision: header.revision,
			flags: header.flags,
			size: header.size,
			extended_header: header.extended_header,
			frames: self.frames.iter().map(FrameRecord::from).collect(),
		}
	}
}
