//! ID3v2 frames
//!
//! A [`Frame`] is a [`FrameHeader`] paired with a [`FrameBody`]. The header records the
//! declared body size, and every mutation made through [`Frame::edit`] (or one of the typed
//! setters built on it) moves that size by the difference between the old and new encoded
//! body lengths.

pub(crate) mod content;
mod header;
mod id;

pub use header::{FrameFlags, FrameHeader};
pub use id::{BodyKind, FrameId};

use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::header::Id3v2Version;
use crate::items::{
	AttachedPictureFrame, AudioEncryptionFrame, BinaryFrame, CommentFrame, CommercialFrame,
	EncryptedMetaFrame, EventTimingCodesFrame, GeneralEncapsulatedObject, KeyValueFrame,
	LinkedInformationFrame, OwnershipFrame, PlayCounterFrame, PopularimeterFrame,
	PositionSynchronizationFrame, PrivateFrame, RecommendedBufferSizeFrame, RegistrationFrame,
	SeekFrame, SignatureFrame, SyncedTempoCodesFrame, SynchronizedTextFrame, TermsOfUseFrame,
	TextInformationFrame, UniqueFileIdentifierFrame, UnsynchronizedTextFrame, UrlLinkFrame,
};
use crate::items::verify_language;
use crate::util::text::TextEncoding;

/// The content of a frame
///
/// Each variant is one body shape. The identifiers that use each shape are listed in
/// [`FrameId::body_kind`].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum FrameBody {
	Text(TextInformationFrame),
	Url(UrlLinkFrame),
	Comment(CommentFrame),
	UnsynchronizedText(UnsynchronizedTextFrame),
	SynchronizedText(SynchronizedTextFrame),
	Picture(AttachedPictureFrame),
	EncapsulatedObject(GeneralEncapsulatedObject),
	KeyValue(KeyValueFrame),
	EventTimingCodes(EventTimingCodesFrame),
	SyncedTempoCodes(SyncedTempoCodesFrame),
	PlayCounter(PlayCounterFrame),
	Popularimeter(PopularimeterFrame),
	UniqueFileIdentifier(UniqueFileIdentifierFrame),
	Ownership(OwnershipFrame),
	Commercial(CommercialFrame),
	TermsOfUse(TermsOfUseFrame),
	Private(PrivateFrame),
	EncryptionRegistration(RegistrationFrame),
	GroupRegistration(RegistrationFrame),
	PositionSynchronization(PositionSynchronizationFrame),
	Signature(SignatureFrame),
	Seek(SeekFrame),
	AudioEncryption(AudioEncryptionFrame),
	EncryptedMeta(EncryptedMetaFrame),
	LinkedInformation(LinkedInformationFrame),
	RecommendedBufferSize(RecommendedBufferSizeFrame),
	Binary(BinaryFrame),
}

impl FrameBody {
	/// The shape of this body
	pub fn kind(&self) -> BodyKind {
		match self {
			FrameBody::Text(_) => BodyKind::Text,
			FrameBody::Url(_) => BodyKind::Url,
			FrameBody::Comment(_) => BodyKind::Comment,
			FrameBody::UnsynchronizedText(_) => BodyKind::UnsynchronizedText,
			FrameBody::SynchronizedText(_) => BodyKind::SynchronizedText,
			FrameBody::Picture(_) => BodyKind::Picture,
			FrameBody::EncapsulatedObject(_) => BodyKind::EncapsulatedObject,
			FrameBody::KeyValue(_) => BodyKind::KeyValue,
			FrameBody::EventTimingCodes(_) => BodyKind::EventTimingCodes,
			FrameBody::SyncedTempoCodes(_) => BodyKind::SyncedTempoCodes,
			FrameBody::PlayCounter(_) => BodyKind::PlayCounter,
			FrameBody::Popularimeter(_) => BodyKind::Popularimeter,
			FrameBody::UniqueFileIdentifier(_) => BodyKind::UniqueFileIdentifier,
			FrameBody::Ownership(_) => BodyKind::Ownership,
			FrameBody::Commercial(_) => BodyKind::Commercial,
			FrameBody::TermsOfUse(_) => BodyKind::TermsOfUse,
			FrameBody::Private(_) => BodyKind::Private,
			FrameBody::EncryptionRegistration(_) => BodyKind::EncryptionRegistration,
			FrameBody::GroupRegistration(_) => BodyKind::GroupRegistration,
			FrameBody::PositionSynchronization(_) => BodyKind::PositionSynchronization,
			FrameBody::Signature(_) => BodyKind::Signature,
			FrameBody::Seek(_) => BodyKind::Seek,
			FrameBody::AudioEncryption(_) => BodyKind::AudioEncryption,
			FrameBody::EncryptedMeta(_) => BodyKind::EncryptedMeta,
			FrameBody::LinkedInformation(_) => BodyKind::LinkedInformation,
			FrameBody::RecommendedBufferSize(_) => BodyKind::RecommendedBufferSize,
			FrameBody::Binary(_) => BodyKind::Binary,
		}
	}

	/// The text encoding of the body, if it stores any encoded text
	///
	/// URL frames only have an encoding when they carry a description.
	pub fn encoding(&self) -> Option<TextEncoding> {
		match self {
			FrameBody::Text(f) => Some(f.encoding),
			FrameBody::Url(f) => f.description.as_ref().map(|_| f.encoding),
			FrameBody::Comment(f) => Some(f.encoding),
			FrameBody::UnsynchronizedText(f) => Some(f.encoding),
			FrameBody::SynchronizedText(f) => Some(f.encoding),
			FrameBody::Picture(f) => Some(f.encoding),
			FrameBody::EncapsulatedObject(f) => Some(f.encoding),
			FrameBody::KeyValue(f) => Some(f.encoding),
			FrameBody::Ownership(f) => Some(f.encoding),
			FrameBody::Commercial(f) => Some(f.encoding),
			FrameBody::TermsOfUse(f) => Some(f.encoding),
			_ => None,
		}
	}

	/// Every string stored in the body's text encoding
	fn encoded_strings(&self) -> Vec<&str> {
		match self {
			FrameBody::Text(f) => f
				.description
				.iter()
				.map(String::as_str)
				.chain([f.value.as_str()])
				.collect(),
			FrameBody::Url(f) => f.description.iter().map(String::as_str).collect(),
			FrameBody::Comment(f) => vec![f.description.as_str(), f.content.as_str()],
			FrameBody::UnsynchronizedText(f) => vec![f.description.as_str(), f.content.as_str()],
			FrameBody::SynchronizedText(f) => [f.description.as_str()]
				.into_iter()
				.chain(f.content.iter().map(|(_, text)| text.as_str()))
				.collect(),
			FrameBody::Picture(f) => vec![f.description.as_str()],
			FrameBody::EncapsulatedObject(f) => vec![f.file_name.as_str(), f.description.as_str()],
			FrameBody::KeyValue(f) => f
				.key_value_pairs
				.iter()
				.flat_map(|(key, value)| [key.as_str(), value.as_str()])
				.collect(),
			FrameBody::Ownership(f) => vec![f.seller.as_str()],
			FrameBody::Commercial(f) => vec![f.seller.as_str(), f.description.as_str()],
			FrameBody::TermsOfUse(f) => vec![f.text.as_str()],
			_ => Vec::new(),
		}
	}

	/// The length of [`FrameBody::as_bytes`] for `version`
	pub fn encoded_len(&self, version: Id3v2Version) -> usize {
		match self {
			FrameBody::Text(f) => f.encoded_len(version),
			FrameBody::Url(f) => f.encoded_len(version),
			FrameBody::Comment(f) => f.encoded_len(version),
			FrameBody::UnsynchronizedText(f) => f.encoded_len(version),
			FrameBody::SynchronizedText(f) => f.encoded_len(version),
			FrameBody::Picture(f) => f.encoded_len(version),
			FrameBody::EncapsulatedObject(f) => f.encoded_len(version),
			FrameBody::KeyValue(f) => f.encoded_len(version),
			FrameBody::EventTimingCodes(f) => f.encoded_len(),
			FrameBody::SyncedTempoCodes(f) => f.encoded_len(),
			FrameBody::PlayCounter(f) => f.encoded_len(),
			FrameBody::Popularimeter(f) => f.encoded_len(),
			FrameBody::UniqueFileIdentifier(f) => f.encoded_len(),
			FrameBody::Ownership(f) => f.encoded_len(version),
			FrameBody::Commercial(f) => f.encoded_len(version),
			FrameBody::TermsOfUse(f) => f.encoded_len(version),
			FrameBody::Private(f) => f.encoded_len(),
			FrameBody::EncryptionRegistration(f) | FrameBody::GroupRegistration(f) => {
				f.encoded_len()
			},
			FrameBody::PositionSynchronization(f) => f.encoded_len(),
			FrameBody::Signature(f) => f.encoded_len(),
			FrameBody::Seek(f) => f.encoded_len(),
			FrameBody::AudioEncryption(f) => f.encoded_len(),
			FrameBody::EncryptedMeta(f) => f.encoded_len(),
			FrameBody::LinkedInformation(f) => f.encoded_len(),
			FrameBody::RecommendedBufferSize(f) => f.encoded_len(),
			FrameBody::Binary(f) => f.encoded_len(),
		}
	}

	/// Serialize the body for `version`
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// * `lossy` is not set, and text can't be represented in its encoding
	/// * The body can't be expressed in `version` (see the individual bodies)
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		Ok(match self {
			FrameBody::Text(f) => f.as_bytes(version, lossy)?,
			FrameBody::Url(f) => f.as_bytes(version, lossy)?,
			FrameBody::Comment(f) => f.as_bytes(version, lossy)?,
			FrameBody::UnsynchronizedText(f) => f.as_bytes(version, lossy)?,
			FrameBody::SynchronizedText(f) => f.as_bytes(version, lossy)?,
			FrameBody::Picture(f) => f.as_bytes(version, lossy)?,
			FrameBody::EncapsulatedObject(f) => f.as_bytes(version, lossy)?,
			FrameBody::KeyValue(f) => f.as_bytes(version, lossy)?,
			FrameBody::EventTimingCodes(f) => f.as_bytes(),
			FrameBody::SyncedTempoCodes(f) => f.as_bytes(),
			FrameBody::PlayCounter(f) => f.as_bytes(),
			FrameBody::Popularimeter(f) => f.as_bytes(lossy)?,
			FrameBody::UniqueFileIdentifier(f) => f.as_bytes(lossy)?,
			FrameBody::Ownership(f) => f.as_bytes(version, lossy)?,
			FrameBody::Commercial(f) => f.as_bytes(version, lossy)?,
			FrameBody::TermsOfUse(f) => f.as_bytes(version, lossy)?,
			FrameBody::Private(f) => f.as_bytes(lossy)?,
			FrameBody::EncryptionRegistration(f) | FrameBody::GroupRegistration(f) => {
				f.as_bytes(lossy)?
			},
			FrameBody::PositionSynchronization(f) => f.as_bytes(),
			FrameBody::Signature(f) => f.as_bytes(),
			FrameBody::Seek(f) => f.as_bytes(),
			FrameBody::AudioEncryption(f) => f.as_bytes(lossy)?,
			FrameBody::EncryptedMeta(f) => f.as_bytes(lossy)?,
			FrameBody::LinkedInformation(f) => f.as_bytes(lossy)?,
			FrameBody::RecommendedBufferSize(f) => f.as_bytes()?,
			FrameBody::Binary(f) => f.as_bytes(),
		})
	}

	/// The main text value of the body
	///
	/// This is the value of text frames, the URL of URL frames, the content of comments and
	/// unsynchronised lyrics, and the text of terms of use frames.
	pub fn text(&self) -> Option<&str> {
		match self {
			FrameBody::Text(f) => Some(&f.value),
			FrameBody::Url(f) => Some(&f.url),
			FrameBody::Comment(f) => Some(&f.content),
			FrameBody::UnsynchronizedText(f) => Some(&f.content),
			FrameBody::TermsOfUse(f) => Some(&f.text),
			_ => None,
		}
	}
}

/// The shape a body must have to belong to the frame `header`
///
/// Unknown identifiers starting with `T` or `W` are still text and URL frames.
pub(crate) fn expected_kind(header: &FrameHeader) -> BodyKind {
	match header.id() {
		FrameId::Unknown => match header.raw_id().as_bytes().first() {
			Some(b'T') => BodyKind::Text,
			Some(b'W') => BodyKind::Url,
			_ => BodyKind::Unknown,
		},
		id => id.body_kind(),
	}
}

/// An ID3v2 frame
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::frame::{Frame, FrameBody, FrameId};
/// use id3v2_codec::items::TextInformationFrame;
/// use id3v2_codec::TextEncoding;
///
/// # fn main() -> id3v2_codec::error::Result<()> {
/// let body = TextInformationFrame::new(TextEncoding::Latin1, "Foo");
/// let mut frame = Frame::new(FrameId::TIT2, FrameBody::Text(body))?;
///
/// // Encoding byte + "Foo" + terminator
/// assert_eq!(frame.size(), 5);
///
/// frame.set_text("Foo Bar")?;
/// assert_eq!(frame.size(), 9);
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
	pub(crate) header: FrameHeader,
	pub(crate) body: FrameBody,
}

impl Frame {
	/// Create a new frame
	///
	/// The declared size is set to the encoded length of `body`.
	///
	/// # Errors
	///
	/// * `id` is [`FrameId::Unknown`], use [`Frame::with_raw_id`]
	/// * `body` doesn't have the shape `id` expects
	pub fn new(id: FrameId, body: FrameBody) -> Result<Self> {
		let Some(header) = FrameHeader::new(id) else {
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameId(Vec::new())).into());
		};

		Self::from_header(header, body)
	}

	/// Create a new frame from a raw identifier
	///
	/// This allows for frames outside of the known tables. An unknown identifier starting
	/// with `T` must hold a [`FrameBody::Text`], and one starting with `W` a [`FrameBody::Url`].
	///
	/// # Errors
	///
	/// * `raw_id` is not a valid identifier
	/// * `body` doesn't have the shape the identifier expects
	pub fn with_raw_id(raw_id: &str, body: FrameBody) -> Result<Self> {
		let header = FrameHeader::with_raw_id(raw_id)?;
		Self::from_header(header, body)
	}

	fn from_header(mut header: FrameHeader, body: FrameBody) -> Result<Self> {
		verify_body(&header, &body)?;

		let version = measure_version(&header);
		header.size = u32::try_from(body.encoded_len(version)).unwrap_or(u32::MAX);

		Ok(Self { header, body })
	}

	// Parsed frames keep their declared size as-is
	pub(crate) fn from_parts(header: FrameHeader, body: FrameBody) -> Self {
		Self { header, body }
	}

	/// The resolved identifier
	pub fn id(&self) -> FrameId {
		self.header.id()
	}

	/// The identifier as it appeared on disk
	pub fn raw_id(&self) -> &str {
		self.header.raw_id()
	}

	/// The frame header
	pub fn header(&self) -> &FrameHeader {
		&self.header
	}

	/// The frame body
	pub fn body(&self) -> &FrameBody {
		&self.body
	}

	/// Take the frame body
	pub fn into_body(self) -> FrameBody {
		self.body
	}

	/// The declared body size
	pub fn size(&self) -> u32 {
		self.header.size()
	}

	/// The frame's flags
	pub fn flags(&self) -> FrameFlags {
		self.header.flags()
	}

	/// Replace the frame's flags
	pub fn set_flags(&mut self, flags: FrameFlags) {
		self.header.set_flags(flags);
	}

	/// Mutate the body, moving the declared size by the change in encoded length
	///
	/// The closure is trusted to keep the body's shape. Use the typed setters where possible,
	/// they verify the new values first.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::frame::{Frame, FrameBody, FrameId};
	/// use id3v2_codec::items::PlayCounterFrame;
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// let mut frame = Frame::new(FrameId::PCNT, FrameBody::PlayCounter(PlayCounterFrame::new(0)))?;
	/// assert_eq!(frame.size(), 4);
	///
	/// frame.edit(|body| {
	/// 	if let FrameBody::PlayCounter(counter) = body {
	/// 		counter.counter = u64::from(u32::MAX) + 1;
	/// 	}
	/// });
	/// assert_eq!(frame.size(), 5);
	/// # Ok(()) }
	/// ```
	pub fn edit<F, T>(&mut self, f: F) -> T
	where
		F: FnOnce(&mut FrameBody) -> T,
	{
		let version = measure_version(&self.header);

		let old_len = self.body.encoded_len(version);
		let ret = f(&mut self.body);
		let new_len = self.body.encoded_len(version);

		if old_len != new_len {
			log::trace!(
				"{}: body length changed from {old_len} to {new_len}",
				self.header.raw_id()
			);
		}

		self.header.apply_size_delta(old_len, new_len);
		ret
	}

	/// Replace the main text value, see [`FrameBody::text`]
	///
	/// # Errors
	///
	/// * The body has no main text value
	/// * `text` can't be represented in the body's encoding (URLs are always ISO-8859-1)
	pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
		let text = text.into();
		let id = self.id();

		let encoding = match &self.body {
			FrameBody::Url(_) => TextEncoding::Latin1,
			body if body.text().is_some() => body.encoding().unwrap_or(TextEncoding::Latin1),
			_ => return Err(Id3v2Error::new(Id3v2ErrorKind::FieldNotPresent(id, "text")).into()),
		};

		if !encoding.verify(&text) {
			return Err(Id3v2Error::new(Id3v2ErrorKind::UnrepresentableText(id)).into());
		}

		self.edit(|body| match body {
			FrameBody::Text(f) => f.value = text,
			FrameBody::Url(f) => f.url = text,
			FrameBody::Comment(f) => f.content = text,
			FrameBody::UnsynchronizedText(f) => f.content = text,
			FrameBody::TermsOfUse(f) => f.text = text,
			_ => {},
		});

		Ok(())
	}

	/// Replace the description
	///
	/// # Errors
	///
	/// * The body has no description (text and URL frames only have one when user defined)
	/// * `description` can't be represented in the body's encoding
	pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
		let description = description.into();
		let id = self.id();

		let encoding = match &self.body {
			FrameBody::Text(TextInformationFrame {
				description: Some(_),
				encoding,
				..
			})
			| FrameBody::Url(UrlLinkFrame {
				description: Some(_),
				encoding,
				..
			})
			| FrameBody::Comment(CommentFrame { encoding, .. })
			| FrameBody::UnsynchronizedText(UnsynchronizedTextFrame { encoding, .. })
			| FrameBody::SynchronizedText(SynchronizedTextFrame { encoding, .. })
			| FrameBody::Picture(AttachedPictureFrame { encoding, .. })
			| FrameBody::EncapsulatedObject(GeneralEncapsulatedObject { encoding, .. })
			| FrameBody::Commercial(CommercialFrame { encoding, .. }) => *encoding,
			FrameBody::EncryptedMeta(_) => TextEncoding::Latin1,
			_ => {
				return Err(
					Id3v2Error::new(Id3v2ErrorKind::FieldNotPresent(id, "description")).into(),
				);
			},
		};

		if !encoding.verify(&description) {
			return Err(Id3v2Error::new(Id3v2ErrorKind::UnrepresentableText(id)).into());
		}

		self.edit(|body| match body {
			FrameBody::Text(f) => f.description = Some(description),
			FrameBody::Url(f) => f.description = Some(description),
			FrameBody::Comment(f) => f.description = description,
			FrameBody::UnsynchronizedText(f) => f.description = description,
			FrameBody::SynchronizedText(f) => f.description = description,
			FrameBody::Picture(f) => f.description = description,
			FrameBody::EncapsulatedObject(f) => f.description = description,
			FrameBody::Commercial(f) => f.description = description,
			FrameBody::EncryptedMeta(f) => f.description = description,
			_ => {},
		});

		Ok(())
	}

	/// Change the text encoding of the body
	///
	/// Every encoded string in the body is re-encoded, and the declared size is updated.
	///
	/// # Errors
	///
	/// * The body has no text encoding
	/// * Any of the body's strings can't be represented in `encoding`. The body is left
	///   untouched.
	pub fn set_encoding(&mut self, encoding: TextEncoding) -> Result<()> {
		let id = self.id();
		if self.body.encoding().is_none() {
			return Err(Id3v2Error::new(Id3v2ErrorKind::FieldNotPresent(id, "encoding")).into());
		}

		if !self
			.body
			.encoded_strings()
			.into_iter()
			.all(|s| encoding.verify(s))
		{
			return Err(Id3v2Error::new(Id3v2ErrorKind::UnrepresentableText(id)).into());
		}

		self.edit(|body| match body {
			FrameBody::Text(f) => f.encoding = encoding,
			FrameBody::Url(f) => f.encoding = encoding,
			FrameBody::Comment(f) => f.encoding = encoding,
			FrameBody::UnsynchronizedText(f) => f.encoding = encoding,
			FrameBody::SynchronizedText(f) => f.encoding = encoding,
			FrameBody::Picture(f) => f.encoding = encoding,
			FrameBody::EncapsulatedObject(f) => f.encoding = encoding,
			FrameBody::KeyValue(f) => f.encoding = encoding,
			FrameBody::Ownership(f) => f.encoding = encoding,
			FrameBody::Commercial(f) => f.encoding = encoding,
			FrameBody::TermsOfUse(f) => f.encoding = encoding,
			_ => {},
		});

		Ok(())
	}

	/// Change the language of the body
	///
	/// # Errors
	///
	/// * The body has no language
	/// * `language` is not 3 ASCII letters
	pub fn set_language(&mut self, language: [u8; 3]) -> Result<()> {
		let id = self.id();
		if !matches!(
			self.body,
			FrameBody::Comment(_)
				| FrameBody::UnsynchronizedText(_)
				| FrameBody::SynchronizedText(_)
				| FrameBody::TermsOfUse(_)
		) {
			return Err(Id3v2Error::new(Id3v2ErrorKind::FieldNotPresent(id, "language")).into());
		}

		verify_language(language)?;

		// The language is fixed width, the size never changes
		match &mut self.body {
			FrameBody::Comment(f) => f.language = language,
			FrameBody::UnsynchronizedText(f) => f.language = language,
			FrameBody::SynchronizedText(f) => f.language = language,
			FrameBody::TermsOfUse(f) => f.language = language,
			_ => {},
		}

		Ok(())
	}

	/// Replace the binary payload of the body
	///
	/// # Errors
	///
	/// The body has no binary payload
	pub fn set_data(&mut self, data: Vec<u8>) -> Result<()> {
		let id = self.id();
		if !matches!(
			self.body,
			FrameBody::Picture(_)
				| FrameBody::EncapsulatedObject(_)
				| FrameBody::UniqueFileIdentifier(_)
				| FrameBody::Private(_)
				| FrameBody::EncryptionRegistration(_)
				| FrameBody::GroupRegistration(_)
				| FrameBody::Signature(_)
				| FrameBody::AudioEncryption(_)
				| FrameBody::EncryptedMeta(_)
				| FrameBody::SyncedTempoCodes(_)
				| FrameBody::LinkedInformation(_)
				| FrameBody::Binary(_)
		) {
			return Err(Id3v2Error::new(Id3v2ErrorKind::FieldNotPresent(id, "data")).into());
		}

		self.edit(|body| match body {
			FrameBody::Picture(f) => f.data = data,
			FrameBody::EncapsulatedObject(f) => f.data = data,
			FrameBody::UniqueFileIdentifier(f) => f.identifier = data,
			FrameBody::Private(f) => f.private_data = data,
			FrameBody::EncryptionRegistration(f) | FrameBody::GroupRegistration(f) => f.data = data,
			FrameBody::Signature(f) => f.signature = data,
			FrameBody::AudioEncryption(f) => f.encryption_info = data,
			FrameBody::EncryptedMeta(f) => f.data = data,
			FrameBody::SyncedTempoCodes(f) => f.tempo_data = data,
			FrameBody::LinkedInformation(f) => f.data = data,
			FrameBody::Binary(f) => f.data = data,
			_ => {},
		});

		Ok(())
	}
}

// Frames are measured in the newest version their identifier belongs to. Only the
// encoding substitution differs between versions, the writer measures again.
fn measure_version(header: &FrameHeader) -> Id3v2Version {
	if header.raw_id().len() == 3 {
		Id3v2Version::V2
	} else {
		Id3v2Version::V4
	}
}

fn verify_body(header: &FrameHeader, body: &FrameBody) -> Result<()> {
	let id = header.id();
	let kind = body.kind();

	// Any frame can hold an opaque payload
	if kind == BodyKind::Binary {
		return Ok(());
	}

	if kind != expected_kind(header) {
		return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameBody {
			id,
			reason: "body does not match the frame ID",
		})
		.into());
	}

	let has_description = match body {
		FrameBody::Text(f) => f.description.is_some(),
		FrameBody::Url(f) => f.description.is_some(),
		_ => return Ok(()),
	};

	if has_description != id.is_user_defined() {
		return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameBody {
			id,
			reason: "only TXXX and WXXX frames carry a description",
		})
		.into());
	}

	Ok(())
}
