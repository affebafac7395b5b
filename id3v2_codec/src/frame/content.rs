use super::{BodyKind, FrameBody, FrameHeader, expected_kind};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::items::{
	AttachedPictureFrame, AudioEncryptionFrame, BinaryFrame, CommentFrame, CommercialFrame,
	EncryptedMetaFrame, EventTimingCodesFrame, GeneralEncapsulatedObject, KeyValueFrame,
	LinkedInformationFrame, OwnershipFrame, PlayCounterFrame, PopularimeterFrame,
	PositionSynchronizationFrame, PrivateFrame, RecommendedBufferSizeFrame, RegistrationFrame,
	SeekFrame, SignatureFrame, SyncedTempoCodesFrame, SynchronizedTextFrame, TermsOfUseFrame,
	TextInformationFrame, UniqueFileIdentifierFrame, UnsynchronizedTextFrame, UrlLinkFrame,
};

use std::io::Read;

/// Parse a frame body
///
/// `reader` must be bounded to the declared size of the frame. This returns `None` for empty
/// bodies and for identifiers with no known layout.
#[rustfmt::skip]
pub(crate) fn parse_content<R: Read>(
	reader: &mut R,
	header: &FrameHeader,
	version: Id3v2Version,
	parse_mode: ParsingMode,
) -> Result<Option<FrameBody>> {
	// Nothing can be decoded until the payload is restored
	if header.flags().is_opaque() {
		log::trace!("Frame {} has an opaque payload, keeping it as binary", header.raw_id());
		return Ok(BinaryFrame::parse(reader)?.map(FrameBody::Binary));
	}

	let kind = expected_kind(header);
	log::trace!("Parsing frame content for ID: {} as {kind:?}", header.raw_id());

	let user_defined = header.id().is_user_defined();

	Ok(match kind {
		BodyKind::Text => TextInformationFrame::parse(reader, user_defined, version, parse_mode)?.map(FrameBody::Text),
		BodyKind::Url => UrlLinkFrame::parse(reader, user_defined, version, parse_mode)?.map(FrameBody::Url),
		BodyKind::Comment => CommentFrame::parse(reader, version, parse_mode)?.map(FrameBody::Comment),
		BodyKind::UnsynchronizedText => UnsynchronizedTextFrame::parse(reader, version, parse_mode)?.map(FrameBody::UnsynchronizedText),
		BodyKind::SynchronizedText => {
			let mut content = Vec::new();
			reader.read_to_end(&mut content)?;

			SynchronizedTextFrame::parse(&content, version, parse_mode)?.map(FrameBody::SynchronizedText)
		},
		// The format field differs between PIC and APIC, so the version is needed
		BodyKind::Picture => AttachedPictureFrame::parse(reader, version, parse_mode)?.map(FrameBody::Picture),
		BodyKind::EncapsulatedObject => GeneralEncapsulatedObject::parse(reader, version, parse_mode)?.map(FrameBody::EncapsulatedObject),
		BodyKind::KeyValue => KeyValueFrame::parse(reader, version, parse_mode)?.map(FrameBody::KeyValue),
		BodyKind::EventTimingCodes => EventTimingCodesFrame::parse(reader)?.map(FrameBody::EventTimingCodes),
		BodyKind::SyncedTempoCodes => SyncedTempoCodesFrame::parse(reader)?.map(FrameBody::SyncedTempoCodes),
		BodyKind::PlayCounter => PlayCounterFrame::parse(reader)?.map(FrameBody::PlayCounter),
		BodyKind::Popularimeter => PopularimeterFrame::parse(reader)?.map(FrameBody::Popularimeter),
		BodyKind::UniqueFileIdentifier => UniqueFileIdentifierFrame::parse(reader, parse_mode)?.map(FrameBody::UniqueFileIdentifier),
		BodyKind::Ownership => OwnershipFrame::parse(reader, version, parse_mode)?.map(FrameBody::Ownership),
		BodyKind::Commercial => CommercialFrame::parse(reader, version, parse_mode)?.map(FrameBody::Commercial),
		BodyKind::TermsOfUse => TermsOfUseFrame::parse(reader, version, parse_mode)?.map(FrameBody::TermsOfUse),
		BodyKind::Private => PrivateFrame::parse(reader)?.map(FrameBody::Private),
		BodyKind::EncryptionRegistration => RegistrationFrame::parse(reader)?.map(FrameBody::EncryptionRegistration),
		BodyKind::GroupRegistration => RegistrationFrame::parse(reader)?.map(FrameBody::GroupRegistration),
		BodyKind::PositionSynchronization => PositionSynchronizationFrame::parse(reader)?.map(FrameBody::PositionSynchronization),
		BodyKind::Signature => SignatureFrame::parse(reader)?.map(FrameBody::Signature),
		BodyKind::Seek => SeekFrame::parse(reader)?.map(FrameBody::Seek),
		BodyKind::AudioEncryption => AudioEncryptionFrame::parse(reader)?.map(FrameBody::AudioEncryption),
		BodyKind::EncryptedMeta => EncryptedMetaFrame::parse(reader)?.map(FrameBody::EncryptedMeta),
		BodyKind::LinkedInformation => LinkedInformationFrame::parse(reader)?.map(FrameBody::LinkedInformation),
		BodyKind::RecommendedBufferSize => RecommendedBufferSizeFrame::parse(reader)?.map(FrameBody::RecommendedBufferSize),
		BodyKind::Binary => BinaryFrame::parse(reader)?.map(FrameBody::Binary),
		BodyKind::Unknown => None,
	})
}

#[cfg(test)]
mod tests {
	use super::parse_content;
	use crate::config::ParsingMode;
	use crate::frame::{FrameBody, FrameFlags, FrameHeader, FrameId};
	use crate::header::Id3v2Version;

	fn parse(raw_id: &str, flags: FrameFlags, content: &[u8]) -> Option<FrameBody> {
		let mut header = FrameHeader::with_raw_id(raw_id).unwrap();
		header.set_flags(flags);

		let version = if raw_id.len() == 3 {
			Id3v2Version::V2
		} else {
			Id3v2Version::V4
		};

		parse_content(&mut &content[..], &header, version, ParsingMode::Strict).unwrap()
	}

	#[test_log::test]
	fn dispatch() {
		assert!(matches!(
			parse("TIT2", FrameFlags::default(), b"\x00Title"),
			Some(FrameBody::Text(_))
		));
		assert!(matches!(
			parse("TT2", FrameFlags::default(), b"\x00Title"),
			Some(FrameBody::Text(_))
		));
		assert!(matches!(
			parse("GRID", FrameFlags::default(), b"owner\0\x80"),
			Some(FrameBody::GroupRegistration(_))
		));
		assert!(matches!(
			parse("ENCR", FrameFlags::default(), b"owner\0\x80"),
			Some(FrameBody::EncryptionRegistration(_))
		));
		assert!(matches!(
			parse("RVA2", FrameFlags::default(), b"\x01\x02"),
			Some(FrameBody::Binary(_))
		));
		assert!(matches!(
			parse("LINK", FrameFlags::default(), b"TIT2http://example.com\0"),
			Some(FrameBody::LinkedInformation(_))
		));
		assert!(matches!(
			parse("BUF", FrameFlags::default(), b"\x00\x10\x00\x00"),
			Some(FrameBody::RecommendedBufferSize(_))
		));
	}

	#[test_log::test]
	fn user_defined_text() {
		let Some(FrameBody::Text(text)) = parse("TXXX", FrameFlags::default(), b"\x00desc\0value")
		else {
			panic!("Expected a text frame");
		};

		assert_eq!(text.description.as_deref(), Some("desc"));
		assert_eq!(text.value, "value");
	}

	#[test_log::test]
	fn unknown_ids() {
		assert!(matches!(
			parse("TXYZ", FrameFlags::default(), b"\x00Value"),
			Some(FrameBody::Text(_))
		));
		assert!(matches!(
			parse("WXYZ", FrameFlags::default(), b"http://example.com"),
			Some(FrameBody::Url(_))
		));
		assert!(parse("XYZ1", FrameFlags::default(), b"\x00\x01\x02").is_none());
		assert_eq!(FrameId::parse(b"XYZ1"), FrameId::Unknown);
	}

	#[test_log::test]
	fn opaque_payloads() {
		let compressed = FrameFlags {
			compression: true,
			data_length_indicator: Some(100),
			..FrameFlags::default()
		};

		let Some(FrameBody::Binary(binary)) = parse("TIT2", compressed, b"\x78\x9c\x01") else {
			panic!("Expected a binary frame");
		};
		assert_eq!(binary.data, b"\x78\x9c\x01");

		let encrypted = FrameFlags {
			encryption: Some(0x80),
			..FrameFlags::default()
		};
		assert!(matches!(
			parse("COMM", encrypted, b"\xAB\xCD"),
			Some(FrameBody::Binary(_))
		));
	}
}
