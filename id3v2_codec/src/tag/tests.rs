use super::Id3v2Tag;
use crate::config::{ParseOptions, ParsingMode, WriteOptions};
use crate::frame::{Frame, FrameBody, FrameId};
use crate::header::Id3v2Version;
use crate::items::{
	AttachedPictureFrame, BinaryFrame, CommentFrame, Event, EventTimingCodesFrame, EventType,
	KeyValueFrame, LinkedInformationFrame, PlayCounterFrame, PopularimeterFrame, PrivateFrame,
	RecommendedBufferSizeFrame, RegistrationFrame, SeekFrame, SyncedTempoCodesFrame,
	TextInformationFrame, TimestampFormat, UniqueFileIdentifierFrame, UrlLinkFrame,
};
use crate::picture::{MimeType, PictureType};
use crate::util::text::{TextEncoding, convert};

fn read_tag(bytes: &[u8]) -> Id3v2Tag {
	Id3v2Tag::read_from(bytes, ParseOptions::new()).unwrap()
}

// Tag header + frames, with the size filled in
fn tag_bytes(version: u8, flags: u8, frames: &[&[u8]]) -> Vec<u8> {
	let content = frames.concat();
	let size = crate::util::synchsafe::encode_synchsafe(content.len() as u32).unwrap();

	let mut bytes = vec![b'I', b'D', b'3', version, 0, flags];
	bytes.extend(size);
	bytes.extend(content);
	bytes
}

fn v3_frame(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
	let mut frame = id.to_vec();
	frame.extend((body.len() as u32).to_be_bytes());
	frame.extend([0, 0]);
	frame.extend(body);
	frame
}

fn text_frame(id: FrameId, value: &str) -> Frame {
	Frame::new(
		id,
		FrameBody::Text(TextInformationFrame::new(TextEncoding::UTF8, value)),
	)
	.unwrap()
}

#[test_log::test]
fn single_title() {
	let bytes = tag_bytes(3, 0, &[&v3_frame(b"TIT2", b"\x00Test\x00")]);
	assert_eq!(&bytes[..10], b"ID3\x03\x00\x00\x00\x00\x00\x10");

	let tag = read_tag(&bytes);
	assert_eq!(tag.version(), Id3v2Version::V3);
	assert_eq!(tag.len(), 1);

	let frame = tag.get(FrameId::TIT2).unwrap();
	assert_eq!(frame.id(), FrameId::TIT2);
	assert_eq!(frame.body().kind(), crate::frame::BodyKind::Text);
	assert_eq!(frame.body().text(), Some("Test"));
	assert_eq!(tag.title(), Some("Test"));
}

#[test_log::test]
fn utf16_title_size() {
	let bytes = tag_bytes(3, 0, &[&v3_frame(b"TIT2", b"\x00Test\x00")]);
	let mut tag = read_tag(&bytes);

	let frame = tag.get_mut(FrameId::TIT2).unwrap();
	frame.set_encoding(TextEncoding::UTF16).unwrap();
	frame.set_text("Café").unwrap();

	// Encoding byte + BOM + 2 bytes per character + terminator
	let expected_size = 1 + 2 + 2 * "Café".chars().count() as u32 + 2;
	assert_eq!(frame.size(), expected_size);

	let written = tag.to_bytes(WriteOptions::new()).unwrap();
	assert_eq!(&written[14..18], &expected_size.to_be_bytes());

	let body = &written[20..];
	assert_eq!(body[0], TextEncoding::UTF16 as u8);
	assert_eq!(
		convert(&body[1..], TextEncoding::UTF16, TextEncoding::Latin1).as_deref(),
		Some(&b"Caf\xE9"[..])
	);

	let reread = read_tag(&written);
	let frame = reread.get(FrameId::TIT2).unwrap();
	assert_eq!(frame.size(), expected_size);
	assert_eq!(frame.body().text(), Some("Café"));
	assert_eq!(frame.body().encoding(), Some(TextEncoding::UTF16));
}

#[test_log::test]
fn size_follows_deltas() {
	// No terminator on disk, so the recorded size is one less than the encoded length
	let bytes = tag_bytes(3, 0, &[&v3_frame(b"TIT2", b"\x00Test")]);
	let mut tag = read_tag(&bytes);

	let frame = tag.get_mut(FrameId::TIT2).unwrap();
	assert_eq!(frame.size(), 5);

	frame.set_text("Tests").unwrap();
	assert_eq!(frame.size(), 6);

	// The written size is always the real one
	let written = tag.to_bytes(WriteOptions::new()).unwrap();
	assert_eq!(read_tag(&written).get(FrameId::TIT2).unwrap().size(), 7);
}

#[test_log::test]
fn extended_header_update_only() {
	let extended_header = b"\x00\x00\x00\x07\x01\x40\x00";
	let frame = b"TIT2\x00\x00\x00\x06\x00\x00\x03Test\x00";

	let bytes = tag_bytes(4, 0x40, &[&extended_header[..], &frame[..]]);
	let tag = read_tag(&bytes);

	let extended_header = tag.header().extended_header.unwrap();
	assert!(extended_header.update);
	assert_eq!(extended_header.size, 7);
	assert!(extended_header.crc.is_none());
	assert!(extended_header.restrictions.is_none());

	assert_eq!(tag.title(), Some("Test"));
}

#[test_log::test]
fn unknown_frame_skipped() {
	let bytes = tag_bytes(
		3,
		0,
		&[
			&v3_frame(b"XYZ1", b"\x00\x01\x02"),
			&v3_frame(b"TPE1", b"\x00Artist"),
		],
	);

	for parsing_mode in [
		ParsingMode::Strict,
		ParsingMode::BestAttempt,
		ParsingMode::Relaxed,
	] {
		let tag =
			Id3v2Tag::read_from(&bytes, ParseOptions::new().parsing_mode(parsing_mode)).unwrap();

		assert_eq!(tag.len(), 1);
		assert_eq!(tag.frames().next().unwrap().id(), FrameId::TPE1);
		assert_eq!(tag.artist(), Some("Artist"));
	}
}

#[test_log::test]
fn invalid_frame_ids_skipped() {
	for id in [b"abc1", b"COM ", b"XY-Z"] {
		let bytes = tag_bytes(
			3,
			0,
			&[
				&v3_frame(id, b"\x00\x01\x02"),
				&v3_frame(b"TPE1", b"\x00Artist"),
			],
		);

		let tag = read_tag(&bytes);
		assert_eq!(tag.len(), 1);
		assert_eq!(tag.artist(), Some("Artist"));

		let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
		assert!(Id3v2Tag::read_from(&bytes, strict).is_err());
	}
}

#[test_log::test]
fn timing_frames_with_undefined_formats() {
	let bytes = tag_bytes(
		3,
		0,
		&[
			&v3_frame(b"SYTC", b"\x02\x78\x00"),
			&v3_frame(b"ETCO", b"\x00\x03\x00\x00\x01\x00"),
		],
	);

	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	let tag = Id3v2Tag::read_from(&bytes, strict).unwrap();
	assert_eq!(tag.len(), 2);

	let FrameBody::SyncedTempoCodes(sytc) = tag.get(FrameId::SYTC).unwrap().body() else {
		panic!("Expected synced tempo codes");
	};
	assert_eq!(sytc.timestamp_format, TimestampFormat::MS);
	assert_eq!(sytc.tempo_data, [0x78, 0x00]);

	let FrameBody::EventTimingCodes(etco) = tag.get(FrameId::ETCO).unwrap().body() else {
		panic!("Expected event timing codes");
	};
	assert_eq!(etco.timestamp_format, TimestampFormat::Undefined(0));
	assert_eq!(etco.events[0].event_type, EventType::MainPartStart);
}

#[test_log::test]
fn picture_format_field_per_version() {
	let data = [0xFF, 0xD8, 0xFF, 0xE0];

	let mut pic = b"PIC".to_vec();
	let pic_body = [&b"\x00JPG\x03\x00"[..], &data].concat();
	pic.extend(&(pic_body.len() as u32).to_be_bytes()[1..]);
	pic.extend(pic_body);

	let apic_body = [&b"\x00image/jpeg\x00\x03\x00"[..], &data].concat();
	let apic = v3_frame(b"APIC", &apic_body);

	let v2 = read_tag(&tag_bytes(2, 0, &[&pic]));
	let v3 = read_tag(&tag_bytes(3, 0, &[&apic]));

	assert_eq!(v2.get(FrameId::PIC).unwrap().id(), FrameId::PIC);
	assert_eq!(v3.get(FrameId::APIC).unwrap().id(), FrameId::APIC);

	let v2_picture = v2.picture(PictureType::CoverFront).unwrap();
	let v3_picture = v3.picture(PictureType::CoverFront).unwrap();

	assert_eq!(v2_picture, v3_picture);
	assert_eq!(v2_picture.mime_type, Some(MimeType::Jpeg));
	assert_eq!(v2_picture.picture_type.as_u8(), 3);
	assert_eq!(v2_picture.data, data);
}

#[test_log::test]
fn extraction_terminates() {
	let original = tag_bytes(
		3,
		0,
		&[
			&v3_frame(b"TIT2", b"\x00Title\x00"),
			&v3_frame(b"COMM", b"\x00engdesc\x00text"),
			&v3_frame(b"PCNT", b"\x00\x00\x00\x05"),
			&v3_frame(b"TPE1", b"\x01\xFF\xFEA\x00\x00\x00"),
		],
	);
	assert_eq!(read_tag(&original).len(), 4);

	for parsing_mode in [
		ParsingMode::Strict,
		ParsingMode::BestAttempt,
		ParsingMode::Relaxed,
	] {
		let parse_options = ParseOptions::new().parsing_mode(parsing_mode);

		// Truncated anywhere
		for len in 0..original.len() {
			if let Ok(tag) = Id3v2Tag::read_from(&original[..len], parse_options) {
				assert!(tag.len() <= 4);
			}
		}

		// Any single byte of the frame region corrupted
		for pos in 10..original.len() {
			for value in [0x00, 0x01, 0x7F, 0x80, 0xFF] {
				let mut corrupt = original.clone();
				corrupt[pos] = value;

				if let Ok(tag) = Id3v2Tag::read_from(&corrupt, parse_options) {
					assert!(tag.len() <= 4);
				}
			}
		}
	}
}

#[test_log::test]
fn oversized_frame_stops_extraction() {
	let mut oversized = v3_frame(b"TPE1", b"\x00Artist");
	oversized[7] = 0xFF;

	let bytes = tag_bytes(
		3,
		0,
		&[&v3_frame(b"TIT2", b"\x00Title\x00"), &oversized],
	);

	let tag = read_tag(&bytes);
	assert_eq!(tag.len(), 1);
	assert_eq!(tag.title(), Some("Title"));

	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	assert!(Id3v2Tag::read_from(&bytes, strict).is_err());
}

#[test_log::test]
fn bad_body_recovery() {
	let bytes = tag_bytes(
		3,
		0,
		&[
			// Unknown encoding byte
			&v3_frame(b"TIT2", b"\x07Title\x00"),
			&v3_frame(b"TPE1", b"\x00Artist\x00"),
		],
	);

	let tag = read_tag(&bytes);
	assert_eq!(tag.len(), 1);
	assert_eq!(tag.artist(), Some("Artist"));

	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	assert!(Id3v2Tag::read_from(&bytes, strict).is_err());
}

#[test_log::test]
fn unsynchronised_tag_is_empty() {
	let bytes = tag_bytes(3, 0x80, &[&v3_frame(b"TIT2", b"\x00Title\x00")]);

	let tag = read_tag(&bytes);
	assert!(tag.header().flags.unsynchronisation);
	assert!(tag.is_empty());
}

#[test_log::test]
fn padding_ends_extraction() {
	let bytes = tag_bytes(
		4,
		0,
		&[&b"TIT2\x00\x00\x00\x07\x00\x00\x03Title\x00"[..], &[0u8; 64][..]],
	);

	let tag = read_tag(&bytes);
	assert_eq!(tag.len(), 1);
	assert_eq!(tag.header().size, 81);
}

#[test_log::test]
fn parse_options() {
	let apic_body = b"\x00image/png\x00\x03\x00\x89PNG";
	let bytes = tag_bytes(
		3,
		0,
		&[
			&v3_frame(b"TIT2", b"\x00Title\x00"),
			&v3_frame(b"APIC", apic_body),
			&v3_frame(b"TPE1", b"\x00Artist\x00"),
		],
	);

	let tag =
		Id3v2Tag::read_from(&bytes, ParseOptions::new().read_cover_art(false)).unwrap();
	assert_eq!(tag.len(), 2);
	assert!(tag.pictures().next().is_none());
	assert_eq!(tag.artist(), Some("Artist"));

	let tag = Id3v2Tag::read_from(&bytes, ParseOptions::new().max_frames(Some(2))).unwrap();
	assert_eq!(tag.len(), 2);
	assert!(tag.artist().is_none());
}

#[test_log::test]
fn unknown_text_frames_are_kept() {
	let bytes = tag_bytes(3, 0, &[&v3_frame(b"TXYZ", b"\x00Custom\x00")]);

	let tag = read_tag(&bytes);
	let frame = tag.get_raw("TXYZ").unwrap();
	assert_eq!(frame.id(), FrameId::Unknown);
	assert_eq!(frame.body().text(), Some("Custom"));

	let written = tag.to_bytes(WriteOptions::new()).unwrap();
	assert_eq!(written, bytes);
}

#[test_log::test]
fn reader_is_left_after_tag() {
	let mut bytes = tag_bytes(3, 0, &[&v3_frame(b"TIT2", b"\x00Title\x00")]);
	bytes.extend(b"audio");

	let mut reader = &bytes[..];
	let tag = Id3v2Tag::read_from_reader(&mut reader, ParseOptions::new()).unwrap();

	assert_eq!(tag.title(), Some("Title"));
	assert_eq!(reader, b"audio");
}

#[test_log::test]
fn write_order_is_kept() {
	let mut tag = Id3v2Tag::new(Id3v2Version::V4);
	for (id, value) in [
		(FrameId::TPE1, "Artist"),
		(FrameId::TIT2, "Title"),
		(FrameId::TPE1, "Second artist"),
	] {
		tag.insert(text_frame(id, value));
	}

	let reread = read_tag(&tag.to_bytes(WriteOptions::new()).unwrap());
	let values = reread
		.frames()
		.map(|f| (f.id(), f.body().text().unwrap()))
		.collect::<Vec<_>>();

	assert_eq!(
		values,
		[
			(FrameId::TPE1, "Artist"),
			(FrameId::TIT2, "Title"),
			(FrameId::TPE1, "Second artist"),
		]
	);

	let removed = tag.remove(FrameId::TPE1);
	assert_eq!(removed.len(), 2);
	assert_eq!(tag.len(), 1);
}

#[test_log::test]
fn bodies_survive_writing() {
	let mut tag = Id3v2Tag::new(Id3v2Version::V4);

	let bodies = [
		(
			FrameId::TXXX,
			FrameBody::Text(TextInformationFrame::new_user_defined(
				TextEncoding::UTF8,
				"description",
				"value",
			)),
		),
		(
			FrameId::WXXX,
			FrameBody::Url(UrlLinkFrame::new_user_defined(
				TextEncoding::UTF16BE,
				"homepage",
				"https://example.com",
			)),
		),
		(
			FrameId::COMM,
			FrameBody::Comment(CommentFrame::new(
				TextEncoding::UTF16,
				*b"eng",
				"",
				"A comment",
			)),
		),
		(
			FrameId::APIC,
			FrameBody::Picture(AttachedPictureFrame::new(
				TextEncoding::Latin1,
				Some(MimeType::Png),
				PictureType::CoverBack,
				"back",
				vec![0x89, b'P', b'N', b'G'],
			)),
		),
		(
			FrameId::TIPL,
			FrameBody::KeyValue(KeyValueFrame::new(
				TextEncoding::UTF8,
				vec![
					(String::from("producer"), String::from("Foo")),
					(String::from("mix"), String::from("Bar")),
				],
			)),
		),
		(
			FrameId::ETCO,
			FrameBody::EventTimingCodes(EventTimingCodesFrame::new(
				TimestampFormat::MS,
				vec![Event {
					event_type: EventType::IntroStart,
					timestamp: 1000,
				}],
			)),
		),
		(
			FrameId::PCNT,
			FrameBody::PlayCounter(PlayCounterFrame::new(u64::from(u32::MAX) + 10)),
		),
		(
			FrameId::POPM,
			FrameBody::Popularimeter(PopularimeterFrame::new("foo@bar.com", 255, 42)),
		),
		(
			FrameId::UFID,
			FrameBody::UniqueFileIdentifier(UniqueFileIdentifierFrame::new(
				"http://musicbrainz.org",
				b"some-id".to_vec(),
			)),
		),
		(
			FrameId::PRIV,
			FrameBody::Private(PrivateFrame::new("owner", vec![1, 2, 3])),
		),
		(
			FrameId::GRID,
			FrameBody::GroupRegistration(RegistrationFrame::new("owner", 0x80, vec![4])),
		),
		(FrameId::SEEK, FrameBody::Seek(SeekFrame::new(1024))),
		(
			FrameId::SYTC,
			FrameBody::SyncedTempoCodes(SyncedTempoCodesFrame::new(
				TimestampFormat::MPEG,
				vec![0x78, 0x00, 0x00, 0x00, 0x00],
			)),
		),
		(
			FrameId::LINK,
			FrameBody::LinkedInformation(LinkedInformationFrame::new(
				"TIT2http://example.com/a.mp3",
				b"track 1".to_vec(),
			)),
		),
		(
			FrameId::RBUF,
			FrameBody::RecommendedBufferSize(RecommendedBufferSizeFrame::new(
				0x1000,
				true,
				Some(64),
			)),
		),
		(
			FrameId::RVA2,
			FrameBody::Binary(BinaryFrame::new(vec![0, 1, 2, 3])),
		),
	];

	for (id, body) in bodies.clone() {
		tag.insert(Frame::new(id, body).unwrap());
	}

	let written = tag.to_bytes(WriteOptions::new()).unwrap();
	let reread = read_tag(&written);

	assert_eq!(reread.len(), bodies.len());
	for ((id, body), frame) in bodies.iter().zip(reread.frames()) {
		assert_eq!(frame.id(), *id);
		assert_eq!(frame.body(), body);
	}

	// Constructed sizes match what's written
	for (constructed, read) in tag.frames().zip(reread.frames()) {
		assert_eq!(constructed.size(), read.size(), "{}", constructed.raw_id());
	}
}
