use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::{Frame, FrameFlags};
use crate::header::{ExtendedHeader, Id3v2Header, Id3v2Version};
use crate::macros::{err, try_vec};
use crate::tag::Id3v2Tag;

use std::borrow::Cow;
use std::io::Write;
use std::ops::Not;
use std::sync::OnceLock;

fn crc_32_table() -> &'static [u32; 256] {
	static INSTANCE: OnceLock<[u32; 256]> = OnceLock::new();
	INSTANCE.get_or_init(|| {
		let mut crc32_table = [0; 256];

		for n in 0..256 {
			crc32_table[n as usize] = (0..8).fold(n as u32, |acc, _| match acc & 1 {
				1 => 0xEDB8_8320 ^ (acc >> 1),
				_ => acc >> 1,
			});
		}

		crc32_table
	})
}

/// CRC-32 (IEEE) of `content`
pub(crate) fn calculate_crc(content: &[u8]) -> u32 {
	content
		.iter()
		.fold(!0, |crc: u32, octet| {
			(crc >> 8) ^ crc_32_table()[((crc & 0xFF) ^ u32::from(*octet)) as usize]
		})
		.not()
}

pub(crate) fn create_tag(tag: &Id3v2Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	let version = tag.version();
	log::debug!("Writing {version} tag with {} frames", tag.len());

	let mut frame_region = Vec::new();
	for frame in tag.frames() {
		write_frame(&mut frame_region, frame, version, write_options)?;
	}

	let mut header = *tag.header();

	// Frames are never written unsynchronised
	header.flags.unsynchronisation = false;

	if header.flags.footer && version != Id3v2Version::V4 {
		log::debug!("Footers are only supported in ID3v2.4, dropping the flag");
		header.flags.footer = false;
	}

	let has_footer = header.flags.footer;

	// "[A tag] MUST NOT have any padding when a tag footer is added to the tag"
	let padding_len = match write_options.preferred_padding {
		Some(padding) if !has_footer => padding,
		_ => 0,
	};

	header.extended_header = create_extended_header(
		header.extended_header,
		version,
		&frame_region,
		padding_len,
		write_options,
	);

	let extended_header_len = header
		.extended_header
		.map_or(0, |ext| ext.encoded_len(version));

	let Ok(frame_region_len) = u32::try_from(frame_region.len()) else {
		err!(TooMuchData);
	};

	let Some(size) = frame_region_len
		.checked_add(extended_header_len)
		.and_then(|size| size.checked_add(padding_len))
	else {
		err!(TooMuchData);
	};

	header.size = size;

	let mut id3v2 = Vec::with_capacity(Id3v2Header::SIZE * 2 + size as usize);
	id3v2.write_all(&header.as_bytes()?)?;

	if let Some(extended_header) = header.extended_header {
		extended_header.write_to(&mut id3v2, version)?;
	}

	id3v2.write_all(&frame_region)?;

	if has_footer {
		log::trace!("Footer requested, not padding tag");
		id3v2.write_all(&header.footer_bytes()?)?;
		return Ok(id3v2);
	}

	if padding_len > 0 {
		log::trace!("Padding tag with {padding_len} bytes");
		id3v2.write_all(&try_vec![0; padding_len as usize])?;
	}

	Ok(id3v2)
}

fn create_extended_header(
	existing: Option<ExtendedHeader>,
	version: Id3v2Version,
	frame_region: &[u8],
	padding_len: u32,
	write_options: WriteOptions,
) -> Option<ExtendedHeader> {
	if version == Id3v2Version::V2 {
		return None;
	}

	let mut extended_header = existing;
	if write_options.crc {
		extended_header.get_or_insert_with(ExtendedHeader::default).crc = Some(0);
	}

	let mut extended_header = extended_header?;

	// A CRC read from the original tag would be stale
	if extended_header.crc.is_some() {
		extended_header.crc = Some(calculate_crc(frame_region));
	}

	extended_header.padding = match version {
		Id3v2Version::V3 => padding_len,
		_ => 0,
	};

	extended_header.size = extended_header.encoded_len(version);
	Some(extended_header)
}

fn write_frame<W>(
	writer: &mut W,
	frame: &Frame,
	version: Id3v2Version,
	write_options: WriteOptions,
) -> Result<()>
where
	W: Write,
{
	if let Some(encoding) = frame.body().encoding() {
		let substitute = encoding.for_version(version);
		if substitute != encoding {
			log::warn!(
				"{}: {} is not supported in {version}, writing as {}",
				frame.raw_id(),
				encoding.name(),
				substitute.name()
			);
		}
	}

	let content = frame
		.body()
		.as_bytes(version, write_options.lossy_text_encoding)?;

	let Ok(body_len) = u32::try_from(content.len()) else {
		err!(TooMuchData);
	};

	if body_len != frame.size() {
		log::debug!(
			"{}: recorded size {} differs from the encoded body ({body_len}), using the latter",
			frame.raw_id(),
			frame.size()
		);
	}

	// The data length of a plain body is the body itself
	let flags = frame.flags();
	let header = match flags.data_length_indicator {
		Some(len) if len != body_len && !flags.is_opaque() => {
			log::trace!("{}: updating data length {len} to {body_len}", frame.raw_id());

			let mut header = frame.header().clone();
			header.set_flags(FrameFlags {
				data_length_indicator: Some(body_len),
				..flags
			});
			Cow::Owned(header)
		},
		_ => Cow::Borrowed(frame.header()),
	};

	header.write_to(writer, version, body_len)?;
	writer.write_all(&content)?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::calculate_crc;
	use crate::config::{ParseOptions, ParsingMode, WriteOptions};
	use crate::frame::{Frame, FrameBody, FrameId};
	use crate::header::{Id3v2Header, Id3v2Version};
	use crate::items::TextInformationFrame;
	use crate::tag::Id3v2Tag;
	use crate::util::text::TextEncoding;

	fn tag_with_title(version: Id3v2Version, id: FrameId, encoding: TextEncoding) -> Id3v2Tag {
		let mut tag = Id3v2Tag::new(version);
		tag.insert(
			Frame::new(
				id,
				FrameBody::Text(TextInformationFrame::new(encoding, "Title")),
			)
			.unwrap(),
		);

		tag
	}

	#[test_log::test]
	fn crc_check_value() {
		assert_eq!(calculate_crc(b"123456789"), 0xCBF4_3926);
		assert_eq!(calculate_crc(b""), 0);
	}

	#[test_log::test]
	fn exact_size_without_padding() {
		let tag = tag_with_title(Id3v2Version::V3, FrameId::TIT2, TextEncoding::Latin1);
		let bytes = tag.to_bytes(WriteOptions::new()).unwrap();

		// Header (10) + frame header (10) + encoding byte, "Title", terminator (7)
		assert_eq!(bytes.len(), 27);
		assert_eq!(&bytes[..10], b"ID3\x03\x00\x00\x00\x00\x00\x11");
		assert_eq!(&bytes[10..20], b"TIT2\x00\x00\x00\x07\x00\x00");
	}

	#[test_log::test]
	fn padding_is_counted() {
		let tag = tag_with_title(Id3v2Version::V4, FrameId::TIT2, TextEncoding::UTF8);
		let bytes = tag
			.to_bytes(WriteOptions::new().preferred_padding(100))
			.unwrap();

		let header = Id3v2Header::parse(&mut &bytes[..]).unwrap();
		assert_eq!(header.size, 117);
		assert_eq!(bytes.len(), 127);
		assert!(bytes[27..].iter().all(|b| *b == 0));
	}

	#[test_log::test]
	fn footer_replaces_padding() {
		let mut tag = tag_with_title(Id3v2Version::V4, FrameId::TIT2, TextEncoding::UTF8);
		tag.header_mut().flags.footer = true;

		let bytes = tag
			.to_bytes(WriteOptions::new().preferred_padding(100))
			.unwrap();
		assert_eq!(bytes.len(), 37);
		assert_eq!(&bytes[27..30], b"3DI");
		assert_eq!(&bytes[30..], &bytes[3..10]);

		let mut tag = tag_with_title(Id3v2Version::V3, FrameId::TIT2, TextEncoding::Latin1);
		tag.header_mut().flags.footer = true;

		let bytes = tag.to_bytes(WriteOptions::new()).unwrap();
		assert_eq!(bytes.len(), 27);
		assert_eq!(bytes[5], 0);
	}

	#[test_log::test]
	fn crc_extended_header() {
		for version in [Id3v2Version::V3, Id3v2Version::V4] {
			let tag = tag_with_title(version, FrameId::TIT2, TextEncoding::Latin1);
			let bytes = tag.to_bytes(WriteOptions::new().crc(true)).unwrap();

			let mut reader = &bytes[..];
			let header = Id3v2Header::parse(&mut reader).unwrap();
			let extended_header = header.extended_header.unwrap();

			assert_eq!(extended_header.crc, Some(calculate_crc(reader)));
			assert_eq!(header.frame_region_size() as usize, reader.len());
		}

		// No extended header in ID3v2.2
		let tag = tag_with_title(Id3v2Version::V2, FrameId::TT2, TextEncoding::Latin1);
		let bytes = tag.to_bytes(WriteOptions::new().crc(true)).unwrap();
		assert_eq!(bytes[5], 0);
		assert_eq!(bytes.len(), 10 + 6 + 7);
	}

	#[test_log::test]
	fn v3_padding_in_extended_header() {
		let tag = tag_with_title(Id3v2Version::V3, FrameId::TIT2, TextEncoding::Latin1);
		let bytes = tag
			.to_bytes(WriteOptions::new().crc(true).preferred_padding(16))
			.unwrap();

		let header = Id3v2Header::parse(&mut &bytes[..]).unwrap();
		assert_eq!(header.extended_header.unwrap().padding, 16);
		assert_eq!(header.frame_region_size(), 17);
	}

	#[test_log::test]
	fn encoding_substituted_for_old_versions() {
		let tag = tag_with_title(Id3v2Version::V3, FrameId::TIT2, TextEncoding::UTF8);
		let bytes = tag.to_bytes(WriteOptions::new()).unwrap();

		// UTF-16 with a BOM, written with its actual length
		assert_eq!(bytes[20], 1);
		assert_eq!(&bytes[14..18], &[0, 0, 0, 15]);
	}

	#[test_log::test]
	fn id_width_must_match_version() {
		let tag = tag_with_title(Id3v2Version::V2, FrameId::TIT2, TextEncoding::Latin1);
		assert!(tag.to_bytes(WriteOptions::new()).is_err());

		let tag = tag_with_title(Id3v2Version::V4, FrameId::TT2, TextEncoding::Latin1);
		assert!(tag.to_bytes(WriteOptions::new()).is_err());
	}

	#[test_log::test]
	fn data_length_follows_edited_body() {
		// TIT2 with the data length indicator flag, a data length of 5, and "Title"
		let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x14".to_vec();
		bytes.extend(b"TIT2\x00\x00\x00\x0A\x00\x01\x00\x00\x00\x05\x00Title");

		let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
		let mut tag = Id3v2Tag::read_from(&bytes, strict).unwrap();

		let title = tag.get_mut(FrameId::TIT2).unwrap();
		assert_eq!(title.flags().data_length_indicator, Some(5));
		title.set_text("Longer value").unwrap();

		let written = tag.to_bytes(WriteOptions::new()).unwrap();
		let reread = Id3v2Tag::read_from(&written, strict).unwrap();

		let title = reread.get(FrameId::TIT2).unwrap();
		assert_eq!(title.body().text(), Some("Longer value"));
		// Encoding, text, terminator
		assert_eq!(title.size(), 14);
		assert_eq!(title.flags().data_length_indicator, Some(14));

		// Frame size (4 + 14), flags, then the data length
		assert_eq!(&written[14..24], b"\x00\x00\x00\x12\x00\x01\x00\x00\x00\x0E");
	}
}
