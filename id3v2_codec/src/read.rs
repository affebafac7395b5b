use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::frame::content::parse_content;
use crate::frame::{BodyKind, Frame, FrameHeader, FrameId, expected_kind};
use crate::header::{Id3v2Header, Id3v2Version};
use crate::macros::id3v2_err;
use crate::tag::Id3v2Tag;
use crate::util::alloc::VecFallibleCapacity;

use std::io::Read;

pub(crate) enum ParsedFrame {
	Next(Frame),
	Skip,
	Eof,
}

impl ParsedFrame {
	/// Read the frame at the start of `region`
	///
	/// `region` is advanced past the frame, unless extraction should stop.
	pub(crate) fn read(
		region: &mut &[u8],
		version: Id3v2Version,
		parse_options: ParseOptions,
	) -> Result<Self> {
		let parse_mode = parse_options.parsing_mode;
		let mut reader = *region;

		let header = match FrameHeader::parse(&mut reader, version) {
			// Padding, or not enough left for a header
			Ok(None) => return Ok(Self::Eof),
			Ok(Some(header)) => header,
			Err(err) => {
				if parse_mode == ParsingMode::Strict {
					return Err(err);
				}

				log::warn!("Failed to read frame header, stopping: {err}");
				return Ok(Self::Eof);
			},
		};

		let size = header.size() as usize;
		if size == 0 || size > reader.len() {
			if parse_mode == ParsingMode::Strict {
				id3v2_err!(BadFrameLength);
			}

			log::warn!(
				"Frame {} declares {size} bytes with {} remaining, stopping",
				header.raw_id(),
				reader.len()
			);
			return Ok(Self::Eof);
		}

		let (content, rest) = reader.split_at(size);
		*region = rest;

		if !header.has_valid_id() {
			if parse_mode == ParsingMode::Strict {
				id3v2_err!(BadFrameId(header.raw_id().as_bytes().to_vec()));
			}

			log::warn!("Invalid frame ID {:?}, skipping", header.raw_id());
			return Ok(Self::Skip);
		}

		if !parse_options.read_cover_art && expected_kind(&header) == BodyKind::Picture {
			log::trace!("Skipping picture frame {}", header.raw_id());
			return Ok(Self::Skip);
		}

		match parse_content(&mut &content[..], &header, version, parse_mode) {
			Ok(Some(body)) => Ok(Self::Next(Frame::from_parts(header, body))),
			Ok(None) => {
				if header.id() == FrameId::Unknown {
					log::warn!("Unknown frame {}, skipping", header.raw_id());
				} else {
					log::trace!("Frame {} has no readable content, skipping", header.raw_id());
				}

				Ok(Self::Skip)
			},
			Err(err) => {
				if parse_mode == ParsingMode::Strict {
					return Err(err);
				}

				log::warn!("Failed to parse frame {}, skipping: {err}", header.raw_id());
				Ok(Self::Skip)
			},
		}
	}
}

pub(crate) fn parse_id3v2<R>(
	reader: &mut R,
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag>
where
	R: Read,
{
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	let region_size = header.frame_region_size();

	// A short read is fine, the extraction loop stops at the end of what's there
	let mut region = Vec::try_with_capacity_stable(region_size as usize)?;
	reader
		.take(u64::from(region_size))
		.read_to_end(&mut region)?;

	if (region.len() as u64) < u64::from(region_size) {
		log::warn!(
			"Tag declares {region_size} bytes of frames, only {} are available",
			region.len()
		);
	}

	let mut tag = Id3v2Tag::from_header(header);

	if header.flags.unsynchronisation {
		log::warn!("Tag is unsynchronised, frames will not be read");
		return Ok(tag);
	}

	read_all_frames_into_tag(&region, &mut tag, parse_options)?;
	Ok(tag)
}

fn read_all_frames_into_tag(
	mut region: &[u8],
	tag: &mut Id3v2Tag,
	parse_options: ParseOptions,
) -> Result<()> {
	let version = tag.version();

	while !region.is_empty() {
		if let Some(max_frames) = parse_options.max_frames {
			if tag.len() >= max_frames {
				log::debug!("Reached the frame limit ({max_frames}), stopping");
				break;
			}
		}

		match ParsedFrame::read(&mut region, version, parse_options)? {
			ParsedFrame::Next(frame) => tag.insert(frame),
			// No frame content found or ignored due to errors, but we can expect more frames
			ParsedFrame::Skip => {},
			// No frame found, and we can expect there are no more frames
			ParsedFrame::Eof => break,
		}
	}

	if region.iter().any(|b| *b != 0) {
		log::debug!("Discarding {} bytes at the end of the tag", region.len());
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::ParsedFrame;
	use crate::config::{ParseOptions, ParsingMode};
	use crate::frame::FrameId;
	use crate::header::Id3v2Version;

	fn strict() -> ParseOptions {
		ParseOptions::new().parsing_mode(ParsingMode::Strict)
	}

	#[test_log::test]
	fn region_is_advanced() {
		let bytes = b"TIT2\x00\x00\x00\x04\x00\x00\x00abcTPE1";
		let mut region = &bytes[..];

		let ParsedFrame::Next(frame) =
			ParsedFrame::read(&mut region, Id3v2Version::V3, strict()).unwrap()
		else {
			panic!("Expected a frame");
		};

		assert_eq!(frame.id(), FrameId::TIT2);
		assert_eq!(region, b"TPE1");
	}

	#[test_log::test]
	fn bad_body_is_skipped() {
		// Encoding byte 9 doesn't exist
		let bytes = b"TIT2\x00\x00\x00\x02\x00\x00\x09a";

		let mut region = &bytes[..];
		assert!(ParsedFrame::read(&mut region, Id3v2Version::V3, strict()).is_err());

		let mut region = &bytes[..];
		assert!(matches!(
			ParsedFrame::read(&mut region, Id3v2Version::V3, ParseOptions::new()).unwrap(),
			ParsedFrame::Skip
		));
		assert!(region.is_empty());
	}

	#[test_log::test]
	fn stops_on_bad_sizes() {
		// Zero length body
		let mut region = &b"TIT2\x00\x00\x00\x00\x00\x00TPE1"[..];
		assert!(matches!(
			ParsedFrame::read(&mut region, Id3v2Version::V3, ParseOptions::new()).unwrap(),
			ParsedFrame::Eof
		));

		// Larger than the region
		let mut region = &b"TIT2\x00\x00\x00\xFF\x00\x00\x00abc"[..];
		assert!(matches!(
			ParsedFrame::read(&mut region, Id3v2Version::V3, ParseOptions::new()).unwrap(),
			ParsedFrame::Eof
		));
		assert!(ParsedFrame::read(&mut region, Id3v2Version::V3, strict()).is_err());
	}

	#[test_log::test]
	fn invalid_id_is_skipped() {
		let bytes = b"XY-Z\x00\x00\x00\x01\x00\x00\x00TPE1";

		let mut region = &bytes[..];
		assert!(matches!(
			ParsedFrame::read(&mut region, Id3v2Version::V3, ParseOptions::new()).unwrap(),
			ParsedFrame::Skip
		));
		assert_eq!(region, b"TPE1");

		let mut region = &bytes[..];
		assert!(ParsedFrame::read(&mut region, Id3v2Version::V3, strict()).is_err());
	}

	#[test_log::test]
	fn padding_stops() {
		let mut region = &[0_u8; 32][..];
		assert!(matches!(
			ParsedFrame::read(&mut region, Id3v2Version::V4, strict()).unwrap(),
			ParsedFrame::Eof
		));
	}
}
