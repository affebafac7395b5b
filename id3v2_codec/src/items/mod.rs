//! Frame body shapes
//!
//! Every body is a plain value with no knowledge of its frame header. They share a common
//! surface:
//!
//! * `parse` reads the body from a reader bounded to the frame's declared size, returning
//!   `None` when there is nothing to read
//! * `as_bytes` produces the body for a given [`Id3v2Version`]
//! * `encoded_len` is the length `as_bytes` would produce, without allocating
//!
//! Every string is written with its terminator, including the final string of a body.

mod attached_picture_frame;
mod audio_encryption_frame;
mod binary_frame;
mod commercial_frame;
mod encapsulated_object;
mod encrypted_meta_frame;
mod event_timing_codes_frame;
mod key_value_frame;
mod language_frame;
mod linked_information_frame;
mod ownership_frame;
mod play_counter_frame;
mod popularimeter;
mod position_synchronization_frame;
mod private_frame;
mod recommended_buffer_size_frame;
mod registration_frame;
mod seek_frame;
mod signature_frame;
mod sync_text;
mod synced_tempo_codes_frame;
mod terms_of_use_frame;
mod text_information_frame;
mod unique_file_identifier;
mod url_link_frame;

pub use attached_picture_frame::AttachedPictureFrame;
pub use audio_encryption_frame::AudioEncryptionFrame;
pub use binary_frame::BinaryFrame;
pub use commercial_frame::{CommercialFrame, ReceivedAs};
pub use encapsulated_object::GeneralEncapsulatedObject;
pub use encrypted_meta_frame::EncryptedMetaFrame;
pub use event_timing_codes_frame::{Event, EventTimingCodesFrame, EventType};
pub use key_value_frame::KeyValueFrame;
pub use language_frame::{CommentFrame, UnsynchronizedTextFrame};
pub use linked_information_frame::LinkedInformationFrame;
pub use ownership_frame::OwnershipFrame;
pub use play_counter_frame::PlayCounterFrame;
pub use popularimeter::PopularimeterFrame;
pub use position_synchronization_frame::PositionSynchronizationFrame;
pub use private_frame::PrivateFrame;
pub use recommended_buffer_size_frame::RecommendedBufferSizeFrame;
pub use registration_frame::RegistrationFrame;
pub use seek_frame::SeekFrame;
pub use signature_frame::SignatureFrame;
pub use sync_text::{SyncTextContentType, SynchronizedTextFrame, TimestampFormat};
pub use synced_tempo_codes_frame::{SyncedTempoCodesFrame, TempoCode};
pub use terms_of_use_frame::TermsOfUseFrame;
pub use text_information_frame::TextInformationFrame;
pub use unique_file_identifier::UniqueFileIdentifierFrame;
pub use url_link_frame::UrlLinkFrame;

use crate::config::ParsingMode;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::header::Id3v2Version;
use crate::macros::id3v2_err;
use crate::util::text::{DecodeTextResult, TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

/// Read and verify the encoding byte at the start of a body
///
/// This returns `None` if the body is empty.
pub(crate) fn read_encoding<R>(
	reader: &mut R,
	version: Id3v2Version,
	parse_mode: ParsingMode,
) -> Result<Option<TextEncoding>>
where
	R: Read,
{
	let Ok(encoding_byte) = reader.read_u8() else {
		return Ok(None);
	};

	verify_encoding(encoding_byte, version, parse_mode).map(Some)
}

pub(crate) fn verify_encoding(
	encoding: u8,
	version: Id3v2Version,
	parse_mode: ParsingMode,
) -> Result<TextEncoding> {
	if version == Id3v2Version::V2 && (encoding != 0 && encoding != 1) {
		log::warn!("Found an ID3v2.4 text encoding ({encoding}) in an ID3v2.2 frame");
	}

	match TextEncoding::from_u8(encoding) {
		Some(e) => Ok(e),
		None if parse_mode == ParsingMode::Relaxed => {
			log::warn!("Unknown text encoding {encoding}, decoding as ISO-8859-1");
			Ok(TextEncoding::Latin1)
		},
		None => id3v2_err!(UnsupportedTextEncoding(encoding)),
	}
}

pub(crate) fn decode_terminated<R>(
	reader: &mut R,
	encoding: TextEncoding,
) -> Result<DecodeTextResult>
where
	R: Read,
{
	decode_text(
		reader,
		TextDecodeOptions::new().encoding(encoding).terminated(true),
	)
}

pub(crate) fn decode_latin1_terminated<R>(reader: &mut R) -> Result<String>
where
	R: Read,
{
	Ok(decode_terminated(reader, TextEncoding::Latin1)?.content)
}

/// Decode everything left in the body, trailing terminators are trimmed
///
/// `bom` is used for UTF-16 text that doesn't start with its own byte order mark, it should
/// be the BOM of a previous string in the same body.
pub(crate) fn decode_remainder<R>(
	reader: &mut R,
	encoding: TextEncoding,
	bom: [u8; 2],
) -> Result<String>
where
	R: Read,
{
	let options = TextDecodeOptions::new().encoding(encoding).bom(bom);
	Ok(decode_text(reader, options)?.content)
}

pub(crate) fn encode_terminated(
	text: &str,
	encoding: TextEncoding,
	lossy: bool,
) -> Result<Vec<u8>> {
	Ok(encoding.encode(text, true, lossy)?)
}

pub(crate) fn verify_language(language: [u8; 3]) -> Result<()> {
	if language.iter().any(|c| !c.is_ascii_alphabetic()) {
		return Err(Id3v2Error::new(Id3v2ErrorKind::InvalidLanguage(language)).into());
	}

	Ok(())
}

/// Decode a big-endian counter of any length
///
/// Counters that don't fit in a `u64` are clamped to `u64::MAX`.
pub(crate) fn decode_counter(bytes: &[u8]) -> u64 {
	let significant = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
	if bytes.len() - significant > 8 {
		return u64::MAX;
	}

	crate::util::synchsafe::decode_be(bytes)
}

// When the counter reaches all one's, one byte is inserted in front of the counter
// thus making the counter eight bits bigger
//
// $xx xx xx xx (xx ...)
pub(crate) fn encode_counter(counter: u64) -> Vec<u8> {
	if let Ok(counter) = u32::try_from(counter) {
		return counter.to_be_bytes().to_vec();
	}

	let counter_bytes = counter.to_be_bytes();
	let i = counter_bytes.iter().position(|b| *b != 0).unwrap_or(4);

	counter_bytes[i..].to_vec()
}

pub(crate) fn counter_len(counter: u64) -> usize {
	if u32::try_from(counter).is_ok() {
		return 4;
	}

	8 - (counter.leading_zeros() / 8) as usize
}
