use super::ownership_frame::encode_date;
use super::{decode_latin1_terminated, decode_terminated, encode_terminated, read_encoding};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text, latin1_decode};

use std::io::Read;

use byteorder::ReadBytesExt;

/// How the audio was delivered when it was bought
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[allow(missing_docs)]
pub enum ReceivedAs {
	Other,
	StandardCdAlbum,
	CompressedAudioOnCd,
	FileOverInternet,
	StreamOverInternet,
	NoteSheets,
	NoteSheetsInBook,
	MusicOnOtherMedia,
	NonMusicalMerchandise,
	Undefined(u8),
}

impl ReceivedAs {
	/// Get a `ReceivedAs` from a u8
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::StandardCdAlbum,
			2 => Self::CompressedAudioOnCd,
			3 => Self::FileOverInternet,
			4 => Self::StreamOverInternet,
			5 => Self::NoteSheets,
			6 => Self::NoteSheetsInBook,
			7 => Self::MusicOnOtherMedia,
			8 => Self::NonMusicalMerchandise,
			i => Self::Undefined(i),
		}
	}

	/// Get the `u8` representation of a `ReceivedAs`
	pub fn as_u8(self) -> u8 {
		match self {
			Self::Other => 0,
			Self::StandardCdAlbum => 1,
			Self::CompressedAudioOnCd => 2,
			Self::FileOverInternet => 3,
			Self::StreamOverInternet => 4,
			Self::NoteSheets => 5,
			Self::NoteSheetsInBook => 6,
			Self::MusicOnOtherMedia => 7,
			Self::NonMusicalMerchandise => 8,
			Self::Undefined(i) => i,
		}
	}
}

/// An ID3v2 commercial frame (`COMR`)
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CommercialFrame {
	/// The encoding of `seller` and `description`
	pub encoding: TextEncoding,
	/// One or more prices separated by "/", each a currency code followed by the price
	pub price: String,
	/// The date the price is valid until (YYYYMMDD)
	pub valid_until: String,
	/// Where to contact the seller
	pub contact_url: String,
	/// How the audio was delivered
	pub received_as: ReceivedAs,
	/// The name of the seller
	pub seller: String,
	/// A short description of the product
	pub description: String,
	/// The seller's logo, as a MIME type and image data
	#[cfg_attr(feature = "serde", serde(skip))]
	pub seller_logo: Option<(String, Vec<u8>)>,
}

impl CommercialFrame {
	/// Read a [`CommercialFrame`]
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Invalid text encoding
	/// * Not enough data
	pub fn parse<R>(
		reader: &mut R,
		version: Id3v2Version,
		parse_mode: ParsingMode,
	) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Some(encoding) = read_encoding(reader, version, parse_mode)? else {
			return Ok(None);
		};

		let price = decode_latin1_terminated(reader)?;

		let mut date_bytes = [0u8; 8];
		reader.read_exact(&mut date_bytes)?;
		let valid_until = latin1_decode(&date_bytes);

		let contact_url = decode_latin1_terminated(reader)?;
		let received_as = ReceivedAs::from_u8(reader.read_u8()?);

		let seller = decode_terminated(reader, encoding)?;
		let description = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(encoding)
				.terminated(true)
				.bom(seller.bom),
		)?;

		let mut seller_logo = None;
		let mime_type = decode_terminated(reader, TextEncoding::Latin1)?;
		if mime_type.bytes_read > 0 {
			let mut logo = Vec::new();
			reader.read_to_end(&mut logo)?;
			seller_logo = Some((mime_type.content, logo));
		}

		Ok(Some(Self {
			encoding,
			price,
			valid_until,
			contact_url,
			received_as,
			seller: seller.content,
			description: description.content,
			seller_logo,
		}))
	}

	/// Convert a [`CommercialFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * `valid_until` is not at least 8 characters
	/// * `lossy` is not set, and the text can't be represented in its encoding
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);

		let mut bytes = Vec::with_capacity(self.encoded_len(version));
		bytes.push(encoding as u8);
		bytes.extend(encode_terminated(&self.price, TextEncoding::Latin1, lossy)?);
		bytes.extend(encode_date(&self.valid_until, lossy)?);
		bytes.extend(encode_terminated(&self.contact_url, TextEncoding::Latin1, lossy)?);
		bytes.push(self.received_as.as_u8());
		bytes.extend(encode_terminated(&self.seller, encoding, lossy)?);
		bytes.extend(encode_terminated(&self.description, encoding, lossy)?);

		if let Some((mime_type, logo)) = &self.seller_logo {
			bytes.extend(encode_terminated(mime_type, TextEncoding::Latin1, lossy)?);
			bytes.extend_from_slice(logo);
		}

		Ok(bytes)
	}

	/// The length of [`CommercialFrame::as_bytes`]
	pub fn encoded_len(&self, version: Id3v2Version) -> usize {
		let encoding = self.encoding.for_version(version);

		let logo_len = self.seller_logo.as_ref().map_or(0, |(mime_type, logo)| {
			TextEncoding::Latin1.encoded_len(mime_type, true) + logo.len()
		});

		1 + TextEncoding::Latin1.encoded_len(&self.price, true)
			+ 8 + TextEncoding::Latin1.encoded_len(&self.contact_url, true)
			+ 1 + encoding.encoded_len(&self.seller, true)
			+ encoding.encoded_len(&self.description, true)
			+ logo_len
	}
}
