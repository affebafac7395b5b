use super::{decode_latin1_terminated, decode_remainder, encode_terminated, read_encoding};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::macros::id3v2_err;
use crate::util::text::{TextEncoding, latin1_decode};

use std::io::Read;

/// An ID3v2 ownership frame (`OWNE`)
///
/// This is used to mark a transaction, and is recommended to be used
/// in addition to the USER and TOWN frames.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct OwnershipFrame {
	/// The encoding of the seller string
	pub encoding: TextEncoding,
	/// The price paid
	///
	/// The first three characters of this field contains the currency used for the transaction,
	/// encoded according to ISO 4217 alphabetic currency code. Concatenated to this is the actual price paid,
	/// as a numerical string using "." as the decimal separator.
	pub price_paid: String,
	/// The date of purchase as an 8 character date string (YYYYMMDD)
	pub date_of_purchase: String,
	/// The seller name
	pub seller: String,
}

impl OwnershipFrame {
	/// Create a new [`OwnershipFrame`]
	pub fn new(
		encoding: TextEncoding,
		price_paid: impl Into<String>,
		date_of_purchase: impl Into<String>,
		seller: impl Into<String>,
	) -> Self {
		Self {
			encoding,
			price_paid: price_paid.into(),
			date_of_purchase: date_of_purchase.into(),
			seller: seller.into(),
		}
	}

	/// Read an [`OwnershipFrame`]
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

		let price_paid = decode_latin1_terminated(reader)?;

		let mut date_bytes = [0u8; 8];
		reader.read_exact(&mut date_bytes)?;
		let date_of_purchase = latin1_decode(&date_bytes);

		let seller = decode_remainder(reader, encoding, [0; 2])?;

		Ok(Some(OwnershipFrame {
			encoding,
			price_paid,
			date_of_purchase,
			seller,
		}))
	}

	/// Convert an [`OwnershipFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * `date_of_purchase` is not at least 8 characters (it will be truncated if greater)
	/// * `lossy` is not set, and the text can't be represented in its encoding
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);

		let mut bytes = Vec::with_capacity(self.encoded_len(version));
		bytes.push(encoding as u8);

		bytes.extend(encode_terminated(&self.price_paid, TextEncoding::Latin1, lossy)?);
		bytes.extend(encode_date(&self.date_of_purchase, lossy)?);
		bytes.extend(encode_terminated(&self.seller, encoding, lossy)?);

		Ok(bytes)
	}

	/// The length of [`OwnershipFrame::as_bytes`]
	pub fn encoded_len(&self, version: Id3v2Version) -> usize {
		let encoding = self.encoding.for_version(version);

		1 + TextEncoding::Latin1.encoded_len(&self.price_paid, true)
			+ 8 + encoding.encoded_len(&self.seller, true)
	}
}

// Shared with `COMR`, both store an 8 character YYYYMMDD date
pub(super) fn encode_date(date: &str, lossy: bool) -> Result<Vec<u8>> {
	let mut encoded = TextEncoding::Latin1.encode(date, false, lossy)?;
	if encoded.len() < 8 {
		id3v2_err!(BadFrameLength);
	}

	encoded.truncate(8);
	Ok(encoded)
}
