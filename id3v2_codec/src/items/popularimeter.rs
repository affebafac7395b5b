use super::{
	counter_len, decode_counter, decode_latin1_terminated, encode_counter, encode_terminated,
};
use crate::error::Result;
use crate::macros::id3v2_err;
use crate::util::text::TextEncoding;

use std::io::Read;

use byteorder::ReadBytesExt;

/// The contents of a popularimeter ("POPM", "POP" in ID3v2.2) frame
///
/// A tag can contain multiple "POPM" frames, but there must only be
/// one with the same email address.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PopularimeterFrame {
	/// An email address of the user performing the rating
	pub email: String,
	/// A rating of 1-255, where 1 is the worst and 255 is the best.
	/// A rating of 0 is unknown.
	///
	/// For mapping this value to a star rating see: <https://en.wikipedia.org/wiki/ID3#ID3v2_star_rating_tag_issue>
	pub rating: u8,
	/// A play counter for the user. It is to be incremented each time the file is played.
	///
	/// This is a `u64` for simplicity. It may change if it becomes an issue.
	pub counter: u64,
}

impl PopularimeterFrame {
	/// Create a new [`PopularimeterFrame`]
	pub fn new(email: impl Into<String>, rating: u8, counter: u64) -> Self {
		Self {
			email: email.into(),
			rating,
			counter,
		}
	}

	/// Convert ID3v2 POPM frame bytes into a [`PopularimeterFrame`].
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// The counter is optional, a missing counter is read as 0.
	///
	/// # Errors
	///
	/// * Email is improperly encoded
	/// * Bytes does not contain the required data
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let email = decode_latin1_terminated(reader)?;
		let Ok(rating) = reader.read_u8() else {
			if email.is_empty() {
				return Ok(None);
			}

			id3v2_err!(BadFrameLength);
		};

		let mut counter_content = Vec::new();
		reader.read_to_end(&mut counter_content)?;

		Ok(Some(Self {
			email,
			rating,
			counter: decode_counter(&counter_content),
		}))
	}

	/// Convert a [`PopularimeterFrame`] into an ID3v2 POPM frame byte Vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// `lossy` is not set, and the email is not ISO-8859-1
	pub fn as_bytes(&self, lossy: bool) -> Result<Vec<u8>> {
		let mut content = Vec::with_capacity(self.encoded_len());
		content.extend(encode_terminated(&self.email, TextEncoding::Latin1, lossy)?);
		content.push(self.rating);
		content.extend(encode_counter(self.counter));

		Ok(content)
	}

	/// The length of [`PopularimeterFrame::as_bytes`]
	pub fn encoded_len(&self) -> usize {
		TextEncoding::Latin1.encoded_len(&self.email, true) + 1 + counter_len(self.counter)
	}
}
