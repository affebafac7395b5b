use super::{decode_terminated, encode_terminated, read_encoding};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::macros::{id3v2_err, parse_mode_choice};
use crate::picture::{MimeType, PictureType};
use crate::util::text::TextEncoding;

use std::io::Read;

use byteorder::ReadBytesExt as _;

/// An ID3v2 attached picture frame (`APIC`, `PIC` in ID3v2.2)
///
/// The image format is stored differently between versions. ID3v2.2 uses a fixed 3 character
/// format (`"JPG"`, `"PNG"`, ...), later versions use a MIME type. Both are represented as a
/// [`MimeType`].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachedPictureFrame {
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The image format
	pub mime_type: Option<MimeType>,
	/// The picture type
	pub picture_type: PictureType,
	/// The picture's description
	pub description: String,
	/// The binary image data
	#[cfg_attr(feature = "serde", serde(skip))]
	pub data: Vec<u8>,
}

impl AttachedPictureFrame {
	/// Create a new [`AttachedPictureFrame`]
	pub fn new(
		encoding: TextEncoding,
		mime_type: Option<MimeType>,
		picture_type: PictureType,
		description: impl Into<String>,
		data: Vec<u8>,
	) -> Self {
		Self {
			encoding,
			mime_type,
			picture_type,
			description: description.into(),
			data,
		}
	}

	/// Get an [`AttachedPictureFrame`] from ID3v2 A/PIC bytes:
	///
	/// NOTE: This expects *only* the frame content
	///
	/// # Errors
	///
	/// * There isn't enough data present
	/// * Unable to decode any of the text
	///
	/// ID3v2.2:
	///
	/// * The format is not a known image format, and `parse_mode` is [`ParsingMode::Strict`]
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

		let mime_type;
		if version == Id3v2Version::V2 {
			let mut format = [0; 3];
			reader.read_exact(&mut format)?;

			let parsed = MimeType::from_v22_format(format);
			if let MimeType::Unknown(unknown) = &parsed {
				parse_mode_choice!(
					parse_mode,
					STRICT: id3v2_err!(BadPictureFormat(unknown.clone())),
					DEFAULT: log::warn!("Unknown ID3v2.2 picture format: {unknown:?}")
				);
			}

			mime_type = Some(parsed);
		} else {
			mime_type = decode_terminated(reader, TextEncoding::Latin1)?
				.text_or_none()
				.map(|mime_type_str| MimeType::from_str(&mime_type_str));
		}

		let picture_type = PictureType::from_u8(reader.read_u8()?);
		let description = decode_terminated(reader, encoding)?.content;

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		Ok(Some(Self {
			encoding,
			mime_type,
			picture_type,
			description,
			data,
		}))
	}

	/// Convert an [`AttachedPictureFrame`] to a ID3v2 A/PIC byte Vec
	///
	/// NOTE: This does not include the frame header
	///
	/// # Errors
	///
	/// * `lossy` is not set, and the description cannot be encoded in the specified [`TextEncoding`]
	///
	/// ID3v2.2:
	///
	/// * The MIME type has no 3 character format equivalent
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = self.encoding.for_version(version);

		let mut data = Vec::with_capacity(self.encoded_len(version));
		data.push(encoding as u8);

		if version == Id3v2Version::V2 {
			let format = self.mime_type.as_ref().and_then(MimeType::as_v22_format);
			let Some(format) = format else {
				let mime_type = self.mime_type.as_ref().map(MimeType::as_str).unwrap_or_default();
				id3v2_err!(BadPictureFormat(mime_type.to_owned()));
			};

			data.extend(format);
		} else {
			let mime_type = self.mime_type.as_ref().map(MimeType::as_str).unwrap_or_default();
			data.extend(encode_terminated(mime_type, TextEncoding::Latin1, lossy)?);
		}

		data.push(self.picture_type.as_u8());
		data.extend(encode_terminated(&self.description, encoding, lossy)?);
		data.extend_from_slice(&self.data);

		Ok(data)
	}

	/// The length of [`AttachedPictureFrame::as_bytes`]
	pub fn encoded_len(&self, version: Id3v2Version) -> usize {
		let encoding = self.encoding.for_version(version);

		let format = if version == Id3v2Version::V2 {
			3
		} else {
			let mime_type = self.mime_type.as_ref().map(MimeType::as_str).unwrap_or_default();
			TextEncoding::Latin1.encoded_len(mime_type, true)
		};

		1 + format + 1 + encoding.encoded_len(&self.description, true) + self.data.len()
	}
}
