//! Picture metadata shared by attached picture frames

use std::fmt::{Debug, Display, Formatter};

/// MIME types for pictures.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::picture::MimeType;
	///
	/// let jpeg_mimetype_str = "image/jpeg";
	/// assert_eq!(MimeType::from_str(jpeg_mimetype_str), MimeType::Jpeg);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::picture::MimeType;
	///
	/// let jpeg_mimetype = MimeType::Jpeg;
	/// assert_eq!(jpeg_mimetype.as_str(), "image/jpeg")
	/// ```
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	/// Get a `MimeType` from an ID3v2.2 image format
	///
	/// ID3v2.2 `PIC` frames use a fixed 3 character format in place of a MIME type. Anything
	/// other than the known image formats is kept as [`MimeType::Unknown`].
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_v22_format(*b"JPG"), MimeType::Jpeg);
	/// assert_eq!(MimeType::from_v22_format(*b"PNG"), MimeType::Png);
	/// assert_eq!(
	/// 	MimeType::from_v22_format(*b"-->"),
	/// 	MimeType::Unknown(String::from("-->"))
	/// );
	/// ```
	pub fn from_v22_format(format: [u8; 3]) -> Self {
		let mut upper = format;
		upper.make_ascii_uppercase();

		match &upper {
			b"JPG" => Self::Jpeg,
			b"PNG" => Self::Png,
			b"TIF" => Self::Tiff,
			b"BMP" => Self::Bmp,
			b"GIF" => Self::Gif,
			_ => Self::Unknown(format.iter().map(|c| char::from(*c)).collect()),
		}
	}

	/// Get the ID3v2.2 image format of a `MimeType`
	///
	/// This returns `None` for a [`MimeType::Unknown`] that isn't exactly 3 ISO-8859-1
	/// characters.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::picture::MimeType;
	///
	/// assert_eq!(MimeType::Jpeg.as_v22_format(), Some(*b"JPG"));
	/// assert_eq!(MimeType::Unknown(String::from("image/webp")).as_v22_format(), None);
	/// ```
	pub fn as_v22_format(&self) -> Option<[u8; 3]> {
		match self {
			MimeType::Jpeg => Some(*b"JPG"),
			MimeType::Png => Some(*b"PNG"),
			MimeType::Tiff => Some(*b"TIF"),
			MimeType::Bmp => Some(*b"BMP"),
			MimeType::Gif => Some(*b"GIF"),
			MimeType::Unknown(unknown) => {
				let mut format = [0; 3];
				let mut chars = unknown.chars();
				for byte in &mut format {
					*byte = u8::try_from(u32::from(chars.next()?)).ok()?;
				}

				chars.next().is_none().then_some(format)
			},
		}
	}

	/// Returns the extension for the `MimeType` if it is known
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::picture::MimeType;
	///
	/// assert_eq!(MimeType::Jpeg.ext(), Some("jpg"));
	/// ```
	pub fn ext(&self) -> Option<&str> {
		match self {
			MimeType::Jpeg => Some("jpg"),
			MimeType::Png => Some("png"),
			MimeType::Tiff => Some("tif"),
			MimeType::Bmp => Some("bmp"),
			MimeType::Gif => Some("gif"),
			MimeType::Unknown(_) => None,
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	/// Get a `u8` from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{MimeType, PictureType};

	#[test_log::test]
	fn picture_type_bytes() {
		for byte in 0..=u8::MAX {
			assert_eq!(PictureType::from_u8(byte).as_u8(), byte);
		}

		assert_eq!(PictureType::from_u8(21), PictureType::Undefined(21));
	}

	#[test_log::test]
	fn v22_formats() {
		for mime in [
			MimeType::Jpeg,
			MimeType::Png,
			MimeType::Tiff,
			MimeType::Bmp,
			MimeType::Gif,
		] {
			let format = mime.as_v22_format().unwrap();
			assert_eq!(MimeType::from_v22_format(format), mime);
		}

		assert_eq!(MimeType::from_v22_format(*b"jpg"), MimeType::Jpeg);
		assert_eq!(
			MimeType::Unknown(String::from("-->")).as_v22_format(),
			Some(*b"-->")
		);
		assert_eq!(MimeType::Unknown(String::from("\u{4e2d}ab")).as_v22_format(), None);
		assert_eq!(MimeType::Unknown(String::from("ab")).as_v22_format(), None);
	}
}
