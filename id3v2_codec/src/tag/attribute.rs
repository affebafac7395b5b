use super::Id3v2Tag;
use crate::error::Result;
use crate::frame::{Frame, FrameBody, FrameId};
use crate::header::Id3v2Version;
use crate::items::{
	AttachedPictureFrame, CommentFrame, TextInformationFrame, UnsynchronizedTextFrame,
};
use crate::picture::PictureType;
use crate::util::text::TextEncoding;

// Used for comments and lyrics created through the accessors
const UNKNOWN_LANGUAGE: [u8; 3] = *b"XXX";

/// A logical tag field, independent of the tag's version
///
/// Each attribute maps to a single frame identifier per version, see [`Attribute::frame_id`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
#[non_exhaustive]
pub enum Attribute {
	Title,
	Artist,
	AlbumArtist,
	Album,
	Year,
	Genre,
	Track,
	Disc,
	Composer,
	Lyrics,
	Comment,
}

impl Attribute {
	/// The identifier holding this attribute in `version`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::FrameId;
	/// use id3v2_codec::header::Id3v2Version;
	/// use id3v2_codec::tag::Attribute;
	///
	/// assert_eq!(Attribute::Year.frame_id(Id3v2Version::V2), FrameId::TYE);
	/// assert_eq!(Attribute::Year.frame_id(Id3v2Version::V3), FrameId::TYER);
	/// assert_eq!(Attribute::Year.frame_id(Id3v2Version::V4), FrameId::TDRC);
	/// ```
	#[rustfmt::skip]
	pub fn frame_id(self, version: Id3v2Version) -> FrameId {
		let v2 = version == Id3v2Version::V2;
		match self {
			Attribute::Title       => if v2 { FrameId::TT2 } else { FrameId::TIT2 },
			Attribute::Artist      => if v2 { FrameId::TP1 } else { FrameId::TPE1 },
			Attribute::AlbumArtist => if v2 { FrameId::TP2 } else { FrameId::TPE2 },
			Attribute::Album       => if v2 { FrameId::TAL } else { FrameId::TALB },
			Attribute::Genre       => if v2 { FrameId::TCO } else { FrameId::TCON },
			Attribute::Track       => if v2 { FrameId::TRK } else { FrameId::TRCK },
			Attribute::Disc        => if v2 { FrameId::TPA } else { FrameId::TPOS },
			Attribute::Composer    => if v2 { FrameId::TCM } else { FrameId::TCOM },
			Attribute::Lyrics      => if v2 { FrameId::ULT } else { FrameId::USLT },
			Attribute::Comment     => if v2 { FrameId::COM } else { FrameId::COMM },
			Attribute::Year => match version {
				Id3v2Version::V2 => FrameId::TYE,
				Id3v2Version::V3 => FrameId::TYER,
				Id3v2Version::V4 => FrameId::TDRC,
			},
		}
	}

	fn new_body(self, encoding: TextEncoding, value: String) -> FrameBody {
		match self {
			Attribute::Comment => FrameBody::Comment(CommentFrame::new(
				encoding,
				UNKNOWN_LANGUAGE,
				"",
				value,
			)),
			Attribute::Lyrics => FrameBody::UnsynchronizedText(UnsynchronizedTextFrame::new(
				encoding,
				UNKNOWN_LANGUAGE,
				"",
				value,
			)),
			_ => FrameBody::Text(TextInformationFrame::new(encoding, value)),
		}
	}
}

// Comments and lyrics are identified by their descriptions, the accessors only
// touch the ones without one
fn has_empty_description(frame: &Frame) -> bool {
	match frame.body() {
		FrameBody::Comment(f) => f.description.is_empty(),
		FrameBody::UnsynchronizedText(f) => f.description.is_empty(),
		_ => true,
	}
}

fn unicode_encoding(version: Id3v2Version) -> TextEncoding {
	match version {
		Id3v2Version::V4 => TextEncoding::UTF8,
		_ => TextEncoding::UTF16,
	}
}

fn preferred_encoding(value: &str, version: Id3v2Version) -> TextEncoding {
	if version != Id3v2Version::V4 && TextEncoding::Latin1.verify(value) {
		return TextEncoding::Latin1;
	}

	unicode_encoding(version)
}

// The leading run of digits, "3/12" is 3 and "2024-01-01" is 2024
fn leading_number(value: &str) -> Option<u32> {
	let value = value.trim_start();
	let end = value
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(value.len());

	value[..end].parse().ok()
}

macro_rules! impl_accessor {
	($($name:ident => $attribute:ident;)+) => {
		paste::paste! {
			$(
				#[doc = "The value of [`Attribute::" $attribute "`]"]
				pub fn $name(&self) -> Option<&str> {
					self.attribute(Attribute::$attribute)
				}

				#[doc = "Set [`Attribute::" $attribute "`], see [`Id3v2Tag::set_attribute`]"]
				///
				/// # Errors
				///
				/// See [`Id3v2Tag::set_attribute`]
				pub fn [<set_ $name>](&mut self, value: impl Into<String>) -> Result<()> {
					self.set_attribute(Attribute::$attribute, value)
				}

				#[doc = "Remove every frame holding [`Attribute::" $attribute "`]"]
				pub fn [<remove_ $name>](&mut self) {
					self.remove_attribute(Attribute::$attribute);
				}
			)+
		}
	}
}

macro_rules! impl_number_accessor {
	($($name:ident => $attribute:ident;)+) => {
		paste::paste! {
			$(
				#[doc = "The leading number of [`Attribute::" $attribute "`]"]
				pub fn $name(&self) -> Option<u32> {
					self.attribute(Attribute::$attribute).and_then(leading_number)
				}

				#[doc = "Set [`Attribute::" $attribute "`] to a number"]
				///
				/// # Errors
				///
				/// See [`Id3v2Tag::set_attribute`]
				pub fn [<set_ $name>](&mut self, value: u32) -> Result<()> {
					self.set_attribute(Attribute::$attribute, value.to_string())
				}

				#[doc = "Remove every frame holding [`Attribute::" $attribute "`]"]
				pub fn [<remove_ $name>](&mut self) {
					self.remove_attribute(Attribute::$attribute);
				}
			)+
		}
	}
}

/// ## Attribute accessors
///
/// These resolve an [`Attribute`] to the identifier used by the tag's version. For comments
/// and lyrics, only frames with an empty description are considered.
impl Id3v2Tag {
	impl_accessor!(
		title        => Title;
		artist       => Artist;
		album_artist => AlbumArtist;
		album        => Album;
		genre        => Genre;
		composer     => Composer;
		lyrics       => Lyrics;
		comment      => Comment;
	);

	impl_number_accessor!(
		year  => Year;
		track => Track;
		disc  => Disc;
	);

	fn attribute_position(&self, attribute: Attribute) -> Option<usize> {
		let id = attribute.frame_id(self.version());

		self.frames
			.iter()
			.position(|f| f.id() == id && has_empty_description(f))
	}

	/// The text of an attribute
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::Id3v2Tag;
	/// use id3v2_codec::header::Id3v2Version;
	/// use id3v2_codec::tag::Attribute;
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// let mut tag = Id3v2Tag::new(Id3v2Version::V3);
	/// tag.set_attribute(Attribute::Year, "1999")?;
	///
	/// assert_eq!(tag.attribute(Attribute::Year), Some("1999"));
	/// assert!(tag.get(id3v2_codec::FrameId::TYER).is_some());
	/// # Ok(()) }
	/// ```
	pub fn attribute(&self, attribute: Attribute) -> Option<&str> {
		let position = self.attribute_position(attribute)?;
		self.frames[position].body().text()
	}

	/// Set the text of an attribute
	///
	/// An existing frame is edited in place. If `value` can't be represented in its encoding,
	/// the frame is moved to a Unicode encoding first. Otherwise a new frame is appended, using
	/// ISO-8859-1 where possible in ID3v2.2/ID3v2.3, and UTF-8 in ID3v2.4.
	///
	/// # Errors
	///
	/// The existing frame can't take the new value, see [`Frame::set_text`]
	pub fn set_attribute(&mut self, attribute: Attribute, value: impl Into<String>) -> Result<()> {
		let value = value.into();
		let version = self.version();

		if let Some(position) = self.attribute_position(attribute) {
			let frame = &mut self.frames[position];

			let encoding = frame.body().encoding().unwrap_or(TextEncoding::Latin1);
			if !encoding.verify(&value) {
				frame.set_encoding(unicode_encoding(version))?;
			}

			return frame.set_text(value);
		}

		let encoding = preferred_encoding(&value, version);
		let body = attribute.new_body(encoding, value);

		self.frames
			.push(Frame::new(attribute.frame_id(version), body)?);
		Ok(())
	}

	/// Remove every frame holding an attribute
	pub fn remove_attribute(&mut self, attribute: Attribute) {
		let id = attribute.frame_id(self.version());
		self.frames
			.retain(|f| f.id() != id || !has_empty_description(f));
	}
}

/// ## Pictures
impl Id3v2Tag {
	/// Every picture, in order
	pub fn pictures(&self) -> impl Iterator<Item = &AttachedPictureFrame> + Clone {
		self.frames.iter().filter_map(|f| match f.body() {
			FrameBody::Picture(picture) => Some(picture),
			_ => None,
		})
	}

	/// The first picture of a [`PictureType`]
	pub fn picture(&self, picture_type: PictureType) -> Option<&AttachedPictureFrame> {
		self.pictures()
			.find(|picture| picture.picture_type == picture_type)
	}

	/// Insert a picture, replacing the first one with the same [`PictureType`]
	///
	/// The frame is `PIC` in ID3v2.2 and `APIC` otherwise. The replaced frame is returned.
	///
	/// # Errors
	///
	/// Unable to create the frame, see [`Frame::new`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::header::Id3v2Version;
	/// use id3v2_codec::items::AttachedPictureFrame;
	/// use id3v2_codec::picture::{MimeType, PictureType};
	/// use id3v2_codec::{Id3v2Tag, TextEncoding};
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// let mut tag = Id3v2Tag::new(Id3v2Version::V2);
	/// let picture = AttachedPictureFrame::new(
	/// 	TextEncoding::Latin1,
	/// 	Some(MimeType::Png),
	/// 	PictureType::CoverFront,
	/// 	"",
	/// 	vec![0x89, b'P', b'N', b'G'],
	/// );
	///
	/// assert!(tag.set_picture(picture)?.is_none());
	/// assert!(tag.picture(PictureType::CoverFront).is_some());
	/// assert!(tag.get(id3v2_codec::FrameId::PIC).is_some());
	/// # Ok(()) }
	/// ```
	pub fn set_picture(&mut self, picture: AttachedPictureFrame) -> Result<Option<Frame>> {
		let id = match self.version() {
			Id3v2Version::V2 => FrameId::PIC,
			_ => FrameId::APIC,
		};

		let picture_type = picture.picture_type;
		let frame = Frame::new(id, FrameBody::Picture(picture))?;

		let existing = self.frames.iter().position(|f| {
			matches!(f.body(), FrameBody::Picture(p) if p.picture_type == picture_type)
		});

		match existing {
			Some(position) => Ok(Some(std::mem::replace(&mut self.frames[position], frame))),
			None => {
				self.frames.push(frame);
				Ok(None)
			},
		}
	}

	/// Remove every picture of a [`PictureType`]
	pub fn remove_picture(&mut self, picture_type: PictureType) {
		self.frames.retain(|f| {
			!matches!(f.body(), FrameBody::Picture(p) if p.picture_type == picture_type)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::Attribute;
	use crate::frame::{Frame, FrameBody, FrameId};
	use crate::header::Id3v2Version;
	use crate::items::{AttachedPictureFrame, CommentFrame};
	use crate::picture::{MimeType, PictureType};
	use crate::tag::Id3v2Tag;
	use crate::util::text::TextEncoding;

	#[test_log::test]
	fn ids_follow_version() {
		let mut v2 = Id3v2Tag::new(Id3v2Version::V2);
		let mut v4 = Id3v2Tag::new(Id3v2Version::V4);

		for tag in [&mut v2, &mut v4] {
			tag.set_title("Title").unwrap();
			tag.set_year(2001).unwrap();
			tag.set_lyrics("La la la").unwrap();
		}

		assert!(v2.get(FrameId::TT2).is_some());
		assert!(v2.get(FrameId::TYE).is_some());
		assert!(v2.get(FrameId::ULT).is_some());

		assert!(v4.get(FrameId::TIT2).is_some());
		assert!(v4.get(FrameId::TDRC).is_some());
		assert!(v4.get(FrameId::USLT).is_some());

		assert_eq!(v2.year(), Some(2001));
		assert_eq!(v4.lyrics(), Some("La la la"));
	}

	#[test_log::test]
	fn edits_existing_frame() {
		let mut tag = Id3v2Tag::new(Id3v2Version::V3);
		tag.set_artist("Foo").unwrap();

		let frame = tag.get(FrameId::TPE1).unwrap();
		assert_eq!(frame.body().encoding(), Some(TextEncoding::Latin1));
		assert_eq!(frame.size(), 5);

		// Doesn't fit in ISO-8859-1
		tag.set_artist("Ünïcødé 🎵").unwrap();
		assert_eq!(tag.len(), 1);

		let frame = tag.get(FrameId::TPE1).unwrap();
		assert_eq!(frame.body().encoding(), Some(TextEncoding::UTF16));
		assert_eq!(tag.artist(), Some("Ünïcødé 🎵"));

		tag.remove_artist();
		assert!(tag.is_empty());
	}

	#[test_log::test]
	fn numbers() {
		let mut tag = Id3v2Tag::new(Id3v2Version::V4);
		tag.set_attribute(Attribute::Track, "3/12").unwrap();
		tag.set_attribute(Attribute::Year, "2024-01-01").unwrap();
		tag.set_attribute(Attribute::Disc, "one").unwrap();

		assert_eq!(tag.track(), Some(3));
		assert_eq!(tag.year(), Some(2024));
		assert_eq!(tag.disc(), None);
		assert_eq!(tag.attribute(Attribute::Disc), Some("one"));
	}

	#[test_log::test]
	fn comments_without_description() {
		let mut tag = Id3v2Tag::new(Id3v2Version::V4);
		tag.insert(
			Frame::new(
				FrameId::COMM,
				FrameBody::Comment(CommentFrame::new(
					TextEncoding::UTF8,
					*b"eng",
					"iTunNORM",
					"0000",
				)),
			)
			.unwrap(),
		);

		assert!(tag.comment().is_none());

		tag.set_comment("Hello").unwrap();
		assert_eq!(tag.comment(), Some("Hello"));
		assert_eq!(tag.len(), 2);

		tag.remove_comment();
		assert_eq!(tag.len(), 1);
	}

	#[test_log::test]
	fn pictures() {
		let picture = |picture_type, data: &[u8]| {
			AttachedPictureFrame::new(
				TextEncoding::UTF8,
				Some(MimeType::Jpeg),
				picture_type,
				"",
				data.to_vec(),
			)
		};

		let mut tag = Id3v2Tag::new(Id3v2Version::V4);
		assert!(
			tag.set_picture(picture(PictureType::CoverFront, b"front"))
				.unwrap()
				.is_none()
		);
		assert!(
			tag.set_picture(picture(PictureType::CoverBack, b"back"))
				.unwrap()
				.is_none()
		);

		let replaced = tag
			.set_picture(picture(PictureType::CoverFront, b"new front"))
			.unwrap()
			.unwrap();
		assert_eq!(replaced.id(), FrameId::APIC);

		assert_eq!(tag.pictures().count(), 2);
		assert_eq!(
			tag.picture(PictureType::CoverFront).unwrap().data,
			b"new front"
		);

		tag.remove_picture(PictureType::CoverFront);
		assert!(tag.picture(PictureType::CoverFront).is_none());
		assert_eq!(tag.len(), 1);
	}
}
