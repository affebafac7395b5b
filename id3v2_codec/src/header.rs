//! The tag header codec
//!
//! Every tag starts with a 10 byte header:
//!
//! ```text
//! "ID3" | major | minor | flags | synchsafe size (4)
//! ```
//!
//! optionally followed by an extended header (ID3v2.3 and ID3v2.4 only), whose layout differs
//! between the two versions.

use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::macros::{err, id3v2_err};
use crate::restrictions::TagRestrictions;
use crate::util::synchsafe::SynchsafeInteger;

use std::fmt::{Display, Formatter};
use std::io::{Read, Write};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};

/// Marker that denotes an invalid version/revision byte
const VERSION_SENTINEL: u8 = 0xFF;

/// The ID3v2 version
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// Get an `Id3v2Version` from a major version number, must be 2-4 inclusive
	pub fn from_major(major: u8) -> Option<Self> {
		match major {
			2 => Some(Self::V2),
			3 => Some(Self::V3),
			4 => Some(Self::V4),
			_ => None,
		}
	}

	/// The major version number
	pub fn major(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}

	/// Whether this version uses the 3 character frame IDs of ID3v2.2
	pub fn uses_short_frame_ids(self) -> bool {
		self == Self::V2
	}
}

impl Display for Id3v2Version {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2.{}", self.major())
	}
}

/// Flags that apply to the entire tag
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised
	///
	/// Unsynchronised tags are recognized, but their frames are not read.
	pub unsynchronisation: bool,
	/// Whether the header is followed by an [`ExtendedHeader`]
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer (ID3v2.4 only)
	///
	/// A footer will be created if the tag is written
	pub footer: bool,
}

impl Id3v2TagFlags {
	/// Parse the flags byte of a tag header
	pub fn from_byte(byte: u8, version: Id3v2Version) -> Self {
		// Bit 6 is the (never specified) compression flag in ID3v2.2
		let has_extended_header = version != Id3v2Version::V2;

		Self {
			unsynchronisation: byte & 0x80 == 0x80,
			extended_header: has_extended_header && byte & 0x40 == 0x40,
			experimental: has_extended_header && byte & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && byte & 0x10 == 0x10,
		}
	}

	/// Get the byte representation of the flags for `version`
	///
	/// Flags that don't exist in `version` are dropped.
	pub fn as_byte(&self, version: Id3v2Version) -> u8 {
		let mut byte = 0;

		if self.unsynchronisation {
			byte |= 0x80;
		}

		if version == Id3v2Version::V2 {
			return byte;
		}

		if self.extended_header {
			byte |= 0x40;
		}

		if self.experimental {
			byte |= 0x20;
		}

		if self.footer && version == Id3v2Version::V4 {
			byte |= 0x10;
		}

		byte
	}
}

/// An ID3v2.3/ID3v2.4 extended header
///
/// ID3v2.3 layout:
///
/// ```text
/// size (4) | flags (2) | padding size (4) | [CRC (4)]
/// ```
///
/// ID3v2.4 layout:
///
/// ```text
/// synchsafe size (4) | flag byte count (1) | flags (1) | [update] [CRC] [restrictions]
/// ```
///
/// where each optional block starts with its own length byte.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExtendedHeader {
	/// The number of bytes the extended header occupies, including its size field
	pub size: u32,
	/// The size of the padding following the frames (ID3v2.3 only)
	pub padding: u32,
	/// The CRC-32 of the frame data, if present
	pub crc: Option<u32>,
	/// Whether the tag is an update of an earlier tag (ID3v2.4 only)
	pub update: bool,
	/// Restrictions on the tag (ID3v2.4 only)
	pub restrictions: Option<TagRestrictions>,
}

impl ExtendedHeader {
	/// Parse an extended header, the reader must be positioned directly after the tag header
	///
	/// # Errors
	///
	/// * `version` is [`Id3v2Version::V2`], which has no extended header
	/// * The declared size doesn't match the layout
	/// * An ID3v2.4 header declares a flag byte count other than 1
	pub fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		match version {
			Id3v2Version::V2 => id3v2_err!(BadExtendedHeaderSize),
			Id3v2Version::V3 => Self::parse_v3(reader),
			Id3v2Version::V4 => Self::parse_v4(reader),
		}
	}

	fn parse_v3<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		// The size field doesn't count itself, and is either 6 or 10 depending on the CRC
		let declared_size = reader.read_u32::<BigEndian>()?;
		let flags = reader.read_u16::<BigEndian>()?;
		let padding = reader.read_u32::<BigEndian>()?;

		let has_crc = flags & 0x8000 == 0x8000;
		let expected_size = if has_crc { 10 } else { 6 };

		if declared_size != expected_size {
			log::debug!(
				"ID3v2.3 extended header declares {declared_size} bytes, expected {expected_size}"
			);
			id3v2_err!(BadExtendedHeaderSize);
		}

		let mut crc = None;
		if has_crc {
			crc = Some(reader.read_u32::<BigEndian>()?);
		}

		Ok(Self {
			size: declared_size + 4,
			padding,
			crc,
			update: false,
			restrictions: None,
		})
	}

	fn parse_v4<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let size = reader.read_u32::<BigEndian>()?.unsynch();
		if size < 6 {
			id3v2_err!(BadExtendedHeaderSize);
		}

		let flag_bytes = reader.read_u8()?;
		if flag_bytes != 1 {
			id3v2_err!(BadExtendedHeaderFlagCount(flag_bytes));
		}

		let flags = reader.read_u8()?;

		let mut extended_header = Self {
			size,
			..Self::default()
		};

		// The optional blocks appear in the order of their flag bits
		let mut consumed = 6;

		if flags & 0x40 == 0x40 {
			// Always has a data length of 0
			let _data_length = reader.read_u8()?;
			extended_header.update = true;
			consumed += 1;
		}

		if flags & 0x20 == 0x20 {
			// Always has a data length of 5
			let _data_length = reader.read_u8()?;

			let mut crc = [0; 5];
			reader.read_exact(&mut crc)?;
			extended_header.crc = Some(decode_crc(crc));
			consumed += 6;
		}

		if flags & 0x10 == 0x10 {
			// Always has a data length of 1
			let _data_length = reader.read_u8()?;
			extended_header.restrictions = Some(TagRestrictions::from_byte(reader.read_u8()?));
			consumed += 2;
		}

		if consumed != size {
			log::debug!("ID3v2.4 extended header declares {size} bytes, read {consumed}");
			id3v2_err!(BadExtendedHeaderSize);
		}

		Ok(extended_header)
	}

	/// The number of bytes this header will occupy when written as `version`
	pub fn encoded_len(&self, version: Id3v2Version) -> u32 {
		match version {
			Id3v2Version::V2 => 0,
			Id3v2Version::V3 => {
				if self.crc.is_some() {
					14
				} else {
					10
				}
			},
			Id3v2Version::V4 => {
				let mut size = 6;
				if self.update {
					size += 1;
				}
				if self.crc.is_some() {
					size += 6;
				}
				if self.restrictions.is_some() {
					size += 2;
				}

				size
			},
		}
	}

	/// Write the extended header as `version`
	///
	/// The size field is recomputed from the present fields.
	///
	/// # Errors
	///
	/// `version` is [`Id3v2Version::V2`]
	pub fn write_to<W>(&self, writer: &mut W, version: Id3v2Version) -> Result<()>
	where
		W: Write,
	{
		match version {
			Id3v2Version::V2 => id3v2_err!(BadExtendedHeaderSize),
			Id3v2Version::V3 => {
				writer.write_u32::<BigEndian>(self.encoded_len(version) - 4)?;

				let flags: u16 = if self.crc.is_some() { 0x8000 } else { 0 };
				writer.write_u16::<BigEndian>(flags)?;
				writer.write_u32::<BigEndian>(self.padding)?;

				if let Some(crc) = self.crc {
					writer.write_u32::<BigEndian>(crc)?;
				}
			},
			Id3v2Version::V4 => {
				writer.write_u32::<BigEndian>(self.encoded_len(version).synch()?)?;
				writer.write_u8(1)?;

				let mut flags = 0;
				if self.update {
					flags |= 0x40;
				}
				if self.crc.is_some() {
					flags |= 0x20;
				}
				if self.restrictions.is_some() {
					flags |= 0x10;
				}
				writer.write_u8(flags)?;

				if self.update {
					writer.write_u8(0)?;
				}

				if let Some(crc) = self.crc {
					writer.write_u8(5)?;
					writer.write_all(&encode_crc(crc))?;
				}

				if let Some(restrictions) = self.restrictions {
					writer.write_u8(1)?;
					writer.write_u8(restrictions.as_byte())?;
				}
			},
		}

		Ok(())
	}
}

/// The CRC-32 is stored as a 35 bit synchsafe integer, leaving the upper four bits always zeroed.
pub(crate) fn encode_crc(crc: u32) -> [u8; 5] {
	let mut encoded_crc = [0; 5];

	for (i, byte) in encoded_crc.iter_mut().enumerate() {
		*byte = ((crc >> ((4 - i) * 7)) as u8) & 0x7F;
	}

	encoded_crc
}

pub(crate) fn decode_crc(encoded: [u8; 5]) -> u32 {
	encoded
		.iter()
		.fold(0_u64, |acc, b| (acc << 7) | u64::from(b & 0x7F)) as u32
}

/// An ID3v2 tag header
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Header {
	/// The major version
	pub version: Id3v2Version,
	/// The revision number, normally 0
	pub revision: u8,
	/// Tag wide flags
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	///
	/// This includes the extended header, frames, and padding.
	pub size: u32,
	/// The extended header, if [`Id3v2TagFlags::extended_header`] is set
	pub extended_header: Option<ExtendedHeader>,
}

impl Id3v2Header {
	/// The size of the header, and footer if present
	pub const SIZE: usize = 10;

	/// Create an empty header for `version`
	pub fn new(version: Id3v2Version) -> Self {
		Self {
			version,
			revision: 0,
			flags: Id3v2TagFlags::default(),
			size: 0,
			extended_header: None,
		}
	}

	/// Parse a tag header, and its extended header if present
	///
	/// # Errors
	///
	/// * The input doesn't start with `"ID3"`
	/// * The version is not 2, 3, or 4, or either version byte is `0xFF`
	/// * The extended header is malformed
	/// * The input is too short
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::header::{Id3v2Header, Id3v2Version};
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// let bytes = [b'I', b'D', b'3', 3, 0, 0, 0, 0, 0x02, 0x01];
	/// let header = Id3v2Header::parse(&mut &bytes[..])?;
	///
	/// assert_eq!(header.version, Id3v2Version::V3);
	/// assert_eq!(header.size, 257);
	/// # Ok(()) }
	/// ```
	pub fn parse<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; Self::SIZE];
		reader.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			id3v2_err!(BadMagic);
		}

		let (major, revision) = (header[3], header[4]);
		if major == VERSION_SENTINEL || revision == VERSION_SENTINEL {
			id3v2_err!(BadId3v2Version(major, revision));
		}

		let Some(version) = Id3v2Version::from_major(major) else {
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadId3v2Version(major, revision)).into());
		};

		if version == Id3v2Version::V2 && header[5] & 0x40 == 0x40 {
			log::warn!("ID3v2.2 compression flag is set, ignoring it");
		}

		let flags = Id3v2TagFlags::from_byte(header[5], version);
		let size = BigEndian::read_u32(&header[6..]).unsynch();

		log::debug!("Found {version} tag, size: {size}, flags: {flags:?}");

		let mut extended_header = None;
		if flags.extended_header {
			let parsed = ExtendedHeader::parse(reader, version)?;

			if parsed.size >= size {
				id3v2_err!(BadExtendedHeaderSize);
			}

			log::debug!("Found extended header: {parsed:?}");
			extended_header = Some(parsed);
		}

		Ok(Id3v2Header {
			version,
			revision,
			flags,
			size,
			extended_header,
		})
	}

	/// The total size of the tag, including the header and footer
	pub fn full_tag_size(&self) -> u64 {
		let footer = if self.flags.footer { Self::SIZE } else { 0 };
		u64::from(self.size) + (Self::SIZE + footer) as u64
	}

	/// The number of bytes available to frames
	///
	/// This is the declared size, minus the extended header and any padding it declares.
	pub fn frame_region_size(&self) -> u32 {
		match self.extended_header {
			Some(ext) => self.size.saturating_sub(ext.size).saturating_sub(ext.padding),
			None => self.size,
		}
	}

	/// Get the 10 byte representation of the header
	///
	/// # Errors
	///
	/// [`Id3v2Header::size`] doesn't fit in a synchsafe integer
	pub fn as_bytes(&self) -> Result<[u8; 10]> {
		self.encode(*b"ID3")
	}

	/// Get the 10 byte representation of the footer
	///
	/// This is identical to the header, but with the identifier reversed.
	///
	/// # Errors
	///
	/// [`Id3v2Header::size`] doesn't fit in a synchsafe integer
	pub fn footer_bytes(&self) -> Result<[u8; 10]> {
		self.encode(*b"3DI")
	}

	fn encode(&self, identifier: [u8; 3]) -> Result<[u8; 10]> {
		if self.size > 0x0FFF_FFFF {
			err!(TooMuchData);
		}

		let mut flags = self.flags;
		flags.extended_header = self.extended_header.is_some();

		let mut bytes = [0; Self::SIZE];
		bytes[..3].copy_from_slice(&identifier);
		bytes[3] = self.version.major();
		bytes[4] = self.revision;
		bytes[5] = flags.as_byte(self.version);
		BigEndian::write_u32(&mut bytes[6..], self.size.synch()?);

		Ok(bytes)
	}
}
