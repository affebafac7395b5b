use super::id::{FrameId, verify_id};
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::header::Id3v2Version;
use crate::macros::{err, id3v2_err};
use crate::util::synchsafe::SynchsafeInteger;

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

/// Various flags to describe the content of an item
///
/// ID3v2.2 frames have no flags, the default (all unset) is used for them.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The group identifier the frame belongs to
	///
	/// All frames with the same group identifier byte belong to the same group.
	pub grouping_identity: Option<u8>,
	/// Frame is zlib compressed
	///
	/// Compressed frames are never decompressed, their payload is kept as a
	/// [`BinaryFrame`](crate::items::BinaryFrame).
	pub compression: bool,
	/// Frame encryption method symbol
	///
	/// The symbol refers to an `ENCR` frame in the same tag. Encrypted frames are kept as a
	/// [`BinaryFrame`](crate::items::BinaryFrame).
	pub encryption: Option<u8>,
	/// Frame is unsynchronised (ID3v2.4 only)
	pub unsynchronisation: bool,
	/// The size of the frame if the flags were all zeroed out
	///
	/// In ID3v2.3, this is the decompressed size that follows the flags of a compressed frame.
	/// In ID3v2.4, this is the data length indicator.
	pub data_length_indicator: Option<u32>,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	/// * `data_length_indicator`
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: (flags & 0x0040 == 0x0040).then_some(0),
			compression: flags & 0x0008 == 0x0008,
			encryption: (flags & 0x0004 == 0x0004).then_some(0),
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: (flags & 0x0001 == 0x0001).then_some(0),
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	/// * `data_length_indicator` (when `compression` is set)
	pub fn parse_id3v23(flags: u16) -> Self {
		let compression = flags & 0x0080 == 0x0080;

		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: (flags & 0x0020 == 0x0020).then_some(0),
			compression,
			encryption: (flags & 0x0040 == 0x0040).then_some(0),
			unsynchronisation: false,
			data_length_indicator: compression.then_some(0),
		}
	}

	/// Get the ID3v2.4 byte representation of the flags
	pub fn as_id3v24_bytes(&self) -> u16 {
		let mut flags = 0;

		if *self == FrameFlags::default() {
			return flags;
		}

		if self.tag_alter_preservation {
			flags |= 0x4000
		}

		if self.file_alter_preservation {
			flags |= 0x2000
		}

		if self.read_only {
			flags |= 0x1000
		}

		if self.grouping_identity.is_some() {
			flags |= 0x0040
		}

		if self.compression {
			flags |= 0x0008
		}

		if self.encryption.is_some() {
			flags |= 0x0004
		}

		if self.unsynchronisation {
			flags |= 0x0002
		}

		if self.data_length_indicator.is_some() {
			flags |= 0x0001
		}

		flags
	}

	/// Get the ID3v2.3 byte representation of the flags
	///
	/// ID3v2.3 has no equivalent of `unsynchronisation` or a standalone data length indicator,
	/// they are dropped.
	pub fn as_id3v23_bytes(&self) -> u16 {
		let mut flags = 0;

		if *self == FrameFlags::default() {
			return flags;
		}

		if self.tag_alter_preservation {
			flags |= 0x8000
		}

		if self.file_alter_preservation {
			flags |= 0x4000
		}

		if self.read_only {
			flags |= 0x2000
		}

		if self.compression {
			flags |= 0x0080
		}

		if self.encryption.is_some() {
			flags |= 0x0040
		}

		if self.grouping_identity.is_some() {
			flags |= 0x0020
		}

		flags
	}

	/// The number of bytes that follow the flag bytes in `version`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::frame::FrameFlags;
	/// use id3v2_codec::header::Id3v2Version;
	///
	/// let flags = FrameFlags {
	/// 	grouping_identity: Some(1),
	/// 	data_length_indicator: Some(100),
	/// 	..FrameFlags::default()
	/// };
	///
	/// assert_eq!(flags.extra_len(Id3v2Version::V4), 5);
	/// // No compression, so no decompressed size is stored
	/// assert_eq!(flags.extra_len(Id3v2Version::V3), 1);
	/// assert_eq!(flags.extra_len(Id3v2Version::V2), 0);
	/// ```
	pub fn extra_len(&self, version: Id3v2Version) -> u32 {
		let group = u32::from(self.grouping_identity.is_some());
		let encryption = u32::from(self.encryption.is_some());

		match version {
			Id3v2Version::V2 => 0,
			Id3v2Version::V3 => group + encryption + if self.compression { 4 } else { 0 },
			Id3v2Version::V4 => {
				group + encryption + if self.data_length_indicator.is_some() { 4 } else { 0 }
			},
		}
	}

	/// Whether the payload has been transformed in a way that prevents decoding it
	pub fn is_opaque(&self) -> bool {
		self.compression || self.encryption.is_some() || self.unsynchronisation
	}

	fn read_extras<R>(&mut self, reader: &mut R, version: Id3v2Version) -> Result<()>
	where
		R: Read,
	{
		match version {
			Id3v2Version::V2 => {},
			Id3v2Version::V3 => {
				if self.compression {
					self.data_length_indicator = Some(reader.read_u32::<BigEndian>()?);
				}

				if self.encryption.is_some() {
					self.encryption = Some(reader.read_u8()?);
				}

				if self.grouping_identity.is_some() {
					self.grouping_identity = Some(reader.read_u8()?);
				}
			},
			Id3v2Version::V4 => {
				if self.grouping_identity.is_some() {
					self.grouping_identity = Some(reader.read_u8()?);
				}

				if self.encryption.is_some() {
					self.encryption = Some(reader.read_u8()?);
				}

				if self.data_length_indicator.is_some() {
					self.data_length_indicator = Some(reader.read_u32::<BigEndian>()?.unsynch());
				}
			},
		}

		Ok(())
	}

	fn write_extras<W>(&self, writer: &mut W, version: Id3v2Version) -> Result<()>
	where
		W: Write,
	{
		match version {
			Id3v2Version::V2 => {},
			Id3v2Version::V3 => {
				if self.compression {
					writer.write_u32::<BigEndian>(self.data_length_indicator.unwrap_or(0))?;
				}

				if let Some(method) = self.encryption {
					writer.write_u8(method)?;
				}

				if let Some(group) = self.grouping_identity {
					writer.write_u8(group)?;
				}
			},
			Id3v2Version::V4 => {
				if let Some(group) = self.grouping_identity {
					writer.write_u8(group)?;
				}

				if let Some(method) = self.encryption {
					writer.write_u8(method)?;
				}

				if let Some(len) = self.data_length_indicator {
					writer.write_u32::<BigEndian>(len.synch()?)?;
				}
			},
		}

		Ok(())
	}
}

/// An ID3v2 frame header
///
/// The declared [`size`](FrameHeader::size) covers the body only. Any bytes that follow the
/// flags (group symbol, encryption method, data length) are accounted for in
/// [`FrameHeader::header_size`], though on disk they are included in the size field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHeader {
	pub(crate) raw_id: String,
	pub(crate) id: FrameId,
	pub(crate) size: u32,
	pub(crate) flags: FrameFlags,
}

impl FrameHeader {
	/// Create a header for `id`, with an empty body and no flags
	///
	/// This returns `None` for [`FrameId::Unknown`], see [`FrameHeader::with_raw_id`].
	pub fn new(id: FrameId) -> Option<Self> {
		if id == FrameId::Unknown {
			return None;
		}

		Some(Self {
			raw_id: id.as_str().to_owned(),
			id,
			size: 0,
			flags: FrameFlags::default(),
		})
	}

	/// Create a header from a raw identifier
	///
	/// # Errors
	///
	/// `raw_id` is not 3 or 4 characters of `'A'..='Z'` and `'0'..='9'`
	pub fn with_raw_id(raw_id: &str) -> Result<Self> {
		if !(3..=4).contains(&raw_id.len()) || !verify_id(raw_id.as_bytes()) {
			id3v2_err!(BadFrameId(raw_id.as_bytes().to_vec()));
		}

		Ok(Self {
			raw_id: raw_id.to_owned(),
			id: FrameId::parse(raw_id.as_bytes()),
			size: 0,
			flags: FrameFlags::default(),
		})
	}

	/// The resolved identifier
	pub fn id(&self) -> FrameId {
		self.id
	}

	/// The identifier as it appeared on disk
	pub fn raw_id(&self) -> &str {
		&self.raw_id
	}

	/// Whether the identifier is made of `'A'..='Z'` and `'0'..='9'`
	///
	/// Frames read with an invalid identifier can't be written back.
	pub fn has_valid_id(&self) -> bool {
		verify_id(self.raw_id.as_bytes())
	}

	/// The declared size of the body, excluding any bytes following the flags
	pub fn size(&self) -> u32 {
		self.size
	}

	/// The frame's flags
	pub fn flags(&self) -> FrameFlags {
		self.flags
	}

	/// Replace the frame's flags
	pub fn set_flags(&mut self, flags: FrameFlags) {
		self.flags = flags
	}

	/// The total size of the header in `version`, including the bytes following the flags
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::FrameId;
	/// use id3v2_codec::frame::{FrameFlags, FrameHeader};
	/// use id3v2_codec::header::Id3v2Version;
	///
	/// let mut header = FrameHeader::new(FrameId::TIT2).unwrap();
	/// assert_eq!(header.header_size(Id3v2Version::V4), 10);
	///
	/// header.set_flags(FrameFlags {
	/// 	encryption: Some(0x80),
	/// 	..FrameFlags::default()
	/// });
	/// assert_eq!(header.header_size(Id3v2Version::V4), 11);
	/// ```
	pub fn header_size(&self, version: Id3v2Version) -> u32 {
		match version {
			Id3v2Version::V2 => 6,
			_ => 10 + self.flags.extra_len(version),
		}
	}

	/// The total size of the frame on disk
	pub fn total_size(&self, version: Id3v2Version) -> u32 {
		self.header_size(version).saturating_add(self.size)
	}

	/// Move the declared size from `old_len` to `new_len`
	///
	/// Neither step can wrap, the result is clamped to `0..=u32::MAX`.
	pub(crate) fn apply_size_delta(&mut self, old_len: usize, new_len: usize) {
		let old_len = u32::try_from(old_len).unwrap_or(u32::MAX);
		let new_len = u32::try_from(new_len).unwrap_or(u32::MAX);

		self.size = self.size.saturating_sub(old_len).saturating_add(new_len);
	}

	/// Read a frame header
	///
	/// This will return `None` if the reader ran out of data or the header is all zeros,
	/// which is the start of the padding.
	///
	/// The identifier isn't validated, anything outside of `'A'..='Z'` and `'0'..='9'`
	/// resolves to [`FrameId::Unknown`]. See [`FrameHeader::has_valid_id`].
	///
	/// # Errors
	///
	/// * The size field is smaller than the bytes that follow the flags
	pub fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Option<Self>>
	where
		R: Read,
	{
		let id_len = if version == Id3v2Version::V2 { 3 } else { 4 };

		let mut id = [0; 4];
		if reader.read_exact(&mut id[..id_len]).is_err() {
			return Ok(None);
		}

		// Assume we just started reading padding
		if id[0] == 0 {
			return Ok(None);
		}

		let id = &id[..id_len];

		let mut flags = FrameFlags::default();
		let on_disk_size;
		match version {
			Id3v2Version::V2 => {
				let Ok(size) = reader.read_u24::<BigEndian>() else {
					return Ok(None);
				};

				on_disk_size = size;
			},
			_ => {
				let (Ok(size), Ok(raw_flags)) =
					(reader.read_u32::<BigEndian>(), reader.read_u16::<BigEndian>())
				else {
					return Ok(None);
				};

				if version == Id3v2Version::V4 {
					on_disk_size = size.unsynch();
					flags = FrameFlags::parse_id3v24(raw_flags);
				} else {
					on_disk_size = size;
					flags = FrameFlags::parse_id3v23(raw_flags);
				}

				flags.read_extras(reader, version)?;
			},
		}

		let extras = flags.extra_len(version);
		let Some(size) = on_disk_size.checked_sub(extras) else {
			id3v2_err!(BadFrameLength);
		};

		let raw_id = String::from_utf8_lossy(id).into_owned();
		let resolved = if verify_id(id) {
			FrameId::parse(id)
		} else {
			FrameId::Unknown
		};

		if resolved == FrameId::Unknown {
			log::warn!("Encountered an unknown frame ID: {raw_id}");
		}

		log::trace!("Parsed frame header: {raw_id}, size: {size}, flags: {flags:?}");

		Ok(Some(Self {
			raw_id,
			id: resolved,
			size,
			flags,
		}))
	}

	/// Write the header for a body of `body_len` bytes
	///
	/// The flags are dropped in ID3v2.2.
	///
	/// # Errors
	///
	/// * The identifier doesn't fit `version` (3 characters in ID3v2.2, 4 otherwise)
	/// * The size doesn't fit the size field of `version`
	pub fn write_to<W>(&self, writer: &mut W, version: Id3v2Version, body_len: u32) -> Result<()>
	where
		W: Write,
	{
		let id_len = if version == Id3v2Version::V2 { 3 } else { 4 };
		if self.raw_id.len() != id_len {
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameId(
				self.raw_id.as_bytes().to_vec(),
			))
			.into());
		}

		let Some(on_disk_size) = body_len.checked_add(self.flags.extra_len(version)) else {
			err!(TooMuchData);
		};

		writer.write_all(self.raw_id.as_bytes())?;

		match version {
			Id3v2Version::V2 => {
				if on_disk_size > 0x00FF_FFFF {
					err!(TooMuchData);
				}

				writer.write_u24::<BigEndian>(on_disk_size)?;
			},
			Id3v2Version::V3 => {
				writer.write_u32::<BigEndian>(on_disk_size)?;
				writer.write_u16::<BigEndian>(self.flags.as_id3v23_bytes())?;
			},
			Id3v2Version::V4 => {
				writer.write_u32::<BigEndian>(on_disk_size.synch()?)?;
				writer.write_u16::<BigEndian>(self.flags.as_id3v24_bytes())?;
			},
		}

		self.flags.write_extras(writer, version)
	}
}

#[cfg(test)]
mod tests {
	use super::{FrameFlags, FrameHeader};
	use crate::error::{ErrorKind, Id3v2ErrorKind};
	use crate::frame::FrameId;
	use crate::header::Id3v2Version;

	#[test_log::test]
	fn parse_v22_header() {
		let bytes = [b'T', b'T', b'2', 0x00, 0x01, 0x02];
		let header = FrameHeader::parse(&mut &bytes[..], Id3v2Version::V2)
			.unwrap()
			.unwrap();

		assert_eq!(header.id(), FrameId::TT2);
		assert_eq!(header.size(), 0x0102);
		assert_eq!(header.flags(), FrameFlags::default());
		assert_eq!(header.header_size(Id3v2Version::V2), 6);
	}

	#[test_log::test]
	fn v23_size_is_plain_big_endian() {
		let bytes = [b'T', b'I', b'T', b'2', 0x00, 0x00, 0x00, 0x80, 0x00, 0x00];
		let header = FrameHeader::parse(&mut &bytes[..], Id3v2Version::V3)
			.unwrap()
			.unwrap();

		assert_eq!(header.size(), 0x80);
	}

	#[test_log::test]
	fn v24_size_is_synchsafe() {
		let bytes = [b'T', b'I', b'T', b'2', 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];
		let header = FrameHeader::parse(&mut &bytes[..], Id3v2Version::V4)
			.unwrap()
			.unwrap();

		assert_eq!(header.size(), 0x80);
	}

	#[test_log::test]
	fn v24_extras() {
		// group + encryption + data length indicator, 6 extra bytes
		let bytes = [
			b'T', b'I', b'T', b'2', 0x00, 0x00, 0x00, 0x0A, 0x00, 0x45, 0x07, 0x81, 0x00, 0x00,
			0x00, 0x04,
		];
		let header = FrameHeader::parse(&mut &bytes[..], Id3v2Version::V4)
			.unwrap()
			.unwrap();

		assert_eq!(header.size(), 4);
		assert_eq!(header.flags().grouping_identity, Some(7));
		assert_eq!(header.flags().encryption, Some(0x81));
		assert_eq!(header.flags().data_length_indicator, Some(4));
		assert_eq!(header.header_size(Id3v2Version::V4), 16);

		let mut written = Vec::new();
		header.write_to(&mut written, Id3v2Version::V4, 4).unwrap();
		assert_eq!(written, bytes);
	}

	#[test_log::test]
	fn v23_extras_order() {
		// compression + encryption + group, decompressed size comes first
		let bytes = [
			b'T', b'I', b'T', b'2', 0x00, 0x00, 0x00, 0x08, 0x00, 0xE0, 0x00, 0x00, 0x01, 0x00,
			0x81, 0x07,
		];
		let header = FrameHeader::parse(&mut &bytes[..], Id3v2Version::V3)
			.unwrap()
			.unwrap();

		assert_eq!(header.size(), 2);
		assert!(header.flags().compression);
		assert_eq!(header.flags().data_length_indicator, Some(0x100));
		assert_eq!(header.flags().encryption, Some(0x81));
		assert_eq!(header.flags().grouping_identity, Some(7));

		let mut written = Vec::new();
		header.write_to(&mut written, Id3v2Version::V3, 2).unwrap();
		assert_eq!(written, bytes);
	}

	#[test_log::test]
	fn size_smaller_than_extras() {
		let bytes = [
			b'T', b'I', b'T', b'2', 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x07,
		];
		let err = FrameHeader::parse(&mut &bytes[..], Id3v2Version::V4).unwrap_err();

		assert!(matches!(
			err.kind(),
			ErrorKind::Id3v2(e) if matches!(e.kind(), Id3v2ErrorKind::BadFrameLength)
		));
	}

	#[test_log::test]
	fn padding_and_truncation() {
		assert!(
			FrameHeader::parse(&mut &[0u8; 10][..], Id3v2Version::V3)
				.unwrap()
				.is_none()
		);
		assert!(
			FrameHeader::parse(&mut &b"TIT2\0"[..], Id3v2Version::V3)
				.unwrap()
				.is_none()
		);
	}

	#[test_log::test]
	fn invalid_ids_resolve_to_unknown() {
		for id in [&b"abc1"[..], b"COM ", b"XY-Z", b"T\xFFX1"] {
			let mut bytes = id.to_vec();
			bytes.extend([0x00, 0x00, 0x00, 0x03, 0x00, 0x00]);

			let header = FrameHeader::parse(&mut &bytes[..], Id3v2Version::V3)
				.unwrap()
				.unwrap();

			assert_eq!(header.id(), FrameId::Unknown);
			assert!(!header.has_valid_id());
			assert_eq!(header.size(), 3);
		}
	}

	#[test_log::test]
	fn unknown_ids_are_kept() {
		let bytes = [b'X', b'Y', b'Z', b'1', 0x00, 0x00, 0x00, 0x01, 0x00, 0x00];
		let header = FrameHeader::parse(&mut &bytes[..], Id3v2Version::V3)
			.unwrap()
			.unwrap();

		assert_eq!(header.id(), FrameId::Unknown);
		assert_eq!(header.raw_id(), "XYZ1");
		assert_eq!(header.size(), 1);
	}

	#[test_log::test]
	fn write_rejects_mismatched_width() {
		let header = FrameHeader::new(FrameId::TIT2).unwrap();

		let mut written = Vec::new();
		assert!(header.write_to(&mut written, Id3v2Version::V2, 1).is_err());
		assert!(
			FrameHeader::new(FrameId::TT2)
				.unwrap()
				.write_to(&mut written, Id3v2Version::V2, 0x0100_0000)
				.is_err()
		);
	}

	#[test_log::test]
	fn size_delta_saturates() {
		let mut header = FrameHeader::new(FrameId::TIT2).unwrap();
		header.size = 6;

		header.apply_size_delta(5, 12);
		assert_eq!(header.size(), 13);

		header.apply_size_delta(100, 1);
		assert_eq!(header.size(), 1);

		header.size = u32::MAX - 1;
		header.apply_size_delta(0, 10);
		assert_eq!(header.size(), u32::MAX);
	}

	#[test_log::test]
	fn flag_bytes() {
		let flags = FrameFlags {
			tag_alter_preservation: true,
			read_only: true,
			unsynchronisation: true,
			..FrameFlags::default()
		};

		assert_eq!(flags.as_id3v24_bytes(), 0x5002);
		assert_eq!(flags.as_id3v23_bytes(), 0xA000);
		assert_eq!(FrameFlags::parse_id3v24(0x5002), flags);
	}
}
