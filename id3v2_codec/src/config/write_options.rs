/// Options to control how a tag is written
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) lossy_text_encoding: bool,
	pub(crate) crc: bool,
}

impl WriteOptions {
	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: None,
			lossy_text_encoding: true,
			crc: false,
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// By default no padding is written, making the declared tag size the exact sum of
	/// all frames (and the extended header, if present).
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::config::WriteOptions;
	///
	/// // Leave some room for future edits
	/// let options = WriteOptions::new().preferred_padding(1024);
	///
	/// // ...Or no padding at all
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub const fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		match preferred_padding {
			0 => self.preferred_padding = None,
			_ => self.preferred_padding = Some(preferred_padding),
		}
		self
	}

	/// Whether to replace characters that can't be represented in a frame's encoding
	///
	/// When enabled, such characters are written as `?`. When disabled, writing fails with
	/// [`ErrorKind::TextEncode`](crate::error::ErrorKind::TextEncode).
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::config::WriteOptions;
	///
	/// // Fail rather than silently lose characters
	/// let options = WriteOptions::new().lossy_text_encoding(false);
	/// ```
	pub const fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}

	/// Whether to write an extended header holding a CRC-32 of the frame region
	///
	/// This is ignored for ID3v2.2 tags, which have no extended header.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::config::WriteOptions;
	///
	/// let options = WriteOptions::new().crc(true);
	/// ```
	pub const fn crc(mut self, crc: bool) -> Self {
		self.crc = crc;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	preferred_padding: None,
	/// 	lossy_text_encoding: true,
	/// 	crc: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
