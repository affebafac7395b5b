//! Contains the errors that can arise within the codec
//!
//! The primary error is [`CodecError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.
//!
//! ID3v2 specific failures are grouped under [`Id3v2ErrorKind`]. Header level failures
//! (bad magic, bad version, malformed extended header) are fatal to a parse, while frame
//! level failures are normally absorbed by the frame extraction loop. See
//! [`ParsingMode`](crate::config::ParsingMode) for how that can be changed.

use crate::frame::FrameId;
pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, CodecError>`
pub type Result<T> = std::result::Result<T, CodecError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Data related errors
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,
	/// Expected the data to be a different size than provided
	///
	/// This occurs when the size of an item is written as one value, but that size is either too
	/// big or small to be valid within the bounds of that item.
	SizeMismatch,
	/// The input ended before a complete structure could be read
	NotEnoughData,

	// Text related errors
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while encoding text
	TextEncode(TextEncodingError),

	/// Errors that arise while reading/writing ID3v2 tags
	Id3v2(Id3v2Error),

	// Conversions for external errors
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Unable to convert bytes to a str
	StrFromUtf8(std::str::Utf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
	/// This should **never** be encountered
	Infallible(std::convert::Infallible),
}

/// The types of errors that can occur while interacting with ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	// Header
	/// Arises when the tag doesn't start with `"ID3"`
	BadMagic,
	/// Arises when an invalid ID3v2 version is found
	BadId3v2Version(u8, u8),
	/// Arises when an extended header has an invalid size (must be >= 6 bytes and less than the total tag size)
	BadExtendedHeaderSize,
	/// Arises when an ID3v2.4 extended header declares a flag byte count other than 1
	BadExtendedHeaderFlagCount(u8),

	// Frame
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	/// or if the ID is too short/long.
	BadFrameId(Vec<u8>),
	/// Arises when a frame doesn't have enough data
	BadFrameLength,
	/// Arises when an encoding byte outside of `0..=3` is found
	UnsupportedTextEncoding(u8),
	/// Arises when an invalid picture format is parsed. Only applicable to [`Id3v2Version::V2`](crate::header::Id3v2Version::V2)
	BadPictureFormat(String),
	/// Arises when invalid data is encountered while reading an ID3v2 synchronized text frame
	BadSyncText,
	/// Arises when decoding an owner-keyed frame ([`UniqueFileIdentifierFrame`](crate::items::UniqueFileIdentifierFrame),
	/// [`PrivateFrame`](crate::items::PrivateFrame), ...) with no owner
	MissingOwner,
	/// Arises when a frame body is structurally invalid for its identifier
	BadFrameBody {
		/// The frame the body belongs to
		id: FrameId,
		/// What went wrong
		reason: &'static str,
	},

	// Writing
	/// Arises when attempting to write a [`CommentFrame`](crate::items::CommentFrame) or
	/// [`UnsynchronizedTextFrame`](crate::items::UnsynchronizedTextFrame) with an invalid language
	InvalidLanguage([u8; 3]),
	/// Arises when a text field can't be represented in the encoding of the frame holding it
	UnrepresentableText(FrameId),
	/// Arises when a mutation targets a field the frame body doesn't have
	FieldNotPresent(FrameId, &'static str),
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			// Header
			Self::BadMagic => write!(f, "Expected the tag to start with \"ID3\""),
			Self::BadId3v2Version(major, minor) => write!(
				f,
				"Found an invalid version (v{major}.{minor}), expected any major revision in: (2, \
				 3, 4)"
			),
			Self::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},
			Self::BadExtendedHeaderFlagCount(count) => write!(
				f,
				"Found an extended header with {count} flag bytes, expected 1"
			),

			// Frame
			Self::BadFrameId(frame_id) => write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}"),
			Self::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			Self::UnsupportedTextEncoding(byte) => {
				write!(f, "Found an unknown text encoding byte: {byte}")
			},
			Self::BadPictureFormat(format) => {
				write!(f, "Picture: Found unexpected format \"{format}\"")
			},
			Self::BadSyncText => write!(f, "Encountered invalid data in SYLT frame"),
			Self::MissingOwner => write!(f, "Missing owner in frame"),
			Self::BadFrameBody { id, reason } => write!(f, "Invalid `{id}` frame: {reason}"),

			// Writing
			Self::InvalidLanguage(lang) => write!(
				f,
				"Invalid frame language found: {lang:?} (expected 3 ascii characters)"
			),
			Self::UnrepresentableText(id) => write!(
				f,
				"Text can't be represented in the encoding of the `{id}` frame"
			),
			Self::FieldNotPresent(id, field) => {
				write!(f, "Frame `{id}` has no field \"{field}\"")
			},
		}
	}
}

/// An error that arises while interacting with an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}

	/// Whether the error describes the tag envelope rather than a single frame
	///
	/// Envelope errors always abort a parse, frame errors are recoverable.
	pub fn is_format_error(&self) -> bool {
		matches!(
			self.kind,
			Id3v2ErrorKind::BadMagic
				| Id3v2ErrorKind::BadId3v2Version(..)
				| Id3v2ErrorKind::BadExtendedHeaderSize
				| Id3v2ErrorKind::BadExtendedHeaderFlagCount(_)
		)
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// Errors that could occur within the codec
pub struct CodecError {
	pub(crate) kind: ErrorKind,
}

impl CodecError {
	/// Create a `CodecError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::error::{CodecError, ErrorKind};
	///
	/// let too_much_data = CodecError::new(ErrorKind::TooMuchData);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::error::{CodecError, ErrorKind};
	///
	/// let too_much_data = CodecError::new(ErrorKind::TooMuchData);
	/// if let ErrorKind::TooMuchData = too_much_data.kind() {
	/// 	println!("That's a lot of data");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for CodecError {}

impl Debug for CodecError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<Id3v2Error> for CodecError {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl From<Id3v2ErrorKind> for CodecError {
	fn from(input: Id3v2ErrorKind) -> Self {
		Self {
			kind: ErrorKind::Id3v2(Id3v2Error::new(input)),
		}
	}
}

impl From<TextEncodingError> for CodecError {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::TextEncode(input),
		}
	}
}

impl From<std::io::Error> for CodecError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for CodecError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<std::str::Utf8Error> for CodecError {
	fn from(input: std::str::Utf8Error) -> Self {
		Self {
			kind: ErrorKind::StrFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for CodecError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<std::convert::Infallible> for CodecError {
	fn from(input: std::convert::Infallible) -> Self {
		Self {
			kind: ErrorKind::Infallible(input),
		}
	}
}

impl Display for CodecError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::StrFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(ref message) => write!(f, "Text encoding: {message}"),
			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),

			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),
			ErrorKind::NotEnoughData => write!(f, "Reached the end of the input unexpectedly"),

			ErrorKind::Infallible(_) => write!(f, "A expected condition was not upheld"),
		}
	}
}
