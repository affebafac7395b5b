/// The parsing strictness mode
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::config::{ParseOptions, ParsingMode};
///
/// // We only want to read spec-compliant tags
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// This mode will eagerly error on any non-spec-compliant input.
	///
	/// ## Examples of behavior
	///
	/// * Unable to decode a frame body - The parser will error and the entire tag is discarded
	/// * Unknown text encoding byte - The parser will error and the entire tag is discarded
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// This mode will skip over any frame it can't make sense of, keeping every frame it could decode.
	///
	/// NOTE: A readable tag does *not* necessarily make it writeable.
	///
	/// ## Examples of behavior
	///
	/// * Unable to decode a frame body - The frame is skipped using its declared size
	/// * Unknown text encoding byte - The frame is skipped using its declared size
	#[default]
	BestAttempt,
	/// Least eager to error, may produce invalid/partial output
	///
	/// This mode behaves like [`ParsingMode::BestAttempt`], but will also reinterpret problematic
	/// fields rather than discarding the frame.
	///
	/// ## Examples of behavior
	///
	/// * Unable to decode a frame body - The frame is skipped using its declared size
	/// * Unknown text encoding byte - The frame is decoded as if it were ISO-8859-1
	Relaxed,
}

/// Options to control how a tag is parsed
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) read_cover_art: bool,
	pub(crate) max_frames: Option<usize>,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	read_cover_art: true,
	/// 	max_frames: None,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			read_cover_art: true,
			max_frames: None,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// Whether or not to read picture frames (`PIC`/`APIC`)
	///
	/// When disabled, picture frames are skipped the same way unreadable frames are.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::config::ParseOptions;
	///
	/// // Reading cover art is expensive, and I do not need it!
	/// let parsing_options = ParseOptions::new().read_cover_art(false);
	/// ```
	pub fn read_cover_art(&mut self, read_cover_art: bool) -> Self {
		self.read_cover_art = read_cover_art;
		*self
	}

	/// The maximum number of frames to extract
	///
	/// Extraction stops once this many frames have been read. `None` means no limit.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::config::ParseOptions;
	///
	/// // Only interested in the first handful of frames
	/// let parsing_options = ParseOptions::new().max_frames(Some(8));
	/// ```
	pub fn max_frames(&mut self, max_frames: Option<usize>) -> Self {
		self.max_frames = max_frames;
		*self
	}
}
