use std::fmt::{Display, Formatter};

/// The layout of a frame body
///
/// Every [`FrameId`] maps to exactly one shape, see [`FrameId::body_kind`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
	/// [`TextInformationFrame`](crate::items::TextInformationFrame)
	Text,
	/// [`UrlLinkFrame`](crate::items::UrlLinkFrame)
	Url,
	/// [`CommentFrame`](crate::items::CommentFrame)
	Comment,
	/// [`UnsynchronizedTextFrame`](crate::items::UnsynchronizedTextFrame)
	UnsynchronizedText,
	/// [`SynchronizedTextFrame`](crate::items::SynchronizedTextFrame)
	SynchronizedText,
	/// [`AttachedPictureFrame`](crate::items::AttachedPictureFrame)
	Picture,
	/// [`GeneralEncapsulatedObject`](crate::items::GeneralEncapsulatedObject)
	EncapsulatedObject,
	/// [`KeyValueFrame`](crate::items::KeyValueFrame)
	KeyValue,
	/// [`EventTimingCodesFrame`](crate::items::EventTimingCodesFrame)
	EventTimingCodes,
	/// [`SyncedTempoCodesFrame`](crate::items::SyncedTempoCodesFrame)
	SyncedTempoCodes,
	/// [`PlayCounterFrame`](crate::items::PlayCounterFrame)
	PlayCounter,
	/// [`PopularimeterFrame`](crate::items::PopularimeterFrame)
	Popularimeter,
	/// [`UniqueFileIdentifierFrame`](crate::items::UniqueFileIdentifierFrame)
	UniqueFileIdentifier,
	/// [`OwnershipFrame`](crate::items::OwnershipFrame)
	Ownership,
	/// [`CommercialFrame`](crate::items::CommercialFrame)
	Commercial,
	/// [`TermsOfUseFrame`](crate::items::TermsOfUseFrame)
	TermsOfUse,
	/// [`PrivateFrame`](crate::items::PrivateFrame)
	Private,
	/// [`RegistrationFrame`](crate::items::RegistrationFrame) holding an encryption method
	EncryptionRegistration,
	/// [`RegistrationFrame`](crate::items::RegistrationFrame) holding a group
	GroupRegistration,
	/// [`PositionSynchronizationFrame`](crate::items::PositionSynchronizationFrame)
	PositionSynchronization,
	/// [`SignatureFrame`](crate::items::SignatureFrame)
	Signature,
	/// [`SeekFrame`](crate::items::SeekFrame)
	Seek,
	/// [`AudioEncryptionFrame`](crate::items::AudioEncryptionFrame)
	AudioEncryption,
	/// [`EncryptedMetaFrame`](crate::items::EncryptedMetaFrame)
	EncryptedMeta,
	/// [`LinkedInformationFrame`](crate::items::LinkedInformationFrame)
	LinkedInformation,
	/// [`RecommendedBufferSizeFrame`](crate::items::RecommendedBufferSizeFrame)
	RecommendedBufferSize,
	/// [`BinaryFrame`](crate::items::BinaryFrame), the payload is kept as-is
	Binary,
	/// No known layout, the frame can't be decoded
	Unknown,
}

macro_rules! frame_ids {
	($($variant:ident => $kind:ident, $description:literal;)+) => {
		/// A frame identifier
		///
		/// This covers every identifier defined by ID3v2.2, ID3v2.3, and ID3v2.4. Anything
		/// else resolves to [`FrameId::Unknown`], the raw identifier is still available
		/// through [`FrameHeader::raw_id`](crate::frame::FrameHeader::raw_id).
		#[cfg_attr(feature = "serde", derive(serde::Serialize))]
		#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
		#[non_exhaustive]
		pub enum FrameId {
			$(
				#[doc = $description]
				$variant,
			)+
			/// An identifier outside of the ID3v2.2-ID3v2.4 tables
			Unknown,
		}

		impl FrameId {
			/// Resolve a raw identifier
			///
			/// The lookup is exact, an identifier with an unexpected length or unknown
			/// characters resolves to [`FrameId::Unknown`].
			///
			/// # Examples
			///
			/// ```rust
			/// use id3v2_codec::FrameId;
			///
			/// assert_eq!(FrameId::parse(b"TIT2"), FrameId::TIT2);
			/// assert_eq!(FrameId::parse(b"TT2"), FrameId::TT2);
			/// assert_eq!(FrameId::parse(b"TIT"), FrameId::Unknown);
			/// assert_eq!(FrameId::parse(b"XYZ1"), FrameId::Unknown);
			/// ```
			pub fn parse(id: &[u8]) -> Self {
				let Ok(id) = std::str::from_utf8(id) else {
					return Self::Unknown;
				};

				match id {
					$(stringify!($variant) => Self::$variant,)+
					_ => Self::Unknown,
				}
			}

			/// The identifier as it appears in a frame header
			///
			/// This is empty for [`FrameId::Unknown`].
			pub fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => stringify!($variant),)+
					Self::Unknown => "",
				}
			}

			/// A short description of the frame's content
			pub fn description(self) -> &'static str {
				match self {
					$(Self::$variant => $description,)+
					Self::Unknown => "Unknown frame",
				}
			}

			/// The shape of the frame's body
			pub fn body_kind(self) -> BodyKind {
				match self {
					$(Self::$variant => BodyKind::$kind,)+
					Self::Unknown => BodyKind::Unknown,
				}
			}
		}
	};
}

frame_ids! {
	// ID3v2.2
	BUF => RecommendedBufferSize, "Recommended buffer size";
	CNT => PlayCounter, "Play counter";
	COM => Comment, "Comments";
	CRA => AudioEncryption, "Audio encryption";
	CRM => EncryptedMeta, "Encrypted meta frame";
	ETC => EventTimingCodes, "Event timing codes";
	EQU => Binary, "Equalization";
	GEO => EncapsulatedObject, "General encapsulated object";
	IPL => KeyValue, "Involved people list";
	LNK => LinkedInformation, "Linked information";
	MCI => Binary, "Music CD identifier";
	MLL => Binary, "MPEG location lookup table";
	PIC => Picture, "Attached picture";
	POP => Popularimeter, "Popularimeter";
	REV => Binary, "Reverb";
	RVA => Binary, "Relative volume adjustment";
	SLT => SynchronizedText, "Synchronized lyric/text";
	STC => SyncedTempoCodes, "Synced tempo codes";
	TAL => Text, "Album/Movie/Show title";
	TBP => Text, "BPM (Beats Per Minute)";
	TCM => Text, "Composer";
	TCO => Text, "Content type";
	TCR => Text, "Copyright message";
	TDA => Text, "Date";
	TDY => Text, "Playlist delay";
	TEN => Text, "Encoded by";
	TFT => Text, "File type";
	TIM => Text, "Time";
	TKE => Text, "Initial key";
	TLA => Text, "Language(s)";
	TLE => Text, "Length";
	TMT => Text, "Media type";
	TOA => Text, "Original artist(s)/performer(s)";
	TOF => Text, "Original filename";
	TOL => Text, "Original Lyricist(s)/text writer(s)";
	TOR => Text, "Original release year";
	TOT => Text, "Original album/Movie/Show title";
	TP1 => Text, "Lead artist(s)/Lead performer(s)/Soloist(s)/Performing group";
	TP2 => Text, "Band/Orchestra/Accompaniment";
	TP3 => Text, "Conductor/Performer refinement";
	TP4 => Text, "Interpreted, remixed, or otherwise modified by";
	TPA => Text, "Part of a set";
	TPB => Text, "Publisher";
	TRC => Text, "ISRC (International Standard Recording Code)";
	TRD => Text, "Recording dates";
	TRK => Text, "Track number/Position in set";
	TSI => Text, "Size";
	TSS => Text, "Software/hardware and settings used for encoding";
	TT1 => Text, "Content group description";
	TT2 => Text, "Title/Songname/Content description";
	TT3 => Text, "Subtitle/Description refinement";
	TXT => Text, "Lyricist/text writer";
	TXX => Text, "User defined text information frame";
	TYE => Text, "Year";
	UFI => UniqueFileIdentifier, "Unique file identifier";
	ULT => UnsynchronizedText, "Unsychronized lyric/text transcription";
	WAF => Url, "Official audio file webpage";
	WAR => Url, "Official artist/performer webpage";
	WAS => Url, "Official audio source webpage";
	WCM => Url, "Commercial information";
	WCP => Url, "Copyright/Legal information";
	WPB => Url, "Publishers official webpage";
	WXX => Url, "User defined URL link frame";

	// ID3v2.3
	AENC => AudioEncryption, "Audio encryption";
	APIC => Picture, "Attached picture";
	COMM => Comment, "Comments";
	COMR => Commercial, "Commercial frame";
	ENCR => EncryptionRegistration, "Encryption method registration";
	EQUA => Binary, "Equalization";
	ETCO => EventTimingCodes, "Event timing codes";
	GEOB => EncapsulatedObject, "General encapsulated object";
	GRID => GroupRegistration, "Group identification registration";
	IPLS => KeyValue, "Involved people list";
	LINK => LinkedInformation, "Linked information";
	MCDI => Binary, "Music CD identifier";
	MLLT => Binary, "MPEG location lookup table";
	OWNE => Ownership, "Ownership frame";
	PRIV => Private, "Private frame";
	PCNT => PlayCounter, "Play counter";
	POPM => Popularimeter, "Popularimeter";
	POSS => PositionSynchronization, "Position synchronisation frame";
	RBUF => RecommendedBufferSize, "Recommended buffer size";
	RVAD => Binary, "Relative volume adjustment";
	RVRB => Binary, "Reverb";
	SYLT => SynchronizedText, "Synchronized lyric/text";
	SYTC => SyncedTempoCodes, "Synchronized tempo codes";
	TALB => Text, "Album/Movie/Show title";
	TBPM => Text, "BPM (beats per minute)";
	TCOM => Text, "Composer";
	TCON => Text, "Content type";
	TCOP => Text, "Copyright message";
	TDAT => Text, "Date";
	TDLY => Text, "Playlist delay";
	TENC => Text, "Encoded by";
	TEXT => Text, "Lyricist/Text writer";
	TFLT => Text, "File type";
	TIME => Text, "Time";
	TIT1 => Text, "Content group description";
	TIT2 => Text, "Title/songname/content description";
	TIT3 => Text, "Subtitle/Description refinement";
	TKEY => Text, "Initial key";
	TLAN => Text, "Language(s)";
	TLEN => Text, "Length";
	TMED => Text, "Media type";
	TOAL => Text, "Original album/movie/show title";
	TOFN => Text, "Original filename";
	TOLY => Text, "Original lyricist(s)/text writer(s)";
	TOPE => Text, "Original artist(s)/performer(s)";
	TORY => Text, "Original release year";
	TOWN => Text, "File owner/licensee";
	TPE1 => Text, "Lead performer(s)/Soloist(s)";
	TPE2 => Text, "Band/orchestra/accompaniment";
	TPE3 => Text, "Conductor/performer refinement";
	TPE4 => Text, "Interpreted, remixed, or otherwise modified by";
	TPOS => Text, "Part of a set";
	TPUB => Text, "Publisher";
	TRCK => Text, "Track number/Position in set";
	TRDA => Text, "Recording dates";
	TRSN => Text, "Internet radio station name";
	TRSO => Text, "Internet radio station owner";
	TSIZ => Text, "Size";
	TSRC => Text, "ISRC (international standard recording code)";
	TSSE => Text, "Software/Hardware and settings used for encoding";
	TYER => Text, "Year";
	TXXX => Text, "User defined text information frame";
	UFID => UniqueFileIdentifier, "Unique file identifier";
	USER => TermsOfUse, "Terms of use";
	USLT => UnsynchronizedText, "Unsychronized lyric/text transcription";
	WCOM => Url, "Commercial information";
	WCOP => Url, "Copyright/Legal information";
	WOAF => Url, "Official audio file webpage";
	WOAR => Url, "Official artist/performer webpage";
	WOAS => Url, "Official audio source webpage";
	WORS => Url, "Official internet radio station homepage";
	WPAY => Url, "Payment";
	WPUB => Url, "Publishers official webpage";
	WXXX => Url, "User defined URL link frame";

	// ID3v2.4
	ASPI => Binary, "Audio seek point index";
	EQU2 => Binary, "Equalisation (2)";
	RVA2 => Binary, "Relative volume adjustment (2)";
	SEEK => Seek, "Seek frame";
	SIGN => Signature, "Signature frame";
	TDEN => Text, "Encoding time";
	TDOR => Text, "Original release time";
	TDRC => Text, "Recording time";
	TDRL => Text, "Release time";
	TDTG => Text, "Tagging time";
	TIPL => KeyValue, "Involved people list";
	TMCL => KeyValue, "Musician credits list";
	TMOO => Text, "Mood";
	TPRO => Text, "Produced notice";
	TSOA => Text, "Album sort order";
	TSOP => Text, "Performer sort order";
	TSOT => Text, "Title sort order";
	TSST => Text, "Set subtitle";
}

impl FrameId {
	/// Whether this is a 3 character ID3v2.2 identifier
	pub fn is_v22(self) -> bool {
		self.as_str().len() == 3
	}

	/// Whether the frame carries a description alongside its value (`TXXX`/`WXXX`)
	pub fn is_user_defined(self) -> bool {
		matches!(self, Self::TXX | Self::TXXX | Self::WXX | Self::WXXX)
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Unknown => f.write_str("<unknown>"),
			_ => f.write_str(self.as_str()),
		}
	}
}

/// Whether `id` is made up entirely of `'A'..='Z'` and `'0'..='9'`
pub(crate) fn verify_id(id: &[u8]) -> bool {
	!id.is_empty()
		&& id
			.iter()
			.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
	use super::{BodyKind, FrameId, verify_id};

	#[test_log::test]
	fn lookup_is_exact() {
		assert_eq!(FrameId::parse(b"TIT2"), FrameId::TIT2);
		assert_eq!(FrameId::parse(b"PIC"), FrameId::PIC);
		assert_eq!(FrameId::parse(b"TIT2\0"), FrameId::Unknown);
		assert_eq!(FrameId::parse(b"tit2"), FrameId::Unknown);
		assert_eq!(FrameId::parse(&[0xFF, 0xFE, 0xFD, 0xFC]), FrameId::Unknown);
		assert_eq!(FrameId::parse(b""), FrameId::Unknown);
	}

	#[test_log::test]
	fn identifier_round_trip() {
		for id in [
			"TT2", "TXX", "WXX", "COM", "PIC", "TIT2", "TXXX", "APIC", "COMM", "TDRC", "RVA2",
			"SEEK", "SIGN", "TSST",
		] {
			let parsed = FrameId::parse(id.as_bytes());
			assert_ne!(parsed, FrameId::Unknown, "{id}");
			assert_eq!(parsed.as_str(), id);
			assert_eq!(parsed.to_string(), id);
		}

		assert_eq!(FrameId::Unknown.as_str(), "");
	}

	#[test_log::test]
	fn body_kinds() {
		assert_eq!(FrameId::TIT2.body_kind(), BodyKind::Text);
		assert_eq!(FrameId::TXX.body_kind(), BodyKind::Text);
		assert_eq!(FrameId::WOAR.body_kind(), BodyKind::Url);
		assert_eq!(FrameId::IPLS.body_kind(), BodyKind::KeyValue);
		assert_eq!(FrameId::TIPL.body_kind(), BodyKind::KeyValue);
		assert_eq!(FrameId::PIC.body_kind(), BodyKind::Picture);
		assert_eq!(FrameId::ENCR.body_kind(), BodyKind::EncryptionRegistration);
		assert_eq!(FrameId::GRID.body_kind(), BodyKind::GroupRegistration);
		assert_eq!(FrameId::RVA2.body_kind(), BodyKind::Binary);
		assert_eq!(FrameId::LNK.body_kind(), BodyKind::LinkedInformation);
		assert_eq!(FrameId::RBUF.body_kind(), BodyKind::RecommendedBufferSize);
		assert_eq!(FrameId::Unknown.body_kind(), BodyKind::Unknown);
	}

	#[test_log::test]
	fn widths() {
		assert!(FrameId::TT2.is_v22());
		assert!(!FrameId::TIT2.is_v22());
		assert!(FrameId::TXXX.is_user_defined());
		assert!(FrameId::WXX.is_user_defined());
		assert!(!FrameId::TIT2.is_user_defined());
	}

	#[test_log::test]
	fn id_characters() {
		assert!(verify_id(b"TIT2"));
		assert!(verify_id(b"XYZ1"));
		assert!(!verify_id(b"TI\0T"));
		assert!(!verify_id(b"tit2"));
		assert!(!verify_id(b""));
	}
}
