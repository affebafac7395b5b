use super::Id3v2Tag;
use crate::error::Result;
use crate::header::Id3v2Version;

/// The legacy genre list, indexed by genre byte
///
/// This covers the original 80 genres, the Winamp extensions, and the later additions up to
/// index 191.
pub const GENRES: [&str; 192] = [
	"Blues", "Classic Rock", "Country", "Dance", "Disco", "Funk",
	"Grunge", "Hip-Hop", "Jazz", "Metal", "New Age", "Oldies",
	"Other", "Pop", "R&B", "Rap", "Reggae", "Rock",
	"Techno", "Industrial", "Alternative", "Ska", "Death Metal", "Pranks",
	"Soundtrack", "Euro-Techno", "Ambient", "Trip-Hop", "Vocal", "Jazz+Funk",
	"Fusion", "Trance", "Classical", "Instrumental", "Acid", "House",
	"Game", "Sound Clip", "Gospel", "Noise", "Alternative Rock", "Bass",
	"Soul", "Punk", "Space", "Meditative", "Instrumental Pop", "Instrumental Rock",
	"Ethnic", "Gothic", "Darkwave", "Techno-Industrial", "Electronic", "Pop-Folk",
	"Eurodance", "Dream", "Southern Rock", "Comedy", "Cult", "Gangsta",
	"Top 40", "Christian Rap", "Pop/Funk", "Jungle", "Native American", "Cabaret",
	"New Wave", "Psychedelic", "Rave", "Showtunes", "Trailer", "Lo-Fi",
	"Tribal", "Acid Punk", "Acid Jazz", "Polka", "Retro", "Musical",
	"Rock & Roll", "Hard Rock", "Folk", "Folk-Rock", "National Folk", "Swing",
	"Fast Fusion", "Bebop", "Latin", "Revival", "Celtic", "Bluegrass",
	"Avantgarde", "Gothic Rock", "Progressive Rock",
	"Psychedelic Rock", "Symphonic Rock", "Slow Rock",
	"Big Band", "Chorus", "Easy Listening", "Acoustic", "Humour", "Speech",
	"Chanson", "Opera", "Chamber Music", "Sonata", "Symphony", "Booty Bass",
	"Primus", "Porn Groove", "Satire", "Slow Jam", "Club", "Tango",
	"Samba", "Folklore", "Ballad", "Power Ballad", "Rhythmic Soul", "Freestyle",
	"Duet", "Punk Rock", "Drum Solo", "A Cappella", "Euro-House", "Dance Hall",
	"Goa", "Drum & Bass", "Club-House", "Hardcore Techno", "Terror", "Indie",
	"BritPop", "Negerpunk", "Polsk Punk", "Beat", "Christian Gangsta Rap", "Heavy Metal",
	"Black Metal", "Crossover", "Contemporary Christian", "Christian Rock", "Merengue", "Salsa",
	"Thrash Metal", "Anime", "JPop", "Synthpop", "Abstract", "Art Rock",
	"Baroque", "Bhangra", "Big Beat", "Breakbeat", "Chillout", "Downtempo",
	"Dub", "EBM", "Eclectic", "Electro", "Electroclash", "Emo",
	"Experimental", "Garage", "Global", "IDM", "Illbient", "Industro-Goth",
	"Jam Band", "Krautrock", "Leftfield", "Lounge", "Math Rock", "New Romantic",
	"Nu-Breakz", "Post-Punk", "Post-Rock", "Psytrance", "Shoegaze", "Space Rock",
	"Trop Rock", "World Music", "Neoclassical", "Audiobook", "Audio Theatre", "Neue Deutsche Welle",
	"Podcast", "Indie Rock", "G-Funk", "Dubstep", "Garage Rock", "Psybient",
];

/// The ID3v2 version to create when converting from legacy fields
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::header::Id3v2Version;
/// use id3v2_codec::tag::TagStandard;
///
/// assert_eq!(TagStandard::default().version(), Id3v2Version::V4);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TagStandard {
	/// ID3v2.2
	Id3v22,
	/// ID3v2.3
	Id3v23,
	/// ID3v2.4
	#[default]
	Id3v24,
}

impl TagStandard {
	/// The tag version this standard writes
	pub fn version(self) -> Id3v2Version {
		match self {
			TagStandard::Id3v22 => Id3v2Version::V2,
			TagStandard::Id3v23 => Id3v2Version::V3,
			TagStandard::Id3v24 => Id3v2Version::V4,
		}
	}
}

/// The fixed set of fields a legacy (ID3v1) tag can hold
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyFields {
	/// Title
	pub title: Option<String>,
	/// Artist
	pub artist: Option<String>,
	/// Album
	pub album: Option<String>,
	/// Release year
	pub year: Option<u16>,
	/// Track number
	pub track: Option<u8>,
	/// Index into [`GENRES`]
	pub genre: Option<u8>,
	/// Comment
	pub comment: Option<String>,
}

/// Find the [`GENRES`] index of a genre frame value
///
/// Accepts `"(17)"`, `"(17)Rock"`, `"17"` and `"Rock"` (case-insensitive).
fn genre_index(value: &str) -> Option<u8> {
	let value = value.trim();

	let numeric = match value.strip_prefix('(') {
		Some(rest) => rest.split_once(')').map(|(index, _)| index),
		None => Some(value),
	};

	let index = match numeric.and_then(|index| index.parse::<u8>().ok()) {
		Some(index) => index,
		None => {
			let position = GENRES
				.iter()
				.position(|genre| genre.eq_ignore_ascii_case(value))?;
			u8::try_from(position).ok()?
		},
	};

	(usize::from(index) < GENRES.len()).then_some(index)
}

impl Id3v2Tag {
	/// Create a tag from legacy fields
	///
	/// Each present field becomes a text, comment, or genre frame using the identifiers of
	/// `standard`. Genre indices outside of [`GENRES`] are dropped.
	///
	/// # Errors
	///
	/// Unable to create a frame, see [`Id3v2Tag::set_attribute`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::FrameId;
	/// use id3v2_codec::Id3v2Tag;
	/// use id3v2_codec::tag::{LegacyFields, TagStandard};
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// let fields = LegacyFields {
	/// 	title: Some(String::from("Foo")),
	/// 	genre: Some(17),
	/// 	..LegacyFields::default()
	/// };
	///
	/// let tag = Id3v2Tag::from_legacy_fields(&fields, TagStandard::Id3v23)?;
	/// assert_eq!(tag.title(), Some("Foo"));
	/// assert_eq!(tag.get(FrameId::TCON).and_then(|f| f.body().text()), Some("Rock"));
	/// # Ok(()) }
	/// ```
	pub fn from_legacy_fields(fields: &LegacyFields, standard: TagStandard) -> Result<Self> {
		let mut tag = Self::new(standard.version());

		if let Some(title) = &fields.title {
			tag.set_title(title.as_str())?;
		}

		if let Some(artist) = &fields.artist {
			tag.set_artist(artist.as_str())?;
		}

		if let Some(album) = &fields.album {
			tag.set_album(album.as_str())?;
		}

		if let Some(year) = fields.year {
			tag.set_year(u32::from(year))?;
		}

		if let Some(track) = fields.track {
			tag.set_track(u32::from(track))?;
		}

		if let Some(genre) = fields.genre {
			match GENRES.get(usize::from(genre)) {
				Some(name) => tag.set_genre(*name)?,
				None => log::warn!("Dropping unknown genre index {genre}"),
			}
		}

		if let Some(comment) = &fields.comment {
			tag.set_comment(comment.as_str())?;
		}

		Ok(tag)
	}

	/// Extract the fields a legacy tag can hold
	///
	/// Numbers that don't fit the legacy fields, and genres outside of [`GENRES`], are dropped.
	pub fn legacy_fields(&self) -> LegacyFields {
		LegacyFields {
			title: self.title().map(str::to_owned),
			artist: self.artist().map(str::to_owned),
			album: self.album().map(str::to_owned),
			year: self.year().and_then(|year| u16::try_from(year).ok()),
			track: self.track().and_then(|track| u8::try_from(track).ok()),
			genre: self.genre().and_then(genre_index),
			comment: self.comment().map(str::to_owned),
		}
	}
}
