use crate::frame::{Frame, FrameId};

/// A traversal position over a tag's frames
///
/// Created with [`Id3v2Tag::cursor`](crate::Id3v2Tag::cursor). The cursor can be advanced,
/// moved, and reset without touching the tag itself.
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::frame::{Frame, FrameBody, FrameId};
/// use id3v2_codec::items::TextInformationFrame;
/// use id3v2_codec::{Id3v2Tag, TextEncoding};
///
/// # fn main() -> id3v2_codec::error::Result<()> {
/// let mut tag = Id3v2Tag::default();
/// for (id, value) in [(FrameId::TIT2, "Title"), (FrameId::TPE1, "Artist")] {
/// 	let body = FrameBody::Text(TextInformationFrame::new(TextEncoding::UTF8, value));
/// 	tag.insert(Frame::new(id, body)?);
/// }
///
/// let mut cursor = tag.cursor();
/// assert_eq!(cursor.next().map(Frame::id), Some(FrameId::TIT2));
/// assert_eq!(cursor.next().map(Frame::id), Some(FrameId::TPE1));
/// assert!(cursor.next().is_none());
///
/// cursor.reset();
/// assert_eq!(cursor.current().map(Frame::id), Some(FrameId::TIT2));
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct FrameCursor<'a> {
	frames: &'a [Frame],
	position: usize,
}

impl<'a> FrameCursor<'a> {
	pub(super) fn new(frames: &'a [Frame]) -> Self {
		Self {
			frames,
			position: 0,
		}
	}

	/// The index of the frame under the cursor
	///
	/// This is equal to the number of frames once the cursor is exhausted.
	pub fn position(&self) -> usize {
		self.position
	}

	/// The frame under the cursor, without advancing
	pub fn current(&self) -> Option<&'a Frame> {
		self.frames.get(self.position)
	}

	/// Move the cursor back to the first frame
	pub fn reset(&mut self) {
		self.position = 0;
	}

	/// Move the cursor to `position`
	///
	/// Positions past the end are clamped to the end.
	pub fn seek(&mut self, position: usize) {
		self.position = position.min(self.frames.len());
	}

	/// Advance to the next frame with an id, returning it
	pub fn find_next(&mut self, id: FrameId) -> Option<&'a Frame> {
		self.find(|frame| frame.id() == id)
	}
}

impl<'a> Iterator for FrameCursor<'a> {
	type Item = &'a Frame;

	fn next(&mut self) -> Option<Self::Item> {
		let frame = self.current()?;
		self.position += 1;
		Some(frame)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.frames.len() - self.position;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for FrameCursor<'_> {}

#[cfg(test)]
mod tests {
	use crate::frame::{Frame, FrameBody, FrameId};
	use crate::items::{PlayCounterFrame, TextInformationFrame};
	use crate::tag::Id3v2Tag;
	use crate::util::text::TextEncoding;

	fn tag() -> Id3v2Tag {
		let mut tag = Id3v2Tag::default();
		for id in [FrameId::TIT2, FrameId::TPE1, FrameId::TIT2] {
			let body = FrameBody::Text(TextInformationFrame::new(TextEncoding::UTF8, "Foo"));
			tag.insert(Frame::new(id, body).unwrap());
		}

		tag.insert(
			Frame::new(
				FrameId::PCNT,
				FrameBody::PlayCounter(PlayCounterFrame::new(5)),
			)
			.unwrap(),
		);
		tag
	}

	#[test_log::test]
	fn traversal() {
		let tag = tag();
		let mut cursor = tag.cursor();
		assert_eq!(cursor.len(), 4);

		assert_eq!(cursor.find_next(FrameId::TIT2).map(Frame::id), Some(FrameId::TIT2));
		assert_eq!(cursor.position(), 1);

		assert_eq!(cursor.find_next(FrameId::TIT2).map(Frame::id), Some(FrameId::TIT2));
		assert_eq!(cursor.position(), 3);
		assert!(cursor.find_next(FrameId::TIT2).is_none());

		assert!(cursor.current().is_none());
		assert_eq!(cursor.position(), 4);
	}

	#[test_log::test]
	fn seek_and_reset() {
		let tag = tag();
		let mut cursor = tag.cursor();

		cursor.seek(100);
		assert_eq!(cursor.position(), 4);
		assert!(cursor.next().is_none());

		cursor.seek(1);
		assert_eq!(cursor.current().map(Frame::id), Some(FrameId::TPE1));

		cursor.reset();
		assert_eq!(cursor.count(), 4);
	}

	#[test_log::test]
	fn independent_cursors() {
		let tag = tag();
		let mut first = tag.cursor();
		let second = tag.cursor();

		first.next();
		assert_eq!(first.position(), 1);
		assert_eq!(second.position(), 0);
	}
}
