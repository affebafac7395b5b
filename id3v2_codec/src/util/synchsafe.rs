//! The integer codec
//!
//! ID3v2 stores most sizes in one of two ways. ID3v2.2 and ID3v2.3 frames use plain big-endian
//! integers, while tag sizes (and every ID3v2.4 frame size) are "synchsafe": only the low 7 bits
//! of each byte are used, so the value can never contain a false MPEG sync pattern.
//!
//! Decoding a synchsafe value is lenient. A byte with its high bit set is not rejected, the
//! high bit is simply ignored.

use crate::error::Result;

/// Decode up to 8 bytes as a big-endian unsigned integer
///
/// Anything beyond the final 8 bytes would overflow, so only the trailing 8 bytes are used.
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::util::synchsafe::decode_be;
///
/// assert_eq!(decode_be(&[0x01, 0x00]), 256);
/// assert_eq!(decode_be(&[0x00, 0x00, 0x00, 0x05]), 5);
/// assert_eq!(decode_be(&[]), 0);
/// ```
pub fn decode_be(bytes: &[u8]) -> u64 {
	let start = bytes.len().saturating_sub(8);
	bytes[start..]
		.iter()
		.fold(0, |acc, byte| (acc << 8) | u64::from(*byte))
}

/// Decode a 4-byte synchsafe integer into its 28-bit value
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::util::synchsafe::decode_synchsafe;
///
/// assert_eq!(decode_synchsafe([0x00, 0x00, 0x02, 0x01]), 257);
/// // High bits are discarded rather than rejected
/// assert_eq!(decode_synchsafe([0x00, 0x00, 0x00, 0xFF]), 0x7F);
/// ```
pub fn decode_synchsafe(bytes: [u8; 4]) -> u32 {
	u32::from_be_bytes(bytes).unsynch()
}

/// Encode a 28-bit value as a 4-byte synchsafe integer
///
/// # Errors
///
/// `value` doesn't fit in 28 bits
///
/// # Examples
///
/// ```rust
/// use id3v2_codec::util::synchsafe::encode_synchsafe;
///
/// # fn main() -> id3v2_codec::error::Result<()> {
/// assert_eq!(encode_synchsafe(257)?, [0x00, 0x00, 0x02, 0x01]);
/// assert!(encode_synchsafe(0x1000_0000).is_err());
/// # Ok(()) }
/// ```
pub fn encode_synchsafe(value: u32) -> Result<[u8; 4]> {
	Ok(value.synch()?.to_be_bytes())
}

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// The integer type that this can be widened to for use in [`SynchsafeInteger::widening_synch`]
	type WideningType;

	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in <`INTEGER_TYPE::BITS - size_of::<INTEGER_TYPE>()`> bits
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Our synchronized number should be something completely different
	/// assert_ne!(synch_number, unsynch_number);
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Create a synchsafe integer, widening to the next available integer type
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::util::synchsafe::SynchsafeInteger;
	///
	/// // 0b11111111
	/// let large_number = u8::MAX;
	///
	/// // Widened to a u16
	/// // 0b00000001_01111111
	/// let large_number_synchsafe = large_number.widening_synch();
	///
	/// // Unsynchronizing the number will get us back to 255
	/// assert_eq!(large_number_synchsafe.unsynch(), large_number as u16);
	/// ```
	fn widening_synch(self) -> Self::WideningType;

	/// Unsynchronise a synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2_codec::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3v2_codec::error::Result<()> {
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Our synchronized number should be something completely different
	/// assert_ne!(synch_number, unsynch_number);
	///
	/// // Now, our re-unsynchronized number should match our original
	/// let re_unsynch_number = synch_number.unsynch();
	/// assert_eq!(re_unsynch_number, unsynch_number);
	/// # Ok(()) }
	/// ```
	fn unsynch(self) -> Self;
}

macro_rules! impl_synchsafe {
	(
		$ty:ty, $widening_ty:ty,
		synch($n:ident) $body:block;
		widening_synch($w:ident) $widening_body:block;
		unsynch($u:ident) $unsynch_body:block
	) => {
		#[allow(unused_parens)]
		impl SynchsafeInteger for $ty {
			type WideningType = $widening_ty;

			fn synch(self) -> Result<Self> {
				const MAXIMUM_INTEGER: $ty = {
					let num_bytes = core::mem::size_of::<$ty>();
					// 7 bits are available per byte, shave off 1 bit per byte
					<$ty>::MAX >> num_bytes
				};

				if self > MAXIMUM_INTEGER {
					crate::macros::err!(TooMuchData);
				}

				let $n = self;
				Ok($body)
			}

			fn widening_synch(self) -> Self::WideningType {
				let mut $w = <$widening_ty>::MIN;
				let $n = self;
				$widening_body;
				$w
			}

			fn unsynch(self) -> Self {
				let $u = self;
				$unsynch_body
			}
		}
	};
}

impl_synchsafe! {
	u8, u16,
	synch(n) {
		(n & 0x7F)
	};
	widening_synch(w) {
		w |= u16::from(n & 0x7F);
		w |= u16::from(n & 0x80) << 1;
	};
	unsynch(u) {
		(u & 0x7F)
	}
}

impl_synchsafe! {
	u16, u32,
	synch(n) {
		(n & 0x7F) |
		((n & (0x7F << 7)) << 1)
	};
	widening_synch(w) {
		w |= u32::from(n & 0x7F);
		w |= u32::from((n & (0x7F << 7)) << 1);
		w |= u32::from(n & (0x03 << 14)) << 2;
	};
	unsynch(u) {
		((u & 0x7F00) >> 1) | (u & 0x7F)
	}
}

impl_synchsafe! {
	u32, u64,
	synch(n) {
		(n & 0x7F) |
		((n & (0x7F << 7)) << 1) |
		((n & (0x7F << 14)) << 2) |
		((n & (0x7F << 21)) << 3)
	};
	widening_synch(w) {
		w |= u64::from(n & 0x7F);
		w |= u64::from(n & (0x7F << 7)) << 1;
		w |= u64::from(n & (0x7F << 14)) << 2;
		w |= u64::from(n & (0x7F << 21)) << 3;
		w |= u64::from(n & (0x0F << 28)) << 4;
	};
	unsynch(u) {
		((u & 0x7F00_0000) >> 3) | ((u & 0x7F_0000) >> 2) | ((u & 0x7F00) >> 1) | (u & 0x7F)
	}
}

#[cfg(test)]
mod tests {
	use crate::util::synchsafe::{
		SynchsafeInteger, decode_be, decode_synchsafe, encode_synchsafe,
	};

	macro_rules! synchsafe_integer_tests {
		(
			$($int:ty => {
				synch: $original:literal, $new:literal;
				unsynch: $original_unsync:literal, $new_unsynch:literal;
				widen: $original_widen:literal, $new_widen:literal;
			});+
		) => {
			$(
				paste::paste! {
					#[test_log::test]
					fn [<$int _synch>]() {
						assert_eq!($original.synch().unwrap(), $new);
					}

					#[test_log::test]
					fn [<$int _unsynch>]() {
						assert_eq!($original_unsync.unsynch(), $new_unsynch);
					}

					#[test_log::test]
					fn [<$int _widen>]() {
						assert_eq!($original_widen.widening_synch(), $new_widen);
					}
				}
			)+
		};
	}

	synchsafe_integer_tests! {
		u8 => {
			synch:   0x7F_u8, 0x7F_u8;
			unsynch: 0x7F_u8, 0x7F_u8;
			widen:   0xFF_u8, 0x017F_u16;
		};
		u16 => {
			synch:   0x3FFF_u16, 0x7F7F_u16;
			unsynch: 0x7F7F_u16, 0x3FFF_u16;
			widen:   0xFFFF_u16, 0x0003_7F7F_u32;
		};
		u32 => {
			synch:   0xFFF_FFFF_u32, 0x7F7F_7F7F_u32;
			unsynch: 0x7F7F_7F7F_u32, 0xFFF_FFFF_u32;
			widen:   0xFFFF_FFFF_u32, 0x000F_7F7F_7F7F_u64;
		}
	}

	#[test_log::test]
	fn synchsafe_round_trip() {
		let boundaries = [0, 1, 0x7F, 0x80, 0x3FFF, 0x4000, 0x1F_FFFF, 0x20_0000, 0xFFF_FFFF];
		let sampled = (0..=0xFFF_FFFF_u32).step_by(7919);

		for n in boundaries.into_iter().chain(sampled) {
			let encoded = encode_synchsafe(n).unwrap();
			assert!(encoded.iter().all(|b| b & 0x80 == 0), "{n:#x} -> {encoded:x?}");
			assert_eq!(decode_synchsafe(encoded), n);
		}
	}

	#[test_log::test]
	fn synchsafe_rejects_oversized() {
		assert!(encode_synchsafe(0x1000_0000).is_err());
		assert!(u32::MAX.synch().is_err());
	}

	#[test_log::test]
	fn lenient_decode_ignores_high_bits() {
		assert_eq!(decode_synchsafe([0xFF, 0xFF, 0xFF, 0xFF]), 0xFFF_FFFF);
		assert_eq!(decode_synchsafe([0x80, 0x80, 0x80, 0x81]), 1);
	}

	#[test_log::test]
	fn big_endian_decode() {
		assert_eq!(decode_be(&[0x12]), 0x12);
		assert_eq!(decode_be(&[0x12, 0x34, 0x56]), 0x12_3456);
		assert_eq!(decode_be(&[0xFF; 8]), u64::MAX);
		// Only the trailing 8 bytes contribute
		assert_eq!(decode_be(&[0xAA, 0, 0, 0, 0, 0, 0, 0, 0x01]), 1);
	}
}
