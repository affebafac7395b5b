//! Allocations sized by values read from a tag
//!
//! Every size in a tag is attacker controlled, so buffers sized by one are checked against
//! [`GlobalOptions::allocation_limit`](crate::config::GlobalOptions::allocation_limit) and
//! reserved fallibly.

use crate::config::global_options;
use crate::error::Result;
use crate::macros::err;

fn check_limit(len: usize) -> Result<()> {
	let limit = global_options().allocation_limit;
	if len > limit {
		log::debug!("Refusing to allocate {len} bytes, limit is {limit}");
		err!(TooMuchData);
	}

	Ok(())
}

/// Creates a `Vec` of `len` copies of `element`
///
/// Use [`try_vec!`](crate::macros::try_vec) instead of calling this.
pub(crate) fn fallible_vec_from_element<T>(element: T, len: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	let mut v = Vec::new();
	if len == 0 {
		return Ok(v);
	}

	check_limit(len)?;
	v.try_reserve_exact(len)?;
	v.resize(len, element);

	Ok(v)
}

/// Provides `try_with_capacity_stable` on `Vec`
pub(crate) trait VecFallibleCapacity<T>: Sized {
	/// `Vec::with_capacity`, respecting the allocation limit
	///
	/// Named to stay clear of the unstable `Vec::try_with_capacity`.
	fn try_with_capacity_stable(capacity: usize) -> Result<Self>;
}

impl<T> VecFallibleCapacity<T> for Vec<T> {
	fn try_with_capacity_stable(capacity: usize) -> Result<Self> {
		check_limit(capacity)?;

		let mut v = Vec::new();
		v.try_reserve_exact(capacity)?;

		Ok(v)
	}
}
