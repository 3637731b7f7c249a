//! Array decoding: transient native result to owned host strings.
//!
//! The engine's validate operation returns an [`ErrorArray`] it continues to
//! own. Decoding copies every populated entry into an owned `String` and
//! then issues exactly one array-release call, after which no field of the
//! array is touched again.

use std::ffi::CStr;
use std::ptr::NonNull;

use crate::boundary::{Boundary, ErrorArray};

/// Release-on-drop guard around a native array.
///
/// Holding the release in a guard keeps the exactly-once property on every
/// exit path, including an unwind mid-copy, and covers the `len == 0` case
/// where the array still owns an allocation.
struct ReleaseGuard {
    boundary: Boundary,
    raw: *mut ErrorArray,
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        unsafe { (self.boundary.array_free)(self.raw) };
    }
}

/// Copy all entries out of `raw` and release it.
///
/// Iteration is bounded by `len` only; the capacity field is engine
/// bookkeeping. Null entries are skipped rather than failing, matching the
/// compacting behavior expected of the decode step.
///
/// # Safety
/// `raw` must be a live array obtained from the same boundary's validate
/// operation, not yet released, and not aliased by another thread.
pub(crate) unsafe fn decode_error_array(
    boundary: Boundary,
    raw: NonNull<ErrorArray>,
) -> Vec<String> {
    let guard = ReleaseGuard {
        boundary,
        raw: raw.as_ptr(),
    };

    let (data, len) = {
        let array = unsafe { raw.as_ref() };
        (array.data, array.len)
    };

    let mut entries = Vec::with_capacity(len);
    for index in 0..len {
        let entry = unsafe { *data.add(index) };
        if entry.is_null() {
            continue;
        }

        let text = unsafe { CStr::from_ptr(entry) };
        entries.push(text.to_string_lossy().into_owned());
    }

    drop(guard);
    entries
}
