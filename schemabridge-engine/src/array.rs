//! Dynamic array-of-strings marshaling across the C boundary.
//!
//! Validation results cross the boundary as an [`ErrorArray`]: a pointer to
//! an array of null-terminated strings plus the populated length and the
//! allocated capacity. The engine owns the whole structure until the host
//! calls the array-release entry point, which frees the backing array and
//! every element string in a single call.

use std::ffi::{CString, c_char};
use std::mem::ManuallyDrop;

/// Transient array-of-strings result, `data`/`len`/`cap` layout.
///
/// `len` bounds the populated region and is the only field the host may use
/// for iteration. `cap` records the allocation capacity so the backing `Vec`
/// can be reconstructed on release; it may exceed `len`.
#[repr(C)]
pub struct ErrorArray {
    pub data: *mut *mut c_char,
    pub len: libc::size_t,
    pub cap: libc::size_t,
}

impl ErrorArray {
    /// Marshal owned messages into an engine-owned array.
    ///
    /// A message containing an interior NUL byte cannot be represented as a
    /// C string and is dropped rather than failing the whole result.
    pub fn from_messages(messages: Vec<String>) -> Self {
        let entries: Vec<*mut c_char> = messages
            .into_iter()
            .filter_map(|message| CString::new(message).ok())
            .map(CString::into_raw)
            .collect();

        Self::from_entries(entries)
    }

    /// Take ownership of raw element pointers without copying.
    ///
    /// Each non-null entry must have come from `CString::into_raw`.
    pub fn from_entries(entries: Vec<*mut c_char>) -> Self {
        let mut entries = ManuallyDrop::new(entries);

        Self {
            data: entries.as_mut_ptr(),
            len: entries.len(),
            cap: entries.capacity(),
        }
    }

    /// Free the backing array and every element string.
    ///
    /// # Safety
    /// The value must have been produced by [`ErrorArray::from_messages`] or
    /// [`ErrorArray::from_entries`] and must not have been released before.
    /// No field may be read after this call.
    pub unsafe fn release(self) {
        let entries = unsafe { Vec::from_raw_parts(self.data, self.len, self.cap) };

        for entry in entries {
            if !entry.is_null() {
                drop(unsafe { CString::from_raw(entry) });
            }
        }
    }
}
