//! String builder handle and its exported functions.

use std::ffi::{c_char, CStr};

use strbuf_core::{StrBufError, StrBufResult, StringBuilder};

use crate::error::{clear_last_error, report, set_last_error, SbResult};

/// An opaque string builder handle.
///
/// Created by `sb_new` and freed by `sb_free`. Never dereference or
/// modify directly.
#[repr(C)]
pub struct SbHandle {
    _private: [u8; 0],
}

/// Borrows the builder behind a handle.
///
/// # Safety
///
/// `handle` must be null or a live pointer returned by `sb_new`.
unsafe fn builder_mut<'a>(handle: *mut SbHandle) -> Option<&'a mut StringBuilder> {
    (handle as *mut StringBuilder).as_mut()
}

/// Shared borrow of the builder behind a handle.
///
/// # Safety
///
/// `handle` must be null or a live pointer returned by `sb_new`.
unsafe fn builder_ref<'a>(handle: *const SbHandle) -> Option<&'a StringBuilder> {
    (handle as *const StringBuilder).as_ref()
}

/// Copies `len` bytes at `data` into owned storage.
///
/// The input may point into the builder's own storage (for example the
/// result of `sb_to_str`), which growth would free before the copy.
///
/// # Safety
///
/// `data` must be valid for `len` reads, and `len` must not exceed
/// `isize::MAX`.
unsafe fn copy_input(data: *const u8, len: usize) -> StrBufResult<Vec<u8>> {
    let mut owned = Vec::new();
    owned
        .try_reserve_exact(len)
        .map_err(|source| StrBufError::AllocationFailed {
            requested: len,
            source,
        })?;
    if len > 0 {
        owned.extend_from_slice(std::slice::from_raw_parts(data, len));
    }
    Ok(owned)
}

/// Appends `len` bytes at `data`, which may alias the builder's storage.
///
/// # Safety
///
/// `handle` must be null or live, and `data` must be valid for `len` reads.
unsafe fn append_raw(handle: *mut SbHandle, data: *const u8, len: usize) -> SbResult {
    clear_last_error();

    if len > isize::MAX as usize {
        set_last_error(format!("input length {len} exceeds isize::MAX"));
        return SbResult::CapacityOverflow;
    }
    let owned = match copy_input(data, len) {
        Ok(owned) => owned,
        Err(e) => return report(&e),
    };
    with_builder(handle, |sb| sb.append_bytes(&owned))
}

/// Runs `op` on the builder behind `handle` and maps the outcome to a code.
///
/// # Safety
///
/// `handle` must be null or a live pointer returned by `sb_new`.
unsafe fn with_builder(
    handle: *mut SbHandle,
    op: impl FnOnce(&mut StringBuilder) -> StrBufResult<()>,
) -> SbResult {
    clear_last_error();

    let Some(sb) = builder_mut(handle) else {
        set_last_error("null pointer argument");
        return SbResult::NullPointer;
    };

    match op(sb) {
        Ok(()) => SbResult::Ok,
        Err(e) => report(&e),
    }
}

/// Creates an empty string builder.
///
/// Does not allocate content storage until the first append. Free the
/// handle with `sb_free`.
#[no_mangle]
pub extern "C" fn sb_new() -> *mut SbHandle {
    Box::into_raw(Box::new(StringBuilder::new())) as *mut SbHandle
}

/// Frees a handle created by `sb_new`. Null is ignored.
///
/// # Safety
///
/// `handle` must be null or a live pointer returned by `sb_new`, and must
/// not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn sb_free(handle: *mut SbHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut StringBuilder));
    }
}

/// Appends a null-terminated string.
///
/// # Safety
///
/// `handle` must be null or live, and `s` must be null or point to a
/// null-terminated string. `s` may point into the same builder.
#[no_mangle]
pub unsafe extern "C" fn sb_append_str(handle: *mut SbHandle, s: *const c_char) -> SbResult {
    if s.is_null() {
        set_last_error("null pointer argument");
        return SbResult::NullPointer;
    }
    let bytes = CStr::from_ptr(s).to_bytes();
    append_raw(handle, bytes.as_ptr(), bytes.len())
}

/// Appends `len` bytes starting at `data`.
///
/// `data` may be null when `len` is zero.
///
/// # Safety
///
/// `handle` must be null or live, and `data` must be valid for `len` reads.
/// `data` may point into the same builder.
#[no_mangle]
pub unsafe extern "C" fn sb_append_bytes(
    handle: *mut SbHandle,
    data: *const u8,
    len: usize,
) -> SbResult {
    if len > 0 && data.is_null() {
        set_last_error("null pointer argument");
        return SbResult::NullPointer;
    }
    append_raw(handle, data, len)
}

/// Appends a single character.
///
/// # Safety
///
/// `handle` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn sb_append_char(handle: *mut SbHandle, ch: c_char) -> SbResult {
    with_builder(handle, |sb| sb.append_char(ch as u8))
}

/// Clears the content, keeping the allocation.
///
/// # Safety
///
/// `handle` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn sb_reset(handle: *mut SbHandle) -> SbResult {
    with_builder(handle, |sb| {
        sb.reset();
        Ok(())
    })
}

/// Frees the content storage. The handle stays valid and empty.
///
/// # Safety
///
/// `handle` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn sb_destroy(handle: *mut SbHandle) -> SbResult {
    with_builder(handle, |sb| {
        sb.release();
        Ok(())
    })
}

/// Returns the content as a null-terminated string.
///
/// Never null for a live handle; an unallocated builder yields an empty
/// string. The pointer is invalidated by the next mutation of the builder.
///
/// # Safety
///
/// `handle` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn sb_to_str(handle: *const SbHandle) -> *const c_char {
    match builder_ref(handle) {
        Some(sb) => sb.as_c_str().as_ptr(),
        None => std::ptr::null(),
    }
}

/// Returns the content length in bytes, excluding the terminator.
///
/// # Safety
///
/// `handle` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn sb_len(handle: *const SbHandle) -> usize {
    builder_ref(handle).map_or(0, |sb| sb.len())
}

/// Returns the allocated capacity in bytes.
///
/// # Safety
///
/// `handle` must be null or live.
#[no_mangle]
pub unsafe extern "C" fn sb_capacity(handle: *const SbHandle) -> usize {
    builder_ref(handle).map_or(0, |sb| sb.capacity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::sb_get_last_error;

    #[test]
    fn wat_through_c_abi() {
        let handle = sb_new();
        unsafe {
            assert_eq!(sb_append_char(handle, b'w' as c_char), SbResult::Ok);
            assert_eq!(sb_append_char(handle, b'a' as c_char), SbResult::Ok);
            assert_eq!(sb_append_char(handle, b't' as c_char), SbResult::Ok);
            assert_eq!(sb_append_str(handle, c"!\n".as_ptr()), SbResult::Ok);

            let s = CStr::from_ptr(sb_to_str(handle));
            assert_eq!(s.to_bytes(), b"wat!\n");
            assert_eq!(sb_len(handle), 5);
            assert_eq!(sb_capacity(handle), 32);

            sb_free(handle);
        }
    }

    #[test]
    fn fresh_handle_yields_empty_string() {
        let handle = sb_new();
        unsafe {
            let ptr = sb_to_str(handle);
            assert!(!ptr.is_null());
            assert_eq!(CStr::from_ptr(ptr).to_bytes(), b"");
            assert_eq!(sb_capacity(handle), 0);
            sb_free(handle);
        }
    }

    #[test]
    fn append_bytes_with_len() {
        let handle = sb_new();
        let data = b"abcdef";
        unsafe {
            assert_eq!(sb_append_bytes(handle, data.as_ptr(), 3), SbResult::Ok);
            assert_eq!(sb_append_bytes(handle, std::ptr::null(), 0), SbResult::Ok);
            assert_eq!(
                sb_append_bytes(handle, std::ptr::null(), 2),
                SbResult::NullPointer
            );
            assert_eq!(CStr::from_ptr(sb_to_str(handle)).to_bytes(), b"abc");
            sb_free(handle);
        }
    }

    #[test]
    fn reset_and_destroy() {
        let handle = sb_new();
        unsafe {
            sb_append_str(handle, c"hello".as_ptr());

            assert_eq!(sb_reset(handle), SbResult::Ok);
            assert_eq!(sb_len(handle), 0);
            assert_eq!(sb_capacity(handle), 32);

            assert_eq!(sb_destroy(handle), SbResult::Ok);
            assert_eq!(sb_destroy(handle), SbResult::Ok);
            assert_eq!(sb_capacity(handle), 0);

            // Still usable after destroy.
            sb_append_str(handle, c"again".as_ptr());
            assert_eq!(CStr::from_ptr(sb_to_str(handle)).to_bytes(), b"again");

            sb_free(handle);
        }
    }

    #[test]
    fn null_handle_is_rejected() {
        let null = std::ptr::null_mut();
        unsafe {
            assert_eq!(sb_append_char(null, b'x' as c_char), SbResult::NullPointer);
            assert!(!sb_get_last_error().is_null());
            assert_eq!(sb_append_str(null, c"x".as_ptr()), SbResult::NullPointer);
            assert_eq!(sb_reset(null), SbResult::NullPointer);
            assert_eq!(sb_destroy(null), SbResult::NullPointer);
            assert!(sb_to_str(null).is_null());
            assert_eq!(sb_len(null), 0);
            sb_free(null);
        }
    }

    #[test]
    fn success_clears_last_error() {
        let handle = sb_new();
        unsafe {
            sb_reset(std::ptr::null_mut());
            assert!(!sb_get_last_error().is_null());

            sb_append_char(handle, b'x' as c_char);
            assert!(sb_get_last_error().is_null());
            sb_free(handle);
        }
    }

    #[test]
    fn append_own_content_across_growth() {
        let handle = sb_new();
        unsafe {
            let fill = [b'q'; 31];
            assert_eq!(sb_append_bytes(handle, fill.as_ptr(), fill.len()), SbResult::Ok);
            assert_eq!(sb_capacity(handle), 32);

            assert_eq!(sb_append_str(handle, sb_to_str(handle)), SbResult::Ok);
            assert_eq!(sb_len(handle), 62);
            assert_eq!(sb_capacity(handle), 64);
            assert_eq!(CStr::from_ptr(sb_to_str(handle)).to_bytes(), &[b'q'; 62][..]);

            // Same through the length-delimited entry point.
            let own = sb_to_str(handle) as *const u8;
            assert_eq!(sb_append_bytes(handle, own, 62), SbResult::Ok);
            assert_eq!(sb_len(handle), 124);
            assert_eq!(sb_capacity(handle), 128);
            assert_eq!(CStr::from_ptr(sb_to_str(handle)).to_bytes(), &[b'q'; 124][..]);

            sb_free(handle);
        }
    }

    #[test]
    fn oversized_length_is_rejected_before_reading() {
        let handle = sb_new();
        let byte = 0u8;
        unsafe {
            let result = sb_append_bytes(handle, &byte, isize::MAX as usize + 1);
            assert_eq!(result, SbResult::CapacityOverflow);

            let msg = CStr::from_ptr(sb_get_last_error());
            assert!(msg.to_str().unwrap().contains("exceeds isize::MAX"));
            assert_eq!(sb_len(handle), 0);
            assert_eq!(sb_capacity(handle), 0);

            sb_free(handle);
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn allocation_failure_reports_out_of_memory() {
        let handle = sb_new();
        let byte = 0u8;
        unsafe {
            assert_eq!(sb_append_char(handle, b'x' as c_char), SbResult::Ok);

            // No allocator can hold isize::MAX bytes; the input is never read.
            let result = sb_append_bytes(handle, &byte, isize::MAX as usize);
            assert_eq!(result, SbResult::OutOfMemory);

            let ptr = sb_get_last_error();
            assert!(!ptr.is_null());
            let msg = CStr::from_ptr(ptr).to_str().unwrap();
            assert!(msg.starts_with("allocation of"));

            assert_eq!(CStr::from_ptr(sb_to_str(handle)).to_bytes(), b"x");
            assert_eq!(sb_capacity(handle), 32);

            sb_free(handle);
        }
    }
}
