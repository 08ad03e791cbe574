//! Result codes and last-error reporting.

use std::cell::RefCell;
use std::ffi::CString;

use strbuf_core::StrBufError;

/// Result code for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbResult {
    /// Operation succeeded.
    Ok = 0,
    /// Generic error.
    Error = 1,
    /// Null pointer argument.
    NullPointer = 2,
    /// Out of memory.
    OutOfMemory = 3,
    /// Requested capacity does not fit in `size_t`.
    CapacityOverflow = 4,
}

impl SbResult {
    /// Returns true if the result indicates success.
    pub fn is_ok(self) -> bool {
        self == SbResult::Ok
    }

    /// Returns true if the result indicates an error.
    pub fn is_err(self) -> bool {
        self != SbResult::Ok
    }
}

/// Error code type for C compatibility.
pub type ErrorCode = i32;

impl From<SbResult> for ErrorCode {
    fn from(result: SbResult) -> Self {
        result as ErrorCode
    }
}

impl From<ErrorCode> for SbResult {
    fn from(code: ErrorCode) -> Self {
        match code {
            0 => SbResult::Ok,
            2 => SbResult::NullPointer,
            3 => SbResult::OutOfMemory,
            4 => SbResult::CapacityOverflow,
            _ => SbResult::Error,
        }
    }
}

impl From<&StrBufError> for SbResult {
    fn from(err: &StrBufError) -> Self {
        match err {
            StrBufError::AllocationFailed { .. } => SbResult::OutOfMemory,
            StrBufError::CapacityOverflow { .. } => SbResult::CapacityOverflow,
            StrBufError::InvalidUtf8 { .. } | StrBufError::Format { .. } => SbResult::Error,
        }
    }
}

// Thread-local storage for last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Sets the last error message.
pub fn set_last_error(message: impl Into<String>) {
    let msg = message.into();
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clears the last error.
pub fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Records `err` as the last error and returns its code.
pub fn report(err: &StrBufError) -> SbResult {
    set_last_error(err.to_string());
    SbResult::from(err)
}

/// Gets the last error message as a C string.
///
/// Returns null if no error is set. The pointer is valid until the next
/// FFI call on this thread.
#[no_mangle]
pub extern "C" fn sb_get_last_error() -> *const std::ffi::c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(cstr) => cstr.as_ptr(),
        None => std::ptr::null(),
    })
}

/// Clears the last error message.
#[no_mangle]
pub extern "C" fn sb_clear_last_error() {
    clear_last_error();
}
