//! The growable string builder.

use std::borrow::Cow;
use std::ffi::CStr;
use std::fmt;

use tracing::{debug, trace};

use crate::config::GrowthPolicy;
use crate::error::{StrBufError, StrBufResult};

/// View returned for a buffer that has never allocated.
const EMPTY_WITH_NUL: &[u8] = &[0];

/// A growable byte buffer for building strings incrementally.
///
/// The content is always followed by a zero terminator once anything
/// has been allocated, so [`as_c_str`](Self::as_c_str) never copies.
/// The default value is an empty buffer that owns no memory.
///
/// # Example
///
/// ```rust
/// use strbuf_core::{appendf, StringBuilder};
///
/// let mut sb = StringBuilder::new();
/// sb.append_char(b'w').unwrap();
/// sb.append_str("at!\n").unwrap();
/// appendf!(sb, "{} + {} = {}\n", 2, 2, 4).unwrap();
/// assert_eq!(sb.as_bytes(), b"wat!\n2 + 2 = 4\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringBuilder {
    // `data.len()` is the capacity; bytes past `len` are scratch space.
    data: Vec<u8>,
    len: usize,
    policy: GrowthPolicy,
}

impl StringBuilder {
    /// Creates an empty builder. Does not allocate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder that grows according to `policy`.
    #[must_use]
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Self {
            data: Vec::new(),
            len: 0,
            policy,
        }
    }

    /// Returns the growth policy of this builder.
    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    /// Number of content bytes, excluding the terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no content bytes are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes currently allocated, terminator included.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Ensures room for `extra` more bytes plus the terminator.
    ///
    /// On failure the buffer is left untouched.
    fn grow(&mut self, extra: usize) -> StrBufResult<()> {
        let required = self
            .len
            .checked_add(extra)
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| StrBufError::capacity_overflow(self.len, extra))?;

        let current = self.data.len();
        if required <= current {
            return Ok(());
        }

        let mut capacity = if current == 0 {
            self.policy
                .initial_capacity_for(extra)
                .ok_or_else(|| StrBufError::capacity_overflow(self.len, extra))?
        } else {
            current
        };
        while capacity < required {
            capacity = capacity
                .checked_mul(2)
                .ok_or_else(|| StrBufError::capacity_overflow(self.len, extra))?;
        }

        trace!(len = self.len, extra, current, capacity, "growing buffer");

        self.data
            .try_reserve_exact(capacity - current)
            .map_err(|source| StrBufError::AllocationFailed {
                requested: capacity,
                source,
            })?;
        // Cannot reallocate: the reservation above already covers it.
        self.data.resize(capacity, 0);

        if current > 0 {
            debug!(from = current, to = capacity, "reallocated buffer");
        }
        Ok(())
    }

    /// Appends raw bytes.
    ///
    /// An empty slice still allocates on a fresh buffer so that the
    /// terminator is always present after an append.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot grow to fit `bytes`.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> StrBufResult<()> {
        self.grow(bytes.len())?;
        let end = self.len + bytes.len();
        self.data[self.len..end].copy_from_slice(bytes);
        self.len = end;
        self.data[end] = 0;
        Ok(())
    }

    /// Appends a string slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot grow to fit `s`.
    pub fn append_str(&mut self, s: &str) -> StrBufResult<()> {
        self.append_bytes(s.as_bytes())
    }

    /// Appends a single byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot grow by one byte.
    pub fn append_char(&mut self, c: u8) -> StrBufResult<()> {
        self.grow(1)?;
        self.data[self.len] = c;
        self.len += 1;
        self.data[self.len] = 0;
        Ok(())
    }

    /// Appends formatted text, usually via [`appendf!`](crate::appendf).
    ///
    /// The arguments are rendered twice: once to measure the exact length,
    /// then directly into the buffer after a single growth step.
    ///
    /// # Errors
    ///
    /// Returns [`StrBufError::Format`] if a formatting implementation fails
    /// or renders a different length the second time, and a growth error
    /// if the buffer cannot fit the text. The content is unchanged in
    /// every error case.
    pub fn append_formatted(&mut self, args: fmt::Arguments<'_>) -> StrBufResult<()> {
        let mut counter = LengthCounter::default();
        if fmt::write(&mut counter, args).is_err() {
            return Err(StrBufError::format(
                "a formatting trait implementation returned an error",
            ));
        }
        let extra = counter.len;

        self.grow(extra)?;

        let start = self.len;
        let mut tail = TailWriter {
            buf: &mut self.data[start..start + extra],
            pos: 0,
        };
        let rendered = fmt::write(&mut tail, args);
        let written = tail.pos;

        if rendered.is_err() || written != extra {
            self.data[start..start + written].fill(0);
            return Err(StrBufError::format(format!(
                "rendered {written} bytes after measuring {extra}"
            )));
        }

        self.len = start + extra;
        self.data[self.len] = 0;
        Ok(())
    }

    /// Clears the content but keeps the allocation for reuse.
    pub fn reset(&mut self) {
        self.len = 0;
        if let Some(first) = self.data.first_mut() {
            *first = 0;
        }
    }

    /// Frees the allocation and returns to the empty state.
    ///
    /// Calling this on an empty or already released builder does nothing.
    /// The growth policy is kept.
    pub fn release(&mut self) {
        if !self.data.is_empty() {
            debug!(capacity = self.data.len(), "releasing buffer");
        }
        self.data = Vec::new();
        self.len = 0;
    }

    /// The content bytes, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// The content bytes followed by the zero terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if self.data.is_empty() {
            EMPTY_WITH_NUL
        } else {
            &self.data[..=self.len]
        }
    }

    /// The content as a C string.
    ///
    /// Stops at the first zero byte if the content contains one.
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(self.as_bytes_with_nul()).unwrap_or_default()
    }

    /// The content as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`StrBufError::InvalidUtf8`] if the content is not valid UTF-8.
    pub fn to_str(&self) -> StrBufResult<&str> {
        std::str::from_utf8(self.as_bytes()).map_err(|e| StrBufError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })
    }

    /// The content as text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Consumes the builder and returns the content bytes.
    #[must_use]
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.data.truncate(self.len);
        self.data
    }
}

impl fmt::Write for StringBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s).map_err(|_| fmt::Error)
    }
}

impl fmt::Display for StringBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// Dry-run writer that only counts bytes.
#[derive(Default)]
struct LengthCounter {
    len: usize,
}

impl fmt::Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.len = self.len.checked_add(s.len()).ok_or(fmt::Error)?;
        Ok(())
    }
}

/// Writes into a fixed slice and refuses to overrun it.
struct TailWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl fmt::Write for TailWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos.checked_add(s.len()).ok_or(fmt::Error)?;
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.pos..end].copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}
