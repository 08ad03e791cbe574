//! Reference model and invariant checks.

use strbuf_core::{appendf, StrBufResult, StringBuilder};

/// An operation applied to both the builder and the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Append one byte.
    Char(u8),
    /// Append a byte sequence.
    Bytes(Vec<u8>),
    /// Append `"{a} + {b} = {a+b}\n"` through the formatted path.
    Sum(i32, i32),
    /// Clear the content.
    Reset,
    /// Free the storage.
    Release,
}

/// A plain `Vec<u8>` mirror of the builder's content.
#[derive(Debug, Default, Clone)]
pub struct ModelBuffer {
    content: Vec<u8>,
}

impl ModelBuffer {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `op` to the model.
    pub fn apply(&mut self, op: &Op) {
        match op {
            Op::Char(c) => self.content.push(*c),
            Op::Bytes(bytes) => self.content.extend_from_slice(bytes),
            Op::Sum(a, b) => self.content.extend_from_slice(sum_line(*a, *b).as_bytes()),
            Op::Reset | Op::Release => self.content.clear(),
        }
    }

    /// The expected content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

fn sum_line(a: i32, b: i32) -> String {
    format!("{} + {} = {}\n", a, b, i64::from(a) + i64::from(b))
}

/// Applies `op` to `sb`.
pub fn apply(sb: &mut StringBuilder, op: &Op) -> StrBufResult<()> {
    match op {
        Op::Char(c) => sb.append_char(*c),
        Op::Bytes(bytes) => sb.append_bytes(bytes),
        Op::Sum(a, b) => appendf!(sb, "{} + {} = {}\n", a, b, i64::from(*a) + i64::from(*b)),
        Op::Reset => {
            sb.reset();
            Ok(())
        }
        Op::Release => {
            sb.release();
            Ok(())
        }
    }
}

/// Checks the structural invariants of `sb`.
///
/// Returns a description of the first violation found.
pub fn check_invariants(sb: &StringBuilder) -> Result<(), String> {
    if sb.len() > sb.capacity() {
        return Err(format!("len {} exceeds capacity {}", sb.len(), sb.capacity()));
    }
    if sb.capacity() > 0 && sb.capacity() < sb.len() + 1 {
        return Err(format!(
            "capacity {} leaves no room for the terminator after {} bytes",
            sb.capacity(),
            sb.len()
        ));
    }
    let with_nul = sb.as_bytes_with_nul();
    if with_nul.len() != sb.len() + 1 {
        return Err(format!(
            "terminated view has {} bytes, expected {}",
            with_nul.len(),
            sb.len() + 1
        ));
    }
    if with_nul[sb.len()] != 0 {
        return Err(format!("byte at offset {} is not a terminator", sb.len()));
    }
    if sb.as_bytes() != &with_nul[..sb.len()] {
        return Err("content view disagrees with terminated view".to_string());
    }
    Ok(())
}
