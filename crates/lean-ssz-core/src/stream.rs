//! Scoped byte stream helpers.
//!
//! Streams are plain [`std::io::Read`] and [`std::io::Write`] values. Every
//! read here is bounded by a scope: a helper never pulls more bytes off the
//! stream than the caller allowed, and a short stream is reported as a
//! malformed encoding rather than an I/O failure.

use std::io::{self, Read, Write};

use crate::contract::SszType;
use crate::error::{MalformedEncoding, SszResult};

/// Upper bound on the up-front allocation for a scoped read.
///
/// Larger reads grow the buffer as bytes actually arrive, so an inflated
/// scope cannot force a large allocation on its own.
const READ_CAPACITY_HINT: usize = 64 * 1024;

/// Write all of `bytes`, returning the count written.
pub fn write_bytes<W: Write>(stream: &mut W, bytes: &[u8]) -> SszResult<usize> {
    stream.write_all(bytes)?;
    Ok(bytes.len())
}

/// Read exactly `len` bytes out of a scope of `scope` bytes.
pub fn read_bytes<R: Read>(stream: &mut R, len: usize, scope: usize) -> SszResult<Vec<u8>> {
    if len > scope {
        return Err(MalformedEncoding::InsufficientBytes {
            needed: len,
            available: scope,
        }
        .into());
    }

    let mut buf = Vec::with_capacity(len.min(READ_CAPACITY_HINT));
    Read::take(&mut *stream, len as u64).read_to_end(&mut buf)?;

    if buf.len() < len {
        tracing::trace!(needed = len, available = buf.len(), "stream ended inside scope");
        return Err(MalformedEncoding::InsufficientBytes {
            needed: len,
            available: buf.len(),
        }
        .into());
    }
    Ok(buf)
}

/// Read a fixed-size array out of a scope of `scope` bytes.
pub fn read_array<R: Read, const N: usize>(stream: &mut R, scope: usize) -> SszResult<[u8; N]> {
    let bytes = read_bytes(stream, N, scope)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Read the bytes that belong to one value of type `T`.
///
/// Fixed-size types take exactly their byte length, whatever the scope.
/// Variable-size types take the whole scope.
pub fn read_scope<T: SszType, R: Read>(stream: &mut R, scope: usize) -> SszResult<Vec<u8>> {
    let len = if T::is_fixed_size() {
        T::get_byte_length()?
    } else {
        scope
    };
    read_bytes(stream, len, scope)
}

/// A writer that tracks how many bytes passed through it.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    position: usize,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Bytes written so far (the stream's "tell").
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.position += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
