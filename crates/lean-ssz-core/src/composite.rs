//! Offset-table composition for aggregates.
//!
//! An aggregate (container or sequence) is encoded as a fixed portion
//! followed by a variable portion:
//!
//! - fixed-size parts are written in place;
//! - each variable-size part is replaced in the fixed portion by a
//!   `BYTES_PER_LENGTH_OFFSET`-byte little-endian offset, measured from the
//!   start of the aggregate, and its bytes follow the fixed portion in order.
//!
//! Decoding reverses this: the offset table yields the scope of every
//! variable-size part, and each part is decoded from exactly its slice.

use std::io::Write;
use std::iter;

use crate::container::SszValue;
use crate::contract::SszType;
use crate::error::{MalformedEncoding, SszError, SszResult};
use crate::stream::{write_bytes, CountingWriter};

/// Width of an offset in the fixed portion of an aggregate.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;

/// Write `offset` as a little-endian `u32`.
pub fn write_offset<W: Write>(stream: &mut W, offset: usize) -> SszResult<usize> {
    let offset = u32::try_from(offset).map_err(|_| {
        SszError::InvalidOperation(format!("offset {} does not fit in 4 bytes", offset))
    })?;
    write_bytes(stream, &offset.to_le_bytes())
}

/// Read a little-endian `u32` offset from the start of `bytes`.
pub fn read_offset(bytes: &[u8]) -> SszResult<usize> {
    let raw: [u8; BYTES_PER_LENGTH_OFFSET] = bytes
        .get(..BYTES_PER_LENGTH_OFFSET)
        .and_then(|b| b.try_into().ok())
        .ok_or(MalformedEncoding::InsufficientBytes {
            needed: BYTES_PER_LENGTH_OFFSET,
            available: bytes.len(),
        })?;
    Ok(u32::from_le_bytes(raw) as usize)
}

/// Check an offset against its neighbours and the scope.
///
/// - `previous_offset`: the offset read before this one, if any.
/// - `num_bytes`: the scope of the whole aggregate.
/// - `num_fixed_bytes`: the length of the fixed portion, when known.
pub fn sanitize_offset(
    offset: usize,
    previous_offset: Option<usize>,
    num_bytes: usize,
    num_fixed_bytes: Option<usize>,
) -> SszResult<usize> {
    let rejection = match (previous_offset, num_fixed_bytes) {
        (_, Some(fixed)) if offset < fixed => Some(MalformedEncoding::OffsetIntoFixedPortion(offset)),
        (None, Some(fixed)) if offset > fixed => {
            Some(MalformedEncoding::OffsetSkipsVariableBytes(offset))
        }
        _ if offset > num_bytes => Some(MalformedEncoding::OffsetOutOfBounds(offset)),
        (Some(previous), _) if offset < previous => {
            Some(MalformedEncoding::OffsetsAreDecreasing(offset))
        }
        _ => None,
    };

    match rejection {
        None => Ok(offset),
        Some(err) => {
            tracing::debug!(offset, ?previous_offset, num_bytes, %err, "rejecting offset");
            Err(err.into())
        }
    }
}

/// Serialize heterogeneous parts (the fields of a container) in order.
pub fn serialize_parts<W: Write>(parts: &[&dyn SszValue], stream: &mut W) -> SszResult<usize> {
    let mut fixed_len = 0;
    for part in parts {
        fixed_len += if part.value_is_fixed_size() {
            part.value_encoded_len()?
        } else {
            BYTES_PER_LENGTH_OFFSET
        };
    }

    let mut stream = CountingWriter::new(stream);
    let mut offset = fixed_len;

    for part in parts {
        if part.value_is_fixed_size() {
            part.serialize_value(&mut stream)?;
        } else {
            write_offset(&mut stream, offset)?;
            offset += part.value_encoded_len()?;
        }
    }

    for part in parts.iter().filter(|part| !part.value_is_fixed_size()) {
        part.serialize_value(&mut stream)?;
    }

    Ok(stream.position())
}

/// Length of the encoding of a homogeneous sequence.
pub fn sequence_encoded_len<T: SszType>(items: &[T]) -> SszResult<usize> {
    if T::is_fixed_size() {
        Ok(T::get_byte_length()? * items.len())
    } else {
        let mut len = BYTES_PER_LENGTH_OFFSET * items.len();
        for item in items {
            len += item.encoded_len()?;
        }
        Ok(len)
    }
}

/// Serialize a homogeneous sequence (the elements of a vector or list).
pub fn serialize_sequence<T: SszType, W: Write>(items: &[T], stream: &mut W) -> SszResult<usize> {
    let mut written = 0;

    if T::is_fixed_size() {
        for item in items {
            written += item.serialize(stream)?;
        }
        return Ok(written);
    }

    let mut offset = BYTES_PER_LENGTH_OFFSET * items.len();
    for item in items {
        written += write_offset(stream, offset)?;
        offset += item.encoded_len()?;
    }
    for item in items {
        written += item.serialize(stream)?;
    }
    Ok(written)
}

/// Decode a homogeneous sequence that occupies the whole of `bytes`.
///
/// Fixed-size elements must tile `bytes` exactly. For variable-size elements
/// the first offset fixes the element count. When `limit` is given, more
/// elements than `limit` is an error.
pub fn deserialize_sequence<T: SszType>(bytes: &[u8], limit: Option<usize>) -> SszResult<Vec<T>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    if T::is_fixed_size() {
        let element_len = T::get_byte_length()?;
        if element_len == 0 {
            return Err(MalformedEncoding::ZeroLengthItem.into());
        }
        if bytes.len() % element_len != 0 {
            return Err(MalformedEncoding::InvalidSequenceLength {
                len: bytes.len(),
                element_len,
            }
            .into());
        }
        check_limit(bytes.len() / element_len, limit)?;
        return bytes.chunks(element_len).map(T::decode_bytes).collect();
    }

    let first = read_offset(bytes)?;
    if first == 0 || first % BYTES_PER_LENGTH_OFFSET != 0 {
        return Err(MalformedEncoding::InvalidSequenceLength {
            len: first,
            element_len: BYTES_PER_LENGTH_OFFSET,
        }
        .into());
    }
    let first = sanitize_offset(first, None, bytes.len(), None)?;
    let count = first / BYTES_PER_LENGTH_OFFSET;
    check_limit(count, limit)?;

    let mut offsets = Vec::with_capacity(count);
    offsets.push(first);
    for i in 1..count {
        let offset = read_offset(&bytes[i * BYTES_PER_LENGTH_OFFSET..])?;
        offsets.push(sanitize_offset(offset, offsets.last().copied(), bytes.len(), None)?);
    }

    let mut items = Vec::with_capacity(count);
    for (i, &start) in offsets.iter().enumerate() {
        let end = offsets.get(i + 1).copied().unwrap_or(bytes.len());
        items.push(T::decode_bytes(&bytes[start..end])?);
    }
    Ok(items)
}

fn check_limit(len: usize, limit: Option<usize>) -> SszResult<()> {
    match limit {
        Some(limit) if len > limit => {
            Err(MalformedEncoding::LengthExceedsLimit { len, limit }.into())
        }
        _ => Ok(()),
    }
}

#[derive(Copy, Clone, Debug)]
struct Offset {
    position: usize,
    offset: usize,
}

/// Splits the encoding of an aggregate into the slices of its parts.
///
/// Register the type of every part in order, then [`build`](Self::build) a
/// [`SszDecoder`] and decode the parts one by one.
pub struct SszDecoderBuilder<'a> {
    bytes: &'a [u8],
    items: Vec<&'a [u8]>,
    offsets: Vec<Offset>,
    items_index: usize,
}

impl<'a> SszDecoderBuilder<'a> {
    /// Start splitting `bytes`, the full scope of one aggregate.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            items: Vec::new(),
            offsets: Vec::new(),
            items_index: 0,
        }
    }

    /// Declare that the next part is a `T`.
    pub fn register_type<T: SszType>(&mut self) -> SszResult<()> {
        if T::is_fixed_size() {
            let start = self.items_index;
            self.items_index += T::get_byte_length()?;

            let slice = self.bytes.get(start..self.items_index).ok_or(
                MalformedEncoding::InsufficientBytes {
                    needed: self.items_index,
                    available: self.bytes.len(),
                },
            )?;
            self.items.push(slice);
        } else {
            let rest = self.bytes.get(self.items_index..).unwrap_or_default();
            let offset = sanitize_offset(
                read_offset(rest)?,
                self.offsets.last().map(|o| o.offset),
                self.bytes.len(),
                None,
            )?;
            self.offsets.push(Offset {
                position: self.items.len(),
                offset,
            });

            // Replaced once every offset is known.
            self.items.push(&[]);
            self.items_index += BYTES_PER_LENGTH_OFFSET;
        }
        Ok(())
    }

    /// Check that the variable portion starts right after the fixed portion,
    /// then cut each variable part's slice from its offset to the next.
    fn finalize(&mut self) -> SszResult<()> {
        let fixed_len = self.items_index;
        let scope = self.bytes.len();

        match self.offsets.first() {
            // Fixed-size aggregates must fill the scope exactly.
            None if fixed_len != scope => {
                return Err(MalformedEncoding::TrailingBytes {
                    consumed: fixed_len,
                    scope,
                }
                .into())
            }
            None => return Ok(()),
            Some(first) if first.offset < fixed_len => {
                return Err(MalformedEncoding::OffsetIntoFixedPortion(first.offset).into())
            }
            Some(first) if first.offset > fixed_len => {
                return Err(MalformedEncoding::OffsetSkipsVariableBytes(first.offset).into())
            }
            Some(_) => {}
        }

        let bytes = self.bytes;
        let ends = self
            .offsets
            .iter()
            .skip(1)
            .map(|next| next.offset)
            .chain(iter::once(scope));
        for (part, end) in self.offsets.iter().zip(ends) {
            self.items[part.position] = &bytes[part.offset..end];
        }
        Ok(())
    }

    /// Validate the offset table and produce a decoder over the parts.
    pub fn build(mut self) -> SszResult<SszDecoder<'a>> {
        self.finalize()?;
        Ok(SszDecoder {
            items: self.items,
            next: 0,
        })
    }
}

/// Decodes the parts split out by a [`SszDecoderBuilder`], in order.
pub struct SszDecoder<'a> {
    items: Vec<&'a [u8]>,
    next: usize,
}

impl<'a> SszDecoder<'a> {
    /// Decode the next part as a `T`, consuming its slice exactly.
    pub fn decode_next<T: SszType>(&mut self) -> SszResult<T> {
        let slice = self.items.get(self.next).copied().ok_or_else(|| {
            SszError::InvalidOperation(format!(
                "decoded more than the {} registered parts",
                self.items.len()
            ))
        })?;
        self.next += 1;
        T::decode_bytes(slice)
    }

    /// Parts not yet decoded.
    pub fn remaining(&self) -> usize {
        self.items.len() - self.next
    }
}
