use crate::error::BufferError;

/// Once a buffer grows to this size, new data goes to a fresh buffer. File
/// loading reads chunks of this size, one buffer per chunk.
pub const CHUNK_MAX: u64 = 64 * 1024;

/// A position inside one append buffer: an index into its line start table
/// plus a byte column from that line start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct BufferPosition {
    pub(crate) line: u64,
    pub(crate) column: u64,
}

/// Grow only byte buffer with a parallel index of line start offsets.
///
/// The index always begins with 0 and gains one entry for every line
/// terminator seen during an append. Bytes are never mutated or removed, so
/// pieces referencing a region stay valid across later appends.
#[derive(Debug)]
pub(crate) struct AppendBuffer {
    content: Vec<u8>,
    line_starts: Vec<u64>,
}

impl AppendBuffer {
    pub fn new() -> AppendBuffer {
        AppendBuffer {
            content: Vec::new(),
            line_starts: vec![0],
        }
    }

    /// Take ownership of a loaded chunk and index its line starts.
    pub fn from_chunk(content: Vec<u8>) -> AppendBuffer {
        let mut buf = AppendBuffer {
            content,
            line_starts: vec![0],
        };
        buf.scan_line_starts(0);
        buf
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.content.len() as u64
    }

    #[inline]
    pub fn slice(&self, start: u64, end: u64) -> &[u8] {
        &self.content[start as usize..end as usize]
    }

    #[inline]
    pub fn byte(&self, offset: u64) -> u8 {
        self.content[offset as usize]
    }

    #[inline]
    pub fn line_start(&self, line: u64) -> u64 {
        self.line_starts[line as usize]
    }

    #[inline]
    pub fn line_start_count(&self) -> u64 {
        self.line_starts.len() as u64
    }

    /// Append bytes, recording a line start after every terminator in the
    /// appended region.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.content
            .try_reserve(bytes.len())
            .map_err(|_| BufferError::OutOfMemory)?;
        let from = self.content.len();
        self.content.extend_from_slice(bytes);
        self.scan_line_starts(from);
        Ok(())
    }

    #[inline]
    pub fn position_to_offset(&self, pos: BufferPosition) -> u64 {
        self.line_starts[pos.line as usize] + pos.column
    }

    /// Inverse of [`Self::position_to_offset`], searching only line start
    /// indices in `[lo, hi]`. Used to restrict the search to one piece's span.
    pub fn offset_to_position(&self, offset: u64, lo: u64, hi: u64) -> BufferPosition {
        debug_assert!(self.line_starts[lo as usize] <= offset);
        let mut low = lo as usize;
        let mut high = hi as usize;
        let mut mid = low;

        while low <= high {
            mid = (low + high) / 2;
            if mid == high {
                break;
            }
            if offset < self.line_starts[mid] {
                high = mid - 1;
            } else if offset >= self.line_starts[mid + 1] {
                low = mid + 1;
            } else {
                break;
            }
        }

        BufferPosition {
            line: mid as u64,
            column: offset - self.line_starts[mid],
        }
    }

    /// Move a position by a signed byte delta, saturating to the buffer.
    pub fn move_position_by_offset(&self, pos: BufferPosition, delta: i64) -> BufferPosition {
        let offset = (self.position_to_offset(pos) as i64 + delta).clamp(0, self.len() as i64);
        self.offset_to_position(offset as u64, 0, self.line_start_count() - 1)
    }

    /// Position of the current end of content.
    pub fn end_position(&self) -> BufferPosition {
        let line = self.line_starts.len() - 1;
        BufferPosition {
            line: line as u64,
            column: self.len() - self.line_starts[line],
        }
    }

    fn scan_line_starts(&mut self, from: usize) {
        let mut i = from;
        while i < self.content.len() {
            match self.content[i] {
                b'\r' => {
                    if self.content.get(i + 1) == Some(&b'\n') {
                        self.line_starts.push(i as u64 + 2);
                        i += 2;
                    } else {
                        self.line_starts.push(i as u64 + 1);
                        i += 1;
                    }
                }
                b'\n' => {
                    self.line_starts.push(i as u64 + 1);
                    i += 1;
                }
                _ => i += 1,
            }
        }
    }
}
