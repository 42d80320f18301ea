pub(crate) mod buffers;
pub mod bytes;
pub mod snapshot;
pub(crate) mod tree;
pub mod utf8;
mod write;

use std::ops::{Bound, RangeBounds};

use log::trace;

pub use self::buffers::CHUNK_MAX;

use self::buffers::{AppendBuffer, BufferPosition};
use self::bytes::Bytes;
use self::snapshot::Snapshot;
use self::tree::node::{NodeId, SENTINEL};
use self::tree::piece::Piece;
use self::tree::Tree;
use crate::error::BufferError;

/// A cursor into the tree at byte granularity: the node whose piece covers
/// the offset, the document offset of that piece's first byte, and the byte
/// offset inside the piece.
///
/// Offsets that fall exactly on a piece boundary resolve to the *preceding*
/// piece's right edge, so the piece owning a trailing newline also owns the
/// boundary position after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodePosition {
    pub(crate) node: NodeId,
    pub(crate) node_start: u64,
    pub(crate) offset: u64,
}

impl NodePosition {
    pub(crate) fn sentinel() -> NodePosition {
        NodePosition {
            node: SENTINEL,
            node_start: 0,
            offset: 0,
        }
    }

    /// Byte offset in the document.
    #[inline]
    pub fn document_offset(&self) -> u64 {
        self.node_start + self.offset
    }
}

/// The document is represented as pieces referencing immutable spans of
/// append only buffers, ordered by a red-black tree. Buffer 0 is the change
/// buffer: inserted bytes are appended there and referenced by new pieces.
/// Once the change buffer reaches [`CHUNK_MAX`] a fresh one takes its place;
/// loaded files get one buffer per chunk. Buffers only grow, so pieces stay
/// valid across every later edit.
#[derive(Debug)]
pub struct PieceTree {
    pub(crate) tree: Tree,
    buffers: Vec<AppendBuffer>,
    change: usize,
    len: u64,
    line_count: u64,
}

impl PieceTree {
    /// Create a new empty piece tree.
    pub fn new() -> PieceTree {
        PieceTree {
            tree: Tree::new(),
            buffers: vec![AppendBuffer::new()],
            change: 0,
            len: 0,
            line_count: 1,
        }
    }

    /// Document length in bytes.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Document line count, one more than the number of line terminators.
    #[inline]
    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.tree.count()
    }

    #[inline]
    pub fn bytes(&self) -> Bytes<'_> {
        self.bytes_at(0)
    }

    #[inline]
    pub fn bytes_at(&self, pos: u64) -> Bytes<'_> {
        Bytes::new(self, pos)
    }

    /// Insert bytes at a byte offset. Inserting nothing is a no-op.
    pub fn insert<B: AsRef<[u8]>>(&mut self, offset: u64, bytes: B) -> Result<(), BufferError> {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return Ok(());
        }
        if offset > self.len {
            return Err(BufferError::OutOfBounds);
        }

        if self.tree.is_empty() {
            let pieces = self.create_pieces(bytes)?;
            let mut at = SENTINEL;
            for piece in pieces {
                at = self.tree.insert_right(at, piece);
            }
            self.update_totals();
            return Ok(());
        }

        let np = self.node_at_offset(offset);
        if np.node.is_sentinel() {
            return Err(BufferError::FailedInsertion);
        }

        let piece = self.tree[np.node].piece;

        if np.offset == piece.len {
            // at the right edge: extend the piece in place when it still owns
            // the change buffer tail, otherwise chain new pieces after it
            if self.can_extend(&piece, bytes.len() as u64) {
                self.extend_piece(np.node, bytes)?;
                self.update_totals();
                return Ok(());
            }

            let pieces = self.create_pieces(bytes)?;
            let mut at = np.node;
            for piece in pieces {
                at = self.tree.insert_right(at, piece);
            }
        } else if np.offset == 0 {
            let pieces = self.create_pieces(bytes)?;
            let mut iter = pieces.into_iter();
            if let Some(first) = iter.next() {
                let mut at = self.tree.insert_left(np.node, first);
                for piece in iter {
                    at = self.tree.insert_right(at, piece);
                }
            }
        } else {
            // split the piece and put the new bytes between the halves
            let split = self.position_in_buffer(np.node, np.offset);
            let pieces = self.create_pieces(bytes)?;
            let right = self.split_piece(np.node, split);
            self.tree.insert_right(np.node, right);

            let mut at = np.node;
            for piece in pieces {
                at = self.tree.insert_right(at, piece);
            }
        }

        self.update_totals();
        Ok(())
    }

    /// Insert at a `(row, column)` position, clamped like [`Self::offset_at`].
    #[inline]
    pub fn insert_at<B: AsRef<[u8]>>(
        &mut self,
        row: u64,
        column: u64,
        bytes: B,
    ) -> Result<(), BufferError> {
        self.insert(self.offset_at(row, column), bytes)
    }

    #[inline]
    pub fn insert_char(&mut self, offset: u64, ch: char) -> Result<(), BufferError> {
        let mut buf = [0; 4];
        let string = ch.encode_utf8(&mut buf);
        self.insert(offset, string)
    }

    #[inline]
    pub fn append<B: AsRef<[u8]>>(&mut self, bytes: B) -> Result<(), BufferError> {
        self.insert(self.len, bytes)
    }

    /// Remove a byte range from the document.
    pub fn remove<R: RangeBounds<u64>>(&mut self, range: R) -> Result<(), BufferError> {
        let start = match range.start_bound() {
            Bound::Included(n) => *n,
            Bound::Excluded(n) => *n + 1,
            Bound::Unbounded => 0,
        };

        let end = match range.end_bound() {
            Bound::Included(n) => *n + 1,
            Bound::Excluded(n) => *n,
            Bound::Unbounded => self.len,
        };

        if start > end || end > self.len {
            return Err(BufferError::OutOfBounds);
        }
        if start == end {
            return Ok(());
        }

        let start_np = self.node_at_offset(start);
        let end_np = self.node_at_offset(end);
        self.erase(start_np, end_np)?;
        self.update_totals();
        Ok(())
    }

    /// Remove the bytes between two node positions.
    pub(crate) fn erase(&mut self, start: NodePosition, end: NodePosition) -> Result<(), BufferError> {
        if start.node.is_sentinel() || end.node.is_sentinel() {
            return Err(BufferError::FailedErasure);
        }

        // a right edge start is the same position as the next piece's left
        // edge, which is the form the shrinking below wants
        let (start_node, start_offset) = if start.offset == self.tree[start.node].piece.len {
            let next = self.tree.next(start.node);
            if next.is_sentinel() {
                return Ok(());
            }
            (next, 0)
        } else {
            (start.node, start.offset)
        };

        if start_node == end.node {
            let node = start_node;
            let piece_len = self.tree[node].piece.len;

            if start_offset == 0 && end.offset == piece_len {
                self.tree.remove(node);
                return Ok(());
            }
            if start_offset == 0 {
                let pos = self.position_in_buffer(node, end.offset);
                self.delete_node_head(node, pos);
                return Ok(());
            }
            if end.offset == piece_len {
                let pos = self.position_in_buffer(node, start_offset);
                self.delete_node_tail(node, pos);
                return Ok(());
            }

            let s = self.position_in_buffer(node, start_offset);
            let e = self.position_in_buffer(node, end.offset);
            self.shrink_node(node, s, e);
            return Ok(());
        }

        let mut to_delete = Vec::new();

        let s = self.position_in_buffer(start_node, start_offset);
        self.delete_node_tail(start_node, s);
        if self.tree[start_node].piece.len == 0 {
            to_delete.push(start_node);
        }

        let e = self.position_in_buffer(end.node, end.offset);
        self.delete_node_head(end.node, e);
        if self.tree[end.node].piece.len == 0 {
            to_delete.push(end.node);
        }

        let mut node = self.tree.next(start_node);
        while !node.is_sentinel() && node != end.node {
            to_delete.push(node);
            node = self.tree.next(node);
        }

        for node in to_delete {
            self.tree.remove(node);
        }
        Ok(())
    }

    /// Locate the piece covering a byte offset. Offsets past the end clamp
    /// to the end; boundary offsets resolve to the preceding piece.
    pub fn node_at_offset(&self, offset: u64) -> NodePosition {
        let mut offset = offset.min(self.len);
        let mut node_start = 0;
        let mut x = self.tree.root;

        if x.is_sentinel() {
            return NodePosition::sentinel();
        }

        loop {
            let n = &self.tree[x];
            if !n.left.is_sentinel() && offset <= n.left_bytes {
                x = n.left;
            } else if offset <= n.left_bytes + n.piece.len {
                node_start += n.left_bytes;
                return NodePosition {
                    node: x,
                    node_start,
                    offset: offset - n.left_bytes,
                };
            } else {
                offset -= n.left_bytes + n.piece.len;
                node_start += n.left_bytes + n.piece.len;
                x = n.right;
            }
        }
    }

    /// Locate the piece covering `(row, column)`. Rows past the last line and
    /// columns past a row's length clamp toward the document end; a column
    /// overflowing into later pieces walks forward but never past the end.
    pub fn node_at_position(&self, row: u64, column: u64) -> NodePosition {
        if self.tree.is_empty() {
            return NodePosition::sentinel();
        }
        if row >= self.line_count {
            return self.node_at_offset(self.len);
        }

        let mut row = row;
        let mut column = column;
        let mut node_start = 0;
        let mut x = self.tree.root;

        while !x.is_sentinel() {
            let n = &self.tree[x];

            if !n.left.is_sentinel() && n.left_lines >= row {
                x = n.left;
            } else if n.left_lines + n.piece.line_count > row {
                // the row begins and ends inside this piece
                let prev = if row == n.left_lines {
                    0
                } else {
                    self.accumulated_value(x, row - n.left_lines - 1)
                };
                let acc = self.accumulated_value(x, row - n.left_lines);
                node_start += n.left_bytes;
                return NodePosition {
                    node: x,
                    node_start,
                    offset: (prev + column).min(acc),
                };
            } else if n.left_lines + n.piece.line_count == row {
                // the row starts at the tail of this piece, the column may
                // continue into the following pieces
                let prev = if row == n.left_lines {
                    0
                } else {
                    self.accumulated_value(x, row - n.left_lines - 1)
                };
                if prev + column <= n.piece.len {
                    node_start += n.left_bytes;
                    return NodePosition {
                        node: x,
                        node_start,
                        offset: prev + column,
                    };
                }
                column -= n.piece.len - prev;
                break;
            } else {
                row -= n.left_lines + n.piece.line_count;
                node_start += n.left_bytes + n.piece.len;
                x = n.right;
            }
        }

        // place the remaining column on the following pieces
        let mut node = self.tree.next(x);
        while !node.is_sentinel() {
            let n = &self.tree[node];
            if n.piece.line_count > 0 {
                let acc = self.accumulated_value(node, 0);
                let node_start = self.tree.offset_of(node);
                return NodePosition {
                    node,
                    node_start,
                    offset: column.min(acc),
                };
            }
            if n.piece.len >= column {
                let node_start = self.tree.offset_of(node);
                return NodePosition {
                    node,
                    node_start,
                    offset: column,
                };
            }
            column -= n.piece.len;
            node = self.tree.next(node);
        }

        self.node_at_offset(self.len)
    }

    /// Byte offset of `(row, column)`. Rows past the last line resolve to the
    /// document end; columns clamp to the row.
    pub fn offset_at(&self, row: u64, column: u64) -> u64 {
        if self.tree.is_empty() {
            return 0;
        }
        if row >= self.line_count {
            return self.len;
        }

        let start = self.line_start_offset(row);
        let end = if row + 1 >= self.line_count {
            self.len
        } else {
            self.line_start_offset(row + 1)
        };
        let row_len = end - start;

        // a terminated row clamps onto its terminator, not past it
        let max_column = if row + 1 < self.line_count {
            row_len.saturating_sub(1)
        } else {
            row_len
        };

        start + column.min(max_column)
    }

    /// `(row, column)` of a byte offset. Offsets past the end clamp to the
    /// end.
    pub fn position_at(&self, offset: u64) -> (u64, u64) {
        let original = offset.min(self.len);
        let mut remaining = original;
        let mut lines = 0;
        let mut x = self.tree.root;

        while !x.is_sentinel() {
            let n = &self.tree[x];

            if n.left_bytes != 0 && n.left_bytes >= remaining {
                x = n.left;
            } else if n.left_bytes + n.piece.len >= remaining {
                let (index, column) = self.index_in_piece(x, remaining - n.left_bytes);
                let row = lines + n.left_lines + index;
                if index == 0 {
                    // the row starts in an earlier piece
                    let line_start = self.line_start_offset(row);
                    return (row, original - line_start);
                }
                return (row, column);
            } else {
                remaining -= n.left_bytes + n.piece.len;
                lines += n.left_lines + n.piece.line_count;
                x = n.right;
            }
        }

        (0, original)
    }

    /// Copy of a byte range, clamped to the document.
    pub fn substring(&self, offset: u64, len: u64) -> Vec<u8> {
        let start = offset.min(self.len);
        let end = offset.saturating_add(len).min(self.len);
        let mut out = vec![0; (end - start) as usize];
        let n = self.read_at(start, &mut out);
        out.truncate(n);
        out
    }

    /// Copy of one row including its line terminator. Rows past the end are
    /// empty.
    pub fn line_content(&self, row: u64) -> Vec<u8> {
        if row >= self.line_count {
            return Vec::new();
        }

        let start = self.offset_at(row, 0);
        let end = if row + 1 >= self.line_count {
            self.len
        } else {
            self.offset_at(row + 1, 0)
        };
        self.substring(start, end - start)
    }

    /// Bounded in-order copy starting at a byte offset, crossing piece
    /// boundaries as needed. Everything that decodes bytes near a boundary is
    /// built on this.
    pub(crate) fn read_at(&self, offset: u64, out: &mut [u8]) -> usize {
        if offset >= self.len || out.is_empty() {
            return 0;
        }

        let np = self.node_at_offset(offset);
        let mut node = np.node;
        let mut skip = np.offset;
        if skip == self.tree[node].piece.len {
            node = self.tree.next(node);
            skip = 0;
        }

        let mut written = 0;
        while !node.is_sentinel() && written < out.len() {
            let piece = self.tree[node].piece;
            let bytes = &self.piece_slice(&piece)[skip as usize..];
            let n = bytes.len().min(out.len() - written);
            out[written..written + n].copy_from_slice(&bytes[..n]);
            written += n;
            skip = 0;
            node = self.tree.next(node);
        }

        written
    }

    /// Copy every piece in order. The snapshot borrows the tree's buffers by
    /// index and is only valid while this tree lives.
    pub fn snapshot(&self) -> Snapshot {
        let mut pieces = Vec::with_capacity(self.tree.count());
        let mut x = self.tree.first();
        while !x.is_sentinel() {
            pieces.push(self.tree[x].piece);
            x = self.tree.next(x);
        }

        Snapshot {
            pieces,
            len: self.len,
            line_count: self.line_count,
        }
    }

    /// Throw away the current tree shape and replay a snapshot taken from
    /// this tree. Buffers are untouched.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), BufferError> {
        for piece in &snapshot.pieces {
            if piece.bufidx >= self.buffers.len() {
                return Err(BufferError::NullReference);
            }
        }

        self.tree.clear();
        let mut at = SENTINEL;
        for piece in &snapshot.pieces {
            at = self.tree.insert_right(at, *piece);
        }
        self.update_totals();
        Ok(())
    }

    #[inline]
    pub(crate) fn piece_slice(&self, piece: &Piece) -> &[u8] {
        let buf = &self.buffers[piece.bufidx];
        let start = buf.position_to_offset(piece.start);
        buf.slice(start, start + piece.len)
    }

    /// How many append buffers back the document, the change buffer included.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub(crate) fn add_buffer(&mut self, buf: AppendBuffer) -> usize {
        self.buffers.push(buf);
        self.buffers.len() - 1
    }

    #[cfg(test)]
    pub(crate) fn buffer(&self, bufidx: usize) -> &AppendBuffer {
        &self.buffers[bufidx]
    }

    fn update_totals(&mut self) {
        self.len = self.tree.total_bytes();
        self.line_count = self.tree.total_lines() + 1;
    }

    /// Chop bytes into pieces referencing freshly appended change buffer
    /// regions, swapping in a new change buffer whenever the current one is
    /// full.
    fn create_pieces(&mut self, bytes: &[u8]) -> Result<Vec<Piece>, BufferError> {
        let mut bytes = bytes;
        let mut pieces = Vec::new();

        while !bytes.is_empty() {
            if self.buffers[self.change].len() >= CHUNK_MAX {
                self.change = self.add_buffer(AppendBuffer::new());
                trace!("change buffer full, swapped to buffer {}", self.change);
            }

            let bufidx = self.change;
            let room = (CHUNK_MAX - self.buffers[bufidx].len()) as usize;
            let take = room.min(bytes.len());

            let start = self.buffers[bufidx].end_position();
            self.buffers[bufidx].append(&bytes[..take])?;
            let end = self.buffers[bufidx].end_position();

            let line_count = self.line_feed_count(bufidx, start, end);
            pieces.push(Piece::new(bufidx, start, end, take as u64, line_count));

            bytes = &bytes[take..];
        }

        Ok(pieces)
    }

    /// The fast path may extend a piece in place only when it owns the change
    /// buffer tail; the tail past the most recently created piece is always
    /// free, so nothing else can reference the appended region.
    fn can_extend(&self, piece: &Piece, more: u64) -> bool {
        if piece.bufidx != self.change {
            return false;
        }
        let buf = &self.buffers[self.change];
        self.offset_in_buffer(piece.bufidx, piece.end) == buf.len() && buf.len() + more <= CHUNK_MAX
    }

    fn extend_piece(&mut self, node: NodeId, bytes: &[u8]) -> Result<(), BufferError> {
        let piece = self.tree[node].piece;

        self.buffers[piece.bufidx].append(bytes)?;

        let end = self.buffers[piece.bufidx].move_position_by_offset(piece.end, bytes.len() as i64);
        let line_count = self.line_feed_count(piece.bufidx, piece.start, end);
        let delta_lines = line_count as i64 - piece.line_count as i64;

        let n = &mut self.tree[node];
        n.piece.end = end;
        n.piece.len += bytes.len() as u64;
        n.piece.line_count = line_count;

        self.tree
            .update_metadata(node, bytes.len() as i64, delta_lines);
        Ok(())
    }

    /// Shrink `node` to the bytes left of `pos` and return the right half.
    fn split_piece(&mut self, node: NodeId, pos: BufferPosition) -> Piece {
        let piece = self.tree[node].piece;
        let right_len =
            self.offset_in_buffer(piece.bufidx, piece.end) - self.offset_in_buffer(piece.bufidx, pos);
        let right_lines = self.line_feed_count(piece.bufidx, pos, piece.end);
        let right = Piece::new(piece.bufidx, pos, piece.end, right_len, right_lines);

        self.delete_node_tail(node, pos);
        right
    }

    /// Drop the piece bytes at and after `pos`.
    fn delete_node_tail(&mut self, node: NodeId, pos: BufferPosition) {
        let piece = self.tree[node].piece;
        let old_end = self.offset_in_buffer(piece.bufidx, piece.end);
        let new_end = self.offset_in_buffer(piece.bufidx, pos);
        let new_lines = self.line_feed_count(piece.bufidx, piece.start, pos);

        let delta_bytes = new_end as i64 - old_end as i64;
        let delta_lines = new_lines as i64 - piece.line_count as i64;

        let n = &mut self.tree[node];
        n.piece.end = pos;
        n.piece.line_count = new_lines;
        n.piece.len = (n.piece.len as i64 + delta_bytes) as u64;

        self.tree.update_metadata(node, delta_bytes, delta_lines);
    }

    /// Drop the piece bytes before `pos`.
    fn delete_node_head(&mut self, node: NodeId, pos: BufferPosition) {
        let piece = self.tree[node].piece;
        let old_start = self.offset_in_buffer(piece.bufidx, piece.start);
        let new_start = self.offset_in_buffer(piece.bufidx, pos);
        let new_lines = self.line_feed_count(piece.bufidx, pos, piece.end);

        let removed = new_start - old_start;
        let delta_lines = new_lines as i64 - piece.line_count as i64;

        let n = &mut self.tree[node];
        n.piece.start = pos;
        n.piece.line_count = new_lines;
        n.piece.len -= removed;

        self.tree.update_metadata(node, -(removed as i64), delta_lines);
    }

    /// Cut `[start, end)` out of the middle of the piece; the surviving right
    /// part becomes a new piece after `node`.
    fn shrink_node(&mut self, node: NodeId, start: BufferPosition, end: BufferPosition) {
        let piece = self.tree[node].piece;

        let right_len =
            self.offset_in_buffer(piece.bufidx, piece.end) - self.offset_in_buffer(piece.bufidx, end);
        let right_lines = self.line_feed_count(piece.bufidx, end, piece.end);
        let right = Piece::new(piece.bufidx, end, piece.end, right_len, right_lines);

        self.delete_node_tail(node, start);
        self.tree.insert_right(node, right);
    }

    fn offset_in_buffer(&self, bufidx: usize, pos: BufferPosition) -> u64 {
        self.buffers[bufidx].position_to_offset(pos)
    }

    /// Buffer position `remainder` bytes into the piece, searching only the
    /// piece's own line span.
    fn position_in_buffer(&self, node: NodeId, remainder: u64) -> BufferPosition {
        let piece = &self.tree[node].piece;
        let buf = &self.buffers[piece.bufidx];
        let offset = buf.position_to_offset(piece.start) + remainder;
        buf.offset_to_position(offset, piece.start.line, piece.end.line)
    }

    /// Line terminators between two positions of one buffer.
    ///
    /// When `end` falls between the CR and LF of a CR LF pair, the CR on the
    /// inside counts as a terminator of its own. An erased LF must not erase
    /// the line break its surviving CR still represents.
    pub(crate) fn line_feed_count(
        &self,
        bufidx: usize,
        start: BufferPosition,
        end: BufferPosition,
    ) -> u64 {
        if start == end {
            return 0;
        }
        if end.column == 0 {
            return end.line - start.line;
        }

        let buf = &self.buffers[bufidx];
        if end.line == buf.line_start_count() - 1 {
            // nothing after end, so no terminator to sever
            return end.line - start.line;
        }

        let next_line_start = buf.line_start(end.line + 1);
        let end_offset = buf.line_start(end.line) + end.column;
        if next_line_start > end_offset + 1 {
            return end.line - start.line;
        }

        // the byte at end is the last byte of a terminator; a CR just before
        // it means the pair was severed at end
        if buf.byte(end_offset - 1) == b'\r' {
            end.line - start.line + 1
        } else {
            end.line - start.line
        }
    }

    /// Bytes from the piece start to the start of its `index + 1`:th line,
    /// capped to the piece length.
    fn accumulated_value(&self, node: NodeId, index: u64) -> u64 {
        let piece = &self.tree[node].piece;
        let buf = &self.buffers[piece.bufidx];
        let start_offset = buf.position_to_offset(piece.start);
        let expected = piece.start.line + index + 1;

        if expected > piece.end.line {
            buf.position_to_offset(piece.end) - start_offset
        } else {
            buf.line_start(expected) - start_offset
        }
    }

    /// `(row within piece, column)` of a byte offset inside the piece.
    fn index_in_piece(&self, node: NodeId, remainder: u64) -> (u64, u64) {
        let piece = self.tree[node].piece;
        let pos = self.position_in_buffer(node, remainder);
        let index = pos.line - piece.start.line;

        if piece.len == remainder {
            // at the very end a severed CR LF adds a line the line start
            // table alone does not show
            let real = self.line_feed_count(piece.bufidx, piece.start, pos);
            if real != index {
                return (real, 0);
            }
        }

        (index, pos.column)
    }

    /// Document offset where `row` begins.
    fn line_start_offset(&self, row: u64) -> u64 {
        let mut row = row;
        let mut offset = 0;
        let mut x = self.tree.root;

        while !x.is_sentinel() {
            let n = &self.tree[x];

            if !n.left.is_sentinel() && n.left_lines >= row {
                x = n.left;
            } else if n.left_lines + n.piece.line_count >= row {
                offset += n.left_bytes;
                let acc = if row == n.left_lines {
                    0
                } else {
                    self.accumulated_value(x, row - n.left_lines - 1)
                };
                return offset + acc;
            } else {
                row -= n.left_lines + n.piece.line_count;
                offset += n.left_bytes + n.piece.len;
                x = n.right;
            }
        }

        offset
    }
}

impl Default for PieceTree {
    fn default() -> Self {
        PieceTree::new()
    }
}

impl<A: AsRef<[u8]>> From<A> for PieceTree {
    fn from(value: A) -> Self {
        let mut pt = PieceTree::new();
        pt.insert(0, value.as_ref()).expect("insert into empty tree");
        pt
    }
}

impl From<&PieceTree> for Vec<u8> {
    fn from(pt: &PieceTree) -> Self {
        pt.substring(0, pt.len())
    }
}

impl From<&PieceTree> for String {
    fn from(pt: &PieceTree) -> Self {
        String::from_utf8_lossy(&Vec::from(pt)).into_owned()
    }
}
