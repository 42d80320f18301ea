use super::tree::piece::Piece;

/// A value copy of every piece in document order.
///
/// A snapshot references the parent tree's buffers by index and is only
/// meaningful while that tree is alive. Restoring replays the pieces into a
/// fresh tree; the buffers themselves are untouched. This is the undo
/// primitive: take a snapshot before an edit, restore it to roll back.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub(crate) pieces: Vec<Piece>,
    pub(crate) len: u64,
    pub(crate) line_count: u64,
}

impl Snapshot {
    /// Document byte length at the time the snapshot was taken.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Document line count at the time the snapshot was taken.
    #[inline]
    pub fn line_count(&self) -> u64 {
        self.line_count
    }
}
