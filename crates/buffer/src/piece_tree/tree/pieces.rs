use super::node::{NodeId, SENTINEL};
use super::piece::Piece;
use crate::piece_tree::PieceTree;

/// In-order walk over `(document offset, piece)` pairs.
///
/// Past the last piece the cursor parks on the sentinel; `prev` steps back
/// onto the last piece from there.
#[derive(Debug, Clone)]
pub(crate) struct Pieces<'a> {
    pt: &'a PieceTree,
    node: NodeId,
    pos: u64,
}

impl<'a> Pieces<'a> {
    pub fn new(pt: &'a PieceTree, at: u64) -> Pieces<'a> {
        if at >= pt.len() || pt.tree.is_empty() {
            return Pieces {
                pt,
                node: SENTINEL,
                pos: pt.len(),
            };
        }

        let np = pt.node_at_offset(at);
        // a boundary offset resolves to the preceding piece's right edge;
        // iteration wants the piece owning the byte at `at`
        if np.offset == pt.tree[np.node].piece.len {
            let next = pt.tree.next(np.node);
            Pieces {
                pt,
                node: next,
                pos: np.node_start + pt.tree[np.node].piece.len,
            }
        } else {
            Pieces {
                pt,
                node: np.node,
                pos: np.node_start,
            }
        }
    }

    #[inline]
    pub fn get(&self) -> Option<(u64, Piece)> {
        if self.node.is_sentinel() {
            return None;
        }
        Some((self.pos, self.pt.tree[self.node].piece))
    }

    pub fn next(&mut self) -> Option<(u64, Piece)> {
        if self.node.is_sentinel() {
            return None;
        }

        let len = self.pt.tree[self.node].piece.len;
        let next = self.pt.tree.next(self.node);
        if next.is_sentinel() {
            self.node = SENTINEL;
            self.pos = self.pt.len();
            return None;
        }

        self.pos += len;
        self.node = next;
        self.get()
    }

    pub fn prev(&mut self) -> Option<(u64, Piece)> {
        if self.node.is_sentinel() {
            let last = self.pt.tree.last();
            if last.is_sentinel() {
                return None;
            }
            self.node = last;
            self.pos = self.pt.len() - self.pt.tree[last].piece.len;
            return self.get();
        }

        let prev = self.pt.tree.prev(self.node);
        if prev.is_sentinel() {
            return None;
        }

        self.node = prev;
        self.pos -= self.pt.tree[prev].piece.len;
        self.get()
    }
}
