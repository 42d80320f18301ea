mod error;
mod piece_tree;

pub use error::BufferError;
pub use piece_tree::{
    bytes::Bytes, snapshot::Snapshot, NodePosition, PieceTree, CHUNK_MAX,
};

pub mod utf8 {
    pub use crate::piece_tree::utf8::{
        char_length_at, decode_at, decode_utf8, next_character, prev_character,
        width::{byte_column, render_column, DisplayOptions},
    };
}
