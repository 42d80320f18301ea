use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use log::debug;

use super::buffers::{AppendBuffer, BufferPosition, CHUNK_MAX};
use super::tree::piece::Piece;
use super::PieceTree;
use crate::error::BufferError;

impl PieceTree {
    /// Create a piece tree holding the reader's contents.
    pub fn from_reader<R: Read>(reader: R) -> Result<PieceTree, BufferError> {
        let mut pt = PieceTree::new();
        pt.read_from(reader)?;
        Ok(pt)
    }

    /// Create a piece tree holding the file's contents.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<PieceTree, BufferError> {
        let mut pt = PieceTree::new();
        pt.load_file(path)?;
        Ok(pt)
    }

    /// Read the file into the tree at the document end, one buffer and one
    /// piece per chunk.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), BufferError> {
        let file = File::open(path).map_err(BufferError::UnableToOpenFile)?;
        self.read_from(file)
    }

    /// Append the reader's contents to the document. Each up-to-threshold
    /// chunk gets a buffer of its own; the final chunk may be shorter.
    pub fn read_from<R: Read>(&mut self, mut reader: R) -> Result<(), BufferError> {
        let mut chunks = 0usize;

        loop {
            let mut chunk = vec![0u8; CHUNK_MAX as usize];
            let mut filled = 0;
            while filled < chunk.len() {
                match reader.read(&mut chunk[filled..]) {
                    Ok(0) => break,
                    Ok(n) => filled += n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(BufferError::FailedFileRead(e)),
                }
            }
            if filled == 0 {
                break;
            }
            chunk.truncate(filled);

            let buf = AppendBuffer::from_chunk(chunk);
            let start = BufferPosition::default();
            let end = buf.end_position();
            let len = buf.len();

            let bufidx = self.add_buffer(buf);
            let line_count = self.line_feed_count(bufidx, start, end);
            let piece = Piece::new(bufidx, start, end, len, line_count);

            let last = self.tree.last();
            self.tree.insert_right(last, piece);
            chunks += 1;

            if filled < CHUNK_MAX as usize {
                break;
            }
        }

        self.update_totals();
        debug!("read {} chunks, document is now {} bytes", chunks, self.len());
        Ok(())
    }

    /// Write the document to the writer, piece by piece in order.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<u64, BufferError> {
        let mut written = 0;
        let mut x = self.tree.first();
        while !x.is_sentinel() {
            let piece = self.tree[x].piece;
            let bytes = self.piece_slice(&piece);
            writer.write_all(bytes).map_err(BufferError::FailedFileWrite)?;
            written += bytes.len() as u64;
            x = self.tree.next(x);
        }

        writer.flush().map_err(BufferError::FailedFileWrite)?;
        Ok(written)
    }

    /// Write the document to a file, truncating anything there.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BufferError> {
        let file = File::create(&path).map_err(BufferError::UnableToCreateFile)?;
        let written = self.write_to(file)?;
        debug!(
            "saved {} bytes to {}",
            written,
            path.as_ref().to_string_lossy()
        );
        Ok(())
    }
}
