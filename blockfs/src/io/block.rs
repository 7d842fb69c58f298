use crate::io::BlockNumber;

/// Interface to a pool of uniformly sized storage blocks.
///
/// The filesystem is written against this trait rather than a concrete
/// device, so the same code can drive the in-memory pool used by the model
/// or anything else that can read and write numbered blocks. Implementations
/// only move raw bytes; which blocks are free and what the bytes mean is
/// decided by the layers above.
pub trait BlockStorage {
    /// Total number of blocks in the pool.
    fn block_count(&self) -> usize;

    /// Capacity of a single block in bytes.
    fn block_size(&self) -> usize;

    /// Reads the stored contents of `blocknr`.
    ///
    /// Returns exactly the bytes last written to the block, which may be
    /// fewer than [`block_size`](BlockStorage::block_size). A block that was
    /// never written reads back empty.
    ///
    /// # Errors
    ///
    /// Fails when `blocknr` is out of range.
    fn read_block(&self, blocknr: BlockNumber) -> std::io::Result<Vec<u8>>;

    /// Overwrites `blocknr` with `buf`.
    ///
    /// # Errors
    ///
    /// Fails when `blocknr` is out of range or `buf` is larger than one
    /// block.
    fn write_block(&mut self, blocknr: BlockNumber, buf: &[u8]) -> std::io::Result<()>;
}
