use std::io::{Error, ErrorKind};

use crate::io::{BlockNumber, BlockStorage};

const DEFAULT_BLOCK_COUNT: usize = 100;
const DEFAULT_BLOCK_SIZE: usize = 4;

/// Emulates block storage in memory.
///
/// Each slot keeps the exact bytes last written to it, at most one block's
/// worth, so content reads back byte for byte without any padding. The pool
/// never clears a slot on its own: a block the allocator has freed still
/// holds its stale bytes until someone overwrites it, the way real media
/// behaves.
///
/// Built through [`RamDiskBuilder`]. The defaults are deliberately tiny
/// (100 blocks of 4 bytes) so block churn stays visible when poking at the
/// model interactively.
pub struct RamDisk {
    blocks: Vec<Option<Vec<u8>>>,
    block_size: usize,
}

impl BlockStorage for RamDisk {
    fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn read_block(&self, blocknr: BlockNumber) -> std::io::Result<Vec<u8>> {
        match self.blocks.get(blocknr) {
            Some(slot) => Ok(slot.clone().unwrap_or_default()),
            None => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("block {} out of range", blocknr),
            )),
        }
    }

    fn write_block(&mut self, blocknr: BlockNumber, buf: &[u8]) -> std::io::Result<()> {
        if buf.len() > self.block_size {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("buffer of {} bytes exceeds the block size", buf.len()),
            ));
        }
        match self.blocks.get_mut(blocknr) {
            Some(slot) => {
                *slot = Some(buf.to_vec());
                Ok(())
            }
            None => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("block {} out of range", blocknr),
            )),
        }
    }
}

/// Builder for [`RamDisk`] pools.
pub struct RamDiskBuilder {
    block_count: usize,
    block_size: usize,
}

impl RamDiskBuilder {
    pub fn new() -> Self {
        RamDiskBuilder {
            block_count: DEFAULT_BLOCK_COUNT,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    pub fn with_block_count(mut self, count: usize) -> Self {
        self.block_count = count;
        self
    }

    pub fn with_block_size(mut self, bytes: usize) -> Self {
        self.block_size = bytes;
        self
    }

    pub fn build(self) -> RamDisk {
        debug_assert!(self.block_count > 0);
        debug_assert!(self.block_size > 0);
        RamDisk {
            blocks: vec![None; self.block_count],
            block_size: self.block_size,
        }
    }
}

impl Default for RamDiskBuilder {
    fn default() -> Self {
        RamDiskBuilder::new()
    }
}
