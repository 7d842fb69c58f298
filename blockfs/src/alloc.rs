use crate::io::BlockNumber;

/// Allocation state of a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Free,
    Used,
}

/// Free-space map of the block pool, one bit per block.
///
/// Allocation always hands out the lowest-indexed free block, so blocks
/// freed earlier are reused before untouched ones further right. The bitmap
/// only does bookkeeping; it never touches block contents.
pub struct Bitmap {
    words: Vec<u64>,
    block_count: usize,
}

impl Bitmap {
    /// Creates a map for `block_count` blocks with every block free.
    pub fn new(block_count: usize) -> Self {
        Bitmap {
            words: vec![0; (block_count + 63) / 64],
            block_count,
        }
    }

    /// Marks the lowest-indexed free block as used and returns its index,
    /// or `None` once every block is taken. Nothing changes on failure.
    pub fn allocate(&mut self) -> Option<BlockNumber> {
        let (pos, word) = self
            .words
            .iter_mut()
            .enumerate()
            .find(|(_, word)| **word != u64::MAX)?;
        let bit = word.trailing_ones() as usize;
        let blocknr = pos * 64 + bit;
        // The last word covers more bits than the pool has blocks.
        if blocknr >= self.block_count {
            return None;
        }
        *word |= 1 << bit;
        Some(blocknr)
    }

    /// Marks `blocknr` as free again. The caller must guarantee no inode
    /// still points at the block; freeing a block that is not in use is a
    /// bookkeeping bug and panics.
    pub fn free(&mut self, blocknr: BlockNumber) {
        assert!(blocknr < self.block_count);
        let mask = 1u64 << (blocknr % 64);
        assert!(
            self.words[blocknr / 64] & mask != 0,
            "freeing unused block {}",
            blocknr
        );
        self.words[blocknr / 64] &= !mask;
    }

    pub fn get(&self, blocknr: BlockNumber) -> State {
        assert!(blocknr < self.block_count);
        if (self.words[blocknr / 64] >> (blocknr % 64)) & 1 == 1 {
            State::Used
        } else {
            State::Free
        }
    }

    /// State of every block, lowest index first.
    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        (0..self.block_count).map(move |blocknr| self.get(blocknr))
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    pub fn used_count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn free_count(&self) -> usize {
        self.block_count - self.used_count()
    }
}
