mod block;
mod ramdisk;

pub use self::block::BlockStorage;
pub use self::ramdisk::{RamDisk, RamDiskBuilder};

/// Index of a block in the pool, ranging from 0 (the first block) to
/// n - 1 (the last block) where n is the number of blocks available.
pub type BlockNumber = usize;
