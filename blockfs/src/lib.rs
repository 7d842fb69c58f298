//! An in-memory model of a block-based filesystem.
//!
//! Three structures carry the whole model: a pool of fixed-size blocks
//! behind the [`io::BlockStorage`] trait, a free-space [`Bitmap`] that
//! always hands out the lowest free block, and a table of [`Inode`]s with
//! twelve direct block pointers each. Regular files, directories, hard
//! links and symbolic links are all built from those pieces; directories
//! encode their entries as a flat `name:id` line.
//!
//! Nothing is persisted and nothing is concurrent. A single [`FileSystem`]
//! value owns the pool, the bitmap and the inode table, and every mutation
//! goes through `&mut self`. The interesting behavior lives in the write
//! path, which replaces an inode's content in full on every change, and in
//! the allocation policy that makes block reuse deterministic.
//!
//! ```
//! use blockfs::io::RamDiskBuilder;
//! use blockfs::{FileSystem, ROOT_ID};
//!
//! # fn main() -> Result<(), blockfs::FsError> {
//! let mut fs = FileSystem::create(RamDiskBuilder::new().build())?;
//! let id = fs.create_file(ROOT_ID, "a.txt", b"hello world")?;
//! fs.hard_link(ROOT_ID, "backup", id)?;
//! assert_eq!(fs.read_data(id)?, b"hello world".to_vec());
//! assert_eq!(fs.inode(id).unwrap().ref_count, 2);
//! # Ok(())
//! # }
//! ```

mod alloc;
mod dir;
mod fs;
mod node;

pub mod io;

pub use crate::alloc::{Bitmap, State};
pub use crate::dir::{DirEntry, EntryError};
pub use crate::fs::{FileSystem, FsError};
pub use crate::node::{Inode, InodeId, InodeKind, DIRECT_POINTERS, ROOT_ID};
