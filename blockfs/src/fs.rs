use log::{debug, info};
use thiserror::Error;

use crate::alloc::Bitmap;
use crate::dir::{self, DirEntry, EntryError};
use crate::io::{BlockNumber, BlockStorage};
use crate::node::{Inode, InodeId, InodeKind, InodeTable, DIRECT_POINTERS, ROOT_ID};

/// Errors surfaced by filesystem operations.
#[derive(Error, Debug)]
pub enum FsError {
    /// The block pool is exhausted. Blocks acquired earlier in the same
    /// write stay allocated; see [`FileSystem`] for the rollback contract.
    #[error("no free block available")]
    NoSpace,
    /// The caller named an inode id that does not exist.
    #[error("unknown inode id {0}")]
    UnknownId(InodeId),
    /// Entry names must be non-empty and free of the `:` and `|`
    /// separators.
    #[error("invalid entry name {0:?}")]
    InvalidName(String),
    /// Content needs more blocks than an inode has direct pointers.
    #[error("content of {size} bytes needs {required} blocks and does not fit an inode")]
    ContentTooLarge { size: usize, required: usize },
    /// Directory content failed to decode.
    #[error("corrupt directory content")]
    CorruptDirectory(#[from] EntryError),
    /// The block storage rejected an access.
    #[error("block storage access failed")]
    Storage(#[from] std::io::Error),
}

/// An in-memory block filesystem.
///
/// Three pieces make up the model: a pool of fixed-size blocks behind a
/// [`BlockStorage`], a [`Bitmap`] tracking which blocks are free, and a
/// table of [`Inode`]s holding direct block pointers. Regular files,
/// directories and symbolic links are all inodes; a directory's content is
/// the flat `name:id` entry line described in [`DirEntry`]'s module.
///
/// Writes always replace an inode's content wholesale: the blocks it held
/// are freed first, then the new content is laid out chunk by chunk over
/// the lowest free blocks. Failed operations fall in two camps. Bad input
/// (unknown id, invalid name, oversized content) is rejected before
/// anything is touched. Running out of blocks mid-write is not rolled
/// back: the inode keeps the blocks and size it got so far and the pool
/// stays partially consumed, the same way a real disk that fills up leaves
/// a partial file behind. A later successful rewrite of the same inode
/// reclaims the leaked blocks.
pub struct FileSystem<S: BlockStorage> {
    dev: S,
    bitmap: Bitmap,
    inodes: InodeTable,
}

impl<S: BlockStorage> FileSystem<S> {
    /// Initializes a filesystem onto the given pool.
    ///
    /// Every block starts free except the ones taken by the root directory
    /// (inode [`ROOT_ID`]), which is created holding its `.` and `..`
    /// entries, both pointing at itself.
    pub fn create(dev: S) -> Result<Self, FsError> {
        let bitmap = Bitmap::new(dev.block_count());
        let mut fs = FileSystem {
            dev,
            bitmap,
            inodes: InodeTable::new(),
        };
        fs.write_data(ROOT_ID, &dir::dot_entries(ROOT_ID, ROOT_ID))?;
        info!(
            "Initialized filesystem with {} blocks of {} bytes.",
            fs.dev.block_count(),
            fs.dev.block_size()
        );
        Ok(fs)
    }

    /// Creates a regular file holding `content` and links it into the
    /// directory `parent_id` under `name`. Returns the new inode's id.
    pub fn create_file(
        &mut self,
        parent_id: InodeId,
        name: &str,
        content: &[u8],
    ) -> Result<InodeId, FsError> {
        self.check_entry(parent_id, name)?;
        self.check_capacity(content.len())?;
        let id = self.inodes.alloc(InodeKind::File);
        info!("Creating file {:?} as inode {} under {}.", name, id, parent_id);
        self.write_data(id, content)?;
        self.add_dir_entry(parent_id, name, id)?;
        Ok(id)
    }

    /// Creates an empty directory under `parent_id`, seeded with `.` and
    /// `..` entries. Returns the new inode's id.
    pub fn create_dir(&mut self, parent_id: InodeId, name: &str) -> Result<InodeId, FsError> {
        self.check_entry(parent_id, name)?;
        let id = self.inodes.alloc(InodeKind::Directory);
        info!(
            "Creating directory {:?} as inode {} under {}.",
            name, id, parent_id
        );
        self.write_data(id, &dir::dot_entries(id, parent_id))?;
        self.add_dir_entry(parent_id, name, id)?;
        Ok(id)
    }

    /// Links the existing inode `target_id` into the directory `parent_id`
    /// under `name`. No inode is created and no content moves; the target's
    /// reference count goes up by one, mirroring the extra directory entry
    /// now pointing at it.
    pub fn hard_link(
        &mut self,
        parent_id: InodeId,
        name: &str,
        target_id: InodeId,
    ) -> Result<(), FsError> {
        self.check_entry(parent_id, name)?;
        let target = self
            .inodes
            .get_mut(target_id)
            .ok_or(FsError::UnknownId(target_id))?;
        target.ref_count += 1;
        info!(
            "Linking {:?} under {} to inode {} (ref_count {}).",
            name, parent_id, target_id, target.ref_count
        );
        self.add_dir_entry(parent_id, name, target_id)
    }

    /// Creates a symbolic link under `parent_id` whose content is the
    /// literal `target_path` string. The path is stored as plain bytes and
    /// never checked or resolved; dangling links are fine. Returns the new
    /// inode's id.
    pub fn symb_link(
        &mut self,
        parent_id: InodeId,
        name: &str,
        target_path: &str,
    ) -> Result<InodeId, FsError> {
        self.check_entry(parent_id, name)?;
        self.check_capacity(target_path.len())?;
        let id = self.inodes.alloc(InodeKind::Symlink);
        info!(
            "Creating symbolic link {:?} as inode {} under {} to {:?}.",
            name, id, parent_id, target_path
        );
        self.write_data(id, target_path.as_bytes())?;
        self.add_dir_entry(parent_id, name, id)?;
        Ok(id)
    }

    /// Reads back an inode's logical content: the stored bytes of every
    /// in-use block pointer, concatenated in pointer order.
    pub fn read_data(&self, id: InodeId) -> Result<Vec<u8>, FsError> {
        let inode = self.inodes.get(id).ok_or(FsError::UnknownId(id))?;
        let mut content = Vec::with_capacity(inode.size);
        for blocknr in inode.used_blocks() {
            content.extend_from_slice(&self.dev.read_block(blocknr)?);
        }
        Ok(content)
    }

    /// Reads and decodes the content of the directory inode `id`.
    pub fn read_dir(&self, id: InodeId) -> Result<Vec<DirEntry>, FsError> {
        let content = self.read_data(id)?;
        Ok(dir::parse(&content)?)
    }

    pub fn inode(&self, id: InodeId) -> Option<&Inode> {
        self.inodes.get(id)
    }

    /// Every live inode, in id order.
    pub fn inodes(&self) -> impl Iterator<Item = &Inode> {
        self.inodes.iter()
    }

    /// Number of inodes in the table.
    pub fn total_nodes(&self) -> usize {
        self.inodes.total_nodes()
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Raw stored contents of one block, regardless of how the allocator
    /// currently classifies it. Freed blocks keep their stale bytes.
    pub fn read_block(&self, blocknr: BlockNumber) -> Result<Vec<u8>, FsError> {
        Ok(self.dev.read_block(blocknr)?)
    }

    pub fn block_size(&self) -> usize {
        self.dev.block_size()
    }

    /// Replaces the content of inode `id` in full.
    ///
    /// The inode's size is set to the new length, every block it held is
    /// freed, and the content is laid out in `block_size` chunks (the last
    /// chunk may be shorter) over freshly allocated blocks, recorded from
    /// pointer slot 0 upward. Freeing before allocating lets a rewrite
    /// reuse the blocks it just gave up.
    ///
    /// Content too large for the pointer array is rejected before anything
    /// changes. Running out of blocks aborts mid-layout without rollback,
    /// per the contract on [`FileSystem`].
    fn write_data(&mut self, id: InodeId, data: &[u8]) -> Result<(), FsError> {
        self.check_capacity(data.len())?;
        let block_size = self.dev.block_size();
        let inode = self.inodes.get_mut(id).ok_or(FsError::UnknownId(id))?;
        debug!("Writing {} bytes to inode {}.", data.len(), id);

        inode.size = data.len();
        for slot in inode.blocks.iter_mut() {
            if let Some(blocknr) = slot.take() {
                self.bitmap.free(blocknr);
            }
        }
        for (slot, chunk) in data.chunks(block_size).enumerate() {
            let blocknr = self.bitmap.allocate().ok_or(FsError::NoSpace)?;
            self.dev.write_block(blocknr, chunk)?;
            inode.blocks[slot] = Some(blocknr);
        }
        Ok(())
    }

    /// Appends one `name -> target_id` entry to a directory. The entry line
    /// is rewritten in full, so every append reallocates all of the
    /// directory's blocks.
    fn add_dir_entry(
        &mut self,
        dir_id: InodeId,
        name: &str,
        target_id: InodeId,
    ) -> Result<(), FsError> {
        let mut content = self.read_data(dir_id)?;
        dir::push_entry(&mut content, name, target_id);
        self.write_data(dir_id, &content)
    }

    /// Input preconditions shared by every creation operation: the parent
    /// must exist and the name must survive the entry encoding. Checked
    /// before any state changes so rejected calls leave no trace.
    fn check_entry(&self, parent_id: InodeId, name: &str) -> Result<(), FsError> {
        if !self.inodes.contains(parent_id) {
            return Err(FsError::UnknownId(parent_id));
        }
        if !dir::valid_name(name) {
            return Err(FsError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// Rejects content that could never fit the direct pointer array, also
    /// before any state changes.
    fn check_capacity(&self, len: usize) -> Result<(), FsError> {
        let block_size = self.dev.block_size();
        let required = (len + block_size - 1) / block_size;
        if required > DIRECT_POINTERS {
            return Err(FsError::ContentTooLarge {
                size: len,
                required,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::State;
    use crate::io::{RamDisk, RamDiskBuilder};

    fn create_test_fs(block_count: usize) -> FileSystem<RamDisk> {
        let dev = RamDiskBuilder::new()
            .with_block_count(block_count)
            .with_block_size(4)
            .build();
        FileSystem::create(dev).expect("could not initialize filesystem")
    }

    fn used_blocks_of(fs: &FileSystem<RamDisk>, id: InodeId) -> Vec<BlockNumber> {
        fs.inode(id).unwrap().used_blocks().collect()
    }

    #[test]
    fn fresh_filesystem_has_a_root_with_dot_entries() {
        let fs = create_test_fs(100);
        assert_eq!(fs.read_data(ROOT_ID).unwrap(), b".:0|..:0".to_vec());
        let entries = fs.read_dir(ROOT_ID).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], DirEntry { name: ".".to_string(), id: 0 });
        assert_eq!(entries[1], DirEntry { name: "..".to_string(), id: 0 });

        let root = fs.inode(ROOT_ID).unwrap();
        assert_eq!(root.kind, InodeKind::Directory);
        assert_eq!(root.size, 8);
        assert_eq!(used_blocks_of(&fs, ROOT_ID), vec![0, 1]);
        assert_eq!(fs.bitmap().used_count(), 2);
    }

    #[test]
    fn creation_fails_when_the_pool_cannot_hold_the_root() {
        let dev = RamDiskBuilder::new()
            .with_block_count(1)
            .with_block_size(4)
            .build();
        assert!(matches!(FileSystem::create(dev), Err(FsError::NoSpace)));
    }

    #[test]
    fn file_content_round_trips() {
        let mut fs = create_test_fs(100);
        let id = fs.create_file(ROOT_ID, "a.txt", b"hello world").unwrap();
        assert_eq!(id, 1);
        assert_eq!(fs.read_data(id).unwrap(), b"hello world".to_vec());

        let inode = fs.inode(id).unwrap();
        assert_eq!(inode.kind, InodeKind::File);
        assert_eq!(inode.size, 11);
        assert_eq!(inode.ref_count, 1);
        // 11 bytes over 4-byte blocks occupy three of them.
        assert_eq!(used_blocks_of(&fs, id), vec![2, 3, 4]);
    }

    #[test]
    fn create_file_links_the_entry_into_the_parent() {
        let mut fs = create_test_fs(100);
        let id = fs.create_file(ROOT_ID, "a.txt", b"hi").unwrap();
        let entries = fs.read_dir(ROOT_ID).unwrap();
        assert_eq!(entries.last().unwrap(), &DirEntry {
            name: "a.txt".to_string(),
            id,
        });
    }

    #[test]
    fn pointer_count_always_matches_content_size() {
        let mut fs = create_test_fs(100);
        let id = fs.create_file(ROOT_ID, "f", b"").unwrap();
        for &len in &[0usize, 1, 4, 5, 11, 47, 48] {
            let content = vec![b'x'; len];
            fs.write_data(id, &content).unwrap();
            let inode = fs.inode(id).unwrap();
            assert_eq!(inode.size, len);
            assert_eq!(inode.used_blocks().count(), (len + 3) / 4);
            for blocknr in inode.used_blocks() {
                assert_eq!(fs.bitmap().get(blocknr), State::Used);
            }
            assert_eq!(fs.read_data(id).unwrap(), content);
        }
    }

    #[test]
    fn rewrite_frees_blocks_before_reallocating() {
        let mut fs = create_test_fs(100);
        let id = fs.create_file(ROOT_ID, "f", b"abcdefgh").unwrap();
        // Root holds [0, 1, 4] after growing past the file's [2, 3].
        assert_eq!(used_blocks_of(&fs, id), vec![2, 3]);
        assert_eq!(used_blocks_of(&fs, ROOT_ID), vec![0, 1, 4]);

        fs.write_data(id, b"0123456789ab").unwrap();
        // The rewrite reuses its own freed blocks first, then the next gap.
        assert_eq!(used_blocks_of(&fs, id), vec![2, 3, 5]);
        assert_eq!(fs.bitmap().used_count(), 6);
        assert_eq!(fs.read_data(id).unwrap(), b"0123456789ab".to_vec());
    }

    #[test]
    fn empty_content_occupies_no_blocks() {
        let mut fs = create_test_fs(100);
        let id = fs.create_file(ROOT_ID, "empty", b"").unwrap();
        let inode = fs.inode(id).unwrap();
        assert_eq!(inode.size, 0);
        assert_eq!(inode.used_blocks().count(), 0);
        assert_eq!(fs.read_data(id).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn content_too_large_is_rejected_before_any_change() {
        let mut fs = create_test_fs(100);
        // 49 bytes need 13 blocks, one more than an inode can point at.
        let oversized = vec![b'x'; 49];
        let err = fs.create_file(ROOT_ID, "big", &oversized).unwrap_err();
        assert!(matches!(
            err,
            FsError::ContentTooLarge { size: 49, required: 13 }
        ));
        assert_eq!(fs.total_nodes(), 1);
        assert_eq!(fs.bitmap().used_count(), 2);
        assert_eq!(fs.read_data(ROOT_ID).unwrap(), b".:0|..:0".to_vec());
    }

    #[test]
    fn exactly_twelve_blocks_of_content_fit() {
        let mut fs = create_test_fs(100);
        let content = vec![b'y'; 48];
        let id = fs.create_file(ROOT_ID, "full", &content).unwrap();
        assert_eq!(fs.inode(id).unwrap().used_blocks().count(), DIRECT_POINTERS);
        assert_eq!(fs.read_data(id).unwrap(), content);
    }

    #[test]
    fn invalid_names_are_rejected_before_any_change() {
        let mut fs = create_test_fs(100);
        for name in &["a:b", "a|b", ""] {
            let err = fs.create_file(ROOT_ID, name, b"data").unwrap_err();
            assert!(matches!(err, FsError::InvalidName(_)));
        }
        assert!(matches!(
            fs.create_dir(ROOT_ID, "x|y").unwrap_err(),
            FsError::InvalidName(_)
        ));
        assert_eq!(fs.total_nodes(), 1);
        assert_eq!(fs.bitmap().used_count(), 2);
        assert_eq!(fs.read_data(ROOT_ID).unwrap(), b".:0|..:0".to_vec());
    }

    #[test]
    fn unknown_ids_fail_fast() {
        let mut fs = create_test_fs(100);
        assert!(matches!(
            fs.create_file(9, "f", b"x").unwrap_err(),
            FsError::UnknownId(9)
        ));
        assert!(matches!(
            fs.hard_link(ROOT_ID, "ln", 9).unwrap_err(),
            FsError::UnknownId(9)
        ));
        assert!(matches!(fs.read_data(9).unwrap_err(), FsError::UnknownId(9)));
        assert_eq!(fs.total_nodes(), 1);
        assert_eq!(fs.bitmap().used_count(), 2);
    }

    #[test]
    fn no_space_mid_write_is_not_rolled_back() {
        // Four blocks total: the root takes two, leaving two free.
        let mut fs = create_test_fs(4);
        let err = fs
            .create_file(ROOT_ID, "big", b"0123456789ab")
            .unwrap_err();
        assert!(matches!(err, FsError::NoSpace));

        // The file inode exists and keeps what it managed to grab.
        let inode = fs.inode(1).unwrap();
        assert_eq!(inode.size, 12);
        assert_eq!(used_blocks_of(&fs, 1), vec![2, 3]);
        assert_eq!(fs.bitmap().free_count(), 0);
        // The parent was never touched, so the entry is absent.
        assert_eq!(fs.read_dir(ROOT_ID).unwrap().len(), 2);
    }

    #[test]
    fn failed_write_heals_on_the_next_rewrite() {
        let mut fs = create_test_fs(4);
        fs.create_file(ROOT_ID, "big", b"0123456789ab").unwrap_err();
        // Rewriting the same inode frees its partial blocks first and fits.
        fs.write_data(1, b"ok").unwrap();
        assert_eq!(fs.read_data(1).unwrap(), b"ok".to_vec());
        assert_eq!(used_blocks_of(&fs, 1), vec![2]);
        assert_eq!(fs.bitmap().free_count(), 1);
    }

    #[test]
    fn failed_entry_add_leaves_a_partial_parent_line() {
        // Five blocks: the root takes two and the file two, so growing the
        // root's entry line to four blocks comes up one short.
        let mut fs = create_test_fs(5);
        let err = fs.create_file(ROOT_ID, "ff", b"abcdefgh").unwrap_err();
        assert!(matches!(err, FsError::NoSpace));

        // The content write itself had already finished.
        assert_eq!(fs.read_data(1).unwrap(), b"abcdefgh".to_vec());

        // The root kept the grown size but only three of its four chunks
        // landed, so the entry line no longer decodes.
        assert_eq!(fs.inode(ROOT_ID).unwrap().size, 13);
        assert_eq!(used_blocks_of(&fs, ROOT_ID), vec![0, 1, 4]);
        assert_eq!(fs.read_data(ROOT_ID).unwrap(), b".:0|..:0|ff:".to_vec());
        assert!(matches!(
            fs.read_dir(ROOT_ID).unwrap_err(),
            FsError::CorruptDirectory(_)
        ));
        assert_eq!(fs.bitmap().free_count(), 0);
    }

    #[test]
    fn create_dir_seeds_dot_entries() {
        let mut fs = create_test_fs(100);
        let id = fs.create_dir(ROOT_ID, "docs").unwrap();
        assert_eq!(fs.read_data(id).unwrap(), b".:2|..:0".to_vec());

        let entries = fs.read_dir(id).unwrap();
        assert_eq!(entries[0], DirEntry { name: ".".to_string(), id });
        assert_eq!(entries[1], DirEntry { name: "..".to_string(), id: 0 });
        assert_eq!(fs.inode(id).unwrap().kind, InodeKind::Directory);
        assert_eq!(
            fs.read_dir(ROOT_ID).unwrap().last().unwrap().name,
            "docs"
        );
    }

    #[test]
    fn nested_directories_point_back_at_their_parent() {
        let mut fs = create_test_fs(100);
        let docs = fs.create_dir(ROOT_ID, "docs").unwrap();
        let sub = fs.create_dir(docs, "drafts").unwrap();
        let entries = fs.read_dir(sub).unwrap();
        assert_eq!(entries[0].id, sub);
        assert_eq!(entries[1].name, "..");
        assert_eq!(entries[1].id, docs);
    }

    #[test]
    fn hard_link_bumps_the_ref_count_and_nothing_else() {
        let mut fs = create_test_fs(100);
        let id = fs.create_file(ROOT_ID, "a.txt", b"hello world").unwrap();
        let before = fs.inode(id).unwrap().clone();

        fs.hard_link(ROOT_ID, "backup", id).unwrap();
        let after = fs.inode(id).unwrap();
        assert_eq!(after.ref_count, 2);
        assert_eq!(after.size, before.size);
        assert_eq!(after.blocks, before.blocks);
        assert_eq!(
            fs.read_dir(ROOT_ID).unwrap().last().unwrap(),
            &DirEntry { name: "backup".to_string(), id }
        );

        // Each additional link adds one more reference.
        fs.hard_link(ROOT_ID, "backup2", id).unwrap();
        assert_eq!(fs.inode(id).unwrap().ref_count, 3);
        assert_eq!(fs.total_nodes(), 2);
    }

    #[test]
    fn hard_link_ref_count_survives_a_failed_entry_add() {
        // Four blocks: root [0, 1, 3] plus the file at [2], nothing free.
        let mut fs = create_test_fs(4);
        let id = fs.create_file(ROOT_ID, "f", b"ab").unwrap();
        assert_eq!(fs.bitmap().free_count(), 0);

        let err = fs.hard_link(ROOT_ID, "x", id).unwrap_err();
        assert!(matches!(err, FsError::NoSpace));
        // The reference was counted before the entry line failed to grow.
        assert_eq!(fs.inode(id).unwrap().ref_count, 2);
    }

    #[test]
    fn hard_links_may_target_directories() {
        let mut fs = create_test_fs(100);
        let docs = fs.create_dir(ROOT_ID, "docs").unwrap();
        fs.hard_link(ROOT_ID, "mirror", docs).unwrap();
        assert_eq!(fs.inode(docs).unwrap().ref_count, 2);
    }

    #[test]
    fn symb_link_stores_the_literal_path() {
        let mut fs = create_test_fs(100);
        fs.create_file(ROOT_ID, "a.txt", b"hello world").unwrap();
        let id = fs.symb_link(ROOT_ID, "link", "/a.txt").unwrap();

        let inode = fs.inode(id).unwrap();
        assert_eq!(inode.kind, InodeKind::Symlink);
        assert_eq!(inode.ref_count, 1);
        assert_eq!(inode.size, 6);
        assert_eq!(fs.read_data(id).unwrap(), b"/a.txt".to_vec());
    }

    #[test]
    fn symb_link_targets_are_never_resolved() {
        let mut fs = create_test_fs(100);
        let id = fs.symb_link(ROOT_ID, "dangling", "/no/such/path").unwrap();
        assert_eq!(fs.read_data(id).unwrap(), b"/no/such/path".to_vec());
        // The target file does not exist and nothing complained.
        assert_eq!(fs.total_nodes(), 2);
    }

    #[test]
    fn directory_growth_rewrites_the_entry_line() {
        let mut fs = create_test_fs(100);
        for i in 0..5 {
            fs.create_file(ROOT_ID, &format!("f{}", i), b"..").unwrap();
        }
        let entries = fs.read_dir(ROOT_ID).unwrap();
        let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec![".", "..", "f0", "f1", "f2", "f3", "f4"]);

        let root = fs.inode(ROOT_ID).unwrap();
        assert_eq!(root.size, 8 + 5 * 5);
        assert_eq!(root.used_blocks().count(), (root.size + 3) / 4);
    }

    #[test]
    fn read_dir_on_plain_file_content_is_corrupt() {
        let mut fs = create_test_fs(100);
        let id = fs.create_file(ROOT_ID, "a.txt", b"hello world").unwrap();
        assert!(matches!(
            fs.read_dir(id).unwrap_err(),
            FsError::CorruptDirectory(_)
        ));
    }

    #[test]
    fn raw_blocks_expose_the_physical_layout() {
        let mut fs = create_test_fs(100);
        let id = fs.create_file(ROOT_ID, "a.txt", b"hello world").unwrap();
        let blocks = used_blocks_of(&fs, id);
        assert_eq!(fs.read_block(blocks[0]).unwrap(), b"hell".to_vec());
        assert_eq!(fs.read_block(blocks[1]).unwrap(), b"o wo".to_vec());
        assert_eq!(fs.read_block(blocks[2]).unwrap(), b"rld".to_vec());
    }

    #[test]
    fn freed_blocks_keep_stale_bytes_until_reused() {
        let mut fs = create_test_fs(100);
        let id = fs.create_file(ROOT_ID, "f", b"stale").unwrap();
        let old = used_blocks_of(&fs, id);
        fs.write_data(id, b"").unwrap();
        assert_eq!(fs.bitmap().get(old[0]), State::Free);
        // The pool does not scrub freed blocks.
        assert_eq!(fs.read_block(old[0]).unwrap(), b"stal".to_vec());
    }
}
