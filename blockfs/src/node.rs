use std::collections::BTreeMap;

use crate::io::BlockNumber;

/// Identifier of an inode in the table. Ids are handed out sequentially and
/// never reused; the root directory always owns id 0.
pub type InodeId = u32;

/// Id of the root directory inode, present from the moment the filesystem
/// is created.
pub const ROOT_ID: InodeId = 0;

/// Number of direct block pointers an inode carries. There are no indirect
/// blocks, so this caps content at `DIRECT_POINTERS * block size` bytes.
pub const DIRECT_POINTERS: usize = 12;

/// What an inode describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InodeKind {
    File,
    Directory,
    Symlink,
}

/// Metadata record for one filesystem object.
///
/// Pure data: everything that touches blocks or the free-space map lives in
/// [`FileSystem`](crate::FileSystem). Content blocks are referenced through
/// the fixed `blocks` array, filled from slot 0 upward with `None` marking
/// unused slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    pub id: InodeId,
    pub kind: InodeKind,
    /// Number of directory entries pointing at this inode.
    pub ref_count: u32,
    /// Byte length of the logical content.
    pub size: usize,
    pub blocks: [Option<BlockNumber>; DIRECT_POINTERS],
}

impl Inode {
    pub fn new(id: InodeId, kind: InodeKind) -> Self {
        Inode {
            id,
            kind,
            ref_count: 1,
            size: 0,
            blocks: [None; DIRECT_POINTERS],
        }
    }

    /// Block numbers currently in use, in content order.
    pub fn used_blocks(&self) -> impl Iterator<Item = BlockNumber> + '_ {
        self.blocks.iter().flatten().copied()
    }
}

/// Table of every live inode, keyed by id.
///
/// The filesystem owns exactly one. Inodes are only ever added; the model
/// has no unlink, so ids stay dense and a `BTreeMap` keeps iteration in id
/// order for inspection.
pub(crate) struct InodeTable {
    nodes: BTreeMap<InodeId, Inode>,
    next_id: InodeId,
}

impl InodeTable {
    /// Creates the table with the root directory inode already present.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT_ID, Inode::new(ROOT_ID, InodeKind::Directory));
        InodeTable {
            nodes,
            next_id: ROOT_ID + 1,
        }
    }

    /// Adds a fresh inode of the given kind under the next free id.
    pub fn alloc(&mut self, kind: InodeKind) -> InodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, Inode::new(id, kind));
        id
    }

    pub fn contains(&self, id: InodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: InodeId) -> Option<&Inode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: InodeId) -> Option<&mut Inode> {
        self.nodes.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Inode> {
        self.nodes.values()
    }

    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }
}
