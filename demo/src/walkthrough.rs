//! Narrated tour of the filesystem model.
//!
//! Builds the canonical session (a file, a directory, a hard link, a
//! symbolic link) on the default 100 x 4 pool and dumps the bitmap, the
//! inode table and the decoded directories after each step. Pass a path as
//! the first argument to import that file's bytes instead of the built-in
//! sample content.

use std::env;
use std::path::Path;
use std::process;

use blockfs::io::{RamDisk, RamDiskBuilder};
use blockfs::{FileSystem, Inode, InodeId, State, ROOT_ID};

type Fs = FileSystem<RamDisk>;

fn main() {
    let (name, content) = match env::args().nth(1) {
        Some(path) => {
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    eprintln!("cannot read {}: {}", path, err);
                    process::exit(1);
                }
            };
            let name = Path::new(&path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "import.txt".to_string());
            (name, bytes)
        }
        None => ("a.txt".to_string(), b"hello world".to_vec()),
    };

    let mut fs = FileSystem::create(RamDiskBuilder::new().build())
        .expect("pool too small for the root directory");

    println!("=== fresh filesystem (100 blocks x 4 bytes) ===");
    print_bitmap(&fs);
    print_inodes(&fs);

    println!();
    println!("=== create /{} ({} bytes) ===", name, content.len());
    let file = match fs.create_file(ROOT_ID, &name, &content) {
        Ok(id) => id,
        Err(err) => {
            eprintln!("cannot import {}: {}", name, err);
            process::exit(1);
        }
    };
    print_inodes(&fs);
    show_dir(&fs, ROOT_ID);
    show_raw(&fs, file);

    println!();
    println!("=== create /docs ===");
    let docs = fs.create_dir(ROOT_ID, "docs").expect("create directory");
    show_dir(&fs, ROOT_ID);
    show_dir(&fs, docs);

    println!();
    println!("=== hard link /docs/backup -> inode {} ===", file);
    fs.hard_link(docs, "backup", file).expect("hard link");
    show_dir(&fs, docs);
    print_inode(fs.inode(file).expect("file inode"));

    println!();
    println!("=== symbolic link /docs/link -> /{} ===", name);
    let link = fs
        .symb_link(docs, "link", &format!("/{}", name))
        .expect("symbolic link");
    show_dir(&fs, docs);
    println!(
        "inode {} points at {:?}",
        link,
        String::from_utf8_lossy(&fs.read_data(link).expect("read link"))
    );

    println!();
    println!("=== final state ===");
    print_bitmap(&fs);
    print_inodes(&fs);
}

fn print_bitmap(fs: &Fs) {
    let bits: String = fs
        .bitmap()
        .iter()
        .map(|state| if state == State::Used { '1' } else { '0' })
        .collect();
    println!(
        "bitmap    {} ({} used, {} free)",
        bits,
        fs.bitmap().used_count(),
        fs.bitmap().free_count()
    );
}

fn print_inodes(fs: &Fs) {
    println!("inodes    {} in the table", fs.total_nodes());
    for inode in fs.inodes() {
        print_inode(inode);
    }
}

fn print_inode(inode: &Inode) {
    let blocks: Vec<_> = inode.used_blocks().collect();
    println!(
        "inode {:>2}  {:9?} ref_count={} size={:>3} blocks={:?}",
        inode.id, inode.kind, inode.ref_count, inode.size, blocks
    );
}

fn show_dir(fs: &Fs, id: InodeId) {
    let raw = fs.read_data(id).expect("read directory");
    let entries = fs.read_dir(id).expect("decode directory");
    let listing: Vec<String> = entries
        .iter()
        .map(|entry| format!("{} -> {}", entry.name, entry.id))
        .collect();
    println!(
        "dir {:>2}    {:?}  [{}]",
        id,
        String::from_utf8_lossy(&raw),
        listing.join(", ")
    );
}

fn show_raw(fs: &Fs, id: InodeId) {
    let inode = fs.inode(id).expect("inode");
    for blocknr in inode.used_blocks() {
        let bytes = fs.read_block(blocknr).expect("read block");
        println!("block {:>2}  {:?}", blocknr, String::from_utf8_lossy(&bytes));
    }
}
