// SPDX-License-Identifier: MIT

use mvfs::mvfs::*;
use zerocopy::IntoBytes;

const TS_FORMAT: u64 = 1_700_000_000;
const TS_ADD: u64 = 1_700_000_500;

fn format_image(size_kib: u32, inodes: u32) -> Vec<u8> {
    let meta = MvfsMeta::new(size_kib, inodes).unwrap();
    let mut buf = vec![0u8; meta.image_bytes()];
    let mut io = MemMvIO::new(&mut buf);
    MvfsFormatter::new(&mut io, &meta)
        .with_timestamp(TS_FORMAT)
        .format(true)
        .unwrap();
    buf
}

fn add_file(buf: &mut [u8], name: &str, content: &[u8]) -> FsInjectorResult {
    let mut io = MemMvIO::new(buf);
    let mut image = MvfsImage::load(&mut io)?;
    MvfsInjector::new(&mut image)
        .with_timestamp(TS_ADD)
        .write_file(name, content)?;
    image.store(&mut io)?;
    Ok(())
}

fn block(buf: &[u8], index: usize) -> &[u8] {
    &buf[index * MVFS_BLOCK_SIZE..(index + 1) * MVFS_BLOCK_SIZE]
}

fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
}

#[test]
fn format_reference_image() {
    let buf = format_image(180, 128);
    assert_eq!(buf.len(), 184_320);

    let sb = MvfsSuperblock::decode(block(&buf, 0)).unwrap();
    assert_eq!(sb.magic.get(), MVFS_MAGIC);
    assert_eq!(sb.version.get(), 1);
    assert_eq!(sb.block_size.get(), 4096);
    assert_eq!(sb.total_blocks.get(), 45);
    assert_eq!(sb.inode_count.get(), 128);
    assert_eq!(sb.inode_table_blocks.get(), 4);
    assert_eq!(sb.data_region_start.get(), 7);
    assert_eq!(sb.data_region_blocks.get(), 38);
    assert_eq!(sb.root_inode.get(), 1);
    assert_eq!(sb.mtime_epoch.get(), TS_FORMAT);
    assert_eq!(sb.flags.get(), 0);
    assert!(sb.verify_checksum());

    let root = MvfsInode::decode(&block(&buf, 3)[..MVFS_INODE_SIZE]).unwrap();
    assert_eq!(root.mode.get(), 0o040000);
    assert_eq!(root.links.get(), 2);
    assert_eq!(root.size_bytes.get(), 128);
    assert_eq!(root.direct[0].get(), 7);
    assert!(root.direct[1..].iter().all(|p| p.get() == 0));
    assert!(root.verify_checksum());

    let dot = MvfsDirEntry::decode(&block(&buf, 7)[..64]).unwrap();
    let dotdot = MvfsDirEntry::decode(&block(&buf, 7)[64..128]).unwrap();
    assert_eq!((dot.inode_no.get(), dot.file_type, dot.name_bytes()), (1, 2, &b"."[..]));
    assert_eq!((dotdot.inode_no.get(), dotdot.file_type, dotdot.name_bytes()), (1, 2, &b".."[..]));
    assert!(dot.verify_checksum() && dotdot.verify_checksum());
}

#[test]
fn add_file_uses_lowest_free_units() {
    let mut buf = format_image(180, 128);
    let content = pattern(5000, 3);
    add_file(&mut buf, "hello.bin", &content).unwrap();

    // Inode #2 is bit 1; data indices 1 and 2 are absolute blocks 8 and 9
    assert_eq!(block(&buf, 1)[0], 0b11);
    assert_eq!(block(&buf, 2)[0], 0b111);

    let inode = MvfsInode::decode(&block(&buf, 3)[128..256]).unwrap();
    assert_eq!(inode.mode.get(), 0o100000);
    assert_eq!(inode.links.get(), 1);
    assert_eq!(inode.size_bytes.get(), 5000);
    assert_eq!(inode.direct[0].get(), 8);
    assert_eq!(inode.direct[1].get(), 9);
    assert!(inode.verify_checksum());

    assert_eq!(block(&buf, 8), &content[..4096]);
    assert_eq!(&block(&buf, 9)[..904], &content[4096..]);

    let entry = MvfsDirEntry::decode(&block(&buf, 7)[128..192]).unwrap();
    assert_eq!(entry.inode_no.get(), 2);
    assert_eq!(entry.kind(), Some(MvfsFileType::File));
    assert_eq!(entry.name_str(), Some("hello.bin"));

    let root = MvfsInode::decode(&block(&buf, 3)[..128]).unwrap();
    assert_eq!(root.links.get(), 3);
    assert_eq!(root.size_bytes.get(), 192);

    let sb = MvfsSuperblock::decode(block(&buf, 0)).unwrap();
    assert_eq!(sb.mtime_epoch.get(), TS_ADD);
    assert!(sb.verify_checksum());
}

#[test]
fn long_name_is_rejected_without_changes() {
    let mut buf = format_image(180, 128);
    let before = buf.clone();
    let name = "n".repeat(60);
    assert_eq!(
        add_file(&mut buf, &name, b"payload"),
        Err(FsInjectorError::NameTooLong)
    );
    assert_eq!(buf, before);
}

#[test]
fn oversized_file_is_rejected_without_changes() {
    let mut buf = format_image(180, 128);
    let before = buf.clone();
    assert_eq!(
        add_file(&mut buf, "huge", &vec![0x5A; 50_000]),
        Err(FsInjectorError::FileTooLarge)
    );
    assert_eq!(block(&buf, 1)[0], 0b1);
    assert_eq!(block(&buf, 2)[0], 0b1);
    assert_eq!(buf, before);
}

#[test]
fn layout_adds_up_for_every_valid_parameter() {
    for size_kib in (MVFS_MIN_SIZE_KIB..=MVFS_MAX_SIZE_KIB).step_by(MVFS_SIZE_ALIGN_KIB as usize) {
        for inodes in MVFS_MIN_INODES..=MVFS_MAX_INODES {
            let m = MvfsMeta::new(size_kib, inodes).unwrap();
            assert_eq!(
                m.total_blocks,
                1 + m.inode_bitmap_blocks
                    + m.data_bitmap_blocks
                    + m.inode_table_blocks
                    + m.data_region_blocks,
                "size={size_kib} inodes={inodes}"
            );
            assert_eq!(m.data_region_start, m.inode_table_start + m.inode_table_blocks);
            assert!(m.data_region_blocks >= 1);
            assert!(m.inode_table_blocks * 32 >= inodes as u64);
        }
    }
}

#[test]
fn every_record_verifies_after_adds() {
    let mut buf = format_image(256, 160);
    for i in 0..5 {
        add_file(&mut buf, &format!("file{i}"), &pattern(1000 * i + 1, i as u8)).unwrap();
    }

    let image = MvfsImage::load(&mut MemMvIO::new(&mut buf)).unwrap();
    assert!(image.superblock.verify_checksum());
    for (index, inode) in image.inodes.iter().enumerate() {
        if !inode.is_unused() {
            assert!(inode.verify_checksum(), "inode {}", index + 1);
            assert_eq!(inode.inode_crc.get() >> 32, 0);
        }
    }
    let dir = image.root_dir().unwrap();
    assert_eq!(dir.entries().count(), 7);
    assert!(dir.entries().all(|e| e.verify_checksum()));
}

#[test]
fn decode_then_encode_is_identity() {
    let mut buf = format_image(180, 128);
    add_file(&mut buf, "x", &pattern(7000, 1)).unwrap();

    let image = MvfsImage::load(&mut MemMvIO::new(&mut buf)).unwrap();
    assert_eq!(image.to_bytes().unwrap(), buf);

    let inode_bytes = &block(&buf, 3)[128..256];
    assert_eq!(MvfsInode::decode(inode_bytes).unwrap().as_bytes(), inode_bytes);
    let dirent_bytes = &block(&buf, 7)[128..192];
    assert_eq!(MvfsDirEntry::decode(dirent_bytes).unwrap().as_bytes(), dirent_bytes);
}

#[test]
fn loading_twice_gives_equal_images() {
    let mut buf = format_image(256, 160);
    add_file(&mut buf, "one", &pattern(3000, 4)).unwrap();
    add_file(&mut buf, "two", &pattern(9000, 5)).unwrap();
    let original = buf.clone();

    let first = MvfsImage::load(&mut MemMvIO::new(&mut buf)).unwrap();
    let second = MvfsImage::load(&mut MemMvIO::new(&mut buf)).unwrap();
    assert_eq!(first, second);
    assert_eq!(buf, original);

    let mut stored = first.to_bytes().unwrap();
    let third = MvfsImage::load(&mut MemMvIO::new(&mut stored)).unwrap();
    assert_eq!(third, first);
}

#[test]
fn successive_adds_never_share_blocks() {
    let mut buf = format_image(180, 128);
    for i in 0..6u8 {
        add_file(&mut buf, &format!("f{i}"), &pattern(4096 * (i as usize % 3) + 10, i)).unwrap();
    }

    let image = MvfsImage::load(&mut MemMvIO::new(&mut buf)).unwrap();
    let mut seen = std::collections::HashSet::new();
    for ino in 2..=7u32 {
        for b in image.inode(ino).unwrap().direct_blocks() {
            assert!(b >= 8, "block {b} overlaps metadata or the root directory");
            assert!(seen.insert(b), "block {b} allocated twice");
        }
    }

    let report = MvfsChecker::new(&mut MemMvIO::new(&mut buf)).check_all().unwrap();
    assert_eq!(report.files, 6);
    assert_eq!(report.used_inodes, 7);
    assert_eq!(report.used_blocks, 1 + seen.len());
}

#[test]
fn earlier_files_survive_later_adds() {
    let mut buf = format_image(180, 128);
    let first = pattern(6000, 11);
    let second = pattern(12_000, 22);
    add_file(&mut buf, "first", &first).unwrap();
    add_file(&mut buf, "second", &second).unwrap();

    let resolver = MvfsResolver::from_io(&mut MemMvIO::new(&mut buf)).unwrap();
    assert_eq!(resolver.read_file("first").unwrap(), first);
    assert_eq!(resolver.read_file("second").unwrap(), second);

    let names: Vec<String> = resolver.list_root().unwrap().into_iter().map(|l| l.name).collect();
    assert_eq!(names, [".", "..", "first", "second"]);
}

#[test]
fn root_directory_fills_after_62_files() {
    let mut buf = format_image(180, 128);
    for i in 0..62 {
        add_file(&mut buf, &format!("empty{i:02}"), b"").unwrap();
    }
    let before = buf.clone();
    assert_eq!(
        add_file(&mut buf, "one-too-many", b""),
        Err(FsInjectorError::Allocator(FsAllocatorError::DirectoryFull))
    );
    assert_eq!(buf, before);

    let report = MvfsChecker::new(&mut MemMvIO::new(&mut buf)).check_all().unwrap();
    assert_eq!(report.files, 62);
}

#[test]
fn host_file_backend_round_trip() {
    let meta = MvfsMeta::new(300, 256).unwrap();
    let mut file = tempfile::tempfile().unwrap();
    {
        let mut io = StdMvIO::new(&mut file);
        MvfsFormatter::new(&mut io, &meta).format(true).unwrap();
        let mut image = MvfsImage::load(&mut io).unwrap();
        MvfsInjector::new(&mut image)
            .write_file("notes.txt", b"stored through a host file")
            .unwrap();
        image.store(&mut io).unwrap();
    }
    assert_eq!(file.metadata().unwrap().len(), meta.image_bytes() as u64);

    let mut io = StdMvIO::new(&mut file);
    let report = MvfsChecker::new(&mut io).check_all().unwrap();
    assert_eq!(report.files, 1);
    let resolver = MvfsResolver::from_io(&mut io).unwrap();
    assert_eq!(
        resolver.read_file("notes.txt").unwrap(),
        b"stored through a host file"
    );
}
