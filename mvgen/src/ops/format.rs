// SPDX-License-Identifier: MIT

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use mvfs::mvfs::*;

use crate::output::AtomicImage;
use crate::utils;

/// Entry point: write a freshly formatted image to `image`.
pub fn create(image: &Path, size_kib: u32, inodes: u32) -> anyhow::Result<MvfsMeta> {
    let t0 = Instant::now();

    let meta = MvfsMeta::new(size_kib, inodes)
        .map_err(FsError::from)
        .context("invalid image parameters")?;
    crate::log_verbose!(
        "layout • blocks={} • inode bitmap @{} • data bitmap @{} • inode table @{}+{} • data @{}+{}",
        meta.total_blocks,
        meta.inode_bitmap_start,
        meta.data_bitmap_start,
        meta.inode_table_start,
        meta.inode_table_blocks,
        meta.data_region_start,
        meta.data_region_blocks
    );

    let mut target = AtomicImage::create(image, meta.image_bytes() as u64)?;
    {
        let mut io = target.as_io();
        let mut formatter = MvfsFormatter::new(&mut io, &meta);
        formatter
            .format(true)
            .and_then(|_| formatter.flush())
            .map_err(FsError::from)
            .context("format failed")?;
    }
    target.commit()?;

    crate::log_info!(
        "formatted {} ({}, {} inodes, {} data blocks) in {:.2}s",
        image.display(),
        utils::pretty_bytes(meta.image_bytes() as u64),
        meta.inode_count,
        meta.data_region_blocks,
        t0.elapsed().as_secs_f32()
    );
    Ok(meta)
}
