// SPDX-License-Identifier: MIT

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use mvfs::mvfs::*;

use crate::host::{HostFile, read_image};
use crate::output::AtomicImage;
use crate::utils;

/// What [`add`] placed in the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSummary {
    pub name: String,
    pub inode: u32,
    pub size: u64,
    pub free_blocks: usize,
}

/// Entry point: copy `input` with `file` added to its root directory into `output`.
///
/// `output` may be the same path as `input`. Nothing is written when any
/// step fails.
pub fn add(input: &Path, output: &Path, file: &Path) -> anyhow::Result<AddSummary> {
    let t0 = Instant::now();

    let host = HostFile::read(file)?;
    let mut bytes = read_image(input)?;
    let mut image = MvfsImage::load(&mut MemMvIO::new(&mut bytes))
        .map_err(FsError::from)
        .with_context(|| format!("cannot load image {}", input.display()))?;
    crate::log_verbose!(
        "loaded {} • {} data blocks • mtime {}",
        input.display(),
        image.meta.data_region_blocks,
        utils::pretty_epoch(image.superblock.mtime_epoch.get())
    );

    MvfsInjector::new(&mut image)
        .write_file(&host.name, &host.content)
        .map_err(FsError::from)
        .with_context(|| format!("cannot add \"{}\"", host.name))?;

    let inode = image
        .root_dir()
        .ok()
        .and_then(|dir| dir.find(&host.name).map(|e| e.inode_no.get()))
        .context("added entry missing from root directory")?;
    let free_blocks = {
        let meta = image.meta;
        let mut inode_bitmap = image.inode_bitmap.clone();
        let mut data_bitmap = image.data_bitmap.clone();
        MvfsAllocator::new(&meta, &mut inode_bitmap, &mut data_bitmap).remaining_units()
    };

    let mut target = AtomicImage::create(output, image.meta.image_bytes() as u64)?;
    image
        .store(&mut target.as_io())
        .map_err(FsError::from)
        .with_context(|| format!("cannot write {}", output.display()))?;
    target.commit()?;

    crate::log_info!(
        "added \"{}\" ({}) as inode {} to {} in {:.2}s",
        host.name,
        utils::pretty_bytes(host.content.len() as u64),
        inode,
        output.display(),
        t0.elapsed().as_secs_f32()
    );

    Ok(AddSummary {
        name: host.name,
        inode,
        size: host.content.len() as u64,
        free_blocks,
    })
}
