// SPDX-License-Identifier: MIT

use std::path::Path;

use anyhow::Context;
use mvfs::mvfs::*;

use crate::host::read_image;
use crate::utils;

/// Entry point: verify `image`, optionally returning its root listing.
pub fn check(image: &Path, list: bool) -> anyhow::Result<(MvfsCheckReport, Vec<MvfsListing>)> {
    let mut bytes = read_image(image)?;
    let mut io = MemMvIO::new(&mut bytes);

    let report = MvfsChecker::new(&mut io)
        .check_all()
        .map_err(FsError::from)
        .with_context(|| format!("{} is not a valid MVFS image", image.display()))?;

    crate::log_info!(
        "{}: ok • {} file(s) • {} inode(s) used • {} data block(s) used, {} free",
        image.display(),
        report.files,
        report.used_inodes,
        report.used_blocks,
        report.free_blocks
    );

    if !list {
        return Ok((report, Vec::new()));
    }

    let resolver = MvfsResolver::from_io(&mut io).map_err(FsError::from)?;
    crate::log_verbose!(
        "last modified {}",
        utils::pretty_epoch(resolver.image().superblock.mtime_epoch.get())
    );
    let entries = resolver.list_root().map_err(FsError::from)?;
    for e in &entries {
        let kind = match e.file_type {
            Some(MvfsFileType::Dir) => "dir ",
            Some(MvfsFileType::File) => "file",
            None => "?   ",
        };
        crate::log_normal!("{kind} {:>5} {:>10}  {}", e.inode, e.size, e.name);
    }
    Ok((report, entries))
}
