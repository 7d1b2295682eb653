use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use spdlog::{debug, info};

use crate::post_index::PostIndex;
use crate::post_info::PostInfo;

/// An archived post whose date disagrees with the date its broken URL points to.
#[derive(Debug, PartialEq)]
pub struct BrokenPost {
    pub expected: PostInfo,
    pub current: PostInfo,
}

pub fn read_report(report_path: &Path) -> io::Result<Vec<PostInfo>> {
    let content = fs::read_to_string(report_path).map_err(|e| {
        io::Error::new(e.kind(), format!("Error reading report {}: {}", report_path.display(), e))
    })?;
    Ok(parse_report(&content))
}

/// Posts referenced by the report, skipping the header line.
/// Only the first occurrence of each slug is kept, in report order.
pub fn parse_report(content: &str) -> Vec<PostInfo> {
    let mut seen = HashSet::new();
    content.lines()
        .skip(1)
        .filter_map(|line| {
            let post = PostInfo::from_url(line);
            if post.is_none() {
                debug!("Skipping report row {}", line);
            }
            post
        })
        .filter(|post| seen.insert(post.slug_key()))
        .collect()
}

pub fn find_broken_posts(reported: Vec<PostInfo>, index: &PostIndex, min_year: i32) -> Vec<BrokenPost> {
    reported.into_iter()
        .filter(|post| {
            if post.date.year <= min_year {
                debug!("Ignoring {}: year not after {}", post, min_year);
                return false;
            }
            index.contains(&post.slug)
        })
        .filter_map(|expected| {
            let current = index.get(&expected.slug)?;
            if current.matches_date(&expected.date) {
                None
            } else {
                Some(BrokenPost { expected, current: current.clone() })
            }
        })
        .collect()
}

/// Renames each broken post to the file name its broken URL expects.
/// Fails if the current file is missing or the expected one already exists.
pub fn rename_posts(posts_dir: &Path, broken: &[BrokenPost], dry_run: bool) -> io::Result<usize> {
    for post in broken {
        let from_name = post.current.file_name();
        let to_name = post.expected.file_name();
        let from = posts_dir.join(&from_name);
        let to = posts_dir.join(&to_name);

        info!("Rename: {} to {}", from_name, to_name);
        if dry_run {
            continue;
        }

        if to.exists() {
            return Err(io::Error::new(ErrorKind::AlreadyExists, format!("Error renaming {}: {} already exists", from.display(), to.display())));
        }
        fs::rename(&from, &to).map_err(|e| {
            io::Error::new(e.kind(), format!("Error renaming {} to {}: {}", from.display(), to.display(), e))
        })?;
    }

    Ok(broken.len())
}
