use std::path::{Path, PathBuf};
use std::{fs, io};

use spdlog::{debug, info};

use crate::post_info::{PostDate, PostInfo};
use crate::post_list::PostList;

/// Lines the way `str::lines` splits them, without requiring valid UTF-8.
fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = content.split(|b| *b == b'\n').collect();
    if content.is_empty() || content.ends_with(b"\n") {
        lines.pop();
    }
    lines.into_iter()
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}

/// Position and value of the first `date:` header line in a post.
pub fn find_date_line(content: &[u8]) -> Option<(usize, PostDate)> {
    split_lines(content)
        .into_iter()
        .enumerate()
        .find_map(|(idx, line)| {
            PostDate::from_date_line(&String::from_utf8_lossy(line)).map(|date| (idx, date))
        })
}

/// New content with the `date:` line matching `expected`, or None when nothing has to change.
/// Line endings are normalised to `\n` in the rewritten content, other bytes are kept as they are.
pub fn fix_content(content: &[u8], expected: &PostInfo) -> Option<Vec<u8>> {
    let (idx, date) = find_date_line(content)?;
    if expected.matches_date(&date) {
        return None;
    }

    let date_line = expected.date_line();
    let mut lines = split_lines(content);
    lines[idx] = date_line.as_bytes();

    let mut updated = lines.join(&b'\n');
    updated.push(b'\n');
    Some(updated)
}

pub fn fix_post(path: &Path, expected: &PostInfo, dry_run: bool) -> io::Result<bool> {
    let content = fs::read(path).map_err(|e| {
        io::Error::new(e.kind(), format!("Error reading post {}: {}", path.display(), e))
    })?;

    let Some(updated) = fix_content(&content, expected) else {
        return Ok(false);
    };

    info!("Fixing: {}", path.display());
    if !dry_run {
        fs::write(path, updated).map_err(|e| {
            io::Error::new(e.kind(), format!("Error writing post {}: {}", path.display(), e))
        })?;
    }
    Ok(true)
}

/// Rewrites the `date:` line of every post directly inside `posts_dir` to match its file name.
/// Returns the fixed paths.
pub fn fix_posts(posts_dir: &Path, dry_run: bool) -> io::Result<Vec<PathBuf>> {
    let mut fixed = vec![];
    for (path, expected) in PostList::new(posts_dir).retrieve_posts()? {
        if fix_post(&path, &expected, dry_run)? {
            fixed.push(path);
        } else {
            debug!("No date change for {}", path.display());
        }
    }
    Ok(fixed)
}
