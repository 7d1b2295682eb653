use std::{fs, io};
use std::path::{Path, PathBuf};

use crate::post_info::PostInfo;

pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: &Path) -> PostList {
        PostList { root_dir: root_dir.to_path_buf() }
    }

    /// Regular files directly inside `root_dir`, sorted by file name.
    /// Subdirectories are never visited.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = vec![];
        let entries = fs::read_dir(self.root_dir.as_path()).map_err(|e| {
            io::Error::new(e.kind(), format!("Error listing directory {}: {}", self.root_dir.display(), e))
        })?;
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Files whose names follow the post naming convention, with their parsed identity.
    pub fn retrieve_posts(&self) -> io::Result<Vec<(PathBuf, PostInfo)>> {
        let posts = self.retrieve_files()?
            .into_iter()
            .filter_map(|path| {
                let post = PostInfo::from_file_name(&path);
                if post.is_none() {
                    spdlog::debug!("Skipping {}: not a post file name", path.display());
                }
                post.map(|post| (path, post))
            })
            .collect();
        Ok(posts)
    }
}
