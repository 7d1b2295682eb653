use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use spdlog::{debug, warn};

use crate::post_list::PostList;
use crate::post_info::PostInfo;

/// Slug to post mapping built from the archived posts. Slugs are case-insensitive.
#[derive(Debug, Default)]
pub struct PostIndex {
    posts: BTreeMap<String, PostInfo>,
}

impl PostIndex {
    /// Indexes every post file directly inside `archived_dir`.
    /// On duplicated slugs the last file, in file name order, wins.
    pub fn from_dir(archived_dir: &Path) -> io::Result<PostIndex> {
        let posts = PostList::new(archived_dir).retrieve_posts()?;
        let index = Self::from_posts(posts.into_iter().map(|(_, post)| post));
        debug!("Indexed {} archived posts from {}", index.len(), archived_dir.display());
        Ok(index)
    }

    pub fn from_posts<I: IntoIterator<Item=PostInfo>>(posts: I) -> PostIndex {
        let mut index = PostIndex::default();
        for post in posts {
            index.insert(post);
        }
        index
    }

    pub fn insert(&mut self, post: PostInfo) {
        if let Some(previous) = self.posts.insert(post.slug_key(), post) {
            let current = &self.posts[&previous.slug_key()];
            warn!("Duplicated archived slug {}: {} replaced by {}",
                previous.slug, previous.file_name(), current.file_name());
        }
    }

    pub fn get(&self, slug: &str) -> Option<&PostInfo> {
        self.posts.get(&slug.to_lowercase())
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=&PostInfo> {
        self.posts.values()
    }
}
