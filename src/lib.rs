pub mod config;
pub mod logger;
pub mod post_info;
pub mod post_list;
pub mod post_index;
pub mod redirects;
pub mod renamer;
pub mod content_fixer;
pub mod run;
mod test_data;
