use std::io;
use std::path::{Path, PathBuf};

use spdlog::info;

use crate::config::Config;
use crate::content_fixer::fix_posts;
use crate::post_index::PostIndex;
use crate::redirects::write_redirects;
use crate::renamer::{find_broken_posts, read_report, rename_posts};

pub const USAGE: &str = "Please pass the path to the broken URL report and the path to your posts directory";

/// What a run does, chosen by how many positional arguments were given.
#[derive(Debug, PartialEq)]
pub enum RunMode {
    Usage,
    /// Rename posts from the report, then fix their `date:` lines
    Repair { report: PathBuf, posts_dir: PathBuf },
    /// Write previous-day redirects for the archived posts
    Redirects { posts_dir: PathBuf },
}

impl RunMode {
    pub fn from_args(report: Option<PathBuf>, posts_dir: Option<PathBuf>, redirects: Option<String>) -> RunMode {
        match (report, posts_dir, redirects) {
            (Some(_), Some(posts_dir), Some(_)) => RunMode::Redirects { posts_dir },
            (Some(report), Some(posts_dir), None) => RunMode::Repair { report, posts_dir },
            _ => RunMode::Usage,
        }
    }
}

/// Counts of what a run changed, or would change on a dry run.
#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub renamed: usize,
    pub fixed: usize,
    pub redirects: usize,
}

impl RunSummary {
    pub fn repair_line(&self, dry_run: bool) -> String {
        if dry_run {
            format!("Would rename {} posts. Date headers are checked against the current names, {} would be fixed",
                    self.renamed, self.fixed)
        } else {
            format!("Renamed {} posts, fixed {} date headers", self.renamed, self.fixed)
        }
    }

    pub fn redirects_line(&self, redirects_dir: &Path, dry_run: bool) -> String {
        let verb = if dry_run { "Would write" } else { "Wrote" };
        format!("{} {} redirects into {}", verb, self.redirects, redirects_dir.display())
    }
}

pub fn run(mode: &RunMode, config: &Config) -> io::Result<RunSummary> {
    let mut summary = RunSummary::default();
    let dry_run = config.run.dry_run;

    match mode {
        RunMode::Usage => {
            println!("{}", USAGE);
        }
        RunMode::Redirects { posts_dir } => {
            let index = PostIndex::from_dir(&posts_dir.join(&config.layout.archived_dir))?;
            let redirects_dir = posts_dir.join(&config.layout.redirects_dir);
            summary.redirects = write_redirects(&redirects_dir, &index, dry_run)?;
            info!("{}", summary.redirects_line(&redirects_dir, dry_run));
        }
        RunMode::Repair { report, posts_dir } => {
            let index = PostIndex::from_dir(&posts_dir.join(&config.layout.archived_dir))?;
            let reported = read_report(report)?;
            let broken = find_broken_posts(reported, &index, config.report.min_year);
            summary.renamed = rename_posts(posts_dir, &broken, dry_run)?;
            summary.fixed = fix_posts(posts_dir, dry_run)?.len();
            info!("{}", summary.repair_line(dry_run));
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn create_blog(root: &Path) -> io::Result<()> {
        fs::create_dir(root.join("archived"))?;
        fs::create_dir(root.join("redirects"))?;
        fs::write(root.join("archived").join("2021-05-01-foo.aspx.markdown"), "---\ndate: 2021-05-01 -0800\n---\n")?;
        fs::write(root.join("2021-05-01-foo.aspx.markdown"), "---\r\ntitle: Foo\r\ndate: 2021-05-01 -0800\r\n---\r\nBody\r\n")?;
        fs::write(root.join("report.csv"), "URL,Code\nhttps://old/archive/2021/05/02/foo.aspx,404\nhttps://old/archive/1999/05/09/foo.aspx,404\n")?;
        Ok(())
    }

    #[test]
    fn test_mode_from_args() {
        let report = Some(PathBuf::from("report.csv"));
        let posts = Some(PathBuf::from("_posts"));
        assert_eq!(RunMode::from_args(None, None, None), RunMode::Usage);
        assert_eq!(RunMode::from_args(report.clone(), None, None), RunMode::Usage);
        assert_eq!(RunMode::from_args(report.clone(), posts.clone(), None), RunMode::Repair {
            report: PathBuf::from("report.csv"),
            posts_dir: PathBuf::from("_posts"),
        });
        assert_eq!(RunMode::from_args(report, posts, Some("whatever".to_string())), RunMode::Redirects {
            posts_dir: PathBuf::from("_posts"),
        });
    }

    #[test]
    fn test_repair_end_to_end() -> io::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        create_blog(root)?;

        let mode = RunMode::Repair { report: root.join("report.csv"), posts_dir: root.to_path_buf() };
        let summary = run(&mode, &Config::default())?;
        assert_eq!(summary, RunSummary { renamed: 1, fixed: 1, redirects: 0 });

        assert!(!root.join("2021-05-01-foo.aspx.markdown").exists());
        let content = fs::read_to_string(root.join("2021-05-02-foo.aspx.markdown"))?;
        assert_eq!(content, "---\ntitle: Foo\ndate: 2021-05-02 -0800\n---\nBody\n");

        // Archived posts are the reference and stay as they are
        let archived = fs::read_to_string(root.join("archived").join("2021-05-01-foo.aspx.markdown"))?;
        assert_eq!(archived, "---\ndate: 2021-05-01 -0800\n---\n");

        // The archive still has the old date, so a second run trips over the renamed post
        let err = run(&mode, &Config::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Ok(())
    }

    #[test]
    fn test_repair_dry_run() -> io::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        create_blog(root)?;

        let mut config = Config::default();
        config.run.dry_run = true;
        let mode = RunMode::Repair { report: root.join("report.csv"), posts_dir: root.to_path_buf() };
        let summary = run(&mode, &config)?;
        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.fixed, 0);
        assert!(summary.repair_line(true).starts_with("Would rename 1 posts"));
        assert!(root.join("2021-05-01-foo.aspx.markdown").exists());
        assert!(!root.join("2021-05-02-foo.aspx.markdown").exists());
        Ok(())
    }

    #[test]
    fn test_redirects_mode() -> io::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        create_blog(root)?;

        let summary = run(&RunMode::Redirects { posts_dir: root.to_path_buf() }, &Config::default())?;
        assert_eq!(summary, RunSummary { renamed: 0, fixed: 0, redirects: 1 });

        let content = fs::read_to_string(root.join("redirects").join("2021-04-30-foo.aspx.markdown"))?;
        assert_eq!(content, "---\nlayout: redirect\ndate: 2021-04-30 -0800\nredirect: /archive/2021/05/01/foo.aspx/\n---\n");

        // The live post is not touched in this mode
        assert!(root.join("2021-05-01-foo.aspx.markdown").exists());
        Ok(())
    }

    #[test]
    fn test_missing_archive_fails() {
        let temp = tempdir().unwrap();
        let mode = RunMode::Redirects { posts_dir: temp.path().to_path_buf() };
        let err = run(&mode, &Config::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_summary_lines() {
        let summary = RunSummary { renamed: 2, fixed: 3, redirects: 4 };
        assert_eq!(summary.repair_line(false), "Renamed 2 posts, fixed 3 date headers");
        assert!(!summary.repair_line(true).contains("Renamed"));
        assert_eq!(summary.redirects_line(Path::new("_posts/redirects"), false), "Wrote 4 redirects into _posts/redirects");
        assert_eq!(summary.redirects_line(Path::new("_posts/redirects"), true), "Would write 4 redirects into _posts/redirects");
    }
}
