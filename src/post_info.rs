use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::Path;
use std::{fmt, io};

use chrono::{Datelike, Days, NaiveDate};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref FILE_NAME_REGEX: Regex = Regex::new(
        r"(?i)(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})-(?P<slug>.*?)\.aspx\.markdown"
    ).unwrap();
    static ref URL_REGEX: Regex = Regex::new(
        r"(?i).*?/archive/(?P<year>[0-9]{4})/(?P<month>[0-9]{2})/(?P<day>[0-9]{2})/(?P<slug>.*?)\.aspx"
    ).unwrap();
    static ref DATE_LINE_REGEX: Regex = Regex::new(
        r"(?i)^date: (?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2}) -0800\s*$"
    ).unwrap();
}

/// Date triple as it appears in file names, URLs and the `date:` header.
/// It is not guaranteed to be a valid calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl PostDate {
    /// Parses a `date: YYYY-MM-DD -0800` header line.
    pub fn from_date_line(line: &str) -> Option<PostDate> {
        DATE_LINE_REGEX.captures(line).and_then(|cap| Self::from_captures(&cap))
    }

    fn from_captures(cap: &Captures) -> Option<PostDate> {
        let year = cap.name("year")?.as_str().parse::<i32>().ok()?;
        let month = cap.name("month")?.as_str().parse::<u32>().ok()?;
        let day = cap.name("day")?.as_str().parse::<u32>().ok()?;
        Some(PostDate { year, month, day })
    }

    pub fn as_date(&self) -> io::Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            io::Error::new(ErrorKind::InvalidData, format!("Invalid post date {}", self))
        })
    }

    pub fn date_line(&self) -> String {
        format!("date: {} -0800", self)
    }
}

impl Display for PostDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for PostDate {
    fn from(date: NaiveDate) -> Self {
        PostDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// A post as addressed by the old platform: a date plus a slug.
///
/// Example of the three forms of the same post
/// 2021-05-02-hello-world.aspx.markdown
/// /archive/2021/05/02/hello-world.aspx/
/// date: 2021-05-02 -0800
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInfo {
    pub date: PostDate,
    pub slug: String,
}

impl PostInfo {
    pub fn new(year: i32, month: u32, day: u32, slug: &str) -> PostInfo {
        PostInfo {
            date: PostDate { year, month, day },
            slug: slug.to_string(),
        }
    }

    pub fn from_file_name(path: &Path) -> Option<PostInfo> {
        let file_name = path.file_name()?.to_str()?;
        Self::parse(&FILE_NAME_REGEX, file_name)
    }

    /// Parses the first field of a report row. Anything after the first comma is ignored.
    pub fn from_url(row: &str) -> Option<PostInfo> {
        let url = row.split(',').next().unwrap_or_default();
        Self::parse(&URL_REGEX, url)
    }

    fn parse(regex: &Regex, text: &str) -> Option<PostInfo> {
        let cap = regex.captures(text)?;
        let date = PostDate::from_captures(&cap)?;
        let slug = cap.name("slug")?.as_str().to_string();
        Some(PostInfo { date, slug })
    }

    /// Slug used for lookups, slugs are compared ignoring case.
    pub fn slug_key(&self) -> String {
        self.slug.to_lowercase()
    }

    pub fn as_date(&self) -> io::Result<NaiveDate> {
        self.date.as_date()
    }

    pub fn previous_day(&self) -> io::Result<PostInfo> {
        let date = self.as_date()?;
        let previous = date.checked_sub_days(Days::new(1)).ok_or_else(|| {
            io::Error::new(ErrorKind::InvalidData, format!("No day before {} for {}", date, self.slug))
        })?;

        Ok(PostInfo {
            date: previous.into(),
            slug: self.slug.clone(),
        })
    }

    pub fn matches_date(&self, other: &PostDate) -> bool {
        self.date == *other
    }

    pub fn date_line(&self) -> String {
        self.date.date_line()
    }

    pub fn file_name(&self) -> String {
        format!("{}-{}.aspx.markdown", self.date, self.slug)
    }

    pub fn url(&self) -> String {
        format!("/archive/{}/{:02}/{:02}/{}.aspx/",
                self.date.year,
                self.date.month,
                self.date.day,
                self.slug
        )
    }
}

impl Display for PostInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.slug, self.date)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_from_file_name() {
        let path = PathBuf::from("_posts/archived/2021-05-01-foo.aspx.markdown");
        let post = PostInfo::from_file_name(&path).unwrap();
        assert_eq!(post, PostInfo::new(2021, 5, 1, "foo"));

        let path = PathBuf::from("2009-11-23-Some-Title.ASPX.Markdown");
        let post = PostInfo::from_file_name(&path).unwrap();
        assert_eq!(post, PostInfo::new(2009, 11, 23, "Some-Title"));

        assert!(PostInfo::from_file_name(&PathBuf::from("2021-05-01-foo.md")).is_none());
        assert!(PostInfo::from_file_name(&PathBuf::from("21-05-01-foo.aspx.markdown")).is_none());
        assert!(PostInfo::from_file_name(&PathBuf::from("README")).is_none());
    }

    #[test]
    fn test_file_name_round_trip() {
        let posts = [
            PostInfo::new(2021, 5, 1, "foo"),
            PostInfo::new(2004, 12, 31, "a-longer-slug.with.dots"),
            PostInfo::new(2020, 2, 29, "Mixed-Case"),
        ];
        for post in posts {
            let parsed = PostInfo::from_file_name(&PathBuf::from(post.file_name()));
            assert_eq!(parsed, Some(post));
        }
    }

    #[test]
    fn test_from_url() {
        let post = PostInfo::from_url("https://old/archive/2021/05/02/foo.aspx").unwrap();
        assert_eq!(post, PostInfo::new(2021, 5, 2, "foo"));

        let row = "http://haacked.com/Archive/2008/03/14/Some-Post.aspx,404,2 Jan 2014";
        let post = PostInfo::from_url(row).unwrap();
        assert_eq!(post, PostInfo::new(2008, 3, 14, "Some-Post"));

        let post = PostInfo::from_url("/archive/2010/01/09/relative.aspx/").unwrap();
        assert_eq!(post.slug, "relative");

        // The comma cuts the row before the suffix
        assert!(PostInfo::from_url("/archive/2010/01/09/a,b.aspx").is_none());
        assert!(PostInfo::from_url("https://old/tags/foo.aspx").is_none());
    }

    #[test]
    fn test_from_date_line() {
        assert_eq!(PostDate::from_date_line("date: 2021-05-01 -0800"),
                   Some(PostDate { year: 2021, month: 5, day: 1 }));
        assert_eq!(PostDate::from_date_line("Date: 2021-05-01 -0800  \t"),
                   Some(PostDate { year: 2021, month: 5, day: 1 }));
        assert!(PostDate::from_date_line(" date: 2021-05-01 -0800").is_none());
        assert!(PostDate::from_date_line("date: 2021-05-01 -0700").is_none());
        assert!(PostDate::from_date_line("date: 2021-05-01 -0800 x").is_none());
        assert!(PostDate::from_date_line("title: hello").is_none());
    }

    #[test]
    fn test_rendering() {
        let post = PostInfo::new(2021, 5, 2, "foo");
        assert_eq!(post.file_name(), "2021-05-02-foo.aspx.markdown");
        assert_eq!(post.url(), "/archive/2021/05/02/foo.aspx/");
        assert_eq!(post.date_line(), "date: 2021-05-02 -0800");
        assert_eq!(post.file_name(), post.clone().file_name());
    }

    #[test]
    fn test_previous_day() {
        let prev = PostInfo::new(2021, 3, 1, "x").previous_day().unwrap();
        assert_eq!(prev, PostInfo::new(2021, 2, 28, "x"));

        let prev = PostInfo::new(2021, 1, 1, "x").previous_day().unwrap();
        assert_eq!(prev, PostInfo::new(2020, 12, 31, "x"));

        let prev = PostInfo::new(2020, 3, 1, "x").previous_day().unwrap();
        assert_eq!(prev, PostInfo::new(2020, 2, 29, "x"));

        let prev = PostInfo::new(2021, 5, 10, "x").previous_day().unwrap();
        assert_eq!(prev, PostInfo::new(2021, 5, 9, "x"));
    }

    #[test]
    fn test_invalid_date() {
        let post = PostInfo::new(2021, 4, 31, "x");
        let err = post.previous_day().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(post.as_date().is_err());
    }

    #[test]
    fn test_matches_date() {
        let post = PostInfo::new(2021, 5, 2, "foo");
        assert!(post.matches_date(&PostDate { year: 2021, month: 5, day: 2 }));
        assert!(!post.matches_date(&PostDate { year: 2021, month: 5, day: 1 }));
    }
}
