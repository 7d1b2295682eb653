use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use ramhorns::Template;
use spdlog::info;

use crate::post_index::PostIndex;
use crate::post_info::PostInfo;

const REDIRECT_TEMPLATE: &str = "---
layout: redirect
{{{date_line}}}
redirect: {{{target_url}}}
---
";

#[derive(ramhorns::Content)]
struct RedirectItem<'a> {
    date_line: &'a str,
    target_url: &'a str,
}

/// A redirect stub living at `from`'s file name and pointing to `target`'s URL.
#[derive(Debug, PartialEq)]
pub struct Redirect {
    pub from: PostInfo,
    pub target: PostInfo,
}

impl Redirect {
    /// Redirect from the day before the post, where the old platform used to publish it.
    pub fn to_post(target: &PostInfo) -> io::Result<Redirect> {
        Ok(Redirect {
            from: target.previous_day()?,
            target: target.clone(),
        })
    }
}

pub struct RedirectRenderer<'a> {
    pub template: Template<'a>,
}

impl RedirectRenderer<'static> {
    pub fn new() -> io::Result<Self> {
        let template = match Template::new(REDIRECT_TEMPLATE) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing redirect template: {}", e)));
            }
        };

        Ok(RedirectRenderer {
            template,
        })
    }
}

impl RedirectRenderer<'_> {
    pub fn render(&self, redirect: &Redirect) -> String {
        let date_line = redirect.from.date_line();
        let target_url = redirect.target.url();
        let mut rendered = self.template.render(&RedirectItem {
            date_line: date_line.as_str(),
            target_url: target_url.as_str(),
        });

        // ramhorns trims the newline closing the front matter
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        rendered
    }
}

/// Writes one redirect file per indexed post into `redirects_dir`, overwriting existing ones.
/// The directory must exist.
pub fn write_redirects(redirects_dir: &Path, index: &PostIndex, dry_run: bool) -> io::Result<usize> {
    let renderer = RedirectRenderer::new()?;
    let mut count = 0;

    for post in index.iter() {
        let redirect = Redirect::to_post(post)?;
        let path = redirects_dir.join(redirect.from.file_name());
        let content = renderer.render(&redirect);

        if dry_run {
            info!("Would write redirect {} -> {}", path.display(), redirect.target.url());
        } else {
            fs::write(&path, content).map_err(|e| {
                io::Error::new(e.kind(), format!("Error writing redirect {}: {}", path.display(), e))
            })?;
        }
        count += 1;
    }

    Ok(count)
}
