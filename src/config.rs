use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

pub const CFG_FILE_NAME: &str = "permafix.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Layout {
    pub archived_dir: String,
    pub redirects_dir: String,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            archived_dir: "archived".to_string(),
            redirects_dir: "redirects".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Report {
    /// Report rows dated this year or earlier are placeholders and get ignored
    pub min_year: i32,
}

impl Default for Report {
    fn default() -> Self {
        Report { min_year: 2000 }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Run {
    pub wait_for_enter: bool,
    pub dry_run: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub layout: Layout,
    pub report: Report,
    pub run: Run,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
    Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if let Some(mut log) = cfg.log.take() {
        log.location = log.location.map(parse_path).transpose()?;
        cfg.log = Some(log);
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

/// Looks for the configuration next to the executable, then in the current directory,
/// then in the user configuration directory.
pub fn find_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir().map(|p| p.join("permafix"));

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// Reads the given configuration, or the first one found. Defaults are used when there is none.
pub fn open_config(cfg_path: Option<PathBuf>) -> io::Result<(Config, Option<PathBuf>)> {
    match cfg_path.or_else(find_config_path) {
        Some(path) => Ok((read_config(&path)?, Some(path))),
        None => Ok((Config::default(), None)),
    }
}
