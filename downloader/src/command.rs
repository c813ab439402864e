//! yt-dlp invocations.
//!
//! Each action maps to a fixed argument list; the cookies file is always
//! passed first.

use std::fmt;
use std::path::{Path, PathBuf};

/// What to ask the tool for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolAction {
    /// Metadata dump as a single JSON document (`-j`).
    Info { url: String },
    /// Resolve a direct media URL for a format (`-g`).
    DirectUrl { url: String, format: String },
    /// Download to an explicit output path.
    Download { url: String, format: String, output: PathBuf },
}

impl ToolAction {
    pub fn info(url: impl Into<String>) -> Self {
        ToolAction::Info { url: url.into() }
    }

    pub fn direct_url(url: impl Into<String>, format: impl Into<String>) -> Self {
        ToolAction::DirectUrl {
            url: url.into(),
            format: format.into(),
        }
    }

    pub fn download(url: impl Into<String>, format: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        ToolAction::Download {
            url: url.into(),
            format: format.into(),
            output: output.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ToolAction::Info { url }
            | ToolAction::DirectUrl { url, .. }
            | ToolAction::Download { url, .. } => url,
        }
    }

    /// Full argument list, cookies included.
    pub fn args(&self, cookies_path: &Path) -> Vec<String> {
        let mut args = vec![
            "--cookies".to_string(),
            cookies_path.to_string_lossy().into_owned(),
        ];
        match self {
            ToolAction::Info { url } => {
                args.push("-j".to_string());
                args.push(url.clone());
            }
            ToolAction::DirectUrl { url, format } => {
                args.extend(["-f".to_string(), format.clone(), "-g".to_string(), url.clone()]);
            }
            ToolAction::Download { url, format, output } => {
                args.extend([
                    "-f".to_string(),
                    format.clone(),
                    "-o".to_string(),
                    output.to_string_lossy().into_owned(),
                    url.clone(),
                ]);
            }
        }
        args
    }
}

impl fmt::Display for ToolAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolAction::Info { .. } => "info",
            ToolAction::DirectUrl { .. } => "direct_url",
            ToolAction::Download { .. } => "download",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOKIES: &str = "/app/cookies.txt";

    #[test]
    fn test_info_args() {
        let args = ToolAction::info("https://youtu.be/abc").args(Path::new(COOKIES));
        assert_eq!(args, ["--cookies", COOKIES, "-j", "https://youtu.be/abc"]);
    }

    #[test]
    fn test_direct_url_args() {
        let args = ToolAction::direct_url("https://youtu.be/abc", "bestaudio").args(Path::new(COOKIES));
        assert_eq!(
            args,
            ["--cookies", COOKIES, "-f", "bestaudio", "-g", "https://youtu.be/abc"]
        );
    }

    #[test]
    fn test_download_args() {
        let action = ToolAction::download("https://youtu.be/abc", "best", "/tmp/videos/a.mp4");
        assert_eq!(
            action.args(Path::new(COOKIES)),
            ["--cookies", COOKIES, "-f", "best", "-o", "/tmp/videos/a.mp4", "https://youtu.be/abc"]
        );
        assert_eq!(action.url(), "https://youtu.be/abc");
        assert_eq!(action.to_string(), "download");
    }
}
