use std::process::Command;

use tracing::info;

use crate::error::{Result, SubError};

pub trait UrlOpener {
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Hands the URL to the desktop's default handler.
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        let mut cmd = opener_command(url);
        cmd.spawn()
            .map_err(|e| SubError::Browser(format!("{url}: {e}")))?;
        info!(url, "opened in browser");
        Ok(())
    }
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(start_args(url));
    cmd
}

/// `cmd /C start "" <url>` with cmd metacharacters caret-escaped. Spaces and
/// quotes are percent-encoded so the argument is never wrapped in quotes,
/// where carets would be taken literally.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn start_args(url: &str) -> [String; 4] {
    let mut escaped = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '&' | '|' | '^' | '<' | '>' | '(' | ')' => {
                escaped.push('^');
                escaped.push(ch);
            }
            ' ' => escaped.push_str("%20"),
            '"' => escaped.push_str("%22"),
            _ => escaped.push(ch),
        }
    }
    ["/C".into(), "start".into(), String::new(), escaped]
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_separators_survive_cmd() {
        let args = start_args("https://site.example/account?a=1&b=2");
        assert_eq!(args[..3], ["/C", "start", ""]);
        assert_eq!(args[3], "https://site.example/account?a=1^&b=2");
    }

    #[test]
    fn other_metacharacters_are_escaped() {
        let args = start_args("https://x.example/p?q=a|b^c<d>(e)");
        assert_eq!(args[3], "https://x.example/p?q=a^|b^^c^<d^>^(e^)");
        let args = start_args("https://x.example/a b\"c");
        assert_eq!(args[3], "https://x.example/a%20b%22c");
    }

    #[test]
    fn plain_url_is_untouched() {
        assert_eq!(start_args("https://example.com/")[3], "https://example.com/");
    }
}
