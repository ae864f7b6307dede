//! Row navigation: build the tokensets.com link for a row and open it

use {
    super::state::TabKey,
    std::process::{Command, Stdio},
};

pub const TOKENSETS_SITE: &str = "https://www.tokensets.com";

/// `https://www.tokensets.com/{portfolio|set}/{id}`
pub fn row_url(key: TabKey, id: &str) -> String {
    format!("{}/{}/{}", TOKENSETS_SITE, key.url_segment(), id)
}

/// Open `url` in the default browser without waiting for it
pub fn open_url(url: &str) -> std::io::Result<()> {
    // The opener must not write into the TUI's screen
    browser_command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
