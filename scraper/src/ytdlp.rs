use std::ffi::OsStr;
use std::process::{Command, Stdio};

use crate::config::CollectorConfig;

#[derive(Debug)]
pub struct YtDlp {
    cmd: Command,
}

impl YtDlp {
    pub fn cmd(self) -> Command {
        self.cmd
    }

    pub fn arg(&mut self, arg: &str) -> &mut YtDlp {
        self.cmd.arg(arg);
        self
    }

    pub fn args<Iter, Str>(&mut self, args: Iter) -> &mut YtDlp
    where
        Iter: IntoIterator<Item = Str>,
        Str: AsRef<OsStr>,
    {
        self.cmd.args(args);
        self
    }

    /// One JSON object per video on stdout
    pub fn dump_json(&mut self) -> &mut YtDlp {
        self.arg("--dump-json")
    }

    pub fn playlist_end(&mut self, max_items: usize) -> &mut YtDlp {
        self.args(["--playlist-end", &max_items.to_string()])
    }

    pub fn no_download(&mut self) -> &mut YtDlp {
        self.arg("--no-download")
    }

    pub fn no_warnings(&mut self) -> &mut YtDlp {
        self.arg("--no-warnings")
    }

    /// Page to list; a profile URL makes yt-dlp treat it as a playlist
    pub fn url(&mut self, url: &str) -> &mut YtDlp {
        self.arg(url)
    }
}

pub fn create_ytdlp_command(program: &str) -> YtDlp {
    let mut cmd = Command::new(program);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    YtDlp { cmd }
}

/// The metadata-only listing of a profile's most recent videos.
pub fn profile_listing_command(config: &CollectorConfig) -> YtDlp {
    let mut ytdlp = create_ytdlp_command(&config.program);
    ytdlp
        .dump_json()
        .playlist_end(config.max_items)
        .no_download()
        .no_warnings()
        .url(&config.profile_url());
    ytdlp
}

/// Shell-like rendering of a command for diagnostics.
pub fn command_line(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_profile_listing_arguments() {
        let mut config = CollectorConfig::new("someone");
        config.max_items = 7;
        let cmd = profile_listing_command(&config).cmd();

        assert_eq!(cmd.get_program(), "yt-dlp");
        assert_eq!(
            args_of(&cmd),
            vec![
                "--dump-json",
                "--playlist-end",
                "7",
                "--no-download",
                "--no-warnings",
                "https://www.tiktok.com/@someone",
            ]
        );
    }

    #[test]
    fn test_command_line() {
        let cmd = profile_listing_command(&CollectorConfig::new("someone")).cmd();
        assert_eq!(
            command_line(&cmd),
            "yt-dlp --dump-json --playlist-end 10 --no-download --no-warnings https://www.tiktok.com/@someone"
        );
    }

    #[test]
    fn test_custom_program() {
        let mut config = CollectorConfig::default();
        config.program = "/opt/bin/yt-dlp".to_string();
        let cmd = profile_listing_command(&config).cmd();
        assert_eq!(cmd.get_program(), "/opt/bin/yt-dlp");
    }
}
