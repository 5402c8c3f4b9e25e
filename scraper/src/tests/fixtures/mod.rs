use std::fs;
use std::path::{Path, PathBuf};

pub fn fixture_path(fixture_name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src/tests/fixtures")
        .join(format!("{}.jsonl", fixture_name))
}

/// Load recorded yt-dlp `--dump-json` output by name
pub fn load_jsonl_fixture(fixture_name: &str) -> String {
    fs::read_to_string(fixture_path(fixture_name))
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Writes an executable shell script standing in for yt-dlp.
///
/// The script records its arguments, one per line, to `args.txt` next to
/// itself and then runs `body`.
#[cfg(unix)]
pub fn fake_ytdlp(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script_path = dir.join("fake-yt-dlp");
    let args_path = dir.join("args.txt");
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\n{}\n",
        args_path.display(),
        body
    );
    fs::write(&script_path, script).expect("Failed to write fake yt-dlp");
    fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake yt-dlp executable");
    script_path
}

/// A fake yt-dlp that prints a fixture to stdout and exits successfully
#[cfg(unix)]
pub fn fake_ytdlp_printing(dir: &Path, fixture_name: &str) -> PathBuf {
    fake_ytdlp(dir, &format!("cat '{}'", fixture_path(fixture_name).display()))
}
