use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::{NamedTempFile, TempDir};

/// Write a config file with the given TOML body
fn config_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create config file");
    file.write_all(body.as_bytes())
        .expect("Failed to write config file");
    file
}

/// Run the binary in `cwd` and wait for it
async fn run_cli(cwd: &Path, args: &[&str], envs: &[(&str, &Path)]) -> Output {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_yt2mp3"));
    command
        .args(args)
        .current_dir(cwd)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .env_remove("YT2MP3_CONFIG")
        .kill_on_drop(true);
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().await.expect("Failed to run yt2mp3")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[tokio::test]
async fn test_missing_url_exits_with_usage_error() {
    let cwd = TempDir::new().unwrap();
    let output = run_cli(cwd.path(), &[], &[]).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_missing_config_file_fails() {
    let cwd = TempDir::new().unwrap();
    let output = run_cli(
        cwd.path(),
        &["--config", "/nonexistent/yt2mp3.toml", "https://youtu.be/x"],
        &[],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration file not found"));
}

#[tokio::test]
async fn test_invalid_config_fails() {
    let cwd = TempDir::new().unwrap();
    let config = config_file("[tagger]\ncomment_lang = \"english\"\n");
    let output = run_cli(cwd.path(), &["https://youtu.be/x"], &[("YT2MP3_CONFIG", config.path())]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("comment_lang"));
}

#[tokio::test]
async fn test_missing_downloader_fails() {
    let cwd = TempDir::new().unwrap();
    let config = config_file("[fetcher]\nytdlp_path = \"/nonexistent/yt-dlp\"\n");
    let output = run_cli(
        cwd.path(),
        &["-c", config.path().to_str().unwrap(), "https://youtu.be/x"],
        &[],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Downloader"));
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
mod fake_downloader {
    use super::*;

    /// A yt-dlp stand-in that writes one file into its `--paths` directory
    /// and touches `marker` when asked to download.
    fn fake_ytdlp(dir: &Path, marker: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = format!(
            r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "2024.01.01"
  exit 0
fi
touch "{marker}"
dir=""
while [ $# -gt 0 ]; do
  case "$1" in
    --paths) dir="$2"; shift 2 ;;
    *) shift ;;
  esac
done
printf 'audio-bytes' > "$dir/My Song?.mp3"
echo '{{"title": "My Song?", "channel": "Some Channel"}}'
"#,
            marker = marker.display()
        );

        let path = dir.join("fake-yt-dlp");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    struct Fixture {
        bin: TempDir,
        cwd: TempDir,
        staging: TempDir,
        config: NamedTempFile,
    }

    impl Fixture {
        fn new() -> Self {
            let bin = TempDir::new().unwrap();
            let cwd = TempDir::new().unwrap();
            let staging = TempDir::new().unwrap();
            let script = fake_ytdlp(bin.path(), &bin.path().join("called"));
            let config = config_file(&format!(
                "[fetcher]\nytdlp_path = \"{}\"\n",
                script.display()
            ));
            Self {
                bin,
                cwd,
                staging,
                config,
            }
        }

        fn downloader_called(&self) -> bool {
            self.bin.path().join("called").exists()
        }

        fn staging_is_empty(&self) -> bool {
            std::fs::read_dir(self.staging.path()).unwrap().next().is_none()
        }

        async fn run(&self, args: &[&str]) -> Output {
            run_cli(
                self.cwd.path(),
                args,
                &[
                    ("YT2MP3_CONFIG", self.config.path()),
                    ("YT2MP3_PIPELINE__STAGING_PARENT", self.staging.path()),
                ],
            )
            .await
        }
    }

    #[tokio::test]
    async fn test_publishes_into_output_dir() {
        let fixture = Fixture::new();
        let output = fixture.run(&["-o", "music", "https://youtu.be/x"]).await;

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        let printed = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let expected = fixture.cwd.path().join("music").join("My Song_.mp3");
        assert_eq!(
            std::fs::canonicalize(&printed).unwrap(),
            std::fs::canonicalize(&expected).unwrap()
        );

        let bytes = std::fs::read(&expected).unwrap();
        assert_eq!(&bytes[..4], b"ID3\x03");
        assert!(bytes.ends_with(b"audio-bytes"));
        assert!(fixture.staging_is_empty());
    }

    #[tokio::test]
    async fn test_escaping_output_dir_fails_without_download() {
        let fixture = Fixture::new();
        let output = fixture
            .run(&["--output-dir", "../outside", "https://youtu.be/x"])
            .await;

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("outside of"));
        assert!(!fixture.downloader_called());
        assert!(!fixture.cwd.path().join("../outside").exists());
        assert!(fixture.staging_is_empty());
    }
}
