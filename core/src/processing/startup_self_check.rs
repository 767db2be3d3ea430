use std::process::Stdio;

use camino::Utf8Path as Path;
use tokio::process::Command;

use crate::{config::BinPaths, util::OptionPathExt};

pub async fn run_self_check(bin_paths: &BinPaths) -> Result<(), ()> {
    let ffprobe_bin_path: Option<&Path> = bin_paths.ffprobe.as_opt_path();
    check_can_run_ffprobe(ffprobe_bin_path).await?;
    Ok(())
}

async fn check_can_run_ffprobe(ffprobe_bin_path: Option<&Path>) -> Result<(), ()> {
    let spawn_result = Command::new(ffprobe_bin_path.map(|p| p.as_str()).unwrap_or("ffprobe"))
        .arg("-version")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();
    let ffprobe = match spawn_result {
        Ok(c) => c,
        Err(err) => match err.kind() {
            std::io::ErrorKind::NotFound => {
                tracing::error!("Could not find ffprobe. Is it installed?");
                return Err(());
            }
            _kind => {
                tracing::error!("Error running ffprobe: {}", err);
                return Err(());
            }
        },
    };
    let output = match ffprobe.wait_with_output().await {
        Ok(o) => o,
        Err(err) => {
            tracing::error!(
                "ffprobe test failed, error waiting for ffprobe process: {}",
                err
            );
            return Err(());
        }
    };
    if !output.status.success() {
        tracing::error!(
            "ffprobe test failed, error running ffprobe:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
        return Err(());
    }
    tracing::debug!(
        "ok: can run {}",
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("ffprobe")
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use camino::Utf8PathBuf as PathBuf;
    use claims::assert_err;

    use super::*;

    #[tokio::test]
    async fn missing_ffprobe_fails_self_check() {
        let bin_paths = BinPaths {
            ffprobe: Some(PathBuf::from("/nonexistent/bin/ffprobe")),
        };
        assert_err!(run_self_check(&bin_paths).await);
    }
}
