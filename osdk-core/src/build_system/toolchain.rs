use super::incremental::cache::{BuildCache, CacheManager};
use super::BuildSystem;
use anyhow::Result;
use osdk_utils::logger::{LogLevel, Logger};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub trait ToolchainExecutor {
    fn compile_with_args(
        compiler: &Path,
        args: &[OsString],
        source: &Path,
        output: &Path,
        incremental: bool,
        logger: &Logger,
    ) -> Result<(PathBuf, u64)>;
    fn archive_objects(&self, objects: &[PathBuf], output: &Path) -> Result<()>;
}

impl ToolchainExecutor for BuildSystem {
    fn compile_with_args(
        compiler: &Path,
        args: &[OsString],
        source: &Path,
        output: &Path,
        incremental: bool,
        logger: &Logger,
    ) -> Result<(PathBuf, u64)> {
        let mut cmd = Command::new(compiler);
        cmd.args(args);

        cmd.stderr(Stdio::piped());
        cmd.stdout(Stdio::piped());

        let output_res = cmd.output()?;

        if !output_res.status.success() {
            let stdout_output = String::from_utf8_lossy(&output_res.stdout);
            let stderr_output = String::from_utf8_lossy(&output_res.stderr);
            logger.log(
                LogLevel::Error,
                &format!(
                    "Compiler error for {}:\n{} {}",
                    source.display(),
                    stdout_output,
                    stderr_output
                ),
                0,
            );
            anyhow::bail!("Compiler error for {}", source.display());
        } else if logger.verbose {
            let stdout_output = String::from_utf8_lossy(&output_res.stdout);
            let stderr_output = String::from_utf8_lossy(&output_res.stderr);
            if !stdout_output.is_empty() {
                logger.log(
                    LogLevel::Dim,
                    &format!("Compiler stdout for {}:", source.display()),
                    2,
                );
                logger.log(LogLevel::Info, &stdout_output, 2);
            }
            if !stderr_output.is_empty() {
                logger.log(
                    LogLevel::Dim,
                    &format!("Compiler stderr for {}:", source.display()),
                    2,
                );
                logger.log(LogLevel::Info, &stderr_output, 2);
            }
        }

        let deps_hash = if incremental {
            BuildCache::parse_dep_file(&output.with_extension("d"))
                .and_then(|deps| BuildCache::compute_deps_hash(&deps))
                .unwrap_or(0)
        } else {
            0
        };
        Ok((output.to_path_buf(), deps_hash))
    }

    fn archive_objects(&self, objects: &[PathBuf], output: &Path) -> Result<()> {
        self.report_action(output);

        let mut cmd = Command::new(&self.sdk_env.archiver);
        self.sdk_env.archiver_flags.iter().for_each(|f| {
            cmd.arg(f);
        });
        cmd.arg(output);
        objects.iter().for_each(|o| {
            cmd.arg(o);
        });

        cmd.stderr(Stdio::piped());
        cmd.stdout(Stdio::piped());

        let output_res = cmd.output()?;
        if !output_res.status.success() {
            let stdout_output = String::from_utf8_lossy(&output_res.stdout);
            let stderr_output = String::from_utf8_lossy(&output_res.stderr);
            self.logger.log(
                LogLevel::Error,
                &format!("Archiving failed:\n{} {}", stdout_output, stderr_output),
                0,
            );
            anyhow::bail!("Archiving failed:\n{} {}", stdout_output, stderr_output);
        } else if self.logger.verbose {
            let stdout_output = String::from_utf8_lossy(&output_res.stdout);
            let stderr_output = String::from_utf8_lossy(&output_res.stderr);
            if !stdout_output.is_empty() {
                self.logger.log(LogLevel::Dim, "Archiver stdout:", 2);
                self.logger.log(LogLevel::Info, &stdout_output, 2);
            }
            if !stderr_output.is_empty() {
                self.logger.log(LogLevel::Dim, "Archiver stderr:", 2);
                self.logger.log(LogLevel::Info, &stderr_output, 2);
            }
        }
        Ok(())
    }
}
