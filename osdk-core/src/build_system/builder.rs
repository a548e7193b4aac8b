use super::graph::{BuildGraph, CompileUnit};
use super::incremental::IncrementalBuilder;
use super::toolchain::ToolchainExecutor;
use crate::config::{BuildConfig, ToolchainConfig};
use crate::flags;
use crate::source_set::SourceSet;
use anyhow::{Context, Result};
use osdk_utils::{Environment, Logger};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

/// Drives one run: compose the source set, compile every unit, then archive.
pub struct BuildSystem {
    pub config: BuildConfig,
    pub toolchain: ToolchainConfig,
    /// Derived environment carrying the composed SDK flag set.
    pub sdk_env: ToolchainConfig,
    pub incremental: bool,
    pub logger: Logger,
}

impl BuildSystem {
    pub fn new(config: BuildConfig, incremental: bool, logger: Logger) -> Result<Self> {
        let toolchain = ToolchainConfig::cross(&config.compiler_path)?;
        if !Environment::is_executable(&toolchain.compiler) {
            logger.warn(&format!(
                "Cross compiler not found at '{}'",
                toolchain.compiler.display()
            ));
        }

        let sdk_env = toolchain.with_cflags(
            flags::sdk_cflags(&config),
            flags::sdk_include_dirs(&config),
        );

        Ok(Self {
            config,
            toolchain,
            sdk_env,
            incremental,
            logger,
        })
    }

    /// Runs the full pipeline and returns the archive path.
    ///
    /// The archive step is a post-action on the whole object set: a failing
    /// unit fails the run before the archiver is ever invoked.
    pub fn build(&self, jobs: Option<usize>) -> Result<PathBuf> {
        let sources = SourceSet::compose(&self.config, &self.logger)?;
        let graph = BuildGraph::plan(&self.config, &sources)?;

        self.logger.bold(&format!(
            "Building `{}` ({} compilation units)...",
            self.config.lib_output_name,
            graph.units.len()
        ));

        let objects = if self.incremental {
            IncrementalBuilder::new(self)?.build(jobs, &graph)?
        } else {
            self.compile_units(jobs, &graph.units)?
        };

        self.archive_objects(&objects, &graph.archive)?;
        self.logger.success("Build successful!");
        Ok(graph.archive)
    }

    /// Compiles every unit on a worker pool and returns the objects in graph
    /// order. Any unit failure fails the whole set after in-flight work
    /// drains.
    fn compile_units(&self, jobs: Option<usize>, units: &[CompileUnit]) -> Result<Vec<PathBuf>> {
        let num_jobs = jobs.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        let pool = threadpool::ThreadPool::new(num_jobs);
        let (tx, rx) = mpsc::channel();

        for unit in units {
            if let Some(parent) = unit.object.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create '{}'", parent.display()))?;
            }

            let tx = tx.clone();
            let compiler = self.sdk_env.compiler.clone();
            let args = self.compile_args(&unit.source, &unit.object);
            let source = unit.source.clone();
            let object = unit.object.clone();
            let lib_output_name = self.config.lib_output_name.clone();
            let logger = self.logger.clone();

            pool.execute(move || {
                report_action(&logger, &lib_output_name, &object);
                let result = <BuildSystem as ToolchainExecutor>::compile_with_args(
                    &compiler, &args, &source, &object, false, &logger,
                );
                tx.send((source, result)).unwrap();
            });
        }

        drop(tx);
        let mut had_errors = false;
        for (_, result) in rx.iter() {
            if result.is_err() {
                had_errors = true;
            }
        }

        if had_errors {
            anyhow::bail!("Compilation failed.");
        }

        Ok(units.iter().map(|u| u.object.clone()).collect())
    }

    /// Argument list for one unit: `-o <target> -c <cflags> <source>`.
    pub(crate) fn compile_args(&self, source: &Path, object: &Path) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("-o"),
            object.as_os_str().to_os_string(),
            OsString::from("-c"),
        ];
        args.extend(self.sdk_env.cflags.iter().cloned());
        for dir in &self.sdk_env.include_dirs {
            args.push(format!("-I{}", dir.display()).into());
        }
        if self.incremental {
            args.push("-MMD".into());
            args.push("-MF".into());
            args.push(object.with_extension("d").into_os_string());
        }
        args.push(source.as_os_str().to_os_string());
        args
    }

    pub(crate) fn report_action(&self, target: &Path) {
        report_action(&self.logger, &self.config.lib_output_name, target);
    }
}

/// One progress line per build action: `AR` when the target is the configured
/// archive, `CC` otherwise.
pub(crate) fn report_action(logger: &Logger, lib_output_name: &str, target: &Path) {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name == lib_output_name {
        logger.info(&format!("AR {}...", name));
    } else {
        logger.info(&format!("CC {}...", name));
    }
}
