pub mod cache;

use super::builder::{report_action, BuildSystem};
use super::graph::BuildGraph;
use super::toolchain::ToolchainExecutor;
use anyhow::{Context, Result};
use cache::{BuildCache, CacheEntry, CacheManager};
use osdk_utils::logger::LogLevel;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

pub const CACHE_FILE_NAME: &str = "osdk-build.cache";

/// Engine-level compilation cache: a unit is recompiled only when its source,
/// flags, or transitive headers changed since the recorded build.
pub struct IncrementalBuilder<'a> {
    base: &'a BuildSystem,
    cache_path: PathBuf,
}

impl<'a> IncrementalBuilder<'a> {
    pub fn new(base: &'a BuildSystem) -> Result<Self> {
        let cache_path = base.config.object_output_dir.join(CACHE_FILE_NAME);
        Ok(Self { base, cache_path })
    }

    pub fn build(&self, jobs: Option<usize>, graph: &BuildGraph) -> Result<Vec<PathBuf>> {
        let old_cache = BuildCache::load_cache(&self.cache_path, true)?;
        let mut new_cache = BuildCache::default();

        let num_jobs = jobs.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        let pool = threadpool::ThreadPool::new(num_jobs);
        let (tx, rx) = mpsc::channel();
        let mut cache_updates: HashMap<String, (u64, u64)> = HashMap::new();

        for unit in &graph.units {
            if let Some(parent) = unit.object.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create '{}'", parent.display()))?;
            }

            let source_bytes = std::fs::read(&unit.source)
                .with_context(|| format!("Cannot read source '{}'", unit.source.display()))?;
            let source_hash = xxhash_rust::xxh3::xxh3_64(&source_bytes);

            let args = self.base.compile_args(&unit.source, &unit.object);
            let flags_hash = BuildCache::compute_flags_hash(&self.base.sdk_env.compiler, &args);

            let source_key = unit.source.to_string_lossy().to_string();
            let mut need_compile = true;

            if let Some(entry) = old_cache.entries.get(&source_key) {
                if entry.source_hash == source_hash
                    && entry.flags_hash == flags_hash
                    && Path::new(&entry.obj_path).exists()
                {
                    let dep_path = Path::new(&entry.obj_path).with_extension("d");
                    if dep_path.exists() {
                        match BuildCache::parse_dep_file(&dep_path)
                            .and_then(|deps| BuildCache::compute_deps_hash(&deps))
                        {
                            Ok(current_deps_hash) if entry.deps_hash == current_deps_hash => {
                                if self.base.logger.verbose {
                                    self.base.logger.log(
                                        LogLevel::Info,
                                        &format!("[CACHED] {}", unit.source.display()),
                                        2,
                                    );
                                }
                                need_compile = false;
                                new_cache.entries.insert(source_key.clone(), entry.clone());
                            }
                            _ => {}
                        }
                    }
                }
            }

            if !need_compile {
                tx.send((unit.source.clone(), Ok((unit.object.clone(), 0))))
                    .unwrap();
                continue;
            }

            cache_updates.insert(source_key, (source_hash, flags_hash));

            let tx = tx.clone();
            let compiler = self.base.sdk_env.compiler.clone();
            let source = unit.source.clone();
            let object = unit.object.clone();
            let lib_output_name = self.base.config.lib_output_name.clone();
            let logger = self.base.logger.clone();

            pool.execute(move || {
                report_action(&logger, &lib_output_name, &object);
                let result = <BuildSystem as ToolchainExecutor>::compile_with_args(
                    &compiler, &args, &source, &object, true, &logger,
                );
                tx.send((source, result)).unwrap();
            });
        }

        drop(tx);
        let mut had_errors = false;
        for (source, result) in rx.iter() {
            match result {
                Ok((obj_path, deps_hash)) => {
                    let source_key = source.to_string_lossy().to_string();
                    if let Some((source_hash, flags_hash)) = cache_updates.get(&source_key) {
                        new_cache.entries.insert(
                            source_key,
                            CacheEntry {
                                source_hash: *source_hash,
                                flags_hash: *flags_hash,
                                deps_hash,
                                obj_path: obj_path.to_string_lossy().to_string(),
                            },
                        );
                    }
                }
                Err(_) => had_errors = true,
            }
        }

        if had_errors {
            anyhow::bail!("Compilation failed.");
        }

        BuildCache::save_cache(&self.cache_path, &new_cache)?;

        Ok(graph.units.iter().map(|u| u.object.clone()).collect())
    }
}
