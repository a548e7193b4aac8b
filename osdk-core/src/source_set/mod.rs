mod components;

pub use components::COMPONENTS;

use crate::config::BuildConfig;
use crate::utils;
use anyhow::Result;
use osdk_utils::Logger;
use std::path::PathBuf;

/// One library component contributing sources to the archive.
///
/// `files` are fixed relative paths known in advance; `patterns` are expanded
/// against the SDK source tree at composition time. A disabled component is
/// skipped outright.
#[derive(Debug)]
pub struct Component {
    pub name: &'static str,
    pub files: &'static [&'static str],
    pub patterns: &'static [&'static str],
    pub enabled: bool,
}

/// The ordered list of compilation units accumulated across all components.
#[derive(Debug, Default)]
pub struct SourceSet {
    pub sources: Vec<PathBuf>,
}

impl SourceSet {
    /// Collects every component's sources under `<open-sdk>/src`.
    ///
    /// An enabled component whose pattern matches nothing, or whose listed
    /// file is absent from this SDK drop, gets a warning and the run
    /// continues; only the compiler itself can fail a unit later.
    pub fn compose(config: &BuildConfig, logger: &Logger) -> Result<SourceSet> {
        Self::compose_components(config, COMPONENTS, logger)
    }

    fn compose_components(
        config: &BuildConfig,
        components: &[Component],
        logger: &Logger,
    ) -> Result<SourceSet> {
        let root = config.sdk_src_root();
        let mut sources: Vec<PathBuf> = Vec::new();

        for component in components {
            if !component.enabled {
                logger.dim(&format!("Skipping disabled component `{}`", component.name));
                continue;
            }

            for file in component.files {
                let path = root.join(file);
                if path.exists() {
                    sources.push(path);
                } else {
                    logger.warn(&format!(
                        "Source `{}` of component `{}` is not in this SDK drop",
                        file, component.name
                    ));
                }
            }

            for pattern in component.patterns {
                let matched = utils::expand_glob(&root, pattern)?;
                if matched.is_empty() {
                    logger.warn(&format!(
                        "No sources matched `{}` for component `{}`",
                        pattern, component.name
                    ));
                }
                sources.extend(matched);
            }

            if logger.verbose {
                logger.dim_level2(&format!("Component `{}` collected", component.name));
            }
        }

        Ok(SourceSet { sources })
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
