use crate::config::BuildConfig;
use crate::source_set::SourceSet;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// One source file and the object it compiles to.
#[derive(Debug, Clone)]
pub struct CompileUnit {
    pub source: PathBuf,
    pub object: PathBuf,
}

/// The run's dependency graph: every compile node, then one archive step
/// that requires all of them.
#[derive(Debug)]
pub struct BuildGraph {
    pub units: Vec<CompileUnit>,
    pub archive: PathBuf,
}

impl BuildGraph {
    pub fn plan(config: &BuildConfig, sources: &SourceSet) -> Result<BuildGraph> {
        let units = sources
            .sources
            .iter()
            .map(|source| {
                let object =
                    shadow_object_path(source, &config.open_sdk_path, &config.object_output_dir)?;
                Ok(CompileUnit {
                    source: source.clone(),
                    object,
                })
            })
            .collect::<Result<Vec<CompileUnit>>>()?;

        Ok(BuildGraph {
            units,
            archive: config.archive_path(),
        })
    }
}

/// Maps a source under the SDK tree to its object path under the object
/// output directory, mirroring the layout without copying any file.
pub fn shadow_object_path(source: &Path, sdk_root: &Path, object_root: &Path) -> Result<PathBuf> {
    let relative = source.strip_prefix(sdk_root).with_context(|| {
        format!(
            "Source '{}' is outside the SDK tree '{}'",
            source.display(),
            sdk_root.display()
        )
    })?;
    Ok(object_root.join(relative).with_extension("o"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objects_mirror_the_sdk_layout() {
        let object = shadow_object_path(
            Path::new("/sdk/src/libcjson/cJSON/cJSON.c"),
            Path::new("/sdk/"),
            Path::new("/out/obj"),
        )
        .unwrap();
        assert_eq!(object, PathBuf::from("/out/obj/src/libcjson/cJSON/cJSON.o"));
    }

    #[test]
    fn source_outside_the_tree_is_rejected() {
        let err = shadow_object_path(
            Path::new("/elsewhere/a.c"),
            Path::new("/sdk/"),
            Path::new("/out/obj"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("outside the SDK tree"));
    }
}
