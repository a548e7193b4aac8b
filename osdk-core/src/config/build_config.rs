use anyhow::Result;
use std::path::{Path, PathBuf};

/// Raw path inputs as they arrive from the command line.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    pub compiler_path: String,
    pub vendor_path: String,
    pub flags_path: String,
    pub open_sdk_path: String,
    pub tkl_path: String,
    pub object_output_dir: String,
    pub lib_output_dir: String,
    pub lib_output_name: String,
}

/// The four response files under the flags directory, passed to the compiler
/// verbatim as `@file` arguments.
#[derive(Debug, Clone)]
pub struct FlagFiles {
    pub c_flags: PathBuf,
    pub open_sdk_includes: PathBuf,
    pub vendor_includes: PathBuf,
    pub tkl_includes: PathBuf,
}

impl FlagFiles {
    fn derive(flags_path: &Path) -> Self {
        FlagFiles {
            c_flags: flags_path.join("c_flags.txt"),
            open_sdk_includes: flags_path.join("open_sdk_includes.txt"),
            vendor_includes: flags_path.join("vendor_includes.txt"),
            tkl_includes: flags_path.join("port_includes.txt"),
        }
    }
}

/// Every resolved input and output location for one run. Built once from the
/// command line, validated eagerly, then only read.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub compiler_path: PathBuf,
    pub vendor_path: PathBuf,
    pub flags_path: PathBuf,
    pub open_sdk_path: PathBuf,
    pub tkl_path: PathBuf,
    pub object_output_dir: PathBuf,
    pub lib_output_dir: PathBuf,
    pub lib_output_name: String,
    pub flag_files: FlagFiles,
}

impl BuildConfig {
    /// Normalizes the directory inputs and validates that every path and flag
    /// file exists. The first missing path fails the whole run, before any
    /// toolchain interaction.
    pub fn resolve(paths: BuildPaths) -> Result<Self> {
        let config = BuildConfig {
            compiler_path: normalize_dir(&paths.compiler_path),
            vendor_path: normalize_dir(&paths.vendor_path),
            flags_path: normalize_dir(&paths.flags_path),
            open_sdk_path: normalize_dir(&paths.open_sdk_path),
            tkl_path: normalize_dir(&paths.tkl_path),
            object_output_dir: PathBuf::from(&paths.object_output_dir),
            lib_output_dir: PathBuf::from(&paths.lib_output_dir),
            lib_output_name: paths.lib_output_name,
            flag_files: FlagFiles::derive(Path::new(&paths.flags_path)),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_path(&self.compiler_path)?;
        check_path(&self.vendor_path)?;
        check_path(&self.flags_path)?;
        check_path(&self.open_sdk_path)?;
        check_path(&self.tkl_path)?;
        check_path(&self.object_output_dir)?;
        check_path(&self.lib_output_dir)?;
        check_path(&self.flag_files.open_sdk_includes)?;
        check_path(&self.flag_files.vendor_includes)?;
        check_path(&self.flag_files.tkl_includes)?;
        check_path(&self.flag_files.c_flags)?;
        Ok(())
    }

    /// Root of the SDK source tree that the component lists are relative to.
    pub fn sdk_src_root(&self) -> PathBuf {
        self.open_sdk_path.join("src")
    }

    /// Final location of the produced archive.
    pub fn archive_path(&self) -> PathBuf {
        self.lib_output_dir.join(&self.lib_output_name)
    }
}

fn check_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    Ok(())
}

/// Joining the empty path appends a trailing separator, which `-iprefix`
/// needs to concatenate cleanly with the response-file entries.
fn normalize_dir(dir: &str) -> PathBuf {
    PathBuf::from(dir).join("")
}
