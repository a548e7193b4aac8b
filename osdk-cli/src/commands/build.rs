use super::*;
use osdk_core::{BuildConfig, BuildPaths, BuildSystem};
use osdk_utils::Environment;
use std::path::PathBuf;

pub trait ArchiveBuilder {
    fn build_archive(&self, logger: &Logger) -> anyhow::Result<PathBuf>;
}

#[derive(Args)]
pub struct BuildCommand {
    /// Directory containing the cross-toolchain binaries
    #[arg(long)]
    pub compiler_path: String,

    /// Root of the vendor source tree
    #[arg(long)]
    pub vendor_path: String,

    /// Directory containing the flag response files
    #[arg(long)]
    pub flags_path: String,

    /// Root of the open-SDK source tree
    #[arg(long)]
    pub open_sdk_path: String,

    /// Root of the porting-layer tree
    #[arg(long)]
    pub tkl_path: String,

    /// Directory the object files are written under
    #[arg(long)]
    pub object_output_dir: String,

    /// Directory the archive is written into
    #[arg(long)]
    pub lib_output_dir: String,

    /// File name of the produced archive
    #[arg(long)]
    pub lib_output_name: String,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Reuse objects whose inputs have not changed
    #[arg(long, default_value_t = false)]
    pub incremental: bool,
}

impl ArchiveBuilder for BuildCommand {
    fn build_archive(&self, logger: &Logger) -> anyhow::Result<PathBuf> {
        let config = BuildConfig::resolve(BuildPaths {
            compiler_path: self.compiler_path.clone(),
            vendor_path: self.vendor_path.clone(),
            flags_path: self.flags_path.clone(),
            open_sdk_path: self.open_sdk_path.clone(),
            tkl_path: self.tkl_path.clone(),
            object_output_dir: self.object_output_dir.clone(),
            lib_output_dir: self.lib_output_dir.clone(),
            lib_output_name: self.lib_output_name.clone(),
        })?;

        let build_system = BuildSystem::new(
            config,
            Environment::incremental(self.incremental),
            logger.clone(),
        )?;
        build_system.build(Environment::build_jobs(self.jobs))
    }
}

impl Command for BuildCommand {
    fn execute(&self, logger: &mut Logger) -> Result<()> {
        logger.quiet(Environment::quiet_mode(self.quiet));
        logger.verbose(self.verbose);

        self.build_archive(logger)?;
        Ok(())
    }
}
