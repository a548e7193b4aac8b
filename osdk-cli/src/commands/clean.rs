use super::*;
use osdk_core::CACHE_FILE_NAME;
use osdk_utils::Environment;
use std::path::Path;

#[derive(Args)]
pub struct CleanCommand {
    /// Object output directory to clean
    #[arg(long)]
    pub object_output_dir: String,

    /// Library output directory holding the archive to remove
    #[arg(long, requires = "lib_output_name")]
    pub lib_output_dir: Option<String>,

    /// File name of the archive to remove
    #[arg(long, requires = "lib_output_dir")]
    pub lib_output_name: Option<String>,

    /// Suppress output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

impl Command for CleanCommand {
    fn execute(&self, logger: &mut Logger) -> Result<()> {
        logger.quiet(Environment::quiet_mode(self.quiet));

        // Generated objects mirror the SDK under <object-output-dir>/src.
        let objects = Path::new(&self.object_output_dir).join("src");
        if objects.exists() {
            std::fs::remove_dir_all(&objects)?;
            logger.success(&format!(
                "Cleaned build artifacts in '{}'.",
                objects.display()
            ));
        } else {
            logger.dim(&format!(
                "No build artifacts found in '{}'.",
                objects.display()
            ));
        }

        let cache = Path::new(&self.object_output_dir).join(CACHE_FILE_NAME);
        if cache.exists() {
            std::fs::remove_file(&cache)?;
            logger.dim(&format!("Removed build cache '{}'.", cache.display()));
        }

        if let (Some(dir), Some(name)) = (&self.lib_output_dir, &self.lib_output_name) {
            let archive = Path::new(dir).join(name);
            if archive.exists() {
                std::fs::remove_file(&archive)?;
                logger.success(&format!("Removed archive '{}'.", archive.display()));
            } else {
                logger.dim(&format!("No archive found at '{}'.", archive.display()));
            }
        }
        Ok(())
    }
}
