use anyhow::Result;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Prefix selecting the cross target's binaries inside the compiler directory.
pub const CROSS_COMPILE_PREFIX: &str = "arm-none-eabi-";

/// Resolved toolchain executables plus the flag set they are invoked with.
///
/// The base configuration carries no compile flags; specialized environments
/// are derived with [`ToolchainConfig::with_cflags`] and never mutate their
/// parent.
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    pub compiler: PathBuf,
    /// The C compiler doubles as the assembler.
    pub assembler: PathBuf,
    pub archiver: PathBuf,
    pub archiver_flags: Vec<String>,
    pub cflags: Vec<OsString>,
    pub include_dirs: Vec<PathBuf>,
    pub object_suffix: &'static str,
    pub lib_prefix: &'static str,
    pub lib_suffix: &'static str,
}

impl ToolchainConfig {
    /// Binds compiler and archiver inside `compiler_path` using the cross
    /// prefix and the host platform's executable naming.
    pub fn cross(compiler_path: &Path) -> Result<Self> {
        let suffix = executable_suffix(env::consts::OS)?;
        let compiler = compiler_path.join(format!("{}gcc{}", CROSS_COMPILE_PREFIX, suffix));
        let archiver = compiler_path.join(format!("{}ar{}", CROSS_COMPILE_PREFIX, suffix));

        Ok(ToolchainConfig {
            assembler: compiler.clone(),
            compiler,
            archiver,
            archiver_flags: vec!["rcs".to_string()],
            cflags: Vec::new(),
            include_dirs: Vec::new(),
            object_suffix: ".o",
            lib_prefix: "lib",
            lib_suffix: ".a",
        })
    }

    /// Derives a specialized environment carrying `cflags` and extra include
    /// directories. The receiver is left untouched.
    pub fn with_cflags(&self, cflags: Vec<OsString>, include_dirs: Vec<PathBuf>) -> Self {
        ToolchainConfig {
            cflags,
            include_dirs,
            ..self.clone()
        }
    }

    pub fn static_lib_name(&self, name: &str) -> String {
        format!("{}{}{}", self.lib_prefix, name, self.lib_suffix)
    }
}

fn executable_suffix(os: &str) -> Result<&'static str> {
    match os {
        "windows" => Ok(".exe"),
        "linux" => Ok(""),
        other => anyhow::bail!("Unsupported platform: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_binaries_carry_no_suffix() {
        assert_eq!(executable_suffix("linux").unwrap(), "");
        assert_eq!(executable_suffix("windows").unwrap(), ".exe");
    }

    #[test]
    fn unrecognized_host_is_fatal() {
        let err = executable_suffix("macos").unwrap_err();
        assert!(err.to_string().contains("Unsupported platform"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn cross_binding_joins_prefix_and_name() {
        let toolchain = ToolchainConfig::cross(Path::new("/opt/gcc/bin")).unwrap();
        assert_eq!(
            toolchain.compiler,
            PathBuf::from("/opt/gcc/bin/arm-none-eabi-gcc")
        );
        assert_eq!(
            toolchain.archiver,
            PathBuf::from("/opt/gcc/bin/arm-none-eabi-ar")
        );
        assert_eq!(toolchain.assembler, toolchain.compiler);
        assert_eq!(toolchain.archiver_flags, vec!["rcs".to_string()]);
    }

    #[test]
    fn derived_environment_leaves_base_untouched() {
        let base = ToolchainConfig {
            compiler: PathBuf::from("cc"),
            assembler: PathBuf::from("cc"),
            archiver: PathBuf::from("ar"),
            archiver_flags: vec!["rcs".to_string()],
            cflags: Vec::new(),
            include_dirs: Vec::new(),
            object_suffix: ".o",
            lib_prefix: "lib",
            lib_suffix: ".a",
        };
        let derived = base.with_cflags(
            vec![OsString::from("-Wall")],
            vec![PathBuf::from("include")],
        );
        assert!(base.cflags.is_empty());
        assert_eq!(derived.cflags, vec![OsString::from("-Wall")]);
        assert_eq!(derived.compiler, base.compiler);
    }

    #[test]
    fn static_lib_name_uses_affixes() {
        let toolchain = ToolchainConfig {
            compiler: PathBuf::from("cc"),
            assembler: PathBuf::from("cc"),
            archiver: PathBuf::from("ar"),
            archiver_flags: Vec::new(),
            cflags: Vec::new(),
            include_dirs: Vec::new(),
            object_suffix: ".o",
            lib_prefix: "lib",
            lib_suffix: ".a",
        };
        assert_eq!(toolchain.static_lib_name("vendor"), "libvendor.a");
    }
}
