use std::env;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

pub struct Environment;

impl Environment {
    pub fn quiet_mode(quiet_mode: bool) -> bool {
        env::var("OSDK_QUIET_MODE")
            .map(|val| val.eq_ignore_ascii_case("true"))
            .unwrap_or(quiet_mode)
    }

    pub fn build_jobs(jobs: Option<usize>) -> Option<usize> {
        env::var("OSDK_BUILD_JOBS")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .or(jobs)
    }

    pub fn incremental(incremental: bool) -> bool {
        env::var("OSDK_INCREMENTAL")
            .map(|val| val.eq_ignore_ascii_case("true"))
            .unwrap_or(incremental)
    }

    pub fn is_executable(path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }
        #[cfg(unix)]
        {
            if let Ok(meta) = path.metadata() {
                // Check executable permission bits
                return meta.permissions().mode() & 0o111 != 0;
            }
            false
        }
        #[cfg(not(unix))]
        {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_beats_flag() {
        // Serialized by test name uniqueness; the variable is cleared after.
        env::set_var("OSDK_QUIET_MODE", "TRUE");
        assert!(Environment::quiet_mode(false));
        env::remove_var("OSDK_QUIET_MODE");
        assert!(!Environment::quiet_mode(false));
        assert!(Environment::quiet_mode(true));
    }

    #[test]
    fn jobs_fall_back_to_flag() {
        env::remove_var("OSDK_BUILD_JOBS");
        assert_eq!(Environment::build_jobs(Some(4)), Some(4));
        assert_eq!(Environment::build_jobs(None), None);
    }
}
