use crate::config::BuildConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// littlefs is compiled against the SDK's own configuration header.
pub const LITTLEFS_CONFIG_DEFINE: &str = "-DLFS_CONFIG=lfs_config.h";

/// Composes the flag list every SDK compilation unit is built with.
///
/// Order matters and is part of the contract: the generic response file
/// first, then the littlefs define, then one `-iprefix`/`@includes` pair per
/// tree (vendor, open SDK, port). The response files themselves are opaque
/// to this tool.
pub fn sdk_cflags(config: &BuildConfig) -> Vec<OsString> {
    let mut cflags = vec![
        response_file_arg(&config.flag_files.c_flags),
        OsString::from(LITTLEFS_CONFIG_DEFINE),
    ];

    for (tree, includes) in [
        (&config.vendor_path, &config.flag_files.vendor_includes),
        (&config.open_sdk_path, &config.flag_files.open_sdk_includes),
        (&config.tkl_path, &config.flag_files.tkl_includes),
    ] {
        cflags.push(OsString::from("-iprefix"));
        cflags.push(tree.as_os_str().to_os_string());
        cflags.push(response_file_arg(includes));
    }

    cflags
}

/// Include directories the response files do not cover.
pub fn sdk_include_dirs(config: &BuildConfig) -> Vec<PathBuf> {
    let src = config.sdk_src_root();
    vec![
        src.join("libmqtt/coreMQTT/source/include"),
        src.join("tal_bluetooth/nimble/host"),
        src.join("tal_kv/port"),
    ]
}

fn response_file_arg(file: &Path) -> OsString {
    let mut arg = OsString::from("@");
    arg.push(file.as_os_str());
    arg
}
