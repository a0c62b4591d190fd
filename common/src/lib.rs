pub mod logging;
pub mod process;
pub mod registry;

/// Windowed Java launcher used for jar installers and jar uninstallers.
pub const JAVA_LAUNCHER: &str = "javaw";

pub const UNINSTALL_KEY: &str = "SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Uninstall";
pub const JAVA_RUNTIME_KEY: &str = "SOFTWARE\\JavaSoft\\Java Runtime Environment";
pub const JAVA_VERSION_VALUE: &str = "CurrentVersion";

pub fn is_jar(path: &str) -> bool {
    has_extension(path, "jar")
}

/// Case-insensitive check that `path` ends in `.ext`. `ext` is given without
/// the dot.
pub fn has_extension(path: &str, ext: &str) -> bool {
    let Some(dot) = path.len().checked_sub(ext.len() + 1) else {
        return false;
    };
    // The byte before the extension must be an ASCII '.', which also puts the
    // slice below on a char boundary.
    path.as_bytes()[dot] == b'.' && path[dot + 1..].eq_ignore_ascii_case(ext)
}
