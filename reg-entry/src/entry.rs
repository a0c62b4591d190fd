use anyhow::{Context, Result, bail};
use common::registry::Registry;
use common::{JAVA_LAUNCHER, UNINSTALL_KEY, is_jar};
use tracing::{debug, info, warn};

/// Entry left behind by an older release under a different key.
pub const LEGACY_KEY: &str = "pspdash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallEntry {
    pub key: String,
    pub display_name: String,
    pub version: String,
    pub exec_path: String,
    pub install_path: String,
    pub data_path: String,
}

/// Registry path of the entry named `key`, which must be a single subkey
/// name below the uninstall key, never the uninstall key itself.
pub fn entry_path(key: &str) -> Result<String> {
    if key.trim().is_empty() {
        bail!("Uninstall key name is empty");
    }
    if key.starts_with('\\') || key.ends_with('\\') {
        bail!("Uninstall key name {key:?} starts or ends with a backslash");
    }
    Ok(format!("{UNINSTALL_KEY}\\{key}"))
}

/// Command stored as `UninstallString`. Jar uninstallers need the Java launcher.
pub fn uninstall_command(exec_path: &str) -> String {
    if is_jar(exec_path) {
        format!("{JAVA_LAUNCHER} -jar \"{exec_path}\"")
    } else {
        exec_path.to_string()
    }
}

/// Writes the uninstall entry and drops the legacy one.
///
/// Only failing to create the entry's key is an error; value writes and the
/// legacy cleanup are best-effort.
pub fn register(reg: &impl Registry, entry: &UninstallEntry) -> Result<()> {
    let path = entry_path(&entry.key)?;
    reg.create(&path)
        .with_context(|| format!("Unable to create uninstall key {path}"))?;

    let uninstall = uninstall_command(&entry.exec_path);
    let values = [
        ("DisplayName", entry.display_name.as_str()),
        ("Version", entry.version.as_str()),
        ("DisplayVersion", entry.version.as_str()),
        ("UninstallString", uninstall.as_str()),
        ("InstallPath", entry.install_path.as_str()),
        ("DataPath", entry.data_path.as_str()),
    ];
    for (name, value) in values {
        if let Err(err) = reg.set(&path, name, value) {
            warn!("Failed to set {name}: {err}");
        }
    }

    if let Err(err) = reg.delete(&entry_path(LEGACY_KEY)?) {
        debug!("Legacy entry not removed: {err}");
    }

    info!("Registered {} as {path}", entry.display_name);
    Ok(())
}

pub fn unregister(reg: &impl Registry, key: &str) -> Result<()> {
    let path = entry_path(key)?;
    reg.delete(&path)
        .with_context(|| format!("Unable to delete uninstall key {path}"))?;
    info!("Removed {path}");
    Ok(())
}
