use common::registry::Registry;
use tracing::debug;

/// Where the installed Java runtime advertises its version.
pub struct JavaProbe<'a> {
    pub registry_key: &'a str,
    pub version_value: &'a str,
}

impl JavaProbe<'_> {
    /// Installed runtime version, or `None` if it can't be read.
    ///
    /// A 32-bit runtime registers under `WOW6432Node`, which a 64-bit process
    /// doesn't see through the plain path, so both views are read and the
    /// greater version wins.
    pub fn installed_version(&self, reg: &impl Registry) -> Option<String> {
        self.registry_keys()
            .iter()
            .filter_map(|key| match reg.get(key, self.version_value) {
                Ok(version) => Some(version),
                Err(err) => {
                    debug!("No installed Java version: {err}");
                    None
                }
            })
            .max()
    }

    fn registry_keys(&self) -> Vec<String> {
        let mut keys = vec![self.registry_key.to_string()];
        let prefix = "SOFTWARE\\";
        let key = self.registry_key;
        if key.len() > prefix.len()
            && key.is_char_boundary(prefix.len())
            && key[..prefix.len()].eq_ignore_ascii_case(prefix)
            && !key.to_ascii_lowercase().contains("wow6432node")
        {
            keys.push(format!("SOFTWARE\\WOW6432Node\\{}", &key[prefix.len()..]));
        }
        keys
    }
}

/// Plain string comparison: "10.0" sorts below "9.0". A missing installation
/// always needs updating.
pub fn needs_update(required: &str, installed: Option<&str>) -> bool {
    match installed {
        Some(installed) => required > installed,
        None => true,
    }
}
