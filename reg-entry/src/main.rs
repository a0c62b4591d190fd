#![windows_subsystem = "windows"]

mod entry;

use crate::entry::{UninstallEntry, register, unregister};
use common::registry::SystemRegistry;
use std::process::ExitCode;
use tracing::{Level, debug, error};

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Register(UninstallEntry),
    Unregister(String),
}

/// `-reg KEY NAME VERSION PATH INSTPATH DATAPATH` or `-unreg KEY`.
/// Anything else yields `None`.
fn parse_args(args: &[String]) -> Option<Action> {
    match args {
        [flag, key, name, version, path, install_path, data_path] if flag == "-reg" => {
            Some(Action::Register(UninstallEntry {
                key: key.clone(),
                display_name: name.clone(),
                version: version.clone(),
                exec_path: path.clone(),
                install_path: install_path.clone(),
                data_path: data_path.clone(),
            }))
        }
        [flag, key] if flag == "-unreg" => Some(Action::Unregister(key.clone())),
        _ => None,
    }
}

fn main() -> ExitCode {
    common::logging::init(Level::WARN);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(action) = parse_args(&args) else {
        debug!("Unrecognised arguments, nothing to do: {args:?}");
        return ExitCode::SUCCESS;
    };

    let reg = SystemRegistry::local_machine();
    let result = match &action {
        Action::Register(entry) => register(&reg, entry),
        Action::Unregister(key) => unregister(&reg, key),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_register() {
        let action = parse_args(&args(&[
            "-reg",
            "dash",
            "Process Dashboard",
            "1.9",
            "C:\\Dash\\uninstall.jar",
            "C:\\Dash",
            "C:\\Dash\\data",
        ]));
        let Some(Action::Register(entry)) = action else {
            panic!("expected register, got {action:?}");
        };
        assert_eq!(entry.key, "dash");
        assert_eq!(entry.display_name, "Process Dashboard");
        assert_eq!(entry.version, "1.9");
        assert_eq!(entry.exec_path, "C:\\Dash\\uninstall.jar");
        assert_eq!(entry.install_path, "C:\\Dash");
        assert_eq!(entry.data_path, "C:\\Dash\\data");
    }

    #[test]
    fn parses_unregister() {
        assert_eq!(
            parse_args(&args(&["-unreg", "dash"])),
            Some(Action::Unregister("dash".to_string()))
        );
    }

    #[test]
    fn wrong_arity_or_flag_is_ignored() {
        assert_eq!(parse_args(&args(&[])), None);
        assert_eq!(parse_args(&args(&["-unreg"])), None);
        assert_eq!(parse_args(&args(&["-unreg", "a", "b"])), None);
        assert_eq!(parse_args(&args(&["-reg", "a", "b", "c", "d", "e"])), None);
        assert_eq!(parse_args(&args(&["--unreg", "dash"])), None);
        assert_eq!(parse_args(&args(&["-REG", "a", "b", "c", "d", "e", "f"])), None);
    }
}
