use crate::{
    config::Config,
    error::InstallError,
    install_list::InstallList,
    java::{JavaProbe, needs_update},
};
use common::{
    has_extension, is_jar,
    process::{Launch, Runner},
    registry::Registry,
};
use std::{fmt, io::BufRead};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ReadingConfig,
    InstallingJava,
    InstallingOthers,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::ReadingConfig => "reading installer list",
            Phase::InstallingJava => "installing Java runtime",
            Phase::InstallingOthers => "running installers",
            Phase::Done => "done",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Runs the Java runtime installer if needed, then every other installer in
/// list order, stopping at the first failure.
pub struct Driver<'a, R, X> {
    config: &'a Config,
    registry: R,
    runner: X,
    phase: Phase,
}

impl<'a, R: Registry, X: Runner> Driver<'a, R, X> {
    pub fn new(config: &'a Config, registry: R, runner: X) -> Self {
        Self {
            config,
            registry,
            runner,
            phase: Phase::ReadingConfig,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        info!("Phase: {phase}");
        self.phase = phase;
    }

    pub fn run(&mut self) -> Result<(), InstallError> {
        self.enter(Phase::ReadingConfig);
        let result = InstallList::open(&self.config.paths.install_list()).and_then(|mut list| {
            self.install_jre(&mut list)?;
            self.install_others(&mut list)
        });

        match &result {
            Ok(()) => self.enter(Phase::Done),
            Err(err) => {
                error!("Installation stopped while {}: {err}", self.phase);
                self.enter(Phase::Failed);
            }
        }
        result
    }

    pub fn install_jre<B: BufRead>(&mut self, list: &mut InstallList<B>) -> Result<(), InstallError> {
        self.enter(Phase::InstallingJava);

        let required = next_field(list, "required Java version")?;
        let installer = next_field(list, "Java installer path")?;

        let config = self.config;
        let java = &config.java;
        let probe = JavaProbe {
            registry_key: &java.registry_key,
            version_value: &java.version_value,
        };

        let installed = probe.installed_version(&self.registry);
        if !needs_update(&required, installed.as_deref()) {
            info!(
                "Java {} already satisfies {required}",
                installed.as_deref().unwrap_or_default()
            );
            return Ok(());
        }

        info!("Installing Java {required} from {installer}");
        let code = self.run_file(&installer)?;
        if code != 0 {
            warn!("Java installer exited with code {code}");
        }

        let installed = probe.installed_version(&self.registry);
        if needs_update(&required, installed.as_deref()) {
            return Err(InstallError::JavaOutdated {
                required,
                installed: installed.unwrap_or_else(|| "nothing".to_string()),
            });
        }

        Ok(())
    }

    pub fn install_others<B: BufRead>(&mut self, list: &mut InstallList<B>) -> Result<(), InstallError> {
        self.enter(Phase::InstallingOthers);

        while let Some(path) = list.next_line()? {
            if path.is_empty() {
                continue;
            }
            info!("Running {path}");
            let code = self.run_file(&path)?;
            if code != 0 {
                return Err(InstallError::InstallerFailed { path, code });
            }
        }

        Ok(())
    }

    /// Runs one installer from the data directory and waits for its exit code.
    pub fn run_file(&mut self, path: &str) -> Result<i32, InstallError> {
        let launch = self.launch_for(path);
        self.runner
            .run_and_wait(&launch)
            .map_err(|source| InstallError::Launch {
                path: launch.to_string(),
                source,
            })
    }

    fn launch_for(&self, path: &str) -> Launch {
        let full = self.config.paths.data_dir.join(path);
        if is_jar(path) {
            Launch::new(&self.config.java.launcher).arg("-jar").arg(full)
        } else if has_extension(path, "msi") {
            Launch::new("msiexec").arg("/i").arg(full)
        } else {
            Launch::new(full)
        }
    }
}

fn next_field<B: BufRead>(
    list: &mut InstallList<B>,
    field: &'static str,
) -> Result<String, InstallError> {
    list.next_line()?
        .filter(|line| !line.is_empty())
        .ok_or(InstallError::MissingField(field))
}
