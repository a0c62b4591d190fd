use std::{
    ffi::OsString,
    fmt,
    path::PathBuf,
    process::Command,
};
use tracing::debug;

/// A program and its arguments, ready to be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Launch {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Quotes any part containing whitespace, the way it would be typed at a prompt.
impl fmt::Display for Launch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_part(f, &self.program.to_string_lossy())?;
        for arg in &self.args {
            f.write_str(" ")?;
            write_part(f, &arg.to_string_lossy())?;
        }
        Ok(())
    }
}

fn write_part(f: &mut fmt::Formatter<'_>, part: &str) -> fmt::Result {
    if part.is_empty() || part.contains(char::is_whitespace) {
        write!(f, "\"{part}\"")
    } else {
        f.write_str(part)
    }
}

/// Starts a process and blocks until it exits.
pub trait Runner {
    fn run_and_wait(&mut self, launch: &Launch) -> std::io::Result<i32>;
}

/// Runs launches as real child processes.
#[derive(Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run_and_wait(&mut self, launch: &Launch) -> std::io::Result<i32> {
        debug!("Starting {launch}");
        let status = launch.command().status()?;
        // No code means the child was terminated by a signal.
        Ok(status.code().unwrap_or(-1))
    }
}

/// Closures stand in for the system runner, mostly in tests.
impl<F> Runner for F
where
    F: FnMut(&Launch) -> std::io::Result<i32>,
{
    fn run_and_wait(&mut self, launch: &Launch) -> std::io::Result<i32> {
        self(launch)
    }
}
