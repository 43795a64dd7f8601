//! External commands: minifiers and the fonts hook.
//!
//! ```ignore
//! Cmd::from_slice(&config.minify.js)
//!     .args(["-o", target, target])
//!     .cwd(root)
//!     .run()?;
//! ```
//!
//! A command's stderr is echoed under its program name unless the command is
//! quiet; a non-zero exit turns into an error carrying stderr and stdout.

use crate::log;
use anyhow::{Context, Result, bail};
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

#[derive(Debug, Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
    quiet: bool,
}

impl Cmd {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Program and leading arguments from a config array such as
    /// `["npx", "terser", "-c"]`.
    pub fn from_slice<S: AsRef<OsStr>>(cmd: &[S]) -> Self {
        match cmd.split_first() {
            Some((program, args)) => Self::new(program).args(args),
            None => Self::default(),
        }
    }

    /// Empty arguments are dropped.
    pub fn arg<S: AsRef<OsStr>>(self, arg: S) -> Self {
        self.args([arg])
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|arg| arg.as_ref().to_owned())
                .filter(|arg| !arg.is_empty()),
        );
        self
    }

    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    pub fn envs<K, V, I>(mut self, vars: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.envs.extend(
            vars.into_iter()
                .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned())),
        );
        self
    }

    /// Do not echo stderr of a successful run.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run to completion with stdin closed, capturing both output streams.
    pub fn run(self) -> Result<Output> {
        let name = self.program.to_string_lossy().into_owned();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .with_context(|| format!("failed to execute `{name}`"))?;

        if !output.status.success() {
            bail!(failure_message(&name, &output));
        }
        if !self.quiet {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if !stderr.is_empty() {
                log!(&name; "{stderr}");
            }
        }
        Ok(output)
    }
}

fn failure_message(name: &str, output: &Output) -> String {
    let mut msg = format!("`{name}` failed with {}", output.status);
    for (label, stream) in [("stderr", &output.stderr), ("stdout", &output.stdout)] {
        let text = String::from_utf8_lossy(stream);
        let text = text.trim();
        if !text.is_empty() {
            msg.push_str(&format!("\n{label}:\n{text}"));
        }
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_builder() {
        let cmd = Cmd::from_slice(&["terser", "-c"])
            .arg("-m")
            .args(["-o", "out.js"])
            .cwd("/tmp");

        assert_eq!(cmd.program, OsString::from("terser"));
        assert_eq!(cmd.args, ["-c", "-m", "-o", "out.js"]);
        assert_eq!(cmd.cwd, Some(PathBuf::from("/tmp")));
        assert!(!cmd.quiet);
    }

    #[test]
    fn test_empty_args_dropped() {
        let cmd = Cmd::new("cleancss").arg("").args(["a", "", "b"]);
        assert_eq!(cmd.args, ["a", "b"]);
    }

    #[test]
    fn test_from_empty_slice() {
        let cmd = Cmd::from_slice::<&str>(&[]);
        assert!(cmd.program.is_empty());
        assert!(cmd.args.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_envs_and_cwd() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = Cmd::new("sh")
            .args(["-c", "echo $SITEBAKE_TEST; echo noise >&2"])
            .envs([("SITEBAKE_TEST", "ok")])
            .cwd(dir.path())
            .quiet(true)
            .run()
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout), "ok\n");
        assert_eq!(String::from_utf8_lossy(&output.stderr), "noise\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_failure_carries_output() {
        let err = Cmd::new("sh")
            .args(["-c", "echo partial; echo broken >&2; exit 3"])
            .run()
            .unwrap_err()
            .to_string();
        assert!(err.contains("`sh` failed"));
        assert!(err.contains("stderr:\nbroken"));
        assert!(err.contains("stdout:\npartial"));
    }
}
