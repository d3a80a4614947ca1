//! Tool discovery: PATH probe with local fallbacks, or a single fixed location

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::{Config, LocatorStrategy};
use crate::error::{ConvertError, Result};

const PROBE_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Where a resolved tool came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSource {
    /// Bare command name, resolved by the OS through PATH
    SearchPath,
    /// Concrete file on disk
    Local,
}

/// Resolved reference to the external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPath {
    program: PathBuf,
    source: ToolSource,
}

impl ToolPath {
    pub fn on_search_path<S: Into<PathBuf>>(command: S) -> Self {
        Self { program: command.into(), source: ToolSource::SearchPath }
    }

    pub fn local<P: Into<PathBuf>>(path: P) -> Self {
        Self { program: path.into(), source: ToolSource::Local }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn source(&self) -> ToolSource {
        self.source
    }
}

impl fmt::Display for ToolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            ToolSource::SearchPath => write!(f, "system {} command", self.program.display()),
            ToolSource::Local => write!(f, "local ffmpeg: {}", self.program.display()),
        }
    }
}

/// Directory containing the running executable, used as base for local lookups
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ConvertError::path(format!("Executable has no parent directory: {}", exe.display())))
}

/// Resolves the tool once per run
#[derive(Debug, Clone)]
pub struct ToolLocator {
    strategy: LocatorStrategy,
    command: String,
    fixed_path: Option<PathBuf>,
    base_dir: PathBuf,
    probe_timeout: Duration,
}

impl ToolLocator {
    pub fn new(config: &Config, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            strategy: config.tool.strategy,
            command: config.tool.command.clone(),
            fixed_path: config.tool.fixed_path.clone(),
            base_dir: base_dir.into(),
            probe_timeout: config.probe_timeout(),
        }
    }

    pub fn resolve(&self) -> Result<ToolPath> {
        match self.strategy {
            LocatorStrategy::Search => self.resolve_search(),
            LocatorStrategy::Fixed => self.resolve_fixed(),
        }
    }

    /// Local candidates in priority order
    pub fn local_candidates(&self) -> Vec<PathBuf> {
        let bin = self.base_dir.join("bin");
        vec![
            bin.join("ffmpeg.exe"),
            bin.join("ffmpeg"),
            self.base_dir.join("ffmpeg.exe"),
            self.base_dir.join("ffmpeg"),
        ]
    }

    /// Path required by the fixed strategy
    pub fn fixed_candidate(&self) -> PathBuf {
        match &self.fixed_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base_dir.join(path),
            None => self.base_dir.join(format!("ffmpeg{}", std::env::consts::EXE_SUFFIX)),
        }
    }

    fn resolve_search(&self) -> Result<ToolPath> {
        if self.probe_search_path() {
            return Ok(ToolPath::on_search_path(&self.command));
        }

        let candidates = self.local_candidates();
        if let Some(found) = candidates.iter().find(|c| c.exists()) {
            debug!("Found local tool: {}", found.display());
            return Ok(ToolPath::local(found.clone()));
        }

        let mut searched = vec![PathBuf::from(&self.command)];
        searched.extend(candidates);
        Err(ConvertError::tool_not_found(&self.command, searched))
    }

    fn resolve_fixed(&self) -> Result<ToolPath> {
        let candidate = self.fixed_candidate();
        if candidate.exists() {
            Ok(ToolPath::local(candidate))
        } else {
            Err(ConvertError::tool_not_found(&self.command, vec![candidate]))
        }
    }

    /// Run `<command> -version` through PATH, killing it after the probe timeout
    fn probe_search_path(&self) -> bool {
        let spawned = Command::new(&self.command)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                debug!("`{} -version` could not be started: {}", self.command, e);
                return false;
            }
        };

        let deadline = Instant::now() + self.probe_timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!("`{} -version` exited with {}", self.command, status);
                    return status.success();
                }
                Ok(None) if Instant::now() >= deadline => {
                    warn!("`{} -version` timed out after {:?}", self.command, self.probe_timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return false;
                }
                Ok(None) => thread::sleep(PROBE_POLL_INTERVAL),
                Err(e) => {
                    debug!("Waiting for `{} -version` failed: {}", self.command, e);
                    return false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MISSING_COMMAND: &str = "oggbatch-test-no-such-command";

    fn search_config() -> Config {
        let mut config = Config::default();
        config.tool.command = MISSING_COMMAND.to_string();
        config
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_candidate_order() {
        let locator = ToolLocator::new(&Config::default(), "/opt/app");
        let candidates = locator.local_candidates();
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/opt/app/bin/ffmpeg.exe"),
                PathBuf::from("/opt/app/bin/ffmpeg"),
                PathBuf::from("/opt/app/ffmpeg.exe"),
                PathBuf::from("/opt/app/ffmpeg"),
            ]
        );
    }

    #[test]
    fn test_search_falls_back_to_bin_dir() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("bin").join("ffmpeg"));
        touch(&dir.path().join("ffmpeg"));

        let tool = ToolLocator::new(&search_config(), dir.path()).resolve().unwrap();
        assert_eq!(tool.source(), ToolSource::Local);
        assert_eq!(tool.program(), dir.path().join("bin").join("ffmpeg"));
    }

    #[test]
    fn test_search_prefers_exe_within_same_dir() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("ffmpeg.exe"));
        touch(&dir.path().join("ffmpeg"));

        let tool = ToolLocator::new(&search_config(), dir.path()).resolve().unwrap();
        assert_eq!(tool.program(), dir.path().join("ffmpeg.exe"));
    }

    #[test]
    fn test_search_not_found() {
        let dir = TempDir::new().unwrap();
        let err = ToolLocator::new(&search_config(), dir.path()).resolve().unwrap_err();
        match err {
            ConvertError::ToolNotFound { command, searched } => {
                assert_eq!(command, MISSING_COMMAND);
                assert_eq!(searched.len(), 5);
                assert_eq!(searched[0], PathBuf::from(MISSING_COMMAND));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fixed_ignores_other_candidates() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("bin").join("ffmpeg"));

        let mut config = search_config();
        config.tool.strategy = LocatorStrategy::Fixed;
        let result = ToolLocator::new(&config, dir.path()).resolve();
        assert!(matches!(result, Err(ConvertError::ToolNotFound { .. })));
    }

    #[test]
    fn test_fixed_default_beside_executable() {
        let dir = TempDir::new().unwrap();
        let expected = dir.path().join(format!("ffmpeg{}", std::env::consts::EXE_SUFFIX));
        touch(&expected);

        let mut config = search_config();
        config.tool.strategy = LocatorStrategy::Fixed;
        let tool = ToolLocator::new(&config, dir.path()).resolve().unwrap();
        assert_eq!(tool, ToolPath::local(expected));
    }

    #[test]
    fn test_fixed_relative_path_resolves_against_base() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("tools").join("my-ffmpeg"));

        let mut config = search_config();
        config.tool.strategy = LocatorStrategy::Fixed;
        config.tool.fixed_path = Some(PathBuf::from("tools/my-ffmpeg"));
        let tool = ToolLocator::new(&config, dir.path()).resolve().unwrap();
        assert_eq!(tool.program(), dir.path().join("tools").join("my-ffmpeg"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ToolPath::on_search_path("ffmpeg").to_string(), "system ffmpeg command");
        assert_eq!(ToolPath::local("/opt/ffmpeg").to_string(), "local ffmpeg: /opt/ffmpeg");
    }

    #[cfg(unix)]
    #[test]
    fn test_search_path_command_that_succeeds() {
        // `true` exits 0 whatever its arguments
        let mut config = Config::default();
        config.tool.command = "true".to_string();
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("ffmpeg"));

        let tool = ToolLocator::new(&config, dir.path()).resolve().unwrap();
        assert_eq!(tool, ToolPath::on_search_path("true"));
        assert_eq!(tool.source(), ToolSource::SearchPath);
    }

    #[cfg(unix)]
    #[test]
    fn test_hung_version_check_is_killed_and_falls_through() {
        use std::os::unix::fs::PermissionsExt;

        let scripts = TempDir::new().unwrap();
        let hang = scripts.path().join("hang");
        std::fs::write(&hang, "#!/bin/sh\nexec sleep 30\n").unwrap();
        std::fs::set_permissions(&hang, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut config = Config::default();
        config.tool.command = hang.display().to_string();
        config.tool.probe_timeout_secs = 1;

        let empty = TempDir::new().unwrap();
        let started = Instant::now();
        let result = ToolLocator::new(&config, empty.path()).resolve();
        let elapsed = started.elapsed();
        assert!(matches!(result, Err(ConvertError::ToolNotFound { .. })));
        assert!(elapsed >= Duration::from_millis(900), "returned before the timeout: {elapsed:?}");
        assert!(elapsed < Duration::from_secs(5), "not killed at the timeout: {elapsed:?}");

        let local = TempDir::new().unwrap();
        touch(&local.path().join("bin").join("ffmpeg"));
        let tool = ToolLocator::new(&config, local.path()).resolve().unwrap();
        assert_eq!(tool, ToolPath::local(local.path().join("bin").join("ffmpeg")));
    }
}
