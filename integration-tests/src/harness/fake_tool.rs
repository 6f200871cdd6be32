use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// A stand-in for `adb`: a shell script that replays canned logcat lines,
/// answers the start-time probe, and writes a small fake bugreport. Every
/// invocation is appended to a calls log.
pub struct FakeTool {
    dir: TempDir,
    program: PathBuf,
}

pub struct FakeToolBuilder {
    lines: Vec<String>,
    probe: Option<String>,
    linger: Duration,
    bugreport_delay: Duration,
    bugreport_exit: i32,
}

impl FakeTool {
    pub fn builder() -> FakeToolBuilder {
        FakeToolBuilder {
            lines: Vec::new(),
            probe: None,
            linger: Duration::ZERO,
            bugreport_delay: Duration::ZERO,
            bugreport_exit: 0,
        }
    }

    /// Path to pass as the capture tool.
    pub fn program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Argument lists the tool was invoked with, one entry per call.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.calls_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn bugreport_calls(&self) -> usize {
        self.calls().iter().filter(|c| c.as_str() == "bugreport").count()
    }

    /// Contents of the last `ANDROID_SERIAL` the tool saw.
    pub fn serial(&self) -> Option<String> {
        fs::read_to_string(self.dir.path().join("serial"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn calls_path(&self) -> PathBuf {
        self.dir.path().join("calls.log")
    }
}

impl FakeToolBuilder {
    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn lines(mut self, lines: &[&str]) -> Self {
        self.lines.extend(lines.iter().map(|l| l.to_string()));
        self
    }

    /// Device time reported by `shell date`; without it the probe fails.
    pub fn probe(mut self, ts: &str) -> Self {
        self.probe = Some(ts.to_string());
        self
    }

    /// Keep the stream open this long after the last line.
    pub fn linger(mut self, d: Duration) -> Self {
        self.linger = d;
        self
    }

    pub fn bugreport_delay(mut self, d: Duration) -> Self {
        self.bugreport_delay = d;
        self
    }

    pub fn bugreport_exit(mut self, code: i32) -> Self {
        self.bugreport_exit = code;
        self
    }

    pub fn build(self) -> FakeTool {
        let dir = TempDir::new().unwrap();
        let lines = dir.path().join("logcat.txt");
        let mut body = self.lines.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(&lines, body).unwrap();

        let probe = match &self.probe {
            Some(ts) => format!("echo \"{ts}\""),
            None => "exit 1".to_string(),
        };

        let program = dir.path().join("fake-adb");
        let script = format!(
            r#"#!/bin/sh
echo "$*" >> "{calls}"
echo "$ANDROID_SERIAL" > "{serial}"
case "$1" in
  shell)
    {probe}
    ;;
  logcat)
    cat "{lines}"
    sleep {linger}
    ;;
  bugreport)
    sleep {delay}
    echo "fake bugreport"
    exit {exit}
    ;;
  *)
    exit 2
    ;;
esac
"#,
            calls = dir.path().join("calls.log").display(),
            serial = dir.path().join("serial").display(),
            lines = lines.display(),
            linger = secs(self.linger),
            delay = secs(self.bugreport_delay),
            exit = self.bugreport_exit,
        );
        write_executable(&program, &script);

        FakeTool { dir, program }
    }
}

fn secs(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64())
}

fn write_executable(path: &Path, script: &str) {
    fs::write(path, script).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}
