//! Launch arguments for a renderer process
//!
//! [`CommandLine`] collects switches and positional arguments in the order
//! they are appended. Switches render as `--name` or `--name=value` and always
//! precede positional arguments in [`CommandLine::argv`], which is how the
//! renderer expects its command line to be laid out.

use std::ffi::{OsStr, OsString};

const SWITCH_PREFIX: &str = "--";

/// An ordered renderer command line
///
/// # Example
///
/// ```rust
/// use webprefs::CommandLine;
///
/// let mut command_line = CommandLine::new("renderer");
/// command_line.append_arg("page.html");
/// command_line.append_switch("enable-sandbox");
/// command_line.append_switch_ascii("background-color", "#fff");
///
/// assert!(command_line.has_switch("enable-sandbox"));
/// assert_eq!(
///     command_line.argv_lossy(),
///     ["renderer", "--enable-sandbox", "--background-color=#fff", "page.html"]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    program: OsString,
    switches: Vec<(String, Option<OsString>)>,
    args: Vec<OsString>,
}

impl CommandLine {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Append a bare switch; a leading `--` or `-` on `name` is dropped
    pub fn append_switch(&mut self, name: &str) {
        self.switches.push((normalize_switch(name), None));
    }

    pub fn append_switch_ascii(&mut self, name: &str, value: &str) {
        self.append_switch_native(name, value);
    }

    /// Append a switch whose value is a platform string, such as a path
    pub fn append_switch_native(&mut self, name: &str, value: impl AsRef<OsStr>) {
        self.switches
            .push((normalize_switch(name), Some(value.as_ref().to_os_string())));
    }

    /// Append a positional argument verbatim
    pub fn append_arg(&mut self, arg: impl AsRef<OsStr>) {
        self.args.push(arg.as_ref().to_os_string());
    }

    pub fn has_switch(&self, name: &str) -> bool {
        let name = normalize_switch(name);
        self.switches.iter().any(|(switch, _)| *switch == name)
    }

    /// Value of the last occurrence of a switch
    ///
    /// Returns `None` when the switch is absent or was appended without a value.
    pub fn get_switch_value(&self, name: &str) -> Option<&OsStr> {
        let name = normalize_switch(name);
        self.switches
            .iter()
            .rev()
            .find(|(switch, _)| *switch == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Switches in insertion order
    pub fn switches(&self) -> impl Iterator<Item = (&str, Option<&OsStr>)> {
        self.switches
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Full argument vector: program, switches, then positional arguments
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(1 + self.switches.len() + self.args.len());
        argv.push(self.program.clone());
        for (name, value) in &self.switches {
            let mut arg = OsString::from(SWITCH_PREFIX);
            arg.push(name);
            if let Some(value) = value {
                arg.push("=");
                arg.push(value);
            }
            argv.push(arg);
        }
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// [`CommandLine::argv`] with every argument converted lossily to UTF-8
    pub fn argv_lossy(&self) -> Vec<String> {
        self.argv()
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

fn normalize_switch(name: &str) -> String {
    name.strip_prefix(SWITCH_PREFIX)
        .or_else(|| name.strip_prefix('-'))
        .unwrap_or(name)
        .to_string()
}
