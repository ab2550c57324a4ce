//! Shell detection and argument helpers.
//!
//! Which binary a pane runs is a pluggable [`ShellStrategy`]; the default
//! [`LoginShell`] detects the user's shell from the environment.

/// Program and arguments for a pane's shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Chooses the shell command for a new pane.
pub trait ShellStrategy: Send + Sync {
    /// `program` is a per-pane override, `args` any per-pane arguments.
    fn resolve(&self, program: Option<&str>, args: &[String]) -> ShellCommand;
}

/// Use the override if given, otherwise the user's default shell,
/// optionally as a login shell.
#[derive(Debug, Clone)]
pub struct LoginShell {
    pub default_program: Option<String>,
    pub login: bool,
}

impl Default for LoginShell {
    fn default() -> Self {
        Self {
            default_program: None,
            login: true,
        }
    }
}

impl ShellStrategy for LoginShell {
    fn resolve(&self, program: Option<&str>, args: &[String]) -> ShellCommand {
        let program = program
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .or_else(|| self.default_program.clone().filter(|p| !p.is_empty()))
            .unwrap_or_else(detect_shell);

        let mut full_args = if self.login && args.is_empty() {
            shell_args(&program)
        } else {
            Vec::new()
        };
        full_args.extend(args.iter().cloned());

        ShellCommand {
            program,
            args: full_args,
        }
    }
}

/// Always run the same command, ignoring per-pane overrides.
#[derive(Debug, Clone)]
pub struct FixedShell(pub ShellCommand);

impl ShellStrategy for FixedShell {
    fn resolve(&self, _program: Option<&str>, _args: &[String]) -> ShellCommand {
        self.0.clone()
    }
}

/// Detect the user's default shell.
///
/// - On Unix: reads the `SHELL` environment variable, falling back to `/bin/sh`.
/// - On Windows: reads the `COMSPEC` environment variable, falling back to `cmd.exe`.
pub fn detect_shell() -> String {
    #[cfg(unix)]
    {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }

    #[cfg(windows)]
    {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    }

    #[cfg(not(any(unix, windows)))]
    {
        "/bin/sh".to_string()
    }
}

/// Login flags for shells that support them.
pub fn shell_args(shell: &str) -> Vec<String> {
    if shell.ends_with("zsh") || shell.ends_with("bash") {
        vec!["--login".to_string()]
    } else {
        vec![]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_shell_returns_non_empty() {
        assert!(!detect_shell().is_empty());
    }

    #[test]
    fn shell_args_for_login_shells() {
        assert_eq!(shell_args("/bin/zsh"), vec!["--login".to_string()]);
        assert_eq!(shell_args("bash"), vec!["--login".to_string()]);
    }

    #[test]
    fn shell_args_for_other_shells() {
        assert!(shell_args("/usr/bin/fish").is_empty());
        assert!(shell_args("/usr/local/bin/something_custom").is_empty());
    }

    #[test]
    fn login_shell_prefers_override() {
        let strategy = LoginShell {
            default_program: Some("/bin/zsh".into()),
            login: true,
        };
        let cmd = strategy.resolve(Some("/bin/bash"), &[]);
        assert_eq!(cmd.program, "/bin/bash");
        assert_eq!(cmd.args, vec!["--login"]);
    }

    #[test]
    fn login_shell_falls_back_to_configured_default() {
        let strategy = LoginShell {
            default_program: Some("/usr/bin/fish".into()),
            login: true,
        };
        let cmd = strategy.resolve(None, &[]);
        assert_eq!(cmd.program, "/usr/bin/fish");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn empty_override_is_ignored() {
        let strategy = LoginShell {
            default_program: Some("/bin/dash".into()),
            login: false,
        };
        assert_eq!(strategy.resolve(Some(""), &[]).program, "/bin/dash");
    }

    #[test]
    fn explicit_args_replace_login_flag() {
        let strategy = LoginShell {
            default_program: None,
            login: true,
        };
        let args = vec!["-c".to_string(), "echo hi".to_string()];
        let cmd = strategy.resolve(Some("/bin/bash"), &args);
        assert_eq!(cmd.args, args);
    }

    #[test]
    fn fixed_shell_ignores_overrides() {
        let fixed = FixedShell(ShellCommand {
            program: "/bin/sh".into(),
            args: vec!["-i".into()],
        });
        let cmd = fixed.resolve(Some("/bin/zsh"), &["-x".to_string()]);
        assert_eq!(cmd.program, "/bin/sh");
        assert_eq!(cmd.args, vec!["-i"]);
    }
}
