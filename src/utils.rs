//! Small helpers shared across faro: CLI argument handling, home-directory
//! shortening for the path bar, environment expansion for prompt input, and
//! launching external programs (editor, OS opener).

use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::process::Command;

/// What the command line asked for.
pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

/// Hand-rolled argument handling; with no arguments faro simply launches.
pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        return CliAction::RunApp;
    }
    if args.len() > 2 {
        eprintln!("Error: faro accepts at most one argument.");
        eprintln!("Usage: faro [PATH] or faro [OPTION]");
        return CliAction::Exit;
    }

    match args[1].as_str() {
        "-v" | "--version" => {
            println!("faro {}", env!("CARGO_PKG_VERSION"));
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--init" => {
            if let Err(e) = crate::config::Config::generate_default(
                &crate::config::Config::default_path(),
            ) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        other => {
            eprintln!("Unknown option '{}'. See 'faro --help'.", other);
            CliAction::Exit
        }
    }
}

fn print_help() {
    println!("faro - a keyboard-driven terminal file browser");
    println!();
    println!("Usage: faro [PATH] | faro [OPTION]");
    println!();
    println!("Options:");
    println!("  -h, --help     Show this help");
    println!("  -v, --version  Show the version");
    println!("      --init     Write a default config to {}", crate::config::Config::default_path().display());
    println!();
    println!("Keys: j/k move, h parent, l enter/expand, / filter, y copy, x cut,");
    println!("      p paste, d delete, n new file, m new dir, r rename, i info,");
    println!("      e editor, o open, H/L history, R refresh, q quit");
}

/// Shortens the home directory prefix to `~` for the path bar.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

/// Expands `$VAR` references and a leading `~` in prompt input, so a paste
/// destination like `~/docs` or `$HOME/docs` works as typed.
pub fn expand_env_path(input: &str) -> PathBuf {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let mut name = String::new();
        while let Some(&n) = chars.peek() {
            if n.is_alphanumeric() || n == '_' {
                name.push(n);
                chars.next();
            } else {
                break;
            }
        }
        match std::env::var(&name) {
            Ok(val) => out.push_str(&val),
            Err(_) => {
                out.push('$');
                out.push_str(&name);
            }
        }
    }

    if let Some(rest) = out.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    if out == "~"
        && let Some(home) = dirs::home_dir()
    {
        return home;
    }
    PathBuf::from(out)
}

/// Runs the configured editor (falling back to `$EDITOR`) on `path`.
/// Temporarily disables raw mode and leaves the alternate screen while the
/// editor runs, restoring both on return.
pub fn run_editor(editor: &str, path: &Path) -> io::Result<()> {
    use crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };

    let cmd = if editor.is_empty() {
        std::env::var("EDITOR")
            .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "$EDITOR is empty"))?
    } else {
        editor.to_string()
    };

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    let status = Command::new(cmd).arg(path).status();

    execute!(io::stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;

    if !status?.success() {
        return Err(io::Error::other("editor exited with an error"));
    }
    Ok(())
}

/// Opens `path` with the platform's default application, capturing failure
/// output for the message overlay.
pub fn open_with_os(path: &Path) -> io::Result<()> {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(not(target_os = "macos"))]
    let opener = "xdg-open";

    let output = Command::new(opener).arg(path).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(io::Error::other(stderr));
    }
    Ok(())
}
