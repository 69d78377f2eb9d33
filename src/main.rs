//! main.rs
//! Entry point for faro

use faro::app::AppState;
use faro::config::Config;
use faro::core::terminal;
use faro::utils::{CliAction, expand_env_path, handle_args};

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[faro] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let action = handle_args();

    let config = Config::load();
    let options = config.view_options();

    let mut app = match action {
        CliAction::Exit => return Ok(()),
        CliAction::RunApp => AppState::new(options)?,
        CliAction::RunAppAtPath(path_arg) => {
            let target = expand_env_path(&path_arg);
            if !target.is_dir() {
                eprintln!("\n[faro] Error: path '{}' cannot be opened.", path_arg);
                std::process::exit(1);
            }
            AppState::from_dir(options, &target)?
        }
    };

    terminal::run_terminal(&mut app, config.refresh_interval())
}
