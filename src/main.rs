#[cfg(not(target_family = "unix"))]
compile_error!("monman only runs on UNIX-like systems.");

use std::process::ExitCode;

use clap::Parser;
use monman::cli::Cli;
use notify_rust::Notification;

fn main() -> ExitCode {
    trace_panics();
    let cli = Cli::parse();

    if let Err(err) = monman::init_logging(&cli.log_level, cli.log_path.clone()) {
        eprintln!("{}: {:#}", clap::crate_name!(), err);
    }

    match monman::start(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("{}: {:#}", clap::crate_name!(), err);
            ExitCode::FAILURE
        }
    }
}

fn trace_panics() {
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing_panic::panic_hook(panic_info);
        prev_hook(panic_info);

        // we are already in a panic hook, if that panics as well... then we are
        // entering a recursion loop so we're just ignoring the result
        let _ = Notification::new()
            .appname(clap::crate_name!())
            .urgency(notify_rust::Urgency::Critical)
            .summary("Monman paniced!")
            .body(concat![
                "You likely found a bug. ",
                "Please take a look into the log file (see `monman -h`) and ",
                "create an issue if suitable."
            ])
            .show();
    }));
}
