use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "menubar_app")]
#[command(about = "macOS menu bar app template", long_about = None)]
struct Args {
    /// Verbose output (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Open the settings panel right after launch
    #[arg(long = "settings")]
    open_settings: bool,
}

fn main() {
    let args = Args::parse();

    let verbosity = args.verbose.min(3);

    use menubar_app::config::Config;
    Config::ensure_log_directory().ok();
    menubar_app::init_tracing(verbosity, Some(Config::log_file_path()));
    menubar_app::set_verbosity(verbosity);

    let options = menubar_app::LaunchOptions {
        open_settings: args.open_settings,
    };
    if let Err(e) = menubar_app::run(options) {
        tracing::error!("{:#}", e);
        eprintln!("menubar_app: {:#}", e);
        std::process::exit(1);
    }
}
