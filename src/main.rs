use clap::Parser;
use people_directory::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();

    if let Err(e) = people_directory::run(cli).await {
        log::error!("{}", e);
        eprintln!("people-directory: {}", e);
        std::process::exit(1);
    }
}
