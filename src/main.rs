use clap::Parser;
use giftdeck::cli::commands::Cli;
use giftdeck::cli::handlers;

fn main() {
    // A missing .env is fine; the key can come from the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
