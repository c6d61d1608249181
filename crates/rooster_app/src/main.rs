use rooster_app::app::{run, AppConfig};

fn main() {
    tracing_subscriber::fmt::init();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err:#}");
            std::process::exit(2);
        }
    };
    if let Err(err) = run(config) {
        eprintln!("Failed to start Rooster: {err:#}");
        std::process::exit(1);
    }
}
