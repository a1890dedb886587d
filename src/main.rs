use setcover::{cli, init_logging, run, CliConfig};

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = CliConfig::from_matches(&matches).and_then(|config| {
        init_logging(config.log_level);
        run(config)
    }) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
