use clap::Parser;
use stress::CommandArgs;

fn init_logger(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let args = CommandArgs::parse();
    init_logger(args.verbose);
    log::debug!("{args:?}");

    if let Err(e) = stress::drive(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
