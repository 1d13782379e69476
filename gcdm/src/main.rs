use clap::Parser;
use gcdm::app::GcdmCliArguments;

fn main() {
    env_logger::init();
    let args = GcdmCliArguments::parse();
    match args.op.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running gcdm: {e}");
            std::process::exit(1);
        }
    }
}
