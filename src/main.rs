mod cli;
mod config;
mod core;
mod logging;
mod models;
mod sources;

use clap::Parser;

fn main() {
    // .env가 없어도 된다. 자격증명은 환경 변수나 설정 파일에서 온다.
    let _ = dotenv::dotenv();

    let cli = cli::Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("{:#}", e);
    }

    if let Err(e) = cli::run(cli) {
        eprintln!("오류: {:#}", e);
        std::process::exit(1);
    }
}
