use std::io::Write;
use std::process::ExitCode;

use sync_deque::workload::{self, DrillConfig};

fn main() -> ExitCode {
    init_log();

    let config = match DrillConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{:#}", e);
            log::error!("usage: sync_deque [producers] [items_per_producer] [consumers] [poll|wait|timed] [start_delay_ms]");
            return ExitCode::FAILURE;
        }
    };

    match workload::run(&config) {
        Ok(report) if report.is_conserved() => ExitCode::SUCCESS,
        Ok(report) => {
            log::error!("conservation failed: {}", report);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_log() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                record.args()
            )
        })
        .init();
}
