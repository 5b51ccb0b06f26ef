use fib_benchmark::run_benchmark;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // On Windows, set the console output codepage to UTF-8
    #[cfg(windows)]
    {
        if !std::process::Command::new("chcp")
            .arg("65001")
            .status()
            .map_or(false, |s| s.success())
        {
            log::warn!("failed to set console codepage to UTF-8, some characters may not display correctly");
        }
    }

    if let Err(e) = run_benchmark() {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}
