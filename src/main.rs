fn main() {
    if let Err(e) = sensor_reports::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
