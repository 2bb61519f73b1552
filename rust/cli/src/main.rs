fn main() {
    holdem_cli::init_logging();
    let code = holdem_cli::run(
        std::env::args(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(code);
}
