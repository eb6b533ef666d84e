fn main() {
    if let Err(error) = checkpost::run() {
        use colored::Colorize;
        eprintln!("{} {}", "✗".bright_red(), error);
        std::process::exit(1);
    }
}
