use colored::Colorize;

pub fn run() {
    println!(
        "{} {}",
        "zigzag".bold(),
        env!("CARGO_PKG_VERSION").green()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION").dimmed());
}
