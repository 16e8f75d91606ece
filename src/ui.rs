use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_skip(message: &str) {
    println!("{} {}", style("skipped:").cyan(), message);
}

pub fn display_resolved_tag(base: &str, resolved: &str) {
    println!("\n{}", style("Resolved tag:").bold());
    println!("  Latest release: {}", style(base).red());
    println!("  Next tag:       {}", style(resolved).green());
}
