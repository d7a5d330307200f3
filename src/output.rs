//! Terminal output: spinners, status lines and result blocks

use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};

use crate::file_handler::human_readable_size;
use crate::session::{ConversionSession, OutputOptions};
use crate::types::ConversionReport;

pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");

/// Spinner that keeps ticking while a conversion runs on a worker.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}{}",
        SPARKLE,
        style("File Converter").cyan().bold()
    );
    println!(
        "    {}",
        style("Easily convert files from one format to another").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

pub fn print_info(message: &str) {
    println!("    {} {}", style("•").cyan(), message);
}

pub fn print_warning(message: &str) {
    println!("    {} {}", style("⚠").yellow().bold(), style(message).yellow());
}

pub fn print_error(title: &str, message: &str) {
    eprintln!();
    eprintln!("    {} {}", style("✗").red().bold(), style(title).red().bold());
    eprintln!("      {}", message);
    eprintln!();
}

pub fn print_file_list(session: &ConversionSession) {
    println!();
    if session.files().is_empty() {
        print_info("Welcome! Add files to convert.");
        return;
    }

    println!("    {}{}", FOLDER, style("Files").white().bold());
    for (index, entry) in session.files().iter().enumerate() {
        let marker = if session.selected_indices().contains(&index) {
            style("▶").cyan().bold().to_string()
        } else {
            " ".to_string()
        };
        println!("    {} {:>2}. {}", marker, index + 1, entry.display_text());
    }

    match session.output_options() {
        OutputOptions::Formats(formats) => {
            let tokens: Vec<&str> = formats.iter().map(|f| f.token()).collect();
            println!(
                "    {} {}",
                style("Output formats:").dim(),
                style(tokens.join(", ")).yellow()
            );
        }
        other => {
            if let Some(placeholder) = other.placeholder() {
                println!("    {} {}", style("Output formats:").dim(), style(placeholder).dim());
            }
        }
    }
    println!();
}

pub fn print_report(report: &ConversionReport) {
    print_success(&format!(
        "Converted {} to {}",
        report.input.display(),
        report.format
    ));
    println!("      {}{}", SAVE, report.output.display());
    println!(
        "      Size: {} -> {}",
        human_readable_size(report.input_size),
        human_readable_size(report.output_size)
    );
    if let Some(pages) = report.pages {
        println!("      Pages: {}", pages);
    }
}
