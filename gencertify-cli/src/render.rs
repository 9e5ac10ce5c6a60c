//! Terminal rendering shared by the command handlers

use colored::*;
use gencertify_core::domain::certification::{Certification, CertificationResult, ReadinessLevel};
use gencertify_core::domain::document::GeneratedDocument;

const BAR_WIDTH: usize = 20;

/// Text progress bar, e.g. `[#####---------------]  25%`
///
/// Jobs that do not report progress get an indeterminate label instead.
pub fn progress_bar(progress: Option<u8>) -> String {
    match progress {
        Some(progress) => {
            let progress = progress.min(100);
            let filled = usize::from(progress) * BAR_WIDTH / 100;
            format!(
                "[{}{}] {:>3}%",
                "#".repeat(filled),
                "-".repeat(BAR_WIDTH - filled),
                progress
            )
        }
        None => "in progress".to_string(),
    }
}

/// Colorize a readiness level for display
pub fn colorize_readiness(level: Option<ReadinessLevel>) -> ColoredString {
    match level {
        Some(ReadinessLevel::High) => "High".green().bold(),
        Some(ReadinessLevel::Medium) => "Medium".yellow().bold(),
        Some(ReadinessLevel::Low) => "Low".red().bold(),
        None => "Unknown".dimmed(),
    }
}

/// Print one card per evaluated certification
pub fn print_results(results: &[CertificationResult]) {
    if results.is_empty() {
        println!("{}", "No results available yet.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Readiness for {} certification(s):", results.len()).bold()
    );
    println!();

    for result in results {
        print_result_card(result);
    }
}

fn print_result_card(result: &CertificationResult) {
    println!(
        "  {} {}",
        "▸".cyan(),
        result.certification_type.display_name().bold()
    );
    println!("    Readiness: {}", colorize_readiness(result.readiness_level));
    if let Some(score) = result.overall_score {
        println!("    Score:     {:.1}/100", score);
    }
    if !result.summary.is_empty() {
        println!("    {}", result.summary.dimmed());
    }

    print_list("Strengths", &result.strengths, "+".green());
    print_list("Gaps", &result.weaknesses, "-".red());
    print_list("Recommendations", &result.recommendations, "→".cyan());
    println!();
}

fn print_list(title: &str, items: &[String], bullet: ColoredString) {
    if items.is_empty() {
        return;
    }
    println!("    {}:", title);
    for item in items {
        println!("      {} {}", bullet, item);
    }
}

/// Print generated documents with their download links
pub fn print_documents(documents: &[GeneratedDocument]) {
    if documents.is_empty() {
        println!("{}", "No documents generated yet.".yellow());
        return;
    }

    println!("{}", format!("Found {} document(s):", documents.len()).bold());
    println!();

    for document in documents {
        let format = document
            .format
            .map(|f| format!("{:?}", f).to_uppercase())
            .unwrap_or_else(|| "?".to_string());

        println!("  {} {}", "▸".cyan(), document.document_type.to_string().bold());
        println!("    File:      {} ({})", document.filename, format.dimmed());
        if let Some(size) = document.size_bytes {
            println!("    Size:      {}", format_size(size).dimmed());
        }
        if let Some(generated_at) = document.generated_at {
            println!(
                "    Generated: {}",
                generated_at
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
                    .dimmed()
            );
        }
        println!("    Download:  {}", document.download_url.underline());
        println!();
    }
}

/// Print the certification catalog
pub fn print_certifications(certifications: &[Certification]) {
    if certifications.is_empty() {
        println!("{}", "No certifications available.".yellow());
        return;
    }

    for certification in certifications {
        println!(
            "  {} {} {}",
            "▸".cyan(),
            certification.name.bold(),
            format!("({})", certification.id).dimmed()
        );
        if !certification.description.is_empty() {
            println!("    {}", certification.description);
        }
    }
}

fn format_size(bytes: u64) -> String {
    match bytes {
        b if b >= 1024 * 1024 => format!("{:.1} MiB", b as f64 / (1024.0 * 1024.0)),
        b if b >= 1024 => format!("{:.1} KiB", b as f64 / 1024.0),
        b => format!("{} B", b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(Some(0)), "[--------------------]   0%");
        assert_eq!(progress_bar(Some(25)), "[#####---------------]  25%");
        assert_eq!(progress_bar(Some(100)), "[####################] 100%");
        assert_eq!(progress_bar(None), "in progress");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }
}
