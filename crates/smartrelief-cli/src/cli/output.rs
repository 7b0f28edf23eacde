//! Human-readable rendering of assessment reports.

use smartrelief_assess::domain::AssessmentStatus;
use smartrelief_assess::AssessmentReport;
use std::path::Path;

use super::commands::batch::BatchEntry;

pub fn print_report(source: &Path, report: &AssessmentReport) {
    println!("Assessment: {}", source.display());
    if let AssessmentStatus::Degraded { error } = &report.status {
        println!("  Status:        DEGRADED ({error})");
    }
    println!(
        "  Damage:        {} (score {:.2}, confidence {:.2}, {:?})",
        report.damage_level, report.damage.damage_score, report.damage.confidence, report.damage.source
    );
    println!("  Severity:      {:.1} / 10", report.severity_value());
    println!(
        "  Priority:      {:.1} ({}, respond {})",
        report.priority.value, report.priority.urgency_level, report.priority.estimated_response_time
    );
    if let Some(disaster) = &report.disaster_type {
        println!("  Disaster:      {disaster}");
    }
    if let Some(area) = &report.affected_area {
        println!(
            "  Affected area: {:.2} km2 around {} (~{} people)",
            area.area_km2, area.center, area.estimated_population_affected
        );
    }

    let infra = &report.infrastructure;
    println!(
        "  Structure:     {} | safety {} | access {}",
        infra.structural_integrity.status.label(),
        infra.safety.level.label(),
        infra.accessibility.status.label()
    );
    if !infra.utilities.affected.is_empty() {
        let utilities: Vec<_> = infra.utilities.affected.iter().map(|u| u.label()).collect();
        println!("  Utilities:     {}", utilities.join(", "));
    }

    let people = &report.resources.personnel;
    println!(
        "  Personnel:     {} responders, {} medical, {} engineers, {} volunteers",
        people.emergency_responders, people.medical_personnel, people.engineers, people.volunteers
    );
    println!(
        "  Cost:          ${} (${} - ${})",
        report.resources.cost_estimate.amount_usd,
        report.resources.cost_estimate.low_usd,
        report.resources.cost_estimate.high_usd
    );

    println!("  Recommendations:");
    for (i, item) in report.recommendations.iter().enumerate() {
        println!("    {}. {item}", i + 1);
    }
    println!("  Processed in {} ms", report.processing_time_ms);
}

pub fn print_batch_summary(entries: &[BatchEntry]) {
    let mut failed = 0usize;
    let mut degraded = 0usize;

    println!("{:<40} {:>8} {:>8} {:<10}", "FILE", "SEVERITY", "PRIORITY", "LEVEL");
    for entry in entries {
        let name = entry
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.file.display().to_string());
        match (&entry.report, &entry.error) {
            (Some(report), _) => {
                if !report.is_completed() {
                    degraded += 1;
                }
                println!(
                    "{:<40} {:>8.1} {:>8.1} {:<10}",
                    name,
                    report.severity_value(),
                    report.priority.value,
                    report.damage_level.as_str()
                );
            }
            (None, error) => {
                failed += 1;
                println!("{:<40} error: {}", name, error.as_deref().unwrap_or("unknown"));
            }
        }
    }

    println!(
        "\n{} images, {} failed, {} degraded",
        entries.len(),
        failed,
        degraded
    );
}
