//! Console output formatting
//!
//! Provides formatted console output for aggregated reports.

use report_kit::{CategoryTotals, Outcome, ReferenceLinker, ReportModel, RollupCategory};

use super::ReportEntry;

const RESET: &str = "\x1b[0m";

/// Longest line of a status detail or error trace shown on the console
const MAX_DETAIL_WIDTH: usize = 70;

fn category_color(category: RollupCategory) -> &'static str {
    match category {
        RollupCategory::Pass => "\x1b[32m",
        RollupCategory::Fail => "\x1b[31m",
        RollupCategory::Unknown => "\x1b[33m",
        RollupCategory::NotApplicable => "\x1b[36m",
    }
}

fn category_icon(category: RollupCategory) -> &'static str {
    match category {
        RollupCategory::Pass => "✓",
        RollupCategory::Fail => "✗",
        RollupCategory::Unknown => "?",
        RollupCategory::NotApplicable => "-",
    }
}

/// Print aggregated reports to console in a human-readable format
pub fn print_results(entries: &[ReportEntry], linker: &ReferenceLinker) {
    if entries.is_empty() {
        return;
    }

    println!();
    println!("╔═══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                             COMPLIANCE REPORT                                 ║");
    println!("╚═══════════════════════════════════════════════════════════════════════════════╝");
    println!();

    for (index, entry) in entries.iter().enumerate() {
        print_report(index + 1, entries.len(), entry, linker);
    }

    print_summary_table(entries);
}

/// Print a single report
fn print_report(num: usize, total: usize, entry: &ReportEntry, linker: &ReferenceLinker) {
    let model = &entry.model;
    let benchmark = &model.benchmark;

    println!("┌───────────────────────────────────────────────────────────────────────────────┐");
    println!("│ Report {}/{}: {}", num, total, entry.source.display());
    println!("├───────────────────────────────────────────────────────────────────────────────┤");
    match benchmark.display_version() {
        Some(version) => println!("│ Benchmark:   {} {}", benchmark.benchmark_title, version),
        None => println!("│ Benchmark:   {}", benchmark.benchmark_title),
    }
    if !benchmark.profile_name.is_empty() {
        println!("│ Profile:     {}", benchmark.profile_name);
    }
    println!(
        "│ Rules:       {}",
        format_distribution(model.rules.len(), &model.rule_result_totals)
    );
    println!(
        "│ Targets:     {}",
        format_distribution(model.targets.len(), &model.target_result_totals)
    );

    print_failing_rules(model, linker);
    print_diagnostics(model);

    println!("└───────────────────────────────────────────────────────────────────────────────┘");
    println!();
}

fn format_distribution(count: usize, totals: &CategoryTotals) -> String {
    let parts: Vec<String> = RollupCategory::ALL
        .iter()
        .filter(|category| totals[**category] > 0)
        .map(|category| {
            format!(
                "{}{} {}{}",
                category_color(*category),
                totals[*category],
                category.label().to_lowercase(),
                RESET
            )
        })
        .collect();

    if parts.is_empty() {
        count.to_string()
    } else {
        format!("{} ({})", count, parts.join(", "))
    }
}

/// Rules that failed somewhere, with the failing targets and their references
fn print_failing_rules(model: &ReportModel, linker: &ReferenceLinker) {
    let failing: Vec<_> = model.rules_in(RollupCategory::Fail).collect();
    if failing.is_empty() {
        return;
    }

    println!("├───────────────────────────────────────────────────────────────────────────────┤");
    println!("│ Failing Rules ({}):", failing.len());
    for (index, rule) in failing {
        println!("│   • {}", rule.title);
        let targets: Vec<&str> = model
            .targets_for(index, Outcome::Fail)
            .iter()
            .map(|target| target.name)
            .collect();
        println!("│       Failed on: {}", targets.join(", "));

        let references: Vec<String> = rule
            .references
            .iter()
            .map(|reference| {
                let display = linker.display(reference);
                match display.url {
                    Some(url) => format!("{} <{}>", display.text, url),
                    None => display.text,
                }
            })
            .collect();
        if !references.is_empty() {
            println!("│       References: {}", references.join(", "));
        }
    }
}

/// Targets that carry a status detail or error trace
fn print_diagnostics(model: &ReportModel) {
    let targets: Vec<_> = model
        .targets
        .iter()
        .filter(|target| target.has_diagnostics())
        .collect();
    if targets.is_empty() {
        return;
    }

    println!("├───────────────────────────────────────────────────────────────────────────────┤");
    println!("│ Target Diagnostics ({}):", targets.len());
    for target in targets {
        let marker = if target.evaluation_failed {
            " (not evaluated)"
        } else {
            ""
        };
        println!("│   • {}{}", target.friendly_name, marker);
        let lines = target
            .status_detail
            .iter()
            .chain(target.error_trace.iter())
            .flat_map(|text| text.lines().take(3));
        for line in lines {
            println!("│       {}", truncate(line, MAX_DETAIL_WIDTH));
        }
    }
}

fn truncate(line: &str, width: usize) -> String {
    if line.chars().count() > width {
        let kept: String = line.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        line.to_string()
    }
}

/// Print summary table
fn print_summary_table(entries: &[ReportEntry]) {
    let mut rows = [[0usize; 2]; RollupCategory::COUNT];
    for entry in entries {
        for category in RollupCategory::ALL {
            rows[category.index()][0] += entry.model.rule_result_totals[category];
            rows[category.index()][1] += entry.model.target_result_totals[category];
        }
    }
    let rule_total: usize = rows.iter().map(|row| row[0]).sum();
    let target_total: usize = rows.iter().map(|row| row[1]).sum();

    println!("╔═══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                                 SUMMARY                                       ║");
    println!("╠═══════════════════════════════════════════════════════════════════════════════╣");
    println!("║                                                                               ║");
    println!(
        "║   Total Reports: {:3}                                                         ║",
        entries.len()
    );
    println!("║                                                                               ║");
    println!("║   By Category:           Rules   Targets                                      ║");
    println!("║   ─────────────────────────────────────────                                   ║");
    for category in RollupCategory::ALL {
        let row = rows[category.index()];
        println!(
            "║   {}{:<22}{}{:5}   {:7}                                      ║",
            category_color(category),
            category.label(),
            RESET,
            row[0],
            row[1]
        );
    }
    println!("║   ─────────────────────────────────────────                                   ║");
    println!(
        "║   {:<22}{:5}   {:7}                                      ║",
        "Total", rule_total, target_total
    );
    println!("║                                                                               ║");
    println!("╚═══════════════════════════════════════════════════════════════════════════════╝");
    println!();
}

/// Print a compact single-line result for progress output
pub fn print_progress_result(num: usize, total: usize, entry: &ReportEntry) {
    let model = &entry.model;
    let worst = worst_category(model);

    println!(
        "[{}/{}] {}{}{} {} ({} rules, {} targets)",
        num,
        total,
        category_color(worst),
        category_icon(worst),
        RESET,
        entry.source.display(),
        model.rules.len(),
        model.targets.len()
    );
}

/// Rollup of the report as a whole: the first category, in precedence
/// order, that any rule landed in
fn worst_category(model: &ReportModel) -> RollupCategory {
    [
        RollupCategory::Fail,
        RollupCategory::Unknown,
        RollupCategory::Pass,
    ]
    .into_iter()
    .find(|category| model.rule_result_totals[*category] > 0)
    .unwrap_or(RollupCategory::NotApplicable)
}
