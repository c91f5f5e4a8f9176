use epw_bins::{analyze_file, AnalysisConfig};

/// Usage: bin-hours <weather.epw> [config.toml]
fn main() -> miette::Result<()> {
    let mut args = std::env::args().skip(1);
    let file = args
        .next()
        .ok_or_else(|| miette::miette!("Missing weather file"))?;
    let config = match args.next() {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    println!("opening {file}");
    let report = analyze_file(&file, &config)?;

    for issue in &report.issues {
        eprintln!("line {}: {}", issue.line, issue.error);
    }
    println!(
        "{} hours, weekends {}, occupied {}..={}",
        report.records.len(),
        if report.filters.include_weekends { "included" } else { "excluded" },
        report.filters.occupied_hour_start,
        report.filters.occupied_hour_end,
    );
    println!("{}", report.aggregation);

    Ok(())
}
