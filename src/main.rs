// Identity document field extraction from OCR output

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, warn};

use idextract::{
    models::DocumentType,
    parse_file,
    processing::TextFileOcr,
    report::{ExtractionReport, DEFAULT_ACCEPT_THRESHOLD},
    Result,
};

#[derive(Parser, Debug)]
#[command(
    name = "idextract",
    about = "Extract Aadhaar and passport fields from OCR output"
)]
struct Cli {
    /// Document type: aadhar or passport
    #[arg(long, env = "IDEXTRACT_DOCUMENT_TYPE")]
    document_type: DocumentType,

    /// OCR output, either JSON ({"text", "confidence"}) or a plain transcript
    #[arg(long, env = "IDEXTRACT_INPUT")]
    input: PathBuf,

    /// Confidence (0-100) assigned to plain-text transcripts
    #[arg(long, env = "IDEXTRACT_OCR_CONFIDENCE", default_value_t = 100.0)]
    ocr_confidence: f64,

    /// Overall confidence needed for a successful extraction
    #[arg(long, env = "IDEXTRACT_ACCEPT_THRESHOLD", default_value_t = DEFAULT_ACCEPT_THRESHOLD)]
    accept_threshold: f64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// More log output (-v debug, -vv trace) when RUST_LOG is unset
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// Function to print a detailed extraction report
fn print_detailed_report(report: &ExtractionReport) {
    println!("\n===============================================");
    println!("      DOCUMENT EXTRACTION DETAILED REPORT");
    println!("===============================================\n");

    println!("Document Type: {}", report.document_type);
    println!("Status: {}", report.status);
    println!("Overall Confidence: {}%", report.overall_confidence);
    println!("Processing Time: {}ms", report.processing_time_ms);

    println!("\nEXTRACTED FIELDS:");
    for field in &report.extracted_fields {
        let value = if field.field_value.is_empty() {
            "(empty)"
        } else {
            field.field_value.as_str()
        };
        println!(
            "  [{}] {}: \"{}\" ({}%)",
            if field.validated { "OK" } else { "??" },
            field.field_name,
            value,
            field.confidence_score
        );
    }

    let missing: Vec<&str> = report
        .missing_fields()
        .map(|f| f.field_name.as_str())
        .collect();
    if !missing.is_empty() {
        let essential = report.missing_essential_fields();
        println!("\nMISSING FIELDS:");
        for name in missing {
            if essential.contains(&name) {
                println!("  - {} (essential)", name);
            } else {
                println!("  - {}", name);
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<()> {
    let started = Instant::now();
    let ocr = TextFileOcr::new(cli.ocr_confidence);
    let result = parse_file(&ocr, cli.document_type, &cli.input)?;
    if !result.meets_threshold() {
        warn!(
            "Overall confidence {:.2} is below the extraction threshold {:.2}",
            result.confidence_overall, result.threshold
        );
    }
    let report = ExtractionReport::from_parse(
        cli.document_type,
        &result,
        cli.accept_threshold,
        started.elapsed(),
    );

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print_detailed_report(&report);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Extraction failed: {}", err);
            eprintln!("Error extracting {} fields: {}", cli.document_type, err);
            ExitCode::FAILURE
        }
    }
}
