use clap::Parser;

use idextract::processing::MrzDecoder;
use idextract::Result;

#[derive(Parser, Debug)]
#[command(
    name = "mrz_decode",
    about = "Decode the two TD3 machine readable zone lines of a passport"
)]
struct MrzCli {
    /// First MRZ line (P<...)
    line1: String,

    /// Second MRZ line (passport number, nationality, dates)
    line2: String,

    /// Apply OCR confusion correction before decoding
    #[arg(long)]
    correct: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = MrzCli::parse();

    let (line1, line2) = if cli.correct {
        (
            MrzDecoder::correct_line(&MrzDecoder::clean_line(&cli.line1)),
            MrzDecoder::correct_line(&MrzDecoder::clean_line(&cli.line2)),
        )
    } else {
        (cli.line1.trim().to_string(), cli.line2.trim().to_string())
    };

    let record = MrzDecoder::decode_lines(&line1, &line2);
    if record.is_empty() {
        log::warn!("Neither line decoded; check the TD3 layout");
    }
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
