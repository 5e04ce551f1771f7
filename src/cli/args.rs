use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::defaults::{DEFAULT_MAX_DIMENSION, DEFAULT_PDF_SCALE};
use crate::model::{MediaType, SizeBudget};

#[derive(Parser, Debug)]
#[command(name = "media-budget")]
#[command(
    author,
    version,
    about = "Squeeze oversized images and PDFs under a byte-size budget before upload"
)]
pub struct Args {
    /// Input image or PDF files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file path (single input only; defaults to <stem>.min.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Size budget (e.g. "10MiB", "500KB", "2000000")
    #[arg(short, long, default_value = "10MiB", value_parser = parse_budget)]
    pub budget: SizeBudget,

    /// Largest width or height of an image rendition, in pixels
    #[arg(long, default_value_t = DEFAULT_MAX_DIMENSION)]
    pub max_dimension: u32,

    /// Page render scale for PDFs
    #[arg(long, default_value_t = DEFAULT_PDF_SCALE)]
    pub pdf_scale: f32,

    /// Worker threads for image inputs (0 = one per CPU)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Where the rendition of `input` should be written
    pub fn output_path(&self, input: &Path, media_type: MediaType) -> PathBuf {
        if let (Some(output), 1) = (&self.output, self.inputs.len()) {
            return output.clone();
        }
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        input.with_file_name(format!("{}.min.{}", stem, media_type.extension()))
    }
}

/// Parse a byte size such as "10MiB", "1.5 MB" or "2048"
pub fn parse_size(spec: &str) -> Result<u64, String> {
    let spec = spec.trim();
    let split = spec
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(spec.len());
    let (number, unit) = spec.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| format!("Invalid size: {}", spec))?;
    let multiplier: u64 = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "kb" | "k" => 1_000,
        "kib" => 1 << 10,
        "mb" | "m" => 1_000_000,
        "mib" => 1 << 20,
        "gb" | "g" => 1_000_000_000,
        "gib" => 1 << 30,
        other => return Err(format!("Unknown size unit: {}", other)),
    };

    let bytes = (value * multiplier as f64).round();
    if !bytes.is_finite() || bytes < 1.0 || bytes > u64::MAX as f64 {
        return Err(format!("Size out of range: {}", spec));
    }
    Ok(bytes as u64)
}

fn parse_budget(spec: &str) -> Result<SizeBudget, String> {
    let bytes = parse_size(spec)?;
    SizeBudget::new(bytes).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_bytes() {
        assert_eq!(parse_size("2048"), Ok(2048));
        assert_eq!(parse_size("512B"), Ok(512));
    }

    #[test]
    fn test_parse_binary_and_decimal_units() {
        assert_eq!(parse_size("10MiB"), Ok(10 * 1024 * 1024));
        assert_eq!(parse_size("10MB"), Ok(10_000_000));
        assert_eq!(parse_size("500 KB"), Ok(500_000));
        assert_eq!(parse_size("1.5kib"), Ok(1536));
        assert_eq!(parse_size("1GiB"), Ok(1 << 30));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_size("").is_err());
        assert!(parse_size("ten").is_err());
        assert!(parse_size("10 parsecs").is_err());
        assert!(parse_size("0").is_err());
    }

    #[test]
    fn test_default_output_path() {
        let args = Args::parse_from(["media-budget", "gallery/tower.png"]);
        assert_eq!(
            args.output_path(Path::new("gallery/tower.png"), MediaType::Jpeg),
            PathBuf::from("gallery/tower.min.jpg")
        );
        assert_eq!(args.budget, SizeBudget::default());
        assert_eq!(args.jobs, 0);
    }

    #[test]
    fn test_worker_count() {
        let args = Args::parse_from(["media-budget", "a.jpg", "b.jpg", "-j", "3"]);
        assert_eq!(args.jobs, 3);
        assert_eq!(args.inputs.len(), 2);
    }

    #[test]
    fn test_explicit_output_path() {
        let args = Args::parse_from(["media-budget", "a.pdf", "-o", "small.pdf", "-b", "2MB"]);
        assert_eq!(
            args.output_path(Path::new("a.pdf"), MediaType::Pdf),
            PathBuf::from("small.pdf")
        );
        assert_eq!(args.budget.bytes(), 2_000_000);
    }

    #[test]
    fn test_zero_budget_rejected_by_cli() {
        assert!(Args::try_parse_from(["media-budget", "a.pdf", "-b", "0"]).is_err());
    }
}
