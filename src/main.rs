use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use media_budget::cli::Args;
use media_budget::config::Settings;
use media_budget::model::budget::HumanBytes;
use media_budget::pdf::{NoRasterizer, Rasterizer};
use media_budget::{compress, CancellationToken, CompressedOutput, MediaType, SourceFile};

/// Leading bytes read to route an input before loading it
const SNIFF_LEN: u64 = 64;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    if args.output.is_some() && args.inputs.len() > 1 {
        anyhow::bail!("--output can only be used with a single input file");
    }

    let settings = Settings::from_args(&args).with_context(|| "Invalid settings")?;

    if args.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build_global()
            .with_context(|| format!("Failed to start {} worker threads", args.jobs))?;
    }

    log::info!(
        "Compressing {} files to {} each",
        args.inputs.len(),
        settings.budget
    );

    let (pdfs, images): (Vec<_>, Vec<_>) = args
        .inputs
        .iter()
        .enumerate()
        .partition(|(_, path)| is_pdf_input(path));

    let cancel = CancellationToken::new();
    let (mut reports, pdf_reports) = rayon::join(
        || {
            images
                .par_iter()
                .map(|&(index, path)| (index, process(&args, path, &settings, &NoRasterizer, &cancel)))
                .collect::<Vec<_>>()
        },
        || compress_pdfs(&args, &pdfs, &settings, &cancel),
    );
    reports.extend(pdf_reports);
    reports.sort_by_key(|(index, _)| *index);

    let mut failures = 0;
    for (index, report) in reports {
        match report {
            Ok(message) => println!("{}", message),
            Err(e) => {
                eprintln!("{}: {:#}", args.inputs[index].display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files failed", failures, args.inputs.len());
    }

    Ok(())
}

/// PDFs run one after another on a single thread, which owns the rasterizer
/// for its whole lifetime.
fn compress_pdfs(
    args: &Args,
    pdfs: &[(usize, &PathBuf)],
    settings: &Settings,
    cancel: &CancellationToken,
) -> Vec<(usize, Result<String>)> {
    if pdfs.is_empty() {
        return Vec::new();
    }
    let rasterizer = pdf_rasterizer();
    pdfs.iter()
        .map(|&(index, path)| (index, process(args, path, settings, rasterizer.as_ref(), cancel)))
        .collect()
}

fn pdf_rasterizer() -> Box<dyn Rasterizer> {
    #[cfg(feature = "pdfium")]
    match media_budget::pdf::PdfiumRasterizer::bind() {
        Ok(rasterizer) => return Box::new(rasterizer),
        Err(e) => log::warn!("{}", e),
    }
    Box::new(NoRasterizer)
}

/// Route on the leading bytes, falling back to the extension
fn is_pdf_input(path: &Path) -> bool {
    let mut head = Vec::new();
    let sniffed = fs::File::open(path)
        .and_then(|file| file.take(SNIFF_LEN).read_to_end(&mut head))
        .ok()
        .and_then(|_| MediaType::sniff(&head));
    sniffed
        .or_else(|| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .and_then(MediaType::from_extension)
        })
        .is_some_and(|media_type| media_type.is_pdf())
}

/// Read, compress and write one input; the file is only held in memory
/// while its own job runs.
fn process(
    args: &Args,
    path: &Path,
    settings: &Settings,
    rasterizer: &dyn Rasterizer,
    cancel: &CancellationToken,
) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let source = SourceFile::detect(bytes, name)
        .with_context(|| format!("Unsupported input file: {}", path.display()))?;

    let output = compress(&source, settings, rasterizer, cancel)?;
    write_output(args, path, &source, output)
}

fn write_output(
    args: &Args,
    input: &Path,
    source: &SourceFile,
    output: CompressedOutput,
) -> Result<String> {
    let output_path = args.output_path(input, output.media_type);
    fs::write(&output_path, &output.bytes)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;
    Ok(format!(
        "{} -> {} ({} -> {}, {})",
        input.display(),
        output_path.display(),
        HumanBytes(source.size()),
        HumanBytes(output.size()),
        output.strategy
    ))
}
