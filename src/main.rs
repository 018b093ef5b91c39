//! Audio64 - Audio Base64 Data URI Converter

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;

use audio64::{Args, Command, Config, Decoder, Encoder, MimeType, SourceFile, init_logging};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_args_and_config(&args)?;

    if config.verbose() {
        println!("{}", audio64::get_library_info());
        println!();
    }

    match args.command {
        Command::Encode { inputs, output, mime, workers: _ } => {
            cmd_encode(&config, inputs, output, mime)
        }
        Command::Decode { input, output: _ } => cmd_decode(&config, input),
        Command::Inspect { input } => cmd_inspect(input),
    }
}

fn cmd_encode(
    config: &Config,
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    mime: Option<String>,
) -> anyhow::Result<()> {
    let mime_override = match &mime {
        Some(m) => Some(
            MimeType::parse(m)
                .ok_or_else(|| anyhow::anyhow!("invalid MIME type '{m}': expected type/subtype"))?,
        ),
        None => None,
    };

    if inputs.len() == 1 {
        let source = source_for(&inputs[0], mime_override.as_ref());
        let uri = Encoder::new().encode(&source)?;

        if config.verbose() {
            println!("File: {} ({} URI chars)", source.name(), uri.len());
        }

        match output {
            Some(path) => {
                fs::write(&path, uri.as_str())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Saved Data URI to {}", path.display());
            }
            None => println!("{uri}"),
        }
        return Ok(());
    }

    let out_dir = output.context("encoding several inputs requires -o <DIR>")?;
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let workers = config
        .workers()
        .min(audio64::config::utils::recommended_workers(inputs.len()));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("failed to build worker pool")?;

    println!("=== Audio64 Batch Encode ===");
    println!("Inputs: {}", inputs.len());
    println!("Workers: {}", workers);
    println!("============================\n");

    let started = Instant::now();

    // Each input is an independent encode; the workers share nothing.
    let results: Vec<(PathBuf, anyhow::Result<PathBuf>)> = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| {
                let result = encode_one(input, mime_override.as_ref(), &out_dir);
                (input.clone(), result)
            })
            .collect()
    });

    let mut failed = 0;
    for (input, result) in &results {
        match result {
            Ok(target) => {
                if config.verbose() {
                    println!("{} -> {}", input.display(), target.display());
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}: {e:#}", input.display());
            }
        }
    }

    println!("=== Encoding Complete ===");
    println!("Time: {:.2}s", started.elapsed().as_secs_f64());
    println!("Encoded: {}", results.len() - failed);

    if failed > 0 {
        anyhow::bail!("{failed} of {} inputs failed", results.len());
    }
    Ok(())
}

fn encode_one(
    input: &Path,
    mime_override: Option<&MimeType>,
    out_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let source = source_for(input, mime_override);
    let uri = Encoder::new().encode(&source)?;

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());
    let target = out_dir.join(format!("{stem}.uri.txt"));
    fs::write(&target, uri.as_str())
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target)
}

fn source_for(input: &Path, mime_override: Option<&MimeType>) -> SourceFile {
    let source = SourceFile::open(input);
    match mime_override {
        Some(mime) => source.with_mime_type(mime.clone()),
        None => source,
    }
}

fn cmd_decode(config: &Config, input: Option<PathBuf>) -> anyhow::Result<()> {
    let text = read_input_text(input.as_deref())?;

    let mut decoder = Decoder::new();
    let resource = decoder.decode(&text)?;

    let preview = resource.preview();
    println!("MIME type: {}", preview.mime_type);
    println!("Decoded: {} bytes", preview.bytes.len());
    if config.verbose() {
        println!("Preview handle: {}", preview.handle.display());
    }

    fs::create_dir_all(config.output_dir())
        .with_context(|| format!("failed to create {}", config.output_dir().display()))?;
    let saved = resource
        .download(config.output_dir())
        .with_context(|| format!("failed to save into {}", config.output_dir().display()))?;
    println!("Saved: {}", saved.display());

    Ok(())
}

fn cmd_inspect(input: Option<PathBuf>) -> anyhow::Result<()> {
    let text = read_input_text(input.as_deref())?;
    let report = Decoder::inspect(&text)?;

    println!("=== Data URI Report ===");
    println!("MIME type: {}", report.mime_type);
    println!("Extension hint: {}", report.extension);
    println!("Payload: {} Base64 chars", report.payload_chars);
    println!("Decoded size: {} bytes", report.decoded_bytes);

    Ok(())
}

fn read_input_text(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
