//! Run command implementation.
//!
//! Assembles a program from presets, map files and inline expressions, then
//! applies it to one image, a directory of images, or stdin.

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use image::RgbaImage;
use walkdir::WalkDir;

use crate::codec::{self, EncoderOptions, Format, FormatRegistry};
use crate::config::{Config, CONFIG_FILENAME};
use crate::engine::Executor;
use crate::error::{MapError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::{parse_rule, LineOutcome, Program};
use crate::types::{BuiltinPresets, Channel, Expression};
use crate::validation::{validate_match_rule, validate_produce_rule};

/// Apply a program of expressions to an image or a directory of images
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Input image or directory (default: stdin)
    pub input: Option<PathBuf>,

    /// Map file with one expression per line
    #[arg(short = 'm', long = "map", value_name = "FILE")]
    pub maps: Vec<PathBuf>,

    /// Inline expression (8 channel tokens)
    #[arg(short = 'e', long = "expr", value_name = "LINE", allow_hyphen_values = true)]
    pub exprs: Vec<String>,

    /// Match rule of a single expression
    #[arg(long, value_name = "RULE", requires = "to", allow_hyphen_values = true)]
    pub from: Option<String>,

    /// Produce rule of a single expression
    #[arg(long, value_name = "RULE", requires = "from", allow_hyphen_values = true)]
    pub to: Option<String>,

    /// Builtin or configured preset
    #[arg(short = 'p', long = "preset", value_name = "NAME")]
    pub presets: Vec<String>,

    /// Apply one channel token to R, G and B (e.g. +10%, -20)
    #[arg(long, value_name = "CHANNEL", allow_hyphen_values = true)]
    pub brightness: Option<String>,

    /// Output file or directory (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (default: from the output extension, then config)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Encoder options, e.g. "quality:90"
    #[arg(long, value_name = "OPTIONS")]
    pub options: Option<String>,

    /// Evaluate on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Config file (default: ./imgmap.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: RunArgs, printer: &Printer) -> Result<()> {
    let config = Config::discover(args.config.as_deref(), Path::new("."))?;
    for name in config.shadowed_presets() {
        printer.warning(
            "Ignoring",
            &format!("preset `{}` in {} (a builtin has that name)", name, CONFIG_FILENAME),
        );
    }

    let program = build_program(&args, &config)?;
    if program.is_empty() {
        return Err(MapError::Validation {
            message: "no expressions to apply".to_string(),
            help: Some("Pass --map, --expr, --from/--to, --preset or --brightness".to_string()),
        });
    }
    report_program(&program, printer);

    let registry = FormatRegistry::with_builtins();
    let mut options = config.encoder_options();
    if let Some(extra) = &args.options {
        options.merge(EncoderOptions::parse(extra));
    }

    let job = Job {
        program: &program,
        executor: Executor::new().with_parallel(config.parallel && !args.sequential),
        registry: &registry,
        options,
        printer,
    };

    match &args.input {
        Some(input) if input.is_dir() => {
            let out_dir = args.output.as_deref().ok_or_else(|| MapError::Validation {
                message: format!("{} is a directory", display_path(input)),
                help: Some("Pass --output with a directory to write into".to_string()),
            })?;
            let format = args.format.as_deref().map(|name| registry.get(name)).transpose()?;
            let count = job.run_directory(input, out_dir, format)?;
            printer.success("Finished", &plural(count, "image", "images"));
        }
        Some(input) => {
            let image = codec::open(input)?;
            let format = output_format(&args, &config, &registry)?;
            job.map_image(image, &display_path(input), format, args.output.as_deref())?;
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin().lock().read_to_end(&mut bytes)?;
            let image = codec::decode(&bytes)?;
            let format = output_format(&args, &config, &registry)?;
            job.map_image(image, "<stdin>", format, args.output.as_deref())?;
        }
    }

    Ok(())
}

/// Assemble the program: presets, brightness, map files, inline expressions,
/// then the --from/--to pair.
pub fn build_program(args: &RunArgs, config: &Config) -> Result<Program> {
    let mut program = Program::new();

    for name in &args.presets {
        let preset = config.preset(name).ok_or_else(|| MapError::Validation {
            message: format!("unknown preset {:?}", name),
            help: Some("Run `imgmap presets` to list the available presets".to_string()),
        })?;
        program.extend(preset);
    }

    if let Some(token) = &args.brightness {
        let channel: Channel = token.parse().map_err(|e: MapError| e.context("--brightness"))?;
        program.extend(BuiltinPresets::brightness(channel)?.program());
    }

    for path in &args.maps {
        program.extend(Program::load(path)?);
    }

    for (i, line) in args.exprs.iter().enumerate() {
        program.extend(Program::parse(&format!("<expr {}>", i + 1), line));
    }

    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        let from = parse_rule(from).map_err(|e| e.context("--from"))?;
        validate_match_rule(&from).map_err(|e| e.context("--from"))?;
        let to = parse_rule(to).map_err(|e| e.context("--to"))?;
        validate_produce_rule(&to).map_err(|e| e.context("--to"))?;
        program.extend(Program::from_expressions("<from/to>", [Expression::new(from, to)]));
    }

    Ok(program)
}

/// Print rejected and skipped lines once, before any image is touched.
fn report_program(program: &Program, printer: &Printer) {
    for line in program.rejected() {
        if let Some(err) = line.error() {
            printer.diagnostic(
                "warning",
                err.code(),
                false,
                &line.location(),
                &err.to_string(),
                err.help_text(),
            );
        }
    }

    let skipped = program
        .lines()
        .iter()
        .filter(|l| matches!(l.outcome, LineOutcome::Ignored { tokens } if tokens > 0))
        .count();
    if skipped > 0 {
        printer.warning(
            "Skipping",
            &format!("{} without 8 tokens", plural(skipped, "line", "lines")),
        );
    }
}

/// Output format for a single image: --format, then the output extension,
/// then the config default.
fn output_format<'r>(
    args: &RunArgs,
    config: &Config,
    registry: &'r FormatRegistry,
) -> Result<&'r Format> {
    if let Some(name) = &args.format {
        return registry.get(name);
    }
    if let Some(format) = args.output.as_deref().and_then(|p| registry.for_path(p)) {
        return Ok(format);
    }
    registry.get(&config.format)
}

struct Job<'a> {
    program: &'a Program,
    executor: Executor,
    registry: &'a FormatRegistry,
    options: EncoderOptions,
    printer: &'a Printer,
}

impl Job<'_> {
    /// Run the program on one image and write the result to `output`, or
    /// stdout when there is none.
    fn map_image(
        &self,
        image: RgbaImage,
        label: &str,
        format: &Format,
        output: Option<&Path>,
    ) -> Result<()> {
        let (width, height) = image.dimensions();
        self.printer
            .status("Mapping", &format!("{} ({}x{})", label, width, height));

        let execution = self.executor.run(self.program, image)?;

        match output {
            Some(path) => {
                write_file(path, format, &execution.image, &self.options)?;
                self.printer.success(
                    "Wrote",
                    &format!(
                        "{} ({}, {})",
                        display_path(path),
                        format.name,
                        plural(execution.applied, "expression", "expressions")
                    ),
                );
            }
            None => {
                let mut out = BufWriter::new(io::stdout().lock());
                format.encode(&mut out, &execution.image, &self.options)?;
                out.flush()?;
            }
        }

        Ok(())
    }

    /// Map every image under `dir` into the same relative path under
    /// `out_dir`. Without a format each file keeps its own.
    fn run_directory(&self, dir: &Path, out_dir: &Path, format: Option<&Format>) -> Result<usize> {
        let mut inputs = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| MapError::Io {
                path: e.path().unwrap_or(dir).to_path_buf(),
                message: format!("Failed to walk directory: {}", e),
            })?;
            if entry.file_type().is_file() {
                if let Some(source_format) = self.registry.for_path(entry.path()) {
                    inputs.push((entry.into_path(), source_format));
                }
            }
        }

        if inputs.is_empty() {
            self.printer
                .warning("Empty", &format!("no images found in {}", display_path(dir)));
        }

        for (path, source_format) in &inputs {
            let relative = path.strip_prefix(dir).unwrap_or(path);
            let mut target = out_dir.join(relative);
            let format = match format {
                Some(format) => {
                    if let Some(ext) = format.extensions.first() {
                        target.set_extension(ext);
                    }
                    format
                }
                None => *source_format,
            };

            let image = codec::open(path)?;
            self.map_image(image, &display_path(path), format, Some(&target))?;
        }

        Ok(inputs.len())
    }
}

fn write_file(path: &Path, format: &Format, image: &RgbaImage, options: &EncoderOptions) -> Result<()> {
    let io_error = |e: io::Error| MapError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write image: {}", e),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let file = fs::File::create(path).map_err(io_error)?;
    let mut out = BufWriter::new(file);
    format.encode(&mut out, image, options)?;
    out.flush().map_err(io_error)
}
