use clap::{Parser, Subcommand};
use coloring_page::codec::{encode_png, save_png};
use coloring_page::prompt::SUGGESTIONS;
use coloring_page::tools::{binary_stats, load_rgba};
use coloring_page::{
    Config, FileSource, Generator, ImageSource, PageRequest, PipelineError, PollinationsSource,
    binarize,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "coloring", version, about = "Turn a text prompt into a printable coloring page")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a coloring page from a prompt
    Generate {
        /// What to draw, e.g. "a dragon reading a book"
        prompt: String,

        /// Output PNG path (defaults to coloring-page-<prompt>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Luminance cutoff 0-255; brighter pixels become white
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<i64>,

        /// Requested image width
        #[arg(long)]
        width: Option<u32>,

        /// Requested image height
        #[arg(long)]
        height: Option<u32>,

        /// Fixed seed instead of the current time
        #[arg(long)]
        seed: Option<u64>,

        /// Use a local image instead of calling the endpoint
        #[arg(long)]
        source_file: Option<PathBuf>,
    },
    /// Binarize an existing image file
    Binarize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<i64>,
    },
    /// List built-in prompt suggestions
    Suggestions,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coloring_page=info,coloring=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate {
            prompt,
            output,
            threshold,
            width,
            height,
            seed,
            source_file,
        } => {
            let args = GenerateArgs {
                prompt: &prompt,
                output: output.as_deref(),
                seed,
            };
            match Config::from_env().with_overrides(width, height, threshold) {
                Ok(config) => match source_file {
                    Some(path) => generate_cmd(FileSource::new(path), config, args),
                    None => PollinationsSource::from_config(&config)
                        .and_then(|source| generate_cmd(source, config, args)),
                },
                Err(e) => Err(e.into()),
            }
        }
        Command::Binarize {
            input,
            output,
            threshold,
        } => binarize_cmd(&input, &output, threshold),
        Command::Suggestions => {
            suggestions_cmd();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(PipelineError::EmptyPrompt) => {
            eprintln!("Please enter something to draw.");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Failed to generate image. Please try again!");
            eprintln!("  cause: {}", err);
            ExitCode::FAILURE
        }
    }
}

struct GenerateArgs<'a> {
    prompt: &'a str,
    output: Option<&'a Path>,
    seed: Option<u64>,
}

fn generate_cmd<S: ImageSource>(
    source: S,
    config: Config,
    args: GenerateArgs<'_>,
) -> Result<(), PipelineError> {
    let mut request = PageRequest::new(args.prompt, &config)?;
    if let Some(seed) = args.seed {
        request = request.with_seed(seed);
    }

    let mut generator = Generator::new(source, config);
    let page = generator.generate_request(request)?;

    let path = args
        .output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(page.file_name()));
    save_png(&path, &page.png)?;

    let stats = binary_stats(&page.image);
    println!(
        "{} ({}x{}, seed {}) black_ratio={:.2}%",
        path.display(),
        page.image.width(),
        page.image.height(),
        page.seed.unwrap_or_default(),
        stats.black_ratio * 100.0
    );
    Ok(())
}

fn binarize_cmd(input: &Path, output: &Path, threshold: Option<i64>) -> Result<(), PipelineError> {
    let threshold = Config::from_env()
        .with_overrides(None, None, threshold)?
        .threshold;

    let image = load_rgba(input)?;
    let binary = binarize(&image, threshold)?;
    save_png(output, &encode_png(&binary)?)?;

    let stats = binary_stats(&binary);
    println!("Image: {} ({}x{})", input.display(), image.width(), image.height());
    println!(
        "Binary: threshold={} black_pixels={} total={} black_ratio={:.2}%",
        threshold.value(),
        stats.black_pixels,
        stats.total_pixels,
        stats.black_ratio * 100.0
    );
    Ok(())
}

fn suggestions_cmd() {
    for s in SUGGESTIONS.iter() {
        println!("{} {:<12} {}", s.emoji, s.label, s.prompt);
    }
}
