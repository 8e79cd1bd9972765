use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tinysvg::{Colour, EmitOptions, FlattenOptions, TinySvg};

#[derive(Parser)]
#[command(name = "tinysvg")]
#[command(about = "Compact, URL-embeddable encoding for SVG documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert SVG into tinySVG grammar text (or its compressed form)
    Encode {
        /// Input file (use - for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Emit the compressed <payload> form instead of grammar text
        #[arg(short, long)]
        compress: bool,

        /// Keep derived colours as raw #-strings instead of numbers
        #[arg(long)]
        raw_colours: bool,

        /// Print size comparison and shape count
        #[arg(short, long)]
        stats: bool,
    },
    /// Convert tinySVG grammar text or a compressed <payload> back into SVG
    Decode {
        /// Input file (use - for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Fill colours to apply to shapes, in document order
        /// (decimal numbers or #-strings)
        #[arg(long = "colour")]
        colours: Vec<Colour>,

        /// Drop the root tag's recorded properties
        #[arg(long)]
        no_header_properties: bool,

        /// Omit the root tag entirely, emitting only its children
        #[arg(long)]
        skip_root: bool,

        /// Force absent/none fills to black
        #[arg(long)]
        none_to_black: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let tiny = TinySvg::new();

    match cli.command {
        Command::Encode {
            input,
            output,
            compress,
            raw_colours,
            stats,
        } => {
            let svg = read_input(&input)?;
            let options = FlattenOptions {
                convert_colours_to_number: !raw_colours,
            };
            let conversion = tiny.parse_to_events(&svg, &options)?;

            let out = if compress {
                &conversion.compressed
            } else {
                &conversion.grammar
            };
            write_output(&output, out)?;

            if stats {
                let percent = if svg.is_empty() {
                    0.0
                } else {
                    (out.len() as f64 / svg.len() as f64) * 100.0
                };
                eprintln!(
                    "{} -> {} bytes ({:.1}% of input), {} shapes",
                    svg.len(),
                    out.len(),
                    percent,
                    conversion.shape_count
                );
            }
        }
        Command::Decode {
            input,
            output,
            colours,
            no_header_properties,
            skip_root,
            none_to_black,
        } => {
            let tiny_text = read_input(&input)?;
            let options = EmitOptions {
                header_has_properties: !no_header_properties,
                palette: colours,
                skip_root_tag: skip_root,
                none_to_black,
                ..EmitOptions::default()
            };

            let emitted = tiny.emit_str(tiny_text.trim(), &options)?;
            write_output(&output, &emitted.svg)?;
        }
    }

    Ok(())
}

fn read_input(path: &PathBuf) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn write_output(path: &PathBuf, content: &str) -> io::Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        io::stdout().write_all(b"\n")?;
        Ok(())
    } else {
        fs::write(path, content)
    }
}
