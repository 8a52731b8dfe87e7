use clap::{Parser, Subcommand};
use std::io::Write;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use stripfit::archive::{self, ArchiveError};
use stripfit::imaging::{self, BoundingBox, ResizeOptions};
use stripfit::netdiag::{self, Diagnostics};
use stripfit::{config, document, output};

#[derive(Parser)]
#[command(name = "stripfit")]
#[command(version)]
#[command(about = "Cover-fit image resizer with parallel strip resampling")]
#[command(long_about = "\
Cover-fit image resizer with parallel strip resampling

An image is scaled, keeping its aspect ratio, to the smallest size that
covers the requested box. The source is cut into horizontal strips that
are resampled in parallel (Lanczos3) and stacked back together. Output
keeps the input format: JPEG stays JPEG, PNG stays PNG.

  stripfit resize photo.jpg thumb.jpg --width 300 --height 300
  stripfit fit --source 1000x500 --target 300x300     # 600x300

Side tools: pull an entry out of a zip/docx, dump PDF or DOCX text, and
quick network checks.

Settings are read from --config, else ./stripfit.toml, else defaults.
Run 'stripfit gen-config' to generate a documented stripfit.toml.")]
struct Cli {
    /// Config file (default: ./stripfit.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Strip / worker count, overrides processing.max_threads
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize an image to cover a bounding box
    Resize {
        /// JPEG or PNG file to read
        input: PathBuf,
        /// Where to write the resized image (same format as the input)
        output: PathBuf,
        /// Box width in pixels
        #[arg(long, allow_hyphen_values = true)]
        width: String,
        /// Box height in pixels
        #[arg(long, allow_hyphen_values = true)]
        height: String,
        /// Print the outcome as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Print the cover dimensions for a source size and a box
    Fit {
        /// Source size, e.g. 1000x500
        #[arg(long, value_parser = parse_dimensions)]
        source: (u32, u32),
        /// Bounding box, e.g. 300x300
        #[arg(long, value_parser = parse_dimensions)]
        target: (u32, u32),
    },
    /// Copy one entry out of a zip archive (docx, xlsx, epub, ...)
    Extract {
        archive: PathBuf,
        /// Full entry name, e.g. word/media/image1.png
        entry: String,
        /// Write here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the text of a PDF or DOCX file
    Text { file: PathBuf },
    /// Host and network checks
    #[command(subcommand)]
    Net(NetCommand),
    /// Print a stock stripfit.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum NetCommand {
    /// Host name of this machine
    Hostname,
    /// Account name of the current user
    Username,
    /// Hardware address of the first network interface
    Mac,
    /// IPv4 address of the default-route interface
    LocalIp,
    /// Host name registered for an IP address
    ReverseDns { ip: IpAddr },
    /// Public IP address as seen by the configured echo service
    ExternalIp,
    /// Download the configured test file and report throughput
    Speedtest,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Resize {
            input,
            output: out_path,
            width,
            height,
            json,
        } => {
            let config = resolve_config(cli.config.as_deref(), cli.threads)?;
            init_thread_pool(&config.processing);
            let options = ResizeOptions::from_config(&config);

            let bytes = std::fs::read(&input)?;
            let outcome = imaging::resize_image(&bytes, &width, &height, &options)?;
            std::fs::write(&out_path, &outcome.bytes)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                output::print_resize_report(&input, &out_path, &outcome);
            }
        }
        Command::Fit { source, target } => {
            let cover = imaging::calculate_cover_dimensions(source, target);
            println!("{}", output::format_fit(source, target, cover));
        }
        Command::Extract {
            archive: zip_path,
            entry,
            output: destination,
        } => {
            let bytes = match archive::extract_entry(&zip_path, &entry) {
                Ok(bytes) => bytes,
                Err(e @ ArchiveError::EntryNotFound { .. }) => {
                    if let Ok(entries) = archive::list_entries(&zip_path) {
                        output::print_entry_list(&zip_path, &entries);
                    }
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            };
            match destination {
                Some(path) => {
                    std::fs::write(&path, &bytes)?;
                    println!(
                        "{}",
                        output::format_extracted(&zip_path, &entry, &path, bytes.len())
                    );
                }
                None => std::io::stdout().lock().write_all(&bytes)?,
            }
        }
        Command::Text { file } => {
            let text = document::extract_text(&file)?;
            print!("{}", text);
        }
        Command::Net(net) => run_net(net, cli.config.as_deref())?,
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_net(
    command: NetCommand,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        NetCommand::Hostname => println!("{}", netdiag::hostname()?),
        NetCommand::Username => println!("{}", netdiag::username()?),
        NetCommand::Mac => println!("{}", netdiag::mac_address()?),
        NetCommand::LocalIp => println!("{}", netdiag::local_ipv4()?),
        NetCommand::ReverseDns { ip } => println!("{}", netdiag::reverse_dns(ip)?),
        NetCommand::ExternalIp => {
            let config = resolve_config(config_path, None)?;
            let diagnostics = Diagnostics::new(&config.diagnostics)?;
            println!("{}", diagnostics.external_ip()?);
        }
        NetCommand::Speedtest => {
            let config = resolve_config(config_path, None)?;
            let diagnostics = Diagnostics::new(&config.diagnostics)?;
            output::print_throughput(&diagnostics.speed_test()?);
        }
    }
    Ok(())
}

/// Load config from `--config`, else `./stripfit.toml`, else stock defaults,
/// then apply `--threads`.
fn resolve_config(
    path: Option<&Path>,
    threads: Option<usize>,
) -> Result<config::Config, config::ConfigError> {
    let mut config = match path {
        Some(path) => config::load_config(path)?,
        None => config::load_config_or_default(Path::new("."))?,
    };
    if threads.is_some() {
        config.processing.max_threads = threads;
        config.validate()?;
    }
    Ok(config)
}

/// Size the global rayon pool once, before any strip work is queued.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Parse `WxH` into a positive pair.
fn parse_dimensions(raw: &str) -> Result<(u32, u32), String> {
    let (width, height) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", raw))?;
    BoundingBox::parse(width.trim(), height.trim())
        .map(BoundingBox::as_tuple)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dimensions_accepts_both_separators() {
        assert_eq!(parse_dimensions("1000x500"), Ok((1000, 500)));
        assert_eq!(parse_dimensions("300X200"), Ok((300, 200)));
    }

    #[test]
    fn parse_dimensions_rejects_bad_input() {
        assert!(parse_dimensions("1000").is_err());
        assert!(parse_dimensions("0x5").is_err());
        assert!(parse_dimensions("axb").is_err());
    }

    #[test]
    fn threads_override_is_validated() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("stripfit.toml");
        std::fs::write(&path, "[processing]\nmax_threads = 3\n").unwrap();

        let config = resolve_config(Some(&path), Some(1)).unwrap();
        assert_eq!(config.processing.max_threads, Some(1));
        assert!(resolve_config(Some(&path), Some(0)).is_err());
    }

    #[test]
    fn net_reverse_dns_parses_ip() {
        let cli = Cli::try_parse_from(["stripfit", "net", "reverse-dns", "127.0.0.1"]).unwrap();
        match cli.command {
            Command::Net(NetCommand::ReverseDns { ip }) => {
                assert_eq!(ip, IpAddr::from([127, 0, 0, 1]));
            }
            _ => panic!("expected net reverse-dns"),
        }
        assert!(Cli::try_parse_from(["stripfit", "net", "reverse-dns", "not-an-ip"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
