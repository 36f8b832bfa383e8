//! `evcal` CLI: build calendar files and event links from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Calendar document to stdout
//! evcal ics --title "Team Sync" --date 2025-03-10 --time 14:30 --duration 45
//!
//! # Google and Outlook links, one per line
//! evcal links --title "Christmas" --date 2025-12-25 --all-day
//!
//! # Write Team_Sync.ics into ./out and print both links
//! evcal generate --title "Team Sync" --date 2025-03-10 --time 14:30 --dir out
//!
//! # Shareable link that opens the calendar file on the receiving side
//! evcal share --title "Team Sync" --date 2025-03-10 --time 14:30 \
//!     --base-url https://example.org/event/ --open
//!
//! # Act on a received share link
//! evcal open-url 'https://example.org/event/?title=Lunch&date=2025-03-10&time=12:00&auto=1'
//! ```
//!
//! Times are read in `--tz`, or in the system timezone when it is omitted.
//! Set `RUST_LOG=debug` to see what was normalized and generated.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use evcal_core::share::ShareRequest;
use evcal_core::{
    generate, parse_share_request, parse_zone, resolve_zone, share_url, EventExports, Provider,
    RawEventInput, ShareFields, ShareMode,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "evcal",
    version,
    about = "Build .ics files and Google/Outlook event links"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the calendar document (.ics)
    Ics {
        #[command(flatten)]
        event: EventArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the Google Calendar and Outlook links, one per line
    Links {
        #[command(flatten)]
        event: EventArgs,
    },
    /// Write <title>.ics into a directory and print both links
    Generate {
        #[command(flatten)]
        event: EventArgs,
        /// Directory for the calendar file
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print a link that prefills the event form on another device
    Share {
        #[command(flatten)]
        event: EventArgs,
        /// Address of the event page the link points to
        #[arg(long, env = "EVCAL_BASE_URL")]
        base_url: String,
        /// Ask the receiving page to open the calendar file right away
        #[arg(long)]
        open: bool,
    },
    /// Act on a share link: print links when it asks for generation, and
    /// write the calendar file when it also asks to open it
    OpenUrl {
        /// Share link or bare query string (reads from stdin if omitted)
        url: Option<String>,
        #[command(flatten)]
        zone: ZoneArgs,
        /// Directory for the calendar file
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Args)]
struct EventArgs {
    /// Event title
    #[arg(long, default_value = "")]
    title: String,
    /// Date as YYYY-MM-DD (today if omitted)
    #[arg(long, default_value = "")]
    date: String,
    /// Start time as HH:MM (now if omitted; ignored with --all-day)
    #[arg(long, default_value = "")]
    time: String,
    /// Duration in minutes (30 if omitted or not a positive number)
    #[arg(long, default_value = "")]
    duration: String,
    #[arg(long, default_value = "")]
    location: String,
    /// Notes; may contain newlines
    #[arg(long, default_value = "")]
    notes: String,
    /// All-day event
    #[arg(long)]
    all_day: bool,
    #[command(flatten)]
    zone: ZoneArgs,
}

#[derive(Args)]
struct ZoneArgs {
    /// IANA timezone for the date and time (system timezone if omitted)
    #[arg(long)]
    tz: Option<String>,
}

impl ZoneArgs {
    /// An explicit `--tz` must be valid. The system zone falls back to UTC.
    fn resolve(&self) -> Result<Tz> {
        match self.tz.as_deref() {
            Some(name) => parse_zone(name).context("Invalid --tz"),
            None => Ok(resolve_zone(iana_time_zone::get_timezone().ok().as_deref())),
        }
    }
}

impl EventArgs {
    /// The form as the page would hold it: empty date and time take today
    /// and the current minute in `tz`.
    fn form(&self, tz: Tz) -> RawEventInput {
        RawEventInput {
            title: self.title.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            duration: self.duration.clone(),
            location: self.location.clone(),
            notes: self.notes.clone(),
            all_day: self.all_day,
        }
        .with_defaults(now_local(tz))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ics { event, output } => {
            let tz = event.zone.resolve()?;
            let exports = generate_exports(&event.form(tz), tz)?;
            write_output(output.as_deref(), &exports.ics)?;
        }
        Commands::Links { event } => {
            let tz = event.zone.resolve()?;
            let exports = generate_exports(&event.form(tz), tz)?;
            println!("{}", exports.google_url);
            println!("{}", exports.outlook_url);
        }
        Commands::Generate { event, dir } => {
            let tz = event.zone.resolve()?;
            let exports = generate_exports(&event.form(tz), tz)?;
            let path = save_ics(&dir, &exports)?;
            println!("ics: {}", path.display());
            print_links(&exports);
        }
        Commands::Share {
            event,
            base_url,
            open,
        } => {
            let tz = event.zone.resolve()?;
            let fields = ShareFields::from_input(&event.form(tz));
            let mode = if open {
                ShareMode::AutoOpen
            } else {
                ShareMode::Auto
            };
            println!("{}", share_url(&base_url, &fields, mode));
        }
        Commands::OpenUrl { url, zone, dir } => {
            let input = match url {
                Some(url) => url,
                None => read_stdin()?,
            };
            let request = parse_share_request(input.trim());
            let tz = zone.resolve()?;
            open_share_request(&request, tz, &dir)?;
        }
    }

    Ok(())
}

fn generate_exports(form: &RawEventInput, tz: Tz) -> Result<EventExports> {
    debug!(zone = tz.name(), "generating event");
    generate(form, tz).context("Failed to generate event")
}

/// Fill the form from a share link over the usual defaults, then generate
/// and open the way the page would on load.
fn open_share_request(request: &ShareRequest, tz: Tz, dir: &Path) -> Result<()> {
    let mut form = RawEventInput::default();
    request.fields.apply_to(&mut form);
    let form = form.with_defaults(now_local(tz));

    if !request.should_generate() {
        info!("share link does not ask for generation");
        print_form(&form);
        return Ok(());
    }

    let exports = generate_exports(&form, tz)?;
    if request.should_open() {
        let path = save_ics(dir, &exports)?;
        println!("ics: {}", path.display());
    }
    print_links(&exports);
    Ok(())
}

fn print_links(exports: &EventExports) {
    for provider in Provider::ALL {
        println!("{}: {}", provider.label(), exports.link(provider));
    }
}

fn print_form(form: &RawEventInput) {
    println!("title: {}", form.title);
    println!("date: {}", form.date);
    println!("time: {}", form.time);
    println!("duration: {}", form.duration);
    println!("location: {}", form.location);
    println!("notes: {}", form.notes.replace('\n', "\\n"));
    println!("all-day: {}", form.all_day);
}

fn save_ics(dir: &Path, exports: &EventExports) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    let path = dir.join(&exports.filename);
    std::fs::write(&path, &exports.ics)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    info!(path = %path.display(), "wrote calendar file");
    Ok(path)
}

fn now_local(tz: Tz) -> chrono::NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
