//! pdfpager CLI - page through PDF documents

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use kurbo::Affine;

use pdfpager::{
    ContentFitMode, DrawCommand, JsonFormat, LoadOptions, PageDescriptor, PagingCoordinator,
    Placeholder, Viewer, ViewerOptions, ViewerSession,
};

#[derive(Parser)]
#[command(name = "pdfpager")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Page through PDF documents one page at a time", long_about = None)]
struct Cli {
    /// Input PDF file (the bundled document when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Directory holding the bundled document
    #[arg(long, global = true, env = "PDFPAGER_BUNDLE_DIR", default_value = ".")]
    bundle_dir: PathBuf,

    /// File name of the bundled document
    #[arg(
        long,
        global = true,
        env = "PDFPAGER_DOCUMENT",
        default_value = pdfpager::BUNDLED_DOCUMENT_NAME
    )]
    document: String,

    /// Replace malformed page boxes with defaults instead of failing
    #[arg(long, global = true)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// List page descriptors with their geometry
    Pages {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output the document model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the draw commands for one page
    Plan {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Page number (1-indexed)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Draw the view with no page bound (only the placeholder shows)
        #[arg(long)]
        blank: bool,

        #[command(flatten)]
        view: ViewArgs,

        /// Output the draw commands as JSON
        #[arg(long)]
        json: bool,

        /// Use compact JSON (implies --json)
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Page through the document interactively
    Browse {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ViewArgs {
    /// View width in points
    #[arg(long, default_value = "390")]
    width: f64,

    /// View height in points
    #[arg(long, default_value = "844")]
    height: f64,

    /// Content-fit mode
    #[arg(short, long, value_enum, default_value = "scale-to-fill")]
    mode: FitMode,

    /// Draw through the media box instead of the crop box
    #[arg(long)]
    media_box: bool,

    /// Draw the document symbol when the view has no page (see `plan --blank`)
    #[arg(long)]
    placeholder: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FitMode {
    /// Stretch each axis to fill the view
    ScaleToFill,
    /// Whole page visible, letterboxed
    ScaleAspectFit,
    /// View covered, page may be cropped
    ScaleAspectFill,
    /// No positioning
    Redraw,
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl From<FitMode> for ContentFitMode {
    fn from(mode: FitMode) -> Self {
        match mode {
            FitMode::ScaleToFill => ContentFitMode::ScaleToFill,
            FitMode::ScaleAspectFit => ContentFitMode::ScaleAspectFit,
            FitMode::ScaleAspectFill => ContentFitMode::ScaleAspectFill,
            FitMode::Redraw => ContentFitMode::Redraw,
            FitMode::Center => ContentFitMode::Center,
            FitMode::Top => ContentFitMode::Top,
            FitMode::Bottom => ContentFitMode::Bottom,
            FitMode::Left => ContentFitMode::Left,
            FitMode::Right => ContentFitMode::Right,
            FitMode::TopLeft => ContentFitMode::TopLeft,
            FitMode::TopRight => ContentFitMode::TopRight,
            FitMode::BottomLeft => ContentFitMode::BottomLeft,
            FitMode::BottomRight => ContentFitMode::BottomRight,
        }
    }
}

impl GlobalArgs {
    fn options(&self, view: Option<&ViewArgs>) -> ViewerOptions {
        let mut load = LoadOptions::new();
        if self.lenient {
            load = load.lenient();
        }

        let mut options = ViewerOptions::new()
            .with_bundle_dir(&self.bundle_dir)
            .with_document_name(&self.document)
            .with_load_options(load);

        if let Some(view) = view {
            options = options
                .with_fit_mode(view.mode.into())
                .with_view_size(view.width, view.height);
            if view.media_box {
                options = options.with_media_box();
            }
            if view.placeholder {
                options = options.with_placeholder(Some(Placeholder::document_symbol()));
            }
        }

        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let global = &cli.global;

    let result = match cli.command {
        Some(Commands::Info { input }) => {
            open(input.as_deref(), global.options(None)).and_then(|s| cmd_info(&s))
        }
        Some(Commands::Pages { input, json }) => {
            open(input.as_deref(), global.options(None)).and_then(|s| cmd_pages(&s, json))
        }
        Some(Commands::Plan {
            input,
            page,
            blank,
            view,
            json,
            compact,
            output,
        }) => {
            let format = match (json, compact) {
                (_, true) => Some(JsonFormat::Compact),
                (true, false) => Some(JsonFormat::Pretty),
                (false, false) => None,
            };
            open(input.as_deref(), global.options(Some(&view)))
                .and_then(|s| cmd_plan(&s, page, blank, format, output.as_deref()))
        }
        Some(Commands::Browse { input, view }) => {
            open(input.as_deref(), global.options(Some(&view))).and_then(|s| cmd_browse(&s))
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => open(cli.input.as_deref(), global.options(None)).and_then(|s| cmd_first_page(&s)),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Open `input`, or the bundled document when no input is given.
fn open(input: Option<&Path>, options: ViewerOptions) -> CliResult<ViewerSession> {
    let viewer = Viewer::with_options(options);
    let session = match input {
        Some(path) => viewer.open(path)?,
        None => {
            log::debug!("No input given, opening the bundled document");
            viewer.open_bundled()?
        }
    };
    Ok(session)
}

fn cmd_first_page(session: &ViewerSession) -> CliResult<()> {
    let pager = session.pager();
    match pager.initial() {
        Some(descriptor) => print_descriptor(&pager, descriptor),
        None => println!("{}", "Document has no pages".yellow()),
    }
    Ok(())
}

fn cmd_info(session: &ViewerSession) -> CliResult<()> {
    let doc = session.document();
    let metadata = &doc.metadata;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if let Some(ref source) = doc.source_name {
        println!("{}: {}", "File".bold(), source);
    }
    println!("{}: PDF {}", "Format".bold(), metadata.pdf_version);
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if metadata.encrypted { "Yes" } else { "No" }
    );
    println!("{}: {}", "Display title".bold(), session.title());

    let fields = [
        ("Title", &metadata.title),
        ("Author", &metadata.author),
        ("Subject", &metadata.subject),
        ("Creator", &metadata.creator),
        ("Producer", &metadata.producer),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{}: {}", label.bold(), value);
        }
    }
    if let Some(ref created) = metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    Ok(())
}

fn cmd_pages(session: &ViewerSession, json: bool) -> CliResult<()> {
    if json {
        println!("{}", pdfpager::render::to_json(session.document(), JsonFormat::Pretty)?);
        return Ok(());
    }

    for descriptor in session.descriptors() {
        let page = descriptor.page();
        let crop = page.crop_box;
        let size = session.content(&descriptor).page_view().intrinsic_size();
        println!(
            "{}  crop [{:.1} {:.1} {:.1} {:.1}]  rotate {:>3}  {}x{}",
            descriptor.page_number_text().bold(),
            crop.x0,
            crop.y0,
            crop.x1,
            crop.y1,
            page.rotation,
            size.width,
            size.height
        );
    }

    Ok(())
}

fn cmd_plan(
    session: &ViewerSession,
    page: u32,
    blank: bool,
    format: Option<JsonFormat>,
    output: Option<&Path>,
) -> CliResult<()> {
    let commands = plan_commands(session, page, blank)?;

    let rendered = match format {
        Some(format) => pdfpager::render::to_json(&commands, format)?,
        None => commands
            .iter()
            .map(describe_command)
            .collect::<Vec<_>>()
            .join("\n"),
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

/// Draw commands for `page`, or for a page-less view when `blank` is set or
/// the document has no pages.
fn plan_commands(session: &ViewerSession, page: u32, blank: bool) -> CliResult<Vec<DrawCommand>> {
    if blank || session.document().is_empty() {
        log::debug!("Planning a view without a page");
        return Ok(session.plan_blank());
    }

    let index = page.checked_sub(1).ok_or("Page numbers start at 1")? as usize;
    Ok(session.plan_page(index)?)
}

/// One line per recorded draw call.
fn describe_command(command: &DrawCommand) -> String {
    match command {
        DrawCommand::SaveState => "save".to_string(),
        DrawCommand::RestoreState => "restore".to_string(),
        DrawCommand::Concat { transform } => format!("concat {}", coeffs(transform)),
        DrawCommand::DrawPage {
            page_number,
            page_box,
            ctm,
        } => format!("draw page {} ({}) ctm {}", page_number, page_box, coeffs(ctm)),
        DrawCommand::DrawImage { rect, ctm } => format!(
            "draw image [{:.2} {:.2} {:.2} {:.2}] ctm {}",
            rect.x0,
            rect.y0,
            rect.x1,
            rect.y1,
            coeffs(ctm)
        ),
    }
}

fn coeffs(transform: &Affine) -> String {
    let parts: Vec<String> = transform
        .as_coeffs()
        .iter()
        .map(|c| format!("{:.4}", c))
        .collect();
    format!("[{}]", parts.join(" "))
}

fn cmd_browse(session: &ViewerSession) -> CliResult<()> {
    let mut pager = session.pager();
    if pager.is_empty() {
        println!("{}", "Document has no pages".yellow());
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if let Some(descriptor) = pager.visible() {
            print_descriptor(&pager, descriptor);
            let content = session.content(descriptor);
            let bounds = content.page_view().bounds();
            println!(
                "  {} bounds [{:.1} {:.1} {:.1} {:.1}]",
                "view".dimmed(),
                bounds.x0,
                bounds.y0,
                bounds.x1,
                bounds.y1
            );
        }

        print!("{} ", "[n]ext [p]rev [g N] [q]uit >".dimmed());
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let mut words = line.split_whitespace();

        match words.next() {
            Some("n") | Some("next") | None => {
                if pager.turn_forward().is_none() {
                    println!("{}", "Already on the last page".yellow());
                }
            }
            Some("p") | Some("prev") => {
                if pager.turn_back().is_none() {
                    println!("{}", "Already on the first page".yellow());
                }
            }
            Some("g") | Some("go") => {
                let target = words.next().and_then(|n| n.parse::<usize>().ok());
                match target.and_then(|n| n.checked_sub(1)) {
                    Some(index) if pager.show(index).is_some() => {}
                    _ => println!("{}", "No such page".yellow()),
                }
            }
            Some("q") | Some("quit") => break,
            Some(other) => println!("{} {}", "Unknown command:".yellow(), other),
        }
    }

    Ok(())
}

fn print_descriptor(pager: &PagingCoordinator<'_>, descriptor: &PageDescriptor<'_>) {
    println!(
        "{}  {}",
        descriptor.title_text().cyan().bold(),
        descriptor.page_number_text()
    );
    println!("  {}", progress_dots(pager.count(), pager.current_index()).dimmed());
}

/// Page-control dots, one per page, with `current` filled.
fn progress_dots(count: usize, current: usize) -> String {
    (0..count)
        .map(|i| if i == current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn cmd_version() {
    println!("{} {}", "pdfpager".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Page-at-a-time PDF viewer");
}
