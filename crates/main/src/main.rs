use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;

use fsa_guide::app::{self, checklist_item, Action, AppState, Tab, CHECKLIST_ITEMS};
use fsa_guide::builder::UnknownKind;
use fsa_guide::config::Settings;
use fsa_guide::store::JsonFileStore;
use fsa_guide::troubleshoot::{Choice, Flowchart, StepKind};
use fsa_guide::{DirectorySink, DocumentBuilder, DocumentKind, GenerationSession};

/// Generates the FSA ID guide documents and manages the guide's saved state.
///
/// Output and state locations fall back to `FSA_GUIDE_OUTPUT_DIR` and `FSA_GUIDE_STATE_FILE`
/// when the flags are omitted. Set `RUST_LOG=debug` to trace layout decisions.
#[derive(Parser)]
#[command(author, version, about = "FSA ID guide, checklist and template generator")]
struct Cli {
    /// File holding the checklist, theme and tab state.
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one or all documents.
    #[command(name = "generate", aliases = ["gen", "download"])]
    Generate {
        /// Document to render: full, checklist, template or all.
        target: Target,

        /// Directory receiving the PDFs.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Lay the document out without writing a PDF.
        #[arg(long)]
        dry_run: bool,

        /// Date printed on the cover (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Add a PDF outline with one entry per section.
        #[cfg(feature = "bookmarks")]
        #[arg(long)]
        bookmarks: bool,
    },

    /// Show or update the creation checklist.
    #[command(name = "checklist")]
    Checklist {
        #[command(subcommand)]
        action: Option<ChecklistCommand>,
    },

    /// Walk the troubleshooting flowchart by option number (`restart` starts over).
    #[command(name = "troubleshoot", aliases = ["help-me"])]
    Troubleshoot {
        /// Choices to follow from the first question.
        choices: Vec<Choice>,
    },

    /// Show or select the active tab.
    #[command(name = "tab")]
    Tab {
        /// overview, checklist, troubleshooting or security.
        tab: Option<Tab>,
    },

    /// Show or change the colour theme.
    #[command(name = "theme")]
    Theme {
        #[arg(value_enum, default_value_t = ThemeCommand::Show)]
        action: ThemeCommand,
    },
}

#[derive(Subcommand)]
enum ChecklistCommand {
    /// Print every item with its state.
    List {
        /// Print the saved state as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check or uncheck an item.
    Toggle {
        /// Item id (1-8).
        id: u8,
    },
    /// Uncheck every item.
    Reset,
}

#[derive(Clone, Copy, Debug)]
enum Target {
    One(DocumentKind),
    All,
}

impl FromStr for Target {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            value.parse().map(Self::One)
        }
    }
}

impl Target {
    fn kinds(self) -> Vec<DocumentKind> {
        match self {
            Self::One(kind) => vec![kind],
            Self::All => DocumentKind::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeCommand {
    Show,
    Dark,
    Light,
    Toggle,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Generate {
            target,
            output,
            dry_run,
            date,
            #[cfg(feature = "bookmarks")]
            bookmarks,
        } => {
            let settings = Settings::resolve(output, cli.state);
            for kind in target.kinds() {
                let mut builder = DocumentBuilder::new(kind);
                if let Some(date) = date {
                    builder = builder.generated_on(date);
                }
                #[cfg(feature = "bookmarks")]
                {
                    builder = builder.with_bookmarks(bookmarks);
                }

                if dry_run {
                    preview(&builder)?;
                } else {
                    generate(&builder, &settings)?;
                }
            }
            Ok(())
        }
        Commands::Checklist { action } => {
            let action = action.unwrap_or(ChecklistCommand::List { json: false });
            with_state(cli.state, |state| match action {
                ChecklistCommand::List { json } => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(state)?);
                    } else {
                        print_checklist(state);
                    }
                    Ok(None)
                }
                ChecklistCommand::Toggle { id } => {
                    let item = checklist_item(id).ok_or_else(|| {
                        format!("no checklist item {id} (expected 1-{})", CHECKLIST_ITEMS.len())
                    })?;
                    let next = app::reduce(state, Action::ToggleItem(id));
                    if next.completed.contains(&id) {
                        println!("Completed: {}", item.title);
                        if next.all_complete() {
                            println!("Congratulations! You've completed all steps!");
                            println!("You're ready to create your FSA ID with confidence!");
                        }
                    } else {
                        println!("Unchecked: {}", item.title);
                    }
                    println!("Progress: {}%", next.progress());
                    Ok(Some(next))
                }
                ChecklistCommand::Reset => {
                    println!("Checklist reset.");
                    Ok(Some(app::reduce(state, Action::ResetChecklist)))
                }
            })
        }
        Commands::Troubleshoot { choices } => {
            print_flowchart(&choices);
            Ok(())
        }
        Commands::Tab { tab } => with_state(cli.state, |state| match tab {
            Some(tab) => {
                println!("Active tab: {}", tab.label());
                Ok(Some(app::reduce(state, Action::SelectTab(tab))))
            }
            None => {
                for tab in Tab::ALL {
                    let marker = if tab == state.active_tab { '*' } else { ' ' };
                    println!("{marker} {:<16} {}", tab.id(), tab.label());
                }
                Ok(None)
            }
        }),
        Commands::Theme { action } => with_state(cli.state, |state| {
            let next = match action {
                ThemeCommand::Show => None,
                ThemeCommand::Dark => Some(app::reduce(state, Action::SetDarkMode(true))),
                ThemeCommand::Light => Some(app::reduce(state, Action::SetDarkMode(false))),
                ThemeCommand::Toggle => Some(app::reduce(state, Action::ToggleDarkMode)),
            };
            let dark = next.as_ref().unwrap_or(state).dark_mode;
            println!("Theme: {}", if dark { "dark" } else { "light" });
            Ok(next)
        }),
    }
}

/// Loads the saved state, applies `update` and saves the result when it changed.
fn with_state<F>(state_file: Option<PathBuf>, update: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&AppState) -> Result<Option<AppState>, Box<dyn Error>>,
{
    let settings = Settings::resolve(None, state_file);
    let mut store = JsonFileStore::open(&settings.state_file)?;
    let state = AppState::load(&store);

    if let Some(next) = update(&state)? {
        if next != state {
            debug!("Saving state to {}", store.path().display());
            next.save(&mut store)?;
        }
    }
    Ok(())
}

fn generate(builder: &DocumentBuilder, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let session = GenerationSession::new();
    let mut sink = DirectorySink::new(&settings.output_dir);
    debug!(
        "Writing {} into {}",
        builder.kind().filename(),
        sink.directory().display()
    );
    let path = session.generate(builder, &mut sink)?;
    println!("Saved {}", path.display());
    Ok(())
}

fn preview(builder: &DocumentBuilder) -> Result<(), Box<dyn Error>> {
    let sections = builder.sections();
    let (canvas, summary) = builder.preview()?;
    println!(
        "{}: {} page(s)",
        builder.kind().filename(),
        summary.page_count
    );
    for (section, page) in sections.iter().zip(&summary.section_pages) {
        if let Some(page) = page {
            println!("  p{page:<2} {}", section.title());
        }
    }
    for (index, page) in canvas.pages().iter().enumerate() {
        println!(
            "  page {}: {} text row(s), {} box(es)",
            index + 1,
            page.texts().count(),
            page.rects().count()
        );
    }
    Ok(())
}

fn print_checklist(state: &AppState) {
    for item in &CHECKLIST_ITEMS {
        let mark = if state.completed.contains(&item.id) {
            'x'
        } else {
            ' '
        };
        println!("[{mark}] {}. {}", item.id, item.title);
        println!("       {}", item.description);
    }
    println!(
        "Progress: {}% ({} of {} complete)",
        state.progress(),
        state.completed.len(),
        CHECKLIST_ITEMS.len()
    );
}

fn print_flowchart(choices: &[Choice]) {
    let chart = Flowchart;
    let step = match chart.walk(choices.iter().copied()) {
        Ok(step) => step,
        Err((step, choice)) => {
            eprintln!("Ignoring invalid choice {choice:?} at '{}'", step.id);
            step
        }
    };

    println!("{}", step.title);
    println!("{}", step.description);
    match step.kind {
        StepKind::Decision(options) => {
            for (index, option) in options.iter().enumerate() {
                println!("  {}. {}", index + 1, option.text);
            }
        }
        StepKind::Solution(fixes) => {
            println!("Solutions:");
            for fix in fixes {
                println!("  • {fix}");
            }
            println!("(choose 'restart' to start over)");
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
