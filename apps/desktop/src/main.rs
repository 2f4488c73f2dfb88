use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use shared::{
    settings::{load_settings, load_settings_file, row_count},
    ChangeHint, ListUpdate, RowListModel, RowListView, Settings,
};
use tracing_subscriber::EnvFilter;

/// Drives the row list from stdin and prints every resulting state as JSON.
#[derive(Parser, Debug)]
struct Args {
    /// Number of rows in the list.
    #[arg(long)]
    rows: Option<usize>,
    /// Title of the first row.
    #[arg(long, allow_hyphen_values = true)]
    first_title: Option<i64>,
    /// Seed for reproducible shuffles.
    #[arg(long)]
    seed: Option<u64>,
    /// Settings file to use instead of ./mixer_table.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pretty-print each update.
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let settings = match &self.config {
            Some(path) => load_settings_file(path)?,
            None => load_settings()?,
        };
        self.apply_overrides(settings)
    }

    /// Flags win over the settings file and environment.
    fn apply_overrides(&self, mut settings: Settings) -> Result<Settings> {
        if let Some(rows) = self.rows {
            settings.row_count = row_count(rows)?;
        }
        if let Some(first_title) = self.first_title {
            settings.first_title = first_title;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverCommand {
    Shuffle,
    Toggle(i64),
    Show,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<DriverCommand>> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "shuffle" | "s" => DriverCommand::Shuffle,
        "toggle" | "t" => {
            let raw = parts.next().context("toggle needs a row position")?;
            let position = raw
                .parse::<i64>()
                .with_context(|| format!("row position is not an integer: '{raw}'"))?;
            DriverCommand::Toggle(position)
        }
        "show" => DriverCommand::Show,
        "quit" | "exit" | "q" => DriverCommand::Quit,
        other => anyhow::bail!("unknown command '{other}'"),
    };

    if let Some(extra) = parts.next() {
        anyhow::bail!("unexpected argument '{extra}'");
    }
    Ok(Some(command))
}

struct JsonLinesView<W: Write> {
    out: W,
    pretty: bool,
    last_error: Option<io::Error>,
}

impl<W: Write> JsonLinesView<W> {
    fn new(out: W, pretty: bool) -> Self {
        Self {
            out,
            pretty,
            last_error: None,
        }
    }

    fn write_update(&mut self, update: &ListUpdate) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, update)?;
        } else {
            serde_json::to_writer(&mut self.out, update)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    fn take_error(&mut self) -> io::Result<()> {
        match self.last_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<W: Write> RowListView for JsonLinesView<W> {
    fn apply(&mut self, update: &ListUpdate) {
        if let Err(err) = self.write_update(update) {
            self.last_error = Some(err);
        }
    }
}

fn run(
    model: &mut RowListModel,
    input: impl BufRead,
    view: &mut JsonLinesView<impl Write>,
    errors: &mut impl Write,
) -> Result<()> {
    model.present(ChangeHint::FullReload, view);
    view.take_error().context("failed to write update")?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(errors, "error: {err:#}")?;
                continue;
            }
        };

        tracing::debug!(?command, "received command");
        match command {
            DriverCommand::Shuffle => view.apply(&model.shuffle()),
            DriverCommand::Toggle(position) => match model.toggle_signed(position) {
                Ok(update) => view.apply(&update),
                Err(err) => {
                    tracing::warn!(position, "rejected toggle: {err}");
                    writeln!(errors, "error: {err}")?;
                }
            },
            DriverCommand::Show => model.present(ChangeHint::FullReload, view),
            DriverCommand::Quit => break,
        }
        view.take_error().context("failed to write update")?;
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();
    let settings = args.settings()?;

    tracing::info!(
        rows = settings.row_count.get(),
        first_title = settings.first_title,
        seeded = settings.seed.is_some(),
        "starting row list driver"
    );

    let mut model = RowListModel::from_settings(&settings);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut view = JsonLinesView::new(stdout.lock(), args.pretty);
    run(&mut model, stdin.lock(), &mut view, &mut io::stderr())
}
