use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use fsfolder::app::App;
use fsfolder::config::Config;
use fsfolder::fields::{size_column, FieldSetBuilder, Protocol};
use fsfolder::filesystem::{EntryProvider, FolderView, LocalFolder, MemoryFolder};
use ratatui::{prelude::*, widgets::*};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fsfolder", version, about = "Browse a folder with sortable columns")]
struct Cli {
    /// Directory to browse
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Browse an exported JSON listing instead of the local disk
    #[arg(long)]
    listing: Option<PathBuf>,

    /// Column layout: default, webdav or msgd
    #[arg(long)]
    protocol: Option<Protocol>,

    /// Config file (defaults to ./fsfolder.toml or the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if let Some(file) = config.log_file() {
        fsfolder::logger::init(&config.logging, &file).context("failed to initialise logging")?;
    }

    let protocol = match cli.protocol {
        Some(protocol) => protocol,
        None => config.protocol()?,
    };
    let mut fields = protocol.fields(&config.date_format())?;

    let provider: Box<dyn EntryProvider> = match &cli.listing {
        Some(file) => {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read listing {}", file.display()))?;
            Box::new(MemoryFolder::from_json(&content)?)
        }
        None => {
            let root = cli
                .path
                .canonicalize()
                .with_context(|| format!("cannot open {}", cli.path.display()))?;
            fields = FieldSetBuilder::new(fields).append(size_column()).build()?;
            Box::new(LocalFolder::new(root))
        }
    };
    let mut view = FolderView::new(provider, fields);
    view.sort = config.initial_sort(&view.fields);
    view.show_hidden = config.display.show_hidden;
    for name in &config.display.hidden_fields {
        if let Err(e) = view.toggle_field(name) {
            log::warn!("hidden_fields: {}", e);
        }
    }
    view.refresh()?;
    log::info!("browsing with {} columns", protocol);

    enable_raw_mode()?;
    std::io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
    let result = run(&mut terminal, App::new(view));
    disable_raw_mode()?;
    std::io::stdout().execute(LeaveAlternateScreen)?;
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> anyhow::Result<()> {
    let mut table_state = TableState::default();
    while !app.should_quit {
        table_state.select(Some(app.selected));
        terminal.draw(|f| draw(f, &app, &mut table_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.status = None;
                app.handle_key(key.code);
            }
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &App, table_state: &mut TableState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.size());

    let header = Row::new(app.header()).style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = app.rows().into_iter().map(Row::new).collect();
    let widths: Vec<Constraint> = app
        .header()
        .iter()
        .enumerate()
        .map(|(i, _)| if i == 0 { Constraint::Percentage(40) } else { Constraint::Min(12) })
        .collect();

    let mut title = format!(" {} ", app.breadcrumb());
    if let Some(ref clip) = app.view.clipboard {
        title.push_str(&format!("[clipboard: {}] ", clip.entry.name));
    }
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    match app.preview() {
        Some(content) => {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[0]);
            f.render_stateful_widget(table, panes[0], table_state);
            let text: Vec<Line> = content.lines().into_iter().map(Line::from).collect();
            let preview = Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL).title(" Preview "));
            f.render_widget(preview, panes[1]);
        }
        None => f.render_stateful_widget(table, chunks[0], table_state),
    }

    let footer = app
        .prompt_line()
        .or_else(|| app.status.clone())
        .unwrap_or_else(|| {
            "q quit  ↵ open  ⌫ up  1-9 sort  v columns  h hidden  / search  n new  r rename  c copy  x cut  p paste  d delete  u upload  s save".to_string()
        });
    f.render_widget(Paragraph::new(footer), chunks[1]);
}
