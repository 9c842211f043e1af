//! Lumen CLI
//!
//! Loads a page headlessly and prints what each pipeline stage produced.
//!
//! Usage:
//!   lumen <file|url>                  Summary: content tree and counts
//!   lumen <file|url> --dump boxes     Box tree with geometry
//!   lumen <file|url> --dump display   Display list
//!   lumen --html '<p>Hi</p>' --json   Any dump as JSON

mod logger;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lumen_browser::{Action, BrowserConfig, Page, form_data};
use lumen_common::net::{FetchConfig, HttpFetcher};
use lumen_common::url::scheme_of;
use lumen_common::warning::warning_count;
use lumen_css::{DisplayCommand, DisplayList};
use lumen_dom::{DomTree, NodeId, NodeType};
use lumen_html::print_tree;
use owo_colors::OwoColorize;
use serde_json::{Value, json};

/// What to print after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Dump {
    /// Content tree and pipeline counts.
    Summary,
    /// Content tree only.
    Content,
    /// Box tree with geometry.
    Boxes,
    /// Display list.
    Display,
}

/// Lumen - headless HTML/CSS renderer
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Summarise a local file
    lumen ./index.html

    # Box tree of a remote page at a narrow width
    lumen --dump boxes --width 400 https://example.org/

    # Show the markup of a page
    lumen view-source:https://example.org/

    # Display list of inline HTML as JSON
    lumen --html '<h1>Test</h1>' --dump display --json
"#)]
struct Cli {
    /// Path to an HTML file, or a URL (http, https, file, data, view-source:)
    #[arg(value_name = "FILE|URL", required_unless_present = "html")]
    target: Option<String>,

    /// Render this HTML string instead of loading a file or URL
    #[arg(long, value_name = "HTML", conflicts_with = "target")]
    html: Option<String>,

    /// What to print
    #[arg(long, value_enum, default_value_t = Dump::Summary)]
    dump: Dump,

    /// Print the dump as JSON
    #[arg(long)]
    json: bool,

    /// Viewport width in pixels
    #[arg(long, default_value_t = lumen_browser::config::DEFAULT_VIEWPORT_WIDTH)]
    width: i32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = lumen_browser::config::DEFAULT_VIEWPORT_HEIGHT)]
    height: i32,

    /// User-Agent header for HTTP requests
    #[arg(long)]
    user_agent: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Report what clicking this document point would do
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    hit: Option<Vec<i32>>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// No logging at all
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> BrowserConfig {
        let mut fetch = FetchConfig::default();
        if let Some(user_agent) = &self.user_agent {
            fetch.user_agent.clone_from(user_agent);
        }
        if let Some(seconds) = self.timeout {
            fetch.timeout = Duration::from_secs(seconds);
        }
        BrowserConfig {
            fetch,
            ..BrowserConfig::default().with_viewport(self.width, self.height)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(logger::level_for(cli.verbose, cli.quiet)).context("failed to install logger")?;

    let config = cli.config();
    let fetcher = HttpFetcher::new(config.fetch.clone());
    let page = if let Some(html) = &cli.html {
        Page::from_html(html, None, &fetcher, &config)
    } else if let Some(target) = &cli.target {
        let url = to_url(target)?;
        Page::load(&url, &fetcher, &config).with_context(|| format!("could not load {url}"))?
    } else {
        anyhow::bail!("no input: pass a file, a URL or --html");
    };

    if cli.json {
        let value = match cli.dump {
            Dump::Summary | Dump::Content => content_json(page.tree(), page.tree().root()),
            Dump::Boxes => serde_json::to_value(page.layout())?,
            Dump::Display => serde_json::to_value(page.display_list())?,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match cli.dump {
            Dump::Summary => print_summary(&page),
            Dump::Content => print_tree(page.tree(), page.tree().root(), 0),
            Dump::Boxes => print!("{}", page.layout()),
            Dump::Display => print_display_list(page.display_list()),
        }
    }

    if let Some([x, y]) = cli.hit.as_deref() {
        print_hit(&page, *x, *y);
    }
    Ok(())
}

/// Turn a command-line target into a URL. Anything without a scheme is a
/// local path.
fn to_url(target: &str) -> Result<String> {
    // A one-letter scheme is a drive letter.
    if scheme_of(target).is_some_and(|scheme| scheme.len() > 1) {
        return Ok(target.to_string());
    }
    let path = Path::new(target)
        .canonicalize()
        .with_context(|| format!("no such file: {target}"))?;
    Ok(format!("file://{}", path.display()))
}

fn heading(title: &str) {
    println!("{}", format!("=== {title} ===").bold());
}

fn print_summary(page: &Page) {
    heading("Content Tree");
    print_tree(page.tree(), page.tree().root(), 0);

    let (width, height) = page.viewport();
    println!();
    heading("Pipeline");
    println!("  url:            {}", page.url().unwrap_or("(inline)"));
    println!("  nodes:          {}", page.tree().len());
    println!("  rules:          {}", page.rule_count());
    println!("  styled nodes:   {}", page.styles().len());
    println!("  boxes:          {}", page.layout().box_count());
    println!("  draw commands:  {}", page.display_list().len());
    println!("  viewport:       {width}x{height}");
    println!("  content height: {}", page.content_height());

    let warnings = warning_count();
    if warnings > 0 {
        println!("  {}", format!("{warnings} distinct warnings (run with -v)").yellow());
    }
}

fn print_display_list(display_list: &DisplayList) {
    for command in display_list.commands() {
        match command {
            DisplayCommand::FillRect { rect, color } => println!(
                "FillRect({}, {}, {}x{}, {color})",
                rect.x, rect.y, rect.width, rect.height
            ),
            DisplayCommand::Text {
                x,
                y,
                text,
                font,
                color,
            } => println!(
                "Text({x}, {y}, {text:?}, {} {}px {} {}, {color})",
                font.family, font.size, font.weight, font.style
            ),
            DisplayCommand::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                thickness,
            } => println!("Line({x1}, {y1} -> {x2}, {y2}, {color}, {thickness}px)"),
            DisplayCommand::Outline {
                rect,
                color,
                thickness,
            } => println!(
                "Outline({}, {}, {}x{}, {color}, {thickness}px)",
                rect.x, rect.y, rect.width, rect.height
            ),
        }
    }
}

fn print_hit(page: &Page, x: i32, y: i32) {
    println!();
    heading(&format!("Hit ({x}, {y})"));
    let Some(node) = page.hit_test(x, y) else {
        println!("  nothing here");
        return;
    };
    println!("  node: {}", node.0);
    match page.actionable_at(x, y) {
        Some(Action::Link(url)) => println!("  link -> {}", url.underline()),
        Some(Action::Input(input)) => println!("  text input (node {})", input.0),
        Some(Action::Submit { form, action }) => println!(
            "  submit form (node {}) -> {action} with body {:?}",
            form.0,
            form_data(page.tree(), form)
        ),
        None => println!("  not actionable"),
    }
}

/// Content tree as JSON: elements carry their tag, attributes and
/// children; text nodes their text.
fn content_json(tree: &DomTree, id: NodeId) -> Value {
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };
    match &node.node_type {
        NodeType::Text(text) => json!({ "type": "text", "text": text }),
        NodeType::Element(data) => {
            let children: Vec<Value> = node
                .children
                .iter()
                .map(|&child| content_json(tree, child))
                .collect();
            json!({
                "type": "element",
                "tagName": data.tag_name,
                "attributes": data.attrs,
                "children": children,
            })
        }
    }
}
