//! Sprig CLI
//!
//! Turns markup into a tree, prunes boilerplate subtrees and prints the
//! remaining plain text.
//!
//! Usage:
//!   sprig page.html                 Print the cleaned text
//!   sprig page.html --tree          Also dump the tree before and after pruning
//!   sprig --html '<p>Hi</p>' --tokens
//!   cat page.html | sprig --drop-tag table --drop-attr sidebar

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use sprig_clean::{RemovalPolicy, extract_text, prune};
use sprig_common::warning::clear_warnings;
use sprig_dom::render;
use sprig_html::{build_tree, tokenize};

/// Sprig - tolerant markup-to-text extractor
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Extract text from a file
    sprig ./index.html

    # Inspect tokens and tree for an inline snippet
    sprig --html '<div class="menu">x</div><p>y</p>' --tokens --tree

    # Read from stdin with a custom policy
    curl -s https://example.com | sprig --policy policy.json

    # Keep everything
    sprig --no-prune ./index.html
"#)]
struct Cli {
    /// Path to a markup file. Reads stdin when neither FILE nor --html is given.
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this markup string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print the token stream
    #[arg(short, long)]
    tokens: bool,

    /// Print the tree before and after pruning
    #[arg(long)]
    tree: bool,

    /// Skip pruning
    #[arg(long)]
    no_prune: bool,

    /// JSON removal policy (`tag_deny` / `attr_deny` arrays)
    #[arg(long, value_name = "FILE")]
    policy: Option<PathBuf>,

    /// Extra tag name to drop (repeatable)
    #[arg(long = "drop-tag", value_name = "TAG")]
    drop_tags: Vec<String>,

    /// Extra id/class token to drop (repeatable)
    #[arg(long = "drop-attr", value_name = "TOKEN")]
    drop_attrs: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let html = read_input(&cli)?;
    let policy = load_policy(&cli)?;

    let tokens = tokenize(&html);
    if cli.tokens {
        print_heading("Tokens");
        for token in &tokens {
            println!("{token}");
        }
        println!();
    }

    let mut tree = build_tree(tokens).context("failed to build tree")?;
    if cli.tree {
        print_heading("Tree");
        println!("{}\n", render(&tree));
    }

    if !cli.no_prune {
        let removed = prune(&mut tree, &policy);
        if cli.tree {
            print_heading(&format!("Pruned Tree ({removed} subtrees removed)"));
            println!("{}\n", render(&tree));
        }
    }

    if cli.tokens || cli.tree {
        print_heading("Text");
    }
    println!("{}", extract_text(&tree));

    Ok(())
}

/// Load markup from `--html`, the given file, or stdin.
fn read_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone());
    }
    if let Some(ref path) = cli.path {
        return fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut html = String::new();
    let _ = io::stdin()
        .read_to_string(&mut html)
        .context("failed to read stdin")?;
    Ok(html)
}

/// Start from the policy file (or the defaults) and add the extra denials.
fn load_policy(cli: &Cli) -> Result<RemovalPolicy> {
    let mut policy = match cli.policy {
        Some(ref path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read policy {}", path.display()))?;
            RemovalPolicy::from_json(&json)
                .with_context(|| format!("failed to load policy {}", path.display()))?
        }
        None => RemovalPolicy::default(),
    };
    policy.tag_deny.extend(cli.drop_tags.iter().map(|tag| tag.to_lowercase()));
    policy.attr_deny.extend(cli.drop_attrs.iter().cloned());
    Ok(policy)
}

fn print_heading(title: &str) {
    println!("{}", format!("=== {title} ===").bold().cyan());
}
