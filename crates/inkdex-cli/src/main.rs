//! Inkdex CLI - Search the tattoo directory from the command line

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use inkdex_core::fixtures::sample_catalog;
use inkdex_core::{Catalog, CoreError, RecordKind, SearchHit, StyleIndex};
use inkdex_search::{ExportFormat, SearchOptions, SortBy};
use inkdex_session::{SearchSession, SessionConfig};
use inkdex_store::LocalStorage;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("inkdex=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "help" | "--help" | "-h" => print_help(),
        "search" => {
            let (text, options) = parse_search_args(&args[2..])?;
            search(&text, options).await?;
        }
        "suggest" => {
            if args.len() < 3 {
                eprintln!("Usage: inkdex suggest <text>");
                return Ok(());
            }
            suggest(&args[2]).await?;
        }
        "styles" => styles(args.get(2).map(String::as_str))?,
        "recent" => recent().await?,
        "clear-recent" => {
            open_session().await?.clear_recent_searches().await;
            println!("Cleared recent searches");
        }
        "export" => {
            if args.len() < 4 {
                eprintln!("Usage: inkdex export <text> <json|csv>");
                return Ok(());
            }
            export(&args[2], &args[3]).await?;
        }
        "saved" => saved(&args[2..]).await?,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"Inkdex - Tattoo artist, studio and style search

USAGE:
    inkdex <COMMAND> [OPTIONS]

COMMANDS:
    help            Show this help message
    search          Search artists, studios and styles
    suggest         Show completions for a partial query
    styles          List styles, optionally matching a name or alias
    recent          Show recent searches
    clear-recent    Forget recent searches
    export          Search and write the results to a file
    saved           Manage saved searches (list, add, run, delete)

SEARCH OPTIONS:
    --style <id>        Only records with this style (repeatable)
    --location <text>   Location or postcode contains text
    --min-rating <n>    Minimum rating
    --sort <key>        relevance, rating, experience, price_low, price_high
    --type <kind>       artist, studio or style (repeatable)

ENVIRONMENT:
    INKDEX_STORAGE_DIR  Where recent and saved searches live (default .inkdex)
    INKDEX_DATA         JSON dataset to search instead of the built-in sample

EXAMPLES:
    inkdex search realism --location London --sort rating
    inkdex suggest sar
    inkdex styles irezumi
    inkdex export koi csv
    inkdex saved add "London realism" realism "for the sleeve"
"#
    );
}

fn parse_search_args(args: &[String]) -> Result<(String, SearchOptions)> {
    let mut text = Vec::new();
    let mut options = SearchOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{} needs a value", flag))
        };

        match arg.as_str() {
            "--style" => options.filters.styles.push(value("--style")?),
            "--location" => options.filters.location = Some(value("--location")?),
            "--min-rating" => {
                options.filters.rating = value("--min-rating")?
                    .parse()
                    .context("--min-rating must be a number")?
            }
            "--sort" => options.sort_by = value("--sort")?.parse::<SortBy>()?,
            "--type" => options.kinds.push(value("--type")?.parse::<RecordKind>()?),
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            word => text.push(word.to_string()),
        }
    }

    Ok((text.join(" "), options))
}

fn load_catalog() -> Result<Catalog> {
    match std::env::var("INKDEX_DATA") {
        Ok(path) => Catalog::from_json_file(&path).with_context(|| format!("Failed to load dataset {}", path)),
        Err(_) => Ok(sample_catalog()),
    }
}

async fn open_session() -> Result<SearchSession> {
    open_session_with(load_catalog()?).await
}

async fn open_session_with(catalog: Catalog) -> Result<SearchSession> {
    let dir = std::env::var("INKDEX_STORAGE_DIR").unwrap_or_else(|_| ".inkdex".to_string());
    let storage = LocalStorage::open(PathBuf::from(&dir)).await?;
    debug!("Using storage at {}", dir);

    // One-shot commands have no keystrokes to coalesce
    let config = SessionConfig::default().with_debounce(Duration::ZERO);
    Ok(SearchSession::open(Arc::new(catalog), Arc::new(storage), config).await)
}

fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No results");
        return;
    }

    for hit in hits {
        let location = hit.record.location().unwrap_or("-");
        match hit.record.rating_opt() {
            Some(rating) => println!(
                "  [{}] {} - {} ({:.1}) score {:.0}",
                hit.kind(),
                hit.name(),
                location,
                rating,
                hit.relevance_score
            ),
            None => println!("  [{}] {} score {:.0}", hit.kind(), hit.name(), hit.relevance_score),
        }
    }
}

/// Reject style ids the catalogue does not know
fn check_styles(index: &StyleIndex, styles: &[String]) -> Result<()> {
    match styles.iter().find(|id| !index.contains(id)) {
        Some(id) => Err(CoreError::UnknownStyle(id.clone()).into()),
        None => Ok(()),
    }
}

async fn search(text: &str, options: SearchOptions) -> Result<()> {
    let catalog = load_catalog()?;
    check_styles(&catalog.style_index(), &options.filters.styles)?;

    let session = open_session_with(catalog).await?;
    let hits = session.execute_search(text, options).await?;
    println!("{} results", hits.len());
    print_hits(&hits);
    Ok(())
}

async fn suggest(text: &str) -> Result<()> {
    let session = open_session().await?;
    for suggestion in session.get_search_suggestions(text).await {
        println!("  {} ({})", suggestion.text, suggestion.kind);
    }
    Ok(())
}

fn styles(text: Option<&str>) -> Result<()> {
    let index = load_catalog()?.style_index();
    let styles: Vec<_> = match text {
        Some(text) => index.find_by_alias(text),
        None => index.iter().collect(),
    };

    for style in styles {
        if style.aliases.is_empty() {
            println!("  {} - {}", style.id, style.name);
        } else {
            println!("  {} - {} (aka {})", style.id, style.name, style.aliases.join(", "));
        }
    }
    Ok(())
}

async fn recent() -> Result<()> {
    let session = open_session().await?;
    let entries = session.recent_searches().await;

    if entries.is_empty() {
        println!("No recent searches");
    } else {
        println!("Recent searches:");
        for entry in entries {
            println!("  {} - {}", entry.timestamp.format("%Y-%m-%d %H:%M"), entry.query);
        }
    }
    Ok(())
}

async fn export(text: &str, format: &str) -> Result<()> {
    let format = match ExportFormat::parse(format) {
        ExportFormat::Raw => bail!("Unsupported export format: {}", format),
        format => format,
    };

    let session = open_session().await?;
    session.execute_search(text, SearchOptions::default()).await?;

    let snapshot = session.snapshot().await;
    let file_name = snapshot.file_name(format);
    let contents = inkdex_search::export_results(snapshot, format)?.into_text()?;

    tokio::fs::write(&file_name, contents)
        .await
        .with_context(|| format!("Failed to write {}", file_name))?;
    println!("Wrote {}", file_name);
    Ok(())
}

async fn saved(args: &[String]) -> Result<()> {
    let session = open_session().await?;

    match args.first().map(String::as_str) {
        None | Some("list") => {
            let searches = session.saved_searches().await;
            if searches.is_empty() {
                println!("No saved searches");
            }
            for search in searches {
                println!(
                    "  {} - {} ('{}', used {} times)",
                    search.id, search.name, search.query.text, search.use_count
                );
            }
        }
        Some("add") => {
            if args.len() < 3 {
                eprintln!("Usage: inkdex saved add <name> <text> [description]");
                return Ok(());
            }
            session.execute_search(&args[2], SearchOptions::default()).await?;
            let search = session.save_named_search(&args[1], args.get(3).cloned()).await;
            println!("Saved search: {}", search.id);
        }
        Some("run") => {
            let id = parse_id(args.get(1))?;
            let hits = session.run_saved_search(id).await?;
            println!("{} results", hits.len());
            print_hits(&hits);
        }
        Some("delete") => {
            let id = parse_id(args.get(1))?;
            let removed = session.delete_saved_search(id).await?;
            println!("Deleted saved search: {}", removed.name);
        }
        Some(other) => bail!("Unknown saved command: {}", other),
    }
    Ok(())
}

fn parse_id(arg: Option<&String>) -> Result<Uuid> {
    let arg = arg.context("Missing saved search id")?;
    Uuid::parse_str(arg).with_context(|| format!("Invalid saved search id: {}", arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_search_args() {
        let (text, options) = parse_search_args(&args(&[
            "black", "--style", "realism", "and", "grey", "--location", "London", "--min-rating", "4.5", "--sort",
            "rating", "--type", "artist",
        ]))
        .unwrap();

        assert_eq!(text, "black and grey");
        assert_eq!(options.filters.styles, vec!["realism"]);
        assert_eq!(options.filters.location.as_deref(), Some("London"));
        assert_eq!(options.filters.rating, 4.5);
        assert_eq!(options.sort_by, SortBy::Rating);
        assert_eq!(options.kinds, vec![RecordKind::Artist]);
    }

    #[test]
    fn test_parse_search_args_rejects_bad_input() {
        assert!(parse_search_args(&args(&["koi", "--sort", "newest"])).is_err());
        assert!(parse_search_args(&args(&["koi", "--style"])).is_err());
        assert!(parse_search_args(&args(&["koi", "--colour", "red"])).is_err());
    }

    #[test]
    fn test_check_styles() {
        let index = StyleIndex::builtin();
        assert!(check_styles(&index, &["japanese".to_string(), "dotwork".to_string()]).is_ok());

        let err = check_styles(&index, &["japanese".to_string(), "anime".to_string()]).unwrap_err();
        assert!(matches!(err.downcast_ref::<CoreError>(), Some(CoreError::UnknownStyle(id)) if id == "anime"));
    }
}
