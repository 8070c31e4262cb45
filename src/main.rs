// character-creator - rolls up new characters straight into your notes
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use character_creator_lib::{
    core::{ConsoleNotifier, NoteWriter},
    llm::OpenAiGenerator,
    vault::{list_folders, normalize_path, resolve_folder, FsVault},
    AppConfig, CreatorError, Result, SettingsStore,
};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}

// Logs go to stderr so stdout only carries notifications and command output
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Vec<String>) -> Result<()> {
    let (vault_override, args) = take_vault_flag(args)?;

    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "generate" => handle_generate(vault_override, &args[1..]).await,
        "settings" => handle_settings(vault_override, &args[1..]).await,
        "version" | "-v" | "--version" => {
            println!("character-creator v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

// Pull `--vault <path>` out of the args wherever it appears
fn take_vault_flag(args: Vec<String>) -> Result<(Option<PathBuf>, Vec<String>)> {
    let mut vault = None;
    let mut rest = Vec::new();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        if arg == "--vault" {
            let path = iter
                .next()
                .ok_or_else(|| CreatorError::Config("--vault needs a path".to_string()))?;
            vault = Some(PathBuf::from(path));
        } else {
            rest.push(arg);
        }
    }

    Ok((vault, rest))
}

async fn open(vault_override: Option<PathBuf>) -> Result<(AppConfig, Arc<FsVault>, SettingsStore)> {
    let config = AppConfig::from_env(vault_override)?;
    let vault = Arc::new(FsVault::new(&config.vault_root)?);
    let store = SettingsStore::load(&config.settings_path).await?;
    Ok((config, vault, store))
}

async fn handle_generate(vault_override: Option<PathBuf>, args: &[String]) -> Result<()> {
    if args.is_empty() {
        eprintln!("Error: No target folder provided");
        return Ok(());
    }

    let target = args.join(" ");
    let (config, vault, store) = open(vault_override).await?;

    let folder = resolve_folder(vault.as_ref(), &normalize_path(&target)?).await?;

    let generator = Arc::new(OpenAiGenerator::new(&store.settings().api_key, &config));
    let writer = NoteWriter::new(vault, generator, Arc::new(ConsoleNotifier));

    let outcome = writer.create_character(store.settings(), &folder).await;
    if !outcome.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_settings(vault_override: Option<PathBuf>, args: &[String]) -> Result<()> {
    let (_config, vault, mut store) = open(vault_override).await?;
    let sub = args.first().map(String::as_str).unwrap_or("show");

    match sub {
        "show" => {
            let settings = store.settings();
            println!("\nSettings ({})", store.path().display());
            println!("{}", "=".repeat(60));
            println!("API key:  {}", mask_key(&settings.api_key));
            println!("Template:\n{}", settings.template);
            println!("\nContext folders:");
            if settings.context_folders.is_empty() {
                println!("  (none)");
            }
            for folder in &settings.context_folders {
                println!("  - {}", folder);
            }
            println!("{}", "=".repeat(60));
        }
        "api-key" => {
            let Some(key) = text_argument(args) else {
                eprintln!("Error: No API key provided");
                return Ok(());
            };
            store.set_api_key(&key).await?;
            println!("✓ API key saved");
        }
        "template" => {
            let template = match args.get(1).map(String::as_str) {
                Some("--file") => {
                    let path = args.get(2).ok_or_else(|| {
                        CreatorError::Config("template --file needs a path".to_string())
                    })?;
                    tokio::fs::read_to_string(path).await?
                }
                _ => match text_argument(args) {
                    Some(text) => text,
                    None => {
                        eprintln!("Error: No template provided");
                        return Ok(());
                    }
                },
            };
            store.set_template(&template).await?;
            println!("✓ Template saved");
        }
        "folders" => {
            let folders = list_folders(vault.as_ref()).await?;
            println!("\nContext Folders");
            println!("{}", "=".repeat(60));
            if folders.is_empty() {
                println!("No folders in this vault.");
            }
            for folder in folders {
                let mark = if store.settings().is_context_folder(&folder.path) {
                    "[x]"
                } else {
                    "[ ]"
                };
                println!("  {} {}", mark, folder.path);
            }
            println!("{}", "=".repeat(60));
        }
        "toggle" => {
            let Some(path) = args.get(1) else {
                eprintln!("Error: No folder provided");
                return Ok(());
            };
            let path = normalize_path(path)?;
            let enabled = match args.get(2).map(String::as_str) {
                Some("on") => true,
                Some("off") => false,
                Some(other) => {
                    return Err(CreatorError::Config(format!(
                        "expected 'on' or 'off', got '{}'",
                        other
                    )))
                }
                None => !store.settings().is_context_folder(&path),
            };
            let enabled = store.set_context_folder(vault.as_ref(), &path, enabled).await?;
            if enabled {
                println!("✓ {} is now a context folder", path);
            } else {
                println!("✓ {} is no longer a context folder", path);
            }
        }
        other => {
            eprintln!("Unknown settings command: {}", other);
            print_usage();
        }
    }

    Ok(())
}

// Everything after the subcommand, or None if that is blank
fn text_argument(args: &[String]) -> Option<String> {
    let text = args.get(1..)?.join(" ");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }
    // Short keys would be shown whole
    if key.chars().count() <= 8 {
        return "****".to_string();
    }
    let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("****{}", tail)
}

fn print_usage() {
    println!(
        r#"character-creator v{} - Generate characters into your notes vault

USAGE:
    character-creator [--vault <path>] <COMMAND> [OPTIONS]

COMMANDS:
    generate <folder>              Generate a character note in <folder> ("/" for the vault root)
    settings show                  Show current settings
    settings api-key <key>         Set the OpenAI API key
    settings template <text>       Set the note template ({{{{Name}}}}, {{{{Description}}}})
    settings template --file <p>   Read the note template from a file
    settings folders               List vault folders and their context state
    settings toggle <folder> [on|off]
                                   Add or remove a context folder
    version                        Show version
    help                           Show this help

ENVIRONMENT:
    CHARACTER_CREATOR_VAULT        Vault root (default: current directory)
    CHARACTER_CREATOR_SETTINGS     Settings file (default: <vault>/.character-creator/data.json)
    CHARACTER_CREATOR_MODEL        Model name (default: gpt-4o)
    OPENAI_BASE_URL                API base URL (default: https://api.openai.com/v1)
    RUST_LOG                       Log filter (default: warn)

EXAMPLES:
    character-creator settings api-key sk-...
    character-creator settings toggle Lore on
    character-creator generate Characters
"#,
        env!("CARGO_PKG_VERSION")
    );
}
