//! bqnpad - the editing core of a BQN editor, on the command line.
//!
//! # Usage
//!
//! ```bash
//! bqnpad highlight prog.bqn
//! bqnpad comment prog.bqn --start 0 --end 40 --write
//! bqnpad replay prog.bqn --keys '\ = ctrl+/'
//! bqnpad settings set glyphs.modToggle true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use unicode_width::UnicodeWidthStr;

use bqnpad::app::{Effect, Model, press_key};
use bqnpad::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use bqnpad::editor::{BlockTransform, Edit, Selection, insert};
use bqnpad::glyphs;
use bqnpad::highlight::{set_background_mode, to_ansi, to_html, tokenize};
use bqnpad::input::{KeyAction, parse_key_sequence};
use bqnpad::settings::{JsonFileStore, Persisted, SettingKey, Settings};

/// The editing core of a BQN editor
#[derive(Parser, Debug)]
#[command(name = "bqnpad", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Force syntax highlight theme background (light or dark)
    #[arg(long, value_enum, global = true)]
    theme: Option<ThemeMode>,

    /// Make the mod key latch until pressed again
    #[arg(long, global = true)]
    mod_toggle: bool,

    /// Include plain ASCII glyphs in listings
    #[arg(long, global = true)]
    show_extra: bool,

    /// Show line numbers in the editor
    #[arg(long, global = true)]
    line_numbers: bool,

    /// Settings file to use
    #[arg(long, value_name = "PATH", global = true)]
    store: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tokens of a file
    Tokens {
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a file with syntax highlighting
    Highlight {
        file: PathBuf,
        /// Print HTML instead of terminal colors
        #[arg(long)]
        html: bool,
    },
    /// Indent the selected lines
    Indent(BlockArgs),
    /// Outdent the selected lines
    Outdent(BlockArgs),
    /// Toggle comments on the selected lines
    Comment(BlockArgs),
    /// Insert text at the selection
    Insert {
        #[command(flatten)]
        block: BlockArgs,
        /// Text to insert
        #[arg(long)]
        text: String,
        /// Closing delimiter; wraps a non-empty selection
        #[arg(long)]
        closing: Option<String>,
    },
    /// List the glyph table
    Glyphs {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change saved settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCommand>,
    },
    /// Type a key sequence into a file and print the result
    Replay {
        file: PathBuf,
        /// Whitespace-separated keys, e.g. `\ = shift+Tab ctrl+/`
        #[arg(long)]
        keys: String,
        /// Write the result back to the file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Args, Debug)]
struct BlockArgs {
    file: PathBuf,
    /// Selection start, in characters
    #[arg(long, default_value_t = 0)]
    start: usize,
    /// Selection end, in characters (defaults to the start)
    #[arg(long)]
    end: Option<usize>,
    /// Write the result back to the file
    #[arg(long)]
    write: bool,
}

impl BlockArgs {
    fn selection(&self) -> Selection {
        Selection::from_anchor(self.start, self.end.unwrap_or(self.start))
    }
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// List every setting and key binding
    List,
    /// Print one setting
    Get { key: SettingKey },
    /// Change one setting
    Set {
        key: SettingKey,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Flip one setting
    Toggle { key: SettingKey },
    /// Forget all saved settings
    Reset,
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_source(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

/// Apply an edit to a file, then write it back or print it.
fn run_edit(args: &BlockArgs, edit_fn: impl FnOnce(&str, Selection) -> Edit) -> Result<()> {
    let source = read_source(&args.file)?;
    let edit = edit_fn(&source, args.selection());
    let result = edit.apply(&source);
    if args.write {
        write_source(&args.file, &result)?;
    } else {
        print!("{result}");
    }
    let sel = edit.selection;
    eprintln!("selection {}..{}", sel.start, sel.end);
    Ok(())
}

fn run_block(args: &BlockArgs, transform: BlockTransform) -> Result<()> {
    run_edit(args, |source, sel| transform.apply(source, sel))
}

fn print_tokens(file: &Path, json: bool) -> Result<()> {
    let tokens = tokenize(&read_source(file)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }
    for token in tokens {
        let class = token.class.map_or("-", |class| class.name());
        println!("{class:<12} {:?}", token.content);
    }
    Ok(())
}

fn print_glyphs(show_extra: bool, json: bool) -> Result<()> {
    let visible: Vec<&glyphs::Glyph> = glyphs::visible(show_extra).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }
    for glyph in visible {
        let pad = 3usize.saturating_sub(glyph.glyph.width());
        let key = glyph.key.map_or_else(|| "  ".to_string(), |key| format!("\\{key}"));
        let hint = glyph.hint.unwrap_or_default().replace('\n', " / ");
        println!(
            "{}{}{key:<4}{:<10} {hint}",
            glyph.glyph,
            " ".repeat(pad),
            glyph.class.name()
        );
    }
    println!("\nFull layout: {}", glyphs::KEYMAP_URL);
    Ok(())
}

fn print_settings(settings: &Settings) {
    for key in SettingKey::ALL {
        println!("{key} = {}", key.get(settings));
    }
    for action in KeyAction::ALL {
        let bind = settings
            .key_bind(action)
            .map_or_else(|| "none".to_string(), |bind| bind.to_string());
        println!("keyBinds.{} = {bind}", action.name());
    }
}

fn run_settings(action: Option<SettingsCommand>, flags: &ConfigFlags) -> Result<()> {
    let path = flags.store_path();
    let mut settings: Persisted<Settings, _> = Persisted::load(JsonFileStore::new(&path))
        .with_context(|| format!("Failed to load settings {}", path.display()))?;
    match action.unwrap_or(SettingsCommand::List) {
        SettingsCommand::List => print_settings(settings.get()),
        SettingsCommand::Get { key } => println!("{}", key.get(settings.get())),
        SettingsCommand::Set { key, value } => {
            settings.update(0, |s| key.set(s, value));
            println!("{key} = {value}");
        }
        SettingsCommand::Toggle { key } => {
            let mut value = false;
            settings.update(0, |s| value = key.toggle(s));
            println!("{key} = {value}");
        }
        SettingsCommand::Reset => settings.set(Settings::default(), 0),
    }
    settings
        .flush()
        .with_context(|| format!("Failed to save settings {}", path.display()))
}

fn run_replay(file: &Path, keys: &str, write: bool, flags: &ConfigFlags) -> Result<()> {
    let presses = parse_key_sequence(keys).context("Invalid key sequence")?;
    let code = if file.exists() {
        read_source(file)?
    } else {
        String::new()
    };
    let persisted: Persisted<Settings, _> = Persisted::load(JsonFileStore::new(flags.store_path()))?;
    let mut settings = persisted.get().clone();
    flags.apply_to(&mut settings);

    let mut model = Model::new(&code, settings);
    for press in &presses {
        model = press_key(model, press);
        for effect in model.take_effects() {
            if !matches!(effect, Effect::CodeChanged | Effect::SettingsChanged) {
                tracing::warn!(?effect, "effect not available in replay");
            }
        }
    }

    let result = model.code().unwrap_or_default();
    if write {
        write_source(file, &result)?;
    } else {
        print!("{result}");
    }
    if let Some(sel) = model.selection() {
        eprintln!("selection {}..{}", sel.start, sel.end);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "resolved flags");

    set_background_mode(effective.theme.and_then(ThemeMode::background));

    match cli.command {
        Command::Tokens { file, json } => print_tokens(&file, json),
        Command::Highlight { file, html } => {
            let tokens = tokenize(&read_source(&file)?);
            if html {
                println!("{}", to_html(&tokens));
            } else {
                print!("{}", to_ansi(&tokens));
            }
            Ok(())
        }
        Command::Indent(args) => run_block(&args, BlockTransform::Indent),
        Command::Outdent(args) => run_block(&args, BlockTransform::Outdent),
        Command::Comment(args) => run_block(&args, BlockTransform::ToggleComment),
        Command::Insert {
            block,
            text,
            closing,
        } => run_edit(&block, |source, sel| insert(source, sel, &text, closing.as_deref())),
        Command::Glyphs { json } => print_glyphs(effective.show_extra, json),
        Command::Settings { action } => run_settings(action, &effective),
        Command::Replay { file, keys, write } => run_replay(&file, &keys, write, &effective),
    }
}
