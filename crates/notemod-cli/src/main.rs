mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::conjugate::ConjugateArgs;
use notemod_core::conjugation::{Policy, SD_CONJUGATE};
use notemod_core::gender::GENDER_FIELD;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "notemod",
    about = "Filters that print flashcard note modification commands as JSON",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log more to stderr (-v info, -vv debug; `conjugate` logs info by default)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill conjugation fields of a Spanish verb note
    Conjugate {
        /// Verb in infinitive form
        verb: String,

        /// Note tags as a JSON array of strings
        tags: String,

        /// Which tags suppress a field: `skip` (deterministic) or `done`
        /// (probabilistic, marks processed fields)
        #[arg(long, default_value = "done")]
        policy: Policy,

        /// Seed for card-generation sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Conjugator executable (name on PATH or path)
        #[arg(long, default_value = SD_CONJUGATE)]
        conjugator: String,

        /// Read the conjugation table from a JSON file instead of running the conjugator
        #[arg(long, conflicts_with = "conjugator")]
        table: Option<PathBuf>,

        /// YAML file replacing the built-in rule table
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Set the Gender field from a German noun's article
    DeduceGender {
        /// Noun with its definite article, e.g. "die Frage"
        word: Option<String>,

        /// Field to write
        #[arg(long, default_value = GENDER_FIELD)]
        field: String,
    },

    /// Set fields from `<field> <value>` argument pairs
    SetFields {
        #[arg(allow_hyphen_values = true, num_args = 0..)]
        pairs: Vec<String>,
    },

    /// Tag and clear fields containing only "-" (note fields as JSON on stdin)
    DisableSkipped,

    /// Rewrite the single image in a field with a new height
    ResizeImage {
        /// Field holding the image
        field: String,
        /// Current field value
        #[arg(allow_hyphen_values = true)]
        html: String,
        /// Height attribute to set
        height: String,
        /// Tag to add to the note
        tag: String,
    },

    /// Apply commands from stdin to a note and print the result
    Apply {
        /// Note as JSON: {"fields": {...}, "tags": [...]}
        note: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match (cli.verbose, &cli.command) {
        (0, Commands::Conjugate { .. }) => tracing::Level::INFO,
        (0, _) => tracing::Level::WARN,
        (1, _) => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::default().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Conjugate {
            verb,
            tags,
            policy,
            seed,
            conjugator,
            table,
            rules,
        } => cmd::conjugate::run(ConjugateArgs {
            verb,
            tags_json: tags,
            policy,
            seed,
            conjugator,
            table,
            rules,
        }),
        Commands::DeduceGender { word, field } => cmd::gender::run(word.as_deref(), &field),
        Commands::SetFields { pairs } => cmd::set_fields::run(&pairs),
        Commands::DisableSkipped => cmd::disable_skipped::run(),
        Commands::ResizeImage {
            field,
            html,
            height,
            tag,
        } => cmd::resize_image::run(&field, &html, &height, &tag),
        Commands::Apply { note } => cmd::apply::run(&note),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
