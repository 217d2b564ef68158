use crate::output::print_json;
use anyhow::Context;
use notemod_core::config::RulesConfig;
use notemod_core::conjugation::{
    ConjugationEngine, ConjugationSource, Policy, SdConjugate, StaticSource,
};
use notemod_core::NoteTags;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

pub struct ConjugateArgs {
    pub verb: String,
    pub tags_json: String,
    pub policy: Policy,
    pub seed: Option<u64>,
    pub conjugator: String,
    pub table: Option<PathBuf>,
    pub rules: Option<PathBuf>,
}

pub fn run(args: ConjugateArgs) -> anyhow::Result<()> {
    let tags = NoteTags::from_json(&args.tags_json).context("invalid note tags argument")?;

    let config = match &args.rules {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => RulesConfig::default(),
    };

    let source: Box<dyn ConjugationSource> = match &args.table {
        Some(path) => Box::new(
            StaticSource::load(path)
                .with_context(|| format!("failed to load conjugation table {}", path.display()))?,
        ),
        None => Box::new(SdConjugate::locate(&args.conjugator)?),
    };

    let table = source
        .fetch_conjugations(&args.verb)
        .with_context(|| format!("failed to conjugate '{}'", args.verb))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let engine = ConjugationEngine::new(config.rules);
    let commands = engine.evaluate(args.policy, &table, &tags, &mut rng);
    tracing::info!(
        verb = %args.verb,
        policy = %args.policy,
        rules = engine.rules().len(),
        commands = commands.len(),
        "conjugation evaluated"
    );

    print_json(&commands)
}
