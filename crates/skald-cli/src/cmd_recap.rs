use skald_core::{SkaldConfig, SkaldPaths};
use skald_infer::InferenceClient;
use std::path::Path;

pub fn execute(repo_root: &Path, timeframe: &str) -> anyhow::Result<()> {
    let paths = SkaldPaths::discover(repo_root);
    let config = SkaldConfig::load(&paths);
    let client = InferenceClient::new(&config);

    let recap = skald_recap::generate(&paths, &client, &config, timeframe);
    println!("{recap}");
    Ok(())
}
