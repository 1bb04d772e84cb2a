use skald_core::{SkaldConfig, SkaldPaths, TimeWindow};
use skald_infer::InferenceClient;
use std::path::Path;

pub fn execute(repo_root: &Path, file: Option<&str>, since: &str) -> anyhow::Result<()> {
    let paths = SkaldPaths::discover(repo_root);
    let config = SkaldConfig::load(&paths);
    let client = InferenceClient::new(&config);

    if let Some(file) = file {
        let outcome = skald_chunk::prechunk_file(&client, &paths, &config, file)?;
        println!("{file}: {}", outcome.describe());
        return Ok(());
    }

    let window = TimeWindow::resolve(since, &config.timeframes);
    let results = skald_chunk::prechunk_recent(&client, &paths, &config, &window);
    if results.is_empty() {
        println!("No changed source files to analyze.");
        return Ok(());
    }
    for (file, outcome) in &results {
        println!("{file}: {}", outcome.describe());
    }
    Ok(())
}
