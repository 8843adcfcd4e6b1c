//! One-shot search from the command line.

use propsearch_config::Config;

use crate::register::build_engine;

/// Run one search and print the response as pretty JSON on stdout.
pub(crate) async fn run_query(
    config: Config,
    text: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let query = text.join(" ");
    let (engine, _store) = build_engine(&config).await?;

    let outcome = engine.search(&query).await?;
    for degradation in &outcome.degradations {
        eprintln!("warning: {}", serde_json::to_string(degradation)?);
    }
    println!("{}", serde_json::to_string_pretty(&outcome.into_response())?);
    Ok(())
}
