use tessera::{NormalizerConfig, RenderOptions, Tessera};
use tessera_demos::common::get_extractor;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tessera = Tessera::builder()
        .with_extractor(get_extractor()?)
        .normalizer(NormalizerConfig::default())
        .render_options(RenderOptions {
            exclude_identity_suggestion: true,
        })
        .build()?;
    let session = tessera.session();

    let report = session.analyze_report(tessera_mock::ZURICH).await?;

    println!("analysis #{} via {}", report.seq, report.extractor);
    println!("{:<10} {:>5}  {:<40} wikidata", "keyword", "score", "wiki");
    for kw in &report.keywords {
        println!(
            "{:<10} {:>5.2}  {:<40} {}",
            kw.text,
            kw.score,
            kw.metadata.wiki_link.as_deref().unwrap_or("-"),
            kw.metadata.wikidata_id.as_deref().unwrap_or("-"),
        );
    }
    for w in &report.warnings {
        println!("warning: {w}");
    }

    Ok(())
}
