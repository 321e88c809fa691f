use tessera::Tessera;
use tessera_demos::common::get_extractor;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,tessera=trace,tessera_textrazor=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let tessera = Tessera::builder().with_extractor(get_extractor()?).build()?;
    let session = tessera.session();

    let _ = session.analyze(tessera_mock::PARIS).await?;
    let _ = session.apply_suggestion("Paris", "City of Light")?;
    let _ = session.apply_suggestion("Paris", "Lutetia")?;
    let _ = session.analyze(tessera_mock::ZURICH).await?;

    Ok(())
}
