use tessera::Tessera;
use tessera_demos::common::{get_extractor, print_segments};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Extractor: fixture mock in CI, TextRazor otherwise.
    let tessera = Tessera::builder().with_extractor(get_extractor()?).build()?;

    // 2. Overlapping candidates ("New", "New York", "Times") resolve longest-first.
    let annotation = tessera.annotate(tessera_mock::NYT).await?;
    println!("extractor: {}", annotation.extractor);
    for span in &annotation.spans {
        println!("  {:>2}..{:<2} {:<10} score={:.2}", span.start, span.end, span.text, span.score);
    }

    // 3. Render through a session.
    let session = tessera.session();
    let segments = session.analyze(tessera_mock::NYT).await?;
    print_segments(&segments);

    Ok(())
}
