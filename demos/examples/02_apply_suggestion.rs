use tessera::Tessera;
use tessera_demos::common::{get_extractor, print_segments};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tessera = Tessera::builder().with_extractor(get_extractor()?).build()?;
    let session = tessera.session();

    print_segments(&session.analyze(tessera_mock::PARIS).await?);

    // Same-length replacement keeps every span aligned.
    print_segments(&session.apply_suggestion("Paris", "Rome!")?);

    // A word can only be replaced once per analysis.
    print_segments(&session.apply_suggestion("Paris", "Lutetia")?);

    println!("buffer:   {}", session.current_buffer());
    println!("replaced: {:?}", session.replaced_words());

    // Re-analysis starts over with fresh offsets.
    print_segments(&session.analyze(&session.current_buffer()).await?);

    Ok(())
}
