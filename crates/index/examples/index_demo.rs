use index::{candidate_probability, LshConfig, LshIndex};
use perceptual::{signature_of, PerceptualConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = PerceptualConfig::default();
    let layout = LshConfig::default();
    let mut index = LshIndex::new(layout)?;

    for id in ["test@gmail.com", "johndoe@example.com", "janesmith@work.net"] {
        index.add(id, &signature_of(id, &cfg)?)?;
    }

    let needle = signature_of("test@gamil.com", &cfg)?;
    println!("candidates for test@gamil.com: {:?}", index.query(&needle)?);

    for s in [0.4, 0.6, 0.8] {
        println!(
            "P(candidate | jaccard={s}) = {:.4}",
            candidate_probability(s, layout.bands, layout.rows_per_band)
        );
    }
    Ok(())
}
