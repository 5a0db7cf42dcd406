use canonical::{normalize_identity, NormalizeConfig};

fn main() {
    let cfg = NormalizeConfig::default();
    for raw in [
        "John.Doe+promo@Example.com",
        "john_doe@example.com",
        "  Zoë   Saldaña ",
    ] {
        let folded = normalize_identity(raw, &cfg).expect("normalization succeeds");
        println!("{raw:?} -> {folded:?}");
    }
}
