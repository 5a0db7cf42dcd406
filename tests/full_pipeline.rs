use std::io::Write;

use infrakit::pow;
use infrakit::{
    AssignmentOutcome, BucketManager, InfrakitConfig, NormalizeConfig, assign_all, assign_raw,
    diversify_hex,
};
use tempfile::NamedTempFile;

fn partition(manager: &BucketManager) -> Vec<(String, Vec<String>)> {
    manager
        .buckets()
        .map(|(bucket, members)| (bucket.to_string(), members.to_vec()))
        .collect()
}

#[test]
fn email_stream_through_normalizer() {
    let cfg = NormalizeConfig::default();
    let mut manager = BucketManager::with_defaults().unwrap();
    let stream = [
        "test@gmail.com",
        "john.doe@example.com",
        "tset@gmail.com",
        "jane.smith@work.net",
        "test@gamil.com",
        "john_doe@example.com",
        "test@gmail.com",
    ];

    let outcomes: Vec<AssignmentOutcome> = stream
        .iter()
        .map(|raw| assign_raw(&mut manager, raw, &cfg).unwrap().outcome)
        .collect();
    assert_eq!(
        outcomes,
        vec![
            AssignmentOutcome::NewBucket,
            AssignmentOutcome::NewBucket,
            AssignmentOutcome::Joined,
            AssignmentOutcome::NewBucket,
            AssignmentOutcome::Joined,
            AssignmentOutcome::Duplicate,
            AssignmentOutcome::Duplicate,
        ]
    );

    assert_eq!(
        partition(&manager),
        vec![
            (
                "test@gmail.com".to_string(),
                vec![
                    "test@gmail.com".to_string(),
                    "tset@gmail.com".to_string(),
                    "test@gamil.com".to_string(),
                ]
            ),
            (
                "johndoe@example.com".to_string(),
                vec!["johndoe@example.com".to_string()]
            ),
            (
                "janesmith@work.net".to_string(),
                vec!["janesmith@work.net".to_string()]
            ),
        ]
    );
}

#[test]
fn email_stream_without_local_part_folding() {
    let cfg = NormalizeConfig::default().with_email_local_part(false);
    let mut manager = BucketManager::with_defaults().unwrap();
    let pairs = assign_all(
        &mut manager,
        [
            "test@gmail.com",
            "john.doe@example.com",
            "tset@gmail.com",
            "jane.smith@work.net",
            "test@gamil.com",
            "john_doe@example.com",
            "test@gmail.com",
        ],
        &cfg,
    )
    .unwrap();

    let buckets: Vec<&str> = pairs.iter().map(|(_, bucket)| bucket.as_str()).collect();
    assert_eq!(
        buckets,
        vec![
            "test@gmail.com",
            "john.doe@example.com",
            "test@gmail.com",
            "jane.smith@work.net",
            "test@gmail.com",
            "john.doe@example.com",
            "test@gmail.com",
        ]
    );
    assert_eq!(manager.len(), 6);
    assert_eq!(manager.bucket_count(), 3);
}

#[test]
fn every_member_links_to_bucket_seed() {
    let cfg = NormalizeConfig::default();
    let mut manager = BucketManager::with_defaults().unwrap();
    assign_all(
        &mut manager,
        [
            "christopher",
            "christophre",
            "khristophre",
            "margaret.johnson",
            "margaret.jonson",
        ],
        &cfg,
    )
    .unwrap();

    let threshold = manager.config().threshold;
    for (bucket, members) in manager.buckets() {
        assert_eq!(members[0], bucket);
        // Each later member matched some earlier member of its bucket.
        for (i, member) in members.iter().enumerate().skip(1) {
            let sig = manager.signature(member).unwrap();
            let linked = members[..i].iter().any(|earlier| {
                sig.jaccard_estimate(manager.signature(earlier).unwrap()) >= threshold
            });
            assert!(linked, "{member} in {bucket}");
        }
    }
}

#[test]
fn yaml_configured_run() {
    let yaml = r#"
version: "1.0"
name: "strict"
matcher:
  threshold: 0.95
"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let config = InfrakitConfig::from_file(file.path()).unwrap();
    let cfg = config.normalize_config();
    let mut manager = config.build_manager().unwrap();

    assign_raw(&mut manager, "test@gmail.com", &cfg).unwrap();
    let typo = assign_raw(&mut manager, "tset@gmail.com", &cfg).unwrap();
    assert_eq!(typo.outcome, AssignmentOutcome::NewBucket);
    assert_eq!(manager.bucket_count(), 2);
}

#[test]
fn diversification_end_to_end() {
    let data = "3042F5666F6F";
    assert_eq!(
        diversify_hex(&"00".repeat(16), data).unwrap(),
        "7ddc20a207ef0c7d7c7c40f36725035c"
    );
    assert_eq!(
        diversify_hex(&"00".repeat(24), data).unwrap(),
        "43b1a4d765326ce0427b1374b27dbff6c3c24e94a1960409"
    );
    assert_eq!(
        diversify_hex(&"00".repeat(32), data).unwrap(),
        "b5054fa8b0b11852115732183532fdc87c2199e36fbcac70049de7c8cf5585d8"
    );
}

#[test]
fn proof_of_work_from_config() {
    let config = InfrakitConfig::default();
    let proof = pow::solve(b"Hello, world!", config.pow.difficulty, config.pow.max_nonce).unwrap();
    assert_eq!(proof.nonce, 4250);
    assert!(proof.digest.starts_with("0000c3af"));
}
