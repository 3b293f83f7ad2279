use onion_config::*;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use onion_keys::{
    derive_identity, derive_onion_address, fingerprint_from_public_der, KeyError, KeyType,
    Keypair, KeypairGenerator, RngGenerator, ONION_FINGERPRINT_LEN,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::RsaPrivateKey;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Seeded generator that fails once it has handed out `budget` keypairs.
struct BudgetGenerator {
    inner: RngGenerator<StdRng>,
    budget: usize,
    calls: AtomicUsize,
}

impl BudgetGenerator {
    fn new(seed: u64, budget: usize) -> Self {
        Self {
            inner: RngGenerator::new(StdRng::seed_from_u64(seed)),
            budget,
            calls: AtomicUsize::new(0),
        }
    }
}

impl KeypairGenerator for BudgetGenerator {
    fn generate(&self, kind: KeyType, bits: usize) -> onion_keys::Result<Keypair> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.budget {
            return Err(KeyError::KeyGenerationFailed("budget exhausted".into()));
        }
        self.inner.generate(kind, bits)
    }
}

fn is_onion_swarm_address(addr: &str) -> bool {
    let Some(rest) = addr.strip_prefix("/onion/") else {
        return false;
    };
    let Some((fingerprint, port)) = rest.split_once(':') else {
        return false;
    };
    fingerprint.len() >= 10
        && fingerprint
            .chars()
            .all(|c| c.is_ascii_lowercase() || ('2'..='7').contains(&c))
        && port == "4003"
}

#[test]
fn test_init_end_to_end() {
    let _ = env_logger::builder().is_test(true).try_init();

    let generator = BudgetGenerator::new(2024, 2);
    let mut out = Vec::new();
    let config = init_with(
        &generator,
        &mut out,
        1024,
        default_bootstrap_peers(),
        &ConfigDefaults::default(),
    )
    .expect("init");

    let swarm = &config.addresses.swarm;
    assert_eq!(swarm.len(), 3);
    assert!(is_onion_swarm_address(&swarm[0]), "bad onion addr {}", swarm[0]);
    assert_eq!(swarm[1], "/ip4/0.0.0.0/tcp/4001");
    assert_eq!(swarm[2], "/ip6/::/tcp/4001");
    assert_eq!(config.datastore.storage_gc_watermark, 90);
    assert_eq!(config.swarm.conn_mgr.high_water, 900);
    assert_eq!(config.bootstrap, default_bootstrap_peers());

    config.identity.verify().expect("identity key matches peer id");

    let progress = String::from_utf8(out).unwrap();
    assert!(progress.contains("generating 1024-bit RSA keypair..."));
    assert!(progress.contains(&format!("peer identity: {}", config.identity.peer_id)));
}

#[test]
fn test_onion_keys_start_with_swarm_fingerprint() {
    let generator = BudgetGenerator::new(7, 2);
    let config = init_with(
        &generator,
        &mut std::io::sink(),
        1024,
        Vec::new(),
        &ConfigDefaults::default(),
    )
    .unwrap();

    let fingerprint = &config.onion_keys[..ONION_FINGERPRINT_LEN];
    assert_eq!(config.addresses.swarm[0], onion_multiaddr(fingerprint, 4003));
    assert!(config.onion_keys.len() > ONION_FINGERPRINT_LEN);
    assert_ne!(&config.onion_keys[ONION_FINGERPRINT_LEN..], config.identity.private_key);

    // the key half of OnionKeys reproduces the fingerprint half
    let der = STANDARD
        .decode(&config.onion_keys[ONION_FINGERPRINT_LEN..])
        .expect("padded standard base64");
    let private = RsaPrivateKey::from_pkcs1_der(&der).expect("PKCS#1 private key");
    let public_der = private.to_public_key().to_pkcs1_der().unwrap();
    assert_eq!(fingerprint_from_public_der(public_der.as_bytes()), fingerprint);
}

#[test]
fn test_init_rejects_weak_identity_keys() {
    let generator = BudgetGenerator::new(1, 2);
    let mut out = Vec::new();
    let result = init_with(
        &generator,
        &mut out,
        512,
        default_bootstrap_peers(),
        &ConfigDefaults::default(),
    );

    assert!(matches!(
        result,
        Err(KeyError::InsufficientKeyStrength { requested: 512, .. })
    ));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    assert!(out.is_empty());
}

#[test]
fn test_onion_failure_aborts_init() {
    // the identity keypair uses up the budget, the onion keypair fails
    let generator = BudgetGenerator::new(3, 1);
    let result = init_with(
        &generator,
        &mut std::io::sink(),
        1024,
        Vec::new(),
        &ConfigDefaults::default(),
    );
    assert!(matches!(result, Err(KeyError::KeyDerivationFailed(_))));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_assembly_from_same_derivations_is_identical() {
    let generator = BudgetGenerator::new(9, 2);
    let identity = derive_identity(&generator, &mut std::io::sink(), 1024).unwrap();
    let onion = derive_onion_address(&generator).unwrap();
    let defaults = ConfigDefaults::default().with_conn_mgr_watermarks(100, 200);

    let first = assemble_default_config(
        identity.clone(),
        &onion,
        default_bootstrap_peers(),
        default_datastore_config(&defaults),
        &defaults,
    );
    let second = assemble_default_config(
        identity,
        &onion,
        default_bootstrap_peers(),
        default_datastore_config(&defaults),
        &defaults,
    );
    assert_eq!(first, second);
    assert_eq!(first.swarm.conn_mgr.low_water, 100);
    assert_eq!(first.swarm.conn_mgr.high_water, 200);
    assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
}

#[test]
fn test_debug_output_hides_onion_private_key() {
    let generator = BudgetGenerator::new(5, 2);
    let config = init_with(
        &generator,
        &mut std::io::sink(),
        1024,
        Vec::new(),
        &ConfigDefaults::default(),
    )
    .unwrap();

    let rendered = format!("{config:?}");
    assert!(rendered.contains(&config.identity.peer_id));
    assert!(!rendered.contains(&config.onion_keys));
    assert!(!rendered.contains(&config.identity.private_key));
}
