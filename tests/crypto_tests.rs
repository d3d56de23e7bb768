//! Integration tests for the PassVault crypto module.

use passvault::crypto::{
    derive_key, derive_key_with_params, generate_salt, open, seal, Argon2Params,
};

/// Weak-but-valid Argon2 parameters so KDF tests stay fast.
fn test_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

// ---------------------------------------------------------------------------
// Seal / open round-trip
// ---------------------------------------------------------------------------

#[test]
fn seal_open_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = b"correct horse battery staple";

    let blob = seal(&key, plaintext).expect("seal should succeed");

    // Blob must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(blob.len() > plaintext.len());

    let recovered = open(&key, &blob).expect("open should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn seal_produces_different_blobs_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"same plaintext";

    let blob1 = seal(&key, plaintext).expect("seal 1");
    let blob2 = seal(&key, plaintext).expect("seal 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(blob1, blob2, "two seals of the same plaintext must differ");
}

#[test]
fn open_with_wrong_key_fails() {
    let key = [0x11u8; 32];
    let wrong_key = [0x22u8; 32];

    let blob = seal(&key, b"top secret").expect("seal");
    let result = open(&wrong_key, &blob);

    assert!(result.is_err(), "opening with the wrong key must fail");
}

#[test]
fn open_with_truncated_blob_fails() {
    // Anything shorter than nonce + tag (28 bytes) should fail.
    let key = [0xAAu8; 32];
    assert!(open(&key, &[0u8; 5]).is_err());
    assert!(open(&key, &[0u8; 27]).is_err());
}

#[test]
fn flipping_any_region_of_the_blob_fails_auth() {
    let key = [0xBBu8; 32];
    let blob = seal(&key, b"tamper target").expect("seal");

    // Nonce, ciphertext body, and tag — a flipped bit anywhere must be
    // rejected, never decrypted to garbage.
    for index in [0, 12, blob.len() / 2, blob.len() - 1] {
        let mut tampered = blob.clone();
        tampered[index] ^= 0x01;
        assert!(
            open(&key, &tampered).is_err(),
            "bit flip at byte {index} must fail auth"
        );
    }
}

// ---------------------------------------------------------------------------
// Key derivation (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn derive_key_same_inputs_same_output() {
    let password = b"my-secure-passphrase";
    let salt = generate_salt();

    let key1 = derive_key_with_params(password, &salt, &test_params()).expect("derive 1");
    let key2 = derive_key_with_params(password, &salt, &test_params()).expect("derive 2");

    assert_eq!(key1, key2, "same password + salt must produce the same key");
}

#[test]
fn derive_key_different_salts_different_keys() {
    let password = b"same-password";
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive_key_with_params(password, &salt1, &test_params()).expect("derive 1");
    let key2 = derive_key_with_params(password, &salt2, &test_params()).expect("derive 2");

    assert_ne!(key1, key2, "different salts must produce different keys");
}

#[test]
fn derive_key_different_passwords_different_keys() {
    let salt = generate_salt();

    let key1 = derive_key_with_params(b"password-one", &salt, &test_params()).expect("derive 1");
    let key2 = derive_key_with_params(b"password-two", &salt, &test_params()).expect("derive 2");

    assert_ne!(
        key1, key2,
        "different passwords must produce different keys"
    );
}

#[test]
fn derive_key_with_default_params_is_deterministic() {
    // One slow test with production parameters, to pin the defaults.
    let salt = [7u8; 16];
    let key1 = derive_key(b"hunter2hunter2", &salt).expect("derive 1");
    let key2 = derive_key(b"hunter2hunter2", &salt).expect("derive 2");
    assert_eq!(key1, key2);
}

#[test]
fn weak_params_are_rejected() {
    let salt = generate_salt();
    let weak = Argon2Params {
        memory_kib: 1_024,
        iterations: 1,
        parallelism: 1,
    };
    assert!(derive_key_with_params(b"pw", &salt, &weak).is_err());
}

#[test]
fn generated_salts_are_random_and_sixteen_bytes() {
    let salt1 = generate_salt();
    let salt2 = generate_salt();
    assert_eq!(salt1.len(), 16);
    assert_ne!(salt1, salt2);
}

// ---------------------------------------------------------------------------
// End-to-end: password -> key -> seal/open
// ---------------------------------------------------------------------------

#[test]
fn full_crypto_pipeline() {
    let password = b"correct-horse";
    let salt = generate_salt();

    let key = derive_key_with_params(password, &salt, &test_params()).expect("derive");

    let plaintext = br#"[{"name":"GitHub","value":"abc123"}]"#;
    let blob = seal(&key, plaintext).expect("seal");
    let recovered = open(&key, &blob).expect("open");
    assert_eq!(recovered, plaintext.to_vec());
}
