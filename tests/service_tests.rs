//! Service-level integration tests: the unlock pipeline with rate
//! limiting, session lifecycle, and end-to-end vault workflows.

use passvault::crypto::Argon2Params;
use passvault::errors::PassVaultError;
use passvault::vault::limiter::{BASE_DELAY_MS, MAX_ATTEMPTS_BEFORE_BLOCK};
use passvault::vault::{SecretDraft, SecretKind, VaultService};
use tempfile::TempDir;

fn test_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

fn test_service(dir: &TempDir) -> VaultService {
    VaultService::with_params(dir.path().join("vault.json"), test_params())
}

fn draft(name: &str, value: &str) -> SecretDraft {
    SecretDraft {
        name: name.into(),
        kind: SecretKind::Password,
        value: value.into(),
        username: None,
        url: None,
        notes: None,
        category: None,
    }
}

// ---------------------------------------------------------------------------
// Unlock / lock
// ---------------------------------------------------------------------------

#[test]
fn first_unlock_creates_the_vault() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);

    assert!(!service.store().exists());
    let outcome = service.unlock(b"master-pass-1");
    assert!(outcome.success);
    assert_eq!(outcome.wait_time_ms, None);
    assert!(service.store().exists());
    assert!(service.is_unlocked());
}

#[test]
fn wrong_password_fails_with_backoff_hint() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);
    service.unlock(b"master-pass-1");
    service.lock();

    let outcome = service.unlock(b"wrong");
    assert!(!outcome.success);
    assert_eq!(outcome.wait_time_ms, Some(BASE_DELAY_MS));
    assert!(!service.is_unlocked());
}

#[test]
fn lock_drops_the_session_key() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);
    service.unlock(b"master-pass-1");
    assert!(service.is_unlocked());

    service.lock();
    assert!(!service.is_unlocked());
    assert!(matches!(
        service.get_secrets(),
        Err(PassVaultError::VaultLocked)
    ));
}

#[test]
fn secret_operations_require_an_unlocked_session() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);
    service.unlock(b"master-pass-1");
    service.lock();

    assert!(matches!(
        service.add_secret(draft("GitHub", "tok")),
        Err(PassVaultError::VaultLocked)
    ));
    assert!(matches!(
        service.delete_secret("some-id"),
        Err(PassVaultError::VaultLocked)
    ));
}

// ---------------------------------------------------------------------------
// Rate limiting through the service
// ---------------------------------------------------------------------------

#[test]
fn five_failures_block_even_the_correct_password() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);
    service.unlock(b"master-pass-1");
    service.lock();

    for _ in 0..MAX_ATTEMPTS_BEFORE_BLOCK {
        let outcome = service.unlock(b"wrong");
        assert!(!outcome.success);
    }
    assert!(service.rate_limit_wait_ms().is_some());

    // The gate sits before key derivation: while blocked, even the real
    // password is refused and the session stays locked.
    let outcome = service.unlock(b"master-pass-1");
    assert!(!outcome.success);
    assert!(outcome.wait_time_ms.unwrap_or(0) > 0);
    assert!(!service.is_unlocked());
}

#[test]
fn successful_unlock_resets_the_failure_counter() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);
    service.unlock(b"master-pass-1");
    service.lock();

    // A few failures, then success.
    for _ in 0..MAX_ATTEMPTS_BEFORE_BLOCK - 1 {
        service.unlock(b"wrong");
    }
    assert!(service.unlock(b"master-pass-1").success);
    service.lock();

    // Counter restarted: the next failure reports the base delay again.
    let outcome = service.unlock(b"wrong");
    assert_eq!(outcome.wait_time_ms, Some(BASE_DELAY_MS));
}

#[test]
fn backoff_grows_with_consecutive_failures() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);
    service.unlock(b"master-pass-1");
    service.lock();

    assert_eq!(service.unlock(b"a").wait_time_ms, Some(5_000));
    assert_eq!(service.unlock(b"b").wait_time_ms, Some(10_000));
    assert_eq!(service.unlock(b"c").wait_time_ms, Some(20_000));
}

// ---------------------------------------------------------------------------
// Rotation through the service
// ---------------------------------------------------------------------------

#[test]
fn change_master_password_keeps_session_unlocked() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);
    service.unlock(b"old-password");
    service.add_secret(draft("GitHub", "tok")).unwrap();

    assert!(service.change_master_password(b"old-password", b"new-password"));

    // No re-authentication needed: the session key switched in place.
    assert!(service.is_unlocked());
    let secrets = service.get_secrets().unwrap();
    assert_eq!(secrets.len(), 1);
    assert_eq!(secrets[0].name, "GitHub");
}

#[test]
fn change_master_password_with_wrong_old_password_fails() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);
    service.unlock(b"old-password");

    assert!(!service.change_master_password(b"nope", b"new-password"));

    // The old password still opens the vault.
    service.lock();
    assert!(service.unlock(b"old-password").success);
}

// ---------------------------------------------------------------------------
// Export / import through the service
// ---------------------------------------------------------------------------

#[test]
fn import_locks_the_session() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);
    service.unlock(b"master-pass-1");
    service.add_secret(draft("GitHub", "tok")).unwrap();

    let backup = dir.path().join("backup.json");
    service.export_vault(&backup).unwrap();

    let other_dir = TempDir::new().unwrap();
    let other = test_service(&other_dir);
    other.unlock(b"other-password");
    assert!(other.is_unlocked());

    other.import_vault(&backup).unwrap();

    // The imported record answers to its own master password, so the
    // previous session key is useless and must be dropped.
    assert!(!other.is_unlocked());
    assert!(!other.unlock(b"other-password").success);
    assert!(other.unlock(b"master-pass-1").success);
    assert_eq!(other.get_secrets().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// End-to-end workflow
// ---------------------------------------------------------------------------

#[test]
fn full_vault_lifecycle() {
    let dir = TempDir::new().unwrap();
    let service = test_service(&dir);

    // First run: vault is created.
    assert!(service.unlock(b"Tr0ub4dor&3").success);

    // Store a secret with all optional fields.
    let added = service
        .add_secret(SecretDraft {
            name: "GitHub".into(),
            kind: SecretKind::ApiKey,
            value: "ghp_secret".into(),
            username: Some("octocat".into()),
            url: Some("https://github.com".into()),
            notes: Some("CI token".into()),
            category: Some("dev".into()),
        })
        .unwrap();

    let secrets = service.get_secrets().unwrap();
    assert_eq!(secrets, vec![added.clone()]);

    // Rotate the master password mid-session.
    assert!(service.change_master_password(b"Tr0ub4dor&3", b"NewPass!123"));

    // Lock, then unlock with the new password.
    service.lock();
    assert!(!service.unlock(b"Tr0ub4dor&3").success);
    assert!(service.unlock(b"NewPass!123").success);

    // The secret survived rotation byte-for-byte.
    let secrets = service.get_secrets().unwrap();
    assert_eq!(secrets, vec![added]);
}
