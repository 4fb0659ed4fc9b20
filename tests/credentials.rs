//! End-to-end checks of the credential core as a user record would drive it:
//! hash and verify passwords, then issue, check and revoke remember tokens.

use anyhow::Result;
use passkeep::credentials::{
    new_token, verify, CostPolicy, Hasher, RememberManager, RememberSession, RememberState,
};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use secrecy::ExposeSecret;
use std::collections::HashSet;

const MINIMAL: Hasher = Hasher::new(CostPolicy::Minimal);
const STANDARD: Hasher = Hasher::new(CostPolicy::Standard);

fn random_secret(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(1..=72);
    (0..len)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Minimal record standing in for the user model that owns the digests.
#[derive(Default)]
struct UserRecord {
    password_digest: Option<String>,
    remember_digest: Option<String>,
}

#[test]
fn password_scenario_is_case_sensitive() -> Result<()> {
    let digest = STANDARD.hash("Secret123!")?;
    assert!(verify("Secret123!", &digest));
    assert!(!verify("secret123!", &digest));
    Ok(())
}

#[test]
fn hash_verifies_under_both_policies() -> Result<()> {
    for hasher in [MINIMAL, STANDARD] {
        let digest = hasher.hash("correct horse battery staple")?;
        assert!(hasher.verify("correct horse battery staple", &digest));
        assert_eq!(hasher.cost_of(&digest)?, hasher.policy().cost());
    }
    Ok(())
}

#[test]
fn random_secrets_round_trip_and_never_cross_match() -> Result<()> {
    let mut rng = OsRng;
    for _ in 0..32 {
        let first = random_secret(&mut rng);
        let mut second = random_secret(&mut rng);
        while second == first {
            second = random_secret(&mut rng);
        }

        let digest = MINIMAL.hash(&second)?;
        assert!(verify(&second, &digest));
        assert!(!verify(&first, &digest));
    }
    Ok(())
}

#[test]
fn tokens_are_url_safe_and_unique() -> Result<()> {
    let mut seen = HashSet::with_capacity(10_000);
    for _ in 0..10_000 {
        let token = new_token()?;
        let token = token.expose_secret();
        assert!(token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
        assert!(seen.insert(token.to_string()), "duplicate token");
    }
    Ok(())
}

#[test]
fn absent_digest_never_authenticates() -> Result<()> {
    let manager = RememberManager::default();
    let token = new_token()?;
    for presented in ["", "anything", token.expose_secret()] {
        assert!(!manager.authenticated(None, presented));
    }
    Ok(())
}

#[test]
fn standard_digest_of_new_token_authenticates() -> Result<()> {
    let manager = RememberManager::with_policy(CostPolicy::Standard);
    let token = new_token()?;
    let digest = STANDARD.hash(token.expose_secret())?;

    assert!(manager.authenticated(Some(&digest), token.expose_secret()));
    assert!(!manager.authenticated(Some(&digest), "wrong-token"));
    Ok(())
}

#[test]
fn login_remember_forget_lifecycle() -> Result<()> {
    let manager = RememberManager::with_policy(CostPolicy::Minimal);
    let mut user = UserRecord {
        password_digest: Some(MINIMAL.hash("hunter22")?),
        ..UserRecord::default()
    };

    let password_digest = user.password_digest.as_deref().unwrap_or_default();
    assert!(verify("hunter22", password_digest));

    let remembered = manager.remember()?;
    remembered.change.clone().apply_to(&mut user.remember_digest);
    assert!(manager.authenticated(
        user.remember_digest.as_deref(),
        remembered.token.expose_secret()
    ));

    manager.forget().apply_to(&mut user.remember_digest);
    assert_eq!(user.remember_digest, None);
    assert!(!manager.authenticated(
        user.remember_digest.as_deref(),
        remembered.token.expose_secret()
    ));

    // Forgetting an already forgotten session changes nothing.
    manager.forget().apply_to(&mut user.remember_digest);
    assert_eq!(user.remember_digest, None);
    Ok(())
}

#[test]
fn remembering_again_invalidates_earlier_token() -> Result<()> {
    let manager = RememberManager::with_policy(CostPolicy::Minimal);
    let mut session = RememberSession::default();
    assert_eq!(session.state(), RememberState::NoRememberedSession);

    let first = manager.remember()?;
    session.apply(first.change);
    assert_eq!(session.state(), RememberState::RememberedSession);

    let second = manager.remember()?;
    session.apply(second.change);
    assert_eq!(session.state(), RememberState::RememberedSession);

    assert_ne!(first.token.expose_secret(), second.token.expose_secret());
    assert!(!manager.authenticated(session.digest(), first.token.expose_secret()));
    assert!(manager.authenticated(session.digest(), second.token.expose_secret()));
    Ok(())
}

#[test]
fn policy_upgrade_is_detected_after_login() -> Result<()> {
    let legacy = MINIMAL.hash("hunter22")?;
    assert!(verify("hunter22", &legacy));
    assert!(STANDARD.needs_rehash(&legacy));
    assert!(!MINIMAL.needs_rehash(&legacy));
    Ok(())
}
