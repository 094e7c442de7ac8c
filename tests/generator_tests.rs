//! Integration tests for random password generation.

use credvault::crypto::password::{generate, ALPHABET, MAX_PASSWORD_LEN};
use credvault::errors::CredVaultError;

#[test]
fn output_uses_only_alphabet_symbols() {
    for _ in 0..50 {
        let password = generate(64).unwrap();
        assert_eq!(password.len(), 64);
        assert!(password.bytes().all(|b| ALPHABET.contains(&b)));
    }
}

#[test]
fn consecutive_passwords_differ() {
    let a = generate(32).unwrap();
    let b = generate(32).unwrap();
    assert_ne!(a, b);
}

#[test]
fn symbol_frequencies_are_uniform() {
    const CHUNK: usize = 4_000;
    const CHUNKS: usize = 25;
    let total = CHUNK * CHUNKS;

    let mut counts = [0usize; 256];
    for _ in 0..CHUNKS {
        for b in generate(CHUNK).unwrap().bytes() {
            counts[usize::from(b)] += 1;
        }
    }

    let expected = total as f64 / ALPHABET.len() as f64;
    let mut chi_square = 0.0;
    for &symbol in ALPHABET {
        let observed = counts[usize::from(symbol)] as f64;
        let deviation = (observed - expected).abs() / expected;
        assert!(
            deviation < 0.2,
            "symbol {:?} seen {observed} times, expected about {expected:.0}",
            char::from(symbol)
        );
        chi_square += (observed - expected).powi(2) / expected;
    }

    // 87 degrees of freedom: mean 87, standard deviation about 13.2.
    assert!(chi_square < 200.0, "chi-square {chi_square:.1} too large");
}

#[test]
fn length_bounds_are_enforced() {
    assert!(matches!(
        generate(0),
        Err(CredVaultError::InvalidPasswordLength { got: 0, max: MAX_PASSWORD_LEN })
    ));
    assert!(generate(MAX_PASSWORD_LEN + 1).is_err());
    assert_eq!(generate(1).unwrap().len(), 1);
}
