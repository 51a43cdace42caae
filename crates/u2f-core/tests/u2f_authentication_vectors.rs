//! U2F raw authentication response test vectors.
//!
//! The vectors were signed with an independent ECDSA P-256 implementation
//! over a fixed key, so they pin the signed-payload layout and counter byte
//! order against a second implementation.

use serde::Deserialize;
use yubikey_u2f_core::{AuthenticationResponse, Error, U2fVerifier, verify};

// Silence unused crate dependency warnings for test binary
use base64 as _;
use p256 as _;
use proptest as _;
use sha2 as _;
use thiserror as _;
use tracing as _;

#[derive(Deserialize)]
struct VectorFile {
    app_id: String,
    public_key: String,
    vectors: Vec<TestVector>,
}

#[derive(Deserialize)]
struct TestVector {
    name: String,
    client_data: String,
    response: String,
    expected: String,
}

fn load() -> VectorFile {
    let json_data = include_str!("u2f_authentication_vectors.json");
    serde_json::from_str(json_data).expect("Failed to parse test vectors JSON")
}

/// Runs decode, signature verification and the presence check in order and
/// names the first failure.
fn outcome(file: &VectorFile, public_key: &[u8], vector: &TestVector) -> &'static str {
    let result = AuthenticationResponse::decode(&vector.response).and_then(|response| {
        verify::verify(&response, &file.app_id, &vector.client_data, public_key)?;
        verify::check_user_presence(&response)
    });

    match result {
        Ok(()) => "ok",
        Err(Error::MalformedResponse(_)) => "malformed_response",
        Err(Error::SignatureInvalid(_)) => "signature_invalid",
        Err(Error::UserPresenceRequired(_)) => "user_presence_required",
        Err(Error::InvalidPublicKey(_)) => "invalid_public_key",
        Err(_) => "unexpected",
    }
}

#[test]
fn test_u2f_authentication_vectors() {
    let file = load();
    let public_key = hex::decode(&file.public_key).expect("Failed to decode public key hex");

    let mut passed = 0;
    let mut failed = 0;

    for vector in &file.vectors {
        let result = outcome(&file, &public_key, vector);

        if result == vector.expected {
            passed += 1;
        } else {
            failed += 1;
            eprintln!(
                "FAILED: {} - expected {}, got {}",
                vector.name, vector.expected, result
            );
        }
    }

    eprintln!("\nTest results: {passed} passed, {failed} failed");
    assert_eq!(failed, 0, "Some test vectors failed");
}

#[test]
fn test_vectors_through_bound_verifier() {
    let file = load();
    let public_key = hex::decode(&file.public_key).expect("Failed to decode public key hex");
    let verifier = U2fVerifier::new(&file.app_id, &public_key).expect("valid key");

    for vector in file.vectors.iter().filter(|v| v.expected == "ok") {
        let response = AuthenticationResponse::decode(&vector.response).expect("decodes");
        verifier
            .verify(&response, &vector.client_data)
            .unwrap_or_else(|err| panic!("{}: {err}", vector.name));
    }
}

#[test]
fn test_vector_counters_decode_big_endian() {
    let file = load();
    let counters: Vec<(String, u32)> = file
        .vectors
        .iter()
        .filter(|v| v.expected == "ok")
        .map(|v| {
            let response = AuthenticationResponse::decode(&v.response).expect("decodes");
            (v.name.clone(), response.counter())
        })
        .collect();

    assert_eq!(
        counters,
        vec![
            ("valid_counter_one".to_string(), 1),
            ("valid_large_counter".to_string(), 16_777_216),
        ]
    );
}
