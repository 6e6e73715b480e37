use sable_core::hash;
use sable_core::types::personal;

#[test]
fn digest64_is_deterministic() {
    sable_core::init().unwrap();
    let a = hash::digest64(&[b"one", b"two"]);
    let b = hash::digest64(&[b"one", b"two"]);
    assert_eq!(a, b);
    assert!(!a.iter().all(|&x| x == 0));
}

#[test]
fn multi_part_equals_concatenation() {
    sable_core::init().unwrap();
    let split = hash::digest64(&[b"hand", b"shake", b"transcript"]);
    let joined = hash::digest64(&[b"handshaketranscript"]);
    assert_eq!(split, joined);
}

#[test]
fn digest32_is_not_a_prefix_of_digest64() {
    // BLAKE2b binds the output length into the parameter block.
    sable_core::init().unwrap();
    let short = hash::digest32(&[b"length-binding"]);
    let long = hash::digest64(&[b"length-binding"]);
    assert_ne!(short[..], long[..32]);
}

#[test]
fn keyed_digest_differs_from_unkeyed() {
    sable_core::init().unwrap();
    let keyed = hash::keyed64(b"a signing sub-key value here....", &[b"message"]);
    let unkeyed = hash::digest64(&[b"message"]);
    assert_ne!(keyed, unkeyed);
}

#[test]
fn keyed_digest_depends_on_key() {
    sable_core::init().unwrap();
    let a = hash::keyed64(b"key-one", &[b"message"]);
    let b = hash::keyed64(b"key-two", &[b"message"]);
    assert_ne!(a, b);
}

#[test]
fn personalization_separates_domains() {
    sable_core::init().unwrap();
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    hash::personalized(&mut a, None, b"input", personal::SIGN_KEY);
    hash::personalized(&mut b, None, b"input", personal::MASK_POINT);
    assert_ne!(a, b);
}

#[test]
fn personalized_supports_keying_and_lengths() {
    sable_core::init().unwrap();
    let mut unkeyed = [0u8; 64];
    let mut keyed = [0u8; 64];
    hash::personalized(&mut unkeyed, None, b"input", personal::RNG_BLOCK);
    hash::personalized(&mut keyed, Some(b"state"), b"input", personal::RNG_BLOCK);
    assert_ne!(unkeyed, keyed);

    let mut short = [0u8; 16];
    hash::personalized(&mut short, None, b"input", personal::RNG_BLOCK);
    assert!(!short.iter().all(|&x| x == 0));
}
