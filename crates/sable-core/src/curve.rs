// Copyright (c) 2026 Sable Security
// Sable — Authenticated Key Exchange & Augmented PAKE
// Licensed under the MIT License

//! Scalar and point adapter over the Ristretto255 group.
//!
//! This is the engine's entire contract with the curve library: mod-q scalar
//! arithmetic, fixed-base and double-base multiplications, and the
//! Elligator-derived mask operations used by the password protocol. All
//! operations are constant-time over their secret inputs; failure is the only
//! signal callers distinguish. The group has prime order, so the identity is
//! the sole low-order element and encodes as all-zero bytes; the identity
//! checks below are the packed-encoding form of an "X-coordinate is zero"
//! rejection.

use crate::hash;
use crate::rng::SecretRng;
use crate::types::{
    is_all_zero, personal, Failed, Point, SableResult, Scalar, DIGEST_LENGTH, MASK_SEED_LENGTH,
    MAX_RETRIES, POINT_LENGTH, WIDE_SCALAR_LENGTH,
};
use zeroize::Zeroize;

/// The identity element's packed encoding.
const IDENTITY: Point = [0u8; POINT_LENGTH];

/// Validates that `point` is a canonical, non-identity group element.
///
/// # Errors
///
/// Returns [`Failed`] if `point` has the wrong length, is all zeros, or is
/// not a valid Ristretto255 encoding.
pub fn validate_point(point: &[u8]) -> SableResult<()> {
    if point.len() != POINT_LENGTH || is_all_zero(point) {
        return Err(Failed);
    }
    // SAFETY: Pointer comes from a valid slice of POINT_LENGTH bytes.
    unsafe {
        if libsodium_sys::crypto_core_ristretto255_is_valid_point(point.as_ptr()) != 1 {
            return Err(Failed);
        }
    }
    Ok(())
}

/// Reduces a 64-byte little-endian integer modulo the group order.
pub fn reduce(wide: &[u8; WIDE_SCALAR_LENGTH]) -> Scalar {
    let mut out = [0u8; 32];
    // SAFETY: Input is a 64-byte array, output a 32-byte array, as required.
    unsafe {
        libsodium_sys::crypto_core_ristretto255_scalar_reduce(out.as_mut_ptr(), wide.as_ptr());
    }
    out
}

/// Returns whether `s` is the canonical representative of its residue class.
///
/// Wire scalars must be canonical: the multiplication primitives ignore the
/// top bit, so accepting a non-canonical scalar would make signatures
/// malleable.
pub fn is_canonical_scalar(s: &Scalar) -> bool {
    let mut wide = [0u8; WIDE_SCALAR_LENGTH];
    wide[..s.len()].copy_from_slice(s);
    let reduced = reduce(&wide);
    wide.zeroize();
    reduced == *s
}

/// Computes `a + b (mod q)`.
pub fn scalar_add(a: &Scalar, b: &Scalar) -> Scalar {
    let mut out = [0u8; 32];
    // SAFETY: All arrays are 32 bytes as required.
    unsafe {
        libsodium_sys::crypto_core_ristretto255_scalar_add(
            out.as_mut_ptr(),
            a.as_ptr(),
            b.as_ptr(),
        );
    }
    out
}

/// Computes `a·b + c (mod q)` in one constant-time pass.
pub fn scalar_mul_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
    let mut product = [0u8; 32];
    // SAFETY: All arrays are 32 bytes as required.
    unsafe {
        libsodium_sys::crypto_core_ristretto255_scalar_mul(
            product.as_mut_ptr(),
            a.as_ptr(),
            b.as_ptr(),
        );
    }
    let out = scalar_add(&product, c);
    product.zeroize();
    out
}

/// Computes `-a (mod q)`.
pub fn scalar_negate(a: &Scalar) -> Scalar {
    let mut out = [0u8; 32];
    // SAFETY: Both arrays are 32 bytes as required.
    unsafe {
        libsodium_sys::crypto_core_ristretto255_scalar_negate(out.as_mut_ptr(), a.as_ptr());
    }
    out
}

/// Computes `k·G`.
///
/// The prime-order encoding makes cofactor clearing a no-op; the small
/// subgroup the source curve has to multiply away does not exist here.
///
/// # Errors
///
/// Returns [`Failed`] iff `k ≡ 0 (mod q)`.
pub fn base_mul(k: &Scalar) -> SableResult<Point> {
    let mut out = [0u8; POINT_LENGTH];
    // SAFETY: Both arrays are 32 bytes as required. Return code is checked;
    // the call fails only when the result would be the identity.
    unsafe {
        if libsodium_sys::crypto_scalarmult_ristretto255_base(out.as_mut_ptr(), k.as_ptr()) != 0 {
            return Err(Failed);
        }
    }
    Ok(out)
}

/// Computes `k·P`.
///
/// # Errors
///
/// Returns [`Failed`] if `P` is not a valid encoding or the result is the
/// identity.
pub fn point_mul(k: &Scalar, p: &Point) -> SableResult<Point> {
    let mut out = [0u8; POINT_LENGTH];
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_scalarmult_ristretto255(out.as_mut_ptr(), k.as_ptr(), p.as_ptr())
            != 0
        {
            return Err(Failed);
        }
    }
    Ok(out)
}

/// Computes `P + Q`. The identity is a legal result.
pub fn point_add(p: &Point, q: &Point) -> SableResult<Point> {
    let mut out = [0u8; POINT_LENGTH];
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_core_ristretto255_add(out.as_mut_ptr(), p.as_ptr(), q.as_ptr())
            != 0
        {
            return Err(Failed);
        }
    }
    Ok(out)
}

/// Computes `P − Q`. The identity is a legal result.
pub fn point_sub(p: &Point, q: &Point) -> SableResult<Point> {
    let mut out = [0u8; POINT_LENGTH];
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    unsafe {
        if libsodium_sys::crypto_core_ristretto255_sub(out.as_mut_ptr(), p.as_ptr(), q.as_ptr())
            != 0
        {
            return Err(Failed);
        }
    }
    Ok(out)
}

/// Computes `−P`.
pub fn point_negate(p: &Point) -> SableResult<Point> {
    point_sub(&IDENTITY, p)
}

/// Computes `a·G + b·Q`.
///
/// # Errors
///
/// Returns [`Failed`] if `b ≡ 0`, either multiplication rejects its inputs,
/// or the sum is the identity.
pub fn base_double_mul(a: &Scalar, b: &Scalar, q: &Point) -> SableResult<Point> {
    if is_all_zero(b) {
        return Err(Failed);
    }
    let mut left = base_mul(a)?;
    let right = match point_mul(b, q) {
        Ok(p) => p,
        Err(e) => {
            left.zeroize();
            return Err(e);
        }
    };
    let sum = point_add(&left, &right);
    left.zeroize();
    match sum {
        Ok(p) if !is_all_zero(&p) => Ok(p),
        _ => Err(Failed),
    }
}

/// Computes `a·P + b·Q`.
///
/// Both multiplications run unconditionally so the cost is independent of the
/// secret scalars.
///
/// # Errors
///
/// Returns [`Failed`] on any invalid input or an identity result.
pub fn double_mul(a: &Scalar, p: &Point, b: &Scalar, q: &Point) -> SableResult<Point> {
    let mut left = point_mul(a, p)?;
    let right = match point_mul(b, q) {
        Ok(r) => r,
        Err(e) => {
            left.zeroize();
            return Err(e);
        }
    };
    let sum = point_add(&left, &right);
    left.zeroize();
    match sum {
        Ok(r) if !is_all_zero(&r) => Ok(r),
        _ => Err(Failed),
    }
}

/// Draws a uniformly distributed non-zero scalar by rejection sampling.
///
/// A 64-byte draw is reduced modulo the group order; the negligible zero case
/// is redrawn, bounded by [`MAX_RETRIES`].
///
/// # Errors
///
/// Returns [`Failed`] if the generator fails or every draw reduced to zero.
pub fn random_scalar(rng: &mut SecretRng) -> SableResult<Scalar> {
    let mut wide = [0u8; WIDE_SCALAR_LENGTH];
    for _ in 0..MAX_RETRIES {
        if rng.fill(&mut wide).is_err() {
            wide.zeroize();
            return Err(Failed);
        }
        let scalar = reduce(&wide);
        if !is_all_zero(&scalar) {
            wide.zeroize();
            return Ok(scalar);
        }
    }
    wide.zeroize();
    Err(Failed)
}

/// Deterministically maps a 32-byte seed to a group element.
///
/// The seed is expanded to 64 bytes under a fixed personalization and fed to
/// the curve's hash-to-point map. The result serves as an additive mask in
/// the password protocol.
pub fn elligator(seed: &[u8; MASK_SEED_LENGTH]) -> SableResult<Point> {
    let mut wide = [0u8; DIGEST_LENGTH];
    hash::personalized(&mut wide, None, seed, personal::MASK_POINT);
    let mut out = [0u8; POINT_LENGTH];
    // SAFETY: Input is a 64-byte array, output a 32-byte array, as required.
    // Return code is checked.
    let rc = unsafe {
        libsodium_sys::crypto_core_ristretto255_from_hash(out.as_mut_ptr(), wide.as_ptr())
    };
    wide.zeroize();
    if rc != 0 {
        return Err(Failed);
    }
    Ok(out)
}

/// Computes the masked public point `y·G + E`.
///
/// # Errors
///
/// Returns [`Failed`] when `y·G` is unusable (`y ≡ 0`); the caller retries
/// with a fresh `y`.
pub fn elligator_encrypt(y: &Scalar, mask: &Point) -> SableResult<Point> {
    let mut public = base_mul(y)?;
    let out = point_add(&public, mask);
    public.zeroize();
    out
}

/// Strips the mask from `masked` and multiplies: `a·(masked − E)`.
///
/// # Errors
///
/// Returns [`Failed`] if the unmasked point is the identity, the inputs are
/// invalid, or the product is the identity.
pub fn elligator_secret(a: &Scalar, masked: &Point, mask: &Point) -> SableResult<Point> {
    let inner = point_sub(masked, mask)?;
    if is_all_zero(&inner) {
        return Err(Failed);
    }
    point_mul(a, &inner)
}

/// Strips the mask and computes the two-term product `a·(masked − E) + b·V`.
///
/// # Errors
///
/// Returns [`Failed`] under the same conditions as [`elligator_secret`] and
/// [`double_mul`].
pub fn elligator_secret_dual(
    a: &Scalar,
    masked: &Point,
    mask: &Point,
    b: &Scalar,
    v: &Point,
) -> SableResult<Point> {
    let inner = point_sub(masked, mask)?;
    if is_all_zero(&inner) {
        return Err(Failed);
    }
    double_mul(a, &inner, b, v)
}
