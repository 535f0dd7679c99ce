/*
 * Copyright 2025 by Ideal Labs, LLC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Verifiers for randomness beacon pulses
use crate::{bls12_381::*, drand::compute_round_on_g1};
use ark_bls12_381::G2Affine;
use ark_ec::AffineRepr;

/// Something that can verify beacon pulses
pub trait SignatureVerifier {
	/// Verify a signature over a message already hashed to the signature group
	///
	/// * `pubkey`: The *encoded* public key of the randomness beacon
	/// * `sig`: The *encoded* signature
	/// * `msg`: The *encoded* message point
	fn verify(pubkey: &[u8], sig: &[u8], msg: &[u8]) -> Result<(), CryptoError>;

	/// Verify that `sig` is the beacon's signature for `round`
	fn verify_round(pubkey: &[u8], sig: &[u8], round: u64) -> Result<(), CryptoError>;
}

/// An optimized BLS12-381 signature verifier.
///
/// Given a signature $sig = d*H(m)$ where $d$ is the secret key, $H$ is a hash to G1 function, and
/// $m \in \{0, 1\}^*$ is a message,
///
/// The signature's validity is checked using the pairing equality:
///
///   $e(sig, g_2) == e(msg_on_curve, pk)$
///
/// where $sig \in \mathbb{G}_1$ is the signature
///       $g_2 \in \mathbb{G}_2$ is a generator
///       $H(m) =: msg_on_curve \in \mathbb{G}_1$ is a hash of the message in $\mathbb{G}_1$
pub struct QuicknetVerifier;

impl SignatureVerifier for QuicknetVerifier {
	fn verify(beacon_pk_bytes: &[u8], sig_bytes: &[u8], msg_bytes: &[u8]) -> Result<(), CryptoError> {
		let beacon_pk = decode_g2(beacon_pk_bytes)?;
		let sig = decode_g1(sig_bytes)?;
		let msg = decode_g1(msg_bytes)?;

		if !fast_pairing_opt(sig, G2Affine::generator(), msg, beacon_pk) {
			return Err(CryptoError::InvalidSignature);
		}

		Ok(())
	}

	fn verify_round(beacon_pk_bytes: &[u8], sig_bytes: &[u8], round: u64) -> Result<(), CryptoError> {
		let beacon_pk = decode_g2(beacon_pk_bytes)?;
		let sig = decode_g1(sig_bytes)?;
		let msg = compute_round_on_g1(round)?;

		if !fast_pairing_opt(sig, G2Affine::generator(), msg, beacon_pk) {
			return Err(CryptoError::InvalidSignature);
		}

		Ok(())
	}
}
