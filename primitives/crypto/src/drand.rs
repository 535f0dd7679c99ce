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

//! Round identities for drand's quicknet.
//!
//! Quicknet is an *unchained* beacon: the message signed in round `r` is `sha256(r_be)` and
//! signatures live in G1, so the identity of a round is that message hashed onto G1.

use crate::bls12_381::CryptoError;
use alloc::vec::Vec;
use ark_bls12_381::{g1::Config as G1Config, G1Affine, G1Projective};
use ark_ec::hashing::{
	curve_maps::wb::WBMap, map_to_curve_hasher::MapToCurveBasedHasher, HashToCurve,
};
use ark_ff::field_hashers::DefaultFieldHasher;
use sha2::{Digest, Sha256};

/// The domain separation tag used by quicknet when hashing messages to G1
pub const QUICKNET_CTX: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

type QuicknetHasher =
	MapToCurveBasedHasher<G1Projective, DefaultFieldHasher<Sha256, 128>, WBMap<G1Config>>;

/// Constructs a message (e.g. signed by drand)
fn message(current_round: u64, prev_sig: &[u8]) -> Vec<u8> {
	let mut hasher = Sha256::default();
	hasher.update(prev_sig);
	hasher.update(current_round.to_be_bytes());
	hasher.finalize().to_vec()
}

/// This computes the point on G1 given a round number (for message construction).
pub fn compute_round_on_g1(round: u64) -> Result<G1Affine, CryptoError> {
	let message = message(round, &[]);
	let hasher = QuicknetHasher::new(QUICKNET_CTX).map_err(|_| CryptoError::HashToCurveFailure)?;
	// H(m) \in G1
	hasher.hash(&message).map_err(|_| CryptoError::HashToCurveFailure)
}
