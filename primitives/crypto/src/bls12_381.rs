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

use alloc::vec::Vec;
use ark_bls12_381::{Bls12_381, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{ops::Neg, Zero};

/// The size of a compressed point on G1 (a quicknet signature)
pub const G1_COMPRESSED_SIZE: usize = 48;
/// The size of a compressed point on G2 (a quicknet public key)
pub const G2_COMPRESSED_SIZE: usize = 96;

/// Errors that can be encountered while performing BLS crypto operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CryptoError {
	/// The data could not be deserialized to a valid element of G1.
	DeserializeG1Failure,
	/// The data could not be deserialized to a valid element of G2.
	DeserializeG2Failure,
	/// The hash-to-curve map could not be obtained
	HashToCurveFailure,
	/// No data could be serialized from a valid element of G1.
	SerializeG1Failure,
	/// No data could be serialized from a valid element of G2.
	SerializeG2Failure,
	/// The signature could no be verified.
	InvalidSignature,
	/// The required buffer capacity could not be allocated or was exceeded.
	InvalidBuffer,
	/// The ciphertext did not decrypt under the provided key.
	DecryptionFailed,
}

impl core::fmt::Display for CryptoError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		let msg = match self {
			Self::DeserializeG1Failure => "invalid G1 point encoding",
			Self::DeserializeG2Failure => "invalid G2 point encoding",
			Self::HashToCurveFailure => "hash to curve failed",
			Self::SerializeG1Failure => "G1 point could not be serialized",
			Self::SerializeG2Failure => "G2 point could not be serialized",
			Self::InvalidSignature => "signature verification failed",
			Self::InvalidBuffer => "buffer capacity exceeded",
			Self::DecryptionFailed => "ciphertext could not be decrypted",
		};
		f.write_str(msg)
	}
}

/// An optimized way to verify Drand pulses from quicknet
/// Instead of computing two pairings and comparing them, we instead compute a multi miller loop,
/// and then take the final exponentiation, saving a lot of computational cost.
///
/// * `signature`: The signature to verify
/// * `q`: The beacon public key
/// * `r`: The message signed by Drand, hashed to G1
/// * `s`: A generator
#[inline]
pub(crate) fn fast_pairing_opt(signature: G1Affine, q: G2Affine, r: G1Affine, s: G2Affine) -> bool {
	let looped = Bls12_381::multi_miller_loop([signature.neg(), r], [q, s]);
	Bls12_381::final_exponentiation(looped).map(|exp| exp.is_zero()).unwrap_or(false)
}

/// Attempts to decode the byte array to a point on G1
pub fn decode_g1(mut bytes: &[u8]) -> Result<G1Affine, CryptoError> {
	G1Affine::deserialize_compressed(&mut bytes).map_err(|_| CryptoError::DeserializeG1Failure)
}

/// Attempts to decode the byte array to a point on G2
pub fn decode_g2(mut bytes: &[u8]) -> Result<G2Affine, CryptoError> {
	G2Affine::deserialize_compressed(&mut bytes).map_err(|_| CryptoError::DeserializeG2Failure)
}

/// Compress a point on G1 to its 48 byte encoding
pub fn encode_g1(point: &G1Affine) -> Result<[u8; G1_COMPRESSED_SIZE], CryptoError> {
	let mut bytes = Vec::with_capacity(G1_COMPRESSED_SIZE);
	point
		.serialize_compressed(&mut bytes)
		.map_err(|_| CryptoError::SerializeG1Failure)?;
	bytes.try_into().map_err(|_| CryptoError::SerializeG1Failure)
}

/// Compress a point on G2 to its 96 byte encoding
pub fn encode_g2(point: &G2Affine) -> Result<[u8; G2_COMPRESSED_SIZE], CryptoError> {
	let mut bytes = Vec::with_capacity(G2_COMPRESSED_SIZE);
	point
		.serialize_compressed(&mut bytes)
		.map_err(|_| CryptoError::SerializeG2Failure)?;
	bytes.try_into().map_err(|_| CryptoError::SerializeG2Failure)
}
