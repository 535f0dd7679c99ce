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

//! Binding and hiding commitments to content keys.
//!
//! A commitment is `keccak256(key || salt)`, the same value an EVM ledger computes with
//! `keccak256(abi.encodePacked(key, salt))` when it checks a reveal.

use crate::{
	encoding::bytes32,
	error::Error,
	types::{Commitment, Key, Salt, BYTES32},
};
use sp_core::hashing::keccak_256;
use subtle::ConstantTimeEq;

/// Stateless commitment scheme over 32 byte keys and salts
pub struct KeyCommitment;

impl KeyCommitment {
	/// Commit to a `(key, salt)` pair.
	///
	/// Both inputs must be exactly 32 bytes, otherwise [`Error::InvalidLength`] is returned
	/// before anything is hashed.
	pub fn commit(key: &[u8], salt: &[u8]) -> Result<[u8; BYTES32], Error> {
		let key = bytes32(key)?;
		let salt = bytes32(salt)?;
		Ok(Self::digest(&key, &salt))
	}

	/// Check a revealed `(key, salt)` against a commitment in constant time.
	///
	/// Inputs of the wrong length never verify.
	pub fn verify(key: &[u8], salt: &[u8], commitment: &[u8]) -> bool {
		match Self::commit(key, salt) {
			Ok(expected) => expected[..].ct_eq(commitment).into(),
			Err(_) => false,
		}
	}

	pub fn commit_typed(key: &Key, salt: &Salt) -> Commitment {
		Commitment(Self::digest(key.as_bytes(), salt.as_bytes()))
	}

	pub fn verify_typed(key: &Key, salt: &Salt, commitment: &Commitment) -> bool {
		Self::verify(key.as_bytes(), salt.as_bytes(), commitment.as_bytes())
	}

	fn digest(key: &[u8; BYTES32], salt: &[u8; BYTES32]) -> [u8; BYTES32] {
		let mut preimage = [0u8; 2 * BYTES32];
		preimage[..BYTES32].copy_from_slice(key);
		preimage[BYTES32..].copy_from_slice(salt);
		keccak_256(&preimage)
	}
}
