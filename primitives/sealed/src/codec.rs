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

//! # Timelock Beacon Codec
//!
//! Converts between wall-clock time and beacon rounds, and locks short secrets (content keys) to
//! a future round.
//!
//! Two transforms are provided:
//!
//! * [`TimelockBeaconCodec::lock`] / [`TimelockBeaconCodec::unlock`] XOR the secret with
//!   `keccak256(decimal(round))`. This is the transform used by existing auto-release listings
//!   and is kept so they can still be read; such keys are always 32 bytes. It offers **no**
//!   timelock security: the keystream only depends on the public round number, so anyone can
//!   unlock immediately.
//! * [`TimelockBeaconCodec::seal`] / [`TimelockBeaconCodec::open`] encrypt to the round's
//!   identity under the beacon public key (see `sp_sealed_crypto::ibe`). Opening requires the
//!   BLS signature the beacon publishes for that round, so nobody can open early.

use crate::{
	beacon::BeaconConfig,
	encoding::round_to_decimal,
	error::Error,
	types::{RoundNumber, UnixSeconds},
};
use alloc::vec::Vec;
use ark_bls12_381::G2Affine;
use ark_std::rand::{CryptoRng, RngCore};
use codec::{Decode, Encode};
use sp_core::hashing::keccak_256;
use sp_sealed_crypto::prelude::{
	compute_round_on_g1, decode_g1, decrypt, encrypt, IbeCiphertext, QuicknetVerifier,
	SignatureVerifier,
};

/// A secret sealed to a round identity; stored on the ledger in its SCALE encoding
pub type TimelockCiphertext = IbeCiphertext;

/// Round arithmetic and timelock transforms for one beacon network
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelockBeaconCodec {
	config: BeaconConfig,
}

impl TimelockBeaconCodec {
	/// Build a codec for the given beacon.
	///
	/// Only the schedule is checked here; a config without a usable public key still supports the
	/// round arithmetic and [`Self::lock`], while [`Self::seal`] and [`Self::open`] fail with
	/// [`Error::InvalidConfig`].
	pub fn new(config: BeaconConfig) -> Result<Self, Error> {
		if config.period == 0 {
			return Err(Error::InvalidConfig);
		}
		Ok(Self { config })
	}

	/// A codec for drand's quicknet
	pub fn quicknet() -> Self {
		Self { config: BeaconConfig::quicknet() }
	}

	pub fn config(&self) -> &BeaconConfig {
		&self.config
	}

	pub fn genesis(&self) -> UnixSeconds {
		self.config.genesis_time
	}

	pub fn period(&self) -> u64 {
		self.config.period
	}

	/// The round in effect at `timestamp`: `floor((timestamp - genesis) / period)`.
	///
	/// The timestamp must be strictly after genesis, otherwise [`Error::BeforeGenesis`].
	pub fn round_for_timestamp(&self, timestamp: UnixSeconds) -> Result<RoundNumber, Error> {
		let genesis = self.genesis();
		if timestamp <= genesis {
			return Err(Error::BeforeGenesis { timestamp, genesis });
		}
		Ok((timestamp - genesis) / self.period())
	}

	/// The time at which `round` is published: `genesis + round * period`.
	///
	/// Saturates at `u64::MAX` for rounds too far in the future to represent.
	pub fn timestamp_for_round(&self, round: RoundNumber) -> UnixSeconds {
		round.saturating_mul(self.period()).saturating_add(self.genesis())
	}

	/// Whether the beacon has reached `round` at time `now`
	pub fn is_round_reached(&self, round: RoundNumber, now: UnixSeconds) -> bool {
		now >= self.timestamp_for_round(round)
	}

	/// Whether the beacon has reached `round` according to the system clock
	#[cfg(feature = "std")]
	pub fn is_round_reached_now(&self, round: RoundNumber) -> bool {
		self.is_round_reached(round, current_time())
	}

	/// XOR `secret` with the round keystream.
	///
	/// **Insecure**: the keystream is derived from the round number alone, which is public. Use
	/// [`Self::seal`] for anything that must stay locked until the round.
	pub fn lock(&self, secret: &[u8], round: RoundNumber) -> Vec<u8> {
		xor_with_round_keystream(secret, round)
	}

	/// Inverse of [`Self::lock`] for the same round
	pub fn unlock(&self, ciphertext: &[u8], round: RoundNumber) -> Vec<u8> {
		xor_with_round_keystream(ciphertext, round)
	}

	/// Encrypt `secret` so it can only be opened with the beacon's signature for `round`
	pub fn seal<R: RngCore + CryptoRng>(
		&self,
		secret: &[u8],
		round: RoundNumber,
		rng: &mut R,
	) -> Result<TimelockCiphertext, Error> {
		let p_pub = self.public_key()?;
		let identity = compute_round_on_g1(round)?;
		Ok(encrypt(&p_pub, &identity, secret, rng)?)
	}

	/// Open a sealed secret with the signature the beacon published for `round`.
	///
	/// The signature is checked against the beacon public key first, so a forged or mismatched
	/// signature yields [`Error::InvalidSignature`] rather than garbage.
	pub fn open(
		&self,
		ciphertext: &TimelockCiphertext,
		round: RoundNumber,
		signature: &[u8],
	) -> Result<Vec<u8>, Error> {
		self.validate_keyed()?;
		QuicknetVerifier::verify_round(&self.config.public_key, signature, round)?;
		let secret = decode_g1(signature)?;
		Ok(decrypt(&secret, ciphertext)?)
	}

	/// [`Self::seal`], returning the SCALE encoded ciphertext stored on the ledger
	pub fn seal_encoded<R: RngCore + CryptoRng>(
		&self,
		secret: &[u8],
		round: RoundNumber,
		rng: &mut R,
	) -> Result<Vec<u8>, Error> {
		self.seal(secret, round, rng).map(|ct| ct.encode())
	}

	/// [`Self::open`] for a SCALE encoded ciphertext
	pub fn open_encoded(
		&self,
		ciphertext: &[u8],
		round: RoundNumber,
		signature: &[u8],
	) -> Result<Vec<u8>, Error> {
		let ciphertext = TimelockCiphertext::decode(&mut &ciphertext[..])?;
		self.open(&ciphertext, round, signature)
	}

	fn validate_keyed(&self) -> Result<(), Error> {
		self.config.validate()
	}

	fn public_key(&self) -> Result<G2Affine, Error> {
		self.validate_keyed()?;
		self.config.public_key_point()
	}
}

/// `secret[i] ^ keccak256(decimal(round))[i % 32]`
fn xor_with_round_keystream(data: &[u8], round: RoundNumber) -> Vec<u8> {
	let keystream = keccak_256(round_to_decimal(round).as_bytes());
	data.iter().zip(keystream.iter().cycle()).map(|(d, k)| d ^ k).collect()
}

/// Seconds since the unix epoch according to the system clock
#[cfg(feature = "std")]
pub fn current_time() -> UnixSeconds {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.map(|d| d.as_secs())
		.unwrap_or_default()
}
