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

use crate::{
	encoding::{decode_hex, serde_hex},
	error::Error,
	pulse::OpaquePulse,
	types::UnixSeconds,
};
use alloc::{string::String, vec::Vec};
use ark_bls12_381::G2Affine;
use serde::{Deserialize, Serialize};
use sp_sealed_crypto::{
	bls12_381::{decode_g2, G2_COMPRESSED_SIZE},
	verifier::{QuicknetVerifier, SignatureVerifier},
};

/// Unix time of quicknet's round 0
pub const QUICKNET_GENESIS: UnixSeconds = 1692803367;
/// Seconds between quicknet rounds
pub const QUICKNET_PERIOD: u64 = 3;
/// The quicknet public key (in G2)
pub const QUICKNET_PUBLIC_KEY: &str = "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a";
/// The quicknet chain hash
pub const QUICKNET_CHAIN_HASH: &str =
	"52db9ba70e0cc0f6eaf7803dd07447a1f5477735fd3f661792ba94600c84e971";
/// The quicknet group hash
pub const QUICKNET_GROUP_HASH: &str =
	"f477d5c89f21a17c863a7f937c6a6d15859414d2be09cd448d4279af331c5d3e";
/// The only scheme whose signatures live in G1 and whose rounds are unchained
pub const UNCHAINED_G1_SCHEME: &str = "bls-unchained-g1-rfc9380";

/// A drand chain configuration, in the shape served by a drand node's `/info` endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconConfig {
	/// The beacon public key, a compressed point in G2
	#[serde(with = "serde_hex")]
	pub public_key: Vec<u8>,
	/// Seconds between rounds
	pub period: u64,
	/// Unix time of round 0
	pub genesis_time: UnixSeconds,
	/// The chain hash identifying the beacon
	#[serde(with = "serde_hex")]
	pub hash: Vec<u8>,
	#[serde(rename = "groupHash", with = "serde_hex")]
	pub group_hash: Vec<u8>,
	#[serde(rename = "schemeID")]
	pub scheme_id: String,
	#[serde(default)]
	pub metadata: Metadata,
}

/// metadata for the drand beacon configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
	#[serde(rename = "beaconID")]
	pub beacon_id: String,
}

impl BeaconConfig {
	/// drand's quicknet: 3 second rounds, unchained signatures on G1
	pub fn quicknet() -> Self {
		Self {
			public_key: decode_hex(QUICKNET_PUBLIC_KEY).unwrap_or_default(),
			period: QUICKNET_PERIOD,
			genesis_time: QUICKNET_GENESIS,
			hash: decode_hex(QUICKNET_CHAIN_HASH).unwrap_or_default(),
			group_hash: decode_hex(QUICKNET_GROUP_HASH).unwrap_or_default(),
			scheme_id: UNCHAINED_G1_SCHEME.into(),
			metadata: Metadata { beacon_id: "quicknet".into() },
		}
	}

	/// A config for arbitrary round arithmetic with no usable public key.
	///
	/// Sufficient for the round math and the round-hash codec, but [`BeaconConfig::validate`]
	/// rejects it.
	pub fn with_schedule(genesis_time: UnixSeconds, period: u64) -> Self {
		Self {
			public_key: Vec::new(),
			period,
			genesis_time,
			hash: Vec::new(),
			group_hash: Vec::new(),
			scheme_id: UNCHAINED_G1_SCHEME.into(),
			metadata: Metadata::default(),
		}
	}

	/// Check that the config describes a beacon pulses can be verified and decrypted against
	pub fn validate(&self) -> Result<(), Error> {
		if self.period == 0 || self.scheme_id != UNCHAINED_G1_SCHEME {
			return Err(Error::InvalidConfig);
		}
		if self.public_key.len() != G2_COMPRESSED_SIZE {
			return Err(Error::InvalidConfig);
		}
		self.public_key_point().map(|_| ())
	}

	/// The beacon public key as a point on G2
	pub fn public_key_point(&self) -> Result<G2Affine, Error> {
		decode_g2(&self.public_key).map_err(|_| Error::InvalidConfig)
	}

	/// The gossipsub topic on which the beacon publishes pulses
	pub fn pubsub_topic(&self) -> String {
		alloc::format!("/drand/pubsub/v0.0.0/{}", hex::encode(&self.hash))
	}

	/// Check that a pulse carries the beacon's signature for its round
	pub fn verify_pulse(&self, pulse: &OpaquePulse) -> Result<(), Error> {
		QuicknetVerifier::verify_round(&self.public_key, &pulse.signature, pulse.round)
			.map_err(Into::into)
	}
}

impl Default for BeaconConfig {
	fn default() -> Self {
		Self::quicknet()
	}
}
