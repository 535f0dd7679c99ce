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
use ark_bls12_381::{Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_std::{
	rand::{rngs::StdRng, SeedableRng},
	UniformRand,
};

use crate::drand::compute_round_on_g1;

pub type RawPulse = (u64, &'static str);
/// raw pulses fetched from drand (<https://api.drand.sh/52db9ba70e0cc0f6eaf7803dd07447a1f5477735fd3f661792ba94600c84e971/public/1000>)
pub const PULSE1000: RawPulse = (1000u64, "b44679b9a59af2ec876b1a6b1ad52ea9b1615fc3982b19576350f93447cb1125e342b73a8dd2bacbe47e4b6b63ed5e39");
pub const PULSE1001: RawPulse = (1001u64, "b33bf3667cbd5a82de3a24b4e0e9fe5513cc1a0e840368c6e31f5fcfa79bea03f73896b25883abf2853d10337fb8fa41");

/// The quicknet public key, sk * G \in G2
pub const QUICKNET_PK: &str = "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a";

/// A deterministic rng that also satisfies `CryptoRng`
pub fn test_rng() -> StdRng {
	StdRng::seed_from_u64(0)
}

pub fn quicknet_pk() -> Vec<u8> {
	hex::decode(QUICKNET_PK).unwrap()
}

pub fn pulse(raw: RawPulse) -> (u64, Vec<u8>) {
	(raw.0, hex::decode(raw.1).unwrap())
}

/// A throwaway beacon: a secret key, its public key in G2 and a signer for rounds
pub struct TestBeacon {
	sk: Fr,
	pub pk: G2Affine,
}

impl TestBeacon {
	pub fn new() -> Self {
		let sk = Fr::rand(&mut test_rng());
		let pk = (G2Affine::generator() * sk).into_affine();
		Self { sk, pk }
	}

	pub fn sign(&self, round: u64) -> G1Affine {
		(compute_round_on_g1(round).unwrap() * self.sk).into_affine()
	}
}
