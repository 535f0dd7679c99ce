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

//! Boneh-Franklin identity based encryption (FullIdent) over BLS12-381.
//!
//! The identity of a drand round is $Q_{id} = H(m_r) \in \mathbb{G}_1$ and the beacon's output for
//! that round is the BLS signature $sig = sk \cdot Q_{id}$. That signature is exactly the IBE
//! secret key for the round identity, so a ciphertext sealed to round `r` opens as soon as the
//! beacon publishes round `r`, and not before.
//!
//! Given the beacon public key $P = sk \cdot g_2$ and a message $M$:
//!
//! * $\sigma \xleftarrow{R} \{0,1\}^{256}$, $r = H_3(\sigma, M)$
//! * $U = r \cdot g_2$, $V = \sigma \oplus H_2(e(Q_{id}, r \cdot P))$, $W = M \oplus H_4(\sigma)$
//!
//! Decryption recovers $\sigma$ from $e(sig, U)$, unmasks $M$ and re-derives $U$ from
//! $H_3(\sigma, M)$ to reject tampered ciphertexts.

use crate::bls12_381::{decode_g2, encode_g2, CryptoError, G2_COMPRESSED_SIZE};
use alloc::vec::Vec;
use ark_bls12_381::{Bls12_381, Fr, G1Affine, G2Affine};
use ark_ec::{
	pairing::{Pairing, PairingOutput},
	AffineRepr, CurveGroup,
};
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use ark_std::rand::{CryptoRng, RngCore};
use codec::{Decode, Encode};
use scale_info::TypeInfo;
use sha2::{Digest, Sha256};

/// The size of the random FO seed and of the mask derived from the pairing
pub const SIGMA_SIZE: usize = 32;

const H2_DST: &[u8] = b"SEALED-IBE-H2";
const H3_DST: &[u8] = b"SEALED-IBE-H3";
const H4_DST: &[u8] = b"SEALED-IBE-H4";

/// A ciphertext locked to an identity on G1
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TypeInfo)]
pub struct IbeCiphertext {
	/// $r \cdot g_2$, compressed
	pub u: [u8; G2_COMPRESSED_SIZE],
	/// The masked FO seed
	pub v: [u8; SIGMA_SIZE],
	/// The masked message
	pub w: Vec<u8>,
}

/// Encrypt `message` for `identity` under the master public key `p_pub`
pub fn encrypt<R: RngCore + CryptoRng>(
	p_pub: &G2Affine,
	identity: &G1Affine,
	message: &[u8],
	rng: &mut R,
) -> Result<IbeCiphertext, CryptoError> {
	let mut sigma = [0u8; SIGMA_SIZE];
	rng.fill_bytes(&mut sigma);

	let r = h3(&sigma, message);
	let u = (G2Affine::generator() * r).into_affine();
	let shared = Bls12_381::pairing(*identity, (*p_pub * r).into_affine());

	Ok(IbeCiphertext {
		u: encode_g2(&u)?,
		v: xor_array(&sigma, &h2(&shared)?),
		w: xor_stream(message, &sigma),
	})
}

/// Decrypt a ciphertext with the identity secret key (for drand: the round signature)
pub fn decrypt(secret: &G1Affine, ciphertext: &IbeCiphertext) -> Result<Vec<u8>, CryptoError> {
	let u = decode_g2(&ciphertext.u)?;
	let shared = Bls12_381::pairing(*secret, u);

	let sigma = xor_array(&ciphertext.v, &h2(&shared)?);
	let message = xor_stream(&ciphertext.w, &sigma);

	let r = h3(&sigma, &message);
	if (G2Affine::generator() * r).into_affine() != u {
		return Err(CryptoError::DecryptionFailed);
	}

	Ok(message)
}

/// $H_2: \mathbb{G}_T \to \{0,1\}^{256}$
fn h2(shared: &PairingOutput<Bls12_381>) -> Result<[u8; SIGMA_SIZE], CryptoError> {
	let mut bytes = Vec::new();
	shared.0.serialize_compressed(&mut bytes).map_err(|_| CryptoError::InvalidBuffer)?;
	let mut hasher = Sha256::new();
	hasher.update(H2_DST);
	hasher.update(&bytes);
	let mut mask = [0u8; SIGMA_SIZE];
	mask.copy_from_slice(&hasher.finalize());
	Ok(mask)
}

/// $H_3: \{0,1\}^{256} \times \{0,1\}^* \to \mathbb{Z}_q$
fn h3(sigma: &[u8; SIGMA_SIZE], message: &[u8]) -> Fr {
	let mut hasher = Sha256::new();
	hasher.update(H3_DST);
	hasher.update(sigma);
	hasher.update(message);
	Fr::from_be_bytes_mod_order(&hasher.finalize())
}

/// XORs `data` with the $H_4(\sigma)$ keystream (sha256 in counter mode)
fn xor_stream(data: &[u8], sigma: &[u8; SIGMA_SIZE]) -> Vec<u8> {
	let mut out = Vec::with_capacity(data.len());
	for (counter, chunk) in data.chunks(SIGMA_SIZE).enumerate() {
		let mut hasher = Sha256::new();
		hasher.update(H4_DST);
		hasher.update(sigma);
		hasher.update((counter as u32).to_be_bytes());
		let block = hasher.finalize();
		out.extend(chunk.iter().zip(block.iter()).map(|(d, k)| d ^ k));
	}
	out
}

fn xor_array(a: &[u8; SIGMA_SIZE], b: &[u8; SIGMA_SIZE]) -> [u8; SIGMA_SIZE] {
	let mut out = [0u8; SIGMA_SIZE];
	for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
		*o = x ^ y;
	}
	out
}
