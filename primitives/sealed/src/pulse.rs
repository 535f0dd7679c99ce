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

use crate::{error::Error, types::RoundNumber};
use alloc::vec::Vec;
use ark_bls12_381::G1Affine;
use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_sealed_crypto::bls12_381::{decode_g1, G1_COMPRESSED_SIZE};

/// The size of a serialized [`OpaquePulse`]: an 8 byte round and a 48 byte signature
pub const OPAQUE_PULSE_SIZE: usize = 8 + G1_COMPRESSED_SIZE;

/// A `pulse` represents the output from a verifiable randomness beacon, specifically an 'unchained'
/// one. This is the protobuf message drand gossips on its pubsub topic.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pulse {
	/// The round of the protocol when the signature was computed
	#[prost(uint64, tag = "1")]
	pub round: u64,
	/// The interpolated threshold BLS sigs
	#[prost(bytes = "vec", tag = "2")]
	pub signature: ::prost::alloc::vec::Vec<u8>,
}

/// A pulse with a fixed size signature, obtained by converting a [`Pulse`]
#[derive(Clone, Debug, PartialEq, Eq, MaxEncodedLen, TypeInfo, Encode, Decode)]
pub struct OpaquePulse {
	/// The round of the beacon protocol
	pub round: RoundNumber,
	/// A compressed BLS signature
	pub signature: [u8; G1_COMPRESSED_SIZE],
}

impl TryFrom<Pulse> for OpaquePulse {
	type Error = Error;

	fn try_from(pulse: Pulse) -> Result<Self, Self::Error> {
		let actual = pulse.signature.len();
		let signature: [u8; G1_COMPRESSED_SIZE] = pulse
			.signature
			.try_into()
			.map_err(|_| Error::InvalidLength { expected: G1_COMPRESSED_SIZE, actual })?;

		Ok(OpaquePulse { round: pulse.round, signature })
	}
}

impl OpaquePulse {
	/// Serialize the opaque pulse as a vector
	pub fn serialize_to_vec(&self) -> Vec<u8> {
		let mut vec = Vec::with_capacity(OPAQUE_PULSE_SIZE);
		vec.extend_from_slice(&self.round.to_le_bytes());
		vec.extend_from_slice(&self.signature);
		vec
	}

	/// Deserialize from a slice
	///
	/// * `data`: The data to attempt to deserialize
	pub fn deserialize_from_vec(data: &[u8]) -> Result<Self, Error> {
		if data.len() != OPAQUE_PULSE_SIZE {
			return Err(Error::InvalidLength { expected: OPAQUE_PULSE_SIZE, actual: data.len() });
		}

		let bytes = data[0..8].try_into().map_err(|_| Error::EncodingError)?;
		let round = u64::from_le_bytes(bytes);

		let signature: [u8; G1_COMPRESSED_SIZE] =
			data[8..OPAQUE_PULSE_SIZE].try_into().map_err(|_| Error::EncodingError)?;

		Ok(OpaquePulse { round, signature })
	}

	/// Compute the signature as a group element
	pub fn signature_point(&self) -> Result<G1Affine, Error> {
		decode_g1(&self.signature).map_err(Into::into)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use prost::Message;
	use sp_sealed_crypto::bls12_381::CryptoError;

	fn valid_pulse() -> Pulse {
		Pulse { round: 14475418, signature: VALID_SIG.to_vec() }
	}

	fn invalid_pulse() -> Pulse {
		Pulse { round: 14475418, signature: VALID_SIG[..47].to_vec() }
	}

	pub const SERIALIZED_VALID: &[u8] = &[
		154, 224, 220, 0, 0, 0, 0, 0, 146, 37, 87, 193, 37, 144, 182, 61, 73, 122, 248, 242, 242,
		43, 61, 28, 75, 93, 37, 95, 131, 38, 3, 203, 216, 6, 213, 241, 244, 90, 162, 208, 90, 104,
		76, 235, 84, 49, 223, 95, 22, 186, 113, 163, 202, 195, 230, 117,
	];

	pub const VALID_SIG: &[u8] = &[
		146, 37, 87, 193, 37, 144, 182, 61, 73, 122, 248, 242, 242, 43, 61, 28, 75, 93, 37, 95,
		131, 38, 3, 203, 216, 6, 213, 241, 244, 90, 162, 208, 90, 104, 76, 235, 84, 49, 223, 95,
		22, 186, 113, 163, 202, 195, 230, 117,
	];

	#[test]
	fn test_pulse_to_opaque_pulse_conversion() {
		let pulse = valid_pulse();
		let opaque = OpaquePulse::try_from(pulse.clone()).expect("valid pulse converts");
		assert_eq!(opaque.round, pulse.round);
		assert_eq!(opaque.signature, pulse.signature[..]);
	}

	#[test]
	fn test_pulse_with_short_signature_fails() {
		let result = OpaquePulse::try_from(invalid_pulse());
		assert_eq!(result, Err(Error::InvalidLength { expected: 48, actual: 47 }));
	}

	#[test]
	fn test_serialize_to_vec() {
		let opaque = OpaquePulse::try_from(valid_pulse()).unwrap();
		assert_eq!(opaque.serialize_to_vec(), SERIALIZED_VALID);
	}

	#[test]
	fn test_deserialize_from_valid_vec() {
		let opaque = OpaquePulse::deserialize_from_vec(SERIALIZED_VALID).unwrap();
		assert_eq!(opaque.round, 14475418);
		assert_eq!(opaque.signature, VALID_SIG[..]);
	}

	#[test]
	fn test_deserialize_rejects_wrong_sizes() {
		for len in [0usize, 50, 60] {
			let res = OpaquePulse::deserialize_from_vec(&vec![0u8; len]);
			assert_eq!(res, Err(Error::InvalidLength { expected: 56, actual: len }));
		}
	}

	#[test]
	fn test_signature_point_invalid() {
		let mut opaque = OpaquePulse::try_from(valid_pulse()).unwrap();
		// corrupt the signature
		opaque.signature = [1; 48];
		assert_eq!(opaque.signature_point(), Err(Error::Crypto(CryptoError::DeserializeG1Failure)));
	}

	#[test]
	fn test_protobuf_decoding() {
		let pulse = valid_pulse();
		let bytes = pulse.encode_to_vec();
		assert_eq!(Pulse::decode(bytes.as_slice()).unwrap(), pulse);
	}
}
