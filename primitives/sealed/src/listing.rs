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

//! Listing records as read from and submitted to the ledger.
//!
//! A listing is either *standard*, where the seller commits to a key and later reveals it, or
//! *auto-release*, where the key is timelocked to a beacon round and anyone can recover it once
//! the round is published.

use crate::{
	codec::TimelockBeaconCodec,
	commitment::KeyCommitment,
	encoding::{serde_hex32_opt, serde_prefixed_hex},
	error::Error,
	types::{Commitment, Key, RoundNumber, Salt, UnixSeconds, BYTES32},
};
use alloc::{string::String, vec::Vec};
use ark_std::rand::{CryptoRng, RngCore};
use codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Identifies a listing on the ledger
pub type ListingId = u64;

/// The ledger's view of a listing
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
	pub release_time: UnixSeconds,
	/// The last moment the seller may reveal a standard listing's key
	pub reveal_deadline: UnixSeconds,
	pub key_revealed: bool,
	#[serde(default, with = "serde_hex32_opt")]
	pub revealed_key: Option<[u8; BYTES32]>,
	#[serde(default, with = "serde_hex32_opt")]
	pub revealed_salt: Option<[u8; BYTES32]>,
	pub is_timelock_enabled: bool,
	/// Zero for standard listings
	pub drand_round: RoundNumber,
	/// Empty for standard listings
	#[serde(with = "serde_prefixed_hex")]
	pub timelock_encrypted_key: Vec<u8>,
	/// `None` for auto-release listings
	pub key_commitment: Option<Commitment>,
	pub content_uri: String,
}

impl Listing {
	/// The record a ledger holds right after accepting a standard listing
	pub fn from_standard(submission: StandardListing) -> Self {
		Self {
			release_time: submission.release_time,
			reveal_deadline: submission
				.release_time
				.saturating_add(submission.reveal_grace_seconds),
			key_revealed: false,
			revealed_key: None,
			revealed_salt: None,
			is_timelock_enabled: false,
			drand_round: 0,
			timelock_encrypted_key: Vec::new(),
			key_commitment: Some(submission.key_commitment),
			content_uri: submission.content_uri,
		}
	}

	/// The record a ledger holds right after accepting an auto-release listing
	pub fn from_auto_release(submission: AutoReleaseListing) -> Self {
		Self {
			release_time: submission.release_time,
			reveal_deadline: submission.release_time,
			key_revealed: false,
			revealed_key: None,
			revealed_salt: None,
			is_timelock_enabled: true,
			drand_round: submission.drand_round,
			timelock_encrypted_key: submission.timelock_encrypted_key,
			key_commitment: None,
			content_uri: submission.content_uri,
		}
	}

	/// The revealed key, if it has been revealed and opens the commitment.
	///
	/// A revealed pair that does not open the commitment is treated as unrevealed.
	pub fn verified_revealed_key(&self) -> Option<Key> {
		if !self.key_revealed {
			return None;
		}
		let key = Key::from(self.revealed_key?);
		let salt = Salt::from(self.revealed_salt?);
		let commitment = self.key_commitment?;
		KeyCommitment::verify_typed(&key, &salt, &commitment).then_some(key)
	}
}

/// Submission creating a standard (commit then reveal) listing
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardListing {
	pub key_commitment: Commitment,
	pub release_time: UnixSeconds,
	pub reveal_grace_seconds: u64,
	pub content_uri: String,
}

/// Submission creating an auto-release (timelocked) listing
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoReleaseListing {
	pub release_time: UnixSeconds,
	pub drand_round: RoundNumber,
	#[serde(with = "serde_prefixed_hex")]
	pub timelock_encrypted_key: Vec<u8>,
	pub content_uri: String,
}

/// What the seller must keep private until a standard listing is revealed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealSecrets {
	pub key: Key,
	pub salt: Salt,
}

impl RevealSecrets {
	pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
		Self { key: Key::generate(rng), salt: Salt::generate(rng) }
	}

	pub fn commitment(&self) -> Commitment {
		KeyCommitment::commit_typed(&self.key, &self.salt)
	}
}

/// A standard listing ready for submission, with the secrets it commits to
#[derive(Debug)]
pub struct StandardDraft {
	pub listing: StandardListing,
	pub secrets: RevealSecrets,
}

impl StandardDraft {
	/// Generate a fresh key and salt and commit to them
	pub fn new<R: RngCore + CryptoRng>(
		rng: &mut R,
		release_time: UnixSeconds,
		reveal_grace_seconds: u64,
		content_uri: String,
	) -> Self {
		let secrets = RevealSecrets::generate(rng);
		let listing = StandardListing {
			key_commitment: secrets.commitment(),
			release_time,
			reveal_grace_seconds,
			content_uri,
		};
		Self { listing, secrets }
	}
}

/// An auto-release listing ready for submission, with the key it locks
#[derive(Debug)]
pub struct AutoReleaseDraft {
	pub listing: AutoReleaseListing,
	pub key: Key,
}

impl AutoReleaseDraft {
	/// Generate a fresh key and seal it to the round in effect at `release_time`.
	///
	/// The round is the one *containing* `release_time`, so it is published no later than the
	/// release time itself.
	pub fn new<R: RngCore + CryptoRng>(
		codec: &TimelockBeaconCodec,
		rng: &mut R,
		release_time: UnixSeconds,
		content_uri: String,
	) -> Result<Self, Error> {
		let drand_round = codec.round_for_timestamp(release_time)?;
		let key = Key::generate(rng);
		let timelock_encrypted_key = codec.seal_encoded(key.as_bytes(), drand_round, rng)?;
		Ok(Self {
			listing: AutoReleaseListing {
				release_time,
				drand_round,
				timelock_encrypted_key,
				content_uri,
			},
			key,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::beacon::QUICKNET_GENESIS;

	#[test]
	fn standard_draft_commits_to_its_secrets() {
		let mut rng = crate::test_utils::test_rng();
		let draft = StandardDraft::new(&mut rng, QUICKNET_GENESIS + 300, 60, "ipfs://cid".into());

		assert!(KeyCommitment::verify_typed(
			&draft.secrets.key,
			&draft.secrets.salt,
			&draft.listing.key_commitment
		));
		assert_eq!(draft.listing.reveal_grace_seconds, 60);
	}

	#[test]
	fn drafts_never_reuse_salts() {
		let mut rng = crate::test_utils::test_rng();
		let a = StandardDraft::new(&mut rng, 10, 0, String::new());
		let b = StandardDraft::new(&mut rng, 10, 0, String::new());
		assert_ne!(a.secrets.salt, b.secrets.salt);
		assert_ne!(a.listing.key_commitment, b.listing.key_commitment);
	}

	#[test]
	fn auto_release_draft_uses_the_round_containing_release_time() {
		let codec = TimelockBeaconCodec::quicknet();
		let mut rng = crate::test_utils::test_rng();
		let draft = AutoReleaseDraft::new(&codec, &mut rng, 1692803373, "ipfs://cid".into()).unwrap();

		assert_eq!(draft.listing.drand_round, 2);
		assert!(codec.timestamp_for_round(2) <= draft.listing.release_time);
		assert!(!draft.listing.timelock_encrypted_key.is_empty());
	}

	#[test]
	fn auto_release_draft_before_genesis_fails() {
		let codec = TimelockBeaconCodec::quicknet();
		let mut rng = crate::test_utils::test_rng();
		let res = AutoReleaseDraft::new(&codec, &mut rng, QUICKNET_GENESIS, String::new());
		assert!(matches!(res, Err(Error::BeforeGenesis { .. })));
	}

	#[test]
	fn standard_listing_record_has_deadline_after_release() {
		let listing = Listing::from_standard(StandardListing {
			key_commitment: Commitment([1u8; 32]),
			release_time: 1000,
			reveal_grace_seconds: 50,
			content_uri: "uri".into(),
		});
		assert_eq!(listing.reveal_deadline, 1050);
		assert!(!listing.is_timelock_enabled);
		assert!(!listing.key_revealed);
		assert_eq!(listing.key_commitment, Some(Commitment([1u8; 32])));
	}

	#[test]
	fn verified_revealed_key_checks_the_commitment() {
		let mut rng = crate::test_utils::test_rng();
		let draft = StandardDraft::new(&mut rng, 1000, 0, String::new());
		let mut listing = Listing::from_standard(draft.listing.clone());
		assert_eq!(listing.verified_revealed_key(), None);

		listing.key_revealed = true;
		listing.revealed_key = Some(*draft.secrets.key.as_bytes());
		listing.revealed_salt = Some(*draft.secrets.salt.as_bytes());
		assert_eq!(listing.verified_revealed_key(), Some(draft.secrets.key.clone()));

		listing.revealed_salt = Some([0u8; 32]);
		assert_eq!(listing.verified_revealed_key(), None);
	}

	#[test]
	fn listing_json_uses_ledger_field_names() {
		let listing = Listing::from_auto_release(AutoReleaseListing {
			release_time: 1692803373,
			drand_round: 2,
			timelock_encrypted_key: vec![0xab, 0xcd],
			content_uri: "ipfs://cid".into(),
		});
		let json = serde_json::to_value(&listing).unwrap();
		assert_eq!(json["isTimelockEnabled"], true);
		assert_eq!(json["drandRound"], 2);
		assert_eq!(json["timelockEncryptedKey"], "0xabcd");
		assert!(json["revealedKey"].is_null());

		let back: Listing = serde_json::from_value(json).unwrap();
		assert_eq!(back, listing);
	}

	#[test]
	fn timelocked_key_json_is_prefixed_like_other_ledger_bytes() {
		let submission = AutoReleaseListing {
			release_time: 1692803373,
			drand_round: 2,
			timelock_encrypted_key: vec![0x01, 0xff],
			content_uri: String::new(),
		};
		let json = serde_json::to_value(&submission).unwrap();
		assert_eq!(json["timelockEncryptedKey"], "0x01ff");

		// records written without the prefix still load
		let mut bare = json.clone();
		bare["timelockEncryptedKey"] = "01ff".into();
		let back: AutoReleaseListing = serde_json::from_value(bare).unwrap();
		assert_eq!(back, submission);

		let mut record = serde_json::to_value(Listing::from_auto_release(submission)).unwrap();
		assert!(record["timelockEncryptedKey"].as_str().unwrap().starts_with("0x"));
		record["timelockEncryptedKey"] = "".into();
		let empty: Listing = serde_json::from_value(record).unwrap();
		assert!(empty.timelock_encrypted_key.is_empty());
	}
}
