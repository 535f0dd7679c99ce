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

//! Seller and observer flows over a [`Ledger`].
//!
//! Sellers either list with a commitment and reveal later ([`list_standard`], [`reveal`]) or
//! timelock the key to the round of the release time ([`list_auto_release`]). Observers recover
//! the key with [`recover_key`] once it is revealed or its round is published.

use crate::{
	error::Error,
	ledger::{ContentStore, Ledger},
	source::{unlock_when_published, PulseSource},
};
use rand::{CryptoRng, RngCore};
use sp_sealed_primitives::{
	types::BYTES32, AutoReleaseDraft, Key, KeyCommitment, ListingId, RevealSecrets, StandardDraft,
	TimelockBeaconCodec, UnixSeconds,
};

const LOG_TARGET: &str = "sealed-flows";

/// Create a standard listing, returning its id and the secrets the seller must keep until reveal
pub async fn list_standard<L, R>(
	ledger: &L,
	rng: &mut R,
	release_time: UnixSeconds,
	reveal_grace_seconds: u64,
	content_uri: String,
) -> Result<(ListingId, RevealSecrets), Error>
where
	L: Ledger + ?Sized,
	R: RngCore + CryptoRng,
{
	let draft = StandardDraft::new(rng, release_time, reveal_grace_seconds, content_uri);
	let commitment = draft.listing.key_commitment;
	let id = ledger.create_standard_listing(draft.listing).await?;
	log::info!(target: LOG_TARGET, "Created standard listing {} with commitment {}", id, commitment);
	Ok((id, draft.secrets))
}

/// Create an auto-release listing whose key is sealed to the round containing `release_time`.
///
/// Returns the listing id and the content key, so the seller can encrypt the content with it.
pub async fn list_auto_release<L, R>(
	ledger: &L,
	codec: &TimelockBeaconCodec,
	rng: &mut R,
	release_time: UnixSeconds,
	content_uri: String,
) -> Result<(ListingId, Key), Error>
where
	L: Ledger + ?Sized,
	R: RngCore + CryptoRng,
{
	let draft = AutoReleaseDraft::new(codec, rng, release_time, content_uri)?;
	let round = draft.listing.drand_round;
	let id = ledger.create_auto_release_listing(draft.listing).await?;
	log::info!(target: LOG_TARGET, "Created auto-release listing {} locked to round {}", id, round);
	Ok((id, draft.key))
}

/// Reveal a standard listing's key.
///
/// The secrets are checked against the listing's commitment before anything is submitted.
pub async fn reveal<L: Ledger + ?Sized>(
	ledger: &L,
	id: ListingId,
	secrets: &RevealSecrets,
) -> Result<(), Error> {
	let listing = ledger.listing(id).await?.ok_or(Error::ListingNotFound(id))?;
	let opens = listing
		.key_commitment
		.map(|c| KeyCommitment::verify_typed(&secrets.key, &secrets.salt, &c))
		.unwrap_or(false);
	if !opens {
		return Err(Error::CommitmentMismatch(id));
	}
	ledger.reveal_key(id, &secrets.key, &secrets.salt).await?;
	log::info!(target: LOG_TARGET, "Revealed key for listing {}", id);
	Ok(())
}

/// Recover a listing's content key.
///
/// Standard listings yield the revealed key once it opens the commitment. Auto-release listings
/// are unlocked with the pulse for their round. A 32 byte `timelock_encrypted_key` is the legacy
/// [`TimelockBeaconCodec::lock`] form, which is unlocked as soon as the round is published.
pub async fn recover_key<L, S>(
	ledger: &L,
	codec: &TimelockBeaconCodec,
	source: &S,
	id: ListingId,
) -> Result<Key, Error>
where
	L: Ledger + ?Sized,
	S: PulseSource + ?Sized,
{
	let listing = ledger.listing(id).await?.ok_or(Error::ListingNotFound(id))?;

	if !listing.is_timelock_enabled {
		return listing.verified_revealed_key().ok_or(Error::KeyNotRevealed(id));
	}

	let (ciphertext, round) = (&listing.timelock_encrypted_key, listing.drand_round);
	let secret = if ciphertext.len() == BYTES32 {
		// round keyed XOR lock of older listings, still released with the round
		source.pulse(round).await?.ok_or(Error::not_yet_published(round))?;
		codec.unlock(ciphertext, round)
	} else {
		unlock_when_published(codec, source, ciphertext, round).await?
	};
	log::debug!(target: LOG_TARGET, "Unlocked listing {} at round {}", id, listing.drand_round);
	Ok(Key::try_from(secret.as_slice())?)
}

/// Fetch the encrypted content a listing points at
pub async fn fetch_content<L, C>(ledger: &L, store: &C, id: ListingId) -> Result<Vec<u8>, Error>
where
	L: Ledger + ?Sized,
	C: ContentStore + ?Sized,
{
	let listing = ledger.listing(id).await?.ok_or(Error::ListingNotFound(id))?;
	store.get(&listing.content_uri).await
}
