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

//! In-memory collaborators and beacon vectors for tests

use crate::{
	error::Error,
	ledger::{ContentStore, Ledger},
};
use async_trait::async_trait;
use rand::{rngs::StdRng, SeedableRng};
use sp_sealed_primitives::{
	AutoReleaseListing, Key, KeyCommitment, Listing, ListingId, OpaquePulse, Salt,
	StandardListing, UnixSeconds,
};
use std::{
	collections::BTreeMap,
	sync::{
		atomic::{AtomicU64, Ordering},
		Mutex,
	},
};

/// raw pulses fetched from drand (<https://api.drand.sh/52db9ba70e0cc0f6eaf7803dd07447a1f5477735fd3f661792ba94600c84e971/public/1000>)
pub(crate) const PULSE1000_SIG: &str = "b44679b9a59af2ec876b1a6b1ad52ea9b1615fc3982b19576350f93447cb1125e342b73a8dd2bacbe47e4b6b63ed5e39";
pub(crate) const PULSE1001_SIG: &str = "b33bf3667cbd5a82de3a24b4e0e9fe5513cc1a0e840368c6e31f5fcfa79bea03f73896b25883abf2853d10337fb8fa41";

fn opaque(round: u64, sig: &str) -> OpaquePulse {
	let signature = hex::decode(sig).unwrap().try_into().unwrap();
	OpaquePulse { round, signature }
}

/// Seeded, so tests are reproducible, and `CryptoRng` so it can draw keys
pub(crate) fn test_rng() -> StdRng {
	StdRng::seed_from_u64(0)
}

pub(crate) fn pulse1000() -> OpaquePulse {
	opaque(1000, PULSE1000_SIG)
}

pub(crate) fn pulse1001() -> OpaquePulse {
	opaque(1001, PULSE1001_SIG)
}

/// A ledger that enforces the reveal rules: matching commitment, release time reached
pub(crate) struct MockLedger {
	now: AtomicU64,
	next_id: AtomicU64,
	listings: Mutex<BTreeMap<ListingId, Listing>>,
}

impl MockLedger {
	pub fn new(now: UnixSeconds) -> Self {
		Self { now: AtomicU64::new(now), next_id: AtomicU64::new(0), listings: Default::default() }
	}

	pub fn set_time(&self, now: UnixSeconds) {
		self.now.store(now, Ordering::SeqCst);
	}

	fn store(&self, listing: Listing) -> ListingId {
		let id = self.next_id.fetch_add(1, Ordering::SeqCst);
		self.listings.lock().unwrap().insert(id, listing);
		id
	}

	/// Overwrite a listing as if the ledger state had been tampered with
	pub fn corrupt(&self, id: ListingId, f: impl FnOnce(&mut Listing)) {
		f(self.listings.lock().unwrap().get_mut(&id).unwrap());
	}
}

#[async_trait]
impl Ledger for MockLedger {
	async fn create_standard_listing(&self, listing: StandardListing) -> Result<ListingId, Error> {
		Ok(self.store(Listing::from_standard(listing)))
	}

	async fn create_auto_release_listing(
		&self,
		listing: AutoReleaseListing,
	) -> Result<ListingId, Error> {
		Ok(self.store(Listing::from_auto_release(listing)))
	}

	async fn reveal_key(&self, id: ListingId, key: &Key, salt: &Salt) -> Result<(), Error> {
		let mut listings = self.listings.lock().unwrap();
		let listing = listings.get_mut(&id).ok_or(Error::ListingNotFound(id))?;
		let commitment =
			listing.key_commitment.ok_or(Error::Ledger("not a standard listing".into()))?;
		if self.now.load(Ordering::SeqCst) < listing.release_time {
			return Err(Error::Ledger("release time not reached".into()));
		}
		if !KeyCommitment::verify_typed(key, salt, &commitment) {
			return Err(Error::Ledger("commitment mismatch".into()));
		}
		listing.key_revealed = true;
		listing.revealed_key = Some(*key.as_bytes());
		listing.revealed_salt = Some(*salt.as_bytes());
		Ok(())
	}

	async fn listing(&self, id: ListingId) -> Result<Option<Listing>, Error> {
		Ok(self.listings.lock().unwrap().get(&id).cloned())
	}
}

#[derive(Default)]
pub(crate) struct MockContentStore {
	blobs: Mutex<BTreeMap<String, Vec<u8>>>,
}

#[async_trait]
impl ContentStore for MockContentStore {
	async fn put(&self, bytes: Vec<u8>) -> Result<String, Error> {
		let mut blobs = self.blobs.lock().unwrap();
		let uri = format!("mem://{}", blobs.len());
		blobs.insert(uri.clone(), bytes);
		Ok(uri)
	}

	async fn get(&self, uri: &str) -> Result<Vec<u8>, Error> {
		self.blobs
			.lock()
			.unwrap()
			.get(uri)
			.cloned()
			.ok_or_else(|| Error::Storage(format!("no content at {uri}")))
	}
}
