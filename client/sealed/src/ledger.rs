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

//! The external collaborators of a listing: the ledger holding listing records and the store
//! holding encrypted content.

use crate::error::Error;
use async_trait::async_trait;
use sp_sealed_primitives::{AutoReleaseListing, Key, Listing, ListingId, Salt, StandardListing};

/// Read and write access to listings on the ledger
#[async_trait]
pub trait Ledger: Send + Sync {
	async fn create_standard_listing(&self, listing: StandardListing) -> Result<ListingId, Error>;

	async fn create_auto_release_listing(
		&self,
		listing: AutoReleaseListing,
	) -> Result<ListingId, Error>;

	/// Reveal a standard listing's key.
	///
	/// The ledger recomputes the commitment from `(key, salt)` and rejects the reveal when it does
	/// not match or when the release time has not been reached.
	async fn reveal_key(&self, id: ListingId, key: &Key, salt: &Salt) -> Result<(), Error>;

	async fn listing(&self, id: ListingId) -> Result<Option<Listing>, Error>;
}

/// Storage for encrypted content, addressed by uri
#[async_trait]
pub trait ContentStore: Send + Sync {
	async fn put(&self, bytes: Vec<u8>) -> Result<String, Error>;

	async fn get(&self, uri: &str) -> Result<Vec<u8>, Error>;
}
