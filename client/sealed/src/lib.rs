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

//! # Sealed Client
//!
//! Services a client of a sealed content ledger runs on top of `sp-sealed-primitives`.
//!
//! * [`store`] - A shared store of verified beacon pulses
//! * [`gossipsub`] - Ingestion of drand pulses from the beacon's gossipsub topic
//! * [`source`] - The [`PulseSource`] seam and unlocking once a round is published
//! * [`ledger`] - The ledger and content store interfaces
//! * [`flows`] - Seller and observer flows

pub mod error;
pub mod flows;
pub mod gossipsub;
pub mod ledger;
pub mod source;
pub mod store;

#[cfg(test)]
mod mock;

pub use error::Error;
pub use ledger::{ContentStore, Ledger};
pub use source::{unlock_when_published, PulseSource};
pub use store::{PulseStore, DEFAULT_RETENTION_ROUNDS};
