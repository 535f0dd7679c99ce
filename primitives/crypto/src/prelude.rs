//! Sealed Crypto Prelude
//!
//! Re-exports the functions needed to verify pulses and to lock data to round identities.
//!
pub use super::{
	bls12_381::{decode_g1, decode_g2, CryptoError},
	drand::compute_round_on_g1,
	ibe::{decrypt, encrypt, IbeCiphertext},
	verifier::*,
};
