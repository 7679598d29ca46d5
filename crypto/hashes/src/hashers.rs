use crate::Hash;

/// A hasher that can absorb arbitrary byte slices.
pub trait HasherBase {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
}

/// A hasher that produces a [`Hash`] digest.
pub trait Hasher: HasherBase + Clone {
    fn finalize(&self) -> Hash;
}

/// Declares a keyed blake2b-256 hasher type per hashing domain.
/// The key doubles as the domain separation tag, so two hashers
/// never produce the same digest for the same preimage.
macro_rules! blake2b_hasher {
    ($(#[$meta:meta])* $name:ident, $domain_key:literal) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(blake2b_simd::State);

        impl $name {
            #[inline(always)]
            pub fn new() -> Self {
                Self(blake2b_simd::Params::new().hash_length(crate::HASH_SIZE).key($domain_key).to_state())
            }

            /// One-shot convenience over new + update + finalize.
            pub fn hash<A: AsRef<[u8]>>(data: A) -> Hash {
                let mut hasher = Self::new();
                hasher.update(data);
                hasher.finalize()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl HasherBase for $name {
            #[inline(always)]
            fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
                self.0.update(data.as_ref());
                self
            }
        }

        impl Hasher for $name {
            #[inline(always)]
            fn finalize(&self) -> Hash {
                let hash = self.0.clone().finalize();
                Hash::from_slice(hash.as_bytes())
            }
        }
    };
}

blake2b_hasher!(
    /// Domain of transaction IDs (hashed without signature scripts).
    TransactionID, b"TransactionID"
);
blake2b_hasher!(
    /// Domain of full transaction hashes (include signature scripts and mass).
    TransactionHash, b"TransactionHash"
);
blake2b_hasher!(
    /// Domain of the non-payload part of a v1 transaction ID.
    TransactionRest, b"TransactionRest"
);
blake2b_hasher!(
    /// Outer domain combining the payload digest and the rest digest into a v1 ID.
    TransactionV1Id, b"TransactionV1Id"
);
blake2b_hasher!(
    /// Domain of transaction payload digests.
    PayloadDigest, b"PayloadDigest"
);
blake2b_hasher!(
    /// Domain of signature hashes.
    TransactionSigningHash, b"TransactionSigningHash"
);
blake2b_hasher!(
    /// Domain of covenant identifiers (outpoint + authorized outputs).
    CovenantID, b"CovenantID"
);
