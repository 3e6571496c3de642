use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::plugin::manifest::PluginManifest;

/// Decides whether a manifest and the unit it points at may be trusted.
pub trait IntegrityChecker {
    fn verify(&self, manifest: &PluginManifest, raw_manifest: &str) -> bool;
}

/// Accepts every manifest. Matches the shipped behaviour before signing exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustAll;

impl IntegrityChecker for TrustAll {
    fn verify(&self, _manifest: &PluginManifest, _raw_manifest: &str) -> bool {
        true
    }
}

/// Accepts a manifest only if the SHA-256 of its bytes and unit id is allowlisted.
#[derive(Debug, Clone, Default)]
pub struct DigestAllowlist {
    trusted: HashSet<String>,
}

impl DigestAllowlist {
    pub fn new<I, S>(digests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            trusted: digests
                .into_iter()
                .map(|digest| digest.as_ref().trim().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Lowercase hex digest over `raw_manifest`, a NUL separator, then `unit`.
    pub fn digest(raw_manifest: &str, unit: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw_manifest.as_bytes());
        hasher.update([0u8]);
        hasher.update(unit.as_bytes());

        hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }
}

impl IntegrityChecker for DigestAllowlist {
    fn verify(&self, manifest: &PluginManifest, raw_manifest: &str) -> bool {
        let digest = Self::digest(raw_manifest, manifest.unit_id());
        self.trusted.contains(&digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "name = \"SamplePlugin\"\nversion = \"1.0.0\"\n";

    #[test]
    fn digest_is_stable_hex() {
        let digest = DigestAllowlist::digest(RAW, "SamplePlugin");

        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(digest, DigestAllowlist::digest(RAW, "SamplePlugin"));
        assert_ne!(digest, DigestAllowlist::digest(RAW, "OtherUnit"));
    }

    #[test]
    fn allowlist_accepts_only_known_pairs() {
        let manifest = PluginManifest::parse(RAW).unwrap();
        let digest = DigestAllowlist::digest(RAW, "SamplePlugin");
        let checker = DigestAllowlist::new([digest.to_ascii_uppercase()]);

        assert!(checker.verify(&manifest, RAW));
        assert!(!checker.verify(&manifest, "name = \"SamplePlugin\"\n"));
        assert!(!DigestAllowlist::default().verify(&manifest, RAW));
        assert!(TrustAll.verify(&manifest, RAW));
    }
}
