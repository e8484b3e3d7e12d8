//! Core types shared across capcomp modules.

/// CapabilityId: catalog key of a capability (kebab-case)
pub type CapabilityId = String;

/// BehaviorName: name of a behavior a capability binds
pub type BehaviorName = String;

/// Digest: BLAKE3 hash value
pub type Digest = [u8; 32];
