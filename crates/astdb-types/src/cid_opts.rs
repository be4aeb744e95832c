//! The CID computation configuration surface (spec.md §4.4, §9
//! "Configuration struct" redesign note).
//!
//! `CidOpts` is a fixed-field struct -- no named/keyword arguments, no
//! hidden defaults beyond those spec.md §4.4 lists.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Compilation profile bits folded into the CID knob block.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ProfileMask: u32 {
        const DEBUG_ASSERTIONS = 1 << 0;
        const OVERFLOW_CHECKS  = 1 << 1;
        const BOUNDS_CHECKS    = 1 << 2;
        const LTO              = 1 << 3;
    }
}

bitflags! {
    /// Effect bits folded into the CID knob block.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct EffectMask: u64 {
        const IO       = 1 << 0;
        const ALLOC    = 1 << 1;
        const PANIC    = 1 << 2;
        const UNSAFE   = 1 << 3;
        const NETWORK  = 1 << 4;
    }
}

/// Toolchain knob configuration folded into every CID (spec.md §4.4).
///
/// Two semantically identical subjects compiled under different knobs
/// receive distinct CIDs (spec.md invariant 7, "Knob separation").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CidOpts {
    pub toolchain_version: u32,
    pub profile_mask: ProfileMask,
    pub effect_mask: EffectMask,
    pub safety_level: u8,
    pub fastmath: bool,
    pub deterministic: bool,
    pub target_triple: String,
}

impl Default for CidOpts {
    fn default() -> Self {
        Self {
            toolchain_version: 1,
            profile_mask: ProfileMask::empty(),
            effect_mask: EffectMask::empty(),
            safety_level: 1,
            fastmath: false,
            deterministic: true,
            target_triple: "unknown-unknown-unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let opts = CidOpts::default();
        assert_eq!(opts.toolchain_version, 1);
        assert_eq!(opts.profile_mask, ProfileMask::empty());
        assert_eq!(opts.effect_mask, EffectMask::empty());
        assert_eq!(opts.safety_level, 1);
        assert!(!opts.fastmath);
        assert!(opts.deterministic);
        assert_eq!(opts.target_triple, "unknown-unknown-unknown");
    }
}
