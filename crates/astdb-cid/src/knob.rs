//! The toolchain knob block appended to every CID hash (spec.md §4.4).

use astdb_types::CidOpts;

/// Fixed 20-byte knob block layout (spec.md §4.4 step 3). No field may be
/// silently omitted; reordering or dropping a field is a specification
/// violation, so this function is the single place that layout is ever
/// written.
#[must_use]
pub fn knob_block(opts: &CidOpts) -> [u8; 20] {
    let mut block = [0u8; 20];
    block[0..4].copy_from_slice(&opts.toolchain_version.to_le_bytes());
    block[4..8].copy_from_slice(&opts.profile_mask.bits().to_le_bytes());
    block[8..16].copy_from_slice(&opts.effect_mask.bits().to_le_bytes());
    block[16] = opts.safety_level;
    block[17] = u8::from(opts.fastmath);
    block[18] = u8::from(opts.deterministic);
    block[19] = 0; // reserved
    block
}

/// `u32 little-endian length | bytes` (spec.md §4.4 step 4).
#[must_use]
pub fn target_triple_block(opts: &CidOpts) -> Vec<u8> {
    let bytes = opts.target_triple.as_bytes();
    let mut out = Vec::with_capacity(4 + bytes.len());
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use astdb_types::{EffectMask, ProfileMask};

    #[test]
    fn layout_is_twenty_bytes_in_fixed_order() {
        let opts = CidOpts {
            toolchain_version: 0x0102_0304,
            profile_mask: ProfileMask::LTO,
            effect_mask: EffectMask::IO,
            safety_level: 7,
            fastmath: true,
            deterministic: false,
            target_triple: "x".to_string(),
        };
        let block = knob_block(&opts);
        assert_eq!(block.len(), 20);
        assert_eq!(&block[0..4], &0x0102_0304u32.to_le_bytes());
        assert_eq!(&block[4..8], &ProfileMask::LTO.bits().to_le_bytes());
        assert_eq!(&block[8..16], &EffectMask::IO.bits().to_le_bytes());
        assert_eq!(block[16], 7);
        assert_eq!(block[17], 1);
        assert_eq!(block[18], 0);
        assert_eq!(block[19], 0);
    }

    #[test]
    fn target_triple_is_length_prefixed() {
        let mut opts = CidOpts::default();
        opts.target_triple = "aarch64-apple-darwin".to_string();
        let encoded = target_triple_block(&opts);
        assert_eq!(&encoded[0..4], &20u32.to_le_bytes());
        assert_eq!(&encoded[4..], opts.target_triple.as_bytes());
    }
}
