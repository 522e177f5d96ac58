//! Property tests: the decoder must reject hostile input with an error, never a panic.

use flashdecode_evm::{CallDecoder, DecodeLimits, FLASH_LOAN_SELECTOR, FLASH_LOAN_SIMPLE_SELECTOR};
use proptest::prelude::*;

fn word(v: u64) -> [u8; 32] {
    let mut w = [0u8; 32];
    w[24..].copy_from_slice(&v.to_be_bytes());
    w
}

proptest! {
    #[test]
    fn arbitrary_bodies_never_panic(
        body in proptest::collection::vec(any::<u8>(), 0..800),
        multi in any::<bool>(),
    ) {
        let selector = if multi { FLASH_LOAN_SELECTOR } else { FLASH_LOAN_SIMPLE_SELECTOR };
        let mut data = selector.to_vec();
        data.extend(body);
        let _ = CallDecoder::new().decode_calldata(&data);
    }

    #[test]
    fn small_offsets_and_counts_never_panic(
        head in proptest::collection::vec(0u64..640, 7),
        tail in proptest::collection::vec(0u64..64, 0..16),
    ) {
        // small words make offsets land inside the body and counts look plausible
        let mut data = FLASH_LOAN_SELECTOR.to_vec();
        for v in head.iter().chain(tail.iter()) {
            data.extend_from_slice(&word(*v));
        }
        let decoder = CallDecoder::new().with_limits(DecodeLimits { max_array_len: 32 });
        let first = decoder.decode_calldata(&data);
        let second = decoder.decode_calldata(&data);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arbitrary_strings_never_panic(s in "\\PC{0,80}") {
        let _ = CallDecoder::new().decode_hex(&s);
    }
}
