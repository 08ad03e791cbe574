//! Property tests for the string builder.

use proptest::prelude::*;
use strbuf_core::StringBuilder;
use strbuf_testkit::prelude::*;

proptest! {
    #[test]
    fn content_is_concatenation(chunks in chunks_strategy()) {
        let mut sb = StringBuilder::new();
        for chunk in &chunks {
            sb.append_bytes(chunk).unwrap();
            prop_assert!(check_invariants(&sb).is_ok());
        }
        let expected = chunks.concat();
        prop_assert_eq!(sb.as_bytes(), expected.as_slice());
        prop_assert_eq!(sb.len(), chunks.iter().map(Vec::len).sum::<usize>());
    }

    #[test]
    fn ops_match_model(ops in ops_strategy()) {
        let mut sb = StringBuilder::new();
        let mut model = ModelBuffer::new();
        for op in &ops {
            let capacity_before = sb.capacity();
            apply(&mut sb, op).unwrap();
            model.apply(op);

            if let Err(violation) = check_invariants(&sb) {
                return Err(TestCaseError::fail(violation));
            }
            if *op != Op::Release {
                prop_assert!(sb.capacity() >= capacity_before);
            }
            prop_assert_eq!(sb.as_bytes(), model.content());
        }
    }

    #[test]
    fn reset_behaves_like_fresh(
        first in chunks_strategy(),
        second in chunks_strategy(),
    ) {
        let mut reused = StringBuilder::new();
        for chunk in &first {
            reused.append_bytes(chunk).unwrap();
        }
        reused.reset();
        prop_assert!(reused.as_bytes().is_empty());

        let mut fresh = StringBuilder::new();
        for chunk in &second {
            reused.append_bytes(chunk).unwrap();
            fresh.append_bytes(chunk).unwrap();
        }
        prop_assert_eq!(reused.as_bytes(), fresh.as_bytes());
    }

    #[test]
    fn release_behaves_like_fresh(
        first in chunks_strategy(),
        second in chunks_strategy(),
    ) {
        let mut reused = StringBuilder::new();
        for chunk in &first {
            reused.append_bytes(chunk).unwrap();
        }
        reused.release();
        prop_assert_eq!(reused.capacity(), 0);

        let mut fresh = StringBuilder::new();
        for chunk in &second {
            reused.append_bytes(chunk).unwrap();
            fresh.append_bytes(chunk).unwrap();
        }
        prop_assert_eq!(reused.as_bytes(), fresh.as_bytes());
        prop_assert_eq!(reused.capacity(), fresh.capacity());
    }

    #[test]
    fn first_write_sizing(len in 0usize..4096) {
        let mut sb = StringBuilder::new();
        sb.append_bytes(&vec![b'x'; len]).unwrap();
        let expected = if len <= 16 { 32 } else { len * 2 };
        prop_assert_eq!(sb.capacity(), expected);
    }
}
