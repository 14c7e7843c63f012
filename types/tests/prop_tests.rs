use proptest::prelude::*;

use solvault_types::{Base58Secret, ChatId, Lamports, LAMPORTS_PER_SOL};

proptest! {
    /// Lamports raw roundtrip.
    #[test]
    fn lamports_raw_roundtrip(raw in 0u64..u64::MAX) {
        let amount = Lamports::new(raw);
        prop_assert_eq!(amount.raw(), raw);
    }

    /// Lamports: checked_add(a, b) == Some(a + b) when no overflow.
    #[test]
    fn lamports_checked_add(a in 0u64..u64::MAX / 2, b in 0u64..u64::MAX / 2) {
        let sum = Lamports::new(a).checked_add(Lamports::new(b));
        prop_assert_eq!(sum, Some(Lamports::new(a + b)));
    }

    /// Lamports: checked_sub returns None when b > a.
    #[test]
    fn lamports_checked_sub_underflow(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let result = Lamports::new(a).checked_sub(Lamports::new(b));
        if b > a {
            prop_assert!(result.is_none());
        } else {
            prop_assert_eq!(result, Some(Lamports::new(a - b)));
        }
    }

    /// Lamports: saturating_sub never panics and returns ZERO on underflow.
    #[test]
    fn lamports_saturating_sub(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let result = Lamports::new(a).saturating_sub(Lamports::new(b));
        if b > a {
            prop_assert_eq!(result, Lamports::ZERO);
        } else {
            prop_assert_eq!(result, Lamports::new(a - b));
        }
    }

    /// Lamports ordering agrees with the raw values.
    #[test]
    fn lamports_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        prop_assert_eq!(Lamports::new(a) <= Lamports::new(b), a <= b);
        prop_assert_eq!(Lamports::new(a) == Lamports::new(b), a == b);
    }

    /// is_dust is a cutoff at the dust threshold, nowhere else.
    #[test]
    fn lamports_dust_cutoff(raw in 0u64..1_000_000) {
        prop_assert_eq!(Lamports::new(raw).is_dust(), raw <= Lamports::DUST_THRESHOLD.raw());
    }

    /// Whole-SOL amounts render with exactly two decimals.
    #[test]
    fn lamports_whole_sol_formats_exact(sol in 0u64..1_000_000) {
        let amount = Lamports::new(sol * LAMPORTS_PER_SOL);
        prop_assert_eq!(amount.format_sol(), format!("{sol}.00"));
    }

    /// Lamports bincode serialization roundtrip.
    #[test]
    fn lamports_bincode_roundtrip(raw in 0u64..u64::MAX) {
        let amount = Lamports::new(raw);
        let encoded = bincode::serialize(&amount).unwrap();
        let decoded: Lamports = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, amount);
    }

    /// ChatId bincode serialization roundtrip, negative ids included.
    #[test]
    fn chat_id_bincode_roundtrip(raw in i64::MIN..i64::MAX) {
        let chat = ChatId::new(raw);
        let encoded = bincode::serialize(&chat).unwrap();
        let decoded: ChatId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, chat);
    }

    /// Base58Secret survives the storage encoding without leaking into Debug.
    #[test]
    fn secret_bincode_roundtrip(plain in "[1-9A-HJ-NP-Za-km-z]{16,88}") {
        let secret = Base58Secret::new(plain.clone());
        let encoded = bincode::serialize(&secret).unwrap();
        let decoded: Base58Secret = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.reveal(), plain.as_str());
        prop_assert!(!format!("{:?}", secret).contains(&plain));
    }
}
