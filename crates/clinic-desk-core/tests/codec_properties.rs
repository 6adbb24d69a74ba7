//! Property tests for the financial annotation codec.

use clinic_desk_core::codec::{decode, encode, FINANCIAL_KEY};
use clinic_desk_core::models::FinancialRecord;
use proptest::prelude::*;

fn financial_strategy() -> impl Strategy<Value = FinancialRecord> {
    let payment_type = prop_oneof![
        Just(None),
        Just(Some("private".to_string())),
        Just(Some("insurance".to_string())),
        Just(Some("follow_up".to_string())),
        "[a-z]{3,10}".prop_map(Some),
    ];
    let insurance_name = proptest::option::of("[A-Za-z]{1,12}( [A-Za-z{}]{1,12})?");
    let amount = proptest::option::of(
        (0u32..100_000, 0u32..100).prop_map(|(units, cents)| format!("{}.{:02}", units, cents)),
    );

    (payment_type, insurance_name, amount).prop_map(|(payment_type, insurance_name, amount)| {
        FinancialRecord {
            payment_type,
            insurance_name,
            amount,
        }
        .normalized()
    })
}

fn plain_text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .,:;!?'\"\n-]{0,120}"
}

proptest! {
    #[test]
    fn prop_round_trip(text in plain_text_strategy(), financial in financial_strategy()) {
        prop_assert!(financial.is_valid());

        let decoded = decode(&encode(&text, &financial));
        prop_assert_eq!(decoded.clean_text, text);
        prop_assert_eq!(decoded.financial, Some(financial));
    }

    #[test]
    fn prop_encode_replaces(
        text in plain_text_strategy(),
        first in financial_strategy(),
        second in financial_strategy(),
    ) {
        let twice = encode(&encode(&text, &first), &second);
        prop_assert_eq!(&twice, &encode(&text, &second));

        let key = format!("\"{}\"", FINANCIAL_KEY);
        prop_assert_eq!(twice.matches(key.as_str()).count(), 1);
    }

    #[test]
    fn prop_plain_text_untouched(text in plain_text_strategy()) {
        let decoded = decode(&text);
        prop_assert_eq!(decoded.clean_text, text);
        prop_assert!(decoded.financial.is_none());
    }

    #[test]
    fn prop_decode_never_panics(text in "\\PC{0,200}") {
        let decoded = decode(&text);
        if decoded.financial.is_none() {
            prop_assert_eq!(decoded.clean_text, text);
        }
    }
}

#[test]
fn test_second_block_stays_plain_text() {
    let financial = FinancialRecord {
        payment_type: Some("private".into()),
        insurance_name: None,
        amount: Some("10".into()),
    };
    let stray = "{\"financial\":{\"amount\":\"99\"}}";
    let text = format!("{}\n{}", encode("Note", &financial), stray);

    let decoded = decode(&text);
    assert_eq!(decoded.financial, Some(financial));
    assert_eq!(decoded.clean_text, format!("Note\n{}", stray));
}
