#![no_main]
use libfuzzer_sys::fuzz_target;

use courtside_core::spec::category::CategoryEligibilityData;

// First 16 bytes pick rating and buffer; the rest is a JSON category list.
fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }
    let (head, body) = data.split_at(16);
    let mut rating_bytes = [0u8; 8];
    let mut buffer_bytes = [0u8; 8];
    rating_bytes.copy_from_slice(&head[..8]);
    buffer_bytes.copy_from_slice(&head[8..]);
    let rating = f64::from_le_bytes(rating_bytes);
    let buffer = f64::from_le_bytes(buffer_bytes);

    if let Ok(cats) = serde_json::from_slice::<Vec<CategoryEligibilityData>>(body) {
        let result = courtside_engine::eligibility::classify(&cats, Some(rating), buffer);
        assert!(result.len() == cats.len());
        assert_eq!(result.is_eligible, !result.eligible_categories.is_empty());
        let _ = courtside_engine::eligibility::classify(&cats, None, buffer);
    }
});
