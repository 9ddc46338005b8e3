#![no_main]

use libfuzzer_sys::fuzz_target;
use reveal_core::Flag;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let flag = Flag::coerce_str(raw);
    let parsed: Flag = raw.parse().unwrap_or(Flag::OFF);
    assert_eq!(flag, parsed, "FromStr disagrees with coerce_str");

    // Padding and case never change the result.
    let padded = format!("  {}\t", raw.to_ascii_uppercase());
    assert_eq!(Flag::coerce_str(&padded), flag, "normalization changed {raw:?}");
});
