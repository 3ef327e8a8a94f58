#![no_main]

//! Fuzz target for provider payload decoding.
//!
//! Arbitrary request bodies must decode to an event or an error for both
//! providers, and any decoded event must render without panicking.

use hookrelay_core::{decode, render_message, Provider};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for provider in [Provider::CircleCi, Provider::BuildKite] {
        if let Ok(event) = decode(provider, data) {
            let message = render_message(&event);
            assert!(message.contains(provider.display_name()));
        }
    }
});
