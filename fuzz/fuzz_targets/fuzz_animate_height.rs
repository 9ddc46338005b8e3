#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use reveal_widgets::animate_height::{AnimatedProperty, AnimationId, Settlement};
use reveal_widgets::{AnimateHeight, AnimateHeightProps, Recompute};

const WORDS: [&str; 8] = ["true", "false", "", "0", "1", "yes", "null", "maybe"];

fuzz_target!(|data: &[u8]| {
    let Some((&config, ops)) = data.split_first() else {
        return;
    };

    let props = AnimateHeightProps::new()
        .hide_height(f64::from(config & 0x0f))
        .hide(config & 0x10 != 0)
        .disabled(config & 0x20 != 0);
    let mut panel = AnimateHeight::new(props);

    for pair in ops.chunks_exact(2) {
        let (op, arg) = (pair[0], pair[1]);
        let stats = panel.stats();
        let outcome = match op % 7 {
            0 => panel.measure(f64::from(arg) * 2.0),
            1 => panel.measure(if arg & 1 == 0 { f64::NAN } else { -f64::from(arg) }),
            2 => panel.set_hide(WORDS[usize::from(arg) % WORDS.len()]),
            3 => panel.set_disabled(WORDS[usize::from(arg) % WORDS.len()]),
            4 => {
                panel.tick(Duration::from_millis(u64::from(arg)));
                continue;
            }
            5 => {
                let property = match arg % 3 {
                    0 => AnimatedProperty::Height,
                    1 => AnimatedProperty::Opacity,
                    _ => AnimatedProperty::Scale,
                };
                let id = AnimationId::new(u64::from(arg >> 2));
                panel.settle(Settlement::finished(id, property, 0.0));
                continue;
            }
            _ => {
                panel.unmount();
                continue;
            }
        };

        if !panel.is_mounted() {
            assert_eq!(outcome, Recompute::Discarded);
            assert_eq!(panel.stats(), stats, "state changed after unmount");
        }
        if let Recompute::Retargeted(request) = outcome {
            assert!(request.to.is_finite() && request.to >= 0.0);
            assert_eq!(panel.current_target(), request.to);
        }
        assert!(panel.stats().settled <= panel.stats().retargets);

        let layout = panel.layout();
        if panel.props().disabled.get() {
            assert_eq!(layout.height, None);
        } else {
            assert!(layout.height.is_some_and(f64::is_finite));
        }
    }
});
