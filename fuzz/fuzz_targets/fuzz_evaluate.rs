#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spotlight_core::{
    Channel, DeviceClass, LayoutMetrics, Page, ProgressMapper, ScrollRegion, SpotlightDriver,
    preset,
};

#[derive(Debug, Arbitrary)]
struct Input {
    home: bool,
    mobile: bool,
    container_height: f64,
    viewport_height: f64,
    word_count: u8,
    progress: Vec<f64>,
    scrolls: Vec<(f64, f64)>,
}

fuzz_target!(|input: Input| {
    let page = if input.home { Page::Home } else { Page::Index };
    let device = if input.mobile {
        DeviceClass::Mobile
    } else {
        DeviceClass::Desktop
    };
    // Degenerate layouts must be rejected, never panic.
    let Ok(metrics) = LayoutMetrics::new(input.container_height, input.viewport_height) else {
        return;
    };
    let Ok(p) = preset(page, device, metrics) else {
        return;
    };
    let words = usize::from(input.word_count);
    let Ok(mapper) = ProgressMapper::new(p.table.clone()) else {
        return;
    };
    let mapper = mapper.with_word_count(words);

    for &progress in input.progress.iter().take(64) {
        let snap = mapper.evaluate(progress);
        assert_eq!(snap.words.len(), words);
        // Revealed words always form a prefix.
        let revealed = snap.revealed_words();
        assert!(snap.words[..revealed].iter().all(|&w| w));
        assert!(snap.words[revealed..].iter().all(|&w| !w));

        let table = mapper.table();
        for (channel, config) in Channel::SCALAR.into_iter().zip([
            &table.image_translate_y,
            &table.mask_size,
            &table.image_scale,
        ]) {
            let lo = config.from_value().min(config.to_value());
            let hi = config.from_value().max(config.to_value());
            let value = snap.channel(channel).unwrap_or(f64::NAN);
            assert!(value >= lo && value <= hi, "{channel} out of range: {value}");
        }
    }

    let Ok(region) = ScrollRegion::new(0.0, 1000.0) else {
        return;
    };
    let mut driver = SpotlightDriver::from_preset(mapper, &p, region);
    for &(scroll, dt) in input.scrolls.iter().take(64) {
        driver.on_scroll(scroll);
        let out = driver.frame(dt);
        assert!((0.0..=1.0).contains(&out.progress), "progress {}", out.progress);
    }
});
