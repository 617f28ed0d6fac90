//! End-to-end flow over the heatmap crate: append survey samples through
//! the store, read a series back, and render it over a floor plan.

use image::{Rgb, RgbImage};
use tempfile::TempDir;

use wifi_surveyor_core::traits::SampleStore;
use wifi_surveyor_core::types::{Band, BssidId, Category, ChannelTally, NetworkObservation};
use wifi_surveyor_heatmap::{
    turbo_lut, HeatmapRenderer, JsonSampleStore, MapLibrary, ValueRange, SIGNAL_RANGE,
};

fn observation(ssid: &str, mac: &str, signal_dbm: f64, band: Band) -> NetworkObservation {
    NetworkObservation {
        ssid: ssid.to_owned(),
        bssid: BssidId::parse(mac).unwrap(),
        signal_dbm,
        band,
    }
}

#[test]
fn sample_then_render_office_map() {
    let dir = TempDir::new().unwrap();
    let maps_dir = dir.path().join("maps");
    std::fs::create_dir_all(&maps_dir).unwrap();
    RgbImage::from_pixel(600, 600, Rgb([255, 255, 255]))
        .save(maps_dir.join("office.png"))
        .unwrap();

    let store = JsonSampleStore::new(dir.path().join("data"));

    // Two survey clicks: a strong corner and a weak corner.
    store
        .append_signal(
            "office",
            10,
            10,
            &[observation("Lab", "aa:bb:cc:dd:ee:01", -30.0, Band::Band5GHz)],
        )
        .unwrap();
    store
        .append_signal(
            "office",
            500,
            500,
            &[observation("Lab", "aa:bb:cc:dd:ee:01", -90.0, Band::Band5GHz)],
        )
        .unwrap();

    let mut tally = ChannelTally::new();
    tally.insert(36, 3);
    store.append_channels("office", 10, 10, &tally).unwrap();

    // The checklist a UI would show.
    assert_eq!(store.keys("office", Category::Signal), vec!["Lab [5GHz]"]);
    assert_eq!(store.keys("office", Category::Channel), vec!["Channel_36"]);

    // Render the signal series over the floor plan.
    let library = MapLibrary::new(&maps_dir);
    let base = library.find("office").unwrap();
    let series = store.series("office", Category::Signal, "Lab [5GHz]");
    assert_eq!(series.len(), 2);

    let renderer = HeatmapRenderer::new(dir.path().join("generated"));
    let artifact = renderer.render(&series, &base, SIGNAL_RANGE).unwrap();

    assert!(artifact.path.exists());
    assert_eq!(artifact.samples, series);

    // The strong corner ends hot, the weak corner stays at the bottom of
    // the color table, and the middle sits between them.
    let overlay = image::open(&artifact.path).unwrap().to_rgb8();
    let hot = overlay.get_pixel(10, 10);
    let cold = overlay.get_pixel(500, 500);
    let mid = overlay.get_pixel(255, 255);

    assert!(
        hot[1] > cold[1] + 40,
        "hot {hot:?} should be clearly greener than cold {cold:?}"
    );
    assert!(mid[1] <= hot[1] + 5 && mid[1] + 5 >= cold[1]);

    // The cold corner approximates the coolest blend color (JPEG noise
    // allowed for).
    let lut0 = turbo_lut()[0];
    let expected_cold_green = 0.6 * f64::from(lut0[1]) + 0.4 * 255.0;
    assert!((f64::from(cold[1]) - expected_cold_green).abs() < 16.0);
}

#[test]
fn channel_series_render_uses_congestion_range() {
    let dir = TempDir::new().unwrap();
    let maps_dir = dir.path().join("maps");
    std::fs::create_dir_all(&maps_dir).unwrap();
    RgbImage::from_pixel(200, 200, Rgb([128, 128, 128]))
        .save(maps_dir.join("floor.png"))
        .unwrap();

    let store = JsonSampleStore::new(dir.path().join("data"));
    let mut tally = ChannelTally::new();
    tally.insert(6, 20);
    store.append_channels("floor", 100, 100, &tally).unwrap();

    let series = store.series("floor", Category::Channel, "Channel_6");
    let renderer = HeatmapRenderer::new(dir.path().join("generated"));
    let artifact = renderer
        .render(
            &series,
            &MapLibrary::new(&maps_dir).find("floor").unwrap(),
            ValueRange::for_category(Category::Channel),
        )
        .unwrap();

    // 20 APs saturates the congestion range, so the click point is hot.
    let overlay = image::open(&artifact.path).unwrap().to_rgb8();
    let hot = overlay.get_pixel(100, 100);
    let corner = overlay.get_pixel(5, 195);
    assert!(hot[1] > corner[1] + 40);
}
