use embedded_graphics::mock_display::MockDisplay;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use ledwatch::system::{BatteryStatus, FaceConfig, HourSetting, TimeManager, TimeReference};
use ledwatch::theme::{AccentColor, MemoryStore, ThemeMode};
use ledwatch::ui::{raster, SegmentMetrics, Slot};
use ledwatch::LedWatchFace;

/// Sunday 2013-06-30 10:58:50 UTC
const FROZEN_EPOCH_MS: i64 = 1_372_589_930_000;

fn clock(uptime_ms: u64) -> TimeManager {
    let mut time = TimeManager::init();
    time.set_time(TimeReference::from_unix_millis(FROZEN_EPOCH_MS, uptime_ms).unwrap());
    time
}

fn visible_face(store: MemoryStore, now: u64) -> LedWatchFace<MemoryStore, SegmentMetrics> {
    let mut face = LedWatchFace::new(FaceConfig::default(), store, SegmentMetrics);
    face.on_create();
    face.on_surface_changed(390.0, 390.0, 2.0, true).unwrap();
    face.on_visibility_changed(true, now);
    face
}

#[test]
fn frozen_clock_renders_every_field() {
    let time = clock(0);
    let now = time.local_millis(0);
    let mut face = visible_face(MemoryStore::new(), now);
    face.set_hour_setting(HourSetting::H24);
    assert!(face.take_redraw());

    let frame = face
        .draw(time.sample(0), BatteryStatus::new(89, 100))
        .unwrap();
    assert_eq!(frame.text_in(Slot::Left), Some("10"));
    assert_eq!(frame.text_in(Slot::Right), Some("58"));
    assert!(frame.is_colon_visible());
    assert_eq!(frame.text_in(Slot::BottomRight), Some("!50"));
    assert!(frame.text_in(Slot::BottomLeft).unwrap().ends_with("89%"));
    assert_eq!(frame.text_in(Slot::TopLeft), Some("SUN"));
    assert_eq!(frame.text_in(Slot::TopRight), Some("!30"));
    assert_eq!(frame.text_in(Slot::AmPm), None);

    // Colon hides from 400ms into the second
    let frame = face.draw(time.sample(450), BatteryStatus::new(89, 100)).unwrap();
    assert!(!frame.is_colon_visible());
    let frame = face.draw(time.sample(1_399), BatteryStatus::new(89, 100)).unwrap();
    assert!(frame.is_colon_visible());
}

#[test]
fn ticks_land_on_half_seconds() {
    let time = clock(0);
    let start = time.local_millis(120);
    let mut face = visible_face(MemoryStore::new(), start);
    assert_eq!(face.next_wake(), Some(start + 380));

    face.take_redraw();
    assert!(!face.on_timer(start + 379));
    assert!(face.on_timer(start + 380));
    assert!(face.take_redraw());
    assert_eq!(face.next_wake(), Some(start + 880));
}

#[test]
fn theme_survives_restart() {
    let mut face = visible_face(MemoryStore::new(), 0);
    let middle = face.layout().unwrap().middle.y - 10.0;

    // Three taps in the middle: next theme mode
    for t in [0, 120, 240] {
        face.on_tap(195.0, middle, t);
    }
    face.on_timer(740);
    assert_eq!(face.theme().mode(), ThemeMode::Lcd);

    // Two taps: next accent for LCD
    face.on_tap(195.0, middle, 2_000);
    face.on_tap(195.0, middle, 2_100);
    face.on_timer(2_600);
    assert_eq!(face.theme().accent(), AccentColor::Red);

    face.on_destroy();
    let store = face.store().clone();
    let face = visible_face(store, 5_000);
    assert_eq!(face.theme().mode(), ThemeMode::Lcd);
    assert_eq!(face.theme().accent(), AccentColor::Red);
    assert_eq!(face.theme().accent_for(ThemeMode::Led), AccentColor::Blue);
}

#[test]
fn ambient_frames_are_white_on_black() {
    let time = clock(0);
    let mut face = visible_face(MemoryStore::new(), 0);
    face.on_properties_changed(true, false);
    face.on_ambient_mode_changed(true, 0);
    assert_eq!(face.next_wake(), Some(10_000));

    let frame = face
        .draw(time.sample(0), BatteryStatus::unavailable())
        .unwrap();
    assert_eq!(frame.background, Rgb888::BLACK);
    assert!(frame.ghost.is_none());
    assert!(frame.is_colon_visible());
    assert_eq!(frame.text_in(Slot::BottomRight), Some("\u{f005}"));
    assert_eq!(frame.text_in(Slot::BottomLeft), Some("????"));
    assert!(frame.text.iter().all(|draw| draw.paint.color == Rgb888::WHITE));
}

#[test]
fn frame_rasterises() {
    let time = clock(0);
    let mut face = LedWatchFace::new(FaceConfig::default(), MemoryStore::new(), SegmentMetrics);
    face.on_create();
    face.on_surface_changed(64.0, 64.0, 0.25, false).unwrap();

    let frame = face.draw(time.sample(0), BatteryStatus::from_percent(40)).unwrap();
    let mut display = MockDisplay::<Rgb888>::new();
    display.set_allow_overdraw(true);
    display.set_allow_out_of_bounds_drawing(true);
    raster::draw_frame(&frame, &mut display).unwrap();
    assert_eq!(display.get_pixel((0, 0).into()), Some(Rgb888::BLACK));
}
