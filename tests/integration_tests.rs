use slidemap::prelude::*;
use slidemap::surface::SliderSpec;
use slidemap::{FitBoundsOptions, RangeChanged};
use std::sync::{Arc, Mutex};

type Control = SliderControl<LayerMarker, MemoryViewport, MemoryLabel>;

struct Widget {
    spec: Option<SliderSpec>,
}

impl SliderWidget for Widget {
    fn configure(&mut self, spec: &SliderSpec) -> Result<()> {
        self.spec = Some(*spec);
        Ok(())
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn timeline(times: &[&str]) -> MarkerSource<LayerMarker> {
    MarkerSource::layer_group(times.iter().enumerate().map(|(i, time)| {
        LayerMarker::new(format!("m{}", i), Point::new(i as f64, i as f64 * 2.0))
            .with_option("time", *time)
            .with_popup(format!("Event {}", i))
    }))
}

fn started(config: SliderConfig, times: &[&str]) -> (Control, Widget) {
    let mut control = Control::new(config);
    control
        .mount(timeline(times), MemoryViewport::new(), MemoryLabel::new())
        .unwrap();
    let mut widget = Widget { spec: None };
    control.start(&mut widget).unwrap();
    (control, widget)
}

fn record_events(control: &mut Control) -> Arc<Mutex<Vec<Vec<String>>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    control.subscribe(move |event: &RangeChanged<'_, LayerMarker>| {
        let ids = event
            .visible
            .iter()
            .map(|record| record.payload.id().to_string())
            .collect();
        sink.lock().unwrap().push(ids);
    });
    seen
}

#[test]
fn test_cumulative_walkthrough() {
    init_logging();
    let (mut control, widget) = started(SliderConfig::default(), &["T0", "T1", "T2"]);
    let events = record_events(&mut control);

    let spec = widget.spec.unwrap();
    assert_eq!((spec.min, spec.max, spec.step), (0, 2, 1));
    assert!(!spec.range);

    control.on_slide(SliderPosition::Single(1));
    let map = control.map().unwrap();
    assert_eq!(map.active_layers(), vec!["m0", "m1"]);
    assert_eq!(control.label().unwrap().text(), "T1");
    assert_eq!(events.lock().unwrap().last().unwrap(), &vec!["m0", "m1"]);

    control.on_slide(SliderPosition::Single(0));
    assert_eq!(control.map().unwrap().active_layers(), vec!["m0"]);
    assert_eq!(control.label().unwrap().text(), "T0");
    assert_eq!(control.current_popup().unwrap().marker_id, "m0");
    assert_eq!(events.lock().unwrap().len(), 2);
}

#[test]
fn test_range_follow_and_same_date() {
    let times = ["2020", "2020", "2021", "2022", "2022", "2023"];

    let (mut range, widget) = started(SliderConfig::new().with_range(true), &times);
    assert!(widget.spec.unwrap().range);
    range.on_slide(SliderPosition::Range(2, 4));
    assert_eq!(range.map().unwrap().active_layers(), vec!["m2", "m3", "m4"]);
    assert_eq!(range.label().unwrap().text(), "2022");

    let (mut follow, _) = started(SliderConfig::new().with_follow(2), &times);
    follow.on_slide(SliderPosition::Single(5));
    assert_eq!(follow.map().unwrap().active_layers(), vec!["m4", "m5"]);
    follow.on_slide(SliderPosition::Single(0));
    assert_eq!(follow.map().unwrap().active_layers(), vec!["m0"]);

    let (mut same_date, _) = started(SliderConfig::new().with_same_date(true), &times);
    same_date.on_slide(SliderPosition::Single(4));
    assert_eq!(same_date.map().unwrap().active_layers(), vec!["m3", "m4"]);
    same_date.on_slide(SliderPosition::Single(1));
    assert_eq!(same_date.map().unwrap().active_layers(), vec!["m0", "m1"]);
}

#[test]
fn test_show_all_on_start_with_refit() {
    let config = SliderConfig::new()
        .with_show_all_on_start(true)
        .with_rezoom(10);
    let (control, widget) = started(config, &["T0", "T1", "T2"]);

    assert_eq!(widget.spec.unwrap().position, SliderPosition::Single(2));
    assert_eq!(control.map().unwrap().active_layers().len(), 3);

    let fits = control.map().unwrap().fits();
    assert_eq!(fits.len(), 1);
    let (rect, options) = fits[0];
    assert_eq!(options, FitBoundsOptions { max_zoom: 10 });
    assert_eq!(rect.min().x, 0.0);
    assert_eq!(rect.max().x, 2.0);
    assert_eq!(rect.max().y, 4.0);
}

#[test]
fn test_failing_layer_does_not_stop_render() {
    init_logging();
    let mut control = Control::new(SliderConfig::default());
    let mut map = MemoryViewport::new();
    map.fail_on("m1");
    control
        .mount(timeline(&["T0", "T1", "T2"]), map, MemoryLabel::new())
        .unwrap();
    control.start(&mut Widget { spec: None }).unwrap();
    let events = record_events(&mut control);

    let report = control.on_slide(SliderPosition::Single(2)).unwrap();
    assert_eq!(report.failures, 1);
    assert_eq!(report.added, 1);
    assert_eq!(control.map().unwrap().active_layers(), vec!["m0", "m2"]);
    assert_eq!(control.label().unwrap().text(), "T2");
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn test_failed_remove_is_retried_until_unmount() {
    init_logging();
    let (mut control, _) = started(SliderConfig::default(), &["T0", "T1", "T2"]);
    control.on_slide(SliderPosition::Single(2));

    control.map_mut().unwrap().fail_times("m2", 1);
    let report = control.on_slide(SliderPosition::Single(0)).unwrap();
    assert_eq!(report.failures, 1);
    assert_eq!(report.shown, vec![0, 2]);
    assert_eq!(control.map().unwrap().active_layers(), vec!["m0", "m2"]);

    let report = control.on_slide(SliderPosition::Single(1)).unwrap();
    assert_eq!(report.removed, 1);
    assert_eq!(control.map().unwrap().active_layers(), vec!["m0", "m1"]);

    let (map, _) = control.unmount().unwrap();
    assert!(map.active_layers().is_empty());
}

#[test]
fn test_failed_remove_is_released_by_unmount() {
    let (mut control, _) = started(SliderConfig::default(), &["T0", "T1", "T2"]);
    control.on_slide(SliderPosition::Single(1));

    control.map_mut().unwrap().fail_times("m1", 1);
    control.on_slide(SliderPosition::Single(0));
    assert!(control.map().unwrap().is_active("m1"));

    let (map, _) = control.unmount().unwrap();
    assert!(map.active_layers().is_empty());
}

#[test]
fn test_failed_add_is_retried() {
    let (mut control, _) = started(SliderConfig::default(), &["T0", "T1", "T2"]);
    control.map_mut().unwrap().fail_times("m1", 1);

    control.on_slide(SliderPosition::Single(1));
    assert_eq!(control.map().unwrap().active_layers(), vec!["m0"]);

    let report = control.on_slide(SliderPosition::Single(1)).unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(control.map().unwrap().active_layers(), vec!["m0", "m1"]);
}

#[test]
fn test_unmount_leaves_map_clean() {
    let (mut control, _) = started(SliderConfig::default(), &["T0", "T1", "T2"]);
    control.on_slide(SliderPosition::Single(2));

    let (map, label) = control.unmount().unwrap();
    assert!(map.active_layers().is_empty());
    assert!(!map.pointer_listener_attached());
    assert!(!label.is_visible());

    assert!(control.on_slide(SliderPosition::Single(1)).is_none());
    assert!(control.label().is_none());
    assert!(control.unmount().is_none());
}

#[test]
fn test_pointer_release_and_popups() {
    let config = SliderConfig::new().with_show_popups(true);
    let (mut control, _) = started(config, &["T0", "T1", "T2"]);

    control.on_slide(SliderPosition::Single(2));
    assert_eq!(control.current_popup().unwrap().content, "Event 2");
    let opens: Vec<usize> = control
        .index()
        .unwrap()
        .iter()
        .map(|record| record.payload.popup_open_count())
        .collect();
    assert_eq!(opens, vec![2, 1, 1]);

    control.pointer_released();
    assert!(!control.label().unwrap().is_visible());

    control.close_popup();
    assert!(control.current_popup().is_none());
}

#[test]
fn test_explicit_entries_keep_configured_bounds() {
    let entries = (0..4).map(|i| {
        MarkerEntry::with_time(
            LayerMarker::new(format!("e{}", i), Point::new(0.0, 0.0)),
            format!("day {}", i),
        )
    });
    let mut control = Control::new(SliderConfig::new().with_bounds(1, 3).with_value(1));
    control
        .mount(
            MarkerSource::entries(entries),
            MemoryViewport::new(),
            MemoryLabel::new(),
        )
        .unwrap();
    control.start(&mut Widget { spec: None }).unwrap();
    assert_eq!(control.map().unwrap().active_layers(), vec!["e1"]);

    control.on_slide(SliderPosition::Single(3));
    assert_eq!(control.map().unwrap().active_layers(), vec!["e1", "e2", "e3"]);
    assert_eq!(control.label().unwrap().text(), "day 3");
}

#[test]
fn test_config_from_json_drives_control() {
    let config = SliderConfig::from_json_str(
        r#"{ "follow": true, "followWindowSize": 2, "timeAttribute": "when", "showPopups": false }"#,
    )
    .unwrap();

    let markers = (0..5).map(|i| {
        LayerMarker::new(format!("m{}", i), Point::new(0.0, 0.0)).with_option("when", 100 + i)
    });
    let mut control = Control::new(config).with_formatter(
        |value: Option<&TimeValue>, config: &SliderConfig| match value {
            Some(value) => format!("{}={}", config.time_attribute, value),
            None => "unknown".to_string(),
        },
    );
    control
        .mount(
            MarkerSource::layer_group(markers),
            MemoryViewport::new(),
            MemoryLabel::new(),
        )
        .unwrap();
    control.start(&mut Widget { spec: None }).unwrap();

    control.on_slide(SliderPosition::Single(3));
    assert_eq!(control.map().unwrap().active_layers(), vec!["m2", "m3"]);
    assert_eq!(control.label().unwrap().text(), "when=103");
    assert!(control.current_popup().is_none());
    assert_eq!(control.map().unwrap().popups_closed(), 0);
}

#[cfg(feature = "geojson")]
#[test]
fn test_geojson_feature_collection() {
    let collection: geojson::FeatureCollection = serde_json::from_str(
        r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "id": "a", "geometry": { "type": "Point", "coordinates": [10.0, 50.0] }, "properties": { "time": "2021-01-01", "name": "first" } },
                { "type": "Feature", "id": "b", "geometry": { "type": "Point", "coordinates": [11.0, 51.0] }, "properties": { "time": "2021-01-02", "name": "second" } },
                { "type": "Feature", "id": "c", "geometry": { "type": "Point", "coordinates": [12.0, 52.0] }, "properties": { "time": "2021-01-02", "name": "third" } }
            ]
        }"#,
    )
    .unwrap();

    let markers: Vec<FeatureMarker> = collection
        .features
        .into_iter()
        .map(|feature| {
            FeatureMarker::from_feature(feature)
                .unwrap()
                .with_popup_property("name")
        })
        .collect();

    let mut control: SliderControl<FeatureMarker, MemoryViewport, MemoryLabel> =
        SliderControl::new(SliderConfig::new().with_same_date(true).with_rezoom(8));
    control
        .mount(
            MarkerSource::layer_group(markers),
            MemoryViewport::new(),
            MemoryLabel::new(),
        )
        .unwrap();
    control.start(&mut Widget { spec: None }).unwrap();

    control.on_slide(SliderPosition::Single(2));
    let map = control.map().unwrap();
    assert_eq!(map.active_layers(), vec!["b", "c"]);
    assert_eq!(control.label().unwrap().text(), "2021-01-02");
    assert_eq!(control.current_popup().unwrap().content, "third");

    let (rect, _) = *map.fits().last().unwrap();
    assert_eq!(rect.min().x, 11.0);
    assert_eq!(rect.max().y, 52.0);
}
