use serde_json::json;
use uuid::Uuid;

use crate::{
    chart::{
        selection::{LayerCategory, UiSelection},
        session::{ChartSession, MapRenderer},
        DrawCommand, OverlayRegistry,
    },
    config::ChartConfig,
    error::ChartError,
    loaders::tables::ChartTables,
    overlay::{OverlayKind, RouteType},
};

fn sample_tables() -> ChartTables {
    serde_json::from_value(json!({
        "sectors": [
            {"name": "Sector 1", "coordinates": [["013112N", "1035936E"], ["020000N", "1040000E"], ["013000N", "1043000E"], ["013112N", "1035936E"]], "style": {"fillColor": "mediumslateblue"}, "group": "SG FIR"},
            {"name": "Sector 8", "coordinates": [["010000N", "1030000E"], ["013000N", "1033000E"], ["010000N", "1030000E"]], "style": {"fillColor": "navajowhite", "opacity": 0.4}}
        ],
        "firs": [
            {"name": "SINGAPORE FIR", "coordinates": [["011543N", "1032139E"], ["070000N", "1080000E"], ["011543N", "1032139E"]], "label": {"lat": 6.5, "lon": 111.0}},
            {"name": "JAKARTA FIR (DELEGATED)", "coordinates": [["000000N", "1040000E"], ["010000N", "1050000E"]], "style": {"lineColor": "grey"}}
        ],
        "airports": [
            {"name": "Singapore Changi Airport", "code": "WSSS", "lat": 1.359167, "lon": 103.989444, "group": "changi"},
            {"name": "Seletar Airport", "code": "WSSL", "lat": 1.416944, "lon": 103.8675}
        ],
        "runways": [
            {"name": "RWY 02L/20R", "lat": [1.33, 1.37, 1.37, 1.33], "lon": [103.98, 104.0, 104.001, 103.981], "group": "changi"},
            {"name": "RWY 02R/20L", "lat": [1.34, 1.38], "lon": [103.99, 104.01], "active": false, "group": "changi"}
        ],
        "waypoints": [
            {"name": "ABVIP", "lat": "012000N", "lon": "1040000E"},
            {"name": "KEXAS", "lat": "020000N", "lon": "1030000E"}
        ],
        "procedureWaypoints": {
            "ARAMA": ["020000N", "1040000E"],
            "BOBAG": ["013000N", "1040000E"],
            "ANITO": ["010000N", "1050000E"]
        },
        "stars": {
            "ARAMA 1A": ["ARAMA", "BOBAG"],
            "LEBIN 1A": ["LEBIN", "NOWHERE"]
        },
        "sids": {
            "ANITO 1C": ["ANITO"]
        },
        "runwayProcedures": [
            {"runway": "02L", "stars": ["ARAMA 1A", "LEBIN 1A", "MISSING 1A"], "sids": ["ANITO 1C"]},
            {"runway": "20C", "stars": ["ARAMA 1A"], "sids": ["ANITO 1C"]}
        ]
    }))
    .unwrap()
}

fn sample_registry() -> OverlayRegistry {
    OverlayRegistry::try_from_tables(&sample_tables(), &ChartConfig::default()).unwrap()
}

fn visible_names(registry: &OverlayRegistry, kind: OverlayKind) -> Vec<String> {
    registry.iter().filter(|o| o.kind == kind && o.is_visible()).map(|o| o.name.to_string()).collect()
}

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<Vec<(Uuid, String, bool)>>,
}

impl MapRenderer for RecordingRenderer {
    fn render(&mut self, commands: &[DrawCommand<'_>]) {
        self.frames.push(commands.iter().map(|c| (c.id, c.name.to_string(), c.visible)).collect());
    }
}

#[test]
fn registry_builds_every_table() {
    let registry = sample_registry();
    let count = |kind: OverlayKind| registry.overlays().iter().filter(|o| o.kind == kind).count();

    assert_eq!(count(OverlayKind::Sector), 2);
    // two boundaries plus one caption
    assert_eq!(count(OverlayKind::FirBoundary), 3);
    assert_eq!(count(OverlayKind::Airport), 2);
    assert_eq!(count(OverlayKind::Runway), 2);
    assert_eq!(count(OverlayKind::Waypoint), 2);
    // LEBIN 1A has no known waypoint and MISSING 1A no route
    assert_eq!(count(OverlayKind::Procedure), 4);
    // restricted runway, map version, holding fix, DME
    assert_eq!(count(OverlayKind::Note), 4);
    assert_eq!(registry.runways(), &["02L".to_string(), "20C".to_string()]);
}

#[test]
fn overlays_keep_their_tags() {
    let registry = sample_registry();
    let airport = registry.overlays().iter().find(|o| o.kind == OverlayKind::Airport).unwrap();
    assert_eq!(airport.name, "Singapore Changi Airport (WSSS)");
    assert_eq!(airport.group.as_deref(), Some("changi"));

    let restricted = registry.overlays().iter().find(|o| o.name == "RWY 02R/20L").unwrap();
    assert_eq!(restricted.style.line_color.as_deref(), Some("red"));

    let kexas = registry.overlays().iter().find(|o| o.name == "KEXAS").unwrap();
    assert_eq!(kexas.style.marker_color.as_deref(), Some("orangered"));
    assert_eq!(kexas.style.marker_size, Some(12_f64));

    let delegated = registry.overlays().iter().find(|o| o.name == "JAKARTA FIR (DELEGATED)").unwrap();
    assert_eq!(delegated.style.line_color.as_deref(), Some("grey"));

    let sids = registry
        .overlays()
        .iter()
        .filter(|o| o.route.as_ref().map(|r| r.route_type) == Some(RouteType::Sid))
        .count();
    assert_eq!(sids, 2);
}

#[test]
fn default_selection_comes_from_config() {
    let registry = sample_registry();
    let sel = registry.default_selection();
    assert_eq!(sel.arrival_runway.as_deref(), Some("02L"));
    // fewer than five runways, the last one is used
    assert_eq!(sel.departure_runway.as_deref(), Some("20C"));
    assert_eq!(sel.radius_nm, Some(50_f64));

    assert_eq!(visible_names(&registry, OverlayKind::Sector), Vec::<String>::new());
    assert_eq!(visible_names(&registry, OverlayKind::Airport).len(), 2);
    assert_eq!(visible_names(&registry, OverlayKind::FirBoundary).len(), 3);
    assert!(visible_names(&registry, OverlayKind::Waypoint).is_empty());
    assert_eq!(visible_names(&registry, OverlayKind::RadiusRing), vec!["50 NM Radius Circle".to_string()]);
}

#[test]
fn procedures_follow_runway_dropdowns() {
    let mut registry = sample_registry();
    registry.apply_selection(&UiSelection::new(Some("02L"), Some("02L"), [LayerCategory::Aerodrome], Some(50_f64)));

    let shown = registry
        .iter()
        .filter(|o| o.kind == OverlayKind::Procedure && o.is_visible())
        .map(|o| (o.name.to_string(), o.route.as_ref().unwrap().runway.to_string()))
        .collect::<Vec<_>>();
    assert_eq!(shown, vec![("ARAMA 1A".to_string(), "02L".to_string()), ("ANITO 1C".to_string(), "02L".to_string())]);

    registry.apply_selection(&UiSelection::new(Some("20C"), None, [LayerCategory::Aerodrome], Some(50_f64)));
    let shown = registry
        .iter()
        .filter(|o| o.kind == OverlayKind::Procedure && o.is_visible())
        .map(|o| o.route.as_ref().unwrap().clone())
        .collect::<Vec<_>>();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].runway, "20C");
    assert_eq!(shown[0].route_type, RouteType::Star);
}

#[test]
fn layer_toggles_apply_to_whole_categories() {
    let mut registry = sample_registry();
    registry.apply_selection(&UiSelection::new(None, None, [LayerCategory::Sector, LayerCategory::Waypoint], None));

    assert_eq!(visible_names(&registry, OverlayKind::Sector).len(), 2);
    assert_eq!(visible_names(&registry, OverlayKind::Waypoint).len(), 2);
    assert!(visible_names(&registry, OverlayKind::Airport).is_empty());
    assert!(visible_names(&registry, OverlayKind::Runway).is_empty());
    assert!(visible_names(&registry, OverlayKind::FirBoundary).is_empty());
    assert!(visible_names(&registry, OverlayKind::Procedure).is_empty());
    assert_eq!(visible_names(&registry, OverlayKind::Note).len(), 4);
}

#[test]
fn ring_is_replaced_not_accumulated() {
    let mut registry = sample_registry();
    for nm in [10_f64, 20_f64, 30_f64] {
        registry.apply_selection(&UiSelection::new(None, None, [LayerCategory::Fir], Some(nm)));
    }

    let rings = registry.iter().filter(|o| o.kind == OverlayKind::RadiusRing).collect::<Vec<_>>();
    assert_eq!(rings.len(), 1);
    assert_eq!(rings[0].name, "30 NM Radius Circle");
    assert_eq!(rings[0].geometry.len(), 101);
    assert!(rings[0].is_visible());
}

#[test]
fn invalid_radius_keeps_previous_ring_unchanged() {
    let mut registry = sample_registry();
    let before = serde_json::to_string(registry.ring().unwrap()).unwrap();

    for radius in [Some(-5_f64), Some(f64::NAN), None] {
        registry.apply_selection(&UiSelection::new(Some("02L"), None, [LayerCategory::Sector], radius));
        assert_eq!(serde_json::to_string(registry.ring().unwrap()).unwrap(), before);
    }
    assert!(!registry.set_radius(Some(-1_f64)));
    assert_eq!(serde_json::to_string(registry.ring().unwrap()).unwrap(), before);
}

#[test]
fn ring_is_centred_on_reference_airport() {
    let config = ChartConfig { ring_reference: "WSSL".to_string(), ..Default::default() };
    let registry = OverlayRegistry::try_from_tables(&sample_tables(), &config).unwrap();
    assert_eq!(registry.ring_reference().lat, 1.416944);
    let ring = registry.ring().unwrap();
    assert!((ring.geometry[0].lon - (103.8675 + 50_f64 / 60_f64)).abs() < 1e-9);
}

#[test]
fn repeated_procedure_entries_build_one_overlay() {
    let mut tables = sample_tables();
    let repeated = tables.runway_procedures[0].clone();
    tables.runway_procedures.push(repeated);
    tables.runway_procedures[1].stars.push("ARAMA 1A".to_string());

    let registry = OverlayRegistry::try_from_tables(&tables, &ChartConfig::default()).unwrap();
    let count = |runway: &str| {
        registry
            .overlays()
            .iter()
            .filter(|o| o.name == "ARAMA 1A" && o.route.as_ref().is_some_and(|r| r.runway == runway && r.route_type == RouteType::Star))
            .count()
    };

    assert_eq!(count("02L"), 1);
    assert_eq!(count("20C"), 1);
    assert_eq!(registry.overlays().iter().filter(|o| o.kind == OverlayKind::Procedure).count(), 4);
    assert_eq!(registry.runways(), &["02L".to_string(), "20C".to_string()]);
}

#[test]
fn unknown_reference_airport_is_an_error() {
    let config = ChartConfig { ring_reference: "ZZZZ".to_string(), ..Default::default() };
    let err = OverlayRegistry::try_from_tables(&sample_tables(), &config).unwrap_err();
    assert_eq!(err, ChartError::UnknownReference("ZZZZ".to_string()));
}

#[test]
fn malformed_entry_is_named_in_the_error() {
    let mut tables = sample_tables();
    tables.sectors[1].coordinates[1].0 = "01300N".to_string();

    let err = OverlayRegistry::try_from_tables(&tables, &ChartConfig::default()).unwrap_err();
    match &err {
        ChartError::Table { entry, source } => {
            assert_eq!(entry, "sector Sector 8");
            assert!(matches!(**source, ChartError::Format { .. }));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("Sector 8"));
}

#[test]
fn session_renders_consistent_frames() {
    let registry = sample_registry();
    let mut session = ChartSession::new(registry, RecordingRenderer::default());
    session.on_selection(UiSelection::new(Some("20C"), Some("20C"), [LayerCategory::Sector], Some(25_f64)));

    let (registry, renderer) = session.into_parts();
    assert_eq!(renderer.frames.len(), 2);

    // static overlays keep their ids between frames, only the ring is new
    let (first, second) = (&renderer.frames[0], &renderer.frames[1]);
    assert_eq!(first.len(), second.len());
    let static_len = first.len() - 1;
    assert!(first[..static_len].iter().zip(&second[..static_len]).all(|(a, b)| a.0 == b.0));
    assert_ne!(first[static_len].0, second[static_len].0);
    assert_eq!(second[static_len].1, "25 NM Radius Circle");

    // the last frame matches the registry flags exactly
    let flags = registry.iter().map(|o| o.is_visible()).collect::<Vec<_>>();
    assert_eq!(second.iter().map(|c| c.2).collect::<Vec<_>>(), flags);
}

#[test]
fn feature_collection_exports_every_overlay() {
    let registry = sample_registry();
    let collection = registry.to_feature_collection().unwrap();
    assert_eq!(collection.features.len(), registry.iter().count());

    let legend_only = collection.features.iter().filter(|f| f.geometry.is_none()).count();
    assert_eq!(legend_only, 4);

    let text = serde_json::to_string(&collection).unwrap();
    assert!(text.contains("\"routeType\":\"STAR\""));
    assert!(text.contains("50 NM Radius Circle"));
}
