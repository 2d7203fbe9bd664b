use faultline_ir::{SourcePos, SourceUnit};
use pretty_assertions::assert_eq;

use super::*;

fn path(p: &str) -> Arc<Path> {
    Arc::from(Path::new(p))
}

fn registry_with(units: &[(&str, &str)]) -> UnitRegistry {
    let registry = UnitRegistry::new();
    for &(name, file) in units {
        registry.register(SourceUnit::with_source(name, file, ""));
    }
    registry
}

/// Chain: innermost at `/u/a.fl`, then unknown dynamic code, then `/u/b.fl`.
fn three_frame_chain() -> Arc<FrameRecord> {
    let outer = Arc::new(FrameRecord::new(Some(path("/u/b.fl")), SourcePos::line_start(3)));
    let dynamic = Arc::new(FrameRecord::with_parent(None, SourcePos::UNKNOWN, outer));
    Arc::new(FrameRecord::with_parent(
        Some(path("/u/a.fl")),
        SourcePos::new(10, 5),
        dynamic,
    ))
}

fn origin_names(walk: FrameWalk<'_>) -> Vec<Option<String>> {
    walk.map(|origin| origin.unit().map(|id| id.name().to_string()))
        .collect()
}

#[test]
fn walks_innermost_first_with_unknown_sentinel() {
    let registry = registry_with(&[("unit_a", "/u/a.fl"), ("unit_b", "/u/b.fl")]);
    let head = three_frame_chain();

    let walk = FrameWalk::new(&registry, Some(&head));
    assert_eq!(
        origin_names(walk),
        vec![
            Some("unit_a".to_owned()),
            None,
            Some("unit_b".to_owned()),
        ]
    );
}

#[test]
fn absent_chain_is_an_empty_sequence() {
    let registry = registry_with(&[]);
    let mut walk = FrameWalk::new(&registry, None);
    assert_eq!(walk.next(), None);
}

#[test]
fn unregistered_path_is_unknown_not_an_error() {
    let registry = registry_with(&[]);
    let head = Arc::new(FrameRecord::new(Some(path("/nowhere.fl")), SourcePos::UNKNOWN));
    let origins: Vec<FrameOrigin> = FrameWalk::new(&registry, Some(&head)).collect();
    assert_eq!(origins, vec![FrameOrigin::Unknown]);
}

#[test]
fn cloning_restarts_the_remainder() {
    let registry = registry_with(&[("unit_a", "/u/a.fl"), ("unit_b", "/u/b.fl")]);
    let head = three_frame_chain();

    let mut walk = FrameWalk::new(&registry, Some(&head));
    let first = walk.next().expect("innermost frame");
    assert_eq!(
        first.unit().map(|id| id.name().as_str()),
        Some("unit_a")
    );

    // The fork and the original both see the remaining frames.
    let fork = walk.clone();
    assert_eq!(origin_names(fork), origin_names(walk));
}
