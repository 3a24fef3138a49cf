use super::*;
use crate::consts::GRID_SIZE;

#[test]
fn option_sets_depend_only_on_count() {
    assert_eq!(GridLayout::options_for(0), &[] as &[GridLayout]);
    assert_eq!(GridLayout::options_for(1), &[GridLayout::Single]);
    assert_eq!(GridLayout::options_for(2), &[GridLayout::OverlaySmall, GridLayout::Stacked]);
    assert_eq!(
        GridLayout::options_for(3),
        &[GridLayout::TwoInsets, GridLayout::MainLeft, GridLayout::MainTop]
    );
    assert!(GridLayout::options_for(4).is_empty());
}

#[test]
fn options_match_image_count() {
    for count in 1..=3 {
        for layout in GridLayout::options_for(count) {
            assert_eq!(layout.image_count(), count);
        }
    }
}

#[test]
fn ids_round_trip() {
    for layout in GridLayout::ALL {
        assert_eq!(GridLayout::parse(layout.id()), Some(layout));
        assert_eq!(layout.to_string(), layout.id());
    }
    assert_eq!(GridLayout::parse(" grid-3b "), Some(GridLayout::MainLeft));
    assert_eq!(GridLayout::parse("grid-4"), None);
}

#[test]
fn resolve_keeps_valid_choice() {
    assert_eq!(GridLayout::resolve(Some(GridLayout::Stacked), 2), Some(GridLayout::Stacked));
}

#[test]
fn resolve_falls_back_to_first_option() {
    assert_eq!(GridLayout::resolve(Some(GridLayout::MainTop), 2), Some(GridLayout::OverlaySmall));
    assert_eq!(GridLayout::resolve(Some(GridLayout::Single), 3), Some(GridLayout::TwoInsets));
    assert_eq!(GridLayout::resolve(None, 1), Some(GridLayout::Single));
}

#[test]
fn resolve_without_images_is_none() {
    assert_eq!(GridLayout::resolve(Some(GridLayout::Single), 0), None);
    assert_eq!(GridLayout::resolve(None, 0), None);
}

#[test]
fn regions_fit_the_square_and_are_z_sorted() {
    for layout in GridLayout::ALL {
        let regions = layout.regions();
        assert_eq!(regions.len(), layout.image_count());
        assert_eq!(regions[0].key, RegionKey::Main);
        for pair in regions.windows(2) {
            assert!(pair[0].z <= pair[1].z);
        }
        for r in regions {
            assert!(r.x + r.width <= GRID_SIZE);
            assert!(r.y + r.height <= GRID_SIZE);
            assert!(r.key.image_index() < layout.image_count());
        }
    }
}

#[test]
fn overlay_small_inset_geometry() {
    let inset = GridLayout::OverlaySmall.regions()[1];
    assert_eq!(inset.key, RegionKey::Img2);
    assert_eq!((inset.x, inset.y, inset.width, inset.height), (680, 680, 360, 360));
    assert_eq!(inset.radius, 24);
    assert_eq!(inset.border, 6);
    assert_eq!(inset.z, 1);
}

#[test]
fn split_layouts_leave_gutters() {
    let stacked = GridLayout::Stacked.regions();
    assert_eq!(stacked[1].y - (stacked[0].y + stacked[0].height), 8);

    let left = GridLayout::MainLeft.regions();
    assert_eq!(left[1].x - left[0].width, 8);
    assert_eq!((left[2].x, left[2].y), (544, 544));
}
