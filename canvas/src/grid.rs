//! Grid layout catalog for the 1080x1080 composite.
//!
//! Which layouts are offered is a pure function of how many slot images
//! are present. Each layout is a fixed set of regions, each filled from one
//! slot image.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use std::fmt;

/// Corner radius of inset regions.
pub const INSET_RADIUS: u32 = 24;
/// Border width drawn around inset regions.
pub const INSET_BORDER: u32 = 6;
/// Side of an inset square.
pub const INSET_SIZE: u32 = 360;
/// Colour of inset borders.
pub const INSET_BORDER_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Named layout templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridLayout {
    /// One image filling the square.
    Single,
    /// Main image with a small inset bottom right.
    OverlaySmall,
    /// Two images stacked vertically.
    Stacked,
    /// Main image with two insets along the bottom.
    TwoInsets,
    /// Main image on the left, two stacked on the right.
    MainLeft,
    /// Main image on top, two side by side below.
    MainTop,
}

/// Which slot image fills a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegionKey {
    Main,
    Img2,
    Img3,
}

impl RegionKey {
    /// Index into the compacted image list.
    #[must_use]
    pub fn image_index(self) -> usize {
        match self {
            Self::Main => 0,
            Self::Img2 => 1,
            Self::Img3 => 2,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Img2 => "img2",
            Self::Img3 => "img3",
        }
    }
}

/// One placed rectangle of a layout, in composite pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub key: RegionKey,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub radius: u32,
    pub border: u32,
    /// Draw order; higher draws later.
    pub z: u32,
}

impl Region {
    const fn base(key: RegionKey, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { key, x, y, width, height, radius: 0, border: 0, z: 0 }
    }

    const fn inset(key: RegionKey, x: u32, y: u32, z: u32) -> Self {
        Self { key, x, y, width: INSET_SIZE, height: INSET_SIZE, radius: INSET_RADIUS, border: INSET_BORDER, z }
    }
}

const SINGLE: [Region; 1] = [Region::base(RegionKey::Main, 0, 0, 1080, 1080)];
const OVERLAY_SMALL: [Region; 2] =
    [Region::base(RegionKey::Main, 0, 0, 1080, 1080), Region::inset(RegionKey::Img2, 680, 680, 1)];
const STACKED: [Region; 2] =
    [Region::base(RegionKey::Main, 0, 0, 1080, 536), Region::base(RegionKey::Img2, 0, 544, 1080, 536)];
const TWO_INSETS: [Region; 3] = [
    Region::base(RegionKey::Main, 0, 0, 1080, 1080),
    Region::inset(RegionKey::Img2, 40, 680, 1),
    Region::inset(RegionKey::Img3, 680, 680, 2),
];
const MAIN_LEFT: [Region; 3] = [
    Region::base(RegionKey::Main, 0, 0, 536, 1080),
    Region::base(RegionKey::Img2, 544, 0, 536, 536),
    Region::base(RegionKey::Img3, 544, 544, 536, 536),
];
const MAIN_TOP: [Region; 3] = [
    Region::base(RegionKey::Main, 0, 0, 1080, 536),
    Region::base(RegionKey::Img2, 0, 544, 536, 536),
    Region::base(RegionKey::Img3, 544, 544, 536, 536),
];

impl GridLayout {
    pub const ALL: [Self; 6] =
        [Self::Single, Self::OverlaySmall, Self::Stacked, Self::TwoInsets, Self::MainLeft, Self::MainTop];

    /// Stable identifier written to the `grid-layout` field.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Single => "grid-1",
            Self::OverlaySmall => "grid-2a",
            Self::Stacked => "grid-2b",
            Self::TwoInsets => "grid-3a",
            Self::MainLeft => "grid-3b",
            Self::MainTop => "grid-3c",
        }
    }

    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.id() == id.trim())
    }

    /// Number of images the layout is designed for.
    #[must_use]
    pub fn image_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::OverlaySmall | Self::Stacked => 2,
            Self::TwoInsets | Self::MainLeft | Self::MainTop => 3,
        }
    }

    /// Layouts offered for `count` images, default first. Empty outside 1..=3.
    #[must_use]
    pub fn options_for(count: usize) -> &'static [Self] {
        match count {
            1 => &[Self::Single],
            2 => &[Self::OverlaySmall, Self::Stacked],
            3 => &[Self::TwoInsets, Self::MainLeft, Self::MainTop],
            _ => &[],
        }
    }

    /// The requested layout if it is valid for `count`, else the default
    /// for `count`. `None` when there are no images.
    #[must_use]
    pub fn resolve(requested: Option<Self>, count: usize) -> Option<Self> {
        let options = Self::options_for(count);
        match requested {
            Some(layout) if options.contains(&layout) => Some(layout),
            Some(layout) => {
                let fallback = options.first().copied();
                if let Some(f) = fallback {
                    log::debug!("layout {} invalid for {count} images, using {}", layout.id(), f.id());
                }
                fallback
            }
            None => options.first().copied(),
        }
    }

    /// Regions sorted by ascending z.
    #[must_use]
    pub fn regions(self) -> &'static [Region] {
        match self {
            Self::Single => &SINGLE,
            Self::OverlaySmall => &OVERLAY_SMALL,
            Self::Stacked => &STACKED,
            Self::TwoInsets => &TWO_INSETS,
            Self::MainLeft => &MAIN_LEFT,
            Self::MainTop => &MAIN_TOP,
        }
    }
}

impl fmt::Display for GridLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
