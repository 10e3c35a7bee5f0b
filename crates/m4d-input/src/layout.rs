use log::{debug, warn};
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use thiserror::Error;

/// Fields per region line: type, value, x, y, width, height.
const FIELDS_PER_LINE: usize = 6;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("failed to read layout resource: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: unknown region type {kind}")]
    UnknownKind { line: usize, kind: i32 },
    #[error("line {line}: region extends past the coordinate range")]
    OutOfRange { line: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Reference frame the rest of the layout is authored against.
    MainRect,
    StickRect,
    ButtonRect,
    StickImage,
    ButtonImage,
    Switch,
    AnalogRect,
}

impl RegionKind {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::MainRect),
            2 => Some(Self::StickRect),
            3 => Some(Self::ButtonRect),
            4 => Some(Self::StickImage),
            5 => Some(Self::ButtonImage),
            6 => Some(Self::Switch),
            7 => Some(Self::AnalogRect),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::MainRect => 1,
            Self::StickRect => 2,
            Self::ButtonRect => 3,
            Self::StickImage => 4,
            Self::ButtonImage => 5,
            Self::Switch => 6,
            Self::AnalogRect => 7,
        }
    }

    pub fn is_button(self) -> bool {
        matches!(self, Self::ButtonRect | Self::ButtonImage)
    }

    pub fn is_stick(self) -> bool {
        matches!(self, Self::StickRect | Self::StickImage | Self::AnalogRect)
    }
}

/// Axis-aligned rectangle; contains its left/top edges but not right/bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.left < self.right
            && self.top < self.bottom
            && x >= self.left
            && x < self.right
            && y >= self.top
            && y < self.bottom
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left as f32 + self.right as f32) / 2.0,
            (self.top as f32 + self.bottom as f32) / 2.0,
        )
    }

    /// Grows or shrinks the rectangle around its center.
    pub fn scaled_about_center(&self, factor: f32) -> Self {
        let (cx, cy) = self.center();
        let half_w = self.width() as f32 * factor / 2.0;
        let half_h = self.height() as f32 * factor / 2.0;
        Self::new(
            (cx - half_w).round() as i32,
            (cy - half_h).round() as i32,
            (cx + half_w).round() as i32,
            (cy + half_h).round() as i32,
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{} - {},{}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputRegion {
    pub kind: RegionKind,
    /// Button id or stick direction, depending on `kind`.
    pub value: i32,
    pub rect: Rect,
    pub orig_rect: Rect,
}

impl InputRegion {
    pub fn new(kind: RegionKind, value: i32, rect: Rect) -> Self {
        Self {
            kind,
            value,
            rect,
            orig_rect: rect,
        }
    }
}

/// Scale applied for the 1..=5 button/stick size preference.
pub fn size_factor(level: u8) -> f32 {
    match level {
        1 => 0.8,
        2 => 0.9,
        4 => 1.1,
        5 => 1.2,
        _ => 1.0,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputLayout {
    regions: Vec<InputRegion>,
}

impl InputLayout {
    pub fn new(regions: Vec<InputRegion>) -> Self {
        Self { regions }
    }

    /// Parses a layout resource. Malformed lines are logged and skipped.
    pub fn parse(text: &str) -> Self {
        let mut regions = Vec::new();
        for (line_no, raw) in text.lines().enumerate() {
            push_line(&mut regions, line_no + 1, raw);
        }
        Self { regions }
    }

    /// Parses a layout resource from a reader. Only I/O failures are
    /// returned; malformed lines are logged and skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LayoutError> {
        let mut regions = Vec::new();
        for (line_no, raw) in reader.lines().enumerate() {
            push_line(&mut regions, line_no + 1, &raw?);
        }
        Ok(Self { regions })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LayoutError> {
        let file = std::fs::File::open(path)?;
        let layout = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(
            "Loaded {} layout regions from {}",
            layout.regions.len(),
            path.display()
        );
        Ok(layout)
    }

    pub fn regions(&self) -> &[InputRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn main_rect(&self) -> Option<Rect> {
        self.regions
            .iter()
            .find(|r| r.kind == RegionKind::MainRect)
            .map(|r| r.orig_rect)
    }

    /// Regions whose current rectangle contains the point.
    pub fn regions_at(&self, x: i32, y: i32) -> impl Iterator<Item = &InputRegion> {
        self.regions.iter().filter(move |r| r.rect.contains(x, y))
    }

    /// Rebuilds every region rectangle from its original for a view of the
    /// given size, then applies the button and stick size levels.
    pub fn fit_to(&mut self, width: i32, height: i32, button_size: u8, stick_size: u8) {
        let main = self.main_rect().filter(|r| !r.is_empty());
        let (origin_x, origin_y, sx, sy) = match main {
            Some(m) if width > 0 && height > 0 => (
                m.left,
                m.top,
                width as f32 / m.width() as f32,
                height as f32 / m.height() as f32,
            ),
            _ => (0, 0, 1.0, 1.0),
        };

        let button_factor = size_factor(button_size);
        let stick_factor = size_factor(stick_size);

        for region in &mut self.regions {
            let o = region.orig_rect;
            // Float to int casts saturate.
            let fit = |v: i32, origin: i32, scale: f32| {
                ((i64::from(v) - i64::from(origin)) as f32 * scale).round() as i32
            };
            let mut rect = Rect::new(
                fit(o.left, origin_x, sx),
                fit(o.top, origin_y, sy),
                fit(o.right, origin_x, sx),
                fit(o.bottom, origin_y, sy),
            );
            if region.kind.is_button() && button_factor != 1.0 {
                rect = rect.scaled_about_center(button_factor);
            } else if region.kind.is_stick() && stick_factor != 1.0 {
                rect = rect.scaled_about_center(stick_factor);
            }
            region.rect = rect;
        }
    }
}

fn push_line(regions: &mut Vec<InputRegion>, line_no: usize, raw: &str) {
    match parse_line(line_no, raw) {
        Ok(Some(region)) => regions.push(region),
        Ok(None) => {}
        Err(e) => warn!("Ignoring layout line: {e}"),
    }
}

fn parse_line(line_no: usize, raw: &str) -> Result<Option<InputRegion>, LayoutError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with("//") {
        return Ok(None);
    }

    let mut fields = [0i32; FIELDS_PER_LINE];
    let mut count = 0;

    for token in line.split(',') {
        if count == FIELDS_PER_LINE {
            break;
        }
        let (token, truncated) = match token.find('/') {
            Some(idx) => (&token[..idx], true),
            None => (token, false),
        };
        let token = token.trim();
        if token.is_empty() {
            break;
        }
        fields[count] = token.parse().map_err(|_| LayoutError::InvalidNumber {
            line: line_no,
            token: token.to_string(),
        })?;
        count += 1;
        if truncated {
            break;
        }
    }

    if count == 0 {
        return Ok(None);
    }

    let kind = RegionKind::from_code(fields[0]).ok_or(LayoutError::UnknownKind {
        line: line_no,
        kind: fields[0],
    })?;
    let [_, value, x, y, width, height] = fields;
    let (Some(right), Some(bottom)) = (x.checked_add(width), y.checked_add(height)) else {
        return Err(LayoutError::OutOfRange { line: line_no });
    };
    Ok(Some(InputRegion::new(kind, value, Rect::new(x, y, right, bottom))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_regions_and_skips_comments() {
        let layout = InputLayout::parse(
            "// landscape\n1,0,0,0,480,320\n\n3,0,400,250,40,40\n  // indented comment\n",
        );
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.regions()[0].kind, RegionKind::MainRect);
        assert_eq!(layout.regions()[1].rect, Rect::new(400, 250, 440, 290));
        assert_eq!(layout.regions()[1].orig_rect, layout.regions()[1].rect);
    }

    #[test]
    fn slash_suffix_truncates_token_and_ends_line() {
        let layout = InputLayout::parse("3,1,10,20,30,40/button b, garbage\n");
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.regions()[0].value, 1);
        assert_eq!(layout.regions()[0].rect, Rect::new(10, 20, 40, 60));
    }

    #[test]
    fn blank_token_stops_consumption_and_zero_fills() {
        let layout = InputLayout::parse("3,2,10,,99,99\n");
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.regions()[0].rect, Rect::new(10, 0, 10, 0));
    }

    #[test]
    fn malformed_lines_are_skipped_and_parsing_continues() {
        let layout = InputLayout::parse("3,x,0,0,10,10\n42,0,0,0,1,1\n3,4,0,0,10,10\n");
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.regions()[0].value, 4);
    }

    #[test]
    fn overflowing_extent_skips_only_that_line() {
        let layout = InputLayout::parse("3,0,2147483647,0,10,10\n3,1,0,-2147483648,10,-1\n3,2,0,0,10,10\n");
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.regions()[0].value, 2);
    }

    #[test]
    fn fit_to_saturates_extreme_coordinates() {
        let mut layout = InputLayout::parse("1,0,-2147483648,0,100,100\n3,0,2147483000,0,600,10\n");
        layout.fit_to(1000, 1000, 5, 3);
        let rect = layout.regions()[1].rect;
        assert_eq!(rect.left, i32::MAX);
        assert_eq!(rect.right, i32::MAX);
        assert!(rect.is_empty());
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(0, 0));
        assert!(r.contains(9, 9));
        assert!(!r.contains(10, 5));
        assert!(!r.contains(5, 10));
        assert!(!Rect::new(5, 5, 5, 5).contains(5, 5));
    }

    #[test]
    fn fit_to_scales_from_main_rect_and_is_idempotent() {
        let mut layout = InputLayout::parse("1,0,0,0,100,50\n3,0,10,10,20,20\n");
        layout.fit_to(200, 100, 3, 3);
        assert_eq!(layout.regions()[1].rect, Rect::new(20, 20, 60, 60));
        layout.fit_to(200, 100, 3, 3);
        assert_eq!(layout.regions()[1].rect, Rect::new(20, 20, 60, 60));
        assert_eq!(layout.regions()[1].orig_rect, Rect::new(10, 10, 30, 30));
    }

    #[test]
    fn size_levels_resize_buttons_and_sticks_independently() {
        let mut layout = InputLayout::parse("3,0,0,0,100,100\n2,2,0,0,100,100\n");
        layout.fit_to(0, 0, 5, 1);
        assert_eq!(layout.regions()[0].rect, Rect::new(-10, -10, 110, 110));
        assert_eq!(layout.regions()[1].rect, Rect::new(10, 10, 90, 90));
    }
}
