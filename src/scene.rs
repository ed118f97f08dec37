//! Typed registry of animated targets, built once from the page markup.

/// Index of an element in the host's element arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetKind {
    Reveal,
    Parallax { speed: f64 },
    Magnetic,
    Tilt,
    Marquee,
}

impl TargetKind {
    /// Marker attributes recognised on page elements.
    pub const ATTRIBUTES: [&'static str; 5] = [
        "data-scroll-reveal",
        "data-parallax",
        "data-magnetic",
        "data-tilt",
        "data-marquee",
    ];

    /// Map one marker attribute to its target kind. Unknown names yield `None`.
    pub fn from_attribute(name: &str, value: &str) -> Option<Self> {
        match name {
            "data-scroll-reveal" => Some(TargetKind::Reveal),
            "data-parallax" => Some(TargetKind::Parallax {
                speed: parse_speed(value),
            }),
            "data-magnetic" => Some(TargetKind::Magnetic),
            "data-tilt" => Some(TargetKind::Tilt),
            "data-marquee" => Some(TargetKind::Marquee),
            _ => None,
        }
    }

    /// CSS selector matching every element carrying any marker.
    pub fn selector() -> String {
        Self::ATTRIBUTES
            .iter()
            .map(|a| format!("[{a}]"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a parallax factor from the longest leading decimal number, so
/// `"0.3px"` reads as `0.3`. Falls back to the default when there is no
/// leading number or it is not finite.
pub fn parse_speed(raw: &str) -> f64 {
    let raw = raw.trim_start();
    raw[..float_prefix_len(raw)]
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite())
        .unwrap_or(DEFAULT_PARALLAX_SPEED)
}

/// Byte length of the leading `[+-]digits[.digits][e[+-]digits]` run.
fn float_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let digits = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_end = digits(i);
    let mut end = int_end;
    let mut mantissa = int_end > i;
    if b.get(end) == Some(&b'.') {
        let frac_end = digits(end + 1);
        mantissa |= frac_end > end + 1;
        end = frac_end;
    }
    if !mantissa {
        return 0;
    }
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits(j);
        if exp_end > j {
            end = exp_end;
        }
    }
    end
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDescriptor {
    pub element: ElementId,
    pub kind: TargetKind,
}

/// The two overlay layers of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorLayers {
    pub ring: ElementId,
    pub dot: ElementId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub targets: Vec<TargetDescriptor>,
    pub cursor: Option<CursorLayers>,
    /// Headline letters in reading order.
    pub headline: Vec<ElementId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: ElementId, kind: TargetKind) -> &mut Self {
        self.targets.push(TargetDescriptor { element, kind });
        self
    }

    pub fn with_cursor(mut self, ring: ElementId, dot: ElementId) -> Self {
        self.cursor = Some(CursorLayers { ring, dot });
        self
    }

    pub fn with_headline(mut self, letters: Vec<ElementId>) -> Self {
        self.headline = letters;
        self
    }

    pub fn reveal_targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.targets
            .iter()
            .filter(|t| t.kind == TargetKind::Reveal)
            .map(|t| t.element)
    }

    pub fn parallax_targets(&self) -> impl Iterator<Item = (ElementId, f64)> + '_ {
        self.targets.iter().filter_map(|t| match t.kind {
            TargetKind::Parallax { speed } => Some((t.element, speed)),
            _ => None,
        })
    }

    pub fn magnetic_targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.of_kind(TargetKind::Magnetic)
    }

    pub fn tilt_targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.of_kind(TargetKind::Tilt)
    }

    pub fn marquee_targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.of_kind(TargetKind::Marquee)
    }

    fn of_kind(&self, kind: TargetKind) -> impl Iterator<Item = ElementId> + '_ {
        self.targets
            .iter()
            .filter(move |t| t.kind == kind)
            .map(|t| t.element)
    }
}
